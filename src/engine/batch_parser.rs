// ==========================================
// 端架库位整合 - 批次标识解析器
// ==========================================
// 规则:
// 1) 长度 < 10 → 前缀/日期均为 None
// 2) 前缀 = 前两位字符
// 3) 末四位 = WWYY，年份 = 2000 + YY
// 4) 日期 = 该年第 WW 周的周一（周一为周首，首个周一之前为第 0 周）
// 红线: 纯函数，不报错，失败字段降级为 None
// ==========================================

use crate::domain::batch::BatchIdentifier;
use chrono::{Datelike, Duration, NaiveDate};

/// 可解析批次号的最小长度（字符数）
pub const MIN_BATCH_CODE_LEN: usize = 10;

/// 年份基准（YY → 2000 + YY）
pub const BATCH_YEAR_BASE: i32 = 2000;

/// 周次上限（含）
pub const MAX_WEEK_NUMBER: u32 = 53;

// ==========================================
// BatchIdentifierParser - 批次标识解析器
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchIdentifierParser;

impl BatchIdentifierParser {
    pub fn new() -> Self {
        Self
    }

    /// 解析批次号
    ///
    /// # 参数
    /// - `code`: 批次号（调用方负责 TRIM）
    ///
    /// # 返回
    /// BatchIdentifier（字段可能为 None）
    pub fn parse(&self, code: &str) -> BatchIdentifier {
        let chars: Vec<char> = code.chars().collect();
        if chars.len() < MIN_BATCH_CODE_LEN {
            return BatchIdentifier::unknown();
        }

        let prefix: String = chars[..2].iter().collect();
        let tail = &chars[chars.len() - 4..];
        let week_date = match (two_digits(&tail[..2]), two_digits(&tail[2..])) {
            (Some(week), Some(year_suffix)) => {
                monday_of_week(BATCH_YEAR_BASE + year_suffix as i32, week)
            }
            _ => None,
        };

        BatchIdentifier {
            prefix: Some(prefix),
            week_date,
        }
    }
}

/// 便捷函数：使用默认解析器解析批次号
pub fn parse_batch(code: &str) -> BatchIdentifier {
    BatchIdentifierParser.parse(code)
}

/// 计算某年第 `week` 周周一的日期
///
/// 第 0 周为 1 月 1 日当天或之前最近的周一；第 n 周（n ≥ 1）为当年第 n 个周一。
/// 第 53 周可能落入次年。
pub fn monday_of_week(year: i32, week: u32) -> Option<NaiveDate> {
    if week > MAX_WEEK_NUMBER {
        return None;
    }

    let jan_first = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let first_weekday = jan_first.weekday().num_days_from_monday() as i64;
    let offset_days = if week == 0 {
        -first_weekday
    } else {
        (7 - first_weekday) % 7 + 7 * (week as i64 - 1)
    };

    jan_first.checked_add_signed(Duration::days(offset_days))
}

/// 两位 ASCII 数字 → u32
fn two_digits(chars: &[char]) -> Option<u32> {
    if chars.len() != 2 {
        return None;
    }
    let tens = chars[0].to_digit(10)?;
    let ones = chars[1].to_digit(10)?;
    Some(tens * 10 + ones)
}
