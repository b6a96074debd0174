use crate::domain::types::LedgerFormat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// 默认工作表名
pub const DEFAULT_SHEET: &str = "Sheet1";

/// 默认导出文件名（不含扩展名）
pub const DEFAULT_OUTPUT_STEM: &str = "EndCap_Assignments";

/// 整合运行配置
///
/// 所有字段均有默认值，配置文件可只写需要覆盖的部分。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsolidationConfig {
    /// 额外排除的目标储位类型（VIR 固定排除，无需配置）
    #[serde(alias = "always_excluded_types")]
    pub extra_excluded_types: BTreeSet<String>,

    /// 端架表工作表名（None = 第一个工作表；CSV 忽略）
    pub endcap_sheet: Option<String>,

    /// 空闲储位表工作表名（None = 第一个工作表；CSV 忽略）
    pub open_space_sheet: Option<String>,

    /// 导出目录（None = 下载目录，取不到时为当前目录）
    pub output_dir: Option<PathBuf>,

    /// 导出文件名（不含扩展名）
    pub output_file_stem: String,

    /// 导出格式
    pub output_format: LedgerFormat,

    /// 界面语言（en / zh-CN）
    pub locale: String,
}

impl Default for ConsolidationConfig {
    fn default() -> Self {
        Self {
            extra_excluded_types: BTreeSet::new(),
            endcap_sheet: Some(DEFAULT_SHEET.to_string()),
            open_space_sheet: Some(DEFAULT_SHEET.to_string()),
            output_dir: None,
            output_file_stem: DEFAULT_OUTPUT_STEM.to_string(),
            output_format: LedgerFormat::Csv,
            locale: "en".to_string(),
        }
    }
}

impl ConsolidationConfig {
    /// 默认导出路径：output_dir / output_file_stem.{ext}
    pub fn default_output_path(&self, format: LedgerFormat) -> PathBuf {
        let dir = self
            .output_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        dir.join(format!("{}.{}", self.output_file_stem, format.extension()))
    }
}
