// ==========================================
// 端架库位整合 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 输入表种类
// ==========================================
// 用于错误信息中指明是哪一份输入失败
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InputKind {
    Endcaps,   // 端架表
    OpenSpace, // 空闲储位表
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputKind::Endcaps => write!(f, "ENDCAPS"),
            InputKind::OpenSpace => write!(f, "OPEN_SPACE"),
        }
    }
}

// ==========================================
// 台账导出格式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerFormat {
    #[default]
    Csv,
    Json,
}

impl LedgerFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            LedgerFormat::Csv => "csv",
            LedgerFormat::Json => "json",
        }
    }
}

impl fmt::Display for LedgerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for LedgerFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(LedgerFormat::Csv),
            "json" => Ok(LedgerFormat::Json),
            other => Err(format!("不支持的导出格式: {}", other)),
        }
    }
}
