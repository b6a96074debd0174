// ==========================================
// 端架库位整合 - 导入管道 Trait
// ==========================================
// 职责: 定义导入各阶段接口（不包含实现）
// 阶段: 文件解析 → 字段映射 → 数据清洗
// ==========================================

use crate::importer::error::ImportResult;
use std::collections::HashMap;
use std::path::Path;

// ==========================================
// RawTable - 原始表
// ==========================================
// 用途: 文件解析产物（列名已 TRIM，单元格已 TRIM）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// 原始行（列名 → 单元格文本）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub row_number: usize, // 文件内行号（表头为第 1 行）
    pub values: HashMap<String, String>,
}

impl RawRow {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(|v| v.as_str())
    }
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始表
    ///
    /// # 返回
    /// - Ok(RawTable): 表头 + 非空行
    /// - Err: 文件不存在、格式错误、工作表缺失
    fn parse_table(&self, file_path: &Path) -> ImportResult<RawTable>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 字段映射接口（阶段 1）
// 实现者: EndcapFieldMapper, OpenSpaceFieldMapper
pub trait FieldMapper: Send + Sync {
    type Record;

    /// 必需列（缺任一列即整表失败）
    fn required_columns(&self) -> &'static [&'static str];

    /// 将原始行映射为记录
    fn map_row(&self, row: &RawRow) -> ImportResult<Self::Record>;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 数据清洗接口（阶段 2）
// 实现者: DataCleaner
pub trait DataCleaner: Send + Sync {
    /// 标准化 NULL 值（空字符串/空白/nan → None）
    fn normalize_null(&self, value: Option<&str>) -> Option<String>;

    /// 宽松解析数值（兼容 "40%"、"1,200"、"2.0"）
    fn parse_number(&self, value: &str) -> Option<f64>;

    /// 解析非负整数计数（小数向下取整，负数归零）
    fn parse_count(&self, value: &str) -> Option<u32>;
}
