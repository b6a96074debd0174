// ==========================================
// 端架库位整合 - 表格导入器实现
// ==========================================
// 流程: 解析 → 必需列校验 → 字段映射（行级错误跳过并告警）
// 红线: 表级错误（文件/格式/工作表/缺列）直接失败，不产生部分结果
// ==========================================

use crate::domain::endcap::EndcapRecord;
use crate::domain::open_space::OpenSpaceRecord;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::{check_required_columns, EndcapFieldMapper, OpenSpaceFieldMapper};
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::importer_trait::{FieldMapper, FileParser};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{info, instrument, warn};

/// 单表导入结果
#[derive(Debug, Clone)]
pub struct ImportedTable<T> {
    pub records: Vec<T>,
    pub rejected_rows: Vec<(usize, String)>, // (行号, 原因)
}

// ==========================================
// TableImporter - 表格导入器
// ==========================================
pub struct TableImporter {
    endcap_parser: Box<dyn FileParser>,
    open_space_parser: Box<dyn FileParser>,
}

impl TableImporter {
    /// # 参数
    /// - `endcap_parser`: 端架表解析器
    /// - `open_space_parser`: 空闲储位表解析器
    pub fn new(endcap_parser: Box<dyn FileParser>, open_space_parser: Box<dyn FileParser>) -> Self {
        Self {
            endcap_parser,
            open_space_parser,
        }
    }

    /// 按工作表名构建（None 表示读取第一个工作表）
    pub fn with_sheets(endcap_sheet: Option<String>, open_space_sheet: Option<String>) -> Self {
        Self::new(
            Box::new(UniversalFileParser::new(endcap_sheet)),
            Box::new(UniversalFileParser::new(open_space_sheet)),
        )
    }

    /// 导入端架表
    #[instrument(skip(self, path), fields(file = %path.as_ref().display()))]
    pub fn import_endcaps<P: AsRef<Path>>(&self, path: P) -> ImportResult<ImportedTable<EndcapRecord>> {
        import_table(self.endcap_parser.as_ref(), path.as_ref(), &EndcapFieldMapper)
    }

    /// 导入空闲储位表
    #[instrument(skip(self, path), fields(file = %path.as_ref().display()))]
    pub fn import_open_space<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> ImportResult<ImportedTable<OpenSpaceRecord>> {
        import_table(self.open_space_parser.as_ref(), path.as_ref(), &OpenSpaceFieldMapper)
    }

    /// 端架表中出现的全部储位类型（去重、排序），供调用方选择待清空类型
    pub fn list_storage_types(records: &[EndcapRecord]) -> Vec<String> {
        records
            .iter()
            .map(|r| r.storage_type.trim())
            .filter(|t| !t.is_empty())
            .map(|t| t.to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

fn import_table<M: FieldMapper>(
    parser: &dyn FileParser,
    path: &Path,
    mapper: &M,
) -> ImportResult<ImportedTable<M::Record>> {
    let table = parser.parse_table(path)?;
    check_required_columns(&table.headers, mapper.required_columns())?;

    let mut records = Vec::with_capacity(table.rows.len());
    let mut rejected_rows = Vec::new();
    for row in &table.rows {
        match mapper.map_row(row) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(row_number = row.row_number, error = %e, "行映射失败，已跳过");
                rejected_rows.push((row.row_number, e.to_string()));
            }
        }
    }

    info!(
        total_rows = table.rows.len(),
        imported = records.len(),
        rejected = rejected_rows.len(),
        "表格导入完成"
    );
    Ok(ImportedTable {
        records,
        rejected_rows,
    })
}
