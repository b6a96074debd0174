// ==========================================
// 端架库位整合 - 字段映射器实现
// ==========================================
// 职责: 源列 → 记录字段映射 + 类型转换
// 端架表必需列: Storage Type, Storage Unit, Storage Bin, Material, Batch, Total Stock
// 空闲储位表必需列: Storage Type, Storage Bin, Material Number, Batch Number,
//                  Utilization %, Avail SU, SU Capacity
// ==========================================

use crate::domain::endcap::EndcapRecord;
use crate::domain::open_space::OpenSpaceRecord;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::{DataCleaner as _, FieldMapper, RawRow};
use tracing::warn;

/// 列名常量
pub mod columns {
    pub const STORAGE_TYPE: &str = "Storage Type";
    pub const STORAGE_UNIT: &str = "Storage Unit";
    pub const STORAGE_BIN: &str = "Storage Bin";
    pub const MATERIAL: &str = "Material";
    pub const BATCH: &str = "Batch";
    pub const TOTAL_STOCK: &str = "Total Stock";
    pub const MATERIAL_NUMBER: &str = "Material Number";
    pub const BATCH_NUMBER: &str = "Batch Number";
    pub const UTILIZATION_PCT: &str = "Utilization %";
    pub const AVAIL_SU: &str = "Avail SU";
    pub const SU_CAPACITY: &str = "SU Capacity";
}

const ENDCAP_COLUMNS: [&str; 6] = [
    columns::STORAGE_TYPE,
    columns::STORAGE_UNIT,
    columns::STORAGE_BIN,
    columns::MATERIAL,
    columns::BATCH,
    columns::TOTAL_STOCK,
];

const OPEN_SPACE_COLUMNS: [&str; 7] = [
    columns::STORAGE_TYPE,
    columns::STORAGE_BIN,
    columns::MATERIAL_NUMBER,
    columns::BATCH_NUMBER,
    columns::UTILIZATION_PCT,
    columns::AVAIL_SU,
    columns::SU_CAPACITY,
];

/// 列名别名（不同导出版本的表头写法）
fn aliases(key: &str) -> &'static [&'static str] {
    match key {
        columns::UTILIZATION_PCT => &["Utilization %", "Utilization%", "Utilization (%)"],
        columns::AVAIL_SU => &["Avail SU", "Available SU", "Avail. SU"],
        columns::SU_CAPACITY => &["SU Capacity", "SU Cap", "SU Capacity (SU)"],
        columns::STORAGE_UNIT => &["Storage Unit", "Storage Unit (SU)"],
        columns::STORAGE_TYPE => &["Storage Type"],
        columns::STORAGE_BIN => &["Storage Bin"],
        columns::MATERIAL => &["Material"],
        columns::BATCH => &["Batch"],
        columns::TOTAL_STOCK => &["Total Stock"],
        columns::MATERIAL_NUMBER => &["Material Number", "Material No."],
        columns::BATCH_NUMBER => &["Batch Number", "Batch No."],
        _ => &[],
    }
}

/// 校验表头包含全部必需列（含别名）
///
/// # 返回
/// - Ok(()): 全部存在
/// - Err(MissingColumns): 列出所有缺失列
pub fn check_required_columns(headers: &[String], required: &[&str]) -> ImportResult<()> {
    let missing: Vec<String> = required
        .iter()
        .filter(|key| {
            !aliases(key)
                .iter()
                .any(|alias| headers.iter().any(|h| h == alias))
        })
        .map(|key| key.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ImportError::MissingColumns(missing))
    }
}

/// 提取字符串字段，支持别名；空值返回 None
fn get_string(row: &RawRow, key: &str) -> Option<String> {
    aliases(key)
        .iter()
        .find_map(|alias| DataCleaner.normalize_null(row.get(alias)))
}

/// 提取文本字段，缺失视为空串
fn get_text(row: &RawRow, key: &str) -> String {
    get_string(row, key).unwrap_or_default()
}

// ==========================================
// EndcapFieldMapper - 端架表映射
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct EndcapFieldMapper;

impl FieldMapper for EndcapFieldMapper {
    type Record = EndcapRecord;

    fn required_columns(&self) -> &'static [&'static str] {
        &ENDCAP_COLUMNS
    }

    fn map_row(&self, row: &RawRow) -> ImportResult<EndcapRecord> {
        let total_stock = get_string(row, columns::TOTAL_STOCK).and_then(|v| {
            let parsed = DataCleaner.parse_number(&v);
            if parsed.is_none() {
                warn!(row_number = row.row_number, value = %v, "Total Stock 无法解析为数值");
            }
            parsed
        });

        Ok(EndcapRecord {
            storage_type: get_text(row, columns::STORAGE_TYPE),
            storage_unit: get_text(row, columns::STORAGE_UNIT),
            storage_bin: get_text(row, columns::STORAGE_BIN),
            material: get_text(row, columns::MATERIAL),
            batch: get_text(row, columns::BATCH),
            total_stock,
            row_number: row.row_number,
        })
    }
}

// ==========================================
// OpenSpaceFieldMapper - 空闲储位表映射
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenSpaceFieldMapper;

impl FieldMapper for OpenSpaceFieldMapper {
    type Record = OpenSpaceRecord;

    fn required_columns(&self) -> &'static [&'static str] {
        &OPEN_SPACE_COLUMNS
    }

    fn map_row(&self, row: &RawRow) -> ImportResult<OpenSpaceRecord> {
        let storage_bin = get_text(row, columns::STORAGE_BIN);

        // 利用率无法解析 → None（候选池会排除该行）
        let utilization_pct = get_string(row, columns::UTILIZATION_PCT)
            .and_then(|v| DataCleaner.parse_number(&v));

        // Avail SU 无法解析 → 0（永不可预留）
        let avail_su = match get_string(row, columns::AVAIL_SU) {
            None => 0,
            Some(v) => DataCleaner.parse_count(&v).unwrap_or_else(|| {
                warn!(
                    row_number = row.row_number,
                    storage_bin = %storage_bin,
                    value = %v,
                    "Avail SU 无法解析，按 0 处理"
                );
                0
            }),
        };

        let su_capacity = get_string(row, columns::SU_CAPACITY)
            .and_then(|v| DataCleaner.parse_count(&v));

        if storage_bin.is_empty() {
            return Err(ImportError::TypeConversionError {
                row: row.row_number,
                field: columns::STORAGE_BIN.to_string(),
                message: "储位号为空".to_string(),
            });
        }

        Ok(OpenSpaceRecord {
            storage_type: get_text(row, columns::STORAGE_TYPE),
            storage_bin,
            material_number: get_text(row, columns::MATERIAL_NUMBER),
            batch_number: get_text(row, columns::BATCH_NUMBER),
            utilization_pct,
            avail_su,
            su_capacity,
            row_number: row.row_number,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn raw(pairs: &[(&str, &str)]) -> RawRow {
        RawRow {
            row_number: 2,
            values: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        }
    }

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_check_required_columns_ok_with_alias() {
        let h = headers(&[
            "Storage Type",
            "Storage Bin",
            "Material Number",
            "Batch Number",
            "Utilization%",
            "Available SU",
            "SU Capacity",
            "Extra",
        ]);
        assert!(check_required_columns(&h, &OPEN_SPACE_COLUMNS).is_ok());
    }

    #[test]
    fn test_check_required_columns_lists_missing() {
        let h = headers(&["Storage Type", "Material", "Batch"]);
        match check_required_columns(&h, &ENDCAP_COLUMNS) {
            Err(ImportError::MissingColumns(missing)) => {
                assert_eq!(missing, vec!["Storage Unit", "Storage Bin", "Total Stock"]);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_endcap_mapper_basic() {
        let row = raw(&[
            ("Storage Type", "END"),
            ("Storage Unit", "SU1"),
            ("Storage Bin", "E-01"),
            ("Material", "M1"),
            ("Batch", "AB15010101"),
            ("Total Stock", "12.5"),
        ]);
        let record = EndcapFieldMapper.map_row(&row).unwrap();
        assert_eq!(record.storage_unit, "SU1");
        assert_eq!(record.total_stock, Some(12.5));
        assert_eq!(record.row_number, 2);
    }

    #[test]
    fn test_endcap_mapper_nan_batch_is_empty() {
        let row = raw(&[("Storage Unit", "SU1"), ("Batch", "nan"), ("Total Stock", "x")]);
        let record = EndcapFieldMapper.map_row(&row).unwrap();
        assert_eq!(record.batch, "");
        assert_eq!(record.total_stock, None);
    }

    #[test]
    fn test_open_space_mapper_coerces_numbers() {
        let row = raw(&[
            ("Storage Type", "OPN"),
            ("Storage Bin", "B1"),
            ("Material Number", "M1"),
            ("Batch Number", "AB15010101"),
            ("Utilization %", "40%"),
            ("Avail SU", "2.0"),
            ("SU Capacity", "4"),
        ]);
        let record = OpenSpaceFieldMapper.map_row(&row).unwrap();
        assert_eq!(record.utilization_pct, Some(40.0));
        assert_eq!(record.avail_su, 2);
        assert_eq!(record.su_capacity, Some(4));
    }

    #[test]
    fn test_open_space_mapper_bad_avail_is_zero() {
        let row = raw(&[("Storage Bin", "B1"), ("Avail SU", "n/a"), ("Utilization %", "??")]);
        let record = OpenSpaceFieldMapper.map_row(&row).unwrap();
        assert_eq!(record.avail_su, 0);
        assert_eq!(record.utilization_pct, None);
    }

    #[test]
    fn test_open_space_mapper_requires_bin() {
        let row = raw(&[("Storage Type", "OPN")]);
        assert!(matches!(
            OpenSpaceFieldMapper.map_row(&row),
            Err(ImportError::TypeConversionError { row: 2, .. })
        ));
    }
}
