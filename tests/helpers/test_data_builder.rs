// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================
// 端架表/空闲储位表行构建器，可直接生成领域记录或写出 CSV 夹具
// ==========================================

use endcap_consolidation::domain::{EndcapRecord, OpenSpaceRecord};
use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const ENDCAP_HEADER: [&str; 6] = [
    "Storage Type",
    "Storage Unit",
    "Storage Bin",
    "Material",
    "Batch",
    "Total Stock",
];

pub const OPEN_SPACE_HEADER: [&str; 7] = [
    "Storage Type",
    "Storage Bin",
    "Material Number",
    "Batch Number",
    "Utilization %",
    "Avail SU",
    "SU Capacity",
];

// ==========================================
// 端架表行构建器
// ==========================================

#[derive(Debug, Clone)]
pub struct EndcapRowBuilder {
    storage_type: String,
    storage_unit: String,
    storage_bin: String,
    material: String,
    batch: String,
    total_stock: Option<f64>,
}

impl EndcapRowBuilder {
    pub fn new(storage_unit: &str, material: &str, batch: &str) -> Self {
        Self {
            storage_type: "END".to_string(),
            storage_unit: storage_unit.to_string(),
            storage_bin: format!("E-{}", storage_unit),
            material: material.to_string(),
            batch: batch.to_string(),
            total_stock: Some(10.0),
        }
    }

    pub fn storage_type(mut self, storage_type: &str) -> Self {
        self.storage_type = storage_type.to_string();
        self
    }

    pub fn bin(mut self, bin: &str) -> Self {
        self.storage_bin = bin.to_string();
        self
    }

    pub fn total_stock(mut self, stock: Option<f64>) -> Self {
        self.total_stock = stock;
        self
    }

    pub fn build(&self, row_number: usize) -> EndcapRecord {
        EndcapRecord {
            storage_type: self.storage_type.clone(),
            storage_unit: self.storage_unit.clone(),
            storage_bin: self.storage_bin.clone(),
            material: self.material.clone(),
            batch: self.batch.clone(),
            total_stock: self.total_stock,
            row_number,
        }
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.storage_type.clone(),
            self.storage_unit.clone(),
            self.storage_bin.clone(),
            self.material.clone(),
            self.batch.clone(),
            self.total_stock.map(|v| v.to_string()).unwrap_or_default(),
        ]
    }
}

// ==========================================
// 空闲储位表行构建器
// ==========================================

#[derive(Debug, Clone)]
pub struct OpenSpaceRowBuilder {
    storage_type: String,
    storage_bin: String,
    material_number: String,
    batch_number: String,
    utilization_pct: Option<f64>,
    avail_su: u32,
    su_capacity: Option<u32>,
}

impl OpenSpaceRowBuilder {
    pub fn new(bin: &str, material: &str, batch: &str) -> Self {
        Self {
            storage_type: "OPN".to_string(),
            storage_bin: bin.to_string(),
            material_number: material.to_string(),
            batch_number: batch.to_string(),
            utilization_pct: Some(40.0),
            avail_su: 2,
            su_capacity: Some(4),
        }
    }

    pub fn storage_type(mut self, storage_type: &str) -> Self {
        self.storage_type = storage_type.to_string();
        self
    }

    pub fn utilization(mut self, pct: Option<f64>) -> Self {
        self.utilization_pct = pct;
        self
    }

    pub fn avail(mut self, avail_su: u32) -> Self {
        self.avail_su = avail_su;
        self
    }

    pub fn capacity(mut self, capacity: Option<u32>) -> Self {
        self.su_capacity = capacity;
        self
    }

    pub fn build(&self, row_number: usize) -> OpenSpaceRecord {
        OpenSpaceRecord {
            storage_type: self.storage_type.clone(),
            storage_bin: self.storage_bin.clone(),
            material_number: self.material_number.clone(),
            batch_number: self.batch_number.clone(),
            utilization_pct: self.utilization_pct,
            avail_su: self.avail_su,
            su_capacity: self.su_capacity,
            row_number,
        }
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.storage_type.clone(),
            self.storage_bin.clone(),
            self.material_number.clone(),
            self.batch_number.clone(),
            self.utilization_pct.map(|v| v.to_string()).unwrap_or_default(),
            self.avail_su.to_string(),
            self.su_capacity.map(|v| v.to_string()).unwrap_or_default(),
        ]
    }
}

// ==========================================
// 批量生成
// ==========================================

pub fn endcap_records(rows: &[EndcapRowBuilder]) -> Vec<EndcapRecord> {
    rows.iter().enumerate().map(|(i, r)| r.build(i + 2)).collect()
}

pub fn open_space_records(rows: &[OpenSpaceRowBuilder]) -> Vec<OpenSpaceRecord> {
    rows.iter().enumerate().map(|(i, r)| r.build(i + 2)).collect()
}

pub fn types(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ==========================================
// CSV 夹具
// ==========================================

pub fn write_endcaps_csv(dir: &TempDir, rows: &[EndcapRowBuilder]) -> PathBuf {
    let path = dir.path().join("endcaps.csv");
    write_csv(&path, &ENDCAP_HEADER, rows.iter().map(|r| r.to_row()));
    path
}

pub fn write_open_space_csv(dir: &TempDir, rows: &[OpenSpaceRowBuilder]) -> PathBuf {
    let path = dir.path().join("open_space.csv");
    write_csv(&path, &OPEN_SPACE_HEADER, rows.iter().map(|r| r.to_row()));
    path
}

/// 写出任意表头/行的 CSV（用于缺列等异常夹具）
pub fn write_raw_csv(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn write_csv<I>(path: &Path, header: &[&str], rows: I)
where
    I: IntoIterator<Item = Vec<String>>,
{
    let file = File::create(path).unwrap();
    let mut wtr = csv::Writer::from_writer(file);
    wtr.write_record(header).unwrap();
    for row in rows {
        wtr.write_record(&row).unwrap();
    }
    wtr.flush().unwrap();
}

/// 读取导出的台账 CSV：(表头, 行[列名 → 值])
pub fn read_ledger(path: &Path) -> (Vec<String>, Vec<HashMap<String, String>>) {
    let mut rdr = csv::Reader::from_path(path).unwrap();
    let headers: Vec<String> = rdr.headers().unwrap().iter().map(|h| h.to_string()).collect();
    let rows = rdr
        .records()
        .map(|r| {
            let record = r.unwrap();
            headers
                .iter()
                .cloned()
                .zip(record.iter().map(|v| v.to_string()))
                .collect()
        })
        .collect();
    (headers, rows)
}
