// ==========================================
// 端架库位整合 - 台账写出器
// ==========================================
// CSV: 表头固定为 LEDGER_HEADERS，零行时仍写表头
// JSON: 行数组，键名与 CSV 表头一致
// ==========================================

use crate::domain::assignment::{Assignment, LEDGER_HEADERS};
use crate::domain::types::LedgerFormat;
use crate::exporter::error::{ExportError, ExportResult};
use csv::WriterBuilder;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{info, instrument};

#[derive(Debug, Clone, Copy, Default)]
pub struct LedgerWriter {
    format: LedgerFormat,
}

impl LedgerWriter {
    pub fn new(format: LedgerFormat) -> Self {
        Self { format }
    }

    /// 写出到文件（父目录不存在时创建）
    #[instrument(skip(self, rows, path), fields(format = %self.format, rows = rows.len()))]
    pub fn write_to_path<P: AsRef<Path>>(&self, rows: &[Assignment], path: P) -> ExportResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ExportError::CreateDirFailed {
                path: parent.display().to_string(),
                message: e.to_string(),
            })?;
        }

        let file = File::create(path)?;
        self.write(rows, BufWriter::new(file))?;
        info!(path = %path.display(), "台账已写出");
        Ok(())
    }

    /// 写出到任意 Writer
    pub fn write<W: Write>(&self, rows: &[Assignment], writer: W) -> ExportResult<()> {
        match self.format {
            LedgerFormat::Csv => write_csv(rows, writer),
            LedgerFormat::Json => write_json(rows, writer),
        }
    }
}

fn write_csv<W: Write>(rows: &[Assignment], writer: W) -> ExportResult<()> {
    // 表头单独写出，保证零行时也有表头；行内容按 Assignment 的 serde 列名序列化
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(LEDGER_HEADERS)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_json<W: Write>(rows: &[Assignment], mut writer: W) -> ExportResult<()> {
    serde_json::to_writer_pretty(&mut writer, rows)?;
    writer.flush()?;
    Ok(())
}
