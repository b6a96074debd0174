// ==========================================
// 端架库位整合 - 导入层
// ==========================================
// 职责: 外部表格导入,生成内部记录
// 支持: Excel, CSV
// ==========================================

pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod importer_trait;
pub mod table_importer;

// 重导出核心类型
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use error::{ImportError, ImportResult};
pub use field_mapper::{check_required_columns, columns, EndcapFieldMapper, OpenSpaceFieldMapper};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use table_importer::{ImportedTable, TableImporter};

// 重导出 Trait 接口
pub use importer_trait::{DataCleaner, FieldMapper, FileParser, RawRow, RawTable};
