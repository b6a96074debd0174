// ==========================================
// 端架库位整合 - 整合运行API
// ==========================================
// 职责: 单一入口，显式接收两张输入表与选中类型，返回运行报告或带类型的失败
// 流程: 参数校验 → 导入端架表 → 导入空闲储位表 → 编排运行 → （可选）导出台账
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::ConsolidationConfig;
use crate::domain::report::ConsolidationReport;
use crate::domain::types::{InputKind, LedgerFormat};
use crate::engine::orchestrator::ConsolidationOrchestrator;
use crate::exporter::LedgerWriter;
use crate::importer::TableImporter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// 整合运行请求
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidationRequest {
    /// 端架表路径
    pub endcaps_path: PathBuf,
    /// 空闲储位表路径
    pub open_space_path: PathBuf,
    /// 待清空的端架储位类型
    pub selected_types: BTreeSet<String>,
}

impl ConsolidationRequest {
    pub fn new<I, S>(endcaps_path: impl Into<PathBuf>, open_space_path: impl Into<PathBuf>, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            endcaps_path: endcaps_path.into(),
            open_space_path: open_space_path.into(),
            selected_types: types.into_iter().map(Into::into).collect(),
        }
    }
}

/// 整合运行 + 导出结果
#[derive(Debug, Clone)]
pub struct ConsolidationResponse {
    pub report: ConsolidationReport,
    /// 台账路径（零分配时为仅含表头的台账）
    pub output_path: PathBuf,
}

// ==========================================
// ConsolidationApi
// ==========================================
pub struct ConsolidationApi {
    config: ConsolidationConfig,
    importer: TableImporter,
    orchestrator: ConsolidationOrchestrator,
}

impl ConsolidationApi {
    pub fn new(config: ConsolidationConfig) -> Self {
        let importer =
            TableImporter::with_sheets(config.endcap_sheet.clone(), config.open_space_sheet.clone());
        let orchestrator = ConsolidationOrchestrator::new(config.extra_excluded_types.clone());
        Self {
            config,
            importer,
            orchestrator,
        }
    }

    pub fn config(&self) -> &ConsolidationConfig {
        &self.config
    }

    /// 执行一次整合运行（不写文件）
    ///
    /// # 返回
    /// - Ok(report): 零分配时 report.assignments 为空（NoMatches，不是错误）
    /// - Err(InputRead): 指明失败的输入表
    #[instrument(skip(self, request), fields(
        endcaps = %request.endcaps_path.display(),
        open_space = %request.open_space_path.display()
    ))]
    pub fn run(&self, request: &ConsolidationRequest) -> ApiResult<ConsolidationReport> {
        let selected = normalize_types(&request.selected_types);
        if selected.is_empty() {
            return Err(ApiError::InvalidInput(
                "至少需要选择一个端架储位类型".to_string(),
            ));
        }

        let endcaps = self
            .importer
            .import_endcaps(&request.endcaps_path)
            .map_err(|e| ApiError::input_read(InputKind::Endcaps, e))?;
        let open_space = self
            .importer
            .import_open_space(&request.open_space_path)
            .map_err(|e| ApiError::input_read(InputKind::OpenSpace, e))?;

        if !endcaps.rejected_rows.is_empty() || !open_space.rejected_rows.is_empty() {
            warn!(
                endcap_rejected = endcaps.rejected_rows.len(),
                open_space_rejected = open_space.rejected_rows.len(),
                "部分输入行被跳过"
            );
        }

        let report = self
            .orchestrator
            .run(&endcaps.records, &open_space.records, &selected)?;
        Ok(report)
    }

    /// 运行并导出台账
    ///
    /// # 参数
    /// - `output`: 导出路径（None = 配置中的默认路径）
    /// - `format`: 导出格式（None = 配置中的格式）
    pub fn run_and_export(
        &self,
        request: &ConsolidationRequest,
        output: Option<&Path>,
        format: Option<LedgerFormat>,
    ) -> ApiResult<ConsolidationResponse> {
        let report = self.run(request)?;
        if report.is_empty() {
            info!(run_id = %report.run_id, "无匹配，写出空台账");
        }

        let output_path = self.export(&report, output, format)?;
        Ok(ConsolidationResponse {
            report,
            output_path,
        })
    }

    /// 导出台账，返回实际写出路径
    pub fn export(
        &self,
        report: &ConsolidationReport,
        output: Option<&Path>,
        format: Option<LedgerFormat>,
    ) -> ApiResult<PathBuf> {
        let format = format.unwrap_or(self.config.output_format);
        let path = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.config.default_output_path(format));
        LedgerWriter::new(format).write_to_path(&report.assignments, &path)?;
        Ok(path)
    }

    /// 端架表中的全部储位类型（供选择）
    pub fn list_storage_types<P: AsRef<Path>>(&self, endcaps_path: P) -> ApiResult<Vec<String>> {
        let endcaps = self
            .importer
            .import_endcaps(endcaps_path)
            .map_err(|e| ApiError::input_read(InputKind::Endcaps, e))?;
        Ok(TableImporter::list_storage_types(&endcaps.records))
    }
}

fn normalize_types(types: &BTreeSet<String>) -> BTreeSet<String> {
    types
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_selection_is_invalid_input() {
        let api = ConsolidationApi::new(ConsolidationConfig::default());
        let request = ConsolidationRequest::new("a.csv", "b.csv", Vec::<String>::new());
        assert!(matches!(api.run(&request), Err(ApiError::InvalidInput(_))));
    }

    #[test]
    fn test_blank_selection_is_invalid_input() {
        let api = ConsolidationApi::new(ConsolidationConfig::default());
        let request = ConsolidationRequest::new("a.csv", "b.csv", ["  "]);
        assert!(matches!(api.run(&request), Err(ApiError::InvalidInput(_))));
    }

    #[test]
    fn test_missing_endcap_file_names_endcaps() {
        let api = ConsolidationApi::new(ConsolidationConfig::default());
        let request = ConsolidationRequest::new("/no/such/endcaps.csv", "/no/such/open.csv", ["END"]);
        let err = api.run(&request).unwrap_err();
        assert_eq!(err.failed_input(), Some(InputKind::Endcaps));
    }
}
