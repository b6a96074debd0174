// ==========================================
// 端架库位整合 - 命令行入口
// ==========================================
// 子命令:
//   run         执行整合运行并写出台账
//   list-types  列出端架表中的储位类型
// 输出: 结果到 stdout，日志到 stderr
// ==========================================

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use endcap_consolidation::api::{ApiError, ConsolidationApi, ConsolidationRequest};
use endcap_consolidation::config::{ConfigManager, ConsolidationConfig};
use endcap_consolidation::domain::{ConsolidationReport, LedgerFormat, RunOutcome};
use endcap_consolidation::i18n::{self, t_with_args};
use endcap_consolidation::logging;
use std::path::PathBuf;
use std::process::ExitCode;

/// Endcap consolidation - reassign storage units from emptied endcaps into open bins
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON configuration file (falls back to ENDCAP_CONSOLIDATION_CONFIG)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Message language (en, zh-CN)
    #[arg(long, global = true)]
    lang: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Assign endcap storage units of the selected types to open-space bins
    Run {
        /// Endcap table (.xlsx/.xls/.xlsm/.ods/.csv)
        #[arg(long)]
        endcaps: PathBuf,

        /// Open-space table (.xlsx/.xls/.xlsm/.ods/.csv)
        #[arg(long)]
        open_space: PathBuf,

        /// Endcap storage types to empty
        #[arg(long = "types", num_args = 1.., value_delimiter = ',', required = true)]
        types: Vec<String>,

        /// Ledger output path (defaults to the configured output directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Ledger format (csv, json)
        #[arg(long)]
        format: Option<LedgerFormat>,

        /// Print skipped units with their reasons
        #[arg(long)]
        show_skipped: bool,
    },

    /// List the storage types present in an endcap table
    ListTypes {
        /// Endcap table (.xlsx/.xls/.xlsm/.ods/.csv)
        #[arg(long)]
        endcaps: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.log_json);

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: Cli) -> Result<()> {
    let manager = ConfigManager::load(cli.config.as_deref()).context("加载配置失败")?;
    tracing::debug!(source = ?manager.source(), snapshot = %manager.snapshot(), "运行配置");
    let config = manager.into_config();
    apply_locale(cli.lang.as_deref(), &config);

    tracing::info!(version = endcap_consolidation::VERSION, "{}", endcap_consolidation::APP_NAME);
    let api = ConsolidationApi::new(config);

    match cli.command {
        Command::Run {
            endcaps,
            open_space,
            types,
            output,
            format,
            show_skipped,
        } => {
            let request = ConsolidationRequest::new(endcaps, open_space, types);
            let response = api
                .run_and_export(&request, output.as_deref(), format)
                .map_err(describe_api_error)?;
            let path = response.output_path.display().to_string();

            match response.report.outcome() {
                RunOutcome::Assigned(count) => println!(
                    "{}",
                    t_with_args("run.assigned", &[("count", count.to_string().as_str()), ("path", path.as_str())])
                ),
                RunOutcome::NoMatches => {
                    println!("{}", t_with_args("run.no_matches", &[("path", path.as_str())]))
                }
            }
            print_summary(&response.report, show_skipped);
        }
        Command::ListTypes { endcaps } => {
            let path = endcaps.display().to_string();
            let types = api
                .list_storage_types(&endcaps)
                .map_err(describe_api_error)?;
            if types.is_empty() {
                println!("{}", t_with_args("types.none", &[("path", path.as_str())]));
            } else {
                println!("{}", t_with_args("types.listed", &[("path", path.as_str())]));
                for storage_type in types {
                    println!("  {}", storage_type);
                }
            }
        }
    }
    Ok(())
}

/// --lang 优先，其次配置文件
fn apply_locale(cli_lang: Option<&str>, config: &ConsolidationConfig) {
    let requested = cli_lang.unwrap_or(&config.locale);
    if !i18n::set_locale(requested) {
        tracing::warn!(locale = requested, "不支持的语言，使用默认语言");
    }
}

fn describe_api_error(err: ApiError) -> anyhow::Error {
    if let ApiError::InputRead { input, source } = &err {
        return anyhow!(t_with_args(
            "run.input_failed",
            &[
                ("input", i18n::input_label(*input).as_str()),
                ("reason", source.to_string().as_str()),
            ]
        ));
    }
    anyhow::Error::new(err)
}

fn print_summary(report: &ConsolidationReport, show_skipped: bool) {
    let stats = &report.stats;
    println!(
        "{}",
        t_with_args(
            "run.summary",
            &[
                ("run_id", report.run_id.as_str()),
                ("assigned", stats.units_assigned.to_string().as_str()),
                ("skipped", stats.units_skipped.to_string().as_str()),
                ("bins", stats.bins_touched.to_string().as_str()),
            ]
        )
    );

    if show_skipped {
        for skipped in &report.skipped {
            println!(
                "{}",
                t_with_args(
                    "run.skipped_unit",
                    &[
                        ("unit", skipped.unit_id.as_str()),
                        ("material", skipped.material.as_str()),
                        ("reason", skipped.reason.to_string().as_str()),
                    ]
                )
            );
        }
    }
}
