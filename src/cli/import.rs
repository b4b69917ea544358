use super::ui;
use crate::config::AppConfig;
use crate::core::submit::BatchSubmitter;
use crate::import::{BatchStatus, run_import};
use crate::senior::{EnvelopeDirWriter, SoapClient};
use crate::{report, sheet};
use anyhow::{Result, anyhow};
use std::path::PathBuf;
use tracing::info;

/// Arguments of the `import` subcommand.
#[derive(Debug, Clone, Default)]
pub struct ImportArgs {
    pub sheet: PathBuf,
    pub dry_run: bool,
    /// Directory for dry-run envelopes (default ./envelopes)
    pub out_dir: Option<PathBuf>,
    /// Import log destination (default ./import_log.csv)
    pub log_path: Option<PathBuf>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub company: Option<String>,
}

/// Runs the full import pipeline: load, validate, batch, submit, report.
pub async fn run(config: &AppConfig, args: &ImportArgs) -> Result<()> {
    let lines = sheet::load(&args.sheet)?;
    info!(rows = lines.len(), "Loaded spreadsheet");

    let mut access = config.access.clone();
    if let Some(user) = &args.user {
        access.user = user.clone();
    }
    if let Some(password) = &args.password {
        access.password = Some(password.clone());
    }
    if let Some(company) = &args.company {
        access.company = company.clone();
    }

    let soap_client;
    let dir_writer;
    let submitter: &(dyn BatchSubmitter + Send + Sync) = if args.dry_run {
        let out_dir = args
            .out_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("envelopes"));
        println!(
            "{}",
            ui::style_text(
                &format!("Dry run: writing envelopes to {}", out_dir.display()),
                ui::StyleType::Subtle
            )
        );
        dir_writer = EnvelopeDirWriter::new(out_dir)?;
        &dir_writer
    } else {
        if access.password.as_deref().unwrap_or("").is_empty() {
            return Err(anyhow!(
                "No web service password configured; set access.password or pass --password"
            ));
        }
        soap_client = SoapClient::new(&config.endpoint, config.import.timeout_secs);
        &soap_client
    };

    let batches = lines.len().div_ceil(config.import.batch_size.max(1));
    let pb = ui::new_progress_bar(batches as u64, true);
    pb.set_message(if args.dry_run {
        "Rendering batches..."
    } else {
        "Submitting batches..."
    });

    let report = run_import(&lines, &access, &config.import, submitter, |record| {
        pb.inc(1);
        if record.status != BatchStatus::Ok {
            pb.println(ui::style_text(
                &format!(
                    "Batch {} failed: {}",
                    record.batch,
                    record
                        .outcome
                        .message
                        .as_deref()
                        .or(record.outcome.execution_error.as_deref())
                        .unwrap_or("no detail")
                ),
                ui::StyleType::Error,
            ));
        }
    })
    .await?;
    pb.finish_and_clear();

    let log_path = args
        .log_path
        .clone()
        .unwrap_or_else(|| PathBuf::from("import_log.csv"));
    report::write_log(&report, &log_path)?;

    let summary = format!(
        "Done. Batches OK: {}/{} ({} row(s)). Log: {}",
        report.ok_batches(),
        report.total_batches(),
        report.total_lines,
        log_path.display()
    );
    if report.all_ok() {
        println!("{}", ui::style_text(&summary, ui::StyleType::TotalValue));
        Ok(())
    } else {
        println!("{}", ui::style_text(&summary, ui::StyleType::Error));
        Err(anyhow!(
            "{} of {} batch(es) failed",
            report.total_batches() - report.ok_batches(),
            report.total_batches()
        ))
    }
}
