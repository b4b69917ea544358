//! Batch runner: splits budget lines into batches and submits them in
//! file order.

use anyhow::Result;
use chrono::Local;
use tracing::{debug, warn};

use crate::config::{AccessConfig, ImportConfig};
use crate::core::budget::BudgetLine;
use crate::core::submit::{BatchOutcome, BatchSubmitter};
use crate::senior::envelope;

/// Per-batch status in the import log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    /// Service accepted the batch
    Ok,
    /// Service answered but rejected the batch
    Error,
    /// Request never got a usable answer
    Transport,
}

impl BatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchStatus::Ok => "OK",
            BatchStatus::Error => "ERROR",
            BatchStatus::Transport => "TRANSPORT",
        }
    }
}

/// One row of the import log.
#[derive(Debug, Clone)]
pub struct BatchRecord {
    pub timestamp: String,
    pub batch: usize,
    pub status: BatchStatus,
    pub outcome: BatchOutcome,
}

#[derive(Debug, Default)]
pub struct ImportReport {
    pub records: Vec<BatchRecord>,
    pub total_lines: usize,
}

impl ImportReport {
    pub fn total_batches(&self) -> usize {
        self.records.len()
    }

    pub fn ok_batches(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.status == BatchStatus::Ok)
            .count()
    }

    pub fn all_ok(&self) -> bool {
        self.ok_batches() == self.total_batches()
    }
}

/// Submits the lines in consecutive batches. A failed batch is recorded and
/// the run continues; batches are never reordered or submitted concurrently
/// because the service call appends server-side state.
pub async fn run_import(
    lines: &[BudgetLine],
    access: &AccessConfig,
    import: &ImportConfig,
    submitter: &(dyn BatchSubmitter + Send + Sync),
    mut on_batch_done: impl FnMut(&BatchRecord),
) -> Result<ImportReport> {
    let batch_size = import.batch_size.max(1);
    let mut report = ImportReport {
        total_lines: lines.len(),
        ..Default::default()
    };

    for (idx, chunk) in lines.chunks(batch_size).enumerate() {
        let batch = idx + 1;
        let payload = envelope::render(access, import, chunk);
        debug!(batch, rows = chunk.len(), "Submitting batch");

        let record = match submitter.submit(batch, &payload).await {
            Ok(outcome) => {
                let status = if outcome.is_ok() {
                    BatchStatus::Ok
                } else {
                    warn!(batch, ?outcome, "Service rejected batch");
                    BatchStatus::Error
                };
                BatchRecord {
                    timestamp: now(),
                    batch,
                    status,
                    outcome,
                }
            }
            Err(e) => {
                warn!(batch, error = %e, "Batch submission failed");
                BatchRecord {
                    timestamp: now(),
                    batch,
                    status: BatchStatus::Transport,
                    outcome: BatchOutcome {
                        message: Some(format!("{e:#}")),
                        ..Default::default()
                    },
                }
            }
        };

        on_batch_done(&record);
        report.records.push(record);
    }

    Ok(report)
}

fn now() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::sync::Mutex;

    fn lines(n: usize) -> Vec<BudgetLine> {
        (0..n)
            .map(|i| {
                BudgetLine::from_record(&[
                    &format!("{}", 100 + i),
                    "07/2025",
                    "1",
                    "1002",
                    "1002",
                    "10.00",
                    "0",
                ])
                .unwrap()
            })
            .collect()
    }

    fn import_with_batch_size(batch_size: usize) -> ImportConfig {
        ImportConfig {
            batch_size,
            ..Default::default()
        }
    }

    /// Scripted submitter recording the batch sizes it received.
    struct ScriptedSubmitter {
        outcomes: Mutex<Vec<Result<BatchOutcome>>>,
        seen_batches: Mutex<Vec<(usize, usize)>>,
    }

    impl ScriptedSubmitter {
        fn new(outcomes: Vec<Result<BatchOutcome>>) -> Self {
            ScriptedSubmitter {
                outcomes: Mutex::new(outcomes),
                seen_batches: Mutex::new(Vec::new()),
            }
        }

        fn always_ok(n: usize) -> Self {
            Self::new(
                (0..n)
                    .map(|_| {
                        Ok(BatchOutcome {
                            result: Some("OK".to_string()),
                            ..Default::default()
                        })
                    })
                    .collect(),
            )
        }
    }

    #[async_trait]
    impl BatchSubmitter for ScriptedSubmitter {
        async fn submit(&self, batch: usize, envelope: &[u8]) -> Result<BatchOutcome> {
            let items = String::from_utf8_lossy(envelope)
                .matches("<numPrj>")
                .count();
            self.seen_batches.lock().unwrap().push((batch, items));
            self.outcomes.lock().unwrap().remove(0)
        }
    }

    #[test_log::test(tokio::test)]
    async fn test_batches_are_chunked_in_order() {
        let submitter = ScriptedSubmitter::always_ok(3);
        let report = run_import(
            &lines(5),
            &AccessConfig::default(),
            &import_with_batch_size(2),
            &submitter,
            |_| {},
        )
        .await
        .unwrap();

        assert_eq!(report.total_batches(), 3);
        assert_eq!(report.ok_batches(), 3);
        assert!(report.all_ok());
        assert_eq!(report.total_lines, 5);
        assert_eq!(
            *submitter.seen_batches.lock().unwrap(),
            vec![(1, 2), (2, 2), (3, 1)]
        );
    }

    #[test_log::test(tokio::test)]
    async fn test_failed_batch_does_not_stop_the_run() {
        let submitter = ScriptedSubmitter::new(vec![
            Ok(BatchOutcome {
                result: Some("OK".to_string()),
                ..Default::default()
            }),
            Err(anyhow!("connection reset")),
            Ok(BatchOutcome {
                result: Some("ERRO".to_string()),
                execution_error: Some("conta invalida".to_string()),
                ..Default::default()
            }),
        ]);

        let report = run_import(
            &lines(3),
            &AccessConfig::default(),
            &import_with_batch_size(1),
            &submitter,
            |_| {},
        )
        .await
        .unwrap();

        assert_eq!(report.total_batches(), 3);
        assert_eq!(report.ok_batches(), 1);
        assert!(!report.all_ok());
        assert_eq!(report.records[1].status, BatchStatus::Transport);
        assert!(
            report.records[1]
                .outcome
                .message
                .as_deref()
                .unwrap()
                .contains("connection reset")
        );
        assert_eq!(report.records[2].status, BatchStatus::Error);
    }

    #[test_log::test(tokio::test)]
    async fn test_progress_callback_runs_per_batch() {
        let submitter = ScriptedSubmitter::always_ok(2);
        let mut seen = Vec::new();
        run_import(
            &lines(2),
            &AccessConfig::default(),
            &import_with_batch_size(1),
            &submitter,
            |record| seen.push(record.batch),
        )
        .await
        .unwrap();
        assert_eq!(seen, vec![1, 2]);
    }

    #[test_log::test(tokio::test)]
    async fn test_zero_batch_size_is_clamped() {
        let submitter = ScriptedSubmitter::always_ok(3);
        let report = run_import(
            &lines(3),
            &AccessConfig::default(),
            &import_with_batch_size(0),
            &submitter,
            |_| {},
        )
        .await
        .unwrap();
        assert_eq!(report.total_batches(), 3);
    }
}
