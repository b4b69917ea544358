use anyhow::Result;
use async_trait::async_trait;

/// What the budget service said about one batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    /// `resultado` element, "OK" on success
    pub result: Option<String>,
    /// `erroExecucao` element, set when the service aborted the batch
    pub execution_error: Option<String>,
    /// `mensagem` element, or the SOAP faultstring
    pub message: Option<String>,
    /// Row-level `msgErr` entries from the grid
    pub grid_errors: Vec<String>,
}

impl BatchOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.as_deref().is_some_and(|r| r.eq_ignore_ascii_case("OK"))
            && self.execution_error.is_none()
    }
}

/// Sink for rendered batch envelopes. The HTTP client posts them; the
/// dry-run writer saves them to disk.
#[async_trait]
pub trait BatchSubmitter {
    async fn submit(&self, batch: usize, envelope: &[u8]) -> Result<BatchOutcome>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_ok_requires_result_ok_and_no_error() {
        let ok = BatchOutcome {
            result: Some("OK".to_string()),
            ..Default::default()
        };
        assert!(ok.is_ok());

        let lowercase = BatchOutcome {
            result: Some("ok".to_string()),
            ..Default::default()
        };
        assert!(lowercase.is_ok());

        let with_error = BatchOutcome {
            result: Some("OK".to_string()),
            execution_error: Some("boom".to_string()),
            ..Default::default()
        };
        assert!(!with_error.is_ok());

        assert!(!BatchOutcome::default().is_ok());
    }
}
