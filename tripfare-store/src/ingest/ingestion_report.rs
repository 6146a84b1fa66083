use serde::{Deserialize, Serialize};

use crate::IngestError;

/// outcome of one ingestion call. `failed_rows` holds zero-based indices into
/// the ingested rows, in ascending order.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct IngestionReport {
    pub total: usize,
    pub failed_rows: Vec<usize>,
}

impl IngestionReport {
    pub fn succeeded(&self) -> usize {
        self.total - self.failed_rows.len()
    }

    /// all-or-nothing check: any failed row fails the whole ingestion
    pub fn ensure_complete(&self) -> Result<(), IngestError> {
        if self.failed_rows.is_empty() {
            Ok(())
        } else {
            Err(IngestError::IngestionIncomplete {
                failed: self.failed_rows.len(),
                total: self.total,
            })
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_ensure_complete() {
        let ok = IngestionReport {
            total: 3,
            failed_rows: vec![],
        };
        assert!(ok.ensure_complete().is_ok());
        assert_eq!(ok.succeeded(), 3);

        let partial = IngestionReport {
            total: 3,
            failed_rows: vec![1],
        };
        assert!(matches!(
            partial.ensure_complete(),
            Err(IngestError::IngestionIncomplete {
                failed: 1,
                total: 3
            })
        ));
    }
}
