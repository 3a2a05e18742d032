use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("{classifier} expects a single record, got [{records}]")]
    ShapeMismatch {
        classifier: &'static str,
        records: usize
    },
    #[error("{classifier} could not decode the note of transaction [{tx_id}]: {source}")]
    MalformedNote {
        classifier: &'static str,
        tx_id: String,
        #[source]
        source: serde_json::Error
    }
}

impl ClassifyError {
    pub fn shape_mismatch(classifier: &'static str, records: usize) -> Self {
        Self::ShapeMismatch { classifier, records }
    }
}
