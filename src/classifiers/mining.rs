use crate::classifiers::{single, single_mut, Classifier, ClassifyError};
use crate::config::MiningSource;
use crate::models::ExportRecord;

/// Mining payouts: a known distributor paying out its own asset.
pub struct MiningClassifier {
    sources: Vec<MiningSource>
}

impl MiningClassifier {
    pub fn new(sources: Vec<MiningSource>) -> Self {
        Self { sources }
    }

    fn source(&self, record: &ExportRecord) -> Option<&MiningSource> {
        if !record.is_asa_deposit() || !record.is_from_other() {
            return None;
        }

        self.sources.iter()
            .find(|source| source.address == record.sender && source.asset_id == record.received_asset)
    }
}

impl Classifier for MiningClassifier {
    fn name(&self) -> &'static str {
        "Mining"
    }

    fn applies(&self, records: &[ExportRecord]) -> bool {
        single(records).is_some_and(|record| self.source(record).is_some())
    }

    fn classify(&self, records: &mut [ExportRecord]) -> Result<bool, ClassifyError> {
        let record = single_mut(self.name(), records)?;

        let Some(source) = self.source(record) else {
            return Ok(false);
        };

        let comment = source.comment.clone();
        record.flags.mining = true;
        if !comment.is_empty() {
            record.comment = comment;
        }

        Ok(true)
    }
}
