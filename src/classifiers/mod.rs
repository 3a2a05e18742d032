mod airdrop;
mod errors;
mod mining;
mod rewards;

use crate::config::ExportConfig;
use crate::models::{legs_mut, matches_shape, ExportRecord};

pub use airdrop::AirdropClassifier;
pub use errors::ClassifyError;
pub use mining::MiningClassifier;
pub use rewards::{GovernanceClassifier, StakingServiceClassifier};

/// Labels a single-record residue that no application interpreter claimed.
pub trait Classifier: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether `records` is a single record from a counterparty this classifier knows.
    fn applies(&self, records: &[ExportRecord]) -> bool;

    /// Labels the record in place. Returns `false` when nothing was labelled.
    fn classify(&self, records: &mut [ExportRecord]) -> Result<bool, ClassifyError>;
}

/// The single non-reward record of `records`, if that is all there is.
pub fn single(records: &[ExportRecord]) -> Option<&ExportRecord> {
    matches_shape(records, 1).then(|| records.first()).flatten()
}

/// Mutable access to the single record, or a shape error naming `classifier`.
pub fn single_mut<'a>(classifier: &'static str, records: &'a mut [ExportRecord]) -> Result<&'a mut ExportRecord, ClassifyError> {
    let len = records.len();

    legs_mut::<1>(records)
        .map(|[record]| record)
        .ok_or_else(|| ClassifyError::shape_mismatch(classifier, len))
}

/// Classifiers in priority order.
pub struct ClassifierChain {
    classifiers: Vec<Box<dyn Classifier>>
}

impl ClassifierChain {
    pub fn new(classifiers: Vec<Box<dyn Classifier>>) -> Self {
        Self { classifiers }
    }

    pub fn from_config(config: &ExportConfig) -> Self {
        Self::new(vec![
            Box::new(AirdropClassifier::new(config.airdrops.clone())),
            Box::new(MiningClassifier::new(config.mining.clone())),
            Box::new(GovernanceClassifier::new(config.governance.clone())),
            Box::new(StakingServiceClassifier::new(config.staking_services.clone()))
        ])
    }

    /// Runs the chain until a classifier labels the records, returning its name.
    pub fn classify(&self, records: &mut [ExportRecord]) -> Result<Option<&'static str>, ClassifyError> {
        for classifier in &self.classifiers {
            if classifier.applies(records) && classifier.classify(records)? {
                return Ok(Some(classifier.name()));
            }
        }

        Ok(None)
    }
}
