use serde::Deserialize;
use tracing::debug;

use crate::classifiers::{single, single_mut, Classifier, ClassifyError};
use crate::config::{GovernanceConfig, StakingService};
use crate::models::ExportRecord;

/// Payload of a governance rewards note, `af/gov1:j{"rewardsPrd":1,"idx":12345}`.
#[derive(Debug, Deserialize)]
struct GovernanceNote {
    #[serde(rename = "rewardsPrd")]
    rewards_period: u32
}

/// ALGO rewards paid by the governance program's period addresses.
pub struct GovernanceClassifier {
    config: GovernanceConfig
}

impl GovernanceClassifier {
    pub fn new(config: GovernanceConfig) -> Self {
        Self { config }
    }

    fn is_governance_payout(&self, record: &ExportRecord) -> bool {
        record.is_algo_deposit()
            && record.is_from_other()
            && self.config.periods.iter().any(|period| period.address == record.sender)
    }
}

impl Classifier for GovernanceClassifier {
    fn name(&self) -> &'static str {
        "Governance Rewards"
    }

    fn applies(&self, records: &[ExportRecord]) -> bool {
        single(records).is_some_and(|record| self.is_governance_payout(record))
    }

    fn classify(&self, records: &mut [ExportRecord]) -> Result<bool, ClassifyError> {
        let name = self.name();
        let record = single_mut(name, records)?;

        if !self.is_governance_payout(record) {
            return Ok(false);
        }

        let Some(note) = record.raw.note_text() else {
            return Ok(false);
        };

        if !note.starts_with(&self.config.note_prefix) {
            return Ok(false);
        }

        //NOTE: The prefix ends inside the JSON payload, which starts at its first brace
        let body_start = self.config.note_prefix.find('{').unwrap_or(self.config.note_prefix.len());
        let payload: GovernanceNote = serde_json::from_str(&note[body_start..])
            .map_err(|source| ClassifyError::MalformedNote { classifier: name, tx_id: record.tx_id.clone(), source })?;

        debug!("Governance reward [{}] paid for period [{}]", record.tx_id, payload.rewards_period);

        record.comment = format!("Algorand Governance Rewards | {note}");
        record.flags.reward = true;

        Ok(true)
    }
}

/// ASA payouts from staking services that pay from a fixed wallet.
pub struct StakingServiceClassifier {
    services: Vec<StakingService>
}

impl StakingServiceClassifier {
    pub fn new(services: Vec<StakingService>) -> Self {
        Self { services }
    }

    fn service(&self, record: &ExportRecord) -> Option<&StakingService> {
        if !record.is_asa_deposit() || !record.is_from_other() {
            return None;
        }

        self.services.iter().find(|service| service.address == record.sender)
    }
}

impl Classifier for StakingServiceClassifier {
    fn name(&self) -> &'static str {
        "Staking Service"
    }

    fn applies(&self, records: &[ExportRecord]) -> bool {
        single(records).is_some_and(|record| self.service(record).is_some())
    }

    fn classify(&self, records: &mut [ExportRecord]) -> Result<bool, ClassifyError> {
        let record = single_mut(self.name(), records)?;

        let Some(service) = self.service(record) else {
            return Ok(false);
        };

        record.comment = service.comment.clone();
        record.flags.staking = true;

        Ok(true)
    }
}
