use crate::classifiers::{single, single_mut, Classifier, ClassifyError};
use crate::config::AirdropConfig;
use crate::models::ExportRecord;

/// ASA deposits from airdrop programs.
///
/// Known distributors win outright; otherwise the note decides, first by the
/// marker of an airdrop tool, then by keywords.
pub struct AirdropClassifier {
    config: AirdropConfig
}

const KEYWORDS: [(&str, &str); 3] = [("airdrop", "Airdrop"), ("staking", "Staking"), ("reward", "Reward")];

impl AirdropClassifier {
    pub fn new(config: AirdropConfig) -> Self {
        Self { config }
    }
}

impl Classifier for AirdropClassifier {
    fn name(&self) -> &'static str {
        "Airdrop"
    }

    fn applies(&self, records: &[ExportRecord]) -> bool {
        single(records).is_some_and(|record| record.is_asa_deposit() && record.is_from_other())
    }

    fn classify(&self, records: &mut [ExportRecord]) -> Result<bool, ClassifyError> {
        let record = single_mut(self.name(), records)?;

        if !record.is_asa_deposit() || !record.is_from_other() {
            return Ok(false);
        }

        let distributor = self.config.distributors.iter().find(|distributor| {
            distributor.address == record.sender
                && distributor.asset_id.is_none_or(|asset_id| asset_id == record.received_asset)
        });

        if let Some(distributor) = distributor {
            record.flags.airdrop = true;
            record.comment = distributor.label.clone();
            return Ok(true);
        }

        let Some(note) = record.raw.note_text().map(str::to_string) else {
            return Ok(false);
        };

        if self.config.tool_markers.iter().any(|marker| note.contains(marker.as_str())) {
            record.flags.airdrop = true;
            record.comment = note;
            return Ok(true);
        }

        let lowered = note.to_lowercase();

        for (keyword, prefix) in KEYWORDS {
            if !lowered.contains(keyword) {
                continue;
            }

            match keyword {
                "airdrop" => record.flags.airdrop = true,
                "staking" => record.flags.staking = true,
                _ => record.flags.reward = true
            }
            record.comment = format!("{prefix} | {note}");
            return Ok(true);
        }

        Ok(false)
    }
}
