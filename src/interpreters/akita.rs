use crate::interpreters::{GroupContext, InterpretError, Interpreter, LendingLedger};
use crate::models::{shape, ExportRecord, Shaped};

/// AKITA to AKTA token swap.
pub struct AkitaTokenSwap;

impl Interpreter for AkitaTokenSwap {
    fn name(&self) -> &'static str {
        "Akita Token Swap"
    }

    fn interpret(&self, group: &GroupContext<'_>, records: Vec<ExportRecord>, _ledger: &mut LendingLedger) -> Result<Vec<ExportRecord>, InterpretError> {
        let Shaped { legs: [received, fee, paid, rest @ ..], reward } = shape::<5>(records)
            .map_err(|records| group.shape_mismatch(self.name(), &records))?;

        let mut swap = received;
        swap.sent = paid.sent;
        swap.sent_asset = paid.sent_asset;
        swap.flags.application = true;
        swap.flags.trade = true;
        swap.comment = "Akita Token Swap".to_string();

        let mut processed = vec![swap, fee];
        processed.extend(rest);
        processed.extend(reward);

        Ok(processed)
    }
}
