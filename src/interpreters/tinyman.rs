use crate::interpreters::{GroupContext, InterpretError, Interpreter, LendingLedger};
use crate::models::{shape, ExportRecord, Shaped};
use crate::types::ALGO_ASSET_ID;

type Outcome = Result<Vec<ExportRecord>, Vec<ExportRecord>>;

const SWAP: &str = "Tinyman Swap";
const POOL_DEPOSIT: &str = "Tinyman Liquidity Pool Deposit";
const POOL_WITHDRAWAL: &str = "Tinyman Liquidity Pool Withdrawal";

/// Tinyman v1 pools. Swaps become one trade; pool deposits and withdrawals are
/// split trades of the pool token against each side of the pair.
pub struct Tinyman;

impl Interpreter for Tinyman {
    fn name(&self) -> &'static str {
        "Tinyman"
    }

    fn interpret(&self, group: &GroupContext<'_>, records: Vec<ExportRecord>, _ledger: &mut LendingLedger) -> Result<Vec<ExportRecord>, InterpretError> {
        redeem(records)
            .or_else(swap_from_algo)
            .or_else(swap_from_asset)
            .or_else(deposit_algo_pair)
            .or_else(deposit_asset_pair)
            .or_else(withdraw)
            .map_err(|records| group.shape_mismatch(self.name(), &records))
    }
}

fn opens_with_receive(records: &[ExportRecord]) -> bool {
    records.first().is_some_and(|record| record.receiver == record.account)
}

fn opens_with_send(records: &[ExportRecord]) -> bool {
    records.first().is_some_and(|record| record.sender == record.account)
}

/// Halves a pool token quantity; the second half takes the odd unit.
fn split(total: u64) -> (u64, u64) {
    let first = total / 2;
    (first, total - first)
}

fn redeem(records: Vec<ExportRecord>) -> Outcome {
    if !opens_with_receive(&records) {
        return Err(records);
    }

    let Shaped { legs: [mut excess, mut fee], reward } = shape::<2>(records)?;

    excess.flags.reward = true;
    excess.comment = "Tinyman Redeem Excess Amounts".to_string();
    fee.flags.other_fee = true;

    Ok(Shaped { legs: [excess, fee], reward }.into_records())
}

/// Trade of `received` against `paid`. Fees of an ALGO payment travel with the trade.
fn trade(received: ExportRecord, paid: &ExportRecord, comment: &str) -> ExportRecord {
    let mut trade = received;
    trade.sent = paid.sent;
    trade.sent_asset = paid.sent_asset;
    if paid.sent_asset == ALGO_ASSET_ID {
        trade.fee = paid.fee;
    }
    trade.flags.application = true;
    trade.flags.trade = true;
    trade.comment = comment.to_string();
    trade
}

fn swap_from_algo(records: Vec<ExportRecord>) -> Outcome {
    if !opens_with_receive(&records) {
        return Err(records);
    }

    let Shaped { legs: [received, paid, mut fee], reward } = shape::<3>(records)?;

    fee.flags.other_fee = true;

    let mut processed = vec![trade(received, &paid, SWAP), fee];
    processed.extend(reward);
    Ok(processed)
}

fn swap_from_asset(records: Vec<ExportRecord>) -> Outcome {
    if !opens_with_receive(&records) {
        return Err(records);
    }

    let Shaped { legs: [received, paid, transfer_fee, mut fee], reward } = shape::<4>(records)?;

    fee.flags.other_fee = true;

    let mut processed = vec![trade(received, &paid, SWAP), transfer_fee, fee];
    processed.extend(reward);
    Ok(processed)
}

/// Pool tokens received for two payments, split into one trade per payment.
fn deposit_legs(pool_tokens: &ExportRecord, first: &ExportRecord, second: &ExportRecord) -> (ExportRecord, ExportRecord) {
    let (one, two) = split(pool_tokens.received);

    let mut leg_one = trade(pool_tokens.clone(), first, POOL_DEPOSIT);
    leg_one.tx_id = first.tx_id.clone();
    leg_one.received = one;

    let mut leg_two = trade(pool_tokens.clone(), second, POOL_DEPOSIT);
    leg_two.tx_id = second.tx_id.clone();
    leg_two.received = two;
    if second.sent_asset == ALGO_ASSET_ID {
        leg_two.fee = 0;
    }

    (leg_one, leg_two)
}

fn deposit_algo_pair(records: Vec<ExportRecord>) -> Outcome {
    if !opens_with_receive(&records) {
        return Err(records);
    }

    let Shaped { legs: [pool_tokens, first, second, other, mut fee], reward } = shape::<5>(records)?;
    let (leg_one, leg_two) = deposit_legs(&pool_tokens, &first, &second);

    fee.flags.other_fee = true;

    let mut processed = vec![leg_one, leg_two, other, fee];
    processed.extend(reward);
    Ok(processed)
}

fn deposit_asset_pair(records: Vec<ExportRecord>) -> Outcome {
    if !opens_with_receive(&records) {
        return Err(records);
    }

    let Shaped { legs: [pool_tokens, first, first_fee, second, other, mut fee], reward } = shape::<6>(records)?;
    let (leg_one, leg_two) = deposit_legs(&pool_tokens, &first, &second);

    fee.flags.other_fee = true;

    let mut processed = vec![leg_one, first_fee, leg_two, other, fee];
    processed.extend(reward);
    Ok(processed)
}

fn withdraw(records: Vec<ExportRecord>) -> Outcome {
    if !opens_with_send(&records) {
        return Err(records);
    }

    let Shaped { legs: [pool_tokens, fee, first, second, mut other], reward } = shape::<5>(records)?;
    let (one, two) = split(pool_tokens.sent);

    let mut leg_one = pool_tokens.clone();
    leg_one.tx_id = first.tx_id.clone();
    leg_one.sent = one;
    leg_one.received = first.received;
    leg_one.received_asset = first.received_asset;
    leg_one.flags.application = true;
    leg_one.flags.trade = true;
    leg_one.comment = POOL_WITHDRAWAL.to_string();

    let mut leg_two = pool_tokens;
    leg_two.tx_id = second.tx_id.clone();
    leg_two.sent = two;
    leg_two.received = second.received;
    leg_two.received_asset = second.received_asset;
    leg_two.flags.application = true;
    leg_two.flags.trade = true;
    leg_two.comment = POOL_WITHDRAWAL.to_string();

    other.flags.other_fee = true;

    let mut processed = vec![leg_one, fee, leg_two, other];
    processed.extend(reward);
    Ok(processed)
}
