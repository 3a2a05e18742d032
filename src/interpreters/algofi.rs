use crate::interpreters::{GroupContext, InterpretError, Interpreter, LendingLedger};
use crate::models::ExportRecord;
use crate::types::ALGO_ASSET_ID;

const PROTOCOL: &str = "AlgoFi";

/// AlgoFi lending markets: supply (`mt`), withdraw (`rcu`), borrow (`b`) and
/// repay (`rb`).
///
/// Principal is tracked in the account's [`LendingLedger`]; whatever comes back
/// above the supplied principal is lending income, whatever is paid above the
/// borrowed principal is a borrowing fee.
pub struct AlgoFiMarket;

impl Interpreter for AlgoFiMarket {
    fn name(&self) -> &'static str {
        PROTOCOL
    }

    fn interpret(&self, group: &GroupContext<'_>, records: Vec<ExportRecord>, ledger: &mut LendingLedger) -> Result<Vec<ExportRecord>, InterpretError> {
        match group.call.action.as_deref() {
            Some("mt") => supply(group, records, ledger),
            Some("rcu") => withdraw(group, records, ledger),
            Some("b") => borrow(group, records, ledger),
            Some("rb") => repay(group, records, ledger),
            _ => Err(group.shape_mismatch(PROTOCOL, &records))
        }
    }
}

/// Index of the asset leg the account paid into the market.
fn paid_leg(records: &[ExportRecord]) -> Option<usize> {
    records.iter().position(|record| record.is_withdrawal() && !record.flags.fee_only)
}

/// Index of the asset leg the market paid out to the account.
fn received_leg(records: &[ExportRecord]) -> Option<usize> {
    records.iter().position(|record| record.is_deposit() && !record.is_reward())
}

/// Amount paid excluding the transaction fee an ALGO payment carries.
fn paid_principal(record: &ExportRecord) -> u64 {
    if record.sent_asset == ALGO_ASSET_ID {
        record.sent.saturating_sub(record.fee)
    } else {
        record.sent
    }
}

fn market(group: &GroupContext<'_>, asset_id: u64) -> Result<String, InterpretError> {
    let unit_name = group.assets.unit_name(asset_id)?;

    if !group.config.is_lending_market(unit_name) {
        return Err(InterpretError::unknown_market(PROTOCOL, unit_name));
    }

    Ok(unit_name.to_string())
}

fn supply(group: &GroupContext<'_>, mut records: Vec<ExportRecord>, ledger: &mut LendingLedger) -> Result<Vec<ExportRecord>, InterpretError> {
    let Some(index) = paid_leg(&records) else {
        return Err(group.shape_mismatch(PROTOCOL, &records));
    };

    let paid = &mut records[index];
    let market = market(group, paid.sent_asset)?;

    ledger.supply(&market, paid_principal(paid));
    paid.comment = "AlgoFi - Supply".to_string();

    Ok(records)
}

fn withdraw(group: &GroupContext<'_>, mut records: Vec<ExportRecord>, ledger: &mut LendingLedger) -> Result<Vec<ExportRecord>, InterpretError> {
    let Some(index) = received_leg(&records) else {
        return Err(group.shape_mismatch(PROTOCOL, &records));
    };

    let received = &mut records[index];
    let market = market(group, received.received_asset)?;
    let settlement = ledger.withdraw(&market, received.received);

    received.comment = "AlgoFi - Withdraw".to_string();

    if settlement.excess == 0 {
        return Ok(records);
    }

    let mut income = received.synthetic(format!("lending-income-{}", received.tx_id), "AlgoFi - Withdraw - Lending Income");
    income.received = settlement.excess;
    income.received_asset = received.received_asset;
    income.flags.lending_income = true;

    received.received = settlement.principal;
    if received.is_empty() {
        records.remove(index);
    }

    records.push(income);
    Ok(records)
}

fn borrow(group: &GroupContext<'_>, mut records: Vec<ExportRecord>, ledger: &mut LendingLedger) -> Result<Vec<ExportRecord>, InterpretError> {
    let Some(index) = received_leg(&records) else {
        return Err(group.shape_mismatch(PROTOCOL, &records));
    };

    let received = &mut records[index];
    let market = market(group, received.received_asset)?;

    ledger.borrow(&market, received.received);
    received.flags.income_no_tax = true;
    received.comment = "AlgoFi - Borrow".to_string();

    Ok(records)
}

fn repay(group: &GroupContext<'_>, mut records: Vec<ExportRecord>, ledger: &mut LendingLedger) -> Result<Vec<ExportRecord>, InterpretError> {
    let Some(index) = paid_leg(&records) else {
        return Err(group.shape_mismatch(PROTOCOL, &records));
    };

    let paid = &mut records[index];
    let market = market(group, paid.sent_asset)?;
    let principal = paid_principal(paid);
    let settlement = ledger.repay(&market, principal);

    paid.flags.expense_no_tax = true;
    paid.comment = "AlgoFi - Repay".to_string();

    if settlement.excess == 0 {
        return Ok(records);
    }

    let mut fee = paid.synthetic(format!("borrowing-fee-{}", paid.tx_id), "AlgoFi - Repay - Borrowing Fee");
    fee.sent = settlement.excess;
    fee.sent_asset = paid.sent_asset;
    fee.flags.borrowing_fee = true;

    //NOTE: The transaction fee stays with the principal leg
    paid.sent = paid.sent - principal + settlement.principal;
    if paid.is_empty() {
        records.remove(index);
    }

    records.push(fee);
    Ok(records)
}
