use crate::config::WrappedAsset;
use crate::interpreters::{GroupContext, InterpretError, Interpreter, LendingLedger};
use crate::models::{matches_shape, shape, CustomAmount, ExportRecord, Shaped};
use crate::types::{Quantity, QuantityError};

const PROTOCOL: &str = "Algomint";

/// Algomint bridge: wrapped BTC/ETH minted to or burned by the account.
///
/// A mint is exported as a trade of the native coin for the wrapped token, with
/// the native coin's deposit and the bridge fees made explicit so the tracker can
/// balance both currencies. An unlock carries its fees in the wrapped token.
pub struct Algomint;

impl Algomint {
    /// A single transfer of a wrapped asset between the account and the bridge:
    /// a lone deposit (mint) or a withdrawal followed by its fee (unlock).
    pub fn applies(group: &GroupContext<'_>, records: &[ExportRecord]) -> bool {
        let Some(primary) = records.first() else {
            return false;
        };

        let asset_id = if primary.is_deposit() { primary.received_asset } else { primary.sent_asset };
        let bridge = &group.config.algomint.address;

        group.config.wrapped_asset(asset_id).is_some()
            && is_mint_or_unlock(primary, records)
            && primary.sender != primary.receiver
            && (&primary.sender == bridge || &primary.receiver == bridge)
    }
}

impl Interpreter for Algomint {
    fn name(&self) -> &'static str {
        PROTOCOL
    }

    fn interpret(&self, group: &GroupContext<'_>, records: Vec<ExportRecord>, _ledger: &mut LendingLedger) -> Result<Vec<ExportRecord>, InterpretError> {
        let Some(primary) = records.first() else {
            return Err(group.shape_mismatch(PROTOCOL, &records));
        };

        if is_mint(primary, &records) {
            if let Some(wrapped) = group.config.wrapped_asset(primary.received_asset) {
                return mint(group, wrapped, records);
            }
        }

        if is_unlock(primary, &records) {
            if let Some(wrapped) = group.config.wrapped_asset(primary.sent_asset) {
                return unlock(group, wrapped, records);
            }
        }

        Err(group.shape_mismatch(PROTOCOL, &records))
    }
}

fn is_mint(primary: &ExportRecord, records: &[ExportRecord]) -> bool {
    primary.is_deposit() && matches_shape(records, 1)
}

fn is_unlock(primary: &ExportRecord, records: &[ExportRecord]) -> bool {
    primary.is_withdrawal() && matches_shape(records, 2)
}

fn is_mint_or_unlock(primary: &ExportRecord, records: &[ExportRecord]) -> bool {
    is_mint(primary, records) || is_unlock(primary, records)
}

fn quantity_error(error: QuantityError) -> InterpretError {
    InterpretError::quantity(PROTOCOL, error)
}

fn mint(group: &GroupContext<'_>, wrapped: &WrappedAsset, records: Vec<ExportRecord>) -> Result<Vec<ExportRecord>, InterpretError> {
    let Shaped { legs: [mut primary], reward } = shape::<1>(records)
        .map_err(|records| group.shape_mismatch(PROTOCOL, &records))?;

    let label = format!("Algomint - Mint {}", wrapped.symbol);
    let received = group.assets.quantity(primary.received, primary.received_asset)?;
    let currency = &wrapped.currency;

    primary.comment = label.clone();
    primary.sent_custom = Some(CustomAmount::new(received, currency));

    let mut deposit = primary.synthetic(format!("{}-deposit-{}", currency.to_lowercase(), primary.tx_id), format!("{label} - {currency} deposit"));
    deposit.received_custom = Some(CustomAmount::new(received, currency));

    let mut processed = vec![primary.clone(), deposit];
    processed.extend(fee_pair(&primary, "mining-fee", &label, "mining fee", wrapped.network_fee, currency));

    if primary.block_time > group.config.algomint.fee_effective {
        let rate = group.config.algomint.fee_rate;
        let retained = Quantity::one().checked_sub(rate).ok_or_else(|| quantity_error(QuantityError::Negative))?;
        let gross = received.checked_div(retained)
            .ok_or_else(|| quantity_error(QuantityError::Overflow))?
            .floor(wrapped.fractional_digits);
        let minting_fee = gross.checked_sub(received).ok_or_else(|| quantity_error(QuantityError::Negative))?;

        processed.extend(fee_pair(&primary, "minting-fee", &label, "minting fee", minting_fee, currency));
    }

    processed.extend(reward);
    Ok(processed)
}

/// A fee paid in the native coin plus the matching native deposit that funded it.
fn fee_pair(primary: &ExportRecord, id: &str, label: &str, kind: &str, quantity: Quantity, currency: &str) -> [ExportRecord; 2] {
    let mut fee = primary.synthetic(format!("{id}-{}", primary.tx_id), format!("{label} - {kind}"));
    fee.flags.other_fee = true;
    fee.sent_custom = Some(CustomAmount::new(quantity, currency));
    fee.fee_custom = Some(CustomAmount::new(quantity, currency));

    let mut deposit = primary.synthetic(format!("{id}-deposit-{}", primary.tx_id), format!("{label} - {kind} deposit"));
    deposit.received_custom = Some(CustomAmount::new(quantity, currency));

    [fee, deposit]
}

fn unlock(group: &GroupContext<'_>, wrapped: &WrappedAsset, records: Vec<ExportRecord>) -> Result<Vec<ExportRecord>, InterpretError> {
    let Shaped { legs: [mut primary, fee], reward } = shape::<2>(records)
        .map_err(|records| group.shape_mismatch(PROTOCOL, &records))?;

    let asset_id = primary.sent_asset;
    let label = format!("Algomint - Unlock {}", wrapped.symbol);
    let decimals = group.assets.decimals(asset_id)?;
    let currency = group.assets.currency(asset_id)?;

    let network_fee = wrapped.network_fee.to_base_units(decimals).map_err(quantity_error)?;
    let burning_fee = Quantity::from_base_units(primary.sent, 0)
        .and_then(|sent| sent.checked_mul(group.config.algomint.fee_rate).ok_or(QuantityError::Overflow))
        .and_then(|fee| fee.floor(0).to_base_units(0))
        .map_err(quantity_error)?;

    primary.sent = primary.sent
        .checked_sub(network_fee)
        .and_then(|sent| sent.checked_sub(burning_fee))
        .ok_or_else(|| quantity_error(QuantityError::Negative))?;
    primary.comment = label.clone();

    let mut processed = vec![primary.clone(), fee];

    for (id, kind, amount) in [("mining-fee", "mining fee", network_fee), ("burning-fee", "burning fee", burning_fee)] {
        let mut record = primary.synthetic(format!("{id}-{}", primary.tx_id), format!("{label} - {kind}"));
        record.flags.other_fee = true;
        record.sent = amount;
        record.sent_asset = asset_id;
        record.fee_custom = Some(CustomAmount::new(group.assets.quantity(amount, asset_id)?, currency.as_str()));
        processed.push(record);
    }

    processed.extend(reward);
    Ok(processed)
}
