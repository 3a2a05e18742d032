use super::{legs_mut, matches_shape, shape, OnCompletion, RecordTag, Transaction, TransactionPage, TransactionType};

use anyhow::{anyhow, Result};

use crate::fixtures::{deposit, fee_record, reward_record, withdrawal, ACCOUNT, OTHER};

#[test]
fn test_indexer_page_deserializes_with_base64_fields() -> Result<()> {
    let page = r#"{
        "account": "ACCOUNT",
        "current-round": 100,
        "transactions": [
            {
                "id": "TX1",
                "tx-type": "axfer",
                "sender": "SENDER",
                "fee": 1000,
                "round-time": 1630454400,
                "group": "Z3JvdXA=",
                "note": "aGVsbG8=",
                "asset-transfer-transaction": { "amount": 5, "asset-id": 123, "receiver": "ACCOUNT" }
            },
            {
                "id": "TX2",
                "tx-type": "appl",
                "sender": "ACCOUNT",
                "application-transaction": {
                    "application-id": 552635992,
                    "on-completion": "closeout",
                    "application-args": ["c3dhcA==", "Zmk="]
                },
                "inner-txns": [
                    { "tx-type": "pay", "sender": "POOL", "payment-transaction": { "amount": 7, "receiver": "ACCOUNT" } }
                ]
            }
        ]
    }"#;

    let page: TransactionPage = serde_json::from_str(page)?;
    let transfer = &page.transactions[0];
    let call = &page.transactions[1];

    assert_eq!(page.current_round, 100);
    assert_eq!(transfer.tx_type, TransactionType::AssetTransfer);
    assert_eq!(transfer.group_id(), Some(b"group".as_slice()));
    assert_eq!(transfer.note_text(), Some("hello"));
    assert_eq!(transfer.block_time().to_rfc3339(), "2021-09-01T00:00:00+00:00");

    let application = call.application_transaction.as_ref().ok_or_else(|| anyhow!("application payload missing"))?;

    assert_eq!(application.on_completion, OnCompletion::CloseOut);
    assert_eq!(application.application_args, vec![b"swap".to_vec(), b"fi".to_vec()]);
    assert!(call.group_id().is_none());
    assert_eq!(call.inner_txns.len(), 1);
    assert!(call.inner_txns[0].id.is_empty());

    Ok(())
}

#[test]
fn test_unknown_transaction_type_is_kept_for_diagnostics() -> Result<()> {
    let transaction: Transaction = serde_json::from_str(r#"{ "id": "TX", "tx-type": "stpf", "sender": "S" }"#)?;

    assert_eq!(transaction.tx_type, TransactionType::Other("stpf".to_string()));
    assert_eq!(transaction.tx_type.to_string(), "stpf");

    Ok(())
}

#[test]
fn test_record_tag_renders_inner_paths_innermost_first() {
    let first = RecordTag::Top.child("ROOT", 0);
    let nested = first.child("", 1);
    let second = RecordTag::Top.child("ROOT", 1);

    assert_eq!(first.to_string(), "0-inner-ROOT");
    assert_eq!(nested.to_string(), "1-0-inner-ROOT");
    assert_eq!(second.position(), Some(1));
    assert_eq!(RecordTag::Top.to_string(), "");
    assert_eq!(RecordTag::Synthetic("mining-fee-TX".to_string()).to_string(), "mining-fee-TX");
}

#[test]
fn test_netting_keeps_a_single_nonzero_leg() {
    let mut self_payment = deposit("TX", 0, 1_000_000, ACCOUNT);
    self_payment.sent = 1_001_000;
    self_payment.net();

    assert_eq!(self_payment.sent, 1_000);
    assert_eq!(self_payment.received, 0);

    let mut closing = deposit("TX", 0, 5_000, ACCOUNT);
    closing.sent = 2_000;
    closing.net();

    assert_eq!(closing.received, 3_000);
    assert_eq!(closing.sent, 0);
}

#[test]
fn test_shape_accepts_exact_length_without_trailing_reward() {
    let records = vec![deposit("A", 1, 10, OTHER), fee_record("B", 1000)];

    assert!(matches_shape(&records, 2));
    assert!(!matches_shape(&records, 1));
    assert!(!matches_shape(&records, 3));
}

#[test]
fn test_shape_accepts_exact_length_where_only_last_is_reward() {
    let records = vec![deposit("A", 1, 10, OTHER), reward_record("A", 5)];
    let doubled = vec![reward_record("A", 5), reward_record("A", 5)];

    assert!(matches_shape(&records, 2));
    assert!(matches_shape(&records, 1));
    assert!(!matches_shape(&doubled, 2));
}

#[test]
fn test_shape_accepts_one_extra_trailing_reward() {
    let records = vec![deposit("A", 1, 10, OTHER), fee_record("B", 1000), reward_record("B", 5)];

    assert!(matches_shape(&records, 2));
    assert!(!matches_shape(&[reward_record("A", 1), reward_record("A", 1)], 1));
    assert!(matches_shape(&[reward_record("A", 1)], 0));
    assert!(matches_shape(&[], 0));
}

#[test]
fn test_shape_binds_legs_and_returns_ownership_on_mismatch() -> Result<()> {
    let records = vec![withdrawal("A", 0, 10, 1000, OTHER), deposit("B", 5, 20, OTHER), reward_record("B", 3)];

    let records = match shape::<1>(records) {
        Ok(_) => return Err(anyhow!("one leg should not match a two leg group with reward")),
        Err(records) => records
    };

    assert_eq!(records.len(), 3);

    let shaped = shape::<2>(records).map_err(|_| anyhow!("two legs with reward should match"))?;
    let [paid, received] = &shaped.legs;

    assert!(paid.is_withdrawal());
    assert!(received.is_asa_deposit());
    assert!(shaped.reward.is_some());
    assert_eq!(shaped.into_records().len(), 3);

    Ok(())
}

#[test]
fn test_legs_mut_allows_in_place_relabelling() -> Result<()> {
    let mut records = vec![deposit("A", 5, 20, OTHER), fee_record("B", 1000)];
    let [received, fee] = legs_mut::<2>(&mut records).ok_or_else(|| anyhow!("shape mismatch"))?;

    received.comment = "relabelled".to_string();
    fee.flags.other_fee = true;

    assert_eq!(records[0].comment, "relabelled");
    assert!(records[1].flags.other_fee);
    assert!(legs_mut::<3>(&mut records).is_none());

    Ok(())
}
