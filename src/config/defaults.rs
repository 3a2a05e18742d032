use chrono::DateTime;

use crate::config::{
    AirdropConfig, AirdropDistributor, AlgomintConfig, ApplicationEntry, ExportConfig, GovernanceConfig,
    GovernancePeriod, MiningSource, StakingService, VerifiedAsset, WrappedAsset,
};
use crate::interpreters::Protocol;
use crate::types::Quantity;

/// 2022-03-01T14:00:01Z, 12:01am AEST on the day Algomint started charging mint fees.
const ALGOMINT_FEE_EFFECTIVE: i64 = 1_646_143_201;

const GOVERNANCE_PERIODS: [&str; 5] = [
    "GULDQIEZ2CUPBSHKXRWUW7X3LCYL44AI5GGSHHOQDGKJAZ2OANZJ43S72U",
    "57QZ4S7YHTWPRAM3DQ2MLNSVLAQB7DTK4D7SUNRIEFMRGOU7DMYFGF55BY",
    "UD33QBPIM4ZO4B2WK5Y5DYT5J5LYY5FA3IF3G4AVYSCWLCSMS5NYDRW6GE",
    "UAME4M7T2NWECVNCUDGQX6LJ7OVDLZP234GFQL3TH6YZUPRV3VF5NGRSRI",
    "7K5TT4US7M3FM7L3XBJXSXLJGF2WCXPBV2YZJJO2FH46VCZOS3ICJ7E4QU"
];

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            strict: false,
            exchange: "ALGO Wallet".to_string(),
            action_skip_marker: "bail".to_string(),
            verified_assets: vec![
                verified(163650, None),          // ARCC
                verified(31566704, None),        // USDC
                verified(137594422, None),       // HDL
                verified(226701642, None),       // YLDY
                verified(230946361, Some("GEMS3")),
                verified(27165954, None),        // PLANETS
                verified(283820866, None),       // XET
                verified(287867876, None)        // OPUL
            ],
            applications: vec![
                ApplicationEntry { id: 552635992, protocol: Protocol::Tinyman },
                ApplicationEntry { id: 350338509, protocol: Protocol::Tinyman },
                ApplicationEntry { id: 537279393, protocol: Protocol::AkitaTokenSwap }
            ],
            airdrops: AirdropConfig::default(),
            mining: vec![MiningSource {
                address: "ZW3ISEHZUHPO7OZGMKLKIIMKVICOUDRCERI454I3DB2BH52HGLSO67W754".to_string(),
                asset_id: 27165954,
                comment: String::new()
            }],
            governance: GovernanceConfig::default(),
            staking_services: vec![StakingService {
                address: "4ZK3UPFRJ643ETWSWZ4YJXH3LQTL2FUEI6CIT7HEOVZL6JOECVRMPP34CY".to_string(),
                comment: "AlgoStake".to_string()
            }],
            lending_markets: ["ALGO", "STBL", "USDC", "goBTC", "goETH"].map(String::from).to_vec(),
            algomint: AlgomintConfig::default()
        }
    }
}

impl Default for AirdropConfig {
    fn default() -> Self {
        Self {
            distributors: vec![AirdropDistributor {
                address: "LWWSLXSOC2J3HMNXYPWSMGIJ4A2BRVO65LLL5IU374R24IWV6NIKCT2ZGA".to_string(),
                asset_id: Some(226701642),
                label: "YLDY Team Airdrop".to_string()
            }],
            tool_markers: vec!["- powered by Freckle Token airdrop tool".to_string()]
        }
    }
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            note_prefix: r#"af/gov1:j{"rewardsPrd":"#.to_string(),
            periods: GOVERNANCE_PERIODS.iter()
                .zip(1..)
                .map(|(address, period)| GovernancePeriod { period, address: address.to_string() })
                .collect()
        }
    }
}

impl Default for AlgomintConfig {
    fn default() -> Self {
        Self {
            address: "ETGSQKACKC56JWGMDAEP5S2JVQWRKTQUVKCZTMPNUGZLDVCWPY63LSI3H4".to_string(),
            fee_rate: Quantity::from_scaled(2, 3),
            fee_effective: DateTime::from_timestamp(ALGOMINT_FEE_EFFECTIVE, 0).unwrap_or_default(),
            assets: vec![
                WrappedAsset {
                    asset_id: 386192725,
                    symbol: "goBTC".to_string(),
                    currency: "BTC".to_string(),
                    network_fee: Quantity::from_scaled(1, 4),
                    fractional_digits: 8
                },
                WrappedAsset {
                    asset_id: 386195940,
                    symbol: "goETH".to_string(),
                    currency: "ETH".to_string(),
                    network_fee: Quantity::from_scaled(25, 4),
                    fractional_digits: 8
                }
            ]
        }
    }
}

fn verified(asset_id: u64, symbol: Option<&str>) -> VerifiedAsset {
    VerifiedAsset { asset_id, symbol: symbol.map(String::from) }
}
