mod akita;
mod algofi;
mod algomint;
mod errors;
mod ledger;
mod registry;
mod tinyman;
mod yieldly;

use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;

use crate::assets::AssetBook;
use crate::config::ExportConfig;
use crate::models::{ExportRecord, OnCompletion, Transaction};
use crate::types::ApplicationId;

pub use errors::InterpretError;
pub use ledger::LendingLedger;
pub use registry::InterpreterRegistry;

/// Reinterprets the decomposed records of one group according to what the
/// application it called actually did.
pub trait Interpreter: Send + Sync {
    fn name(&self) -> &'static str;

    fn interpret(&self, group: &GroupContext<'_>, records: Vec<ExportRecord>, ledger: &mut LendingLedger) -> Result<Vec<ExportRecord>, InterpretError>;
}

/// Application protocols an application id can be registered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Protocol {
    Tinyman,
    AkitaTokenSwap,
    YieldlyAlgoPrizeGame,
    YieldlyDistributionPools,
    YieldlyStakingPools,
    YieldlyStakingPoolsYldyAlgo,
    YieldlyLiquidityPools,
    YieldlyNftPrizeGames,
    #[serde(rename = "algofi-market")]
    AlgoFiMarket
}

impl Protocol {
    pub fn interpreter(self) -> &'static dyn Interpreter {
        match self {
            Protocol::Tinyman => &tinyman::Tinyman,
            Protocol::AkitaTokenSwap => &akita::AkitaTokenSwap,
            Protocol::YieldlyAlgoPrizeGame => &yieldly::ALGO_PRIZE_GAME,
            Protocol::YieldlyDistributionPools => &yieldly::DISTRIBUTION_POOLS,
            Protocol::YieldlyStakingPools => &yieldly::STAKING_POOLS,
            Protocol::YieldlyStakingPoolsYldyAlgo => &yieldly::STAKING_POOLS_YLDY_ALGO,
            Protocol::YieldlyLiquidityPools => &yieldly::LIQUIDITY_POOLS,
            Protocol::YieldlyNftPrizeGames => &yieldly::NFT_PRIZE_GAMES,
            Protocol::AlgoFiMarket => &algofi::AlgoFiMarket
        }
    }
}

impl Display for Protocol {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.interpreter().name())
    }
}

/// What the group asked its application to do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationCall {
    /// Application of the first application call in the group.
    pub application_id: Option<ApplicationId>,
    pub on_completion: OnCompletion,
    pub action: Option<String>
}

impl ApplicationCall {
    /// Reads the requested action from the group's application calls.
    ///
    /// The first call with a lifecycle action other than `noop` yields that action.
    /// Otherwise the first argument of a call names the action, unless it equals
    /// `skip_marker`, in which case the next call is consulted.
    pub fn extract(transactions: &[Arc<Transaction>], skip_marker: &str) -> Self {
        let calls = transactions.iter()
            .filter_map(|transaction| transaction.application_transaction.as_ref());

        let application_id = calls.clone().next().map(|call| call.application_id);

        for call in calls {
            if call.on_completion != OnCompletion::NoOp {
                return Self { application_id, on_completion: call.on_completion.clone(), action: None };
            }

            let Some(argument) = call.application_args.first() else {
                continue;
            };

            let argument = String::from_utf8_lossy(argument);
            if argument == skip_marker {
                continue;
            }

            return Self { application_id, on_completion: OnCompletion::NoOp, action: Some(argument.into_owned()) };
        }

        Self { application_id, ..Self::default() }
    }

    pub fn is_action(&self, action: &str) -> bool {
        self.action.as_deref() == Some(action)
    }
}

/// Read-only view of the group being interpreted.
pub struct GroupContext<'a> {
    pub transactions: &'a [Arc<Transaction>],
    pub account: &'a str,
    pub assets: &'a AssetBook,
    pub config: &'a ExportConfig,
    pub call: ApplicationCall
}

impl<'a> GroupContext<'a> {
    pub fn new(transactions: &'a [Arc<Transaction>], account: &'a str, assets: &'a AssetBook, config: &'a ExportConfig) -> Self {
        Self {
            transactions,
            account,
            assets,
            config,
            call: ApplicationCall::extract(transactions, &config.action_skip_marker)
        }
    }

    /// A real atomic group, or an application call that issued inner transactions.
    pub fn is_application_group(&self) -> bool {
        let grouped = self.transactions.len() > 1
            && self.transactions.first().is_some_and(|first| first.group_id().is_some());

        grouped || self.transactions.iter()
            .any(|transaction| transaction.is_application_call() && !transaction.inner_txns.is_empty())
    }

    /// Group id (base64) or, for an ungrouped call, its transaction id.
    pub fn describe(&self) -> String {
        match self.transactions.first() {
            Some(first) => match first.group_id() {
                Some(group) => STANDARD.encode(group),
                None => first.id.clone()
            },
            None => String::new()
        }
    }

    pub fn shape_mismatch(&self, protocol: &'static str, records: &[ExportRecord]) -> InterpretError {
        InterpretError::ShapeMismatch {
            protocol,
            on_completion: self.call.on_completion.to_string(),
            action: self.call.action.clone().unwrap_or_default(),
            records: records.len(),
            transactions: self.transactions.len()
        }
    }
}
