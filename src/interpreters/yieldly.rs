use crate::interpreters::{ApplicationCall, GroupContext, InterpretError, Interpreter, LendingLedger};
use crate::models::{matches_shape, ExportRecord, OnCompletion};

/// What selects a rule: an action argument or an opt-out.
enum Trigger {
    Action(&'static str),
    CloseOut
}

/// A leg that must carry a given direction for the rule to apply.
enum Expect {
    Deposit(usize),
    Withdrawal(usize)
}

enum Label {
    Comment(usize, &'static str),
    /// Reward income with a comment.
    Reward(usize, &'static str),
    OtherFee(usize)
}

/// How an opt-out tells the returned stake from the claimed rewards.
enum OptOut {
    /// By sibling position of the inner transaction that paid it out.
    InnerPosition,
    /// By which of the first two group transactions the record belongs to.
    GroupPosition
}

enum Labels {
    Fixed(&'static [Label]),
    OptOut {
        by: OptOut,
        withdraw: &'static str,
        claim: &'static str
    }
}

struct Rule {
    trigger: Trigger,
    legs: usize,
    expect: &'static [Expect],
    labels: Labels
}

/// A family of Yieldly contracts described by an ordered rule list. The first rule
/// whose trigger, shape and leg directions match labels the group.
pub struct Yieldly {
    name: &'static str,
    rules: &'static [Rule]
}

const fn fixed(trigger: Trigger, legs: usize, expect: &'static [Expect], labels: &'static [Label]) -> Rule {
    Rule { trigger, legs, expect, labels: Labels::Fixed(labels) }
}

const PRIZE_GAME_CLAIM: &str = "Claim - Yieldly - ALGO Weekly Prize Game";
const PRIZE_GAME_DEPOSIT: &str = "Deposit - Yieldly - ALGO Weekly Prize Game";
const PRIZE_GAME_WITHDRAW: &str = "Withdraw - Yieldly - ALGO Weekly Prize Game";

pub static ALGO_PRIZE_GAME: Yieldly = Yieldly {
    name: "Yieldly ALGO Prize Game",
    rules: &[
        fixed(Trigger::Action("CA"), 4, &[Expect::Deposit(1)], &[Label::OtherFee(0), Label::Reward(1, PRIZE_GAME_CLAIM)]),
        fixed(Trigger::Action("D"), 3, &[Expect::Withdrawal(0)], &[Label::Comment(0, PRIZE_GAME_DEPOSIT)]),
        fixed(Trigger::Action("W"), 4, &[Expect::Deposit(1)], &[Label::OtherFee(0), Label::Comment(1, PRIZE_GAME_WITHDRAW)])
    ]
};

pub static DISTRIBUTION_POOLS: Yieldly = Yieldly {
    name: "Yieldly Distribution Pools",
    rules: &[
        fixed(Trigger::Action("CA"), 3, &[Expect::Deposit(0)], &[Label::Reward(0, "Claim - Yieldly - Distribution Pools")]),
        fixed(Trigger::Action("S"), 4, &[Expect::Withdrawal(0)], &[Label::Comment(0, "Stake - Yieldly - Distribution Pools")]),
        fixed(Trigger::Action("W"), 3, &[Expect::Deposit(0)], &[Label::Comment(0, "Withdraw - Yieldly - Distribution Pools")])
    ]
};

const STAKING_CLAIM: &str = "Claim - Yieldly - Staking Pools";
const STAKING_STAKE: &str = "Stake - Yieldly - Staking Pools";
const STAKING_WITHDRAW: &str = "Withdraw - Yieldly - Staking Pools";
const STAKING_OPT_OUT_WITHDRAW: &str = "Opt-out Withdraw - Yieldly - Staking Pools";
const STAKING_OPT_OUT_CLAIM: &str = "Opt-out Claim - Yieldly - Staking Pools";

pub static STAKING_POOLS: Yieldly = Yieldly {
    name: "Yieldly Staking Pools",
    rules: &[
        // TEAL5 contracts
        fixed(Trigger::Action("claim"), 3, &[Expect::Deposit(1)], &[Label::Reward(1, STAKING_CLAIM)]),
        fixed(Trigger::Action("stake"), 4, &[Expect::Withdrawal(1)], &[Label::Comment(1, STAKING_STAKE)]),
        fixed(Trigger::Action("withdraw"), 3, &[Expect::Deposit(1)], &[Label::Comment(1, STAKING_WITHDRAW)]),
        // TEAL4 and TEAL5 contracts
        fixed(Trigger::CloseOut, 4, &[], &[Label::Comment(0, STAKING_OPT_OUT_WITHDRAW), Label::Reward(1, STAKING_OPT_OUT_CLAIM)]),
        Rule {
            trigger: Trigger::CloseOut,
            legs: 3,
            expect: &[],
            labels: Labels::OptOut { by: OptOut::GroupPosition, withdraw: STAKING_OPT_OUT_WITHDRAW, claim: STAKING_OPT_OUT_CLAIM }
        },
        // TEAL4 contracts
        fixed(Trigger::Action("CA"), 3, &[Expect::Deposit(0)], &[Label::Reward(0, STAKING_CLAIM)]),
        fixed(Trigger::Action("S"), 4, &[Expect::Withdrawal(0)], &[Label::Comment(0, STAKING_STAKE)]),
        fixed(Trigger::Action("W"), 3, &[Expect::Deposit(0)], &[Label::Comment(0, STAKING_WITHDRAW)])
    ]
};

pub static STAKING_POOLS_YLDY_ALGO: Yieldly = Yieldly {
    name: "Yieldly YLDY/ALGO Staking Pool",
    rules: &[
        fixed(
            Trigger::Action("CAL"),
            6,
            &[Expect::Deposit(1), Expect::Deposit(2)],
            &[Label::Reward(1, STAKING_CLAIM), Label::Reward(2, STAKING_CLAIM)]
        ),
        fixed(Trigger::Action("S"), 4, &[Expect::Withdrawal(0)], &[Label::Comment(0, STAKING_STAKE)]),
        fixed(Trigger::Action("W"), 4, &[Expect::Deposit(1)], &[Label::OtherFee(0), Label::Comment(1, STAKING_WITHDRAW)])
    ]
};

const LIQUIDITY_OPT_OUT: Labels = Labels::OptOut {
    by: OptOut::InnerPosition,
    withdraw: "Opt-out Withdraw - Yieldly - Liquidity Pools",
    claim: "Opt-out Claim - Yieldly - Liquidity Pools"
};

pub static LIQUIDITY_POOLS: Yieldly = Yieldly {
    name: "Yieldly Liquidity Pools",
    rules: &[
        fixed(Trigger::Action("claim"), 3, &[Expect::Deposit(1)], &[Label::Reward(1, "Claim - Yieldly - Liquidity Pools")]),
        fixed(Trigger::Action("stake"), 4, &[Expect::Withdrawal(1)], &[Label::Comment(1, "Stake - Yieldly - Liquidity Pools")]),
        fixed(Trigger::Action("withdraw"), 3, &[Expect::Deposit(1)], &[Label::Comment(1, "Withdraw - Yieldly - Liquidity Pools")]),
        Rule { trigger: Trigger::CloseOut, legs: 3, expect: &[], labels: LIQUIDITY_OPT_OUT },
        Rule { trigger: Trigger::CloseOut, legs: 4, expect: &[], labels: LIQUIDITY_OPT_OUT }
    ]
};

/// NFT prize games move nothing worth relabelling.
pub static NFT_PRIZE_GAMES: Yieldly = Yieldly {
    name: "Yieldly NFT Prize Games",
    rules: &[]
};

impl Trigger {
    fn matches(&self, call: &ApplicationCall) -> bool {
        match self {
            Trigger::Action(action) => call.is_action(action),
            Trigger::CloseOut => call.on_completion == OnCompletion::CloseOut
        }
    }
}

impl Expect {
    fn holds(&self, records: &[ExportRecord]) -> bool {
        match *self {
            Expect::Deposit(index) => records.get(index).is_some_and(ExportRecord::is_deposit),
            Expect::Withdrawal(index) => records.get(index).is_some_and(ExportRecord::is_withdrawal)
        }
    }
}

impl Rule {
    fn matches(&self, call: &ApplicationCall, records: &[ExportRecord]) -> bool {
        self.trigger.matches(call)
            && matches_shape(records, self.legs)
            && self.expect.iter().all(|expect| expect.holds(records))
    }

    fn apply(&self, group: &GroupContext<'_>, records: &mut [ExportRecord]) {
        match &self.labels {
            Labels::Fixed(labels) => {
                for label in labels.iter() {
                    label.apply(records);
                }
            }
            Labels::OptOut { by: OptOut::InnerPosition, withdraw, claim } => {
                for record in records.iter_mut() {
                    match record.tag.position() {
                        Some(0) => record.comment = withdraw.to_string(),
                        Some(1) => {
                            record.flags.reward = true;
                            record.comment = claim.to_string();
                        }
                        _ => {}
                    }
                }
            }
            Labels::OptOut { by: OptOut::GroupPosition, withdraw, claim } => {
                let position = records.first().and_then(|record| {
                    group.transactions.iter()
                        .take(2)
                        .position(|transaction| transaction.id == record.tx_id)
                });

                match position {
                    Some(0) => Label::Comment(0, *withdraw).apply(records),
                    Some(_) => Label::Reward(0, *claim).apply(records),
                    None => {}
                }
            }
        }
    }
}

impl Label {
    fn apply(&self, records: &mut [ExportRecord]) {
        match *self {
            Label::Comment(index, comment) => {
                if let Some(record) = records.get_mut(index) {
                    record.comment = comment.to_string();
                }
            }
            Label::Reward(index, comment) => {
                if let Some(record) = records.get_mut(index) {
                    record.flags.reward = true;
                    record.comment = comment.to_string();
                }
            }
            Label::OtherFee(index) => {
                if let Some(record) = records.get_mut(index) {
                    record.flags.other_fee = true;
                }
            }
        }
    }
}

impl Interpreter for Yieldly {
    fn name(&self) -> &'static str {
        self.name
    }

    fn interpret(&self, group: &GroupContext<'_>, mut records: Vec<ExportRecord>, _ledger: &mut LendingLedger) -> Result<Vec<ExportRecord>, InterpretError> {
        if self.rules.is_empty() {
            return Ok(records);
        }

        let Some(rule) = self.rules.iter().find(|rule| rule.matches(&group.call, &records)) else {
            return Err(group.shape_mismatch(self.name, &records));
        };

        rule.apply(group, &mut records);

        Ok(records)
    }
}
