use std::collections::HashMap;

/// Principal an account has supplied to and borrowed from lending markets, keyed
/// by the market's asset unit name.
///
/// Owned by one account exporter and threaded through every interpreter call of
/// that account, in chain order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LendingLedger {
    supplied: HashMap<String, u64>,
    borrowed: HashMap<String, u64>
}

/// How much of a withdrawal or repayment settles tracked principal and how much
/// exceeds it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    pub principal: u64,
    pub excess: u64
}

impl LendingLedger {
    pub fn supplied(&self, market: &str) -> u64 {
        self.supplied.get(market).copied().unwrap_or_default()
    }

    pub fn borrowed(&self, market: &str) -> u64 {
        self.borrowed.get(market).copied().unwrap_or_default()
    }

    pub fn supply(&mut self, market: &str, amount: u64) {
        credit(&mut self.supplied, market, amount);
    }

    /// Takes `amount` out of the supplied principal; anything above it is interest earned.
    pub fn withdraw(&mut self, market: &str, amount: u64) -> Settlement {
        settle(&mut self.supplied, market, amount)
    }

    pub fn borrow(&mut self, market: &str, amount: u64) {
        credit(&mut self.borrowed, market, amount);
    }

    /// Pays `amount` back against the borrowed principal; anything above it is interest paid.
    pub fn repay(&mut self, market: &str, amount: u64) -> Settlement {
        settle(&mut self.borrowed, market, amount)
    }
}

fn credit(balances: &mut HashMap<String, u64>, market: &str, amount: u64) {
    let balance = balances.entry(market.to_string()).or_default();
    *balance = balance.saturating_add(amount);
}

fn settle(balances: &mut HashMap<String, u64>, market: &str, amount: u64) -> Settlement {
    let balance = balances.entry(market.to_string()).or_default();
    let principal = amount.min(*balance);

    *balance -= principal;

    Settlement { principal, excess: amount - principal }
}
