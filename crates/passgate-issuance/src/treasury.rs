//! Collected claim payments and their payout.

use serde::{Deserialize, Serialize};

use passgate_core::{Amount, Identity};

use crate::error::GateError;

/// A balance leaving the drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    /// Recipient.
    pub to: Identity,
    /// Amount paid out; may be zero.
    pub amount: Amount,
}

/// The drop's collected balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Treasury {
    balance: Amount,
}

impl Treasury {
    /// An empty treasury.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current balance.
    pub fn balance(&self) -> Amount {
        self.balance
    }

    /// The balance after receiving `amount`, without applying it.
    pub fn balance_after(&self, amount: Amount) -> Result<Amount, GateError> {
        self.balance
            .checked_add(amount)
            .ok_or(GateError::BalanceOverflow)
    }

    /// Apply a balance previously computed by [`Treasury::balance_after`].
    pub(crate) fn settle(&mut self, balance: Amount) {
        self.balance = balance;
    }

    /// Pay the entire balance to `to`.
    pub fn drain(&mut self, to: Identity) -> Payout {
        let amount = std::mem::take(&mut self.balance);
        Payout { to, amount }
    }
}
