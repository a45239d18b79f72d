//! The ledger trait and its in-memory implementation.

use crate::FundsError;
use serde::{Deserialize, Serialize};
use skillmint_types::{Amount, Principal};
use std::collections::BTreeMap;
use std::fmt;

/// A ledger account the engine can move funds between.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Account {
    /// An external principal's account.
    User(Principal),
    /// Funds held by the engine between bounty creation and claim.
    Escrow,
    /// Accumulated platform fees.
    Treasury,
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(p) => write!(f, "user:{p}"),
            Self::Escrow => write!(f, "escrow"),
            Self::Treasury => write!(f, "treasury"),
        }
    }
}

/// Debit/credit primitives the engine requires from its funds collaborator.
///
/// `transfer` is all-or-nothing: either the full amount moves or neither
/// balance changes.
pub trait FundsLedger {
    /// Current balance of an account. Unknown accounts hold zero.
    fn balance_of(&self, account: &Account) -> Amount;

    /// Move `amount` from one account to another, debit-or-fail.
    fn transfer(&mut self, from: &Account, to: &Account, amount: Amount)
        -> Result<(), FundsError>;

    /// Credit an account from outside the ledger. Host-side seeding only —
    /// engine operations never mint.
    fn deposit(&mut self, account: &Account, amount: Amount);
}

/// Map-backed ledger — the default backing for a single-process engine and
/// for tests. Ordered keys keep serialization deterministic.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InMemoryLedger {
    balances: BTreeMap<Account, Amount>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FundsLedger for InMemoryLedger {
    fn balance_of(&self, account: &Account) -> Amount {
        self.balances.get(account).copied().unwrap_or(Amount::ZERO)
    }

    fn transfer(
        &mut self,
        from: &Account,
        to: &Account,
        amount: Amount,
    ) -> Result<(), FundsError> {
        if amount.is_zero() {
            return Err(FundsError::ZeroAmount);
        }
        let available = self.balance_of(from);
        let remaining =
            available
                .checked_sub(amount)
                .ok_or(FundsError::InsufficientFunds {
                    needed: amount.raw(),
                    available: available.raw(),
                })?;
        let credited = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(FundsError::Overflow)?;
        self.balances.insert(from.clone(), remaining);
        self.balances.insert(to.clone(), credited);
        Ok(())
    }

    fn deposit(&mut self, account: &Account, amount: Amount) {
        let updated = self.balance_of(account).saturating_add(amount);
        self.balances.insert(account.clone(), updated);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Account {
        Account::User(Principal::new("alice"))
    }

    fn bob() -> Account {
        Account::User(Principal::new("bob"))
    }

    #[test]
    fn test_transfer_moves_funds() {
        let mut ledger = InMemoryLedger::new();
        ledger.deposit(&alice(), Amount::new(1000));

        ledger
            .transfer(&alice(), &bob(), Amount::new(400))
            .expect("transfer should succeed");

        assert_eq!(ledger.balance_of(&alice()), Amount::new(600));
        assert_eq!(ledger.balance_of(&bob()), Amount::new(400));
    }

    #[test]
    fn test_insufficient_funds_leaves_balances_untouched() {
        let mut ledger = InMemoryLedger::new();
        ledger.deposit(&alice(), Amount::new(100));

        let result = ledger.transfer(&alice(), &bob(), Amount::new(101));
        assert!(matches!(
            result.unwrap_err(),
            FundsError::InsufficientFunds {
                needed: 101,
                available: 100
            }
        ));
        assert_eq!(ledger.balance_of(&alice()), Amount::new(100));
        assert_eq!(ledger.balance_of(&bob()), Amount::ZERO);
    }

    #[test]
    fn test_zero_transfer_rejected() {
        let mut ledger = InMemoryLedger::new();
        let result = ledger.transfer(&alice(), &bob(), Amount::ZERO);
        assert!(matches!(result.unwrap_err(), FundsError::ZeroAmount));
    }

    #[test]
    fn test_escrow_and_treasury_are_distinct_accounts() {
        let mut ledger = InMemoryLedger::new();
        ledger.deposit(&Account::Escrow, Amount::new(500));

        ledger
            .transfer(&Account::Escrow, &Account::Treasury, Amount::new(25))
            .expect("transfer should succeed");

        assert_eq!(ledger.balance_of(&Account::Escrow), Amount::new(475));
        assert_eq!(ledger.balance_of(&Account::Treasury), Amount::new(25));
    }
}
