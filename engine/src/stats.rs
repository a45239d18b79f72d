//! Engine summary statistics.

use crate::engine::SkillMintEngine;
use serde::{Deserialize, Serialize};
use skillmint_funds::{Account, FundsLedger};
use skillmint_types::{Amount, Clock};

/// A point-in-time projection of the engine for status displays.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStats {
    pub paused: bool,
    pub emergency_mode: bool,
    pub total_lessons: u64,
    pub total_certificates: u64,
    pub total_reviews: u64,
    pub total_bounties: u64,
    pub escrow_balance: Amount,
    pub treasury_balance: Amount,
}

impl<L: FundsLedger, C: Clock> SkillMintEngine<L, C> {
    pub fn stats(&self) -> EngineStats {
        EngineStats {
            paused: self.config.is_paused(),
            emergency_mode: self.config.emergency_mode(),
            total_lessons: self.lessons.plan_count(),
            total_certificates: self.certification.certificate_count(),
            total_reviews: self.certification.review_count(),
            total_bounties: self.bounties.bounty_count(),
            escrow_balance: self.ledger.balance_of(&Account::Escrow),
            treasury_balance: self.ledger.balance_of(&Account::Treasury),
        }
    }
}
