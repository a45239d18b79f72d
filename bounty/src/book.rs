//! The bounty book — creation with escrow, exactly-once claiming.

use crate::bounty::SkillBounty;
use serde::{Deserialize, Serialize};
use skillmint_funds::{Account, FundsLedger};
use skillmint_types::{Amount, BlockHeight, BountyId, EngineError, Principal, ProtocolParams};
use std::collections::BTreeMap;

/// Owns every bounty and drives escrow movements on the funds ledger.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BountyBook {
    bounties: BTreeMap<BountyId, SkillBounty>,
    next_id: u64,
}

impl BountyBook {
    pub fn new() -> Self {
        Self {
            bounties: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Create a bounty, escrowing the reward from the employer.
    ///
    /// The debit happens before the record is inserted and the insert cannot
    /// fail, so a created bounty is always backed by escrowed funds.
    #[allow(clippy::too_many_arguments)]
    pub fn create<L: FundsLedger>(
        &mut self,
        employer: &Principal,
        title: &str,
        description: &str,
        required_skills: Vec<String>,
        reward_amount: Amount,
        max_stake: Amount,
        ledger: &mut L,
        now: BlockHeight,
        params: &ProtocolParams,
    ) -> Result<BountyId, EngineError> {
        if title.is_empty() || title.len() > params.max_title_len {
            return Err(EngineError::InvalidInput(
                "title must be non-empty and within bounds".into(),
            ));
        }
        if description.is_empty() || description.len() > params.max_description_len {
            return Err(EngineError::InvalidInput(
                "description must be non-empty and within bounds".into(),
            ));
        }
        if required_skills.is_empty() {
            return Err(EngineError::InvalidBounty(
                "required skills must not be empty".into(),
            ));
        }
        if required_skills.iter().any(|s| s.is_empty()) {
            return Err(EngineError::InvalidBounty(
                "required skills must be non-empty names".into(),
            ));
        }
        if reward_amount.is_zero() {
            return Err(EngineError::InvalidBounty(
                "reward must be positive".into(),
            ));
        }
        if reward_amount > max_stake {
            return Err(EngineError::InvalidBounty(format!(
                "reward exceeds max stake {max_stake}"
            )));
        }

        ledger
            .transfer(&Account::User(employer.clone()), &Account::Escrow, reward_amount)
            .map_err(|e| EngineError::InvalidBounty(format!("reward not escrowed: {e}")))?;

        let id = BountyId::new(self.next_id);
        self.next_id += 1;
        self.bounties.insert(
            id,
            SkillBounty {
                id,
                employer: employer.clone(),
                title: title.to_owned(),
                description: description.to_owned(),
                required_skills,
                reward_amount,
                is_active: true,
                winner: None,
                created_at: now,
            },
        );
        tracing::info!(bounty = %id, employer = %employer, reward = %reward_amount, "bounty created");
        Ok(id)
    }

    /// Claim a bounty, paying out `reward - fee` to the claimant and `fee`
    /// to the platform treasury.
    ///
    /// `is_eligible` judges one required skill at a time; every listed skill
    /// must pass. The state flip and both transfers commit together: all
    /// checks (including escrow coverage) run before the first mutation.
    /// Returns the claimant's payout.
    pub fn claim<L, F>(
        &mut self,
        caller: &Principal,
        bounty_id: BountyId,
        fee_percent: u32,
        ledger: &mut L,
        is_eligible: F,
    ) -> Result<Amount, EngineError>
    where
        L: FundsLedger,
        F: Fn(&str) -> bool,
    {
        let bounty = self
            .bounties
            .get(&bounty_id)
            .filter(|b| b.is_active)
            .ok_or_else(|| EngineError::NotFound(bounty_id.to_string()))?;

        if !bounty.required_skills.iter().all(|s| is_eligible(s)) {
            return Err(EngineError::Unauthorized);
        }

        let reward = bounty.reward_amount;
        let fee = reward
            .percent(fee_percent)
            .ok_or_else(|| EngineError::InvalidBounty("fee computation overflow".into()))?;
        let payout = reward - fee;

        // The escrow must cover the full reward before anything moves; an
        // emergency withdrawal may have drained it.
        if ledger.balance_of(&Account::Escrow) < reward {
            return Err(EngineError::InvalidBounty(
                "escrow no longer covers the reward".into(),
            ));
        }
        if !payout.is_zero() {
            ledger
                .transfer(&Account::Escrow, &Account::User(caller.clone()), payout)
                .map_err(|e| EngineError::InvalidBounty(format!("payout failed: {e}")))?;
        }
        if !fee.is_zero() {
            ledger
                .transfer(&Account::Escrow, &Account::Treasury, fee)
                .map_err(|e| EngineError::InvalidBounty(format!("fee transfer failed: {e}")))?;
        }

        let bounty = self
            .bounties
            .get_mut(&bounty_id)
            .ok_or_else(|| EngineError::NotFound(bounty_id.to_string()))?;
        bounty.is_active = false;
        bounty.winner = Some(caller.clone());
        tracing::info!(bounty = %bounty_id, winner = %caller, %payout, %fee, "bounty claimed");
        Ok(payout)
    }

    pub fn get(&self, bounty_id: BountyId) -> Option<&SkillBounty> {
        self.bounties.get(&bounty_id)
    }

    pub fn bounty_count(&self) -> u64 {
        self.bounties.len() as u64
    }
}

impl Default for BountyBook {
    fn default() -> Self {
        Self::new()
    }
}
