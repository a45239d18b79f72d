//! Bounty record.

use serde::{Deserialize, Serialize};
use skillmint_types::{Amount, BlockHeight, BountyId, Principal};

/// An escrowed skill bounty.
///
/// `winner` is set exactly once, by the successful claim that also flips
/// `is_active` to false. Never deleted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SkillBounty {
    pub id: BountyId,
    pub employer: Principal,
    pub title: String,
    pub description: String,
    /// Skill categories a claimant must hold valid certificates in.
    pub required_skills: Vec<String>,
    /// Full reward escrowed at creation, before the fee split.
    pub reward_amount: Amount,
    pub is_active: bool,
    pub winner: Option<Principal>,
    pub created_at: BlockHeight,
}
