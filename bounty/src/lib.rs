//! Bounty escrow.
//!
//! A bounty's reward is debited from the employer into escrow atomically
//! with record creation — no bounty ever exists unbacked. Claiming is
//! exactly-once: the winning claim flips the bounty inactive, records the
//! winner, and splits the escrowed reward between the claimant and the
//! platform treasury in the same transaction.

pub mod book;
pub mod bounty;

pub use book::BountyBook;
pub use bounty::SkillBounty;
