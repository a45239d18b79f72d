//! Fundamental types for the SkillMint engine.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: principals, amounts, record ids, the logical clock, protocol
//! parameters, and the engine-wide error enum.

pub mod amount;
pub mod error;
pub mod id;
pub mod params;
pub mod principal;
pub mod time;

pub use amount::Amount;
pub use error::EngineError;
pub use id::{BountyId, CertificateId, LessonId, ReviewId};
pub use params::ProtocolParams;
pub use principal::Principal;
pub use time::{BlockHeight, Clock};
