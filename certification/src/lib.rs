//! Skill certification — certificates, peer reviews, composite skills.
//!
//! Trust is derived from multiple independent peer judgments: a certificate
//! only becomes valid once it has collected the configured minimum number of
//! reviews, and it lapses again when its validity period runs out. Expired
//! certificates can be refreshed by their owner; two valid certificates in
//! distinct categories can be combined into a composite.

pub mod certificate;
pub mod engine;
pub mod review;

pub use certificate::SkillCertificate;
pub use engine::CertificationEngine;
pub use review::PeerReview;
