//! The SkillMint engine — single source of truth for the marketplace.
//!
//! Wires the policy gates, lesson registry, certification engine, and bounty
//! escrow behind one serialized facade. Every mutating marketplace call runs
//! the fixed gate chain (blacklist → pause → rate limit → domain validation)
//! and either commits fully or returns exactly one
//! [`EngineError`](skillmint_types::EngineError).
//!
//! The engine takes `&mut self` on every mutating operation, so a host that
//! needs concurrent callers wraps it behind one mutual-exclusion boundary;
//! the borrow checker enforces the single-writer model in-process.

pub mod engine;
pub mod logging;
pub mod snapshot;
pub mod stats;

pub use engine::SkillMintEngine;
pub use snapshot::EngineSnapshot;
pub use stats::EngineStats;
