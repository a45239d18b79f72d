//! Engine snapshots — capture the complete logical state at a height.
//!
//! A snapshot is the hand-off point for any durable store: it serializes
//! every collection, the security state, the rate windows, and the in-memory
//! ledger balances, with a content hash computed deterministically so a
//! restored copy can be verified byte-for-byte.

use crate::engine::SkillMintEngine;
use serde::{Deserialize, Serialize};
use skillmint_bounty::BountyBook;
use skillmint_certification::CertificationEngine;
use skillmint_funds::InMemoryLedger;
use skillmint_lessons::LessonRegistry;
use skillmint_policy::{AccessControl, EngineConfig, RateLimiter};
use skillmint_types::{BlockHeight, Clock, EngineError, ProtocolParams};

/// The serializable logical state behind a snapshot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct EngineState {
    pub access: AccessControl,
    pub config: EngineConfig,
    pub limiter: RateLimiter,
    pub lessons: LessonRegistry,
    pub certification: CertificationEngine,
    pub bounties: BountyBook,
    pub params: ProtocolParams,
    pub ledger: InMemoryLedger,
}

/// A full engine snapshot with a Blake2b-256 content hash.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineSnapshot {
    /// Snapshot format version for compatibility.
    pub version: u32,
    /// Height at which the snapshot was taken.
    pub taken_at: BlockHeight,
    /// Blake2b-256 of the serialized state.
    pub hash: [u8; 32],
    pub(crate) state: EngineState,
}

impl EngineSnapshot {
    /// Compute the content hash over the bincode-serialized state. All
    /// collections use ordered maps, so the bytes are deterministic.
    fn compute_hash(&self) -> [u8; 32] {
        use blake2::digest::consts::U32;
        use blake2::{Blake2b, Digest};

        let bytes =
            bincode::serialize(&self.state).expect("snapshot serialization should not fail");
        let mut hasher = Blake2b::<U32>::new();
        hasher.update(&bytes);
        hasher.update(self.taken_at.value().to_le_bytes());

        let result = hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&result);
        out
    }

    /// Verify the snapshot hash matches the state.
    pub fn verify(&self) -> bool {
        self.hash == self.compute_hash()
    }

    /// Serialize the snapshot to bytes (bincode).
    pub fn to_bytes(&self) -> Vec<u8> {
        bincode::serialize(self).expect("snapshot serialization should not fail")
    }

    /// Deserialize a snapshot from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EngineError> {
        bincode::deserialize(bytes)
            .map_err(|e| EngineError::InvalidInput(format!("malformed snapshot: {e}")))
    }
}

impl<C: Clock> SkillMintEngine<InMemoryLedger, C> {
    /// Capture the complete logical state.
    pub fn snapshot(&self) -> EngineSnapshot {
        let state = EngineState {
            access: self.access.clone(),
            config: self.config.clone(),
            limiter: self.limiter.clone(),
            lessons: self.lessons.clone(),
            certification: self.certification.clone(),
            bounties: self.bounties.clone(),
            params: self.params.clone(),
            ledger: self.ledger.clone(),
        };
        let mut snap = EngineSnapshot {
            version: 1,
            taken_at: self.clock.height(),
            hash: [0u8; 32],
            state,
        };
        snap.hash = snap.compute_hash();
        snap
    }

    /// Rebuild an engine from a verified snapshot and a fresh clock.
    pub fn restore(snapshot: EngineSnapshot, clock: C) -> Result<Self, EngineError> {
        if !snapshot.verify() {
            return Err(EngineError::InvalidInput(
                "snapshot hash does not match its state".into(),
            ));
        }
        let state = snapshot.state;
        Ok(Self {
            access: state.access,
            config: state.config,
            limiter: state.limiter,
            lessons: state.lessons,
            certification: state.certification,
            bounties: state.bounties,
            params: state.params,
            ledger: state.ledger,
            clock,
        })
    }
}
