//! Owner/admin roles and the blacklist.

use serde::{Deserialize, Serialize};
use skillmint_types::{EngineError, Principal};
use std::collections::BTreeSet;

/// Role and blacklist state with a fixed owner.
///
/// The owner is set once at engine initialization and is permanent: it
/// cannot be blacklisted, cannot be removed as admin, and cannot be added to
/// the admin set (it already outranks it).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccessControl {
    owner: Principal,
    admins: BTreeSet<Principal>,
    blacklist: BTreeSet<Principal>,
}

impl AccessControl {
    pub fn new(owner: Principal) -> Self {
        Self {
            owner,
            admins: BTreeSet::new(),
            blacklist: BTreeSet::new(),
        }
    }

    pub fn owner(&self) -> &Principal {
        &self.owner
    }

    /// The owner counts as an admin without appearing in the admin set.
    pub fn is_admin(&self, principal: &Principal) -> bool {
        *principal == self.owner || self.admins.contains(principal)
    }

    pub fn is_blacklisted(&self, principal: &Principal) -> bool {
        self.blacklist.contains(principal)
    }

    /// Owner-only. Rejects the owner itself and principals already in the
    /// admin set.
    pub fn add_admin(&mut self, caller: &Principal, target: Principal) -> Result<(), EngineError> {
        if *caller != self.owner || target == self.owner || self.admins.contains(&target) {
            return Err(EngineError::Unauthorized);
        }
        tracing::info!(admin = %target, "admin added");
        self.admins.insert(target);
        Ok(())
    }

    /// Owner-only. Removing the owner is always rejected.
    pub fn remove_admin(
        &mut self,
        caller: &Principal,
        target: &Principal,
    ) -> Result<(), EngineError> {
        if *caller != self.owner || *target == self.owner {
            return Err(EngineError::Unauthorized);
        }
        self.admins.remove(target);
        tracing::info!(admin = %target, "admin removed");
        Ok(())
    }

    /// Admin-gated. The owner can never be blacklisted.
    pub fn blacklist(&mut self, caller: &Principal, target: Principal) -> Result<(), EngineError> {
        if !self.is_admin(caller) || target == self.owner {
            return Err(EngineError::Unauthorized);
        }
        tracing::warn!(principal = %target, "principal blacklisted");
        self.blacklist.insert(target);
        Ok(())
    }

    /// Admin-gated. Removing an absent principal is a no-op success.
    pub fn unblacklist(
        &mut self,
        caller: &Principal,
        target: &Principal,
    ) -> Result<(), EngineError> {
        if !self.is_admin(caller) {
            return Err(EngineError::Unauthorized);
        }
        self.blacklist.remove(target);
        tracing::info!(principal = %target, "principal removed from blacklist");
        Ok(())
    }
}
