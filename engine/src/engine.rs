//! The engine facade — gate ordering and every public operation.

use skillmint_bounty::{BountyBook, SkillBounty};
use skillmint_certification::{CertificationEngine, PeerReview, SkillCertificate};
use skillmint_funds::{Account, FundsLedger};
use skillmint_lessons::{LessonPlan, LessonRegistry, UserProgress};
use skillmint_policy::{AccessControl, EngineConfig, RateLimiter};
use skillmint_types::{
    Amount, BlockHeight, BountyId, CertificateId, Clock, EngineError, LessonId, Principal,
    ProtocolParams, ReviewId,
};

/// The SkillMint engine.
///
/// One instance owns all marketplace state. Mutating operations take
/// `&mut self` and execute as one indivisible transaction: validation first,
/// then effects, so a returned error means nothing changed.
#[derive(Debug)]
pub struct SkillMintEngine<L, C> {
    pub(crate) access: AccessControl,
    pub(crate) config: EngineConfig,
    pub(crate) limiter: RateLimiter,
    pub(crate) lessons: LessonRegistry,
    pub(crate) certification: CertificationEngine,
    pub(crate) bounties: BountyBook,
    pub(crate) params: ProtocolParams,
    pub(crate) ledger: L,
    pub(crate) clock: C,
}

impl<L: FundsLedger, C: Clock> SkillMintEngine<L, C> {
    /// Create an engine with the default parameters. `owner` is fixed for
    /// the engine's entire lifetime.
    pub fn new(owner: Principal, ledger: L, clock: C) -> Self {
        Self::with_params(owner, ledger, clock, ProtocolParams::default())
    }

    pub fn with_params(owner: Principal, ledger: L, clock: C, params: ProtocolParams) -> Self {
        Self {
            access: AccessControl::new(owner),
            config: EngineConfig::new(),
            limiter: RateLimiter::new(params.rate_limit_cap, params.rate_window_blocks),
            lessons: LessonRegistry::new(),
            certification: CertificationEngine::new(),
            bounties: BountyBook::new(),
            params,
            ledger,
            clock,
        }
    }

    /// The gate chain every mutating marketplace call passes through, in
    /// fixed order: blacklist, pause, rate limit. Blacklisted and paused
    /// callers never consume rate quota. Returns the height the operation
    /// executes at.
    fn gate(&mut self, caller: &Principal) -> Result<BlockHeight, EngineError> {
        if self.access.is_blacklisted(caller) {
            return Err(EngineError::Blacklisted);
        }
        if self.config.is_paused() {
            return Err(EngineError::ContractPaused);
        }
        let now = self.clock.height();
        self.limiter.check_and_record(caller, now)?;
        Ok(now)
    }

    /// Role gate for the admin surface. Admin operations skip the pause and
    /// rate-limit gates but still refuse blacklisted callers.
    fn require_active_admin(&self, caller: &Principal) -> Result<(), EngineError> {
        if self.access.is_blacklisted(caller) {
            return Err(EngineError::Blacklisted);
        }
        if !self.access.is_admin(caller) {
            return Err(EngineError::Unauthorized);
        }
        Ok(())
    }

    // ── Lesson registry ──────────────────────────────────────────────────

    pub fn create_lesson_plan(
        &mut self,
        caller: &Principal,
        title: &str,
        description: &str,
        skill_category: &str,
        difficulty: u32,
        price: Amount,
    ) -> Result<LessonId, EngineError> {
        let now = self.gate(caller)?;
        self.lessons.create_plan(
            caller.clone(),
            title,
            description,
            skill_category,
            difficulty,
            price,
            now,
            &self.params,
        )
    }

    pub fn complete_lesson(
        &mut self,
        caller: &Principal,
        lesson_id: LessonId,
        score: u32,
    ) -> Result<(), EngineError> {
        let now = self.gate(caller)?;
        self.lessons.complete(caller.clone(), lesson_id, score, now)
    }

    // ── Certification ────────────────────────────────────────────────────

    pub fn submit_skill_certification(
        &mut self,
        caller: &Principal,
        skill_category: &str,
        lesson_ids: &[LessonId],
    ) -> Result<CertificateId, EngineError> {
        let now = self.gate(caller)?;
        self.certification.submit_certification(
            caller,
            skill_category,
            lesson_ids,
            &self.lessons,
            now,
            &self.params,
        )
    }

    pub fn submit_peer_review(
        &mut self,
        caller: &Principal,
        certificate_id: CertificateId,
        score: u32,
        feedback: &str,
    ) -> Result<ReviewId, EngineError> {
        let now = self.gate(caller)?;
        self.certification
            .submit_review(caller, certificate_id, score, feedback, now, &self.params)
    }

    pub fn refresh_certification(
        &mut self,
        caller: &Principal,
        certificate_id: CertificateId,
    ) -> Result<(), EngineError> {
        let now = self.gate(caller)?;
        self.certification
            .refresh(caller, certificate_id, now, &self.params)
    }

    pub fn create_composite_skill(
        &mut self,
        caller: &Principal,
        skill_a: &str,
        skill_b: &str,
        composite_name: &str,
    ) -> Result<CertificateId, EngineError> {
        let now = self.gate(caller)?;
        let min_reviews = self.config.min_reviews_required();
        self.certification.create_composite(
            caller,
            skill_a,
            skill_b,
            composite_name,
            now,
            &self.params,
            min_reviews,
        )
    }

    // ── Bounty escrow ────────────────────────────────────────────────────

    pub fn create_skill_bounty(
        &mut self,
        caller: &Principal,
        title: &str,
        description: &str,
        required_skills: Vec<String>,
        reward_amount: Amount,
    ) -> Result<BountyId, EngineError> {
        let now = self.gate(caller)?;
        let max_stake = self.config.max_stake_amount();
        self.bounties.create(
            caller,
            title,
            description,
            required_skills,
            reward_amount,
            max_stake,
            &mut self.ledger,
            now,
            &self.params,
        )
    }

    /// Claim a bounty. The caller must hold a currently-valid certificate in
    /// every required skill. Returns the payout received.
    pub fn claim_bounty(
        &mut self,
        caller: &Principal,
        bounty_id: BountyId,
    ) -> Result<Amount, EngineError> {
        let now = self.gate(caller)?;
        let min_reviews = self.config.min_reviews_required();
        let fee_percent = self.config.platform_fee_percent();
        let certification = &self.certification;
        self.bounties.claim(
            caller,
            bounty_id,
            fee_percent,
            &mut self.ledger,
            |skill| certification.has_valid_skill(caller, skill, now, min_reviews),
        )
    }

    // ── Roles and blacklist ──────────────────────────────────────────────

    pub fn add_admin(&mut self, caller: &Principal, target: Principal) -> Result<(), EngineError> {
        self.access.add_admin(caller, target)
    }

    pub fn remove_admin(
        &mut self,
        caller: &Principal,
        target: &Principal,
    ) -> Result<(), EngineError> {
        self.access.remove_admin(caller, target)
    }

    pub fn blacklist_user(
        &mut self,
        caller: &Principal,
        target: Principal,
    ) -> Result<(), EngineError> {
        self.access.blacklist(caller, target)
    }

    pub fn remove_from_blacklist(
        &mut self,
        caller: &Principal,
        target: &Principal,
    ) -> Result<(), EngineError> {
        self.access.unblacklist(caller, target)
    }

    // ── Liveness and configuration ───────────────────────────────────────

    pub fn pause_contract(&mut self, caller: &Principal) -> Result<(), EngineError> {
        self.require_active_admin(caller)?;
        self.config.set_paused(true);
        Ok(())
    }

    pub fn unpause_contract(&mut self, caller: &Principal) -> Result<(), EngineError> {
        self.require_active_admin(caller)?;
        self.config.set_paused(false);
        Ok(())
    }

    pub fn enable_emergency_mode(&mut self, caller: &Principal) -> Result<(), EngineError> {
        self.require_active_admin(caller)?;
        self.config.set_emergency_mode(true);
        Ok(())
    }

    pub fn disable_emergency_mode(&mut self, caller: &Principal) -> Result<(), EngineError> {
        self.require_active_admin(caller)?;
        self.config.set_emergency_mode(false);
        Ok(())
    }

    pub fn update_min_reviews(
        &mut self,
        caller: &Principal,
        min_reviews: u32,
    ) -> Result<(), EngineError> {
        self.require_active_admin(caller)?;
        self.config.set_min_reviews(min_reviews)
    }

    pub fn update_max_stake(
        &mut self,
        caller: &Principal,
        max_stake: Amount,
    ) -> Result<(), EngineError> {
        self.require_active_admin(caller)?;
        self.config.set_max_stake(max_stake)
    }

    pub fn update_platform_fee(
        &mut self,
        caller: &Principal,
        percent: u32,
    ) -> Result<(), EngineError> {
        self.require_active_admin(caller)?;
        self.config.set_platform_fee(percent)
    }

    /// Owner/admin escape hatch: move escrowed funds out while emergency
    /// mode is active. Deliberately bypasses the pause and rate-limit gates.
    pub fn emergency_withdraw(
        &mut self,
        caller: &Principal,
        amount: Amount,
    ) -> Result<(), EngineError> {
        self.require_active_admin(caller)?;
        if !self.config.emergency_mode() {
            return Err(EngineError::EmergencyWithdrawalNotPermitted);
        }
        if amount.is_zero() {
            return Err(EngineError::InvalidInput(
                "withdrawal amount must be positive".into(),
            ));
        }
        self.ledger
            .transfer(&Account::Escrow, &Account::User(caller.clone()), amount)
            .map_err(|e| {
                EngineError::InvalidInput(format!("withdrawal exceeds escrowed funds: {e}"))
            })?;
        tracing::warn!(admin = %caller, %amount, "emergency withdrawal");
        Ok(())
    }

    // ── Read-only queries ────────────────────────────────────────────────

    pub fn get_lesson_plan(&self, lesson_id: LessonId) -> Option<&LessonPlan> {
        self.lessons.get(lesson_id)
    }

    pub fn get_user_progress(
        &self,
        user: &Principal,
        lesson_id: LessonId,
    ) -> Option<&UserProgress> {
        self.lessons.progress(user, lesson_id)
    }

    pub fn get_skill_certificate(&self, certificate_id: CertificateId) -> Option<&SkillCertificate> {
        self.certification.get(certificate_id)
    }

    pub fn get_peer_review(&self, review_id: ReviewId) -> Option<&PeerReview> {
        self.certification.get_review(review_id)
    }

    pub fn get_bounty(&self, bounty_id: BountyId) -> Option<&SkillBounty> {
        self.bounties.get(bounty_id)
    }

    /// Whether a certificate is currently valid: it exists, is unexpired,
    /// and has reached the review consensus threshold.
    pub fn is_skill_valid(&self, certificate_id: CertificateId) -> bool {
        self.certification.is_valid(
            certificate_id,
            self.clock.height(),
            self.config.min_reviews_required(),
        )
    }

    pub fn is_contract_paused(&self) -> bool {
        self.config.is_paused()
    }

    pub fn is_emergency_mode_enabled(&self) -> bool {
        self.config.emergency_mode()
    }

    pub fn is_user_admin(&self, principal: &Principal) -> bool {
        self.access.is_admin(principal)
    }

    pub fn is_user_blacklisted(&self, principal: &Principal) -> bool {
        self.access.is_blacklisted(principal)
    }

    pub fn get_min_reviews_required(&self) -> u32 {
        self.config.min_reviews_required()
    }

    pub fn get_max_stake_amount(&self) -> Amount {
        self.config.max_stake_amount()
    }

    pub fn get_platform_fee(&self) -> u32 {
        self.config.platform_fee_percent()
    }

    /// Rate-limit monitoring: start of the most recent window `principal`
    /// operated in.
    pub fn get_last_operation_block(&self, principal: &Principal) -> Option<BlockHeight> {
        self.limiter.last_operation_block(principal)
    }

    /// Rate-limit monitoring: operations `principal` has spent in the
    /// window containing `height`.
    pub fn get_operations_count(&self, principal: &Principal, height: BlockHeight) -> u32 {
        self.limiter.operations_count(principal, height)
    }

    pub fn owner(&self) -> &Principal {
        self.access.owner()
    }

    pub fn params(&self) -> &ProtocolParams {
        &self.params
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Mutable access to the funds collaborator, for host-side seeding.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }
}
