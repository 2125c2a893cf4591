//! # Claim Gate
//!
//! The issuance coordinator. Owns every piece of mutable drop state in one
//! aggregate and is the only thing that mutates it.
//!
//! ## Check Order
//!
//! Claims run their preconditions in a fixed order and report the first
//! that fails:
//!
//! 1. pause flag
//! 2. phase (time window and stage)
//! 3. payment, which must equal the price exactly
//! 4. allow-list proof (allow-list path only)
//! 5. ledger: claimed latch, then supply
//!
//! Privileged operations check the caller's role before anything else.
//!
//! ## Security Invariant
//!
//! A refused call changes nothing. The ledger reservation is staged before
//! the registry mint and committed only after it succeeds, and the
//! treasury balance is computed up front and applied last.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use passgate_core::{Amount, Clock, Digest, Identity, SystemClock, Timestamp, TokenId};
use passgate_crypto::{AllowList, AllowListFormat, ClaimTicket};
use passgate_registry::{InMemoryRegistry, TokenRegistry};
use passgate_state::{
    AccessControl, ClaimLedger, ClaimPath, MintPhase, MintStage, MintWindow, PauseGuard,
    PhaseController, Role,
};

use crate::config::{ConfigError, DropConfig};
use crate::error::GateError;
use crate::event::{GateEvent, GateEventKind};
use crate::treasury::{Payout, Treasury};

/// A point-in-time view of a drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropStatus {
    /// Display name.
    pub name: String,
    /// Phase at `as_of`.
    pub phase: MintPhase,
    /// Administrative stage.
    pub stage: MintStage,
    /// When the snapshot was taken.
    pub as_of: Timestamp,
    /// Allow-list window start.
    pub window_start: Timestamp,
    /// Allow-list window end (exclusive).
    pub window_end: Timestamp,
    /// Pause flag.
    pub paused: bool,
    /// Exact price per claim.
    pub price: Amount,
    /// Collected, not yet withdrawn.
    pub balance: Amount,
    /// Supply cap.
    pub max_supply: u64,
    /// Tokens issued.
    pub total_supply: u64,
    /// Trusted allow-list root.
    pub root: Digest,
    /// Allow-list proof format.
    pub allow_list: AllowListFormat,
    /// Metadata prefix.
    pub base_uri: String,
    /// Administrator.
    pub admin: Identity,
    /// Withdrawal recipient.
    pub beneficiary: Identity,
}

/// The issuance coordinator for one drop.
#[derive(Debug)]
pub struct ClaimGate<R = InMemoryRegistry, C = SystemClock> {
    name: String,
    allow_list: AllowList,
    price: Amount,
    phase: PhaseController,
    ledger: ClaimLedger,
    pause: PauseGuard,
    access: AccessControl,
    treasury: Treasury,
    registry: R,
    clock: C,
    events: Vec<GateEvent>,
}

impl<C: Clock> ClaimGate<InMemoryRegistry, C> {
    /// A gate minting into a fresh in-memory registry.
    pub fn in_memory(config: &DropConfig, clock: C) -> Result<Self, ConfigError> {
        let registry = InMemoryRegistry::new(config.numbering, config.base_uri.clone());
        Self::new(config, registry, clock)
    }
}

impl<R: TokenRegistry, C: Clock> ClaimGate<R, C> {
    /// A gate for `config`, minting into `registry`, which must be empty.
    pub fn new(config: &DropConfig, mut registry: R, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        if registry.total_supply() != 0 {
            return Err(ConfigError::Invalid(
                "token registry already holds tokens".to_string(),
            ));
        }
        registry.set_base_uri(config.base_uri.clone());
        let window = config.window()?;
        info!(
            drop = %config.name,
            root = %config.root,
            max_supply = config.max_supply,
            price = %config.price,
            window_start = %window.start(),
            window_end = %window.end(),
            "drop configured"
        );
        Ok(Self {
            name: config.name.clone(),
            allow_list: config.allow_list(),
            price: config.price,
            phase: PhaseController::new(window),
            ledger: ClaimLedger::new(config.max_supply),
            pause: PauseGuard::new(),
            access: AccessControl::new(config.admin, config.beneficiary),
            treasury: Treasury::new(),
            registry,
            clock,
            events: Vec::new(),
        })
    }

    // ── Claims ───────────────────────────────────────────────────────

    /// Claim with an allow-list proof. `payment` must equal the price.
    pub fn claim_allow_list(
        &mut self,
        caller: Identity,
        ticket: &ClaimTicket,
        payment: Amount,
    ) -> Result<TokenId, GateError> {
        let result = self.admit(caller, ClaimPath::AllowList, Some(ticket), payment);
        self.observe("claim_allow_list", &caller, result)
    }

    /// Claim without a proof, once open minting is active.
    pub fn claim_open(&mut self, caller: Identity, payment: Amount) -> Result<TokenId, GateError> {
        let result = self.admit(caller, ClaimPath::Open, None, payment);
        self.observe("claim_open", &caller, result)
    }

    /// Check a proof for `caller` without claiming. Ignores pause, phase
    /// and ledger state.
    pub fn check_redeem(&self, caller: &Identity, ticket: &ClaimTicket) -> Result<(), GateError> {
        if self.allow_list.verify(caller, ticket) {
            Ok(())
        } else {
            Err(GateError::InvalidProof)
        }
    }

    fn admit(
        &mut self,
        caller: Identity,
        path: ClaimPath,
        ticket: Option<&ClaimTicket>,
        payment: Amount,
    ) -> Result<TokenId, GateError> {
        self.pause.ensure_active()?;
        let now = self.clock.now();
        self.phase.check_claim(path, now)?;
        if payment != self.price {
            return Err(GateError::WrongPaymentAmount {
                expected: self.price,
                received: payment,
            });
        }
        if let Some(ticket) = ticket {
            if !self.allow_list.verify(&caller, ticket) {
                return Err(GateError::InvalidProof);
            }
        }

        let reservation = self.ledger.stage(caller)?;
        let balance = self.treasury.balance_after(payment)?;
        let token_id = self.registry.mint_next(caller)?;
        let serial = reservation.commit();
        self.treasury.settle(balance);

        info!(
            drop = %self.name,
            identity = %caller,
            token_id = %token_id,
            path = %path,
            serial,
            "claim accepted"
        );
        self.record(
            now,
            caller,
            GateEventKind::Claimed {
                identity: caller,
                token_id,
                path,
                paid: payment,
            },
        );
        Ok(token_id)
    }

    // ── Phase administration ─────────────────────────────────────────

    /// Activate open minting. Only possible once the window has ended.
    pub fn activate_open_mint(&mut self, caller: Identity) -> Result<MintPhase, GateError> {
        let result = self.advance_stage(caller, MintStage::OpenMintActive);
        self.observe("activate_open_mint", &caller, result)
    }

    /// End all minting for good. Only possible once the window has ended.
    pub fn end_all_minting(&mut self, caller: Identity) -> Result<MintPhase, GateError> {
        let result = self.advance_stage(caller, MintStage::Ended);
        self.observe("end_all_minting", &caller, result)
    }

    fn advance_stage(&mut self, caller: Identity, target: MintStage) -> Result<MintPhase, GateError> {
        self.access.require_role(&caller, Role::Admin)?;
        self.pause.ensure_active()?;
        let now = self.clock.now();
        let from = self.phase.stage();
        let moved = match target {
            MintStage::OpenMintActive => self
                .phase
                .activate_open_mint(now)?
                .then_some(GateEventKind::OpenMintActivated),
            MintStage::Ended => self
                .phase
                .end_all_minting(now)?
                .then_some(GateEventKind::MintingEnded),
            // stages never move backwards
            MintStage::Scheduled => None,
        };
        if let Some(kind) = moved {
            info!(drop = %self.name, from = %from, to = %target, "mint stage transition");
            self.record(now, caller, kind);
        }
        Ok(self.phase.phase(now))
    }

    // ── Guard administration ─────────────────────────────────────────

    /// Pause the drop.
    pub fn pause(&mut self, caller: Identity) -> Result<(), GateError> {
        let result = self.set_paused(caller, true);
        self.observe("pause", &caller, result)
    }

    /// Unpause the drop.
    pub fn unpause(&mut self, caller: Identity) -> Result<(), GateError> {
        let result = self.set_paused(caller, false);
        self.observe("unpause", &caller, result)
    }

    fn set_paused(&mut self, caller: Identity, paused: bool) -> Result<(), GateError> {
        self.access.require_role(&caller, Role::Admin)?;
        let kind = if paused {
            self.pause.pause()?;
            GateEventKind::Paused
        } else {
            self.pause.unpause()?;
            GateEventKind::Unpaused
        };
        info!(drop = %self.name, paused, by = %caller, "pause flag changed");
        let now = self.clock.now();
        self.record(now, caller, kind);
        Ok(())
    }

    /// Pay the whole balance to the beneficiary.
    pub fn withdraw(&mut self, caller: Identity) -> Result<Payout, GateError> {
        let result = self.do_withdraw(caller);
        self.observe("withdraw", &caller, result)
    }

    fn do_withdraw(&mut self, caller: Identity) -> Result<Payout, GateError> {
        self.access.require_role(&caller, Role::Treasurer)?;
        self.pause.ensure_active()?;
        let payout = self.treasury.drain(self.access.beneficiary());
        info!(drop = %self.name, to = %payout.to, amount = %payout.amount, "balance withdrawn");
        let now = self.clock.now();
        self.record(
            now,
            caller,
            GateEventKind::Withdrawn {
                to: payout.to,
                amount: payout.amount,
            },
        );
        Ok(payout)
    }

    /// Sweep the whole balance to the administrator. Only while paused.
    pub fn recover_funds(&mut self, caller: Identity) -> Result<Payout, GateError> {
        let result = self.do_recover(caller);
        self.observe("recover_funds", &caller, result)
    }

    fn do_recover(&mut self, caller: Identity) -> Result<Payout, GateError> {
        self.access.require_role(&caller, Role::Admin)?;
        self.pause.ensure_paused()?;
        let payout = self.treasury.drain(self.access.admin());
        info!(drop = %self.name, to = %payout.to, amount = %payout.amount, "funds recovered");
        let now = self.clock.now();
        self.record(
            now,
            caller,
            GateEventKind::FundsRecovered {
                to: payout.to,
                amount: payout.amount,
            },
        );
        Ok(payout)
    }

    /// Replace the metadata prefix.
    pub fn set_base_uri(&mut self, caller: Identity, base_uri: String) -> Result<(), GateError> {
        let result = self.do_set_base_uri(caller, base_uri);
        self.observe("set_base_uri", &caller, result)
    }

    fn do_set_base_uri(&mut self, caller: Identity, base_uri: String) -> Result<(), GateError> {
        self.access.require_role(&caller, Role::Admin)?;
        self.pause.ensure_active()?;
        info!(drop = %self.name, base_uri = %base_uri, "base URI updated");
        self.registry.set_base_uri(base_uri.clone());
        let now = self.clock.now();
        self.record(now, caller, GateEventKind::BaseUriUpdated { base_uri });
        Ok(())
    }

    /// Hand the administrator role to `new_admin`. Permitted while paused.
    pub fn transfer_admin(&mut self, caller: Identity, new_admin: Identity) -> Result<(), GateError> {
        let result = self.do_transfer_admin(caller, new_admin);
        self.observe("transfer_admin", &caller, result)
    }

    fn do_transfer_admin(&mut self, caller: Identity, new_admin: Identity) -> Result<(), GateError> {
        self.access.require_role(&caller, Role::Admin)?;
        let from = self.access.set_admin(new_admin);
        info!(drop = %self.name, from = %from, to = %new_admin, "admin transferred");
        let now = self.clock.now();
        self.record(now, caller, GateEventKind::AdminTransferred { from, to: new_admin });
        Ok(())
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Trusted allow-list root.
    pub fn root(&self) -> Digest {
        self.allow_list.root
    }

    /// The allow-list commitment.
    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    /// Supply cap.
    pub fn max_supply(&self) -> u64 {
        self.ledger.max_supply()
    }

    /// Exact price per claim.
    pub fn price(&self) -> Amount {
        self.price
    }

    /// Collected balance.
    pub fn balance(&self) -> Amount {
        self.treasury.balance()
    }

    /// Current administrator.
    pub fn admin(&self) -> Identity {
        self.access.admin()
    }

    /// Withdrawal recipient.
    pub fn beneficiary(&self) -> Identity {
        self.access.beneficiary()
    }

    /// Metadata prefix.
    pub fn base_uri(&self) -> &str {
        self.registry.base_uri()
    }

    /// The allow-list window.
    pub fn window(&self) -> &MintWindow {
        self.phase.window()
    }

    /// Phase right now.
    pub fn phase(&self) -> MintPhase {
        self.phase.phase(self.clock.now())
    }

    /// Administrative stage.
    pub fn stage(&self) -> MintStage {
        self.phase.stage()
    }

    /// Pause flag.
    pub fn is_paused(&self) -> bool {
        self.pause.is_paused()
    }

    /// Whether `identity` has claimed.
    pub fn has_claimed(&self, identity: &Identity) -> bool {
        self.ledger.has_claimed(identity)
    }

    /// Tokens issued.
    pub fn total_supply(&self) -> u64 {
        self.registry.total_supply()
    }

    /// The token registry.
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Owner of `id`.
    pub fn owner_of(&self, id: TokenId) -> Result<Identity, GateError> {
        Ok(self.registry.owner_of(id)?)
    }

    /// Metadata location of `id`.
    pub fn token_uri(&self, id: TokenId) -> Result<String, GateError> {
        Ok(self.registry.token_uri(id)?)
    }

    /// The `index`-th token in mint order.
    pub fn token_by_index(&self, index: u64) -> Result<TokenId, GateError> {
        Ok(self.registry.token_by_index(index)?)
    }

    /// The `index`-th token held by `owner`.
    pub fn token_of_owner_by_index(&self, owner: &Identity, index: u64) -> Result<TokenId, GateError> {
        Ok(self.registry.token_of_owner_by_index(owner, index)?)
    }

    /// Tokens held by `owner`.
    pub fn balance_of(&self, owner: &Identity) -> u64 {
        self.registry.balance_of(owner)
    }

    /// Accepted operations, oldest first.
    pub fn events(&self) -> &[GateEvent] {
        &self.events
    }

    /// Snapshot of the drop.
    pub fn status(&self) -> DropStatus {
        let now = self.clock.now();
        let window = self.phase.window();
        DropStatus {
            name: self.name.clone(),
            phase: self.phase.phase(now),
            stage: self.phase.stage(),
            as_of: now,
            window_start: window.start(),
            window_end: window.end(),
            paused: self.pause.is_paused(),
            price: self.price,
            balance: self.treasury.balance(),
            max_supply: self.ledger.max_supply(),
            total_supply: self.registry.total_supply(),
            root: self.allow_list.root,
            allow_list: self.allow_list.format,
            base_uri: self.registry.base_uri().to_string(),
            admin: self.access.admin(),
            beneficiary: self.access.beneficiary(),
        }
    }

    // ── Internals ────────────────────────────────────────────────────

    fn record(&mut self, timestamp: Timestamp, actor: Identity, kind: GateEventKind) {
        self.events.push(GateEvent {
            timestamp,
            actor,
            kind,
        });
    }

    fn observe<T>(
        &self,
        operation: &'static str,
        caller: &Identity,
        result: Result<T, GateError>,
    ) -> Result<T, GateError> {
        if let Err(err) = &result {
            debug!(
                drop = %self.name,
                operation,
                caller = %caller,
                code = err.code(),
                error = %err,
                "operation rejected"
            );
        }
        result
    }
}
