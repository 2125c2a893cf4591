//! # Mint Phase Controller
//!
//! Decides which claim path is open at a given instant.
//!
//! ## Phases
//!
//! ```text
//!                 window.start          window.end
//!  BEFORE_WINDOW ──────▶ WHITELIST_OPEN ──────▶ WHITELIST_CLOSED_OPEN_INACTIVE
//!                                                   │               │
//!                                  activate_open_mint          end_all_minting
//!                                                   ▼               │
//!                                              OPEN_ACTIVE ─────────┤
//!                                                                   ▼
//!                                                          ALL_ENDED (absorbing)
//! ```
//!
//! The phase is never stored. [`MintPhase::derive`] computes it from the
//! current time, the fixed [`MintWindow`], and the stored [`MintStage`].
//! The stage is the only mutable part and it only moves forward; both
//! administrative moves are refused until the window has ended.
//!
//! ## Security Invariant
//!
//! `ALL_ENDED` is absorbing: once the stage is `ENDED`, every claim on
//! either path is refused regardless of time or remaining supply.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use passgate_core::Timestamp;

// ─── Window ──────────────────────────────────────────────────────────

/// The allow-list window `[start, end)`, fixed at deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintWindow {
    start: Timestamp,
    end: Timestamp,
}

impl MintWindow {
    /// A window opening at `start` and lasting `duration_secs`.
    pub fn new(start: Timestamp, duration_secs: u64) -> Result<Self, PhaseError> {
        if duration_secs == 0 {
            return Err(PhaseError::InvalidWindow(
                "window duration must be positive".to_string(),
            ));
        }
        let end = i64::try_from(duration_secs)
            .ok()
            .and_then(|secs| start.checked_add_secs(secs))
            .ok_or_else(|| {
                PhaseError::InvalidWindow(format!(
                    "window of {duration_secs}s from {start} is out of range"
                ))
            })?;
        Ok(Self { start, end })
    }

    /// When allow-list claims open.
    pub fn start(&self) -> Timestamp {
        self.start
    }

    /// When the allow-list window closes (exclusive).
    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Whether `now` is at or past the end of the window.
    pub fn has_ended(&self, now: Timestamp) -> bool {
        now >= self.end
    }
}

// ─── Stage ───────────────────────────────────────────────────────────

/// The administratively controlled part of the phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MintStage {
    /// No administrative move yet; the phase follows the clock.
    #[default]
    Scheduled,
    /// Open minting has been activated.
    OpenMintActive,
    /// All minting has been ended (terminal).
    Ended,
}

impl MintStage {
    /// Whether this stage is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ended)
    }
}

impl std::fmt::Display for MintStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Scheduled => "SCHEDULED",
            Self::OpenMintActive => "OPEN_MINT_ACTIVE",
            Self::Ended => "ENDED",
        };
        f.write_str(s)
    }
}

// ─── Phase ───────────────────────────────────────────────────────────

/// Which claim path a request is using.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimPath {
    /// A claim backed by an allow-list membership proof.
    AllowList,
    /// An unconditional claim, available only once open minting is active.
    Open,
}

impl std::fmt::Display for ClaimPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::AllowList => "allow_list",
            Self::Open => "open",
        })
    }
}

/// The issuance phase at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MintPhase {
    /// Before the window opens; no claims.
    BeforeWindow,
    /// Inside the window; allow-list claims only.
    WhitelistOpen,
    /// Window over, open minting not yet active; no claims.
    WhitelistClosedOpenInactive,
    /// Open minting active; both paths.
    OpenActive,
    /// Minting ended (terminal); no claims.
    AllEnded,
}

impl MintPhase {
    /// Derive the phase. The stage takes precedence over the clock.
    pub fn derive(window: &MintWindow, stage: MintStage, now: Timestamp) -> Self {
        match stage {
            MintStage::Ended => Self::AllEnded,
            MintStage::OpenMintActive => Self::OpenActive,
            MintStage::Scheduled if now < window.start => Self::BeforeWindow,
            MintStage::Scheduled if now < window.end => Self::WhitelistOpen,
            MintStage::Scheduled => Self::WhitelistClosedOpenInactive,
        }
    }

    /// Whether a claim on `path` is permitted in this phase.
    pub fn permits(&self, path: ClaimPath) -> bool {
        matches!(
            (self, path),
            (Self::WhitelistOpen, ClaimPath::AllowList) | (Self::OpenActive, _)
        )
    }

    /// The refusal for a claim on `path`, or `None` if it is permitted.
    pub fn refusal(&self, path: ClaimPath) -> Option<PhaseError> {
        match (self, path) {
            (Self::AllEnded, _) => Some(PhaseError::MintingEnded),
            (Self::BeforeWindow, _) => Some(PhaseError::WindowNotStarted),
            (Self::WhitelistClosedOpenInactive, ClaimPath::AllowList) => {
                Some(PhaseError::WindowAlreadyEnded)
            }
            (Self::WhitelistOpen | Self::WhitelistClosedOpenInactive, ClaimPath::Open) => {
                Some(PhaseError::OpenMintNotActive)
            }
            (Self::WhitelistOpen, ClaimPath::AllowList) | (Self::OpenActive, _) => None,
        }
    }

    /// Whether this phase is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::AllEnded)
    }
}

impl std::fmt::Display for MintPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::BeforeWindow => "BEFORE_WINDOW",
            Self::WhitelistOpen => "WHITELIST_OPEN",
            Self::WhitelistClosedOpenInactive => "WHITELIST_CLOSED_OPEN_INACTIVE",
            Self::OpenActive => "OPEN_ACTIVE",
            Self::AllEnded => "ALL_ENDED",
        };
        f.write_str(s)
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// A claim or stage move refused because of the phase.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PhaseError {
    /// The allow-list window has not opened yet.
    #[error("minting window has not started")]
    WindowNotStarted,

    /// The allow-list window has closed.
    #[error("allow-list window has already ended")]
    WindowAlreadyEnded,

    /// Open claims are not accepted in the current phase.
    #[error("open mint is not active")]
    OpenMintNotActive,

    /// Minting has been ended for good.
    #[error("all minting has ended")]
    MintingEnded,

    /// A stage move was attempted before the window closed.
    #[error("phase transition to {target} not allowed before window end {window_end}")]
    TransitionTooEarly {
        /// The stage that was requested.
        target: MintStage,
        /// When the move becomes possible.
        window_end: Timestamp,
    },

    /// The window bounds are unusable.
    #[error("invalid mint window: {0}")]
    InvalidWindow(String),
}

// ─── Controller ──────────────────────────────────────────────────────

/// Record of a stage move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageTransitionRecord {
    /// Stage before the move.
    pub from_stage: MintStage,
    /// Stage after the move.
    pub to_stage: MintStage,
    /// When the move happened.
    pub timestamp: Timestamp,
}

/// The window plus the forward-only stage, with its transition history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseController {
    window: MintWindow,
    stage: MintStage,
    transitions: Vec<StageTransitionRecord>,
}

impl PhaseController {
    /// A controller in the `SCHEDULED` stage.
    pub fn new(window: MintWindow) -> Self {
        Self {
            window,
            stage: MintStage::Scheduled,
            transitions: Vec::new(),
        }
    }

    /// The fixed window.
    pub fn window(&self) -> &MintWindow {
        &self.window
    }

    /// The current stage.
    pub fn stage(&self) -> MintStage {
        self.stage
    }

    /// Ordered stage moves.
    pub fn transitions(&self) -> &[StageTransitionRecord] {
        &self.transitions
    }

    /// The phase at `now`.
    pub fn phase(&self, now: Timestamp) -> MintPhase {
        MintPhase::derive(&self.window, self.stage, now)
    }

    /// Check that a claim on `path` is permitted at `now`, returning the
    /// phase it was admitted under.
    pub fn check_claim(&self, path: ClaimPath, now: Timestamp) -> Result<MintPhase, PhaseError> {
        let phase = self.phase(now);
        match phase.refusal(path) {
            Some(err) => Err(err),
            None => Ok(phase),
        }
    }

    /// Activate open minting.
    ///
    /// Returns `Ok(false)` when open minting is already active.
    pub fn activate_open_mint(&mut self, now: Timestamp) -> Result<bool, PhaseError> {
        match self.stage {
            MintStage::Ended => Err(PhaseError::MintingEnded),
            MintStage::OpenMintActive => Ok(false),
            MintStage::Scheduled => {
                self.require_window_ended(MintStage::OpenMintActive, now)?;
                self.do_transition(MintStage::OpenMintActive, now);
                Ok(true)
            }
        }
    }

    /// End all minting.
    ///
    /// Returns `Ok(false)` when minting has already ended.
    pub fn end_all_minting(&mut self, now: Timestamp) -> Result<bool, PhaseError> {
        if self.stage.is_terminal() {
            return Ok(false);
        }
        self.require_window_ended(MintStage::Ended, now)?;
        self.do_transition(MintStage::Ended, now);
        Ok(true)
    }

    fn require_window_ended(&self, target: MintStage, now: Timestamp) -> Result<(), PhaseError> {
        if !self.window.has_ended(now) {
            return Err(PhaseError::TransitionTooEarly {
                target,
                window_end: self.window.end,
            });
        }
        Ok(())
    }

    fn do_transition(&mut self, to: MintStage, now: Timestamp) {
        self.transitions.push(StageTransitionRecord {
            from_stage: self.stage,
            to_stage: to,
            timestamp: now,
        });
        self.stage = to;
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    fn window() -> MintWindow {
        // 2026-03-01 00:00 → 2026-03-02 00:00
        MintWindow::new(ts("2026-03-01T00:00:00Z"), 86_400).unwrap()
    }

    const BEFORE: &str = "2026-02-28T23:59:59Z";
    const INSIDE: &str = "2026-03-01T12:00:00Z";
    const AT_END: &str = "2026-03-02T00:00:00Z";
    const AFTER: &str = "2026-03-05T00:00:00Z";

    // ── Window ───────────────────────────────────────────────────────

    #[test]
    fn test_window_bounds() {
        let w = window();
        assert_eq!(w.end().to_iso8601(), "2026-03-02T00:00:00Z");
        assert!(!w.has_ended(ts(INSIDE)));
        assert!(w.has_ended(ts(AT_END)));
    }

    #[test]
    fn test_window_rejects_zero_and_overflow() {
        let start = ts("2026-03-01T00:00:00Z");
        assert!(matches!(MintWindow::new(start, 0), Err(PhaseError::InvalidWindow(_))));
        assert!(matches!(MintWindow::new(start, u64::MAX), Err(PhaseError::InvalidWindow(_))));
    }

    // ── Derivation ───────────────────────────────────────────────────

    #[test]
    fn test_phase_follows_clock_while_scheduled() {
        let w = window();
        let s = MintStage::Scheduled;
        assert_eq!(MintPhase::derive(&w, s, ts(BEFORE)), MintPhase::BeforeWindow);
        assert_eq!(
            MintPhase::derive(&w, s, ts("2026-03-01T00:00:00Z")),
            MintPhase::WhitelistOpen
        );
        assert_eq!(MintPhase::derive(&w, s, ts(INSIDE)), MintPhase::WhitelistOpen);
        assert_eq!(
            MintPhase::derive(&w, s, ts(AT_END)),
            MintPhase::WhitelistClosedOpenInactive
        );
    }

    #[test]
    fn test_ended_stage_wins_over_clock() {
        let w = window();
        for t in [BEFORE, INSIDE, AFTER] {
            assert_eq!(MintPhase::derive(&w, MintStage::Ended, ts(t)), MintPhase::AllEnded);
        }
    }

    #[test]
    fn test_permits_table() {
        use ClaimPath::*;
        assert!(!MintPhase::BeforeWindow.permits(AllowList));
        assert!(!MintPhase::BeforeWindow.permits(Open));
        assert!(MintPhase::WhitelistOpen.permits(AllowList));
        assert!(!MintPhase::WhitelistOpen.permits(Open));
        assert!(!MintPhase::WhitelistClosedOpenInactive.permits(AllowList));
        assert!(!MintPhase::WhitelistClosedOpenInactive.permits(Open));
        assert!(MintPhase::OpenActive.permits(AllowList));
        assert!(MintPhase::OpenActive.permits(Open));
        assert!(!MintPhase::AllEnded.permits(AllowList));
        assert!(!MintPhase::AllEnded.permits(Open));
    }

    #[test]
    fn test_refusals() {
        use ClaimPath::*;
        assert_eq!(MintPhase::BeforeWindow.refusal(Open), Some(PhaseError::WindowNotStarted));
        assert_eq!(MintPhase::WhitelistOpen.refusal(Open), Some(PhaseError::OpenMintNotActive));
        assert_eq!(
            MintPhase::WhitelistClosedOpenInactive.refusal(AllowList),
            Some(PhaseError::WindowAlreadyEnded)
        );
        assert_eq!(
            MintPhase::WhitelistClosedOpenInactive.refusal(Open),
            Some(PhaseError::OpenMintNotActive)
        );
        assert_eq!(MintPhase::AllEnded.refusal(AllowList), Some(PhaseError::MintingEnded));
    }

    #[test]
    fn test_refusal_agrees_with_permits() {
        let phases = [
            MintPhase::BeforeWindow,
            MintPhase::WhitelistOpen,
            MintPhase::WhitelistClosedOpenInactive,
            MintPhase::OpenActive,
            MintPhase::AllEnded,
        ];
        for phase in phases {
            for path in [ClaimPath::AllowList, ClaimPath::Open] {
                assert_eq!(phase.permits(path), phase.refusal(path).is_none(), "{phase} {path}");
            }
        }
    }

    // ── Controller ───────────────────────────────────────────────────

    #[test]
    fn test_activate_before_window_end_fails() {
        let mut pc = PhaseController::new(window());
        let err = pc.activate_open_mint(ts(INSIDE)).unwrap_err();
        assert!(matches!(
            err,
            PhaseError::TransitionTooEarly {
                target: MintStage::OpenMintActive,
                ..
            }
        ));
        assert_eq!(pc.stage(), MintStage::Scheduled);
        assert!(pc.transitions().is_empty());
    }

    #[test]
    fn test_end_before_window_end_fails() {
        let mut pc = PhaseController::new(window());
        assert!(matches!(
            pc.end_all_minting(ts(BEFORE)),
            Err(PhaseError::TransitionTooEarly { .. })
        ));
    }

    #[test]
    fn test_activate_then_end() {
        let mut pc = PhaseController::new(window());
        assert_eq!(pc.activate_open_mint(ts(AT_END)), Ok(true));
        assert_eq!(pc.phase(ts(AFTER)), MintPhase::OpenActive);
        assert_eq!(pc.activate_open_mint(ts(AFTER)), Ok(false));
        assert_eq!(pc.end_all_minting(ts(AFTER)), Ok(true));
        assert_eq!(pc.phase(ts(AFTER)), MintPhase::AllEnded);
        assert_eq!(pc.transitions().len(), 2);
        assert_eq!(pc.transitions()[1].from_stage, MintStage::OpenMintActive);
        assert_eq!(pc.transitions()[1].to_stage, MintStage::Ended);
    }

    #[test]
    fn test_ended_is_absorbing() {
        let mut pc = PhaseController::new(window());
        pc.end_all_minting(ts(AFTER)).unwrap();
        assert_eq!(pc.activate_open_mint(ts(AFTER)), Err(PhaseError::MintingEnded));
        assert_eq!(pc.end_all_minting(ts(AFTER)), Ok(false));
        assert_eq!(
            pc.check_claim(ClaimPath::AllowList, ts(INSIDE)),
            Err(PhaseError::MintingEnded)
        );
        assert_eq!(pc.transitions().len(), 1);
    }

    #[test]
    fn test_check_claim_returns_phase() {
        let pc = PhaseController::new(window());
        assert_eq!(
            pc.check_claim(ClaimPath::AllowList, ts(INSIDE)),
            Ok(MintPhase::WhitelistOpen)
        );
        assert_eq!(
            pc.check_claim(ClaimPath::AllowList, ts(BEFORE)),
            Err(PhaseError::WindowNotStarted)
        );
    }

    #[test]
    fn test_display_names() {
        assert_eq!(MintPhase::WhitelistClosedOpenInactive.to_string(), "WHITELIST_CLOSED_OPEN_INACTIVE");
        assert_eq!(MintStage::OpenMintActive.to_string(), "OPEN_MINT_ACTIVE");
        assert_eq!(serde_json::to_string(&MintPhase::OpenActive).unwrap(), "\"open_active\"");
    }
}
