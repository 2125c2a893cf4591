//! # Pause and Role Guards
//!
//! Cross-cutting checks consulted before any other precondition:
//! [`AccessControl::require_role`] for privileged operations, then the
//! [`PauseGuard`] for everything that mutates state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use passgate_core::Identity;

// ─── Pause ───────────────────────────────────────────────────────────

/// A pause-flag move or check that did not hold.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardError {
    /// The drop is paused.
    #[error("drop is paused")]
    Paused,

    /// The operation requires the drop to be paused.
    #[error("drop is not paused")]
    NotPaused,
}

/// The administrative pause flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauseGuard {
    paused: bool,
}

impl PauseGuard {
    /// An unpaused guard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the drop is paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Require the drop to be running.
    pub fn ensure_active(&self) -> Result<(), GuardError> {
        if self.paused {
            Err(GuardError::Paused)
        } else {
            Ok(())
        }
    }

    /// Require the drop to be paused.
    pub fn ensure_paused(&self) -> Result<(), GuardError> {
        if self.paused {
            Ok(())
        } else {
            Err(GuardError::NotPaused)
        }
    }

    /// Set the flag. Fails with `Paused` if already set.
    pub fn pause(&mut self) -> Result<(), GuardError> {
        self.ensure_active()?;
        self.paused = true;
        Ok(())
    }

    /// Clear the flag. Fails with `NotPaused` if not set.
    pub fn unpause(&mut self) -> Result<(), GuardError> {
        self.ensure_paused()?;
        self.paused = false;
        Ok(())
    }
}

// ─── Roles ───────────────────────────────────────────────────────────

/// A privilege level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The drop administrator.
    Admin,
    /// May trigger a withdrawal: the administrator or the beneficiary.
    Treasurer,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Admin => "ADMIN",
            Self::Treasurer => "TREASURER",
        })
    }
}

/// The caller does not hold the role an operation requires.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("caller {caller} is not authorized as {role}")]
pub struct AccessError {
    /// Who called.
    pub caller: Identity,
    /// The role that was required.
    pub role: Role,
}

/// Who holds which role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControl {
    admin: Identity,
    beneficiary: Identity,
}

impl AccessControl {
    /// Roles for a fresh drop.
    pub fn new(admin: Identity, beneficiary: Identity) -> Self {
        Self { admin, beneficiary }
    }

    /// The administrator.
    pub fn admin(&self) -> Identity {
        self.admin
    }

    /// Where withdrawals are paid.
    pub fn beneficiary(&self) -> Identity {
        self.beneficiary
    }

    /// Whether `caller` holds `role`.
    pub fn has_role(&self, caller: &Identity, role: Role) -> bool {
        match role {
            Role::Admin => *caller == self.admin,
            Role::Treasurer => *caller == self.admin || *caller == self.beneficiary,
        }
    }

    /// Require `caller` to hold `role`.
    pub fn require_role(&self, caller: &Identity, role: Role) -> Result<(), AccessError> {
        if self.has_role(caller, role) {
            Ok(())
        } else {
            Err(AccessError {
                caller: *caller,
                role,
            })
        }
    }

    /// Hand the administrator role to `new_admin`, returning the previous
    /// holder. Authorization is the caller's concern.
    pub fn set_admin(&mut self, new_admin: Identity) -> Identity {
        std::mem::replace(&mut self.admin, new_admin)
    }
}
