//! Status enums for the cart lifecycle.

use serde::{Deserialize, Serialize};

/// Cart lifecycle status, derived from the cart contents.
///
/// A cart is either empty (checkout disabled) or active (checkout enabled).
/// Session and auth gating on top of this is the caller's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CartStatus {
    #[default]
    Empty,
    Active,
}

impl CartStatus {
    /// Whether checkout may be offered for a cart in this status.
    #[must_use]
    pub const fn checkout_allowed(self) -> bool {
        matches!(self, Self::Active)
    }
}
