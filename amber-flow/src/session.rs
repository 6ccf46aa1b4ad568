//! The mutable root of one reward session.
use serde::{Deserialize, Serialize};

use crate::stage::FlowStage;
use crate::tabs::TabId;

/// Snapshot of where a session stands. Only [`crate::FlowMachine`] mutates it;
/// everyone else reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub(crate) stage: FlowStage,
    pub(crate) reward_balance: u32,
    pub(crate) selected_coupon: Option<String>,
    pub(crate) active_tab: TabId,
}

impl SessionState {
    pub(crate) const fn new(default_tab: TabId) -> Self {
        Self {
            stage: FlowStage::Splash,
            reward_balance: 0,
            selected_coupon: None,
            active_tab: default_tab,
        }
    }

    #[must_use]
    pub const fn stage(&self) -> FlowStage {
        self.stage
    }

    #[must_use]
    pub const fn reward_balance(&self) -> u32 {
        self.reward_balance
    }

    #[must_use]
    pub fn selected_coupon(&self) -> Option<&str> {
        self.selected_coupon.as_deref()
    }

    #[must_use]
    pub const fn active_tab(&self) -> &TabId {
        &self.active_tab
    }
}
