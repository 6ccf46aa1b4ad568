//! Home-stage tab router.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::error::FlowError;

/// Identifier of a home content tab, e.g. `WISHES`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(String);

impl TabId {
    pub const WISHES: &'static str = "WISHES";
    pub const MERCHANTS: &'static str = "MERCHANTS";
    pub const GOD_COUPONS: &'static str = "GOD_COUPONS";

    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TabId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl PartialEq<str> for TabId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TabId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Fixed tab set for a flow variant. Every variant ships three tabs.
pub type TabSet = SmallVec<[TabId; 3]>;

/// Tracks the active tab among a fixed set. Selection is direct replacement,
/// no history is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabRouter {
    tabs: TabSet,
    active: usize,
}

impl TabRouter {
    /// Router over `tabs` with the first tab active. Returns `None` for an empty set.
    #[must_use]
    pub fn new(tabs: TabSet) -> Option<Self> {
        if tabs.is_empty() {
            return None;
        }
        Some(Self { tabs, active: 0 })
    }

    #[must_use]
    pub fn active(&self) -> &TabId {
        &self.tabs[self.active]
    }

    #[must_use]
    pub fn tabs(&self) -> &[TabId] {
        &self.tabs
    }

    #[must_use]
    pub fn contains(&self, tab: &str) -> bool {
        self.position(tab).is_some()
    }

    fn position(&self, tab: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t == tab)
    }

    /// Make `tab` the active tab.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::UnknownTab` if `tab` is outside the fixed set; the
    /// active tab is left unchanged.
    pub fn select(&mut self, tab: &str) -> Result<&TabId, FlowError> {
        let idx = self
            .position(tab)
            .ok_or_else(|| FlowError::UnknownTab(tab.to_string()))?;
        self.active = idx;
        Ok(&self.tabs[idx])
    }
}
