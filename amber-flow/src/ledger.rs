//! Display-side participation counters.
//!
//! The catalog stays immutable; investments made during the session are
//! tallied here and overlaid on the catalog numbers when a wish is rendered.
use std::collections::HashMap;

use crate::catalog::WishItem;
use crate::display::progress_percent;
use crate::flow::Investment;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipationLedger {
    units: HashMap<String, u32>,
}

impl ParticipationLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, investment: &Investment) {
        let entry = self.units.entry(investment.target_id.clone()).or_default();
        *entry = entry.saturating_add(investment.units);
    }

    /// Units this session put into `wish_id`.
    #[must_use]
    pub fn contributed(&self, wish_id: &str) -> u32 {
        self.units.get(wish_id).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn effective_current(&self, wish: &WishItem) -> u32 {
        wish.current.saturating_add(self.contributed(&wish.id))
    }

    /// The session's user counts as one extra participant once they invested.
    #[must_use]
    pub fn effective_participants(&self, wish: &WishItem) -> u32 {
        let joined = u32::from(self.contributed(&wish.id) > 0);
        wish.participants.saturating_add(joined)
    }

    #[must_use]
    pub fn effective_progress(&self, wish: &WishItem) -> u8 {
        progress_percent(self.effective_current(wish), wish.total_needed)
    }

    #[must_use]
    pub fn total_units(&self) -> u32 {
        self.units
            .values()
            .fold(0, |acc, units| acc.saturating_add(*units))
    }
}
