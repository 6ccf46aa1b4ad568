//! Flow stages and the triggers that move between them.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Position in the onboarding and reward flow.
///
/// Declaration order is the flow order; the derived `Ord` is what forward-only
/// checks compare against.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlowStage {
    #[default]
    Splash,
    RewardCover,
    RewardRevealed,
    CouponChoice,
    ClaimSuccess,
    Home,
}

impl FlowStage {
    pub const ALL: [Self; 6] = [
        Self::Splash,
        Self::RewardCover,
        Self::RewardRevealed,
        Self::CouponChoice,
        Self::ClaimSuccess,
        Self::Home,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Splash => "SPLASH",
            Self::RewardCover => "REWARD_COVER",
            Self::RewardRevealed => "REWARD_REVEALED",
            Self::CouponChoice => "COUPON_CHOICE",
            Self::ClaimSuccess => "CLAIM_SUCCESS",
            Self::Home => "HOME",
        }
    }

    /// `Home` is the only stage a session can settle in.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Home)
    }
}

impl fmt::Display for FlowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlowStage {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s)
            .ok_or(())
    }
}

/// How the user left the claim-success screen. Both routes lead to `Home`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Dismissal {
    Close,
    #[default]
    Continue,
}

/// A request to move the flow, as raised by a user gesture or the splash timer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Trigger {
    AdvanceFromSplash,
    OpenReward,
    ProceedFromReveal,
    ChooseCoupon(String),
    DismissSuccess(Dismissal),
    SelectTab(String),
    Invest(String),
}

impl Trigger {
    #[must_use]
    pub const fn kind(&self) -> TriggerKind {
        match self {
            Self::AdvanceFromSplash => TriggerKind::AdvanceFromSplash,
            Self::OpenReward => TriggerKind::OpenReward,
            Self::ProceedFromReveal => TriggerKind::ProceedFromReveal,
            Self::ChooseCoupon(_) => TriggerKind::ChooseCoupon,
            Self::DismissSuccess(_) => TriggerKind::DismissSuccess,
            Self::SelectTab(_) => TriggerKind::SelectTab,
            Self::Invest(_) => TriggerKind::Invest,
        }
    }
}

/// Payload-free trigger label, used for availability queries and error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    AdvanceFromSplash,
    OpenReward,
    ProceedFromReveal,
    ChooseCoupon,
    DismissSuccess,
    SelectTab,
    Invest,
}

impl TriggerKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AdvanceFromSplash => "advance_from_splash",
            Self::OpenReward => "open_reward",
            Self::ProceedFromReveal => "proceed_from_reveal",
            Self::ChooseCoupon => "choose_coupon",
            Self::DismissSuccess => "dismiss_success",
            Self::SelectTab => "select_tab",
            Self::Invest => "invest",
        }
    }

    /// The stage a stage-bound trigger is accepted in. Tab selection is unbound.
    #[must_use]
    pub const fn accepted_in(self) -> Option<FlowStage> {
        match self {
            Self::AdvanceFromSplash => Some(FlowStage::Splash),
            Self::OpenReward => Some(FlowStage::RewardCover),
            Self::ProceedFromReveal => Some(FlowStage::RewardRevealed),
            Self::ChooseCoupon => Some(FlowStage::CouponChoice),
            Self::DismissSuccess => Some(FlowStage::ClaimSuccess),
            Self::Invest => Some(FlowStage::Home),
            Self::SelectTab => None,
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
