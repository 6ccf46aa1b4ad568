use amber_flow::{FlowStage, SessionState};
use yew_router::prelude::*;

#[derive(Clone, Debug, Routable, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Splash,
    #[at("/reward")]
    Reward,
    #[at("/reward/revealed")]
    Revealed,
    #[at("/coupons")]
    CouponChoice,
    #[at("/claimed")]
    Claimed,
    #[at("/home/:tab")]
    Home { tab: String },
    #[at("/404")]
    #[not_found]
    NotFound,
}

impl Route {
    #[must_use]
    pub fn from_state(state: &SessionState) -> Self {
        match state.stage() {
            FlowStage::Splash => Self::Splash,
            FlowStage::RewardCover => Self::Reward,
            FlowStage::RewardRevealed => Self::Revealed,
            FlowStage::CouponChoice => Self::CouponChoice,
            FlowStage::ClaimSuccess => Self::Claimed,
            FlowStage::Home => Self::Home {
                tab: state.active_tab().to_string(),
            },
        }
    }

    #[must_use]
    pub const fn to_stage(&self) -> Option<FlowStage> {
        match self {
            Self::Splash => Some(FlowStage::Splash),
            Self::Reward => Some(FlowStage::RewardCover),
            Self::Revealed => Some(FlowStage::RewardRevealed),
            Self::CouponChoice => Some(FlowStage::CouponChoice),
            Self::Claimed => Some(FlowStage::ClaimSuccess),
            Self::Home { .. } => Some(FlowStage::Home),
            Self::NotFound => None,
        }
    }

    /// Tab named by a home route.
    #[must_use]
    pub fn tab(&self) -> Option<&str> {
        match self {
            Self::Home { tab } => Some(tab),
            _ => None,
        }
    }
}
