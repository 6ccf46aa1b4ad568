//! The reward flow state machine.
//!
//! One machine serves every variant; [`FlowConfig`] decides whether the reveal
//! and claim-success screens are visited. Every operation validates before it
//! mutates, so a rejected trigger leaves the session exactly as it was.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::catalog::{Catalog, CouponOffer};
use crate::config::FlowConfig;
use crate::error::{ConfigError, FlowError};
use crate::session::SessionState;
use crate::stage::{Dismissal, FlowStage, Trigger, TriggerKind};
use crate::tabs::{TabId, TabRouter};

/// Receipt for one accepted investment. The display layer books it against the
/// wish's participation counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Investment {
    pub target_id: String,
    pub units: u32,
}

/// What an accepted trigger did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionOutcome {
    pub from: FlowStage,
    pub to: FlowStage,
    pub trigger: TriggerKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investment: Option<Investment>,
}

impl TransitionOutcome {
    #[must_use]
    pub fn changed_stage(&self) -> bool {
        self.from != self.to
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlowMachine {
    config: FlowConfig,
    catalog: Arc<Catalog>,
    tabs: TabRouter,
    state: SessionState,
}

impl FlowMachine {
    /// Start a fresh session at `Splash` with a zero balance.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails validation.
    pub fn new(config: FlowConfig, catalog: Arc<Catalog>) -> Result<Self, ConfigError> {
        config.validate()?;
        let tabs = TabRouter::new(config.tab_set.clone())
            .ok_or_else(|| ConfigError::EmptyTabSet(config.variant.clone()))?;
        let state = SessionState::new(tabs.active().clone());
        log::debug!(
            "flow session started (variant {}, grant {})",
            config.variant,
            config.grant_amount
        );
        Ok(Self {
            config,
            catalog,
            tabs,
            state,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &FlowConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Shared handle to the catalog, for views that outlive a borrow.
    #[must_use]
    pub fn shared_catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub const fn stage(&self) -> FlowStage {
        self.state.stage
    }

    #[must_use]
    pub const fn reward_balance(&self) -> u32 {
        self.state.reward_balance
    }

    #[must_use]
    pub fn selected_coupon(&self) -> Option<&str> {
        self.state.selected_coupon()
    }

    #[must_use]
    pub const fn active_tab(&self) -> &TabId {
        &self.state.active_tab
    }

    #[must_use]
    pub fn tabs(&self) -> &[TabId] {
        self.tabs.tabs()
    }

    /// The two offers presented at the coupon choice.
    #[must_use]
    pub fn coupon_offers(&self) -> &[CouponOffer] {
        &self.catalog.coupon_offers
    }

    /// Run any trigger through the matching operation.
    ///
    /// # Errors
    ///
    /// Returns the operation's error; state is untouched on error.
    pub fn dispatch(&mut self, trigger: Trigger) -> Result<TransitionOutcome, FlowError> {
        let from = self.stage();
        let kind = trigger.kind();
        let result = match trigger {
            Trigger::AdvanceFromSplash => self.advance_from_splash(),
            Trigger::OpenReward => self.open_reward(),
            Trigger::ProceedFromReveal => self.proceed_from_reveal(),
            Trigger::ChooseCoupon(id) => self.choose_coupon(&id),
            Trigger::DismissSuccess(dismissal) => self.dismiss_success(dismissal),
            Trigger::SelectTab(tab) => self.select_tab(&tab).map(|_| from),
            Trigger::Invest(target) => {
                return self.invest(&target).map(|investment| TransitionOutcome {
                    from,
                    to: from,
                    trigger: kind,
                    investment: Some(investment),
                });
            }
        };
        result.map(|to| TransitionOutcome {
            from,
            to,
            trigger: kind,
            investment: None,
        })
    }

    /// Splash timer elapsed.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` outside `Splash`.
    pub fn advance_from_splash(&mut self) -> Result<FlowStage, FlowError> {
        self.expect_stage(TriggerKind::AdvanceFromSplash)?;
        Ok(self.enter(FlowStage::RewardCover, TriggerKind::AdvanceFromSplash))
    }

    /// Open the red packet: credit the grant and move on.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` outside `RewardCover`, which is what keeps the grant
    /// to a single application per session.
    pub fn open_reward(&mut self) -> Result<FlowStage, FlowError> {
        self.expect_stage(TriggerKind::OpenReward)?;
        self.state.reward_balance = self
            .state
            .reward_balance
            .saturating_add(self.config.grant_amount);
        log::info!(
            "reward opened: +{} (balance {})",
            self.config.grant_amount,
            self.state.reward_balance
        );
        let next = self.config.stage_after_open();
        Ok(self.enter(next, TriggerKind::OpenReward))
    }

    /// # Errors
    ///
    /// `InvalidTransition` outside `RewardRevealed`.
    pub fn proceed_from_reveal(&mut self) -> Result<FlowStage, FlowError> {
        self.expect_stage(TriggerKind::ProceedFromReveal)?;
        Ok(self.enter(FlowStage::CouponChoice, TriggerKind::ProceedFromReveal))
    }

    /// Resolve the forced choice. The offer not picked is gone for the session.
    ///
    /// # Errors
    ///
    /// `DuplicateSelection` once a coupon has been chosen, `InvalidTransition`
    /// before the choice is reached, `UnknownCoupon` for an id that was not offered.
    pub fn choose_coupon(&mut self, coupon_id: &str) -> Result<FlowStage, FlowError> {
        if let Some(existing) = &self.state.selected_coupon {
            let err = FlowError::DuplicateSelection {
                existing: existing.clone(),
            };
            log::warn!("coupon choice '{coupon_id}' rejected: {err}");
            return Err(err);
        }
        self.expect_stage(TriggerKind::ChooseCoupon)?;
        if self.catalog.find_coupon(coupon_id).is_none() {
            let err = FlowError::UnknownCoupon(coupon_id.to_string());
            log::warn!("coupon choice rejected: {err}");
            return Err(err);
        }
        self.state.selected_coupon = Some(coupon_id.to_string());
        log::info!("coupon '{coupon_id}' selected");
        let next = self.config.stage_after_choice();
        Ok(self.enter(next, TriggerKind::ChooseCoupon))
    }

    /// Leave the claim-success screen; close and continue behave the same.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` outside `ClaimSuccess`.
    pub fn dismiss_success(&mut self, dismissal: Dismissal) -> Result<FlowStage, FlowError> {
        self.expect_stage(TriggerKind::DismissSuccess)?;
        log::debug!("claim success dismissed via {dismissal:?}");
        Ok(self.enter(FlowStage::Home, TriggerKind::DismissSuccess))
    }

    /// Switch the home content tab. Never touches stage or balance.
    ///
    /// # Errors
    ///
    /// `UnknownTab` for a tab outside the variant's set.
    pub fn select_tab(&mut self, tab: &str) -> Result<&TabId, FlowError> {
        match self.tabs.select(tab) {
            Ok(active) => {
                self.state.active_tab = active.clone();
                Ok(&self.state.active_tab)
            }
            Err(err) => {
                log::warn!("tab selection rejected: {err}");
                Err(err)
            }
        }
    }

    /// Spend one unit of the balance on a wish.
    ///
    /// # Errors
    ///
    /// `InvalidTransition` outside `Home`, `InsufficientBalance` when the
    /// balance is below the spend unit, `UnknownTarget` for an unknown wish.
    pub fn invest(&mut self, target_id: &str) -> Result<Investment, FlowError> {
        self.expect_stage(TriggerKind::Invest)?;
        let required = self.config.spend_unit;
        let balance = self.state.reward_balance;
        if balance < required {
            let err = FlowError::InsufficientBalance { balance, required };
            log::warn!("investment in '{target_id}' rejected: {err}");
            return Err(err);
        }
        if self.catalog.find_wish(target_id).is_none() {
            let err = FlowError::UnknownTarget(target_id.to_string());
            log::warn!("investment rejected: {err}");
            return Err(err);
        }
        self.state.reward_balance = balance - required;
        log::info!(
            "invested {required} in '{target_id}' (balance {})",
            self.state.reward_balance
        );
        Ok(Investment {
            target_id: target_id.to_string(),
            units: required,
        })
    }

    #[must_use]
    pub fn can_open_reward(&self) -> bool {
        self.stage() == FlowStage::RewardCover
    }

    /// Whether the presentation should offer the invest action at all.
    #[must_use]
    pub fn can_invest(&self) -> bool {
        self.stage() == FlowStage::Home && self.state.reward_balance >= self.config.spend_unit
    }

    /// Trigger kinds that would currently be accepted (payload permitting).
    #[must_use]
    pub fn available_triggers(&self) -> Vec<TriggerKind> {
        let mut kinds = Vec::with_capacity(3);
        match self.stage() {
            FlowStage::Splash => kinds.push(TriggerKind::AdvanceFromSplash),
            FlowStage::RewardCover => kinds.push(TriggerKind::OpenReward),
            FlowStage::RewardRevealed => kinds.push(TriggerKind::ProceedFromReveal),
            FlowStage::CouponChoice => kinds.push(TriggerKind::ChooseCoupon),
            FlowStage::ClaimSuccess => kinds.push(TriggerKind::DismissSuccess),
            FlowStage::Home => {
                if self.can_invest() {
                    kinds.push(TriggerKind::Invest);
                }
            }
        }
        kinds.push(TriggerKind::SelectTab);
        kinds
    }

    /// End the session, handing back its final state.
    #[must_use]
    pub fn into_state(self) -> SessionState {
        self.state
    }

    fn expect_stage(&self, trigger: TriggerKind) -> Result<(), FlowError> {
        let stage = self.stage();
        if trigger.accepted_in() == Some(stage) {
            return Ok(());
        }
        let err = FlowError::InvalidTransition { stage, trigger };
        log::warn!("{err}");
        Err(err)
    }

    fn enter(&mut self, next: FlowStage, trigger: TriggerKind) -> FlowStage {
        let from = self.state.stage;
        debug_assert!(
            next > from,
            "flow must only move forward ({from} -> {next})"
        );
        self.state.stage = next;
        log::info!("flow {from} -> {next} via {trigger}");
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FlowConfigSet;

    fn machine(variant: &str) -> FlowMachine {
        let set = FlowConfigSet::load_from_static().unwrap();
        let catalog = Arc::new(Catalog::load_from_static().unwrap());
        FlowMachine::new(set.get(variant).unwrap().clone(), catalog).unwrap()
    }

    fn at_home(variant: &str) -> FlowMachine {
        let mut flow = machine(variant);
        flow.advance_from_splash().unwrap();
        flow.open_reward().unwrap();
        if flow.stage() == FlowStage::RewardRevealed {
            flow.proceed_from_reveal().unwrap();
        }
        flow.choose_coupon("c1").unwrap();
        if flow.stage() == FlowStage::ClaimSuccess {
            flow.dismiss_success(Dismissal::Close).unwrap();
        }
        flow
    }

    #[test]
    fn wish_card_flow_skips_reveal_and_success() {
        let mut flow = machine("wish-cards");
        assert_eq!(flow.stage(), FlowStage::Splash);
        assert_eq!(flow.advance_from_splash(), Ok(FlowStage::RewardCover));
        assert_eq!(flow.open_reward(), Ok(FlowStage::CouponChoice));
        assert_eq!(flow.reward_balance(), 5);
        assert_eq!(flow.choose_coupon("c2"), Ok(FlowStage::Home));
        assert_eq!(flow.selected_coupon(), Some("c2"));
    }

    #[test]
    fn cash_claim_flow_visits_every_stage() {
        let mut flow = machine("cash-claim");
        let mut visited = vec![flow.stage()];
        flow.advance_from_splash().unwrap();
        visited.push(flow.stage());
        visited.push(flow.open_reward().unwrap());
        visited.push(flow.proceed_from_reveal().unwrap());
        visited.push(flow.choose_coupon("c1").unwrap());
        visited.push(flow.dismiss_success(Dismissal::Continue).unwrap());
        assert_eq!(visited, FlowStage::ALL);
        assert_eq!(flow.reward_balance(), 888);
    }

    #[test]
    fn wrong_stage_triggers_leave_state_untouched() {
        let mut flow = machine("reveal");
        let before = flow.state().clone();
        assert_eq!(
            flow.open_reward(),
            Err(FlowError::InvalidTransition {
                stage: FlowStage::Splash,
                trigger: TriggerKind::OpenReward,
            })
        );
        assert!(flow.proceed_from_reveal().is_err());
        assert!(flow.dismiss_success(Dismissal::Close).is_err());
        assert!(flow.invest("1").is_err());
        assert!(matches!(
            flow.choose_coupon("c1"),
            Err(FlowError::InvalidTransition { .. })
        ));
        assert_eq!(flow.state(), &before);
    }

    #[test]
    fn grant_applies_once() {
        let mut flow = machine("wish-cards");
        flow.advance_from_splash().unwrap();
        flow.open_reward().unwrap();
        for _ in 0..3 {
            assert!(flow.open_reward().is_err());
        }
        assert_eq!(flow.reward_balance(), 5);
        assert!(!flow.can_open_reward());
    }

    #[test]
    fn second_choice_is_a_duplicate() {
        let mut flow = at_home("wish-cards");
        assert_eq!(
            flow.choose_coupon("c2"),
            Err(FlowError::DuplicateSelection {
                existing: "c1".into()
            })
        );
        assert_eq!(flow.selected_coupon(), Some("c1"));
    }

    #[test]
    fn unknown_coupon_keeps_choice_open() {
        let mut flow = machine("wish-cards");
        flow.advance_from_splash().unwrap();
        flow.open_reward().unwrap();
        assert_eq!(
            flow.choose_coupon("c9"),
            Err(FlowError::UnknownCoupon("c9".into()))
        );
        assert_eq!(flow.stage(), FlowStage::CouponChoice);
        assert!(flow.selected_coupon().is_none());
        assert_eq!(flow.coupon_offers().len(), 2);
    }

    #[test]
    fn invest_drains_balance_to_zero_then_refuses() {
        let mut flow = at_home("wish-cards");
        for expected in (0..5).rev() {
            let receipt = flow.invest("3").unwrap();
            assert_eq!(receipt.units, 1);
            assert_eq!(flow.reward_balance(), expected);
        }
        assert!(!flow.can_invest());
        assert_eq!(
            flow.invest("3"),
            Err(FlowError::InsufficientBalance {
                balance: 0,
                required: 1
            })
        );
        assert_eq!(flow.reward_balance(), 0);
    }

    #[test]
    fn cash_claim_spends_whole_units() {
        let mut flow = at_home("cash-claim");
        for _ in 0..8 {
            flow.invest("2").unwrap();
        }
        assert_eq!(flow.reward_balance(), 88);
        assert_eq!(
            flow.invest("2"),
            Err(FlowError::InsufficientBalance {
                balance: 88,
                required: 100
            })
        );
    }

    #[test]
    fn invest_rejects_unknown_target_without_spending() {
        let mut flow = at_home("wish-cards");
        assert_eq!(
            flow.invest("42"),
            Err(FlowError::UnknownTarget("42".into()))
        );
        assert_eq!(flow.reward_balance(), 5);
    }

    #[test]
    fn tab_selection_is_independent_of_stage() {
        let mut flow = machine("wish-cards");
        assert_eq!(flow.active_tab(), &"WISHES");
        flow.select_tab("GOD_COUPONS").unwrap();
        assert_eq!(flow.stage(), FlowStage::Splash);
        assert_eq!(
            flow.select_tab("SETTINGS"),
            Err(FlowError::UnknownTab("SETTINGS".into()))
        );
        assert_eq!(flow.active_tab(), &"GOD_COUPONS");
        assert_eq!(flow.tabs().len(), 3);
    }

    #[test]
    fn dispatch_reports_outcomes() {
        let mut flow = machine("reveal");
        let outcome = flow.dispatch(Trigger::AdvanceFromSplash).unwrap();
        assert_eq!(outcome.from, FlowStage::Splash);
        assert_eq!(outcome.to, FlowStage::RewardCover);
        assert!(outcome.changed_stage());

        flow.dispatch(Trigger::OpenReward).unwrap();
        flow.dispatch(Trigger::ProceedFromReveal).unwrap();
        flow.dispatch(Trigger::ChooseCoupon("c1".into())).unwrap();

        let tab = flow
            .dispatch(Trigger::SelectTab("MERCHANTS".into()))
            .unwrap();
        assert!(!tab.changed_stage());
        assert_eq!(tab.trigger, TriggerKind::SelectTab);

        let invest = flow.dispatch(Trigger::Invest("1".into())).unwrap();
        assert_eq!(
            invest.investment,
            Some(Investment {
                target_id: "1".into(),
                units: 1
            })
        );
        assert_eq!(flow.reward_balance(), 4);
    }

    #[test]
    fn available_triggers_follow_stage_and_balance() {
        let mut flow = machine("wish-cards");
        assert_eq!(
            flow.available_triggers(),
            vec![TriggerKind::AdvanceFromSplash, TriggerKind::SelectTab]
        );
        flow.advance_from_splash().unwrap();
        assert!(flow.can_open_reward());
        let mut flow = at_home("wish-cards");
        assert!(flow.available_triggers().contains(&TriggerKind::Invest));
        while flow.can_invest() {
            flow.invest("1").unwrap();
        }
        assert_eq!(flow.available_triggers(), vec![TriggerKind::SelectTab]);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let catalog = Arc::new(Catalog::empty());
        let config = FlowConfig {
            grant_amount: 0,
            ..FlowConfig::default()
        };
        assert!(FlowMachine::new(config, catalog).is_err());
    }
}
