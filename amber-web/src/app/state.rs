use std::rc::Rc;

use amber_flow::{Dismissal, FlowError, FlowMachine, FlowStage, ParticipationLedger, TriggerKind};
use yew::prelude::*;

use crate::components::header::amount_label;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Info(AttrValue),
    Error(AttrValue),
}

/// User and timer events the page feeds into the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlowAction {
    SplashElapsed,
    BeginOpen,
    OpenAnimationDone,
    ProceedFromReveal,
    ChooseCoupon(String),
    Dismiss(Dismissal),
    SelectTab(String),
    Invest(String),
    ClearNotice,
}

/// Everything the page renders from: the session plus view-only extras.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowModel {
    pub machine: FlowMachine,
    pub ledger: ParticipationLedger,
    /// The red packet is mid-animation; the grant lands when it finishes.
    pub opening: bool,
    pub notice: Option<Notice>,
}

impl FlowModel {
    #[must_use]
    pub fn new(machine: FlowMachine) -> Self {
        Self {
            machine,
            ledger: ParticipationLedger::new(),
            opening: false,
            notice: None,
        }
    }

    #[must_use]
    pub const fn stage(&self) -> FlowStage {
        self.machine.stage()
    }

    /// Apply one action. On error the model may be partially updated, so
    /// callers keep the previous model instead.
    ///
    /// # Errors
    ///
    /// Returns the session's rejection of the action.
    pub fn apply(&mut self, action: FlowAction) -> Result<(), FlowError> {
        match action {
            FlowAction::SplashElapsed => {
                self.machine.advance_from_splash()?;
            }
            FlowAction::BeginOpen => {
                if self.opening {
                    return Ok(());
                }
                if !self.machine.can_open_reward() {
                    return Err(FlowError::InvalidTransition {
                        stage: self.stage(),
                        trigger: TriggerKind::OpenReward,
                    });
                }
                self.opening = true;
            }
            FlowAction::OpenAnimationDone => {
                self.opening = false;
                self.machine.open_reward()?;
            }
            FlowAction::ProceedFromReveal => {
                self.machine.proceed_from_reveal()?;
            }
            FlowAction::ChooseCoupon(id) => {
                self.machine.choose_coupon(&id)?;
            }
            FlowAction::Dismiss(dismissal) => {
                self.machine.dismiss_success(dismissal)?;
            }
            FlowAction::SelectTab(tab) => {
                self.machine.select_tab(&tab)?;
            }
            FlowAction::Invest(target) => {
                let receipt = self.machine.invest(&target)?;
                self.ledger.record(&receipt);
                let unit = amount_label(self.machine.config(), receipt.units);
                self.notice = Some(Notice::Info(
                    format!("Invested {} {unit}! Good luck!", receipt.units).into(),
                ));
                return Ok(());
            }
            FlowAction::ClearNotice => {}
        }
        self.notice = None;
        Ok(())
    }
}

impl Reducible for FlowModel {
    type Action = FlowAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match next.apply(action) {
            Ok(()) => Rc::new(next),
            Err(err) => {
                log::warn!("action rejected: {err}");
                let mut kept = (*self).clone();
                kept.notice = Some(Notice::Error(err.to_string().into()));
                Rc::new(kept)
            }
        }
    }
}

/// Session state for the page, seeded once from the embedded catalog.
#[hook]
pub fn use_flow_model(machine: FlowMachine) -> UseReducerHandle<FlowModel> {
    use_reducer(move || FlowModel::new(machine))
}
