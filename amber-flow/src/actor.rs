//! Single-owner session task for multi-threaded hosts.
//!
//! The actor is the only code holding the [`FlowMachine`]; callers talk to it
//! through a [`FlowHandle`]. The splash delay lives inside the actor's select
//! loop, so shutting the actor down (or dropping every handle) drops the
//! pending timer with it and a discarded session is never advanced.

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::error::FlowError;
use crate::flow::{FlowMachine, Investment, TransitionOutcome};
use crate::session::SessionState;
use crate::stage::{Dismissal, FlowStage, Trigger, TriggerKind};

const COMMAND_BUFFER: usize = 32;

enum Command {
    Dispatch {
        trigger: Trigger,
        reply: oneshot::Sender<Result<TransitionOutcome, FlowError>>,
    },
    Snapshot {
        reply: oneshot::Sender<SessionState>,
    },
    Shutdown,
}

/// Cloneable handle to a running session actor.
#[derive(Debug, Clone)]
pub struct FlowHandle {
    commands: mpsc::Sender<Command>,
    updates: watch::Receiver<SessionState>,
}

pub struct FlowActor;

impl FlowActor {
    /// Move `machine` into a new task. The join handle yields the final state
    /// once the actor stops.
    pub fn spawn(machine: FlowMachine) -> (FlowHandle, JoinHandle<SessionState>) {
        let (commands, rx) = mpsc::channel(COMMAND_BUFFER);
        let (publisher, updates) = watch::channel(machine.state().clone());
        let task = tokio::spawn(run(machine, rx, publisher));
        (FlowHandle { commands, updates }, task)
    }
}

async fn run(
    mut machine: FlowMachine,
    mut commands: mpsc::Receiver<Command>,
    publisher: watch::Sender<SessionState>,
) -> SessionState {
    let splash = tokio::time::sleep(machine.config().splash_delay());
    tokio::pin!(splash);
    let mut splash_armed = machine.stage() == FlowStage::Splash;

    loop {
        tokio::select! {
            biased;

            () = &mut splash, if splash_armed => {
                splash_armed = false;
                match machine.advance_from_splash() {
                    Ok(_) => publish(&publisher, &machine),
                    Err(err) => log::warn!("splash timer fired late: {err}"),
                }
            }
            command = commands.recv() => match command {
                Some(Command::Dispatch { trigger, reply }) => {
                    let result = if trigger.kind() == TriggerKind::AdvanceFromSplash {
                        // The splash only ever ends on its timer.
                        Err(FlowError::InvalidTransition {
                            stage: machine.stage(),
                            trigger: TriggerKind::AdvanceFromSplash,
                        })
                    } else {
                        machine.dispatch(trigger)
                    };
                    if result.is_ok() {
                        publish(&publisher, &machine);
                    }
                    let _ = reply.send(result);
                }
                Some(Command::Snapshot { reply }) => {
                    let _ = reply.send(machine.state().clone());
                }
                Some(Command::Shutdown) | None => break,
            }
        }
    }

    log::debug!("flow actor stopped at {}", machine.stage());
    machine.into_state()
}

fn publish(publisher: &watch::Sender<SessionState>, machine: &FlowMachine) {
    publisher.send_replace(machine.state().clone());
}

impl FlowHandle {
    /// # Errors
    ///
    /// The machine's rejection, or `SessionClosed` once the actor has stopped.
    pub async fn dispatch(&self, trigger: Trigger) -> Result<TransitionOutcome, FlowError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Command::Dispatch { trigger, reply })
            .await
            .map_err(|_| FlowError::SessionClosed)?;
        response.await.map_err(|_| FlowError::SessionClosed)?
    }

    /// # Errors
    ///
    /// `SessionClosed` once the actor has stopped.
    pub async fn snapshot(&self) -> Result<SessionState, FlowError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Command::Snapshot { reply })
            .await
            .map_err(|_| FlowError::SessionClosed)?;
        response.await.map_err(|_| FlowError::SessionClosed)
    }

    /// Latest published state without a round trip.
    #[must_use]
    pub fn current(&self) -> SessionState {
        self.updates.borrow().clone()
    }

    /// Receiver that observes every accepted change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.updates.clone()
    }

    /// Wait until the session reaches `stage` (or has already passed it).
    ///
    /// # Errors
    ///
    /// `SessionClosed` if the actor stops first.
    pub async fn wait_for_stage(&self, stage: FlowStage) -> Result<SessionState, FlowError> {
        let mut updates = self.updates.clone();
        let state = updates
            .wait_for(|state| state.stage() >= stage)
            .await
            .map_err(|_| FlowError::SessionClosed)?;
        Ok(state.clone())
    }

    /// Stop the actor; a pending splash timer is dropped unfired.
    pub async fn shutdown(&self) {
        let _ = self.commands.send(Command::Shutdown).await;
    }

    /// # Errors
    ///
    /// See [`FlowMachine::open_reward`].
    pub async fn open_reward(&self) -> Result<TransitionOutcome, FlowError> {
        self.dispatch(Trigger::OpenReward).await
    }

    /// # Errors
    ///
    /// See [`FlowMachine::proceed_from_reveal`].
    pub async fn proceed_from_reveal(&self) -> Result<TransitionOutcome, FlowError> {
        self.dispatch(Trigger::ProceedFromReveal).await
    }

    /// # Errors
    ///
    /// See [`FlowMachine::choose_coupon`].
    pub async fn choose_coupon(&self, coupon_id: &str) -> Result<TransitionOutcome, FlowError> {
        self.dispatch(Trigger::ChooseCoupon(coupon_id.to_string()))
            .await
    }

    /// # Errors
    ///
    /// See [`FlowMachine::dismiss_success`].
    pub async fn dismiss_success(
        &self,
        dismissal: Dismissal,
    ) -> Result<TransitionOutcome, FlowError> {
        self.dispatch(Trigger::DismissSuccess(dismissal)).await
    }

    /// # Errors
    ///
    /// See [`FlowMachine::select_tab`].
    pub async fn select_tab(&self, tab: &str) -> Result<TransitionOutcome, FlowError> {
        self.dispatch(Trigger::SelectTab(tab.to_string())).await
    }

    /// # Errors
    ///
    /// See [`FlowMachine::invest`].
    pub async fn invest(&self, target_id: &str) -> Result<Investment, FlowError> {
        let outcome = self
            .dispatch(Trigger::Invest(target_id.to_string()))
            .await?;
        outcome.investment.ok_or(FlowError::SessionClosed)
    }
}
