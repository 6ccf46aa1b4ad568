//! Seeded random trigger sequences, checked against the session invariants
//! after every step.
use amber_flow::{Dismissal, FlowMachine, FlowStage, SessionState, Trigger};
use anyhow::{Result, bail, ensure};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use super::ScenarioCtx;

const WALK_STEPS: usize = 48;

fn random_trigger(rng: &mut ChaCha20Rng, flow: &FlowMachine) -> Trigger {
    let offers = flow.coupon_offers();
    let wishes = &flow.catalog().wishes;
    let tabs = flow.tabs();
    match rng.gen_range(0..10) {
        0 => Trigger::AdvanceFromSplash,
        1 => Trigger::OpenReward,
        2 => Trigger::ProceedFromReveal,
        3 => {
            if rng.gen_bool(0.9) {
                Trigger::ChooseCoupon(offers[rng.gen_range(0..offers.len())].id.clone())
            } else {
                Trigger::ChooseCoupon("expired".into())
            }
        }
        4 => {
            if rng.gen_bool(0.5) {
                Trigger::DismissSuccess(Dismissal::Close)
            } else {
                Trigger::DismissSuccess(Dismissal::Continue)
            }
        }
        5 | 6 => {
            if rng.gen_bool(0.85) {
                Trigger::SelectTab(tabs[rng.gen_range(0..tabs.len())].to_string())
            } else {
                Trigger::SelectTab("SETTINGS".into())
            }
        }
        _ => {
            if rng.gen_bool(0.9) {
                Trigger::Invest(wishes[rng.gen_range(0..wishes.len())].id.clone())
            } else {
                Trigger::Invest("999".into())
            }
        }
    }
}

struct Observed {
    opened: bool,
    spent: u32,
}

fn check_step(
    flow: &FlowMachine,
    before: &SessionState,
    trigger: &Trigger,
    accepted: bool,
    observed: &mut Observed,
) -> Result<()> {
    let after = flow.state();
    let config = flow.config();
    if !accepted {
        ensure!(after == before, "rejected {trigger:?} changed the session");
        return Ok(());
    }
    ensure!(
        after.stage() >= before.stage(),
        "{trigger:?} moved {} back to {}",
        before.stage(),
        after.stage()
    );
    if before.stage() == FlowStage::Home {
        ensure!(after.stage() == FlowStage::Home, "{trigger:?} left Home");
    }
    if let Some(existing) = before.selected_coupon() {
        ensure!(
            after.selected_coupon() == Some(existing),
            "selected coupon changed after being set"
        );
    }
    match trigger {
        Trigger::OpenReward => {
            ensure!(!observed.opened, "grant applied twice");
            observed.opened = true;
        }
        Trigger::Invest(_) => observed.spent += config.spend_unit,
        _ => {}
    }
    let granted = if observed.opened {
        config.grant_amount
    } else {
        0
    };
    ensure!(
        after.reward_balance() + observed.spent == granted,
        "balance {} does not match grant {granted} minus spent {}",
        after.reward_balance(),
        observed.spent
    );
    ensure!(
        flow.tabs().contains(after.active_tab()),
        "active tab {} is outside the tab set",
        after.active_tab()
    );
    let chosen = after.selected_coupon().is_some();
    let past_choice = after.stage() > FlowStage::CouponChoice;
    ensure!(
        chosen == past_choice,
        "coupon selected {chosen} but stage is {}",
        after.stage()
    );
    Ok(())
}

pub fn run(ctx: &ScenarioCtx) -> Result<()> {
    let mut rng = ChaCha20Rng::seed_from_u64(ctx.seed);
    let mut flow = ctx.session()?;
    let mut observed = Observed {
        opened: false,
        spent: 0,
    };

    for step in 0..WALK_STEPS {
        let trigger = random_trigger(&mut rng, &flow);
        let before = flow.state().clone();
        let accepted = flow.dispatch(trigger.clone()).is_ok();
        if let Err(err) = check_step(&flow, &before, &trigger, accepted, &mut observed) {
            bail!("step {step} ({trigger:?}, seed {}): {err}", ctx.seed);
        }
        if ctx.verbose && accepted {
            log::debug!("step {step}: {trigger:?} -> {}", flow.stage());
        }
    }
    if flow.stage() != FlowStage::Home {
        log::debug!(
            "walk for seed {} ended at {} after {WALK_STEPS} steps",
            ctx.seed,
            flow.stage()
        );
    }
    Ok(())
}
