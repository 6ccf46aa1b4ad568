use amber_flow::{Dismissal, FlowError, FlowMachine, FlowStage, TabId, Trigger};
use anyhow::{Result, ensure};

use super::ScenarioCtx;

/// Take the single forward step the current stage offers. No-op at `Home`.
pub fn step_forward(flow: &mut FlowMachine, coupon: &str) -> Result<FlowStage> {
    let stage = match flow.stage() {
        FlowStage::Splash => flow.advance_from_splash()?,
        FlowStage::RewardCover => flow.open_reward()?,
        FlowStage::RewardRevealed => flow.proceed_from_reveal()?,
        FlowStage::CouponChoice => flow.choose_coupon(coupon)?,
        FlowStage::ClaimSuccess => flow.dismiss_success(Dismissal::Continue)?,
        FlowStage::Home => FlowStage::Home,
    };
    Ok(stage)
}

/// Drive `flow` from wherever it is to `Home`, choosing `coupon`.
pub fn drive_to_home(flow: &mut FlowMachine, coupon: &str) -> Result<()> {
    while flow.stage() != FlowStage::Home {
        step_forward(flow, coupon)?;
    }
    Ok(())
}

pub(crate) fn pick_index(seed: u64, len: usize) -> usize {
    let len = u64::try_from(len.max(1)).unwrap_or(u64::MAX);
    usize::try_from(seed % len).unwrap_or(0)
}

/// Coupon and wish the seed picks for this iteration.
fn picks(ctx: &ScenarioCtx, flow: &FlowMachine) -> (String, String) {
    let offers = flow.coupon_offers();
    let wishes = &flow.catalog().wishes;
    let coupon = offers[pick_index(ctx.seed, offers.len())].id.clone();
    let wish = wishes[pick_index(ctx.seed, wishes.len())].id.clone();
    (coupon, wish)
}

pub fn smoke(ctx: &ScenarioCtx) -> Result<()> {
    let mut flow = ctx.session()?;
    ensure!(flow.stage() == FlowStage::Splash, "session must start at splash");
    ensure!(flow.reward_balance() == 0, "balance must start at zero");
    ensure!(flow.selected_coupon().is_none(), "no coupon before the choice");
    flow.advance_from_splash()?;
    ensure!(
        flow.stage() == FlowStage::RewardCover,
        "splash leads to the reward cover"
    );
    Ok(())
}

pub fn end_to_end(ctx: &ScenarioCtx) -> Result<()> {
    let mut flow = ctx.session()?;
    let (coupon, wish) = picks(ctx, &flow);
    let expected = flow.config().stage_path();
    let mut visited = vec![flow.stage()];
    while flow.stage() != FlowStage::Home {
        let before = flow.stage();
        let after = step_forward(&mut flow, &coupon)?;
        ensure!(after > before, "stage did not advance from {before}");
        visited.push(after);
    }
    ensure!(
        visited == expected,
        "visited {visited:?}, expected {expected:?}"
    );

    let grant = flow.config().grant_amount;
    ensure!(flow.reward_balance() == grant, "balance should equal the grant");
    ensure!(
        flow.selected_coupon() == Some(coupon.as_str()),
        "selected coupon lost"
    );
    let receipt = flow.invest(&wish)?;
    ensure!(
        flow.reward_balance() == grant - receipt.units,
        "invest should spend exactly one unit"
    );
    Ok(())
}

pub fn grant_once(ctx: &ScenarioCtx) -> Result<()> {
    let mut flow = ctx.session()?;
    let (coupon, _) = picks(ctx, &flow);
    let grant = flow.config().grant_amount;

    ensure!(flow.open_reward().is_err(), "open must fail during splash");
    flow.advance_from_splash()?;
    flow.open_reward()?;
    for _ in 0..3 {
        let err = flow.open_reward().err();
        ensure!(
            matches!(err, Some(FlowError::InvalidTransition { .. })),
            "second open should be an invalid transition, got {err:?}"
        );
    }
    ensure!(flow.reward_balance() == grant, "grant applied more than once");
    drive_to_home(&mut flow, &coupon)?;
    ensure!(flow.open_reward().is_err(), "open must fail at home");
    ensure!(flow.reward_balance() == grant, "grant applied at home");
    Ok(())
}

pub fn duplicate_selection(ctx: &ScenarioCtx) -> Result<()> {
    let mut flow = ctx.session()?;
    let (coupon, _) = picks(ctx, &flow);
    flow.advance_from_splash()?;
    flow.open_reward()?;
    if flow.stage() == FlowStage::RewardRevealed {
        ensure!(
            flow.choose_coupon(&coupon).is_err(),
            "choice must wait for the reveal to finish"
        );
        flow.proceed_from_reveal()?;
    }
    ensure!(
        matches!(
            flow.choose_coupon("missing"),
            Err(FlowError::UnknownCoupon(_))
        ),
        "unknown coupon should be rejected"
    );
    flow.choose_coupon(&coupon)?;
    let snapshot = flow.state().clone();
    for other in flow.coupon_offers().to_vec() {
        let err = flow.choose_coupon(&other.id).err();
        ensure!(
            err == Some(FlowError::DuplicateSelection {
                existing: coupon.clone()
            }),
            "expected duplicate selection, got {err:?}"
        );
    }
    ensure!(*flow.state() == snapshot, "rejected choice changed state");
    Ok(())
}

pub fn balance_floor(ctx: &ScenarioCtx) -> Result<()> {
    let mut flow = ctx.session()?;
    let (coupon, wish) = picks(ctx, &flow);
    let unit = flow.config().spend_unit;
    let grant = flow.config().grant_amount;
    drive_to_home(&mut flow, &coupon)?;

    let mut investments = 0u32;
    while flow.can_invest() {
        flow.invest(&wish)?;
        investments += 1;
    }
    ensure!(investments == grant / unit, "expected {} investments", grant / unit);
    ensure!(flow.reward_balance() == grant % unit, "leftover balance mismatch");
    let before = flow.reward_balance();
    let err = flow.invest(&wish).err();
    ensure!(
        err == Some(FlowError::InsufficientBalance {
            balance: before,
            required: unit
        }),
        "expected insufficient balance, got {err:?}"
    );
    ensure!(flow.reward_balance() == before, "failed invest changed balance");
    Ok(())
}

pub fn tab_routing(ctx: &ScenarioCtx) -> Result<()> {
    let mut flow = ctx.session()?;
    let (coupon, _) = picks(ctx, &flow);
    let default_tab = flow.config().default_tab().cloned();
    ensure!(
        Some(flow.active_tab()) == default_tab.as_ref(),
        "session should open on the default tab"
    );
    drive_to_home(&mut flow, &coupon)?;

    for tab in flow.tabs().to_vec() {
        let balance = flow.reward_balance();
        let outcome = flow.dispatch(Trigger::SelectTab(tab.to_string()))?;
        ensure!(!outcome.changed_stage(), "tab selection changed stage");
        ensure!(flow.active_tab() == &tab, "tab {tab} not active");
        ensure!(flow.reward_balance() == balance, "tab selection moved balance");
    }
    let active = flow.active_tab().clone();
    ensure!(
        matches!(flow.select_tab("CASINO"), Err(FlowError::UnknownTab(_))),
        "unknown tab accepted"
    );
    ensure!(flow.active_tab() == &active, "unknown tab changed the active tab");
    flow.select_tab(TabId::WISHES)?;
    Ok(())
}

pub fn forward_only(ctx: &ScenarioCtx) -> Result<()> {
    let mut flow = ctx.session()?;
    let (coupon, wish) = picks(ctx, &flow);
    let triggers = [
        Trigger::AdvanceFromSplash,
        Trigger::OpenReward,
        Trigger::ProceedFromReveal,
        Trigger::ChooseCoupon(coupon),
        Trigger::DismissSuccess(Dismissal::Close),
        Trigger::SelectTab(TabId::GOD_COUPONS.into()),
        Trigger::Invest(wish),
    ];
    for _ in 0..2 {
        for trigger in &triggers {
            let before = flow.stage();
            if let Ok(outcome) = flow.dispatch(trigger.clone()) {
                ensure!(outcome.to >= before, "{trigger:?} moved {before} backwards");
                ensure!(
                    before != FlowStage::Home || outcome.to == FlowStage::Home,
                    "left Home via {trigger:?}"
                );
            }
        }
    }
    ensure!(flow.stage() == FlowStage::Home, "session should end at Home");
    Ok(())
}
