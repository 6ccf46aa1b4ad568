use std::time::{Duration, Instant};

use amber_flow::{Dismissal, FlowActor, FlowStage};
use anyhow::{Context, Result, ensure};

use super::ScenarioCtx;
use super::flow::pick_index;

const SPLASH_SLACK: Duration = Duration::from_secs(2);

pub async fn splash_then_full_flow(ctx: &ScenarioCtx) -> Result<()> {
    let machine = ctx.session()?;
    let config = machine.config().clone();
    let offers = machine.coupon_offers();
    let coupon = offers[pick_index(ctx.seed, offers.len())].id.clone();
    let wishes = &machine.catalog().wishes;
    let wish = wishes[pick_index(ctx.seed, wishes.len())].id.clone();

    let started = Instant::now();
    let (handle, task) = FlowActor::spawn(machine);

    ensure!(
        handle.open_reward().await.is_err(),
        "reward opened before the splash ended"
    );
    let state = tokio::time::timeout(
        config.splash_delay() + SPLASH_SLACK,
        handle.wait_for_stage(FlowStage::RewardCover),
    )
    .await
    .context("splash never ended")??;
    let elapsed = started.elapsed();
    ensure!(
        elapsed >= config.splash_delay(),
        "splash ended after {elapsed:?}, configured {:?}",
        config.splash_delay()
    );
    ensure!(state.reward_balance() == 0, "balance credited during splash");
    if ctx.verbose {
        log::info!("splash for {} ended after {elapsed:?}", config.variant);
    }

    handle.open_reward().await?;
    if config.has_reveal_stage {
        handle.proceed_from_reveal().await?;
    }
    handle.choose_coupon(&coupon).await?;
    if config.has_success_stage {
        handle.dismiss_success(Dismissal::Close).await?;
    }
    let receipt = handle.invest(&wish).await?;
    let latest = handle.current();
    ensure!(latest.stage() == FlowStage::Home, "session did not reach Home");
    ensure!(
        latest.reward_balance() == config.grant_amount - receipt.units,
        "balance after invest is {}",
        latest.reward_balance()
    );

    handle.shutdown().await;
    let final_state = task.await.context("flow actor panicked")?;
    ensure!(final_state == latest, "published state diverged from the actor");
    Ok(())
}
