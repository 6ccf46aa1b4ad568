#![cfg(feature = "async")]

use std::sync::Arc;
use std::time::Duration;

use amber_flow::{
    Catalog, Dismissal, FlowActor, FlowConfigSet, FlowError, FlowMachine, FlowStage, Trigger,
    TriggerKind,
};

fn machine(variant: &str) -> FlowMachine {
    let config = FlowConfigSet::load_from_static()
        .unwrap()
        .get(variant)
        .unwrap()
        .clone();
    FlowMachine::new(config, Arc::new(Catalog::load_from_static().unwrap())).unwrap()
}

#[tokio::test(start_paused = true)]
async fn splash_advances_after_configured_delay() {
    let (handle, _task) = FlowActor::spawn(machine("wish-cards"));
    assert_eq!(handle.snapshot().await.unwrap().stage(), FlowStage::Splash);

    tokio::time::advance(Duration::from_millis(2_400)).await;
    assert_eq!(handle.snapshot().await.unwrap().stage(), FlowStage::Splash);

    tokio::time::advance(Duration::from_millis(200)).await;
    let state = handle.wait_for_stage(FlowStage::RewardCover).await.unwrap();
    assert_eq!(state.stage(), FlowStage::RewardCover);
    assert_eq!(handle.current().stage(), FlowStage::RewardCover);
}

#[tokio::test(start_paused = true)]
async fn splash_cannot_be_skipped_by_callers() {
    let (handle, _task) = FlowActor::spawn(machine("wish-cards"));
    assert_eq!(
        handle.dispatch(Trigger::AdvanceFromSplash).await,
        Err(FlowError::InvalidTransition {
            stage: FlowStage::Splash,
            trigger: TriggerKind::AdvanceFromSplash,
        })
    );
    assert!(handle.open_reward().await.is_err());
    assert_eq!(handle.snapshot().await.unwrap().reward_balance(), 0);
}

#[tokio::test(start_paused = true)]
async fn shutdown_cancels_pending_splash() {
    let (handle, task) = FlowActor::spawn(machine("cash-claim"));
    handle.shutdown().await;
    let final_state = task.await.unwrap();
    assert_eq!(final_state.stage(), FlowStage::Splash);

    tokio::time::advance(Duration::from_secs(5)).await;
    assert_eq!(handle.snapshot().await, Err(FlowError::SessionClosed));
    assert_eq!(handle.current().stage(), FlowStage::Splash);
    assert!(matches!(
        handle.open_reward().await,
        Err(FlowError::SessionClosed)
    ));
}

#[tokio::test(start_paused = true)]
async fn dropping_every_handle_stops_the_actor() {
    let (handle, task) = FlowActor::spawn(machine("wish-cards"));
    drop(handle);
    let final_state = task.await.unwrap();
    assert_eq!(final_state.stage(), FlowStage::Splash);
}

#[tokio::test(start_paused = true)]
async fn full_session_through_the_handle() {
    let (handle, task) = FlowActor::spawn(machine("cash-claim"));
    let mut updates = handle.subscribe();

    handle.wait_for_stage(FlowStage::RewardCover).await.unwrap();
    let opened = handle.open_reward().await.unwrap();
    assert_eq!(opened.to, FlowStage::RewardRevealed);
    handle.proceed_from_reveal().await.unwrap();
    handle.choose_coupon("c2").await.unwrap();
    handle.dismiss_success(Dismissal::Close).await.unwrap();
    handle.select_tab("GOD_COUPONS").await.unwrap();

    let receipt = handle.invest("1").await.unwrap();
    assert_eq!(receipt.units, 100);

    updates.changed().await.unwrap();
    let latest = updates.borrow_and_update().clone();
    assert_eq!(latest.reward_balance(), 788);
    assert_eq!(latest.selected_coupon(), Some("c2"));
    assert_eq!(latest.active_tab(), &"GOD_COUPONS");

    handle.shutdown().await;
    let final_state = task.await.unwrap();
    assert_eq!(final_state, latest);
}
