use amber_flow::{Dismissal, FlowStage};
use yew::prelude::*;

use super::state::{FlowAction, FlowModel};
use crate::components::header::{amount_label, balance_label};
use crate::components::notice::NoticeToast;
use crate::pages::{
    claim_success::ClaimSuccessPage, coupon_choice::CouponChoicePage, home::HomePage,
    red_packet::RedPacketPage, reveal::RevealPage, splash::SplashPage,
};

fn emit(dispatcher: &UseReducerDispatcher<FlowModel>, action: FlowAction) -> Callback<()> {
    let dispatcher = dispatcher.clone();
    Callback::from(move |()| dispatcher.dispatch(action.clone()))
}

fn emit_with<T: 'static>(
    dispatcher: &UseReducerDispatcher<FlowModel>,
    action: fn(T) -> FlowAction,
) -> Callback<T> {
    let dispatcher = dispatcher.clone();
    Callback::from(move |value: T| dispatcher.dispatch(action(value)))
}

fn render_stage(model: &FlowModel, dispatcher: &UseReducerDispatcher<FlowModel>) -> Html {
    let machine = &model.machine;
    let config = machine.config();
    match machine.stage() {
        FlowStage::Splash => html! { <SplashPage /> },
        FlowStage::RewardCover => html! {
            <RedPacketPage
                opening={model.opening}
                on_open={emit(dispatcher, FlowAction::BeginOpen)}
            />
        },
        FlowStage::RewardRevealed => html! {
            <RevealPage
                amount={machine.reward_balance()}
                unit_label={amount_label(config, machine.reward_balance())}
                on_proceed={emit(dispatcher, FlowAction::ProceedFromReveal)}
            />
        },
        FlowStage::CouponChoice => html! {
            <CouponChoicePage
                offers={machine.coupon_offers().to_vec()}
                on_choose={emit_with(dispatcher, FlowAction::ChooseCoupon)}
            />
        },
        FlowStage::ClaimSuccess => {
            let coupon = machine
                .selected_coupon()
                .and_then(|id| machine.catalog().find_coupon(id))
                .cloned();
            html! {
                <ClaimSuccessPage
                    coupon={coupon}
                    on_dismiss={emit_with(dispatcher, FlowAction::Dismiss)}
                />
            }
        }
        FlowStage::Home => html! {
            <HomePage
                balance={machine.reward_balance()}
                balance_label={balance_label(config)}
                can_invest={machine.can_invest()}
                tabs={machine.tabs().to_vec()}
                active_tab={machine.active_tab().clone()}
                catalog={machine.shared_catalog()}
                ledger={model.ledger.clone()}
                on_select_tab={emit_with(dispatcher, FlowAction::SelectTab)}
                on_invest={emit_with(dispatcher, FlowAction::Invest)}
            />
        },
    }
}

/// Render the page for the model's current stage, with the notice toast on top.
#[must_use]
pub fn render_model(model: &FlowModel, dispatcher: &UseReducerDispatcher<FlowModel>) -> Html {
    html! {
        <>
            { render_stage(model, dispatcher) }
            <NoticeToast
                notice={model.notice.clone()}
                on_dismiss={emit(dispatcher, FlowAction::ClearNotice)}
            />
        </>
    }
}
