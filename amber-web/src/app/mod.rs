#[cfg(target_arch = "wasm32")]
use crate::router::Route;
#[cfg(target_arch = "wasm32")]
use amber_flow::{FlowMachine, FlowStage};
#[cfg(target_arch = "wasm32")]
use yew::prelude::*;
#[cfg(target_arch = "wasm32")]
use yew_router::prelude::*;

pub mod routing;
pub mod state;
pub mod timers;
pub mod view;

pub use state::{FlowAction, FlowModel, Notice};

#[cfg(target_arch = "wasm32")]
#[function_component(App)]
pub fn app() -> Html {
    let session = use_memo((), |_| {
        let requested = crate::catalog::requested_variant();
        crate::catalog::initial_session(requested.as_deref())
    });
    match &*session {
        Ok(machine) => html! {
            <BrowserRouter>
                <AppInner machine={machine.clone()} />
            </BrowserRouter>
        },
        Err(err) => {
            crate::dom::console_error(&err.to_string());
            html! { <crate::pages::unavailable::Unavailable reason={err.to_string()} /> }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[derive(Properties, Clone, PartialEq)]
pub struct AppInnerProps {
    pub machine: FlowMachine,
}

#[cfg(target_arch = "wasm32")]
#[function_component(AppInner)]
pub fn app_inner(props: &AppInnerProps) -> Html {
    let model = state::use_flow_model(props.machine.clone());
    let dispatcher = model.dispatcher();
    let config = model.machine.config();

    timers::use_stage_timer(
        model.stage() == FlowStage::Splash,
        config.splash_delay_ms,
        {
            let dispatcher = dispatcher.clone();
            Callback::from(move |()| dispatcher.dispatch(FlowAction::SplashElapsed))
        },
    );
    timers::use_stage_timer(model.opening, config.open_animation_ms, {
        let dispatcher = dispatcher.clone();
        Callback::from(move |()| dispatcher.dispatch(FlowAction::OpenAnimationDone))
    });

    let navigator = use_navigator();
    let route = use_route::<Route>();
    routing::use_sync_route_with_state(&model, navigator.clone(), route.clone());
    routing::use_sync_state_with_route(&model, dispatcher.clone(), navigator, route);

    view::render_model(&model, &dispatcher)
}
