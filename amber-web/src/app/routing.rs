#[cfg(any(target_arch = "wasm32", test))]
use crate::router::Route;
#[cfg(any(target_arch = "wasm32", test))]
use amber_flow::{FlowStage, SessionState, TabId};
#[cfg(target_arch = "wasm32")]
use yew::prelude::*;
#[cfg(target_arch = "wasm32")]
use yew_router::prelude::Navigator;

#[cfg(target_arch = "wasm32")]
use super::state::{FlowAction, FlowModel};

/// What a route change asks of the session.
#[cfg(any(target_arch = "wasm32", test))]
#[derive(Clone, Debug, PartialEq, Eq)]
enum RouteSync {
    /// Put the URL back where the session is.
    Restore(Route),
    SelectTab(String),
}

#[cfg(any(target_arch = "wasm32", test))]
fn next_route_for_state(desired: &Route, current_route: Option<&Route>) -> Option<Route> {
    (Some(desired) != current_route).then(|| desired.clone())
}

/// Only the home tab may be driven from the URL; every other route change
/// is undone, since the stage only moves forward through the flow itself.
#[cfg(any(target_arch = "wasm32", test))]
fn sync_for_route(
    state: &SessionState,
    tabs: &[TabId],
    route: Option<&Route>,
) -> Option<RouteSync> {
    let desired = Route::from_state(state);
    if route == Some(&desired) {
        return None;
    }
    if state.stage() == FlowStage::Home {
        if let Some(tab) = route.and_then(Route::tab) {
            if tabs.iter().any(|known| known == tab) {
                return Some(RouteSync::SelectTab(tab.to_string()));
            }
        }
    }
    Some(RouteSync::Restore(desired))
}

#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_sync_route_with_state(
    model: &FlowModel,
    navigator: Option<Navigator>,
    active_route: Option<Route>,
) {
    let desired = Route::from_state(model.machine.state());
    use_effect_with(desired, move |desired| {
        if let (Some(nav), Some(new_route)) = (
            navigator.as_ref(),
            next_route_for_state(desired, active_route.as_ref()),
        ) {
            nav.replace(&new_route);
        }
    });
}

#[cfg(target_arch = "wasm32")]
#[hook]
pub fn use_sync_state_with_route(
    model: &FlowModel,
    dispatcher: UseReducerDispatcher<FlowModel>,
    navigator: Option<Navigator>,
    route: Option<Route>,
) {
    let state = model.machine.state().clone();
    let tabs = model.machine.tabs().to_vec();
    use_effect_with(route, move |route| {
        match sync_for_route(&state, &tabs, route.as_ref()) {
            Some(RouteSync::SelectTab(tab)) => dispatcher.dispatch(FlowAction::SelectTab(tab)),
            Some(RouteSync::Restore(target)) => {
                if let Some(nav) = navigator.as_ref() {
                    nav.replace(&target);
                }
            }
            None => {}
        }
    });
}
