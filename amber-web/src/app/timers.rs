use yew::prelude::*;

use crate::dom::Timeout;

/// Fire `on_fire` once, `delay_ms` after `armed` becomes true.
///
/// The timer is cleared when `armed` flips back, the delay changes or the
/// component unmounts, so a stale stage never receives a late callback.
#[hook]
pub fn use_stage_timer(armed: bool, delay_ms: u64, on_fire: Callback<()>) {
    use_effect_with((armed, delay_ms), move |&(armed, delay_ms)| {
        let timer = if armed {
            Timeout::schedule(delay_ms, move || on_fire.emit(()))
        } else {
            None
        };
        move || drop(timer)
    });
}
