#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use amber_web::app::timers::use_stage_timer;
use amber_web::dom::{self, Timeout};
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use yew::prelude::*;

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

async fn sleep_ms(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        dom::window()
            .expect("window")
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .expect("setTimeout");
    });
    JsFuture::from(promise).await.expect("sleep");
}

fn counter() -> (Rc<Cell<u32>>, Callback<()>) {
    let fired = Rc::new(Cell::new(0));
    let on_fire = {
        let fired = Rc::clone(&fired);
        Callback::from(move |()| fired.set(fired.get() + 1))
    };
    (fired, on_fire)
}

fn fresh_root() -> web_sys::Element {
    let doc = dom::window()
        .and_then(|w| w.document())
        .expect("document");
    let root = doc.create_element("div").expect("create root");
    doc.body()
        .expect("document body")
        .append_child(&root)
        .expect("append root");
    root
}

#[derive(Properties, Clone, PartialEq)]
struct HostProps {
    armed: bool,
    delay_ms: u64,
    on_fire: Callback<()>,
}

#[function_component(StageTimerHost)]
fn stage_timer_host(props: &HostProps) -> Html {
    use_stage_timer(props.armed, props.delay_ms, props.on_fire.clone());
    html! { <div data-armed={props.armed.to_string()} /> }
}

#[wasm_bindgen_test]
async fn timeout_fires_once_after_its_delay() {
    let (fired, on_fire) = counter();
    let timer =
        Timeout::schedule(10, move || on_fire.emit(())).expect("timer scheduled");
    assert_eq!(fired.get(), 0);

    sleep_ms(60).await;
    assert_eq!(fired.get(), 1);
    drop(timer);
    sleep_ms(30).await;
    assert_eq!(fired.get(), 1);
}

#[wasm_bindgen_test]
async fn dropped_timeout_never_fires() {
    let (fired, on_fire) = counter();
    let timer =
        Timeout::schedule(20, move || on_fire.emit(())).expect("timer scheduled");
    drop(timer);

    sleep_ms(80).await;
    assert_eq!(fired.get(), 0);
}

#[wasm_bindgen_test]
async fn armed_stage_timer_fires() {
    let (fired, on_fire) = counter();
    let _app = yew::Renderer::<StageTimerHost>::with_root_and_props(
        fresh_root(),
        HostProps {
            armed: true,
            delay_ms: 20,
            on_fire,
        },
    )
    .render();

    sleep_ms(100).await;
    assert_eq!(fired.get(), 1);
}

#[wasm_bindgen_test]
async fn disarmed_stage_timer_stays_quiet() {
    let (fired, on_fire) = counter();
    let _app = yew::Renderer::<StageTimerHost>::with_root_and_props(
        fresh_root(),
        HostProps {
            armed: false,
            delay_ms: 20,
            on_fire,
        },
    )
    .render();

    sleep_ms(100).await;
    assert_eq!(fired.get(), 0);
}

#[wasm_bindgen_test]
async fn unmounting_cancels_a_pending_stage_timer() {
    let (fired, on_fire) = counter();
    let app = yew::Renderer::<StageTimerHost>::with_root_and_props(
        fresh_root(),
        HostProps {
            armed: true,
            delay_ms: 80,
            on_fire,
        },
    )
    .render();

    sleep_ms(10).await;
    app.destroy();
    sleep_ms(150).await;
    assert_eq!(fired.get(), 0);
}
