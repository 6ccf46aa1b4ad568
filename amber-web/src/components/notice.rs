use yew::prelude::*;

use crate::app::state::Notice;

#[derive(Properties, Clone, PartialEq)]
pub struct NoticeToastProps {
    pub notice: Option<Notice>,
    pub on_dismiss: Callback<()>,
}

#[function_component(NoticeToast)]
pub fn notice_toast(props: &NoticeToastProps) -> Html {
    let Some(notice) = props.notice.as_ref() else {
        return Html::default();
    };
    let (class, text) = match notice {
        Notice::Info(text) => ("alert alert-success", text.clone()),
        Notice::Error(text) => ("alert alert-error", text.clone()),
    };
    let on_click = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_: MouseEvent| on_dismiss.emit(()))
    };
    html! {
        <div class="toast toast-top toast-center z-50" role="status" aria-live="polite">
            <div class={class} onclick={on_click}>
                <span>{ text.to_string() }</span>
            </div>
        </div>
    }
}
