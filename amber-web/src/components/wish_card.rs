use amber_flow::WishItem;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct WishCardProps {
    pub wish: WishItem,
    /// Progress including this session's contributions.
    pub current: u32,
    pub participants: u32,
    pub progress: u8,
    pub can_invest: bool,
    pub on_invest: Callback<String>,
}

#[function_component(WishCard)]
pub fn wish_card(props: &WishCardProps) -> Html {
    let on_click = {
        let on_invest = props.on_invest.clone();
        let id = props.wish.id.clone();
        let enabled = props.can_invest;
        Callback::from(move |_: MouseEvent| {
            if enabled {
                on_invest.emit(id.clone());
            }
        })
    };
    let wish = &props.wish;
    html! {
        <article class="bg-white rounded-xl p-3 shadow-sm flex space-x-3" data-wish={wish.id.clone()}>
            if !wish.image.is_empty() {
                <img class="w-20 h-20 rounded-lg object-cover" src={wish.image.clone()} alt={wish.name.clone()} />
            }
            <div class="flex-1">
                <h4 class="font-bold text-gray-800 text-sm line-clamp-1">{ wish.name.clone() }</h4>
                <div class="flex items-center text-xs text-gray-500 mt-1 space-x-2">
                    <span>{ format!("{} joined", props.participants) }</span>
                </div>
                <div class="mt-2">
                    <div class="flex justify-between text-xs text-gray-600 mb-1">
                        <span>{ "Progress" }</span>
                        <span>{ format!("{}/{}", props.current, wish.total_needed) }</span>
                    </div>
                    <progress
                        class="progress progress-secondary w-full"
                        value={props.progress.to_string()}
                        max="100"
                        aria-label={format!("{}% funded", props.progress)}
                    ></progress>
                </div>
                <button
                    class="mt-2 w-full py-1.5 bg-gray-900 text-white text-xs font-bold rounded-lg disabled:opacity-50"
                    disabled={!props.can_invest}
                    onclick={on_click}
                >
                    { "Invest" }
                </button>
            </div>
        </article>
    }
}
