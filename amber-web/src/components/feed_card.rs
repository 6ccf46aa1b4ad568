use amber_flow::{FeedItem, FeedStatus};
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq, Eq)]
pub struct FeedCardProps {
    pub item: FeedItem,
}

fn status_badge(item: &FeedItem) -> String {
    match item.status {
        FeedStatus::Live if item.remaining_slots() == 0 => "Sold out".to_string(),
        FeedStatus::Live => format!("Only {} left", item.remaining_slots()),
        FeedStatus::SoldOut => "Sold out".to_string(),
        FeedStatus::Upcoming => "Coming soon".to_string(),
    }
}

#[function_component(FeedCard)]
pub fn feed_card(props: &FeedCardProps) -> Html {
    let item = &props.item;
    html! {
        <article class="bg-white rounded-xl shadow-sm flex overflow-hidden" data-feed={item.id.clone()}>
            <div class="bg-amber-500 w-24 flex flex-col items-center justify-center p-2 text-white border-r border-dashed border-white/30">
                <span class="text-xs font-bold uppercase">{ "Value" }</span>
                <span class="text-2xl font-black">{ item.value.clone() }</span>
            </div>
            <div class="flex-1 p-3">
                <h4 class="font-bold text-gray-800">{ item.title.clone() }</h4>
                <p class="text-xs text-gray-500 mt-1">{ format!("@ {}", item.merchant) }</p>
                <div class="flex justify-between items-center mt-2">
                    <span class="text-xs text-red-500 font-bold bg-red-50 px-2 py-1 rounded">{ status_badge(item) }</span>
                    <button class="bg-gray-900 text-white text-xs px-4 py-2 rounded-full font-bold disabled:opacity-50" disabled={!item.is_claimable()}>
                        { "Claim" }
                    </button>
                </div>
            </div>
        </article>
    }
}
