use amber_flow::Merchant;
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct MerchantCardProps {
    pub merchant: Merchant,
}

#[function_component(MerchantCard)]
pub fn merchant_card(props: &MerchantCardProps) -> Html {
    let m = &props.merchant;
    html! {
        <article class="bg-white rounded-xl p-3 shadow-sm flex items-center space-x-3" data-merchant={m.id.clone()}>
            if !m.image.is_empty() {
                <img class="w-16 h-16 rounded-lg object-cover" src={m.image.clone()} alt={m.name.clone()} />
            }
            <div class="flex-1">
                <h4 class="font-bold text-gray-900">{ m.name.clone() }</h4>
                <div class="flex items-center text-xs text-gray-500 mt-1">
                    <span class="bg-blue-50 text-blue-600 px-2 py-0.5 rounded mr-2">{ m.category.clone() }</span>
                    <span>{ format!("{:.1} km", m.distance_km) }</span>
                </div>
            </div>
            <div class="flex items-center">
                <i class="fa-solid fa-star text-yellow-400 text-sm"></i>
                <span class="text-sm font-bold ml-1">{ format!("{:.1}", m.rating) }</span>
            </div>
        </article>
    }
}
