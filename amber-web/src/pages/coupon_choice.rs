use amber_flow::CouponOffer;
use yew::prelude::*;

const OFFER_GRADIENTS: [&str; 2] = [
    "from-blue-500 to-indigo-600",
    "from-pink-500 to-rose-600",
];

fn price_label(cents: i64) -> String {
    if cents == 0 {
        return "Free".to_string();
    }
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}¥{}.{:02}", abs / 100, abs % 100)
}

#[derive(Properties, Clone, PartialEq)]
pub struct CouponChoicePageProps {
    pub offers: Vec<CouponOffer>,
    pub on_choose: Callback<String>,
}

#[function_component(CouponChoicePage)]
pub fn coupon_choice_page(props: &CouponChoicePageProps) -> Html {
    html! {
        <div class="fixed inset-0 bg-gray-900/95 flex flex-col items-center justify-center z-40 px-6">
            <h2 class="text-2xl text-white font-bold mb-8 animate-bounce">{ "Choose Your Reward" }</h2>
            <div class="w-full space-y-6">
                { for props.offers.iter().enumerate().map(|(idx, offer)| {
                    let on_click = {
                        let on_choose = props.on_choose.clone();
                        let id = offer.id.clone();
                        Callback::from(move |_: MouseEvent| on_choose.emit(id.clone()))
                    };
                    let gradient = OFFER_GRADIENTS[idx % OFFER_GRADIENTS.len()];
                    html! {
                        <button
                            class={classes!("w-full", "rounded-2xl", "p-6", "bg-gradient-to-r", gradient, "flex", "justify-between", "items-center", "shadow-xl")}
                            data-offer={offer.id.clone()}
                            onclick={on_click}
                        >
                            <div class="text-left">
                                <h3 class="text-4xl font-black text-white italic">{ offer.title.clone() }</h3>
                                <p class="text-white/80 mt-1">{ offer.desc.clone() }</p>
                                <p class="text-white text-sm mt-2">
                                    <span class="font-bold">{ price_label(offer.price_cents) }</span>
                                    <span class="line-through opacity-70 ml-2">{ price_label(offer.original_price_cents) }</span>
                                    <span class="ml-2">{ format!("-{}%", offer.discount_percent()) }</span>
                                </p>
                            </div>
                            <i class="fa-solid fa-hand-pointer text-white text-2xl"></i>
                        </button>
                    }
                }) }
            </div>
        </div>
    }
}
