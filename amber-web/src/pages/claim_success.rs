use amber_flow::{CouponOffer, Dismissal};
use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct ClaimSuccessPageProps {
    #[prop_or_default]
    pub coupon: Option<CouponOffer>,
    pub on_dismiss: Callback<Dismissal>,
}

#[function_component(ClaimSuccessPage)]
pub fn claim_success_page(props: &ClaimSuccessPageProps) -> Html {
    let dismiss_with = |dismissal: Dismissal| {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_: MouseEvent| on_dismiss.emit(dismissal))
    };
    let title = props
        .coupon
        .as_ref()
        .map_or_else(|| "Your coupon".to_string(), |c| c.title.clone());

    html! {
        <div class="fixed inset-0 bg-black/70 flex items-center justify-center z-40 px-6" role="dialog" aria-modal="true">
            <div class="bg-white rounded-2xl p-6 w-full text-center relative">
                <button class="btn btn-sm btn-circle btn-ghost absolute right-2 top-2" aria-label="Close" onclick={dismiss_with(Dismissal::Close)}>
                    { "✕" }
                </button>
                <i class="fa-solid fa-circle-check text-5xl text-green-500"></i>
                <h2 class="text-xl font-bold mt-4">{ "Claimed!" }</h2>
                <p class="text-gray-600 mt-2">{ format!("{title} is now in your wallet.") }</p>
                <button class="btn btn-primary w-full mt-6" onclick={dismiss_with(Dismissal::Continue)}>
                    { "Continue" }
                </button>
            </div>
        </div>
    }
}
