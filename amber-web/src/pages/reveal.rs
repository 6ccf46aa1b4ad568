use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct RevealPageProps {
    pub amount: u32,
    pub unit_label: AttrValue,
    pub on_proceed: Callback<()>,
}

#[function_component(RevealPage)]
pub fn reveal_page(props: &RevealPageProps) -> Html {
    let on_click = {
        let on_proceed = props.on_proceed.clone();
        Callback::from(move |_: MouseEvent| on_proceed.emit(()))
    };
    html! {
        <div class="fixed inset-0 bg-red-800 flex flex-col items-center justify-center z-40 text-yellow-100">
            <p class="text-sm uppercase tracking-widest opacity-80">{ "You received" }</p>
            <p class="text-6xl font-black text-yellow-300 my-4" data-testid="reveal-amount">{ props.amount.to_string() }</p>
            <p class="text-lg">{ props.unit_label.to_string() }</p>
            <button class="btn btn-warning mt-10" onclick={on_click}>{ "Choose your reward" }</button>
        </div>
    }
}
