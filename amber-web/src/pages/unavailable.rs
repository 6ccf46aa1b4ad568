use yew::prelude::*;

#[derive(Properties, Clone, PartialEq, Eq)]
pub struct Props {
    pub reason: AttrValue,
}

#[function_component(Unavailable)]
pub fn unavailable(props: &Props) -> Html {
    html! {
        <main class="min-h-screen flex flex-col items-center justify-center p-6 text-center">
            <h1 class="text-2xl font-bold">{ "Amber PASS is unavailable" }</h1>
            <p class="text-gray-500 mt-2">{ props.reason.to_string() }</p>
        </main>
    }
}
