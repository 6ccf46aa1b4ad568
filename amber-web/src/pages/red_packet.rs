use yew::prelude::*;

#[derive(Properties, Clone, PartialEq)]
pub struct RedPacketPageProps {
    /// The open animation is running; further taps are ignored.
    pub opening: bool,
    pub on_open: Callback<()>,
}

#[function_component(RedPacketPage)]
pub fn red_packet_page(props: &RedPacketPageProps) -> Html {
    let on_click = {
        let on_open = props.on_open.clone();
        let opening = props.opening;
        Callback::from(move |_: MouseEvent| {
            if !opening {
                on_open.emit(());
            }
        })
    };

    html! {
        <div class="fixed inset-0 bg-red-800 flex flex-col items-center justify-center z-40">
            <div class={classes!("relative", "w-72", "h-96", "bg-red-600", "rounded-3xl", "shadow-2xl", "flex", "flex-col", "items-center", props.opening.then_some("animate-shake"))}>
                <div class="mt-12 z-20 flex flex-col items-center text-yellow-100">
                    <h2 class="text-2xl font-bold mb-2 text-yellow-300 drop-shadow-md">{ "Amber PASS Gift" }</h2>
                    <p class="text-sm opacity-90">{ "You have a new reward!" }</p>
                </div>
                <button
                    class="absolute bottom-24 w-24 h-24 rounded-full bg-yellow-400 border-4 border-yellow-200 shadow-lg flex items-center justify-center group"
                    aria-label="Open reward"
                    disabled={props.opening}
                    onclick={on_click}
                >
                    <span class="text-4xl font-bold text-red-700 group-hover:rotate-12 transition-transform">{ "開" }</span>
                </button>
            </div>
        </div>
    }
}
