use yew::prelude::*;

#[function_component(SplashPage)]
pub fn splash_page() -> Html {
    html! {
        <div class="fixed inset-0 bg-gray-900 flex flex-col items-center justify-center z-50 text-white" aria-busy="true" aria-live="polite">
            <div class="w-64 h-40 rounded-2xl bg-gradient-to-br from-amber-400 via-yellow-500 to-orange-600 shadow-2xl flex items-center justify-center">
                <div class="text-center">
                    <i class="fa-solid fa-gem text-6xl text-white drop-shadow-lg animate-float mb-4"></i>
                    <h1 class="text-2xl font-bold font-serif tracking-widest text-white">{ "AMBER" }</h1>
                    <p class="text-xs tracking-[0.3em] uppercase opacity-80 mt-1">{ "Pass Card" }</p>
                </div>
            </div>
            <p class="mt-8 text-yellow-500 font-mono animate-pulse">{ "NFC DETECTED..." }</p>
        </div>
    }
}
