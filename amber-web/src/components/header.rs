use amber_flow::FlowConfig;
use yew::prelude::*;

/// Singular name of what one spend unit buys with.
#[must_use]
pub const fn balance_unit(config: &FlowConfig) -> &'static str {
    if config.spend_unit > 1 {
        "Cash"
    } else {
        "Wish Card"
    }
}

/// `amount` spend units, named for display.
#[must_use]
pub fn amount_label(config: &FlowConfig, amount: u32) -> String {
    let unit = balance_unit(config);
    if config.spend_unit > 1 || amount == 1 {
        unit.to_string()
    } else {
        format!("{unit}s")
    }
}

/// Heading over the balance on the home surface.
#[must_use]
pub const fn balance_label(config: &FlowConfig) -> &'static str {
    if config.spend_unit > 1 {
        "Cash Balance"
    } else {
        "My Wish Cards"
    }
}

#[derive(Properties, Clone, PartialEq, Eq)]
pub struct HeaderProps {
    pub balance: u32,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    html! {
        <header class="sticky top-0 z-40 bg-white/90 backdrop-blur px-4 py-3 flex items-center justify-between border-b border-gray-100">
            <div class="flex items-center space-x-2">
                <div class="w-8 h-8 rounded-full bg-gradient-to-br from-amber-400 to-orange-500 flex items-center justify-center text-white font-bold" aria-hidden="true">
                    <i class="fa-solid fa-gem text-xs"></i>
                </div>
                <span class="font-bold text-gray-800 tracking-tight">{ "Amber PASS" }</span>
            </div>
            <div class="flex items-center bg-purple-50 rounded-full px-3 py-1 space-x-1" aria-label="balance">
                <i class="fa-solid fa-ticket text-purple-600 text-xs"></i>
                <span class="text-xs font-bold" data-testid="header-balance">{ props.balance.to_string() }</span>
            </div>
        </header>
    }
}
