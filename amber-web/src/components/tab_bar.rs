use amber_flow::TabId;
use yew::prelude::*;

/// Display name and icon for a home tab.
#[must_use]
pub fn tab_label(tab: &TabId) -> (&str, &'static str) {
    match tab.as_str() {
        TabId::WISHES => ("0 Yuan Wish", "fa-wand-magic-sparkles"),
        TabId::MERCHANTS => ("Merchants", "fa-store"),
        TabId::GOD_COUPONS => ("God Coupons", "fa-ticket-simple"),
        other => (other, "fa-circle"),
    }
}

#[derive(Properties, Clone, PartialEq)]
pub struct TabBarProps {
    pub tabs: Vec<TabId>,
    pub active: TabId,
    pub on_select: Callback<String>,
}

#[function_component(TabBar)]
pub fn tab_bar(props: &TabBarProps) -> Html {
    html! {
        <nav class="fixed bottom-0 inset-x-0 max-w-md mx-auto bg-white border-t border-gray-200 flex justify-around py-2" role="tablist">
            { for props.tabs.iter().map(|tab| {
                let selected = *tab == props.active;
                let (label, icon) = tab_label(tab);
                let on_click = {
                    let on_select = props.on_select.clone();
                    let id = tab.to_string();
                    Callback::from(move |_: MouseEvent| on_select.emit(id.clone()))
                };
                html! {
                    <button
                        class={classes!("flex", "flex-col", "items-center", "space-y-1", if selected { "text-purple-600" } else { "text-gray-400" })}
                        role="tab"
                        aria-selected={selected.to_string()}
                        data-tab={tab.to_string()}
                        onclick={on_click}
                    >
                        <i class={classes!("fa-solid", icon, "text-xl")}></i>
                        <span class="text-[10px] font-bold">{ label.to_string() }</span>
                    </button>
                }
            }) }
        </nav>
    }
}
