use std::sync::Arc;

use amber_flow::{Catalog, ParticipationLedger, TabId};
use yew::prelude::*;

use crate::components::feed_card::FeedCard;
use crate::components::header::Header;
use crate::components::merchant_card::MerchantCard;
use crate::components::tab_bar::TabBar;
use crate::components::wish_card::WishCard;

#[derive(Properties, Clone, PartialEq)]
pub struct HomePageProps {
    pub balance: u32,
    pub balance_label: AttrValue,
    pub can_invest: bool,
    pub tabs: Vec<TabId>,
    pub active_tab: TabId,
    pub catalog: Arc<Catalog>,
    #[prop_or_default]
    pub ledger: ParticipationLedger,
    pub on_select_tab: Callback<String>,
    pub on_invest: Callback<String>,
}

fn wishes_tab(props: &HomePageProps) -> Html {
    html! {
        <section class="space-y-4">
            <div class="bg-gradient-to-r from-purple-600 to-blue-600 rounded-2xl p-4 text-white shadow-lg">
                <p class="text-sm opacity-80">{ props.balance_label.to_string() }</p>
                <p class="text-3xl font-bold" data-testid="wish-balance">{ props.balance.to_string() }</p>
            </div>
            <h3 class="text-lg font-bold text-gray-800 border-l-4 border-purple-600 pl-3">{ "0 Yuan Wishes" }</h3>
            { for props.catalog.wishes.iter().map(|wish| html! {
                <WishCard
                    wish={wish.clone()}
                    current={props.ledger.effective_current(wish)}
                    participants={props.ledger.effective_participants(wish)}
                    progress={props.ledger.effective_progress(wish)}
                    can_invest={props.can_invest}
                    on_invest={props.on_invest.clone()}
                />
            }) }
        </section>
    }
}

fn merchants_tab(catalog: &Catalog) -> Html {
    html! {
        <section class="space-y-4">
            <h3 class="text-lg font-bold text-gray-800 border-l-4 border-blue-600 pl-3">{ "Nearby Merchants" }</h3>
            { for catalog.merchants.iter().map(|merchant| html! {
                <MerchantCard merchant={merchant.clone()} />
            }) }
        </section>
    }
}

fn god_coupons_tab(catalog: &Catalog) -> Html {
    html! {
        <section class="space-y-4">
            <div class="bg-gradient-to-r from-yellow-500 to-amber-600 rounded-2xl p-6 text-white text-center shadow-lg">
                <h2 class="text-2xl font-black uppercase tracking-widest mb-1">{ "God Mode" }</h2>
                <p class="opacity-90 text-sm">{ "Exclusive Ultra-High Value Coupons" }</p>
            </div>
            { for catalog.feed.iter().map(|item| html! {
                <FeedCard item={item.clone()} />
            }) }
        </section>
    }
}

#[function_component(HomePage)]
pub fn home_page(props: &HomePageProps) -> Html {
    let content = match props.active_tab.as_str() {
        TabId::MERCHANTS => merchants_tab(&props.catalog),
        TabId::GOD_COUPONS => god_coupons_tab(&props.catalog),
        _ => wishes_tab(props),
    };

    html! {
        <div class="min-h-screen bg-gray-50 text-gray-900 font-sans max-w-md mx-auto relative pb-20">
            <Header balance={props.balance} />
            <main class="p-4" role="tabpanel" data-active-tab={props.active_tab.to_string()}>
                { content }
            </main>
            <TabBar
                tabs={props.tabs.clone()}
                active={props.active_tab.clone()}
                on_select={props.on_select_tab.clone()}
            />
        </div>
    }
}
