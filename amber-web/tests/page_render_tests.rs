use std::sync::Arc;

use amber_flow::{Catalog, Dismissal, Investment, ParticipationLedger, TabId};
use amber_web::app::Notice;
use amber_web::components::notice::{NoticeToast, NoticeToastProps};
use amber_web::pages::{
    claim_success::{ClaimSuccessPage, ClaimSuccessPageProps},
    coupon_choice::{CouponChoicePage, CouponChoicePageProps},
    home::{HomePage, HomePageProps},
    red_packet::{RedPacketPage, RedPacketPageProps},
    reveal::{RevealPage, RevealPageProps},
    splash::SplashPage,
    unavailable::{Props as UnavailableProps, Unavailable},
};
use futures::executor::block_on;
use yew::{Callback, LocalServerRenderer};

fn catalog() -> Arc<Catalog> {
    Arc::new(Catalog::load_from_static().unwrap())
}

fn tabs() -> Vec<TabId> {
    [TabId::WISHES, TabId::MERCHANTS, TabId::GOD_COUPONS]
        .into_iter()
        .map(TabId::from)
        .collect()
}

fn home_props(active: &str, balance: u32) -> HomePageProps {
    HomePageProps {
        balance,
        balance_label: "My Wish Cards".into(),
        can_invest: balance > 0,
        tabs: tabs(),
        active_tab: active.into(),
        catalog: catalog(),
        ledger: ParticipationLedger::new(),
        on_select_tab: Callback::noop(),
        on_invest: Callback::noop(),
    }
}

fn render_home(active: &str, balance: u32) -> String {
    let renderer = LocalServerRenderer::<HomePage>::with_props(home_props(active, balance));
    block_on(renderer.render())
}

#[test]
fn splash_page_shows_brand() {
    let html = block_on(LocalServerRenderer::<SplashPage>::new().render());
    assert!(html.contains("AMBER"));
    assert!(html.contains("NFC DETECTED"));
}

#[test]
fn red_packet_disables_button_while_opening() {
    let idle = block_on(
        LocalServerRenderer::<RedPacketPage>::with_props(RedPacketPageProps {
            opening: false,
            on_open: Callback::noop(),
        })
        .render(),
    );
    assert!(idle.contains("Amber PASS Gift"));
    assert!(!idle.contains("disabled"));

    let opening = block_on(
        LocalServerRenderer::<RedPacketPage>::with_props(RedPacketPageProps {
            opening: true,
            on_open: Callback::noop(),
        })
        .render(),
    );
    assert!(opening.contains("disabled"));
    assert!(opening.contains("animate-shake"));
}

#[test]
fn reveal_page_shows_granted_amount() {
    let html = block_on(
        LocalServerRenderer::<RevealPage>::with_props(RevealPageProps {
            amount: 888,
            unit_label: "Cash".into(),
            on_proceed: Callback::noop(),
        })
        .render(),
    );
    assert!(html.contains("888"));
    assert!(html.contains("Cash"));
}

#[test]
fn coupon_choice_lists_both_offers() {
    let offers = catalog().coupon_offers.clone();
    let html = block_on(
        LocalServerRenderer::<CouponChoicePage>::with_props(CouponChoicePageProps {
            offers,
            on_choose: Callback::noop(),
        })
        .render(),
    );
    assert!(html.contains("Choose Your Reward"));
    assert!(html.contains("50% OFF"));
    assert!(html.contains("FREE CAKE"));
    assert!(html.contains("data-offer=\"c1\""));
    assert!(html.contains("data-offer=\"c2\""));
}

#[test]
fn claim_success_names_the_coupon() {
    let coupon = catalog().find_coupon("c2").cloned();
    let html = block_on(
        LocalServerRenderer::<ClaimSuccessPage>::with_props(ClaimSuccessPageProps {
            coupon,
            on_dismiss: Callback::from(|_: Dismissal| {}),
        })
        .render(),
    );
    assert!(html.contains("Claimed!"));
    assert!(html.contains("FREE CAKE"));
    assert!(html.contains("Continue"));
}

#[test]
fn home_wishes_tab_shows_progress_and_balance() {
    let html = render_home(TabId::WISHES, 5);
    assert!(html.contains("0 Yuan Wishes"));
    assert!(html.contains("My Wish Cards"));
    assert!(html.contains("342/500"));
    assert!(html.contains("value=\"68\""));
    assert!(html.contains("data-active-tab=\"WISHES\""));
}

#[test]
fn home_reflects_session_contributions() {
    let mut props = home_props(TabId::WISHES, 4);
    props.ledger.record(&Investment {
        target_id: "1".into(),
        units: 1,
    });
    let html = block_on(LocalServerRenderer::<HomePage>::with_props(props).render());
    assert!(html.contains("343/500"));
    assert!(html.contains("121 joined"));
}

#[test]
fn home_without_balance_disables_invest() {
    let funded = render_home(TabId::WISHES, 5);
    let empty = render_home(TabId::WISHES, 0);
    assert!(empty.matches("disabled").count() > funded.matches("disabled").count());
}

#[test]
fn home_merchants_and_coupon_tabs_render_their_lists() {
    let merchants = render_home(TabId::MERCHANTS, 5);
    assert!(merchants.contains("Nearby Merchants"));
    assert!(!merchants.contains("0 Yuan Wishes"));

    let coupons = render_home(TabId::GOD_COUPONS, 5);
    assert!(coupons.contains("God Mode"));
    assert!(coupons.contains("Only 5 left"));
    assert!(coupons.contains("Only 12 left"));
}

#[test]
fn notice_toast_renders_only_with_a_notice() {
    let empty = block_on(
        LocalServerRenderer::<NoticeToast>::with_props(NoticeToastProps {
            notice: None,
            on_dismiss: Callback::noop(),
        })
        .render(),
    );
    assert!(!empty.contains("alert"));

    let info = block_on(
        LocalServerRenderer::<NoticeToast>::with_props(NoticeToastProps {
            notice: Some(Notice::Info("Invested 1 Wish Card! Good luck!".into())),
            on_dismiss: Callback::noop(),
        })
        .render(),
    );
    assert!(info.contains("alert-success"));
    assert!(info.contains("Good luck!"));
}

#[test]
fn unavailable_page_shows_reason() {
    let html = block_on(
        LocalServerRenderer::<Unavailable>::with_props(UnavailableProps {
            reason: "catalog unavailable".into(),
        })
        .render(),
    );
    assert!(html.contains("catalog unavailable"));
}
