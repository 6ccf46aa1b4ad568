pub mod feed_card;
pub mod header;
pub mod merchant_card;
pub mod notice;
pub mod tab_bar;
pub mod wish_card;
