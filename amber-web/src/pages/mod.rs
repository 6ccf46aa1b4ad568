pub mod claim_success;
pub mod coupon_choice;
pub mod home;
pub mod red_packet;
pub mod reveal;
pub mod splash;
pub mod unavailable;
