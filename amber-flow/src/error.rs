//! Error taxonomy for the flow core.
use thiserror::Error;

use crate::stage::{FlowStage, TriggerKind};

/// A rejected flow operation. Raised before any state is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("{trigger} is not accepted while the flow is at {stage}")]
    InvalidTransition {
        stage: FlowStage,
        trigger: TriggerKind,
    },
    #[error("balance {balance} is below the spend unit {required}")]
    InsufficientBalance { balance: u32, required: u32 },
    #[error("unknown tab '{0}'")]
    UnknownTab(String),
    #[error("coupon already selected ('{existing}')")]
    DuplicateSelection { existing: String },
    #[error("coupon '{0}' is not one of the offered coupons")]
    UnknownCoupon(String),
    #[error("no wish with id '{0}' in the catalog")]
    UnknownTarget(String),
    #[error("session has been closed")]
    SessionClosed,
}

/// Catalog data failed to parse or violates a catalog invariant.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate {collection} id '{id}'")]
    DuplicateId {
        collection: &'static str,
        id: String,
    },
    #[error("{collection} '{id}' needs a positive total (got 0)")]
    ZeroTotal {
        collection: &'static str,
        id: String,
    },
    #[error("coupon '{id}' price {price_cents} must be within 0..={original_price_cents}")]
    InvalidPrice {
        id: String,
        price_cents: i64,
        original_price_cents: i64,
    },
    #[error("expected exactly 2 coupon offers (got {0})")]
    CouponOfferCount(usize),
}

/// Flow configuration failed to parse or is out of bounds.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown flow variant '{0}'")]
    UnknownVariant(String),
    #[error("{field} must be positive in variant '{variant}'")]
    NotPositive {
        variant: String,
        field: &'static str,
    },
    #[error("variant '{0}' has no tabs")]
    EmptyTabSet(String),
    #[error("variant '{variant}' lists tab '{tab}' twice")]
    DuplicateTab { variant: String, tab: String },
    #[error("splash delay {delay_ms}ms in variant '{variant}' is outside {min}..={max}ms")]
    SplashDelayOutOfRange {
        variant: String,
        delay_ms: u64,
        min: u64,
        max: u64,
    },
}
