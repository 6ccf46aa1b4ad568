//! Amber PASS flow engine
//!
//! Platform-agnostic core of the Amber PASS reward flow: splash, red packet,
//! forced coupon choice and the tabbed home surface. This crate owns the
//! session state machine and the read-only catalog types, without UI or
//! platform-specific dependencies.

pub mod catalog;
pub mod config;
pub mod display;
pub mod error;
pub mod flow;
pub mod ledger;
pub mod session;
pub mod stage;
pub mod tabs;

#[cfg(feature = "async")]
pub mod actor;

use std::sync::Arc;

// Re-export commonly used types
#[cfg(feature = "async")]
pub use actor::{FlowActor, FlowHandle};
pub use catalog::{
    COUPON_OFFER_COUNT, Catalog, CouponOffer, FeedItem, FeedStatus, Merchant, WishItem,
};
pub use config::{DEFAULT_VARIANT, FlowConfig, FlowConfigSet};
pub use display::{progress_percent, remaining};
pub use error::{CatalogError, ConfigError, FlowError};
pub use flow::{FlowMachine, Investment, TransitionOutcome};
pub use ledger::ParticipationLedger;
pub use session::SessionState;
pub use stage::{Dismissal, FlowStage, Trigger, TriggerKind};
pub use tabs::{TabId, TabRouter, TabSet};

/// Trait for abstracting where catalog and flow configuration come from.
/// Platform-specific implementations should provide this
pub trait CatalogSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the reward catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    fn load_catalog(&self) -> Result<Catalog, Self::Error>;

    /// Load the set of flow variants.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or parsed.
    fn load_flow_configs(&self) -> Result<FlowConfigSet, Self::Error>;
}

/// Catalog source backed by the JSON embedded in this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticCatalogSource;

/// Loading error for [`StaticCatalogSource`].
#[derive(Debug, thiserror::Error)]
pub enum StaticSourceError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl CatalogSource for StaticCatalogSource {
    type Error = StaticSourceError;

    fn load_catalog(&self) -> Result<Catalog, Self::Error> {
        Ok(Catalog::load_from_static()?)
    }

    fn load_flow_configs(&self) -> Result<FlowConfigSet, Self::Error> {
        Ok(FlowConfigSet::load_from_static()?)
    }
}

/// Failure to start a session.
#[derive(Debug, thiserror::Error)]
pub enum StartError<E: std::error::Error + 'static> {
    #[error("catalog source failed: {0}")]
    Source(#[source] E),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Starts sessions from a catalog source, sharing one validated catalog.
pub struct FlowEngine<S>
where
    S: CatalogSource,
{
    source: S,
    catalog: Arc<Catalog>,
    configs: FlowConfigSet,
}

impl<S> FlowEngine<S>
where
    S: CatalogSource,
{
    /// Load and validate catalog and configuration from `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails or the loaded data is invalid.
    pub fn new(source: S) -> Result<Self, StartError<S::Error>> {
        let catalog = source.load_catalog().map_err(StartError::Source)?;
        catalog.validate()?;
        let configs = source.load_flow_configs().map_err(StartError::Source)?;
        for config in &configs.variants {
            config.validate()?;
        }
        configs.default_config()?;
        log::debug!(
            "flow engine ready: {} wishes, {} variants",
            catalog.wishes.len(),
            configs.variants.len()
        );
        Ok(Self {
            source,
            catalog: Arc::new(catalog),
            configs,
        })
    }

    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub const fn configs(&self) -> &FlowConfigSet {
        &self.configs
    }

    /// Start a fresh session for `variant` (the default variant when `None`).
    ///
    /// # Errors
    ///
    /// Returns an error if the variant is unknown.
    pub fn start_session(&self, variant: Option<&str>) -> Result<FlowMachine, ConfigError> {
        let config = match variant {
            Some(name) => self.configs.get(name)?,
            None => self.configs.default_config()?,
        };
        FlowMachine::new(config.clone(), self.catalog())
    }
}
