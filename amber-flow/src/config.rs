//! Flow variants as configuration.
//!
//! The wish-card flow, the reveal flow and the cash-claim flow differ only in
//! these knobs; one machine runs all of them.
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

use crate::error::ConfigError;
use crate::stage::FlowStage;
use crate::tabs::{TabId, TabSet};

pub const SPLASH_DELAY_MIN_MS: u64 = 1_500;
pub const SPLASH_DELAY_MAX_MS: u64 = 2_500;
pub const DEFAULT_VARIANT: &str = "wish-cards";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowConfig {
    pub variant: String,
    /// Units credited once when the reward is opened.
    pub grant_amount: u32,
    /// Units consumed per investment.
    #[serde(default = "default_spend_unit")]
    pub spend_unit: u32,
    #[serde(default)]
    pub has_reveal_stage: bool,
    #[serde(default)]
    pub has_success_stage: bool,
    pub tab_set: TabSet,
    #[serde(default = "default_splash_delay_ms")]
    pub splash_delay_ms: u64,
    /// Length of the red-packet opening animation before the grant is applied.
    #[serde(default)]
    pub open_animation_ms: u64,
}

const fn default_spend_unit() -> u32 {
    1
}

const fn default_splash_delay_ms() -> u64 {
    SPLASH_DELAY_MAX_MS
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            variant: DEFAULT_VARIANT.to_string(),
            grant_amount: 5,
            spend_unit: 1,
            has_reveal_stage: false,
            has_success_stage: false,
            tab_set: [TabId::WISHES, TabId::MERCHANTS, TabId::GOD_COUPONS]
                .into_iter()
                .map(TabId::from)
                .collect(),
            splash_delay_ms: SPLASH_DELAY_MAX_MS,
            open_animation_ms: 1_500,
        }
    }
}

impl FlowConfig {
    #[must_use]
    pub const fn splash_delay(&self) -> Duration {
        Duration::from_millis(self.splash_delay_ms)
    }

    #[must_use]
    pub const fn open_animation(&self) -> Duration {
        Duration::from_millis(self.open_animation_ms)
    }

    #[must_use]
    pub fn default_tab(&self) -> Option<&TabId> {
        self.tab_set.first()
    }

    /// Stage entered once the reward has been opened.
    #[must_use]
    pub const fn stage_after_open(&self) -> FlowStage {
        if self.has_reveal_stage {
            FlowStage::RewardRevealed
        } else {
            FlowStage::CouponChoice
        }
    }

    /// Stage entered once a coupon has been chosen.
    #[must_use]
    pub const fn stage_after_choice(&self) -> FlowStage {
        if self.has_success_stage {
            FlowStage::ClaimSuccess
        } else {
            FlowStage::Home
        }
    }

    /// The stages this variant visits, in order.
    #[must_use]
    pub fn stage_path(&self) -> Vec<FlowStage> {
        FlowStage::ALL
            .into_iter()
            .filter(|stage| match stage {
                FlowStage::RewardRevealed => self.has_reveal_stage,
                FlowStage::ClaimSuccess => self.has_success_stage,
                _ => true,
            })
            .collect()
    }

    /// # Errors
    ///
    /// Returns an error when an amount is zero, the tab set is empty or has
    /// duplicates, or the splash delay falls outside the allowed window.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grant_amount == 0 {
            return Err(self.not_positive("grant_amount"));
        }
        if self.spend_unit == 0 {
            return Err(self.not_positive("spend_unit"));
        }
        if self.tab_set.is_empty() {
            return Err(ConfigError::EmptyTabSet(self.variant.clone()));
        }
        let mut seen = HashSet::new();
        for tab in &self.tab_set {
            if !seen.insert(tab) {
                return Err(ConfigError::DuplicateTab {
                    variant: self.variant.clone(),
                    tab: tab.to_string(),
                });
            }
        }
        if !(SPLASH_DELAY_MIN_MS..=SPLASH_DELAY_MAX_MS).contains(&self.splash_delay_ms) {
            return Err(ConfigError::SplashDelayOutOfRange {
                variant: self.variant.clone(),
                delay_ms: self.splash_delay_ms,
                min: SPLASH_DELAY_MIN_MS,
                max: SPLASH_DELAY_MAX_MS,
            });
        }
        Ok(())
    }

    fn not_positive(&self, field: &'static str) -> ConfigError {
        ConfigError::NotPositive {
            variant: self.variant.clone(),
            field,
        }
    }
}

/// All known flow variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowConfigSet {
    #[serde(default = "default_variant_name")]
    pub default_variant: String,
    pub variants: Vec<FlowConfig>,
}

fn default_variant_name() -> String {
    DEFAULT_VARIANT.to_string()
}

impl Default for FlowConfigSet {
    fn default() -> Self {
        Self {
            default_variant: default_variant_name(),
            variants: vec![FlowConfig::default()],
        }
    }
}

impl FlowConfigSet {
    /// Parse and validate every variant.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, a variant is invalid, or the
    /// default variant is missing.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let set: Self = serde_json::from_str(json)?;
        for variant in &set.variants {
            variant.validate()?;
        }
        set.get(&set.default_variant)?;
        Ok(set)
    }

    /// Load the variants embedded with the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded data is malformed.
    pub fn load_from_static() -> Result<Self, ConfigError> {
        Self::from_json(include_str!("../data/flows.json"))
    }

    /// # Errors
    ///
    /// Returns `ConfigError::UnknownVariant` if no variant carries `name`.
    pub fn get(&self, name: &str) -> Result<&FlowConfig, ConfigError> {
        self.variants
            .iter()
            .find(|cfg| cfg.variant == name)
            .ok_or_else(|| ConfigError::UnknownVariant(name.to_string()))
    }

    /// # Errors
    ///
    /// Returns `ConfigError::UnknownVariant` if the default variant is missing.
    pub fn default_config(&self) -> Result<&FlowConfig, ConfigError> {
        self.get(&self.default_variant)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(|cfg| cfg.variant.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_variants_load_and_validate() {
        let set = FlowConfigSet::load_from_static().unwrap();
        let names: Vec<_> = set.names().collect();
        assert_eq!(names, vec!["wish-cards", "reveal", "cash-claim"]);

        let base = set.default_config().unwrap();
        assert_eq!(base.grant_amount, 5);
        assert_eq!(base.splash_delay(), Duration::from_millis(2_500));
        assert_eq!(base.open_animation(), Duration::from_millis(1_500));
        assert_eq!(base.default_tab().unwrap(), &"WISHES");

        let cash = set.get("cash-claim").unwrap();
        assert!(cash.has_reveal_stage && cash.has_success_stage);
        assert_eq!(cash.spend_unit, 100);
    }

    #[test]
    fn stage_paths_follow_variant_shape() {
        let set = FlowConfigSet::load_from_static().unwrap();
        assert_eq!(
            set.get("wish-cards").unwrap().stage_path(),
            vec![
                FlowStage::Splash,
                FlowStage::RewardCover,
                FlowStage::CouponChoice,
                FlowStage::Home
            ]
        );
        assert_eq!(set.get("cash-claim").unwrap().stage_path(), FlowStage::ALL);
        let reveal = set.get("reveal").unwrap();
        assert_eq!(reveal.stage_after_open(), FlowStage::RewardRevealed);
        assert_eq!(reveal.stage_after_choice(), FlowStage::Home);
    }

    #[test]
    fn validate_rejects_out_of_bounds_values() {
        let mut cfg = FlowConfig::default();
        cfg.grant_amount = 0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NotPositive { field: "grant_amount", .. })
        ));

        let mut cfg = FlowConfig::default();
        cfg.splash_delay_ms = 100;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::SplashDelayOutOfRange { delay_ms: 100, .. })
        ));

        let mut cfg = FlowConfig::default();
        cfg.tab_set.push(TabId::from(TabId::WISHES));
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::DuplicateTab { .. })
        ));

        let mut cfg = FlowConfig::default();
        cfg.tab_set.clear();
        assert!(matches!(cfg.validate(), Err(ConfigError::EmptyTabSet(_))));
    }

    #[test]
    fn unknown_variant_is_reported() {
        let set = FlowConfigSet::default();
        assert!(matches!(
            set.get("lottery"),
            Err(ConfigError::UnknownVariant(name)) if name == "lottery"
        ));
        let missing_default = r#"{ "default_variant": "nope", "variants": [] }"#;
        assert!(FlowConfigSet::from_json(missing_default).is_err());
    }
}
