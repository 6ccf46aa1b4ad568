use std::sync::Arc;

use amber_flow::{FlowEngine, FlowMachine, StaticCatalogSource};
use anyhow::Result;

pub mod flow;
pub mod random_walk;
pub mod timed;

/// Everything one scenario iteration needs.
#[derive(Clone)]
pub struct ScenarioCtx {
    pub engine: Arc<FlowEngine<StaticCatalogSource>>,
    pub variant: String,
    pub seed: u64,
    pub verbose: bool,
}

impl ScenarioCtx {
    /// Fresh session for this context's variant.
    pub fn session(&self) -> Result<FlowMachine> {
        Ok(self.engine.start_session(Some(&self.variant))?)
    }
}

type SyncCheck = fn(&ScenarioCtx) -> Result<()>;

#[derive(Clone, Copy)]
pub enum ScenarioCheck {
    Sync(SyncCheck),
    /// Runs against a live actor and its real splash timer.
    Timed,
}

#[derive(Clone, Copy)]
pub struct TestScenario {
    pub key: &'static str,
    pub description: &'static str,
    check: ScenarioCheck,
}

impl TestScenario {
    const fn sync(key: &'static str, description: &'static str, check: SyncCheck) -> Self {
        Self {
            key,
            description,
            check: ScenarioCheck::Sync(check),
        }
    }

    /// Timed scenarios wait on wall-clock delays, so one pass per seed is enough.
    #[must_use]
    pub const fn max_iterations(&self) -> Option<usize> {
        match self.check {
            ScenarioCheck::Sync(_) => None,
            ScenarioCheck::Timed => Some(1),
        }
    }

    pub async fn run(&self, ctx: &ScenarioCtx) -> Result<()> {
        match self.check {
            ScenarioCheck::Sync(check) => check(ctx),
            ScenarioCheck::Timed => timed::splash_then_full_flow(ctx).await,
        }
    }
}

const SCENARIOS: &[TestScenario] = &[
    TestScenario::sync("smoke", "Start a session and leave the splash", flow::smoke),
    TestScenario::sync(
        "end-to-end",
        "Walk the variant's whole stage path and invest once",
        flow::end_to_end,
    ),
    TestScenario::sync(
        "grant-once",
        "Repeated open attempts credit the grant exactly once",
        flow::grant_once,
    ),
    TestScenario::sync(
        "duplicate-selection",
        "A second coupon choice is rejected without side effects",
        flow::duplicate_selection,
    ),
    TestScenario::sync(
        "balance-floor",
        "Spend until empty; the balance never goes below zero",
        flow::balance_floor,
    ),
    TestScenario::sync(
        "tab-routing",
        "Tab selection switches content and rejects unknown tabs",
        flow::tab_routing,
    ),
    TestScenario::sync(
        "forward-only",
        "No trigger moves the stage backwards or out of Home",
        flow::forward_only,
    ),
    TestScenario::sync(
        "random-walk",
        "Seeded random trigger sequences keep every invariant",
        random_walk::run,
    ),
    TestScenario {
        key: "timed-splash",
        description: "Actor-driven session with the real splash timer",
        check: ScenarioCheck::Timed,
    },
];

#[must_use]
pub fn get_scenario(key: &str) -> Option<TestScenario> {
    SCENARIOS.iter().find(|s| s.key == key).copied()
}

#[must_use]
pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    SCENARIOS.iter().map(|s| (s.key, s.description)).collect()
}

#[must_use]
pub fn scenario_keys() -> Vec<String> {
    SCENARIOS.iter().map(|s| s.key.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn scenario_keys_are_unique_and_listed() {
        let keys: HashSet<_> = SCENARIOS.iter().map(|s| s.key).collect();
        assert_eq!(keys.len(), SCENARIOS.len());
        assert_eq!(list_scenarios().len(), SCENARIOS.len());
        assert!(get_scenario("smoke").is_some());
        assert!(get_scenario("nope").is_none());
    }

    #[test]
    fn only_timed_scenarios_cap_iterations() {
        assert_eq!(get_scenario("timed-splash").unwrap().max_iterations(), Some(1));
        assert_eq!(get_scenario("random-walk").unwrap().max_iterations(), None);
    }
}
