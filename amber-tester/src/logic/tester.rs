use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};

use amber_flow::{FlowEngine, StaticCatalogSource};

use crate::scenario::{ScenarioCtx, TestScenario};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub variant: String,
    pub seed: u64,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
}

pub struct LogicTester {
    engine: Arc<FlowEngine<StaticCatalogSource>>,
    verbose: bool,
}

impl LogicTester {
    pub const fn new(engine: Arc<FlowEngine<StaticCatalogSource>>, verbose: bool) -> Self {
        Self { engine, verbose }
    }

    pub async fn run_scenario(
        &self,
        scenario: &TestScenario,
        variant: &str,
        seeds: &[u64],
        iterations: usize,
    ) -> Vec<ScenarioResult> {
        let mut results = Vec::new();

        for &seed in seeds {
            if self.verbose {
                println!(
                    "🧪 Testing scenario: {} (variant: {} seed: {})",
                    scenario.key.bright_white(),
                    variant,
                    seed
                );
            }
            let iterations = scenario
                .max_iterations()
                .map_or(iterations, |cap| iterations.min(cap));
            results.push(
                self.run_single_scenario(scenario, variant, seed, iterations)
                    .await,
            );
        }

        results
    }

    async fn run_single_scenario(
        &self,
        scenario: &TestScenario,
        variant: &str,
        seed: u64,
        iterations: usize,
    ) -> ScenarioResult {
        let mut successes = 0;
        let mut failures = Vec::new();
        let mut performance_data = Vec::new();

        for i in 0..iterations {
            let ctx = ScenarioCtx {
                engine: Arc::clone(&self.engine),
                variant: variant.to_string(),
                seed: seed.wrapping_add(u64::try_from(i).unwrap_or(u64::MAX)),
                verbose: self.verbose,
            };
            let start_time = Instant::now();
            match scenario.run(&ctx).await {
                Ok(()) => {
                    successes += 1;
                    performance_data.push(start_time.elapsed());
                }
                Err(err) => {
                    let message = format!("Iteration {} (seed {}): {err:#}", i + 1, ctx.seed);
                    if self.verbose {
                        println!(
                            "  ❌ Iteration {}/{} failed: {}",
                            i + 1,
                            iterations,
                            message.clone().red()
                        );
                    }
                    failures.push(message);
                }
            }
        }

        let average_duration = if performance_data.is_empty() {
            Duration::ZERO
        } else {
            performance_data.iter().sum::<Duration>()
                / u32::try_from(performance_data.len()).unwrap_or(1)
        };

        ScenarioResult {
            scenario_name: format!("{} [{variant}]", scenario.key),
            variant: variant.to_string(),
            seed,
            passed: failures.is_empty(),
            iterations_run: iterations,
            successful_iterations: successes,
            failures,
            average_duration,
        }
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u128::deserialize(deserializer)?;
        Ok(Duration::from_millis(u64::try_from(millis).unwrap_or(0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::get_scenario;

    fn tester() -> LogicTester {
        LogicTester::new(
            Arc::new(FlowEngine::new(StaticCatalogSource).unwrap()),
            false,
        )
    }

    #[tokio::test]
    async fn runs_one_result_per_seed() {
        let scenario = get_scenario("end-to-end").unwrap();
        let results = tester()
            .run_scenario(&scenario, "reveal", &[1, 2, 3], 4)
            .await;
        assert_eq!(results.len(), 3);
        for result in &results {
            assert!(result.passed, "{:?}", result.failures);
            assert_eq!(result.successful_iterations, 4);
            assert_eq!(result.scenario_name, "end-to-end [reveal]");
        }
    }

    #[tokio::test]
    async fn unknown_variant_is_reported_as_failure() {
        let scenario = get_scenario("smoke").unwrap();
        let results = tester().run_scenario(&scenario, "bogus", &[1], 2).await;
        assert!(!results[0].passed);
        assert_eq!(results[0].failures.len(), 2);
        assert!(results[0].failures[0].contains("bogus"));
    }

    #[test]
    fn result_serializes_duration_as_millis() {
        let result = ScenarioResult {
            scenario_name: "smoke [wish-cards]".into(),
            variant: "wish-cards".into(),
            seed: 1,
            passed: true,
            iterations_run: 1,
            successful_iterations: 1,
            failures: Vec::new(),
            average_duration: Duration::from_millis(12),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["average_duration"], 12);
        let back: ScenarioResult = serde_json::from_value(json).unwrap();
        assert_eq!(back.average_duration, Duration::from_millis(12));
    }
}
