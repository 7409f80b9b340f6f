//! Bulk generation sweeps checking that every ladder maps players to
//! distinct end columns.
use sadari_game::{
    LadderConfig, MAX_PLAYERS, MIN_PLAYERS, generate, is_permutation, ladder_rng, resolve_all,
};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Cap on failure messages kept per player count.
const MAX_RECORDED_FAILURES: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResult {
    pub players: usize,
    pub passed: bool,
    pub trials_run: usize,
    pub successful_trials: usize,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
}

pub struct Verifier {
    cfg: LadderConfig,
    base_seed: u64,
}

impl Verifier {
    pub const fn new(cfg: LadderConfig, base_seed: u64) -> Self {
        Self { cfg, base_seed }
    }

    /// Run `trials` seeded ladders for every supported player count.
    pub fn run(&self, trials: usize) -> Vec<VerifyResult> {
        (MIN_PLAYERS..=MAX_PLAYERS)
            .map(|players| self.run_player_count(players, trials))
            .collect()
    }

    fn run_player_count(&self, players: usize, trials: usize) -> VerifyResult {
        log::info!("verifying {players} players over {trials} trials");

        let mut successes = 0;
        let mut failures = Vec::new();
        let mut total = Duration::ZERO;

        for trial in 0..trials {
            let seed = trial_seed(self.base_seed, players, trial);
            let started = Instant::now();
            let outcome = self.check_trial(players, seed);
            total += started.elapsed();

            match outcome {
                Ok(()) => successes += 1,
                Err(message) => {
                    log::warn!("{players} players, seed {seed}: {message}");
                    if failures.len() < MAX_RECORDED_FAILURES {
                        failures.push(format!("seed {seed}: {message}"));
                    }
                }
            }
        }

        let average_duration = if trials == 0 {
            Duration::ZERO
        } else {
            total / u32::try_from(trials).unwrap_or(u32::MAX)
        };

        VerifyResult {
            players,
            passed: successes == trials,
            trials_run: trials,
            successful_trials: successes,
            failures,
            average_duration,
        }
    }

    fn check_trial(&self, players: usize, seed: u64) -> Result<(), String> {
        let ladder =
            generate(players, &self.cfg, &mut ladder_rng(seed)).map_err(|e| e.to_string())?;
        ladder.check_invariants().map_err(|e| e.to_string())?;
        let end_columns = resolve_all(&ladder);
        if !is_permutation(&end_columns) {
            return Err(format!("end columns {end_columns:?} are not a permutation"));
        }
        Ok(())
    }
}

fn trial_seed(base_seed: u64, players: usize, trial: usize) -> u64 {
    base_seed
        .wrapping_add((players as u64) << 32)
        .wrapping_add(trial as u64)
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_micros().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let micros = u128::deserialize(deserializer)?;
        Ok(Duration::from_micros(u64::try_from(micros).unwrap_or(0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_passes_every_player_count() {
        let verifier = Verifier::new(LadderConfig::default(), 1337);
        let results = verifier.run(25);
        assert_eq!(results.len(), MAX_PLAYERS - MIN_PLAYERS + 1);
        assert_eq!(results[0].players, 2);
        for result in &results {
            assert!(result.passed, "{result:?}");
            assert_eq!(result.successful_trials, 25);
            assert!(result.failures.is_empty());
        }
    }

    #[test]
    fn zero_trials_pass_vacuously() {
        let verifier = Verifier::new(LadderConfig::default(), 0);
        let results = verifier.run(0);
        assert!(results.iter().all(|r| r.passed && r.trials_run == 0));
    }

    #[test]
    fn trial_seeds_are_distinct_per_player_count() {
        assert_ne!(trial_seed(5, 2, 0), trial_seed(5, 3, 0));
        assert_ne!(trial_seed(5, 2, 0), trial_seed(5, 2, 1));
    }

    #[test]
    fn results_serialize_durations_as_micros() {
        let result = VerifyResult {
            players: 4,
            passed: true,
            trials_run: 1,
            successful_trials: 1,
            failures: Vec::new(),
            average_duration: Duration::from_micros(42),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["average_duration"], 42);
        let back: VerifyResult = serde_json::from_value(json).unwrap();
        assert_eq!(back.average_duration, Duration::from_micros(42));
    }
}
