use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    pub delay_ms: u64,
    pub timeout_ms: u64,
    pub max_attempts: u32,
    pub backoff_ms: u64,
}

impl AnalysisConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }
}

/// Daily intake goals shown by the macro tracker.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct MacroGoals {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

impl Default for MacroGoals {
    fn default() -> Self {
        Self {
            calories: 2000.0,
            protein_g: 150.0,
            carbs_g: 250.0,
            fat_g: 67.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub analysis: AnalysisConfig,
    pub advice_delay_ms: u64,
    pub baseline_weight_kg: f64,
    pub macro_goals: MacroGoals,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let analysis = AnalysisConfig {
            delay_ms: env_or("ANALYSIS_DELAY_MS", 2000),
            timeout_ms: env_or("ANALYSIS_TIMEOUT_MS", 10_000),
            max_attempts: env_or("ANALYSIS_MAX_ATTEMPTS", 3),
            backoff_ms: env_or("ANALYSIS_BACKOFF_MS", 250),
        };
        if analysis.max_attempts == 0 {
            anyhow::bail!("ANALYSIS_MAX_ATTEMPTS must be at least 1");
        }

        let defaults = MacroGoals::default();
        let macro_goals = MacroGoals {
            calories: env_or("GOAL_CALORIES", defaults.calories),
            protein_g: env_or("GOAL_PROTEIN_G", defaults.protein_g),
            carbs_g: env_or("GOAL_CARBS_G", defaults.carbs_g),
            fat_g: env_or("GOAL_FAT_G", defaults.fat_g),
        };
        for (name, goal) in [
            ("GOAL_CALORIES", macro_goals.calories),
            ("GOAL_PROTEIN_G", macro_goals.protein_g),
            ("GOAL_CARBS_G", macro_goals.carbs_g),
            ("GOAL_FAT_G", macro_goals.fat_g),
        ] {
            if !(goal.is_finite() && goal > 0.0) {
                anyhow::bail!("{name} must be a positive number, got {goal}");
            }
        }

        let baseline_weight_kg: f64 = env_or("BASELINE_WEIGHT_KG", 75.2);
        if !(baseline_weight_kg.is_finite() && baseline_weight_kg > 0.0) {
            anyhow::bail!("BASELINE_WEIGHT_KG must be a positive number");
        }

        Ok(Self {
            host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env_or("APP_PORT", 8080),
            analysis,
            advice_delay_ms: env_or("ADVICE_DELAY_MS", 2000),
            baseline_weight_kg,
            macro_goals,
        })
    }

    pub fn advice_delay(&self) -> Duration {
        Duration::from_millis(self.advice_delay_ms)
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
