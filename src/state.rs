use crate::advice::{AdviceGenerator, AdviceStore, TemplateAdvisor};
use crate::analysis::{FoodAnalyzer, PhotoAnalysisSession, StubAnalyzer};
use crate::config::{AnalysisConfig, AppConfig, MacroGoals};
use crate::food::FoodLog;
use crate::profile::ProfileModel;
use crate::progress::ProgressSnapshot;
use crate::tabs::TabController;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Everything the handlers share. Cloning is cheap; all stores sit behind
/// `Arc`ed locks.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub profile: Arc<RwLock<ProfileModel>>,
    pub food: Arc<RwLock<FoodLog>>,
    pub advice: Arc<RwLock<AdviceStore>>,
    pub tabs: Arc<RwLock<TabController>>,
    /// Lock before `food` when both are needed.
    pub photo: Arc<Mutex<PhotoAnalysisSession>>,
    pub analyzer: Arc<dyn FoodAnalyzer>,
    pub advisor: Arc<dyn AdviceGenerator>,
    pub progress: Arc<ProgressSnapshot>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;
        Ok(Self::from_config(config))
    }

    /// Seeded stores plus the stub analyzer and template advisor, using the
    /// delays from `config`.
    pub fn from_config(config: AppConfig) -> Self {
        let analyzer = Arc::new(StubAnalyzer::new(config.analysis.delay())) as Arc<dyn FoodAnalyzer>;
        let advisor = Arc::new(TemplateAdvisor::new(config.advice_delay())) as Arc<dyn AdviceGenerator>;

        Self {
            config: Arc::new(config),
            profile: Arc::new(RwLock::new(ProfileModel::default())),
            food: Arc::new(RwLock::new(FoodLog::default())),
            advice: Arc::new(RwLock::new(AdviceStore::default())),
            tabs: Arc::new(RwLock::new(TabController::default())),
            photo: Arc::new(Mutex::new(PhotoAnalysisSession::default())),
            analyzer,
            advisor,
            progress: Arc::new(ProgressSnapshot::default()),
        }
    }

    /// Test state: seeded stores, no simulated delays, no backoff.
    pub fn fake() -> Self {
        Self::from_config(AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            analysis: AnalysisConfig {
                delay_ms: 0,
                timeout_ms: 1000,
                max_attempts: 3,
                backoff_ms: 0,
            },
            advice_delay_ms: 0,
            baseline_weight_kg: 75.2,
            macro_goals: MacroGoals::default(),
        })
    }
}
