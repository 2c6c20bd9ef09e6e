//! Application state - shared across all handlers.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use signup_core::ports::{
    AdmissionGate, BetaSignupRepository, CompetitionSignupRepository,
    CompetitionSubmissionRepository, GoalpostBetaRepository,
};
use signup_infra::database::{
    InMemoryBetaSignupStore, InMemoryCompetitionSignupStore, InMemoryCompetitionSubmissionStore,
    InMemoryGoalpostBetaStore, PostgresBetaSignupStore, PostgresCompetitionSignupStore,
    PostgresCompetitionSubmissionStore, PostgresGoalpostBetaStore,
};

use crate::config::{AppConfig, DEFAULT_CORS_ORIGIN};
use crate::notifications::Notifier;
use crate::services::{
    BetaSignupService, CompetitionSignupService, CompetitionSubmissionService,
    GoalpostBetaService,
};

/// One record store per form.
#[derive(Clone)]
pub struct Stores {
    pub beta: Arc<dyn BetaSignupRepository>,
    pub competition: Arc<dyn CompetitionSignupRepository>,
    pub submissions: Arc<dyn CompetitionSubmissionRepository>,
    pub goalpost: Arc<dyn GoalpostBetaRepository>,
}

impl Stores {
    pub fn postgres(db: DatabaseConnection) -> Self {
        Self {
            beta: Arc::new(PostgresBetaSignupStore::new(db.clone())),
            competition: Arc::new(PostgresCompetitionSignupStore::new(db.clone())),
            submissions: Arc::new(PostgresCompetitionSubmissionStore::new(db.clone())),
            goalpost: Arc::new(PostgresGoalpostBetaStore::new(db)),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            beta: Arc::new(InMemoryBetaSignupStore::new()),
            competition: Arc::new(InMemoryCompetitionSignupStore::new()),
            submissions: Arc::new(InMemoryCompetitionSubmissionStore::new()),
            goalpost: Arc::new(InMemoryGoalpostBetaStore::new()),
        }
    }
}

/// Settings the HTTP layer reads directly.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub environment: String,
    /// Origin accepted by the CORS layer.
    pub cors_origin: String,
    /// Raw `ALLOWED_ORIGIN`, used by the competition origin check.
    pub allowed_origin: Option<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            allowed_origin: None,
        }
    }
}

impl From<&AppConfig> for HttpSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            environment: config.environment.clone(),
            cors_origin: config.cors_origin().to_string(),
            allowed_origin: config.allowed_origin.clone(),
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<HttpSettings>,
    pub beta: Arc<BetaSignupService>,
    pub competition: Arc<CompetitionSignupService>,
    pub submissions: Arc<CompetitionSubmissionService>,
    pub goalpost: Arc<GoalpostBetaService>,
}

impl AppState {
    /// Wire the services. The admission gate is shared by the competition
    /// signup and submission flows, so one client has one budget across both.
    pub fn new(
        settings: HttpSettings,
        stores: Stores,
        gate: Arc<dyn AdmissionGate>,
        notifier: Notifier,
    ) -> Self {
        let competition = CompetitionSignupService::new(
            stores.competition,
            gate.clone(),
            notifier.clone(),
            settings.allowed_origin.clone(),
        );

        tracing::info!("Application state initialized");

        Self {
            beta: Arc::new(BetaSignupService::new(stores.beta, notifier.clone())),
            competition: Arc::new(competition),
            submissions: Arc::new(CompetitionSubmissionService::new(
                stores.submissions,
                gate,
                notifier.clone(),
            )),
            goalpost: Arc::new(GoalpostBetaService::new(stores.goalpost, notifier)),
            settings: Arc::new(settings),
        }
    }
}
