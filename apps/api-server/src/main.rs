//! # Signup API Server
//!
//! The main entry point for the Actix-web HTTP server.

use std::sync::Arc;

use actix_web::HttpServer;
use anyhow::Context;

use api_server::background;
use api_server::config::AppConfig;
use api_server::create_app;
use api_server::middleware::error::expose_internal_detail;
use api_server::notifications::Notifier;
use api_server::observability::install_panic_hook;
use api_server::state::{AppState, HttpSettings, Stores};
use api_server::telemetry::{TelemetryConfig, init_telemetry};
use migration::{Migrator, MigratorTrait};
use signup_core::ports::{AdmissionGate, Mailer};
use signup_infra::database::connect;
use signup_infra::mail::{LogMailer, SendGridMailer};
use signup_infra::rate_limit::FixedWindowGate;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());
    install_panic_hook();

    let config = AppConfig::from_env().inspect_err(|e| {
        tracing::error!(error = %e, "Invalid configuration");
    })?;
    expose_internal_detail(!config.is_production());

    tracing::info!(
        host = %config.host,
        port = config.port,
        environment = %config.environment,
        "Starting Signup API Server"
    );

    let db = connect(&config.database)
        .await
        .context("failed to connect to the database")?;
    if config.run_migrations {
        Migrator::up(&db, None)
            .await
            .context("failed to run database migrations")?;
        tracing::info!("Database migrations applied");
    }

    let (gate, local_gate) = build_gate(&config).await;
    let sweeper = match local_gate {
        Some(local_gate) => start_sweep(local_gate).await,
        None => None,
    };

    let notifier = Notifier::new(build_mailer(&config));
    let state = AppState::new(
        HttpSettings::from(&config),
        Stores::postgres(db),
        gate,
        notifier,
    );

    HttpServer::new(move || create_app(state.clone()))
        .bind((config.host.as_str(), config.port))?
        .run()
        .await?;

    stop_sweep(sweeper).await;
    tracing::info!("Server stopped");
    Ok(())
}

/// Pick the admission gate. The in-process gate is also returned so its
/// windows can be swept.
async fn build_gate(config: &AppConfig) -> (Arc<dyn AdmissionGate>, Option<Arc<FixedWindowGate>>) {
    #[cfg(feature = "redis")]
    if let Some(url) = &config.redis_url {
        use signup_infra::rate_limit::{RedisAdmissionGate, RedisGateConfig};

        match RedisAdmissionGate::new(RedisGateConfig::new(url.clone(), config.rate_limit.clone())).await
        {
            Ok(gate) => {
                tracing::info!("Using Redis admission gate");
                return (Arc::new(gate), None);
            }
            Err(e) => {
                tracing::error!(error = %e, "Redis unavailable, falling back to in-process admission gate");
            }
        }
    }

    #[cfg(not(feature = "redis"))]
    if config.redis_url.is_some() {
        tracing::warn!("REDIS_URL is set but the redis feature is not compiled in; using in-process admission gate");
    }

    let gate = Arc::new(FixedWindowGate::new(config.rate_limit.clone()));
    tracing::info!(
        max_requests = config.rate_limit.max_requests,
        window_ms = config.rate_limit.window.as_millis() as u64,
        "Using in-process admission gate"
    );
    (gate.clone(), Some(gate))
}

fn build_mailer(config: &AppConfig) -> Arc<dyn Mailer> {
    match &config.sendgrid {
        Some(sendgrid) => match SendGridMailer::new(sendgrid.clone()) {
            Ok(mailer) => {
                tracing::info!("SendGrid mail transport configured");
                Arc::new(mailer)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to build SendGrid client, emails will be skipped");
                Arc::new(LogMailer)
            }
        },
        None => {
            tracing::warn!("SENDGRID_API_KEY or SENDGRID_FROM_EMAIL not set, emails will be skipped");
            Arc::new(LogMailer)
        }
    }
}

#[cfg(feature = "scheduler")]
type SweepHandle = background::Scheduler;
#[cfg(not(feature = "scheduler"))]
type SweepHandle = tokio::task::JoinHandle<()>;

#[cfg(feature = "scheduler")]
async fn start_sweep(gate: Arc<FixedWindowGate>) -> Option<SweepHandle> {
    let scheduled = async {
        let scheduler = background::Scheduler::new().await?;
        background::schedule_gate_sweep(&scheduler, gate.clone()).await?;
        scheduler.start().await?;
        Ok::<_, tokio_cron_scheduler::JobSchedulerError>(scheduler)
    };

    match scheduled.await {
        Ok(scheduler) => Some(scheduler),
        Err(e) => {
            tracing::error!(error = %e, "Scheduler failed to start, sweeping on an interval instead");
            background::spawn_interval_sweep(gate, background::SWEEP_INTERVAL);
            None
        }
    }
}

#[cfg(not(feature = "scheduler"))]
async fn start_sweep(gate: Arc<FixedWindowGate>) -> Option<SweepHandle> {
    Some(background::spawn_interval_sweep(gate, background::SWEEP_INTERVAL))
}

#[cfg(feature = "scheduler")]
async fn stop_sweep(scheduler: Option<SweepHandle>) {
    if let Some(mut scheduler) = scheduler {
        if let Err(e) = scheduler.shutdown().await {
            tracing::warn!(error = %e, "Scheduler shutdown failed");
        }
    }
}

#[cfg(not(feature = "scheduler"))]
async fn stop_sweep(handle: Option<SweepHandle>) {
    if let Some(handle) = handle {
        handle.abort();
    }
}
