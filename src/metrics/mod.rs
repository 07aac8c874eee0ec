use std::sync::{Arc, OnceLock};

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::config::AppConfig;

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Result of one password login attempt, used as the `outcome` label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    InvalidCredentials,
    Malformed,
    Error,
}

impl LoginOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::InvalidCredentials => "invalid_credentials",
            Self::Malformed => "malformed",
            Self::Error => "error",
        }
    }
}

/// Handle onto the process-wide Prometheus recorder
///
/// The recorder is installed by the first instance created; later instances
/// share it, so the global labels of the first caller win.
#[derive(Clone)]
pub struct AppMetrics {
    prometheus_handle: Arc<PrometheusHandle>,
}

impl AppMetrics {
    pub fn new() -> Self {
        Self::with_config(None)
    }

    pub fn with_config(config: Option<&AppConfig>) -> Self {
        let handle = PROMETHEUS_HANDLE.get_or_init(|| {
            let builder = match config {
                Some(cfg) => PrometheusBuilder::new()
                    .add_global_label("service", cfg.app.name.clone())
                    .add_global_label("version", cfg.app.version.clone())
                    .add_global_label("environment", cfg.app.environment.clone()),
                None => PrometheusBuilder::new(),
            };

            let handle = match builder.install_recorder() {
                Ok(handle) => handle,
                Err(e) => {
                    ::tracing::warn!(error = %e, "Prometheus recorder not installed, metrics are disabled");

                    PrometheusBuilder::new().build_recorder().handle()
                }
            };

            Self::describe_metrics();

            handle
        });

        Self {
            prometheus_handle: Arc::new(handle.clone()),
        }
    }

    fn describe_metrics() {
        describe_counter!(
            "auth_login_attempts_total",
            "Password login attempts by outcome"
        );
        describe_histogram!(
            "auth_login_duration_seconds",
            "Time spent handling a password login"
        );
        describe_counter!("sessions_created_total", "Sessions created by a login");
        describe_counter!(
            "sessions_rotated_total",
            "Sessions destroyed because the client logged in again"
        );
    }

    pub fn record_login_attempt(&self, outcome: LoginOutcome, duration_secs: f64) {
        counter!("auth_login_attempts_total", "outcome" => outcome.as_str()).increment(1);
        histogram!("auth_login_duration_seconds", "outcome" => outcome.as_str())
            .record(duration_secs);
    }

    pub fn record_session_created(&self) {
        counter!("sessions_created_total").increment(1);
    }

    pub fn record_session_rotated(&self) {
        counter!("sessions_rotated_total").increment(1);
    }

    /// Prometheus text exposition
    pub fn render(&self) -> String {
        self.prometheus_handle.render()
    }
}

impl Default for AppMetrics {
    fn default() -> Self {
        Self::new()
    }
}
