use std::sync::Arc;

use actix_web::middleware::Logger;
use actix_web::web::{Data, ServiceConfig};
use actix_web::{App, HttpServer};
use anyhow::Context;
use password_login_migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;

use crate::config::{AppConfig, SessionConfig};
use crate::metrics::AppMetrics;
use crate::security::PasswordHasher;
use crate::session::{self, SessionStore};
use crate::{database, router};

/// Everything a handler can be handed through `web::Data`
#[derive(Clone)]
pub struct State {
    pub db: DatabaseConnection,
    pub hasher: Arc<PasswordHasher>,
    pub sessions: Arc<dyn SessionStore>,
    pub session: SessionConfig,
    pub metrics: AppMetrics,
}

impl State {
    /// Connect the database, apply migrations when configured and build
    /// the hasher and session store
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let db = database::connect(&config.database)
            .await
            .context("Failed to connect to the database")?;

        if config.database.migrate {
            Migrator::up(&db, None)
                .await
                .context("Failed to apply migrations")?;

            ::tracing::info!("Migrations applied");
        }

        let hasher = PasswordHasher::from_config(&config.auth)
            .context("Invalid password hashing parameters")?;
        let sessions = session::store::from_config(&config.session).await?;

        Ok(Self {
            db,
            hasher: Arc::new(hasher),
            sessions,
            session: config.session.clone(),
            metrics: AppMetrics::with_config(Some(config)),
        })
    }

    pub fn register(&self, app: &mut ServiceConfig) {
        app.app_data(Data::new(self.db.clone()))
            .app_data(Data::from(Arc::clone(&self.hasher)))
            .app_data(Data::<dyn SessionStore>::from(Arc::clone(&self.sessions)))
            .app_data(Data::new(self.session.clone()))
            .app_data(Data::new(self.metrics.clone()));
    }
}

/// Serve until a shutdown signal arrives
pub async fn run(config: AppConfig, state: State) -> anyhow::Result<()> {
    let swagger = config.api.swagger_enabled;
    let workers = config.server.workers();
    let address = (config.server.host.clone(), config.server.port);

    ::tracing::info!(
        host = %address.0,
        port = address.1,
        workers,
        environment = %config.app.environment,
        "Starting {}",
        config.app.name
    );

    HttpServer::new(move || {
        let state = state.clone();

        App::new()
            .wrap(Logger::default())
            .configure(move |app| state.register(app))
            .configure(router::route)
            .configure(move |app| {
                if swagger {
                    router::docs(app);
                }
            })
    })
    .workers(workers)
    .shutdown_timeout(config.app.shutdown_timeout)
    .bind(&address)
    .with_context(|| format!("Failed to bind {}:{}", address.0, address.1))?
    .run()
    .await?;

    ::tracing::info!("Server stopped");

    Ok(())
}
