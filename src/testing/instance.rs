use std::sync::Arc;

use crate::config::SessionConfig;
use crate::metrics::AppMetrics;
use crate::server::State;
use crate::testing::setup;

/// Application state over a fresh in-memory database holding the fixture
pub async fn state() -> State {
    let db = setup::database().await;
    setup::fixture(&db)
        .await
        .expect("Failed to insert fixture");

    State {
        db,
        hasher: Arc::new(setup::password_hasher().expect("Failed to build hasher")),
        sessions: setup::session_store(),
        session: SessionConfig {
            ttl: 60 * 60,
            ..SessionConfig::default()
        },
        metrics: AppMetrics::new(),
    }
}

/// Initialised test service and the [`State`] behind it
///
/// `service!()` builds the default state, `service!(state)` uses the one given.
#[macro_export]
macro_rules! service {
    () => {{
        let state = $crate::testing::instance::state().await;

        $crate::service!(state)
    }};
    ($state:expr) => {{
        let state: $crate::server::State = $state;
        let registered = state.clone();
        let app = ::actix_web::App::new()
            .configure(move |app| registered.register(app))
            .configure($crate::router::route)
            .configure($crate::router::docs);
        let service = ::actix_web::test::init_service(app).await;

        (service, state)
    }};
}
