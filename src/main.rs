use password_login::server::{self, State};
use password_login::{config, telemetry};

#[actix::main]
async fn main() -> anyhow::Result<()> {
    let config = config::load()?;

    telemetry::init(&config.observability)?;

    let state = State::from_config(&config).await?;

    server::run(config, state).await
}
