use manoga_config::Config;
use tracing::info;

use crate::{email, environment};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let email = email::connect(&config.email)?;

    let server = environment::rest_server(&config, email);
    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve().await
}
