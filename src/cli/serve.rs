// src/cli/serve.rs — `serve` command

use std::sync::Arc;

use crate::api::{self, ApiState};
use crate::core::AppContext;
use crate::infra::config::Config;

pub async fn run_serve(
    mut config: Config,
    port: Option<u16>,
    host: Option<String>,
) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(host) = host {
        config.server.host = host;
    }

    let ctx = AppContext::load(&config)?;
    tracing::info!(
        "Scoring with {} features, threshold {}",
        ctx.schema().len(),
        ctx.threshold()
    );

    let state = ApiState { ctx: Arc::new(ctx) };
    api::start_server(&config.server, state).await
}
