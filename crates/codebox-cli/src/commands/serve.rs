//! Serve command — run the HTTP gateway until interrupted

use std::process::ExitCode;

use anyhow::Result;
use codebox_core::CodeboxConfig;
use codebox_gateway::GatewayServer;

pub async fn execute(mut config: CodeboxConfig, bind: Option<String>) -> Result<ExitCode> {
    if let Some(bind) = bind {
        config.gateway.bind = bind;
    }

    GatewayServer::new(config).serve().await?;
    Ok(ExitCode::SUCCESS)
}
