//! Educhain Node - owns the permission manager and serves the HTTP API.
//!
//! The manager is created here from the configured seed list and lives
//! exactly as long as the node. All state is in memory; a restart starts
//! from the seeds again.

use crate::api;
use crate::config::NodeConfig;
use crate::error::Result;
use educhain_permissions::PermissionManager;
use std::sync::Arc;

/// An Educhain node instance.
pub struct Node {
    manager: Arc<PermissionManager>,
    config: NodeConfig,
}

impl Node {
    /// Create a node, seeding its permission manager from `config`.
    pub fn new(config: NodeConfig) -> Result<Self> {
        let seeds = config.seeds()?;
        if seeds.is_empty() {
            tracing::warn!("No initial nodes configured; no admission can ever succeed");
        }
        let manager = Arc::new(PermissionManager::new(seeds)?);

        Ok(Self { manager, config })
    }

    /// Get the shared permission manager.
    pub fn manager(&self) -> Arc<PermissionManager> {
        Arc::clone(&self.manager)
    }

    /// Run the HTTP server until ctrl-c.
    pub async fn run(self) -> Result<()> {
        tracing::info!("Educhain node starting");
        tracing::info!("  API: http://{}", self.config.api_addr);
        tracing::info!("  Seeds: {:?}", self.config.initial_nodes_file);
        tracing::info!("  Granting: {}", self.manager.quorum_size());

        let app = api::build_router(self.manager());

        let listener = tokio::net::TcpListener::bind(self.config.api_addr).await?;
        tracing::info!("HTTP server listening on {}", self.config.api_addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Educhain node stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
