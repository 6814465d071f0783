//! Educhain node binary
//!
//! Serves the admission-control API for a permissioned network.

use educhain_node::{Node, NodeConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "educhain_node=info,educhain_permissions=info,tower_http=info".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Educhain node");

    let config = NodeConfig::from_env()?;
    let node = Node::new(config)?;
    node.run().await?;

    Ok(())
}
