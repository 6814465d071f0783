//! Educhain Node - HTTP front for admission control
//!
//! Wraps one [`PermissionManager`](educhain_permissions::PermissionManager)
//! in an HTTP API so other nodes and tools can request admission, vote, and
//! query entitlement.
//!
//! # Architecture
//!
//! - **Config**: environment variables plus a JSON seed file
//! - **API**: axum router translating core results into HTTP responses
//! - **Node**: owns the manager and runs the server
//!
//! # Example
//!
//! ```no_run
//! use educhain_node::{Node, NodeConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = NodeConfig::from_env()?;
//!     let node = Node::new(config)?;
//!     node.run().await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod node;

pub use config::NodeConfig;
pub use error::{ApiError, Error, Result};
pub use node::Node;
