//! Node configuration.
//!
//! Everything comes from environment variables with defaults:
//!
//! - `EDUCHAIN_API_ADDR`: HTTP listen address (default `0.0.0.0:26657`)
//! - `EDUCHAIN_INITIAL_NODES_FILE` (or `INITIAL_NODES_FILE`): JSON seed file
//!   of the form `{"initial_nodes": [...]}` (default `config/initial_nodes.json`)
//! - `EDUCHAIN_INITIAL_NODES`: extra comma-separated seed ids

use crate::error::{Error, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

const DEFAULT_API_ADDR: &str = "0.0.0.0:26657";
const DEFAULT_INITIAL_NODES_FILE: &str = "config/initial_nodes.json";

/// Configuration for an Educhain node.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// HTTP API listen address
    pub api_addr: SocketAddr,

    /// Seed file; skipped if it does not exist
    pub initial_nodes_file: PathBuf,

    /// Seeds given directly, merged with the file
    pub initial_nodes: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct InitialNodesFile {
    #[serde(default)]
    initial_nodes: Vec<String>,
}

impl NodeConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr =
            lookup("EDUCHAIN_API_ADDR").unwrap_or_else(|| DEFAULT_API_ADDR.to_string());
        let api_addr = raw_addr.parse::<SocketAddr>().map_err(|e| {
            Error::Config(format!("invalid EDUCHAIN_API_ADDR {:?}: {}", raw_addr, e))
        })?;

        let initial_nodes_file = lookup("EDUCHAIN_INITIAL_NODES_FILE")
            .or_else(|| lookup("INITIAL_NODES_FILE"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INITIAL_NODES_FILE));

        let initial_nodes = lookup("EDUCHAIN_INITIAL_NODES")
            .map(|s| split_list(&s))
            .unwrap_or_default();

        Ok(Self {
            api_addr,
            initial_nodes_file,
            initial_nodes,
        })
    }

    /// Resolve the full seed list: file entries first, then the inline list,
    /// each id kept once.
    pub fn seeds(&self) -> Result<Vec<String>> {
        let mut seeds = if self.initial_nodes_file.exists() {
            load_initial_nodes(&self.initial_nodes_file)?
        } else {
            tracing::debug!("No seed file at {:?}", self.initial_nodes_file);
            Vec::new()
        };

        for id in &self.initial_nodes {
            if !seeds.contains(id) {
                seeds.push(id.clone());
            }
        }
        Ok(seeds)
    }
}

/// Read a `{"initial_nodes": [...]}` seed file.
pub fn load_initial_nodes(path: &Path) -> Result<Vec<String>> {
    let data = std::fs::read_to_string(path)?;
    let file: InitialNodesFile = serde_json::from_str(&data)?;

    let mut seeds: Vec<String> = Vec::with_capacity(file.initial_nodes.len());
    for id in file.initial_nodes {
        if !seeds.contains(&id) {
            seeds.push(id);
        }
    }
    Ok(seeds)
}

fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = NodeConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_addr, "0.0.0.0:26657".parse::<SocketAddr>().unwrap());
        assert_eq!(config.initial_nodes_file, PathBuf::from("config/initial_nodes.json"));
        assert!(config.initial_nodes.is_empty());
    }

    #[test]
    fn invalid_addr_is_an_error() {
        let err = NodeConfig::from_lookup(lookup(&[("EDUCHAIN_API_ADDR", "not-an-addr")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn legacy_file_variable() {
        let config =
            NodeConfig::from_lookup(lookup(&[("INITIAL_NODES_FILE", "/tmp/seeds.json")])).unwrap();
        assert_eq!(config.initial_nodes_file, PathBuf::from("/tmp/seeds.json"));

        let config = NodeConfig::from_lookup(lookup(&[
            ("INITIAL_NODES_FILE", "/tmp/legacy.json"),
            ("EDUCHAIN_INITIAL_NODES_FILE", "/tmp/seeds.json"),
        ]))
        .unwrap();
        assert_eq!(config.initial_nodes_file, PathBuf::from("/tmp/seeds.json"));
    }

    #[test]
    fn inline_list_is_trimmed() {
        let config =
            NodeConfig::from_lookup(lookup(&[("EDUCHAIN_INITIAL_NODES", " a, b ,,c ")])).unwrap();
        assert_eq!(config.initial_nodes, ["a", "b", "c"]);
    }

    #[test]
    fn seeds_merge_file_and_inline() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"initial_nodes": ["node-1", "node-2", "node-1"]}}"#).unwrap();

        let config = NodeConfig {
            api_addr: "127.0.0.1:0".parse().unwrap(),
            initial_nodes_file: file.path().to_path_buf(),
            initial_nodes: vec!["node-2".into(), "node-3".into()],
        };

        assert_eq!(config.seeds().unwrap(), ["node-1", "node-2", "node-3"]);
    }

    #[test]
    fn missing_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let config = NodeConfig {
            api_addr: "127.0.0.1:0".parse().unwrap(),
            initial_nodes_file: dir.path().join("absent.json"),
            initial_nodes: vec!["only".into()],
        };

        assert_eq!(config.seeds().unwrap(), ["only"]);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = load_initial_nodes(file.path()).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
