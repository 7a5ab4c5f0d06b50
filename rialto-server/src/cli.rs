//! Command-line and environment configuration for the server binary.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use rialto::{Rialto, Route};
use rialto_mock::MemoryStore;

/// Default `EnvFilter` directives when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,rialto=debug";

/// Serve rialto over HTTP.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "RIALTO_BIND", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// JSON seed file mapping "database.collection" to document arrays.
    /// Bundled fixtures are served when omitted.
    #[arg(long, env = "RIALTO_SEED")]
    pub seed: Option<PathBuf>,

    /// Upper bound on every store call, in milliseconds
    #[arg(long, env = "RIALTO_STORE_TIMEOUT_MS", default_value = "10000")]
    pub store_timeout_ms: u64,

    /// Series page cache TTL in milliseconds (0 disables)
    #[arg(long, env = "RIALTO_SERIES_TTL_MS", default_value = "0")]
    pub series_ttl_ms: u64,

    /// Per-route cache TTL override, e.g. `--ttl tc=5000`. Repeatable.
    #[arg(long = "ttl", value_name = "ROUTE=MS", value_parser = parse_route_ttl)]
    pub ttl: Vec<(Route, Duration)>,
}

fn parse_route_ttl(raw: &str) -> Result<(Route, Duration), String> {
    let (route, ms) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ROUTE=MS, got `{raw}`"))?;
    let route: Route = route.parse().map_err(|e| format!("{e}"))?;
    let ms: u64 = ms
        .trim()
        .parse()
        .map_err(|e| format!("invalid milliseconds `{ms}`: {e}"))?;
    Ok((route, Duration::from_millis(ms)))
}

impl Args {
    /// Load the configured store.
    ///
    /// # Errors
    /// Fails when the seed file cannot be read or is not a valid seed.
    pub fn load_store(&self) -> anyhow::Result<MemoryStore> {
        let Some(path) = &self.seed else {
            return Ok(MemoryStore::with_fixtures());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading seed file {}", path.display()))?;
        let seed: serde_json::Value = serde_json::from_str(&raw)
            .with_context(|| format!("parsing seed file {}", path.display()))?;
        MemoryStore::from_json(&seed).with_context(|| format!("loading seed {}", path.display()))
    }

    /// Build the query service these arguments describe.
    ///
    /// # Errors
    /// Fails when the store cannot be loaded or the configuration is rejected.
    pub fn build_service(&self) -> anyhow::Result<Rialto> {
        let store = self.load_store()?;
        let mut builder = Rialto::builder()
            .with_store(Arc::new(store))
            .store_timeout(Duration::from_millis(self.store_timeout_ms))
            .series_ttl(Duration::from_millis(self.series_ttl_ms));
        for &(route, ttl) in &self.ttl {
            builder = builder.cache_ttl(route, ttl);
        }
        builder.build().context("invalid service configuration")
    }
}
