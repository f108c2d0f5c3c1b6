//! Config parsing and resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::{AceConfigV1, OutputFormat};
pub use resolve::{Overrides, ResolvedConfig};

/// Schema id accepted in the optional `schema` key of `ace.toml`.
pub const SCHEMA_CONFIG_V1: &str = "ace.config.v1";

/// Parse `ace.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<AceConfigV1> {
    let cfg: AceConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config (CLI overrides, then file, then defaults).
pub fn resolve_config(cfg: AceConfigV1, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
