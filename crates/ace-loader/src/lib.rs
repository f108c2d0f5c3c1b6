//! Loading adapters: read policy and request-context documents from disk.
//!
//! Structural validation (serde) happens here. Semantic validation and evaluation belong to
//! `ace-domain` and are never invoked from this crate.

#![forbid(unsafe_code)]

mod parse;

use ace_types::{Policy, RequestContext};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use rayon::prelude::*;

pub use parse::{
    PolicyFormat, parse_context_json, parse_policy, parse_policy_json, parse_policy_yaml,
};

/// Fuzz-friendly API for testing parsing robustness without filesystem access.
/// These functions are designed to never panic on any input.
pub mod fuzz {
    use super::*;

    /// Parse arbitrary text as a JSON policy document.
    ///
    /// **Never panics** on any input.
    pub fn parse_policy_json(text: &str) -> anyhow::Result<Policy> {
        parse::parse_policy_json(text)
    }

    /// Parse arbitrary text as a YAML policy document.
    ///
    /// **Never panics** on any input.
    pub fn parse_policy_yaml(text: &str) -> anyhow::Result<Policy> {
        parse::parse_policy_yaml(text)
    }

    /// Parse arbitrary text as a request context.
    ///
    /// **Never panics** on any input.
    pub fn parse_context_json(text: &str) -> anyhow::Result<RequestContext> {
        parse::parse_context_json(text)
    }
}

/// Load one policy, choosing the parser from the file extension.
pub fn load_policy(path: &Utf8Path) -> anyhow::Result<Policy> {
    let format = path
        .extension()
        .and_then(PolicyFormat::from_extension)
        .with_context(|| {
            format!(
                "Unsupported policy file format: {}. Use .json, .yaml, or .yml",
                path.extension().map(|e| format!(".{e}")).unwrap_or_default()
            )
        })?;

    if !path.exists() {
        anyhow::bail!("policy file not found: {path}");
    }
    let text = std::fs::read_to_string(path).with_context(|| format!("read {path}"))?;
    parse::parse_policy(&text, format).with_context(|| format!("parse {path}"))
}

/// Load a JSON request context.
pub fn load_context(path: &Utf8Path) -> anyhow::Result<RequestContext> {
    if !path.exists() {
        anyhow::bail!("context file not found: {path}");
    }
    let text = std::fs::read_to_string(path).with_context(|| format!("read {path}"))?;
    parse::parse_context_json(&text).with_context(|| format!("parse {path}"))
}

/// Load policies concurrently. Output order follows `paths`; the first failure by position is
/// reported.
pub fn load_policies(paths: &[Utf8PathBuf]) -> anyhow::Result<Vec<Policy>> {
    let results: Vec<anyhow::Result<Policy>> =
        paths.par_iter().map(|p| load_policy(p)).collect();
    results.into_iter().collect()
}
