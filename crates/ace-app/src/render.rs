//! Decision output in the configured format.

use ace_settings::OutputFormat;
use ace_types::Decision;
use anyhow::Context;

pub fn serialize_decision(decision: &Decision) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(decision).context("serialize decision")
}

/// Render for stdout. JSON always carries the full trace; `trace` only affects text and
/// Markdown.
pub fn render_decision(
    decision: &Decision,
    format: OutputFormat,
    trace: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(ace_render::render_text(decision, trace)),
        OutputFormat::Markdown => Ok(ace_render::render_markdown(decision, trace)),
        OutputFormat::Json => {
            let bytes = serialize_decision(decision)?;
            String::from_utf8(bytes).context("decision JSON is not UTF-8")
        }
    }
}
