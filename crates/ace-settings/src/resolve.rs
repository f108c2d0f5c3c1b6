use crate::SCHEMA_CONFIG_V1;
use crate::model::{AceConfigV1, OutputFormat};
use ace_domain::{EvaluationConfig, Strategy};
use anyhow::Context;

/// Values given on the command line. `Some` wins over the config file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub strategy: Option<String>,
    pub parallel: Option<bool>,
    pub format: Option<String>,
    pub trace: Option<bool>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedConfig {
    pub evaluation: EvaluationConfig,
    pub format: OutputFormat,
    pub trace: bool,
}

pub fn resolve_config(cfg: AceConfigV1, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    if let Some(schema) = cfg.schema.as_deref()
        && schema != SCHEMA_CONFIG_V1
    {
        anyhow::bail!("unsupported config schema: {schema} (expected {SCHEMA_CONFIG_V1})");
    }

    let strategy = match overrides.strategy.or(cfg.strategy) {
        Some(s) => s
            .parse::<Strategy>()
            .with_context(|| format!("invalid strategy '{s}'"))?,
        None => Strategy::default(),
    };

    let format = match overrides.format.or(cfg.format) {
        Some(f) => parse_format(&f)?,
        None => OutputFormat::default(),
    };

    Ok(ResolvedConfig {
        evaluation: EvaluationConfig {
            strategy,
            parallel: overrides.parallel.or(cfg.parallel).unwrap_or(false),
        },
        format,
        trace: overrides.trace.or(cfg.trace).unwrap_or(false),
    })
}

fn parse_format(v: &str) -> anyhow::Result<OutputFormat> {
    match v {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        other => anyhow::bail!("unknown format: {other} (expected text|json|markdown)"),
    }
}
