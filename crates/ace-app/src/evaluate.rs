//! The `evaluate` use cases: single policy and deny-overrides policy sets.

use ace_domain::Engine;
use ace_settings::{AceConfigV1, Overrides, ResolvedConfig};
use ace_types::{Decision, Outcome, Policy};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};

/// Input for the evaluate use cases.
#[derive(Clone, Debug)]
pub struct EvaluateInput<'a> {
    /// Policy files, in combination order.
    pub policies: &'a [Utf8PathBuf],
    /// Request context file (JSON).
    pub context: &'a Utf8Path,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
}

#[derive(Clone, Debug)]
pub struct EvaluateOutput {
    pub decision: Decision,
    pub resolved_config: ResolvedConfig,
}

/// Evaluate exactly one policy. Strategy and parallelism settings do not apply.
pub fn run_evaluate(input: EvaluateInput<'_>) -> anyhow::Result<EvaluateOutput> {
    if input.policies.len() != 1 {
        anyhow::bail!(
            "evaluate takes exactly one policy, got {}",
            input.policies.len()
        );
    }
    let (engine, resolved, policies, context) = prepare(&input)?;
    let decision = engine
        .evaluate(&policies[0], &context)
        .with_context(|| format!("evaluate {}", input.policies[0]))?;

    Ok(EvaluateOutput {
        decision,
        resolved_config: resolved,
    })
}

/// Combine all policies under the configured strategy.
pub fn run_evaluate_policies(input: EvaluateInput<'_>) -> anyhow::Result<EvaluateOutput> {
    if input.policies.is_empty() {
        anyhow::bail!("evaluate-policies needs at least one policy");
    }
    let (engine, resolved, policies, context) = prepare(&input)?;
    let decision = engine
        .combine_with(&policies, &context, &resolved.evaluation)
        .context("evaluate policy set")?;

    Ok(EvaluateOutput {
        decision,
        resolved_config: resolved,
    })
}

/// Resolve config, load everything, and validate every policy before any evaluation.
fn prepare(
    input: &EvaluateInput<'_>,
) -> anyhow::Result<(Engine, ResolvedConfig, Vec<Policy>, ace_types::RequestContext)> {
    let cfg = if input.config_text.trim().is_empty() {
        AceConfigV1::default()
    } else {
        ace_settings::parse_config_toml(input.config_text).context("parse config")?
    };
    let resolved =
        ace_settings::resolve_config(cfg, input.overrides.clone()).context("resolve config")?;

    let policies = ace_loader::load_policies(input.policies)?;
    let context = ace_loader::load_context(input.context)?;

    let engine = Engine::standard();
    for (policy, path) in policies.iter().zip(input.policies) {
        engine
            .validate(policy)
            .with_context(|| format!("validate {path}"))?;
    }

    tracing::info!(
        policies = policies.len(),
        strategy = %resolved.evaluation.strategy,
        parallel = resolved.evaluation.parallel,
        "policies loaded and validated"
    );

    Ok((engine, resolved, policies, context))
}

/// Map an outcome to an exit code: 0 unless `enforce`, then DENY = 2, NOT_APPLICABLE = 3.
pub fn decision_exit_code(outcome: Outcome, enforce: bool) -> i32 {
    if !enforce {
        return 0;
    }
    match outcome {
        Outcome::Allow => 0,
        Outcome::Deny => 2,
        Outcome::NotApplicable => 3,
    }
}
