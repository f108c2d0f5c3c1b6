//! CLI entry point for ace.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `ace-app` crate.

use ace_app::{
    EvaluateInput, EvaluateOutput, decision_exit_code, render_decision, run_evaluate,
    run_evaluate_policies, run_validate,
};
use ace_settings::Overrides;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Environment variable holding the log filter (`tracing_subscriber::EnvFilter` syntax).
const LOG_ENV: &str = "ACE_LOG";

#[derive(Parser, Debug)]
#[command(
    name = "ace",
    version,
    about = "Access Control Engine: validate and evaluate policies"
)]
struct Cli {
    /// Path to ace config TOML. A missing file means defaults.
    #[arg(long, default_value = "ace.toml")]
    config: Utf8PathBuf,

    /// Override the combination strategy (deny_overrides).
    #[arg(long)]
    strategy: Option<String>,

    /// Evaluate policy sets in parallel. `--parallel=false` overrides `parallel = true` in config.
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    parallel: Option<bool>,

    /// Override the output format (text|json|markdown).
    #[arg(long)]
    format: Option<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate policy files (.json, .yaml, .yml).
    Validate {
        #[arg(required = true, value_name = "POLICY")]
        policies: Vec<Utf8PathBuf>,
    },

    /// Evaluate one policy against a context.
    Evaluate {
        /// Path to policy file.
        policy: Utf8PathBuf,
        /// Path to context file (.json).
        context: Utf8PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Evaluate multiple policies (deny-overrides) against a context.
    EvaluatePolicies {
        /// Paths to policy files, in combination order.
        #[arg(required = true, num_args = 1.., value_name = "POLICY")]
        policies: Vec<Utf8PathBuf>,
        /// Path to context file (.json).
        context: Utf8PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(clap::Args, Debug)]
struct OutputArgs {
    /// Print evaluation trace.
    #[arg(short = 't', long)]
    trace: bool,

    /// Exit 2 on DENY and 3 on NOT_APPLICABLE.
    #[arg(long)]
    enforce: bool,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let code = match &cli.cmd {
        Commands::Validate { policies } => cmd_validate(policies),
        Commands::Evaluate {
            policy,
            context,
            output,
        } => cmd_evaluate(&cli, std::slice::from_ref(policy), context, output, false),
        Commands::EvaluatePolicies {
            policies,
            context,
            output,
        } => cmd_evaluate(&cli, policies, context, output, true),
    };

    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .init();
}

fn cmd_validate(policies: &[Utf8PathBuf]) -> i32 {
    let output = run_validate(policies);
    for file in &output.files {
        match &file.error {
            None => println!("OK: {}", file.path),
            Some(err) => eprintln!("Validation failed: {}: {err:#}", file.path),
        }
    }
    if output.all_ok() { 0 } else { 1 }
}

fn cmd_evaluate(
    cli: &Cli,
    policies: &[Utf8PathBuf],
    context: &Utf8Path,
    output: &OutputArgs,
    combine: bool,
) -> i32 {
    // Missing config file is allowed (defaults apply).
    let config_text = std::fs::read_to_string(&cli.config).unwrap_or_default();

    let input = EvaluateInput {
        policies,
        context,
        config_text: &config_text,
        overrides: Overrides {
            strategy: cli.strategy.clone(),
            parallel: cli.parallel,
            format: cli.format.clone(),
            trace: output.trace.then_some(true),
        },
    };

    let result = if combine {
        run_evaluate_policies(input)
    } else {
        run_evaluate(input)
    };

    match result.and_then(|out| print_decision(&out).map(|()| out)) {
        Ok(out) => decision_exit_code(out.decision.outcome, output.enforce),
        Err(err) => {
            eprintln!("Evaluation failed: {err:#}");
            1
        }
    }
}

fn print_decision(out: &EvaluateOutput) -> anyhow::Result<()> {
    let rendered = render_decision(
        &out.decision,
        out.resolved_config.format,
        out.resolved_config.trace,
    )?;
    println!("{}", rendered.trim_end());
    Ok(())
}
