//! Developer tasks (schema generation, fixture conformance).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the project root (parent of xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    if manifest_dir.ends_with("xtask") {
        manifest_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(manifest_dir)
    } else {
        manifest_dir
    }
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

fn fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_policy_schema() -> schemars::Schema {
    schema_for!(ace_types::Policy)
}

fn generate_decision_schema() -> schemars::Schema {
    schema_for!(ace_types::Decision)
}

fn generate_context_schema() -> schemars::Schema {
    schema_for!(ace_types::RequestContext)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(ace_settings::AceConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "ace.policy.v1.json",
            generate: generate_policy_schema,
        },
        SchemaSpec {
            filename: "ace.decision.v1.json",
            generate: generate_decision_schema,
        },
        SchemaSpec {
            filename: "ace.context.v1.json",
            generate: generate_context_schema,
        },
        SchemaSpec {
            filename: "ace.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Check that schemas/ matches what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }
    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {}", name);
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {}", name);
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

fn compile(spec: fn() -> schemars::Schema) -> anyhow::Result<jsonschema::Validator> {
    let value = serde_json::to_value((spec)()).context("Failed to serialize schema")?;
    jsonschema::validator_for(&value).map_err(|e| anyhow::anyhow!("Failed to compile schema: {e}"))
}

/// Read a fixture as JSON; YAML policies are converted on the way in.
fn read_document(path: &Path) -> anyhow::Result<serde_json::Value> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => serde_yaml::from_str(&text)
            .with_context(|| format!("Failed to parse {} as YAML", path.display())),
        _ => serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse {} as JSON", path.display())),
    }
}

/// Fixture documents under `dir` with one of `extensions`, sorted by name.
fn documents(dir: &Path, extensions: &[&str]) -> anyhow::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let path = entry?.path();
        if path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| extensions.contains(&e))
        {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

/// Validate tests/fixtures against the generated schemas.
///
/// This checks:
/// 1. Policy fixtures that parse structurally also validate against the policy schema
/// 2. Context fixtures validate against the context schema
/// 3. Golden decisions validate against the decision schema and are stored normalized
fn conform() -> anyhow::Result<()> {
    let policy_schema = compile(generate_policy_schema)?;
    let context_schema = compile(generate_context_schema)?;
    let decision_schema = compile(generate_decision_schema)?;
    println!("✓ generated schemas compile");

    let root = fixtures_dir();
    let mut errors = Vec::new();
    let mut checked = 0usize;

    for path in documents(&root.join("policies"), &["json", "yaml", "yml"])? {
        let name = file_name(&path);
        let value = read_document(&path)?;
        // Structurally invalid fixtures exist on purpose; only check the ones serde accepts.
        if serde_json::from_value::<ace_types::Policy>(value.clone()).is_err() {
            continue;
        }
        for err in policy_schema.iter_errors(&value) {
            errors.push(format!("policies/{name}: schema validation: {err}"));
        }
        checked += 1;
    }

    for path in documents(&root.join("contexts"), &["json"])? {
        let name = file_name(&path);
        let value = read_document(&path)?;
        for err in context_schema.iter_errors(&value) {
            errors.push(format!("contexts/{name}: schema validation: {err}"));
        }
        checked += 1;
    }

    for path in documents(&root.join("expected"), &["json"])? {
        let name = file_name(&path);
        let value = read_document(&path)?;
        for err in decision_schema.iter_errors(&value) {
            errors.push(format!("expected/{name}: schema validation: {err}"));
        }
        if ace_test_util::normalize_decision(value.clone()) != value {
            errors.push(format!("expected/{name}: not normalized"));
        }
        checked += 1;
    }

    if errors.is_empty() {
        println!("✓ {checked} fixtures conform");
        Ok(())
    } else {
        for error in &errors {
            eprintln!("  - {}", error);
        }
        bail!("Conformance failed with {} errors", errors.len())
    }
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Validate tests/fixtures against the generated schemas");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "print-schema-ids" => {
            println!("{}", ace_types::SCHEMA_POLICY_V1);
            println!("{}", ace_types::SCHEMA_DECISION_V1);
            println!("{}", ace_types::SCHEMA_CONTEXT_V1);
            println!("{}", ace_settings::SCHEMA_CONFIG_V1);
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
