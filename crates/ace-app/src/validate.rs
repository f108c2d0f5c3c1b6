//! The `validate` use case: structural and semantic checks, file by file.

use ace_domain::Engine;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};

#[derive(Debug)]
pub struct FileValidation {
    pub path: Utf8PathBuf,
    /// `None` when the file passed both structural and semantic validation.
    pub error: Option<anyhow::Error>,
}

#[derive(Debug, Default)]
pub struct ValidateOutput {
    pub files: Vec<FileValidation>,
}

impl ValidateOutput {
    pub fn all_ok(&self) -> bool {
        self.files.iter().all(|f| f.error.is_none())
    }
}

/// Validate every file independently; one bad file does not stop the others.
pub fn run_validate(paths: &[Utf8PathBuf]) -> ValidateOutput {
    let engine = Engine::standard();
    let files = paths
        .iter()
        .map(|path| FileValidation {
            path: path.clone(),
            error: validate_file(&engine, path).err(),
        })
        .collect();
    ValidateOutput { files }
}

fn validate_file(engine: &Engine, path: &Utf8Path) -> anyhow::Result<()> {
    let policy = ace_loader::load_policy(path)?;
    engine
        .validate(&policy)
        .with_context(|| format!("policy '{}'", policy.policy_id))?;
    tracing::info!(%path, policy_id = %policy.policy_id, "policy valid");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reports_each_file() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");

        let good = root.join("good.json");
        std::fs::write(&good, ace_test_util::valid_policy().to_string()).expect("write");

        let bad = root.join("bad.json");
        let mut doc = ace_test_util::valid_policy();
        doc["conditions"]["all"][0]["operator"] = json!("contains");
        std::fs::write(&bad, doc.to_string()).expect("write");

        let out = run_validate(&[good, bad, root.join("missing.yaml")]);
        assert!(!out.all_ok());
        assert!(out.files[0].error.is_none());

        let bad_err = format!("{:#}", out.files[1].error.as_ref().expect("bad fails"));
        assert!(bad_err.ends_with("Unsupported operator 'contains'"), "{bad_err}");

        let missing_err = out.files[2].error.as_ref().expect("missing fails").to_string();
        assert!(missing_err.starts_with("policy file not found"), "{missing_err}");
    }

    #[test]
    fn empty_input_is_ok() {
        assert!(run_validate(&[]).all_ok());
    }
}
