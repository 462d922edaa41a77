use crate::error::{CliError, CliResult};
use hook_merkle_sdk::{verify_tree_dump_file, RootArtifact, VerifiedArtifact};
use hook_merkle_tree::to_prefixed_hex;
use std::path::{Path, PathBuf};
use tracing::info;

pub fn execute(dump: PathBuf, root: Option<PathBuf>) -> CliResult<()> {
    let verified = run(&dump, root.as_deref())?;
    println!(
        "{}: {} leaves verified, root {}",
        dump.display(),
        verified.count,
        to_prefixed_hex(verified.root)
    );
    Ok(())
}

pub(crate) fn run(dump: &Path, root: Option<&Path>) -> CliResult<VerifiedArtifact> {
    let verified = verify_tree_dump_file(dump)?;

    if let Some(root_path) = root {
        let content = std::fs::read_to_string(root_path)?;
        let expected: RootArtifact = serde_json::from_str(&content)?;
        if expected.root != verified.root {
            return Err(CliError::Verification(format!(
                "{} has root {}, tree dump has {}",
                root_path.display(),
                to_prefixed_hex(expected.root),
                to_prefixed_hex(verified.root)
            )));
        }
        info!(path = %root_path.display(), "Root file matches tree dump");
    }

    Ok(verified)
}
