//! Test helpers for writing network snapshots and invoking commands.

use camino::{Utf8Path, Utf8PathBuf};
use hubroute_core::{MemoryNetwork, NetworkSnapshot};
use tempfile::TempDir;

use super::*;

/// The sample network used across the workspace, as a snapshot.
pub(super) const SAMPLE_NETWORK: &str = include_str!("../../tests/data/sample_network.json");

/// A snapshot written to a temporary directory.
#[derive(Debug)]
pub(super) struct NetworkFile {
    _dir: TempDir,
    path: Utf8PathBuf,
}

impl NetworkFile {
    pub(super) fn sample() -> Self {
        Self::with_contents(SAMPLE_NETWORK)
    }

    pub(super) fn with_contents(contents: &str) -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root =
            Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp directory");
        let path = root.join("network.json");
        std::fs::write(&path, contents).expect("write network snapshot");
        Self { _dir: dir, path }
    }

    pub(super) fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub(super) fn dir(&self) -> &Utf8Path {
        self.path.parent().expect("snapshot has a parent directory")
    }
}

/// Parse the sample snapshot straight into a network.
pub(super) fn sample_network() -> MemoryNetwork {
    NetworkSnapshot::from_json_str(SAMPLE_NETWORK)
        .and_then(NetworkSnapshot::into_network)
        .expect("sample snapshot is valid")
}

/// Parse `argv` and run the command, capturing stdout.
pub(super) fn run_cli(argv: &[&str]) -> (Result<(), CliError>, String) {
    let mut stdout = Vec::new();
    let outcome = Cli::try_parse_from(argv)
        .map_err(CliError::ArgumentParsing)
        .and_then(|cli| run_command(cli.command, &mut stdout));
    (outcome, String::from_utf8(stdout).expect("stdout utf-8"))
}
