use std::fs;
use std::path::Path;

use assert_cmd::Command;
use tempfile::TempDir;

/// Isolated data directory for one test, wired into the binary via
/// `RB_DATA_DIR`.
pub struct TestHome {
    dir: TempDir,
}

impl TestHome {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn rb_cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("rb").expect("rb binary");
        cmd.env("RB_DATA_DIR", self.dir.path());
        cmd.env_remove("RB_CONFIG");
        cmd.env("RUST_LOG", "off");
        cmd
    }

    pub fn write_config(&self, contents: &str) -> std::io::Result<()> {
        fs::write(self.path().join("config.toml"), contents)
    }
}
