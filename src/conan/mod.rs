// (c) Copyright 2026 Helsing GmbH. All rights reserved.

use std::{
    env,
    path::{Path, PathBuf},
};

use tokio::process::Command;

use crate::config::Config;

mod build_type;
mod install;

pub use build_type::BuildType;
pub use install::{InstallCommand, InstallOutcome};

/// The environment variable that overrides the conan binary
const CONAN_BIN_ENV_VAR: &str = "CONRUN_CONAN_BIN";
/// Binary resolved through the search path when nothing else is configured
const DEFAULT_CONAN_BIN: &str = "conan";

/// Handle to the conan binary used for installs
///
/// Locating never verifies that the binary exists or is runnable; a
/// missing or broken binary surfaces as [`InstallOutcome::LaunchFailed`]
/// once a command runs.
#[derive(Debug, Clone)]
pub struct Conan {
    bin: PathBuf,
}

impl Conan {
    /// Locate the conan binary
    ///
    /// Precedence: the `CONRUN_CONAN_BIN` environment variable, then the
    /// `[conan].bin` config key, then `conan` on the search path.
    pub fn locate(config: &Config) -> Self {
        let bin = env::var(CONAN_BIN_ENV_VAR)
            .map(PathBuf::from)
            .ok()
            .or_else(|| config.conan_bin().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONAN_BIN));

        Self { bin }
    }

    /// The binary install commands are spawned from
    pub fn bin(&self) -> &Path {
        &self.bin
    }

    /// Run one install command to completion
    ///
    /// The child inherits stdout and stderr and this blocks until it
    /// exits; no timeout is applied. Every way the invocation can go
    /// wrong is folded into the returned [`InstallOutcome`].
    pub async fn install(&self, command: &InstallCommand) -> InstallOutcome {
        let status = Command::new(&self.bin).args(command.args()).status().await;

        match status {
            Ok(status) if status.success() => InstallOutcome::Success,
            Ok(status) => InstallOutcome::Failed {
                code: status.code(),
            },
            Err(error) => InstallOutcome::LaunchFailed { error },
        }
    }
}
