// (c) Copyright 2026 Helsing GmbH. All rights reserved.

use std::{
    ffi::OsString,
    fmt, io,
    path::{Path, PathBuf},
};

use crate::{conan::BuildType, profile::Profile};

/// A single `conan install` invocation for one project directory
///
/// This is a pure description: building one touches neither the
/// filesystem nor any process state. [`Conan::install`][super::Conan::install]
/// turns it into a child process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstallCommand {
    target: String,
    install_folder: String,
    build_type: BuildType,
    profile_path: Option<PathBuf>,
}

impl InstallCommand {
    /// Describe the install of one target directory
    ///
    /// The `--profile:build`/`--profile:host` pair is only appended for
    /// non-default profiles; for `default`, conan resolves its own
    /// default profile.
    pub fn new(
        target: impl Into<String>,
        install_folder: impl Into<String>,
        build_type: BuildType,
        profile: &Profile,
        profile_path: &Path,
    ) -> Self {
        Self {
            target: target.into(),
            install_folder: install_folder.into(),
            build_type,
            profile_path: (!profile.is_default()).then(|| profile_path.to_path_buf()),
        }
    }

    /// Project directory this command installs dependencies for
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Argument list handed to the conan binary
    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "install".into(),
            self.target.clone().into(),
            "--install-folder".into(),
            self.install_folder.clone().into(),
            "--settings".into(),
            self.build_type.setting().into(),
            "--build".into(),
            "missing".into(),
        ];

        if let Some(ref profile) = self.profile_path {
            args.push("--profile:build".into());
            args.push(profile.clone().into());
            args.push("--profile:host".into());
            args.push(profile.clone().into());
        }

        args
    }
}

impl fmt::Display for InstallCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args = self.args();
        let mut args = args.iter();

        if let Some(first) = args.next() {
            write!(f, "{}", first.to_string_lossy())?;
        }

        for arg in args {
            write!(f, " {}", arg.to_string_lossy())?;
        }

        Ok(())
    }
}

/// What became of one install invocation
///
/// Launch failures and non-zero exits are values rather than errors so
/// that the driver keeps going over the remaining targets and can
/// aggregate everything at the end.
#[derive(Debug)]
pub enum InstallOutcome {
    /// conan ran and exited successfully
    Success,
    /// conan ran but exited with a non-zero status
    Failed {
        /// Exit code of the child, absent when it died to a signal
        code: Option<i32>,
    },
    /// conan could not be spawned at all
    LaunchFailed {
        /// The underlying spawn error
        error: io::Error,
    },
}

impl InstallOutcome {
    /// Whether the target installed cleanly
    pub fn is_success(&self) -> bool {
        matches!(self, InstallOutcome::Success)
    }
}

impl fmt::Display for InstallOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallOutcome::Success => write!(f, "conan exited successfully"),
            InstallOutcome::Failed { code: Some(code) } => {
                write!(f, "conan exited with status code {code}")
            }
            InstallOutcome::Failed { code: None } => {
                write!(f, "conan was terminated by a signal")
            }
            InstallOutcome::LaunchFailed { error } => {
                write!(f, "failed to launch conan: {error}")
            }
        }
    }
}
