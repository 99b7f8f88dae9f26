// Copyright 2026 Helsing GmbH
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use miette::{Context, IntoDiagnostic, ensure, miette};
use std::path::{Path, PathBuf};

// Location of the configuration file
const CONFIG_FILE: &str = ".conrun/config.toml";

/// Project directories installed when the config defines no `targets`
const DEFAULT_TARGETS: [&str; 2] = ["tests", "examples"];
/// Install folder conan writes generated build metadata into
const DEFAULT_INSTALL_FOLDER: &str = "build/modules";

/// Representation of the .conrun/config.toml configuration file
///
/// # Example
///
/// ```toml
/// [conan]
/// bin = "/opt/conan/bin/conan"
///
/// [install]
/// targets = ["tests", "examples"]
/// folder = "build/modules"
/// profiles = "/repo/scripts/profiles"
/// ```
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path to the configuration file
    config_path: Option<PathBuf>,

    /// Conan binary override
    conan_bin: Option<PathBuf>,

    /// Project directories to run installs for, in order
    targets: Vec<String>,

    /// Folder conan writes generated build metadata into
    install_folder: String,

    /// Profiles directory override
    profiles_dir: Option<PathBuf>,
}

impl Config {
    /// Create a new configuration with default values
    /// # Arguments
    /// * `cwd` - Starting directory to search for the configuration file
    ///
    pub fn new(cwd: Option<&Path>) -> miette::Result<Self> {
        match Self::locate_config(cwd) {
            Some(config_path) => Self::new_from_config_file(&config_path),
            None => Ok(Self {
                config_path: None,
                conan_bin: None,
                targets: DEFAULT_TARGETS.map(String::from).to_vec(),
                install_folder: DEFAULT_INSTALL_FOLDER.to_string(),
                profiles_dir: None,
            }),
        }
    }

    /// Project directories to run installs for, in order
    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    /// Folder conan writes generated build metadata into
    pub fn install_folder(&self) -> &str {
        &self.install_folder
    }

    /// Configured conan binary, if any
    pub fn conan_bin(&self) -> Option<&Path> {
        self.conan_bin.as_deref()
    }

    /// Configured profiles directory, if any
    pub fn profiles_dir(&self) -> Option<&Path> {
        self.profiles_dir.as_deref()
    }

    /// Path of the configuration file this was loaded from, if any
    pub fn location(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Locate the configuration file in the current directory or any parent directories
    ///
    /// # Arguments
    /// * `cwd` - Starting directory to search for the configuration file
    ///
    /// # Returns
    /// Some(PathBuf) if the configuration file is found, None otherwise
    fn locate_config(cwd: Option<&Path>) -> Option<PathBuf> {
        if let Some(cwd) = cwd {
            let mut current_dir = cwd.to_owned();

            loop {
                let config_path = current_dir.join(CONFIG_FILE);
                if config_path.exists() {
                    return Some(config_path);
                }

                if !current_dir.pop() {
                    break;
                }
            }
        }

        None
    }

    /// Create configuration from a TOML file
    ///
    /// # Arguments
    /// * `config_path` - Path to the configuration file
    fn new_from_config_file(config_path: &Path) -> miette::Result<Self> {
        let config = std::fs::read_to_string(config_path)
            .into_diagnostic()
            .wrap_err(miette!(
                "failed to read config file: {}",
                config_path.display()
            ))?;
        let config: toml::Value = toml::from_str(&config).into_diagnostic().wrap_err(miette!(
            "failed to parse config file: {}",
            config_path.display()
        ))?;

        // Conan binary override from [conan.bin]
        let conan_bin = config
            .get("conan")
            .and_then(|conan| conan.get("bin"))
            .map(|bin| {
                bin.as_str()
                    .map(PathBuf::from)
                    .ok_or_else(|| miette!("conan.bin must be a string"))
                    .wrap_err(miette!("in config file: {}", config_path.display()))
            })
            .transpose()?;

        let install = config.get("install");

        // Target directories from [install.targets]
        let targets = install
            .and_then(|install| install.get("targets"))
            .map(|targets| {
                targets
                    .as_array()
                    .ok_or_else(|| miette!("install.targets must be an array of strings"))
                    .wrap_err(miette!("in config file: {}", config_path.display()))?
                    .iter()
                    .map(|target| {
                        target
                            .as_str()
                            .map(str::to_string)
                            .ok_or_else(|| miette!("install.targets must contain only strings"))
                            .wrap_err(miette!("in config file: {}", config_path.display()))
                    })
                    .collect::<miette::Result<Vec<String>>>()
            })
            .unwrap_or_else(|| Ok(DEFAULT_TARGETS.map(String::from).to_vec()))?;

        ensure!(
            !targets.is_empty(),
            "install.targets must not be empty in config file: {}",
            config_path.display()
        );

        // Install folder from [install.folder]
        let install_folder = install
            .and_then(|install| install.get("folder"))
            .map(|folder| {
                folder
                    .as_str()
                    .map(str::to_string)
                    .ok_or_else(|| miette!("install.folder must be a string"))
                    .wrap_err(miette!("in config file: {}", config_path.display()))
            })
            .transpose()?
            .unwrap_or_else(|| DEFAULT_INSTALL_FOLDER.to_string());

        // Profiles directory override from [install.profiles]
        let profiles_dir = install
            .and_then(|install| install.get("profiles"))
            .map(|profiles| {
                profiles
                    .as_str()
                    .map(PathBuf::from)
                    .ok_or_else(|| miette!("install.profiles must be a string"))
                    .wrap_err(miette!("in config file: {}", config_path.display()))
            })
            .transpose()?;

        Ok(Self {
            config_path: Some(config_path.to_owned()),
            conan_bin,
            targets,
            install_folder,
            profiles_dir,
        })
    }
}
