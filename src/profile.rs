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

use std::{
    env, fmt,
    ops::Deref,
    path::{Path, PathBuf},
    str::FromStr,
};

use miette::{Context, IntoDiagnostic, miette};

use crate::config::Config;

/// The environment variable that overrides the profiles directory
const PROFILES_ENV_VAR: &str = "CONRUN_PROFILES";
/// The directory name profiles are resolved from
const PROFILES_DIRECTORY: &str = "profiles";
/// The profile name that makes conan fall back to its own default profile
const DEFAULT_PROFILE: &str = "default";

/// A named conan profile
///
/// Profile names are free form: they are only ever joined onto the
/// profiles directory and handed to conan, which reports unknown
/// profiles itself.
#[derive(Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct Profile(String);

impl Profile {
    /// New profile from a name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self(name.into())
    }

    /// Whether this is the distinguished `default` profile
    ///
    /// No `--profile:*` flags are emitted for it; conan resolves its
    /// default profile on its own.
    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_PROFILE
    }

    /// Path of this profile inside a profiles directory
    ///
    /// The file is not required to exist; a missing profile surfaces
    /// through conan once the install runs.
    pub fn resolve_in(&self, profiles: &Path) -> PathBuf {
        profiles.join(&self.0)
    }
}

impl FromStr for Profile {
    type Err = std::convert::Infallible;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(input))
    }
}

impl Deref for Profile {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The directory conan profiles are resolved from
///
/// Precedence: the `CONRUN_PROFILES` environment variable, then the
/// `[install].profiles` config key, then a directory derived from the
/// location of the running executable. The result is not checked for
/// existence.
pub fn profiles_directory(config: &Config) -> miette::Result<PathBuf> {
    if let Ok(dir) = env::var(PROFILES_ENV_VAR).map(PathBuf::from) {
        return Ok(dir);
    }

    if let Some(dir) = config.profiles_dir() {
        return Ok(dir.to_path_buf());
    }

    let exe = env::current_exe()
        .into_diagnostic()
        .wrap_err("failed to locate the running executable")?;

    default_profiles_dir(&exe)
        .ok_or_else(|| miette!("executable path {} has no parent directory", exe.display()))
}

/// Profiles directory derived from the location of the program itself
///
/// One level above the directory containing the executable, so a binary
/// checked into `<repo>/scripts/conan/` finds `<repo>/scripts/profiles/`.
pub fn default_profiles_dir(exe: &Path) -> Option<PathBuf> {
    Some(exe.parent()?.parent()?.join(PROFILES_DIRECTORY))
}

#[test]
fn recognizes_the_default_profile() {
    assert!(Profile::new("default").is_default());
    assert!(!Profile::new("Default").is_default());
    assert!(!Profile::new("linux-gcc11").is_default());
}

#[test]
fn resolves_inside_a_profiles_directory() {
    let profile = Profile::new("linux-gcc11");
    assert_eq!(
        profile.resolve_in(Path::new("/repo/scripts/profiles")),
        PathBuf::from("/repo/scripts/profiles/linux-gcc11")
    );
}

#[test]
fn derives_profiles_directory_from_executable() {
    assert_eq!(
        default_profiles_dir(Path::new("/repo/scripts/conan/conrun")),
        Some(PathBuf::from("/repo/scripts/profiles"))
    );
}

#[test]
fn bare_executable_name_has_no_profiles_directory() {
    assert_eq!(default_profiles_dir(Path::new("conrun")), None);
}
