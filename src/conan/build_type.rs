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

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Build configurations understood by conan's `build_type` setting.
///
/// Conan treats the setting value as case sensitive, so the variant
/// names are used verbatim everywhere: on the command line, in the
/// forwarded setting, and in serialized form.
#[derive(
    Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, EnumString,
    Display, clap::ValueEnum,
)]
#[value(rename_all = "verbatim")]
pub enum BuildType {
    /// Unoptimized build with debug information
    Debug,
    /// Optimized build
    Release,
}

impl BuildType {
    /// The `--settings` value forwarded to conan.
    pub fn setting(&self) -> String {
        format!("build_type={self}")
    }
}

#[test]
fn can_parse_build_type() {
    assert!(matches!("Debug".parse(), Ok(BuildType::Debug)));
    assert!(matches!("Release".parse(), Ok(BuildType::Release)));
    assert!("release".parse::<BuildType>().is_err());
    assert!("RelWithDebInfo".parse::<BuildType>().is_err());
}

#[test]
fn can_display_build_type() {
    assert_eq!(BuildType::Debug.to_string(), "Debug");
    assert_eq!(BuildType::Release.to_string(), "Release");
}

#[test]
fn renders_conan_setting() {
    assert_eq!(BuildType::Release.setting(), "build_type=Release");
}
