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

use std::env;

use miette::{Context, IntoDiagnostic};

use crate::{
    conan::{BuildType, Conan, InstallCommand},
    config::Config,
    errors::InstallFailed,
    profile::{self, Profile},
};

/// Runs `conan install` for every configured project directory
///
/// Directories are installed strictly in order and a failing one never
/// prevents the next from running; failures are aggregated and reported
/// once the loop is done. With `dry_run` set, commands are printed
/// instead of executed. With `ignore_failures` set, the run reports
/// success no matter what the install invocations did.
pub async fn install(
    build_type: BuildType,
    profile: Profile,
    dry_run: bool,
    ignore_failures: bool,
) -> miette::Result<()> {
    let cwd = env::current_dir()
        .into_diagnostic()
        .wrap_err("current dir could not be retrieved")?;

    let config = Config::new(Some(&cwd))?;

    if let Some(location) = config.location() {
        tracing::debug!("using configuration from {}", location.display());
    }

    let conan = Conan::locate(&config);

    let profiles = profile::profiles_directory(&config)?;
    let profile_path = profile.resolve_in(&profiles);

    let total = config.targets().len();
    let mut failed = 0;

    for target in config.targets() {
        let command = InstallCommand::new(
            target.as_str(),
            config.install_folder(),
            build_type,
            &profile,
            &profile_path,
        );

        if dry_run {
            tracing::info!(":: would run {} {}", conan.bin().display(), command);
            continue;
        }

        tracing::info!(":: installing {} [{}]", command.target(), build_type);

        let outcome = conan.install(&command).await;

        if outcome.is_success() {
            tracing::info!(":: installed {}", command.target());
        } else {
            tracing::error!(":: failed to install {}: {}", command.target(), outcome);
            failed += 1;
        }
    }

    if failed == 0 {
        return Ok(());
    }

    if ignore_failures {
        tracing::warn!(":: ignoring {} failed project directories", failed);
        return Ok(());
    }

    Err(InstallFailed { failed, total }.into())
}
