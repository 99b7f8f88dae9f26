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

use clap::{Parser, Subcommand};
use conrun::{command, conan::BuildType, profile::Profile};
use miette::{miette, Context as _};

#[derive(Parser)]
#[command(author, version, about, long_about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Installs conan dependencies for every project directory
    Install {
        /// Build type forwarded to conan as a setting (Debug or Release)
        #[arg(value_enum)]
        build_type: BuildType,
        /// Conan profile applied to the build and host contexts
        profile: Profile,
        /// Print the conan invocations without running them
        #[clap(long)]
        dry_run: bool,
        /// Report failed directories but exit successfully anyway
        #[clap(long)]
        ignore_failures: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> miette::Result<()> {
    human_panic::setup_panic!();

    tracing_subscriber::fmt()
        .compact()
        .without_time()
        .with_level(false)
        .with_file(false)
        .with_target(false)
        .with_line_number(false)
        .try_init()
        .unwrap();

    let cli = Cli::parse();

    match cli.command {
        Command::Install {
            build_type,
            profile,
            dry_run,
            ignore_failures,
        } => command::install(build_type, profile, dry_run, ignore_failures)
            .await
            .wrap_err(miette!("install command failed")),
    }
}
