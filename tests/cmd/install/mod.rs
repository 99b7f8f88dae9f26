use pretty_assertions::assert_eq;

use crate::VirtualFileSystem;

/// Debug and Release are the only accepted build types; anything else is
/// a usage error and no install may run
#[test]
fn rejects_unknown_build_types() {
    let vfs = VirtualFileSystem::empty();

    crate::cli!()
        .arg("install")
        .arg("RelWithDebInfo")
        .arg("default")
        .current_dir(vfs.root())
        .assert()
        .failure()
        .code(2);

    // casing matters, conan only understands the capitalized spellings
    crate::cli!()
        .arg("install")
        .arg("release")
        .arg("default")
        .current_dir(vfs.root())
        .assert()
        .failure()
        .code(2);

    assert!(vfs.recorded_args().is_empty());
}

/// A conan binary that cannot be launched is reported per directory and
/// fails the run as a whole
#[test]
fn reports_every_directory_when_conan_is_missing() {
    let vfs = VirtualFileSystem::empty();

    let assert = crate::cli!()
        .arg("install")
        .arg("Release")
        .arg("default")
        .env("CONRUN_CONAN_BIN", vfs.root().join("does-not-exist"))
        .current_dir(vfs.root())
        .assert()
        .failure()
        .code(1);

    let output = assert.get_output();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        stdout.contains(":: failed to install tests"),
        "stdout: {}",
        stdout
    );
    assert!(
        stdout.contains(":: failed to install examples"),
        "stdout: {}",
        stdout
    );
    assert!(stderr.contains("2 of 2"), "stderr: {}", stderr);
}

/// Installs run once per configured directory, in configuration order,
/// with the exact argument shape conan expects
#[cfg(unix)]
#[test]
fn installs_each_target_in_order() {
    let vfs = VirtualFileSystem::empty();
    let conan = vfs.conan_stand_in();

    let assert = crate::cli!()
        .arg("install")
        .arg("Release")
        .arg("default")
        .env("CONRUN_CONAN_BIN", &conan)
        .current_dir(vfs.root())
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);

    assert!(stdout.contains(":: installed tests"), "stdout: {}", stdout);
    assert!(
        stdout.contains(":: installed examples"),
        "stdout: {}",
        stdout
    );

    assert_eq!(
        vfs.recorded_args(),
        [
            "install tests --install-folder build/modules --settings build_type=Release --build missing",
            "install examples --install-folder build/modules --settings build_type=Release --build missing",
        ]
    );
}

/// A named profile is resolved inside the profiles directory and applied
/// to both the build and the host context
#[cfg(unix)]
#[test]
fn named_profile_is_applied_to_both_contexts() {
    let vfs = VirtualFileSystem::empty();
    let conan = vfs.conan_stand_in();
    let profiles = vfs.profiles(&["linux-gcc11"]);

    crate::cli!()
        .arg("install")
        .arg("Debug")
        .arg("linux-gcc11")
        .env("CONRUN_CONAN_BIN", &conan)
        .env("CONRUN_PROFILES", &profiles)
        .current_dir(vfs.root())
        .assert()
        .success();

    let profile = profiles.join("linux-gcc11");
    let expected = |target: &str| {
        format!(
            "install {target} --install-folder build/modules --settings build_type=Debug --build missing --profile:build {profile} --profile:host {profile}",
            profile = profile.display()
        )
    };

    assert_eq!(
        vfs.recorded_args(),
        [expected("tests"), expected("examples")]
    );
}

/// One failing directory does not stop the remaining ones; the failure
/// count is reported once all of them ran
#[cfg(unix)]
#[test]
fn keeps_going_when_a_directory_fails() {
    let vfs = VirtualFileSystem::empty();
    let conan = vfs.conan_stand_in_with(r#"[ "$2" = "tests" ] && exit 7 || exit 0"#);

    let assert = crate::cli!()
        .arg("install")
        .arg("Release")
        .arg("default")
        .env("CONRUN_CONAN_BIN", &conan)
        .current_dir(vfs.root())
        .assert()
        .failure()
        .code(1);

    let output = assert.get_output();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        stdout.contains(":: failed to install tests: conan exited with status code 7"),
        "stdout: {}",
        stdout
    );
    assert!(
        stdout.contains(":: installed examples"),
        "stdout: {}",
        stdout
    );
    assert!(stderr.contains("1 of 2"), "stderr: {}", stderr);
    assert_eq!(vfs.recorded_args().len(), 2);
}

/// --ignore-failures restores a clean exit even when directories fail
#[cfg(unix)]
#[test]
fn ignore_failures_keeps_the_exit_code_clean() {
    let vfs = VirtualFileSystem::empty();
    let conan = vfs.conan_stand_in_with("exit 3");

    let assert = crate::cli!()
        .arg("install")
        .arg("Release")
        .arg("default")
        .arg("--ignore-failures")
        .env("CONRUN_CONAN_BIN", &conan)
        .current_dir(vfs.root())
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);

    assert!(
        stdout.contains(":: failed to install tests: conan exited with status code 3"),
        "stdout: {}",
        stdout
    );
    assert!(
        stdout.contains(":: ignoring 2 failed project directories"),
        "stdout: {}",
        stdout
    );
}

/// --dry-run prints every invocation without launching conan
#[cfg(unix)]
#[test]
fn dry_run_prints_without_running() {
    let vfs = VirtualFileSystem::empty();
    let conan = vfs.conan_stand_in();

    let assert = crate::cli!()
        .arg("install")
        .arg("Debug")
        .arg("default")
        .arg("--dry-run")
        .env("CONRUN_CONAN_BIN", &conan)
        .current_dir(vfs.root())
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);

    assert!(stdout.contains(":: would run"), "stdout: {}", stdout);
    assert!(
        stdout.contains(
            "install tests --install-folder build/modules --settings build_type=Debug --build missing"
        ),
        "stdout: {}",
        stdout
    );
    assert!(stdout.contains("install examples"), "stdout: {}", stdout);
    assert!(vfs.recorded_args().is_empty());
}

/// Targets and the install folder come from the configuration file
#[cfg(unix)]
#[test]
fn config_overrides_targets_and_install_folder() {
    let vfs = VirtualFileSystem::empty();
    let conan = vfs.conan_stand_in();
    vfs.write_config("[install]\ntargets = [\"lib\"]\nfolder = \"out/deps\"\n");

    crate::cli!()
        .arg("install")
        .arg("Release")
        .arg("default")
        .env("CONRUN_CONAN_BIN", &conan)
        .current_dir(vfs.root())
        .assert()
        .success();

    assert_eq!(
        vfs.recorded_args(),
        ["install lib --install-folder out/deps --settings build_type=Release --build missing"]
    );
}

/// The conan binary can be pinned in the configuration file
#[cfg(unix)]
#[test]
fn configured_binary_is_used_without_the_env_var() {
    let vfs = VirtualFileSystem::empty();
    let conan = vfs.conan_stand_in();
    vfs.write_config(&format!("[conan]\nbin = \"{}\"\n", conan.display()));

    crate::cli!()
        .arg("install")
        .arg("Release")
        .arg("default")
        .current_dir(vfs.root())
        .assert()
        .success();

    assert_eq!(vfs.recorded_args().len(), 2);
}

/// The environment variable wins over the configured binary
#[cfg(unix)]
#[test]
fn env_var_overrides_the_configured_binary() {
    let vfs = VirtualFileSystem::empty();
    let conan = vfs.conan_stand_in();
    vfs.write_config(&format!(
        "[conan]\nbin = \"{}\"\n",
        vfs.root().join("missing-conan").display()
    ));

    crate::cli!()
        .arg("install")
        .arg("Release")
        .arg("default")
        .env("CONRUN_CONAN_BIN", &conan)
        .current_dir(vfs.root())
        .assert()
        .success();

    assert_eq!(vfs.recorded_args().len(), 2);
}

/// The profiles directory can be set in the configuration file
#[cfg(unix)]
#[test]
fn configured_profiles_directory_is_used() {
    let vfs = VirtualFileSystem::empty();
    let conan = vfs.conan_stand_in();
    let profiles = vfs.profiles(&["linux-gcc11"]);
    vfs.write_config(&format!(
        "[install]\nprofiles = \"{}\"\n",
        profiles.display()
    ));

    crate::cli!()
        .arg("install")
        .arg("Release")
        .arg("linux-gcc11")
        .env("CONRUN_CONAN_BIN", &conan)
        .current_dir(vfs.root())
        .assert()
        .success();

    let recorded = vfs.recorded_args();
    let profile = profiles.join("linux-gcc11");

    assert!(
        recorded[0].ends_with(&format!("--profile:host {}", profile.display())),
        "recorded: {}",
        recorded[0]
    );
}

/// The environment variable wins over the configured profiles directory
#[cfg(unix)]
#[test]
fn profiles_env_var_overrides_the_configured_directory() {
    let vfs = VirtualFileSystem::empty();
    let conan = vfs.conan_stand_in();
    let profiles = vfs.profiles(&["linux-gcc11"]);
    vfs.write_config("[install]\nprofiles = \"/somewhere/else/profiles\"\n");

    crate::cli!()
        .arg("install")
        .arg("Release")
        .arg("linux-gcc11")
        .env("CONRUN_CONAN_BIN", &conan)
        .env("CONRUN_PROFILES", &profiles)
        .current_dir(vfs.root())
        .assert()
        .success();

    let recorded = vfs.recorded_args();
    let profile = profiles.join("linux-gcc11");

    assert!(
        recorded[0].ends_with(&format!("--profile:host {}", profile.display())),
        "recorded: {}",
        recorded[0]
    );
    assert!(
        !recorded[0].contains("/somewhere/else"),
        "recorded: {}",
        recorded[0]
    );
}

/// Without overrides the profiles directory is derived from the location
/// of the binary itself
#[cfg(unix)]
#[test]
fn profiles_fall_back_to_an_exe_relative_directory() {
    let vfs = VirtualFileSystem::empty();
    let conan = vfs.conan_stand_in();

    crate::cli!()
        .arg("install")
        .arg("Release")
        .arg("embedded")
        .env("CONRUN_CONAN_BIN", &conan)
        .current_dir(vfs.root())
        .assert()
        .success();

    let recorded = vfs.recorded_args();

    assert_eq!(recorded.len(), 2);
    assert!(
        recorded[0].ends_with("profiles/embedded"),
        "recorded: {}",
        recorded[0]
    );
}
