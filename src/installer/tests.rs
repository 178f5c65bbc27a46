use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use super::*;
use crate::operator::ScriptedChannel;
use crate::platform::Architecture;
use crate::test_fixtures::{FakeShell, ScriptedOperator};

const FOCAL_LISTING: &str = r#"<html><head><title>Index of /erfan/focal/</title></head>
<body><h1>Index of /erfan/focal/</h1><hr><pre>
<a href="../">../</a>
<a href="data_1.0_all.deb">data_1.0_all.deb</a>
<a href="waydroid_1.2.0_arm64.deb">waydroid_1.2.0_arm64.deb</a>
</pre><hr></body></html>"#;

struct Host {
    _temp: TempDir,
    config: InstallerConfig,
    rc_file: PathBuf,
}

impl Host {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let rc_file = temp.path().join(".bashrc");
        fs::write(&rc_file, "# bashrc\n").unwrap();
        let config = InstallerConfig {
            download_dir: Some(temp.path().join("downloads")),
            shell_rc: Some(rc_file.clone()),
            ..InstallerConfig::default()
        };
        Self {
            _temp: temp,
            config,
            rc_file,
        }
    }

    fn rc_content(&self) -> String {
        fs::read_to_string(&self.rc_file).unwrap()
    }
}

fn focal_shell() -> FakeShell {
    FakeShell::arm64_focal().respond("erfan/focal", FOCAL_LISTING)
}

fn aborted_at(outcome: &RunOutcome) -> Option<InstallState> {
    match outcome {
        RunOutcome::Aborted { step, .. } => Some(*step),
        RunOutcome::Completed => None,
    }
}

#[test]
fn test_end_to_end_arm64_focal() {
    let host = Host::new();
    let shell = focal_shell();
    let operator = ScriptedOperator::new();
    let mut orchestrator = InstallOrchestrator::new(&host.config, &shell, &operator);

    let outcome = orchestrator.run();

    assert!(outcome.is_success(), "{outcome:?}");
    assert_eq!(orchestrator.state(), InstallState::Completed);
    assert_eq!(
        orchestrator.platform(),
        Some(&Platform::new(Architecture::Arm64, "focal", "wayland"))
    );

    // only the all-marked package goes through the repository sweep
    let expected = host
        .config
        .download_dir
        .clone()
        .unwrap()
        .join("focal")
        .join("data_1.0_all.deb");
    assert_eq!(orchestrator.installed(), &[expected]);
    assert_eq!(shell.count("dpkg -i"), 1);
    assert_eq!(shell.count("waydroid_1.2.0_arm64.deb"), 0);

    assert!(shell.ran("sudo apt-get install -q python3 curl lxc"));
    assert!(shell.ran("sudo apt-get -q update"));
    assert!(shell.ran("sudo apt-get install -q waydroid"));
    assert!(shell.ran("sudo waydroid init"));

    for alias in &host.config.aliases {
        assert!(host.rc_content().contains(alias.as_str()));
    }
}

#[test]
fn test_commands_run_in_step_order() {
    let host = Host::new();
    let shell = focal_shell();
    let operator = ScriptedOperator::new();
    InstallOrchestrator::new(&host.config, &shell, &operator).run();

    let commands = shell.commands();
    let position = |needle: &str| {
        commands
            .iter()
            .position(|c| c.contains(needle))
            .unwrap_or_else(|| panic!("{needle} never ran"))
    };

    assert!(position("uname -m") < position("lsb_release -sc"));
    assert!(position("lsb_release -sc") < position("XDG_SESSION_TYPE"));
    assert!(position("XDG_SESSION_TYPE") < position("python3 curl lxc"));
    assert!(position("python3 curl lxc") < position("waydroid.gpg"));
    assert!(position("waydroid.gpg") < position("sudo tee"));
    assert!(position("sudo tee") < position("apt-get -q update"));
    assert!(position("apt-get -q update") < position("mkdir -p"));
    assert!(position("mkdir -p") < position("dpkg -i"));
    assert!(position("dpkg -i") < position("apt-get install -q waydroid"));
    assert!(position("apt-get install -q waydroid") < position("waydroid init"));
}

#[test]
fn test_history_visits_every_state() {
    let host = Host::new();
    let shell = focal_shell();
    let operator = ScriptedOperator::new();
    let mut orchestrator = InstallOrchestrator::new(&host.config, &shell, &operator);
    orchestrator.run();

    assert_eq!(
        orchestrator.history(),
        &[
            InstallState::Idle,
            InstallState::CheckingPrerequisites,
            InstallState::InstallingDependencies,
            InstallState::ConfiguringRepository,
            InstallState::InstallingRepoPackages,
            InstallState::InstallingApplication,
            InstallState::ConfiguringAliases,
            InstallState::Completed,
        ]
    );
}

#[test]
fn test_first_failure_aborts_and_nothing_later_runs() {
    // (failing command, step it aborts, command that must never run)
    let cases = [
        (
            "apt-get install -q python3",
            InstallState::InstallingDependencies,
            "waydroid.gpg",
        ),
        ("sudo curl", InstallState::ConfiguringRepository, "sudo tee"),
        (
            "apt-get -q update",
            InstallState::ConfiguringRepository,
            "erfan/focal",
        ),
        ("mkdir -p", InstallState::InstallingRepoPackages, "dpkg -i"),
        (
            "dpkg -i",
            InstallState::InstallingRepoPackages,
            "apt-get install -q waydroid",
        ),
        (
            "apt-get install -q waydroid",
            InstallState::InstallingApplication,
            "waydroid init",
        ),
    ];

    for (failing, step, never) in cases {
        let host = Host::new();
        let shell = FakeShell::arm64_focal()
            .fail(failing)
            .respond("erfan/focal", FOCAL_LISTING);
        let operator = ScriptedOperator::new();
        let mut orchestrator = InstallOrchestrator::new(&host.config, &shell, &operator);

        let outcome = orchestrator.run();

        assert_eq!(aborted_at(&outcome), Some(step), "failing {failing}");
        assert_eq!(outcome.exit_code(), 1);
        assert_eq!(orchestrator.state(), InstallState::Aborted);
        assert!(!shell.ran(never), "{never} ran after {failing} failed");
        assert_eq!(host.rc_content(), "# bashrc\n", "aliases written after abort");
        assert!(
            !orchestrator.history().contains(&InstallState::Completed),
            "completed after {failing} failed"
        );
    }
}

#[test]
fn test_listing_fetch_failure_aborts_repo_step() {
    let host = Host::new();
    let shell = FakeShell::arm64_focal().fail("erfan/focal");
    let operator = ScriptedOperator::new();
    let outcome = InstallOrchestrator::new(&host.config, &shell, &operator).run();

    assert_eq!(
        aborted_at(&outcome),
        Some(InstallState::InstallingRepoPackages)
    );
    assert!(!shell.ran("dpkg -i"));
    assert!(!shell.ran("waydroid init"));
}

#[test]
fn test_unsupported_architecture_aborts_before_mutation() {
    let host = Host::new();
    let shell = FakeShell::new().respond("uname -m", "mips64");
    let operator = ScriptedOperator::new();
    let outcome = InstallOrchestrator::new(&host.config, &shell, &operator).run();

    let RunOutcome::Aborted { step, cause } = outcome else {
        panic!("expected abort");
    };
    assert_eq!(step, InstallState::CheckingPrerequisites);
    assert!(cause.is_precondition());
    assert!(matches!(cause, WaydrError::UnsupportedPlatform { .. }));
    assert_eq!(shell.commands(), vec!["uname -m"]);
}

#[test]
fn test_unsupported_distro_aborts_before_mutation() {
    let host = Host::new();
    let shell = FakeShell::new()
        .respond("uname -m", "x86_64")
        .respond("lsb_release -sc", "jammy");
    let operator = ScriptedOperator::new();
    let outcome = InstallOrchestrator::new(&host.config, &shell, &operator).run();

    assert_eq!(
        aborted_at(&outcome),
        Some(InstallState::CheckingPrerequisites)
    );
    assert!(!shell.ran("sudo"));
}

#[test]
fn test_wrong_session_aborts_before_mutation() {
    let host = Host::new();
    let shell = FakeShell::new()
        .respond("uname -m", "aarch64")
        .respond("lsb_release -sc", "focal")
        .respond("echo $XDG_SESSION_TYPE", "x11");
    let operator = ScriptedOperator::new();
    let outcome = InstallOrchestrator::new(&host.config, &shell, &operator).run();

    let RunOutcome::Aborted { cause, .. } = outcome else {
        panic!("expected abort");
    };
    assert!(matches!(cause, WaydrError::UnsupportedSession { .. }));
    assert!(!shell.ran("sudo"));
}

#[test]
fn test_failed_probe_falls_back_to_operator() {
    let host = Host::new();
    let shell = FakeShell::new()
        .fail("uname -m")
        .fail("lsb_release")
        .respond("echo $XDG_SESSION_TYPE", "wayland")
        .respond("erfan/bullseye", FOCAL_LISTING);
    let operator = ScriptedOperator::new().answers(["x86_64", "bullseye"]);
    let mut orchestrator = InstallOrchestrator::new(&host.config, &shell, &operator);

    assert!(orchestrator.run().is_success());
    assert_eq!(
        orchestrator.platform(),
        Some(&Platform::new(Architecture::Amd64, "bullseye", "wayland"))
    );
    // neither listed package is amd64
    assert!(orchestrator.installed().is_empty());
    assert!(!shell.ran("dpkg -i"));
}

#[test]
fn test_non_interactive_mode_cannot_answer_probe_prompts() {
    let host = Host::new();
    let shell = FakeShell::new().fail("uname -m");
    let operator = ScriptedChannel::new(true);
    let outcome = InstallOrchestrator::new(&host.config, &shell, &operator).run();

    let RunOutcome::Aborted { step, cause } = outcome else {
        panic!("expected abort");
    };
    assert_eq!(step, InstallState::CheckingPrerequisites);
    assert!(matches!(cause, WaydrError::PromptUnavailable { .. }));
}

#[test]
fn test_assume_yes_reaches_package_manager() {
    let host = Host::new();
    let shell = focal_shell();
    let operator = ScriptedOperator::new();
    let outcome = InstallOrchestrator::new(&host.config, &shell, &operator)
        .assume_yes(true)
        .run();

    assert!(outcome.is_success());
    assert!(shell.ran("sudo apt-get install -q -y python3 curl lxc"));
    assert!(shell.ran("|| sudo apt-get install -f -y"));
    assert!(shell.ran("sudo apt-get install -q -y waydroid"));
}

#[test]
fn test_alias_failure_is_not_fatal() {
    let mut host = Host::new();
    let missing = host.rc_file.with_file_name("missing_rc");
    host.config.shell_rc = Some(missing.clone());
    let shell = focal_shell();
    let operator = ScriptedOperator::new();
    let mut orchestrator = InstallOrchestrator::new(&host.config, &shell, &operator);

    assert!(orchestrator.run().is_success());
    assert_eq!(orchestrator.state(), InstallState::Completed);
    assert!(!missing.exists());
}

#[test]
fn test_declined_aliases_leave_rc_untouched() {
    let host = Host::new();
    let shell = focal_shell();
    let operator = ScriptedOperator::new().confirms([false]);
    let outcome = InstallOrchestrator::new(&host.config, &shell, &operator).run();

    assert!(outcome.is_success());
    assert_eq!(host.rc_content(), "# bashrc\n");
    assert_eq!(operator.questions(), vec!["create these aliases?"]);
}

#[test]
fn test_rerun_does_not_duplicate_aliases() {
    let host = Host::new();
    for _ in 0..2 {
        let shell = focal_shell();
        let operator = ScriptedOperator::new();
        assert!(
            InstallOrchestrator::new(&host.config, &shell, &operator)
                .run()
                .is_success()
        );
    }

    let content = host.rc_content();
    for alias in &host.config.aliases {
        let lines = content.lines().filter(|l| l.trim() == alias.as_str()).count();
        assert_eq!(lines, 1, "{alias}");
    }
}

#[test]
fn test_empty_listing_skips_sweep() {
    let host = Host::new();
    let shell = FakeShell::arm64_focal();
    let operator = ScriptedOperator::new();
    let mut orchestrator = InstallOrchestrator::new(&host.config, &shell, &operator);

    assert!(orchestrator.run().is_success());
    assert!(orchestrator.installed().is_empty());
    assert!(!shell.ran("mkdir -p"));
    assert!(shell.ran("sudo waydroid init"));
}

#[test]
fn test_only_alias_step_is_optional() {
    let optional: Vec<_> = STEPS
        .iter()
        .filter(|step| !step.abort_on_failure)
        .map(|step| step.state)
        .collect();
    assert_eq!(optional, vec![InstallState::ConfiguringAliases]);
    assert!(STEPS.iter().all(|step| !step.state.is_terminal()));
}

#[test]
fn test_state_titles() {
    assert_eq!(InstallState::ConfiguringRepository.title(), "Unified install");
    assert_eq!(
        InstallState::InstallingRepoPackages.to_string(),
        "Repo packages install"
    );
    assert!(InstallState::Aborted.is_terminal());
    assert!(!InstallState::Idle.is_terminal());
}
