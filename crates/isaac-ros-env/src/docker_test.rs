// Copyright (c) Contributors to the Isaac ROS CLI project.
// SPDX-License-Identifier: Apache-2.0

use rstest::{fixture, rstest};
use std::path::Path;

use super::*;

const DEFAULTS: &str = r#"
docker:
  image:
    base_image_keys:
      - ROS_DISTRO
      - CUDA_VERSION
    additional_image_keys:
      - HF_TOKEN
  run:
    container_name: isaac_ros_dev_container
    platform: auto
"#;

#[fixture]
fn settings() -> DockerSettings {
    let doc = ConfigDocument::from_yaml(DEFAULTS, Path::new("<test>")).unwrap();
    DockerSettings::from_document(&doc).unwrap()
}

fn workspace_env() -> SessionEnv {
    SessionEnv::default().with("ISAAC_ROS_WS", "/workspaces/isaac_ros-dev")
}

#[rstest]
fn test_settings_from_document(settings: DockerSettings) {
    assert_eq!(
        settings.env_keys().collect::<Vec<_>>(),
        vec!["ROS_DISTRO", "CUDA_VERSION", "HF_TOKEN"]
    );
    assert_eq!(settings.run.container_name, "isaac_ros_dev_container");
}

#[rstest]
fn test_additional_keys_default_empty() {
    let doc = ConfigDocument::from_yaml(
        "docker:\n  image:\n    base_image_keys: [A]\n  run:\n    container_name: c\n    platform: x86_64\n",
        Path::new("<test>"),
    )
    .unwrap();

    let settings = DockerSettings::from_document(&doc).unwrap();

    assert!(settings.image.additional_image_keys.is_empty());
}

#[rstest]
#[case::no_section("other: 1\n")]
#[case::no_run("docker:\n  image:\n    base_image_keys: []\n")]
#[case::keys_not_list(
    "docker:\n  image:\n    base_image_keys: A\n  run:\n    container_name: c\n    platform: auto\n"
)]
fn test_settings_invalid(#[case] yaml: &str) {
    let doc = ConfigDocument::from_yaml(yaml, Path::new("<test>")).unwrap();
    assert!(matches!(
        DockerSettings::from_document(&doc),
        Err(Error::InvalidSetting { .. })
    ));
}

#[rstest]
fn test_command_argument_order(settings: DockerSettings) {
    let layout = Layout::rooted("/root");
    let cmd = build_run_dev_command(
        &settings,
        &ActivateOptions::default(),
        Platform::Amd64,
        "x86_64",
        &workspace_env(),
        &layout,
    )
    .unwrap();

    assert_eq!(cmd.program, layout.run_dev_script);
    assert_eq!(
        cmd.args,
        vec![
            "--env",
            "ROS_DISTRO",
            "--env",
            "CUDA_VERSION",
            "--env",
            "HF_TOKEN",
            "--container-name",
            "isaac_ros_dev_container",
            "--platform",
            "x86_64",
            "--isaac-ros-platform",
            "amd64",
            "--isaac-dir",
            "/workspaces/isaac_ros-dev",
        ]
    );
    assert_eq!(cmd.env.get(PLATFORM_ENV_VAR).map(String::as_str), Some("amd64"));
}

#[rstest]
#[case("aarch64")]
#[case("x86_64")]
#[case("some-unusual-machine")]
fn test_auto_platform_is_host_machine_verbatim(settings: DockerSettings, #[case] machine: &str) {
    let cmd = build_run_dev_command(
        &settings,
        &ActivateOptions::default(),
        Platform::Jetson,
        machine,
        &workspace_env(),
        &Layout::rooted("/root"),
    )
    .unwrap();

    assert_eq!(cmd.flag_value("--platform"), Some(machine));
}

#[rstest]
fn test_explicit_platform_overrides_host(mut settings: DockerSettings) {
    settings.run.platform = "linux/arm64".to_string();

    let cmd = build_run_dev_command(
        &settings,
        &ActivateOptions::default(),
        Platform::Amd64,
        "x86_64",
        &workspace_env(),
        &Layout::rooted("/root"),
    )
    .unwrap();

    assert_eq!(cmd.flag_value("--platform"), Some("linux/arm64"));
}

#[rstest]
fn test_isaac_dir_preferred_over_workspace(settings: DockerSettings) {
    let env = workspace_env().with("ISAAC_DIR", "/opt/isaac");

    let cmd = build_run_dev_command(
        &settings,
        &ActivateOptions::default(),
        Platform::Amd64,
        "x86_64",
        &env,
        &Layout::rooted("/root"),
    )
    .unwrap();

    assert_eq!(cmd.flag_value("--isaac-dir"), Some("/opt/isaac"));
}

#[rstest]
fn test_workspace_not_set(settings: DockerSettings) {
    let result = build_run_dev_command(
        &settings,
        &ActivateOptions::default(),
        Platform::Amd64,
        "x86_64",
        &SessionEnv::default(),
        &Layout::rooted("/root"),
    );

    assert!(matches!(result, Err(Error::WorkspaceNotSet)));
}

#[rstest]
fn test_flags_appended_only_when_set(settings: DockerSettings) {
    let options = ActivateOptions {
        verbose: true,
        build_local: true,
        no_cache: true,
        ..Default::default()
    };

    let cmd = build_run_dev_command(
        &settings,
        &options,
        Platform::Amd64,
        "x86_64",
        &workspace_env(),
        &Layout::rooted("/root"),
    )
    .unwrap();

    let tail: Vec<_> = cmd.args.iter().rev().take(3).rev().cloned().collect();
    assert_eq!(tail, vec!["--build-local", "--no-cache", "--verbose"]);
    assert!(!cmd.args.contains(&"--build".to_string()));
    assert!(!cmd.args.contains(&"--push".to_string()));
}
