// Copyright (c) Contributors to the Isaac ROS CLI project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;
use tempfile::TempDir;

use super::*;

fn provisioned(content: &str) -> (TempDir, ModeState) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("environment.conf");
    std::fs::write(&path, content).unwrap();
    (tmp, ModeState::new(path))
}

#[rstest]
fn test_load_missing_file() {
    let tmp = TempDir::new().unwrap();
    let state = ModeState::new(tmp.path().join("environment.conf"));

    match state.load_mode() {
        Err(Error::StateFileMissing(path)) => assert_eq!(path, state.path()),
        other => panic!("Expected StateFileMissing, got: {:?}", other),
    }
}

#[rstest]
fn test_load_missing_key() {
    let (_tmp, state) = provisioned("# managed by isaac-ros-cli\nOTHER=docker\n");

    assert!(matches!(
        state.load_mode(),
        Err(Error::StateKeyMissing { .. })
    ));
}

#[rstest]
#[case("ISAAC_ROS_ENVIRONMENT=uninitialized\n", EnvironmentMode::Uninitialized)]
#[case("ISAAC_ROS_ENVIRONMENT=docker\n", EnvironmentMode::Docker)]
#[case("ISAAC_ROS_ENVIRONMENT=docker-activated", EnvironmentMode::DockerActivated)]
#[case("OTHER=1\n  ISAAC_ROS_ENVIRONMENT=venv  \n", EnvironmentMode::Venv)]
#[case("ISAAC_ROS_ENVIRONMENT=baremetal\n", EnvironmentMode::Baremetal)]
#[case(
    "ISAAC_ROS_ENVIRONMENT=conda\n",
    EnvironmentMode::Unrecognized("conda".to_string())
)]
#[case(
    "ISAAC_ROS_ENVIRONMENT=\n",
    EnvironmentMode::Unrecognized(String::new())
)]
fn test_load_parses_value(#[case] content: &str, #[case] expected: EnvironmentMode) {
    let (_tmp, state) = provisioned(content);
    assert_eq!(state.load_mode().unwrap(), expected);
}

#[rstest]
fn test_set_mode_requires_existing_file() {
    let tmp = TempDir::new().unwrap();
    let state = ModeState::new(tmp.path().join("environment.conf"));

    let result = state.set_mode(&EnvironmentMode::Docker);

    assert!(matches!(result, Err(Error::StateFileMissing(_))));
    assert!(!state.path().exists(), "set_mode must not create the file");
}

#[rstest]
fn test_set_mode_writes_single_line() {
    let (_tmp, state) = provisioned("ISAAC_ROS_ENVIRONMENT=uninitialized\nstale=1\n");

    state.set_mode(&EnvironmentMode::Baremetal).unwrap();

    let content = std::fs::read_to_string(state.path()).unwrap();
    assert_eq!(content, "ISAAC_ROS_ENVIRONMENT=baremetal\n");
}

#[rstest]
fn test_round_trip_every_mode() {
    let (_tmp, state) = provisioned("");

    for mode in EnvironmentMode::KNOWN {
        state.set_mode(&mode).unwrap();
        assert_eq!(state.load_mode().unwrap(), mode);
    }
}

#[rstest]
fn test_unrecognized_display_is_raw() {
    let mode = EnvironmentMode::parse("  Docker ");
    assert_eq!(mode, EnvironmentMode::Unrecognized("Docker".to_string()));
    assert_eq!(mode.to_string(), "Docker");
}
