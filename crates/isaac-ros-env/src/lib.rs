// Copyright (c) Contributors to the Isaac ROS CLI project.
// SPDX-License-Identifier: Apache-2.0

//! isaac-ros-env - Isaac ROS development environment core
//!
//! This crate provides the library behind the `isaac-ros` command: the layered
//! YAML configuration, the persisted environment mode, host platform detection
//! and the activation paths for each mode.
//!
//! # Overview
//!
//! A machine runs the Isaac ROS SDK in exactly one of three modes:
//!
//! - `docker`: development happens inside a container started by the
//!   packaged `run_dev.py` helper
//! - `venv`: an interactive shell with the CLI-managed Python virtual
//!   environment activated
//! - `baremetal`: an interactive shell directly on the host
//!
//! The mode is chosen once with `sudo isaac-ros init <mode>` and stored in
//! `/etc/isaac-ros-cli/environment.conf`. `isaac-ros activate` reads it back,
//! refuses to nest an activated session inside another one, and hands control
//! to the matching external process.
//!
//! # Configuration
//!
//! ```yaml
//! # ~/.config/isaac-ros-cli/config.yaml
//! docker:
//!   image:
//!     additional_image_keys:
//!       - HF_TOKEN
//!   run:
//!     container_name: my_dev_container
//! ```
//!
//! Files are merged from the packaged defaults, the system file, the user
//! file and the workspace file, later scopes winning key by key.

pub mod activate;
pub mod config;
pub mod docker;
pub mod error;
pub mod init;
pub mod launch;
pub mod layout;
pub mod merge;
pub mod mode;
pub mod platform;
pub mod session;
pub mod venv;

pub use activate::{
    activate, check_guards, prepare_activation, ActivateOptions, ActivationContext,
    ActivationPath, PreparedActivation,
};
pub use config::{ConfigDocument, ConfigScope, ConfigStore};
pub use docker::DockerSettings;
pub use error::{Error, Result};
pub use init::{initialize, InitHost, InitMode, InitOutcome, InitRequest};
pub use launch::{LaunchCommand, Launcher, ProcessLauncher};
pub use layout::Layout;
pub use merge::deep_merge;
pub use mode::{EnvironmentMode, ModeState};
pub use platform::{HostInfo, Platform};
pub use session::SessionEnv;

/// Key of the single line stored in the mode state file.
pub const ENVIRONMENT_MODE_KEY: &str = "ISAAC_ROS_ENVIRONMENT";

/// Variable carrying the detected platform identifier into activated sessions.
pub const PLATFORM_ENV_VAR: &str = "ISAAC_ROS_PLATFORM";

/// Set to `1` inside a session started by docker activation.
pub const DOCKER_ACTIVATED_ENV_VAR: &str = "ISAAC_ROS_DOCKER_ACTIVATED";

/// Set to `1` inside a session started by venv activation.
pub const VENV_ACTIVATED_ENV_VAR: &str = "ISAAC_ROS_VENV_ACTIVATED";

/// Set to `1` inside a session started by baremetal activation.
pub const BAREMETAL_ACTIVATED_ENV_VAR: &str = "ISAAC_ROS_BAREMETAL_ACTIVATED";

/// Workspace root variables, in lookup order.
pub const WORKSPACE_ENV_VARS: [&str; 2] = ["ISAAC_DIR", "ISAAC_ROS_WS"];

/// Workspace variable that also enables the workspace configuration scope.
pub const WORKSPACE_CONFIG_ENV_VAR: &str = "ISAAC_ROS_WS";

/// Group whose members may modify the managed virtual environment.
pub const VENV_GROUP_NAME: &str = "isaac-ros-cli";
