// Copyright (c) Contributors to the Isaac ROS CLI project.
// SPDX-License-Identifier: Apache-2.0

//! Error types for environment operations.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Convenience Result type with the crate Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or activating an environment.
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// None of the configuration scopes exist on disk
    #[error("No Isaac ROS CLI configuration files found. Tried: {}", display_paths(.0))]
    #[diagnostic(
        code(isaac_ros::config_not_found),
        help("Reinstall the isaac-ros-cli package to restore the default configuration")
    )]
    ConfigNotFound(Vec<PathBuf>),

    /// A configuration file exists but is not a YAML mapping
    #[error("Configuration file {path:?} must contain a valid YAML mapping at the top level")]
    #[diagnostic(code(isaac_ros::config_malformed))]
    ConfigMalformed { path: PathBuf, reason: String },

    /// Attempt to write the packaged configuration
    #[error("Cannot write to the read-only configuration scope")]
    #[diagnostic(
        code(isaac_ros::config_read_only),
        help("Use the system, user or workspace scope instead")
    )]
    ConfigReadOnly,

    /// A setting has the wrong shape for the consumer reading it
    #[error("Invalid configuration value for '{key}': {reason}")]
    #[diagnostic(code(isaac_ros::invalid_setting))]
    InvalidSetting { key: String, reason: String },

    /// The mode state file has not been provisioned
    #[error("Environment mode configuration file not found at {0:?}")]
    #[diagnostic(
        code(isaac_ros::state_file_missing),
        help("This file is created during package installation; reinstall the isaac-ros-cli package")
    )]
    StateFileMissing(PathBuf),

    /// The mode state file lacks the mode key
    #[error("{key} not found in environment mode configuration file {path:?}")]
    #[diagnostic(code(isaac_ros::state_key_missing))]
    StateKeyMissing { path: PathBuf, key: String },

    /// The stored mode is not one of the known literals
    #[error("Invalid environment configuration: {0}")]
    #[diagnostic(
        code(isaac_ros::invalid_mode),
        help("Run 'sudo isaac-ros init <docker|venv|baremetal>' to select a valid mode")
    )]
    InvalidMode(String),

    /// Activation attempted before a mode was chosen
    #[error("Environment mode is not set")]
    #[diagnostic(
        code(isaac_ros::not_initialized),
        help("Please run 'sudo isaac-ros init <environment>' first")
    )]
    NotInitialized,

    /// Activation attempted from inside an already activated session
    #[error("Isaac ROS {0} environment is already activated in this shell")]
    #[diagnostic(
        code(isaac_ros::already_active),
        help("Type 'exit' to leave the current session before activating again")
    )]
    AlreadyActive(&'static str),

    /// A docker-only activation flag was given for another mode
    #[error("{flag} is only valid for the Docker environment mode")]
    #[diagnostic(code(isaac_ros::docker_only_option))]
    DockerOnlyOption { flag: &'static str },

    /// Host architecture is neither x86_64 nor aarch64
    #[error("Unsupported architecture: {0}")]
    #[diagnostic(code(isaac_ros::unsupported_architecture))]
    UnsupportedArchitecture(String),

    /// aarch64 host without any known board marker
    #[error("Unknown {arch} platform variant: none of {} exist", display_paths(.markers))]
    #[diagnostic(code(isaac_ros::unknown_variant))]
    UnknownVariant { arch: String, markers: Vec<PathBuf> },

    /// Docker activation needs a workspace root
    #[error("ISAAC_DIR or ISAAC_ROS_WS environment variable is not set")]
    #[diagnostic(
        code(isaac_ros::workspace_not_set),
        help("Export ISAAC_ROS_WS=<path to your workspace> and try again")
    )]
    WorkspaceNotSet,

    /// The managed virtual environment does not exist
    #[error("Isaac ROS virtual environment not found at {0:?}")]
    #[diagnostic(
        code(isaac_ros::environment_missing),
        help("This venv should be created during package installation. Please reinstall the isaac-ros-cli package")
    )]
    EnvironmentMissing(PathBuf),

    /// The managed virtual environment exists but is incomplete
    #[error("Virtual environment at {venv:?} appears to be corrupted: {missing:?} not found")]
    #[diagnostic(
        code(isaac_ros::environment_corrupted),
        help("Please reinstall the isaac-ros-cli package")
    )]
    EnvironmentCorrupted { venv: PathBuf, missing: PathBuf },

    /// Mode initialization requires root
    #[error("{0}")]
    #[diagnostic(code(isaac_ros::privilege_required), help("Please rerun with sudo"))]
    PrivilegeRequired(String),

    /// An external command could not be run or reported failure
    #[error("Failed to run {command}: {reason}")]
    #[diagnostic(code(isaac_ros::delegated_command_failed))]
    DelegatedCommandFailed { command: String, reason: String },

    /// The user declined a confirmation prompt
    #[error("Aborted. No changes made.")]
    #[diagnostic(code(isaac_ros::aborted))]
    Aborted,

    /// Failed to read file
    #[error("Failed to read file: {path:?}")]
    #[diagnostic(code(isaac_ros::read_failed))]
    ReadFailed {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// Failed to write file
    #[error("Failed to write file: {path:?}")]
    #[diagnostic(code(isaac_ros::write_failed))]
    WriteFailed {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// A merged configuration could not be rendered back to YAML
    #[error("Failed to serialize configuration for {path:?}")]
    #[diagnostic(code(isaac_ros::serialize_failed))]
    SerializeFailed {
        path: PathBuf,
        #[source]
        error: serde_yaml::Error,
    },

    /// IO error passthrough
    #[error(transparent)]
    #[diagnostic(code(isaac_ros::io_error))]
    Io(#[from] std::io::Error),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
