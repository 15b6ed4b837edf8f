// Copyright (c) Contributors to the Isaac ROS CLI project.
// SPDX-License-Identifier: Apache-2.0

//! Activation of the CLI-managed python virtual environment.

use std::path::{Path, PathBuf};

use crate::{
    Error, LaunchCommand, Layout, Platform, Result, SessionEnv, PLATFORM_ENV_VAR,
    VENV_ACTIVATED_ENV_VAR,
};

/// Variable telling the activation helper where the venv lives.
pub const VENV_PATH_ENV_VAR: &str = "ISAAC_ROS_VENV_PATH";

/// True when the managed venv is the one active in this session.
pub fn is_venv_activated(env: &SessionEnv, layout: &Layout) -> bool {
    match env.active_virtual_env() {
        Some(active) => resolve(&active) == resolve(&layout.venv_dir),
        None => false,
    }
}

fn resolve(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| path.to_owned())
}

/// Check the venv is intact and build the shell that activates it.
pub fn build_venv_shell(platform: Platform, layout: &Layout) -> Result<LaunchCommand> {
    if !layout.venv_dir.is_dir() {
        return Err(Error::EnvironmentMissing(layout.venv_dir.clone()));
    }
    tracing::debug!(path = ?layout.venv_dir, "found managed virtual environment");

    for required in [layout.venv_activate_script(), layout.venv_activate_helper.clone()] {
        if !required.is_file() {
            return Err(Error::EnvironmentCorrupted {
                venv: layout.venv_dir.clone(),
                missing: required,
            });
        }
    }

    Ok(LaunchCommand::new("bash")
        .arg("--rcfile")
        .arg(layout.venv_activate_helper.display().to_string())
        .env(VENV_PATH_ENV_VAR, layout.venv_dir.display().to_string())
        .env(PLATFORM_ENV_VAR, platform.as_str())
        .env("PYTHONEXECUTABLE", layout.venv_python().display().to_string())
        .env(VENV_ACTIVATED_ENV_VAR, "1"))
}
