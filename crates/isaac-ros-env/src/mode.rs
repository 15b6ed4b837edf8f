// Copyright (c) Contributors to the Isaac ROS CLI project.
// SPDX-License-Identifier: Apache-2.0

//! The persisted environment mode.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::{Error, Result, ENVIRONMENT_MODE_KEY};

#[cfg(test)]
#[path = "./mode_test.rs"]
mod mode_test;

/// Which activation strategy the machine is configured for.
///
/// Values read from disk that match no known literal are kept verbatim in
/// [`EnvironmentMode::Unrecognized`] so they can be reported later.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EnvironmentMode {
    Uninitialized,
    Docker,
    /// Already inside a session started by docker activation.
    DockerActivated,
    Venv,
    Baremetal,
    Unrecognized(String),
}

impl EnvironmentMode {
    /// Every known mode, in declaration order.
    pub const KNOWN: [EnvironmentMode; 5] = [
        EnvironmentMode::Uninitialized,
        EnvironmentMode::Docker,
        EnvironmentMode::DockerActivated,
        EnvironmentMode::Venv,
        EnvironmentMode::Baremetal,
    ];

    /// Parse a raw value, never failing.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "uninitialized" => Self::Uninitialized,
            "docker" => Self::Docker,
            "docker-activated" => Self::DockerActivated,
            "venv" => Self::Venv,
            "baremetal" => Self::Baremetal,
            other => Self::Unrecognized(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Docker => "docker",
            Self::DockerActivated => "docker-activated",
            Self::Venv => "venv",
            Self::Baremetal => "baremetal",
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl fmt::Display for EnvironmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reads and writes the mode state file.
///
/// The file is provisioned by the package installer with fixed permissions,
/// so it is never created here: reads work for everyone, writes need root.
#[derive(Debug, Clone)]
pub struct ModeState {
    path: PathBuf,
}

impl ModeState {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored mode.
    pub fn load_mode(&self) -> Result<EnvironmentMode> {
        if !self.path.is_file() {
            return Err(Error::StateFileMissing(self.path.clone()));
        }
        let content = std::fs::read_to_string(&self.path).map_err(|e| Error::ReadFailed {
            path: self.path.clone(),
            error: e,
        })?;

        content
            .lines()
            .filter_map(|line| line.trim().split_once('='))
            .find(|(key, _)| *key == ENVIRONMENT_MODE_KEY)
            .map(|(_, value)| EnvironmentMode::parse(value))
            .ok_or_else(|| Error::StateKeyMissing {
                path: self.path.clone(),
                key: ENVIRONMENT_MODE_KEY.to_owned(),
            })
    }

    /// Replace the file contents with a single line recording `mode`.
    pub fn set_mode(&self, mode: &EnvironmentMode) -> Result<()> {
        if !self.path.is_file() {
            return Err(Error::StateFileMissing(self.path.clone()));
        }
        std::fs::write(&self.path, format!("{ENVIRONMENT_MODE_KEY}={mode}\n")).map_err(|e| {
            Error::WriteFailed {
                path: self.path.clone(),
                error: e,
            }
        })?;
        tracing::info!(%mode, path = ?self.path, "environment mode updated");
        Ok(())
    }
}
