// Copyright (c) Contributors to the Isaac ROS CLI project.
// SPDX-License-Identifier: Apache-2.0

//! Snapshot of the process environment an invocation runs in.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::{
    BAREMETAL_ACTIVATED_ENV_VAR, DOCKER_ACTIVATED_ENV_VAR, WORKSPACE_CONFIG_ENV_VAR,
    WORKSPACE_ENV_VARS,
};

#[cfg(test)]
#[path = "./session_test.rs"]
mod session_test;

/// Variable set by python virtual environments to their root.
pub const VIRTUAL_ENV_VAR: &str = "VIRTUAL_ENV";

/// Variable naming the user who invoked sudo.
pub const SUDO_USER_VAR: &str = "SUDO_USER";

/// Environment variables visible to this invocation.
///
/// Captured once at startup and passed down explicitly, so activation guards
/// and command construction never read the live process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionEnv {
    vars: BTreeMap<String, String>,
}

impl SessionEnv {
    /// Capture the current process environment.
    ///
    /// Variables that are not valid unicode are skipped.
    pub fn capture() -> Self {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Value of `name` unless it is unset or empty.
    pub fn get_non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.is_empty())
    }

    /// Builder-style setter, mostly useful in tests.
    pub fn with<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// True when the marker variable `name` is set to `1`.
    pub fn marker_set(&self, name: &str) -> bool {
        self.get(name) == Some("1")
    }

    pub fn docker_activated(&self) -> bool {
        self.marker_set(DOCKER_ACTIVATED_ENV_VAR)
    }

    pub fn baremetal_activated(&self) -> bool {
        self.marker_set(BAREMETAL_ACTIVATED_ENV_VAR)
    }

    /// Root of the currently active python virtual environment, if any.
    pub fn active_virtual_env(&self) -> Option<PathBuf> {
        self.get_non_empty(VIRTUAL_ENV_VAR).map(PathBuf::from)
    }

    /// Workspace root for container activation, first recognized variable wins.
    pub fn workspace_root(&self) -> Option<&str> {
        WORKSPACE_ENV_VARS.iter().find_map(|name| self.get(name))
    }

    /// Workspace root that enables the workspace configuration scope.
    pub fn workspace_config_root(&self) -> Option<PathBuf> {
        self.get_non_empty(WORKSPACE_CONFIG_ENV_VAR).map(PathBuf::from)
    }

    pub fn sudo_user(&self) -> Option<&str> {
        self.get_non_empty(SUDO_USER_VAR)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SessionEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
