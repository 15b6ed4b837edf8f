// Copyright (c) Contributors to the Isaac ROS CLI project.
// SPDX-License-Identifier: Apache-2.0

//! Selecting the environment mode for a machine.

use std::fmt;

use crate::{EnvironmentMode, Error, ModeState, Result, VENV_GROUP_NAME};

#[cfg(test)]
#[path = "./init_test.rs"]
mod init_test;

/// Prompt shown before switching a machine to baremetal mode.
pub const BAREMETAL_WARNING: &str = "\
You selected 'baremetal' mode.

In this mode, pip installs will run against the system Python with the flag:
    --break-system-packages

This can overwrite or remove distro-managed files and may break your system.

Proceed and configure Isaac ROS CLI to use 'baremetal' mode?";

/// Modes that can be selected with `init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InitMode {
    Docker,
    Venv,
    Baremetal,
}

impl InitMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InitMode::Docker => "docker",
            InitMode::Venv => "venv",
            InitMode::Baremetal => "baremetal",
        }
    }
}

impl From<InitMode> for EnvironmentMode {
    fn from(mode: InitMode) -> Self {
        match mode {
            InitMode::Docker => EnvironmentMode::Docker,
            InitMode::Venv => EnvironmentMode::Venv,
            InitMode::Baremetal => EnvironmentMode::Baremetal,
        }
    }
}

impl fmt::Display for InitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Host interactions needed while selecting a mode.
pub trait InitHost {
    /// True when running with an effective uid of root.
    fn is_elevated(&self) -> bool;

    /// Ask the user to accept `prompt`; declining is `Ok(false)`.
    fn confirm(&self, prompt: &str) -> Result<bool>;

    /// Add `user` to the supplementary group `group`.
    fn add_user_to_group(&self, user: &str, group: &str) -> Result<()>;
}

/// A request to select a mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitRequest {
    pub mode: InitMode,

    /// Skip confirmation prompts.
    pub assume_yes: bool,

    /// The user who invoked sudo, needed for venv group membership.
    pub invoking_user: Option<String>,
}

/// What [`initialize`] changed, for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitOutcome {
    pub mode: InitMode,

    /// User added to the venv group, if any.
    pub group_member_added: Option<String>,
}

/// Check privileges, confirm and persist the requested mode.
///
/// Every check runs before the state file is touched, so a failure leaves
/// the previous mode in place.
pub fn initialize(
    request: &InitRequest,
    state: &ModeState,
    host: &dyn InitHost,
) -> Result<InitOutcome> {
    if !host.is_elevated() {
        return Err(Error::PrivilegeRequired(
            "This command requires administrator (sudo) privileges".to_owned(),
        ));
    }

    if request.mode == InitMode::Baremetal
        && !request.assume_yes
        && !host.confirm(BAREMETAL_WARNING)?
    {
        return Err(Error::Aborted);
    }

    let mut group_member_added = None;
    if request.mode == InitMode::Venv {
        let user = request.invoking_user.as_deref().ok_or_else(|| {
            Error::PrivilegeRequired(
                "Unable to determine invoking user -- are you running with sudo?".to_owned(),
            )
        })?;
        host.add_user_to_group(user, VENV_GROUP_NAME)?;
        tracing::info!(user, group = VENV_GROUP_NAME, "added user to venv group");
        group_member_added = Some(user.to_owned());
    }

    state.set_mode(&request.mode.into())?;

    Ok(InitOutcome {
        mode: request.mode,
        group_member_added,
    })
}
