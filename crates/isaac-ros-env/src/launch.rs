// Copyright (c) Contributors to the Isaac ROS CLI project.
// SPDX-License-Identifier: Apache-2.0

//! Handoff to external processes.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::process::Command;

use crate::{Error, Result};

#[cfg(test)]
#[path = "./launch_test.rs"]
mod launch_test;

/// A process to run in the foreground until it exits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: PathBuf,
    pub args: Vec<String>,

    /// Variables added on top of the inherited environment.
    pub env: BTreeMap<String, String>,
}

impl LaunchCommand {
    pub fn new<P: Into<PathBuf>>(program: P) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: BTreeMap::new(),
        }
    }

    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn env<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Value passed after `flag`, if the flag is present.
    pub fn flag_value(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }
}

impl fmt::Display for LaunchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Runs a [`LaunchCommand`] to completion.
pub trait Launcher {
    /// Block until the process exits and return its exit code.
    fn launch(&self, command: &LaunchCommand) -> Result<i32>;
}

/// Spawns real child processes that inherit stdio and the environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(&self, command: &LaunchCommand) -> Result<i32> {
        tracing::info!(%command, "launching");
        let status = Command::new(&command.program)
            .args(&command.args)
            .envs(&command.env)
            .status()
            .map_err(|e| Error::DelegatedCommandFailed {
                command: command.program.display().to_string(),
                reason: e.to_string(),
            })?;

        match status.code() {
            Some(code) => Ok(code),
            None => {
                tracing::warn!(%command, %status, "process terminated by a signal");
                Ok(1)
            }
        }
    }
}
