// Copyright (c) Contributors to the Isaac ROS CLI project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `isaac-ros init` command.

use std::process::Command;

use clap::{Args, ValueEnum};
use colored::Colorize;
use isaac_ros_env::session::SUDO_USER_VAR;
use isaac_ros_env::{InitHost, InitMode, InitRequest, Layout, ModeState, SessionEnv};
use miette::Result;

/// Initialize the Isaac ROS development environment mode
///
/// Requires sudo to modify system configuration.
#[derive(Debug, Args)]
pub struct CmdInit {
    /// Environment mode to use on this machine
    #[clap(value_enum)]
    environment: ModeArg,

    /// Do not prompt for confirmation (non-interactive)
    #[clap(long)]
    yes: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Docker,
    Venv,
    Baremetal,
}

impl From<ModeArg> for InitMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Docker => InitMode::Docker,
            ModeArg::Venv => InitMode::Venv,
            ModeArg::Baremetal => InitMode::Baremetal,
        }
    }
}

impl CmdInit {
    pub fn run(&mut self) -> Result<i32> {
        let layout = Layout::system();
        let env = SessionEnv::capture();
        let state = ModeState::new(&layout.state_file);

        let request = InitRequest {
            mode: self.environment.into(),
            assume_yes: self.yes,
            invoking_user: env.sudo_user().map(String::from),
        };

        let outcome = isaac_ros_env::initialize(&request, &state, &SystemHost)?;

        if let Some(user) = &outcome.group_member_added {
            print_venv_instructions(user);
        }
        println!("Set environment mode to {}.", outcome.mode);
        Ok(0)
    }
}

fn print_venv_instructions(user: &str) {
    let group = isaac_ros_env::VENV_GROUP_NAME;
    println!();
    println!("You selected 'venv' mode.");
    println!();
    println!("In this mode, pip installs will run in the Isaac ROS CLI-managed virtual environment.");
    println!();
    println!("Your user '{user}' has been automatically added to group '{group}'.");
    println!("Only members of '{group}' can modify the virtual environment.");
    println!();
    let follow_up = format!(
        "Open a new shell or run the following command for membership to take effect:\n\
        \tnewgrp {group}\n\
        \n\
        Add other users who need write access with:\n\
        \tsudo usermod -aG {group} <username>"
    );
    println!("{}", follow_up.yellow().bold());
    println!();
}

/// The real machine: effective uid, terminal prompt and `usermod`.
struct SystemHost;

impl InitHost for SystemHost {
    fn is_elevated(&self) -> bool {
        nix::unistd::geteuid().is_root()
    }

    fn confirm(&self, prompt: &str) -> isaac_ros_env::Result<bool> {
        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| isaac_ros_env::Error::DelegatedCommandFailed {
                command: "confirmation prompt".to_owned(),
                reason: e.to_string(),
            })
    }

    fn add_user_to_group(&self, user: &str, group: &str) -> isaac_ros_env::Result<()> {
        let status = Command::new("usermod")
            .args(["--append", "--groups", group, user])
            .status()
            .map_err(|e| isaac_ros_env::Error::DelegatedCommandFailed {
                command: "usermod".to_owned(),
                reason: e.to_string(),
            })?;

        if !status.success() {
            return Err(isaac_ros_env::Error::DelegatedCommandFailed {
                command: "usermod".to_owned(),
                reason: format!(
                    "failed to add user '{user}' to group '{group}' ({status}); \
                     is {SUDO_USER_VAR} correct?"
                ),
            });
        }
        Ok(())
    }
}
