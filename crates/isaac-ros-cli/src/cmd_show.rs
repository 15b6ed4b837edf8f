// Copyright (c) Contributors to the Isaac ROS CLI project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `isaac-ros show` command.

use clap::Args;
use colored::Colorize;
use isaac_ros_env::venv::is_venv_activated;
use isaac_ros_env::{HostInfo, Layout, ModeState, SessionEnv};
use miette::Result;

/// Display the current mode and detected platform
#[derive(Debug, Args)]
pub struct CmdShow {}

impl CmdShow {
    pub fn run(&mut self) -> Result<i32> {
        let layout = Layout::system();
        let env = SessionEnv::capture();

        let mode = match ModeState::new(&layout.state_file).load_mode() {
            Ok(mode) => mode.to_string().green(),
            Err(err) => err.to_string().red(),
        };
        println!("{:<10} {}", "mode:".bold(), mode);

        let platform = match HostInfo::current(&layout).and_then(|host| host.detect()) {
            Ok(platform) => platform.to_string().green(),
            Err(err) => err.to_string().red(),
        };
        println!("{:<10} {}", "platform:".bold(), platform);

        let active = [
            ("docker", env.docker_activated()),
            ("venv", is_venv_activated(&env, &layout)),
            ("baremetal", env.baremetal_activated()),
        ]
        .into_iter()
        .find_map(|(name, set)| set.then_some(name));
        let active = match active {
            Some(name) => name.yellow(),
            None => "no".normal(),
        };
        println!("{:<10} {}", "active:".bold(), active);

        Ok(0)
    }
}
