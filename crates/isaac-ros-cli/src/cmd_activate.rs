// Copyright (c) Contributors to the Isaac ROS CLI project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `isaac-ros activate` command.

use clap::error::ErrorKind;
use clap::{Args, CommandFactory};
use colored::Colorize;
use isaac_ros_env::{
    ActivateOptions, ActivationContext, ActivationPath, Error, HostInfo, Launcher, Layout,
    ModeState, ProcessLauncher, SessionEnv,
};
use miette::Result;

/// Activate Isaac ROS development environment based on saved configuration
#[derive(Debug, Args)]
pub struct CmdActivate {
    /// Enable verbose output
    #[clap(long)]
    verbose: bool,

    /// Docker only: Build the requested Docker image remotely if missing
    #[clap(long)]
    build: bool,

    /// Docker only: Build the requested Docker image locally if missing
    #[clap(long)]
    build_local: bool,

    /// Docker only: Push the image to the target registry when complete
    #[clap(long)]
    push: bool,

    /// Docker only: Use cached Docker image if available
    #[clap(long)]
    use_cached_build_image: bool,

    /// Docker only: Do not use Docker layer cache
    #[clap(long)]
    no_cache: bool,
}

impl CmdActivate {
    fn options(&self) -> ActivateOptions {
        ActivateOptions {
            verbose: self.verbose,
            build: self.build,
            build_local: self.build_local,
            push: self.push,
            use_cached_build_image: self.use_cached_build_image,
            no_cache: self.no_cache,
        }
    }

    pub fn run(&mut self) -> Result<i32> {
        let layout = Layout::system();
        let mode = ModeState::new(&layout.state_file).load_mode()?;
        let options = self.options();

        if let Err(err @ Error::DockerOnlyOption { .. }) = options.check_mode(&mode) {
            crate::Opt::command()
                .error(ErrorKind::ArgumentConflict, err.to_string())
                .exit();
        }

        let host = HostInfo::current(&layout)?;
        let ctx = ActivationContext {
            env: SessionEnv::capture(),
            host,
            layout,
        };

        let prepared = isaac_ros_env::prepare_activation(&mode, &options, &ctx)?;
        tracing::info!(
            mode = %mode,
            platform = %prepared.platform,
            "activating environment"
        );

        match prepared.path {
            ActivationPath::Baremetal => {
                println!("{}", "🤖 Isaac ROS Environment Active".green().bold());
                println!("   Type 'exit' or press Ctrl+D to exit and return to your original shell");
                println!();
            }
            ActivationPath::Venv => {
                println!(
                    "Found Isaac ROS virtual environment at '{}'",
                    ctx.layout.venv_dir.display()
                );
                println!("Activating Isaac ROS virtual environment...");
            }
            ActivationPath::Docker => {}
        }

        let code = ProcessLauncher.launch(&prepared.command)?;

        if prepared.path == ActivationPath::Baremetal {
            println!("Exiting Isaac ROS Environment...");
        }
        Ok(prepared.path.exit_code(code))
    }
}
