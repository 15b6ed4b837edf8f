// Copyright (c) Contributors to the Isaac ROS CLI project.
// SPDX-License-Identifier: Apache-2.0

//! isaac-ros - Isaac ROS development environment CLI

use clap::{Parser, Subcommand};
use miette::Result;

mod cmd_activate;
mod cmd_config;
mod cmd_init;
mod cmd_show;

use cmd_activate::CmdActivate;
use cmd_config::CmdConfig;
use cmd_init::CmdInit;
use cmd_show::CmdShow;


#[derive(Parser)]
#[clap(
    name = "isaac-ros",
    about = "Isaac ROS development environment manager",
    version,
    long_about = "Select and enter the docker, venv or baremetal development environment for Isaac ROS"
)]
struct Opt {
    #[clap(flatten)]
    logging: Logging,

    #[clap(subcommand)]
    cmd: Command,
}

#[derive(Parser)]
struct Logging {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[clap(short = 'v', action = clap::ArgAction::Count, global = true)]
    log_verbosity: u8,

    /// Suppress non-error output
    #[clap(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Initialize the Isaac ROS development environment mode
    Init(CmdInit),

    /// Activate the Isaac ROS development environment
    Activate(CmdActivate),

    /// Inspect or change layered configuration
    Config(CmdConfig),

    /// Display the current mode and detected platform
    Show(CmdShow),
}

impl Opt {
    fn run(self) -> Result<i32> {
        // Setup logging
        let log_level = match (self.logging.quiet, self.logging.log_verbosity) {
            (true, _) => tracing::Level::ERROR,
            (false, 0) => tracing::Level::WARN,
            (false, 1) => tracing::Level::INFO,
            (false, 2) => tracing::Level::DEBUG,
            (false, _) => tracing::Level::TRACE,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .init();

        // Dispatch to command
        match self.cmd {
            Command::Init(mut cmd) => cmd.run(),
            Command::Activate(mut cmd) => cmd.run(),
            Command::Config(mut cmd) => cmd.run(),
            Command::Show(mut cmd) => cmd.run(),
        }
    }
}

fn main() -> Result<()> {
    let opt = Opt::parse();
    let code = opt.run()?;
    std::process::exit(code);
}
