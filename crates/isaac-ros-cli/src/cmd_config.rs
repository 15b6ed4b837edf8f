// Copyright (c) Contributors to the Isaac ROS CLI project.
// SPDX-License-Identifier: Apache-2.0

//! Implementation of the `isaac-ros config` commands.

use clap::{Args, Subcommand, ValueEnum};
use colored::Colorize;
use isaac_ros_env::{ConfigDocument, ConfigScope, ConfigStore, Layout, SessionEnv};
use miette::{IntoDiagnostic, Result};

/// Inspect or change layered configuration
#[derive(Debug, Args)]
pub struct CmdConfig {
    #[clap(subcommand)]
    action: ConfigAction,
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the merged configuration
    Show {
        /// List every scope and its file instead
        #[clap(long)]
        sources: bool,
    },

    /// Set a single value, e.g. `docker.run.platform aarch64`
    Set {
        /// Dotted key to set
        key: String,

        /// Value, parsed as YAML
        value: String,

        /// Scope to write to
        #[clap(long, value_enum, default_value_t = ScopeArg::User)]
        scope: ScopeArg,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ScopeArg {
    ReadOnly,
    System,
    User,
    Workspace,
}

impl From<ScopeArg> for ConfigScope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::ReadOnly => ConfigScope::ReadOnly,
            ScopeArg::System => ConfigScope::System,
            ScopeArg::User => ConfigScope::User,
            ScopeArg::Workspace => ConfigScope::Workspace,
        }
    }
}

impl CmdConfig {
    pub fn run(&mut self) -> Result<i32> {
        let store = ConfigStore::new(&Layout::system(), &SessionEnv::capture());

        match &self.action {
            ConfigAction::Show { sources: true } => {
                for (scope, path) in store.sources() {
                    let state = if path.is_file() {
                        "present".green()
                    } else {
                        "absent".dimmed()
                    };
                    println!("{:<10} {} ({})", scope.to_string().bold(), path.display(), state);
                }
                Ok(0)
            }
            ConfigAction::Show { sources: false } => {
                let merged = store.load()?;
                print!("{}", merged.to_yaml().into_diagnostic()?);
                Ok(0)
            }
            ConfigAction::Set { key, value, scope } => {
                let value: serde_yaml::Value = serde_yaml::from_str(value).into_diagnostic()?;
                let overlay = ConfigDocument::from_dotted(key, value)?;
                let written = store.update((*scope).into(), &overlay)?;
                println!("Updated {} in {}", key.bold(), written.display());
                Ok(0)
            }
        }
    }
}
