// Copyright (c) Contributors to the Isaac ROS CLI project.
// SPDX-License-Identifier: Apache-2.0

//! Dispatch from the stored mode to the matching activation path.

use crate::docker::{build_run_dev_command, DockerSettings};
use crate::venv::{build_venv_shell, is_venv_activated};
use crate::{
    ConfigStore, EnvironmentMode, Error, HostInfo, LaunchCommand, Launcher, Layout, Platform,
    Result, SessionEnv, BAREMETAL_ACTIVATED_ENV_VAR, PLATFORM_ENV_VAR,
};

#[cfg(test)]
#[path = "./activate_test.rs"]
mod activate_test;

/// Caller-supplied activation flags.
///
/// Everything except `verbose` only applies to docker mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivateOptions {
    pub verbose: bool,
    pub build: bool,
    pub build_local: bool,
    pub push: bool,
    pub use_cached_build_image: bool,
    pub no_cache: bool,
}

impl ActivateOptions {
    /// Command line spelling of each docker-only flag that is set, in forwarding order.
    pub fn docker_flags_set(&self) -> Vec<&'static str> {
        [
            (self.build, "--build"),
            (self.build_local, "--build-local"),
            (self.push, "--push"),
            (self.use_cached_build_image, "--use-cached-build-image"),
            (self.no_cache, "--no-cache"),
        ]
        .into_iter()
        .filter_map(|(set, flag)| set.then_some(flag))
        .collect()
    }

    /// Reject docker-only flags unless `mode` is docker.
    pub fn check_mode(&self, mode: &EnvironmentMode) -> Result<()> {
        if *mode == EnvironmentMode::Docker {
            return Ok(());
        }
        match self.docker_flags_set().first() {
            Some(&flag) => Err(Error::DockerOnlyOption { flag }),
            None => Ok(()),
        }
    }
}

/// The activation strategy selected once all guards pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationPath {
    Docker,
    Venv,
    Baremetal,
}

impl ActivationPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivationPath::Docker => "docker",
            ActivationPath::Venv => "venv",
            ActivationPath::Baremetal => "baremetal",
        }
    }

    /// Exit code reported for a launched process that exited with `code`.
    ///
    /// Only the docker helper's status is meaningful; a shell session ending is success.
    pub fn exit_code(&self, code: i32) -> i32 {
        match self {
            ActivationPath::Docker => code,
            ActivationPath::Venv | ActivationPath::Baremetal => 0,
        }
    }
}

/// Everything activation reads from the host.
#[derive(Debug, Clone)]
pub struct ActivationContext {
    pub layout: Layout,
    pub env: SessionEnv,
    pub host: HostInfo,
}

/// A fully built activation, ready to hand off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedActivation {
    pub path: ActivationPath,
    pub platform: Platform,
    pub command: LaunchCommand,
}

/// Decide which activation path `mode` allows in this session.
pub fn check_guards(
    mode: &EnvironmentMode,
    env: &SessionEnv,
    layout: &Layout,
) -> Result<ActivationPath> {
    match mode {
        EnvironmentMode::Uninitialized => Err(Error::NotInitialized),
        EnvironmentMode::DockerActivated => Err(Error::AlreadyActive("Docker")),
        EnvironmentMode::Docker if env.docker_activated() => Err(Error::AlreadyActive("Docker")),
        EnvironmentMode::Docker => Ok(ActivationPath::Docker),
        EnvironmentMode::Venv if is_venv_activated(env, layout) => {
            Err(Error::AlreadyActive("virtual"))
        }
        EnvironmentMode::Venv => Ok(ActivationPath::Venv),
        EnvironmentMode::Baremetal if env.baremetal_activated() => {
            Err(Error::AlreadyActive("baremetal"))
        }
        EnvironmentMode::Baremetal => Ok(ActivationPath::Baremetal),
        EnvironmentMode::Unrecognized(raw) => Err(Error::InvalidMode(raw.clone())),
    }
}

/// Run the guards and build the command for the selected path without launching it.
pub fn prepare_activation(
    mode: &EnvironmentMode,
    options: &ActivateOptions,
    ctx: &ActivationContext,
) -> Result<PreparedActivation> {
    options.check_mode(mode)?;
    let path = check_guards(mode, &ctx.env, &ctx.layout)?;
    let platform = ctx.host.detect()?;

    let command = match path {
        ActivationPath::Docker => {
            let config = ConfigStore::new(&ctx.layout, &ctx.env).load()?;
            let settings = DockerSettings::from_document(&config)?;
            build_run_dev_command(
                &settings,
                options,
                platform,
                &ctx.host.machine,
                &ctx.env,
                &ctx.layout,
            )?
        }
        ActivationPath::Venv => build_venv_shell(platform, &ctx.layout)?,
        ActivationPath::Baremetal => build_baremetal_shell(platform),
    };
    tracing::debug!(path = path.as_str(), %command, "prepared activation");

    Ok(PreparedActivation {
        path,
        platform,
        command,
    })
}

/// Prepare the activation for `mode` and block until the launched process exits.
///
/// Returns the docker helper's exit code, or 0 once an interactive shell ends.
pub fn activate(
    mode: &EnvironmentMode,
    options: &ActivateOptions,
    ctx: &ActivationContext,
    launcher: &dyn Launcher,
) -> Result<i32> {
    let prepared = prepare_activation(mode, options, ctx)?;
    let code = launcher.launch(&prepared.command)?;
    Ok(prepared.path.exit_code(code))
}

/// Interactive shell directly on the host.
pub fn build_baremetal_shell(platform: Platform) -> LaunchCommand {
    LaunchCommand::new("bash")
        .env(BAREMETAL_ACTIVATED_ENV_VAR, "1")
        .env(PLATFORM_ENV_VAR, platform.as_str())
}
