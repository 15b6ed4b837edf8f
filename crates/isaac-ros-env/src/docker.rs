// Copyright (c) Contributors to the Isaac ROS CLI project.
// SPDX-License-Identifier: Apache-2.0

//! Container activation through the packaged `run_dev.py` helper.

use serde::{Deserialize, Serialize};

use crate::activate::ActivateOptions;
use crate::{
    ConfigDocument, Error, LaunchCommand, Layout, Platform, Result, SessionEnv,
    DOCKER_ACTIVATED_ENV_VAR, PLATFORM_ENV_VAR,
};

#[cfg(test)]
#[path = "./docker_test.rs"]
mod docker_test;

/// `docker.run.platform` value meaning "use the host architecture".
pub const AUTO_PLATFORM: &str = "auto";

/// The `docker:` section of the merged configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct DockerSettings {
    pub image: ImageSettings,
    pub run: RunSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ImageSettings {
    /// Environment variables always forwarded into the container.
    pub base_image_keys: Vec<String>,

    /// Extra variables to forward, usually set by users.
    #[serde(default)]
    pub additional_image_keys: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RunSettings {
    pub container_name: String,

    /// Target CPU architecture, or `auto`.
    pub platform: String,
}

impl DockerSettings {
    /// Extract the docker settings from a merged document.
    pub fn from_document(doc: &ConfigDocument) -> Result<Self> {
        let section = doc.get("docker").ok_or_else(|| Error::InvalidSetting {
            key: "docker".to_owned(),
            reason: "section is missing".to_owned(),
        })?;
        serde_yaml::from_value(section.clone()).map_err(|e| Error::InvalidSetting {
            key: "docker".to_owned(),
            reason: e.to_string(),
        })
    }

    /// Variables to forward, base keys first.
    pub fn env_keys(&self) -> impl Iterator<Item = &str> {
        self.image
            .base_image_keys
            .iter()
            .chain(self.image.additional_image_keys.iter())
            .map(String::as_str)
    }

    /// The configured target architecture, resolving `auto` to `host_machine`.
    pub fn target_platform<'a>(&'a self, host_machine: &'a str) -> &'a str {
        if self.run.platform == AUTO_PLATFORM {
            host_machine
        } else {
            &self.run.platform
        }
    }
}

/// Build the `run_dev.py` invocation for the current session.
pub fn build_run_dev_command(
    settings: &DockerSettings,
    options: &ActivateOptions,
    platform: Platform,
    host_machine: &str,
    env: &SessionEnv,
    layout: &Layout,
) -> Result<LaunchCommand> {
    let mut cmd = LaunchCommand::new(&layout.run_dev_script);

    for key in settings.env_keys() {
        cmd = cmd.arg("--env").arg(key);
    }

    cmd = cmd
        .arg("--container-name")
        .arg(&settings.run.container_name)
        .arg("--platform")
        .arg(settings.target_platform(host_machine))
        .arg("--isaac-ros-platform")
        .arg(platform.as_str());

    let workspace = env.workspace_root().ok_or(Error::WorkspaceNotSet)?;
    cmd = cmd.arg("--isaac-dir").arg(workspace);

    for flag in options.docker_flags_set() {
        cmd = cmd.arg(flag);
    }
    if options.verbose {
        cmd = cmd.arg("--verbose");
    }

    Ok(cmd
        .env(PLATFORM_ENV_VAR, platform.as_str())
        .env(DOCKER_ACTIVATED_ENV_VAR, "1"))
}
