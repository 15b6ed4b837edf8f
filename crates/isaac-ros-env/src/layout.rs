// Copyright (c) Contributors to the Isaac ROS CLI project.
// SPDX-License-Identifier: Apache-2.0

//! Fixed filesystem locations used by the CLI.

use std::path::{Path, PathBuf};

#[cfg(test)]
#[path = "./layout_test.rs"]
mod layout_test;

/// Every on-disk location the core reads or writes.
///
/// The installed package owns these paths. Tests point the whole set at a
/// temporary directory with [`Layout::rooted`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Packaged defaults, never written.
    pub read_only_config: PathBuf,

    /// System-wide overrides.
    pub system_config: PathBuf,

    /// Per-user overrides, absent when no home directory can be found.
    pub user_config: Option<PathBuf>,

    /// Single-line file holding the selected environment mode.
    pub state_file: PathBuf,

    /// Virtual environment managed by the package.
    pub venv_dir: PathBuf,

    /// Bash rcfile that activates the managed virtual environment.
    pub venv_activate_helper: PathBuf,

    /// Helper that builds and enters the development container.
    pub run_dev_script: PathBuf,

    /// Marker files identifying aarch64 board variants.
    pub jetson_marker: PathBuf,
    pub dgx_spark_marker: PathBuf,
}

impl Layout {
    /// Locations on an installed system.
    pub fn system() -> Self {
        Self {
            read_only_config: PathBuf::from("/usr/share/isaac-ros-cli/config.yaml"),
            system_config: PathBuf::from("/etc/isaac-ros-cli/config.yaml"),
            user_config: dirs::home_dir().map(|home| user_config_under(&home)),
            state_file: PathBuf::from("/etc/isaac-ros-cli/environment.conf"),
            venv_dir: PathBuf::from("/var/lib/isaac-ros-cli/isaac-ros"),
            venv_activate_helper: PathBuf::from("/usr/lib/isaac-ros-cli/activate-venv.sh"),
            run_dev_script: PathBuf::from("/usr/lib/isaac-ros-cli/run_dev.py"),
            jetson_marker: PathBuf::from("/etc/nv_tegra_release"),
            dgx_spark_marker: PathBuf::from("/etc/dgx-release"),
        }
    }

    /// The system layout re-rooted under `root`, with the home directory at `root/home`.
    pub fn rooted<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref();
        let system = Self::system();
        let reroot = |path: &Path| root.join(path.strip_prefix("/").unwrap_or(path));
        Self {
            read_only_config: reroot(&system.read_only_config),
            system_config: reroot(&system.system_config),
            user_config: Some(user_config_under(&root.join("home"))),
            state_file: reroot(&system.state_file),
            venv_dir: reroot(&system.venv_dir),
            venv_activate_helper: reroot(&system.venv_activate_helper),
            run_dev_script: reroot(&system.run_dev_script),
            jetson_marker: reroot(&system.jetson_marker),
            dgx_spark_marker: reroot(&system.dgx_spark_marker),
        }
    }

    /// Workspace-scoped config file for the given workspace root.
    pub fn workspace_config<P: AsRef<Path>>(workspace: P) -> PathBuf {
        workspace
            .as_ref()
            .join(".isaac-ros-cli")
            .join("config.yaml")
    }

    /// Interpreter inside the managed virtual environment.
    pub fn venv_python(&self) -> PathBuf {
        self.venv_dir.join("bin").join("python3")
    }

    /// Activation script that a healthy virtual environment always contains.
    pub fn venv_activate_script(&self) -> PathBuf {
        self.venv_dir.join("bin").join("activate")
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::system()
    }
}

fn user_config_under(home: &Path) -> PathBuf {
    home.join(".config").join("isaac-ros-cli").join("config.yaml")
}
