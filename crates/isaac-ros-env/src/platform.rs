// Copyright (c) Contributors to the Isaac ROS CLI project.
// SPDX-License-Identifier: Apache-2.0

//! Host platform detection.

use std::fmt;
use std::path::PathBuf;

use crate::{Error, Layout, Result};

#[cfg(test)]
#[path = "./platform_test.rs"]
mod platform_test;

/// Supported Isaac ROS platforms.
///
/// The identifier returned by [`Platform::as_str`] is what activated
/// sessions see in `ISAAC_ROS_PLATFORM` and what the container helper
/// receives, so it must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// x86_64 systems with an NVIDIA dGPU
    Amd64,
    /// Jetson devices running JetPack
    Jetson,
    /// DGX Spark and other aarch64 systems running DGX OS
    DgxSpark,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Amd64, Platform::Jetson, Platform::DgxSpark];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Amd64 => "amd64",
            Platform::Jetson => "jetson",
            Platform::DgxSpark => "dgx-spark",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The host facts platform detection depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInfo {
    /// Machine hardware name, as reported by `uname -m`.
    pub machine: String,

    /// Board marker files for aarch64 hosts, in priority order.
    pub markers: Vec<(Platform, PathBuf)>,
}

impl HostInfo {
    /// Read the running host.
    pub fn current(layout: &Layout) -> Result<Self> {
        let uts = nix::sys::utsname::uname()
            .map_err(|errno| Error::Io(std::io::Error::from(errno)))?;
        let machine = uts.machine().to_string_lossy().into_owned();
        Ok(Self::new(machine, layout))
    }

    /// Host facts for `machine` using the marker locations in `layout`.
    pub fn new<S: Into<String>>(machine: S, layout: &Layout) -> Self {
        Self {
            machine: machine.into(),
            markers: vec![
                (Platform::Jetson, layout.jetson_marker.clone()),
                (Platform::DgxSpark, layout.dgx_spark_marker.clone()),
            ],
        }
    }

    /// Determine the platform from the machine name and marker files.
    pub fn detect(&self) -> Result<Platform> {
        let platform = match self.machine.as_str() {
            "x86_64" | "amd64" => Platform::Amd64,
            "aarch64" | "arm64" => self
                .markers
                .iter()
                .find(|(_, marker)| marker.exists())
                .map(|(platform, _)| *platform)
                .ok_or_else(|| Error::UnknownVariant {
                    arch: self.machine.clone(),
                    markers: self.markers.iter().map(|(_, m)| m.clone()).collect(),
                })?,
            other => return Err(Error::UnsupportedArchitecture(other.to_owned())),
        };
        tracing::debug!(machine = %self.machine, %platform, "detected platform");
        Ok(platform)
    }
}
