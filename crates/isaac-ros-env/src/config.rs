// Copyright (c) Contributors to the Isaac ROS CLI project.
// SPDX-License-Identifier: Apache-2.0

//! Layered configuration files and their merge.

use std::fmt;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};

use crate::merge::{deep_merge, merge_into};
use crate::{Error, Layout, Result, SessionEnv};

#[cfg(test)]
#[path = "./config_test.rs"]
mod config_test;

/// A layer in the configuration precedence chain, lowest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfigScope {
    /// Defaults shipped with the package.
    ReadOnly,
    /// System-level overrides, written by the CLI.
    System,
    /// User-level overrides.
    User,
    /// Workspace-level overrides, only when a workspace is set.
    Workspace,
}

impl ConfigScope {
    /// All scopes in ascending precedence.
    pub const ALL: [ConfigScope; 4] = [
        ConfigScope::ReadOnly,
        ConfigScope::System,
        ConfigScope::User,
        ConfigScope::Workspace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigScope::ReadOnly => "read-only",
            ConfigScope::System => "system",
            ConfigScope::User => "user",
            ConfigScope::Workspace => "workspace",
        }
    }
}

impl fmt::Display for ConfigScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A mapping-rooted configuration document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigDocument(Mapping);

impl ConfigDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document, requiring a mapping at the top level.
    ///
    /// `origin` is only used for error reporting.
    pub fn from_yaml(yaml: &str, origin: &Path) -> Result<Self> {
        let value: Value = serde_yaml::from_str(yaml).map_err(|e| Error::ConfigMalformed {
            path: origin.to_owned(),
            reason: e.to_string(),
        })?;
        match value {
            Value::Mapping(m) => Ok(Self(m)),
            other => Err(Error::ConfigMalformed {
                path: origin.to_owned(),
                reason: format!("top-level value is {}", value_kind(&other)),
            }),
        }
    }

    /// Read and parse a document from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| Error::ReadFailed {
            path: path.to_owned(),
            error: e,
        })?;
        Self::from_yaml(&yaml, path)
    }

    /// Build a single-entry overlay from a dotted key such as `docker.run.platform`.
    pub fn from_dotted(key: &str, value: Value) -> Result<Self> {
        let mut parts = key.rsplit('.');
        let leaf = parts.next().filter(|p| !p.is_empty());
        let Some(leaf) = leaf else {
            return Err(Error::InvalidSetting {
                key: key.to_owned(),
                reason: "key must not be empty".to_owned(),
            });
        };

        let mut node = Mapping::new();
        node.insert(Value::from(leaf), value);
        for part in parts {
            if part.is_empty() {
                return Err(Error::InvalidSetting {
                    key: key.to_owned(),
                    reason: "key contains an empty segment".to_owned(),
                });
            }
            let mut parent = Mapping::new();
            parent.insert(Value::from(part), Value::Mapping(node));
            node = parent;
        }
        Ok(Self(node))
    }

    /// Look up a value by dotted key, descending through nested mappings.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let mut parts = key.split('.');
        let mut current = self.0.get(parts.next()?)?;
        for part in parts {
            current = current.as_mapping()?.get(part)?;
        }
        Some(current)
    }

    /// Return a new document with `overlay` merged on top of this one.
    pub fn merged(&self, overlay: &ConfigDocument) -> ConfigDocument {
        Self(deep_merge(&self.0, &overlay.0))
    }

    pub fn merge(&mut self, overlay: &ConfigDocument) {
        merge_into(&mut self.0, &overlay.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_mapping(&self) -> &Mapping {
        &self.0
    }

    pub fn to_yaml(&self) -> serde_yaml::Result<String> {
        serde_yaml::to_string(&self.0)
    }
}

impl From<Mapping> for ConfigDocument {
    fn from(m: Mapping) -> Self {
        Self(m)
    }
}

impl From<ConfigDocument> for Mapping {
    fn from(doc: ConfigDocument) -> Self {
        doc.0
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "empty",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Reads and writes the layered configuration files.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    read_only: PathBuf,
    system: PathBuf,
    user: Option<PathBuf>,
    workspace: Option<PathBuf>,
}

impl ConfigStore {
    /// Resolve scope paths from the layout and the workspace variable.
    pub fn new(layout: &Layout, env: &SessionEnv) -> Self {
        Self {
            read_only: layout.read_only_config.clone(),
            system: layout.system_config.clone(),
            user: layout.user_config.clone(),
            workspace: env.workspace_config_root().map(Layout::workspace_config),
        }
    }

    /// Path bound to `scope`, or `None` when the scope is unavailable this run.
    pub fn path(&self, scope: ConfigScope) -> Option<&Path> {
        match scope {
            ConfigScope::ReadOnly => Some(&self.read_only),
            ConfigScope::System => Some(&self.system),
            ConfigScope::User => self.user.as_deref(),
            ConfigScope::Workspace => self.workspace.as_deref(),
        }
    }

    /// Available scopes and their paths, in ascending precedence.
    pub fn sources(&self) -> Vec<(ConfigScope, &Path)> {
        ConfigScope::ALL
            .into_iter()
            .filter_map(|scope| self.path(scope).map(|p| (scope, p)))
            .collect()
    }

    /// Load and merge every scope that exists on disk.
    pub fn load(&self) -> Result<ConfigDocument> {
        let existing: Vec<_> = self
            .sources()
            .into_iter()
            .filter(|(_, path)| path.exists())
            .collect();

        if existing.is_empty() {
            return Err(Error::ConfigNotFound(
                self.sources()
                    .into_iter()
                    .map(|(_, p)| p.to_owned())
                    .collect(),
            ));
        }

        let mut merged = ConfigDocument::new();
        for (scope, path) in existing {
            tracing::debug!(%scope, ?path, "merging configuration scope");
            merged.merge(&ConfigDocument::load(path)?);
        }
        Ok(merged)
    }

    /// Merge `overlay` into the file for `scope` and write it back.
    ///
    /// Parent directories are created as needed and an existing file keeps
    /// its permission bits. Returns the path written.
    pub fn update(&self, scope: ConfigScope, overlay: &ConfigDocument) -> Result<PathBuf> {
        if scope == ConfigScope::ReadOnly {
            return Err(Error::ConfigReadOnly);
        }
        let target = self
            .path(scope)
            .ok_or_else(|| Error::InvalidSetting {
                key: scope.to_string(),
                reason: match scope {
                    ConfigScope::Workspace => "ISAAC_ROS_WS is not set".to_owned(),
                    _ => "no home directory found".to_owned(),
                },
            })?
            .to_owned();

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::WriteFailed {
                path: parent.to_owned(),
                error: e,
            })?;
        }

        let (existing, original_permissions) = if target.is_file() {
            let permissions = std::fs::metadata(&target)?.permissions();
            let yaml = std::fs::read_to_string(&target).map_err(|e| Error::ReadFailed {
                path: target.clone(),
                error: e,
            })?;
            let doc = if yaml.trim().is_empty() {
                ConfigDocument::new()
            } else {
                ConfigDocument::from_yaml(&yaml, &target)?
            };
            (doc, Some(permissions))
        } else {
            (ConfigDocument::new(), None)
        };

        let updated = existing
            .merged(overlay)
            .to_yaml()
            .map_err(|e| Error::SerializeFailed {
                path: target.clone(),
                error: e,
            })?;
        std::fs::write(&target, updated).map_err(|e| Error::WriteFailed {
            path: target.clone(),
            error: e,
        })?;

        if let Some(permissions) = original_permissions {
            std::fs::set_permissions(&target, permissions).map_err(|e| Error::WriteFailed {
                path: target.clone(),
                error: e,
            })?;
        }

        tracing::debug!(%scope, path = ?target, "updated configuration scope");
        Ok(target)
    }
}
