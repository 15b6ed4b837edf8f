// Copyright (c) Contributors to the Isaac ROS CLI project.
// SPDX-License-Identifier: Apache-2.0

use std::os::unix::fs::PermissionsExt;

use rstest::{fixture, rstest};
use serde_yaml::Value;
use tempfile::TempDir;

use super::*;

struct Fixture {
    _tmp: TempDir,
    layout: Layout,
    workspace: PathBuf,
}

impl Fixture {
    fn store(&self) -> ConfigStore {
        ConfigStore::new(&self.layout, &SessionEnv::default())
    }

    fn store_with_workspace(&self) -> ConfigStore {
        let env = SessionEnv::default().with("ISAAC_ROS_WS", self.workspace.display().to_string());
        ConfigStore::new(&self.layout, &env)
    }
}

#[fixture]
fn fx() -> Fixture {
    let tmp = TempDir::new().unwrap();
    let layout = Layout::rooted(tmp.path());
    let workspace = tmp.path().join("ws");
    std::fs::create_dir_all(&workspace).unwrap();
    Fixture {
        _tmp: tmp,
        layout,
        workspace,
    }
}

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).expect("Failed to write config file");
}

fn doc(content: &str) -> ConfigDocument {
    ConfigDocument::from_yaml(content, Path::new("<test>")).unwrap()
}

#[rstest]
fn test_load_no_files(fx: Fixture) {
    let result = fx.store().load();

    match result {
        Err(Error::ConfigNotFound(tried)) => {
            assert_eq!(tried.len(), 3, "read-only, system and user are tried");
        }
        other => panic!("Expected ConfigNotFound, got: {:?}", other),
    }
}

#[rstest]
fn test_load_single_scope(fx: Fixture) {
    write(&fx.layout.read_only_config, "docker:\n  run:\n    platform: auto\n");

    let merged = fx.store().load().expect("Should load config");

    assert_eq!(merged.get("docker.run.platform"), Some(&Value::from("auto")));
}

#[rstest]
fn test_load_precedence_order(fx: Fixture) {
    write(
        &fx.layout.read_only_config,
        "name: read-only\nonly_ro: 1\nnested: {a: 1, b: 1}\n",
    );
    write(&fx.layout.system_config, "name: system\nnested: {b: 2}\n");
    write(
        fx.layout.user_config.as_ref().unwrap(),
        "name: user\nnested: {c: 3}\n",
    );
    write(
        &Layout::workspace_config(&fx.workspace),
        "name: workspace\n",
    );

    let merged = fx.store_with_workspace().load().unwrap();

    assert_eq!(merged.get("name"), Some(&Value::from("workspace")));
    assert_eq!(merged.get("only_ro"), Some(&Value::from(1)));
    assert_eq!(
        merged,
        doc("name: workspace\nonly_ro: 1\nnested: {a: 1, b: 2, c: 3}\n")
    );
}

#[rstest]
fn test_workspace_scope_ignored_without_variable(fx: Fixture) {
    write(&fx.layout.system_config, "name: system\n");
    write(&Layout::workspace_config(&fx.workspace), "name: workspace\n");

    let merged = fx.store().load().unwrap();

    assert_eq!(merged.get("name"), Some(&Value::from("system")));
    assert!(fx.store().path(ConfigScope::Workspace).is_none());
}

#[rstest]
#[case::sequence("- a\n- b\n")]
#[case::scalar("just a string\n")]
#[case::empty("")]
#[case::syntax("key: [unterminated\n")]
fn test_load_malformed(fx: Fixture, #[case] content: &str) {
    write(&fx.layout.read_only_config, "ok: true\n");
    write(&fx.layout.system_config, content);

    match fx.store().load() {
        Err(Error::ConfigMalformed { path, .. }) => assert_eq!(path, fx.layout.system_config),
        other => panic!("Expected ConfigMalformed, got: {:?}", other),
    }
}

#[rstest]
fn test_load_directory_at_scope_path_fails(fx: Fixture) {
    write(&fx.layout.read_only_config, "ok: true\n");
    std::fs::create_dir_all(&fx.layout.system_config).unwrap();

    match fx.store().load() {
        Err(Error::ReadFailed { path, .. }) => assert_eq!(path, fx.layout.system_config),
        other => panic!("Expected ReadFailed, got: {:?}", other),
    }
}

#[rstest]
fn test_serialize_failure_names_target() {
    let error = serde_yaml::from_str::<Value>("key: [unterminated").unwrap_err();
    let err = Error::SerializeFailed {
        path: PathBuf::from("/etc/isaac-ros-cli/config.yaml"),
        error,
    };

    assert!(err.to_string().contains("/etc/isaac-ros-cli/config.yaml"));
    assert!(std::error::Error::source(&err).is_some());
}

#[rstest]
fn test_update_read_only_rejected(fx: Fixture) {
    let result = fx.store().update(ConfigScope::ReadOnly, &doc("a: 1\n"));

    assert!(matches!(result, Err(Error::ConfigReadOnly)));
    assert!(!fx.layout.read_only_config.exists());
}

#[rstest]
fn test_update_creates_file_and_parents(fx: Fixture) {
    let store = fx.store();

    let written = store
        .update(ConfigScope::User, &doc("docker: {run: {container_name: mine}}\n"))
        .expect("Should write user config");

    assert_eq!(Some(written.as_path()), fx.layout.user_config.as_deref());
    let reloaded = ConfigDocument::load(&written).unwrap();
    assert_eq!(
        reloaded.get("docker.run.container_name"),
        Some(&Value::from("mine"))
    );
}

#[rstest]
fn test_update_merges_existing(fx: Fixture) {
    write(
        &fx.layout.system_config,
        "docker:\n  run:\n    container_name: base\n    platform: auto\n",
    );

    fx.store()
        .update(ConfigScope::System, &doc("docker: {run: {platform: aarch64}}\n"))
        .unwrap();

    let reloaded = ConfigDocument::load(&fx.layout.system_config).unwrap();
    assert_eq!(
        reloaded,
        doc("docker: {run: {container_name: base, platform: aarch64}}\n")
    );
}

#[rstest]
fn test_update_twice_is_idempotent(fx: Fixture) {
    write(&fx.layout.read_only_config, "a: {b: [1], c: 1}\n");
    let store = fx.store();
    let overlay = doc("a: {b: [2]}\nextra: yes\n");

    store.update(ConfigScope::System, &overlay).unwrap();
    let once = store.load().unwrap();
    store.update(ConfigScope::System, &overlay).unwrap();
    let twice = store.load().unwrap();

    assert_eq!(once, twice);
}

#[rstest]
fn test_update_preserves_permissions(fx: Fixture) {
    write(&fx.layout.system_config, "a: 1\n");
    std::fs::set_permissions(
        &fx.layout.system_config,
        std::fs::Permissions::from_mode(0o640),
    )
    .unwrap();

    fx.store()
        .update(ConfigScope::System, &doc("b: 2\n"))
        .unwrap();

    let mode = std::fs::metadata(&fx.layout.system_config)
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o640);
}

#[rstest]
fn test_update_workspace_requires_variable(fx: Fixture) {
    let result = fx.store().update(ConfigScope::Workspace, &doc("a: 1\n"));
    assert!(matches!(result, Err(Error::InvalidSetting { .. })));

    let written = fx
        .store_with_workspace()
        .update(ConfigScope::Workspace, &doc("a: 1\n"))
        .unwrap();
    assert_eq!(written, Layout::workspace_config(&fx.workspace));
}

#[rstest]
fn test_from_dotted_nests_keys() {
    let overlay = ConfigDocument::from_dotted("docker.run.platform", Value::from("x86_64")).unwrap();

    assert_eq!(overlay, doc("docker: {run: {platform: x86_64}}\n"));
}

#[rstest]
#[case("")]
#[case("docker..platform")]
#[case("docker.")]
fn test_from_dotted_rejects_empty_segments(#[case] key: &str) {
    let result = ConfigDocument::from_dotted(key, Value::Null);
    assert!(matches!(result, Err(Error::InvalidSetting { .. })));
}

#[rstest]
fn test_get_through_scalar_is_none() {
    let document = doc("docker: 5\n");
    assert!(document.get("docker.run").is_none());
    assert!(document.get("missing").is_none());
}
