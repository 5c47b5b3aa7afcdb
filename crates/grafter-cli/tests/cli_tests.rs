//! End-to-end tests of the `grafter` binary against temporary project trees.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const RUNTIME_INDEX: &str = "import viewImage from \"./view_image/FNImage.js\";\n\nexport default [viewImage];\n";

const LEGACY_MANAGER: &str = "const AllViews = [\n   require(\"./views/ABViewImage\"),\n   require(\"./views/Foo\"),\n];\n\nmodule.exports = AllViews;\n";

const CORE: &str = r#"const ABViewWidget = require("../../platform/views/ABViewWidget");

const ABViewDefaults = {
   key: "foo",
};

module.exports = class ABViewFooCore extends ABViewWidget {
   static common() {
      return ABViewDefaults;
   }
};
"#;

const PLATFORM: &str = r#"const ABViewFooCore = require("../../core/views/FooCore");

module.exports = class ABViewFoo extends ABViewFooCore {
   refresh() {}
};
"#;

/// Command isolated from the developer's environment and config.
fn grafter(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("grafter").unwrap();
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("GRAFTER_ROOT")
        .env_remove("GRAFTER_TEMPLATES_DIR")
        .env_remove("GRAFTER_LOG_FILE")
        .env_remove("RUST_LOG");
    cmd
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A project root with a legacy `Foo` view and an empty runtime registry.
fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let app = "developer/ab_platform_web/AppBuilder";
    write(temp.path(), &format!("{app}/core/views/FooCore.js"), CORE);
    write(temp.path(), &format!("{app}/platform/views/Foo.js"), PLATFORM);
    write(temp.path(), &format!("{app}/core/ABViewManagerCore.js"), LEGACY_MANAGER);
    write(temp.path(), &format!("{app}/platform/plugins/included/index.js"), RUNTIME_INDEX);
    fs::create_dir_all(temp.path().join("developer/plugins")).unwrap();
    temp
}

// ── Basics ────────────────────────────────────────────────────────────────────

#[test]
fn help_lists_commands() {
    let temp = TempDir::new().unwrap();
    grafter(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("migrate"))
        .stdout(predicate::str::contains("new"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn version_matches_package() {
    let temp = TempDir::new().unwrap();
    grafter(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn missing_subcommand_is_a_usage_error() {
    let temp = TempDir::new().unwrap();
    grafter(temp.path()).assert().code(2);
}

#[test]
fn completions_name_the_binary() {
    let temp = TempDir::new().unwrap();
    grafter(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("grafter"));
}

// ── Plugins and views ─────────────────────────────────────────────────────────

#[test]
fn new_creates_plugin_under_developer_plugins() {
    let temp = project();
    grafter(temp.path())
        .args(["new", "Bar", "-y", "--author", "Tester"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plugin 'Bar' created"));

    let manifest = fs::read_to_string(temp.path().join("developer/plugins/ab_plugin_bar/manifest.json")).unwrap();
    assert!(manifest.contains("\"name\": \"Bar\""));
    assert!(manifest.contains("\"author\": \"Tester\""));
}

#[test]
fn new_twice_is_a_conflict() {
    let temp = project();
    grafter(temp.path()).args(["new", "Bar", "-y"]).assert().success();
    grafter(temp.path())
        .args(["new", "Bar", "-y"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn blank_plugin_name_is_rejected() {
    let temp = project();
    grafter(temp.path())
        .args(["new", "   ", "-y"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("plugin name cannot be empty"));
}

#[test]
fn view_scaffolds_files_into_plugin() {
    let temp = project();
    grafter(temp.path()).args(["new", "Bar", "-y"]).assert().success();
    grafter(temp.path()).args(["view", "Bar", "Foo"]).assert().success();

    let plugin = temp.path().join("developer/plugins/ab_plugin_bar");
    assert!(plugin.join("web/FNFoo.js").is_file());
    assert!(plugin.join("web/FNFooComponent.js").is_file());
    assert!(plugin.join("properties/FNFooEditor.js").is_file());
    let web = fs::read_to_string(plugin.join("web.js")).unwrap();
    assert!(web.contains("import FNFoo from \"./web/FNFoo.js\";"));
}

#[test]
fn list_json_reports_plugins() {
    let temp = project();
    grafter(temp.path()).args(["new", "Bar", "-y"]).assert().success();

    let out = grafter(temp.path())
        .args(["list", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let plugins: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(plugins[0]["dir_name"], "ab_plugin_bar");
    assert_eq!(plugins[0]["has_manifest"], true);
}

#[test]
fn list_templates_shows_builtin_sets() {
    let temp = TempDir::new().unwrap();
    grafter(temp.path())
        .args(["list", "--templates", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("plugin"))
        .stdout(predicate::str::contains("view"));
}

// ── Migration ─────────────────────────────────────────────────────────────────

#[test]
fn migrate_links_view_into_runtime_registry() {
    let temp = project();
    grafter(temp.path())
        .args(["migrate", "view", "Bar", "Foo", "-y"])
        .assert()
        .success();

    let app = temp.path().join("developer/ab_platform_web/AppBuilder");
    let index = fs::read_to_string(app.join("platform/plugins/included/index.js")).unwrap();
    assert!(index.contains("import viewFoo from \"./view_foo/FNFoo.js\";"));
    assert!(index.contains("export default [viewImage, viewFoo];"));
    assert!(app.join("platform/plugins/included/view_foo/FNFoo.js").is_file());

    let manager = fs::read_to_string(app.join("core/ABViewManagerCore.js")).unwrap();
    assert!(manager.contains("// require(\"./views/Foo\"),"));
}

#[test]
fn migrate_json_report_lists_steps() {
    let temp = project();
    let out = grafter(temp.path())
        .args(["--output-format", "json", "migrate", "view", "Bar", "Foo"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(report["legacy_key"], "foo");
    let steps = report["steps"].as_array().unwrap();
    assert!(steps.iter().any(|s| s["step"] == "link runtime registry" && s["status"] == "applied"));
}

#[test]
fn migrate_without_root_exits_not_found() {
    let temp = TempDir::new().unwrap();
    grafter(temp.path())
        .args(["migrate", "view", "Bar", "Foo", "-y"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No project root found"));
}

#[test]
fn migrate_no_create_refuses_unknown_plugin() {
    let temp = project();
    grafter(temp.path())
        .args(["migrate", "view", "Bar", "Foo", "-y", "--no-create"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Plugin 'Bar' not found"));
    assert!(!temp.path().join("developer/plugins/ab_plugin_bar").exists());
}

#[test]
fn root_flag_points_at_project_from_elsewhere() {
    let project = project();
    let elsewhere = TempDir::new().unwrap();
    grafter(elsewhere.path())
        .arg("--root")
        .arg(project.path().join("developer/plugins"))
        .args(["new", "Bar", "-y"])
        .assert()
        .success();
    assert!(project.path().join("developer/plugins/ab_plugin_bar/manifest.json").is_file());
}

#[test]
fn relative_root_resolves_from_working_directory() {
    let project = project();
    let sub = project.path().join("sub");
    fs::create_dir_all(&sub).unwrap();
    grafter(project.path())
        .current_dir(&sub)
        .args(["--root", ".", "new", "Bar", "-y"])
        .assert()
        .success();
    assert!(project.path().join("developer/plugins/ab_plugin_bar/manifest.json").is_file());
}

#[test]
fn no_color_env_value_one_is_accepted() {
    let temp = project();
    grafter(temp.path())
        .env("NO_COLOR", "1")
        .arg("list")
        .assert()
        .success()
        .stderr(predicate::str::contains("invalid value").not());
}

// ── Configuration ─────────────────────────────────────────────────────────────

#[test]
fn config_get_prints_default_value() {
    let temp = TempDir::new().unwrap();
    grafter(temp.path())
        .args(["config", "get", "defaults.icon"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fa-puzzle-piece"));
}

#[test]
fn config_get_unknown_key_fails() {
    let temp = TempDir::new().unwrap();
    grafter(temp.path())
        .args(["config", "get", "nope.nothing"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown config key"));
}

#[test]
fn local_config_overrides_defaults() {
    let temp = TempDir::new().unwrap();
    grafter(temp.path()).args(["init", "--local"]).assert().success();
    assert!(temp.path().join(".grafter.toml").is_file());

    write(temp.path(), ".grafter.toml", "[defaults]\nicon = \"fa-cube\"\n");
    grafter(temp.path())
        .args(["config", "get", "defaults.icon"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fa-cube"));
}

#[test]
fn environment_overrides_config() {
    let temp = TempDir::new().unwrap();
    grafter(temp.path())
        .env("GRAFTER__DEFAULTS__AUTHOR", "Env Author")
        .args(["config", "get", "defaults.author"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Env Author"));
}
