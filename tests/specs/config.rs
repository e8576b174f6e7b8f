//! Behavioral specs for smelltab.toml handling.

use crate::prelude::*;

const SIMPLE_TEST: &str = "class FooTest { @Test void works() { } }";

/// > The App label is read from a discovered smelltab.toml
#[test]
fn discovered_config_sets_app() {
    let rows = detect().on("calculator").passes().rows();
    assert!(rows[1..].iter().all(|row| row[0] == "calculator"));
}

/// > --app overrides the config file
#[test]
fn app_flag_overrides_config() {
    let rows = detect()
        .on("calculator")
        .args(&["--app", "cli"])
        .passes()
        .rows();
    assert_eq!(rows[1][0], "cli");
}

/// > -C loads an explicit config file
#[test]
fn explicit_config_flag() {
    let temp = Project::empty();
    temp.file("src/test/java/FooTest.java", SIMPLE_TEST);
    temp.file("alt.toml", "version = 1\n[project]\napp = \"alt\"\n");

    let alt = temp.path().join("alt.toml");
    let rows = detect()
        .target(temp.path())
        .args(&["-C", alt.to_str().unwrap()])
        .passes()
        .rows();
    assert_eq!(rows[1][0], "alt");
}

/// > SMELLTAB_CONFIG names the config file
#[test]
fn config_from_env() {
    let temp = Project::empty();
    temp.file("src/test/java/FooTest.java", SIMPLE_TEST);
    temp.file("alt.toml", "version = 1\n[project]\napp = \"env\"\n");

    let alt = temp.path().join("alt.toml");
    let rows = detect()
        .target(temp.path())
        .env("SMELLTAB_CONFIG", alt.to_str().unwrap())
        .passes()
        .rows();
    assert_eq!(rows[1][0], "env");
}

/// > A named config file that does not exist is a config error
#[test]
fn missing_explicit_config_exits_2() {
    let temp = Project::empty();
    detect()
        .target(temp.path())
        .args(&["-C", "/nonexistent/smelltab.toml"])
        .exits(2)
        .stderr_has("config file not found");
}

/// > Unknown keys warn but do not fail
#[test]
fn unknown_key_warns() {
    let temp = Project::empty();
    temp.file("src/test/java/FooTest.java", SIMPLE_TEST);
    temp.config("[project]\napp = \"demo\"\nflavour = \"mint\"\n");

    detect()
        .target(temp.path())
        .passes()
        .stderr_has("unrecognized field `project.flavour`")
        .stdout_has("demo,FooTest,");
}

/// > Unsupported config versions are rejected
#[test]
fn unsupported_version_exits_2() {
    let temp = Project::empty();
    temp.config("version = 2\n");

    detect()
        .target(temp.path())
        .exits(2)
        .stderr_has("unsupported config version 2");
}

/// > A config without a version is rejected
#[test]
fn missing_version_exits_2() {
    let temp = Project::empty();
    std::fs::write(temp.path().join("smelltab.toml"), "[project]\napp = \"x\"\n").unwrap();

    detect()
        .target(temp.path())
        .exits(2)
        .stderr_has("missing required field: version");
}

/// > [report] quoting = "none" is honored
#[test]
fn quoting_from_config() {
    let temp = Project::empty();
    temp.file("src/test/java/a,b/FooTest.java", SIMPLE_TEST);
    temp.config("[report]\nquoting = \"none\"\n");

    detect()
        .target(temp.path())
        .passes()
        .stdout_lacks("\"");
}

/// > [pairing] changes the naming convention
#[test]
fn custom_pairing_convention() {
    let temp = Project::empty();
    temp.file("lib/Foo.java", "class Foo {}");
    temp.file("spec/FooSpec.java", "class FooSpec { @Test void works() { } }");
    temp.config("[pairing]\ntest_dir = \"spec\"\nmain_dir = \"lib\"\ntest_suffix = \"Spec\"\n");

    let rows = detect().target(temp.path()).passes().rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1][1], "FooSpec");
    assert_eq!(rows[1][5], "lib/Foo.java");
}

/// > A known key with a value of the wrong type is a config error
#[test]
fn wrongly_typed_value_exits_2() {
    let temp = Project::empty();
    temp.file("src/test/java/FooTest.java", SIMPLE_TEST);
    temp.config("[detect]\ntimeout = 30\n");

    let run = detect()
        .target(temp.path())
        .exits(2)
        .stderr_has("detect.timeout: expected a string, found integer");
    assert_eq!(run.stdout(), "");
}
