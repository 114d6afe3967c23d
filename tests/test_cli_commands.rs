mod common;

use common::{fixture, spawn_command, stderr, stdout};

// ============================================================================
// check
// ============================================================================

#[test]
fn check_valid_config() {
    let output = spawn_command(&["check", &fixture("valid.yaml")]);
    assert!(
        output.status.success(),
        "check should succeed for valid config: {}",
        stderr(&output)
    );
    assert!(stdout(&output).contains("valid.yaml: ok"));
}

#[test]
fn check_wrong_type_lists_every_option() {
    let output = spawn_command(&["check", &fixture("wrong_type.yaml")]);
    assert_eq!(output.status.code(), Some(2), "config errors exit 2");
    let out = stdout(&output);
    assert!(
        out.contains("SCAN_DELAY must be number. Yours is: str."),
        "should name SCAN_DELAY: {out}"
    );
    assert!(
        out.contains("NOTIFY must be bool. Yours is: str."),
        "should name NOTIFY: {out}"
    );
}

#[test]
fn check_unknown_option_warns_but_passes() {
    let output = spawn_command(&["check", &fixture("unknown_option.yaml")]);
    assert!(
        output.status.success(),
        "unknown options are warnings only: {}",
        stderr(&output)
    );
    let out = stdout(&output);
    assert!(out.contains("UNKNOWN_OPTION is not a valid config option"));
    assert!(
        out.contains("did you mean SCAN_DELAY?"),
        "should suggest SCAN_DELAY: {out}"
    );
}

#[test]
fn check_strict_rejects_warnings() {
    let output = spawn_command(&["check", "--strict", &fixture("unknown_option.yaml")]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("strict mode"));
}

#[test]
fn check_require_unset_option_fails() {
    let output = spawn_command(&["check", "--require", "DB", &fixture("unknown_option.yaml")]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("DB not in config, and no default has been set."));
}

#[test]
fn check_require_supplied_option_passes() {
    let output = spawn_command(&[
        "check",
        "--require",
        "DB",
        "--require",
        "HASH_KEY",
        &fixture("valid.yaml"),
    ]);
    assert!(output.status.success(), "{}", stderr(&output));
}

#[test]
fn check_empty_file_rejected() {
    let output = spawn_command(&["check", &fixture("empty.yaml")]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("empty"));
}

#[test]
fn check_bad_yaml_rejected() {
    let output = spawn_command(&["check", &fixture("bad_yaml.yaml")]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("parse error"));
}

#[test]
fn check_unknown_tag_rejected() {
    let output = spawn_command(&["check", &fixture("unknown_tag.yaml")]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("!matrix"));
}

#[test]
fn check_missing_file_is_io_error() {
    let output = spawn_command(&["check", "/tmp/nonexistent_monocle_config.yaml"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn check_binary_file_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("binary.yaml");
    std::fs::write(&path, b"\x00\x01\xff\xfe\xfd").unwrap();

    let output = spawn_command(&["check", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2), "not UTF-8 is a config error");
    assert!(stderr(&output).contains("not valid UTF-8"));
}

#[test]
fn check_quiet_prints_nothing_on_success() {
    let output = spawn_command(&["--quiet", "check", &fixture("unknown_option.yaml")]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "");
}

#[test]
fn check_quiet_still_lists_failures() {
    let output = spawn_command(&[
        "check",
        "--quiet",
        &fixture("valid.yaml"),
        &fixture("wrong_type.yaml"),
    ]);
    assert_eq!(output.status.code(), Some(2));
    let out = stdout(&output);
    assert!(!out.contains("valid.yaml: ok"), "{out}");
    assert!(out.contains("wrong_type.yaml: FAILED"), "{out}");
    assert!(out.contains("SCAN_DELAY must be number. Yours is: str."));
    assert!(!out.contains("file(s) checked"), "{out}");
}

#[test]
fn check_json_output() {
    let output = spawn_command(&[
        "check",
        "--format",
        "json",
        &fixture("valid.yaml"),
        &fixture("wrong_type.yaml"),
    ]);
    assert!(!output.status.success());

    let out = stdout(&output);
    let parsed: serde_json::Value =
        serde_json::from_str(&out).expect("output should be valid JSON");
    assert_eq!(parsed["summary"]["files"], 2);
    assert_eq!(parsed["summary"]["valid"], 1);
    assert_eq!(parsed["summary"]["invalid"], 1);
    assert_eq!(parsed["files"][0]["valid"], true);
    assert_eq!(parsed["files"][1]["valid"], false);
    assert_eq!(
        parsed["files"][1]["errors"].as_array().map(Vec::len),
        Some(2)
    );
}

#[test]
fn check_requires_a_file() {
    let output = spawn_command(&["check"]);
    assert!(!output.status.success());
}

// ============================================================================
// show
// ============================================================================

#[test]
fn show_selected_options() {
    let output = spawn_command(&[
        "show",
        &fixture("valid.yaml"),
        "--option",
        "SCAN_DELAY",
        "--option",
        "SPEED_LIMIT",
        "--option",
        "CONTROL_SOCKS",
    ]);
    assert!(!output.status.success(), "CONTROL_SOCKS is not declared");

    let output = spawn_command(&[
        "show",
        &fixture("valid.yaml"),
        "--option",
        "SCAN_DELAY",
        "--option",
        "SPEED_LIMIT",
    ]);
    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("SCAN_DELAY"));
    assert!(out.contains("(supplied)"));
    assert!(out.contains("(default)"));
}

#[test]
fn show_json_reports_origin() {
    let output = spawn_command(&[
        "show",
        "--format",
        "json",
        "--install-dir",
        "/opt/monocle",
        &fixture("sentinel_defaults.yaml"),
    ]);
    assert!(output.status.success(), "{}", stderr(&output));

    let parsed: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("output should be valid JSON");
    let options = parsed.as_array().expect("array of options");
    let find = |name: &str| {
        options
            .iter()
            .find(|o| o["name"] == name)
            .unwrap_or_else(|| panic!("{name} missing"))
    };

    assert_eq!(find("SMART_THROTTLE")["origin"], "supplied");
    assert_eq!(find("SMART_THROTTLE")["value"], false);
    assert_eq!(find("BALANCE")["origin"], "default");
    assert_eq!(find("BALANCE")["value"], serde_json::Value::Null);
    assert_eq!(find("COROUTINES_LIMIT")["value"], 6);
    assert_eq!(find("INSTANCE_ID")["value"], "/opt/monocle");
    assert_eq!(find("DB")["origin"], "unset");
}

// ============================================================================
// options
// ============================================================================

#[test]
fn options_json_lists_schema() {
    let output = spawn_command(&["options", "--format", "json"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let parsed: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("output should be valid JSON");
    let options = parsed.as_array().expect("array of options");
    assert!(options.len() > 200);

    let scan_delay = options
        .iter()
        .find(|o| o["name"] == "SCAN_DELAY")
        .expect("SCAN_DELAY listed");
    assert_eq!(scan_delay["default"], 10);
    assert_eq!(scan_delay["required"], false);

    let grid = options
        .iter()
        .find(|o| o["name"] == "GRID")
        .expect("GRID listed");
    assert_eq!(grid["required"], true);
}

// ============================================================================
// version
// ============================================================================

#[test]
fn version_human() {
    let output = spawn_command(&["version"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("monocle-sanitizer"));
}

#[test]
fn version_json() {
    let output = spawn_command(&["version", "--format", "json"]);
    assert!(output.status.success());
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout(&output)).expect("version JSON should be valid");
    assert_eq!(parsed["name"], "monocle-sanitizer");
    assert!(parsed.get("version").is_some());
}
