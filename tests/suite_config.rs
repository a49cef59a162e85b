// Config file handling: added suites, overridden built-ins, parse errors.

mod common;

use common::TestWorkspace;

#[test]
fn test_config_adds_a_suite() {
    let ws = TestWorkspace::new();
    let config = ws.create_config(
        r#"
suites:
  httpd:
    image: httpd:alpine
    container: test-httpd
    marker: "It works"
"#,
    );

    let result = ws.imgsmoke(&["list", "-c", config.to_str().unwrap()]);
    result.assert_success();
    result.assert_stdout_contains("httpd");
    result.assert_stdout_contains("test-httpd");
    // built-ins remain visible alongside the addition
    result.assert_stdout_contains("nginx");
}

#[test]
fn test_config_overrides_builtin_suite() {
    let ws = TestWorkspace::new();
    let config = ws.create_config(
        r#"
suites:
  nginx:
    image: nginx:1.25-alpine
    container: test-nginx
    marker: "Welcome to nginx"
"#,
    );

    let result = ws.imgsmoke(&["list", "-c", config.to_str().unwrap()]);
    result.assert_success();
    result.assert_stdout_contains("nginx:1.25-alpine");
}

#[test]
fn test_local_config_is_discovered() {
    let ws = TestWorkspace::new();
    std::fs::write(
        ws.path().join(".imgsmoke.yml"),
        r#"
suites:
  redis:
    image: redis:alpine
    container: test-redis
    container_port: 6379
    marker: "PONG"
"#,
    )
    .expect("Failed to write config");

    let result = ws.imgsmoke(&["list"]);
    result.assert_success();
    result.assert_stdout_contains("redis");
}

#[test]
fn test_invalid_config_reports_parse_error() {
    let ws = TestWorkspace::new();
    let config = ws.create_config("suites: [not, a, map]");

    let result = ws.imgsmoke(&["list", "-c", config.to_str().unwrap()]);
    result.assert_failure();
    result.assert_stderr_contains("Config error");
}

#[test]
fn test_missing_explicit_config_fails() {
    let ws = TestWorkspace::new();
    let result = ws.imgsmoke(&["list", "-c", "does-not-exist.yml"]);

    result.assert_failure();
    result.assert_stderr_contains("not found");
}

#[test]
fn test_unknown_suite_error_includes_config_suites() {
    let ws = TestWorkspace::new();
    let config = ws.create_config(
        r#"
suites:
  httpd:
    image: httpd:alpine
    container: test-httpd
    marker: "It works"
"#,
    );

    let result = ws.imgsmoke(&["run", "bogus", "-c", config.to_str().unwrap()]);
    result.assert_failure();
    result.assert_stderr_contains("httpd");
}
