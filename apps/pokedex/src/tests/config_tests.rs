use super::*;

use std::{
    collections::HashMap,
    env,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

fn no_env(_: &str) -> Option<String> {
    None
}

fn temp_config(label: &str, contents: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = env::temp_dir().join(format!("pokedex_config_test_{label}_{suffix}"));
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("pokedex.toml");
    fs::write(&path, contents).expect("write config");
    path
}

#[test]
fn defaults_point_at_public_catalog() {
    let settings = load_settings_with(None, no_env).expect("settings");
    assert_eq!(settings.api_base_url, "https://pokeapi.co/api/v2");
    assert_eq!(settings.page_limit, 50);
    assert!(settings.artwork_url_template.contains("{id}"));
}

#[test]
fn file_values_override_defaults() {
    let path = temp_config(
        "file",
        r#"
api_base_url = "http://127.0.0.1:9000/api/v2"
page_limit = 20
log_filter = "debug"
"#,
    );

    let settings = load_settings_with(Some(&path), no_env).expect("settings");
    assert_eq!(settings.api_base_url, "http://127.0.0.1:9000/api/v2");
    assert_eq!(settings.page_limit, 20);
    assert_eq!(settings.log_filter, "debug");
    assert_eq!(
        settings.artwork_url_template,
        Settings::default().artwork_url_template
    );

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn env_overrides_file() {
    let path = temp_config("env", "api_base_url = \"http://file.invalid\"\n");
    let vars = HashMap::from([
        ("POKEDEX_API_BASE_URL", "http://plain.invalid"),
        ("APP__API_BASE_URL", "http://app.invalid"),
        ("APP__PAGE_LIMIT", "not-a-number"),
        ("APP__LOG_FILTER", "pokedex=trace"),
    ]);

    let settings = load_settings_with(Some(&path), |key| {
        vars.get(key).map(|value| value.to_string())
    })
    .expect("settings");

    assert_eq!(settings.api_base_url, "http://app.invalid");
    assert_eq!(settings.page_limit, 50);
    assert_eq!(settings.log_filter, "pokedex=trace");

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn zero_page_limit_is_raised() {
    let settings = load_settings_with(None, |key| {
        (key == "APP__PAGE_LIMIT").then(|| "0".to_string())
    })
    .expect("settings");
    assert_eq!(settings.page_limit, 1);
}

#[test]
fn explicit_missing_file_is_an_error() {
    let path = env::temp_dir().join("pokedex_config_test_does_not_exist.toml");
    let err = load_settings_with(Some(&path), no_env).expect_err("must fail");
    assert!(err.to_string().contains("failed to read config file"));
}

#[test]
fn malformed_file_is_an_error() {
    let path = temp_config("malformed", "page_limit = \"fifty\"\n");
    let err = load_settings_with(Some(&path), no_env).expect_err("must fail");
    assert!(err.to_string().contains("failed to parse config file"));
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}
