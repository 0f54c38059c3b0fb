use tempfile::TempDir;

use super::*;

#[test]
fn test_defaults() {
    let settings = Settings::default();
    assert!(!settings.output.json);
    assert!(settings.write.create_backup);
    assert!(settings.write_options().create_backup);
}

#[test]
fn test_parse_full() {
    let settings = parse_settings(
        r#"
[output]
json = true

[write]
create_backup = false
"#,
    )
    .unwrap();
    assert!(settings.output.json);
    assert!(!settings.write.create_backup);
    assert!(!settings.write_options().create_backup);
}

#[test]
fn test_parse_partial_keeps_defaults() {
    let settings = parse_settings("[output]\njson = true\n").unwrap();
    assert!(settings.output.json);
    assert!(settings.write.create_backup);

    let settings = parse_settings("").unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_parse_invalid() {
    assert!(parse_settings("[output]\njson = \"yes\"\n").is_err());
}

#[test]
fn test_load_missing_file_uses_defaults() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("missing").join("settings.toml");
    assert_eq!(try_load_settings_from(&path).unwrap(), Settings::default());
    assert_eq!(load_settings_from(&path), Settings::default());
}

#[test]
fn test_try_load_reports_unreadable_path() {
    // A directory in place of the file is not "missing"
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("settings.toml");
    std::fs::create_dir(&path).unwrap();

    assert!(matches!(try_load_settings_from(&path), Err(XgdError::Io(_))));
    assert_eq!(load_settings_from(&path), Settings::default());
}

#[test]
fn test_settings_string_round_trips() {
    let mut settings = Settings::default();
    settings.output.json = true;
    let text = settings_string(&settings);
    assert_eq!(parse_settings(&text).unwrap(), settings);
}

#[test]
fn test_settings_path_location() {
    let path = settings_path();
    assert!(path.ends_with("xgd-tools/settings.toml"));
}

#[test]
fn test_try_load_reports_invalid_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("settings.toml");
    std::fs::write(&path, "[write]\ncreate_backup = 3\n").unwrap();

    assert!(matches!(try_load_settings_from(&path), Err(XgdError::Parse(_))));
    assert_eq!(load_settings_from(&path), Settings::default());

    std::fs::write(&path, "[write]\ncreate_backup = false\n").unwrap();
    assert!(!try_load_settings_from(&path).unwrap().write.create_backup);
}
