use std::fs;

use looprail_config::{
    ConfigGuardRailError, ConfigLoader, ConfigNotFound, ScrollerConfig,
    ScrollerConfigSource, load_explicit,
};
use tempfile::TempDir;

const TOML: &str = "\
threshold_px = 50.0
settle_delay_ms = 120
step_px = 150.0
init_delay_ms = 10
";
const JSON: &str =
    r#"{"threshold_px": 60, "settle_delay_ms": 100, "step_px": 320}"#;

fn workspace() -> TempDir {
    tempfile::tempdir().expect("tempdir")
}

#[test]
fn env_path_wins_over_everything() {
    let dir = workspace();
    fs::write(dir.path().join("looprail.toml"), TOML).unwrap();
    let explicit = dir.path().join("custom.json");
    fs::write(&explicit, JSON).unwrap();

    let (config, source) = ConfigLoader::new(dir.path())
        .with_path_var(explicit.to_string_lossy())
        .with_inline_var(TOML)
        .load()
        .unwrap();

    assert_eq!(config, ScrollerConfig::new(60.0, 100, 320.0));
    assert_eq!(source, ScrollerConfigSource::EnvPath(explicit));
}

#[test]
fn inline_json_beats_default_files() {
    let dir = workspace();
    fs::write(dir.path().join("looprail.toml"), TOML).unwrap();

    let (config, source) = ConfigLoader::new(dir.path())
        .with_path_var("   ")
        .with_inline_var(JSON)
        .load()
        .unwrap();

    assert_eq!(config.step_px, 320.0);
    assert_eq!(source, ScrollerConfigSource::EnvInline);
}

#[test]
fn default_files_are_searched_in_order() {
    let dir = workspace();
    fs::create_dir(dir.path().join("config")).unwrap();
    fs::write(dir.path().join("config/looprail.toml"), TOML).unwrap();
    fs::write(dir.path().join("looprail.json"), JSON).unwrap();

    let (config, source) = ConfigLoader::new(dir.path()).load().unwrap();
    assert_eq!(config.threshold_px, 60.0);
    assert_eq!(
        source,
        ScrollerConfigSource::File(dir.path().join("looprail.json"))
    );

    fs::remove_file(dir.path().join("looprail.json")).unwrap();
    let (config, _) = ConfigLoader::new(dir.path()).load().unwrap();
    assert_eq!(config.init_delay_ms, 10);
}

#[test]
fn nothing_found_is_an_error() {
    let dir = workspace();
    let err = ConfigLoader::new(dir.path()).load().unwrap_err();
    let not_found = err.downcast_ref::<ConfigNotFound>().expect("typed error");
    assert_eq!(not_found.searched.len(), 4);
    assert!(err.to_string().contains("LOOPRAIL_CONFIG_PATH"));
}

#[test]
fn unknown_extension_is_sniffed() {
    let dir = workspace();
    let path = dir.path().join("looprail.conf");
    fs::write(&path, JSON).unwrap();

    let loaded = load_explicit(&path).unwrap();
    assert_eq!(loaded.config.threshold_px, 60.0);
    assert_eq!(loaded.source, ScrollerConfigSource::Explicit(path));
}

#[test]
fn guard_rails_run_on_load() {
    let dir = workspace();
    let path = dir.path().join("looprail.toml");
    fs::write(&path, "threshold_px = 0\nsettle_delay_ms = 120\nstep_px = 150\n")
        .unwrap();

    let err = ConfigLoader::new(dir.path()).load_validated().unwrap_err();
    assert_eq!(
        err.downcast_ref::<ConfigGuardRailError>(),
        Some(&ConfigGuardRailError::NonPositive {
            field: "threshold_px",
            value: 0.0
        })
    );
}

#[test]
fn warnings_travel_with_the_config() {
    let dir = workspace();
    let path = dir.path().join("slow.toml");
    let slow = "threshold_px = 50\nsettle_delay_ms = 2500\nstep_px = 150\n";
    fs::write(&path, slow).unwrap();

    let loaded = load_explicit(&path).unwrap();
    assert_eq!(loaded.warnings.len(), 1);
}

#[test]
fn broken_file_names_its_path() {
    let dir = workspace();
    let path = dir.path().join("looprail.toml");
    fs::write(&path, "threshold_px = \"wide\"\n").unwrap();

    let err = load_explicit(&path).unwrap_err();
    assert!(err.to_string().contains("looprail.toml"), "{err}");
}
