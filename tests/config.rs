use std::{env, fs, path::PathBuf};

use pump_power_calculator::{
    config::{self, Config, DefaultInputs},
    pump::PumpPowerInput,
    units::{FlowUnit, HeadUnit},
};

fn temp_path(name: &str) -> PathBuf {
    env::temp_dir().join(format!("pump_power_{}_{name}.toml", std::process::id()))
}

#[test]
fn missing_file_yields_defaults_without_creating_it() {
    let path = temp_path("missing");
    let _ = fs::remove_file(&path);
    let cfg = config::load_or_default(Some(&path)).expect("load");
    assert_eq!(cfg.language, "auto");
    assert!(cfg.show_steps);
    assert_eq!(cfg.defaults.to_input(), PumpPowerInput::default());
    assert_eq!(cfg.path.as_deref(), Some(path.as_path()));
    assert!(!path.exists());
}

#[test]
fn save_then_load_keeps_values() {
    let path = temp_path("round_trip");
    let mut cfg = Config {
        language: "ko".into(),
        show_steps: false,
        path: Some(path.clone()),
        ..Default::default()
    };
    cfg.defaults.flow_value = 250.0;
    cfg.defaults.flow_unit = FlowUnit::UsGallonPerMinute;
    cfg.defaults.head_unit = HeadUnit::Foot;
    cfg.defaults.density_override_kg_m3 = Some(1_260.0);
    cfg.save().expect("save");

    let loaded = config::load_or_default(Some(&path)).expect("load");
    let _ = fs::remove_file(&path);
    assert_eq!(loaded, cfg);
}

#[test]
fn partial_file_fills_in_defaults() {
    let path = temp_path("partial");
    fs::write(
        &path,
        "language = \"en\"\n\n[defaults]\nhead_value = 35.0\nhead_unit = \"Foot\"\n",
    )
    .expect("write");
    let cfg = config::load_or_default(Some(&path)).expect("load");
    let _ = fs::remove_file(&path);

    assert_eq!(cfg.language, "en");
    assert!(cfg.show_steps);
    assert_eq!(cfg.defaults.head_value, 35.0);
    assert_eq!(cfg.defaults.head_unit, HeadUnit::Foot);
    assert_eq!(cfg.defaults.flow_value, DefaultInputs::default().flow_value);
}

#[test]
fn malformed_file_is_an_error() {
    let path = temp_path("malformed");
    fs::write(&path, "show_steps = \"maybe\"\n").expect("write");
    let res = config::load_or_default(Some(&path));
    let _ = fs::remove_file(&path);
    assert!(matches!(res, Err(config::ConfigError::Parse(_))));
}
