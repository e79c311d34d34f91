use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::pump::{PumpPowerInput, G_STANDARD};
use crate::quantity::Quantity;
use crate::units::*;

/// 설정 파일 기본 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 입력 화면이 처음 보여 줄 기본 입력값.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultInputs {
    pub flow_value: f64,
    pub flow_unit: FlowUnit,
    pub head_value: f64,
    pub head_unit: HeadUnit,
    pub specific_gravity: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub density_override_kg_m3: Option<f64>,
    pub efficiency_value: f64,
    pub efficiency_unit: EfficiencyUnit,
    pub gravity_m_s2: f64,
}

impl Default for DefaultInputs {
    fn default() -> Self {
        Self {
            flow_value: 0.05,
            flow_unit: FlowUnit::CubicMeterPerSecond,
            head_value: 20.0,
            head_unit: HeadUnit::Meter,
            specific_gravity: 1.0,
            density_override_kg_m3: None,
            efficiency_value: 70.0,
            efficiency_unit: EfficiencyUnit::Percent,
            gravity_m_s2: G_STANDARD,
        }
    }
}

impl DefaultInputs {
    /// 계산 입력으로 바꾼다.
    pub fn to_input(&self) -> PumpPowerInput {
        let mut fluid = FluidDescriptor::from_specific_gravity(self.specific_gravity);
        fluid.density_override_kg_m3 = self.density_override_kg_m3;
        PumpPowerInput {
            flow: Quantity::new(self.flow_value, self.flow_unit),
            head: Quantity::new(self.head_value, self.head_unit),
            fluid,
            efficiency: Quantity::new(self.efficiency_value, self.efficiency_unit),
            gravity_m_s2: self.gravity_m_s2,
        }
    }

    pub fn from_input(input: &PumpPowerInput) -> Self {
        Self {
            flow_value: input.flow.value,
            flow_unit: input.flow.unit,
            head_value: input.head.value,
            head_unit: input.head.unit,
            specific_gravity: input.fluid.specific_gravity,
            density_override_kg_m3: input.fluid.density_override_kg_m3,
            efficiency_value: input.efficiency.value,
            efficiency_unit: input.efficiency.unit,
            gravity_m_s2: input.gravity_m_s2,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드(auto/ko/en)
    pub language: String,
    /// 계산 과정 표시 여부
    pub show_steps: bool,
    /// GUI에서 사용할 사용자 폰트(.ttf/.ttc)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,
    pub defaults: DefaultInputs,
    /// 설정을 읽어 온 경로. 파일에는 저장하지 않는다.
    #[serde(skip)]
    pub path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            show_steps: true,
            font_path: None,
            defaults: DefaultInputs::default(),
            path: None,
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 돌려준다. 파일을 새로 만들지는 않는다.
pub fn load_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
    let mut cfg = if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        info!(path = %path.display(), "config loaded");
        cfg
    } else {
        debug!(path = %path.display(), "config not found, using defaults");
        Config::default()
    };
    cfg.path = Some(path.to_path_buf());
    Ok(cfg)
}

fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    info!(path = %path.display(), "config saved");
    Ok(())
}

impl Config {
    /// 읽어 온 경로(없으면 config.toml)에 설정을 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = self
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        save_config(self, &path)
    }
}
