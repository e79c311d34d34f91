use serde::{Deserialize, Serialize};

use crate::quantity::{Quantity, SiUnit};

/// 미국 갤런(L). 1 US gal = 3.785411784 L.
const US_GALLON_M3: f64 = 0.003_785_411_784;
const CUBIC_FOOT_M3: f64 = 0.028_316_846_592;

/// 체적 유량 단위. 내부 기준은 m³/s이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowUnit {
    CubicMeterPerSecond,
    LiterPerSecond,
    LiterPerMinute,
    CubicMeterPerHour,
    UsGallonPerMinute,
    CubicFootPerSecond,
}

impl FlowUnit {
    pub const ALL: [FlowUnit; 6] = [
        FlowUnit::CubicMeterPerSecond,
        FlowUnit::LiterPerSecond,
        FlowUnit::LiterPerMinute,
        FlowUnit::CubicMeterPerHour,
        FlowUnit::UsGallonPerMinute,
        FlowUnit::CubicFootPerSecond,
    ];
}

impl SiUnit for FlowUnit {
    fn si_factor(self) -> f64 {
        match self {
            FlowUnit::CubicMeterPerSecond => 1.0,
            FlowUnit::LiterPerSecond => 1e-3,
            FlowUnit::LiterPerMinute => 1e-3 / 60.0,
            FlowUnit::CubicMeterPerHour => 1.0 / 3600.0,
            FlowUnit::UsGallonPerMinute => US_GALLON_M3 / 60.0,
            FlowUnit::CubicFootPerSecond => CUBIC_FOOT_M3,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            FlowUnit::CubicMeterPerSecond => "m³/s",
            FlowUnit::LiterPerSecond => "L/s",
            FlowUnit::LiterPerMinute => "L/min",
            FlowUnit::CubicMeterPerHour => "m³/h",
            FlowUnit::UsGallonPerMinute => "gpm (US)",
            FlowUnit::CubicFootPerSecond => "ft³/s",
        }
    }

    fn all() -> &'static [Self] {
        &Self::ALL
    }
}

/// 유량을 m³/s로 환산한다. 음수 검사는 입력 화면에서 담당한다.
pub fn flow_to_si(value: f64, unit: FlowUnit) -> f64 {
    value * unit.si_factor()
}

/// m³/s 값을 지정 단위로 되돌린다.
pub fn flow_from_si(value_m3_s: f64, unit: FlowUnit) -> f64 {
    Quantity::from_si(value_m3_s, unit).value
}

/// 유량을 다른 단위로 변환한다.
pub fn convert_flow(value: f64, from: FlowUnit, to: FlowUnit) -> f64 {
    Quantity::new(value, from).to_unit(to).value
}
