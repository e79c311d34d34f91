use serde::{Deserialize, Serialize};

use crate::quantity::{Quantity, SiUnit};

/// 양정(수두) 단위. 내부 기준은 미터이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeadUnit {
    Meter,
    Foot,
}

impl HeadUnit {
    pub const ALL: [HeadUnit; 2] = [HeadUnit::Meter, HeadUnit::Foot];
}

impl SiUnit for HeadUnit {
    fn si_factor(self) -> f64 {
        match self {
            HeadUnit::Meter => 1.0,
            HeadUnit::Foot => 0.3048,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            HeadUnit::Meter => "m",
            HeadUnit::Foot => "ft",
        }
    }

    fn all() -> &'static [Self] {
        &Self::ALL
    }
}

/// 양정을 미터로 환산한다.
pub fn head_to_si(value: f64, unit: HeadUnit) -> f64 {
    value * unit.si_factor()
}

/// 양정을 다른 단위로 변환한다.
pub fn convert_head(value: f64, from: HeadUnit, to: HeadUnit) -> f64 {
    Quantity::new(value, from).to_unit(to).value
}
