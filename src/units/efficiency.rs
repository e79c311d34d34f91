use serde::{Deserialize, Serialize};

use crate::quantity::{Quantity, SiUnit};

/// 효율 분율의 하한. 0으로 나누는 것을 막는다.
pub const EFFICIENCY_MIN: f64 = 1e-6;
/// 효율 분율의 상한. 100% 이상의 비물리적 값을 막는다.
pub const EFFICIENCY_MAX: f64 = 0.999_999;

/// 효율 단위. 내부 기준은 분율(0~1)이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EfficiencyUnit {
    Percent,
    Fraction,
}

impl EfficiencyUnit {
    pub const ALL: [EfficiencyUnit; 2] = [EfficiencyUnit::Percent, EfficiencyUnit::Fraction];
}

impl SiUnit for EfficiencyUnit {
    fn si_factor(self) -> f64 {
        match self {
            EfficiencyUnit::Percent => 0.01,
            EfficiencyUnit::Fraction => 1.0,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            EfficiencyUnit::Percent => "%",
            EfficiencyUnit::Fraction => "fraction",
        }
    }

    fn all() -> &'static [Self] {
        &Self::ALL
    }
}

/// 효율을 분율로 환산한 뒤 [1e-6, 0.999999] 범위로 클램프한다.
///
/// 범위를 벗어난 입력은 오류로 거부하지 않고 경계값으로 보정한다.
/// NaN은 하한으로 처리한다.
pub fn efficiency_to_fraction(value: f64, unit: EfficiencyUnit) -> f64 {
    let fraction = value * unit.si_factor();
    if fraction.is_nan() {
        return EFFICIENCY_MIN;
    }
    fraction.clamp(EFFICIENCY_MIN, EFFICIENCY_MAX)
}

/// 단위만 바꾼다. 클램프는 적용하지 않는다.
pub fn convert_efficiency(value: f64, from: EfficiencyUnit, to: EfficiencyUnit) -> f64 {
    Quantity::new(value, from).to_unit(to).value
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn percent_inside_range_is_untouched() {
        assert_relative_eq!(
            efficiency_to_fraction(70.0, EfficiencyUnit::Percent),
            0.7,
            max_relative = 1e-12
        );
    }

    #[test]
    fn hundred_percent_is_capped() {
        assert_eq!(
            efficiency_to_fraction(100.0, EfficiencyUnit::Percent),
            EFFICIENCY_MAX
        );
    }

    #[test]
    fn conversion_does_not_clamp() {
        assert_relative_eq!(
            convert_efficiency(150.0, EfficiencyUnit::Percent, EfficiencyUnit::Fraction),
            1.5,
            max_relative = 1e-12
        );
    }

    #[test]
    fn nan_maps_to_lower_bound() {
        assert_eq!(
            efficiency_to_fraction(f64::NAN, EfficiencyUnit::Fraction),
            EFFICIENCY_MIN
        );
    }
}
