use serde::{Deserialize, Serialize};

/// 다루는 물리량 종류를 나타낸다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuantityKind {
    Flow,
    Head,
    Efficiency,
}

impl QuantityKind {
    pub const ALL: [QuantityKind; 3] = [
        QuantityKind::Flow,
        QuantityKind::Head,
        QuantityKind::Efficiency,
    ];
}

/// 내부 기준 단위(SI)로의 곱셈 계수를 가진 단위 집합.
///
/// 모든 단위 enum은 닫힌 집합이므로 알 수 없는 단위는 타입 수준에서 표현할 수 없다.
pub trait SiUnit: Copy + PartialEq + 'static {
    /// 이 단위 값 1을 SI 기준 단위로 바꾸는 계수.
    fn si_factor(self) -> f64;
    /// 화면 표시용 단위 기호.
    fn symbol(self) -> &'static str;
    /// 지원하는 모든 단위.
    fn all() -> &'static [Self];
}

/// 값과 단위 태그의 쌍.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity<U> {
    pub value: f64,
    pub unit: U,
}

impl<U: SiUnit> Quantity<U> {
    pub fn new(value: f64, unit: U) -> Self {
        Self { value, unit }
    }

    /// 계수만 곱한 SI 값. 효율의 클램프 같은 보정은 적용하지 않는다.
    pub fn to_si(&self) -> f64 {
        self.value * self.unit.si_factor()
    }

    /// SI 값을 지정 단위의 Quantity로 되돌린다.
    pub fn from_si(value_si: f64, unit: U) -> Self {
        Self {
            value: value_si / unit.si_factor(),
            unit,
        }
    }

    /// 같은 계열의 다른 단위로 환산한다.
    pub fn to_unit(&self, unit: U) -> Self {
        Self::from_si(self.to_si(), unit)
    }
}

impl<U: SiUnit> std::fmt::Display for Quantity<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, self.unit.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{FlowUnit, HeadUnit};
    use approx::assert_relative_eq;

    #[test]
    fn to_unit_keeps_si_value() {
        let q = Quantity::new(3.6, FlowUnit::CubicMeterPerHour);
        let lps = q.to_unit(FlowUnit::LiterPerSecond);
        assert_eq!(lps.unit, FlowUnit::LiterPerSecond);
        assert_relative_eq!(lps.value, 1.0, max_relative = 1e-12);
        assert_relative_eq!(lps.to_si(), q.to_si(), max_relative = 1e-12);
    }

    #[test]
    fn from_si_divides_by_factor() {
        let h = Quantity::from_si(0.3048, HeadUnit::Foot);
        assert_relative_eq!(h.value, 1.0, max_relative = 1e-12);
        assert_eq!(h.to_string(), format!("{} ft", h.value));
    }
}
