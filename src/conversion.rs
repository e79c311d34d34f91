use thiserror::Error;

use crate::quantity::{QuantityKind, SiUnit};
use crate::units::*;

/// 단위 문자열 해석 시 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// 알 수 없는 단위 문자열
    #[error("unknown unit: {0}")]
    UnknownUnit(String),
    /// 지원하지 않는 물리량
    #[error("unsupported quantity: {0}")]
    UnknownQuantity(String),
}

/// 문자열로 전달된 단위명을 enum으로 바꾼 뒤 같은 계열의 다른 단위로 환산한다.
///
/// 효율 변환은 단순 환산이며 계산 시의 클램프는 적용하지 않는다.
pub fn convert(
    kind: QuantityKind,
    value: f64,
    from_unit_str: &str,
    to_unit_str: &str,
) -> Result<f64, ConversionError> {
    match kind {
        QuantityKind::Flow => {
            let from = parse_flow_unit(from_unit_str)?;
            let to = parse_flow_unit(to_unit_str)?;
            Ok(convert_flow(value, from, to))
        }
        QuantityKind::Head => {
            let from = parse_head_unit(from_unit_str)?;
            let to = parse_head_unit(to_unit_str)?;
            Ok(convert_head(value, from, to))
        }
        QuantityKind::Efficiency => {
            let from = parse_efficiency_unit(from_unit_str)?;
            let to = parse_efficiency_unit(to_unit_str)?;
            Ok(convert_efficiency(value, from, to))
        }
    }
}

pub fn parse_quantity_kind(s: &str) -> Result<QuantityKind, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "flow" | "q" => Ok(QuantityKind::Flow),
        "head" | "h" | "tdh" => Ok(QuantityKind::Head),
        "efficiency" | "eff" | "eta" => Ok(QuantityKind::Efficiency),
        _ => Err(ConversionError::UnknownQuantity(s.to_string())),
    }
}

fn normalize(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .replace('³', "3")
        .replace("^3", "3")
        .replace(' ', "")
}

pub fn parse_flow_unit(s: &str) -> Result<FlowUnit, ConversionError> {
    match normalize(s).as_str() {
        "m3/s" | "cms" => Ok(FlowUnit::CubicMeterPerSecond),
        "l/s" | "lps" => Ok(FlowUnit::LiterPerSecond),
        "l/min" | "lpm" => Ok(FlowUnit::LiterPerMinute),
        "m3/h" | "m3/hr" | "cmh" => Ok(FlowUnit::CubicMeterPerHour),
        "gpm" | "gpm(us)" | "usgpm" => Ok(FlowUnit::UsGallonPerMinute),
        "ft3/s" | "cfs" => Ok(FlowUnit::CubicFootPerSecond),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

pub fn parse_head_unit(s: &str) -> Result<HeadUnit, ConversionError> {
    match normalize(s).as_str() {
        "m" | "meter" | "metre" => Ok(HeadUnit::Meter),
        "ft" | "foot" | "feet" => Ok(HeadUnit::Foot),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

pub fn parse_efficiency_unit(s: &str) -> Result<EfficiencyUnit, ConversionError> {
    match normalize(s).as_str() {
        "%" | "percent" | "pct" => Ok(EfficiencyUnit::Percent),
        "fraction" | "frac" | "-" => Ok(EfficiencyUnit::Fraction),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

/// 물리량별로 입력 가능한 대표 단위 기호 목록.
pub fn unit_symbols(kind: QuantityKind) -> Vec<&'static str> {
    match kind {
        QuantityKind::Flow => symbols::<FlowUnit>(),
        QuantityKind::Head => symbols::<HeadUnit>(),
        QuantityKind::Efficiency => symbols::<EfficiencyUnit>(),
    }
}

fn symbols<U: SiUnit>() -> Vec<&'static str> {
    U::all().iter().map(|u| u.symbol()).collect()
}
