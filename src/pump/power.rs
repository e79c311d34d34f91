use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::quantity::Quantity;
use crate::units::density::SPECIFIC_GRAVITY_FLOOR;
use crate::units::{
    efficiency_to_fraction, flow_to_si, head_to_si, EfficiencyUnit, FlowUnit, FluidDescriptor,
    HeadUnit, DENSITY_FLOOR_KG_M3,
};

/// 표준 중력가속도(m/s²).
pub const G_STANDARD: f64 = 9.80665;
/// 1 kW에 해당하는 미터 마력(HP).
///
/// 값은 1 / 0.7457 kW/HP로 정한 관용 환산 상수이다.
pub const HP_PER_KW: f64 = 1.341_022_09;

/// 수력 동력(kW) = ρ·g·Q·H / 1000.
pub fn hydraulic_power_kw(rho: f64, g: f64, q: f64, h: f64) -> f64 {
    (rho * g * q * h) / 1000.0
}

/// 축 동력(kW) = 수력 동력 / 효율.
///
/// 효율은 상류에서 1e-6 이상으로 클램프되므로 0으로 나누는 일은 없다.
/// 효율이 극단적으로 낮으면 매우 큰 유한값이 나온다.
pub fn shaft_power_kw(hydraulic_kw: f64, efficiency_fraction: f64) -> f64 {
    hydraulic_kw / efficiency_fraction
}

/// kW를 미터 마력(HP)으로 환산한다.
pub fn kw_to_hp(kw: f64) -> f64 {
    kw * HP_PER_KW
}

/// 펌프 동력 계산 입력.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PumpPowerInput {
    /// 체적 유량
    pub flow: Quantity<FlowUnit>,
    /// 전양정(TDH)
    pub head: Quantity<HeadUnit>,
    /// 유체 비중 또는 지정 밀도
    pub fluid: FluidDescriptor,
    /// 펌프 효율
    pub efficiency: Quantity<EfficiencyUnit>,
    /// 중력가속도(m/s²)
    pub gravity_m_s2: f64,
}

impl Default for PumpPowerInput {
    fn default() -> Self {
        Self {
            flow: Quantity::new(0.05, FlowUnit::CubicMeterPerSecond),
            head: Quantity::new(20.0, HeadUnit::Meter),
            fluid: FluidDescriptor::default(),
            efficiency: Quantity::new(70.0, EfficiencyUnit::Percent),
            gravity_m_s2: G_STANDARD,
        }
    }
}

/// 입력 화면이 계산 전에 거르는 단순 수치 범위 오류.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InputError {
    #[error("{field} must be a finite number (got {value})")]
    NotFinite { field: &'static str, value: f64 },
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), InputError> {
    check_finite(field, value)?;
    if value < 0.0 {
        return Err(InputError::Negative { field, value });
    }
    Ok(())
}

fn check_finite(field: &'static str, value: f64) -> Result<(), InputError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(InputError::NotFinite { field, value })
    }
}

impl PumpPowerInput {
    /// 유량·양정·지정 밀도·중력은 0 이상, 비중·효율은 유한값이어야 한다.
    ///
    /// 범위를 벗어난 효율과 비중은 오류가 아니며 계산 시 보정된다.
    pub fn validate(&self) -> Result<(), InputError> {
        check_non_negative("flow", self.flow.value)?;
        check_non_negative("head", self.head.value)?;
        check_finite("specific gravity", self.fluid.specific_gravity)?;
        if let Some(rho) = self.fluid.density_override_kg_m3 {
            check_non_negative("density", rho)?;
        }
        check_finite("efficiency", self.efficiency.value)?;
        check_non_negative("gravity", self.gravity_m_s2)?;
        Ok(())
    }
}

/// SI로 정규화된 중간값. 계산 과정 표시에 쓴다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiInputs {
    /// Q (m³/s)
    pub flow_m3_s: f64,
    /// H (m)
    pub head_m: f64,
    /// ρ (kg/m³)
    pub density_kg_m3: f64,
    /// η (분율)
    pub efficiency: f64,
}

/// 계산 중 조용히 보정된 입력.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputAdjustment {
    /// 효율 분율이 [1e-6, 0.999999] 밖이어서 경계값으로 클램프됨
    EfficiencyClamped { requested: f64, applied: f64 },
    /// 비중이 하한 미만이어서 올려짐
    SpecificGravityFloored { requested: f64, applied_density_kg_m3: f64 },
    /// 지정 밀도가 하한 미만이어서 올려짐
    DensityOverrideFloored { requested: f64, applied_density_kg_m3: f64 },
}

/// 펌프 동력 계산 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PumpPowerResult {
    pub hydraulic_power_kw: f64,
    pub hydraulic_power_hp: f64,
    pub shaft_power_kw: f64,
    pub shaft_power_hp: f64,
    pub intermediate: SiInputs,
    pub adjustments: Vec<InputAdjustment>,
}

impl PumpPowerResult {
    pub fn has_adjustments(&self) -> bool {
        !self.adjustments.is_empty()
    }
}

fn detect_adjustments(input: &PumpPowerInput, si: &SiInputs) -> Vec<InputAdjustment> {
    let mut adjustments = Vec::new();

    let requested_eta = input.efficiency.to_si();
    if requested_eta != si.efficiency {
        adjustments.push(InputAdjustment::EfficiencyClamped {
            requested: requested_eta,
            applied: si.efficiency,
        });
    }

    match input.fluid.density_override_kg_m3 {
        Some(rho) if rho.is_nan() || rho < DENSITY_FLOOR_KG_M3 => {
            adjustments.push(InputAdjustment::DensityOverrideFloored {
                requested: rho,
                applied_density_kg_m3: si.density_kg_m3,
            });
        }
        Some(_) => {}
        None => {
            let sg = input.fluid.specific_gravity;
            if sg.is_nan() || sg < SPECIFIC_GRAVITY_FLOOR {
                adjustments.push(InputAdjustment::SpecificGravityFloored {
                    requested: sg,
                    applied_density_kg_m3: si.density_kg_m3,
                });
            }
        }
    }
    adjustments
}

/// 입력을 SI로 정규화한 뒤 수력 동력과 축 동력을 계산한다.
///
/// 매번 처음부터 다시 계산하며 실패하지 않는다.
pub fn compute_pump_power(input: PumpPowerInput) -> PumpPowerResult {
    let si = SiInputs {
        flow_m3_s: flow_to_si(input.flow.value, input.flow.unit),
        head_m: head_to_si(input.head.value, input.head.unit),
        density_kg_m3: input.fluid.density_kg_m3(),
        efficiency: efficiency_to_fraction(input.efficiency.value, input.efficiency.unit),
    };
    let adjustments = detect_adjustments(&input, &si);
    for adj in &adjustments {
        debug!(?adj, "input adjusted");
    }

    let hydraulic_kw = hydraulic_power_kw(
        si.density_kg_m3,
        input.gravity_m_s2,
        si.flow_m3_s,
        si.head_m,
    );
    let shaft_kw = shaft_power_kw(hydraulic_kw, si.efficiency);
    debug!(
        q = si.flow_m3_s,
        h = si.head_m,
        rho = si.density_kg_m3,
        eta = si.efficiency,
        hydraulic_kw,
        shaft_kw,
        "pump power computed"
    );

    PumpPowerResult {
        hydraulic_power_kw: hydraulic_kw,
        hydraulic_power_hp: kw_to_hp(hydraulic_kw),
        shaft_power_kw: shaft_kw,
        shaft_power_hp: kw_to_hp(shaft_kw),
        intermediate: si,
        adjustments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_input_matches_reference_case() {
        let res = compute_pump_power(PumpPowerInput::default());
        assert_relative_eq!(res.hydraulic_power_kw, 9.80665, max_relative = 1e-12);
        assert!(!res.has_adjustments());
    }

    #[test]
    fn efficiency_over_hundred_percent_is_reported() {
        let input = PumpPowerInput {
            efficiency: Quantity::new(120.0, EfficiencyUnit::Percent),
            ..Default::default()
        };
        let res = compute_pump_power(input);
        assert_eq!(res.intermediate.efficiency, crate::units::EFFICIENCY_MAX);
        assert!(matches!(
            res.adjustments.as_slice(),
            [InputAdjustment::EfficiencyClamped { .. }]
        ));
    }

    #[test]
    fn zero_specific_gravity_is_reported() {
        let input = PumpPowerInput {
            fluid: FluidDescriptor::from_specific_gravity(0.0),
            ..Default::default()
        };
        let res = compute_pump_power(input);
        assert_eq!(res.intermediate.density_kg_m3, DENSITY_FLOOR_KG_M3);
        assert!(matches!(
            res.adjustments.as_slice(),
            [InputAdjustment::SpecificGravityFloored { .. }]
        ));
    }

    #[test]
    fn specific_gravity_is_ignored_when_overridden() {
        let input = PumpPowerInput {
            fluid: FluidDescriptor::from_specific_gravity(-3.0).with_density_override(1025.0),
            ..Default::default()
        };
        let res = compute_pump_power(input);
        assert_eq!(res.intermediate.density_kg_m3, 1025.0);
        assert!(!res.has_adjustments());
    }

    #[test]
    fn validate_rejects_negative_flow() {
        let input = PumpPowerInput {
            flow: Quantity::new(-1.0, FlowUnit::LiterPerSecond),
            ..Default::default()
        };
        assert_eq!(
            input.validate(),
            Err(InputError::Negative {
                field: "flow",
                value: -1.0
            })
        );
    }

    #[test]
    fn validate_accepts_out_of_range_efficiency() {
        let input = PumpPowerInput {
            efficiency: Quantity::new(-40.0, EfficiencyUnit::Percent),
            ..Default::default()
        };
        assert!(input.validate().is_ok());
    }
}
