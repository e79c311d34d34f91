use approx::assert_relative_eq;
use pump_power_calculator::{
    pump::{
        compute_pump_power, hydraulic_power_kw, InputAdjustment, InputError, PumpPowerInput,
        G_STANDARD,
    },
    quantity::Quantity,
    units::{EfficiencyUnit, FlowUnit, FluidDescriptor, HeadUnit, EFFICIENCY_MAX},
};

fn input(q: f64, h: f64, sg: f64, eff_pct: f64) -> PumpPowerInput {
    PumpPowerInput {
        flow: Quantity::new(q, FlowUnit::CubicMeterPerSecond),
        head: Quantity::new(h, HeadUnit::Meter),
        fluid: FluidDescriptor::from_specific_gravity(sg),
        efficiency: Quantity::new(eff_pct, EfficiencyUnit::Percent),
        gravity_m_s2: G_STANDARD,
    }
}

#[test]
fn water_at_reference_duty_point() {
    let res = compute_pump_power(input(0.05, 20.0, 1.0, 70.0));
    assert_relative_eq!(res.hydraulic_power_kw, 9.80665, max_relative = 1e-12);
    assert_relative_eq!(res.shaft_power_kw, 14.0095, max_relative = 1e-9);
    assert_relative_eq!(res.hydraulic_power_hp, 13.150_935, max_relative = 1e-6);
    assert_relative_eq!(res.shaft_power_hp, 18.787_050, max_relative = 1e-6);
    assert!(res.adjustments.is_empty());
}

#[test]
fn imperial_inputs_match_si_equivalent() {
    let imperial = PumpPowerInput {
        flow: Quantity::new(100.0, FlowUnit::UsGallonPerMinute),
        head: Quantity::new(65.6168, HeadUnit::Foot),
        efficiency: Quantity::new(75.0, EfficiencyUnit::Percent),
        ..Default::default()
    };
    let res = compute_pump_power(imperial);
    let expected_kw = 1000.0 * G_STANDARD * 0.006_309_019_64 * 20.000_000_64 / 1000.0;
    assert_relative_eq!(res.hydraulic_power_kw, expected_kw, max_relative = 1e-9);
    assert_relative_eq!(res.shaft_power_kw, expected_kw / 0.75, max_relative = 1e-9);
}

#[test]
fn zero_flow_or_head_gives_zero_power() {
    for inp in [input(0.0, 20.0, 1.0, 70.0), input(0.05, 0.0, 1.0, 70.0)] {
        let res = compute_pump_power(inp);
        assert_eq!(res.hydraulic_power_kw, 0.0);
        assert_eq!(res.shaft_power_kw, 0.0);
    }
}

#[test]
fn hydraulic_power_vanishes_with_any_zero_factor() {
    for g in [0.0, 1.62, G_STANDARD, 24.79] {
        assert_eq!(hydraulic_power_kw(0.0, g, 0.05, 20.0), 0.0, "rho=0 g={g}");
        assert_eq!(hydraulic_power_kw(1000.0, g, 0.0, 20.0), 0.0, "q=0 g={g}");
        assert_eq!(hydraulic_power_kw(1000.0, g, 0.05, 0.0), 0.0, "h=0 g={g}");
    }
    assert_eq!(hydraulic_power_kw(1000.0, 0.0, 0.05, 20.0), 0.0);
}

#[test]
fn zero_specific_gravity_uses_density_floor() {
    let res = compute_pump_power(input(0.05, 20.0, 0.0, 70.0));
    assert_eq!(res.intermediate.density_kg_m3, 1e-3);
    assert!(res.hydraulic_power_kw > 0.0 && res.hydraulic_power_kw < 1e-4);
    assert_eq!(
        res.adjustments,
        vec![InputAdjustment::SpecificGravityFloored {
            requested: 0.0,
            applied_density_kg_m3: 1e-3,
        }]
    );
}

#[test]
fn custom_density_replaces_specific_gravity() {
    let mut inp = input(0.05, 20.0, 1.0, 70.0);
    inp.fluid = inp.fluid.with_density_override(850.0);
    let res = compute_pump_power(inp);
    assert_eq!(res.intermediate.density_kg_m3, 850.0);
    assert_relative_eq!(res.hydraulic_power_kw, 9.80665 * 0.85, max_relative = 1e-12);
}

#[test]
fn shaft_power_falls_as_efficiency_rises() {
    let mut prev = f64::INFINITY;
    for eff in [10.0, 35.0, 60.0, 85.0, 99.0] {
        let res = compute_pump_power(input(0.05, 20.0, 1.0, eff));
        assert!(res.shaft_power_kw >= res.hydraulic_power_kw, "eff={eff}");
        assert!(res.shaft_power_kw < prev, "eff={eff}");
        prev = res.shaft_power_kw;
    }
}

#[test]
fn out_of_range_efficiency_is_clamped_and_reported() {
    let res = compute_pump_power(input(0.05, 20.0, 1.0, 150.0));
    assert_eq!(res.intermediate.efficiency, EFFICIENCY_MAX);
    assert!(res.shaft_power_kw.is_finite());
    assert!(matches!(
        res.adjustments.as_slice(),
        [InputAdjustment::EfficiencyClamped { applied, .. }] if *applied == EFFICIENCY_MAX
    ));

    let res = compute_pump_power(input(0.05, 20.0, 1.0, 0.0));
    assert!(res.shaft_power_kw.is_finite());
    assert_relative_eq!(res.shaft_power_kw, 9.80665 / 1e-6, max_relative = 1e-9);
}

#[test]
fn validation_rejects_negative_flow() {
    let err = input(-1.0, 20.0, 1.0, 70.0).validate().unwrap_err();
    assert_eq!(
        err,
        InputError::Negative {
            field: "flow",
            value: -1.0
        }
    );
    assert!(input(0.05, 20.0, 1.0, 70.0).validate().is_ok());
}

#[test]
fn result_serializes_to_json() {
    let res = compute_pump_power(input(0.05, 20.0, 1.0, 150.0));
    let json = serde_json::to_value(&res).expect("json");
    assert_eq!(json["adjustments"][0]["kind"], "efficiency_clamped");
    assert!(json["intermediate"]["flow_m3_s"].is_number());
}
