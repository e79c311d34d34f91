use approx::assert_relative_eq;
use pump_power_calculator::{
    conversion::{self, ConversionError},
    quantity::{QuantityKind, SiUnit},
    units::{
        convert_flow, density_from_sg, efficiency_to_fraction, flow_from_si, flow_to_si,
        head_to_si, EfficiencyUnit, FlowUnit, FluidDescriptor, HeadUnit, EFFICIENCY_MAX,
        EFFICIENCY_MIN,
    },
};

#[test]
fn flow_round_trips_through_si() {
    for &unit in FlowUnit::all() {
        for v in [0.0, 0.37, 12.5, 4_200.0] {
            let back = flow_from_si(flow_to_si(v, unit), unit);
            assert_relative_eq!(back, v, max_relative = 1e-12);
        }
    }
}

#[test]
fn hundred_gpm_in_cubic_meters_per_second() {
    let q = flow_to_si(100.0, FlowUnit::UsGallonPerMinute);
    assert_relative_eq!(q, 0.006_309_019_64, max_relative = 1e-12);
    // 1 ft³/s ≈ 448.831 gpm
    let gpm = convert_flow(1.0, FlowUnit::CubicFootPerSecond, FlowUnit::UsGallonPerMinute);
    assert_relative_eq!(gpm, 448.831_168_831, max_relative = 1e-9);
}

#[test]
fn feet_of_head_in_meters() {
    assert_relative_eq!(
        head_to_si(65.6168, HeadUnit::Foot),
        20.000_000_64,
        max_relative = 1e-12
    );
    assert_eq!(head_to_si(20.0, HeadUnit::Meter), 20.0);
}

#[test]
fn efficiency_is_always_within_bounds() {
    let cases = [
        (-5.0, EfficiencyUnit::Percent),
        (0.0, EfficiencyUnit::Fraction),
        (1_000.0, EfficiencyUnit::Percent),
        (1.0, EfficiencyUnit::Fraction),
        (f64::INFINITY, EfficiencyUnit::Percent),
        (f64::NEG_INFINITY, EfficiencyUnit::Fraction),
        (f64::NAN, EfficiencyUnit::Percent),
    ];
    for (v, unit) in cases {
        let eta = efficiency_to_fraction(v, unit);
        assert!(
            (EFFICIENCY_MIN..=EFFICIENCY_MAX).contains(&eta),
            "value={v} unit={unit:?} eta={eta}"
        );
    }
    assert_eq!(efficiency_to_fraction(1_000.0, EfficiencyUnit::Percent), EFFICIENCY_MAX);
    assert_eq!(efficiency_to_fraction(0.0, EfficiencyUnit::Percent), EFFICIENCY_MIN);
    assert_eq!(efficiency_to_fraction(f64::NAN, EfficiencyUnit::Fraction), EFFICIENCY_MIN);
}

#[test]
fn density_never_reaches_zero() {
    assert_eq!(density_from_sg(0.0), 1e-3);
    assert_eq!(density_from_sg(-5.0), 1e-3);
    assert_eq!(density_from_sg(1.0), 1000.0);
    assert_relative_eq!(density_from_sg(1.025), 1025.0, max_relative = 1e-12);
}

#[test]
fn density_override_wins_over_specific_gravity() {
    let fluid = FluidDescriptor::from_specific_gravity(0.8).with_density_override(1_260.0);
    assert!(fluid.is_overridden());
    assert_eq!(fluid.density_kg_m3(), 1_260.0);
    assert_eq!(FluidDescriptor::default().density_kg_m3(), 1_000.0);
}

#[test]
fn text_conversion_accepts_aliases() {
    let out = conversion::convert(QuantityKind::Flow, 1.0, "m3/h", "L/min").expect("convert");
    assert_relative_eq!(out, 1_000.0 / 60.0, max_relative = 1e-12);
    let out = conversion::convert(QuantityKind::Head, 10.0, "m", "ft").expect("convert");
    assert_relative_eq!(out, 32.808_398_95, max_relative = 1e-9);
    let out =
        conversion::convert(QuantityKind::Efficiency, 0.82, "fraction", "%").expect("convert");
    assert_relative_eq!(out, 82.0, max_relative = 1e-12);
}

#[test]
fn text_conversion_rejects_unknown_units() {
    assert_eq!(
        conversion::convert(QuantityKind::Head, 1.0, "yd", "m"),
        Err(ConversionError::UnknownUnit("yd".to_string()))
    );
    assert!(conversion::parse_quantity_kind("pressure").is_err());
}
