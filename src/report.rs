//! 계산 결과를 사람이 읽을 수 있는 문자열로 만든다.
//!
//! CLI와 GUI가 같은 문구를 쓰도록 모든 출력 문자열은 여기서 만든다.

use crate::i18n::{keys, Translator};
use crate::pump::{InputAdjustment, PumpPowerInput, PumpPowerResult};
use crate::quantity::SiUnit;

/// 천 단위 구분 쉼표를 넣어 소수점 `decimals` 자리로 포맷한다.
pub fn format_grouped(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }
    let raw = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (raw.as_str(), None),
    };

    let mut grouped = String::with_capacity(raw.len() + int_part.len() / 3 + 1);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(f) = frac_part {
        grouped.push('.');
        grouped.push_str(f);
    }
    // -0.000 처럼 반올림 후 0이 되는 값에는 부호를 붙이지 않는다.
    if value < 0.0 && grouped.chars().any(|c| c.is_ascii_digit() && c != '0') {
        grouped.insert(0, '-');
    }
    grouped
}

/// 결과 요약 두 줄(수력 동력, 축 동력).
pub fn result_lines(tr: &Translator, result: &PumpPowerResult) -> Vec<String> {
    vec![
        format!(
            "{}: {} kW | {} HP",
            tr.t(keys::RESULT_HYDRAULIC_POWER),
            format_grouped(result.hydraulic_power_kw, 3),
            format_grouped(result.hydraulic_power_hp, 3)
        ),
        format!(
            "{}: {} kW | {} HP",
            tr.t(keys::RESULT_SHAFT_POWER),
            format_grouped(result.shaft_power_kw, 3),
            format_grouped(result.shaft_power_hp, 3)
        ),
    ]
}

/// 입력 보정 하나를 경고 문장으로 만든다.
pub fn adjustment_message(tr: &Translator, adjustment: &InputAdjustment) -> String {
    match *adjustment {
        InputAdjustment::EfficiencyClamped { requested, applied } => tr.tf(
            keys::WARNING_EFFICIENCY_CLAMPED,
            &[
                ("requested", format!("{requested}")),
                ("applied", format!("{applied:.6}")),
            ],
        ),
        InputAdjustment::SpecificGravityFloored {
            requested,
            applied_density_kg_m3,
        } => tr.tf(
            keys::WARNING_SG_FLOORED,
            &[
                ("requested", format!("{requested}")),
                ("applied", format!("{applied_density_kg_m3}")),
            ],
        ),
        InputAdjustment::DensityOverrideFloored {
            requested,
            applied_density_kg_m3,
        } => tr.tf(
            keys::WARNING_DENSITY_FLOORED,
            &[
                ("requested", format!("{requested}")),
                ("applied", format!("{applied_density_kg_m3}")),
            ],
        ),
    }
}

/// 입력값과 SI 중간값, 결과를 단계별로 보여 주는 텍스트.
pub fn calculation_steps(
    tr: &Translator,
    input: &PumpPowerInput,
    result: &PumpPowerResult,
) -> String {
    let si = &result.intermediate;
    let lines = [
        tr.t(keys::STEPS_GIVEN).to_string(),
        format!(
            "    {} = {} {}  -> Q_SI = {:.6} m³/s",
            tr.t(keys::STEPS_FLOW),
            input.flow.value,
            input.flow.unit.symbol(),
            si.flow_m3_s
        ),
        format!(
            "    {} = {} {}  -> H_SI = {:.6} m",
            tr.t(keys::STEPS_HEAD),
            input.head.value,
            input.head.unit.symbol(),
            si.head_m
        ),
        format!(
            "    {} = {:.4}",
            tr.t(keys::STEPS_SPECIFIC_GRAVITY),
            input.fluid.specific_gravity
        ),
        format!(
            "    {}",
            tr.tf(
                keys::STEPS_DENSITY_USED,
                &[
                    ("rho", format!("{:.2}", si.density_kg_m3)),
                    ("overridden", input.fluid.is_overridden().to_string()),
                ],
            )
        ),
        format!(
            "    {} = {:.3} m/s²",
            tr.t(keys::STEPS_GRAVITY),
            input.gravity_m_s2
        ),
        format!(
            "    {} = {} {} -> η = {:.6}",
            tr.t(keys::STEPS_EFFICIENCY),
            input.efficiency.value,
            input.efficiency.unit.symbol(),
            si.efficiency
        ),
        String::new(),
        tr.t(keys::STEPS_COMPUTED).to_string(),
        format!(
            "    {} = {:.6} kW = {:.6} HP",
            tr.t(keys::STEPS_HYDRAULIC),
            result.hydraulic_power_kw,
            result.hydraulic_power_hp
        ),
        format!(
            "    {} = {:.6} kW = {:.6} HP",
            tr.t(keys::STEPS_SHAFT),
            result.shaft_power_kw,
            result.shaft_power_hp
        ),
    ];
    lines.join("\n")
}

/// 공식과 가정 설명.
pub fn formula_notes(tr: &Translator) -> String {
    format!("{}\n{}", tr.t(keys::NOTES_HEADING), tr.t(keys::NOTES_BODY))
}

/// 결과, 보정 경고, (선택) 계산 과정을 합친 텍스트 보고서.
pub fn render_text(
    tr: &Translator,
    input: &PumpPowerInput,
    result: &PumpPowerResult,
    show_steps: bool,
) -> String {
    let mut out = vec![format!("[{}]", tr.t(keys::RESULT_HEADING))];
    out.extend(result_lines(tr, result));
    if result.has_adjustments() {
        out.push(String::new());
        out.push(format!("[{}]", tr.t(keys::WARNINGS_HEADING)));
        out.extend(
            result
                .adjustments
                .iter()
                .map(|adj| format!("- {}", adjustment_message(tr, adj))),
        );
    }
    if show_steps {
        out.push(String::new());
        out.push(format!("[{}]", tr.t(keys::STEPS_HEADING)));
        out.push(calculation_steps(tr, input, result));
    }
    out.join("\n")
}
