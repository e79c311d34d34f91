use std::io::{self, BufRead, Write};

use crate::app::AppError;
use crate::config::Config;
use crate::i18n::{self, keys, Translator};
use crate::pump::{compute_pump_power, PumpPowerInput};
use crate::quantity::{Quantity, SiUnit};
use crate::report;
use crate::units::{EfficiencyUnit, FlowUnit, FluidDescriptor, HeadUnit};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    PumpPower,
    Settings,
    Exit,
}

fn parse_menu_choice(sel: &str) -> Option<MenuChoice> {
    match sel.trim() {
        "1" => Some(MenuChoice::PumpPower),
        "2" => Some(MenuChoice::Settings),
        "0" => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_PUMP_POWER));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match parse_menu_choice(&sel) {
            Some(choice) => return Ok(choice),
            None => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 펌프 동력 메뉴를 처리한다. 엔터만 누르면 설정의 기본값을 쓴다.
pub fn handle_pump_power(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::PUMP_HEADING));
    let d = &cfg.defaults;

    let flow_value = read_non_negative(tr, keys::PROMPT_FLOW_VALUE, d.flow_value)?;
    let flow_unit = read_unit::<FlowUnit>(tr, keys::PROMPT_FLOW_UNIT, d.flow_unit)?;
    let head_value = read_non_negative(tr, keys::PROMPT_HEAD_VALUE, d.head_value)?;
    let head_unit = read_unit::<HeadUnit>(tr, keys::PROMPT_HEAD_UNIT, d.head_unit)?;

    println!("{}", tr.t(keys::HELP_SPECIFIC_GRAVITY));
    let sg = read_non_negative(tr, keys::PROMPT_SPECIFIC_GRAVITY, d.specific_gravity)?;
    let density_override = read_optional_non_negative(
        tr,
        keys::PROMPT_CUSTOM_DENSITY,
        d.density_override_kg_m3,
    )?;

    let eff_value = read_non_negative(tr, keys::PROMPT_EFFICIENCY_VALUE, d.efficiency_value)?;
    let eff_unit =
        read_unit::<EfficiencyUnit>(tr, keys::PROMPT_EFFICIENCY_UNIT, d.efficiency_unit)?;
    let gravity = read_non_negative(tr, keys::PROMPT_GRAVITY, d.gravity_m_s2)?;

    let mut fluid = FluidDescriptor::from_specific_gravity(sg);
    fluid.density_override_kg_m3 = density_override;
    let input = PumpPowerInput {
        flow: Quantity::new(flow_value, flow_unit),
        head: Quantity::new(head_value, head_unit),
        fluid,
        efficiency: Quantity::new(eff_value, eff_unit),
        gravity_m_s2: gravity,
    };
    input.validate()?;

    let result = compute_pump_power(input);
    println!();
    println!("{}", report::render_text(tr, &input, &result, cfg.show_steps));
    Ok(())
}

/// 설정 메뉴를 처리한다. 변경이 있으면 true를 반환한다.
pub fn handle_settings(tr: &mut Translator, cfg: &mut Config) -> Result<bool, AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "{}",
        tr.tf(
            keys::SETTINGS_CURRENT,
            &[
                ("lang", cfg.language.clone()),
                ("steps", cfg.show_steps.to_string()),
            ],
        )
    );
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
    match sel.trim() {
        "" => Ok(false),
        "1" => {
            let code = read_line(tr.t(keys::SETTINGS_PROMPT_LANGUAGE))?;
            let code = code.trim().to_lowercase();
            if !matches!(code.as_str(), "auto" | "ko" | "en") {
                println!("{}", tr.t(keys::SETTINGS_INVALID));
                return Ok(false);
            }
            *tr = Translator::new(&i18n::resolve_language(&code, None));
            cfg.language = code;
            Ok(true)
        }
        "2" => {
            cfg.show_steps = !cfg.show_steps;
            Ok(true)
        }
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            Ok(false)
        }
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    let n = io::stdin().lock().read_line(&mut buf)?;
    if n == 0 {
        // 입력 스트림이 닫히면 더 물어볼 수 없으므로 종료 처리한다.
        return Err(AppError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "stdin closed",
        )));
    }
    Ok(buf)
}

/// 숫자 입력 한 줄을 해석한다. 빈 입력은 None.
fn parse_number(s: &str) -> Option<Result<f64, ()>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    Some(s.parse::<f64>().map_err(|_| ()))
}

fn read_non_negative(tr: &Translator, key: &str, default: f64) -> Result<f64, AppError> {
    let prompt = format!(
        "{} {}: ",
        tr.t(key),
        tr.tf(keys::PUMP_DEFAULT_HINT, &[("default", default.to_string())])
    );
    loop {
        let s = read_line(&prompt)?;
        match parse_number(&s) {
            None => return Ok(default),
            Some(Ok(v)) if v.is_finite() && v >= 0.0 => return Ok(v),
            Some(Ok(_)) => println!("{}", tr.t(keys::NEGATIVE_NOT_ALLOWED)),
            Some(Err(())) => println!("{}", tr.t(keys::INVALID_NUMBER)),
        }
    }
}

fn read_optional_non_negative(
    tr: &Translator,
    key: &str,
    default: Option<f64>,
) -> Result<Option<f64>, AppError> {
    let hint = default.map(|v| v.to_string()).unwrap_or_else(|| "-".into());
    let prompt = format!(
        "{} {}: ",
        tr.t(key),
        tr.tf(keys::PUMP_DEFAULT_HINT, &[("default", hint)])
    );
    loop {
        let s = read_line(&prompt)?;
        if s.trim() == "-" {
            return Ok(None);
        }
        match parse_number(&s) {
            None => return Ok(default),
            Some(Ok(v)) if v.is_finite() && v >= 0.0 => return Ok(Some(v)),
            Some(Ok(_)) => println!("{}", tr.t(keys::NEGATIVE_NOT_ALLOWED)),
            Some(Err(())) => println!("{}", tr.t(keys::INVALID_NUMBER)),
        }
    }
}

/// 단위 목록을 번호로 보여 주고 선택을 받는다.
fn read_unit<U: SiUnit>(tr: &Translator, key: &str, default: U) -> Result<U, AppError> {
    let options = U::all()
        .iter()
        .enumerate()
        .map(|(i, u)| format!("{}={}", i + 1, u.symbol()))
        .collect::<Vec<_>>()
        .join(" ");
    println!("{}: {options}", tr.t(key));
    let prompt = format!(
        "{} {}: ",
        tr.t(keys::UNIT_KEEP_DEFAULT),
        tr.tf(keys::PUMP_DEFAULT_HINT, &[("default", default.symbol().to_string())])
    );
    loop {
        let s = read_line(&prompt)?;
        match select_unit(&s, default) {
            Some(unit) => return Ok(unit),
            None => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

fn select_unit<U: SiUnit>(sel: &str, default: U) -> Option<U> {
    let sel = sel.trim();
    if sel.is_empty() {
        return Some(default);
    }
    let n = sel.parse::<usize>().ok()?;
    U::all().get(n.checked_sub(1)?).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_numbers_map_to_choices() {
        assert_eq!(parse_menu_choice(" 1\n"), Some(MenuChoice::PumpPower));
        assert_eq!(parse_menu_choice("0"), Some(MenuChoice::Exit));
        assert_eq!(parse_menu_choice("9"), None);
    }

    #[test]
    fn unit_selection_is_one_based() {
        assert_eq!(
            select_unit("5", FlowUnit::CubicMeterPerSecond),
            Some(FlowUnit::UsGallonPerMinute)
        );
        assert_eq!(select_unit("\n", HeadUnit::Foot), Some(HeadUnit::Foot));
        assert_eq!(select_unit("0", HeadUnit::Meter), None);
        assert_eq!(select_unit("3", HeadUnit::Meter), None);
    }

    #[test]
    fn empty_number_means_default() {
        assert_eq!(parse_number("  \n"), None);
        assert_eq!(parse_number("2.5"), Some(Ok(2.5)));
        assert_eq!(parse_number("abc"), Some(Err(())));
    }
}
