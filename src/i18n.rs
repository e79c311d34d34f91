use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;
use tracing::debug;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const APP_TITLE: &str = "general.app_title";
    pub const APP_CAPTION: &str = "general.app_caption";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_PUMP_POWER: &str = "main_menu.pump_power";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const INVALID_NUMBER: &str = "error.invalid_number";
    pub const NEGATIVE_NOT_ALLOWED: &str = "error.negative_not_allowed";

    pub const PUMP_HEADING: &str = "pump.heading";
    pub const PUMP_DEFAULT_HINT: &str = "pump.default_hint";
    pub const SECTION_FLOW: &str = "pump.section_flow";
    pub const SECTION_HEAD: &str = "pump.section_head";
    pub const SECTION_FLUID: &str = "pump.section_fluid";
    pub const SECTION_EFFICIENCY: &str = "pump.section_efficiency";
    pub const SECTION_DRIVE: &str = "pump.section_drive";
    pub const SECTION_ADVANCED: &str = "pump.section_advanced";
    pub const PROMPT_FLOW_VALUE: &str = "prompt.flow_value";
    pub const PROMPT_FLOW_UNIT: &str = "prompt.flow_unit";
    pub const PROMPT_HEAD_VALUE: &str = "prompt.head_value";
    pub const PROMPT_HEAD_UNIT: &str = "prompt.head_unit";
    pub const PROMPT_SPECIFIC_GRAVITY: &str = "prompt.specific_gravity";
    pub const HELP_SPECIFIC_GRAVITY: &str = "help.specific_gravity";
    pub const PROMPT_DENSITY_OVERRIDE: &str = "prompt.density_override";
    pub const PROMPT_CUSTOM_DENSITY: &str = "prompt.custom_density";
    pub const PROMPT_EFFICIENCY_VALUE: &str = "prompt.efficiency_value";
    pub const PROMPT_EFFICIENCY_UNIT: &str = "prompt.efficiency_unit";
    pub const PROMPT_GRAVITY: &str = "prompt.gravity";
    pub const HELP_GRAVITY: &str = "help.gravity";
    pub const PROMPT_SHOW_STEPS: &str = "prompt.show_steps";
    pub const UNIT_KEEP_DEFAULT: &str = "prompt.unit_keep_default";

    pub const RESULT_HEADING: &str = "result.heading";
    pub const RESULT_HYDRAULIC_POWER: &str = "result.hydraulic_power";
    pub const RESULT_SHAFT_POWER: &str = "result.shaft_power";
    pub const HELP_HYDRAULIC_POWER: &str = "help.hydraulic_power";
    pub const HELP_SHAFT_POWER: &str = "help.shaft_power";

    pub const WARNINGS_HEADING: &str = "warning.heading";
    pub const WARNING_EFFICIENCY_CLAMPED: &str = "warning.efficiency_clamped";
    pub const WARNING_SG_FLOORED: &str = "warning.sg_floored";
    pub const WARNING_DENSITY_FLOORED: &str = "warning.density_floored";

    pub const STEPS_HEADING: &str = "steps.heading";
    pub const STEPS_GIVEN: &str = "steps.given";
    pub const STEPS_COMPUTED: &str = "steps.computed";
    pub const STEPS_FLOW: &str = "steps.flow";
    pub const STEPS_HEAD: &str = "steps.head";
    pub const STEPS_SPECIFIC_GRAVITY: &str = "steps.specific_gravity";
    pub const STEPS_DENSITY_USED: &str = "steps.density_used";
    pub const STEPS_GRAVITY: &str = "steps.gravity";
    pub const STEPS_EFFICIENCY: &str = "steps.efficiency";
    pub const STEPS_HYDRAULIC: &str = "steps.hydraulic";
    pub const STEPS_SHAFT: &str = "steps.shaft";

    pub const NOTES_HEADING: &str = "notes.heading";
    pub const NOTES_BODY: &str = "notes.body";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT: &str = "settings.current";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_LANGUAGE: &str = "settings.prompt_language";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
    pub const SETTINGS_LANGUAGE: &str = "settings.language";
    pub const SETTINGS_RESET_DEFAULTS: &str = "settings.reset_defaults";
    pub const SETTINGS_SAVE_DEFAULTS: &str = "settings.save_defaults";
    pub const SETTINGS_FONT_MISSING: &str = "settings.font_missing";

    pub const CONVERT_RESULT: &str = "convert.result";
    pub const UNITS_HEADING: &str = "units.heading";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }

    /// 언어 선택 화면에 쓰는 자국어 이름.
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::Ko => "한국어",
            Language::En => "English",
        }
    }

    pub const ALL: [Language; 2] = [Language::Ko, Language::En];
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&Path>) -> Self {
        let overrides = pack_dir.and_then(|dir| load_overrides(dir, lang_code));
        if overrides.is_some() {
            debug!(lang = lang_code, "language pack loaded");
        }
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 번역을 가져온다. 언어팩 > 내장 문자열 순이며 영어 번역이 없으면 한국어를 쓴다.
    /// 어디에도 없으면 키를 그대로 돌려준다.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v.as_str();
        }
        match self.lang {
            Language::En => en(key).or_else(|| ko(key)).unwrap_or(key),
            Language::Ko => ko(key).unwrap_or(key),
        }
    }

    /// 템플릿 키를 번역한 뒤 `{name}` 자리를 채운다.
    pub fn tf(&self, key: &str, vars: &[(&str, String)]) -> String {
        fill_template(self.t(key), vars)
    }
}

/// `{name}` 형식의 자리표시자를 값으로 치환한다.
pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 또는 [section] 아래의 중첩 키.
fn load_overrides(dir: &Path, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = dir.join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., en-us)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., en)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    let s = match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        APP_TITLE => "펌프 동력 계산기",
        APP_CAPTION => "원심/회전식 펌프의 수력 동력과 축 동력을 계산합니다. SI·US 단위, 비중으로 임의 유체 지원.",
        MAIN_MENU_TITLE => "\n=== 펌프 동력 계산기 ===",
        MAIN_MENU_PUMP_POWER => "1) 펌프 동력 계산",
        MAIN_MENU_SETTINGS => "2) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        INVALID_NUMBER => "숫자를 입력하세요.",
        NEGATIVE_NOT_ALLOWED => "0 이상의 값을 입력하세요.",
        PUMP_HEADING => "\n-- 펌프 동력 계산 --",
        PUMP_DEFAULT_HINT => "(엔터 = {default})",
        SECTION_FLOW => "유량",
        SECTION_HEAD => "전양정(TDH)",
        SECTION_FLUID => "유체",
        SECTION_EFFICIENCY => "효율",
        SECTION_DRIVE => "펌프/구동",
        SECTION_ADVANCED => "고급",
        PROMPT_FLOW_VALUE => "유량 값",
        PROMPT_FLOW_UNIT => "유량 단위",
        PROMPT_HEAD_VALUE => "양정 값",
        PROMPT_HEAD_UNIT => "양정 단위",
        PROMPT_SPECIFIC_GRAVITY => "비중(SG)",
        HELP_SPECIFIC_GRAVITY => "SG = ρ_유체 / ρ_물. 물 ≈ 1.00, 해수 ≈ 1.025, 오일 < 1 등.",
        PROMPT_DENSITY_OVERRIDE => "사용자 지정 밀도로 대체(kg/m³)",
        PROMPT_CUSTOM_DENSITY => "사용자 지정 밀도 (kg/m³, '-' 입력 시 비중 사용)",
        PROMPT_EFFICIENCY_VALUE => "펌프 효율",
        PROMPT_EFFICIENCY_UNIT => "효율 단위",
        PROMPT_GRAVITY => "중력가속도 g (m/s²)",
        HELP_GRAVITY => "표준 지구 중력은 9.80665 m/s² 입니다.",
        PROMPT_SHOW_STEPS => "계산 과정 표시",
        UNIT_KEEP_DEFAULT => "번호 선택",
        RESULT_HEADING => "결과",
        RESULT_HYDRAULIC_POWER => "수력 동력",
        RESULT_SHAFT_POWER => "축 동력",
        HELP_HYDRAULIC_POWER => "유체에 전달되는 동력.",
        HELP_SHAFT_POWER => "펌프 축에서 필요한 동력(모터/구동 손실 제외).",
        WARNINGS_HEADING => "입력 보정",
        WARNING_EFFICIENCY_CLAMPED => "효율 {requested} 은(는) 허용 범위 밖이므로 η = {applied} 로 보정했습니다.",
        WARNING_SG_FLOORED => "비중 {requested} 은(는) 0 이하이므로 밀도를 {applied} kg/m³ 로 보정했습니다.",
        WARNING_DENSITY_FLOORED => "지정 밀도 {requested} kg/m³ 가 너무 작아 {applied} kg/m³ 로 보정했습니다.",
        STEPS_HEADING => "계산 과정",
        STEPS_GIVEN => "입력:",
        STEPS_COMPUTED => "계산:",
        STEPS_FLOW => "유량",
        STEPS_HEAD => "양정",
        STEPS_SPECIFIC_GRAVITY => "비중",
        STEPS_DENSITY_USED => "사용 밀도 = {rho} kg/m³ (사용자 지정 = {overridden})",
        STEPS_GRAVITY => "g",
        STEPS_EFFICIENCY => "효율",
        STEPS_HYDRAULIC => "수력 동력 = ρ·g·Q·H",
        STEPS_SHAFT => "축 동력     = P_h / η ",
        NOTES_HEADING => "가정 및 참고",
        NOTES_BODY => "- 수력 동력: P_hyd = ρ·g·Q·H\n\
- 축 동력: P_shaft = P_hyd / η\n\
- 단위: 내부적으로 유량은 m³/s, 양정은 m로 환산합니다.\n\
- 비중(SG)은 ρ = SG × 1000 kg/m³ 로 밀도로 환산합니다.\n\
- 효율은 펌프 수력 효율이며 모터 효율이 아닙니다.\n\
- 모터 선정 시에는 모터 효율과 서비스 계수를 추가로 고려하세요.",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT => "현재 언어: {lang}, 계산 과정 표시: {steps}",
        SETTINGS_OPTIONS => "1) 언어 변경  2) 계산 과정 표시 전환",
        SETTINGS_PROMPT_LANGUAGE => "언어 코드(auto/ko/en): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "설정을 저장했습니다.",
        SETTINGS_LANGUAGE => "언어",
        SETTINGS_RESET_DEFAULTS => "기본값으로 되돌리기",
        SETTINGS_SAVE_DEFAULTS => "현재 입력을 기본값으로 저장",
        SETTINGS_FONT_MISSING => "한글 폰트를 찾지 못했습니다. config.toml의 font_path를 지정하세요.",
        CONVERT_RESULT => "변환 결과:",
        UNITS_HEADING => "지원 단위",
        _ => return None,
    };
    Some(s)
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    let s = match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting.",
        APP_TITLE => "Pump Power Calculator",
        APP_CAPTION => "Compute hydraulic and shaft power for a centrifugal/rotodynamic pump. Supports SI & US units, any fluid via specific gravity.",
        MAIN_MENU_TITLE => "\n=== Pump Power Calculator ===",
        MAIN_MENU_PUMP_POWER => "1) Pump power",
        MAIN_MENU_SETTINGS => "2) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please choose again.",
        INVALID_NUMBER => "Please enter a number.",
        NEGATIVE_NOT_ALLOWED => "Please enter a value of 0 or more.",
        PUMP_HEADING => "\n-- Pump Power --",
        PUMP_DEFAULT_HINT => "(Enter = {default})",
        SECTION_FLOW => "Flow rate",
        SECTION_HEAD => "Total dynamic head (TDH)",
        SECTION_FLUID => "Fluid",
        SECTION_EFFICIENCY => "Efficiency",
        SECTION_DRIVE => "Pump/Drive",
        SECTION_ADVANCED => "Advanced",
        PROMPT_FLOW_VALUE => "Flow value",
        PROMPT_FLOW_UNIT => "Flow unit",
        PROMPT_HEAD_VALUE => "Head value",
        PROMPT_HEAD_UNIT => "Head unit",
        PROMPT_SPECIFIC_GRAVITY => "Specific Gravity (SG)",
        HELP_SPECIFIC_GRAVITY => "SG = ρ_fluid / ρ_water. Water ≈ 1.00, seawater ≈ 1.025, oils < 1, etc.",
        PROMPT_DENSITY_OVERRIDE => "Override with custom density (kg/m³)",
        PROMPT_CUSTOM_DENSITY => "Custom density (kg/m³, '-' = use SG)",
        PROMPT_EFFICIENCY_VALUE => "Pump efficiency",
        PROMPT_EFFICIENCY_UNIT => "Efficiency unit",
        PROMPT_GRAVITY => "Gravity g (m/s²)",
        HELP_GRAVITY => "Standard Earth gravity is 9.80665 m/s².",
        PROMPT_SHOW_STEPS => "Show calculation steps",
        UNIT_KEEP_DEFAULT => "Select number",
        RESULT_HEADING => "Results",
        RESULT_HYDRAULIC_POWER => "Hydraulic Power",
        RESULT_SHAFT_POWER => "Shaft Power",
        HELP_HYDRAULIC_POWER => "Power imparted to the fluid.",
        HELP_SHAFT_POWER => "Power at the pump shaft (before motor/drive losses).",
        WARNINGS_HEADING => "Input adjustments",
        WARNING_EFFICIENCY_CLAMPED => "Efficiency {requested} is out of range; using η = {applied}.",
        WARNING_SG_FLOORED => "Specific gravity {requested} is not positive; using density {applied} kg/m³.",
        WARNING_DENSITY_FLOORED => "Custom density {requested} kg/m³ is too small; using {applied} kg/m³.",
        STEPS_HEADING => "Calculation Steps",
        STEPS_GIVEN => "Given:",
        STEPS_COMPUTED => "Computed:",
        STEPS_FLOW => "Flow",
        STEPS_HEAD => "Head",
        STEPS_SPECIFIC_GRAVITY => "Specific Gravity",
        STEPS_DENSITY_USED => "Density used = {rho} kg/m³ (custom override = {overridden})",
        STEPS_GRAVITY => "g",
        STEPS_EFFICIENCY => "Efficiency",
        STEPS_HYDRAULIC => "Hydraulic Power = ρ·g·Q·H",
        STEPS_SHAFT => "Shaft Power     = P_h / η ",
        NOTES_HEADING => "Assumptions & Notes",
        NOTES_BODY => "- Hydraulic power: P_hyd = ρ·g·Q·H\n\
- Shaft power: P_shaft = P_hyd / η\n\
- Units: internally, flow is converted to m³/s and head to meters.\n\
- Specific Gravity (SG) converts to density by ρ = SG × 1000 kg/m³.\n\
- Efficiency is the pump hydraulic efficiency (not motor efficiency).\n\
- For a motor selection, you may want to add motor efficiency and a service factor.",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT => "Current language: {lang}, show calculation steps: {steps}",
        SETTINGS_OPTIONS => "1) Change language  2) Toggle calculation steps",
        SETTINGS_PROMPT_LANGUAGE => "Language code (auto/ko/en): ",
        SETTINGS_INVALID => "Invalid input; nothing changed.",
        SETTINGS_SAVED => "Settings saved.",
        SETTINGS_LANGUAGE => "Language",
        SETTINGS_RESET_DEFAULTS => "Reset to defaults",
        SETTINGS_SAVE_DEFAULTS => "Save current inputs as defaults",
        SETTINGS_FONT_MISSING => "No Korean font found. Set font_path in config.toml.",
        CONVERT_RESULT => "Result:",
        UNITS_HEADING => "Supported units",
        _ => return None,
    };
    Some(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_and_korean_cover_the_same_keys() {
        let sample = [
            keys::APP_TITLE,
            keys::RESULT_SHAFT_POWER,
            keys::WARNING_EFFICIENCY_CLAMPED,
            keys::NOTES_BODY,
            keys::SECTION_EFFICIENCY,
        ];
        for key in sample {
            assert!(en(key).is_some(), "missing en: {key}");
            assert!(ko(key).is_some(), "missing ko: {key}");
        }
    }

    #[test]
    fn cli_flag_wins_over_config() {
        assert_eq!(resolve_language("ko-KR", Some("en")), "ko");
        assert_eq!(resolve_language("auto", Some("en-us")), "en");
    }

    #[test]
    fn locale_strings_are_reduced_to_base_language() {
        assert_eq!(normalize_locale_string("ko_KR.UTF-8"), Some("ko".into()));
        assert_eq!(normalize_locale_string("en-GB"), Some("en".into()));
        assert_eq!(normalize_locale_string("fr_FR"), None);
    }

    #[test]
    fn nested_pack_keys_are_flattened() {
        let map = parse_toml_to_map("[result]\nshaft_power = \"Wellenleistung\"\n").unwrap();
        assert_eq!(map.get("result.shaft_power").map(String::as_str), Some("Wellenleistung"));
    }

    #[test]
    fn template_placeholders_are_filled() {
        let tr = Translator::new("en");
        let msg = tr.tf(
            keys::WARNING_EFFICIENCY_CLAMPED,
            &[("requested", "1.2".into()), ("applied", "0.999999".into())],
        );
        assert_eq!(msg, "Efficiency 1.2 is out of range; using η = 0.999999.");
    }
}
