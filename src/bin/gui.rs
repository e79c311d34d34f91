#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.
//! 왼쪽 패널에서 입력을 받고, 매 프레임 전체를 다시 계산해 오른쪽에 결과를 보여 준다.

use eframe::{egui, App, Frame};
use pump_power_calculator::{
    config::{self, DefaultInputs},
    i18n::{self, keys, Language, Translator},
    logging,
    pump::{self, PumpPowerInput},
    quantity::{Quantity, SiUnit},
    report,
    units::{EfficiencyUnit, FlowUnit, FluidDescriptor, HeadUnit, RHO_WATER_4C},
};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

fn main() -> Result<(), eframe::Error> {
    // CLI 옵션 처리: --lang xx / --lang=xx, --config path, --debug
    let mut cli_lang: Option<String> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut debug = false;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if let Some(val) = a.strip_prefix("--config=") {
            config_path = Some(PathBuf::from(val));
        } else if a == "--lang" || a == "-L" {
            if i + 1 < args.len() {
                cli_lang = Some(args[i + 1].clone());
                i += 1;
            }
        } else if a == "--config" || a == "-c" {
            if i + 1 < args.len() {
                config_path = Some(PathBuf::from(&args[i + 1]));
                i += 1;
            }
        } else if a == "--debug" {
            debug = true;
        }
        i += 1;
    }

    if let Err(e) = logging::setup_tracing(debug) {
        eprintln!("Logging error: {e}");
    }

    let mut app_cfg = config::load_or_default(config_path.as_deref()).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "config load failed, using defaults");
        config::Config {
            path: config_path.clone(),
            ..Default::default()
        }
    });
    if let Some(lang_cli) = cli_lang {
        app_cfg.language = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([980.0, 700.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Pump Power Calculator",
        options,
        Box::new(move |cc| {
            let font_missing = match setup_fonts(&cc.egui_ctx, app_cfg.font_path.as_deref()) {
                Ok(()) => false,
                Err(e) => {
                    tracing::warn!("{e}");
                    true
                }
            };
            let mut app = GuiApp::new(app_cfg);
            app.font_missing = font_missing;
            Box::new(app)
        }),
    )
}

struct GuiApp {
    config: config::Config,
    tr: Translator,
    // 입력
    flow_value: f64,
    flow_unit: FlowUnit,
    head_value: f64,
    head_unit: HeadUnit,
    specific_gravity: f64,
    density_override: bool,
    custom_density: f64,
    efficiency_value: f64,
    efficiency_unit: EfficiencyUnit,
    gravity: f64,
    show_steps: bool,
    // 상태
    font_missing: bool,
    status: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let lang = i18n::resolve_language("auto", Some(config.language.as_str()));
        let defaults = config.defaults.clone();
        let mut app = Self {
            tr: Translator::new(&lang),
            show_steps: config.show_steps,
            config,
            flow_value: 0.0,
            flow_unit: FlowUnit::CubicMeterPerSecond,
            head_value: 0.0,
            head_unit: HeadUnit::Meter,
            specific_gravity: 1.0,
            density_override: false,
            custom_density: RHO_WATER_4C,
            efficiency_value: 0.0,
            efficiency_unit: EfficiencyUnit::Percent,
            gravity: pump::G_STANDARD,
            font_missing: false,
            status: None,
        };
        app.apply_defaults(&defaults);
        app
    }

    fn apply_defaults(&mut self, d: &DefaultInputs) {
        self.flow_value = d.flow_value;
        self.flow_unit = d.flow_unit;
        self.head_value = d.head_value;
        self.head_unit = d.head_unit;
        self.specific_gravity = d.specific_gravity;
        self.density_override = d.density_override_kg_m3.is_some();
        self.custom_density = d.density_override_kg_m3.unwrap_or(RHO_WATER_4C);
        self.efficiency_value = d.efficiency_value;
        self.efficiency_unit = d.efficiency_unit;
        self.gravity = d.gravity_m_s2;
    }

    /// 현재 화면 값으로 계산 입력을 만든다. 체크되지 않은 지정 밀도는 무시한다.
    fn current_input(&self) -> PumpPowerInput {
        let mut fluid = FluidDescriptor::from_specific_gravity(self.specific_gravity);
        if self.density_override {
            fluid = fluid.with_density_override(self.custom_density);
        }
        PumpPowerInput {
            flow: Quantity::new(self.flow_value, self.flow_unit),
            head: Quantity::new(self.head_value, self.head_unit),
            fluid,
            efficiency: Quantity::new(self.efficiency_value, self.efficiency_unit),
            gravity_m_s2: self.gravity,
        }
    }

    fn reset_to_defaults(&mut self) {
        let defaults = self.config.defaults.clone();
        self.apply_defaults(&defaults);
        self.show_steps = self.config.show_steps;
        self.status = None;
    }

    fn save_defaults(&mut self) {
        self.config.defaults = DefaultInputs::from_input(&self.current_input());
        self.config.show_steps = self.show_steps;
        self.status = Some(match self.config.save() {
            Ok(()) => self.tr.t(keys::SETTINGS_SAVED).to_string(),
            Err(e) => format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX)),
        });
    }

    fn set_language(&mut self, lang: Language) {
        self.config.language = lang.as_code().to_string();
        self.tr = Translator::new(lang.as_code());
    }

    fn ui_top_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading(format!("💧 {}", self.tr.t(keys::APP_TITLE)));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let mut lang = self.tr.language();
                egui::ComboBox::from_id_source("language")
                    .selected_text(lang.native_name())
                    .show_ui(ui, |ui| {
                        for l in Language::ALL {
                            ui.selectable_value(&mut lang, l, l.native_name());
                        }
                    });
                ui.label(self.tr.t(keys::SETTINGS_LANGUAGE));
                if lang != self.tr.language() {
                    self.set_language(lang);
                }
            });
        });
        ui.label(egui::RichText::new(self.tr.t(keys::APP_CAPTION)).small());
        if self.font_missing && self.tr.language() == Language::Ko {
            ui.colored_label(egui::Color32::LIGHT_RED, self.tr.t(keys::SETTINGS_FONT_MISSING));
        }
    }

    fn ui_inputs(&mut self, ui: &mut egui::Ui) {
        let tr = &self.tr;

        ui.strong(tr.t(keys::SECTION_FLOW));
        ui.horizontal(|ui| {
            ui.add(
                egui::DragValue::new(&mut self.flow_value)
                    .speed(0.01)
                    .clamp_range(0.0..=f64::MAX),
            );
            unit_combo(ui, "flow_unit", &mut self.flow_unit);
        });

        ui.add_space(6.0);
        ui.strong(tr.t(keys::SECTION_HEAD));
        ui.horizontal(|ui| {
            ui.add(
                egui::DragValue::new(&mut self.head_value)
                    .speed(0.5)
                    .clamp_range(0.0..=f64::MAX),
            );
            unit_combo(ui, "head_unit", &mut self.head_unit);
        });

        ui.add_space(6.0);
        ui.strong(tr.t(keys::SECTION_FLUID));
        ui.horizontal(|ui| {
            ui.label(tr.t(keys::PROMPT_SPECIFIC_GRAVITY))
                .on_hover_text(tr.t(keys::HELP_SPECIFIC_GRAVITY));
            ui.add(
                egui::DragValue::new(&mut self.specific_gravity)
                    .speed(0.05)
                    .clamp_range(0.0..=f64::MAX),
            );
        });
        ui.checkbox(&mut self.density_override, tr.t(keys::PROMPT_DENSITY_OVERRIDE));
        ui.add_enabled(
            self.density_override,
            egui::DragValue::new(&mut self.custom_density)
                .speed(10.0)
                .clamp_range(0.0..=f64::MAX)
                .suffix(" kg/m³"),
        );

        ui.add_space(6.0);
        ui.strong(tr.t(keys::SECTION_DRIVE));
        ui.horizontal(|ui| {
            ui.label(tr.t(keys::PROMPT_EFFICIENCY_VALUE));
            ui.add(
                egui::DragValue::new(&mut self.efficiency_value)
                    .speed(1.0)
                    .clamp_range(0.0..=f64::MAX),
            );
            unit_combo(ui, "efficiency_unit", &mut self.efficiency_unit);
        });

        ui.separator();
        ui.strong(tr.t(keys::SECTION_ADVANCED));
        ui.horizontal(|ui| {
            ui.label(tr.t(keys::PROMPT_GRAVITY))
                .on_hover_text(tr.t(keys::HELP_GRAVITY));
            ui.add(
                egui::DragValue::new(&mut self.gravity)
                    .speed(0.001)
                    .fixed_decimals(3)
                    .clamp_range(0.0..=f64::MAX),
            );
        });
        ui.checkbox(&mut self.show_steps, tr.t(keys::PROMPT_SHOW_STEPS));

        ui.separator();
        let reset = ui.button(tr.t(keys::SETTINGS_RESET_DEFAULTS)).clicked();
        let save = ui.button(tr.t(keys::SETTINGS_SAVE_DEFAULTS)).clicked();
        if let Some(status) = &self.status {
            ui.small(status.as_str());
        }
        if reset {
            self.reset_to_defaults();
        }
        if save {
            self.save_defaults();
        }
    }

    fn ui_results(&self, ui: &mut egui::Ui) {
        let tr = &self.tr;
        let input = self.current_input();
        let result = pump::compute_pump_power(input);

        ui.heading(tr.t(keys::RESULT_HEADING));
        egui::Grid::new("results")
            .num_columns(2)
            .spacing([48.0, 10.0])
            .show(ui, |ui| {
                metric(
                    ui,
                    tr.t(keys::RESULT_HYDRAULIC_POWER),
                    &format!("{} kW", report::format_grouped(result.hydraulic_power_kw, 3)),
                    Some(tr.t(keys::HELP_HYDRAULIC_POWER)),
                );
                metric(
                    ui,
                    tr.t(keys::RESULT_SHAFT_POWER),
                    &format!("{} kW", report::format_grouped(result.shaft_power_kw, 3)),
                    Some(tr.t(keys::HELP_SHAFT_POWER)),
                );
                ui.end_row();
                metric(
                    ui,
                    tr.t(keys::RESULT_HYDRAULIC_POWER),
                    &format!("{} HP", report::format_grouped(result.hydraulic_power_hp, 3)),
                    None,
                );
                metric(
                    ui,
                    tr.t(keys::RESULT_SHAFT_POWER),
                    &format!("{} HP", report::format_grouped(result.shaft_power_hp, 3)),
                    None,
                );
                ui.end_row();
            });

        if result.has_adjustments() {
            ui.add_space(8.0);
            ui.strong(tr.t(keys::WARNINGS_HEADING));
            for adj in &result.adjustments {
                ui.colored_label(
                    egui::Color32::from_rgb(230, 160, 40),
                    report::adjustment_message(tr, adj),
                );
            }
        }

        ui.separator();
        egui::CollapsingHeader::new(tr.t(keys::NOTES_HEADING))
            .default_open(false)
            .show(ui, |ui| {
                ui.label(tr.t(keys::NOTES_BODY));
            });

        if self.show_steps {
            ui.add_space(8.0);
            ui.heading(tr.t(keys::STEPS_HEADING));
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.monospace(report::calculation_steps(tr, &input, &result));
            });
        }
    }
}

fn metric(ui: &mut egui::Ui, label: &str, value: &str, help: Option<&str>) {
    ui.vertical(|ui| {
        let resp = ui.label(label);
        if let Some(help) = help {
            resp.on_hover_text(help);
        }
        ui.label(egui::RichText::new(value).size(24.0).strong());
    });
}

fn unit_combo<U: SiUnit>(ui: &mut egui::Ui, id: &str, value: &mut U) {
    egui::ComboBox::from_id_source(id)
        .selected_text(value.symbol())
        .show_ui(ui, |ui| {
            for &unit in U::all() {
                ui.selectable_value(value, unit, unit.symbol());
            }
        });
}

/// 공통: 바이너리 폰트 바이트를 egui에 등록.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .push(font_name);
    ctx.set_fonts(fonts);
}

/// 한글 표시용 폰트 후보. 시스템별 기본 경로를 순서대로 찾는다.
fn font_candidates() -> Vec<PathBuf> {
    let mut out = Vec::new();
    if let Some(windir) = env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        for cand in ["malgun.ttf", "gulim.ttc", "batang.ttc"] {
            out.push(fonts.join(cand));
        }
    }
    for cand in [
        "/System/Library/Fonts/AppleSDGothicNeo.ttc",
        "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    ] {
        out.push(PathBuf::from(cand));
    }
    out
}

/// 한글을 표시하기 위해 폰트를 적용한다.
/// 1) 설정의 font_path
/// 2) 시스템 폰트(맑은 고딕, Apple SD 고딕 Neo, 나눔고딕, Noto CJK)
/// 3) 모두 실패 시 Err를 반환하고 egui 기본 폰트를 유지한다.
fn setup_fonts(ctx: &egui::Context, user_font: Option<&Path>) -> Result<(), String> {
    if let Some(path) = user_font {
        let bytes = fs::read(path)
            .map_err(|e| format!("Failed to read font file ({}): {e}", path.display()))?;
        apply_font_bytes(ctx, bytes, "user_font");
        return Ok(());
    }
    for p in font_candidates() {
        if p.exists() {
            let bytes = fs::read(&p)
                .map_err(|e| format!("Failed to read system font ({}): {e}", p.display()))?;
            apply_font_bytes(ctx, bytes, "korean_font");
            return Ok(());
        }
    }
    Err("Korean font not found. Set font_path in config.toml.".into())
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            self.ui_top_bar(ui);
        });

        egui::SidePanel::left("inputs")
            .resizable(false)
            .default_width(300.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.ui_inputs(ui);
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.ui_results(ui);
            });
        });
    }
}
