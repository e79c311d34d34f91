use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

use pump_power_calculator::app::{self, AppError};
use pump_power_calculator::config::{self, Config};
use pump_power_calculator::conversion;
use pump_power_calculator::i18n::{self, keys, Translator};
use pump_power_calculator::logging::setup_tracing;
use pump_power_calculator::pump::{compute_pump_power, PumpPowerInput, PumpPowerResult};
use pump_power_calculator::quantity::QuantityKind;
use pump_power_calculator::report;
use pump_power_calculator::units::{EfficiencyUnit, FlowUnit, HeadUnit};

#[derive(Parser)]
#[command(author, version, about = "Hydraulic and shaft power for rotodynamic pumps", long_about = None)]
struct Cli {
    /// Language code (auto/ko/en).
    #[arg(short = 'L', long, default_value = "auto", global = true)]
    lang: String,
    /// Config file (default: ./config.toml).
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,
    /// Directory with <lang>.toml language packs.
    #[arg(long, value_name = "DIR", global = true)]
    locales: Option<PathBuf>,
    #[arg(long, default_value_t = false, global = true)]
    debug: bool,
    /// Without a subcommand the interactive prompt starts.
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Copy, Clone, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute pump power once. Missing values fall back to the configured defaults.
    Compute(ComputeArgs),
    /// Convert a value between units of the same quantity.
    Convert {
        /// flow, head or efficiency
        #[arg(value_parser = conversion::parse_quantity_kind)]
        kind: QuantityKind,
        #[arg(allow_negative_numbers = true)]
        value: f64,
        from: String,
        to: String,
    },
    /// List accepted unit symbols.
    Units,
}

#[derive(Args)]
struct ComputeArgs {
    /// Flow rate value.
    #[arg(long)]
    flow: Option<f64>,
    /// m3/s, L/s, L/min, m3/h, gpm, ft3/s
    #[arg(long, value_parser = conversion::parse_flow_unit)]
    flow_unit: Option<FlowUnit>,
    /// Total dynamic head value.
    #[arg(long)]
    head: Option<f64>,
    /// m or ft
    #[arg(long, value_parser = conversion::parse_head_unit)]
    head_unit: Option<HeadUnit>,
    /// Specific gravity of the fluid.
    #[arg(long)]
    sg: Option<f64>,
    /// Custom density in kg/m3; takes precedence over --sg.
    #[arg(long, value_name = "KG_M3")]
    density: Option<f64>,
    /// Pump efficiency value.
    #[arg(long)]
    efficiency: Option<f64>,
    /// % or fraction
    #[arg(long, value_parser = conversion::parse_efficiency_unit)]
    efficiency_unit: Option<EfficiencyUnit>,
    /// Gravitational acceleration in m/s2.
    #[arg(long)]
    gravity: Option<f64>,
    /// Print the calculation steps.
    #[arg(long, conflicts_with = "no_steps")]
    steps: bool,
    /// Do not print the calculation steps.
    #[arg(long)]
    no_steps: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

impl ComputeArgs {
    fn to_input(&self, cfg: &Config) -> PumpPowerInput {
        let mut input = cfg.defaults.to_input();
        if let Some(v) = self.flow {
            input.flow.value = v;
        }
        if let Some(u) = self.flow_unit {
            input.flow.unit = u;
        }
        if let Some(v) = self.head {
            input.head.value = v;
        }
        if let Some(u) = self.head_unit {
            input.head.unit = u;
        }
        if let Some(sg) = self.sg {
            input.fluid.specific_gravity = sg;
            // SG를 명시하면 설정의 지정 밀도보다 우선한다.
            input.fluid.density_override_kg_m3 = None;
        }
        if let Some(rho) = self.density {
            input.fluid.density_override_kg_m3 = Some(rho);
        }
        if let Some(v) = self.efficiency {
            input.efficiency.value = v;
        }
        if let Some(u) = self.efficiency_unit {
            input.efficiency.unit = u;
        }
        if let Some(g) = self.gravity {
            input.gravity_m_s2 = g;
        }
        input
    }

    fn show_steps(&self, cfg: &Config) -> bool {
        if self.steps {
            true
        } else if self.no_steps {
            false
        } else {
            cfg.show_steps
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    input: &'a PumpPowerInput,
    result: &'a PumpPowerResult,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() -> ExitCode {
    let cli = Cli::parse();
    match try_run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let tr = Translator::new(&i18n::resolve_language(&cli.lang, None));
            eprintln!("{}: {err}", tr.t(keys::ERROR_PREFIX));
            ExitCode::FAILURE
        }
    }
}

fn try_run(cli: &Cli) -> Result<(), AppError> {
    setup_tracing(cli.debug)?;
    let mut cfg = config::load_or_default(cli.config.as_deref())?;
    let lang = i18n::resolve_language(&cli.lang, Some(&cfg.language));
    let mut tr = Translator::new_with_pack(&lang, cli.locales.as_deref());

    match &cli.command {
        None => app::run(&mut cfg, &mut tr)?,
        Some(Commands::Compute(args)) => run_compute(&tr, &cfg, args)?,
        Some(Commands::Convert {
            kind,
            value,
            from,
            to,
        }) => {
            let out = conversion::convert(*kind, *value, from, to)?;
            println!("{} {out} {to}", tr.t(keys::CONVERT_RESULT));
        }
        Some(Commands::Units) => print_units(&tr),
    }
    Ok(())
}

fn run_compute(tr: &Translator, cfg: &Config, args: &ComputeArgs) -> Result<(), AppError> {
    let input = args.to_input(cfg);
    input.validate()?;
    let result = compute_pump_power(input);
    match args.format {
        OutputFormat::Text => {
            println!(
                "{}",
                report::render_text(tr, &input, &result, args.show_steps(cfg))
            );
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonReport {
                input: &input,
                result: &result,
            })?;
            println!("{json}");
        }
    }
    Ok(())
}

fn family_label(tr: &Translator, kind: QuantityKind) -> &str {
    tr.t(match kind {
        QuantityKind::Flow => keys::SECTION_FLOW,
        QuantityKind::Head => keys::SECTION_HEAD,
        QuantityKind::Efficiency => keys::SECTION_EFFICIENCY,
    })
}

fn print_units(tr: &Translator) {
    println!("{}", tr.t(keys::UNITS_HEADING));
    for kind in QuantityKind::ALL {
        println!(
            "  {}: {}",
            family_label(tr, kind),
            conversion::unit_symbols(kind).join(", ")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pump_power_calculator::quantity::Quantity;

    fn parse(args: &[&str]) -> ComputeArgs {
        let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
        match cli.command {
            Some(Commands::Compute(args)) => args,
            _ => panic!("expected compute"),
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn compute_flags_override_config_defaults() {
        let args = parse(&[
            "cli", "compute", "--flow", "100", "--flow-unit", "gpm", "--head", "65.6168",
            "--head-unit", "ft",
        ]);
        let input = args.to_input(&Config::default());
        assert_eq!(input.flow, Quantity::new(100.0, FlowUnit::UsGallonPerMinute));
        assert_eq!(input.head, Quantity::new(65.6168, HeadUnit::Foot));
        assert_eq!(input.efficiency, Quantity::new(70.0, EfficiencyUnit::Percent));
    }

    #[test]
    fn explicit_sg_drops_configured_density() {
        let mut cfg = Config::default();
        cfg.defaults.density_override_kg_m3 = Some(850.0);
        let input = parse(&["cli", "compute", "--sg", "1.025"]).to_input(&cfg);
        assert_eq!(input.fluid.density_override_kg_m3, None);
        assert_eq!(input.fluid.specific_gravity, 1.025);
    }

    #[test]
    fn unknown_unit_is_a_usage_error() {
        assert!(Cli::try_parse_from(["cli", "compute", "--head-unit", "yd"]).is_err());
    }

    #[test]
    fn unit_families_use_section_labels() {
        let tr = Translator::new("en");
        let labels: Vec<&str> = QuantityKind::ALL
            .into_iter()
            .map(|kind| family_label(&tr, kind))
            .collect();
        assert_eq!(labels, ["Flow rate", "Total dynamic head (TDH)", "Efficiency"]);
    }

    #[test]
    fn steps_flags_conflict() {
        assert!(Cli::try_parse_from(["cli", "compute", "--steps", "--no-steps"]).is_err());
        assert!(!parse(&["cli", "compute", "--no-steps"]).show_steps(&Config::default()));
    }
}
