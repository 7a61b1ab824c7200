// ==========================================
// 产线质检与装箱系统 - 命令行入口
// ==========================================
// 子命令:
// - simulate: 模拟来料并运行产线
// - run:      读取 CSV 工件文件并运行产线
// - generate: 生成 CSV 工件文件
// ==========================================

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use quality_line::config::LineConfig;
use quality_line::engine::{LineOrchestrator, MalformedPolicy, RunOutcome};
use quality_line::i18n;
use quality_line::report::{RunReport, TextReporter};
use quality_line::source::simulator::defaults as sim_defaults;
use quality_line::source::{read_pieces_csv, write_pieces_csv, PieceSimulator};
use quality_line::logging;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "quality-line", version, about = "Quality line inspection and packing")]
struct Cli {
    #[arg(
        long,
        global = true,
        env = "QUALITY_LINE_CONFIG",
        help = "Line configuration JSON (thresholds, colors, box capacity)"
    )]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    json: bool,
    #[arg(long, global = true, default_value = "zh-CN", help = "Report language (zh-CN, en)")]
    locale: String,
    #[arg(long, global = true, value_enum, default_value_t = OnMalformed::Skip)]
    on_malformed: OnMalformed,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Simulate {
        #[arg(long, default_value_t = 150)]
        count: u64,
        #[command(flatten)]
        simulator: SimulatorArgs,
    },
    Run {
        #[arg(long)]
        input: PathBuf,
    },
    Generate {
        #[arg(long)]
        output: PathBuf,
        #[arg(long, default_value_t = 150)]
        count: u64,
        #[command(flatten)]
        simulator: SimulatorArgs,
    },
}

/// 模拟来料参数
#[derive(Args, Debug, Clone, Default)]
struct SimulatorArgs {
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, value_parser = parse_range, help = "Simulated weight range in grams, e.g. 90..110")]
    weight_range: Option<Range<f64>>,
    #[arg(long, value_parser = parse_range, help = "Simulated length range in cm, e.g. 8..22")]
    length_range: Option<Range<f64>>,
    #[arg(long, value_delimiter = ',', help = "Simulated colors, comma separated")]
    colors: Vec<String>,
}

impl SimulatorArgs {
    fn build(&self, count: u64) -> PieceSimulator {
        let simulator = match self.seed {
            Some(seed) => PieceSimulator::seeded(count, seed),
            None => PieceSimulator::from_entropy(count),
        };

        simulator
            .with_ranges(
                self.weight_range
                    .clone()
                    .unwrap_or(sim_defaults::WEIGHT_RANGE_G),
                self.length_range
                    .clone()
                    .unwrap_or(sim_defaults::LENGTH_RANGE_CM),
            )
            .with_colors(self.colors.clone())
    }
}

/// 解析 "min..max" 形式的半开区间
fn parse_range(raw: &str) -> std::result::Result<Range<f64>, String> {
    let (min, max) = raw
        .split_once("..")
        .ok_or_else(|| format!("expected MIN..MAX, got '{}'", raw))?;
    let min: f64 = min
        .trim()
        .parse()
        .map_err(|_| format!("invalid range start '{}'", min))?;
    let max: f64 = max
        .trim()
        .parse()
        .map_err(|_| format!("invalid range end '{}'", max))?;

    if !min.is_finite() || !max.is_finite() || min >= max {
        return Err(format!("range must be finite with MIN < MAX, got '{}'", raw));
    }
    Ok(min..max)
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OnMalformed {
    Skip,
    Abort,
}

impl From<OnMalformed> for MalformedPolicy {
    fn from(value: OnMalformed) -> Self {
        match value {
            OnMalformed::Skip => MalformedPolicy::Skip,
            OnMalformed::Abort => MalformedPolicy::Abort,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init();

    if !i18n::is_supported(&cli.locale) {
        bail!(
            "unsupported locale '{}' (expected one of: {})",
            cli.locale,
            i18n::SUPPORTED_LOCALES.join(", ")
        );
    }
    i18n::set_locale(&cli.locale);

    tracing::debug!(version = quality_line::VERSION, "{}", quality_line::APP_NAME);

    let config = Arc::new(load_config(cli.config.as_deref())?);
    let orchestrator = LineOrchestrator::try_new(config)
        .context("invalid line configuration")?
        .with_policy(cli.on_malformed.into());

    match cli.command {
        Commands::Simulate { count, simulator } => {
            let simulator = simulator.build(count);
            let count_text = count.to_string();
            tracing::info!(
                "{}",
                i18n::t_with_args("cli.run_started", &[("count", count_text.as_str())])
            );
            let outcome = orchestrator.run_pieces(simulator)?;
            print_outcome(&outcome, &cli.locale, cli.json)?;
        }
        Commands::Run { input } => {
            let records = read_pieces_csv(&input)
                .with_context(|| format!("failed to read pieces from {}", input.display()))?;
            let count_text = records.len().to_string();
            tracing::info!(
                "{}",
                i18n::t_with_args("cli.run_started", &[("count", count_text.as_str())])
            );
            let outcome = orchestrator.run(records)?;
            print_outcome(&outcome, &cli.locale, cli.json)?;
        }
        Commands::Generate {
            output,
            count,
            simulator,
        } => {
            let written = write_pieces_csv(&output, simulator.build(count))
                .with_context(|| format!("failed to write pieces to {}", output.display()))?;
            let count_text = written.to_string();
            let path_text = output.display().to_string();
            println!(
                "{}",
                i18n::t_with_args(
                    "cli.generated",
                    &[("count", count_text.as_str()), ("path", path_text.as_str())],
                )
            );
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<LineConfig> {
    match path {
        Some(path) => LineConfig::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(LineConfig::default()),
    }
}

fn print_outcome(outcome: &RunOutcome, locale: &str, json: bool) -> Result<()> {
    let report = RunReport::from_outcome(outcome);
    if json {
        println!("{}", report.to_json()?);
    } else {
        println!("{}", TextReporter::new(locale).render(&report));
    }
    tracing::info!("{}", i18n::t("cli.run_finished"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range("90..110").unwrap(), 90.0..110.0);
        assert_eq!(parse_range(" 8.5 .. 22 ").unwrap(), 8.5..22.0);
        assert!(parse_range("110..90").is_err());
        assert!(parse_range("5..5").is_err());
        assert!(parse_range("90-110").is_err());
        assert!(parse_range("a..b").is_err());
    }

    #[test]
    fn test_simulate_args() {
        let cli = Cli::try_parse_from([
            "quality-line",
            "simulate",
            "--count",
            "40",
            "--seed",
            "5",
            "--weight-range",
            "96..104",
            "--colors",
            "blue,green",
        ])
        .unwrap();

        let Commands::Simulate { count, simulator } = cli.command else {
            panic!("应解析为 simulate");
        };
        assert_eq!(count, 40);
        assert_eq!(simulator.weight_range, Some(96.0..104.0));
        assert_eq!(simulator.length_range, None);

        // 重量与颜色都在标准内,只可能因长度不合格
        for piece in simulator.build(count) {
            assert!((96.0..104.0).contains(&piece.weight));
            assert!((8.0..22.0).contains(&piece.length));
            assert!(piece.color == "blue" || piece.color == "green");
        }
    }

    #[test]
    fn test_default_simulator_args_keep_distribution() {
        let args = SimulatorArgs {
            seed: Some(1),
            ..SimulatorArgs::default()
        };
        let pieces: Vec<_> = args.build(50).collect();
        assert_eq!(pieces.len(), 50);
        assert!(pieces
            .iter()
            .all(|p| sim_defaults::COLORS.contains(&p.color.as_str())));
    }
}
