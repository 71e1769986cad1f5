use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use health_dash::controller::{self, Selection};
use health_dash::server::{self, AppState};
use health_dash::viz::{self, ChartKind};
use health_dash::{Dataset, DashboardConfig, Indicator, Variant, YearRange, export};
use std::path::PathBuf;
use std::time::Duration;

const MIN_WIDTH: i64 = viz::MIN_CHART_WIDTH as i64;
const MIN_HEIGHT: i64 = viz::MIN_CHART_HEIGHT as i64;

#[derive(Parser, Debug)]
#[command(
    name = "health-dash",
    version,
    about = "Serve, chart & export the global health metric dashboard"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the web dashboard (default when no subcommand is given).
    Serve(ServeArgs),
    /// Write the full dataset to a file.
    Export(ExportArgs),
    /// Render one chart to an SVG file without starting the server.
    Chart(ChartArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum VariantArg {
    /// Bar chart with the "Policy Change" marker
    Annotated,
    /// Bar/scatter toggle, no marker
    Toggle,
}

impl From<VariantArg> for Variant {
    fn from(v: VariantArg) -> Self {
        match v {
            VariantArg::Annotated => Variant::Annotated,
            VariantArg::Toggle => Variant::Toggle,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum KindArg {
    Bar,
    Scatter,
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Host to bind to.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    /// Port to listen on.
    #[arg(short, long, default_value_t = 8050)]
    port: u16,
    /// Dashboard behaviour.
    #[arg(long, value_enum, default_value = "annotated")]
    variant: VariantArg,
    /// Artificial delay in milliseconds before each render completes (0 disables).
    #[arg(long, default_value_t = 0)]
    latency_ms: u64,
    /// Width of the chart (default 900, at least 200).
    #[arg(long, default_value_t = 900, value_parser = clap::value_parser!(u32).range(MIN_WIDTH..))]
    width: u32,
    /// Height of the chart (default 500, at least 150).
    #[arg(long, default_value_t = 500, value_parser = clap::value_parser!(u32).range(MIN_HEIGHT..))]
    height: u32,
}

impl Default for ServeArgs {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8050,
            variant: VariantArg::Annotated,
            latency_ms: 0,
            width: 900,
            height: 500,
        }
    }
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Output path. Defaults to the variant's download filename in the current directory.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Variant whose download filename is used when --out is omitted.
    #[arg(long, value_enum, default_value = "annotated")]
    variant: VariantArg,
}

#[derive(Args, Debug)]
struct ChartArgs {
    /// Countries separated by comma or semicolon (e.g., USA,Canada)
    #[arg(short, long, default_value = "Rwanda,Burundi,USA")]
    countries: String,
    /// Indicator key, column name, or label (e.g., life_expectancy or "Heart Disease")
    #[arg(short, long, default_value = "life_expectancy")]
    indicator: String,
    /// Year (YYYY) or range (YYYY:YYYY). Defaults to every year in the dataset.
    #[arg(short = 'd', long)]
    date: Option<String>,
    /// Dashboard behaviour to mimic.
    #[arg(long, value_enum, default_value = "annotated")]
    variant: VariantArg,
    /// Chart kind for the toggle variant.
    #[arg(long, value_enum, default_value = "scatter")]
    kind: KindArg,
    /// Output SVG path.
    #[arg(long)]
    out: PathBuf,
    /// Width of the plot (default 900, at least 200).
    #[arg(long, default_value_t = 900, value_parser = clap::value_parser!(u32).range(MIN_WIDTH..))]
    width: u32,
    /// Height of the plot (default 500, at least 150).
    #[arg(long, default_value_t = 500, value_parser = clap::value_parser!(u32).range(MIN_HEIGHT..))]
    height: u32,
}

fn parse_list(s: &str) -> Vec<String> {
    s.split([',', ';'])
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

fn parse_date(s: &str) -> Option<YearRange> {
    if let Some((a, b)) = s.split_once(':') {
        let start = a.trim().parse::<i32>().ok()?;
        let end = b.trim().parse::<i32>().ok()?;
        Some(YearRange::new(start, end))
    } else {
        s.trim().parse::<i32>().ok().map(|y| YearRange::new(y, y))
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.cmd {
        None => cmd_serve(ServeArgs::default()),
        Some(Command::Serve(args)) => cmd_serve(args),
        Some(Command::Export(args)) => cmd_export(args),
        Some(Command::Chart(args)) => cmd_chart(args),
    }
}

fn cmd_serve(args: ServeArgs) -> Result<()> {
    let config = DashboardConfig {
        host: args.host,
        port: args.port,
        variant: args.variant.into(),
        latency: (args.latency_ms > 0).then(|| Duration::from_millis(args.latency_ms)),
        chart_width: args.width,
        chart_height: args.height,
    };
    let state = AppState::new(config.clone())?;

    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    runtime.block_on(server::serve(state, &config))?;
    Ok(())
}

fn cmd_export(args: ExportArgs) -> Result<()> {
    let dataset = Dataset::sample();
    let variant: Variant = args.variant.into();
    let path = args
        .out
        .unwrap_or_else(|| PathBuf::from(variant.export_filename()));
    let fmt = match args.format {
        Some(OutFormat::Csv) => "csv",
        Some(OutFormat::Json) => "json",
        None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
    }
    .to_ascii_lowercase();
    match fmt.as_str() {
        "csv" => export::save_csv(dataset.records(), &path)?,
        "json" => export::save_json(dataset.records(), &path)?,
        other => anyhow::bail!("unsupported format: {}", other),
    }
    eprintln!("Saved {} rows to {}", dataset.len(), path.display());
    Ok(())
}

fn cmd_chart(args: ChartArgs) -> Result<()> {
    let dataset = Dataset::sample();
    let variant: Variant = args.variant.into();
    let indicator = Indicator::parse(&args.indicator)
        .ok_or_else(|| anyhow::anyhow!("unknown indicator: {}", args.indicator))?;

    let mut selection = Selection::initial(&dataset)?;
    selection.countries = parse_list(&args.countries).into_iter().collect();
    selection.indicator = Some(indicator);
    if let Some(s) = &args.date {
        let bounds = dataset
            .year_bounds()
            .ok_or_else(|| anyhow::anyhow!("dataset is empty"))?;
        selection.year_range = parse_date(s)
            .ok_or_else(|| anyhow::anyhow!("invalid --date, expected YYYY or YYYY:YYYY"))?
            .clamp_to(bounds);
    }
    selection.chart_kind = match args.kind {
        KindArg::Bar => ChartKind::Bar,
        KindArg::Scatter => ChartKind::Scatter,
    };

    let spec = controller::render(&dataset, &selection, variant)
        .ok_or_else(|| anyhow::anyhow!("nothing to draw: select at least one country"))?;
    viz::save_svg(&spec, &args.out, args.width, args.height)?;
    eprintln!(
        "Wrote \"{}\" ({} points) to {}",
        spec.title,
        spec.point_count(),
        args.out.display()
    );
    Ok(())
}
