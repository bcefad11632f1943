//! NPU Exporter binary
//!
//! Samples the Intel NPU runtime counter and serves it to Prometheus.

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use npu_exporter::{
    metrics::sampler::MonotonicClock, start_web_server, web::port_from_env, DerivedMetrics,
    PrometheusSink, SampleReader, SysfsReader, UtilizationSampler, WebConfig, DEFAULT_INTERVAL,
    DEFAULT_RUNTIME_PATH,
};
use serde::Serialize;
use tracing::{info, Level, Subscriber};
use tracing_subscriber::{filter::LevelFilter, EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "npu_exporter")]
#[command(about = "Prometheus exporter for Intel NPU utilisation")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = "Samples the Intel NPU cumulative runtime from sysfs once a second and \
serves the runtime counter and utilisation gauge in the Prometheus text format")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Metrics server bind address
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Metrics server port (defaults to $NPU_EXPORTER_PORT, then 8000)
    #[arg(short, long)]
    port: Option<u16>,

    /// sysfs file holding the NPU cumulative runtime in milliseconds
    #[arg(long, default_value = DEFAULT_RUNTIME_PATH)]
    runtime_path: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample continuously and serve metrics (default)
    Serve,

    /// Take two samples one interval apart, print the result and exit
    Sample(SampleArgs),
}

#[derive(Args)]
struct SampleArgs {
    /// Output format: json or pretty
    #[arg(short, long, default_value = "pretty")]
    format: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&cli)?;

    match &cli.command {
        Some(Commands::Sample(args)) => sample_command(&cli, args).await,
        Some(Commands::Serve) | None => serve_command(&cli).await,
    }
}

fn log_level(cli: &Cli) -> Level {
    if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    }
}

/// Build the log subscriber. `directives` uses `RUST_LOG` syntax and
/// overrides `level` when non-empty.
fn build_subscriber(level: Level, directives: &str) -> impl Subscriber + Send + Sync + 'static {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .parse_lossy(directives);

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .finish()
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    let subscriber = build_subscriber(log_level(cli), &directives);

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install tracing subscriber")?;

    Ok(())
}

async fn serve_command(cli: &Cli) -> anyhow::Result<()> {
    let port = cli.port.unwrap_or_else(port_from_env);
    let web_config = WebConfig::new(&cli.host, port);

    let sink = PrometheusSink::new().context("failed to register NPU metrics")?;
    let registry = sink.registry();

    let reader = SysfsReader::new(&cli.runtime_path);
    info!("Reading NPU runtime from {}", reader.path().display());

    let clock = MonotonicClock::new();
    let sampler = UtilizationSampler::new(reader, sink, clock.now());
    tokio::spawn(sampler.run(clock, DEFAULT_INTERVAL));

    info!("Metrics server configuration:");
    info!("  - Bind address: {}", web_config.bind_address());
    info!("  - Sampling interval: {}ms", DEFAULT_INTERVAL.as_millis());

    start_web_server(web_config, registry)
        .await
        .context("metrics server failed")?;

    Ok(())
}

/// Output of the `sample` command.
#[derive(Serialize)]
struct SampleReport {
    path: String,
    runtime_ms: Option<f64>,
    #[serde(flatten)]
    derived: DerivedMetrics,
    timestamp: String,
}

async fn sample_command(cli: &Cli, args: &SampleArgs) -> anyhow::Result<()> {
    let format = args.format.as_str();
    if !matches!(format, "json" | "pretty") {
        bail!("Unsupported format: {}. Use 'json' or 'pretty'", format);
    }

    let reader = SysfsReader::new(&cli.runtime_path);
    let sink = PrometheusSink::new().context("failed to register NPU metrics")?;
    let clock = MonotonicClock::new();
    let mut sampler = UtilizationSampler::new(&reader, sink, clock.now());

    tokio::time::sleep(DEFAULT_INTERVAL).await;
    let derived = sampler.tick(clock.now());

    let report = SampleReport {
        path: reader.path().display().to_string(),
        runtime_ms: reader.read(),
        derived,
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        match report.runtime_ms {
            Some(ms) => println!("NPU runtime: {} ms ({})", ms, report.path),
            None => println!("NPU runtime: unavailable ({})", report.path),
        }
        println!("  Active over last interval: {} ms", report.derived.runtime_delta_ms);
        println!("  Utilisation: {:.1}%", report.derived.utilization_percent);
    }

    Ok(())
}
