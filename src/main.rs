use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tracing::info;

use warmup_fuzz::config::SprayConfig;
use warmup_fuzz::error::Error;
use warmup_fuzz::{CampaignStats, OutputKind, Payload, creative_inputs, fuzz_http_server, logging};

#[derive(Parser)]
#[command(author, version, about = "Structured HTTP request fuzzer for local targets")]
struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true, env = "WARMUP_FUZZ_LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print mutated payloads, one per line.
    Generate(GenerateArgs),
    /// Spray fuzzed requests at a target and print the counters as JSON.
    Spray(SprayArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Number of payloads.
    #[arg(long, short = 'n', default_value_t = 32)]
    count: usize,

    /// Seed for reproducible output.
    #[arg(long, env = "WARMUP_FUZZ_SEED")]
    seed: Option<u64>,

    /// Produce byte payloads (printed with ASCII escapes).
    #[arg(long)]
    bytes: bool,
}

#[derive(Args, Debug, Default)]
struct SprayArgs {
    /// Optional YAML configuration file.
    #[arg(long, env = "WARMUP_FUZZ_CONFIG")]
    config: Option<PathBuf>,

    /// Target host (overrides config file).
    #[arg(long, env = "WARMUP_FUZZ_HOST")]
    host: Option<String>,

    /// Target port (overrides config file).
    #[arg(long, env = "WARMUP_FUZZ_PORT")]
    port: Option<u16>,

    /// Rounds per worker (overrides config file).
    #[arg(long, env = "WARMUP_FUZZ_ROUNDS")]
    rounds: Option<u64>,

    /// Campaign seed (overrides config file).
    #[arg(long, env = "WARMUP_FUZZ_SEED")]
    seed: Option<u64>,

    /// Connect/write/drain timeout, e.g. `500ms` (overrides config file).
    #[arg(long, env = "WARMUP_FUZZ_TIMEOUT", value_parser = humantime::parse_duration)]
    timeout: Option<Duration>,

    /// Pause after every round, e.g. `10ms` (overrides config file).
    #[arg(long, env = "WARMUP_FUZZ_DELAY", value_parser = humantime::parse_duration)]
    delay: Option<Duration>,

    /// Reuse connections across rounds.
    #[arg(long, env = "WARMUP_FUZZ_PERSISTENT")]
    persistent: bool,

    /// Independent campaigns to run in parallel (overrides config file).
    #[arg(long, env = "WARMUP_FUZZ_WORKERS")]
    workers: Option<usize>,

    /// Log transport failures and every built request.
    #[arg(long, short, env = "WARMUP_FUZZ_VERBOSE")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Generate(args) => {
            logging::init(false, cli.log_json);
            generate(args);
        }
        Commands::Spray(args) => {
            logging::init(args.verbose, cli.log_json);
            let config = spray_config(args)?;
            let stats = spray(config).await?;
            println!("{}", serde_json::to_string(&stats)?);
        }
    }
    Ok(())
}

fn generate(args: GenerateArgs) {
    let kind = if args.bytes {
        OutputKind::Bytes
    } else {
        OutputKind::Text
    };
    for payload in creative_inputs(args.count, args.seed, kind) {
        match payload {
            Payload::Text(text) => println!("{}", text.escape_debug()),
            Payload::Bytes(bytes) => println!("{}", bytes.escape_ascii()),
        }
    }
}

fn spray_config(args: SprayArgs) -> Result<SprayConfig, Error> {
    let mut config = SprayConfig::load(args.config.as_deref())?;

    // CLI and environment win over the config file
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    if let Some(rounds) = args.rounds {
        config.campaign.rounds = rounds;
    }
    if args.seed.is_some() {
        config.campaign.seed = args.seed;
    }
    if let Some(timeout) = args.timeout {
        config.campaign.timeout = timeout;
    }
    if let Some(delay) = args.delay {
        config.campaign.delay = delay;
    }
    config.campaign.persistent |= args.persistent;
    config.campaign.verbose |= args.verbose;
    config.validate()?;
    Ok(config)
}

/// Run one campaign per worker on the blocking pool and sum their counters.
async fn spray(config: SprayConfig) -> Result<CampaignStats, Error> {
    info!(
        host = %config.host,
        port = config.port,
        workers = config.workers,
        "Spraying"
    );

    let handles: Vec<_> = (0..config.workers)
        .map(|index| {
            let host = config.host.clone();
            let port = config.port;
            let campaign = config.worker_campaign(index);
            tokio::task::spawn_blocking(move || fuzz_http_server(&host, port, &campaign))
        })
        .collect();

    let mut total = CampaignStats::default();
    for handle in handles {
        total += handle.await?;
    }
    Ok(total)
}
