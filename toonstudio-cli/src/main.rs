mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use toonstudio_core::config::ClientConfig;
use toonstudio_core::types::{ConversionOptions, DataFormat, Delimiter, IndentSize};
use toonstudio_runtime::config_store::ConfigStore;
use toonstudio_runtime::env::apply_env_overrides;
use toonstudio_runtime::studio::build_studio;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "toonstudio", version, about = "Convert between JSON and TOON and ask questions about data")]
struct Cli {
    /// JSON client configuration file. Missing file means defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Service address; overrides the config file and TOON_STUDIO_API_BASE_URL.
    #[arg(long, global = true)]
    api_base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show which service integrations are configured.
    Status,
    /// Call the service health endpoint.
    Health,
    /// Convert JSON to TOON.
    ToToon {
        #[arg(long, default_value = "2", value_parser = parse_indent)]
        indent: IndentSize,
        #[arg(long, default_value = "comma", value_parser = parse_delimiter)]
        delimiter: Delimiter,
        /// Copy the output to the system clipboard.
        #[arg(long)]
        copy: bool,
        /// Input file, or `-` for stdin.
        input: String,
    },
    /// Convert TOON to JSON.
    ToJson {
        #[arg(long)]
        copy: bool,
        input: String,
    },
    /// Ask a question about JSON or TOON data.
    Query {
        #[arg(long, short)]
        question: String,
        #[arg(long, default_value = "json", value_parser = parse_format)]
        format: DataFormat,
        input: String,
    },
    /// Count tokens in the input.
    Count { input: String },
}

fn parse_indent(s: &str) -> Result<IndentSize, String> {
    let n: u8 = s.parse().map_err(|e| format!("{e}"))?;
    IndentSize::new(n).map_err(|e| e.to_string())
}

fn parse_delimiter(s: &str) -> Result<Delimiter, String> {
    Delimiter::parse(s).ok_or_else(|| format!("unknown delimiter '{s}' (expected comma, tab or pipe)"))
}

fn parse_format(s: &str) -> Result<DataFormat, String> {
    match s.to_ascii_lowercase().as_str() {
        "json" => Ok(DataFormat::Json),
        "toon" => Ok(DataFormat::Toon),
        _ => Err(format!("unknown data format '{s}' (expected json or toon)")),
    }
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
    {
        eprintln!("Log system initialization failed: {e}");
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let cfg = match &cli.config {
        Some(path) => ConfigStore::at_path(path).load_or_default()?,
        None => ClientConfig::default(),
    };
    let cfg = apply_env_overrides(cfg);
    Ok(match &cli.api_base_url {
        Some(url) => cfg.with_api_base_url(url.clone()),
        None => cfg,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let _ = dotenvy::dotenv();
    init_logging();

    let cli = Cli::parse();
    let cfg = load_config(&cli)?;
    log::debug!("client config: {cfg:?}");
    let studio = build_studio(&cfg)?;
    let count_timeout = Duration::from_secs(cfg.request_timeout_secs);

    let mut stdout = std::io::stdout().lock();
    let out: &mut dyn std::io::Write = &mut stdout;

    let ok = match cli.command {
        Command::Status => commands::status(&studio, out).await?,
        Command::Health => commands::health(&studio, out).await?,
        Command::ToToon {
            indent,
            delimiter,
            copy,
            input,
        } => {
            let source = commands::read_input(&input)?;
            let clipboard = copy.then(toonstudio_platform::system_clipboard);
            let options = ConversionOptions { indent, delimiter };
            commands::convert(
                &studio.forward,
                source,
                Some(options),
                clipboard.as_deref(),
                out,
            )
            .await?
        }
        Command::ToJson { copy, input } => {
            let source = commands::read_input(&input)?;
            let clipboard = copy.then(toonstudio_platform::system_clipboard);
            commands::convert(&studio.reverse, source, None, clipboard.as_deref(), out).await?
        }
        Command::Query {
            question,
            format,
            input,
        } => {
            let data = commands::read_input(&input)?;
            commands::query(&studio, data, question, format, out).await?
        }
        Command::Count { input } => {
            let text = commands::read_input(&input)?;
            commands::count(&studio, text, count_timeout, out).await?
        }
    };

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
