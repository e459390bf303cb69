//! `httpclient [METHOD] URL [KEY=VALUE]...`
//!
//! With one positional argument the URL is fetched with GET; with two or
//! more the first is the method and the rest are form pairs. Exit status is
//! 0 for any completed request whatever its HTTP status, 1 when no URL was
//! given and 2 when the request itself failed.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use rawhttp_core::{ClientConfig, FormArgs, HttpClient};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

const USAGE: &str = "httpclient [GET/POST] [URL]\n";

#[derive(Parser, Debug)]
#[command(name = "httpclient")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Send a GET or POST request over a raw TCP socket")]
struct Cli {
    /// [METHOD] URL [KEY=VALUE]...
    #[arg(value_name = "ARGS")]
    positional: Vec<String>,

    /// Percent-encode form keys and values before sending
    #[arg(long = "encode")]
    encode: bool,

    /// Print the response as JSON
    #[arg(long = "json")]
    json: bool,

    /// Connect, read and write timeout in seconds
    #[arg(long = "timeout", value_name = "SECONDS", env = "HTTPCLIENT_TIMEOUT")]
    timeout: Option<f64>,

    /// Verbose output
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

/// What the positional arguments ask for.
#[derive(Debug, PartialEq, Eq)]
struct Invocation {
    method: String,
    url: String,
    args: FormArgs,
}

impl Invocation {
    fn from_positional(positional: &[String]) -> Option<Self> {
        match positional {
            [] => None,
            [url] => Some(Self {
                method: "GET".to_string(),
                url: url.clone(),
                args: FormArgs::new(),
            }),
            [method, url, rest @ ..] => Some(Self {
                method: method.clone(),
                url: url.clone(),
                args: FormArgs::from_assignments(rest),
            }),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);
    debug!("CLI arguments: {:?}", cli);

    let Some(invocation) = Invocation::from_positional(&cli.positional) else {
        print!("{USAGE}");
        return ExitCode::from(1);
    };

    match run(&cli, invocation) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli, invocation: Invocation) -> Result<()> {
    let mut config = ClientConfig::default();
    if let Some(seconds) = cli.timeout {
        let timeout = Duration::try_from_secs_f64(seconds)
            .with_context(|| format!("invalid timeout {seconds}"))?;
        config = config.with_timeout(timeout);
    }

    let args = if cli.encode {
        invocation.args.encoded()
    } else {
        invocation.args
    };
    let args = (!args.is_empty()).then_some(&args);

    let response = HttpClient::with_config(config)
        .command(&invocation.url, &invocation.method, args)
        .with_context(|| format!("{} {} failed", invocation.method, invocation.url))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("{response}");
    }
    Ok(())
}

/// Initialize logging based on CLI arguments
fn init_logging(cli: &Cli) {
    let log_level = if cli.quiet {
        tracing::Level::ERROR
    } else {
        match cli.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(tracing_subscriber::filter::LevelFilter::from_level(log_level)),
        )
        .init();
}
