use std::io;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use http_get::client;
use http_get::config::ClientConfig;
use http_get::error::{Error, Result};
use http_get::proxy::parse_proxy_spec;

/// Fetch a document over HTTP/1.1 and print the raw response.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Proxy to send the request through: http://[user:password@]proxyhost[:proxyport]
    #[arg(short, long, value_name = "SPEC")]
    proxy: Option<String>,

    /// Log more to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// The document to fetch, e.g. http://example.com/index.html
    url: String,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(level))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(args: Args) -> Result<u64> {
    let mut config = ClientConfig::default();
    if let Some(spec) = &args.proxy {
        config = config.with_proxy(parse_proxy_spec(spec)?);
    }
    tracing::info!(url = %args.url, proxy = ?config.proxy, "fetching");
    client::get(&args.url, config, &mut io::stdout().lock())
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if !e.use_stderr() => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let usage = Error::Usage(e.render().to_string());
            eprint!("{}", usage);
            return ExitCode::from(usage.exit_code() as u8);
        }
    };
    init_logging(args.verbose);

    match run(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
