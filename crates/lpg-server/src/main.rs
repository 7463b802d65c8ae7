use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use lpg_logstore::ChannelSink;
use lpg_server::{init_tracing, routes, AppState, ServerConfig};
use lpg_shape::{
    convert_json, derive_field_definitions, initial_form_state, Conversion, EnumMetadata,
};
use serde_json::{json, Value};
use tracing::{info, warn};

/// Time allowed for queued log entries to reach the store on shutdown
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

fn cli() -> Command {
    let input = Arg::new("input")
        .long("input")
        .short('i')
        .value_parser(value_parser!(PathBuf))
        .help("Read JSON from FILE instead of stdin");

    Command::new("lpg")
        .version(lpg_server::VERSION)
        .about("Loan pricing playground: shape conversion server and tools")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON"),
        )
        .subcommand(
            Command::new("serve")
                .about("Run the HTTP server")
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .value_parser(value_parser!(PathBuf))
                        .help("TOML config file"),
                )
                .arg(
                    Arg::new("bind")
                        .long("bind")
                        .value_parser(value_parser!(std::net::SocketAddr))
                        .help("Listen address, e.g. 127.0.0.1:3000"),
                )
                .arg(
                    Arg::new("dev")
                        .long("dev")
                        .action(ArgAction::SetTrue)
                        .help("Include error chains in failure responses"),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert one JSON document and print the result")
                .arg(
                    Arg::new("type")
                        .required(true)
                        .value_parser(Conversion::ALL.map(|c| c.as_str()))
                        .help("Conversion to run"),
                )
                .arg(input.clone()),
        )
        .subcommand(
            Command::new("fields")
                .about("Derive loan-form field definitions from a sample loan")
                .arg(input)
                .arg(
                    Arg::new("enums")
                        .long("enums")
                        .value_parser(value_parser!(PathBuf))
                        .help("Enumeration document ({field: {enum: [...]}})"),
                ),
        )
}

fn read_json(path: Option<&PathBuf>) -> anyhow::Result<Value> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            text
        }
    };
    serde_json::from_str(&text).context("input is not valid JSON")
}

fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_convert(args: &ArgMatches) -> anyhow::Result<()> {
    let kind = args
        .get_one::<String>("type")
        .context("conversion type is required")?;
    let conversion: Conversion = kind.parse()?;
    let input = read_json(args.get_one::<PathBuf>("input"))?;
    print_json(&convert_json(conversion, input)?)
}

fn run_fields(args: &ArgMatches) -> anyhow::Result<()> {
    let sample = read_json(args.get_one::<PathBuf>("input"))?;
    let enums = match args.get_one::<PathBuf>("enums") {
        Some(path) => EnumMetadata::from_json(&read_json(Some(path))?),
        None => EnumMetadata::default(),
    };
    let fields = derive_field_definitions(&sample, &enums);
    let form = initial_form_state(&fields, &sample);
    print_json(&json!({"fields": fields, "form": form}))
}

async fn run_serve(args: &ArgMatches) -> anyhow::Result<()> {
    let mut config = ServerConfig::load(args.get_one::<PathBuf>("config").map(PathBuf::as_path))
        .context("failed to load configuration")?;
    if let Some(bind) = args.get_one::<std::net::SocketAddr>("bind") {
        config = config.with_bind(*bind);
    }
    if args.get_flag("dev") {
        config = config.with_dev(true);
    }
    serve(config).await
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let state = AppState::from_config(&config);
    let (sink, collector) = ChannelSink::spawn(Arc::clone(state.logs()));
    let state = state.with_sink(Arc::new(sink));

    let (addr, server) = warp::serve(routes(state))
        .try_bind_with_graceful_shutdown(config.bind, async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %err, "failed to listen for shutdown signal");
            }
        })
        .with_context(|| format!("failed to bind {}", config.bind))?;

    info!(%addr, dev = config.dev, log_capacity = config.log_capacity, "listening");
    server.await;
    info!("shutting down");

    // The server held the last sink clones; the collector exits once drained.
    match tokio::time::timeout(DRAIN_TIMEOUT, collector).await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => warn!(error = %err, "log collector failed"),
        Err(_) => warn!("log collector did not drain in time"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("log-json")).context("failed to initialise tracing")?;

    match matches.subcommand() {
        Some(("serve", args)) => run_serve(args).await,
        Some(("convert", args)) => run_convert(args),
        Some(("fields", args)) => run_fields(args),
        _ => {
            cli().print_help()?;
            Ok(())
        }
    }
}
