//! easy-api command line.
//!
//! Loads a client configuration file and drives it: list routes and
//! domains, resolve a route, or call a domain function.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::Value;

use easy_api::config::{build_client, load_config};
use easy_api::observability::init_logging;
use easy_api::{Client, Method, RecordingTransport, Reply, RequestOptions};

#[derive(Parser)]
#[command(name = "easy-api")]
#[command(about = "Call named API routes from a client configuration file", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "easy-api.toml")]
    config: PathBuf,

    /// Override the configured log level.
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured routes
    Routes,
    /// List domains and their functions
    Domains,
    /// Resolve a route key against a payload
    Route {
        key: String,
        #[arg(short, long)]
        data: Option<String>,
    },
    /// Call a domain function
    Call {
        domain: String,
        function: String,
        #[arg(short, long)]
        data: Option<String>,
        /// Response parser (json, text, arrayBuffer, blob, formData)
        #[arg(short, long)]
        parse: Option<String>,
        /// Print the request instead of sending it
        #[arg(long)]
        dry_run: bool,
    },
    /// Send a request to a raw path
    Fetch {
        method: String,
        path: String,
        #[arg(short, long)]
        data: Option<String>,
        #[arg(short, long)]
        parse: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    init_logging(cli.log_level.as_deref().unwrap_or(&config.observability.log_level));

    tracing::info!(
        path = %cli.config.display(),
        routes = config.routes.len(),
        domains = config.domains.len(),
        "Configuration loaded"
    );

    match cli.command {
        Commands::Routes => {
            let mut routes: Vec<_> = config.routes.iter().collect();
            routes.sort();
            for (key, template) in routes {
                println!("{:<32} {}", key, template);
            }
        }
        Commands::Domains => {
            let client = build_client(config)?;
            for domain in client.domains().iter() {
                println!("{}", domain.name());
                for (name, spec) in domain.functions() {
                    let route = spec.route.as_deref().unwrap_or("-");
                    println!("  {:<24} {:<7} {}", name, spec.method, route);
                }
            }
        }
        Commands::Route { key, data } => {
            let client = build_client(config)?;
            let data = parse_data(data.as_deref())?;
            println!("{}", client.get_route(&key, &data)?);
        }
        Commands::Call { domain, function, data, parse, dry_run } => {
            let data = parse_data(data.as_deref())?;
            let options = call_options(parse);

            if dry_run {
                let recorder = RecordingTransport::new();
                let (url, options_cfg) = config.into_parts();
                let client = Client::with_transport(url, options_cfg, Arc::new(recorder.clone()))?;
                let target = client
                    .domain(&domain)
                    .ok_or_else(|| format!("Unknown domain '{}'", domain))?;
                target.call_with(&function, data, options).await?;
                if let Some(request) = recorder.last_request() {
                    println!("{} {}", request.method, request.url);
                    println!("x-request-id: {}", request.request_id);
                    for (name, value) in &request.options.headers {
                        println!("{}: {}", name, value);
                    }
                    println!();
                    println!("{}", serde_json::to_string_pretty(&request.payload)?);
                }
                return Ok(());
            }

            let client = build_client(config)?;
            let target = client
                .domain(&domain)
                .ok_or_else(|| format!("Unknown domain '{}'", domain))?;
            print_reply(target.call_with(&function, data, options).await?)?;
        }
        Commands::Fetch { method, path, data, parse } => {
            let method: Method = method.parse()?;
            let data = parse_data(data.as_deref())?;
            let client = build_client(config)?;
            let options = call_options(parse);
            print_reply(client.fetch(method, &path, data, Some(options)).await?)?;
        }
    }

    Ok(())
}

fn parse_data(raw: Option<&str>) -> Result<Value, serde_json::Error> {
    match raw {
        Some(raw) => serde_json::from_str(raw),
        None => Ok(Value::Null),
    }
}

fn call_options(parse: Option<String>) -> RequestOptions {
    RequestOptions {
        parse,
        ..Default::default()
    }
}

fn print_reply(reply: Reply) -> Result<(), Box<dyn std::error::Error>> {
    match reply {
        Reply::Response(resp) => {
            if !resp.is_success() {
                eprintln!("Error: API returned status {}", resp.status());
            }
            println!("{}", String::from_utf8_lossy(resp.body()));
        }
        Reply::Json(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Reply::Text(text) => println!("{}", text),
        Reply::Bytes(bytes) => println!("<{} bytes>", bytes.len()),
        Reply::Blob(blob) => println!(
            "<{} bytes, {}>",
            blob.bytes.len(),
            blob.content_type.as_deref().unwrap_or("unknown type")
        ),
        Reply::Form(pairs) => {
            for (name, value) in pairs {
                println!("{}={}", name, value);
            }
        }
    }
    Ok(())
}
