use clap::{Args, Parser, Subcommand};
use relay53_domain::{CliOverrides, Config};
use tracing::{error, info};

mod bootstrap;
mod client;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "relay53")]
#[command(version)]
#[command(about = "relay53 - DNS forwarder that splits multi-question queries")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(Subcommand)]
enum Command {
    /// Run the forwarder (default)
    Serve(ServeArgs),

    /// Send one query to a server and print the reply
    Query(client::QueryArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Listen port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Upstream resolver (HOST:PORT); answers locally when unset
    #[arg(short = 'r', long, value_name = "HOST:PORT")]
    resolver: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Serve one datagram at a time
    #[arg(long)]
    sequential: bool,
}

impl ServeArgs {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            bind_address: self.bind.clone(),
            port: self.port,
            resolver: self.resolver.clone(),
            log_level: self.log_level.clone(),
            sequential: self.sequential,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Query(args)) => client::run_query(args).await,
        Some(Command::Serve(args)) => serve(args).await,
        None => serve(cli.serve).await,
    }
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = bootstrap::load_config(args.config.as_deref(), args.overrides())?;

    bootstrap::init_logging(&config);

    info!("Starting relay53 v{}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = args.config.or_else(Config::get_config_path) {
        info!(path = %path, "Loaded configuration file");
    }

    let dns_services = di::DnsServices::new(&config).await?;

    tokio::select! {
        result = server::start_dns_server(&config.server, dns_services.handler) => {
            if let Err(e) = &result {
                error!(error = %e, "DNS server error");
            }
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
