//! Slice API Server
//!
//! Serves 2-D slices of a 4-D NetCDF concentration field over HTTP.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{error::ErrorKind, CommandFactory, Parser};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use netcdf_parser::{GriddedDataset, NetCdfDataset};
use slice_api::{build_router, AppState, ServerConfig};

/// Slice API Server
#[derive(Parser, Debug)]
#[command(name = "slice-api", version)]
#[command(about = "Serve 2-D slices of a NetCDF concentration field as JSON and PNG")]
struct Args {
    /// NetCDF file with a concentration(time, z, y, x) variable
    #[arg(value_name = "DATA_FILE")]
    data_file: PathBuf,

    /// Listen address
    #[arg(short, long, env = "SLICE_API_LISTEN_ADDR")]
    listen: Option<String>,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Number of worker threads
    #[arg(long, env = "SLICE_API_WORKER_THREADS")]
    worker_threads: Option<usize>,

    /// Do not register /get-image
    #[arg(long)]
    disable_image_route: bool,

    /// YAML server configuration file
    #[arg(long, value_name = "FILE", env = "SLICE_API_CONFIG")]
    config: Option<PathBuf>,
}

impl Args {
    /// Merge the optional config file with command-line overrides.
    fn server_config(&self) -> Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::load_from_file(path)?,
            None => ServerConfig::default(),
        };

        if let Some(listen) = &self.listen {
            config.listen = listen.clone();
        }
        if let Some(threads) = self.worker_threads {
            config.worker_threads = Some(threads);
        }
        if self.disable_image_route {
            config.enable_image_route = false;
        }
        Ok(config)
    }
}

fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            println!("{}", Args::command().render_usage());
            eprintln!("error: {}", e.kind());
            std::process::exit(1);
        }
    };

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Install the JSON log subscriber. Must run before anything logs.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();
}

fn run(args: Args) -> Result<()> {
    init_tracing(&args.log_level);
    info!("Starting slice API server");

    let config = args.server_config()?;
    info!(
        listen = %config.listen,
        enable_image_route = config.enable_image_route,
        worker_threads = ?config.worker_threads,
        "Server configuration"
    );

    // A bad file must never bind the port.
    let dataset = NetCdfDataset::open(&args.data_file)?;
    let dimensions = dataset.list_dimensions()?;
    info!(
        path = %dataset.path().display(),
        dimensions = ?dimensions,
        "Dataset loaded"
    );

    let addr: SocketAddr = config
        .listen
        .parse()
        .with_context(|| format!("Invalid listen address: {}", config.listen))?;

    // Build runtime with configured threads
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(threads) = config.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = runtime_builder
        .build()
        .context("Failed to create Tokio runtime")?;

    runtime.block_on(run_server(Arc::new(dataset), config, addr))
}

async fn run_server(
    dataset: Arc<dyn GriddedDataset>,
    config: ServerConfig,
    addr: SocketAddr,
) -> Result<()> {
    // Initialize Prometheus metrics exporter
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;
    info!("Prometheus metrics exporter initialized");

    let state = Arc::new(AppState::new(dataset, config).with_prometheus(prometheus_handle));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Slice API listening on {}", addr);

    axum::serve(listener, app).await.context("Server failed")?;
    Ok(())
}
