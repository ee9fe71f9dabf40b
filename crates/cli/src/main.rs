use arpscope_domain::CliOverrides;
use arpscope_jobs::{CaptureJob, JobRunner};
use clap::Parser;
use ipnetwork::IpNetwork;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

mod bootstrap;
mod di;
mod display;

#[derive(Parser)]
#[command(name = "arpscope")]
#[command(version)]
#[command(about = "arpscope - passive ARP host table with MAC change tracking")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Capture interface (skips route discovery)
    #[arg(short = 'i', long)]
    interface: Option<String>,

    /// Target networks, comma separated (e.g. 192.168.1.0/24,10.0.0.0/8)
    #[arg(long, value_delimiter = ',')]
    cidrs: Option<Vec<IpNetwork>>,

    /// ARP probe timeout in milliseconds
    #[arg(long)]
    arp_timeout_ms: Option<u64>,

    /// ICMP probe timeout in milliseconds
    #[arg(long)]
    icmp_timeout_ms: Option<u64>,

    /// Maximum ICMP TTL
    #[arg(long)]
    icmp_max_ttl: Option<u8>,

    /// Host table refresh interval in milliseconds
    #[arg(long)]
    ui_refresh_ms: Option<u64>,

    /// Also capture and report ICMP echo traffic
    #[arg(long)]
    capture_icmp: bool,

    /// Do not render the host table (leaves the terminal to the log output)
    #[arg(long)]
    no_display: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        interface: cli.interface,
        target_cidrs: cli.cidrs,
        arp_timeout_ms: cli.arp_timeout_ms,
        icmp_timeout_ms: cli.icmp_timeout_ms,
        icmp_max_ttl: cli.icmp_max_ttl,
        capture_icmp: cli.capture_icmp,
        ui_refresh_ms: cli.ui_refresh_ms,
        no_display: cli.no_display,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting arpscope v{}", env!("CARGO_PKG_VERSION"));
    info!(
        arp_timeout_ms = config.capture.arp_timeout_ms,
        icmp_timeout_ms = config.capture.icmp_timeout_ms,
        icmp_max_ttl = config.capture.icmp_max_ttl,
        host_ttl_secs = config.cache.host_ttl_secs,
        "Configuration loaded"
    );

    let shutdown = CancellationToken::new();
    let services = di::Services::new(&config, shutdown.clone());

    let target = services
        .resolve_interface
        .execute(&config.capture)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to select capture interface");
            anyhow::anyhow!(e)
        })?;

    JobRunner::new()
        .with_host_expiry(services.host_expiry_job(&config))
        .with_shutdown_token(shutdown.clone())
        .start()
        .await;

    if config.display.enabled {
        let get_hosts = services.get_hosts.clone();
        let refresh_ms = config.display.ui_refresh_ms;
        let token = shutdown.clone();
        tokio::spawn(async move { display::run(get_hosts, refresh_ms, token).await });
    }

    let capture = CaptureJob::new(
        services.ingest_frame.clone(),
        services.capture_opener,
        target.interface,
    )
    .start();

    let ctrl_c_token = shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for ctrl-c");
            return;
        }
        info!("Shutdown requested");
        ctrl_c_token.cancel();
    });

    let result = capture.await;
    shutdown.cancel();

    let summary = result
        .map_err(|e| anyhow::anyhow!("capture task panicked: {}", e))?
        .map_err(|e| anyhow::anyhow!(e))?;

    info!(
        frames = summary.frames_seen,
        arp = summary.arp_observed,
        icmp = summary.icmp_reported,
        skipped = summary.skipped,
        hosts = services.cache.len(),
        events = services.cache.event_count(),
        "Shutdown complete"
    );
    Ok(())
}
