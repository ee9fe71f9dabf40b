use arpscope_application::use_cases::{GetHostsUseCase, HostTable};
use std::fmt::Write;
use std::io::{self, Write as _};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Text view of the host table: a size header, then one `ip: mac` row per
/// host in numeric address order.
pub fn render_table(table: &HostTable) -> String {
    let mut out = String::with_capacity(32 + table.hosts.len() * 40);
    let _ = writeln!(out, "cache size: {}", table.size);
    for (ip, host) in &table.hosts {
        let _ = writeln!(out, "{:<15}: {:>17}", ip, host.mac().to_string());
    }
    out
}

fn draw(frame: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{}{}", CLEAR_SCREEN, frame)?;
    stdout.flush()
}

pub async fn run(get_hosts: Arc<GetHostsUseCase>, refresh_ms: u64, shutdown: CancellationToken) {
    let mut interval = tokio::time::interval(Duration::from_millis(refresh_ms));

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                debug!("Display loop: shutting down");
                break;
            }
            _ = interval.tick() => {
                if let Err(e) = draw(&render_table(&get_hosts.execute())) {
                    warn!(error = %e, "Failed to render host table");
                    break;
                }
            }
        }
    }
}
