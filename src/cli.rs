//! Command line interface.

use std::time::Duration;

use clap::{CommandFactory, Parser};

use crate::config::ServerConfig;

const ABOUT: &str =
    "vanity-server is a service that allows you to set custom import paths for your go packages";

#[derive(Parser, Debug)]
#[command(name = "vanity-server", version, about = ABOUT, long_about = None)]
#[command(override_usage = "vanity-server --host <HOST_NAME> [OPTIONS]")]
pub struct Cli {
    /// Custom domain name, e.g. example.com
    #[arg(long, env = "VANITY_HOST")]
    pub host: Option<String>,

    /// Config path or URL, e.g. /app/config/vanity.yaml or https://example.com/vanity.yaml
    #[arg(long, env = "VANITY_CONFIG", default_value = "/app/config/vanity.yaml")]
    pub config: String,

    /// Interval to refresh the config (e.g. 90s, 2m, 1h; bare numbers are seconds)
    #[arg(long, env = "VANITY_INTERVAL", default_value = "2m", value_parser = parse_duration)]
    pub interval: Duration,

    /// Address to serve vanity pages on
    #[arg(long, env = "VANITY_LISTEN", default_value = "0.0.0.0:80")]
    pub listen: String,

    /// Timeout for fetching a remote config
    #[arg(long, env = "VANITY_FETCH_TIMEOUT", default_value = "30s", value_parser = parse_duration)]
    pub fetch_timeout: Duration,

    /// Documentation site browsers are redirected to
    #[arg(long, env = "VANITY_DOC_URL", default_value = "https://godoc.org")]
    pub doc_url: String,

    /// Reload when a local config file changes
    #[arg(long, env = "VANITY_WATCH")]
    pub watch: bool,

    /// Serve Prometheus metrics on this address, e.g. 0.0.0.0:9090
    #[arg(long, env = "VANITY_METRICS_ADDRESS")]
    pub metrics_address: Option<String>,
}

impl Cli {
    /// Server settings, or `None` when no host was given.
    pub fn into_config(self) -> Option<ServerConfig> {
        let host = self.host.filter(|h| !h.is_empty())?;

        Some(ServerConfig {
            host,
            config_source: self.config,
            refresh_interval: self.interval,
            fetch_timeout: self.fetch_timeout,
            bind_address: self.listen,
            doc_url: self.doc_url,
            watch: self.watch,
            metrics_address: self.metrics_address,
        })
    }
}

/// Print the usage text shown when the service cannot start.
pub fn print_usage() -> std::io::Result<()> {
    Cli::command().print_help()
}

/// Parse `90`, `90s`, `500ms`, `2m` or `1h`. Zero is rejected.
pub fn parse_duration(value: &str) -> Result<Duration, String> {
    let value = value.trim();
    let split = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    let (digits, unit) = value.split_at(split);

    let amount: u64 = digits
        .parse()
        .map_err(|_| format!("invalid duration {value:?}"))?;

    let duration = match unit {
        "" | "s" => Duration::from_secs(amount),
        "ms" => Duration::from_millis(amount),
        "m" => Duration::from_secs(amount.saturating_mul(60)),
        "h" => Duration::from_secs(amount.saturating_mul(3600)),
        other => return Err(format!("unknown duration unit {other:?} in {value:?}")),
    };

    if duration.is_zero() {
        return Err("duration must be greater than zero".to_string());
    }
    Ok(duration)
}
