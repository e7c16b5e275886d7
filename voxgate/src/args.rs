use std::net::SocketAddr;

use clap::Parser;

/// OpenVoice gateway
#[derive(Debug, Parser)]
#[command(
    name = "voxgate",
    about = "Reverse proxy and file gateway for an OpenVoice synthesis service",
    long_about = "Reverse proxy and file gateway for an OpenVoice synthesis service.\n\n\
                  Settings are read from the environment: OPENVOICE_BASE_URL, REF_DIR, OUT_DIR, PORT, \
                  BASIC_AUTH_USER, BASIC_AUTH_PASS, BASIC_AUTH_REALM, CORS_ORIGIN and the \
                  OTEL_EXPORTER_OTLP_* variables."
)]
pub struct Args {
    /// Override the listen address derived from `PORT`
    #[arg(long, env = "VOXGATE_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Log filter directive
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    pub log_filter: String,
}
