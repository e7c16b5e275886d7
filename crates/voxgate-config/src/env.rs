use std::net::SocketAddr;
use std::path::PathBuf;

use secrecy::SecretString;
use url::Url;

use crate::telemetry::DEFAULT_SERVICE_NAME;
use crate::telemetry::exporters::{ExportProtocol, ExporterConfig};
use crate::{
    BasicAuthConfig, Config, CorsConfig, DEFAULT_BASE_URL, DEFAULT_CORS_ORIGIN, DEFAULT_PORT, DEFAULT_REALM,
    FilesConfig, ServerConfig, TelemetryConfig, UpstreamConfig,
};

pub const BASE_URL_VAR: &str = "OPENVOICE_BASE_URL";
pub const REF_DIR_VAR: &str = "REF_DIR";
pub const OUT_DIR_VAR: &str = "OUT_DIR";
pub const PORT_VAR: &str = "PORT";
pub const BASIC_AUTH_USER_VAR: &str = "BASIC_AUTH_USER";
pub const BASIC_AUTH_PASS_VAR: &str = "BASIC_AUTH_PASS";
pub const BASIC_AUTH_REALM_VAR: &str = "BASIC_AUTH_REALM";
pub const CORS_ORIGIN_VAR: &str = "CORS_ORIGIN";
pub const OTLP_ENDPOINT_VAR: &str = "OTEL_EXPORTER_OTLP_ENDPOINT";
pub const OTLP_PROTOCOL_VAR: &str = "OTEL_EXPORTER_OTLP_PROTOCOL";
pub const SERVICE_NAME_VAR: &str = "OTEL_SERVICE_NAME";
pub const SAMPLER_ARG_VAR: &str = "OTEL_TRACES_SAMPLER_ARG";

impl Config {
    /// Load configuration from process environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an unparseable value or the
    /// resulting configuration fails validation
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Empty values are treated the same as unset ones.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an unparseable value or the
    /// resulting configuration fails validation
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let port = match var(PORT_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("invalid {PORT_VAR} `{raw}`: {e}"))?,
            None => DEFAULT_PORT,
        };

        let server = ServerConfig {
            listen_address: SocketAddr::from(([0, 0, 0, 0], port)),
            cors: CorsConfig {
                origin: var(CORS_ORIGIN_VAR).unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string()),
            },
        };

        let upstream = UpstreamConfig::new(&var(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()));

        let defaults = FilesConfig::default();
        let files = FilesConfig {
            ref_dir: var(REF_DIR_VAR).map_or(defaults.ref_dir, PathBuf::from),
            out_dir: var(OUT_DIR_VAR).map_or(defaults.out_dir, PathBuf::from),
        };

        let auth = var(BASIC_AUTH_USER_VAR).map(|username| {
            let mut auth = BasicAuthConfig::new(
                username,
                SecretString::from(lookup(BASIC_AUTH_PASS_VAR).unwrap_or_default()),
            );
            auth.realm = var(BASIC_AUTH_REALM_VAR).unwrap_or_else(|| DEFAULT_REALM.to_string());
            auth
        });

        let telemetry = match var(OTLP_ENDPOINT_VAR) {
            Some(endpoint) => {
                let endpoint = Url::parse(&endpoint)
                    .map_err(|e| anyhow::anyhow!("invalid {OTLP_ENDPOINT_VAR} `{endpoint}`: {e}"))?;
                let protocol = match var(OTLP_PROTOCOL_VAR) {
                    Some(raw) => raw.parse::<ExportProtocol>().map_err(|e| anyhow::anyhow!(e))?,
                    None => ExportProtocol::default(),
                };
                let sampling_rate = match var(SAMPLER_ARG_VAR) {
                    Some(raw) => raw
                        .trim()
                        .parse::<f64>()
                        .map_err(|e| anyhow::anyhow!("invalid {SAMPLER_ARG_VAR} `{raw}`: {e}"))?,
                    None => 1.0,
                };

                Some(TelemetryConfig {
                    service_name: var(SERVICE_NAME_VAR).unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),
                    exporter: ExporterConfig { endpoint, protocol },
                    sampling_rate,
                })
            }
            None => None,
        };

        let config = Self {
            server,
            upstream,
            files,
            auth,
            telemetry,
        };

        config.validate()?;

        Ok(config)
    }
}
