pub mod exporters;

use self::exporters::ExporterConfig;

/// Service name reported when `OTEL_SERVICE_NAME` is not set
pub const DEFAULT_SERVICE_NAME: &str = "voxgate";

/// Telemetry configuration
///
/// Present only when an OTLP endpoint is configured; plain log output needs
/// no configuration.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Service name for telemetry metadata
    pub service_name: String,
    /// Trace exporter
    pub exporter: ExporterConfig,
    /// Sampling rate (0.0 to 1.0)
    pub sampling_rate: f64,
}
