use std::str::FromStr;

use url::Url;

/// OTLP exporter configuration
#[derive(Debug, Clone)]
pub struct ExporterConfig {
    /// OTLP endpoint URL
    pub endpoint: Url,
    /// Export protocol
    pub protocol: ExportProtocol,
}

/// OTLP export protocol
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportProtocol {
    /// gRPC (default)
    #[default]
    Grpc,
    /// HTTP/protobuf
    HttpProto,
}

impl FromStr for ExportProtocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grpc" => Ok(Self::Grpc),
            "http/protobuf" | "http_proto" => Ok(Self::HttpProto),
            other => Err(format!("unsupported OTLP protocol `{other}`, expected `grpc` or `http/protobuf`")),
        }
    }
}
