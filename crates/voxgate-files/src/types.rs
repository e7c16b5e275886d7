use serde::Serialize;

/// One file in a directory listing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryEntry {
    /// File name without any directory part
    pub name: String,
    /// Size in bytes
    pub size: u64,
    /// Last modification, milliseconds since the Unix epoch
    pub mtime_ms: f64,
}
