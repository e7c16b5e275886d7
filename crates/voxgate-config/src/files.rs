use std::path::PathBuf;

/// Root directories served by the file gateway
#[derive(Debug, Clone)]
pub struct FilesConfig {
    /// Reference audio inputs
    pub ref_dir: PathBuf,
    /// Generated audio outputs
    pub out_dir: PathBuf,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            ref_dir: PathBuf::from("/refs"),
            out_dir: PathBuf::from("/outs"),
        }
    }
}
