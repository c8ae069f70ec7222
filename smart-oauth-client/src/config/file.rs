use super::{ClientConfig, Error, Loader};
use std::path::{Path, PathBuf};

/// An implementation of [`Loader`] that reads a configuration file.
///
/// Only `.json` files are supported.
pub struct FileLoader {
    path: PathBuf,
}

impl FileLoader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
}

impl Loader for FileLoader {
    async fn load(
        &self,
    ) -> core::result::Result<ClientConfig, Box<dyn std::error::Error + Send + Sync + 'static>>
    {
        match self.path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(serde_json::from_str(&std::fs::read_to_string(&self.path)?)?),
            ext => Err(Error::UnsupportedFormat(ext.map(String::from)).into()),
        }
    }
}
