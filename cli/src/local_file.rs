//! Local image files as intake selections.

#[cfg(test)]
#[path = "local_file_test.rs"]
mod local_file_test;

use std::path::PathBuf;

use agriscan::intake::PickedFile;

/// A file on disk. The content type is guessed from its extension.
#[derive(Debug, Clone)]
pub struct LocalFile {
    path: PathBuf,
}

impl LocalFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait(?Send)]
impl PickedFile for LocalFile {
    fn name(&self) -> String {
        self.path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()
    }

    fn mime_type(&self) -> String {
        mime_guess::from_path(&self.path).first_raw().unwrap_or("application/octet-stream").to_owned()
    }

    async fn read_bytes(&self) -> Result<Vec<u8>, String> {
        tokio::fs::read(&self.path).await.map_err(|e| format!("{}: {e}", self.path.display()))
    }
}
