//! Adapter from a browser `File` to the intake's [`PickedFile`].
//!
//! Drop events and the file input both hand over a `web_sys::File`; the
//! bytes are read through the Blob `arrayBuffer()` promise so the event loop
//! is never blocked.

#[cfg(feature = "csr")]
use agriscan::intake::PickedFile;

#[cfg(feature = "csr")]
pub struct BrowserFile(pub web_sys::File);

#[cfg(feature = "csr")]
#[async_trait::async_trait(?Send)]
impl PickedFile for BrowserFile {
    fn name(&self) -> String {
        self.0.name()
    }

    fn mime_type(&self) -> String {
        self.0.type_()
    }

    async fn read_bytes(&self) -> Result<Vec<u8>, String> {
        let buffer = wasm_bindgen_futures::JsFuture::from(self.0.array_buffer())
            .await
            .map_err(|e| format!("{e:?}"))?;
        Ok(js_sys::Uint8Array::new(&buffer).to_vec())
    }
}

/// First file of a `FileList`, if any.
#[cfg(feature = "csr")]
pub fn first_file(files: Option<web_sys::FileList>) -> Option<BrowserFile> {
    files.and_then(|list| list.get(0)).map(BrowserFile)
}
