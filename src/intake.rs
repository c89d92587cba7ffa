//! Image intake: validation, preview encoding, and the staged upload.
//!
//! SYSTEM CONTEXT
//! ==============
//! Drag-and-drop and the file picker both funnel into [`ImageIntake::select`],
//! so there is exactly one validation path. The staged [`ImageArtifact`] is
//! read by the submission controller at submit time and never mutated by it.
//!
//! DESIGN
//! ======
//! Every selection and every clear bumps a generation counter. A decode that
//! finishes after a newer selection (or after a clear) is discarded instead
//! of overwriting the newer state.

#[cfg(test)]
#[path = "intake_test.rs"]
mod intake_test;

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::cell::StateCell;
use crate::error::ClientError;

/// Declared content types must start with this to be accepted.
pub const IMAGE_MIME_PREFIX: &str = "image/";

/// Where a selection came from. Both take the same validation path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputSource {
    Drop,
    Picker,
}

/// A user-selected file whose bytes have not been read yet.
#[async_trait::async_trait(?Send)]
pub trait PickedFile {
    fn name(&self) -> String;

    /// Declared content type, e.g. `image/png`.
    fn mime_type(&self) -> String;

    /// # Errors
    ///
    /// Returns a description of the read failure.
    async fn read_bytes(&self) -> Result<Vec<u8>, String>;
}

/// A validated image ready for preview and upload.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageArtifact {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
    /// `data:` URL rendered as the preview.
    pub preview: String,
}

impl ImageArtifact {
    #[must_use]
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        let mime_type = mime_type.into();
        let preview = preview_data_url(&mime_type, &bytes);
        Self { file_name: file_name.into(), mime_type, bytes, preview }
    }
}

impl fmt::Debug for ImageArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageArtifact")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

/// Whether a declared content type is an image type.
#[must_use]
pub fn is_image_mime(mime_type: &str) -> bool {
    mime_type.trim().to_ascii_lowercase().starts_with(IMAGE_MIME_PREFIX)
}

/// Encode bytes as a base64 `data:` URL.
#[must_use]
pub fn preview_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{mime_type};base64,{}", STANDARD.encode(bytes))
}

/// Intake state rendered by the drop zone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntakeState {
    pub artifact: Option<ImageArtifact>,
    /// A file is being read and encoded.
    pub decoding: bool,
    /// A drag is hovering over the drop zone.
    pub drag_over: bool,
    /// Bumped on every clear; the file input blanks its value when it changes.
    pub input_resets: u64,
    generation: u64,
}

impl IntakeState {
    #[must_use]
    pub fn preview(&self) -> Option<&str> {
        self.artifact.as_ref().map(|a| a.preview.as_str())
    }
}

/// Controller owning the staged image.
#[derive(Clone, Copy, Debug)]
pub struct ImageIntake<C> {
    state: C,
}

impl<C: StateCell<IntakeState>> ImageIntake<C> {
    pub fn new(state: C) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &C {
        &self.state
    }

    pub fn set_drag_over(&self, over: bool) {
        self.state.update(|s| s.drag_over = over);
    }

    /// Validate and stage a file.
    ///
    /// Non-image files are rejected before any read and leave the state
    /// untouched.
    ///
    /// # Errors
    ///
    /// [`ClientError::ValidationRejected`] for non-image types and
    /// [`ClientError::Unreadable`] when the bytes cannot be read. Both are
    /// silent kinds.
    pub async fn select<F: PickedFile + ?Sized>(&self, source: InputSource, file: &F) -> Result<(), ClientError> {
        if source == InputSource::Drop {
            self.set_drag_over(false);
        }

        let mime_type = file.mime_type();
        if !is_image_mime(&mime_type) {
            log::debug!("ignoring non-image selection: {mime_type:?}");
            return Err(ClientError::ValidationRejected { mime_type });
        }

        let mut generation = 0;
        self.state.update(|s| {
            s.generation += 1;
            s.decoding = true;
            generation = s.generation;
        });

        let read = file.read_bytes().await;
        let outcome = read.map(|bytes| ImageArtifact::new(file.name(), mime_type, bytes));

        let mut current = false;
        self.state.update(|s| {
            if s.generation != generation {
                return;
            }
            current = true;
            s.decoding = false;
            if let Ok(artifact) = &outcome {
                s.artifact = Some(artifact.clone());
            }
        });

        match outcome {
            Ok(artifact) => {
                if current {
                    log::debug!("staged {artifact:?}");
                } else {
                    log::debug!("dropping stale decode of {}", artifact.file_name);
                }
                Ok(())
            }
            Err(reason) => {
                log::warn!("failed to read selected file: {reason}");
                Err(ClientError::Unreadable(reason))
            }
        }
    }

    /// Drop the staged image and reset the input control.
    pub fn clear(&self) {
        self.state.update(|s| {
            s.generation += 1;
            s.artifact = None;
            s.decoding = false;
            s.drag_over = false;
            s.input_resets += 1;
        });
    }

    /// The staged image, if any.
    pub fn artifact(&self) -> Option<ImageArtifact> {
        self.state.with(|s| s.artifact.clone())
    }
}
