//! Drag gesture state for gallery reordering.

use crate::types::media::MediaId;

/// The entry being dragged, handed from the drag-start handler to the
/// drop handler.
///
/// One value per gesture: `MediaCollection::drop_on` consumes it. A gesture
/// that ends anywhere else just drops the transfer and leaves the gallery
/// untouched.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a drag transfer does nothing unless passed to drop_on"]
pub struct DragTransfer {
    source: MediaId,
}

impl DragTransfer {
    pub(crate) fn new(source: MediaId) -> Self {
        Self { source }
    }

    pub fn source(&self) -> MediaId {
        self.source
    }
}
