//! Handles for driving the viewer from outside the UI thread.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Controller for stream actions like pause/resume, snapshots and clearing the overlay.
///
/// Requests are queued and applied by the UI on its next frame. A snapshot
/// request without a path behaves like the "Save" button and opens a dialog.
#[derive(Clone)]
pub struct StreamController {
    pub(crate) inner: Arc<Mutex<StreamCtrlInner>>,
}

#[derive(Default)]
pub(crate) struct StreamCtrlInner {
    pub(crate) request_pause: Option<bool>,
    pub(crate) request_snapshot: bool,
    pub(crate) request_snapshot_to: Option<PathBuf>,
    pub(crate) request_select: Option<String>,
    pub(crate) request_clear_overlay: bool,
}

/// Requests drained by the UI in one frame.
#[derive(Debug, Default, PartialEq)]
pub struct StreamRequests {
    pub pause: Option<bool>,
    pub snapshot: bool,
    pub snapshot_to: Option<PathBuf>,
    pub select: Option<String>,
    pub clear_overlay: bool,
}

impl StreamController {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(StreamCtrlInner::default())),
        }
    }

    /// Freeze the main preview.
    pub fn pause(&self) {
        self.inner.lock().unwrap().request_pause = Some(true);
    }

    pub fn resume(&self) {
        self.inner.lock().unwrap().request_pause = Some(false);
    }

    /// Save a PNG of the main preview; the UI prompts for a filename.
    pub fn request_snapshot(&self) {
        self.inner.lock().unwrap().request_snapshot = true;
    }

    /// Save a PNG of the main preview to `path` without prompting.
    pub fn request_snapshot_to_path<P: Into<PathBuf>>(&self, path: P) {
        self.inner.lock().unwrap().request_snapshot_to = Some(path.into());
    }

    pub fn select_camera(&self, device_id: &str) {
        self.inner.lock().unwrap().request_select = Some(device_id.to_string());
    }

    pub fn clear_overlay(&self) {
        self.inner.lock().unwrap().request_clear_overlay = true;
    }

    /// Take every pending request, leaving the queue empty.
    pub fn take_requests(&self) -> StreamRequests {
        let mut inner = self.inner.lock().unwrap();
        StreamRequests {
            pause: inner.request_pause.take(),
            snapshot: std::mem::take(&mut inner.request_snapshot),
            snapshot_to: inner.request_snapshot_to.take(),
            select: inner.request_select.take(),
            clear_overlay: std::mem::take(&mut inner.request_clear_overlay),
        }
    }
}

impl Default for StreamController {
    fn default() -> Self {
        Self::new()
    }
}
