//! Clipboard payload for copy/cut/paste.
//!
//! The payload is plain-text JSON so it survives any system clipboard:
//!
//! ```json
//! { "kind": "canvas/elements", "version": 1, "elements": [ ... ] }
//! ```
//!
//! Anything else on the clipboard (other apps' text, older versions,
//! malformed JSON) is treated as empty and pasting does nothing.

use sb_core::{Element, ElementId, Point};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CLIPBOARD_KIND: &str = "canvas/elements";
pub const CLIPBOARD_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipboardPayload {
    pub kind: String,
    pub version: u32,
    pub elements: Vec<Element>,
}

impl ClipboardPayload {
    pub fn new(elements: Vec<Element>) -> Self {
        Self {
            kind: CLIPBOARD_KIND.to_string(),
            version: CLIPBOARD_VERSION,
            elements,
        }
    }

    /// # Errors
    /// Returns the serde error if encoding fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse clipboard text. Returns `None` unless it is a well-formed
    /// payload of the expected kind and version.
    pub fn parse(text: &str) -> Option<Self> {
        let payload: ClipboardPayload = match serde_json::from_str(text) {
            Ok(p) => p,
            Err(e) => {
                log::debug!("clipboard text is not a canvas payload: {e}");
                return None;
            }
        };
        if payload.kind != CLIPBOARD_KIND || payload.version != CLIPBOARD_VERSION {
            log::debug!(
                "ignoring clipboard payload kind={} version={}",
                payload.kind,
                payload.version
            );
            return None;
        }
        Some(payload)
    }
}

/// Copy of `element` under a new id, shifted by `(dx, dy)`.
pub fn offset_element(element: &Element, dx: f64, dy: f64, id: ElementId) -> Element {
    let mut copy = element.clone();
    copy.id = id;
    let pos = element.position();
    copy.set_position(Point::new(pos.x + dx, pos.y + dy));
    copy
}

// ─── System clipboard boundary ───────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    /// Permission denied, no secure context, or no clipboard at all.
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
}

/// Text access to the host clipboard. Failures are recovered by callers.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
    fn read_text(&mut self) -> Result<String, ClipboardError>;
}

/// In-process clipboard, for hosts without a system clipboard and for tests.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    text: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.text = Some(text.to_string());
        Ok(())
    }

    fn read_text(&mut self) -> Result<String, ClipboardError> {
        self.text
            .clone()
            .ok_or_else(|| ClipboardError::Unavailable("clipboard is empty".into()))
    }
}
