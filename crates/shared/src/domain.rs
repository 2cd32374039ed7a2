use std::fmt;

use serde::{Deserialize, Serialize};

use crate::protocol::{BEATMAP_FIELD, REPLAY_FIELD};

/// One of the two file inputs the analysis endpoint requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    Replay,
    Beatmap,
}

impl SlotKind {
    pub const ALL: [SlotKind; 2] = [SlotKind::Replay, SlotKind::Beatmap];

    /// Multipart field name the file is posted under.
    pub fn field_name(self) -> &'static str {
        match self {
            SlotKind::Replay => REPLAY_FIELD,
            SlotKind::Beatmap => BEATMAP_FIELD,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SlotKind::Replay => "replay",
            SlotKind::Beatmap => "beatmap",
        }
    }
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A file picked or dropped by the user, held in memory until submission.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            mime_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("size_bytes", &self.size_bytes())
            .finish()
    }
}
