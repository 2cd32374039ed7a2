use shared::{
    domain::{SelectedFile, SlotKind},
    protocol::AnalysisRequest,
};

use crate::surface::{DomHandles, ElementId};

/// One input together with the drop zone that proxies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSlot {
    kind: SlotKind,
    zone: ElementId,
    input: ElementId,
    file: Option<SelectedFile>,
    drag_over: bool,
}

impl FileSlot {
    pub fn new(kind: SlotKind, zone: ElementId, input: ElementId) -> Self {
        Self {
            kind,
            zone,
            input,
            file: None,
            drag_over: false,
        }
    }

    pub fn kind(&self) -> SlotKind {
        self.kind
    }

    pub fn zone(&self) -> &ElementId {
        &self.zone
    }

    pub fn input(&self) -> &ElementId {
        &self.input
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn has_file(&self) -> bool {
        self.file.is_some()
    }

    pub fn is_drag_over(&self) -> bool {
        self.drag_over
    }

    pub(crate) fn set_file(&mut self, file: Option<SelectedFile>) {
        self.file = file;
    }

    pub(crate) fn set_drag_over(&mut self, drag_over: bool) {
        self.drag_over = drag_over;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSlots {
    replay: FileSlot,
    beatmap: FileSlot,
}

impl FileSlots {
    pub fn from_handles(handles: &DomHandles) -> Self {
        let slot = |kind| {
            FileSlot::new(kind, handles.zone(kind).clone(), handles.input(kind).clone())
        };
        Self {
            replay: slot(SlotKind::Replay),
            beatmap: slot(SlotKind::Beatmap),
        }
    }

    pub fn get(&self, kind: SlotKind) -> &FileSlot {
        match kind {
            SlotKind::Replay => &self.replay,
            SlotKind::Beatmap => &self.beatmap,
        }
    }

    pub(crate) fn get_mut(&mut self, kind: SlotKind) -> &mut FileSlot {
        match kind {
            SlotKind::Replay => &mut self.replay,
            SlotKind::Beatmap => &mut self.beatmap,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileSlot> {
        [&self.replay, &self.beatmap].into_iter()
    }

    /// Readiness: true iff both slots hold a file.
    pub fn both_present(&self) -> bool {
        self.iter().all(FileSlot::has_file)
    }

    pub fn request(&self) -> Option<AnalysisRequest> {
        Some(AnalysisRequest::new(
            self.replay.file()?.clone(),
            self.beatmap.file()?.clone(),
        ))
    }
}
