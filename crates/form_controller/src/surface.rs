//! Seam between the controller and whatever draws the form.

use std::fmt;

use shared::domain::{SelectedFile, SlotKind};

pub const DRAG_OVER_CLASS: &str = "drag-over";
pub const HAS_FILE_CLASS: &str = "has-file";
pub const HIDDEN_CLASS: &str = "hidden";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Files currently held by an input, in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileList(Vec<SelectedFile>);

impl FileList {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn single(file: SelectedFile) -> Self {
        Self(vec![file])
    }

    pub fn first(&self) -> Option<&SelectedFile> {
        self.0.first()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<SelectedFile>> for FileList {
    fn from(files: Vec<SelectedFile>) -> Self {
        Self(files)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    Click,
    DragOver,
    DragLeave,
    DragEnd,
    Drop,
    Change,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    Click,
    DragOver,
    DragLeave,
    DragEnd,
    Drop(FileList),
    Change,
}

impl DomEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            DomEvent::Click => EventKind::Click,
            DomEvent::DragOver => EventKind::DragOver,
            DomEvent::DragLeave => EventKind::DragLeave,
            DomEvent::DragEnd => EventKind::DragEnd,
            DomEvent::Drop(_) => EventKind::Drop,
            DomEvent::Change => EventKind::Change,
        }
    }
}

/// Rendering surface the controller writes to.
///
/// Implementations own the actual widgets; the controller only toggles
/// classes, writes text, and moves file lists between inputs. A picker opened
/// through [`DisplaySurface::open_file_picker`] reports back by delivering a
/// [`DomEvent::Change`] for the input once a selection is made.
pub trait DisplaySurface {
    fn add_class(&mut self, element: &ElementId, class: &str);
    fn remove_class(&mut self, element: &ElementId, class: &str);
    fn has_class(&self, element: &ElementId, class: &str) -> bool;
    fn set_disabled(&mut self, element: &ElementId, disabled: bool);
    fn set_text(&mut self, element: &ElementId, text: &str);
    fn set_image_source(&mut self, element: &ElementId, source: &str);
    fn files(&self, input: &ElementId) -> FileList;
    fn assign_files(&mut self, input: &ElementId, files: FileList);
    fn open_file_picker(&mut self, input: &ElementId);
    fn alert(&mut self, message: &str);
}

/// Optional display targets for the judgement counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JudgementTargets {
    pub count_300: ElementId,
    pub count_geki: ElementId,
    pub count_100: ElementId,
    pub count_katu: ElementId,
    pub count_50: ElementId,
    pub count_miss: ElementId,
    pub score: ElementId,
}

impl Default for JudgementTargets {
    fn default() -> Self {
        Self {
            count_300: "count300".into(),
            count_geki: "countGeki".into(),
            count_100: "count100".into(),
            count_katu: "countKatu".into(),
            count_50: "count50".into(),
            count_miss: "countMiss".into(),
            score: "score".into(),
        }
    }
}

/// Every element the controller touches, injected at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomHandles {
    pub replay_zone: ElementId,
    pub beatmap_zone: ElementId,
    pub replay_input: ElementId,
    pub beatmap_input: ElementId,
    pub loading_indicator: ElementId,
    pub results: ElementId,
    pub submit: ElementId,
    pub total_presses: ElementId,
    pub avg_press_time: ElementId,
    pub min_press_time: ElementId,
    pub max_press_time: ElementId,
    pub plot_image: ElementId,
    pub judgements: Option<JudgementTargets>,
}

impl Default for DomHandles {
    fn default() -> Self {
        Self {
            replay_zone: "replayDropZone".into(),
            beatmap_zone: "beatmapDropZone".into(),
            replay_input: "replayFile".into(),
            beatmap_input: "beatmapFile".into(),
            loading_indicator: "loadingSpinner".into(),
            results: "results".into(),
            submit: "analyzeButton".into(),
            total_presses: "totalPresses".into(),
            avg_press_time: "avgPressTime".into(),
            min_press_time: "minPressTime".into(),
            max_press_time: "maxPressTime".into(),
            plot_image: "pressGraph".into(),
            judgements: None,
        }
    }
}

impl DomHandles {
    pub fn with_judgements(mut self, targets: JudgementTargets) -> Self {
        self.judgements = Some(targets);
        self
    }

    pub fn zone(&self, slot: SlotKind) -> &ElementId {
        match slot {
            SlotKind::Replay => &self.replay_zone,
            SlotKind::Beatmap => &self.beatmap_zone,
        }
    }

    pub fn input(&self, slot: SlotKind) -> &ElementId {
        match slot {
            SlotKind::Replay => &self.replay_input,
            SlotKind::Beatmap => &self.beatmap_input,
        }
    }

    pub fn slot_for_input(&self, input: &ElementId) -> Option<SlotKind> {
        SlotKind::ALL
            .into_iter()
            .find(|slot| self.input(*slot) == input)
    }
}
