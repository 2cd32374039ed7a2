//! Registration table mapping `(element, event)` pairs to handlers.

use std::collections::BTreeMap;

use shared::domain::SlotKind;
use tracing::debug;

use crate::surface::{ElementId, EventKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    OpenPicker(SlotKind),
    MarkDragOver(SlotKind),
    ClearDragOver(SlotKind),
    DropFiles(SlotKind),
    FileChanged(SlotKind),
    Submit,
}

impl Handler {
    /// Whether the surface's default handling of the event must be suppressed.
    pub fn prevents_default(self) -> bool {
        matches!(self, Handler::MarkDragOver(_) | Handler::DropFiles(_))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    table: BTreeMap<(ElementId, EventKind), Handler>,
}

impl Registry {
    pub fn register(
        &mut self,
        element: ElementId,
        kind: EventKind,
        handler: Handler,
    ) -> Option<Handler> {
        debug!(element = %element, ?kind, ?handler, "registering handler");
        self.table.insert((element, kind), handler)
    }

    /// Gives a drop zone and its input the shared drag/drop/picker behaviour.
    pub fn bind_drop_zone(&mut self, slot: SlotKind, zone: &ElementId, input: &ElementId) {
        self.register(zone.clone(), EventKind::Click, Handler::OpenPicker(slot));
        self.register(zone.clone(), EventKind::DragOver, Handler::MarkDragOver(slot));
        for kind in [EventKind::DragLeave, EventKind::DragEnd] {
            self.register(zone.clone(), kind, Handler::ClearDragOver(slot));
        }
        self.register(zone.clone(), EventKind::Drop, Handler::DropFiles(slot));
        self.register(input.clone(), EventKind::Change, Handler::FileChanged(slot));
    }

    pub fn bind_submit(&mut self, button: &ElementId) {
        self.register(button.clone(), EventKind::Click, Handler::Submit);
    }

    pub fn handler_for(&self, element: &ElementId, kind: EventKind) -> Option<Handler> {
        self.table.get(&(element.clone(), kind)).copied()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ElementId, EventKind, Handler)> {
        self.table
            .iter()
            .map(|((element, kind), handler)| (element, *kind, *handler))
    }
}
