//! Display surface that keeps widget state in memory and reports to the terminal.

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

use form_controller::{DisplaySurface, DomEvent, ElementId, FileList};
use tracing::warn;

#[derive(Default)]
pub struct TerminalSurface {
    classes: HashMap<ElementId, BTreeSet<String>>,
    disabled: HashMap<ElementId, bool>,
    texts: BTreeMap<ElementId, String>,
    images: HashMap<ElementId, String>,
    inputs: HashMap<ElementId, FileList>,
    staged_picks: HashMap<ElementId, FileList>,
    queued: VecDeque<(ElementId, DomEvent)>,
    alerts: Vec<String>,
}

impl TerminalSurface {
    /// Files the next picker opened on `input` will return.
    pub fn stage_pick(&mut self, input: ElementId, files: FileList) {
        self.staged_picks.insert(input, files);
    }

    /// Next event the surface raised on its own, such as a picker's change.
    pub fn next_event(&mut self) -> Option<(ElementId, DomEvent)> {
        self.queued.pop_front()
    }

    pub fn text(&self, element: &ElementId) -> Option<&str> {
        self.texts.get(element).map(String::as_str)
    }

    pub fn image_source(&self, element: &ElementId) -> Option<&str> {
        self.images.get(element).map(String::as_str)
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn is_disabled(&self, element: &ElementId) -> bool {
        self.disabled.get(element).copied().unwrap_or(false)
    }
}

impl DisplaySurface for TerminalSurface {
    fn add_class(&mut self, element: &ElementId, class: &str) {
        self.classes
            .entry(element.clone())
            .or_default()
            .insert(class.to_string());
    }

    fn remove_class(&mut self, element: &ElementId, class: &str) {
        if let Some(classes) = self.classes.get_mut(element) {
            classes.remove(class);
        }
    }

    fn has_class(&self, element: &ElementId, class: &str) -> bool {
        self.classes
            .get(element)
            .is_some_and(|classes| classes.contains(class))
    }

    fn set_disabled(&mut self, element: &ElementId, disabled: bool) {
        self.disabled.insert(element.clone(), disabled);
    }

    fn set_text(&mut self, element: &ElementId, text: &str) {
        self.texts.insert(element.clone(), text.to_string());
    }

    fn set_image_source(&mut self, element: &ElementId, source: &str) {
        self.images.insert(element.clone(), source.to_string());
    }

    fn files(&self, input: &ElementId) -> FileList {
        self.inputs.get(input).cloned().unwrap_or_default()
    }

    fn assign_files(&mut self, input: &ElementId, files: FileList) {
        self.inputs.insert(input.clone(), files);
    }

    fn open_file_picker(&mut self, input: &ElementId) {
        let Some(files) = self.staged_picks.remove(input) else {
            warn!(input = %input, "file picker opened with nothing staged");
            return;
        };
        self.inputs.insert(input.clone(), files);
        self.queued.push_back((input.clone(), DomEvent::Change));
    }

    fn alert(&mut self, message: &str) {
        eprintln!("alert: {message}");
        self.alerts.push(message.to_string());
    }
}
