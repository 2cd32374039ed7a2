//! Display surface whose state the egui app reads back every frame.

use std::collections::{HashMap, HashSet, VecDeque};

use form_controller::{DisplaySurface, ElementId, FileList};

#[derive(Default)]
pub struct GuiSurface {
    classes: HashMap<ElementId, HashSet<String>>,
    disabled: HashSet<ElementId>,
    texts: HashMap<ElementId, String>,
    images: HashMap<ElementId, String>,
    inputs: HashMap<ElementId, FileList>,
    picker_requests: VecDeque<ElementId>,
    alerts: VecDeque<String>,
}

impl GuiSurface {
    pub fn text(&self, element: &ElementId) -> Option<&str> {
        self.texts.get(element).map(String::as_str)
    }

    pub fn image_source(&self, element: &ElementId) -> Option<&str> {
        self.images.get(element).map(String::as_str)
    }

    pub fn is_disabled(&self, element: &ElementId) -> bool {
        self.disabled.contains(element)
    }

    /// Inputs whose file picker was opened since the last call.
    pub fn take_picker_requests(&mut self) -> Vec<ElementId> {
        self.picker_requests.drain(..).collect()
    }

    pub fn current_alert(&self) -> Option<&str> {
        self.alerts.front().map(String::as_str)
    }

    pub fn dismiss_alert(&mut self) {
        self.alerts.pop_front();
    }
}

impl DisplaySurface for GuiSurface {
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
        if disabled {
            self.disabled.insert(element.clone());
        } else {
            self.disabled.remove(element);
        }
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
        self.picker_requests.push_back(input.clone());
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push_back(message.to_string());
    }
}
