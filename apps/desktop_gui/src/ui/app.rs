use std::{collections::HashMap, time::Duration};

use client_core::selected_file_from_path;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use form_controller::{
    render::decode_plot_data_uri,
    surface::{JudgementTargets, DRAG_OVER_CLASS, HAS_FILE_CLASS, HIDDEN_CLASS},
    DisplaySurface, DomEvent, DomHandles, ElementId, FileList, FormController, SettledSubmission,
    SubmitOutcome, SubmitPolicy,
};
use shared::domain::{SelectedFile, SlotKind};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{events::UiEvent, orchestration::dispatch_backend_command};
use crate::ui::surface::GuiSurface;

struct PlotTexture {
    source: String,
    texture: Option<egui::TextureHandle>,
}

pub struct AnalyzerApp {
    controller: FormController<GuiSurface>,
    handles: DomHandles,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    zone_rects: HashMap<SlotKind, egui::Rect>,
    hovered_zone: Option<SlotKind>,
    plot: Option<PlotTexture>,
    status: String,
}

impl AnalyzerApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        policy: SubmitPolicy,
    ) -> Self {
        let handles = DomHandles::default().with_judgements(JudgementTargets::default());
        let controller =
            FormController::with_policy(GuiSurface::default(), handles.clone(), policy);
        Self {
            controller,
            handles,
            cmd_tx,
            ui_rx,
            zone_rects: HashMap::new(),
            hovered_zone: None,
            plot: None,
            status: "Choose a replay and its beatmap".to_string(),
        }
    }

    fn dispatch(&mut self, element: &ElementId, event: DomEvent) {
        let dispatch = self.controller.dispatch(element, event);
        if let Some(pending) = dispatch.submission {
            self.status = format!("Analyzing (request {})...", pending.ticket());
            if let Some(settled) = dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::Analyze(pending),
                &mut self.status,
            ) {
                self.apply_outcome(settled);
            }
        }
        self.fulfil_picker_requests();
    }

    fn fulfil_picker_requests(&mut self) {
        for input in self.controller.surface_mut().take_picker_requests() {
            let Some(slot) = self.handles.slot_for_input(&input) else {
                continue;
            };
            let Some(path) = rfd::FileDialog::new()
                .set_title(format!("Choose {slot} file"))
                .pick_file()
            else {
                tracing::debug!(slot = %slot, "file picker cancelled");
                continue;
            };
            match selected_file_from_path(&path) {
                Ok(file) => {
                    self.controller
                        .surface_mut()
                        .assign_files(&input, FileList::single(file));
                    self.dispatch(&input, DomEvent::Change);
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), "failed to read selected file: {err}");
                    self.status = format!("Could not read {}: {err}", path.display());
                }
            }
        }
    }

    fn apply_outcome(&mut self, settled: SettledSubmission) {
        let ticket = settled.ticket;
        self.status = match self.controller.finish_submission(settled) {
            SubmitOutcome::Rendered(stats) => {
                format!("Request {ticket}: {} presses analyzed", stats.total_presses)
            }
            SubmitOutcome::Failed(err) => {
                format!("Request {ticket} failed: {}", err.user_message())
            }
        };
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::AnalysisSettled(settled) => self.apply_outcome(settled),
                UiEvent::BackendFailed(message) => self.status = message,
            }
        }
    }

    /// Turns native file hover/drop input into zone drag events.
    fn track_file_drag(&mut self, ctx: &egui::Context) {
        let (hovering, dropped, pointer) = ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.raw.dropped_files.clone(),
                i.pointer.hover_pos(),
            )
        });
        let target = pointer.and_then(|pos| self.zone_at(pos));

        if !dropped.is_empty() {
            // Some platforms report no pointer position during an OS drag.
            let slot = match (pointer, target) {
                (_, Some(slot)) => Some(slot),
                (None, None) => Some(self.hovered_zone.unwrap_or_else(|| self.first_empty_slot())),
                (Some(_), None) => None,
            };
            if let Some(previous) = self.hovered_zone.take() {
                if Some(previous) != slot {
                    let zone = self.handles.zone(previous).clone();
                    self.dispatch(&zone, DomEvent::DragLeave);
                }
            }
            let Some(slot) = slot else {
                tracing::debug!("files dropped outside both drop zones");
                return;
            };
            let files: Vec<SelectedFile> =
                dropped.iter().filter_map(selected_file_from_drop).collect();
            let zone = self.handles.zone(slot).clone();
            self.dispatch(&zone, DomEvent::Drop(FileList::from(files)));
            return;
        }

        if hovering {
            if target != self.hovered_zone {
                if let Some(previous) = self.hovered_zone {
                    let zone = self.handles.zone(previous).clone();
                    self.dispatch(&zone, DomEvent::DragLeave);
                }
                if let Some(next) = target {
                    let zone = self.handles.zone(next).clone();
                    self.dispatch(&zone, DomEvent::DragOver);
                }
                self.hovered_zone = target;
            }
        } else if let Some(previous) = self.hovered_zone.take() {
            let zone = self.handles.zone(previous).clone();
            self.dispatch(&zone, DomEvent::DragEnd);
        }
    }

    fn zone_at(&self, pos: egui::Pos2) -> Option<SlotKind> {
        SlotKind::ALL.into_iter().find(|slot| {
            self.zone_rects
                .get(slot)
                .is_some_and(|rect| rect.contains(pos))
        })
    }

    fn first_empty_slot(&self) -> SlotKind {
        SlotKind::ALL
            .into_iter()
            .find(|slot| !self.controller.state().slots().get(*slot).has_file())
            .unwrap_or(SlotKind::Replay)
    }

    fn drop_zone(&mut self, ui: &mut egui::Ui, slot: SlotKind) {
        let zone = self.handles.zone(slot).clone();
        let surface = self.controller.surface();
        let has_file = surface.has_class(&zone, HAS_FILE_CLASS);
        let drag_over = surface.has_class(&zone, DRAG_OVER_CLASS);

        let visuals = ui.visuals();
        let fill = if drag_over {
            visuals.selection.bg_fill
        } else if has_file {
            visuals.faint_bg_color
        } else {
            visuals.extreme_bg_color
        };
        let title = match slot {
            SlotKind::Replay => "Replay (.osr)",
            SlotKind::Beatmap => "Beatmap (.osu)",
        };
        let detail = self
            .controller
            .state()
            .slots()
            .get(slot)
            .file()
            .map(|file| format!("{} ({})", file.name, human_readable_bytes(file.size_bytes())))
            .unwrap_or_else(|| "Drag & drop or click to choose a file".to_string());

        let response = egui::Frame::group(ui.style())
            .fill(fill)
            .show(ui, |ui| {
                ui.set_min_size(egui::vec2(280.0, 110.0));
                ui.vertical_centered(|ui| {
                    ui.strong(title);
                    ui.add_space(6.0);
                    ui.label(detail);
                    if has_file {
                        ui.small("Click to replace");
                    }
                });
            })
            .response
            .interact(egui::Sense::click());

        self.zone_rects.insert(slot, response.rect);
        if response.clicked() {
            self.dispatch(&zone, DomEvent::Click);
        }
    }

    fn submit_row(&mut self, ui: &mut egui::Ui) {
        let submit = self.handles.submit.clone();
        let surface = self.controller.surface();
        let enabled = !surface.is_disabled(&submit);
        let loading = !surface.has_class(&self.handles.loading_indicator, HIDDEN_CLASS);

        let mut clicked = false;
        ui.horizontal(|ui| {
            clicked = ui
                .add_enabled(enabled, egui::Button::new("Analyze"))
                .clicked();
            if loading {
                ui.spinner();
                ui.label("Analyzing...");
            }
        });
        if clicked {
            self.dispatch(&submit, DomEvent::Click);
        }
    }

    fn result_rows(&self) -> Vec<(&'static str, String)> {
        let surface = self.controller.surface();
        let mut targets: Vec<(&'static str, &ElementId)> = vec![
            ("Total presses", &self.handles.total_presses),
            ("Average press time", &self.handles.avg_press_time),
            ("Shortest press", &self.handles.min_press_time),
            ("Longest press", &self.handles.max_press_time),
        ];
        if let Some(judgements) = &self.handles.judgements {
            targets.extend([
                ("300", &judgements.count_300),
                ("Geki", &judgements.count_geki),
                ("100", &judgements.count_100),
                ("Katu", &judgements.count_katu),
                ("50", &judgements.count_50),
                ("Miss", &judgements.count_miss),
                ("Score", &judgements.score),
            ]);
        }
        targets
            .into_iter()
            .filter_map(|(label, target)| {
                surface.text(target).map(|text| (label, text.to_string()))
            })
            .collect()
    }

    fn results_panel(&mut self, ui: &mut egui::Ui) {
        if self
            .controller
            .surface()
            .has_class(&self.handles.results, HIDDEN_CLASS)
        {
            return;
        }

        let rows = self.result_rows();
        egui::Grid::new("press_statistics")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                for (label, value) in &rows {
                    ui.label(*label);
                    ui.strong(value.as_str());
                    ui.end_row();
                }
            });
        ui.add_space(8.0);
        self.plot_image(ui);
    }

    fn plot_image(&mut self, ui: &mut egui::Ui) {
        let Some(source) = self
            .controller
            .surface()
            .image_source(&self.handles.plot_image)
            .map(str::to_string)
        else {
            return;
        };

        let stale = self
            .plot
            .as_ref()
            .map_or(true, |plot| plot.source != source);
        if stale {
            let texture = match decode_plot_texture(ui.ctx(), &source) {
                Ok(texture) => Some(texture),
                Err(err) => {
                    tracing::warn!("failed to decode plot image: {err}");
                    None
                }
            };
            self.plot = Some(PlotTexture { source, texture });
        }

        let width = ui.available_width();
        match self.plot.as_ref().and_then(|plot| plot.texture.as_ref()) {
            Some(texture) => {
                ui.add(egui::Image::new(texture).max_width(width));
            }
            None => {
                ui.label("Plot could not be displayed");
            }
        }
    }

    fn alert_window(&mut self, ctx: &egui::Context) {
        let Some(message) = self
            .controller
            .surface()
            .current_alert()
            .map(str::to_string)
        else {
            return;
        };

        let mut dismissed = false;
        egui::Window::new("Replay analyzer")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        if dismissed {
            self.controller.surface_mut().dismiss_alert();
        }
    }
}

impl eframe::App for AnalyzerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.track_file_drag(ctx);

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label(self.status.as_str());
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Replay press analyzer");
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                self.drop_zone(ui, SlotKind::Replay);
                self.drop_zone(ui, SlotKind::Beatmap);
            });
            ui.add_space(8.0);
            self.submit_row(ui);
            ui.separator();
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.results_panel(ui);
            });
        });
        self.alert_window(ctx);

        if self.controller.state().loading_visible() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

fn selected_file_from_drop(file: &egui::DroppedFile) -> Option<SelectedFile> {
    if let Some(bytes) = &file.bytes {
        let name = if file.name.is_empty() {
            "dropped-file".to_string()
        } else {
            file.name.clone()
        };
        let mut selected = SelectedFile::new(name, bytes.to_vec());
        if !file.mime.is_empty() {
            selected = selected.with_mime_type(file.mime.clone());
        }
        return Some(selected);
    }

    let path = file.path.as_ref()?;
    match selected_file_from_path(path) {
        Ok(selected) => Some(selected),
        Err(err) => {
            tracing::warn!(path = %path.display(), "failed to read dropped file: {err}");
            None
        }
    }
}

fn decode_plot_texture(ctx: &egui::Context, source: &str) -> Result<egui::TextureHandle, String> {
    let png = decode_plot_data_uri(source).map_err(|err| err.to_string())?;
    let decoded = image::load_from_memory(&png).map_err(|err| err.to_string())?;
    let rgba = decoded.to_rgba8();
    let [w, h] = [rgba.width() as usize, rgba.height() as usize];
    let color_image = egui::ColorImage::from_rgba_unmultiplied([w, h], rgba.as_raw());
    Ok(ctx.load_texture("press-plot", color_image, egui::TextureOptions::LINEAR))
}

pub fn human_readable_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else if value.fract() == 0.0 {
        format!("{value:.0} {}", UNITS[unit])
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}
