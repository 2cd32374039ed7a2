//! UI layer for desktop GUI: app shell and the egui-backed display surface.

pub mod app;
pub mod surface;

pub use app::AnalyzerApp;
