//! egui desktop client: controller, UI state, and renderer.

/// Bridges the workflow state machines to the egui UI.
pub mod controller;
/// Plain UI state read by the renderer.
pub mod state;
/// egui rendering.
pub mod ui;
