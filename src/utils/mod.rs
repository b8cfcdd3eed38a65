pub mod egui_mpsc;
pub mod tasks;
