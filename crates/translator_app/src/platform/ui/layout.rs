use super::constants::WINDOW_TITLE;

pub const WINDOW_SIZE: [f32; 2] = [860.0, 640.0];
pub const WINDOW_MIN_SIZE: [f32; 2] = [480.0, 360.0];
pub const INPUT_ROWS: usize = 6;
pub const SECTION_SPACING: f32 = 12.0;
pub const TOAST_OFFSET: [f32; 2] = [0.0, 48.0];
pub const SETTINGS_WIDTH: f32 = 420.0;

pub fn native_options() -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(WINDOW_SIZE)
            .with_min_inner_size(WINDOW_MIN_SIZE),
        ..Default::default()
    }
}
