use egui::Color32;

pub const APP_NAME: &str = "AI Translate";
pub const WINDOW_TITLE: &str = "AI Translate";

pub const INPUT_ID: &str = "source_input";
pub const INPUT_HINT: &str = "Enter text to translate. Enter translates, Shift+Enter adds a new line.";
pub const MODEL_SELECTOR_ID: &str = "model_selector";
pub const TOAST_ID: &str = "notification_toast";

pub const SUCCESS_COLOR: Color32 = Color32::from_rgb(46, 160, 67);
pub const ERROR_COLOR: Color32 = Color32::from_rgb(218, 54, 51);
pub const INFO_COLOR: Color32 = Color32::from_rgb(56, 139, 253);
pub const MUTED_COLOR: Color32 = Color32::from_rgb(140, 140, 140);
