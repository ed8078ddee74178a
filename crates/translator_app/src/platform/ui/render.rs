use egui::{Align, Align2, Button, Layout, RichText, TextEdit};
use translator_core::{
    AppViewModel, ConfigPatch, ErrorView, KeyPress, Msg, NotificationKind, Provider,
    SettingsView, ValidationStatus,
};

use super::constants::*;
use super::layout::{INPUT_ROWS, SECTION_SPACING, SETTINGS_WIDTH, TOAST_OFFSET};

/// Draws one frame of `view` and returns the user intents it produced, in
/// the order they happened.
pub fn render(ctx: &egui::Context, view: &AppViewModel, focus_input: bool) -> Vec<Msg> {
    let mut msgs = Vec::new();

    top_bar(ctx, view, &mut msgs);
    egui::CentralPanel::default().show(ctx, |ui| {
        source_input(ui, view, focus_input, &mut msgs);
        ui.add_space(SECTION_SPACING);
        result_panel(ui, view, &mut msgs);
    });
    if let Some(settings) = &view.settings {
        settings_window(ctx, settings, &mut msgs);
    }
    notification_toast(ctx, view);

    msgs
}

fn top_bar(ctx: &egui::Context, view: &AppViewModel, msgs: &mut Vec<Msg>) {
    egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let mut logo = RichText::new(APP_NAME).heading().strong();
            if view.success_pulse {
                logo = logo.color(SUCCESS_COLOR);
            }
            let logo = ui
                .add(egui::Label::new(logo).sense(egui::Sense::click()))
                .on_hover_text("Clear and start over");
            if logo.clicked() {
                msgs.push(Msg::ResetClicked);
            }

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.button("Settings").clicked() {
                    msgs.push(Msg::SettingsOpened);
                }
                model_selector(ui, view, msgs);
                if !view.configured {
                    ui.label(RichText::new("API key not configured").color(ERROR_COLOR));
                }
            });
        });
    });
}

fn model_selector(ui: &mut egui::Ui, view: &AppViewModel, msgs: &mut Vec<Msg>) {
    egui::ComboBox::from_id_source(MODEL_SELECTOR_ID)
        .selected_text(view.model_label.as_str())
        .show_ui(ui, |ui| {
            for preset in &view.model_presets {
                let selected = preset.model == view.model;
                if ui.selectable_label(selected, preset.label).clicked() && !selected {
                    msgs.push(Msg::ModelSelected(preset.model.to_string()));
                }
            }
        });
}

fn source_input(ui: &mut egui::Ui, view: &AppViewModel, focus_input: bool, msgs: &mut Vec<Msg>) {
    let input_id = egui::Id::new(INPUT_ID);
    // Key intents are read before the editor sees the events, but delivered
    // after this frame's edit so a submit uses the latest text.
    let focused = ui.memory(|memory| memory.has_focus(input_id));
    let key_msgs = take_key_events(ui, focused);

    let mut buffer = view.input.clone();
    let response = ui.add(
        TextEdit::multiline(&mut buffer)
            .id(input_id)
            .hint_text(INPUT_HINT)
            .desired_rows(INPUT_ROWS)
            .desired_width(f32::INFINITY),
    );
    if response.changed() {
        msgs.push(Msg::InputChanged(buffer));
    }
    // An IME session cannot outlive the editor's focus.
    if response.lost_focus() {
        msgs.push(Msg::CompositionEnded);
    }
    if focus_input {
        response.request_focus();
    }
    msgs.extend(key_msgs);

    ui.horizontal(|ui| {
        // Like Enter, a click while loading supersedes the running job.
        if ui.button("Translate").clicked() {
            msgs.push(Msg::SubmitClicked);
        }
        if view.loading {
            ui.spinner();
            ui.label(RichText::new("Translating…").color(MUTED_COLOR));
        }
    });
}

/// Reports composition boundaries and, while the editor has focus, removes
/// plain Enter from the event queue so the multiline editor never inserts it.
/// Shift+Enter stays in the queue and reaches the editor as a newline.
///
/// Composition is tracked whatever the focus, and an emptied preedit counts
/// as the end of a session: a cancelled IME sends no commit.
fn take_key_events(ui: &mut egui::Ui, focused: bool) -> Vec<Msg> {
    let mut msgs = Vec::new();
    ui.input_mut(|input| {
        input.events.retain(|event| match event {
            egui::Event::CompositionStart => {
                msgs.push(Msg::CompositionStarted);
                true
            }
            egui::Event::CompositionUpdate(text) if text.is_empty() => {
                msgs.push(Msg::CompositionEnded);
                true
            }
            egui::Event::CompositionEnd(_) => {
                msgs.push(Msg::CompositionEnded);
                true
            }
            egui::Event::Key {
                key: egui::Key::Enter,
                pressed: true,
                modifiers,
                ..
            } if focused && modifiers.is_none() => {
                msgs.push(Msg::KeyPressed(KeyPress::enter()));
                false
            }
            _ => true,
        });
    });
    msgs
}

fn result_panel(ui: &mut egui::Ui, view: &AppViewModel, msgs: &mut Vec<Msg>) {
    if let Some(error) = &view.error {
        error_fallback(ui, error, msgs);
        return;
    }
    if view.output.is_empty() {
        return;
    }

    ui.horizontal(|ui| {
        ui.label(RichText::new("Translation").strong());
        if view.show_copy {
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.button("Copy").clicked() {
                    msgs.push(Msg::CopyClicked);
                }
            });
        }
    });
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.add(egui::Label::new(RichText::new(&view.output).size(16.0)).wrap(true));
        });
}

fn error_fallback(ui: &mut egui::Ui, error: &ErrorView, msgs: &mut Vec<Msg>) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new(&error.title).heading().color(ERROR_COLOR));
        ui.label(error.message.as_str());
        if error.error_count > 1 {
            ui.label(
                RichText::new(format!("Failed {} times in a row", error.error_count))
                    .color(MUTED_COLOR),
            );
        }
        if error.suggest_switch_model {
            ui.label("This model keeps failing. Try another one from the model selector.");
        }
        ui.add_space(SECTION_SPACING / 2.0);
        ui.horizontal(|ui| {
            if ui.button("Try Again").clicked() {
                msgs.push(Msg::RetryClicked);
            }
            if ui.button("Clear & Reset").clicked() {
                msgs.push(Msg::ResetClicked);
            }
        });
    });
}

fn settings_window(ctx: &egui::Context, settings: &SettingsView, msgs: &mut Vec<Msg>) {
    let draft = &settings.draft;
    let mut open = true;
    egui::Window::new("Settings")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .default_width(SETTINGS_WIDTH)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            egui::Grid::new("settings_grid")
                .num_columns(2)
                .spacing([8.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Provider");
                    let mut provider = draft.provider;
                    ui.horizontal(|ui| {
                        for choice in [Provider::OpenAi, Provider::Custom] {
                            ui.radio_value(&mut provider, choice, choice.label());
                        }
                    });
                    if provider != draft.provider {
                        msgs.push(Msg::SettingsDraftChanged(ConfigPatch {
                            provider: Some(provider),
                            ..ConfigPatch::default()
                        }));
                    }
                    ui.end_row();

                    ui.label("API key");
                    let mut api_key = draft.api_key.clone();
                    let edit = TextEdit::singleline(&mut api_key)
                        .password(true)
                        .hint_text("sk-...");
                    if ui.add(edit).changed() {
                        msgs.push(Msg::SettingsDraftChanged(ConfigPatch::api_key(api_key)));
                    }
                    ui.end_row();

                    if draft.provider == Provider::Custom {
                        ui.label("Base URL");
                        let mut base_url = draft.base_url.clone().unwrap_or_default();
                        let edit = TextEdit::singleline(&mut base_url)
                            .hint_text("https://api.example.com/v1");
                        if ui.add(edit).changed() {
                            msgs.push(Msg::SettingsDraftChanged(ConfigPatch {
                                base_url: Some(base_url),
                                ..ConfigPatch::default()
                            }));
                        }
                        ui.end_row();
                    }

                    ui.label("Model");
                    let mut model = draft.model.clone();
                    if ui.text_edit_singleline(&mut model).changed() {
                        msgs.push(Msg::SettingsDraftChanged(ConfigPatch::model(model)));
                    }
                    ui.end_row();
                });

            ui.add_space(SECTION_SPACING / 2.0);
            validation_status(ui, settings.validation);
            ui.add_space(SECTION_SPACING / 2.0);

            ui.horizontal(|ui| {
                if ui
                    .add_enabled(settings.can_validate, Button::new("Validate"))
                    .clicked()
                {
                    msgs.push(Msg::SettingsValidateClicked);
                }
                if ui.button("Save").clicked() {
                    msgs.push(Msg::SettingsSaveClicked);
                }
                if ui.button("Restore defaults").clicked() {
                    msgs.push(Msg::SettingsResetClicked);
                }
            });
        });
    if !open {
        msgs.push(Msg::SettingsClosed);
    }
}

fn validation_status(ui: &mut egui::Ui, status: ValidationStatus) {
    match status {
        ValidationStatus::Idle => {}
        ValidationStatus::Validating => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Checking credentials…");
            });
        }
        ValidationStatus::Valid => {
            ui.label(RichText::new("Credentials are valid").color(SUCCESS_COLOR));
        }
        ValidationStatus::Invalid => {
            ui.label(RichText::new("Credentials were rejected").color(ERROR_COLOR));
        }
    }
}

fn notification_toast(ctx: &egui::Context, view: &AppViewModel) {
    let Some(notification) = &view.notification else {
        return;
    };
    let color = match notification.kind {
        NotificationKind::Success => SUCCESS_COLOR,
        NotificationKind::Error => ERROR_COLOR,
        NotificationKind::Info => INFO_COLOR,
    };
    egui::Area::new(egui::Id::new(TOAST_ID))
        .anchor(Align2::CENTER_TOP, TOAST_OFFSET)
        .order(egui::Order::Foreground)
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style())
                .fill(color)
                .show(ui, |ui| {
                    ui.label(RichText::new(&notification.message).color(egui::Color32::WHITE));
                });
        });
}
