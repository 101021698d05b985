//! Modal create/edit dialog. Edits go straight into the detached draft; the
//! caller decides what Save and Cancel mean.

use eframe::egui;
use shared::domain::{Gender, PersonRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Save,
    Cancel,
}

pub fn show_record_form(
    ctx: &egui::Context,
    title: &str,
    draft: &mut PersonRecord,
    error: Option<&str>,
    saving: bool,
) -> Option<FormAction> {
    let mut action = None;
    let mut open = true;
    egui::Window::new(title)
        .id(egui::Id::new("record_form_window"))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .open(&mut open)
        .show(ctx, |ui| {
            egui::Grid::new("record_form_grid")
                .num_columns(2)
                .spacing(egui::vec2(12.0, 8.0))
                .show(ui, |ui| {
                    ui.label("Name *");
                    ui.text_edit_singleline(&mut draft.name);
                    ui.end_row();

                    ui.label("Email *");
                    ui.text_edit_singleline(&mut draft.email);
                    ui.end_row();

                    ui.label("Age");
                    ui.add(egui::DragValue::new(&mut draft.age).speed(1.0));
                    ui.end_row();

                    ui.label("Height");
                    ui.add(egui::DragValue::new(&mut draft.height).speed(0.5));
                    ui.end_row();

                    ui.label("Birth date");
                    ui.vertical(|ui| {
                        ui.add(
                            egui::TextEdit::singleline(&mut draft.birth_date)
                                .hint_text("YYYY-MM-DD"),
                        );
                        if draft.has_malformed_birth_date() {
                            ui.small("Not a YYYY-MM-DD date; it will be saved as typed.");
                        }
                    });
                    ui.end_row();

                    ui.label("Gender");
                    egui::ComboBox::from_id_salt("record_gender")
                        .selected_text(draft.gender.label())
                        .show_ui(ui, |ui| {
                            for gender in Gender::ALL {
                                ui.selectable_value(&mut draft.gender, gender, gender.label());
                            }
                        });
                    ui.end_row();

                    ui.label("Country");
                    ui.text_edit_singleline(&mut draft.country);
                    ui.end_row();

                    ui.label("Student");
                    ui.checkbox(&mut draft.is_student, "");
                    ui.end_row();

                    ui.label("Rating");
                    ui.horizontal(|ui| {
                        ui.add(egui::DragValue::new(&mut draft.rating).speed(0.1));
                        ui.weak("1-10");
                    });
                    ui.end_row();

                    ui.label("Notes");
                    ui.add(
                        egui::TextEdit::multiline(&mut draft.notes)
                            .desired_rows(3)
                            .desired_width(260.0),
                    );
                    ui.end_row();
                });

            if let Some(error) = error {
                ui.add_space(4.0);
                ui.colored_label(ui.visuals().error_fg_color, error);
            }

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    action = Some(FormAction::Cancel);
                }
                if ui
                    .add_enabled(!saving, egui::Button::new("Save"))
                    .clicked()
                {
                    action = Some(FormAction::Save);
                }
                if saving {
                    ui.spinner();
                }
            });
        });

    if !open {
        action = Some(FormAction::Cancel);
    }
    action
}
