use eframe::egui;
use shared::domain::{PersonRecord, RecordId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableAction {
    Edit(RecordId),
    Delete(RecordId),
}

const HEADERS: [&str; 7] = ["Name", "Email", "Age", "Country", "Student", "Rating", "Actions"];

pub fn show_records_table(ui: &mut egui::Ui, records: &[PersonRecord]) -> Option<TableAction> {
    let mut action = None;
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            egui::Grid::new("records_grid")
                .num_columns(HEADERS.len())
                .striped(true)
                .spacing(egui::vec2(16.0, 6.0))
                .show(ui, |ui| {
                    for header in HEADERS {
                        ui.strong(header);
                    }
                    ui.end_row();

                    for record in records {
                        ui.label(&record.name);
                        ui.label(&record.email);
                        ui.label(record.age.to_string());
                        ui.label(&record.country);
                        ui.label(record.student_label());
                        ui.label(record.rating.to_string());
                        ui.horizontal(|ui| {
                            if ui.small_button("Edit").clicked() {
                                action = Some(TableAction::Edit(record.id.clone()));
                            }
                            if ui.small_button("Delete").clicked() {
                                action = Some(TableAction::Delete(record.id.clone()));
                            }
                        });
                        ui.end_row();
                    }
                });
        });
    action
}
