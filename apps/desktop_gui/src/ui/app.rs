use std::time::{Duration, Instant};

use client_core::{AppState, ClientSettings, RecordOp, RecordOpKind, RecordOutcome, Severity};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::RecordId;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::record_form::{show_record_form, FormAction};
use crate::ui::record_table::{show_records_table, TableAction};

const IDLE_REPAINT: Duration = Duration::from_millis(250);

pub struct DesktopGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    state: AppState,
    api_url: String,
    status: String,
    form_error: Option<String>,
    saving: bool,
}

impl DesktopGuiApp {
    /// Builds the app and queues the initial load.
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        settings: &ClientSettings,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            state: AppState::new(settings.toast_duration()),
            api_url: settings.api_url.clone(),
            status: "Starting".to_string(),
            form_error: None,
            saving: false,
        };
        app.refresh();
        app
    }

    fn dispatch(&mut self, op: RecordOp) {
        if let Err(outcome) =
            dispatch_backend_command(&self.cmd_tx, op.into(), &mut self.status)
        {
            self.apply_outcome(outcome, Instant::now());
        }
    }

    pub fn refresh(&mut self) {
        let op = self.state.begin_load();
        self.dispatch(op);
    }

    pub fn open_create(&mut self) {
        self.form_error = None;
        self.state.open_create();
    }

    pub fn open_edit(&mut self, id: &RecordId) {
        self.form_error = None;
        if !self.state.open_edit(id) {
            self.status = format!("Record {id} is no longer loaded");
        }
    }

    pub fn cancel_form(&mut self) {
        self.form_error = None;
        self.saving = false;
        self.state.cancel_form();
    }

    /// Validates the draft and queues the create or update. Invalid drafts
    /// keep the dialog open with an inline message.
    pub fn submit_form(&mut self) {
        match self.state.begin_save() {
            Ok(request) => {
                self.form_error = None;
                self.saving = true;
                self.dispatch(request.into());
            }
            Err(err) => {
                self.form_error = Some(err.to_string());
            }
        }
    }

    pub fn confirm_delete(&mut self) {
        if let Some(op) = self.state.confirm_delete() {
            self.dispatch(op);
        }
    }

    fn apply_outcome(&mut self, outcome: RecordOutcome, now: Instant) {
        match &outcome {
            RecordOutcome::Created(_) | RecordOutcome::Updated(_) => self.saving = false,
            RecordOutcome::Failed(err) => {
                if matches!(err.kind(), RecordOpKind::Create | RecordOpKind::Update) {
                    self.saving = false;
                }
                let err = UiError::from_message(UiErrorContext::RecordOperation, err.to_string());
                tracing::warn!(category = ?err.category(), "{}", err.message());
                self.status = err.message().to_string();
            }
            RecordOutcome::Loaded(records) => {
                self.status = format!("Loaded {} records from {}", records.len(), self.api_url);
            }
            RecordOutcome::Deleted(_) => {}
        }
        self.state.apply(outcome, now);
    }

    pub fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Records(outcome) => self.apply_outcome(outcome, Instant::now()),
                UiEvent::Error(err) => {
                    tracing::error!(
                        context = ?err.context(),
                        category = ?err.category(),
                        "{}",
                        err.message()
                    );
                    self.status = err.message().to_string();
                }
            }
        }
    }

    fn show_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("records_top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Records");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(&self.api_url);
                });
            });
        });
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("records_status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.state.is_loading() {
                    ui.spinner();
                    ui.label("Loading...");
                    ui.separator();
                }
                ui.small(&self.status);
            });
        });
    }

    fn show_actions_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("records_actions_panel")
            .resizable(false)
            .exact_width(160.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                if ui
                    .add_sized([140.0, 28.0], egui::Button::new("New Record"))
                    .clicked()
                {
                    self.open_create();
                }
                if ui
                    .add_enabled(
                        !self.state.is_loading(),
                        egui::Button::new("Refresh Table").min_size(egui::vec2(140.0, 28.0)),
                    )
                    .clicked()
                {
                    self.refresh();
                }
                ui.add_space(12.0);
                ui.label(format!("Records: {}", self.state.store().len()));
            });
    }

    fn show_table(&mut self, ctx: &egui::Context) {
        let action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                if self.state.store().is_empty() && !self.state.is_loading() {
                    ui.weak("No records yet.");
                }
                show_records_table(ui, self.state.store().records())
            })
            .inner;

        match action {
            Some(TableAction::Edit(id)) => self.open_edit(&id),
            Some(TableAction::Delete(id)) => self.state.request_delete(id),
            None => {}
        }
    }

    fn show_form_dialog(&mut self, ctx: &egui::Context) {
        let Some(title) = self.state.form().title() else {
            return;
        };
        let action = match self.state.form_mut().draft_mut() {
            Some(draft) => show_record_form(
                ctx,
                title,
                draft,
                self.form_error.as_deref(),
                self.saving,
            ),
            None => None,
        };
        match action {
            Some(FormAction::Save) => self.submit_form(),
            Some(FormAction::Cancel) => self.cancel_form(),
            None => {}
        }
    }

    fn show_delete_confirmation(&mut self, ctx: &egui::Context) {
        if self.state.pending_delete().is_none() {
            return;
        }
        let mut confirmed = false;
        let mut cancelled = false;
        egui::Window::new("Confirm")
            .id(egui::Id::new("delete_confirmation_window"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label("Delete this record?");
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    cancelled = ui.button("Cancel").clicked();
                    confirmed = ui.button("Delete").clicked();
                });
            });
        if confirmed {
            self.confirm_delete();
        } else if cancelled {
            self.state.cancel_delete();
        }
    }

    fn show_toast(&mut self, ctx: &egui::Context) {
        let Some(toast) = self.state.notifier().current() else {
            return;
        };
        let visuals = ctx.style().visuals.clone();
        let fill = match toast.severity {
            Severity::Success => egui::Color32::from_rgb(46, 125, 50),
            Severity::Error => visuals.error_fg_color.gamma_multiply(0.85),
        };
        let message = toast.message.clone();
        let mut dismissed = false;
        egui::Area::new(egui::Id::new("records_toast"))
            .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -40.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(fill)
                    .corner_radius(egui::CornerRadius::same(6))
                    .inner_margin(egui::Margin::symmetric(12, 8))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.colored_label(egui::Color32::WHITE, message);
                            dismissed = ui.small_button("Dismiss").clicked();
                        });
                    });
            });
        if dismissed {
            self.state.notifier_mut().dismiss();
        }
    }
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        let now = Instant::now();
        self.state.tick(now);

        self.show_top_bar(ctx);
        self.show_status_bar(ctx);
        self.show_actions_panel(ctx);
        self.show_table(ctx);
        self.show_form_dialog(ctx);
        self.show_delete_confirmation(ctx);
        self.show_toast(ctx);

        let next = self
            .state
            .notifier()
            .remaining(now)
            .map_or(IDLE_REPAINT, |left| left.min(IDLE_REPAINT));
        ctx.request_repaint_after(next);
    }
}
