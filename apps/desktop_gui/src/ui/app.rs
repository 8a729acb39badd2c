use chrono::{Local, NaiveDate};
use client_core::Acknowledgment;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use form_core::{reduce, FormAction, FormState};
use shared::domain::Attachment;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::media::{self, AttachmentError};
use crate::router::Route;
use crate::ui::form::{show_candidate_form, FormIntent};

pub struct CandidateFormApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    route: Route,
    state: FormState,
    status: String,
    acknowledgment: Option<Acknowledgment>,
    today: fn() -> NaiveDate,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl CandidateFormApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>, route: Route) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            route,
            state: FormState::default(),
            status: String::new(),
            acknowledgment: None,
            today: local_today,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn apply(&mut self, action: FormAction) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
    }

    /// Validate synchronously and, if the form passes, queue the payload as it is right now.
    /// No pending state is shown, and nothing stops a second submit while the first is still
    /// in flight.
    pub fn submit(&mut self) {
        let state = std::mem::take(&mut self.state);
        let (state, payload) = state.prepare_submission((self.today)());
        self.state = state;

        self.status.clear();
        match payload {
            Some(payload) => dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::SubmitCandidate { payload },
                &mut self.status,
            ),
            None => {
                tracing::debug!(errors = self.state.errors.len(), "submit blocked by validation");
            }
        }
    }

    pub fn attach_profile_photo(&mut self, picked: Result<Option<Attachment>, AttachmentError>) {
        if let Some(photo) = self.accept_picked(picked) {
            self.apply(FormAction::SetProfilePhoto(photo));
        }
    }

    pub fn attach_document(
        &mut self,
        index: usize,
        picked: Result<Option<Attachment>, AttachmentError>,
    ) {
        if let Some(file) = self.accept_picked(picked) {
            self.apply(FormAction::SetRowFile { index, file });
        }
    }

    fn accept_picked(
        &mut self,
        picked: Result<Option<Attachment>, AttachmentError>,
    ) -> Option<Option<Attachment>> {
        match picked {
            Ok(file) => Some(file),
            Err(err) => {
                let err = UiError::from_message(UiErrorContext::PickFile, err.to_string());
                tracing::warn!("{}", err.message());
                self.status = err.status_line();
                None
            }
        }
    }

    pub fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::SubmissionFinished(acknowledgment) => {
                    self.status.clear();
                    self.acknowledgment = Some(acknowledgment);
                }
                UiEvent::Error(err) => {
                    tracing::error!(context = ?err.context(), "{}", err.message());
                    self.status = err.status_line();
                }
            }
        }
    }

    fn handle_intent(&mut self, intent: FormIntent) {
        match intent {
            FormIntent::Edit(action) => self.apply(action),
            FormIntent::PickProfilePhoto => {
                let picked = media::pick_profile_photo()
                    .map(|path| media::load_attachment(&path))
                    .transpose();
                self.attach_profile_photo(picked);
            }
            FormIntent::PickDocumentFile(index) => {
                let picked = media::pick_document()
                    .map(|path| media::load_attachment(&path))
                    .transpose();
                self.attach_document(index, picked);
            }
            FormIntent::Submit => self.submit(),
        }
    }

    fn show_form_page(&mut self, ctx: &egui::Context) {
        let intents = egui::CentralPanel::default()
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.set_max_width(760.0);
                        let intents = show_candidate_form(ui, &self.state);
                        if !self.status.is_empty() {
                            ui.add_space(8.0);
                            ui.small(egui::RichText::new(&self.status).weak());
                        }
                        intents
                    })
                    .inner
            })
            .inner;

        for intent in intents {
            self.handle_intent(intent);
        }
    }

    fn show_not_found_page(&mut self, ctx: &egui::Context) {
        let path = self.route.path().to_string();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(60.0);
                ui.heading("Page not found");
                ui.label(format!("Nothing is served at '{path}'."));
                if ui.link("Go to the candidate form").clicked() {
                    self.route = Route::CandidateForm;
                }
            });
        });
    }

    fn show_acknowledgment(&mut self, ctx: &egui::Context) {
        let Some(acknowledgment) = self.acknowledgment else {
            return;
        };

        let mut dismissed = false;
        egui::Modal::new(egui::Id::new("submission_acknowledgment")).show(ctx, |ui| {
            ui.set_min_width(280.0);
            ui.label(acknowledgment.message());
            ui.add_space(10.0);
            ui.vertical_centered(|ui| {
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        });
        if dismissed {
            self.acknowledgment = None;
        }
    }
}

impl eframe::App for CandidateFormApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        match self.route {
            Route::CandidateForm => self.show_form_page(ctx),
            Route::NotFound(_) => self.show_not_found_page(ctx),
        }
        self.show_acknowledgment(ctx);

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

#[cfg(test)]
#[path = "../tests/app_tests.rs"]
mod tests;
