//! Candidate form page.
//!
//! Rendering never mutates [`FormState`] directly: widgets edit scratch copies and every
//! change comes back as a [`FormIntent`] for the app to reduce.

use eframe::egui;
use form_core::{DocumentChange, FieldValue, FormAction, FormState, DOCUMENTS_KEY};
use shared::domain::{FileType, ProfileField};

const ERROR_COLOR: egui::Color32 = egui::Color32::from_rgb(240, 71, 71);
const FIELD_HEIGHT: f32 = 30.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormIntent {
    Edit(FormAction),
    PickProfilePhoto,
    PickDocumentFile(usize),
    Submit,
}

pub fn show_candidate_form(ui: &mut egui::Ui, state: &FormState) -> Vec<FormIntent> {
    let mut intents = Vec::new();

    ui.vertical_centered(|ui| {
        ui.heading("CANDIDATE'S DOCUMENT SUBMISSION FORM");
    });
    ui.add_space(12.0);

    profile_photo_row(ui, state, &mut intents);
    ui.add_space(8.0);

    ui.columns(2, |columns| {
        text_field(
            &mut columns[0],
            state,
            &mut intents,
            ProfileField::FirstName,
            "First Name *",
            "Enter your first name here..",
        );
        text_field(
            &mut columns[1],
            state,
            &mut intents,
            ProfileField::LastName,
            "Last Name *",
            "Enter your last name here..",
        );
    });
    ui.columns(2, |columns| {
        text_field(
            &mut columns[0],
            state,
            &mut intents,
            ProfileField::Email,
            "Email *",
            "e.g., myname@example.com",
        );
        text_field(
            &mut columns[1],
            state,
            &mut intents,
            ProfileField::Dob,
            "Date of Birth *",
            "YYYY-MM-DD",
        );
    });

    ui.add_space(8.0);
    ui.label(egui::RichText::new("Residential Address *").strong());
    text_input(ui, state, &mut intents, ProfileField::ResidentialStreet1, "Street 1");
    text_input(ui, state, &mut intents, ProfileField::ResidentialStreet2, "Street 2");

    let mut same_as_residential = state.profile.same_as_residential;
    if ui
        .checkbox(&mut same_as_residential, "Same as Residential Address")
        .changed()
    {
        intents.push(FormIntent::Edit(FormAction::SetField {
            field: ProfileField::SameAsResidential,
            value: FieldValue::Flag(same_as_residential),
        }));
    }

    if !state.profile.same_as_residential {
        ui.add_space(8.0);
        ui.label(egui::RichText::new("Permanent Address *").strong());
        text_input(ui, state, &mut intents, ProfileField::PermanentStreet1, "Street 1");
        text_input(ui, state, &mut intents, ProfileField::PermanentStreet2, "Street 2");
    }

    ui.add_space(12.0);
    ui.label(egui::RichText::new("Upload Documents (At least 2) *").strong());
    inline_error(ui, state.errors.get(DOCUMENTS_KEY));
    document_rows(ui, state, &mut intents);

    ui.add_space(16.0);
    ui.vertical_centered(|ui| {
        let submit = egui::Button::new(egui::RichText::new("Submit").strong().size(16.0))
            .min_size(egui::vec2(160.0, 36.0));
        if ui.add(submit).clicked() {
            intents.push(FormIntent::Submit);
        }
    });

    intents
}

fn inline_error(ui: &mut egui::Ui, message: Option<&str>) {
    if let Some(message) = message {
        ui.colored_label(ERROR_COLOR, message);
    }
}

fn text_field(
    ui: &mut egui::Ui,
    state: &FormState,
    intents: &mut Vec<FormIntent>,
    field: ProfileField,
    label: &str,
    hint: &str,
) {
    ui.label(egui::RichText::new(label).strong());
    text_input(ui, state, intents, field, hint);
}

fn text_input(
    ui: &mut egui::Ui,
    state: &FormState,
    intents: &mut Vec<FormIntent>,
    field: ProfileField,
    hint: &str,
) {
    let mut buffer = state.profile.text(field).unwrap_or_default().to_string();
    let edit = egui::TextEdit::singleline(&mut buffer)
        .id_salt(field.key())
        .hint_text(hint)
        .desired_width(f32::INFINITY);
    if ui.add_sized([ui.available_width(), FIELD_HEIGHT], edit).changed() {
        intents.push(FormIntent::Edit(FormAction::SetField {
            field,
            value: FieldValue::Text(buffer),
        }));
    }
    inline_error(ui, state.errors.get(field.key()));
}

fn profile_photo_row(ui: &mut egui::Ui, state: &FormState, intents: &mut Vec<FormIntent>) {
    ui.label(egui::RichText::new("Profile Photo").strong());
    ui.horizontal(|ui| {
        if ui.button("Choose photo…").clicked() {
            intents.push(FormIntent::PickProfilePhoto);
        }
        match &state.profile.profile_photo {
            Some(photo) => ui.label(&photo.file_name),
            None => ui.weak("No file chosen"),
        };
    });
}

fn document_rows(ui: &mut egui::Ui, state: &FormState, intents: &mut Vec<FormIntent>) {
    let last = state.documents.len().saturating_sub(1);
    for (index, doc) in state.documents.iter().enumerate() {
        egui::Frame::NONE
            .fill(ui.visuals().faint_bg_color)
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let mut name = doc.file_name.clone();
                    let name_edit = egui::TextEdit::singleline(&mut name)
                        .id_salt(("document_name", doc.id))
                        .hint_text("Enter file name")
                        .desired_width(180.0);
                    if ui.add(name_edit).changed() {
                        intents.push(FormIntent::Edit(FormAction::UpdateRow {
                            index,
                            change: DocumentChange::FileName(name),
                        }));
                    }

                    let mut file_type = doc.file_type;
                    egui::ComboBox::from_id_salt(("document_type", doc.id))
                        .selected_text(file_type.label())
                        .show_ui(ui, |ui| {
                            for option in [FileType::Unset, FileType::Image, FileType::Pdf] {
                                ui.selectable_value(&mut file_type, option, option.label());
                            }
                        });
                    if file_type != doc.file_type {
                        intents.push(FormIntent::Edit(FormAction::UpdateRow {
                            index,
                            change: DocumentChange::FileType(file_type),
                        }));
                    }

                    if ui.button("Choose file…").clicked() {
                        intents.push(FormIntent::PickDocumentFile(index));
                    }
                    match &doc.file {
                        Some(file) => ui.label(&file.file_name),
                        None => ui.weak("No file chosen"),
                    };

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if index == last && ui.button("+").clicked() {
                            intents.push(FormIntent::Edit(FormAction::AddRow));
                        }
                        if state.can_remove_rows() && ui.button("Delete").clicked() {
                            intents.push(FormIntent::Edit(FormAction::RemoveRow(index)));
                        }
                    });
                });
                inline_error(ui, state.errors.row_error(index));
            });
        ui.add_space(4.0);
    }
}
