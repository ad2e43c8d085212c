use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tally_core::form::FormData;
use tally_core::scale::ScaleToFit;
use tally_core::templates::TemplateKind;
use tally_render::Document;

/// Lifecycle of the template page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No record yet; nothing can be previewed or exported.
    Loading,
    Ready,
    /// A PDF export is running. Further download requests are ignored.
    Exporting,
}

/// What the previous screen hands over when navigating to the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationState {
    pub form_data: FormData,
    #[serde(default)]
    pub selected_template: Option<u32>,
}

impl NavigationState {
    pub fn new(form_data: FormData) -> Self {
        Self {
            form_data,
            selected_template: None,
        }
    }

    pub fn with_template(mut self, identifier: u32) -> Self {
        self.selected_template = Some(identifier);
        self
    }
}

pub(crate) struct PageState {
    pub phase: Phase,
    pub form: Option<FormData>,
    pub template: TemplateKind,
    /// Rendered once per (form, template) and shared with the exporter.
    pub document: Option<Arc<Document>>,
    pub scale: ScaleToFit,
    /// Set when the preview changed and has not been measured since.
    pub needs_measure: bool,
}

impl PageState {
    pub fn new(fit: bool) -> Self {
        Self {
            phase: Phase::Loading,
            form: None,
            template: TemplateKind::DEFAULT,
            document: None,
            scale: ScaleToFit::new(fit),
            needs_measure: true,
        }
    }

    /// Drop the record and go back to waiting for one.
    pub fn reset(&mut self) {
        self.phase = Phase::Loading;
        self.form = None;
        self.template = TemplateKind::DEFAULT;
        self.document = None;
        self.needs_measure = true;
    }
}
