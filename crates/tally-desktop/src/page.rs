//! The template page: picks a template for the current record, keeps the
//! preview scaled to its container and exports the preview to PDF.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use tally_core::form::FormData;
use tally_core::scale::Measurement;
use tally_core::templates::{self, TemplateInfo, TemplateKind};
use tally_export::naming;
use tally_render::Document;
use tally_storage::{DraftStore, StorageError};

use crate::config::AppConfig;
use crate::print::Printer;
use crate::sink::DownloadSink;
use crate::state::{NavigationState, PageState, Phase};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageOptions {
    /// Template used when resuming a draft without a navigation choice.
    pub default_template: u32,
    pub fit_preview: bool,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            default_template: TemplateKind::DEFAULT.id(),
            fit_preview: true,
        }
    }
}

impl From<&AppConfig> for PageOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            default_template: config.default_template,
            fit_preview: config.fit_preview,
        }
    }
}

/// What the preview pane should show.
#[derive(Debug, Clone)]
pub struct Preview {
    pub document: Arc<Document>,
    pub template: TemplateKind,
    pub scale: f32,
    pub fit: bool,
    pub spacer_height: Option<f32>,
    /// The content changed since the last [`TemplatePage::measure`].
    pub needs_measure: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DownloadOutcome {
    Saved { path: PathBuf, page_count: usize },
    /// An export was already running; this request did nothing.
    AlreadyInFlight,
    /// No record has been loaded.
    NotReady,
    /// The export failed and was logged. The page is usable again.
    Failed(String),
}

/// Shared handle to the page. Clones refer to the same page.
#[derive(Clone)]
pub struct TemplatePage {
    state: Arc<Mutex<PageState>>,
    store: Arc<dyn DraftStore>,
    sink: Arc<dyn DownloadSink>,
    options: PageOptions,
}

impl TemplatePage {
    pub fn new(
        store: Arc<dyn DraftStore>,
        sink: Arc<dyn DownloadSink>,
        options: PageOptions,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(PageState::new(options.fit_preview))),
            store,
            sink,
            options,
        }
    }

    /// Take the record from `navigation` if given, otherwise from the draft
    /// store. With neither, the page stays in [`Phase::Loading`].
    pub async fn load(&self, navigation: Option<NavigationState>) -> Phase {
        let mut state = self.state.lock().await;
        if state.phase == Phase::Exporting {
            tracing::warn!("load requested during export, ignoring");
            return state.phase;
        }

        let (form, template) = match navigation {
            Some(nav) => {
                if let Err(e) = self.store.save(&nav.form_data) {
                    tracing::warn!(error = %e, "failed to persist navigation data");
                }
                let template = nav.selected_template.unwrap_or(TemplateKind::DEFAULT.id());
                (Some(nav.form_data), template)
            }
            None => (self.load_draft(), self.options.default_template),
        };

        match form {
            Some(form) => {
                let document = tally_render::render(&form, template);
                state.template = document.kind();
                state.document = Some(Arc::new(document));
                state.form = Some(form);
                state.phase = Phase::Ready;
                state.needs_measure = true;
                tracing::info!(template = ?state.template, "page ready");
            }
            None => {
                state.reset();
                tracing::info!("no record available, waiting");
            }
        }
        state.phase
    }

    fn load_draft(&self) -> Option<FormData> {
        match self.store.load() {
            Ok(form) => form,
            Err(e @ (StorageError::Corrupt { .. } | StorageError::UnsupportedVersion { .. })) => {
                tracing::warn!(error = %e, "ignoring unreadable draft");
                None
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to read draft");
                None
            }
        }
    }

    /// Switch templates and re-render. Returns `false` when there is no
    /// record to render.
    pub async fn select_template(&self, identifier: u32) -> bool {
        let mut state = self.state.lock().await;
        let Some(form) = state.form.as_ref() else {
            tracing::debug!(identifier, "template selected before load, ignoring");
            return false;
        };

        let document = tally_render::render(form, identifier);
        state.template = document.kind();
        state.document = Some(Arc::new(document));
        state.needs_measure = true;
        tracing::debug!(template = ?state.template, "template selected");
        true
    }

    pub async fn toggle_fit(&self) -> f32 {
        let mut state = self.state.lock().await;
        state.scale.toggle_fit()
    }

    pub async fn set_fit(&self, fit: bool) -> f32 {
        let mut state = self.state.lock().await;
        state.scale.set_fit(fit)
    }

    /// Feed the widths observed after layout. Returns the new scale.
    pub async fn measure(&self, measurement: Measurement) -> f32 {
        let mut state = self.state.lock().await;
        let scale = state.scale.measure(measurement);
        state.needs_measure = false;
        scale
    }

    pub async fn phase(&self) -> Phase {
        self.state.lock().await.phase
    }

    pub async fn template(&self) -> TemplateKind {
        self.state.lock().await.template
    }

    pub async fn form(&self) -> Option<FormData> {
        self.state.lock().await.form.clone()
    }

    /// Template picker entries, or `None` while loading.
    pub async fn picker(&self) -> Option<Vec<TemplateInfo>> {
        let state = self.state.lock().await;
        match state.phase {
            Phase::Loading => None,
            Phase::Ready | Phase::Exporting => Some(templates::picker(state.template)),
        }
    }

    pub async fn preview(&self) -> Option<Preview> {
        let state = self.state.lock().await;
        let document = state.document.clone()?;
        Some(Preview {
            document,
            template: state.template,
            scale: state.scale.scale(),
            fit: state.scale.fit(),
            spacer_height: state.scale.spacer_height(),
            needs_measure: state.needs_measure,
        })
    }

    pub async fn is_download_enabled(&self) -> bool {
        self.phase().await == Phase::Ready
    }

    /// Export the previewed document to PDF and hand it to the sink.
    ///
    /// Only one export runs at a time; a request made while one is running
    /// returns [`DownloadOutcome::AlreadyInFlight`] without side effects.
    pub async fn download_pdf(&self) -> DownloadOutcome {
        let (document, form) = {
            let mut state = self.state.lock().await;
            match state.phase {
                Phase::Exporting => {
                    tracing::debug!("export already in flight");
                    return DownloadOutcome::AlreadyInFlight;
                }
                Phase::Loading => return DownloadOutcome::NotReady,
                Phase::Ready => {}
            }
            let (Some(document), Some(form)) = (state.document.clone(), state.form.clone()) else {
                return DownloadOutcome::NotReady;
            };
            state.phase = Phase::Exporting;
            (document, form)
        };

        let export_id = Uuid::new_v4();
        tracing::info!(%export_id, template = ?document.kind(), "export started");

        let sink = Arc::clone(&self.sink);
        let result = tokio::task::spawn_blocking(move || -> eyre::Result<(PathBuf, usize)> {
            let artifact = tally_export::export_document(&document, &form.view())?;
            let path = sink.deliver(&artifact.file_name, &artifact.bytes)?;
            Ok((path, artifact.page_count))
        })
        .await;

        let outcome = match result {
            Ok(Ok((path, page_count))) => {
                tracing::info!(%export_id, path = %path.display(), page_count, "export finished");
                DownloadOutcome::Saved { path, page_count }
            }
            Ok(Err(e)) => {
                tracing::error!(%export_id, error = %e, "export failed");
                DownloadOutcome::Failed(e.to_string())
            }
            Err(e) => {
                tracing::error!(%export_id, error = %e, "export task aborted");
                DownloadOutcome::Failed(e.to_string())
            }
        };

        let mut state = self.state.lock().await;
        state.phase = Phase::Ready;
        outcome
    }

    /// Send the print version of the current record to `printer`.
    pub async fn print(&self, printer: &dyn Printer) -> eyre::Result<()> {
        let (form, kind) = {
            let state = self.state.lock().await;
            let form = state
                .form
                .clone()
                .ok_or_else(|| eyre::eyre!("nothing to print: no record loaded"))?;
            (form, state.template)
        };

        let html = tally_export::render_print_html(&form, kind.id())?;
        let file_name = naming::export_file_name(&form.view(), kind);
        let name = file_name.strip_suffix(".pdf").unwrap_or(&file_name);
        printer.print(name, &html)?;
        tracing::info!(template = ?kind, "print requested");
        Ok(())
    }

    /// Forget the current record and its persisted draft. Refused while an
    /// export is running.
    pub async fn start_new_document(&self) -> eyre::Result<()> {
        let mut state = self.state.lock().await;
        if state.phase == Phase::Exporting {
            return Err(eyre::eyre!(
                "cannot start a new document while an export is running"
            ));
        }
        self.store.clear()?;
        state.reset();
        tracing::info!("started new document");
        Ok(())
    }
}
