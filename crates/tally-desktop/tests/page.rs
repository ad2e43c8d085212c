use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc, Mutex};

use serde_json::json;
use tally_core::form::FormData;
use tally_core::page::PageSize;
use tally_core::scale::Measurement;
use tally_core::templates::TemplateKind;
use tally_desktop::{
    DownloadOutcome, DownloadSink, FileDownloadSink, HtmlFilePrinter, NavigationState,
    PageOptions, Phase, TemplatePage,
};
use tally_storage::{DraftStore, MemoryDraftStore};

fn widget() -> FormData {
    FormData::from_value(json!({
        "invoice": { "number": "INV-1" },
        "items": [{ "desc": "Widget", "qty": 2, "price": 5 }],
        "total": 10
    }))
    .unwrap()
}

fn gadget() -> FormData {
    FormData::from_value(json!({ "items": [{ "name": "Gadget", "quantity": 1, "amount": 3 }] }))
        .unwrap()
}

fn page_with(store: Arc<dyn DraftStore>, out: &Path) -> TemplatePage {
    TemplatePage::new(
        store,
        Arc::new(FileDownloadSink::new(out)),
        PageOptions::default(),
    )
}

fn files_in(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .map(|entries| entries.map(|e| e.unwrap().path()).collect())
        .unwrap_or_default()
}

/// Blocks inside `deliver` until the test releases it.
struct GatedSink {
    entered: Mutex<mpsc::Sender<()>>,
    release: Mutex<mpsc::Receiver<()>>,
    inner: FileDownloadSink,
}

impl DownloadSink for GatedSink {
    fn deliver(&self, file_name: &str, bytes: &[u8]) -> eyre::Result<PathBuf> {
        self.entered.lock().unwrap().send(()).unwrap();
        self.release.lock().unwrap().recv().unwrap();
        self.inner.deliver(file_name, bytes)
    }
}

struct FailingSink;

impl DownloadSink for FailingSink {
    fn deliver(&self, _file_name: &str, _bytes: &[u8]) -> eyre::Result<PathBuf> {
        Err(eyre::eyre!("disk full"))
    }
}

#[tokio::test]
async fn without_a_record_the_page_keeps_loading() {
    let out = tempfile::tempdir().unwrap();
    let page = page_with(Arc::new(MemoryDraftStore::new()), out.path());

    assert_eq!(page.load(None).await, Phase::Loading);
    assert!(page.picker().await.is_none());
    assert!(page.preview().await.is_none());
    assert!(!page.is_download_enabled().await);
    assert!(!page.select_template(2).await);
    assert_eq!(page.download_pdf().await, DownloadOutcome::NotReady);
    assert!(files_in(out.path()).is_empty());
}

#[tokio::test]
async fn a_corrupt_draft_is_treated_as_absent() {
    let out = tempfile::tempdir().unwrap();
    let store = Arc::new(MemoryDraftStore::with_raw("{\"formData\": oops"));
    let page = page_with(store, out.path());

    assert_eq!(page.load(None).await, Phase::Loading);
    assert!(page.picker().await.is_none());
}

#[tokio::test]
async fn navigation_data_wins_over_the_draft_and_is_persisted() {
    let out = tempfile::tempdir().unwrap();
    let store = Arc::new(MemoryDraftStore::new());
    store.save(&gadget()).unwrap();
    let page = page_with(store.clone(), out.path());

    let phase = page
        .load(Some(NavigationState::new(widget()).with_template(3)))
        .await;
    assert_eq!(phase, Phase::Ready);
    assert_eq!(page.form().await, Some(widget()));
    assert_eq!(page.template().await, TemplateKind::Minimal);
    assert_eq!(store.load().unwrap(), Some(widget()));
}

#[tokio::test]
async fn a_persisted_draft_resumes_with_the_configured_template() {
    let out = tempfile::tempdir().unwrap();
    let store = Arc::new(MemoryDraftStore::new());
    store.save(&gadget()).unwrap();
    let page = TemplatePage::new(
        store,
        Arc::new(FileDownloadSink::new(out.path())),
        PageOptions {
            default_template: 4,
            fit_preview: true,
        },
    );

    assert_eq!(page.load(None).await, Phase::Ready);
    assert_eq!(page.template().await, TemplateKind::Bold);
    let preview = page.preview().await.unwrap();
    assert!(preview.document.contains_text("Gadget"));
}

#[tokio::test]
async fn navigation_without_a_template_uses_the_first_one() {
    let out = tempfile::tempdir().unwrap();
    let page = page_with(Arc::new(MemoryDraftStore::new()), out.path());

    page.load(Some(NavigationState::new(widget()))).await;
    let picker = page.picker().await.unwrap();
    assert_eq!(picker.len(), 6);
    assert!(picker[0].selected);
    assert_eq!(picker.iter().filter(|t| t.selected).count(), 1);
}

#[tokio::test]
async fn unknown_navigation_template_falls_back() {
    let out = tempfile::tempdir().unwrap();
    let page = page_with(Arc::new(MemoryDraftStore::new()), out.path());

    page.load(Some(NavigationState::new(widget()).with_template(42)))
        .await;
    assert_eq!(page.template().await, TemplateKind::Classic);
}

#[tokio::test]
async fn selecting_a_template_rerenders_and_needs_a_new_measurement() {
    let out = tempfile::tempdir().unwrap();
    let page = page_with(Arc::new(MemoryDraftStore::new()), out.path());
    page.load(Some(NavigationState::new(widget()))).await;

    let width = PageSize::A4.width_px();
    assert_eq!(page.measure(Measurement::for_page(width / 2.0, PageSize::A4)).await, 0.5);
    assert!(!page.preview().await.unwrap().needs_measure);

    assert!(page.select_template(6).await);
    assert_eq!(page.phase().await, Phase::Ready);

    let preview = page.preview().await.unwrap();
    assert_eq!(preview.template, TemplateKind::Receipt);
    assert_eq!(preview.document.kind(), TemplateKind::Receipt);
    assert!(preview.needs_measure);
    assert!(preview.document.contains_text("Widget"));

    let picker = page.picker().await.unwrap();
    assert!(picker.iter().any(|t| t.selected && t.identifier == 6));
}

#[tokio::test]
async fn fit_mode_controls_scale_and_spacer() {
    let out = tempfile::tempdir().unwrap();
    let page = page_with(Arc::new(MemoryDraftStore::new()), out.path());
    page.load(Some(NavigationState::new(widget()))).await;

    let a4 = PageSize::A4;
    page.measure(Measurement::for_page(a4.width_px() / 2.0, a4)).await;
    let preview = page.preview().await.unwrap();
    assert!(preview.fit);
    assert_eq!(preview.scale, 0.5);
    assert_eq!(preview.spacer_height, Some(a4.height_px() * 0.5));

    assert_eq!(page.toggle_fit().await, 1.0);
    let preview = page.preview().await.unwrap();
    assert!(!preview.fit);
    assert_eq!(preview.spacer_height, None);

    assert_eq!(page.set_fit(true).await, 0.5);
    assert_eq!(page.measure(Measurement::for_page(a4.width_px() * 3.0, a4)).await, 1.0);
}

#[tokio::test]
async fn download_writes_the_previewed_document() {
    let out = tempfile::tempdir().unwrap();
    let page = page_with(Arc::new(MemoryDraftStore::new()), out.path());
    page.load(Some(NavigationState::new(widget()))).await;
    let expected_pages = page.preview().await.unwrap().document.page_count();

    match page.download_pdf().await {
        DownloadOutcome::Saved { path, page_count } => {
            assert_eq!(path, out.path().join("invoice-inv-1.pdf"));
            assert_eq!(page_count, expected_pages);
            assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
        }
        other => panic!("expected a saved file, got {other:?}"),
    }
    assert_eq!(page.phase().await, Phase::Ready);
    assert_eq!(files_in(out.path()).len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn a_second_download_during_export_is_ignored() {
    let out = tempfile::tempdir().unwrap();
    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();
    let sink = Arc::new(GatedSink {
        entered: Mutex::new(entered_tx),
        release: Mutex::new(release_rx),
        inner: FileDownloadSink::new(out.path()),
    });
    let page = TemplatePage::new(Arc::new(MemoryDraftStore::new()), sink, PageOptions::default());
    page.load(Some(NavigationState::new(widget()))).await;

    let first = tokio::spawn({
        let page = page.clone();
        async move { page.download_pdf().await }
    });
    tokio::task::spawn_blocking(move || entered_rx.recv())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(page.phase().await, Phase::Exporting);
    assert!(!page.is_download_enabled().await);
    assert!(page.picker().await.is_some());
    assert_eq!(page.download_pdf().await, DownloadOutcome::AlreadyInFlight);

    release_tx.send(()).unwrap();
    assert!(matches!(first.await.unwrap(), DownloadOutcome::Saved { .. }));
    assert_eq!(page.phase().await, Phase::Ready);
    assert!(page.is_download_enabled().await);
    assert_eq!(files_in(out.path()).len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn the_page_cannot_be_reset_under_a_running_export() {
    let out = tempfile::tempdir().unwrap();
    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();
    let sink = Arc::new(GatedSink {
        entered: Mutex::new(entered_tx),
        release: Mutex::new(release_rx),
        inner: FileDownloadSink::new(out.path()),
    });
    let store = Arc::new(MemoryDraftStore::new());
    let page = TemplatePage::new(store.clone(), sink, PageOptions::default());
    page.load(Some(NavigationState::new(widget()))).await;

    let first = tokio::spawn({
        let page = page.clone();
        async move { page.download_pdf().await }
    });
    let entered_rx = tokio::task::spawn_blocking(move || {
        entered_rx.recv().unwrap();
        entered_rx
    })
    .await
    .unwrap();

    assert!(page.start_new_document().await.is_err());
    assert!(store.has_draft());
    assert_eq!(
        page.load(Some(NavigationState::new(gadget()))).await,
        Phase::Exporting
    );
    assert_eq!(page.download_pdf().await, DownloadOutcome::AlreadyInFlight);
    assert_eq!(page.phase().await, Phase::Exporting);

    release_tx.send(()).unwrap();
    assert!(matches!(first.await.unwrap(), DownloadOutcome::Saved { .. }));
    assert!(entered_rx.try_recv().is_err());
    assert_eq!(page.phase().await, Phase::Ready);
    assert_eq!(page.form().await, Some(widget()));
    assert_eq!(files_in(out.path()).len(), 1);

    page.start_new_document().await.unwrap();
    assert!(!store.has_draft());
}

#[tokio::test]
async fn a_failed_export_returns_to_ready() {
    let page = TemplatePage::new(
        Arc::new(MemoryDraftStore::new()),
        Arc::new(FailingSink),
        PageOptions::default(),
    );
    page.load(Some(NavigationState::new(widget()))).await;

    match page.download_pdf().await {
        DownloadOutcome::Failed(reason) => assert!(reason.contains("disk full")),
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(page.phase().await, Phase::Ready);
    assert!(page.is_download_enabled().await);
}

#[tokio::test]
async fn starting_a_new_document_forgets_the_draft() {
    let out = tempfile::tempdir().unwrap();
    let store = Arc::new(MemoryDraftStore::new());
    let page = page_with(store.clone(), out.path());
    page.load(Some(NavigationState::new(widget()))).await;
    assert!(store.has_draft());

    page.start_new_document().await.unwrap();
    assert!(!store.has_draft());
    assert_eq!(page.phase().await, Phase::Loading);
    assert!(page.preview().await.is_none());

    assert_eq!(page.load(None).await, Phase::Loading);
}

#[tokio::test]
async fn print_writes_the_print_page() {
    let out = tempfile::tempdir().unwrap();
    let page = page_with(Arc::new(MemoryDraftStore::new()), out.path());
    let printer = HtmlFilePrinter::new(out.path());

    assert!(page.print(&printer).await.is_err());

    page.load(Some(NavigationState::new(widget()))).await;
    page.print(&printer).await.unwrap();

    let html = std::fs::read_to_string(printer.path_for("invoice-inv-1")).unwrap();
    assert!(html.contains("Widget"));
}
