use tally_desktop::{DownloadSink, FileDownloadSink};

#[test]
fn delivered_files_replace_same_named_ones() {
    let dir = tempfile::tempdir().unwrap();
    let sink = FileDownloadSink::new(dir.path());

    sink.deliver("invoice.pdf", b"first").unwrap();
    let path = sink.deliver("invoice.pdf", b"second").unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), b"second");
    let names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("invoice.pdf")]);
}

#[test]
fn output_directory_is_created_on_demand() {
    let dir = tempfile::tempdir().unwrap();
    let sink = FileDownloadSink::new(dir.path().join("nested").join("out"));
    let path = sink.deliver("receipt.pdf", b"%PDF").unwrap();
    assert!(path.exists());
}

#[test]
fn names_with_path_components_are_refused() {
    let dir = tempfile::tempdir().unwrap();
    let sink = FileDownloadSink::new(dir.path().join("out"));
    assert!(sink.deliver("../escape.pdf", b"x").is_err());
    assert!(!dir.path().join("escape.pdf").exists());
}

#[test]
fn a_failed_delivery_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"").unwrap();

    let sink = FileDownloadSink::new(&blocker);
    assert!(sink.deliver("invoice.pdf", b"%PDF").is_err());
    assert!(!blocker.join("invoice.pdf").exists());
}
