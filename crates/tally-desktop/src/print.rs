use std::path::PathBuf;

use crate::sink::write_atomic;

/// Native print capability of the host.
pub trait Printer: Send + Sync {
    /// Print a self-contained HTML page. `name` is a file-name stem.
    fn print(&self, name: &str, html: &str) -> eyre::Result<()>;
}

/// Leaves the print page on disk for the host browser to open and print.
#[derive(Debug, Clone)]
pub struct HtmlFilePrinter {
    dir: PathBuf,
}

impl HtmlFilePrinter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.html"))
    }
}

impl Printer for HtmlFilePrinter {
    fn print(&self, name: &str, html: &str) -> eyre::Result<()> {
        let path = write_atomic(&self.dir, &format!("{name}.html"), html.as_bytes())?;
        tracing::info!(path = %path.display(), "print page written");
        Ok(())
    }
}
