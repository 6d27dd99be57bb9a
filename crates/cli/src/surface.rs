//! Print surfaces backed by the filesystem and by stdout.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use archive_labels_core::{
    GeneratedBatch, LabelError, PrintContext, PrintSurface, to_identifier_prefix,
};
use tempfile::NamedTempFile;

fn unavailable(reason: String, source: io::Error) -> LabelError {
    LabelError::PrintSurfaceUnavailable {
        reason,
        source: Some(source),
    }
}

/// Writes each print document as a standalone HTML file in a directory.
///
/// Opening the file in a browser runs the document's own print flow. The
/// document is staged in a temporary file next to the target and only
/// replaces an existing document once it has been written completely.
#[derive(Debug, Clone)]
pub(crate) struct DirectorySurface {
    dir: PathBuf,
    file_name: String,
}

impl DirectorySurface {
    /// Target `dir/archive-labels-<YYMMDD>.html` for `batch`.
    pub(crate) fn for_batch(dir: PathBuf, batch: &GeneratedBatch) -> Self {
        Self {
            dir,
            file_name: format!(
                "archive-labels-{}.html",
                to_identifier_prefix(batch.archive_date())
            ),
        }
    }
}

/// An open document file, staged until [`PrintContext::close`].
pub(crate) struct FileContext {
    path: PathBuf,
    writer: BufWriter<NamedTempFile>,
}

impl PrintSurface for DirectorySurface {
    type Context = FileContext;

    fn open(&mut self, title: &str) -> Result<FileContext, LabelError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| unavailable(format!("cannot create {}", self.dir.display()), e))?;
        let path = self.dir.join(&self.file_name);
        let staged = NamedTempFile::new_in(&self.dir)
            .map_err(|e| unavailable(format!("cannot stage {}", path.display()), e))?;
        tracing::debug!(
            path = %path.display(),
            staged = %staged.path().display(),
            title,
            "opened print context"
        );
        Ok(FileContext {
            path,
            writer: BufWriter::new(staged),
        })
    }
}

impl PrintContext for FileContext {
    fn write_document(&mut self, html: &str) -> Result<(), LabelError> {
        self.writer
            .write_all(html.as_bytes())
            .map_err(|e| unavailable(format!("cannot write {}", self.path.display()), e))
    }

    fn close(self) -> Result<String, LabelError> {
        let staged = self.writer.into_inner().map_err(|e| {
            unavailable(format!("cannot write {}", self.path.display()), e.into_error())
        })?;
        staged.persist(&self.path).map_err(|e| {
            unavailable(format!("cannot replace {}", self.path.display()), e.error)
        })?;
        Ok(self.path.display().to_string())
    }
}

/// Streams the print document to stdout for piping into another tool.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct StdoutSurface;

/// Buffered stdout handle.
pub(crate) struct StdoutContext {
    out: BufWriter<io::Stdout>,
}

impl PrintSurface for StdoutSurface {
    type Context = StdoutContext;

    fn open(&mut self, _title: &str) -> Result<StdoutContext, LabelError> {
        Ok(StdoutContext {
            out: BufWriter::new(io::stdout()),
        })
    }
}

impl PrintContext for StdoutContext {
    fn write_document(&mut self, html: &str) -> Result<(), LabelError> {
        self.out
            .write_all(html.as_bytes())
            .map_err(|e| unavailable("cannot write to stdout".into(), e))
    }

    fn close(mut self) -> Result<String, LabelError> {
        self.out
            .flush()
            .map_err(|e| unavailable("cannot write to stdout".into(), e))?;
        Ok("stdout".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use archive_labels_core::{LabelConfig, LabelCount, PrintOutcome, generate, print_batch};
    use chrono::NaiveDate;

    fn batch() -> GeneratedBatch {
        let date = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        generate(date, LabelCount::new(2).unwrap()).unwrap()
    }

    #[test]
    fn directory_surface_writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let batch = batch();
        let mut surface = DirectorySurface::for_batch(dir.path().join("out"), &batch);

        let outcome = print_batch(&mut surface, &batch, &LabelConfig::default());

        let path = dir.path().join("out").join("archive-labels-250305.html");
        assert_eq!(
            outcome,
            PrintOutcome::Printed {
                location: path.display().to_string(),
                pages: 2
            }
        );
        let html = fs::read_to_string(path).unwrap();
        assert!(html.contains("print-barcode-1"));
    }

    #[test]
    fn unclosed_document_leaves_previous_file_intact() {
        let dir = tempfile::tempdir().unwrap();
        let batch = batch();
        let mut surface = DirectorySurface::for_batch(dir.path().to_path_buf(), &batch);
        let target = dir.path().join("archive-labels-250305.html");
        fs::write(&target, "previous document").unwrap();

        let mut ctx = surface.open("Labels").unwrap();
        ctx.write_document("<html>partial").unwrap();
        drop(ctx);

        assert_eq!(fs::read_to_string(&target).unwrap(), "previous document");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn closing_replaces_previous_document() {
        let dir = tempfile::tempdir().unwrap();
        let batch = batch();
        let mut surface = DirectorySurface::for_batch(dir.path().to_path_buf(), &batch);
        let target = dir.path().join("archive-labels-250305.html");
        fs::write(&target, "previous document").unwrap();

        let mut ctx = surface.open("Labels").unwrap();
        ctx.write_document("<html>new</html>").unwrap();
        assert_eq!(ctx.close().unwrap(), target.display().to_string());

        assert_eq!(fs::read_to_string(&target).unwrap(), "<html>new</html>");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn unwritable_directory_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let batch = batch();
        let mut surface = DirectorySurface::for_batch(blocker, &batch);

        let outcome = print_batch(&mut surface, &batch, &LabelConfig::default());

        assert!(matches!(outcome, PrintOutcome::Skipped { .. }));
    }
}
