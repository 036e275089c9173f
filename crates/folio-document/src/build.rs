// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document builder — title page, one page per record in input order, then a
// single hand-off to the serialiser.
//
// A build is blocking work (image decoding, PDF serialisation). In an async
// context use `build_async` or `spawn_build`, which move it onto tokio's
// blocking pool.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use folio_core::error::{FolioError, Result};
use folio_core::{BuildConfig, DocumentSpec};
use sha2::{Digest, Sha256};
use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};

use crate::output::{create_output_file, document_directory, file_stem};
use crate::pdf::compose::PageComposer;
use crate::pdf::page::RenderedPage;
use crate::pdf::writer::{PageSerializer, PdfWriter};

/// What a successful build hands back to its caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutcome {
    /// Where the document was written.
    pub path: PathBuf,
    /// Title page included.
    pub page_count: usize,
    pub byte_len: usize,
    /// Hex SHA-256 of the written bytes.
    pub sha256: String,
}

/// Renders a [`DocumentSpec`] into pages and serialises them.
#[derive(Debug, Clone)]
pub struct DocumentBuilder<S = PdfWriter> {
    composer: PageComposer,
    serializer: S,
}

impl DocumentBuilder<PdfWriter> {
    /// A builder producing PDF with the given configuration.
    pub fn new(config: &BuildConfig) -> Self {
        Self::with_serializer(config, PdfWriter::new())
    }
}

impl Default for DocumentBuilder<PdfWriter> {
    fn default() -> Self {
        Self::new(&BuildConfig::default())
    }
}

impl<S: PageSerializer> DocumentBuilder<S> {
    // -- Construction ---------------------------------------------------------

    pub fn with_serializer(config: &BuildConfig, serializer: S) -> Self {
        Self {
            composer: PageComposer::from_config(config),
            serializer,
        }
    }

    // -- Rendering ------------------------------------------------------------

    /// Render every page of `spec`: the title page as page 1, then record
    /// `i` as page `i + 2`. Records are never reordered, filtered, or merged.
    #[instrument(skip_all, fields(title = %spec.document_title, records = spec.pages.len()))]
    pub fn render_pages(&self, spec: &DocumentSpec) -> Vec<RenderedPage> {
        let mut pages = Vec::with_capacity(spec.page_count());
        pages.push(self.composer.render_title_page(&spec.document_title));

        for (index, record) in spec.pages.iter().enumerate() {
            let page_number = index as u32 + 2;
            pages.push(self.composer.render_content_page(record, page_number));
        }

        pages
    }

    /// Render `spec` and serialise it to bytes.
    #[instrument(skip_all, fields(title = %spec.document_title))]
    pub fn build_document(&self, spec: &DocumentSpec) -> Result<Vec<u8>> {
        let pages = self.render_pages(spec);
        let bytes = self.serializer.serialize(&spec.document_title, &pages)?;
        info!(pages = pages.len(), bytes = bytes.len(), "Document built");
        Ok(bytes)
    }

    // -- File output ----------------------------------------------------------

    /// Build `spec` into `<root>/<title>/PDFs/<title>[ (n)].pdf`.
    ///
    /// The output file is claimed before rendering starts, so concurrent
    /// builds of the same title get distinct paths. A failed build removes
    /// the claimed file.
    #[instrument(skip_all, fields(title = %spec.document_title, root = %root.display()))]
    pub fn build_to_file(&self, spec: &DocumentSpec, root: &Path) -> Result<BuildOutcome> {
        let directory = document_directory(root, &spec.document_title);
        let (path, file) = create_output_file(&directory, &file_stem(&spec.document_title))?;

        let written = self.build_document(spec).and_then(|bytes| {
            write_file(file, &bytes).map_err(|source| FolioError::Write {
                path: path.clone(),
                source,
            })?;
            Ok(bytes)
        });
        let bytes = match written {
            Ok(bytes) => bytes,
            Err(err) => {
                error!(path = %path.display(), %err, "Build failed, discarding output file");
                discard(&path);
                return Err(err);
            }
        };

        let outcome = BuildOutcome {
            page_count: spec.page_count(),
            byte_len: bytes.len(),
            sha256: hex::encode(Sha256::digest(&bytes)),
            path,
        };
        info!(
            path = %outcome.path.display(),
            pages = outcome.page_count,
            sha256 = %outcome.sha256,
            "Document written"
        );
        Ok(outcome)
    }
}

/// Render `spec` to PDF bytes with the default configuration.
pub fn build_document(spec: &DocumentSpec) -> Result<Vec<u8>> {
    DocumentBuilder::new(&BuildConfig::default()).build_document(spec)
}

/// Build to a file on tokio's blocking pool and await the outcome.
pub async fn build_async(spec: DocumentSpec, config: BuildConfig) -> Result<BuildOutcome> {
    tokio::task::spawn_blocking(move || {
        let root = config.output_root();
        DocumentBuilder::new(&config).build_to_file(&spec, &root)
    })
    .await
    .map_err(|err| FolioError::Task(err.to_string()))?
}

/// Start a build on tokio's blocking pool and report through `on_complete`.
///
/// The callback runs exactly once, on the blocking thread, with either the
/// written file or the failure. There is no way to cancel a build in
/// progress; a caller that no longer wants the result should delete the
/// file it reports.
pub fn spawn_build<F>(spec: DocumentSpec, config: BuildConfig, on_complete: F) -> JoinHandle<()>
where
    F: FnOnce(Result<BuildOutcome>) + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let root = config.output_root();
        let result = DocumentBuilder::new(&config).build_to_file(&spec, &root);
        on_complete(result);
    })
}

fn write_file(mut file: File, bytes: &[u8]) -> std::io::Result<()> {
    file.write_all(bytes)?;
    file.sync_all()
}

fn discard(path: &Path) {
    if let Err(err) = std::fs::remove_file(path) {
        if err.kind() != std::io::ErrorKind::NotFound {
            warn!(path = %path.display(), %err, "Could not remove output file");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Barrier, Mutex};

    use folio_core::PageRecord;

    use super::*;
    use crate::pdf::reader::PdfReader;
    use crate::test_support::write_png;

    /// Keeps the pages it is given instead of producing PDF.
    #[derive(Clone, Default)]
    struct CapturingSerializer {
        captured: Arc<Mutex<Vec<(u32, Vec<String>)>>>,
    }

    impl PageSerializer for CapturingSerializer {
        fn serialize(&self, _title: &str, pages: &[RenderedPage]) -> Result<Vec<u8>> {
            let mut captured = self.captured.lock().unwrap();
            for page in pages {
                captured.push((page.number(), page.text_lines().map(String::from).collect()));
            }
            Ok(b"captured".to_vec())
        }
    }

    struct FailingSerializer;

    impl PageSerializer for FailingSerializer {
        fn serialize(&self, _title: &str, _pages: &[RenderedPage]) -> Result<Vec<u8>> {
            Err(FolioError::PdfError("sink unavailable".into()))
        }
    }

    fn trip_log() -> DocumentSpec {
        DocumentSpec::new(
            "Trip Log",
            vec![PageRecord::new("Day 1").with_text("Arrived safely.")],
        )
    }

    #[test]
    fn pages_are_numbered_in_input_order() {
        let spec = DocumentSpec::new(
            "Order",
            vec![
                PageRecord::new("Zulu"),
                PageRecord::new("Alpha"),
                PageRecord::new("Alpha"),
                PageRecord::new("Mike"),
            ],
        );
        let serializer = CapturingSerializer::default();
        let builder = DocumentBuilder::with_serializer(&BuildConfig::default(), serializer.clone());

        let bytes = builder.build_document(&spec).unwrap();
        assert_eq!(bytes, b"captured");

        let captured = serializer.captured.lock().unwrap();
        let numbers: Vec<u32> = captured.iter().map(|(n, _)| *n).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
        let titles: Vec<&str> = captured.iter().map(|(_, lines)| lines[0].as_str()).collect();
        assert_eq!(titles, vec!["Order", "Zulu", "Alpha", "Alpha", "Mike"]);
    }

    #[test]
    fn empty_spec_is_title_page_only() {
        let pages = DocumentBuilder::new(&BuildConfig::default()).render_pages(&DocumentSpec::new("Empty", vec![]));
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].number(), 1);
    }

    #[test]
    fn trip_log_has_two_pages_and_no_image_region() {
        let pages = DocumentBuilder::new(&BuildConfig::default()).render_pages(&trip_log());
        assert_eq!(pages.len(), 2);

        let layout = pages[1].layout();
        assert!(layout.image.is_none());
        let body = layout.body.as_ref().unwrap();
        assert!((body.top - (layout.title.bottom() + 40.0)).abs() < 1e-3);
    }

    #[test]
    fn rendering_twice_gives_identical_layout() {
        let dir = tempfile::tempdir().unwrap();
        let photo = write_png(dir.path(), "p.png", 500, 700);
        let spec = DocumentSpec::new(
            "Twice",
            vec![
                PageRecord::new("With photo").with_image(photo).with_text("caption ".repeat(50)),
                PageRecord::new("Broken photo").with_image(dir.path().join("nope.png")),
            ],
        );
        let builder = DocumentBuilder::new(&BuildConfig::default());

        let first: Vec<_> = builder.render_pages(&spec).iter().map(|p| p.layout().clone()).collect();
        let second: Vec<_> = builder.render_pages(&spec).iter().map(|p| p.layout().clone()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn serializer_failure_fails_the_build_without_a_file() {
        let root = tempfile::tempdir().unwrap();
        let builder = DocumentBuilder::with_serializer(&BuildConfig::default(), FailingSerializer);

        let err = builder.build_to_file(&trip_log(), root.path()).unwrap_err();
        assert!(matches!(err, FolioError::PdfError(_)));

        let dir = document_directory(root.path(), "Trip Log");
        assert_eq!(std::fs::read_dir(dir).unwrap().count(), 0);
    }

    #[test]
    fn build_to_file_writes_a_readable_pdf() {
        let root = tempfile::tempdir().unwrap();
        let outcome = DocumentBuilder::new(&BuildConfig::default())
            .build_to_file(&trip_log(), root.path())
            .unwrap();

        assert_eq!(outcome.path, root.path().join("Trip Log/PDFs/Trip Log.pdf"));
        assert_eq!(outcome.page_count, 2);
        assert_eq!(outcome.sha256.len(), 64);

        let on_disk = std::fs::read(&outcome.path).unwrap();
        assert_eq!(on_disk.len(), outcome.byte_len);
        assert_eq!(PdfReader::from_bytes(&on_disk).unwrap().page_count(), 2);
    }

    #[test]
    fn second_build_does_not_overwrite_the_first() {
        let root = tempfile::tempdir().unwrap();
        let builder = DocumentBuilder::new(&BuildConfig::default());

        let first = builder.build_to_file(&trip_log(), root.path()).unwrap();
        let second = builder.build_to_file(&trip_log(), root.path()).unwrap();

        assert_eq!(first.path.file_name().unwrap(), "Trip Log.pdf");
        assert_eq!(second.path.file_name().unwrap(), "Trip Log (1).pdf");
        assert!(first.path.exists());
    }

    #[test]
    fn concurrent_builds_of_one_title_get_distinct_files() {
        for _ in 0..20 {
            let root = tempfile::tempdir().unwrap();
            let barrier = Arc::new(Barrier::new(2));

            let handles: Vec<_> = (0..2)
                .map(|_| {
                    let barrier = Arc::clone(&barrier);
                    let root = root.path().to_path_buf();
                    std::thread::spawn(move || {
                        let builder = DocumentBuilder::new(&BuildConfig::default());
                        barrier.wait();
                        builder.build_to_file(&trip_log(), &root).unwrap()
                    })
                })
                .collect();
            let outcomes: Vec<BuildOutcome> =
                handles.into_iter().map(|h| h.join().unwrap()).collect();

            assert_ne!(outcomes[0].path, outcomes[1].path);
            for outcome in &outcomes {
                let on_disk = std::fs::read(&outcome.path).unwrap();
                assert_eq!(hex::encode(Sha256::digest(&on_disk)), outcome.sha256);
            }
        }
    }

    #[tokio::test]
    async fn spawn_build_reports_once_through_callback() {
        let root = tempfile::tempdir().unwrap();
        let config = BuildConfig {
            output_root: Some(root.path().to_path_buf()),
            ..BuildConfig::default()
        };
        let (tx, rx) = tokio::sync::oneshot::channel();

        spawn_build(trip_log(), config, move |result| {
            let _ = tx.send(result);
        })
        .await
        .unwrap();

        let outcome = rx.await.unwrap().unwrap();
        assert!(outcome.path.starts_with(root.path()));
        assert_eq!(outcome.page_count, 2);
    }

    #[tokio::test]
    async fn build_async_propagates_directory_failure() {
        let root = tempfile::tempdir().unwrap();
        let blocker = root.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();
        let config = BuildConfig {
            output_root: Some(blocker),
            ..BuildConfig::default()
        };

        let err = build_async(trip_log(), config).await.unwrap_err();
        assert!(matches!(err, FolioError::OutputDir { .. }));
    }
}
