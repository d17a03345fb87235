//! Sequential batch loop: one file at a time, failures recorded and skipped.

use std::path::{Path, PathBuf};

use crate::context::GeneratorSet;
use crate::error::GenError;
use crate::output::{resolve_filename, resolve_output_path};
use crate::ports::{FileGenerator, FileTarget};
use crate::request::GenerationRequest;
use crate::size::format_size;

/// Outcome of a batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Files written, with their size on disk.
    pub generated: Vec<(PathBuf, u64)>,
    /// Files that failed, with the error message.
    pub failed: Vec<(PathBuf, String)>,
}

/// Generate `request.count` files into `out_dir`.
///
/// A failing file is reported and the loop moves on to the next index.
pub async fn generate_all(
    request: &GenerationRequest,
    out_dir: &Path,
    generators: &GeneratorSet,
) -> BatchReport {
    let kind = request.kind();
    let generator = generators.for_kind(kind);
    if kind.is_image() {
        log::info!("Size {} is ignored for images", request.size_bytes);
    }
    log::debug!("Dispatching .{} files as {kind:?}", request.extension);

    let mut report = BatchReport::default();
    for index in 1..=request.count {
        let filename = resolve_filename(&request.filename_template, index, request.count);
        let target = FileTarget {
            path: resolve_output_path(out_dir, &filename, &request.extension),
            extension: request.extension.clone(),
            size_bytes: request.size_bytes,
            dimensions: request.image_dimensions,
        };

        eprintln!("Generating {} ({}/{})", target.path.display(), index, request.count);
        match generate_one(generator, &target).await {
            Ok(len) => {
                eprintln!("Saved: {} ({len} bytes, {})", target.path.display(), format_size(len));
                report.generated.push((target.path, len));
            }
            Err(e) => {
                eprintln!("Failed: {}: {e}", target.path.display());
                report.failed.push((target.path, e.to_string()));
            }
        }
    }
    report
}

async fn generate_one(generator: &dyn FileGenerator, target: &FileTarget) -> Result<u64, GenError> {
    generator.generate(target).await?;
    let metadata = tokio::fs::metadata(&target.path).await?;
    Ok(metadata.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::image::ImageFileGenerator;
    use crate::adapters::raw::RawFileGenerator;
    use crate::adapters::spreadsheet::SpreadsheetFileGenerator;
    use crate::ports::GenerateFuture;
    use crate::request::ImageDimensions;

    /// Delegates to the raw writer but fails for one file name.
    struct FailingOn {
        file_name: &'static str,
        inner: RawFileGenerator,
    }

    impl FileGenerator for FailingOn {
        fn generate(&self, target: &FileTarget) -> GenerateFuture<'_> {
            if target.path.file_name().is_some_and(|n| n == self.file_name) {
                return Box::pin(async { Err::<(), _>(GenError::Encoding("boom".into())) });
            }
            self.inner.generate(target)
        }
    }

    fn live_set() -> GeneratorSet {
        GeneratorSet {
            raw: Box::new(RawFileGenerator::new(1024)),
            image: Box::new(ImageFileGenerator),
            spreadsheet: Box::new(SpreadsheetFileGenerator),
        }
    }

    fn request(extension: &str, template: &str, count: u32) -> GenerationRequest {
        GenerationRequest {
            extension: extension.into(),
            size_bytes: 3000,
            filename_template: template.into(),
            count,
            image_dimensions: None,
        }
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn sorted_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<_> = std::fs::read_dir(dir)
            .unwrap()
            .flatten()
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn creates_numbered_files() {
        let dir = scratch_dir("dummygen_orch_numbered_test");

        let report = generate_all(&request("bin", "dummy{n}", 3), &dir, &live_set()).await;

        assert_eq!(sorted_names(&dir), vec!["dummy1.bin", "dummy2.bin", "dummy3.bin"]);
        assert_eq!(report.generated.len(), 3);
        assert!(report.generated.iter().all(|(_, len)| *len == 3000));
        assert!(report.failed.is_empty());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn failure_does_not_stop_the_batch() {
        let dir = scratch_dir("dummygen_orch_failure_test");
        let generators = GeneratorSet {
            raw: Box::new(FailingOn { file_name: "dummy2.bin", inner: RawFileGenerator::new(512) }),
            ..live_set()
        };

        let report = generate_all(&request("bin", "dummy{n}", 3), &dir, &generators).await;

        assert_eq!(sorted_names(&dir), vec!["dummy1.bin", "dummy3.bin"]);
        assert_eq!(report.generated.len(), 2);
        assert_eq!(report.failed.len(), 1);
        assert!(report.failed[0].0.ends_with("dummy2.bin"));
        assert!(report.failed[0].1.contains("boom"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn appends_suffix_without_placeholder() {
        let dir = scratch_dir("dummygen_orch_suffix_test");

        generate_all(&request("txt", "notes", 2), &dir, &live_set()).await;

        assert_eq!(sorted_names(&dir), vec!["notes-1.txt", "notes-2.txt"]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn dispatches_images() {
        let dir = scratch_dir("dummygen_orch_image_test");
        let request = GenerationRequest {
            image_dimensions: Some(ImageDimensions { width: 5, height: 6 }),
            ..request("png", "pic{n}", 1)
        };

        let report = generate_all(&request, &dir, &live_set()).await;

        assert!(report.failed.is_empty());
        let img = image::open(dir.join("pic1.png")).unwrap();
        assert_eq!((img.width(), img.height()), (5, 6));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn dispatches_spreadsheets() {
        let dir = scratch_dir("dummygen_orch_xlsx_test");

        let report = generate_all(&request("xlsx", "book", 1), &dir, &live_set()).await;

        assert!(report.failed.is_empty());
        let data = std::fs::read(dir.join("book.xlsx")).unwrap();
        assert_eq!(&data[..2], b"PK");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn missing_output_dir_fails_every_file() {
        let dir = std::env::temp_dir().join("dummygen_orch_missing_dir_test/does/not/exist");

        let report = generate_all(&request("bin", "x{n}", 2), &dir, &live_set()).await;

        assert!(report.generated.is_empty());
        assert_eq!(report.failed.len(), 2);
    }
}
