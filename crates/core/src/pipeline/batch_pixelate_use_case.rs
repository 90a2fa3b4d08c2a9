use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::pipeline::pixelate_image_use_case::PixelateImageUseCase;

pub const DEFAULT_WORKERS: usize = 4;

/// Outcome of one batch run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub failed: usize,
}

/// Builds one single-image pipeline per worker thread.
pub type UseCaseFactory = Box<dyn Fn() -> PixelateImageUseCase + Send + Sync>;

/// Redacts a directory of images, mirroring relative paths into an output
/// directory.
///
/// Hidden files (leading dot) are skipped, extensions are matched
/// case-insensitively against the connector's supported list, and each
/// image runs on a bounded worker pool so concurrent outbound detection
/// calls stay capped. A failing image is logged and counted but never
/// takes the batch down with it.
pub struct BatchPixelateUseCase {
    factory: UseCaseFactory,
    extensions: Vec<String>,
    workers: usize,
}

impl BatchPixelateUseCase {
    pub fn new(factory: UseCaseFactory, extensions: &[&str], workers: usize) -> Self {
        Self {
            factory,
            extensions: extensions.iter().map(|e| e.to_ascii_lowercase()).collect(),
            workers: workers.max(1),
        }
    }

    pub fn execute(
        &self,
        input_dir: &Path,
        output_dir: &Path,
        recursive: bool,
    ) -> Result<BatchSummary, Box<dyn std::error::Error>> {
        let files = collect_image_files(input_dir, &self.extensions, recursive)?;
        log::info!(
            "pixelating {} images from {} into {}",
            files.len(),
            input_dir.display(),
            output_dir.display()
        );

        let (task_tx, task_rx) = crossbeam_channel::unbounded::<PathBuf>();
        let (done_tx, done_rx) =
            crossbeam_channel::unbounded::<(PathBuf, Result<(), String>)>();
        for rel in files {
            task_tx.send(rel)?;
        }
        drop(task_tx);

        std::thread::scope(|scope| {
            for _ in 0..self.workers {
                let task_rx = task_rx.clone();
                let done_tx = done_tx.clone();
                let factory = &self.factory;
                scope.spawn(move || {
                    let mut use_case = factory();
                    for rel in task_rx.iter() {
                        let result = use_case
                            .execute(&input_dir.join(&rel), &output_dir.join(&rel))
                            .map_err(|e| e.to_string());
                        if done_tx.send((rel, result)).is_err() {
                            break;
                        }
                    }
                });
            }
        });
        drop(done_tx);

        let mut summary = BatchSummary {
            processed: 0,
            failed: 0,
        };
        for (rel, result) in done_rx.iter() {
            match result {
                Ok(()) => summary.processed += 1,
                Err(e) => {
                    log::error!("failed to pixelate {}: {e}", rel.display());
                    summary.failed += 1;
                }
            }
        }
        Ok(summary)
    }
}

/// Relative paths of processable images under `root`.
fn collect_image_files(
    root: &Path,
    extensions: &[String],
    recursive: bool,
) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    visit(root, PathBuf::new(), extensions, recursive, &mut files)?;
    Ok(files)
}

fn visit(
    root: &Path,
    rel: PathBuf,
    extensions: &[String],
    recursive: bool,
    out: &mut Vec<PathBuf>,
) -> io::Result<()> {
    for entry in fs::read_dir(root.join(&rel))? {
        let entry = entry?;
        let name = entry.file_name();
        if name.to_string_lossy().starts_with('.') {
            continue;
        }
        let child = rel.join(&name);
        if entry.file_type()?.is_dir() {
            if recursive {
                visit(root, child, extensions, recursive, out)?;
            }
        } else if has_allowed_extension(&child, extensions) {
            out.push(child);
        }
    }
    Ok(())
}

fn has_allowed_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase)
        .map_or(false, |ext| extensions.iter().any(|e| *e == ext))
}
