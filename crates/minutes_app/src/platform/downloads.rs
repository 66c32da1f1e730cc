use std::path::{Path, PathBuf};

use anyhow::Context;
use engine_logging::{engine_info, engine_warn};
use minutes_core::DownloadLink;
use minutes_engine::{AtomicFileWriter, Backend};
use tokio::runtime::Runtime;

/// Saves every linked artifact into `dir`. Individual failures are reported and skipped.
pub(crate) fn download_artifacts(
    runtime: &Runtime,
    backend: &dyn Backend,
    links: &[DownloadLink],
    dir: &Path,
) -> Vec<PathBuf> {
    let writer = AtomicFileWriter::new(dir.to_path_buf());
    let mut saved = Vec::with_capacity(links.len());
    for link in links {
        match download_one(runtime, backend, &writer, link) {
            Ok(path) => {
                engine_info!("Saved {} artifact to {:?}", link.kind.label(), path);
                saved.push(path);
            }
            Err(err) => {
                engine_warn!("Skipping {} artifact: {:#}", link.kind.label(), err);
                eprintln!("warning: could not download {}: {:#}", link.file_name, err);
            }
        }
    }
    saved
}

fn download_one(
    runtime: &Runtime,
    backend: &dyn Backend,
    writer: &AtomicFileWriter,
    link: &DownloadLink,
) -> anyhow::Result<PathBuf> {
    let artifact = runtime
        .block_on(backend.fetch_artifact(&link.file_name))
        .with_context(|| format!("fetching {}", link.href))?;
    let path = writer
        .write(&link.file_name, &artifact.bytes)
        .with_context(|| format!("saving {}", link.file_name))?;
    Ok(path)
}
