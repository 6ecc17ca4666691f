use std::io;
use std::path::Path;

use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::errors::{AppError, AppResult};
use crate::pipeline::Progress;
use crate::types::{LogPayload, OutputTarget, PodRef};

/// Write `payload` to `<directory>/<pod>.log`, creating the directory if
/// needed. An existing file is truncated.
pub async fn write_log(
    payload: &LogPayload,
    pod: &PodRef,
    directory: &Path,
    progress: &Progress,
) -> AppResult<OutputTarget> {
    progress.report(format_args!(
        "Writing files to directory {}",
        directory.display()
    ));

    let file = directory.join(pod.file_name());
    let write_error = |source: io::Error| AppError::LogWrite {
        pod: pod.name.clone(),
        path: file.clone(),
        source,
    };

    ensure_dir(directory).await.map_err(|source| AppError::LogWrite {
        pod: pod.name.clone(),
        path: directory.to_path_buf(),
        source,
    })?;

    let mut out = fs::File::create(&file).await.map_err(write_error)?;
    out.write_all(&payload.bytes).await.map_err(write_error)?;
    out.flush().await.map_err(write_error)?;

    progress.report(format_args!("Created file {}", file.display()));

    Ok(OutputTarget {
        directory: directory.to_path_buf(),
        file,
    })
}

/// Idempotent; concurrent callers racing on the same path all succeed.
async fn ensure_dir(directory: &Path) -> io::Result<()> {
    match fs::metadata(directory).await {
        Ok(meta) if meta.is_dir() => return Ok(()),
        Ok(_) => {
            return Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                "path exists and is not a directory",
            ));
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    fs::create_dir_all(directory).await
}
