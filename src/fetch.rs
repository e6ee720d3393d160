//! One-shot HTTP acquisition of an audio file into a scoped temp file.

use std::io;
use std::path::Path;

use tempfile::{Builder, TempPath};
use tracing::{info, warn};

use crate::error::{Error, Result};

/// Handle to a temp file holding a downloaded audio body.
///
/// `cleanup` removes the file and logs a warning if removal fails; dropping
/// the handle without calling it still deletes the file as a silent backstop.
#[derive(Debug)]
pub struct DownloadedAudio {
    path: TempPath,
}

impl DownloadedAudio {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Best-effort removal. Failure is logged, never propagated; a leftover
    /// temp file must not change the program's exit status.
    pub fn cleanup(self) {
        info!("cleaning up downloaded file");
        let path_buf = self.path.to_path_buf();
        match self.path.close() {
            Ok(()) => info!("clean-up complete"),
            Err(e) => warn!(
                path = %path_buf.display(),
                error = %e,
                "failed to remove downloaded file"
            ),
        }
    }
}

/// Issues a blocking streaming GET and copies the body into a fresh temp file
/// whose suffix matches the URL's file extension, so the decoder can sniff
/// the container format later. Any non-2xx status is fatal.
pub fn download(url: &str) -> Result<DownloadedAudio> {
    info!(%url, "downloading");

    let mut response = reqwest::blocking::get(url).map_err(|source| Error::Http {
        url: url.to_owned(),
        source,
    })?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Download {
            url: url.to_owned(),
            status: status.as_u16(),
        });
    }

    let mut file = Builder::new()
        .prefix("pitchplay-")
        .suffix(&url_suffix(url))
        .tempfile()?;
    let bytes = io::copy(&mut response, file.as_file_mut())?;
    info!(bytes, path = %file.path().display(), "download complete");

    Ok(DownloadedAudio {
        path: file.into_temp_path(),
    })
}

/// Extension of the URL's path component, with query and fragment stripped,
/// rendered as a file suffix. Empty when the URL has none.
fn url_suffix(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    match Path::new(path).extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!(".{ext}"),
        None => String::new(),
    }
}
