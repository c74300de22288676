//! Plain text article storage
//!
//! One UTF-8 file per accepted article, no header or metadata. Articles have
//! no usable identifier, so each file is named after a timestamp key.

use anyhow::{Context, Result};
use chrono::Utc;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Shared by every writer in the process so keys never repeat
static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Attempts before giving up on finding a free file name
const MAX_KEY_ATTEMPTS: usize = 16;

/// Writes article bodies as `{output_dir}/{key}.txt`
#[derive(Debug, Clone)]
pub struct TextWriter {
    output_dir: PathBuf,
}

impl TextWriter {
    /// Create a writer, creating `output_dir` if it does not exist
    ///
    /// # Example
    /// ```no_run
    /// use naver_corpus::storage::TextWriter;
    /// use std::path::Path;
    ///
    /// let writer = TextWriter::new(Path::new("./20240101")).unwrap();
    /// let path = writer.save("오늘 비가 온다.").unwrap();
    /// println!("Saved to: {:?}", path);
    /// ```
    pub fn new(output_dir: &Path) -> Result<Self> {
        fs::create_dir_all(output_dir).with_context(|| {
            format!("Failed to create output directory: {}", output_dir.display())
        })?;

        Ok(Self {
            output_dir: output_dir.to_path_buf(),
        })
    }

    /// Save one article body under a fresh key
    ///
    /// Existing files are never overwritten.
    pub fn save(&self, text: &str) -> Result<PathBuf> {
        for _ in 0..MAX_KEY_ATTEMPTS {
            let filepath = self.output_dir.join(format!("{}.txt", unique_key()));

            let file = match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&filepath)
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(e).with_context(|| {
                        format!("Failed to create file: {}", filepath.display())
                    })
                }
            };

            write_body(file, &filepath, text)?;

            tracing::debug!(path = %filepath.display(), bytes = text.len(), "Saved article");
            return Ok(filepath);
        }

        anyhow::bail!(
            "No free file name in {} after {MAX_KEY_ATTEMPTS} attempts",
            self.output_dir.display()
        )
    }

    /// Get output directory
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

/// Write `text` to a freshly created file, removing the file if the write fails
fn write_body(mut out: impl Write, path: &Path, text: &str) -> Result<()> {
    let written = out.write_all(text.as_bytes()).and_then(|()| out.flush());
    if let Err(e) = written {
        drop(out);
        if let Err(rm) = fs::remove_file(path) {
            tracing::warn!(path = %path.display(), error = %rm, "Failed to remove partial file");
        }
        return Err(e).with_context(|| format!("Failed to write to file: {}", path.display()));
    }
    Ok(())
}

/// Microsecond timestamp plus a process-wide sequence number
///
/// The timestamp keeps keys roughly in write order; the sequence keeps
/// writes within the same microsecond apart.
pub fn unique_key() -> String {
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{}_{seq:06}", Utc::now().format("%Y%m%d%H%M%S%6f"))
}
