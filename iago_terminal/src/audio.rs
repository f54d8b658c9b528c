//! Best-effort soundtrack for the ending.
//!
//! A missing or unreadable file only produces a warning; the session never
//! fails because of audio.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Soundtrack {
    path: PathBuf,
    player: Option<String>,
}

impl Soundtrack {
    /// Check that the asset exists. Returns `None` (and logs) when it does not.
    pub fn load(path: impl AsRef<Path>, player: Option<String>) -> Option<Self> {
        let path = path.as_ref();
        match std::fs::metadata(path) {
            Ok(meta) if meta.is_file() => {
                info!(path = %path.display(), bytes = meta.len(), "soundtrack ready");
                Some(Self {
                    path: path.to_path_buf(),
                    player,
                })
            }
            Ok(_) => {
                warn!(path = %path.display(), "soundtrack is not a file, audio disabled");
                None
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "soundtrack unavailable, audio disabled");
                None
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Start playback without waiting for it.
    ///
    /// Returns `Ok(false)` when no player command is configured.
    pub fn play(&self) -> io::Result<bool> {
        let Some(player) = &self.player else {
            return Ok(false);
        };
        Command::new(player)
            .arg(&self.path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        Ok(true)
    }
}
