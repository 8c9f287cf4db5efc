use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use common::constants::PRAM_SIZE;

use log::{debug, warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Binary file '{}' not found", .0.display())]
    NotFound(PathBuf),

    #[error("Unable to read binary file '{}': {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Raised, but not fatal, when an image doesn't fit in PRAM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Truncation {
    pub original_len: usize,
}

impl fmt::Display for Truncation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Program size ({} bytes) exceeds PRAM size ({PRAM_SIZE} bytes)",
            self.original_len
        )
    }
}

/// A program image, already cut down to fit in PRAM.
#[derive(Debug, Clone)]
pub struct Program {
    name: String,
    bytes: Vec<u8>,
    truncation: Option<Truncation>,
}

impl Program {
    pub fn from_bytes(name: impl Into<String>, mut bytes: Vec<u8>) -> Program {
        let truncation = if bytes.len() > PRAM_SIZE {
            let t = Truncation { original_len: bytes.len() };
            warn!("{t}");
            bytes.truncate(PRAM_SIZE);
            Some(t)
        } else {
            None
        };

        Program {
            name: name.into(),
            bytes,
            truncation,
        }
    }

    // Base name of the file the image came from.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn truncation(&self) -> Option<Truncation> {
        self.truncation
    }
}

pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn load_program(path: &Path) -> Result<Program, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(path.to_owned()),
        _ => LoadError::Unreadable {
            path: path.to_owned(),
            source,
        },
    })?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());

    Ok(Program::from_bytes(base_name(path), bytes))
}
