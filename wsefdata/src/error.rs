use crate::keys::{KeyError, ModKey};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Key(#[from] KeyError),
    #[error("Load order line {line}: {source}")]
    LoadOrderEntry {
        line: usize,
        #[source]
        source: KeyError,
    },
    #[error("Overlay file not found: {0}")]
    OverlayNotFound(PathBuf),
    #[error("Overlay file {path} declares name {found}, expected {expected}")]
    NameMismatch {
        path: PathBuf,
        expected: ModKey,
        found: ModKey,
    },
    #[error("Overlay {0} appears more than once in the load order")]
    DuplicateOverlay(ModKey),
    #[error("Overlay {overlay} requires master {master}, which is not loaded before it")]
    MissingMaster { overlay: ModKey, master: ModKey },
}
