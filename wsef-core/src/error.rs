use crate::store::StoreError;
use thiserror::Error;
use wsefdata::KeyError;

#[derive(Error, Debug)]
pub enum PatchError {
    #[error("Invalid output overlay name: {0}")]
    OutputName(#[from] KeyError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
