//! CLI Error Types

use derive_more::{Display, Error};
use std::path::PathBuf;

pub type Error = exn::Exn<ErrorKind>;
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    #[display("invalid configuration")]
    Config,
    #[display("could not open cache directory {}", _0.display())]
    Storage(#[error(not(source))] PathBuf),
    #[display("cache synchronization failed")]
    Sync,
    #[display("could not assemble the dataset")]
    Dataset,
    #[display("could not write {}", _0.display())]
    Output(#[error(not(source))] PathBuf),
}
