use std::path::PathBuf;
use thiserror::Error;

pub type ImportCaseResult<T, E = ImportCaseError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ImportCaseError {
  #[error("cannot read {}: {source}", .path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("cannot write {}: {source}", .path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("walk error: {0}")]
  Walk(#[from] ignore::Error),

  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error("config parse error: {0}")]
  ConfigParse(#[from] toml::de::Error),

  #[error("config serialize error: {0}")]
  ConfigSerialize(#[from] toml::ser::Error),

  #[error("regex error: {0}")]
  Regex(#[from] regex::Error),

  #[error("root is not a directory: {}", .0.display())]
  InvalidRoot(PathBuf),

  #[error("{0} file(s) have imports that need lowercasing")]
  PendingRewrites(usize),

  #[error("{0} file(s) failed")]
  FailedFiles(usize),

  #[error("other: {0}")]
  Other(String),
}

impl From<&str> for ImportCaseError {
  fn from(msg: &str) -> Self {
    ImportCaseError::Other(msg.to_owned())
  }
}
