use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use super::domain::{CreatorId, CreatorProfile};

/// Storage abstraction for the creator roster; callers always receive the full table.
pub trait CreatorRepository: Send + Sync {
    fn all(&self) -> Result<Vec<CreatorProfile>, RepositoryError>;
}

/// Error enumeration for roster store failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("creator store unavailable: {0}")]
    Unavailable(String),
    #[error("creator store returned corrupt data: {0}")]
    Corrupt(String),
}

/// Failure while reading a roster export.
#[derive(Debug)]
pub enum RosterError {
    Io(std::io::Error),
    Json(serde_json::Error),
    DuplicateId(CreatorId),
}

impl std::fmt::Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterError::Io(err) => write!(f, "failed to read creator roster: {}", err),
            RosterError::Json(err) => write!(f, "invalid creator roster JSON: {}", err),
            RosterError::DuplicateId(id) => write!(f, "creator id {} appears more than once", id),
        }
    }
}

impl std::error::Error for RosterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterError::Io(err) => Some(err),
            RosterError::Json(err) => Some(err),
            RosterError::DuplicateId(_) => None,
        }
    }
}

impl From<std::io::Error> for RosterError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for RosterError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Loader for roster seed files: a JSON array of creator documents.
pub struct CreatorRoster;

impl CreatorRoster {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<CreatorProfile>, RosterError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<CreatorProfile>, RosterError> {
        let creators: Vec<CreatorProfile> = serde_json::from_reader(reader)?;

        let mut seen = HashSet::new();
        for creator in &creators {
            if !seen.insert(&creator.id) {
                return Err(RosterError::DuplicateId(creator.id.clone()));
            }
        }

        Ok(creators)
    }
}
