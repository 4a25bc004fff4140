//! Repository coordinates (`owner/name`).

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("[Metadata] Malformed repository metadata")]
pub struct MetadataError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryMetadata {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepositoryMetadata {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (owner, name) = s.trim().split_once('/').ok_or(MetadataError)?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(MetadataError);
        }
        Ok(Self {
            owner: owner.to_owned(),
            name: name.to_owned(),
        })
    }
}

impl fmt::Display for RepositoryMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
