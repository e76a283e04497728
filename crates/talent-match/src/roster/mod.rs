//! CSV roster import with per-source column remapping.

mod parser;

use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::matching::Candidate;

/// Origin of a roster file; decides the column layout and rating scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RosterSource {
    Standard,
    Marketplace,
}

impl RosterSource {
    pub const fn label(self) -> &'static str {
        match self {
            RosterSource::Standard => "standard",
            RosterSource::Marketplace => "marketplace",
        }
    }

    /// Upper bound of the rating column for this source.
    pub const fn rating_scale(self) -> f64 {
        match self {
            RosterSource::Standard => 5.0,
            RosterSource::Marketplace => 100.0,
        }
    }
}

impl fmt::Display for RosterSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RosterSource {
    type Err = RosterImportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "marketplace" => Ok(Self::Marketplace),
            other => Err(RosterImportError::UnknownSource(other.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum RosterImportError {
    #[error("failed to open roster {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid roster CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("unknown roster source '{0}', expected standard or marketplace")]
    UnknownSource(String),
}

/// A data row that could not be turned into a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowRejection {
    /// 1-based line number in the file, header included.
    pub line: u64,
    pub reason: String,
}

/// Result of one import: accepted candidates in file order plus rejected rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RosterImport {
    pub candidates: Vec<Candidate>,
    pub rejected: Vec<RowRejection>,
}

pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        source: RosterSource,
    ) -> Result<RosterImport, RosterImportError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| RosterImportError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file, source)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        source: RosterSource,
    ) -> Result<RosterImport, RosterImportError> {
        let mut import = RosterImport::default();

        for row in parser::parse_rows(reader, source)? {
            match row.outcome {
                Ok(candidate) => import.candidates.push(candidate),
                Err(reason) => {
                    warn!(line = row.line, %reason, "skipping roster row");
                    import.rejected.push(RowRejection {
                        line: row.line,
                        reason,
                    });
                }
            }
        }

        info!(
            source = %source,
            candidates = import.candidates.len(),
            rejected = import.rejected.len(),
            "roster imported"
        );
        Ok(import)
    }
}
