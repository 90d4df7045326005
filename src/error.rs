use std::path::PathBuf;

/// Errors raised while discovering, scanning and reporting.
///
/// Per-file variants ([`ScanError::is_per_file`]) are recorded and the run
/// continues; every other variant aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("cannot read {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("timed out after {secs}s while scanning {}", .path.display())]
    FileTimeout { path: PathBuf, secs: u64 },

    #[error("worker panicked while scanning {}", .path.display())]
    WorkerPanicked { path: PathBuf },

    #[error("invalid license pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid glob pattern `{pattern}`: {source}")]
    Glob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("aggregation failed: {0}")]
    Aggregation(String),

    #[error("cannot write report to {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            ScanError::FileRead { .. } | ScanError::FileTimeout { .. } | ScanError::WorkerPanicked { .. }
        )
    }

    /// Short reason used in the skipped-files listing.
    pub fn reason(&self) -> &'static str {
        match self {
            ScanError::FileRead { .. } => "unreadable",
            ScanError::FileTimeout { .. } => "timeout",
            ScanError::WorkerPanicked { .. } => "worker panic",
            ScanError::InvalidPattern { .. } => "invalid pattern",
            ScanError::Glob { .. } => "invalid glob",
            ScanError::Aggregation(_) => "aggregation",
            ScanError::OutputWrite { .. } => "output",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_file_kinds() {
        let read = ScanError::FileRead {
            path: "a.js".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(read.is_per_file());
        assert!(ScanError::FileTimeout { path: "a.js".into(), secs: 1 }.is_per_file());
        assert!(!ScanError::Aggregation("boom".into()).is_per_file());
    }

    #[test]
    fn test_messages_name_the_file() {
        let err = ScanError::FileTimeout { path: "src/a.js".into(), secs: 30 };
        assert_eq!(err.to_string(), "timed out after 30s while scanning src/a.js");
    }
}
