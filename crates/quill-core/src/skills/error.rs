//! Per-package failure reasons.
//!
//! Every variant is recovered at the per-package isolation boundary: logged
//! (except cancellation) and converted into "this package is excluded".
//! Nothing here ever aborts a batch.

use super::validator::FieldError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SkillError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file does not carry a delimited declaration header at all.
    #[error("{} is not a skill declaration (missing `---` header)", .path.display())]
    NotADeclaration { path: PathBuf },

    /// The header was parseable but violates the schema. Carries every
    /// field-level violation, not just the first.
    #[error("invalid skill declaration {}: {}", .path.display(), format_violations(.errors))]
    Validation { path: PathBuf, errors: Vec<FieldError> },

    /// The load was cancelled mid-flight. Not a failure; kept as its own
    /// variant so it is never logged as one.
    #[error("skill load cancelled")]
    Cancelled,
}

fn format_violations(errors: &[FieldError]) -> String {
    errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; ")
}
