//! Declaration schema validation.
//!
//! Applies the field rules to a parsed header and either yields a
//! `SkillDefinition` or the full list of field violations. Validation never
//! stops at the first problem, and a failing package is rejected as a unit.
//! Unknown keys are ignored so the header format can grow without breaking
//! older skills.

use super::parser::ParsedHeader;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

const NAME_MAX_LEN: usize = 64;
const DESCRIPTION_MAX_LEN: usize = 1024;
const COMPATIBILITY_MAX_LEN: usize = 500;

/// A validated skill declaration.
#[derive(Debug, Clone, Serialize)]
pub struct SkillDefinition {
    /// Skill name: 1-64 chars, lowercase alphanumeric groups joined by
    /// single hyphens.
    pub name: String,
    /// What the skill does and when to use it (1-1024 chars).
    pub description: String,
    /// Optional license identifier.
    pub license: Option<String>,
    /// Optional environment requirements (max 500 chars).
    pub compatibility: Option<String>,
    /// Arbitrary extension metadata from the `metadata:` section.
    pub metadata: HashMap<String, String>,
    /// Optional space-delimited pre-approved tool list (experimental).
    pub allowed_tools: Option<String>,
}

/// A single schema violation, tied to the field that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Header key the violation applies to.
    pub field: &'static str,
    /// Human-readable description of the violation.
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed header against the declaration schema.
///
/// Collects every violation before rejecting; on success the whole package
/// is accepted with no substituted defaults.
pub fn validate_header(header: &ParsedHeader) -> Result<SkillDefinition, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = header.fields.get("name").map(|s| s.trim()).unwrap_or_default();
    if name.is_empty() {
        errors.push(FieldError::new("name", "required field is missing or empty"));
    } else {
        check_name(name, &mut errors);
    }

    let description = header.fields.get("description").map(|s| s.trim()).unwrap_or_default();
    if description.is_empty() {
        errors.push(FieldError::new("description", "required field is missing or empty"));
    } else if description.len() > DESCRIPTION_MAX_LEN {
        errors.push(FieldError::new(
            "description",
            format!("exceeds {} characters ({} chars)", DESCRIPTION_MAX_LEN, description.len()),
        ));
    }

    let compatibility = header.fields.get("compatibility").cloned();
    if let Some(ref compat) = compatibility {
        if compat.len() > COMPATIBILITY_MAX_LEN {
            errors.push(FieldError::new(
                "compatibility",
                format!("exceeds {} characters ({} chars)", COMPATIBILITY_MAX_LEN, compat.len()),
            ));
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(SkillDefinition {
        name: name.to_string(),
        description: description.to_string(),
        license: header.fields.get("license").cloned(),
        compatibility,
        metadata: header.metadata.clone(),
        allowed_tools: header.fields.get("allowed-tools").cloned(),
    })
}

/// Check the name pattern: `^[a-z0-9]+(-[a-z0-9]+)*$`, max 64 chars.
/// No uppercase, no leading/trailing hyphen, no consecutive hyphens.
fn check_name(name: &str, errors: &mut Vec<FieldError>) {
    if name.len() > NAME_MAX_LEN {
        errors.push(FieldError::new(
            "name",
            format!("exceeds {} characters ({} chars)", NAME_MAX_LEN, name.len()),
        ));
    }

    for c in name.chars() {
        if !c.is_ascii_lowercase() && !c.is_ascii_digit() && c != '-' {
            errors.push(FieldError::new(
                "name",
                format!("invalid character '{}' (must be lowercase alphanumeric or hyphen)", c),
            ));
            break;
        }
    }

    if name.starts_with('-') || name.ends_with('-') {
        errors.push(FieldError::new("name", "cannot start or end with a hyphen"));
    }

    if name.contains("--") {
        errors.push(FieldError::new("name", "cannot contain consecutive hyphens"));
    }
}
