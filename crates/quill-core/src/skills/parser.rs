//! Declaration header parser.
//!
//! Splits a `SKILL.md` into a delimited metadata block and a free-text body,
//! then parses the block with a restricted flat key:value grammar. This is
//! intentionally not YAML: one scalar per line, no lists, no block scalars,
//! no escape sequences. Anything fancier comes through verbatim as a
//! trimmed (and possibly quote-stripped) string. The one extension is a
//! `metadata:` section whose indented `key: value` lines fill a
//! string-to-string map.

use std::collections::HashMap;

/// Result of parsing a declaration header block.
#[derive(Debug, Default, Clone)]
pub struct ParsedHeader {
    /// Top-level key:value pairs. Duplicate keys keep the last occurrence.
    pub fields: HashMap<String, String>,
    /// Pairs collected from the indented `metadata:` section, if any.
    pub metadata: HashMap<String, String>,
    /// Everything after the closing delimiter, verbatim (newline-normalized).
    pub body: String,
}

/// Split content into the header block and body.
///
/// Returns `None` when the content is not a declaration at all: the first
/// line must be a `---` delimiter and a matching closing `---` line must
/// follow. The block excludes both delimiter lines; the body is everything
/// after the closing one.
pub fn split_frontmatter(content: &str) -> Option<(String, String)> {
    let normalized = content.replace("\r\n", "\n");
    let mut lines = normalized.lines();

    if lines.next()?.trim() != "---" {
        return None;
    }

    let mut block_lines = Vec::new();
    let mut found_end = false;
    for line in lines.by_ref() {
        if line.trim() == "---" {
            found_end = true;
            break;
        }
        block_lines.push(line);
    }
    if !found_end {
        return None;
    }

    let body = lines.collect::<Vec<_>>().join("\n");
    Some((block_lines.join("\n"), body))
}

/// Parse a declaration file into header fields and body.
///
/// Returns `None` when the file lacks the delimited header (not a
/// declaration file). Within the block: blank lines and `#` comment lines
/// are skipped, every other line is split at its first colon, key and value
/// are trimmed, and one matching outer pair of single or double quotes is
/// stripped from the value. Lines without a colon are ignored.
pub fn parse_header(content: &str) -> Option<ParsedHeader> {
    let (block, body) = split_frontmatter(content)?;

    let mut parsed = ParsedHeader { body, ..Default::default() };
    let mut in_metadata = false;

    for line in block.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let stripped = line.trim_start();
        if stripped.starts_with('#') {
            continue;
        }

        let indent = line.len() - stripped.len();
        if indent == 0 {
            in_metadata = false;
        }

        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim().to_string();
        let value = strip_quote_pair(value.trim()).to_string();

        if indent == 0 && key == "metadata" && value.is_empty() {
            in_metadata = true;
            continue;
        }

        if in_metadata {
            parsed.metadata.insert(key, value);
        } else {
            parsed.fields.insert(key, value);
        }
    }

    Some(parsed)
}

/// Strip exactly one matching outer pair of `"` or `'` quotes.
fn strip_quote_pair(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        if (first == b'"' || first == b'\'') && bytes[bytes.len() - 1] == first {
            return &value[1..value.len() - 1];
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_header() {
        let content = "---\nname: pdf-processing\ndescription: Extract text from PDFs\n---\n\n# PDF Processing\n\nBody text.";

        let parsed = parse_header(content).unwrap();
        assert_eq!(parsed.fields.get("name").unwrap(), "pdf-processing");
        assert_eq!(parsed.fields.get("description").unwrap(), "Extract text from PDFs");
        assert!(parsed.body.contains("# PDF Processing"));
        assert!(parsed.body.contains("Body text."));
    }

    #[test]
    fn test_missing_opening_delimiter() {
        assert!(parse_header("# Just markdown\n\nNo header here.").is_none());
    }

    #[test]
    fn test_missing_closing_delimiter() {
        let content = "---\nname: unclosed\ndescription: no closing line\n\nBody.";
        assert!(parse_header(content).is_none());
    }

    #[test]
    fn test_double_quotes_stripped_once() {
        let parsed = parse_header("---\nname: \"quoted\"\n---\n").unwrap();
        assert_eq!(parsed.fields.get("name").unwrap(), "quoted");
    }

    #[test]
    fn test_single_quotes_stripped_once() {
        let parsed = parse_header("---\nname: 'quoted'\n---\n").unwrap();
        assert_eq!(parsed.fields.get("name").unwrap(), "quoted");
    }

    #[test]
    fn test_nested_quotes_stripped_exactly_once() {
        let parsed = parse_header("---\ndescription: \"\"double\"\"\n---\n").unwrap();
        assert_eq!(parsed.fields.get("description").unwrap(), "\"double\"");
    }

    #[test]
    fn test_unmatched_quotes_left_alone() {
        let parsed = parse_header("---\ndescription: \"half open\n---\n").unwrap();
        assert_eq!(parsed.fields.get("description").unwrap(), "\"half open");

        let parsed = parse_header("---\ndescription: \"mixed'\n---\n").unwrap();
        assert_eq!(parsed.fields.get("description").unwrap(), "\"mixed'");
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let content = "---\n# a comment\n\nname: commented\n   # indented comment\ndescription: ok\n---\n";
        let parsed = parse_header(content).unwrap();
        assert_eq!(parsed.fields.len(), 2);
        assert_eq!(parsed.fields.get("name").unwrap(), "commented");
    }

    #[test]
    fn test_lines_without_colon_ignored() {
        let content = "---\nname: valid\njust some words\ndescription: ok\n---\n";
        let parsed = parse_header(content).unwrap();
        assert_eq!(parsed.fields.len(), 2);
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let content = "---\nname: first\nname: second\n---\n";
        let parsed = parse_header(content).unwrap();
        assert_eq!(parsed.fields.get("name").unwrap(), "second");
    }

    #[test]
    fn test_value_split_at_first_colon_only() {
        let content = "---\ndescription: usage: run the tool\n---\n";
        let parsed = parse_header(content).unwrap();
        assert_eq!(parsed.fields.get("description").unwrap(), "usage: run the tool");
    }

    #[test]
    fn test_metadata_section_collected() {
        let content = "---\nname: with-meta\nmetadata:\n  author: example-org\n  version: \"1.0\"\ndescription: after the section\n---\n";
        let parsed = parse_header(content).unwrap();

        assert_eq!(parsed.metadata.get("author").unwrap(), "example-org");
        assert_eq!(parsed.metadata.get("version").unwrap(), "1.0");
        // Indent 0 closes the section again.
        assert_eq!(parsed.fields.get("description").unwrap(), "after the section");
        assert!(!parsed.fields.contains_key("author"));
    }

    #[test]
    fn test_crlf_normalized() {
        let content = "---\r\nname: windows\r\ndescription: crlf file\r\n---\r\nBody.\r\n";
        let parsed = parse_header(content).unwrap();
        assert_eq!(parsed.fields.get("name").unwrap(), "windows");
        assert_eq!(parsed.body.trim(), "Body.");
    }

    #[test]
    fn test_empty_block_and_body() {
        let parsed = parse_header("---\n---\n").unwrap();
        assert!(parsed.fields.is_empty());
        assert!(parsed.body.is_empty());
    }

    #[test]
    fn test_list_syntax_preserved_verbatim() {
        // No YAML interpretation: a flow list is just a string.
        let parsed = parse_header("---\nallowed-tools: [read_file, shell]\n---\n").unwrap();
        assert_eq!(parsed.fields.get("allowed-tools").unwrap(), "[read_file, shell]");
    }
}
