//! Front-matter extraction for meeting notes.
//!
//! A note opens with a YAML block fenced by `---`. The closing fence may also be
//! `...`. Anything after the block is the free-form body, which the indexer ignores.

use serde_yaml::Value;

use crate::error::Result;
use crate::model::Metadata;

/// Split the raw header block off `input`.
///
/// Returns `None` when the document does not open with a fence, when the fence is
/// never closed, or when the block is empty.
pub fn split_header(input: &str) -> Option<&str> {
    let input = input.trim_start_matches('\u{feff}');
    let mut offset = 0;
    let mut lines = input.split_inclusive('\n');

    let first = lines.next()?;
    if first.trim_end() != "---" {
        return None;
    }
    offset += first.len();
    let start = offset;

    for line in lines {
        let trimmed = line.trim_end();
        if trimmed == "---" || trimmed == "..." {
            let block = &input[start..offset];
            return if block.trim().is_empty() {
                None
            } else {
                Some(block)
            };
        }
        offset += line.len();
    }
    None
}

/// Parse the front matter of `input` into [`Metadata`].
///
/// `Ok(None)` means the document carries no usable header: no block at all, an
/// empty block, or a block whose top level is not a mapping. Malformed YAML is an
/// error so the caller can report the offending file.
pub fn parse(input: &str) -> Result<Option<Metadata>> {
    let Some(block) = split_header(input) else {
        return Ok(None);
    };
    let value: Value = serde_yaml::from_str(block)?;
    match value {
        Value::Mapping(mapping) => Ok(Some(Metadata::from_yaml_mapping(&mapping))),
        _ => Ok(None),
    }
}
