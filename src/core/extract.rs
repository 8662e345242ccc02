use once_cell::sync::Lazy;
use regex::Regex;

/// Opening fence (optionally tagged `json`) up to the first closing fence
static FENCED_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)```(?:json)?\s*([\s\S]*?)```").expect("fence pattern is valid")
});

/// A brace-balanced object found in a model response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedBlock(String);

impl ExtractedBlock {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for ExtractedBlock {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Pull a single structured object out of free text
///
/// The first fenced block wins when fences are present. Inside the working
/// text the first `{` is matched against its balancing `}` by depth counting,
/// so braces inside trailing prose never widen the block. Returns `None` for
/// empty input, text without `{`, or an object that never closes.
pub fn extract_json_block(text: &str) -> Option<ExtractedBlock> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let working = match FENCED_BLOCK.captures(trimmed).and_then(|caps| caps.get(1)) {
        Some(inner) => inner.as_str().trim(),
        None => trimmed,
    };

    let start = working.find('{')?;
    let end = matching_brace(working, start)?;

    let candidate = working[start..=end].trim();
    Some(ExtractedBlock(normalize_quotes(candidate)))
}

/// Byte offset of the `}` that brings depth back to zero
fn matching_brace(text: &str, start: usize) -> Option<usize> {
    let mut depth: usize = 0;

    // Braces are ASCII, so byte offsets always land on char boundaries
    for (offset, byte) in text.as_bytes()[start..].iter().enumerate() {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(start + offset);
                }
            }
            _ => {}
        }
    }

    None
}

/// Replace typographic quotes that strict JSON decoders reject
fn normalize_quotes(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2018}' | '\u{2019}' => '\'',
            other => other,
        })
        .collect()
}
