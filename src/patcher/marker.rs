//! Split Point Detection
//!
//! Finds where the duplicated combo section begins so everything from there
//! on can be discarded.

use std::sync::LazyLock;

use regex::Regex;

use super::template::GET_ALL_REGISTRATION;

/// Separator banner around a comment mentioning COMBO
const BANNER_PATTERN: &str = r"(?i)// ={30,}\s*\n// .*COMBO.*\n// ={30,}";

/// Lines dropped before the `combos:getAll` registration when no banner is found.
///
/// Counts `\n`-separated segments, so when the registration starts a line the
/// empty segment in front of it is one of the ten.
pub const FALLBACK_TRIM_LINES: usize = 10;

static BANNER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(BANNER_PATTERN).expect("banner pattern is valid"));

/// Where the kept prefix of a document ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitPoint {
    /// A COMBO banner starts at this byte offset
    Banner { offset: usize },
    /// No banner; the first `combos:getAll` registration starts at this byte offset
    Registration { offset: usize },
    /// Neither marker is present
    NotFound,
}

impl SplitPoint {
    /// Byte offset of the marker, if one was found
    pub fn offset(&self) -> Option<usize> {
        match self {
            SplitPoint::Banner { offset } | SplitPoint::Registration { offset } => Some(*offset),
            SplitPoint::NotFound => None,
        }
    }
}

/// Locate the split point, preferring the banner over the registration
pub fn find_split(content: &str) -> SplitPoint {
    if let Some(m) = BANNER_RE.find(content) {
        log::debug!("Combo banner matched at byte {}", m.start());
        return SplitPoint::Banner { offset: m.start() };
    }

    if let Some(offset) = content.find(GET_ALL_REGISTRATION) {
        log::debug!("No combo banner, registration found at byte {}", offset);
        return SplitPoint::Registration { offset };
    }

    log::debug!("No combo markers found");
    SplitPoint::NotFound
}

/// Text kept in front of the replacement block
pub fn kept_prefix(content: &str, split: SplitPoint) -> String {
    match split {
        SplitPoint::Banner { offset } => content[..offset].to_string(),
        SplitPoint::Registration { offset } => {
            let lines: Vec<&str> = content[..offset].split('\n').collect();
            let keep = lines.len().saturating_sub(FALLBACK_TRIM_LINES);
            lines[..keep].join("\n")
        }
        SplitPoint::NotFound => content.to_string(),
    }
}

/// Convert a byte offset into a character offset for reporting
pub fn char_offset(content: &str, byte_offset: usize) -> usize {
    content[..byte_offset].chars().count()
}
