//! Resolved versions and version ordering.

use std::cmp::Ordering;

/// A version ready to be expanded into boot entries.
///
/// `architectures` holds provider tokens in the order they were requested
/// or declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    pub version: String,
    /// Display name, e.g. a codename.
    pub name: Option<String>,
    /// Release classification reported by the provider.
    pub variant: Option<String>,
    pub architectures: Vec<String>,
}

impl ResolvedVersion {
    pub fn new(version: impl Into<String>, architectures: Vec<String>) -> Self {
        Self {
            version: version.into(),
            name: None,
            variant: None,
            architectures,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    Number(&'a str),
    Text(&'a str),
}

fn segments(version: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut start = None;
    let mut digits = false;

    for (i, c) in version.char_indices() {
        if !c.is_ascii_alphanumeric() {
            if let Some(s) = start.take() {
                out.push(segment(&version[s..i], digits));
            }
            continue;
        }
        let is_digit = c.is_ascii_digit();
        match start {
            Some(s) if is_digit != digits => {
                out.push(segment(&version[s..i], digits));
                start = Some(i);
            }
            None => start = Some(i),
            _ => {}
        }
        digits = is_digit;
    }
    if let Some(s) = start {
        out.push(segment(&version[s..], digits));
    }
    out
}

fn segment(s: &str, digits: bool) -> Segment<'_> {
    if digits {
        Segment::Number(s)
    } else {
        Segment::Text(s)
    }
}

/// Compare digit runs as integers of arbitrary length.
fn compare_numbers(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Numeric-aware version comparison.
///
/// Versions are split into runs of digits and runs of letters; separators
/// (`.`, `-`, `_`, ...) only delimit runs. Digit runs compare as integers, so
/// `9 < 10`; letter runs compare lexicographically. A digit run sorts above a
/// letter run at the same position, and a version that extends another sorts
/// above it (`41.1 > 41`).
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let left = segments(a);
    let right = segments(b);

    for (l, r) in left.iter().zip(right.iter()) {
        let ord = match (l, r) {
            (Segment::Number(x), Segment::Number(y)) => compare_numbers(x, y),
            (Segment::Text(x), Segment::Text(y)) => x.cmp(y),
            (Segment::Number(_), Segment::Text(_)) => Ordering::Greater,
            (Segment::Text(_), Segment::Number(_)) => Ordering::Less,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }

    left.len().cmp(&right.len()).then_with(|| a.cmp(b))
}

/// Sort versions newest first.
pub fn sort_descending(versions: &mut [ResolvedVersion]) {
    versions.sort_by(|a, b| compare_versions(&b.version, &a.version));
}
