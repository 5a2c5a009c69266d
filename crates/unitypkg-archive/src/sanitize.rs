//! Pathname descriptor decoding and per-segment sanitization.
//!
//! The resolver is a pure function of the raw descriptor text and a
//! [`SanitizeRules`] value picked once at startup. Traversal segments (`.`,
//! `..`) pass through untouched; rejecting them is the containment guard's
//! job, which sees the joined path.

use std::cmp::Ordering;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Replacement for anything the target platform cannot store.
pub const PLACEHOLDER: char = '_';

const WINDOWS_RESERVED_CHARS: &[char] = &['<', '>', ':', '"', '|', '?', '*'];

const WINDOWS_RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Filename rules of the platform the package is extracted on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SanitizeRules {
    Unix,
    Macos,
    Windows,
}

impl SanitizeRules {
    /// Rules for the platform this binary was compiled for.
    pub const fn host() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::Macos
        } else {
            Self::Unix
        }
    }

    pub const fn separator(self) -> char {
        match self {
            Self::Windows => '\\',
            Self::Unix | Self::Macos => '/',
        }
    }

    fn is_illegal(self, c: char) -> bool {
        match self {
            Self::Unix => c == '\0',
            Self::Macos => c == '\0' || c == ':',
            Self::Windows => (c as u32) < 0x20 || WINDOWS_RESERVED_CHARS.contains(&c),
        }
    }

    /// Sanitize a single path segment. Never returns an empty string.
    pub fn sanitize_segment(self, segment: &str) -> String {
        if segment.is_empty() {
            return PLACEHOLDER.to_string();
        }
        if segment == "." || segment == ".." {
            return segment.to_string();
        }

        let mut out: String = segment
            .chars()
            .map(|c| if self.is_illegal(c) { PLACEHOLDER } else { c })
            .collect();

        if self == Self::Windows {
            let kept = out.trim_end_matches(['.', ' ']).len();
            let trailing = out.len() - kept;
            out.truncate(kept);
            out.extend(std::iter::repeat_n(PLACEHOLDER, trailing));

            if is_reserved_device_name(&out) {
                out.insert(0, PLACEHOLDER);
            }
        }

        out
    }
}

impl Default for SanitizeRules {
    fn default() -> Self { Self::host() }
}

impl fmt::Display for SanitizeRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unix => "unix",
            Self::Macos => "macos",
            Self::Windows => "windows",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown sanitization rules '{0}' (expected unix, macos, windows or host)")]
pub struct UnknownRules(pub String);

impl FromStr for SanitizeRules {
    type Err = UnknownRules;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unix" | "linux" => Ok(Self::Unix),
            "macos" | "darwin" => Ok(Self::Macos),
            "windows" | "win32" => Ok(Self::Windows),
            "host" => Ok(Self::host()),
            _ => Err(UnknownRules(s.to_string())),
        }
    }
}

fn is_reserved_device_name(segment: &str) -> bool {
    let stem = segment.split('.').next().unwrap_or(segment).trim_end_matches(' ');
    WINDOWS_RESERVED_NAMES
        .iter()
        .any(|name| name.eq_ignore_ascii_case(stem))
}

/// Relative path built from sanitized segments.
///
/// Ordered by its rendered string, which is what enumeration sorts on.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResolvedPath {
    segments:  Vec<String>,
    separator: char,
    rendered:  String,
}

impl ResolvedPath {
    fn new(segments: Vec<String>, separator: char) -> Self {
        let rendered = segments.join(separator.to_string().as_str());
        Self {
            segments,
            separator,
            rendered,
        }
    }

    pub fn segments(&self) -> &[String] { &self.segments }

    pub fn as_str(&self) -> &str { &self.rendered }

    /// Native relative path, for joining onto an output root.
    pub fn to_path_buf(&self) -> PathBuf { self.segments.iter().collect() }
}

impl fmt::Display for ResolvedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.rendered) }
}

impl Ord for ResolvedPath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rendered
            .cmp(&other.rendered)
            .then_with(|| self.separator.cmp(&other.separator))
    }
}

impl PartialOrd for ResolvedPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

/// Decode raw descriptor text into a sanitized relative path.
pub fn resolve_pathname(raw: &str, rules: SanitizeRules) -> ResolvedPath {
    let segments = split_segments(strip_line_terminator(raw))
        .into_iter()
        .map(|segment| rules.sanitize_segment(segment))
        .collect();
    ResolvedPath::new(segments, rules.separator())
}

fn strip_line_terminator(raw: &str) -> &str {
    raw.strip_suffix("\r\n")
        .or_else(|| raw.strip_suffix('\n'))
        .unwrap_or(raw)
}

/// Split on runs of `/` or `\`. Leading and trailing separators yield an
/// empty segment so depth is preserved.
fn split_segments(path: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut in_run = false;

    for (i, c) in path.char_indices() {
        if c == '/' || c == '\\' {
            if !in_run {
                segments.push(&path[start..i]);
                in_run = true;
            }
            start = i + c.len_utf8();
        } else {
            in_run = false;
        }
    }
    segments.push(&path[start..]);

    segments
}
