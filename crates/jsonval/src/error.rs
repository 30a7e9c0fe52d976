use core::fmt::{self, Write};

/// The shape of a [`Value`](crate::Value), used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Number,
    Bool,
    Object,
    Array,
    Null,
}

impl Kind {
    /// Lowercase name of the shape.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Number => "number",
            Kind::Bool => "boolean",
            Kind::Object => "object",
            Kind::Array => "array",
            Kind::Null => "null",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a typed accessor or conversion.
///
/// Two kinds cover the whole typed surface. [`TypeMismatch`] means the
/// value exists but does not have the requested shape; [`MissingValue`]
/// means a structurally valid lookup (object key, array index) found
/// nothing. Keeping them distinct lets callers treat "absent" and "wrong
/// type" differently, e.g. to implement optional fields.
///
/// [`TypeMismatch`]: AccessError::TypeMismatch
/// [`MissingValue`]: AccessError::MissingValue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// The value's actual shape does not match what was requested.
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },
    /// A structurally valid lookup found nothing.
    MissingValue,
}

impl AccessError {
    pub(crate) fn mismatch(expected: &'static str, actual: Kind) -> Self {
        AccessError::TypeMismatch {
            expected,
            actual: actual.as_str(),
        }
    }
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessError::TypeMismatch { expected, actual } => {
                write!(f, "type mismatch: expected {expected}, found {actual}")
            }
            AccessError::MissingValue => f.write_str("missing value"),
        }
    }
}

impl std::error::Error for AccessError {}

/// Failure of the text decoding entry points.
#[derive(Debug)]
pub enum DecodeError {
    /// Malformed input reported by the underlying parser.
    Syntax(serde_json::Error),
    /// No candidate shape matched the input at `path`.
    UnrecognizedShape { path: Path },
    /// An object repeated a key while duplicates were configured to be
    /// rejected.
    DuplicateKey { key: String, path: Path },
    /// Nesting went beyond the configured maximum depth.
    DepthLimit { path: Path },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Syntax(error) => write!(f, "syntax error: {error}"),
            DecodeError::UnrecognizedShape { path } => {
                write!(f, "unrecognized JSON shape at {path}")
            }
            DecodeError::DuplicateKey { key, path } => {
                write!(f, "duplicate object key {key:?} at {path}")
            }
            DecodeError::DepthLimit { path } => {
                write!(f, "nesting depth limit exceeded at {path}")
            }
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Syntax(error) => Some(error),
            _ => None,
        }
    }
}

/// A location inside a JSON document.
///
/// Non-root paths render as a JSON Pointer (RFC 6901); the root renders
/// as the phrase `the document root` so error messages stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path {
    segments: Vec<PathSegment>,
}

/// One step of a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object key.
    Key(String),
    /// An array index.
    Index(usize),
}

impl Path {
    /// The steps from the document root to this location.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Whether this is the document root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("the document root");
        }
        for segment in &self.segments {
            f.write_char('/')?;
            match segment {
                PathSegment::Key(key) => {
                    for ch in key.chars() {
                        match ch {
                            '~' => f.write_str("~0")?,
                            '/' => f.write_str("~1")?,
                            _ => f.write_char(ch)?,
                        }
                    }
                }
                PathSegment::Index(index) => write!(f, "{index}")?,
            }
        }
        Ok(())
    }
}

/// Chain of borrowed path segments living on the decode stack.
/// Materialized into an owned [`Path`] only when an error is built.
pub(crate) struct LazyPath<'a> {
    parent: Option<&'a LazyPath<'a>>,
    segment: Option<SegmentRef<'a>>,
}

enum SegmentRef<'a> {
    Key(&'a str),
    Index(usize),
}

impl<'a> LazyPath<'a> {
    pub(crate) const fn root() -> Self {
        LazyPath {
            parent: None,
            segment: None,
        }
    }

    pub(crate) fn key(&'a self, key: &'a str) -> LazyPath<'a> {
        LazyPath {
            parent: Some(self),
            segment: Some(SegmentRef::Key(key)),
        }
    }

    pub(crate) fn index(&'a self, index: usize) -> LazyPath<'a> {
        LazyPath {
            parent: Some(self),
            segment: Some(SegmentRef::Index(index)),
        }
    }

    pub(crate) fn to_path(&self) -> Path {
        let mut segments = Vec::new();
        let mut node = Some(self);
        while let Some(current) = node {
            match &current.segment {
                Some(SegmentRef::Key(key)) => {
                    segments.push(PathSegment::Key((*key).to_owned()));
                }
                Some(SegmentRef::Index(index)) => segments.push(PathSegment::Index(*index)),
                None => {}
            }
            node = current.parent;
        }
        segments.reverse();
        Path { segments }
    }
}
