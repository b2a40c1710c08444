//! Source positions for highlighted text.
//!
//! The scanner works on byte offsets into a `&str`. Tokens and diagnostics
//! additionally carry a [`Span`] of 0-based line/column coordinates, which
//! [`SourceCursor`] computes by walking the source forward.

use std::fmt;

/// A 0-based line/column position in source text.
#[derive(Debug, Clone, Default, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    /// 0-based line number.
    pub line: usize,
    /// 0-based column number (character position in the line).
    pub column: usize,
}

impl Position {
    /// Creates a new `Position`.
    #[inline]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A half-open source range: `[start, end)`.
#[derive(Debug, Clone, Default, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// Creates a new `Span`.
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.start.line, self.start.column, self.end.line, self.end.column
        )
    }
}

/// Converts byte offsets into [`Position`]s.
///
/// The cursor only moves forward. Asking for an offset behind the current
/// one restarts the walk from the beginning of the source.
#[derive(Debug, Clone)]
pub struct SourceCursor<'s> {
    source: &'s str,
    offset: usize,
    pos: Position,
}

impl<'s> SourceCursor<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            offset: 0,
            pos: Position::default(),
        }
    }

    /// Advance to byte `offset` and return its position.
    ///
    /// `offset` is clamped to the source length and rounded down to a
    /// character boundary.
    pub fn position_at(&mut self, offset: usize) -> Position {
        let mut offset = offset.min(self.source.len());
        while !self.source.is_char_boundary(offset) {
            offset -= 1;
        }
        if offset < self.offset {
            self.offset = 0;
            self.pos = Position::default();
        }
        for ch in self.source[self.offset..offset].chars() {
            if ch == '\n' {
                self.pos.line += 1;
                self.pos.column = 0;
            } else {
                self.pos.column += 1;
            }
        }
        self.offset = offset;
        self.pos
    }

    /// Span covering the byte range `start..end`.
    pub fn span(&mut self, start: usize, end: usize) -> Span {
        let start = self.position_at(start);
        let end = self.position_at(end);
        Span::new(start, end)
    }
}

/// Build an `Option<Span>` inline from 0-based line/column coordinates.
///
/// # Examples
///
/// ```rust
/// # use highlex::span;
/// let s = span!(0, 0, 1, 4);
/// assert_eq!(s.unwrap().end.column, 4);
/// ```
#[macro_export]
macro_rules! span {
    ($line_start:expr, $col_start:expr, $line_end:expr, $col_end:expr) => {
        Some($crate::Span {
            start: $crate::Position {
                line: $line_start,
                column: $col_start,
            },
            end: $crate::Position {
                line: $line_end,
                column: $col_end,
            },
        })
    };
}
