//! Byte spans and line/column positions within template source.

use miette::SourceSpan;

/// A byte range within the template source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Smallest span covering both `self` and `other`.
    pub fn to(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        SourceSpan::from((span.start, span.len()))
    }
}

/// A 1-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Locate a byte offset in `src`. Columns count characters, not bytes.
    pub fn locate(src: &str, offset: usize) -> Self {
        let before = src.get(..offset).unwrap_or(src);
        let line = before.matches('\n').count() + 1;
        let column = before
            .rsplit('\n')
            .next()
            .map_or(0, |current| current.chars().count())
            + 1;
        Self { line, column }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate() {
        let src = "ab\ncdé\nf";
        assert_eq!(Position::locate(src, 0), Position { line: 1, column: 1 });
        assert_eq!(Position::locate(src, 1), Position { line: 1, column: 2 });
        assert_eq!(Position::locate(src, 3), Position { line: 2, column: 1 });
        // 'é' is two bytes but one column
        assert_eq!(Position::locate(src, 7), Position { line: 2, column: 4 });
        assert_eq!(Position::locate(src, 8), Position { line: 3, column: 1 });
    }

    #[test]
    fn test_span_to() {
        let span = Span::new(4, 6).to(Span::new(1, 5));
        assert_eq!(span, Span::new(1, 6));
        assert_eq!(span.len(), 5);
    }
}
