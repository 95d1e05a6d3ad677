//! Splits template source into text and tags, and tokenizes tag contents.

use crate::{error::SyntaxError, span::Span};

/// A top-level piece of the template source.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Segment {
    Text(Span),
    Tag(TagSource),
}

/// A `{{ ... }}` tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TagSource {
    /// The whole tag, delimiters included
    pub span: Span,
    /// Tag contents, without delimiters and trim markers
    pub inner: Span,
    /// `{{~`: strip whitespace before the tag
    pub trim_left: bool,
    /// `~}}`: strip whitespace after the tag
    pub trim_right: bool,
}

enum TagEnd {
    Close(usize),
    Reopen(usize),
    Eof,
}

/// Find the closing `}}` of a tag whose contents start at `from`.
///
/// `}}` inside a string literal does not close the tag. A `{{` before the
/// close means the tag was never closed.
fn find_tag_end(src: &str, from: usize) -> TagEnd {
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in src[from..].char_indices() {
        let at = from + i;
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q || c == '\n' {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '}' if src[at..].starts_with("}}") => return TagEnd::Close(at),
            '{' if src[at..].starts_with("{{") => return TagEnd::Reopen(at),
            _ => {}
        }
    }
    TagEnd::Eof
}

/// Split source into text and tag segments, applying `~` whitespace trimming.
pub(crate) fn split_segments(src: &str, errors: &mut Vec<SyntaxError>) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut pos = 0;

    while pos < src.len() {
        let Some(rel) = src[pos..].find("{{") else {
            segments.push(Segment::Text(Span::new(pos, src.len())));
            break;
        };
        let open = pos + rel;
        if open > pos {
            segments.push(Segment::Text(Span::new(pos, open)));
        }

        let unclosed = Span::new(open, open + 2);
        match find_tag_end(src, open + 2) {
            TagEnd::Close(close) => {
                let mut inner = Span::new(open + 2, close);
                let trim_left = src[inner.start..inner.end].starts_with('~');
                if trim_left {
                    inner.start += 1;
                }
                let trim_right = !inner.is_empty() && src[inner.start..inner.end].ends_with('~');
                if trim_right {
                    inner.end -= 1;
                }
                segments.push(Segment::Tag(TagSource {
                    span: Span::new(open, close + 2),
                    inner,
                    trim_left,
                    trim_right,
                }));
                pos = close + 2;
            }
            TagEnd::Reopen(next) => {
                errors.push(SyntaxError::new(src, unclosed, "unclosed tag; expected '}}'"));
                pos = next;
            }
            TagEnd::Eof => {
                errors.push(SyntaxError::new(src, unclosed, "unclosed tag; expected '}}'"));
                pos = src.len();
            }
        }
    }

    apply_trim(src, &mut segments);
    segments
}

fn apply_trim(src: &str, segments: &mut [Segment]) {
    for i in 0..segments.len() {
        let Segment::Tag(tag) = segments[i] else {
            continue;
        };
        if tag.trim_left && i > 0 {
            if let Segment::Text(span) = &mut segments[i - 1] {
                span.end = span.start + src[span.start..span.end].trim_end().len();
            }
        }
        if tag.trim_right && i + 1 < segments.len() {
            if let Segment::Text(span) = &mut segments[i + 1] {
                span.start = span.end - src[span.start..span.end].trim_start().len();
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    Ident(String),
    Str(String),
    Int(i64),
    Dot,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Pipe,
    Bang,
    EqEq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    AndAnd,
    OrOr,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Ident(name) => write!(f, "'{}'", name),
            TokenKind::Str(s) => write!(f, "string {:?}", s),
            TokenKind::Int(i) => write!(f, "number {}", i),
            TokenKind::Dot => write!(f, "'.'"),
            TokenKind::LBracket => write!(f, "'['"),
            TokenKind::RBracket => write!(f, "']'"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::Pipe => write!(f, "'|'"),
            TokenKind::Bang => write!(f, "'!'"),
            TokenKind::EqEq => write!(f, "'=='"),
            TokenKind::NotEq => write!(f, "'!='"),
            TokenKind::Lt => write!(f, "'<'"),
            TokenKind::Le => write!(f, "'<='"),
            TokenKind::Gt => write!(f, "'>'"),
            TokenKind::Ge => write!(f, "'>='"),
            TokenKind::AndAnd => write!(f, "'&&'"),
            TokenKind::OrOr => write!(f, "'||'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// Tokenize the contents of a tag.
///
/// Stops at the first lexical error, which is returned with its span.
pub(crate) fn tokenize(src: &str, inner: Span) -> Result<Vec<Token>, (Span, String)> {
    let text = &src[inner.start..inner.end];
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let start = inner.start + i;
        let here = Span::new(start, start + c.len_utf8());
        let single = |kind| Token { kind, span: here };

        let token = match c {
            c if c.is_whitespace() => continue,
            c if c.is_alphabetic() || c == '_' => {
                let mut end = i + c.len_utf8();
                while let Some(&(j, next)) = chars.peek() {
                    if next.is_alphanumeric() || next == '_' {
                        end = j + next.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                Token {
                    kind: TokenKind::Ident(text[i..end].to_string()),
                    span: Span::new(start, inner.start + end),
                }
            }
            c if c.is_ascii_digit() => {
                let mut end = i + 1;
                while let Some(&(j, next)) = chars.peek() {
                    if next.is_ascii_digit() {
                        end = j + 1;
                        chars.next();
                    } else {
                        break;
                    }
                }
                let span = Span::new(start, inner.start + end);
                let value = text[i..end]
                    .parse::<i64>()
                    .map_err(|_| (span, "integer literal is out of range".to_string()))?;
                Token {
                    kind: TokenKind::Int(value),
                    span,
                }
            }
            '"' | '\'' => {
                let mut value = String::new();
                let mut end = None;
                while let Some((j, next)) = chars.next() {
                    match next {
                        '\\' => match chars.next() {
                            Some((_, 'n')) => value.push('\n'),
                            Some((_, 't')) => value.push('\t'),
                            Some((_, escaped @ ('\\' | '"' | '\''))) => value.push(escaped),
                            Some((k, other)) => {
                                let at = inner.start + k;
                                return Err((
                                    Span::new(at - 1, at + other.len_utf8()),
                                    format!("unknown escape sequence '\\{}'", other),
                                ));
                            }
                            None => break,
                        },
                        '\n' => break,
                        q if q == c => {
                            end = Some(j + 1);
                            break;
                        }
                        other => value.push(other),
                    }
                }
                let Some(end) = end else {
                    return Err((here, "unterminated string literal".to_string()));
                };
                Token {
                    kind: TokenKind::Str(value),
                    span: Span::new(start, inner.start + end),
                }
            }
            '.' => single(TokenKind::Dot),
            '[' => single(TokenKind::LBracket),
            ']' => single(TokenKind::RBracket),
            '(' => single(TokenKind::LParen),
            ')' => single(TokenKind::RParen),
            '|' | '&' | '=' | '!' | '<' | '>' => {
                let next = chars.peek().map(|&(_, n)| n);
                let double = |kind| Token {
                    kind,
                    span: Span::new(start, start + 2),
                };
                match (c, next) {
                    ('|', Some('|')) => {
                        chars.next();
                        double(TokenKind::OrOr)
                    }
                    ('&', Some('&')) => {
                        chars.next();
                        double(TokenKind::AndAnd)
                    }
                    ('=', Some('=')) => {
                        chars.next();
                        double(TokenKind::EqEq)
                    }
                    ('!', Some('=')) => {
                        chars.next();
                        double(TokenKind::NotEq)
                    }
                    ('<', Some('=')) => {
                        chars.next();
                        double(TokenKind::Le)
                    }
                    ('>', Some('=')) => {
                        chars.next();
                        double(TokenKind::Ge)
                    }
                    ('|', _) => single(TokenKind::Pipe),
                    ('!', _) => single(TokenKind::Bang),
                    ('<', _) => single(TokenKind::Lt),
                    ('>', _) => single(TokenKind::Gt),
                    ('&', _) => {
                        return Err((
                            here,
                            "unexpected character '&'; did you mean '&&'?".to_string(),
                        ));
                    }
                    _ => {
                        return Err((
                            here,
                            "unexpected character '='; did you mean '=='?".to_string(),
                        ));
                    }
                }
            }
            other => return Err((here, format!("unexpected character {:?}", other))),
        };
        tokens.push(token);
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize(src, Span::new(0, src.len()))
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn segments(src: &str) -> (Vec<Segment>, Vec<SyntaxError>) {
        let mut errors = Vec::new();
        let segments = split_segments(src, &mut errors);
        (segments, errors)
    }

    #[test]
    fn test_split_text_and_tags() {
        let (segs, errors) = segments("a {{ x }} b");
        assert!(errors.is_empty());
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[0], Segment::Text(Span::new(0, 2)));
        let Segment::Tag(tag) = segs[1] else {
            panic!("expected tag");
        };
        assert_eq!(tag.span, Span::new(2, 9));
        assert_eq!(tag.inner, Span::new(4, 7));
        assert_eq!(segs[2], Segment::Text(Span::new(9, 11)));
    }

    #[test]
    fn test_close_inside_string_is_ignored() {
        let (segs, errors) = segments(r#"{{ "}}" }}"#);
        assert!(errors.is_empty());
        assert_eq!(segs.len(), 1);
    }

    #[test]
    fn test_unclosed_tags_are_reported() {
        let (segs, errors) = segments("{{ a  {{ b }} {{ c");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].column, 1);
        assert_eq!(errors[1].column, 15);
        assert!(segs.iter().any(|s| matches!(s, Segment::Tag(_))));
    }

    #[test]
    fn test_trim_markers() {
        let src = "a  \n{{~ x ~}}\n  b";
        let (segs, _) = segments(src);
        let Segment::Text(before) = segs[0] else {
            panic!("expected text");
        };
        let Segment::Text(after) = segs[2] else {
            panic!("expected text");
        };
        assert_eq!(&src[before.start..before.end], "a");
        assert_eq!(&src[after.start..after.end], "b");
        let Segment::Tag(tag) = segs[1] else {
            panic!("expected tag");
        };
        assert_eq!(&src[tag.inner.start..tag.inner.end], " x ");
    }

    #[test]
    fn test_tokenize_operators() {
        assert_eq!(
            kinds("a.b != 'x' && !c || d <= 10"),
            vec![
                TokenKind::Ident("a".into()),
                TokenKind::Dot,
                TokenKind::Ident("b".into()),
                TokenKind::NotEq,
                TokenKind::Str("x".into()),
                TokenKind::AndAnd,
                TokenKind::Bang,
                TokenKind::Ident("c".into()),
                TokenKind::OrOr,
                TokenKind::Ident("d".into()),
                TokenKind::Le,
                TokenKind::Int(10),
            ]
        );
    }

    #[test]
    fn test_tokenize_string_escapes() {
        assert_eq!(
            kinds(r#""a\"b\n" | f"#),
            vec![
                TokenKind::Str("a\"b\n".into()),
                TokenKind::Pipe,
                TokenKind::Ident("f".into()),
            ]
        );
    }

    #[test]
    fn test_tokenize_errors() {
        let err = tokenize("a = b", Span::new(0, 5)).unwrap_err();
        assert_eq!(err.0, Span::new(2, 3));
        assert!(err.1.contains("'=='"));

        let err = tokenize("\"open", Span::new(0, 5)).unwrap_err();
        assert_eq!(err.1, "unterminated string literal");

        assert!(tokenize("99999999999999999999", Span::new(0, 20)).is_err());
        assert!(tokenize("a # b", Span::new(0, 5)).is_err());

        let err = tokenize("a \u{7} b", Span::new(0, 5)).unwrap_err();
        assert_eq!(err.1, "unexpected character '\\u{7}'");
    }

    #[test]
    fn test_display_escapes_strings() {
        assert_eq!(
            TokenKind::Str("a\nb".into()).to_string(),
            r#"string "a\nb""#
        );
    }
}
