//! Parses tag contents into expressions and assembles the block structure.

use crate::{
    ast::{BinaryOp, Expr, ExprKind, Node},
    error::SyntaxError,
    lexer::{Segment, TagSource, Token, TokenKind, split_segments, tokenize},
    span::Span,
    value::Value,
};

const KEYWORDS: &[&str] = &[
    "and", "else", "elseif", "end", "false", "for", "if", "in", "not", "null", "or", "true",
];

/// Deepest allowed nesting of expressions, and of `for`/`if` blocks.
const MAX_NESTING: usize = 64;

fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

type Issue = (Span, String);
type PResult<T> = Result<T, Issue>;

/// What a single tag means.
#[derive(Debug)]
enum Tag {
    For { variable: String, iterable: Expr },
    If(Expr),
    ElseIf(Expr),
    Else,
    End,
    Output(Expr),
    Empty,
}

struct TagParser<'t> {
    tokens: &'t [Token],
    pos: usize,
    /// Span of the tag contents, for errors at end of input
    inner: Span,
    depth: usize,
}

impl<'t> TagParser<'t> {
    fn new(tokens: &'t [Token], inner: Span) -> Self {
        Self {
            tokens,
            pos: 0,
            inner,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<&'t TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    fn peek_word(&self) -> Option<&'t str> {
        match self.peek_kind() {
            Some(TokenKind::Ident(word)) => Some(word.as_str()),
            _ => None,
        }
    }

    fn bump(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.pos);
        self.pos += 1;
        token
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn end_span(&self) -> Span {
        Span::new(self.inner.end, self.inner.end)
    }

    fn expect_end(&self, after: &str) -> PResult<()> {
        match self.peek() {
            None => Ok(()),
            Some(token) => Err((token.span, format!("unexpected {} after {}", token.kind, after))),
        }
    }

    /// Count one more level of nesting. Operator chains count a level per
    /// operator, since they build trees as deep as parentheses do.
    fn deepen(&mut self) -> PResult<()> {
        if self.depth >= MAX_NESTING {
            let span = self.peek().map_or(self.end_span(), |t| t.span);
            return Err((span, "expression nested too deeply".to_string()));
        }
        self.depth += 1;
        Ok(())
    }

    /// Run `parse` one nesting level deeper.
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        self.deepen()?;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn expect(&mut self, kind: TokenKind, message: &str) -> PResult<Span> {
        match self.peek() {
            Some(token) if token.kind == kind => {
                self.pos += 1;
                Ok(token.span)
            }
            Some(token) => Err((token.span, format!("{}, found {}", message, token.kind))),
            None => Err((self.end_span(), message.to_string())),
        }
    }

    fn parse_tag(mut self) -> PResult<Tag> {
        let Some(word) = self.peek_word() else {
            if self.at_end() {
                return Ok(Tag::Empty);
            }
            return self.parse_output();
        };
        let followed_by_access = matches!(
            self.tokens.get(self.pos + 1).map(|t| &t.kind),
            Some(TokenKind::Dot | TokenKind::LBracket)
        );

        match word {
            "for" if !followed_by_access => {
                self.bump();
                self.parse_for()
            }
            "if" => {
                self.bump();
                Ok(Tag::If(self.parse_condition("if")?))
            }
            "elseif" => {
                self.bump();
                Ok(Tag::ElseIf(self.parse_condition("elseif")?))
            }
            "else" => {
                self.bump();
                if self.peek_word() == Some("if") {
                    self.bump();
                    Ok(Tag::ElseIf(self.parse_condition("else if")?))
                } else {
                    self.expect_end("'else'")?;
                    Ok(Tag::Else)
                }
            }
            "end" => {
                self.bump();
                self.expect_end("'end'")?;
                Ok(Tag::End)
            }
            _ => self.parse_output(),
        }
    }

    fn parse_output(&mut self) -> PResult<Tag> {
        let expr = self.parse_expr()?;
        self.expect_end("expression")?;
        Ok(Tag::Output(expr))
    }

    fn parse_condition(&mut self, keyword: &str) -> PResult<Expr> {
        if self.at_end() {
            return Err((self.end_span(), format!("expected a condition after '{}'", keyword)));
        }
        let condition = self.parse_expr()?;
        self.expect_end("condition")?;
        Ok(condition)
    }

    fn parse_for(&mut self) -> PResult<Tag> {
        let variable = match self.peek() {
            Some(Token {
                kind: TokenKind::Ident(name),
                ..
            }) if !is_keyword(name) => {
                self.bump();
                name.clone()
            }
            Some(token) => {
                return Err((
                    token.span,
                    format!("expected a loop variable name after 'for', found {}", token.kind),
                ));
            }
            None => {
                return Err((
                    self.end_span(),
                    "expected a loop variable name after 'for'".to_string(),
                ));
            }
        };

        self.expect(
            TokenKind::Ident("in".to_string()),
            &format!("expected 'in' after loop variable '{}'", variable),
        )?;
        if self.at_end() {
            return Err((self.end_span(), "expected a sequence after 'in'".to_string()));
        }
        let iterable = self.parse_expr()?;
        self.expect_end("loop sequence")?;
        Ok(Tag::For { variable, iterable })
    }

    fn parse_expr(&mut self) -> PResult<Expr> {
        let base = self.depth;
        let mut expr = self.parse_or()?;
        while self.peek_kind() == Some(&TokenKind::Pipe) {
            self.bump();
            self.deepen()?;
            let (name, span) = self.expect_callee("expected a function name after '|'")?;
            let span = expr.span.to(span);
            expr = Expr::new(
                ExprKind::Call {
                    name,
                    arg: Box::new(expr),
                },
                span,
            );
        }
        self.depth = base;
        Ok(expr)
    }

    fn expect_callee(&mut self, message: &str) -> PResult<(String, Span)> {
        match self.peek() {
            Some(Token {
                kind: TokenKind::Ident(name),
                span,
            }) if !is_keyword(name) => {
                self.bump();
                Ok((name.clone(), *span))
            }
            Some(token) => Err((token.span, format!("{}, found {}", message, token.kind))),
            None => Err((self.end_span(), message.to_string())),
        }
    }

    fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
        let span = lhs.span.to(rhs.span);
        Expr::new(
            ExprKind::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            span,
        )
    }

    fn parse_or(&mut self) -> PResult<Expr> {
        let base = self.depth;
        let mut lhs = self.parse_and()?;
        while matches!(self.peek_kind(), Some(TokenKind::OrOr)) || self.peek_word() == Some("or") {
            self.bump();
            self.deepen()?;
            let rhs = self.parse_and()?;
            lhs = Self::binary(BinaryOp::Or, lhs, rhs);
        }
        self.depth = base;
        Ok(lhs)
    }

    fn parse_and(&mut self) -> PResult<Expr> {
        let base = self.depth;
        let mut lhs = self.parse_comparison()?;
        while matches!(self.peek_kind(), Some(TokenKind::AndAnd)) || self.peek_word() == Some("and")
        {
            self.bump();
            self.deepen()?;
            let rhs = self.parse_comparison()?;
            lhs = Self::binary(BinaryOp::And, lhs, rhs);
        }
        self.depth = base;
        Ok(lhs)
    }

    fn comparison_op(&self) -> Option<BinaryOp> {
        match self.peek_kind()? {
            TokenKind::EqEq => Some(BinaryOp::Eq),
            TokenKind::NotEq => Some(BinaryOp::Ne),
            TokenKind::Lt => Some(BinaryOp::Lt),
            TokenKind::Le => Some(BinaryOp::Le),
            TokenKind::Gt => Some(BinaryOp::Gt),
            TokenKind::Ge => Some(BinaryOp::Ge),
            _ => None,
        }
    }

    fn parse_comparison(&mut self) -> PResult<Expr> {
        let base = self.depth;
        let mut lhs = self.parse_unary()?;
        while let Some(op) = self.comparison_op() {
            self.bump();
            self.deepen()?;
            let rhs = self.parse_unary()?;
            lhs = Self::binary(op, lhs, rhs);
        }
        self.depth = base;
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> PResult<Expr> {
        let is_not =
            matches!(self.peek_kind(), Some(TokenKind::Bang)) || self.peek_word() == Some("not");
        if !is_not {
            return self.parse_call();
        }
        let Some(op) = self.bump() else {
            return Err((self.end_span(), "expected an expression".to_string()));
        };
        let operand = self.nested(Self::parse_unary)?;
        let span = op.span.to(operand.span);
        Ok(Expr::new(ExprKind::Not(Box::new(operand)), span))
    }

    /// Whether a token can begin a helper argument.
    fn starts_argument(token: Option<&Token>) -> bool {
        match token.map(|t| &t.kind) {
            Some(TokenKind::Ident(word)) => {
                !matches!(word.as_str(), "and" | "or" | "not" | "in")
            }
            Some(TokenKind::Str(_) | TokenKind::Int(_) | TokenKind::LParen) => true,
            _ => false,
        }
    }

    /// `name arg` is a call when `name` is followed directly by an argument.
    fn parse_call(&mut self) -> PResult<Expr> {
        if let Some(Token {
            kind: TokenKind::Ident(name),
            span,
        }) = self.peek()
        {
            if !is_keyword(name) && Self::starts_argument(self.tokens.get(self.pos + 1)) {
                self.bump();
                let arg = self.nested(Self::parse_call)?;
                let span = span.to(arg.span);
                return Ok(Expr::new(
                    ExprKind::Call {
                        name: name.clone(),
                        arg: Box::new(arg),
                    },
                    span,
                ));
            }
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> PResult<Expr> {
        let base = self.depth;
        let mut expr = self.parse_primary()?;
        loop {
            match self.peek_kind() {
                Some(TokenKind::Dot) => {
                    self.bump();
                    self.deepen()?;
                    let Some(Token {
                        kind: TokenKind::Ident(member),
                        span,
                    }) = self.peek()
                    else {
                        let span = self.peek().map_or(self.end_span(), |t| t.span);
                        return Err((span, "expected a member name after '.'".to_string()));
                    };
                    self.bump();
                    let span = expr.span.to(*span);
                    expr = Expr::new(ExprKind::Member(Box::new(expr), member.clone()), span);
                }
                Some(TokenKind::LBracket) => {
                    self.bump();
                    self.deepen()?;
                    let index = self.nested(Self::parse_expr)?;
                    let close = self.expect(TokenKind::RBracket, "expected ']'")?;
                    let span = expr.span.to(close);
                    expr = Expr::new(ExprKind::Index(Box::new(expr), Box::new(index)), span);
                }
                _ => {
                    self.depth = base;
                    return Ok(expr);
                }
            }
        }
    }

    fn parse_primary(&mut self) -> PResult<Expr> {
        let Some(token) = self.bump() else {
            return Err((self.end_span(), "expected an expression".to_string()));
        };
        let kind = match &token.kind {
            TokenKind::Ident(word) => match word.as_str() {
                "true" => ExprKind::Literal(Value::Bool(true)),
                "false" => ExprKind::Literal(Value::Bool(false)),
                "null" => ExprKind::Literal(Value::Null),
                // `for` alone names the innermost loop's metadata
                "for" => ExprKind::Var(word.clone()),
                kw if is_keyword(kw) => {
                    return Err((token.span, format!("unexpected keyword '{}'", kw)));
                }
                _ => ExprKind::Var(word.clone()),
            },
            TokenKind::Str(s) => ExprKind::Literal(Value::Str(s.clone())),
            TokenKind::Int(i) => ExprKind::Literal(Value::Int(*i)),
            TokenKind::LParen => {
                let inner = self.nested(Self::parse_expr)?;
                let close = self.expect(TokenKind::RParen, "expected ')'")?;
                return Ok(Expr::new(inner.kind, token.span.to(close)));
            }
            other => {
                return Err((token.span, format!("expected an expression, found {}", other)));
            }
        };
        Ok(Expr::new(kind, token.span))
    }
}

/// A block opened by `for` or `if` that has not seen its `end` yet.
enum OpenBlock {
    For {
        variable: String,
        iterable: Expr,
        body: Vec<Node>,
        open: Span,
    },
    If {
        branches: Vec<(Expr, Vec<Node>)>,
        condition: Expr,
        body: Vec<Node>,
        otherwise: Option<Vec<Node>>,
        open: Span,
    },
    /// Stands in for a block whose opening tag was rejected, so its `end`
    /// still pairs up. The body is dropped.
    Invalid { body: Vec<Node> },
}

impl OpenBlock {
    fn current_body(&mut self) -> &mut Vec<Node> {
        match self {
            OpenBlock::For { body, .. } => body,
            OpenBlock::If {
                otherwise: Some(otherwise),
                ..
            } => otherwise,
            OpenBlock::If { body, .. } => body,
            OpenBlock::Invalid { body } => body,
        }
    }

    fn close(self) -> Option<Node> {
        let node = match self {
            OpenBlock::For {
                variable,
                iterable,
                body,
                ..
            } => Node::For {
                variable,
                iterable,
                body,
            },
            OpenBlock::If {
                mut branches,
                condition,
                body,
                otherwise,
                ..
            } => {
                branches.push((condition, body));
                Node::If {
                    branches,
                    otherwise: otherwise.unwrap_or_default(),
                }
            }
            OpenBlock::Invalid { .. } => return None,
        };
        Some(node)
    }
}

/// Assembles tags into nested blocks, collecting structural errors.
struct TreeBuilder<'s> {
    src: &'s str,
    root: Vec<Node>,
    stack: Vec<OpenBlock>,
    errors: Vec<SyntaxError>,
}

impl<'s> TreeBuilder<'s> {
    fn push(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(block) => block.current_body().push(node),
            None => self.root.push(node),
        }
    }

    fn error(&mut self, span: Span, message: impl Into<String>) {
        self.errors.push(SyntaxError::new(self.src, span, message));
    }

    fn open(&mut self, block: OpenBlock, span: Span) {
        if self.stack.len() < MAX_NESTING {
            self.stack.push(block);
            return;
        }
        if self.stack.len() == MAX_NESTING {
            self.error(span, "blocks nested too deeply");
        }
        self.stack.push(OpenBlock::Invalid { body: Vec::new() });
    }

    fn close(&mut self, span: Span) {
        match self.stack.pop() {
            Some(block) => {
                if let Some(node) = block.close() {
                    self.push(node);
                }
            }
            None => self.error(span, "'end' without a matching 'for' or 'if'"),
        }
    }

    /// Keep blocks balanced after a tag failed to parse.
    fn rejected(&mut self, text: &str) {
        match leading_keyword(text) {
            Some("if" | "for") => self.stack.push(OpenBlock::Invalid { body: Vec::new() }),
            Some("end") => {
                if let Some(node) = self.stack.pop().and_then(OpenBlock::close) {
                    self.push(node);
                }
            }
            _ => {}
        }
    }

    fn tag(&mut self, tag: Tag, source: &TagSource) {
        match tag {
            Tag::Empty => {}
            Tag::Output(expr) => self.push(Node::Output(expr)),
            Tag::For { variable, iterable } => self.open(
                OpenBlock::For {
                    variable,
                    iterable,
                    body: Vec::new(),
                    open: source.span,
                },
                source.span,
            ),
            Tag::If(condition) => self.open(
                OpenBlock::If {
                    branches: Vec::new(),
                    condition,
                    body: Vec::new(),
                    otherwise: None,
                    open: source.span,
                },
                source.span,
            ),
            Tag::ElseIf(next) => match self.stack.last_mut() {
                Some(OpenBlock::If {
                    branches,
                    condition,
                    body,
                    otherwise: None,
                    ..
                }) => {
                    let previous = std::mem::replace(condition, next);
                    branches.push((previous, std::mem::take(body)));
                }
                Some(OpenBlock::If { .. }) => {
                    self.error(source.span, "'else if' cannot follow 'else'");
                }
                Some(OpenBlock::Invalid { .. }) => {}
                _ => self.error(source.span, "'else if' without a matching 'if'"),
            },
            Tag::Else => match self.stack.last_mut() {
                Some(OpenBlock::If { otherwise, .. }) if otherwise.is_none() => {
                    *otherwise = Some(Vec::new());
                }
                Some(OpenBlock::If { .. }) => {
                    self.error(source.span, "duplicate 'else' in 'if' block");
                }
                Some(OpenBlock::Invalid { .. }) => {}
                _ => self.error(source.span, "'else' without a matching 'if'"),
            },
            Tag::End => self.close(source.span),
        }
    }

    fn finish(mut self) -> Result<Vec<Node>, Vec<SyntaxError>> {
        while let Some(block) = self.stack.pop() {
            let (keyword, open) = match &block {
                OpenBlock::For { open, .. } => ("for", *open),
                OpenBlock::If { open, .. } => ("if", *open),
                OpenBlock::Invalid { .. } => continue,
            };
            self.error(
                open,
                format!("unterminated '{}' block; expected '{{{{ end }}}}'", keyword),
            );
        }
        if self.errors.is_empty() {
            Ok(self.root)
        } else {
            self.errors.sort_by_key(|e| (e.line, e.column));
            Err(self.errors)
        }
    }
}

/// The block keyword a tag starts with, if any. `for.index` and the like
/// are paths, not loops.
fn leading_keyword(text: &str) -> Option<&str> {
    let text = text.trim_start();
    let len = text
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(text.len());
    let (word, rest) = text.split_at(len);
    match word {
        "if" | "end" => Some(word),
        "for" if !rest.trim_start().starts_with(['.', '[']) => Some(word),
        _ => None,
    }
}

/// Parse template source into a node tree.
///
/// Every syntax problem is collected; parsing resumes at the next tag.
pub(crate) fn parse(src: &str) -> Result<Vec<Node>, Vec<SyntaxError>> {
    let mut errors = Vec::new();
    let segments = split_segments(src, &mut errors);

    let mut builder = TreeBuilder {
        src,
        root: Vec::new(),
        stack: Vec::new(),
        errors,
    };

    for segment in segments {
        match segment {
            Segment::Text(span) => {
                if !span.is_empty() {
                    builder.push(Node::Text(span));
                }
            }
            Segment::Tag(source) => {
                let parsed = tokenize(src, source.inner)
                    .and_then(|tokens| TagParser::new(&tokens, source.inner).parse_tag());
                match parsed {
                    Ok(tag) => builder.tag(tag, &source),
                    Err((span, message)) => {
                        builder.error(span, message);
                        builder.rejected(&src[source.inner.start..source.inner.end]);
                    }
                }
            }
        }
    }

    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(src: &str) -> Vec<Node> {
        parse(src).unwrap_or_else(|errors| panic!("unexpected errors: {:?}", errors))
    }

    fn parse_err(src: &str) -> Vec<String> {
        parse(src)
            .expect_err("expected syntax errors")
            .into_iter()
            .map(|e| e.message)
            .collect()
    }

    fn output_expr(src: &str) -> ExprKind {
        match parse_ok(src).remove(0) {
            Node::Output(expr) => expr.kind,
            other => panic!("expected output node, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_path() {
        let ExprKind::Member(base, member) = output_expr("{{ MainTable.ClassName }}") else {
            panic!("expected member access");
        };
        assert_eq!(member, "ClassName");
        assert_eq!(base.kind, ExprKind::Var("MainTable".into()));
    }

    #[test]
    fn test_parse_call_binds_tighter_than_comparison() {
        let ExprKind::Binary { op, lhs, .. } = output_expr(r#"{{ map_type c.DataType != "string" }}"#)
        else {
            panic!("expected binary expression");
        };
        assert_eq!(op, BinaryOp::Ne);
        assert!(matches!(lhs.kind, ExprKind::Call { ref name, .. } if name == "map_type"));
    }

    #[test]
    fn test_parse_nested_call_and_pipe() {
        let ExprKind::Call { name, arg } = output_expr("{{ c.ColumnName | normalize_name }}") else {
            panic!("expected call");
        };
        assert_eq!(name, "normalize_name");
        assert!(matches!(arg.kind, ExprKind::Member(..)));

        let ExprKind::Call { name, arg } = output_expr("{{ outer inner x }}") else {
            panic!("expected call");
        };
        assert_eq!(name, "outer");
        assert!(matches!(arg.kind, ExprKind::Call { ref name, .. } if name == "inner"));
    }

    #[test]
    fn test_parse_and_or_precedence() {
        let ExprKind::Binary { op, rhs, .. } = output_expr("{{ a or b and c }}") else {
            panic!("expected binary expression");
        };
        assert_eq!(op, BinaryOp::Or);
        assert!(matches!(rhs.kind, ExprKind::Binary { op: BinaryOp::And, .. }));
    }

    #[test]
    fn test_parse_loop_metadata_path() {
        let ExprKind::Member(base, member) = output_expr("{{ for.index }}") else {
            panic!("expected member access");
        };
        assert_eq!(base.kind, ExprKind::Var("for".into()));
        assert_eq!(member, "index");
    }

    #[test]
    fn test_parse_blocks() {
        let nodes = parse_ok(
            "{{ for c in Cols }}{{ if c.A }}a{{ else if c.B }}b{{ else }}z{{ end }}{{ end }}",
        );
        assert_eq!(nodes.len(), 1);
        let Node::For { variable, body, .. } = &nodes[0] else {
            panic!("expected for");
        };
        assert_eq!(variable, "c");
        let Node::If {
            branches,
            otherwise,
        } = &body[0]
        else {
            panic!("expected if");
        };
        assert_eq!(branches.len(), 2);
        assert_eq!(otherwise.len(), 1);
    }

    #[test]
    fn test_empty_tag_is_ignored() {
        assert!(parse_ok("{{ }}").is_empty());
    }

    #[test]
    fn test_unterminated_for() {
        let errors = parse_err("{{ for c in Cols }}x");
        assert_eq!(errors, vec!["unterminated 'for' block; expected '{{ end }}'"]);
    }

    #[test]
    fn test_collects_every_error() {
        let errors = parse_err("{{ end }}\n{{ if }}{{ end }}\n{{ a = b }}\n{{ else }}");
        assert_eq!(errors.len(), 4);
        assert_eq!(errors[0], "'end' without a matching 'for' or 'if'");
        assert_eq!(errors[1], "expected a condition after 'if'");
        assert!(errors[2].contains("did you mean '=='"));
        assert_eq!(errors[3], "'else' without a matching 'if'");
    }

    #[test]
    fn test_for_syntax_errors() {
        assert_eq!(
            parse_err("{{ for in Cols }}{{ end }}"),
            vec!["expected a loop variable name after 'for', found 'in'"]
        );
        assert_eq!(
            parse_err("{{ for c of Cols }}{{ end }}"),
            vec!["expected 'in' after loop variable 'c', found 'of'"]
        );
        assert_eq!(
            parse_err("{{ for c in }}{{ end }}"),
            vec!["expected a sequence after 'in'"]
        );
    }

    #[test]
    fn test_rejected_block_tags_still_pair_with_end() {
        assert_eq!(
            parse_err("{{ for c in Cols }}{{ if = }}y{{ end }}{{ end }}"),
            vec!["unexpected character '='; did you mean '=='?"]
        );
        assert_eq!(
            parse_err("{{ for c of Cols }}{{ else }}{{ end }}"),
            vec!["expected 'in' after loop variable 'c', found 'of'"]
        );
        assert_eq!(
            parse_err("{{ if x }}a{{ end now }}"),
            vec!["unexpected 'now' after 'end'"]
        );
    }

    #[test]
    fn test_deep_expressions_are_rejected() {
        let deep = [
            format!("{{{{ {}x{} }}}}", "(".repeat(5000), ")".repeat(5000)),
            format!("{{{{ {}x }}}}", "!".repeat(5000)),
            format!("{{{{ {}x }}}}", "f ".repeat(5000)),
            format!("{{{{ {}x }}}}", "x or ".repeat(5000)),
            format!("{{{{ x{} }}}}", ".a".repeat(5000)),
            format!("{{{{ x{} }}}}", " | f".repeat(5000)),
        ];
        for src in &deep {
            assert_eq!(parse_err(src), vec!["expression nested too deeply"]);
        }

        let shallow = format!("{{{{ {}x{} }}}}", "(".repeat(20), ")".repeat(20));
        assert_eq!(output_expr(&shallow), ExprKind::Var("x".into()));
    }

    #[test]
    fn test_deep_blocks_are_rejected() {
        let src = format!(
            "{}x{}",
            "{{ if true }}".repeat(5000),
            "{{ end }}".repeat(5000)
        );
        let errors = parse(&src).expect_err("expected syntax errors");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "blocks nested too deeply");
        assert_eq!(errors[0].column, 64 * "{{ if true }}".len() + 1);
    }

    #[test]
    fn test_trailing_tokens() {
        assert_eq!(
            parse_err("{{ a.b ) }}"),
            vec!["unexpected ')' after expression"]
        );
    }

    #[test]
    fn test_error_messages_stay_on_one_line() {
        assert_eq!(
            parse_err(r#"{{ a "x\ny" }}"#),
            vec![r#"unexpected string "x\ny" after expression"#]
        );
    }
}
