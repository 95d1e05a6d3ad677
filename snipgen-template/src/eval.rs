//! Tree-walking evaluator.

use std::borrow::Cow;
use std::cmp::Ordering;

use indexmap::IndexMap;

use crate::{
    ast::{BinaryOp, Expr, ExprKind, Node},
    context::Context,
    error::{RenderError, RenderErrorKind},
    helpers::Helpers,
    value::{NULL, Value},
};

/// State of one enclosing `for` loop, exposed to templates as `for`.
#[derive(Debug)]
struct LoopState {
    index: usize,
    len: usize,
}

impl LoopState {
    fn as_value(&self) -> Value {
        let mut meta = IndexMap::new();
        meta.insert("index".to_string(), Value::from(self.index));
        meta.insert("first".to_string(), Value::Bool(self.index == 0));
        meta.insert("last".to_string(), Value::Bool(self.index + 1 == self.len));
        Value::Object(meta)
    }
}

pub(crate) struct Evaluator<'a> {
    source: &'a str,
    context: &'a Context,
    helpers: &'a Helpers,
    /// Loop variables, innermost last
    locals: Vec<(&'a str, Value)>,
    loops: Vec<LoopState>,
}

impl<'a> Evaluator<'a> {
    pub(crate) fn new(source: &'a str, context: &'a Context, helpers: &'a Helpers) -> Self {
        Self {
            source,
            context,
            helpers,
            locals: Vec::new(),
            loops: Vec::new(),
        }
    }

    fn error(&self, expr: &Expr, kind: RenderErrorKind) -> RenderError {
        RenderError::new(self.source, expr.span, kind)
    }

    pub(crate) fn render(&mut self, nodes: &'a [Node], out: &mut String) -> Result<(), RenderError> {
        for node in nodes {
            match node {
                Node::Text(span) => out.push_str(&self.source[span.start..span.end]),
                Node::Output(expr) => {
                    let value = self.eval(expr)?;
                    let text = value.as_text().ok_or_else(|| {
                        self.error(
                            expr,
                            RenderErrorKind::NotRenderable {
                                found: value.type_name(),
                            },
                        )
                    })?;
                    out.push_str(&text);
                }
                Node::For {
                    variable,
                    iterable,
                    body,
                } => {
                    let items = match self.eval(iterable)?.into_owned() {
                        Value::Null => Vec::new(),
                        Value::List(items) => items,
                        other => {
                            return Err(self.error(
                                iterable,
                                RenderErrorKind::NotIterable {
                                    found: other.type_name(),
                                },
                            ));
                        }
                    };
                    let len = items.len();
                    for (index, item) in items.into_iter().enumerate() {
                        self.locals.push((variable.as_str(), item));
                        self.loops.push(LoopState { index, len });
                        let result = self.render(body, out);
                        self.loops.pop();
                        self.locals.pop();
                        result?;
                    }
                }
                Node::If {
                    branches,
                    otherwise,
                } => {
                    let mut chosen = otherwise.as_slice();
                    for (condition, body) in branches {
                        if self.eval(condition)?.is_truthy() {
                            chosen = body.as_slice();
                            break;
                        }
                    }
                    self.render(chosen, out)?;
                }
            }
        }
        Ok(())
    }

    fn lookup(&self, name: &str) -> Cow<'_, Value> {
        if let Some((_, value)) = self.locals.iter().rev().find(|(local, _)| *local == name) {
            return Cow::Borrowed(value);
        }
        if name == "for" {
            if let Some(state) = self.loops.last() {
                return Cow::Owned(state.as_value());
            }
        }
        Cow::Borrowed(self.context.get(name).unwrap_or(&NULL))
    }

    fn eval(&self, expr: &Expr) -> Result<Cow<'_, Value>, RenderError> {
        let value = match &expr.kind {
            ExprKind::Literal(value) => Cow::Owned(value.clone()),
            ExprKind::Var(name) => self.lookup(name),
            ExprKind::Member(base, member) => match self.eval(base)? {
                Cow::Borrowed(value) => Cow::Borrowed(value.get(member).unwrap_or(&NULL)),
                Cow::Owned(value) => Cow::Owned(value.get(member).cloned().unwrap_or_default()),
            },
            ExprKind::Index(base, key) => {
                let key = self.eval(key)?;
                match self.eval(base)? {
                    Cow::Borrowed(value) => Cow::Borrowed(value.index(&key).unwrap_or(&NULL)),
                    Cow::Owned(value) => Cow::Owned(value.index(&key).cloned().unwrap_or_default()),
                }
            }
            ExprKind::Call { name, arg } => Cow::Owned(self.call(expr, name, arg)?),
            ExprKind::Not(operand) => Cow::Owned(Value::Bool(!self.eval(operand)?.is_truthy())),
            ExprKind::Binary { op, lhs, rhs } => Cow::Owned(self.binary(expr, *op, lhs, rhs)?),
        };
        Ok(value)
    }

    fn call(&self, expr: &Expr, name: &str, arg: &Expr) -> Result<Value, RenderError> {
        let Some(helper) = self.helpers.get(name) else {
            return Err(self.error(
                expr,
                RenderErrorKind::UnknownFunction {
                    name: name.to_string(),
                },
            ));
        };
        let value = self.eval(arg)?;
        let Some(text) = value.as_text() else {
            return Err(self.error(
                arg,
                RenderErrorKind::InvalidArgument {
                    name: name.to_string(),
                    found: value.type_name(),
                },
            ));
        };
        helper.call(&text).map(Value::Str).map_err(|message| {
            self.error(
                expr,
                RenderErrorKind::HelperFailed {
                    name: name.to_string(),
                    message,
                },
            )
        })
    }

    fn binary(&self, expr: &Expr, op: BinaryOp, lhs: &Expr, rhs: &Expr) -> Result<Value, RenderError> {
        // `and` / `or` short-circuit and yield a bool
        match op {
            BinaryOp::And => {
                let result = self.eval(lhs)?.is_truthy() && self.eval(rhs)?.is_truthy();
                return Ok(Value::Bool(result));
            }
            BinaryOp::Or => {
                let result = self.eval(lhs)?.is_truthy() || self.eval(rhs)?.is_truthy();
                return Ok(Value::Bool(result));
            }
            _ => {}
        }

        let left = self.eval(lhs)?;
        let right = self.eval(rhs)?;
        let result = match op {
            BinaryOp::Eq => left.loose_eq(&right),
            BinaryOp::Ne => !left.loose_eq(&right),
            _ => {
                let ordering = left.partial_order(&right).ok_or_else(|| {
                    self.error(
                        expr,
                        RenderErrorKind::Incomparable {
                            lhs: left.type_name(),
                            rhs: right.type_name(),
                        },
                    )
                })?;
                match op {
                    BinaryOp::Lt => ordering == Ordering::Less,
                    BinaryOp::Le => ordering != Ordering::Greater,
                    BinaryOp::Gt => ordering == Ordering::Greater,
                    _ => ordering != Ordering::Less,
                }
            }
        };
        Ok(Value::Bool(result))
    }
}
