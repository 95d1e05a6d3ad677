use crate::{
    ast::Node,
    context::Context,
    error::{ParseError, RenderError, TemplateError},
    eval::Evaluator,
    helpers::Helpers,
    parser,
};

/// A parsed template, ready to render any number of times.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    source: String,
    nodes: Vec<Node>,
}

impl Template {
    /// Parse `source`. `name` identifies the template in diagnostics.
    ///
    /// All syntax problems are reported together.
    pub fn parse(name: impl Into<String>, source: impl Into<String>) -> Result<Self, ParseError> {
        let name = name.into();
        let source = source.into();
        match parser::parse(&source) {
            Ok(nodes) => {
                log::trace!("parsed template '{}' ({} nodes)", name, nodes.len());
                Ok(Self {
                    name,
                    source,
                    nodes,
                })
            }
            Err(errors) => Err(ParseError::new(&name, &source, errors)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Render against a context. Stops at the first evaluation error.
    pub fn render(&self, context: &Context, helpers: &Helpers) -> Result<String, RenderError> {
        let mut out = String::with_capacity(self.source.len());
        Evaluator::new(&self.source, context, helpers).render(&self.nodes, &mut out)?;
        Ok(out)
    }
}

/// Parse and render a template in one step.
pub fn render(template: &str, context: &Context, helpers: &Helpers) -> Result<String, TemplateError> {
    let template = Template::parse("template", template)?;
    Ok(template.render(context, helpers)?)
}
