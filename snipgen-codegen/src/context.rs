//! The values and helper functions a snippet is rendered against.

use snipgen_core::{TableContext, map_type, normalize_class_name, normalize_property_name};
use snipgen_template::{Context, Helpers, Value};

/// Inputs for one render, before they are bound as template variables.
///
/// Binds `MainTable`, `DetailTable` (only when present), `Tables` (main
/// first, then detail), `NameSpace` and `ProgramName`. Absent strings are
/// bound as empty strings.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub main: &'a TableContext,
    pub detail: Option<&'a TableContext>,
    pub namespace: &'a str,
    pub program_name: &'a str,
}

impl<'a> RenderContext<'a> {
    pub fn new(main: &'a TableContext) -> Self {
        Self {
            main,
            detail: None,
            namespace: "",
            program_name: "",
        }
    }

    pub fn detail(mut self, detail: Option<&'a TableContext>) -> Self {
        self.detail = detail;
        self
    }

    pub fn namespace(mut self, namespace: Option<&'a str>) -> Self {
        self.namespace = namespace.unwrap_or_default();
        self
    }

    pub fn program_name(mut self, program_name: Option<&'a str>) -> Self {
        self.program_name = program_name.unwrap_or_default();
        self
    }

    /// The tables in context order: main first, then detail.
    pub fn tables(&self) -> Vec<&'a TableContext> {
        std::iter::once(self.main).chain(self.detail).collect()
    }

    /// Bind everything as template variables.
    pub fn to_context(&self) -> Result<Context, serde_json::Error> {
        let main = Value::from_serialize(self.main)?;
        let detail = self.detail.map(Value::from_serialize).transpose()?;

        let mut tables = vec![main.clone()];
        tables.extend(detail.clone());

        let mut context = Context::new().with("MainTable", main);
        if let Some(detail) = detail {
            context.insert("DetailTable", detail);
        }
        context.insert("Tables", Value::List(tables));
        context.insert("NameSpace", self.namespace);
        context.insert("ProgramName", self.program_name);
        Ok(context)
    }
}

fn map_type_helper(source: &str) -> String {
    map_type(source).to_string()
}

/// The helper capability table bound for every snippet render.
pub fn helpers() -> Helpers {
    Helpers::new()
        .register("normalize_name", normalize_property_name)
        .register("normalize_property_name", normalize_property_name)
        .register("normalize_class_name", normalize_class_name)
        .register("map_type", map_type_helper)
        .register("map_db_type_to_csharp", map_type_helper)
}
