//! Single-snippet generation.

use snipgen_core::{ColumnDetail, Snippet, TableContext};
use snipgen_template::Template;

use crate::{
    context::{RenderContext, helpers},
    marker::ErrorMarker,
};

/// Render `snippet` against the given tables.
///
/// Always returns text: on any failure the result is an [`ErrorMarker`].
/// Absent `namespace` and `program_name` are bound as empty strings.
pub fn generate(
    main: Option<&TableContext>,
    snippet: Option<&Snippet>,
    namespace: Option<&str>,
    program_name: Option<&str>,
    detail: Option<&TableContext>,
) -> String {
    try_generate(main, snippet, namespace, program_name, detail)
        .unwrap_or_else(|marker| marker.to_string())
}

/// Like [`generate`], but keeps failures apart from generated text.
pub fn try_generate(
    main: Option<&TableContext>,
    snippet: Option<&Snippet>,
    namespace: Option<&str>,
    program_name: Option<&str>,
    detail: Option<&TableContext>,
) -> Result<String, ErrorMarker> {
    let Some(main) = main else {
        return Err(failed(ErrorMarker::MissingMainTable, snippet));
    };
    let Some(snippet) = snippet.filter(|s| !s.is_blank()) else {
        return Err(failed(ErrorMarker::MissingTemplate, snippet));
    };

    let render = RenderContext::new(main)
        .detail(detail)
        .namespace(namespace)
        .program_name(program_name);

    match render_snippet(snippet, &render) {
        Ok(output) => {
            log::debug!(
                "rendered snippet '{}' for table '{}' ({} bytes)",
                snippet.name,
                main.table_name,
                output.len()
            );
            Ok(output)
        }
        Err(err) => Err(failed(err, Some(snippet))),
    }
}

/// Render against a single table described by name and columns.
///
/// The class name is derived from `table_name`. At least one column is
/// required.
pub fn generate_for_table(
    table_name: &str,
    columns: &[ColumnDetail],
    snippet: Option<&Snippet>,
    namespace: Option<&str>,
    program_name: Option<&str>,
) -> String {
    if columns.is_empty() {
        return failed(ErrorMarker::NoColumns, snippet).to_string();
    }
    let main = TableContext::new(table_name, columns.to_vec()).primary();
    generate(Some(&main), snippet, namespace, program_name, None)
}

fn render_snippet(snippet: &Snippet, render: &RenderContext<'_>) -> Result<String, ErrorMarker> {
    let template = Template::parse(snippet.name.as_str(), snippet.template.as_str())
        .map_err(|err| ErrorMarker::from_parse_error(&err))?;
    let context = render
        .to_context()
        .map_err(|err| ErrorMarker::Evaluation(err.to_string()))?;
    template
        .render(&context, &helpers())
        .map_err(|err| ErrorMarker::Evaluation(err.to_string()))
}

fn failed(marker: ErrorMarker, snippet: Option<&Snippet>) -> ErrorMarker {
    let name = snippet.map_or("<none>", |s| s.name.as_str());
    log::warn!("snippet '{}' produced an error marker: {:?}", name, marker);
    marker
}

/// Owned inputs for [`generate`], assembled step by step.
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    pub main: Option<TableContext>,
    pub detail: Option<TableContext>,
    pub namespace: Option<String>,
    pub program_name: Option<String>,
}

impl GenerationRequest {
    pub fn new(main: TableContext) -> Self {
        Self {
            main: Some(main),
            ..Self::default()
        }
    }

    pub fn with_detail(mut self, detail: TableContext) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_program_name(mut self, program_name: impl Into<String>) -> Self {
        self.program_name = Some(program_name.into());
        self
    }

    pub fn has_detail(&self) -> bool {
        self.detail.is_some()
    }

    /// Render one snippet for this request.
    pub fn generate(&self, snippet: &Snippet) -> String {
        self.try_generate(snippet)
            .unwrap_or_else(|marker| marker.to_string())
    }

    pub fn try_generate(&self, snippet: &Snippet) -> Result<String, ErrorMarker> {
        try_generate(
            self.main.as_ref(),
            Some(snippet),
            self.namespace.as_deref(),
            self.program_name.as_deref(),
            self.detail.as_ref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> TableContext {
        TableContext::new("orders", vec![ColumnDetail::new("id", "int")])
    }

    #[test]
    fn test_missing_main_table() {
        let snippet = Snippet::new("Model", "{{ NameSpace }}");
        let out = generate(None, Some(&snippet), None, None, None);
        assert_eq!(out, "// Error: Main table context is null.");
    }

    #[test]
    fn test_missing_or_blank_template() {
        let table = table();
        let blank = Snippet::new("Model", "  \n ");
        assert_eq!(
            generate(Some(&table), None, None, None, None),
            "// Error: Snippet or snippet template not provided or empty."
        );
        assert_eq!(
            generate(Some(&table), Some(&blank), None, None, None),
            "// Error: Snippet or snippet template not provided or empty."
        );
    }

    #[test]
    fn test_main_table_checked_before_template() {
        assert_eq!(
            generate(None, None, None, None, None),
            "// Error: Main table context is null."
        );
    }

    #[test]
    fn test_zero_columns_allowed_in_canonical_mode() {
        let table = TableContext::new("orders", Vec::new());
        let snippet = Snippet::new("Model", "[{{ for c in MainTable.SelectedColumns }}x{{ end }}]");
        assert_eq!(generate(Some(&table), Some(&snippet), None, None, None), "[]");
    }

    #[test]
    fn test_generate_for_table_requires_columns() {
        let snippet = Snippet::new("Model", "{{ MainTable.ClassName }}");
        assert_eq!(
            generate_for_table("orders", &[], Some(&snippet), None, None),
            "// Error: No columns provided."
        );
        assert_eq!(
            generate_for_table(
                "order_lines",
                &[ColumnDetail::new("id", "int")],
                Some(&snippet),
                None,
                None
            ),
            "OrderLines"
        );
    }

    #[test]
    fn test_request_builder() {
        let request = GenerationRequest::new(table())
            .with_namespace("Acme")
            .with_program_name("Shop")
            .with_detail(TableContext::new("order_lines", Vec::new()));
        let snippet = Snippet::new(
            "Model",
            "{{ NameSpace }}.{{ ProgramName }}:{{ DetailTable.ClassName }}:{{ Tables[1].TableName }}",
        );

        assert!(request.has_detail());
        assert_eq!(request.generate(&snippet), "Acme.Shop:OrderLines:order_lines");
    }

    #[test]
    fn test_try_generate_separates_failures_from_text() {
        let table = table();
        let commented = Snippet::new("Model", "// Error: codes map to HTTP statuses\n{{ MainTable.ClassName }}");
        assert_eq!(
            try_generate(Some(&table), Some(&commented), None, None, None),
            Ok("// Error: codes map to HTTP statuses\nOrders".to_string())
        );
        assert_eq!(
            try_generate(None, Some(&commented), None, None, None),
            Err(ErrorMarker::MissingMainTable)
        );
    }
}
