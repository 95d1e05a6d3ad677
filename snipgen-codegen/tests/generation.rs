use snipgen_codegen::{ErrorMarker, GenerationRequest, generate, generate_batch, try_generate, SnippetCatalog};
use snipgen_core::{Applicability, ColumnDetail, Snippet, TableContext, map_type, normalize_property_name};

const MODEL_TEMPLATE: &str = "public class {{ MainTable.ClassName }} { {{ for c in MainTable.SelectedColumns }}public {{ map_type c.DataType }} {{ normalize_name c.ColumnName }} { get; set; }{{ end }} }";

fn products() -> TableContext {
    TableContext::new(
        "products",
        vec![
            ColumnDetail::new("product_id", "int").primary_key(),
            ColumnDetail::new("display_name", "nvarchar"),
            ColumnDetail::new("unit_price", "decimal").nullable(),
            ColumnDetail::new("legacy_blob", "geography"),
        ],
    )
}

fn render(table: &TableContext, template: &str) -> String {
    let snippet = Snippet::new("Model", template);
    generate(Some(table), Some(&snippet), Some("Acme.Store"), Some("Store"), None)
}

#[test]
fn test_type_mapper_and_normalizer_properties() {
    assert_eq!(map_type("INT"), map_type("int"));
    assert_eq!(map_type("int"), "int");
    assert_eq!(map_type(""), "object");
    assert_eq!(map_type("mystery_type"), "object");
    assert_eq!(normalize_property_name("user_id"), "UserId");
    assert_eq!(normalize_property_name("userID"), "Userid");
    assert_eq!(normalize_property_name(""), "DefaultPropertyName");
}

#[test]
fn test_model_scenario() {
    let table = TableContext {
        class_name: "Testtable".to_string(),
        ..TableContext::new("TestTable", vec![ColumnDetail::new("DummyColumn", "int")])
    };
    let out = render(&table, MODEL_TEMPLATE);
    assert!(out.contains("public int Dummycolumn { get; set; }"), "{}", out);
    assert!(out.starts_with("public class Testtable {"));
}

#[test]
fn test_empty_namespace_substitutes_nothing() {
    let snippet = Snippet::new("Ns", "namespace [{{ NameSpace }}][{{ ProgramName }}]");
    let table = products();
    let out = generate(Some(&table), Some(&snippet), None, None, None);
    assert_eq!(out, "namespace [][]");
}

#[test]
fn test_one_block_per_column_in_order() {
    let template = "{{ for c in MainTable.SelectedColumns }}<{{ c.ColumnName }}>{{ end }}";
    assert_eq!(
        render(&products(), template),
        "<product_id><display_name><unit_price><legacy_blob>"
    );
    assert_eq!(render(&TableContext::new("empty", Vec::new()), template), "");
}

#[test]
fn test_rendering_is_deterministic() {
    let table = products();
    assert_eq!(render(&table, MODEL_TEMPLATE), render(&table, MODEL_TEMPLATE));
}

#[test]
fn test_unknown_type_degrades_to_object() {
    let out = render(
        &products(),
        "{{~ for c in MainTable.SelectedColumns ~}}\n{{ map_db_type_to_csharp c.DataType }}{{ if c.IsNullable && map_type c.DataType != \"string\" }}?{{ end }} {{ normalize_property_name c.ColumnName }};\n{{~ end }}",
    );
    insta::assert_snapshot!(out, @"int ProductId;string DisplayName;decimal? UnitPrice;object LegacyBlob;");
}

#[test]
fn test_unterminated_loop_returns_parse_marker() {
    let out = render(&products(), "{{ for c in MainTable.SelectedColumns }}\n{{ c.ColumnName }}");
    assert!(out.starts_with("// Snippet Template Parsing Error(s):"));
    insta::assert_snapshot!(out, @r"
    // Snippet Template Parsing Error(s):
    // Model(1,1): unterminated 'for' block; expected '{{ end }}'
    ");
}

#[test]
fn test_evaluation_failure_returns_marker() {
    let out = render(&products(), "before {{ shout MainTable.TableName }} after");
    assert_eq!(
        out,
        "// Error during code generation: unknown function 'shout' at line 1, column 11"
    );

    let snippet = Snippet::new("Model", "before {{ shout MainTable.TableName }} after");
    let err = try_generate(Some(&products()), Some(&snippet), None, None, None).unwrap_err();
    assert!(matches!(err, ErrorMarker::Evaluation(_)));
    assert_eq!(err.to_string(), out);
}

#[test]
fn test_deep_nesting_returns_marker() {
    let parens = format!("{{{{ {}x{} }}}}", "(".repeat(5000), ")".repeat(5000));
    let out = render(&products(), &parens);
    assert!(out.starts_with("// Snippet Template Parsing Error(s):"));
    assert!(out.contains("expression nested too deeply"));

    let blocks = format!("{}x{}", "{{ if true }}".repeat(5000), "{{ end }}".repeat(5000));
    let out = render(&products(), &blocks);
    insta::assert_snapshot!(out, @r"
    // Snippet Template Parsing Error(s):
    // Model(1,833): blocks nested too deeply
    ");
}

#[test]
fn test_detail_scenario() {
    let detail = TableContext::new(
        "order_lines",
        vec![ColumnDetail::new("line_id", "bigint")],
    );
    let snippet = Snippet::new(
        "Dto",
        "{{ for t in Tables }}{{ t.ClassName }}{{ if !for.last }}+{{ end }}{{ end }}|{{ if DetailTable }}{{ DetailTable.SelectedColumns[0].ColumnName | normalize_name }}{{ else }}none{{ end }}",
    );
    let main = TableContext::new("orders", Vec::new());

    assert_eq!(
        generate(Some(&main), Some(&snippet), None, None, Some(&detail)),
        "Orders+OrderLines|LineId"
    );
    assert_eq!(
        generate(Some(&main), Some(&snippet), None, None, None),
        "Orders|none"
    );
}

#[test]
fn test_catalog_batch_end_to_end() {
    let catalog = SnippetCatalog::from_json(
        r#"[
            { "Name": "Model", "Template": "class {{ MainTable.ClassName }}", "OutputExtension": "cs" },
            { "Name": "Lines", "Template": "x", "Applicability": "Detail" }
        ]"#,
        Some(r#"[{ "Name": "Model", "Template": "record {{ MainTable.ClassName }}", "OutputExtension": ".cs" }]"#),
    )
    .unwrap();
    assert_eq!(catalog.get("Lines").unwrap().applicability, Applicability::Detail);

    let request = GenerationRequest::new(products()).with_namespace("Acme");
    let output = generate_batch(&catalog, ["Lines", "Model"], &request);

    assert_eq!(output.skipped, vec!["Lines"]);
    assert_eq!(output.generated.len(), 1);
    assert_eq!(output.generated[0].content, "record Products");
    assert_eq!(output.generated[0].suggested_file_name, "ProductsModel.cs");
}
