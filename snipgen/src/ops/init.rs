//! Init operation - project scaffolding.

use std::path::Path;

use eyre::{Context, Result};
use snipgen_core::{Applicability, ColumnDetail, File, Snippet, TableContext};
use snipgen_manifest::MANIFEST_FILE_NAME;

use crate::reports::{InitReport, ScaffoldedFile};

const MODEL_TEMPLATE: &str = r#"namespace {{ NameSpace }}
{
    public class {{ MainTable.ClassName }}
    {
{{~ for c in MainTable.SelectedColumns }}
        public {{ map_type c.DataType }}{{ if c.IsNullable && map_type c.DataType != "string" }}?{{ end }} {{ normalize_name c.ColumnName }} { get; set; }
{{~ end }}
    }
}
"#;

const DTO_TEMPLATE: &str = r#"namespace {{ NameSpace }}
{
    public class {{ MainTable.ClassName }}Dto
    {
{{~ for c in MainTable.SelectedColumns }}
        public {{ map_type c.DataType }} {{ normalize_name c.ColumnName }} { get; set; }
{{~ end }}
{{~ if DetailTable }}
        public List<{{ DetailTable.ClassName }}Dto> {{ DetailTable.ClassName }}Items { get; set; } = new();
{{~ end }}
    }
}
"#;

/// Snippets shipped with a new project.
pub fn default_snippets() -> Vec<Snippet> {
    vec![
        Snippet::new("CSharpModel", MODEL_TEMPLATE)
            .with_description("C# entity class with one property per column")
            .with_applicability(Applicability::Main)
            .with_extension("cs"),
        Snippet::new("CSharpDto", DTO_TEMPLATE)
            .with_description("C# transfer object, with a collection of detail rows when a detail table is given")
            .with_extension("cs"),
    ]
}

fn sample_table() -> TableContext {
    TableContext::new(
        "orders",
        vec![
            ColumnDetail::new("order_id", "int").primary_key(),
            ColumnDetail::new("customer_name", "nvarchar"),
            ColumnDetail::new("total", "money"),
            ColumnDetail::new("shipped_at", "datetime").nullable(),
        ],
    )
}

fn manifest(name: &str) -> String {
    format!(
        r#"[project]
name = "{name}"
namespace = "{name}"
program_name = "{name}"
output = "generated"
sets = ["models"]

[snippets]
defaults = "snippets/defaults.json"
user = "snippets/user.json"

[sets.models]
description = "Entity and transfer classes"
snippets = ["CSharpModel", "CSharpDto"]
"#
    )
}

/// Project name for a directory: its final component, or `Project`.
fn project_name(dir: &Path) -> String {
    let absolute = std::path::absolute(dir).unwrap_or_else(|_| dir.to_path_buf());
    absolute
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.trim().is_empty())
        .map_or_else(|| "Project".to_string(), str::to_string)
}

/// Execute the init operation.
///
/// Existing files are left untouched.
pub fn init(dir: &Path, name: Option<&str>) -> Result<InitReport> {
    let name = name.map_or_else(|| project_name(dir), str::to_string);

    let snippets = serde_json::to_string_pretty(&default_snippets())
        .wrap_err("Failed to serialize default snippets")?;
    let table = serde_json::to_string_pretty(&sample_table())
        .wrap_err("Failed to serialize sample table")?;

    let files = [
        File::scaffold(dir.join(MANIFEST_FILE_NAME), manifest(&name)),
        File::scaffold(dir.join("snippets").join("defaults.json"), snippets + "\n"),
        File::scaffold(dir.join("tables").join("orders.json"), table + "\n"),
    ];

    let mut scaffolded = Vec::new();
    for file in &files {
        let result = file
            .write()
            .wrap_err_with(|| format!("Failed to write {}", file.path().display()))?;
        scaffolded.push(ScaffoldedFile {
            path: file.path().to_path_buf(),
            result,
        });
    }

    Ok(InitReport {
        project_name: name,
        files: scaffolded,
    })
}
