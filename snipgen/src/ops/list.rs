//! List operation - catalog and set overview.

use eyre::Result;
use snipgen_manifest::ProjectToml;

use super::generate::load_catalog;
use crate::reports::{ListReport, SetEntry, SnippetEntry, SnippetOrigin};

/// Execute the list operation.
pub fn list(project: &ProjectToml) -> Result<ListReport> {
    let manifest = project.manifest();
    let catalog = load_catalog(project)?;

    let snippets = catalog
        .snippets()
        .iter()
        .map(|snippet| {
            let origin = if snippet.is_user_defined {
                SnippetOrigin::User
            } else {
                SnippetOrigin::Default
            };
            let extension = snippet.output_extension.trim().trim_start_matches('.');
            SnippetEntry {
                name: snippet.name.clone(),
                applicability: snippet.applicability,
                extension: (if extension.is_empty() { "txt" } else { extension }).to_string(),
                origin,
                description: Some(snippet.description.trim())
                    .filter(|d| !d.is_empty())
                    .map(str::to_string),
            }
        })
        .collect();

    let sets = manifest
        .snippet_sets()
        .into_iter()
        .map(|set| SetEntry {
            selected: manifest.project.sets.contains(&set.name),
            name: set.name,
            description: set.description,
            snippets: set.snippet_names,
        })
        .collect();

    Ok(ListReport { snippets, sets })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use snipgen_core::{Applicability, Snippet};

    use super::*;

    #[test]
    fn test_list_marks_user_overrides_and_selected_sets() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("snipgen.toml"),
            "[project]\nname = \"X\"\nsets = [\"b\"]\n\n[snippets]\ndefaults = \"d.json\"\nuser = \"u.json\"\n\n[sets.a]\nsnippets = [\"Model\"]\n\n[sets.b]\nsnippets = [\"Dto\"]\n",
        )
        .unwrap();
        let defaults = vec![
            Snippet::new("Model", "x").with_extension(".cs"),
            Snippet::new("Dto", "y").with_applicability(Applicability::Detail),
        ];
        let user = vec![Snippet::new("Model", "z").with_description("Mine")];
        fs::write(dir.path().join("d.json"), serde_json::to_string(&defaults).unwrap()).unwrap();
        fs::write(dir.path().join("u.json"), serde_json::to_string(&user).unwrap()).unwrap();

        let project = ProjectToml::open_in(dir.path()).unwrap();
        let report = list(&project).unwrap();

        let names: Vec<_> = report.snippets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Dto", "Model"]);
        assert_eq!(report.snippets[0].origin, SnippetOrigin::Default);
        assert_eq!(report.snippets[0].extension, "txt");
        assert_eq!(report.snippets[1].origin, SnippetOrigin::User);
        assert_eq!(report.snippets[1].description.as_deref(), Some("Mine"));

        let selected: Vec<_> = report.sets.iter().map(|s| (s.name.as_str(), s.selected)).collect();
        assert_eq!(selected, vec![("a", false), ("b", true)]);
    }
}
