//! Check operation - project and template validation.

use eyre::Result;
use snipgen_manifest::ProjectToml;
use snipgen_template::Template;

use super::generate::load_catalog;
use crate::reports::CheckReport;

/// Execute the check operation.
///
/// The manifest has already been validated by [`ProjectToml::open`]. This
/// loads the snippet catalog, parses every template and cross-checks set
/// entries against the catalog.
pub fn check(project: &ProjectToml) -> Result<CheckReport> {
    let manifest = project.manifest();
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let catalog = match load_catalog(project) {
        Ok(catalog) => Some(catalog),
        Err(err) => {
            errors.push(format!("{:#}", err));
            None
        }
    };

    if let Some(catalog) = &catalog {
        for snippet in catalog.snippets() {
            if snippet.is_blank() {
                warnings.push(format!("snippet '{}' has an empty template", snippet.name));
                continue;
            }
            if let Err(err) = Template::parse(snippet.name.as_str(), snippet.template.as_str()) {
                log::debug!("snippet '{}' failed to parse", snippet.name);
                errors.extend(err.messages());
            }
        }

        for set in manifest.snippet_sets() {
            for name in &set.snippet_names {
                if catalog.get(name).is_none() {
                    warnings.push(format!("set '{}' names unknown snippet '{}'", set.name, name));
                }
            }
        }
    }

    Ok(CheckReport {
        config_path: project.path().to_path_buf(),
        snippet_count: catalog.as_ref().map_or(0, |c| c.len()),
        set_count: manifest.sets.len(),
        errors,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use snipgen_core::Snippet;

    use super::*;

    fn project(snippets: &[Snippet]) -> (tempfile::TempDir, ProjectToml) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("snipgen.toml"),
            "[project]\nname = \"Inventory\"\n\n[snippets]\ndefaults = \"defaults.json\"\n\n[sets.models]\nsnippets = [\"Model\", \"Form\"]\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("defaults.json"),
            serde_json::to_string(snippets).unwrap(),
        )
        .unwrap();
        let project = ProjectToml::open_in(dir.path()).unwrap();
        (dir, project)
    }

    #[test]
    fn test_check_valid_project_warns_on_unknown_set_entry() {
        let (_dir, project) = project(&[Snippet::new("Model", "{{ MainTable.ClassName }}")]);
        let report = check(&project).unwrap();

        assert!(report.is_valid());
        assert_eq!(report.snippet_count, 1);
        assert_eq!(report.set_count, 1);
        assert_eq!(report.warnings, vec!["set 'models' names unknown snippet 'Form'"]);
    }

    #[test]
    fn test_check_reports_template_errors() {
        let (_dir, project) = project(&[
            Snippet::new("Model", "{{ MainTable. }}"),
            Snippet::new("Form", "{{ end }}"),
        ]);
        let report = check(&project).unwrap();

        assert!(!report.is_valid());
        assert_eq!(report.errors.len(), 2);
        assert_eq!(
            report.errors[0],
            "Form(1,1): 'end' without a matching 'for' or 'if'"
        );
        assert!(report.errors[1].starts_with("Model(1,"));
    }

    #[test]
    fn test_check_missing_catalog_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("snipgen.toml"),
            "[project]\nname = \"X\"\n\n[snippets]\ndefaults = \"missing.json\"\n",
        )
        .unwrap();
        let project = ProjectToml::open_in(dir.path()).unwrap();

        let report = check(&project).unwrap();
        assert!(!report.is_valid());
        assert_eq!(report.snippet_count, 0);
    }
}
