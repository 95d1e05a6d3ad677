//! Generate operation - rendering snippets for a table.

use std::path::{Path, PathBuf};

use eyre::{Context, Result, eyre};
use snipgen_codegen::{GenerationRequest, SnippetCatalog, generate_batch, load_table};
use snipgen_manifest::ProjectToml;

use crate::reports::{GenerateReport, GenerationResult};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Main table metadata (JSON)
    pub table: &'a Path,
    /// Optional detail table metadata (JSON)
    pub detail: Option<&'a Path>,
    /// Snippet sets to render
    pub sets: &'a [String],
    /// Individual snippets to render
    pub snippets: &'a [String],
    /// Overrides the manifest's output directory
    pub output: Option<&'a Path>,
    /// Preview without writing files
    pub dry_run: bool,
}

/// Load the snippet catalog a project points at.
pub fn load_catalog(project: &ProjectToml) -> Result<SnippetCatalog> {
    let user = project.user_snippets_path();
    SnippetCatalog::load(&project.defaults_path(), user.as_deref())
        .wrap_err("Failed to load snippets")
}

/// Snippet names to render, in order.
///
/// Explicit sets and snippets win; otherwise the manifest's selected sets;
/// otherwise every snippet in the catalog.
fn snippet_names(
    project: &ProjectToml,
    catalog: &SnippetCatalog,
    opts: &GenerateOptions,
) -> Result<Vec<String>> {
    let manifest = project.manifest();

    if !opts.sets.is_empty() || !opts.snippets.is_empty() {
        let mut names = Vec::new();
        for set_name in opts.sets {
            let set = manifest
                .set(set_name)
                .ok_or_else(|| eyre!("Unknown snippet set '{}'", set_name))?;
            names.extend(set.snippet_names);
        }
        names.extend(opts.snippets.iter().cloned());
        return Ok(names);
    }

    let selected = manifest.selected_sets();
    if !selected.is_empty() {
        return Ok(selected.into_iter().flat_map(|s| s.snippet_names).collect());
    }

    Ok(catalog.snippets().iter().map(|s| s.name.clone()).collect())
}

/// Execute the generate operation.
pub fn generate(project: &ProjectToml, opts: GenerateOptions) -> Result<GenerateReport> {
    let manifest = project.manifest();
    let catalog = load_catalog(project)?;
    let names = snippet_names(project, &catalog, &opts)?;

    let mut request = GenerationRequest::new(load_table(opts.table)?);
    if let Some(detail) = opts.detail {
        request = request.with_detail(load_table(detail)?);
    }
    if let Some(namespace) = &manifest.project.namespace {
        request = request.with_namespace(namespace.as_str());
    }
    if let Some(program_name) = &manifest.project.program_name {
        request = request.with_program_name(program_name.as_str());
    }

    let output = generate_batch(&catalog, &names, &request);
    let table_name = request
        .main
        .as_ref()
        .map(|t| t.table_name.clone())
        .unwrap_or_default();

    let failed = output
        .generated
        .iter()
        .filter(|g| g.is_error())
        .map(|g| (g.snippet_name.clone(), g.content.clone()))
        .collect();

    let result = if opts.dry_run {
        GenerationResult::Preview(output.generated.clone())
    } else {
        let output_dir: PathBuf = opts
            .output
            .map_or_else(|| project.output_dir(), Path::to_path_buf);
        let files = output
            .write_to(&output_dir)
            .wrap_err("Failed to write generated files")?;
        GenerationResult::Written { output_dir, files }
    };

    Ok(GenerateReport {
        project_name: manifest.project.name.clone(),
        table_name,
        warnings: output.warnings,
        skipped: output.skipped,
        failed,
        result,
    })
}
