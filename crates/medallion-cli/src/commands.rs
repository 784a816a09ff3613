use std::path::Path;

use anyhow::{Result, bail};
use comfy_table::Table;
use tracing::{info_span, warn};

use medallion_cli::export::{ExportedFile, export_outputs};
use medallion_cli::pipeline::{
    ConfigOverrides, ProjectResult, ReloadResult, apply_overrides, default_key_registry,
    load_config, project, reload, validate,
};
use medallion_ingest::{discover_source_files, missing_source_files};
use medallion_model::{GoldView, Layer, PipelineConfig, TableRegistry};
use medallion_transform::LoadContext;

use crate::cli::{CheckArgs, ReloadArgs, SourceArgs, TablesArgs};
use crate::summary::apply_table_style;
use crate::types::{CheckSummary, ReloadSummary, ViewSummary};

pub fn run_tables(args: &TablesArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let registry = TableRegistry::from_config(&config)?;
    let sources = args
        .source_dir
        .as_deref()
        .map(|root| discover_source_files(&registry, root));

    let mut table = Table::new();
    let mut header = vec!["Layer", "Table", "Source", "Description"];
    if sources.is_some() {
        header.push("Found");
    }
    table.set_header(header);
    apply_table_style(&mut table);

    for (idx, entry) in registry.tables().iter().enumerate() {
        for layer in [Layer::Bronze, Layer::Silver] {
            let mut row = vec![
                layer.to_string(),
                registry.qualified_name(layer, entry.kind),
                entry.source_file.display().to_string(),
                entry.kind.description().to_string(),
            ];
            if let Some(sources) = &sources {
                let found = sources.get(idx).is_some_and(|source| source.exists);
                row.push(if found { "yes" } else { "no" }.to_string());
            }
            table.add_row(row);
        }
    }
    for view in GoldView::ALL {
        let mut row = vec![
            Layer::Gold.to_string(),
            registry.qualified_view(view),
            "-".to_string(),
            view.description().to_string(),
        ];
        if sources.is_some() {
            row.push("-".to_string());
        }
        table.add_row(row);
    }
    println!("{table}");
    Ok(())
}

pub fn run_reload(args: &ReloadArgs) -> Result<ReloadSummary> {
    let source = &args.source;
    let span = info_span!("reload_command", source_dir = %source.source_dir.display());
    let _guard = span.enter();

    let (config, ctx) = prepare(source)?;
    let (reloaded, projected) =
        reload_and_project(source, &config, ctx, args.output_dir.as_deref())?;

    let mut exported = Vec::new();
    if let (Some(dir), Some(projected)) = (&args.output_dir, &projected) {
        exported = export_outputs(dir, &reloaded.warehouse, &projected.gold)?;
    }

    Ok(build_reload_summary(source, &config, reloaded, projected, exported))
}

pub fn run_check(args: &CheckArgs) -> Result<CheckSummary> {
    let source = &args.source;
    let span = info_span!("check_command", source_dir = %source.source_dir.display());
    let _guard = span.enter();

    let (config, ctx) = prepare(source)?;
    let (reloaded, projected) = reload_and_project(source, &config, ctx, None)?;

    let report = match &projected {
        Some(projected) => Some(validate(&reloaded, &projected.gold, ctx)?),
        None => None,
    };

    Ok(CheckSummary {
        reload: build_reload_summary(source, &config, reloaded, projected, Vec::new()),
        report,
    })
}

fn prepare(source: &SourceArgs) -> Result<(PipelineConfig, LoadContext)> {
    if !source.source_dir.is_dir() {
        bail!("source directory not found: {}", source.source_dir.display());
    }
    let mut config = load_config(source.config.as_deref())?;
    apply_overrides(
        &mut config,
        ConfigOverrides {
            atomic: source.atomic,
            stable_keys: source.stable_keys,
        },
    );

    let registry = TableRegistry::from_config(&config)?;
    for missing in missing_source_files(&registry, &source.source_dir) {
        warn!(
            table = %missing.kind,
            path = %missing.path.display(),
            "source extract missing"
        );
    }

    let ctx = LoadContext::now();
    let ctx = match source.as_of {
        Some(as_of) => ctx.with_as_of(as_of),
        None => ctx,
    };
    Ok((config, ctx))
}

/// Reload, then project gold when the reload succeeded.
fn reload_and_project(
    source: &SourceArgs,
    config: &PipelineConfig,
    ctx: LoadContext,
    output_dir: Option<&Path>,
) -> Result<(ReloadResult, Option<ProjectResult>)> {
    let reloaded = reload(&source.source_dir, config, ctx)?;
    if !reloaded.outcome.is_success() {
        return Ok((reloaded, None));
    }
    let key_registry = source
        .key_registry
        .clone()
        .unwrap_or_else(|| default_key_registry(&source.source_dir, output_dir));
    let projected = project(
        &reloaded.warehouse,
        config.reload.surrogate_keys,
        &key_registry,
    )?;
    Ok((reloaded, Some(projected)))
}

fn build_reload_summary(
    source: &SourceArgs,
    config: &PipelineConfig,
    reloaded: ReloadResult,
    projected: Option<ProjectResult>,
    exported: Vec<ExportedFile>,
) -> ReloadSummary {
    let registry = reloaded.warehouse.registry();
    let (views, key_registry) = match projected {
        Some(projected) => {
            let views = GoldView::ALL
                .into_iter()
                .map(|view| ViewSummary {
                    view: registry.qualified_view(view),
                    description: view.description().to_string(),
                    rows: projected.gold.get(view).height(),
                })
                .collect();
            (views, projected.key_registry)
        }
        None => (Vec::new(), None),
    };
    ReloadSummary {
        source_dir: source.source_dir.clone(),
        commit_mode: config.reload.commit_mode,
        key_strategy: config.reload.surrogate_keys,
        outcome: reloaded.outcome,
        views,
        exported,
        key_registry,
    }
}
