//! Reload pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Configure**: load the pipeline config and apply flag overrides
//! 2. **Reload**: bronze load from the extracts, then the silver rebuild
//! 3. **Project**: compute the gold views, persisting stable keys if enabled
//! 4. **Validate**: run the quality suite over silver and gold
//!
//! Each stage takes the output of the previous stage and returns typed results.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{debug, info, info_span};

use medallion_model::{CommitMode, KeyStrategy, PipelineConfig, QualityReport, TableRegistry};
use medallion_transform::LoadContext;
use medallion_validate::{CheckInput, run_suite};
use medallion_warehouse::{
    GoldFrames, KeyRegistry, ReloadOutcome, SurrogateKeys, Warehouse, project_gold,
    run_full_reload,
};

/// File name of the stable key registry when no path is given.
pub const DEFAULT_KEY_REGISTRY: &str = "surrogate_keys.json";

// ============================================================================
// Stage 1: Configure
// ============================================================================

/// Flag values that override the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub atomic: bool,
    pub stable_keys: bool,
}

/// Read the config file if one is given, otherwise use the built-in defaults.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is invalid.
pub fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    match path {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("load config {}", path.display())),
        None => Ok(PipelineConfig::default()),
    }
}

/// Flags only ever switch features on; an unset flag keeps the config value.
pub fn apply_overrides(config: &mut PipelineConfig, overrides: ConfigOverrides) {
    if overrides.atomic {
        config.reload.commit_mode = CommitMode::Atomic;
    }
    if overrides.stable_keys {
        config.reload.surrogate_keys = KeyStrategy::Stable;
    }
}

// ============================================================================
// Stage 2: Reload
// ============================================================================

/// Warehouse state after the reload stage.
#[derive(Debug)]
pub struct ReloadResult {
    pub warehouse: Warehouse,
    pub outcome: ReloadOutcome,
}

/// Build the registry and run a full reload over `source_dir`.
///
/// A failed batch is not an error here; it is carried in the outcome.
///
/// # Errors
///
/// Returns an error if the registry cannot be built from the config.
pub fn reload(
    source_dir: &Path,
    config: &PipelineConfig,
    ctx: LoadContext,
) -> Result<ReloadResult> {
    let span = info_span!("reload", source_dir = %source_dir.display());
    let _guard = span.enter();
    let start = Instant::now();

    let registry = TableRegistry::from_config(config).context("build table registry")?;
    let mut warehouse = Warehouse::new(registry);
    let outcome = run_full_reload(
        &mut warehouse,
        source_dir,
        ctx,
        config.reload.commit_mode,
    );
    info!(
        success = outcome.is_success(),
        duration_ms = start.elapsed().as_millis(),
        "reload finished"
    );
    Ok(ReloadResult { warehouse, outcome })
}

// ============================================================================
// Stage 3: Project
// ============================================================================

/// Gold views and, for stable keys, where the registry was persisted.
#[derive(Debug)]
pub struct ProjectResult {
    pub gold: GoldFrames,
    pub key_registry: Option<PathBuf>,
}

/// Compute the gold views.
///
/// With stable keys the registry at `key_registry` is read first and written
/// back afterwards, so keys survive across runs.
///
/// # Errors
///
/// Returns an error if silver is incomplete or the registry cannot be read or
/// written.
pub fn project(
    warehouse: &Warehouse,
    strategy: KeyStrategy,
    key_registry: &Path,
) -> Result<ProjectResult> {
    let span = info_span!("project", strategy = ?strategy);
    let _guard = span.enter();

    let registry = match strategy {
        KeyStrategy::Positional => KeyRegistry::default(),
        KeyStrategy::Stable => KeyRegistry::load(key_registry)
            .with_context(|| format!("load key registry {}", key_registry.display()))?,
    };
    let mut keys = SurrogateKeys::for_strategy(strategy, registry);
    let gold = project_gold(warehouse, &mut keys).context("project gold views")?;

    let saved = match keys.registry() {
        Some(registry) => {
            registry
                .save(key_registry)
                .with_context(|| format!("save key registry {}", key_registry.display()))?;
            debug!(path = %key_registry.display(), "key registry saved");
            Some(key_registry.to_path_buf())
        }
        None => None,
    };
    Ok(ProjectResult {
        gold,
        key_registry: saved,
    })
}

/// Registry path used when none is given: next to the outputs if there are
/// any, otherwise next to the extracts.
pub fn default_key_registry(source_dir: &Path, output_dir: Option<&Path>) -> PathBuf {
    output_dir
        .unwrap_or(source_dir)
        .join(DEFAULT_KEY_REGISTRY)
}

// ============================================================================
// Stage 4: Validate
// ============================================================================

/// Run the quality suite over a successful reload.
///
/// # Errors
///
/// Returns an error if the reload failed or a check cannot be evaluated.
pub fn validate(
    reload: &ReloadResult,
    gold: &GoldFrames,
    ctx: LoadContext,
) -> Result<QualityReport> {
    if let Some(failed) = reload.outcome.failed_report() {
        let message = failed
            .error
            .as_ref()
            .map_or_else(|| "unknown error".to_string(), |error| error.message.clone());
        bail!("cannot check a failed {} reload: {message}", failed.layer);
    }
    let input = CheckInput {
        warehouse: &reload.warehouse,
        gold,
        as_of: ctx.as_of,
    };
    run_suite(&input).context("run quality suite")
}
