//! casegen — build a keyboard case from a configuration file.
//!
//! Usage: `casegen <config.json>`. The configuration merges onto the
//! `run_config.json` next to it (plus any `file:` children it references),
//! and the finished body is exported as STL, STEP, and DXF into the
//! configured output directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use case_types::Side;
use cluster_engine::assembly::build_case;
use cluster_engine::{build_cluster, resolve};
use file_format::config::load_layered;
use file_format::manifest::BuildManifest;
use file_format::{dxf, step, stl};
use geom_kernel::{Kernel, TruckKernel};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let Some(config_arg) = args.next() else {
        bail!("usage: casegen <config.json>");
    };
    if args.next().is_some() {
        bail!("usage: casegen <config.json>");
    }

    let overrides = PathBuf::from(config_arg);
    let parent = overrides
        .parent()
        .unwrap_or(Path::new("."))
        .join("run_config.json");
    let parent = if parent.exists() { parent } else { overrides.clone() };

    let (doc, sources) = load_layered(&parent, &overrides)
        .with_context(|| format!("loading configuration {}", overrides.display()))?;
    let resolved = resolve(&doc).context("resolving configuration")?;
    for warning in &resolved.warnings {
        warn!(key = warning.key.as_str(), detail = warning.detail.as_str(), "config key dropped");
    }

    let settings = &resolved.settings;
    let params = &resolved.params;
    info!(
        cluster = ?settings.cluster,
        side = ?settings.side,
        ncols = params.ncols,
        nrows = params.nrows,
        "starting build"
    );

    let cluster = build_cluster(settings.cluster, resolved.cluster_config.clone());
    let mut kernel = TruckKernel::new();
    let build = build_case(&mut kernel, params, cluster.as_ref()).context("assembling case")?;

    let mesh = kernel
        .tessellate(&build.body, params.tessellation_tolerance)
        .context("tessellating case body")?;
    let mesh = match settings.side {
        Side::Right => mesh,
        Side::Left => stl::mirror_x(&mesh),
    };

    let out_dir = PathBuf::from(&settings.output_dir);
    fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    let side_tag = match settings.side {
        Side::Right => "right",
        Side::Left => "left",
    };
    let base = format!("{}_{}", settings.base_name, side_tag);

    let mut manifest = BuildManifest::new(
        sources.iter().map(|p| p.display().to_string()).collect(),
        resolved.warnings.iter().map(|w| w.key.clone()).collect(),
    );

    let stl_name = format!("{}.stl", base);
    let stl_bytes = stl::export_binary_stl(&mesh, &base).context("exporting STL")?;
    write_file(&out_dir.join(&stl_name), &stl_bytes)?;
    manifest.record(&stl_name, "stl");

    let dxf_name = format!("{}.dxf", base);
    let dxf_text = dxf::export_dxf(&mesh).context("exporting DXF")?;
    write_file(&out_dir.join(&dxf_name), dxf_text.as_bytes())?;
    manifest.record(&dxf_name, "dxf");

    // STEP carries the unmirrored B-rep; mirroring happens at mesh level
    // only, so the left side ships without a STEP file.
    if settings.side == Side::Right {
        let step_name = format!("{}.step", base);
        let step_text = step::export_step(&kernel, &build.body).context("exporting STEP")?;
        write_file(&out_dir.join(&step_name), step_text.as_bytes())?;
        manifest.record(&step_name, "step");
    } else {
        warn!("left side is mesh-mirrored; skipping STEP export");
    }

    let manifest_name = format!("{}_manifest.json", base);
    write_file(&out_dir.join(&manifest_name), manifest.to_json().as_bytes())?;

    info!(
        outputs = manifest.outputs.len(),
        dir = %out_dir.display(),
        "build finished"
    );
    Ok(())
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), bytes = bytes.len(), "wrote");
    Ok(())
}
