use std::process::ExitCode;

use clap::Parser;

use skyrim_texopt::archive::Bsa;
use skyrim_texopt::cli::Args;
use skyrim_texopt::codec::dds::DdsCodec;
use skyrim_texopt::codec::Quality;
use skyrim_texopt::config::{self, KnownFolders};
use skyrim_texopt::error::ConfigError;
use skyrim_texopt::index;
use skyrim_texopt::pipeline::stage_b::EdgeCaps;
use skyrim_texopt::pipeline::{self, PipelineConfig};
use skyrim_texopt::report;

#[cfg(feature = "gpu")]
use skyrim_texopt::codec::gpu;

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(1)
        }
    }
}

fn run(args: &Args) -> Result<(), ConfigError> {
    if !args.input_root.is_dir() {
        return Err(ConfigError::MissingFolder {
            what: "input_root",
            path: args.input_root.clone(),
        });
    }

    let archive_paths = discover_archive_paths(args)?;
    println!(
        "Discovered {} archive(s), scanning {:?}",
        archive_paths.len(),
        args.input_root
    );

    let mut archives = Vec::with_capacity(archive_paths.len());
    for path in &archive_paths {
        archives.push(Bsa::open(path)?);
    }

    let source_index = index::build(&args.input_root, &archives);
    println!(
        "Indexed {} mesh(es), {} loose+archived texture(s)",
        source_index.mesh_count(),
        source_index.texture_count()
    );

    let pipeline_config = PipelineConfig {
        stage_a_workers: args.stage_a_workers.unwrap_or_else(|| num_cpus::get().max(1)),
        stage_b_workers: args.stage_b_workers.max(1),
        batch_size_a: args.batch_size_a.max(1),
        batch_size_b: args.batch_size_b.max(1),
        poll_interval: std::time::Duration::from_millis(args.poll_interval_ms),
    };

    let quality = select_quality(args);
    let codec = DdsCodec::new();
    let caps = EdgeCaps {
        texsize: args.texsize,
        normalsize: args.normalsize,
    };

    let summary = pipeline::run(
        &pipeline_config,
        &args.output_root,
        &source_index,
        &archives,
        &codec,
        quality,
        caps,
    );

    report::print_summary(&summary);
    Ok(())
}

/// Resolve the archive list (spec §6): ini/loadorder discovery unless
/// `--no-discover-archives`, plus any explicit `--archive` flags appended
/// after whatever discovery found.
fn discover_archive_paths(args: &Args) -> Result<Vec<std::path::PathBuf>, ConfigError> {
    let mut archives = if args.no_discover_archives {
        Vec::new()
    } else {
        let folders = KnownFolders::discover()?;
        config::discover_archives(&folders, &args.input_root)?
    };
    archives.extend(args.archives.iter().cloned());
    Ok(archives)
}

#[cfg(feature = "gpu")]
fn select_quality(args: &Args) -> Quality {
    if !args.gpu {
        return Quality::Fast;
    }
    let ctx = gpu::GpuContext::try_new();
    if let Some(ctx) = &ctx {
        println!("[GPU] adapter available: {}", ctx.adapter_name());
    } else {
        println!("[GPU] no adapter available, falling back to CPU quality");
    }
    gpu::select_quality(ctx.as_ref())
}

#[cfg(not(feature = "gpu"))]
fn select_quality(_args: &Args) -> Quality {
    Quality::Fast
}
