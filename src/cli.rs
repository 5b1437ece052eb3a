//! CLI argument parsing (spec §6 "CLI"), via `clap`'s derive API — the same
//! style the teacher's own `Args` struct uses.

use std::path::PathBuf;

use clap::Parser;

/// Offline texture optimization pass over a Skyrim Special Edition
/// installation's meshes and textures.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Root of the loose data tree to scan (spec §6 `<input_root>`).
    pub input_root: PathBuf,

    /// Where optimized textures (and their sidecars) are written.
    pub output_root: PathBuf,

    /// Maximum edge length, in pixels, for ordinary (non-normal-map) textures.
    pub texsize: u32,

    /// Maximum edge length, in pixels, for normal-map textures.
    pub normalsize: u32,

    /// Number of Stage-A (mesh scan) workers. Defaults to the number of
    /// logical CPUs, since mesh parsing is pure CPU-bound work (spec §4.6
    /// "Counts").
    #[arg(long)]
    pub stage_a_workers: Option<usize>,

    /// Number of Stage-B (resize/re-encode) workers. Defaults to 1, since
    /// block compression tends to serialize on a single GPU device.
    #[arg(long, default_value_t = 1)]
    pub stage_b_workers: usize,

    /// MeshEntry batch size fed into each empty Stage-A worker queue.
    #[arg(long, default_value_t = 25)]
    pub batch_size_a: usize,

    /// Texture-task batch size fed into each empty Stage-B worker queue.
    #[arg(long, default_value_t = 2)]
    pub batch_size_b: usize,

    /// Driver poll interval, in milliseconds, between feed attempts.
    #[arg(long, default_value_t = 1)]
    pub poll_interval_ms: u64,

    /// Skip Skyrim.ini/loadorder.txt discovery entirely and scan only the
    /// loose data tree plus any `--archive` paths given explicitly.
    #[arg(long)]
    pub no_discover_archives: bool,

    /// Explicit archive path to include, on top of (or instead of) whatever
    /// discovery finds. May be repeated; archives are opened in the order
    /// given, after any discovered ones.
    #[arg(long = "archive")]
    pub archives: Vec<PathBuf>,

    /// Probe for a GPU adapter to pick a higher BC7 quality tier (requires
    /// the "gpu" feature).
    #[arg(long)]
    pub gpu: bool,
}
