//! Pipeline driver (spec §4.6, component C6): owns the lifecycle of both
//! worker pools, the round-robin batch feed into per-worker queues, and the
//! hard synchronization point between Stage A and Stage B.

pub mod queue;
pub mod stage_a;
pub mod stage_b;

use std::collections::VecDeque;
use std::path::Path;
use std::time::Duration;

use crossbeam_channel::bounded;
use indicatif::{ProgressBar, ProgressStyle};

use crate::aggregate::Aggregate;
use crate::archive::Bsa;
use crate::codec::{Quality, TextureCodec};
use crate::index::{self, SourceIndex};
use queue::RunFlag;
use stage_b::{EdgeCaps, TaskOutcome, TextureTask};

/// Tunables the CLI exposes over the otherwise-fixed driver algorithm
/// (spec §4.6 names concrete defaults: 25-item batches for Stage A, 2-item
/// batches for Stage B, a 1 ms poll cadence).
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub stage_a_workers: usize,
    pub stage_b_workers: usize,
    pub batch_size_a: usize,
    pub batch_size_b: usize,
    pub poll_interval: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            stage_a_workers: num_cpus::get().max(1),
            stage_b_workers: 1,
            batch_size_a: 25,
            batch_size_b: 2,
            poll_interval: Duration::from_millis(1),
        }
    }
}

pub struct RunSummary {
    pub meshes_scanned: usize,
    pub textures_sized: usize,
    pub outcomes: Vec<TaskOutcome>,
}

/// Run the whole two-stage pipeline (spec §4.6 steps 3-8) and return a
/// summary the caller can render via [`crate::report`].
#[allow(clippy::too_many_arguments)]
pub fn run(
    config: &PipelineConfig,
    output_root: &Path,
    source_index: &SourceIndex,
    archives: &[Bsa],
    codec: &dyn TextureCodec,
    quality: Quality,
    caps: EdgeCaps,
) -> RunSummary {
    let mesh_entries = index::materialize_mesh_entries(source_index, archives);
    let meshes_scanned = mesh_entries.len();

    let shards = run_stage_a(config, mesh_entries);
    let aggregate = Aggregate::merge(shards);

    let tasks = build_texture_tasks(&aggregate, source_index);
    let textures_sized = tasks.len();

    let outcomes = run_stage_b(config, output_root, tasks, archives, codec, quality, caps);

    RunSummary {
        meshes_scanned,
        textures_sized,
        outcomes,
    }
}

fn run_stage_a(
    config: &PipelineConfig,
    mesh_entries: Vec<index::MeshEntry>,
) -> Vec<crate::aggregate::Shard> {
    let run_flag = RunFlag::new();
    let mut senders = Vec::with_capacity(config.stage_a_workers);
    let mut handles = Vec::with_capacity(config.stage_a_workers);

    for _ in 0..config.stage_a_workers {
        let (tx, rx) = bounded(config.batch_size_a);
        senders.push(tx);
        let flag = run_flag.clone();
        let poll_interval = config.poll_interval;
        handles.push(std::thread::spawn(move || {
            stage_a::run(rx, flag, poll_interval)
        }));
    }

    let queue: VecDeque<index::MeshEntry> = mesh_entries.into_iter().collect();
    queue::feed(&senders, queue, config.batch_size_a, config.poll_interval);
    drop(senders);
    run_flag.stop();

    handles
        .into_iter()
        .map(|h| h.join().expect("stage-a worker panicked"))
        .collect()
}

/// Filter out-of-scope textures and attach each surviving key's resolved
/// source (spec §4.3 step 3: out-of-scope keys never produce a TextureSource).
fn build_texture_tasks(aggregate: &Aggregate, source_index: &SourceIndex) -> Vec<TextureTask> {
    let mut tasks = Vec::with_capacity(aggregate.len());
    for (key, record) in aggregate.iter() {
        if !key.is_in_scope_texture() {
            continue;
        }
        let Some(source) = source_index.texture(key) else {
            continue;
        };
        tasks.push(TextureTask {
            path: key.clone(),
            source: source.clone(),
            radius: record.radius,
        });
    }
    tasks
}

#[allow(clippy::too_many_arguments)]
fn run_stage_b(
    config: &PipelineConfig,
    output_root: &Path,
    tasks: Vec<TextureTask>,
    archives: &[Bsa],
    codec: &dyn TextureCodec,
    quality: Quality,
    caps: EdgeCaps,
) -> Vec<TaskOutcome> {
    let progress = ProgressBar::new(tasks.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} textures")
            .expect("static template is valid")
            .progress_chars("=>-"),
    );

    std::thread::scope(|scope| {
        let run_flag = RunFlag::new();
        let mut senders = Vec::with_capacity(config.stage_b_workers);
        let mut handles = Vec::with_capacity(config.stage_b_workers);

        for _ in 0..config.stage_b_workers {
            let (tx, rx) = bounded(config.batch_size_b);
            senders.push(tx);
            let flag = run_flag.clone();
            let bar = progress.clone();
            let poll_interval = config.poll_interval;
            handles.push(scope.spawn(move || {
                stage_b::run(
                    rx,
                    flag,
                    output_root,
                    archives,
                    codec,
                    quality,
                    caps,
                    bar,
                    poll_interval,
                )
            }));
        }

        let queue: VecDeque<TextureTask> = tasks.into_iter().collect();
        queue::feed(&senders, queue, config.batch_size_b, config.poll_interval);
        drop(senders);
        run_flag.stop();

        let outcomes: Vec<TaskOutcome> = handles
            .into_iter()
            .flat_map(|h| h.join().expect("stage-b worker panicked"))
            .collect();
        progress.finish_with_message("done");
        outcomes
    })
}
