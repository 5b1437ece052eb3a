//! Stage-B worker loop (spec §4.4, component C4): resolve, size, probe the
//! sidecar cache, then decode/resize/mipmap/compress/save each texture.

use std::path::PathBuf;
use std::time::Duration;

use crossbeam_channel::Receiver;
use indicatif::ProgressBar;

use super::queue::{drain_until_stopped_with_interval, RunFlag};
use crate::archive::Bsa;
use crate::codec::{Quality, TextureCodec};
use crate::digest;
use crate::index::TextureSource;
use crate::pathkey::PathKey;
use crate::resolver;
use crate::sidecar;
use crate::sizing;

/// One resolved texture awaiting Stage-B processing (spec §4.4 "For each
/// `(path, source, radius)` triple").
pub struct TextureTask {
    pub path: PathKey,
    pub source: TextureSource,
    pub radius: f32,
}

/// CLI-supplied maximum edge lengths (spec §6 CLI `<texsize> <normalsize>`).
#[derive(Debug, Clone, Copy)]
pub struct EdgeCaps {
    pub texsize: u32,
    pub normalsize: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutcome {
    Written { output: PathBuf, target_size: u64 },
    Skipped { output: PathBuf },
    Failed { path: PathKey, reason: String },
}

/// Run one Stage-B worker to completion against a shared archive list and
/// codec, writing outputs under `output_root` and returning per-task
/// outcomes for the final report.
#[allow(clippy::too_many_arguments)]
pub fn run(
    receiver: Receiver<TextureTask>,
    run_flag: RunFlag,
    output_root: &std::path::Path,
    archives: &[Bsa],
    codec: &dyn TextureCodec,
    quality: Quality,
    caps: EdgeCaps,
    progress: ProgressBar,
    poll_interval: Duration,
) -> Vec<TaskOutcome> {
    let mut outcomes = Vec::new();
    drain_until_stopped_with_interval(&receiver, &run_flag, poll_interval, |task| {
        outcomes.push(process_one(task, output_root, archives, codec, quality, caps));
        progress.inc(1);
    });
    outcomes
}

#[allow(clippy::too_many_arguments)]
fn process_one(
    task: TextureTask,
    output_root: &std::path::Path,
    archives: &[Bsa],
    codec: &dyn TextureCodec,
    quality: Quality,
    caps: EdgeCaps,
) -> TaskOutcome {
    let output_path = output_root.join(task.path.as_str().replace('\\', "/"));

    let input_bytes = match resolver::resolve(&task.source, archives) {
        Ok(bytes) => bytes,
        Err(e) => {
            return TaskOutcome::Failed {
                path: task.path,
                reason: e.to_string(),
            }
        }
    };

    let decoded = match codec.load_dds_bytes(&input_bytes) {
        Ok(d) => d,
        Err(e) => {
            return TaskOutcome::Failed {
                path: task.path,
                reason: e.to_string(),
            }
        }
    };

    let is_normal_map = task.path.is_normal_map();
    let cap = if is_normal_map {
        caps.normalsize
    } else {
        caps.texsize
    };
    let target = sizing::apply_edge_cap(
        sizing::target_size(task.radius, decoded.width() as u64, is_normal_map),
        cap,
    );
    let input_hash = digest::hash_bytes(&input_bytes);

    let existing = sidecar::read_sidecar(&output_path);
    if sidecar::should_skip(&existing, &input_hash, target) {
        return TaskOutcome::Skipped {
            output: output_path,
        };
    }

    let resized = codec.resize(&decoded, target as u32);
    let mips = codec.generate_mipmaps(&resized);
    let encoded = match codec.compress(&mips, quality) {
        Ok(bytes) => bytes,
        Err(e) => {
            return TaskOutcome::Failed {
                path: task.path,
                reason: e.to_string(),
            }
        }
    };

    if let Err(e) = codec.save_dds(&encoded, &output_path) {
        return TaskOutcome::Failed {
            path: task.path,
            reason: e.to_string(),
        };
    }

    if let Err(e) = sidecar::write_sidecar(&output_path, &input_hash, target) {
        return TaskOutcome::Failed {
            path: task.path,
            reason: e.to_string(),
        };
    }

    TaskOutcome::Written {
        output: output_path,
        target_size: target,
    }
}
