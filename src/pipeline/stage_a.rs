//! Stage-A worker loop (spec §4.2, component C2): parse each mesh buffer and
//! fold its shapes into this worker's shard of the aggregate.

use std::time::Duration;

use crossbeam_channel::Receiver;

use super::queue::{drain_until_stopped_with_interval, RunFlag};
use crate::aggregate::Shard;
use crate::index::MeshEntry;

/// Run one Stage-A worker to completion, returning its partial shard
/// (spec §9 "sharded per worker, merged by taking the max per key").
pub fn run(receiver: Receiver<MeshEntry>, run_flag: RunFlag, poll_interval: Duration) -> Shard {
    let mut shard = Shard::new();
    drain_until_stopped_with_interval(&receiver, &run_flag, poll_interval, |entry| {
        match crate::mesh::load(&entry.payload) {
            Ok(mesh) => shard.absorb(&entry.internal_path, &mesh),
            Err(e) => {
                eprintln!("skipping mesh {}: {e}", entry.internal_path);
            }
        }
        // entry.payload is dropped here, releasing it before the next pull
        // (spec §4.2 "Release the entry's payload before pulling the next").
    });
    shard
}
