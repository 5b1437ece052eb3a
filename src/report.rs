//! End-of-run summary, grounded on the teacher's own `human_bytes`/summary
//! printing in `main.rs` — adapted here to report written/skipped/failed
//! texture counts instead of file sizes.

use crate::pipeline::stage_b::TaskOutcome;
use crate::pipeline::RunSummary;

pub fn print_summary(summary: &RunSummary) {
    let mut written = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;

    for outcome in &summary.outcomes {
        match outcome {
            TaskOutcome::Written { .. } => written += 1,
            TaskOutcome::Skipped { .. } => skipped += 1,
            TaskOutcome::Failed { path, reason } => {
                failed += 1;
                eprintln!("[FAILED] {path}: {reason}");
            }
        }
    }

    println!("\n--- Summary ---");
    println!("Meshes scanned:   {}", summary.meshes_scanned);
    println!("Textures sized:   {}", summary.textures_sized);
    println!("Textures written: {written}");
    println!("Textures skipped (cache hit): {skipped}");
    println!("Textures failed:  {failed}");
}
