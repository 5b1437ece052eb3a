//! Per-worker bounded queue + round-robin batch feeder (spec §4.6 step 4 /
//! §5 "backpressure"): a worker's queue is only refilled once it runs empty,
//! which bounds in-flight items to `batch_size * workers` regardless of how
//! much work is queued up ahead of it.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};

/// Shared stop signal observed by every worker in a stage (spec §5
/// "Cancellation ... via the running atomic flag"). Workers keep draining
/// their queue after it clears; it only means "stop accepting new batches".
#[derive(Clone)]
pub struct RunFlag(Arc<AtomicBool>);

impl RunFlag {
    pub fn new() -> Self {
        RunFlag(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_running(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn stop(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for RunFlag {
    fn default() -> Self {
        RunFlag::new()
    }
}

/// Drive a stage's worker pool: round-robin `batch_size`-item batches into
/// whichever worker queue is currently empty, sleeping `poll_interval`
/// between polls (spec §4.6 step 4/7), until every item has been handed off.
pub fn feed<T>(
    senders: &[Sender<T>],
    mut items: VecDeque<T>,
    batch_size: usize,
    poll_interval: Duration,
) {
    while !items.is_empty() {
        let mut made_progress = false;
        for sender in senders {
            if !sender.is_empty() {
                continue;
            }
            for _ in 0..batch_size {
                let Some(item) = items.pop_front() else {
                    break;
                };
                // Capacity == batch_size, so this never blocks.
                let _ = sender.send(item);
                made_progress = true;
            }
            if items.is_empty() {
                break;
            }
        }
        if !made_progress {
            std::thread::sleep(poll_interval);
        }
    }
}

/// A worker's pull loop: drain whatever is queued, then stop once `run_flag`
/// has cleared and the queue is empty (spec §4.2 "Termination").
pub fn drain_until_stopped<T>(receiver: &Receiver<T>, run_flag: &RunFlag, handle: impl FnMut(T)) {
    drain_until_stopped_with_interval(receiver, run_flag, Duration::from_millis(1), handle)
}

/// Same as [`drain_until_stopped`] but with an explicit poll interval, so the
/// worker's idle-poll cadence can track the CLI's `--poll-interval-ms` rather
/// than always being the spec's literal 1 ms default.
pub fn drain_until_stopped_with_interval<T>(
    receiver: &Receiver<T>,
    run_flag: &RunFlag,
    poll_interval: Duration,
    mut handle: impl FnMut(T),
) {
    loop {
        match receiver.try_recv() {
            Ok(item) => handle(item),
            Err(crossbeam_channel::TryRecvError::Empty) => {
                if !run_flag.is_running() {
                    break;
                }
                std::thread::sleep(poll_interval);
            }
            Err(crossbeam_channel::TryRecvError::Disconnected) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;
    use std::collections::VecDeque;

    #[test]
    fn feed_refills_only_empty_queues() {
        let (tx_a, rx_a) = bounded::<u32>(4);
        let (tx_b, rx_b) = bounded::<u32>(4);
        let items: VecDeque<u32> = (0..8).collect();

        let senders = vec![tx_a, tx_b];
        feed(&senders, items, 4, Duration::from_millis(0));

        let received_a: Vec<u32> = rx_a.try_iter().collect();
        let received_b: Vec<u32> = rx_b.try_iter().collect();
        assert_eq!(received_a.len() + received_b.len(), 8);
    }

    #[test]
    fn drain_until_stopped_exits_once_empty_and_flag_cleared() {
        let (tx, rx) = bounded::<u32>(4);
        tx.send(1).unwrap();
        tx.send(2).unwrap();
        let flag = RunFlag::new();
        flag.stop();

        let mut seen = Vec::new();
        drain_until_stopped(&rx, &flag, |item| seen.push(item));
        assert_eq!(seen, vec![1, 2]);
    }
}
