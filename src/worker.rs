//! Background layout computation with last-input-wins delivery.

use crate::{
    annotation::Annotation,
    dna_sequence::DnaSequence,
    layout::{compute_layout, SequenceLayout},
    view_state::ViewState,
};
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use std::{
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

pub type Generation = u64;

#[derive(Clone, Debug)]
pub struct LayoutRequest {
    pub generation: Generation,
    pub sequence: DnaSequence,
    pub annotations: Vec<Annotation>,
    pub view: ViewState,
}

#[derive(Clone, Debug)]
pub struct LayoutResult {
    pub generation: Generation,
    pub layout: SequenceLayout,
}

pub struct LayoutWorker {
    sender: Option<Sender<LayoutRequest>>,
    receiver: Receiver<LayoutResult>,
    handle: Option<JoinHandle<()>>,
    last_submitted: Generation,
}

fn run_worker(requests: Receiver<LayoutRequest>, results: Sender<LayoutResult>) {
    while let Ok(mut request) = requests.recv() {
        for newer in requests.try_iter() {
            log::debug!(
                "Skipping layout generation {} in favour of {}",
                request.generation,
                newer.generation
            );
            request = newer;
        }
        let layout = compute_layout(&request.sequence, &request.annotations, &request.view);
        let result = LayoutResult {
            generation: request.generation,
            layout,
        };
        if results.send(result).is_err() {
            log::debug!("Layout result receiver dropped, stopping worker");
            break;
        }
    }
}

impl LayoutWorker {
    pub fn spawn() -> Self {
        let (request_tx, request_rx) = unbounded();
        let (result_tx, result_rx) = unbounded();
        let handle = thread::spawn(move || run_worker(request_rx, result_tx));
        Self {
            sender: Some(request_tx),
            receiver: result_rx,
            handle: Some(handle),
            last_submitted: 0,
        }
    }

    /// Queues a snapshot and returns its generation. Generations start at 1.
    pub fn submit(
        &mut self,
        sequence: DnaSequence,
        annotations: Vec<Annotation>,
        view: ViewState,
    ) -> Generation {
        self.last_submitted += 1;
        let request = LayoutRequest {
            generation: self.last_submitted,
            sequence,
            annotations,
            view,
        };
        if let Some(sender) = &self.sender {
            if sender.send(request).is_err() {
                log::error!("Layout worker is no longer running");
            }
        }
        self.last_submitted
    }

    pub fn last_submitted(&self) -> Generation {
        self.last_submitted
    }

    pub fn latest(&self) -> Option<LayoutResult> {
        self.receiver
            .try_iter()
            .filter(|r| self.is_current(r))
            .last()
    }

    pub fn wait_latest(&self, timeout: Duration) -> Option<LayoutResult> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.receiver.recv_timeout(remaining) {
                Ok(result) if self.is_current(&result) => return Some(result),
                Ok(stale) => {
                    log::debug!("Discarding stale layout generation {}", stale.generation);
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return None
                }
            }
        }
    }

    fn is_current(&self, result: &LayoutResult) -> bool {
        result.generation == self.last_submitted
    }
}

impl Drop for LayoutWorker {
    fn drop(&mut self) {
        // Closing the request channel ends the worker loop.
        self.sender.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Layout worker thread panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(window_start: usize) -> ViewState {
        ViewState {
            window_start,
            row_width: 4,
            row_count: 1,
            search_query: String::new(),
        }
    }

    #[test]
    fn test_single_request_round_trip() {
        let mut worker = LayoutWorker::spawn();
        let generation = worker.submit(DnaSequence::from_sequence("ATGCATGC"), vec![], view(4));
        assert_eq!(generation, 1);
        let result = worker.wait_latest(Duration::from_secs(10)).unwrap();
        assert_eq!(result.generation, 1);
        assert_eq!(result.layout.rows[0].text(), "ATGC");
        assert_eq!(result.layout.window_start, 4);
    }

    #[test]
    fn test_only_newest_generation_is_delivered() {
        let mut worker = LayoutWorker::spawn();
        let dna = DnaSequence::from_sequence("AAAACCCCGGGGTTTT");
        for start in [0, 4, 8] {
            worker.submit(dna.clone(), vec![], view(start));
        }
        let last = worker.submit(dna, vec![], view(12));
        let result = worker.wait_latest(Duration::from_secs(10)).unwrap();
        assert_eq!(result.generation, last);
        assert_eq!(result.layout.rows[0].text(), "TTTT");
        assert!(worker.latest().is_none());
    }
}
