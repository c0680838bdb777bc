//! Bounded fetch worker pool for one row's planned images.
//!
//! Workers pull plan indices from a shared queue; results are put back into
//! plan order so archive writes and events never depend on completion order.

use std::collections::VecDeque;
use std::sync::{mpsc, Mutex, PoisonError};

use super::plan::PlannedFetch;
use crate::fetch::{FetchError, FetchedImage, ImageFetcher};

pub(crate) type FetchResult = Result<FetchedImage, FetchError>;

/// Fetches every planned image, at most `max_concurrent` at a time.
/// The returned vector is index-aligned with `plan`.
pub(crate) fn fetch_all(
    plan: &[PlannedFetch],
    fetcher: &dyn ImageFetcher,
    max_concurrent: usize,
) -> Vec<FetchResult> {
    if max_concurrent <= 1 || plan.len() <= 1 {
        return plan.iter().map(|p| fetcher.fetch(&p.url)).collect();
    }

    let work: Mutex<VecDeque<usize>> = Mutex::new((0..plan.len()).collect());
    let (tx, rx) = mpsc::channel::<(usize, FetchResult)>();
    let num_workers = max_concurrent.min(plan.len());

    std::thread::scope(|s| {
        for _ in 0..num_workers {
            let tx = tx.clone();
            let work = &work;
            s.spawn(move || loop {
                let next = work
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .pop_front();
                let Some(index) = next else {
                    break;
                };
                let res = fetcher.fetch(&plan[index].url);
                if tx.send((index, res)).is_err() {
                    break;
                }
            });
        }
    });
    drop(tx);

    let mut slots: Vec<Option<FetchResult>> = (0..plan.len()).map(|_| None).collect();
    for (index, res) in rx {
        slots[index] = Some(res);
    }
    slots
        .into_iter()
        .map(|slot| slot.unwrap_or_else(|| Err(FetchError::Transport("fetch worker stopped".into()))))
        .collect()
}
