use once_cell::sync::OnceCell;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::calculator::{Calculation, MatchRequest};
use crate::config::{CalcConfig, batch_parallelism};
use crate::error::Result;

static POOL: OnceCell<rayon::ThreadPool> = OnceCell::new();

#[derive(Debug)]
pub struct BatchEntry {
    pub id: Option<String>,
    pub result: Result<Calculation>,
}

/// Evaluates every request independently; one bad fixture does not stop the rest.
/// Output order follows input order.
pub fn calculate_batch(requests: &[MatchRequest], cfg: &CalcConfig) -> Vec<BatchEntry> {
    debug!(count = requests.len(), "calculating batch");
    with_pool(batch_pool(), || {
        requests
            .par_iter()
            .map(|req| BatchEntry {
                id: req.id.clone(),
                result: req.calculate(cfg),
            })
            .collect()
    })
}

fn batch_pool() -> Option<&'static rayon::ThreadPool> {
    POOL.get_or_try_init(|| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(batch_parallelism())
            .thread_name(|idx| format!("goal-markets-{idx}"))
            .build()
    })
    .map_err(|err| warn!(%err, "batch pool unavailable, using global pool"))
    .ok()
}

fn with_pool<T>(pool: Option<&rayon::ThreadPool>, action: impl FnOnce() -> T + Send) -> T
where
    T: Send,
{
    if let Some(pool) = pool {
        pool.install(action)
    } else {
        action()
    }
}
