//! Parallel and sequential execution of collection routines

use crate::data::Report;
use crate::error::{HostfactsError, Result};
use crate::registry::Routine;
use rayon::prelude::*;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// One pool job per routine, joined before returning
    Parallel,
    /// Each routine in order on the calling thread
    Sequential,
}

/// Runs routine sets on a worker pool that lives as long as the dispatcher
pub struct Dispatcher {
    pool: rayon::ThreadPool,
}

impl Dispatcher {
    /// `workers == 0` sizes the pool to the available hardware parallelism
    pub fn new(workers: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("hostfacts-worker-{}", i))
            .build()?;
        debug!("worker pool started with {} threads", pool.current_num_threads());
        Ok(Dispatcher { pool })
    }

    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Run every routine and return their reports index-aligned with `routines`.
    ///
    /// The first failure aborts the dispatch and no partial results are
    /// returned. Parallel siblings already running are left to finish and
    /// their results are discarded.
    pub fn dispatch(&self, routines: &[Routine], mode: DispatchMode) -> Result<Vec<Report>> {
        debug!("dispatching {} routines ({:?})", routines.len(), mode);
        match mode {
            DispatchMode::Parallel => self.pool.install(|| {
                routines
                    .par_iter()
                    .with_max_len(1)
                    .map(run_routine)
                    .collect::<Result<Vec<Report>>>()
            }),
            DispatchMode::Sequential => routines.iter().map(run_routine).collect(),
        }
    }
}

fn run_routine(routine: &Routine) -> Result<Report> {
    match panic::catch_unwind(AssertUnwindSafe(|| routine.call())) {
        Ok(Ok(report)) => Ok(report),
        Ok(Err(err @ (HostfactsError::Collection { .. } | HostfactsError::Dispatch { .. }))) => {
            Err(err)
        }
        Ok(Err(err)) => Err(HostfactsError::Collection {
            routine: routine.name().to_string(),
            message: err.to_string(),
        }),
        Err(payload) => Err(HostfactsError::Dispatch {
            routine: routine.name().to_string(),
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
