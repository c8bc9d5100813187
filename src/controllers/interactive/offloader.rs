use crate::controllers::interactive::data::field_delivery::{ComputeFailure, FieldDelivery};
use crate::controllers::interactive::errors::submit::SubmitError;
use crate::controllers::interactive::events::delivery::DeliveryEvent;
use crate::controllers::interactive::ports::delivery_port::DeliveryPort;
use crate::core::actions::cancellation::{Cancelled, GenerationToken};
use crate::core::actions::compute_field::mandelbrot_field_computer::MandelbrotFieldComputer;
use crate::core::actions::compute_field::ports::field_computer::FieldComputer;
use crate::core::data::viewport_params::ViewportParams;
use log::{debug, warn};
use std::any::Any;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const WORKER_THREAD_NAME: &str = "field-compute";

pub(crate) type Spawner =
    fn(Box<dyn FnOnce() + Send + 'static>) -> io::Result<JoinHandle<()>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffloaderState {
    Idle,
    Running,
}

#[derive(Debug, Clone, Copy)]
struct Job {
    generation: u64,
    params: ViewportParams,
}

#[derive(Debug, Default)]
struct Slot {
    latest_generation: u64,
    pending: Option<Job>,
    running: Option<u64>,
    last_settled_generation: u64,
    shut_down: bool,
}

impl Slot {
    fn is_busy(&self) -> bool {
        self.pending.is_some() || self.running.is_some()
    }
}

struct SharedState {
    slot: Mutex<Slot>,
    wake: Condvar,
    settled: Condvar,
    // mirrors of the slot fields, read by cancel tokens without locking
    generation: AtomicU64,
    shutdown: AtomicBool,
    delivery_port: Arc<dyn DeliveryPort>,
    field_computer: Arc<dyn FieldComputer>,
}

impl SharedState {
    fn lock_slot(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // caller holds the slot lock and has checked the generation is current
    fn deliver_locked(&self, slot: &mut Slot, event: DeliveryEvent) {
        let generation = event.generation();

        if panic::catch_unwind(AssertUnwindSafe(|| self.delivery_port.deliver(event))).is_err() {
            warn!("delivery port panicked while handling generation {}", generation);
        }

        slot.last_settled_generation = generation;
    }
}

/// Runs field computations off the calling thread, one at a time.
///
/// Every [`submit`](Self::submit) supersedes the previous one: the job that
/// is computing is asked to cancel, a job still waiting is replaced, and only
/// the result for the most recent submission ever reaches the
/// [`DeliveryPort`]. The worker thread is started on the first submission.
pub struct ComputeOffloader {
    shared: Arc<SharedState>,
    worker: Mutex<Option<JoinHandle<()>>>,
    spawner: Spawner,
}

impl ComputeOffloader {
    pub fn new(delivery_port: Arc<dyn DeliveryPort>) -> Self {
        Self::with_field_computer(delivery_port, Arc::new(MandelbrotFieldComputer))
    }

    pub fn with_field_computer(
        delivery_port: Arc<dyn DeliveryPort>,
        field_computer: Arc<dyn FieldComputer>,
    ) -> Self {
        Self::with_spawner(delivery_port, field_computer, spawn_worker_thread)
    }

    pub(crate) fn with_spawner(
        delivery_port: Arc<dyn DeliveryPort>,
        field_computer: Arc<dyn FieldComputer>,
        spawner: Spawner,
    ) -> Self {
        let shared = Arc::new(SharedState {
            slot: Mutex::new(Slot::default()),
            wake: Condvar::new(),
            settled: Condvar::new(),
            generation: AtomicU64::new(0),
            shutdown: AtomicBool::new(false),
            delivery_port,
            field_computer,
        });

        Self {
            shared,
            worker: Mutex::new(None),
            spawner,
        }
    }

    /// Queues `params` as the only pending job and returns its generation.
    ///
    /// Never waits for computation. If the worker thread cannot be started a
    /// [`DeliveryEvent::Failure`] is delivered for the returned generation.
    pub fn submit(&self, params: ViewportParams) -> Result<u64, SubmitError> {
        params.validate()?;

        let generation = {
            let mut slot = self.shared.lock_slot();

            if slot.shut_down {
                return Err(SubmitError::ShutDown);
            }

            slot.latest_generation += 1;
            let generation = slot.latest_generation;

            self.shared.generation.store(generation, Ordering::SeqCst);

            if let Some(replaced) = slot.pending.replace(Job { generation, params }) {
                debug!(
                    "generation {} replaced before it started",
                    replaced.generation
                );
            }

            generation
        };

        debug!(
            "submitted generation {}: {}x{} zoom {} offset ({}, {}) max {} iterations",
            generation,
            params.width,
            params.height,
            params.zoom,
            params.center_offset.re,
            params.center_offset.im,
            params.max_iterations
        );

        if let Err(err) = self.ensure_worker() {
            warn!("could not start the compute worker: {}", err);
            self.fail_unstarted(generation, params, &err);

            return Ok(generation);
        }

        self.shared.wake.notify_one();

        Ok(generation)
    }

    #[must_use]
    pub fn state(&self) -> OffloaderState {
        if self.shared.lock_slot().is_busy() {
            OffloaderState::Running
        } else {
            OffloaderState::Idle
        }
    }

    /// Generation of the last result handed to the delivery port, 0 if none.
    #[must_use]
    pub fn last_settled_generation(&self) -> u64 {
        self.shared.lock_slot().last_settled_generation
    }

    /// Blocks until nothing is pending or computing. Returns `false` on timeout.
    pub fn wait_until_idle(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut slot = self.shared.lock_slot();

        while slot.is_busy() {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }

            let (guard, _) = self
                .shared
                .settled
                .wait_timeout(slot, deadline - now)
                .unwrap_or_else(PoisonError::into_inner);
            slot = guard;
        }

        true
    }

    /// Cancels any in-flight job, drops the pending one and joins the worker.
    pub fn shutdown(&mut self) {
        {
            let mut slot = self.shared.lock_slot();
            slot.shut_down = true;
            slot.pending = None;
        }

        self.shared.shutdown.store(true, Ordering::Release);
        self.shared.wake.notify_all();

        let handle = self
            .worker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(handle) = handle {
            if handle.join().is_err() {
                warn!("compute worker exited with a panic");
            }
        }

        self.shared.settled.notify_all();
    }

    fn ensure_worker(&self) -> io::Result<()> {
        let mut worker = self.worker.lock().unwrap_or_else(PoisonError::into_inner);

        if worker.as_ref().is_some_and(|handle| !handle.is_finished()) {
            return Ok(());
        }

        if let Some(finished) = worker.take() {
            let _ = finished.join();
        }

        let shared = Arc::clone(&self.shared);
        let handle = (self.spawner)(Box::new(move || worker_loop(&shared)))?;
        debug!("compute worker started");

        *worker = Some(handle);

        Ok(())
    }

    fn fail_unstarted(&self, generation: u64, params: ViewportParams, err: &io::Error) {
        let mut slot = self.shared.lock_slot();

        if slot.pending.is_some_and(|job| job.generation == generation) {
            slot.pending = None;
        }

        if slot.latest_generation == generation {
            let failure = ComputeFailure {
                generation,
                params,
                message: format!("could not start the compute worker: {}", err),
            };
            self.shared
                .deliver_locked(&mut slot, DeliveryEvent::Failure(failure));
        }

        self.shared.settled.notify_all();
    }
}

impl Drop for ComputeOffloader {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn spawn_worker_thread(body: Box<dyn FnOnce() + Send + 'static>) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name(WORKER_THREAD_NAME.to_string())
        .spawn(body)
}

fn worker_loop(shared: &SharedState) {
    loop {
        let job = {
            let mut slot = shared.lock_slot();
            loop {
                if slot.shut_down {
                    shared.settled.notify_all();
                    return;
                }

                if let Some(job) = slot.pending.take() {
                    slot.running = Some(job.generation);
                    break job;
                }

                slot = shared
                    .wake
                    .wait(slot)
                    .unwrap_or_else(PoisonError::into_inner);
            }
        };

        let event = run_job(shared, job);

        let mut slot = shared.lock_slot();
        slot.running = None;

        if let Some(event) = event {
            if !slot.shut_down && slot.latest_generation == job.generation {
                shared.deliver_locked(&mut slot, event);
            } else {
                debug!(
                    "dropping stale result for generation {} (latest is {})",
                    job.generation, slot.latest_generation
                );
            }
        }

        if !slot.is_busy() {
            shared.settled.notify_all();
        }
    }
}

fn run_job(shared: &SharedState, job: Job) -> Option<DeliveryEvent> {
    let cancel_token = GenerationToken::new(job.generation, &shared.generation, &shared.shutdown);

    let start = Instant::now();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        shared.field_computer.compute(&job.params, &cancel_token)
    }));
    let compute_duration = start.elapsed();

    let failure = |message: String| {
        warn!("generation {} failed: {}", job.generation, message);
        Some(DeliveryEvent::Failure(ComputeFailure {
            generation: job.generation,
            params: job.params,
            message,
        }))
    };

    match outcome {
        Ok(Ok(field))
            if field.width() == job.params.width && field.height() == job.params.height =>
        {
            debug!(
                "generation {} computed in {:.2?}",
                job.generation, compute_duration
            );
            Some(DeliveryEvent::Field(FieldDelivery {
                generation: job.generation,
                params: job.params,
                field,
                compute_duration,
            }))
        }
        Ok(Ok(field)) => failure(format!(
            "field computer returned a {}x{} field for a {}x{} viewport",
            field.width(),
            field.height(),
            job.params.width,
            job.params.height
        )),
        Ok(Err(Cancelled)) => {
            debug!("generation {} cancelled", job.generation);
            None
        }
        Err(payload) => failure(format!(
            "field computer panicked: {}",
            panic_message(payload.as_ref())
        )),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "unknown panic payload"
    }
}
