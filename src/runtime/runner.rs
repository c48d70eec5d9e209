//! Cancellable automatic stepping.
//!
//! The runner is a worker thread that calls `MatchController::tick` once
//! per interval. The controller lock is held only for the tick itself, so
//! renderers and commands interleave freely between generations. Stopping
//! wakes the worker immediately; a generation in progress always completes.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info};

use crate::core::{Mode, Phase};
use crate::game::{MatchController, TickOutcome};

/// Lock the controller.
///
/// A panic while the lock was held cannot leave a half-applied generation
/// (the grid is swapped in whole), so a poisoned lock is still usable.
pub(crate) fn lock(controller: &Mutex<MatchController>) -> MutexGuard<'_, MatchController> {
    controller.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Handle to a running automatic loop.
///
/// Dropping the handle stops the loop and joins the worker.
#[derive(Debug)]
pub struct RunHandle {
    stop_tx: Sender<()>,
    worker: Option<JoinHandle<()>>,
}

impl RunHandle {
    /// Stop the loop and wait for the worker to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    /// True once the worker has exited on its own or been stopped.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.worker.as_ref().map_or(true, JoinHandle::is_finished)
    }

    fn shutdown(&mut self) {
        if let Some(worker) = self.worker.take() {
            // The worker may already have exited and dropped its receiver.
            let _ = self.stop_tx.send(());
            if worker.join().is_err() {
                debug!("runner thread panicked");
            }
        }
    }
}

impl Drop for RunHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Start the automatic loop on a worker thread.
///
/// The loop steps while the match is `Running`. When a battle ends (board
/// empty or paused) it waits out the battle cooldown and restarts the
/// battle if nothing else changed the match meanwhile. Any other phase ends
/// the loop.
pub fn spawn_runner(controller: Arc<Mutex<MatchController>>) -> RunHandle {
    let (stop_tx, stop_rx) = mpsc::channel();
    let worker = thread::spawn(move || {
        info!("runner started");
        run_loop(&controller, &stop_rx);
        info!("runner stopped");
    });
    RunHandle {
        stop_tx,
        worker: Some(worker),
    }
}

/// Sleep for `timeout` unless stopped first. Returns false when stopped.
fn wait(stop_rx: &Receiver<()>, timeout: Duration) -> bool {
    matches!(stop_rx.recv_timeout(timeout), Err(RecvTimeoutError::Timeout))
}

fn run_loop(controller: &Mutex<MatchController>, stop_rx: &Receiver<()>) {
    loop {
        let (phase, mode, interval, cooldown) = {
            let mut ctrl = lock(controller);
            if ctrl.phase() == Phase::Running {
                if let Ok(TickOutcome::Finished(report)) = ctrl.tick() {
                    debug!(generation = report.generation, "board emptied");
                }
            }
            (ctrl.phase(), ctrl.mode(), ctrl.step_interval(), ctrl.battle_cooldown())
        };

        match (phase, mode) {
            (Phase::Running, _) => {
                if !wait(stop_rx, interval) {
                    return;
                }
            }
            (Phase::Ended, Mode::Battle) => {
                debug!(?cooldown, "battle cooldown");
                if !wait(stop_rx, cooldown) {
                    return;
                }
                let mut ctrl = lock(controller);
                if ctrl.mode() == Mode::Battle && ctrl.phase() == Phase::Ended {
                    if let Err(err) = ctrl.restart_battle() {
                        debug!(%err, "restart after cooldown failed");
                    }
                }
                return;
            }
            _ => return,
        }
    }
}
