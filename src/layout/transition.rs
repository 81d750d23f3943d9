//! Strip slide transitions.
//!
//! - The carousel engine commits its state first, then emits a `Transition`
//! - Transitions travel over a flume channel; nobody waits for them
//! - `Animator` is an optional worker that tweens a `TransitionTarget`
//! - A newer transition restarts from its own `from`, superseding the old one

use std::f32::consts::PI;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use flume::Receiver;
use tracing::{debug, trace};

/// Frame interval while a transition is running.
const FRAME_INTERVAL_MS: u64 = 16; // ~60fps

/// Poll interval while idle, bounds shutdown latency.
const IDLE_POLL_MS: u64 = 100;

/// A slide of every thumbnail from `from` to `to` (translation in pixels).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub from: f32,
    pub to: f32,
    pub duration: Duration,
    /// Increases with every transition a gallery emits.
    pub generation: u64,
}

impl Transition {
    /// Eased translation `elapsed` after the start, holding `to` at the end.
    pub fn offset_at(&self, elapsed: Duration) -> f32 {
        if self.duration.is_zero() || elapsed >= self.duration {
            return self.to;
        }
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        let eased = 0.5 - (t * PI).cos() / 2.0;
        self.from + (self.to - self.from) * eased
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

/// Whatever applies the strip translation on screen.
pub trait TransitionTarget: Send + Sync + 'static {
    fn set_strip_offset(&self, offset: f32);
}

/// Worker thread that plays transitions onto a target.
pub struct Animator {
    worker: Option<JoinHandle<()>>,
    shutdown: Arc<AtomicBool>,
}

impl Animator {
    pub fn spawn<T: TransitionTarget>(
        transitions: Receiver<Transition>,
        target: T,
    ) -> std::io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&shutdown);
        let worker = thread::Builder::new()
            .name("strip-animator".to_string())
            .spawn(move || animator_loop(transitions, target, flag))?;

        debug!("Started strip animator");
        Ok(Self {
            worker: Some(worker),
            shutdown,
        })
    }

    /// Stops the worker. Pending transitions snap to their final offset.
    pub fn shutdown(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
        debug!("Strip animator stopped");
    }
}

impl Drop for Animator {
    fn drop(&mut self) {
        if self.worker.is_some() {
            self.shutdown();
        }
    }
}

fn animator_loop<T: TransitionTarget>(
    transitions: Receiver<Transition>,
    target: T,
    shutdown: Arc<AtomicBool>,
) {
    let mut running: Option<(Transition, Instant)> = None;

    loop {
        if shutdown.load(Ordering::Relaxed) {
            while let Ok(next) = transitions.try_recv() {
                running = Some((next, Instant::now()));
            }
            if let Some((transition, _)) = running {
                target.set_strip_offset(transition.to);
            }
            break;
        }

        let wait = if running.is_some() {
            FRAME_INTERVAL_MS
        } else {
            IDLE_POLL_MS
        };
        match transitions.recv_timeout(Duration::from_millis(wait)) {
            Ok(next) => {
                trace!(generation = next.generation, from = next.from, to = next.to, "Transition started");
                target.set_strip_offset(next.from);
                running = Some((next, Instant::now()));
            }
            Err(flume::RecvTimeoutError::Timeout) => {}
            Err(flume::RecvTimeoutError::Disconnected) => {
                if let Some((transition, _)) = running {
                    target.set_strip_offset(transition.to);
                }
                break;
            }
        }

        if let Some((transition, started)) = running {
            let elapsed = started.elapsed();
            target.set_strip_offset(transition.offset_at(elapsed));
            if transition.is_finished(elapsed) {
                running = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Clone, Default)]
    struct Probe(Arc<Mutex<Vec<f32>>>);

    impl TransitionTarget for Probe {
        fn set_strip_offset(&self, offset: f32) {
            self.0.lock().push(offset);
        }
    }

    fn transition(from: f32, to: f32, ms: u64, generation: u64) -> Transition {
        Transition {
            from,
            to,
            duration: Duration::from_millis(ms),
            generation,
        }
    }

    #[test]
    fn test_offset_at_endpoints() {
        let t = transition(0.0, -200.0, 400, 1);
        assert_eq!(t.offset_at(Duration::ZERO), 0.0);
        assert!((t.offset_at(Duration::from_millis(200)) + 100.0).abs() < 0.01);
        assert_eq!(t.offset_at(Duration::from_millis(400)), -200.0);
        assert_eq!(t.offset_at(Duration::from_secs(5)), -200.0);
    }

    #[test]
    fn test_zero_duration_jumps() {
        let t = transition(-50.0, -150.0, 0, 1);
        assert_eq!(t.offset_at(Duration::ZERO), -150.0);
        assert!(t.is_finished(Duration::ZERO));
    }

    #[test]
    fn test_animator_settles_on_latest_transition() {
        let (tx, rx) = flume::unbounded();
        let probe = Probe::default();
        let mut animator = Animator::spawn(rx, probe.clone()).unwrap();

        tx.send(transition(0.0, -100.0, 10_000, 1)).unwrap();
        tx.send(transition(-100.0, -250.0, 10_000, 2)).unwrap();
        animator.shutdown();

        assert_eq!(probe.0.lock().last().copied(), Some(-250.0));
    }

    #[test]
    fn test_animator_stops_when_sender_dropped() {
        let (tx, rx) = flume::unbounded();
        let probe = Probe::default();
        let mut animator = Animator::spawn(rx, probe.clone()).unwrap();

        tx.send(transition(0.0, -40.0, 0, 1)).unwrap();
        drop(tx);
        animator.shutdown();

        assert_eq!(probe.0.lock().last().copied(), Some(-40.0));
    }
}
