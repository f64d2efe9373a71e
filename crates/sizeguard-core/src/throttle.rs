use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

#[derive(Default)]
struct Flags {
    dirty: bool,
    stopped: bool,
}

struct Shared {
    flags: Mutex<Flags>,
    wake: Condvar,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Flags> {
        self.flags.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Runs an action on a worker thread at most once per interval.
///
/// The first trigger runs the action immediately. Triggers that arrive
/// while it runs or during the following interval are coalesced into
/// one more run once the interval has passed. Dropping the throttle
/// stops the worker and joins it; a pending run is discarded.
pub struct Throttle {
    shared: Arc<Shared>,
    worker: Option<JoinHandle<()>>,
}

impl Throttle {
    pub fn new<F>(interval: Duration, action: F) -> Self
    where
        F: Fn() + Send + 'static,
    {
        let shared = Arc::new(Shared {
            flags: Mutex::new(Flags::default()),
            wake: Condvar::new(),
        });

        let worker = {
            let shared = Arc::clone(&shared);
            thread::spawn(move || run(&shared, interval, action))
        };

        Self {
            shared,
            worker: Some(worker),
        }
    }

    /// Requests a run.
    pub fn trigger(&self) {
        self.shared.lock().dirty = true;
        self.shared.wake.notify_one();
    }
}

fn run(shared: &Shared, interval: Duration, action: impl Fn()) {
    loop {
        {
            let mut flags = shared.lock();
            while !flags.dirty && !flags.stopped {
                flags = shared.wake.wait(flags).unwrap_or_else(|e| e.into_inner());
            }
            if flags.stopped {
                return;
            }
            flags.dirty = false;
        }

        action();

        let deadline = Instant::now() + interval;
        let mut flags = shared.lock();
        loop {
            if flags.stopped {
                return;
            }
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            flags = shared
                .wake
                .wait_timeout(flags, deadline - now)
                .map(|(guard, _)| guard)
                .unwrap_or_else(|e| e.into_inner().0);
        }
    }
}

impl Drop for Throttle {
    fn drop(&mut self) {
        self.shared.lock().stopped = true;
        self.shared.wake.notify_all();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn counting(interval: Duration) -> (Throttle, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let throttle = Throttle::new(interval, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (throttle, count)
    }

    #[test]
    fn no_trigger_means_no_run() {
        // Arrange
        let (throttle, count) = counting(Duration::from_millis(10));

        // Act
        thread::sleep(Duration::from_millis(50));
        drop(throttle);

        // Assert
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn single_trigger_runs_once() {
        // Arrange
        let (throttle, count) = counting(Duration::from_millis(10));

        // Act
        throttle.trigger();
        thread::sleep(Duration::from_millis(200));
        drop(throttle);

        // Assert
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn burst_of_triggers_is_coalesced() {
        // Arrange
        let (throttle, count) = counting(Duration::from_millis(50));

        // Act
        for _ in 0..20 {
            throttle.trigger();
        }
        thread::sleep(Duration::from_millis(400));
        drop(throttle);

        // Assert
        let runs = count.load(Ordering::SeqCst);
        assert!((1..=2).contains(&runs), "ran {runs} times");
    }

    #[test]
    fn drop_during_long_interval_returns_promptly() {
        // Arrange
        let (throttle, count) = counting(Duration::from_secs(60));
        throttle.trigger();
        thread::sleep(Duration::from_millis(100));
        throttle.trigger();

        // Act
        let started = Instant::now();
        drop(throttle);

        // Assert
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
