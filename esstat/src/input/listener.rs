//! # Input Listener
//!
//! Owns an [`InputSource`] and, while started, a worker thread that waits for
//! readiness and reads exactly one byte per report into a queue. The tick loop
//! empties the queue with [`InputListener::drain`] and hands the batch to the
//! key decoder; the listener itself knows nothing about keys.
//!
//! The worker polls in short slices so [`InputListener::stop`] is observed
//! promptly, and hands the source back when it exits so the listener can be
//! started again.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, warn};

use super::source::InputSource;

const POLL_SLICE: Duration = Duration::from_millis(50);

pub struct InputListener {
    source: Option<Box<dyn InputSource>>,
    worker: Option<JoinHandle<Box<dyn InputSource>>>,
    active: Arc<AtomicBool>,
    tx: Sender<u8>,
    rx: Receiver<u8>,
}

impl InputListener {
    pub fn new(source: impl InputSource) -> Self {
        let (tx, rx) = unbounded();
        Self {
            source: Some(Box::new(source)),
            worker: None,
            active: Arc::new(AtomicBool::new(false)),
            tx,
            rx,
        }
    }

    /// Begin queueing input. Returns `false` when the source is not an
    /// interactive terminal; no keys will ever arrive in that case.
    ///
    /// A worker that already ended on its own (end of input or a read error)
    /// is reaped and reported as `false`; calling `start` again retries.
    pub fn start(&mut self) -> bool {
        if let Some(handle) = &self.worker {
            if !handle.is_finished() {
                return true;
            }
            debug!("input thread had already stopped");
            self.reap();
            return false;
        }
        let Some(source) = self.source.take() else {
            return false;
        };
        if !source.is_interactive() {
            self.source = Some(source);
            return false;
        }

        self.active.store(true, Ordering::Release);
        let active = Arc::clone(&self.active);
        let tx = self.tx.clone();
        let spawned = std::thread::Builder::new()
            .name("esstat-input".to_string())
            .spawn(move || read_loop(source, &active, &tx));
        match spawned {
            Ok(handle) => {
                self.worker = Some(handle);
                true
            }
            Err(e) => {
                warn!("failed to spawn input thread: {e}");
                self.active.store(false, Ordering::Release);
                false
            }
        }
    }

    /// Stop the worker and wait for it. Safe to call repeatedly.
    pub fn stop(&mut self) {
        self.active.store(false, Ordering::Release);
        self.reap();
    }

    /// Join the worker and take the source back.
    fn reap(&mut self) {
        if let Some(handle) = self.worker.take() {
            match handle.join() {
                Ok(source) => self.source = Some(source),
                Err(_) => warn!("input thread panicked"),
            }
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.worker.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Everything queued since the last drain, in arrival order.
    #[must_use]
    pub fn drain(&self) -> Vec<u8> {
        self.rx.try_iter().collect()
    }
}

impl Drop for InputListener {
    fn drop(&mut self) {
        self.stop();
    }
}

fn read_loop(
    mut source: Box<dyn InputSource>,
    active: &AtomicBool,
    tx: &Sender<u8>,
) -> Box<dyn InputSource> {
    debug!("input thread started");
    while active.load(Ordering::Acquire) {
        match source.poll_readable(POLL_SLICE) {
            Ok(false) => {}
            Ok(true) => match source.read_unit() {
                Ok(Some(byte)) => {
                    if tx.send(byte).is_err() {
                        break;
                    }
                }
                Ok(None) => {
                    debug!("input reached end of stream");
                    break;
                }
                Err(e) => {
                    warn!("input read failed: {e}");
                    break;
                }
            },
            Err(e) => {
                warn!("input poll failed: {e}");
                break;
            }
        }
    }
    debug!("input thread stopped");
    source
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::io;
    use std::sync::Mutex;
    use std::time::Instant;

    /// Bytes fed in by the test, readable one at a time.
    #[derive(Clone, Default)]
    struct ScriptedSource {
        interactive: bool,
        closed: Arc<AtomicBool>,
        bytes: Arc<Mutex<VecDeque<u8>>>,
        reads: Arc<Mutex<Vec<usize>>>,
    }

    impl ScriptedSource {
        fn interactive() -> Self {
            Self { interactive: true, ..Default::default() }
        }

        fn push(&self, bytes: &[u8]) {
            self.bytes.lock().unwrap().extend(bytes);
        }
    }

    impl InputSource for ScriptedSource {
        fn is_interactive(&self) -> bool {
            self.interactive
        }

        fn poll_readable(&mut self, timeout: Duration) -> io::Result<bool> {
            if self.closed.load(Ordering::SeqCst) {
                return Ok(true);
            }
            if self.bytes.lock().unwrap().is_empty() {
                std::thread::sleep(timeout.min(Duration::from_millis(5)));
                return Ok(false);
            }
            Ok(true)
        }

        fn read_unit(&mut self) -> io::Result<Option<u8>> {
            if self.closed.load(Ordering::SeqCst) {
                return Ok(None);
            }
            let mut bytes = self.bytes.lock().unwrap();
            self.reads.lock().unwrap().push(bytes.len());
            Ok(bytes.pop_front())
        }
    }

    fn drain_until(listener: &InputListener, want: usize) -> Vec<u8> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut got = Vec::new();
        while got.len() < want && Instant::now() < deadline {
            got.extend(listener.drain());
            std::thread::sleep(Duration::from_millis(2));
        }
        got
    }

    #[test]
    fn test_non_interactive_source_is_refused() {
        let mut listener = InputListener::new(ScriptedSource::default());
        assert!(!listener.start());
        assert!(!listener.is_running());
        assert!(listener.drain().is_empty());
        listener.stop();
    }

    #[test]
    fn test_bytes_arrive_in_order() {
        let source = ScriptedSource::interactive();
        let mut listener = InputListener::new(source.clone());
        assert!(listener.start());

        source.push(b"\x1b[Aq");
        assert_eq!(drain_until(&listener, 4), b"\x1b[Aq");
        assert!(listener.drain().is_empty());
        listener.stop();
    }

    #[test]
    fn test_one_read_per_readiness() {
        let source = ScriptedSource::interactive();
        let mut listener = InputListener::new(source.clone());
        assert!(listener.start());
        source.push(b"hep");
        drain_until(&listener, 3);
        listener.stop();

        // Each read saw the queue one shorter than the last.
        assert_eq!(*source.reads.lock().unwrap(), vec![3, 2, 1]);
    }

    #[test]
    fn test_stop_is_idempotent_and_restartable() {
        let source = ScriptedSource::interactive();
        let mut listener = InputListener::new(source.clone());
        assert!(listener.start());
        assert!(listener.start());
        listener.stop();
        listener.stop();
        assert!(!listener.is_running());

        assert!(listener.start());
        source.push(b"h");
        assert_eq!(drain_until(&listener, 1), b"h");
    }

    #[test]
    fn test_start_after_end_of_input_reports_stopped() {
        let source = ScriptedSource::interactive();
        let mut listener = InputListener::new(source.clone());
        assert!(listener.start());

        source.closed.store(true, Ordering::SeqCst);
        let deadline = Instant::now() + Duration::from_secs(5);
        while listener.is_running() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(2));
        }
        assert!(!listener.is_running());

        assert!(!listener.start());
        assert!(listener.worker.is_none());
        assert!(listener.source.is_some());

        source.closed.store(false, Ordering::SeqCst);
        assert!(listener.start());
        source.push(b"p");
        assert_eq!(drain_until(&listener, 1), b"p");
    }
}
