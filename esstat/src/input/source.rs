//! Byte sources for the input listener.

use std::io;
use std::time::Duration;

/// A readable stream the listener polls one byte at a time.
pub trait InputSource: Send + 'static {
    /// Whether the source is an interactive terminal. The listener refuses to
    /// start on anything else.
    fn is_interactive(&self) -> bool;

    /// Wait up to `timeout` for at least one byte to become readable.
    ///
    /// # Errors
    /// Propagates the underlying readiness call's error.
    fn poll_readable(&mut self, timeout: Duration) -> io::Result<bool>;

    /// Read exactly one byte. `Ok(None)` means end of input.
    ///
    /// # Errors
    /// Propagates the underlying read error.
    fn read_unit(&mut self) -> io::Result<Option<u8>>;
}

/// Standard input, read through `poll(2)`/`read(2)` so that a single byte is
/// consumed per readiness report and nothing sits in a userspace buffer.
#[derive(Debug, Default)]
pub struct StdinSource;

impl StdinSource {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[cfg(unix)]
impl InputSource for StdinSource {
    fn is_interactive(&self) -> bool {
        use std::io::IsTerminal;
        io::stdin().is_terminal()
    }

    #[allow(unsafe_code)]
    fn poll_readable(&mut self, timeout: Duration) -> io::Result<bool> {
        let mut fds = libc::pollfd { fd: libc::STDIN_FILENO, events: libc::POLLIN, revents: 0 };
        let millis = libc::c_int::try_from(timeout.as_millis()).unwrap_or(libc::c_int::MAX);
        // SAFETY: `fds` is a single valid pollfd that outlives the call.
        let ready = unsafe { libc::poll(&mut fds, 1, millis) };
        match ready {
            -1 => {
                let err = io::Error::last_os_error();
                if err.kind() == io::ErrorKind::Interrupted {
                    Ok(false)
                } else {
                    Err(err)
                }
            }
            0 => Ok(false),
            _ => readiness(fds.revents),
        }
    }

    #[allow(unsafe_code)]
    fn read_unit(&mut self) -> io::Result<Option<u8>> {
        let mut byte = 0u8;
        // SAFETY: reads at most one byte into a live, writable u8.
        let n = unsafe { libc::read(libc::STDIN_FILENO, std::ptr::addr_of_mut!(byte).cast(), 1) };
        match n {
            1 => Ok(Some(byte)),
            0 => Ok(None),
            _ => Err(io::Error::last_os_error()),
        }
    }
}

/// Interpret a pollfd's `revents`. Hangup counts as readable so the next read
/// sees end of input; an error condition with nothing to read is an error,
/// since poll(2) would keep reporting it immediately.
#[cfg(unix)]
fn readiness(revents: libc::c_short) -> io::Result<bool> {
    if revents & (libc::POLLIN | libc::POLLHUP) != 0 {
        Ok(true)
    } else if revents & (libc::POLLERR | libc::POLLNVAL) != 0 {
        Err(io::Error::other(format!("stdin poll reported error condition {revents:#x}")))
    } else {
        Ok(false)
    }
}

// Without poll(2) there is no single-byte readiness, so the keyboard stays off.
#[cfg(not(unix))]
impl InputSource for StdinSource {
    fn is_interactive(&self) -> bool {
        false
    }

    fn poll_readable(&mut self, _timeout: Duration) -> io::Result<bool> {
        Ok(false)
    }

    fn read_unit(&mut self) -> io::Result<Option<u8>> {
        Ok(None)
    }
}
