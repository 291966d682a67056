//! Child process exit status decoding

use crate::constants::{MSG_ABORTED, MSG_ABORTED_BY_SIGNAL, MSG_EXITED_NORMALLY};

/// How the child process ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Exited(i32),
    Signaled(i32),
    /// Neither a normal exit nor a signal (stopped, core dump bookkeeping, ...)
    Aborted,
}

impl ExitStatus {
    /// Decode a raw `waitpid` status as delivered by the emulator
    #[cfg(unix)]
    pub fn from_wait_status(raw: i32) -> Self {
        use std::os::unix::process::ExitStatusExt;

        let status = std::process::ExitStatus::from_raw(raw);
        if let Some(code) = status.code() {
            ExitStatus::Exited(code)
        } else if let Some(signal) = status.signal() {
            ExitStatus::Signaled(signal)
        } else {
            ExitStatus::Aborted
        }
    }

    #[cfg(not(unix))]
    pub fn from_wait_status(raw: i32) -> Self {
        ExitStatus::Exited(raw)
    }

    pub fn message(&self) -> String {
        match self {
            ExitStatus::Exited(code) => format!("{} {}", MSG_EXITED_NORMALLY, code),
            ExitStatus::Signaled(signal) => format!("{} {}.", MSG_ABORTED_BY_SIGNAL, signal),
            ExitStatus::Aborted => MSG_ABORTED.to_string(),
        }
    }
}

impl std::fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(unix)]
    fn test_normal_exit() {
        let status = ExitStatus::from_wait_status(7 << 8);
        assert_eq!(status, ExitStatus::Exited(7));
        assert_eq!(status.message(), "The child process exited normally with status 7");
    }

    #[test]
    #[cfg(unix)]
    fn test_signal() {
        let status = ExitStatus::from_wait_status(9);
        assert_eq!(status, ExitStatus::Signaled(9));
        assert_eq!(status.message(), "The child process was aborted by signal 9.");
    }

    #[test]
    #[cfg(unix)]
    fn test_stopped_is_aborted() {
        // WIFSTOPPED: low byte 0x7f, stop signal in the next byte
        let status = ExitStatus::from_wait_status((19 << 8) | 0x7f);
        assert_eq!(status, ExitStatus::Aborted);
        assert_eq!(status.message(), "The child process was aborted.");
    }
}
