use std::io::{self, Write};
use std::sync::{Mutex, MutexGuard};

static BUFFER: Mutex<Option<Vec<String>>> = Mutex::new(None);

fn lock() -> MutexGuard<'static, Option<Vec<String>>> {
    // A poisoned buffer still holds valid lines
    BUFFER.lock().unwrap_or_else(|e| e.into_inner())
}

/// Activate buffering. While active, log lines are stored instead of being
/// printed to stderr, so they don't corrupt the TUI.
pub fn activate() {
    *lock() = Some(Vec::new());
}

/// Deactivate buffering and return all collected lines.
pub fn drain() -> Vec<String> {
    lock().take().unwrap_or_default()
}

/// Writer handed to the tracing subscriber (`.with_writer(stderr_buffer::writer)`).
pub fn writer() -> BufferedStderr {
    BufferedStderr
}

/// Routes each write to the buffer when active, to stderr otherwise.
pub struct BufferedStderr;

impl Write for BufferedStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = lock();
        if let Some(lines) = guard.as_mut() {
            let text = String::from_utf8_lossy(buf);
            lines.push(text.trim_end_matches('\n').to_string());
            Ok(buf.len())
        } else {
            drop(guard);
            io::stderr().write(buf)
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffers_while_active() {
        activate();
        let mut w = writer();
        w.write_all(b"WARN first\n").unwrap();
        w.write_all(b"INFO second\n").unwrap();

        let lines = drain();
        assert_eq!(lines, vec!["WARN first".to_string(), "INFO second".to_string()]);

        // Drained: nothing left and buffering is off
        assert!(drain().is_empty());
    }
}
