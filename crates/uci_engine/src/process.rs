//! Child process plumbing for a UCI engine
//!
//! A reader thread forwards stdout lines over a channel so that every wait
//! on the engine has a deadline.

use chess_core::{AgentError, AgentResult};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

pub struct UciProcess {
    child: Child,
    stdin: BufWriter<ChildStdin>,
    lines: Receiver<String>,
    timeout: Duration,
}

impl UciProcess {
    /// Start `path` with `args`; every later wait is bounded by `timeout`
    pub fn spawn(path: &Path, args: &[String], timeout: Duration) -> AgentResult<Self> {
        let mut child = Command::new(path)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                AgentError::Unavailable(format!("failed to start {}: {e}", path.display()))
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| AgentError::Unavailable("engine stdin not captured".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| AgentError::Unavailable("engine stdout not captured".to_string()))?;

        let (tx, lines) = mpsc::channel();
        thread::spawn(move || {
            for line in BufReader::new(stdout).lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            child,
            stdin: BufWriter::new(stdin),
            lines,
            timeout,
        })
    }

    pub fn send(&mut self, command: &str) -> AgentResult<()> {
        tracing::debug!(target: "uci", ">> {command}");
        writeln!(self.stdin, "{command}")?;
        self.stdin.flush()?;
        Ok(())
    }

    /// Read lines until `done` accepts one, which is returned.
    ///
    /// Lines before it are passed to `done` as well, so callers can collect
    /// them.
    pub fn read_until(&mut self, mut done: impl FnMut(&str) -> bool) -> AgentResult<String> {
        let deadline = Instant::now() + self.timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.lines.recv_timeout(remaining) {
                Ok(line) => {
                    tracing::debug!(target: "uci", "<< {line}");
                    if done(&line) {
                        return Ok(line);
                    }
                }
                Err(RecvTimeoutError::Timeout) => return Err(AgentError::Timeout(self.timeout)),
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(AgentError::Unavailable(
                        "engine closed its output".to_string(),
                    ))
                }
            }
        }
    }

    /// `isready` / `readyok` round trip
    pub fn sync(&mut self) -> AgentResult<()> {
        self.send("isready")?;
        self.read_until(|line| line.trim() == "readyok")?;
        Ok(())
    }
}

impl Drop for UciProcess {
    fn drop(&mut self) {
        let _ = self.send("quit");
        for _ in 0..25 {
            if let Ok(Some(_)) = self.child.try_wait() {
                return;
            }
            thread::sleep(Duration::from_millis(20));
        }
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
