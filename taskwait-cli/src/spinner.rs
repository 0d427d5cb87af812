//! Terminal spinner
//!
//! A [`ProgressSink`] that keeps one line of the terminal updated with the
//! progress of the task and finishes it when the session ends. The glyph is
//! animated by a background task, independently of the poll cadence.

use colored::*;
use std::io::{self, Stdout, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use taskwait_core::{PollOutcome, StatusSnapshot};
use taskwait_poller::ProgressSink;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const FRAME_PERIOD: Duration = Duration::from_millis(100);

/// Carriage return plus "erase line"
const REWIND: &str = "\r\x1b[2K";

/// The line being redrawn, shared with the animation task
struct Line<W> {
    out: W,
    frame: usize,
    message: String,
    finished: bool,
}

impl<W: Write> Line<W> {
    fn draw(&mut self) {
        if self.finished {
            return;
        }
        let frame = FRAMES[self.frame % FRAMES.len()];
        self.frame += 1;
        // Write errors are ignored; progress display is best effort
        let _ = write!(self.out, "{}{} {}", REWIND, frame.cyan(), self.message);
        let _ = self.out.flush();
    }
}

/// Line-overwriting spinner
///
/// Must be created inside a tokio runtime.
pub struct SpinnerSink<W: Write + Send + 'static = Stdout> {
    line: Arc<Mutex<Line<W>>>,
    ticker: JoinHandle<()>,
}

impl SpinnerSink<Stdout> {
    /// Spinner on stdout, showing `message` until the first update
    pub fn stdout(message: &str) -> Self {
        Self::new(io::stdout(), message)
    }
}

impl<W: Write + Send + 'static> SpinnerSink<W> {
    pub fn new(out: W, message: &str) -> Self {
        let line = Arc::new(Mutex::new(Line {
            out,
            frame: 0,
            message: message.to_string(),
            finished: false,
        }));
        if let Ok(mut line) = line.lock() {
            line.draw();
        }

        let ticker = tokio::spawn(animate(Arc::clone(&line)));
        Self { line, ticker }
    }
}

async fn animate<W: Write>(line: Arc<Mutex<Line<W>>>) {
    let mut ticks = time::interval_at(Instant::now() + FRAME_PERIOD, FRAME_PERIOD);
    loop {
        ticks.tick().await;
        match line.lock() {
            Ok(mut line) if !line.finished => line.draw(),
            _ => return,
        }
    }
}

impl<W: Write + Send + 'static> Drop for SpinnerSink<W> {
    fn drop(&mut self) {
        self.ticker.abort();
    }
}

impl<W: Write + Send + 'static> ProgressSink for SpinnerSink<W> {
    fn on_update(&mut self, snapshot: &StatusSnapshot) {
        if let Ok(mut line) = self.line.lock() {
            line.message = format!(
                "Task of type {} is {}% complete",
                snapshot.label, snapshot.progress
            );
            line.draw();
        }
    }

    fn on_terminal(&mut self, outcome: &PollOutcome) {
        self.ticker.abort();
        let mark = match outcome {
            PollOutcome::Completed { .. } => "✔".green(),
            _ => "✘".red(),
        };
        if let Ok(mut line) = self.line.lock() {
            line.finished = true;
            let _ = writeln!(line.out, "{}{}", REWIND, mark);
            let _ = line.out.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn snapshot(progress: u32) -> StatusSnapshot {
        StatusSnapshot::new("op", "Database backup created", progress, "in-progress", "")
    }

    #[tokio::test(start_paused = true)]
    async fn test_spinner_rewrites_one_line() {
        let buf = SharedBuf::default();
        let mut spinner = SpinnerSink::new(buf.clone(), "Waiting for task op to complete");
        spinner.on_update(&snapshot(0));
        spinner.on_update(&snapshot(40));

        let output = buf.contents();
        assert!(output.contains("Waiting for task op to complete"));
        assert!(output.contains("Task of type Database backup created is 0% complete"));
        assert!(output.contains("Task of type Database backup created is 40% complete"));
        assert!(!output.contains('\n'));
        assert_eq!(output.matches(REWIND).count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spinner_animates_between_updates() {
        let buf = SharedBuf::default();
        let _spinner = SpinnerSink::new(buf.clone(), "Waiting");

        time::sleep(Duration::from_millis(250)).await;

        let output = buf.contents();
        assert!(output.matches(REWIND).count() >= 3);
        for frame in &FRAMES[..3] {
            assert!(output.contains(frame), "missing frame {}", frame);
        }
        assert!(output.matches("Waiting").count() >= 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spinner_finishes_line() {
        let buf = SharedBuf::default();
        let mut spinner = SpinnerSink::new(buf.clone(), "Waiting");
        spinner.on_terminal(&PollOutcome::TimedOut {
            elapsed: Duration::from_secs(45),
            last_snapshot: None,
        });

        // No redraw once the line is finished
        time::sleep(Duration::from_secs(1)).await;

        let output = buf.contents();
        assert!(output.ends_with('\n'));
        assert!(output.contains('✘'));
        assert_eq!(output.matches(REWIND).count(), 2);
    }
}
