//! Line input shared by the chat loop and the review prompt.
//!
//! Lines are read on a dedicated thread and handed over a channel, so a
//! pending read never holds up runtime shutdown. The receiver sits behind
//! an async mutex: whichever of the chat loop or the review prompt is
//! waiting gets the next line.

use std::io::{self, BufRead, Write};
use tokio::sync::{Mutex, mpsc};
use tracing::warn;

/// Lines buffered between the reader thread and consumers.
const LINE_BUFFER: usize = 16;

pub struct LineReader {
    lines: Mutex<mpsc::Receiver<String>>,
}

impl LineReader {
    /// Reader over the process's stdin.
    pub fn stdin() -> Self {
        Self::from_reader(io::BufReader::new(io::stdin()))
    }

    pub fn from_reader(reader: impl BufRead + Send + 'static) -> Self {
        let (tx, rx) = mpsc::channel(LINE_BUFFER);
        std::thread::spawn(move || {
            for line in reader.lines() {
                match line {
                    Ok(line) => {
                        if tx.blocking_send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("Failed to read input: {}", e);
                        break;
                    }
                }
            }
        });
        Self {
            lines: Mutex::new(rx),
        }
    }

    /// Next line without its terminator; `None` at end of input.
    ///
    /// Cancel-safe: a dropped call loses no line.
    pub async fn next_line(&self) -> Option<String> {
        self.lines.lock().await.recv().await
    }
}

/// Print a prompt without a trailing newline.
pub fn prompt(text: &str) {
    print!("{}", text);
    let _ = io::stdout().flush();
}
