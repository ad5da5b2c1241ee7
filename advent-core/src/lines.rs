//! Lazy line scanning over buffered readers.

use std::collections::VecDeque;
use std::io::BufRead;
use std::iter::FusedIterator;

use crate::error::{InputError, Result};

/// Streams newline-delimited records from a buffered reader.
///
/// Line terminators (`\n` and `\r\n`) are stripped. Blank lines that trail the
/// last non-blank record are dropped; interior blank lines are yielded as-is.
/// The iterator is fused after the first read failure.
///
/// # Examples
/// ```
/// use std::io::Cursor;
/// use advent_core::LineSource;
///
/// let lines: Vec<String> = LineSource::new(Cursor::new("+1\r\n\n-2\n\n\n"))
///     .collect::<Result<_, _>>()?;
/// assert_eq!(lines, ["+1", "", "-2"]);
/// # Ok::<(), advent_core::InputError>(())
/// ```
#[derive(Debug)]
pub struct LineSource<R> {
    reader: R,
    lines_read: usize,
    blanks: VecDeque<String>,
    ready: VecDeque<String>,
    finished: bool,
}

impl<R: BufRead> LineSource<R> {
    /// Wraps `reader` without reading from it.
    #[must_use]
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            lines_read: 0,
            blanks: VecDeque::new(),
            ready: VecDeque::new(),
            finished: false,
        }
    }

    fn read_record(&mut self) -> Option<Result<String>> {
        let mut buffer = String::new();
        match self.reader.read_line(&mut buffer) {
            Ok(0) => None,
            Ok(_) => {
                self.lines_read += 1;
                strip_terminator(&mut buffer);
                Some(Ok(buffer))
            }
            Err(source) => Some(Err(InputError::Io {
                line: self.lines_read + 1,
                source,
            })),
        }
    }
}

impl<R: BufRead> Iterator for LineSource<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.ready.pop_front() {
                return Some(Ok(line));
            }
            if self.finished {
                return None;
            }
            match self.read_record() {
                None => {
                    self.finished = true;
                    self.blanks.clear();
                }
                Some(Err(err)) => {
                    self.finished = true;
                    self.blanks.clear();
                    return Some(Err(err));
                }
                Some(Ok(line)) if line.trim().is_empty() => self.blanks.push_back(line),
                Some(Ok(line)) => {
                    self.ready.append(&mut self.blanks);
                    self.ready.push_back(line);
                }
            }
        }
    }
}

impl<R: BufRead> FusedIterator for LineSource<R> {}

fn strip_terminator(buffer: &mut String) {
    if buffer.ends_with('\n') {
        buffer.pop();
        if buffer.ends_with('\r') {
            buffer.pop();
        }
    }
}
