//! Character sources backed by byte readers
//!
//! [`ReaderChars`] decodes UTF-8 incrementally, one character per pull, so a
//! file is never loaded whole. The reader is dropped as soon as it reports
//! end-of-input or fails. A failure ends the sequence early; call
//! [`ReaderChars::finish`] after draining to find out whether that happened.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::lexer::Position;
use crate::sequence::{Pull, PullSequence, Step};

/// Character source over a file
pub type FileChars = ReaderChars<BufReader<File>>;

/// Pulls UTF-8 characters from a buffered reader
#[derive(Debug)]
pub struct ReaderChars<R> {
    reader: Option<R>,
    position: Position,
    error: Option<Error>,
}

impl<R: BufRead> ReaderChars<R> {
    /// Wraps a buffered reader
    pub fn new(reader: R) -> Self {
        ReaderChars {
            reader: Some(reader),
            position: Position::START,
            error: None,
        }
    }

    /// Wraps the reader and turns it into a pull sequence
    pub fn sequence(reader: R) -> PullSequence<Self> {
        PullSequence::new(ReaderChars::new(reader))
    }

    /// Returns true once the reader has been dropped
    pub fn is_released(&self) -> bool {
        self.reader.is_none()
    }

    /// Reports the error that ended the sequence, if any
    pub fn finish(self) -> Result<()> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn release(&mut self) {
        if self.reader.take().is_some() {
            debug!(position = %self.position, "released character source");
        }
    }

    fn read_char(&mut self) -> Result<Option<char>> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(None);
        };
        let Some(first) = read_byte(reader)? else {
            return Ok(None);
        };
        let invalid = Error::InvalidUtf8 {
            line: self.position.line,
            column: self.position.column,
        };
        let Some(width) = utf8_width(first) else {
            return Err(invalid);
        };

        let mut bytes = [first, 0, 0, 0];
        for slot in bytes.iter_mut().take(width).skip(1) {
            match read_byte(reader)? {
                Some(b) => *slot = b,
                None => return Err(invalid),
            }
        }

        std::str::from_utf8(&bytes[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .map(Some)
            .ok_or(invalid)
    }
}

impl FileChars {
    /// Opens a file as a character source
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| Error::open(path, err))?;
        debug!(path = %path.display(), "opened character source");
        Ok(ReaderChars::new(BufReader::new(file)))
    }
}

impl ReaderChars<io::StdinLock<'static>> {
    /// Reads characters from standard input
    pub fn stdin() -> Self {
        ReaderChars::new(io::stdin().lock())
    }
}

impl<R: BufRead> Pull for ReaderChars<R> {
    type Item = char;

    fn pull(&mut self) -> Step<char> {
        match self.read_char() {
            Ok(Some(c)) => {
                self.position = self.position.after(c);
                Step::Value(c)
            }
            Ok(None) => {
                self.release();
                Step::Done
            }
            Err(err) => {
                warn!(error = %err, "character source failed; ending input early");
                self.error = Some(err);
                self.release();
                Step::Done
            }
        }
    }
}

fn read_byte<R: BufRead>(reader: &mut R) -> io::Result<Option<u8>> {
    loop {
        let byte = match reader.fill_buf() {
            Ok(buf) => buf.first().copied(),
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        };
        if byte.is_some() {
            reader.consume(1);
        }
        return Ok(byte);
    }
}

/// Encoded length implied by a UTF-8 leading byte
fn utf8_width(first: u8) -> Option<usize> {
    match first {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}
