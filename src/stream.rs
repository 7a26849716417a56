//! Splitting of streamed bytes (serial port, UDP, log files) into lines.

use std::io::{self, Read};

/// Accumulates chunks of bytes and hands out complete lines.
///
/// Lines end with `\n`, an `\r` right before it is dropped. Bytes after the
/// last `\n` wait for the next chunk.
///
/// ```
/// use nmea0183::stream::LineBuffer;
///
/// let mut buffer = LineBuffer::new();
/// assert!(buffer.push(b"$GPHDT,274.").is_empty());
/// assert_eq!(buffer.push(b"07,T*03\r\n$GP"), ["$GPHDT,274.07,T*03"]);
/// assert_eq!(buffer.pending(), b"$GP");
/// ```
#[derive(Debug, Default, Clone)]
pub struct LineBuffer {
    buffer: Vec<u8>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `chunk` and returns the lines it completed, in order.
    ///
    /// Invalid UTF-8 is replaced, the tokenizer rejects such lines later on.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);
        let mut lines = Vec::new();

        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let mut line: Vec<u8> = self.buffer.drain(..=pos).collect();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            lines.push(String::from_utf8_lossy(&line).into_owned());
        }

        lines
    }

    /// Bytes received after the last line end.
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    /// Takes the unterminated rest, `None` when nothing is pending.
    pub fn flush(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let mut line = core::mem::take(&mut self.buffer);
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Some(String::from_utf8_lossy(&line).into_owned())
    }
}

/// Iterator over the lines of a reader, read `chunk_size` bytes at a time.
///
/// A final line without line end is yielded once the reader is exhausted.
///
/// ```
/// use nmea0183::{Registry, stream::Lines};
///
/// let log = b"$GPHDT,274.07,T*03\r\n$GPVTG,45.5,T,67.5,M,30.45,N,56.40,K*4B";
/// let registry = Registry::default();
/// let types: Vec<_> = Lines::new(&log[..], 16)
///     .map(|line| registry.parse(&line.unwrap()).unwrap().sentence_type().to_owned())
///     .collect();
/// assert_eq!(types, ["HDT", "VTG"]);
/// ```
#[derive(Debug)]
pub struct Lines<R: Read> {
    reader: R,
    buffer: LineBuffer,
    ready: std::collections::VecDeque<String>,
    chunk: Vec<u8>,
    done: bool,
}

impl<R: Read> Lines<R> {
    /// # Panics
    ///
    /// When `chunk_size` is zero.
    pub fn new(reader: R, chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "chunk size must not be zero");
        Self {
            reader,
            buffer: LineBuffer::new(),
            ready: Default::default(),
            chunk: vec![0; chunk_size],
            done: false,
        }
    }
}

impl<R: Read> Iterator for Lines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.ready.pop_front() {
                return Some(Ok(line));
            }
            if self.done {
                return None;
            }
            match self.reader.read(&mut self.chunk) {
                // end of stream
                Ok(0) => {
                    self.done = true;
                    return self.buffer.flush().map(Ok);
                }
                Ok(n) => self.ready.extend(self.buffer.push(&self.chunk[..n])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const GLL: &str = "$GPGLL,3926.7952,N,12000.5947,W,022732,A,A*58";

    #[test]
    fn complete_lines() {
        let mut buffer = LineBuffer::new();
        let lines = buffer.push(format!("{GLL}\r\n{GLL}\r\n").as_bytes());
        assert_eq!(lines, [GLL, GLL]);
        assert!(buffer.pending().is_empty());
        assert_eq!(buffer.flush(), None);
    }

    #[test]
    fn partial_line() {
        let mut buffer = LineBuffer::new();
        assert!(buffer.push(&GLL.as_bytes()[..20]).is_empty());
        assert_eq!(buffer.push(&GLL.as_bytes()[20..]), Vec::<String>::new());
        assert_eq!(buffer.push(b"\n"), [GLL]);
    }

    #[test]
    fn bare_line_feed_and_empty_lines() {
        let mut buffer = LineBuffer::new();
        assert_eq!(buffer.push(b"a\n\r\nb\n"), ["a", "", "b"]);
    }

    #[test]
    fn chunk_sizes_do_not_matter() {
        let data = format!("{GLL}\r\n{GLL}\r\n{GLL}");
        for chunk_size in [1, 7, 10, 64, 1024] {
            let lines: Vec<String> = Lines::new(data.as_bytes(), chunk_size)
                .collect::<io::Result<_>>()
                .unwrap();
            assert_eq!(lines, [GLL, GLL, GLL], "chunk size {}", chunk_size);
        }
    }

    #[test]
    fn reads_reuse_one_chunk() {
        struct Sizes<'a> {
            data: &'a [u8],
            sizes: Vec<usize>,
        }

        impl Read for Sizes<'_> {
            fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
                self.sizes.push(buf.len());
                self.data.read(buf)
            }
        }

        let data = format!("{GLL}\n{GLL}\n");
        let mut lines = Lines::new(
            Sizes {
                data: data.as_bytes(),
                sizes: Vec::new(),
            },
            8,
        );
        assert_eq!(lines.by_ref().count(), 2);
        assert!(lines.reader.sizes.iter().all(|len| *len == 8));
        assert_eq!(lines.chunk.len(), 8);
    }

    #[test]
    fn empty_reader() {
        assert_eq!(Lines::new(&b""[..], 10).count(), 0);
    }

    #[test]
    fn read_errors_are_yielded() {
        struct Broken;

        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("unplugged"))
            }
        }

        let err = Lines::new(Broken, 10).next().unwrap().unwrap_err();
        assert_eq!(err.to_string(), "unplugged");
    }
}
