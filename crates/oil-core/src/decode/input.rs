//! Seekable, buffered adapter over a forward-only byte stream.
//!
//! Decoders need `BufRead + Seek` (format probing rewinds after peeking at
//! the header), but a job is handed a plain `Read`. `CachedInput` keeps every
//! byte it has pulled from the stream, so seeking backwards is served from
//! memory and the stream itself is only ever read forwards, once.

use std::io::{self, BufRead, Read, Seek, SeekFrom};

use crate::options::MAX_BUFFER_SIZE;

/// In-memory cache in front of a `Read`.
#[derive(Debug)]
pub struct CachedInput<R> {
    inner: R,
    cache: Vec<u8>,
    pos: usize,
    chunk: usize,
    exhausted: bool,
}

impl<R: Read> CachedInput<R> {
    /// Wrap `inner`, pulling at most `chunk` bytes per read. The chunk is
    /// kept within 1..=`MAX_BUFFER_SIZE`.
    pub fn new(inner: R, chunk: usize) -> Self {
        Self {
            inner,
            cache: Vec::new(),
            pos: 0,
            chunk: chunk.clamp(1, MAX_BUFFER_SIZE),
            exhausted: false,
        }
    }

    /// Number of bytes pulled from the stream so far.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// True once the stream has reported end of input.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Pull one chunk from the stream into the cache. Returns the number of
    /// bytes added; zero means end of input.
    fn fill(&mut self) -> io::Result<usize> {
        if self.exhausted {
            return Ok(0);
        }

        let start = self.cache.len();
        self.cache.resize(start + self.chunk, 0);
        let read = loop {
            match self.inner.read(&mut self.cache[start..]) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.cache.truncate(start);
                    return Err(e);
                }
            }
        };
        self.cache.truncate(start + read);

        if read == 0 {
            self.exhausted = true;
        }
        tracing::trace!(read, cached = self.cache.len(), "input cache fill");
        Ok(read)
    }

    /// Pull from the stream until `target` bytes are cached or input ends.
    fn fill_to(&mut self, target: usize) -> io::Result<()> {
        while self.cache.len() < target {
            if self.fill()? == 0 {
                break;
            }
        }
        Ok(())
    }

    fn fill_to_end(&mut self) -> io::Result<()> {
        while self.fill()? != 0 {}
        Ok(())
    }
}

impl<R: Read> Read for CachedInput<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let available = self.fill_buf()?;
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.consume(n);
        Ok(n)
    }
}

impl<R: Read> BufRead for CachedInput<R> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.pos >= self.cache.len() {
            self.fill_to(self.pos + 1)?;
        }
        let start = self.pos.min(self.cache.len());
        Ok(&self.cache[start..])
    }

    fn consume(&mut self, amt: usize) {
        self.pos = self.pos.saturating_add(amt);
    }
}

impl<R: Read> Seek for CachedInput<R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(offset) => Some(offset as i128),
            SeekFrom::Current(delta) => Some(self.pos as i128 + delta as i128),
            SeekFrom::End(delta) => {
                self.fill_to_end()?;
                Some(self.cache.len() as i128 + delta as i128)
            }
        };

        match target.and_then(|t| usize::try_from(t).ok()) {
            Some(t) => {
                // Seeking past the end of input is allowed; reads there see EOF.
                self.fill_to(t)?;
                self.pos = t;
                Ok(t as u64)
            }
            None => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "invalid seek to a negative position",
            )),
        }
    }

    fn stream_position(&mut self) -> io::Result<u64> {
        Ok(self.pos as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Reader that yields its data one byte at a time.
    struct Trickle(Cursor<Vec<u8>>);

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let len = buf.len().min(1);
            self.0.read(&mut buf[..len])
        }
    }

    /// Reader that fails after `ok_bytes` bytes.
    struct FailAfter {
        data: Cursor<Vec<u8>>,
        ok_bytes: u64,
    }

    impl Read for FailAfter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.data.position() >= self.ok_bytes {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "boom"));
            }
            let remaining = (self.ok_bytes - self.data.position()) as usize;
            let len = buf.len().min(remaining);
            self.data.read(&mut buf[..len])
        }
    }

    #[test]
    fn test_read_all() {
        let data: Vec<u8> = (0..100).collect();
        let mut input = CachedInput::new(Cursor::new(data.clone()), 16);
        let mut out = Vec::new();
        input.read_to_end(&mut out).unwrap();
        assert_eq!(out, data);
        assert!(input.is_exhausted());
    }

    #[test]
    fn test_rewind_is_served_from_cache() {
        let data: Vec<u8> = (0..64).collect();
        let mut input = CachedInput::new(Cursor::new(data.clone()), 8);

        let mut head = [0u8; 4];
        input.read_exact(&mut head).unwrap();
        assert_eq!(head, [0, 1, 2, 3]);
        assert_eq!(input.cached_len(), 8);

        input.seek(SeekFrom::Start(0)).unwrap();
        let mut out = Vec::new();
        input.read_to_end(&mut out).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn test_small_reads_from_stream() {
        let data: Vec<u8> = (0..50).collect();
        let mut input = CachedInput::new(Trickle(Cursor::new(data.clone())), 8192);
        let mut out = Vec::new();
        input.read_to_end(&mut out).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn test_seek_relative_and_end() {
        let data: Vec<u8> = (0..32).collect();
        let mut input = CachedInput::new(Cursor::new(data), 4);

        assert_eq!(input.seek(SeekFrom::Current(10)).unwrap(), 10);
        let mut b = [0u8; 1];
        input.read_exact(&mut b).unwrap();
        assert_eq!(b[0], 10);

        assert_eq!(input.seek(SeekFrom::End(-2)).unwrap(), 30);
        input.read_exact(&mut b).unwrap();
        assert_eq!(b[0], 30);

        assert!(input.seek(SeekFrom::Current(-100)).is_err());
    }

    #[test]
    fn test_read_past_end_returns_zero() {
        let mut input = CachedInput::new(Cursor::new(vec![1u8, 2]), 4);
        input.seek(SeekFrom::Start(10)).unwrap();
        let mut buf = [0u8; 4];
        assert_eq!(input.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn test_oversized_chunk_is_capped() {
        let data: Vec<u8> = (0..=255).collect();
        let mut input = CachedInput::new(Cursor::new(data.clone()), usize::MAX);

        let mut head = [0u8; 2];
        input.read_exact(&mut head).unwrap();
        assert_eq!(input.cached_len(), data.len());

        input.seek(SeekFrom::Start(0)).unwrap();
        let mut out = Vec::new();
        input.read_to_end(&mut out).unwrap();
        assert_eq!(out, data);
    }

    #[test]
    fn test_stream_error_is_surfaced() {
        let reader = FailAfter {
            data: Cursor::new(vec![7u8; 64]),
            ok_bytes: 10,
        };
        let mut input = CachedInput::new(reader, 4);

        let mut out = Vec::new();
        let err = input.read_to_end(&mut out).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(input.cached_len(), 10);
    }
}
