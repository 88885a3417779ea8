use std::io::{self, Read, Seek, SeekFrom};

/// Where the walker gets its bytes from.
///
/// `read` and `skip` only come up short when the input is exhausted, which is
/// how the walker tells a truncated member from a clean end of file.
pub trait ByteSource {
    /// Fills `buf` as far as the input allows and returns the number of bytes read.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Moves the cursor forward by up to `n` bytes and returns how far it moved.
    fn skip(&mut self, n: u64) -> io::Result<u64>;

    /// Current offset from the start of the stream.
    fn tell(&self) -> u64;

    /// Total length of the input, if it is known up front.
    fn total_len(&self) -> Option<u64> {
        None
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (**self).read(buf)
    }

    fn skip(&mut self, n: u64) -> io::Result<u64> {
        (**self).skip(n)
    }

    fn tell(&self) -> u64 {
        (**self).tell()
    }

    fn total_len(&self) -> Option<u64> {
        (**self).total_len()
    }
}

/// Seekable input (files, in-memory buffers). Payloads are skipped with a seek.
pub struct SeekSource<R> {
    inner: R,
    pos: u64,
    len: u64,
}

impl<R: Read + Seek> SeekSource<R> {
    /// Wraps `inner` at its current position. The stream length is looked up once here.
    pub fn new(mut inner: R) -> io::Result<Self> {
        let pos = inner.seek(SeekFrom::Current(0))?;
        let len = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(pos))?;
        Ok(Self { inner, pos, len })
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read + Seek> ByteSource for SeekSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = fill(&mut self.inner, buf)?;
        self.pos += n as u64;
        Ok(n)
    }

    fn skip(&mut self, n: u64) -> io::Result<u64> {
        // Seeking past the end succeeds, so clamp to what is actually there.
        let n = n.min(self.len.saturating_sub(self.pos));
        if n > 0 {
            self.pos = self.inner.seek(SeekFrom::Start(self.pos + n))?;
        }
        Ok(n)
    }

    fn tell(&self) -> u64 {
        self.pos
    }

    fn total_len(&self) -> Option<u64> {
        Some(self.len)
    }
}

/// Forward-only input such as a pipe. Payloads are read and discarded.
pub struct StreamSource<R> {
    inner: R,
    pos: u64,
}

impl<R: Read> StreamSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, pos: 0 }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ByteSource for StreamSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = fill(&mut self.inner, buf)?;
        self.pos += n as u64;
        Ok(n)
    }

    fn skip(&mut self, n: u64) -> io::Result<u64> {
        let skipped = io::copy(&mut (&mut self.inner).take(n), &mut io::sink())?;
        self.pos += skipped;
        Ok(skipped)
    }

    fn tell(&self) -> u64 {
        self.pos
    }
}

// Like `read_exact`, but reports a short count instead of failing at EOF.
fn fill<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
