use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Line-oriented playlist sink: one path per line, no header or footer.
///
/// On Unix the raw path bytes are written unchanged, so names that are not
/// valid UTF-8 survive the round trip.
pub struct PlaylistWriter<W: Write> {
    inner: BufWriter<W>,
    written: usize,
}

impl<W: Write> PlaylistWriter<W> {
    /// Wraps `inner` in a buffered line writer.
    pub fn new(inner: W) -> Self {
        Self {
            inner: BufWriter::new(inner),
            written: 0,
        }
    }

    /// Appends one path followed by a newline.
    pub fn write_path(&mut self, path: &Path) -> io::Result<()> {
        write_path_bytes(&mut self.inner, path)?;
        self.inner.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    /// Number of lines written so far.
    pub const fn written(&self) -> usize {
        self.written
    }

    /// Flushes buffered lines and returns the underlying writer.
    pub fn finish(self) -> io::Result<W> {
        self.inner.into_inner().map_err(io::IntoInnerError::into_error)
    }
}

#[cfg(unix)]
fn write_path_bytes<W: Write>(out: &mut W, path: &Path) -> io::Result<()> {
    use std::os::unix::ffi::OsStrExt;
    out.write_all(path.as_os_str().as_bytes())
}

#[cfg(not(unix))]
fn write_path_bytes<W: Write>(out: &mut W, path: &Path) -> io::Result<()> {
    out.write_all(path.to_string_lossy().as_bytes())
}
