use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use logging::trace_entropy;

use crate::EntropySource;
use crate::error::{EntropyError, EntropyResult};

/// Device used when no other source is configured.
pub const DEFAULT_DEVICE: &str = "/dev/urandom";

const VALUE_WIDTH: usize = size_of::<u32>();

/// Entropy source backed by a readable byte stream, typically a character
/// device such as `/dev/urandom` or a hardware generator's serial node.
///
/// Values are decoded in native byte order. The handle is released when the
/// source is dropped.
#[derive(Debug)]
pub struct DeviceSource<R = File> {
    reader: R,
    path: PathBuf,
    values_read: u64,
}

impl DeviceSource<File> {
    /// Opens the device at `path` for reading.
    pub fn open<P: AsRef<Path>>(path: P) -> EntropyResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| EntropyError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        trace_entropy!("opened entropy device {}", path.display());
        Ok(Self::from_reader(file, path))
    }
}

impl<R: Read> DeviceSource<R> {
    /// Wraps an arbitrary reader; `path` is used for diagnostics only.
    pub fn from_reader<P: Into<PathBuf>>(reader: R, path: P) -> Self {
        Self {
            reader,
            path: path.into(),
            values_read: 0,
        }
    }

    /// Discards `count` values to warm up generators that need a few reads
    /// before producing output.
    pub fn prime(&mut self, count: u32) -> EntropyResult<()> {
        for _ in 0..count {
            self.next_u32()?;
        }
        if count > 0 {
            trace_entropy!("primed {} with {} reads", self.path.display(), count);
        }
        Ok(())
    }

    /// Returns the device path the source was opened from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of full values read so far, including priming reads.
    #[must_use]
    pub const fn values_read(&self) -> u64 {
        self.values_read
    }

    /// Consumes the source and returns the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> EntropySource for DeviceSource<R> {
    fn next_u32(&mut self) -> EntropyResult<u32> {
        let mut buf = [0u8; VALUE_WIDTH];
        let mut filled = 0;
        while filled < VALUE_WIDTH {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
                Err(error) => return Err(EntropyError::Read(error)),
            }
        }

        if filled < VALUE_WIDTH {
            tracing::warn!(
                target: "trng_playlist::entropy",
                "short read from {}: {} of {} bytes",
                self.path.display(),
                filled,
                VALUE_WIDTH
            );
            return Err(EntropyError::ShortRead {
                received: filled,
                expected: VALUE_WIDTH,
            });
        }

        self.values_read += 1;
        Ok(u32::from_ne_bytes(buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn bytes_of(values: &[u32]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_ne_bytes()).collect()
    }

    /// Reader that hands out at most one byte per call.
    struct Trickle(Cursor<Vec<u8>>);

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let len = buf.len().min(1);
            self.0.read(&mut buf[..len])
        }
    }

    #[test]
    fn decodes_native_endian_values() {
        let reader = Cursor::new(bytes_of(&[0xDEAD_BEEF, 42]));
        let mut source = DeviceSource::from_reader(reader, "mem");
        assert_eq!(source.next_u32().expect("first"), 0xDEAD_BEEF);
        assert_eq!(source.next_u32().expect("second"), 42);
        assert_eq!(source.values_read(), 2);
    }

    #[test]
    fn partial_reads_are_stitched_together() {
        let reader = Trickle(Cursor::new(bytes_of(&[0x0102_0304])));
        let mut source = DeviceSource::from_reader(reader, "trickle");
        assert_eq!(source.next_u32().expect("value"), 0x0102_0304);
    }

    #[test]
    fn end_of_stream_mid_value_is_a_short_read() {
        let reader = Cursor::new(vec![1u8, 2, 3]);
        let mut source = DeviceSource::from_reader(reader, "truncated");
        match source.next_u32() {
            Err(EntropyError::ShortRead { received, expected }) => {
                assert_eq!(received, 3);
                assert_eq!(expected, 4);
            }
            other => panic!("expected short read, got {other:?}"),
        }
        assert_eq!(source.values_read(), 0);
    }

    #[test]
    fn empty_stream_is_a_short_read_of_zero_bytes() {
        let mut source = DeviceSource::from_reader(Cursor::new(Vec::new()), "empty");
        assert!(matches!(
            source.next_u32(),
            Err(EntropyError::ShortRead { received: 0, .. })
        ));
    }

    #[test]
    fn prime_discards_leading_values() {
        let reader = Cursor::new(bytes_of(&[1, 2, 3, 99]));
        let mut source = DeviceSource::from_reader(reader, "primed");
        source.prime(3).expect("prime");
        assert_eq!(source.next_u32().expect("value"), 99);
        assert_eq!(source.values_read(), 4);
    }

    #[test]
    fn open_reports_missing_device() {
        let error = DeviceSource::open("/nonexistent/entropy/device").expect_err("missing");
        match error {
            EntropyError::Open { path, .. } => {
                assert_eq!(path, PathBuf::from("/nonexistent/entropy/device"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn open_reads_from_regular_file() {
        let temp = tempfile::NamedTempFile::new().expect("tempfile");
        std::fs::write(temp.path(), bytes_of(&[5, 6])).expect("write");
        let mut source = DeviceSource::open(temp.path()).expect("open");
        assert_eq!(source.path(), temp.path());
        assert_eq!(source.next_u32().expect("first"), 5);
        assert_eq!(source.next_u32().expect("second"), 6);
        assert!(source.next_u32().is_err());
    }
}
