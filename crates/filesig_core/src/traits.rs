//! The byte-source port used by the matcher.
//!
//! Matching only ever needs positioned reads and the total length, so the
//! trait stays small enough to be backed by a file handle, a memory map or
//! an in-memory buffer.

use std::io::{self, Cursor};

/// A random-access, read-only source of bytes.
///
/// # Example
///
/// ```
/// use filesig_core::ByteSource;
/// use std::io::Cursor;
///
/// let mut source = Cursor::new(b"%PDF-1.7".to_vec());
/// let mut buf = [0u8; 4];
/// assert!(source.read_exact_at(0, &mut buf).unwrap());
/// assert_eq!(&buf, b"%PDF");
/// assert!(!source.read_exact_at(6, &mut buf).unwrap());
/// ```
pub trait ByteSource {
    /// Reads bytes starting at `offset` into `buffer`.
    ///
    /// Returns the number of bytes read, which is `0` at or past the end of
    /// the source and may be less than `buffer.len()` near the end.
    fn read_at(&mut self, offset: u64, buffer: &mut [u8]) -> io::Result<usize>;

    /// Returns the total size of the source in bytes.
    fn size(&self) -> u64;

    /// Fills `buffer` completely from `offset`.
    ///
    /// Returns `Ok(false)` when the source ends before the buffer is full.
    /// That is a property of the data, not a failure; only genuine read
    /// errors are reported as `Err`.
    fn read_exact_at(&mut self, offset: u64, buffer: &mut [u8]) -> io::Result<bool> {
        let mut filled = 0;
        while filled < buffer.len() {
            let Some(position) = offset.checked_add(filled as u64) else {
                return Ok(false);
            };
            match self.read_at(position, &mut buffer[filled..]) {
                Ok(0) => return Ok(false),
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(true)
    }
}

impl<T: AsRef<[u8]>> ByteSource for Cursor<T> {
    fn read_at(&mut self, offset: u64, buffer: &mut [u8]) -> io::Result<usize> {
        let data = self.get_ref().as_ref();
        let Ok(start) = usize::try_from(offset) else {
            return Ok(0);
        };
        if start >= data.len() {
            return Ok(0);
        }
        let len = buffer.len().min(data.len() - start);
        buffer[..len].copy_from_slice(&data[start..start + len]);
        self.set_position(offset + len as u64);
        Ok(len)
    }

    fn size(&self) -> u64 {
        self.get_ref().as_ref().len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl ByteSource for Broken {
        fn read_at(&mut self, _offset: u64, _buffer: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }

        fn size(&self) -> u64 {
            1024
        }
    }

    /// Hands out one byte per call and is interrupted every other call.
    struct Trickle {
        data: Vec<u8>,
        interrupt: bool,
    }

    impl ByteSource for Trickle {
        fn read_at(&mut self, offset: u64, buffer: &mut [u8]) -> io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }
            match self.data.get(offset as usize) {
                Some(&b) if !buffer.is_empty() => {
                    buffer[0] = b;
                    Ok(1)
                }
                _ => Ok(0),
            }
        }

        fn size(&self) -> u64 {
            self.data.len() as u64
        }
    }

    #[test]
    fn test_cursor_read_at_middle_and_end() {
        let mut source = Cursor::new(vec![1u8, 2, 3, 4, 5]);
        let mut buf = [0u8; 3];
        assert_eq!(source.read_at(1, &mut buf).unwrap(), 3);
        assert_eq!(buf, [2, 3, 4]);
        assert_eq!(source.read_at(3, &mut buf).unwrap(), 2);
        assert_eq!(source.read_at(5, &mut buf).unwrap(), 0);
        assert_eq!(source.read_at(u64::MAX, &mut buf).unwrap(), 0);
        assert_eq!(source.size(), 5);
    }

    #[test]
    fn test_read_exact_at_short_is_not_an_error() {
        let mut source = Cursor::new(vec![0u8; 4]);
        let mut buf = [0u8; 8];
        assert!(!source.read_exact_at(0, &mut buf).unwrap());
        assert!(!source.read_exact_at(u64::MAX, &mut buf).unwrap());
    }

    #[test]
    fn test_read_exact_at_propagates_real_errors() {
        let mut buf = [0u8; 2];
        let err = Broken.read_exact_at(0, &mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_read_exact_at_retries_interrupted_and_partial_reads() {
        let mut source = Trickle {
            data: b"GIF89a".to_vec(),
            interrupt: false,
        };
        let mut buf = [0u8; 6];
        assert!(source.read_exact_at(0, &mut buf).unwrap());
        assert_eq!(&buf, b"GIF89a");
    }
}
