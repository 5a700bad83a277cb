//! Plain file reader.

use filesig_core::{ByteSource, Result};
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;
use tracing::trace;

/// A read-only [`ByteSource`] over a regular file or device node.
///
/// Signature checks touch a handful of small, scattered ranges, so the
/// kernel is told not to bother with readahead on Linux. The size is taken
/// once at open; reads are plain positioned reads, so a file that shrinks
/// afterwards yields short reads and a failing device yields `io::Error`.
/// The source must be seekable: pipes and other streams fail at open with
/// an I/O error. The handle is closed when the value is dropped.
///
/// # Example
///
/// ```no_run
/// use filesig_core::ByteSource;
/// use filesig_io::FileSource;
///
/// let mut source = FileSource::open("document.pdf")?;
/// let mut magic = [0u8; 4];
/// let complete = source.read_exact_at(0, &mut magic)?;
/// # Ok::<(), filesig_core::CoreError>(())
/// ```
#[derive(Debug)]
pub struct FileSource {
    file: File,
    size: u64,
}

impl FileSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut file = OpenOptions::new().read(true).write(false).open(path)?;

        #[cfg(target_os = "linux")]
        {
            use rustix::fs::{fadvise, Advice};

            let _ = fadvise(&file, 0, None, Advice::Random);
        }

        let size = file.seek(SeekFrom::End(0))?;
        file.seek(SeekFrom::Start(0))?;
        trace!(path = %path.display(), size, "opened file source");

        Ok(Self { file, size })
    }
}

impl ByteSource for FileSource {
    fn read_at(&mut self, offset: u64, buffer: &mut [u8]) -> io::Result<usize> {
        if offset >= self.size {
            return Ok(0);
        }
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.read(buffer)
    }

    fn size(&self) -> u64 {
        self.size
    }
}
