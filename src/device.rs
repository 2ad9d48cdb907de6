//! Device detection and exclusive access

use crate::decoder::RawRecord;
use crate::error::{ControllerError, Result};
use evdev::InputEvent;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read};
use std::mem;
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};
use std::ptr;
use tracing::{debug, info};

/// Directory holding the stable per-interface symlinks
pub const DEVICE_DIR: &str = "/dev/input/by-id/";

/// Logitech G600 symlink name prefix
pub const G600_PREFIX: &str = "usb-Logitech_Gaming_Mouse_G600_";

/// Interface 1 is the keyboard interface the side buttons report on
pub const G600_SUFFIX: &str = "-if01-event-kbd";

/// Records fetched per read
pub const BATCH_RECORDS: usize = 64;

const RECORD_SIZE: usize = mem::size_of::<libc::input_event>();

/// `_IOW('E', 0x90, int)`
const EVIOCGRAB: u32 = 0x4004_4590;

/// Find the G600 keyboard interface in [`DEVICE_DIR`]
pub fn find_g600() -> Result<PathBuf> {
    locate(DEVICE_DIR, G600_PREFIX, G600_SUFFIX)
}

/// Return `dir/<entry>` for the first entry named `prefix...suffix`.
///
/// The scan is non-recursive and unordered; nothing is opened.
pub fn locate(dir: impl AsRef<Path>, prefix: &str, suffix: &str) -> Result<PathBuf> {
    let dir = dir.as_ref();
    let entries = fs::read_dir(dir).map_err(|source| ControllerError::DirectoryUnavailable {
        dir: dir.to_path_buf(),
        source,
    })?;

    for entry in entries.flatten() {
        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            continue;
        };

        if name.starts_with(prefix) && name.ends_with(suffix) {
            let path = dir.join(name);
            info!("full path is {}", path.display());
            return Ok(path);
        }
    }

    Err(ControllerError::DeviceNotFound {
        dir: dir.to_path_buf(),
        prefix: prefix.to_string(),
        suffix: suffix.to_string(),
    })
}

/// Read side of an exclusively grabbed G600 interface
pub struct G600Device {
    path: PathBuf,
    file: File,
}

impl G600Device {
    /// Open `path` read-only and grab it so no other reader sees its events.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .open(path)
            .map_err(|source| ControllerError::DeviceOpenFailed {
                path: path.to_path_buf(),
                source,
            })?;

        debug!("Opened {:?} read-only", path);

        grab(&file).map_err(|source| ControllerError::DeviceGrabFailed {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Grabbed device: {:?}", path);

        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Block until the device produces data, then return up to
    /// [`BATCH_RECORDS`] records.
    ///
    /// An empty read means the stream is gone (device unplugged) and is
    /// reported the same way as an I/O error.
    pub fn read_batch(&mut self) -> Result<Vec<RawRecord>> {
        read_records(&mut self.file, &self.path)
    }
}

fn grab(file: &File) -> io::Result<()> {
    let rc = unsafe { libc::ioctl(file.as_raw_fd(), EVIOCGRAB as _, 1 as libc::c_int) };
    if rc < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

fn read_records(reader: &mut impl Read, path: &Path) -> Result<Vec<RawRecord>> {
    let mut buf = [0u8; BATCH_RECORDS * RECORD_SIZE];

    let n = loop {
        match reader.read(&mut buf) {
            Ok(n) => break n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(ControllerError::StreamReadFailed {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }
    };

    if n == 0 {
        return Err(ControllerError::StreamReadFailed {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::UnexpectedEof, "device stream closed"),
        });
    }

    Ok(parse_records(&buf[..n]))
}

/// Split raw bytes into records; a trailing partial record is dropped.
fn parse_records(bytes: &[u8]) -> Vec<RawRecord> {
    bytes
        .chunks_exact(RECORD_SIZE)
        .map(|chunk| {
            // SAFETY: `chunk` is exactly one `input_event` long and every bit
            // pattern is a valid `input_event`.
            let raw: libc::input_event = unsafe { ptr::read_unaligned(chunk.as_ptr().cast()) };
            RawRecord::from(InputEvent::from(raw))
        })
        .collect()
}
