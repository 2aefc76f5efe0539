//! Sense HAT LED matrix through its Linux framebuffer device.

use super::{Frame, FrameSink};
use crate::error::DisplayError;
use std::fs::{self, File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Name the rpisense-fb driver registers under.
pub const SENSE_HAT_FB_NAME: &str = "RPi-Sense FB";

const SYSFS_GRAPHICS: &str = "/sys/class/graphics";
const DEV: &str = "/dev";

pub struct Framebuffer {
    file: File,
}

impl Framebuffer {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DisplayError> {
        let path = path.as_ref();
        let file = OpenOptions::new().write(true).open(path).map_err(|e| {
            DisplayError::NotFound(format!("cannot open {}: {}", path.display(), e))
        })?;
        tracing::info!("LED matrix framebuffer opened at {}", path.display());
        Ok(Self { file })
    }

    /// Open the configured device, or look the Sense HAT up in sysfs.
    pub fn open_or_discover(path: Option<&Path>) -> Result<Self, DisplayError> {
        match path {
            Some(path) => Self::open(path),
            None => Self::open(discover(Path::new(SYSFS_GRAPHICS), Path::new(DEV))?),
        }
    }
}

impl FrameSink for Framebuffer {
    fn write_frame(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        self.file.seek(SeekFrom::Start(0))?;
        self.file.write_all(&frame.to_rgb565_bytes())?;
        self.file.flush()?;
        Ok(())
    }
}

/// Find the `fbN` whose sysfs `name` is the Sense HAT's and return its
/// device node under `dev`.
pub fn discover(sysfs: &Path, dev: &Path) -> Result<PathBuf, DisplayError> {
    let entries = fs::read_dir(sysfs)
        .map_err(|e| DisplayError::NotFound(format!("cannot list {}: {}", sysfs.display(), e)))?;

    let mut candidates: Vec<_> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name())
        .filter(|name| name.to_string_lossy().starts_with("fb"))
        .collect();
    candidates.sort();

    for fb in candidates {
        let name_file = sysfs.join(&fb).join("name");
        match fs::read_to_string(&name_file) {
            Ok(name) if name.trim() == SENSE_HAT_FB_NAME => {
                let device = dev.join(&fb);
                tracing::debug!("found {} at {}", SENSE_HAT_FB_NAME, device.display());
                return Ok(device);
            }
            Ok(_) => {}
            Err(e) => tracing::debug!("skipping {}: {}", name_file.display(), e),
        }
    }

    Err(DisplayError::NotFound(format!(
        "no framebuffer named '{}' under {}",
        SENSE_HAT_FB_NAME,
        sysfs.display()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{BLACK, WHITE};
    use tempfile::TempDir;

    fn fake_sysfs(names: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (fb, name) in names {
            let fb_dir = dir.path().join(fb);
            fs::create_dir(&fb_dir).unwrap();
            fs::write(fb_dir.join("name"), format!("{}\n", name)).unwrap();
        }
        dir
    }

    #[test]
    fn test_discover_sense_hat() {
        let sysfs = fake_sysfs(&[("fb0", "simple"), ("fb1", SENSE_HAT_FB_NAME)]);
        let device = discover(sysfs.path(), Path::new("/dev")).unwrap();
        assert_eq!(device, PathBuf::from("/dev/fb1"));
    }

    #[test]
    fn test_discover_without_sense_hat() {
        let sysfs = fake_sysfs(&[("fb0", "BCM2708 FB")]);
        assert!(matches!(
            discover(sysfs.path(), Path::new("/dev")),
            Err(DisplayError::NotFound(_))
        ));
    }

    #[test]
    fn test_open_missing_device() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Framebuffer::open(dir.path().join("fb9")),
            Err(DisplayError::NotFound(_))
        ));
    }

    #[test]
    fn test_frames_overwrite_from_start() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fb1");
        fs::write(&path, [0u8; 128]).unwrap();

        let mut fb = Framebuffer::open(&path).unwrap();
        fb.write_frame(&Frame::filled(WHITE)).unwrap();
        fb.write_frame(&Frame::filled(BLACK)).unwrap();
        fb.write_frame(&Frame::filled(WHITE)).unwrap();

        drop(fb);
        let contents = fs::read(&path).unwrap();
        assert_eq!(contents.len(), 128);
        assert!(contents.iter().all(|&b| b == 0xFF));
    }
}
