//! On-demand snapshots of the rendered frame.

use log::{error, info};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Status text shown when a snapshot fails
pub const SNAPSHOT_FAILED: &str = "Screenshot could not be saved";

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to create snapshot directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("failed to read back frame: {0}")]
    Capture(String),

    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] image::ImageError),
}

/// Writes RGBA frames as timestamped PNG files into one directory
#[derive(Debug, Clone)]
pub struct ScreenshotSaver {
    dir: PathBuf,
}

impl ScreenshotSaver {
    /// Use `dir` for snapshots, creating it if absent
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, SnapshotError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| SnapshotError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name for a snapshot taken at `at`
    ///
    /// A counter suffix is added when an earlier snapshot already took the name.
    pub fn path_for(&self, at: SystemTime) -> PathBuf {
        let since_epoch = at.duration_since(UNIX_EPOCH).unwrap_or_default();
        let stem = format!(
            "image_{}_{:03}",
            since_epoch.as_secs(),
            since_epoch.subsec_millis()
        );

        let mut path = self.dir.join(format!("{}.png", stem));
        let mut counter = 1;
        while path.exists() {
            path = self.dir.join(format!("{}_{}.png", stem, counter));
            counter += 1;
        }
        path
    }

    /// Save a tightly packed RGBA frame as an RGB PNG
    pub fn save_rgba(&self, width: u32, height: u32, rgba: &[u8]) -> Result<PathBuf, SnapshotError> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(SnapshotError::BufferSize {
                expected,
                actual: rgba.len(),
            });
        }

        // Trail alpha is meaningless once composited; keep color only
        let rgb: Vec<u8> = rgba
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();

        let path = self.path_for(SystemTime::now());
        image::save_buffer(&path, &rgb, width, height, image::ColorType::Rgb8)?;
        Ok(path)
    }
}

/// Status text for a snapshot attempt, logging the outcome
pub fn status_message(result: &Result<PathBuf, SnapshotError>) -> String {
    match result {
        Ok(path) => {
            info!("Snapshot saved to {}", path.display());
            format!("{} saved", path.display())
        }
        Err(e) => {
            error!("Snapshot failed: {}", e);
            SNAPSHOT_FAILED.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "hilbertscope-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_directory_created_if_absent() {
        let dir = scratch_dir("mkdir").join("nested");
        let saver = ScreenshotSaver::new(&dir).unwrap();
        assert!(saver.dir().is_dir());
        // Existing directory is fine
        assert!(ScreenshotSaver::new(&dir).is_ok());
    }

    #[test]
    fn test_path_is_timestamped_png() {
        let saver = ScreenshotSaver::new(scratch_dir("path")).unwrap();
        let at = UNIX_EPOCH + Duration::from_millis(1_760_870_400_042);
        let path = saver.path_for(at);
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "image_1760870400_042.png"
        );
        assert!(path.starts_with(saver.dir()));
    }

    #[test]
    fn test_same_instant_does_not_overwrite() {
        let saver = ScreenshotSaver::new(scratch_dir("collide")).unwrap();
        let at = UNIX_EPOCH + Duration::from_millis(1_760_870_400_042);

        let first = saver.path_for(at);
        std::fs::write(&first, b"taken").unwrap();
        let second = saver.path_for(at);
        std::fs::write(&second, b"taken").unwrap();
        let third = saver.path_for(at);

        assert_eq!(
            second.file_name().unwrap().to_str().unwrap(),
            "image_1760870400_042_1.png"
        );
        assert_eq!(
            third.file_name().unwrap().to_str().unwrap(),
            "image_1760870400_042_2.png"
        );
        assert_eq!(std::fs::read(&first).unwrap(), b"taken");
    }

    #[test]
    fn test_back_to_back_saves_keep_both_files() {
        let saver = ScreenshotSaver::new(scratch_dir("twice")).unwrap();
        let rgba = [0u8; 16];
        let first = saver.save_rgba(2, 2, &rgba).unwrap();
        let second = saver.save_rgba(2, 2, &rgba).unwrap();

        assert_ne!(first, second);
        assert!(first.is_file() && second.is_file());
    }

    #[test]
    fn test_save_rgba_writes_rgb_png() {
        let saver = ScreenshotSaver::new(scratch_dir("save")).unwrap();
        let rgba = [
            255, 0, 0, 255, 0, 255, 0, 10, //
            0, 0, 255, 0, 14, 82, 127, 204,
        ];
        let result = saver.save_rgba(2, 2, &rgba);
        let path = result.as_ref().unwrap().clone();

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (2, 2));
        assert_eq!(img.get_pixel(1, 0).0, [0, 255, 0]);
        assert_eq!(img.get_pixel(1, 1).0, [14, 82, 127]);

        assert_eq!(status_message(&result), format!("{} saved", path.display()));
    }

    #[test]
    fn test_wrong_buffer_size_is_reported() {
        let saver = ScreenshotSaver::new(scratch_dir("size")).unwrap();
        let result = saver.save_rgba(4, 4, &[0u8; 12]);
        assert!(matches!(
            result,
            Err(SnapshotError::BufferSize {
                expected: 64,
                actual: 12
            })
        ));
        assert_eq!(status_message(&result), SNAPSHOT_FAILED);
    }
}
