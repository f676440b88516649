//! Temporary files for tests, removed on drop.
use image::GrayImage;
use std::ops::Deref;
use std::path::{Path, PathBuf};

pub fn scratch_path(ext: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "gray2bin_{}_{:016x}.{}",
        std::process::id(),
        fastrand::Rng::new().u64(..),
        ext
    ))
}

pub struct Scratch {
    path: PathBuf,
}

impl Scratch {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Deref for Scratch {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.path
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

pub fn save_gray(img: &GrayImage) -> Scratch {
    let scratch = Scratch::new(scratch_path("png"));
    img.save(&*scratch).unwrap();
    scratch
}

/// Seeded random grayscale image.
pub fn random_gray(seed: u64, width: u32, height: u32) -> GrayImage {
    let mut rng = fastrand::Rng::with_seed(seed);
    GrayImage::from_fn(width, height, |_, _| [rng.u8(..)].into())
}
