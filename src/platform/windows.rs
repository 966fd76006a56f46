use crate::platform::PlatformOps;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

pub static WINDOWS_PLATFORM: Windows = Windows;

pub struct Windows;

impl PlatformOps for Windows {
    fn home_dir(&self) -> Option<PathBuf> { dirs::home_dir() }
    fn final_binary_name(&self, base: &str) -> String { if base.ends_with(".exe") { base.to_string() } else { format!("{base}.exe") } }
    fn create_executable(&self, path: &Path) -> io::Result<File> { OpenOptions::new().write(true).create(true).truncate(true).open(path) }
    fn make_executable(&self, _path: &Path) -> io::Result<()> { Ok(()) }
}
