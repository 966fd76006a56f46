pub fn platform() -> &'static dyn PlatformOps {
    &ConcretePlatform
}

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

pub trait PlatformOps: Sync + Send {
    fn home_dir(&self) -> Option<PathBuf>;
    fn final_binary_name(&self, base: &str) -> String;
    /// Create (truncating) a file that is executable from the moment it exists.
    fn create_executable(&self, path: &Path) -> io::Result<File>;
    fn make_executable(&self, path: &Path) -> io::Result<()>;

    fn default_install_path(&self, base: &str) -> PathBuf {
        let root = self
            .home_dir()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());
        root.join(".geth").join("bin").join(self.final_binary_name(base))
    }
}

/// Operating system name as the release archives spell it.
pub fn host_platform() -> &'static str {
    platform_name(std::env::consts::OS)
}

/// CPU architecture as reported by the Rust target (`x86_64`, `aarch64`, ...).
pub fn host_arch() -> &'static str {
    std::env::consts::ARCH
}

pub fn platform_name(os: &str) -> &str {
    match os {
        "macos" => "darwin",
        other => other,
    }
}

#[cfg(unix)]
mod unix;
#[cfg(unix)]
pub use unix::UNIX_PLATFORM as ConcretePlatform;

#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub use windows::WINDOWS_PLATFORM as ConcretePlatform;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macos_is_published_as_darwin() {
        assert_eq!(platform_name("macos"), "darwin");
        assert_eq!(platform_name("linux"), "linux");
        assert_eq!(platform_name("windows"), "windows");
    }

    #[test]
    fn default_install_path_ends_with_binary() {
        let path = platform().default_install_path("geth");
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some(platform().final_binary_name("geth").as_str())
        );
        assert!(path.parent().is_some_and(|p| p.ends_with(".geth/bin")));
    }

    #[cfg(unix)]
    #[test]
    fn created_file_is_executable() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bin");
        drop(platform().create_executable(&path).unwrap());
        platform().make_executable(&path).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}
