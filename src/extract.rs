use crate::error::InstallError;
use crate::platform::platform;
use clap::ValueEnum;
use flate2::read::GzDecoder;
use fs_err as fs;
use serde::Deserialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use tar::{Archive, EntryType};

const TAR_ARGS: [&str; 3] = ["-xzO", "--exclude", "*/COPYING"];
const LICENSE_FILE: &str = "COPYING";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExtractBackend {
    /// System `tar` fed through a pipe
    #[default]
    Tar,
    /// In-process gzip/tar decoding
    Builtin,
}

pub struct Extractor {
    backend: ExtractBackend,
}

impl Extractor {
    pub fn new(backend: ExtractBackend) -> Self {
        Self { backend }
    }

    /// Replace `dest` with the binary held in the gzip'd tarball `archive`.
    /// The archive must already be verified; a failed extraction may leave a
    /// truncated file behind.
    pub fn install(&self, archive: &[u8], dest: &Path) -> Result<(), InstallError> {
        if dest.exists() {
            fs::remove_file(dest)?;
        }
        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let out = platform().create_executable(dest)?;
        match self.backend {
            ExtractBackend::Tar => extract_with_tar(archive, out)?,
            ExtractBackend::Builtin => extract_builtin(archive, out)?,
        }
        platform().make_executable(dest)?;
        Ok(())
    }
}

fn extract_with_tar(archive: &[u8], out: File) -> Result<(), InstallError> {
    let tar = which::which("tar").map_err(|source| InstallError::ToolNotFound { tool: "tar", source })?;
    let command = format!("tar {}", TAR_ARGS.join(" "));
    tracing::debug!(tar = %tar.display(), "running {command}");
    let mut child = Command::new(&tar)
        .args(TAR_ARGS)
        .stdin(Stdio::piped())
        .stdout(Stdio::from(out))
        .stderr(Stdio::inherit())
        .spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        // tar may exit early on a corrupt stream; its exit code is the error we report.
        if let Err(e) = stdin.write_all(archive) {
            if e.kind() != io::ErrorKind::BrokenPipe {
                return Err(e.into());
            }
        }
    }
    let status = child.wait()?;
    if !status.success() {
        return Err(InstallError::Extraction {
            command,
            code: status.code(),
        });
    }
    Ok(())
}

fn extract_builtin(archive: &[u8], mut out: File) -> Result<(), InstallError> {
    let mut archive = Archive::new(GzDecoder::new(archive));
    for entry in archive.entries()? {
        let mut entry = entry?;
        if entry.header().entry_type() != EntryType::Regular {
            continue;
        }
        let path = entry.path()?.into_owned();
        if is_license_file(&path) {
            tracing::debug!("skipping {}", path.display());
            continue;
        }
        io::copy(&mut entry, &mut out)?;
    }
    out.flush()?;
    Ok(())
}

// Mirrors `--exclude */COPYING`: the license file inside the archive's top directory.
fn is_license_file(path: &Path) -> bool {
    path.file_name().is_some_and(|n| n == LICENSE_FILE) && path.components().count() > 1
}
