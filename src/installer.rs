use crate::cli::Cli;
use crate::config::InstallerConfig;
use crate::download;
use crate::error::InstallError;
use crate::extract::{ExtractBackend, Extractor};
use crate::payload::{self, PayloadInfo, Release};
use crate::platform::{host_arch, host_platform, platform};
use crate::progress::{NoProgress, ProgressSink, TerminalProgress};
use crate::verify;
use anyhow::{Context, Result};
use fs_err as fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Everything one run needs, after CLI flags are layered over the config file.
#[derive(Debug, Clone)]
pub struct Settings {
    pub platform: String,
    pub arch: String,
    pub release: Release,
    pub mirror: String,
    pub install_path: PathBuf,
    pub extractor: ExtractBackend,
    pub progress: bool,
    pub timeout: Option<Duration>,
}

impl Settings {
    pub fn from_sources(cli: &Cli, cfg: &InstallerConfig) -> Result<Self> {
        let release = match &cfg.release {
            Some(r) => Release::custom(&r.version, r.checksums.clone())?,
            None => Release::pinned(),
        };
        let install_path = cli
            .install_path
            .clone()
            .or_else(|| cfg.install_path.clone())
            .unwrap_or_else(|| platform().default_install_path(payload::PRODUCT));
        Ok(Self {
            platform: host_platform().to_string(),
            arch: host_arch().to_string(),
            release,
            mirror: cli
                .mirror
                .clone()
                .or_else(|| cfg.mirror.clone())
                .unwrap_or_else(|| payload::DEFAULT_MIRROR.to_string()),
            install_path,
            extractor: cli.extractor.or(cfg.extractor).unwrap_or_default(),
            progress: !cli.no_progress && cfg.progress.unwrap_or(true),
            timeout: cfg.timeout_secs.map(Duration::from_secs),
        })
    }

    pub fn resolve(&self) -> Result<PayloadInfo, InstallError> {
        payload::resolve(&self.platform, &self.arch, &self.release, &self.mirror)
    }
}

pub fn plan(settings: &Settings) -> Result<()> {
    let payload = settings.resolve()?;
    println!("url       {}", payload.url);
    println!("md5       {}", payload.expected_checksum);
    println!("install   {}", settings.install_path.display());
    println!("extractor {:?}", settings.extractor);
    Ok(())
}

/// Resolve, fetch (or read `archive`), verify, then extract. Returns the install path.
pub fn install(settings: &Settings, archive: Option<&Path>) -> Result<PathBuf> {
    let payload = settings.resolve()?;
    let body = match archive {
        Some(path) => {
            tracing::info!("reading: {}", path.display());
            fs::read(path)?
        }
        None => {
            let client = download::client(settings.timeout)?;
            let mut sink: Box<dyn ProgressSink> = if settings.progress {
                Box::new(TerminalProgress::new())
            } else {
                Box::new(NoProgress)
            };
            download::fetch(&client, &payload.url, sink.as_mut())
                .with_context(|| format!("downloading {}", payload.url))?
        }
    };
    let extractor = Extractor::new(settings.extractor);
    install_payload(&body, &payload, &extractor, &settings.install_path)?;
    Ok(settings.install_path.clone())
}

/// Nothing touches `dest` unless `body` matches the expected checksum.
pub fn install_payload(
    body: &[u8],
    payload: &PayloadInfo,
    extractor: &Extractor,
    dest: &Path,
) -> Result<(), InstallError> {
    verify::verify_md5(body, &payload.expected_checksum)?;
    extractor.install(body, dest)?;
    tracing::info!("Written to: {}", dest.display());
    Ok(())
}
