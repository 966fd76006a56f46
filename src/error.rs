use thiserror::Error;

/// Failures of the fetch/verify/extract pipeline. Every variant is fatal.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("No checksum for {url}")]
    UnsupportedPlatform { url: String },

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("GET {url} returned {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("invalid checksum (expected {expected}, got {actual})")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("{tool} not found on PATH")]
    ToolNotFound {
        tool: &'static str,
        #[source]
        source: which::Error,
    },

    #[error("{command} exited with {}", exit_code_label(.code))]
    Extraction { command: String, code: Option<i32> },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn exit_code_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => c.to_string(),
        None => "signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_platform_names_url() {
        let err = InstallError::UnsupportedPlatform {
            url: "https://example.invalid/builds/geth-plan9-mips-1.0.0.tar.gz".into(),
        };
        assert_eq!(
            err.to_string(),
            "No checksum for https://example.invalid/builds/geth-plan9-mips-1.0.0.tar.gz"
        );
    }

    #[test]
    fn extraction_reports_command_and_code() {
        let err = InstallError::Extraction {
            command: "tar -xzO --exclude */COPYING".into(),
            code: Some(2),
        };
        assert_eq!(err.to_string(), "tar -xzO --exclude */COPYING exited with 2");
        let killed = InstallError::Extraction {
            command: "tar".into(),
            code: None,
        };
        assert_eq!(killed.to_string(), "tar exited with signal");
    }
}
