//! Environment provisioning.
//!
//! The setup command runs a linear sequence of steps: install the
//! configured browser through the system package manager, fetch the
//! latest companion-tools release manifest, download the matching
//! archive, unpack it into the bin directory, and remove the downloaded
//! archive. The first failing step aborts the whole run; there is no
//! retry or rollback.

use reqwest::blocking::Client;
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Base URL of the GitHub-style releases API.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Errors from provisioning steps.
#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    /// No supported package manager was found on PATH.
    #[error("No supported package manager found (looked for apt-get, dnf, pacman, brew)")]
    NoPackageManager,

    /// A subprocess exited with a non-zero status.
    #[error("Command failed ({status}): {command}")]
    CommandFailed { command: String, status: String },

    /// HTTP request error.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A release manifest query returned a non-success status.
    #[error("Release API returned {status} for {url}")]
    ApiStatus { status: u16, url: String },

    /// No release asset matches the current platform.
    #[error("Release {tag} has no asset for {target}")]
    NoMatchingAsset { tag: String, target: String },

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Supported system package managers, in probe order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    Apt,
    Dnf,
    Pacman,
    Brew,
}

impl PackageManager {
    /// Probes PATH for a supported package manager.
    pub fn detect() -> Option<Self> {
        [Self::Apt, Self::Dnf, Self::Pacman, Self::Brew]
            .into_iter()
            .find(|pm| which(pm.binary()).is_some())
    }

    /// The binary probed for on PATH.
    pub fn binary(&self) -> &'static str {
        match self {
            Self::Apt => "apt-get",
            Self::Dnf => "dnf",
            Self::Pacman => "pacman",
            Self::Brew => "brew",
        }
    }

    /// Builds the non-interactive install invocation for a package.
    ///
    /// System package managers need root; brew must not run under sudo.
    pub fn install_invocation(&self, package: &str) -> (String, Vec<String>) {
        let owned = |parts: &[&str]| parts.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        match self {
            Self::Apt => ("sudo".into(), owned(&["apt-get", "install", "-y", package])),
            Self::Dnf => ("sudo".into(), owned(&["dnf", "install", "-y", package])),
            Self::Pacman => (
                "sudo".into(),
                owned(&["pacman", "-S", "--noconfirm", package]),
            ),
            Self::Brew => ("brew".into(), owned(&["install", package])),
        }
    }
}

/// Looks up a binary on PATH.
pub fn which(binary: &str) -> Option<PathBuf> {
    let path = env::var_os("PATH")?;
    env::split_paths(&path)
        .map(|dir| dir.join(binary))
        .find(|candidate| candidate.is_file())
}

/// Runs a subprocess and fails on a non-zero exit status.
pub fn run_command(program: &str, args: &[String]) -> Result<(), ProvisionError> {
    let rendered = format!("{program} {}", args.join(" "));
    tracing::debug!("Running: {rendered}");

    let status = Command::new(program).args(args).status()?;
    if !status.success() {
        return Err(ProvisionError::CommandFailed {
            command: rendered,
            status: status.to_string(),
        });
    }
    Ok(())
}

/// Unpacks a gzipped tar archive into a directory with the system tar.
pub fn unpack_archive(archive: &Path, dest: &Path) -> Result<(), ProvisionError> {
    std::fs::create_dir_all(dest)?;
    run_command(
        "tar",
        &[
            "-xzf".to_string(),
            archive.to_string_lossy().to_string(),
            "-C".to_string(),
            dest.to_string_lossy().to_string(),
        ],
    )
}

/// A release manifest from the releases API.
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    pub tag_name: String,
    pub assets: Vec<ReleaseAsset>,
}

/// One downloadable asset of a release.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseAsset {
    pub name: String,
    pub browser_download_url: String,
}

impl Release {
    /// Selects the asset matching an OS/arch token pair.
    ///
    /// An asset matches when its name contains any token from each list.
    pub fn select_asset(&self, os_tokens: &[&str], arch_tokens: &[&str]) -> Option<&ReleaseAsset> {
        self.assets.iter().find(|asset| {
            let name = asset.name.to_lowercase();
            os_tokens.iter().any(|t| name.contains(t))
                && arch_tokens.iter().any(|t| name.contains(t))
        })
    }

    /// Selects the asset for the running platform.
    pub fn select_asset_for_host(&self) -> Result<&ReleaseAsset, ProvisionError> {
        self.select_asset(&host_os_tokens(), &host_arch_tokens())
            .ok_or_else(|| ProvisionError::NoMatchingAsset {
                tag: self.tag_name.clone(),
                target: format!("{}/{}", env::consts::OS, env::consts::ARCH),
            })
    }
}

/// Asset-name tokens for the running OS.
fn host_os_tokens() -> Vec<&'static str> {
    match env::consts::OS {
        "macos" => vec!["darwin", "macos", "apple"],
        "windows" => vec!["windows", "win64"],
        _ => vec!["linux"],
    }
}

/// Asset-name tokens for the running architecture.
fn host_arch_tokens() -> Vec<&'static str> {
    match env::consts::ARCH {
        "aarch64" => vec!["aarch64", "arm64"],
        _ => vec!["x86_64", "amd64"],
    }
}

/// Client for the GitHub-style releases API.
pub struct ReleaseClient {
    client: Client,
    api_base: String,
}

impl ReleaseClient {
    /// Creates a client against the default API base.
    pub fn new() -> Self {
        Self::with_api_base(DEFAULT_API_BASE)
    }

    /// Creates a client against a custom API base (used by tests).
    pub fn with_api_base(api_base: &str) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    /// Fetches the latest release manifest for an `owner/name` repository.
    pub fn latest(&self, repo: &str) -> Result<Release, ProvisionError> {
        let url = format!("{}/repos/{repo}/releases/latest", self.api_base);
        let response = self
            .client
            .get(&url)
            // The GitHub API rejects requests without a user agent.
            .header("User-Agent", "sqlcoach")
            .send()?;

        if !response.status().is_success() {
            return Err(ProvisionError::ApiStatus {
                status: response.status().as_u16(),
                url,
            });
        }

        let release: Release = response.json()?;
        Ok(release)
    }
}

impl Default for ReleaseClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_release() -> Release {
        Release {
            tag_name: "v1.4.0".to_string(),
            assets: vec![
                ReleaseAsset {
                    name: "tools-v1.4.0-linux-x86_64.tar.gz".to_string(),
                    browser_download_url: "https://example.com/linux.tar.gz".to_string(),
                },
                ReleaseAsset {
                    name: "tools-v1.4.0-darwin-arm64.tar.gz".to_string(),
                    browser_download_url: "https://example.com/darwin.tar.gz".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_select_asset_by_tokens() {
        let release = sample_release();

        let linux = release
            .select_asset(&["linux"], &["x86_64", "amd64"])
            .expect("should match linux asset");
        assert_eq!(linux.name, "tools-v1.4.0-linux-x86_64.tar.gz");

        let mac = release
            .select_asset(&["darwin", "macos"], &["aarch64", "arm64"])
            .expect("should match darwin asset");
        assert_eq!(mac.browser_download_url, "https://example.com/darwin.tar.gz");
    }

    #[test]
    fn test_select_asset_no_match() {
        let release = sample_release();
        assert!(release.select_asset(&["windows"], &["x86_64"]).is_none());
    }

    #[test]
    fn test_release_manifest_parsing() {
        let json = r#"{
            "tag_name": "v2.0.1",
            "assets": [
                {"name": "a-linux-x86_64.tar.gz", "browser_download_url": "https://example.com/a"}
            ],
            "extra_field_from_api": true
        }"#;

        let release: Release = serde_json::from_str(json).unwrap();
        assert_eq!(release.tag_name, "v2.0.1");
        assert_eq!(release.assets.len(), 1);
    }

    #[test]
    fn test_install_invocation() {
        let (program, args) = PackageManager::Apt.install_invocation("firefox");
        assert_eq!(program, "sudo");
        assert_eq!(args, vec!["apt-get", "install", "-y", "firefox"]);

        let (program, args) = PackageManager::Brew.install_invocation("firefox");
        assert_eq!(program, "brew");
        assert_eq!(args, vec!["install", "firefox"]);
    }

    #[test]
    fn test_which_finds_shell() {
        // sh exists on every unix this crate targets.
        assert!(which("sh").is_some());
        assert!(which("definitely-not-a-real-binary-name").is_none());
    }

    #[test]
    fn test_command_failed_message() {
        let err = ProvisionError::CommandFailed {
            command: "sudo apt-get install -y firefox".to_string(),
            status: "exit status: 100".to_string(),
        };
        assert!(err.to_string().contains("apt-get install"));
        assert!(err.to_string().contains("100"));
    }

    #[test]
    fn test_run_command_nonzero_exit() {
        let err = run_command("sh", &["-c".to_string(), "exit 3".to_string()]).unwrap_err();
        match err {
            ProvisionError::CommandFailed { command, .. } => {
                assert!(command.starts_with("sh -c"));
            }
            other => panic!("Expected CommandFailed, got: {other}"),
        }
    }

    #[test]
    fn test_run_command_success() {
        run_command("sh", &["-c".to_string(), "true".to_string()])
            .expect("true should succeed");
    }
}
