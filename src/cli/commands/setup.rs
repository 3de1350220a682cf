//! Setup command - provision the tutorial environment.
//!
//! A linear, fail-fast step sequence: install the browser through the
//! system package manager, fetch the latest companion-tools release
//! manifest, download the matching archive, unpack it into the bin
//! directory, and remove the downloaded archive. The first failing step
//! aborts the run.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;

use crate::config::{app_home, Config};
use crate::fetch;
use crate::provision::{self, PackageManager, ReleaseClient};

/// Arguments for the setup command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    sqlcoach setup                 Provision browser and companion tools\n    \
    sqlcoach setup --skip-browser  Skip the package-manager install step\n    \
    sqlcoach setup --dry-run       Print the step plan without executing")]
pub struct Args {
    /// Skip the browser install step
    #[arg(long)]
    pub skip_browser: bool,

    /// Print the steps that would run, without executing them
    #[arg(long)]
    pub dry_run: bool,
}

/// Executes the setup command.
pub fn run(args: Args) -> Result<()> {
    let config = Config::load()?;
    let bin_dir = config.bin_dir()?;

    if args.dry_run {
        println!("{}", "Setup plan:".bold());
        if args.skip_browser {
            println!("  1. Install browser package '{}' (skipped)", config.browser_package);
        } else {
            println!("  1. Install browser package '{}'", config.browser_package);
        }
        println!("  2. Fetch latest release manifest for {}", config.release_repo);
        println!("  3. Select the archive for this platform");
        println!("  4. Download the archive");
        println!("  5. Unpack into {}", bin_dir.display());
        println!("  6. Remove the downloaded archive");
        return Ok(());
    }

    // Step 1: browser via the system package manager.
    if args.skip_browser {
        println!("{} browser install (--skip-browser)", "Skipping".yellow());
    } else if provision::which(&config.browser_package).is_some() {
        println!(
            "{} '{}' is already on PATH, skipping install",
            "Found".green(),
            config.browser_package
        );
    } else {
        let pm = PackageManager::detect().ok_or(provision::ProvisionError::NoPackageManager)?;
        println!(
            "{} '{}' via {}",
            "Installing".bold(),
            config.browser_package,
            pm.binary()
        );
        let (program, install_args) = pm.install_invocation(&config.browser_package);
        provision::run_command(&program, &install_args)
            .with_context(|| format!("Failed to install '{}'", config.browser_package))?;
    }

    // Step 2: release manifest.
    println!(
        "{} latest release of {}",
        "Fetching".bold(),
        config.release_repo.cyan()
    );
    let client = ReleaseClient::new();
    let release = client
        .latest(&config.release_repo)
        .with_context(|| format!("Failed to fetch release manifest for {}", config.release_repo))?;
    println!("  Latest release: {}", release.tag_name.cyan());

    // Step 3: pick the asset for this platform.
    let asset = release.select_asset_for_host()?;
    println!("  Asset: {}", asset.name);

    // Step 4: download the archive into the app home.
    let archive_path = app_home()?.join(&asset.name);
    println!("{} {}", "Downloading".bold(), asset.browser_download_url);
    fetch::download(&asset.browser_download_url, &archive_path)
        .with_context(|| format!("Failed to download {}", asset.name))?;

    // Step 5: unpack, then step 6: remove the archive. The archive is
    // removed even when unpacking fails.
    println!("{} into {}", "Unpacking".bold(), bin_dir.display());
    let unpacked = provision::unpack_archive(&archive_path, &bin_dir);
    let removed = fs::remove_file(&archive_path);
    unpacked.with_context(|| format!("Failed to unpack {}", asset.name))?;
    removed.with_context(|| format!("Failed to remove {}", archive_path.display()))?;

    println!();
    println!("{}", "Setup complete.".green().bold());
    println!(
        "{}",
        "Run 'sqlcoach fetch' next to get the sample database, then 'sqlcoach lesson 1'.".dimmed()
    );
    Ok(())
}
