//! Release command handlers
//!
//! `kbc release check` gates the publish step in CI: it exits 0 only when the
//! pushed ref names a `v?MAJOR.MINOR.PATCH` tag.

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use kbc_core::release::{ReleaseTag, should_publish, tag_from_ref};

/// Release subcommands
#[derive(Subcommand)]
pub enum ReleaseCommands {
    /// Exit 0 if the ref is a release tag, 1 otherwise
    Check {
        /// Git ref or bare tag (e.g. refs/tags/v1.2.3)
        #[arg(env = "GITHUB_REF")]
        git_ref: String,
    },
}

/// Handle release commands
pub fn handle_release_command(command: ReleaseCommands) -> Result<()> {
    match command {
        ReleaseCommands::Check { git_ref } => {
            if !check(&git_ref) {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

/// Print the publish decision for `git_ref`
fn check(git_ref: &str) -> bool {
    let tag = tag_from_ref(git_ref);

    if !should_publish(git_ref) {
        println!(
            "{}",
            format!("✗ '{}' is not a release tag; nothing to publish", tag).yellow()
        );
        return false;
    }

    let message = match ReleaseTag::parse(git_ref) {
        Some(release) => format!("✓ {} is a release tag (version {})", release, release.version),
        None => format!("✓ {} is a release tag", tag),
    };
    println!("{}", message.green().bold());
    true
}
