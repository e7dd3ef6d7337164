use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "modup",
    about = "In-place updater for ModTool installs",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Apply an update payload to an install folder
    Apply(ApplyArgs),
    /// Merge one shipped registry file into an installed registry
    Merge(MergeArgs),
    /// Print the canonical 32-bit hash of a name
    Hash(HashArgs),
}

#[derive(Args)]
pub struct ApplyArgs {
    /// Install folder to update
    pub dest: PathBuf,

    /// Payload directory shipped with this updater
    #[arg(long, default_value = "payload")]
    pub payload: PathBuf,

    /// Manifest file, resolved inside the payload unless absolute
    #[arg(long, default_value = "manifest.toml")]
    pub manifest: PathBuf,

    /// Do not relaunch the program after a successful update
    #[arg(long)]
    pub no_relaunch: bool,

    /// Seconds to wait for the program to release its file lock
    #[arg(long, default_value = "15")]
    pub wait_timeout: u64,
}

#[derive(Args)]
pub struct MergeArgs {
    /// Destination registry file
    pub dest: PathBuf,

    /// Incoming registry file
    pub source: PathBuf,

    /// Replace colliding entries and rewrite with explicit hash literals
    #[arg(long)]
    pub forced: bool,
}

#[derive(Args)]
pub struct HashArgs {
    /// Name to hash
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_apply() {
        let cli = Cli::try_parse_from(["modup", "apply", "/opt/modtool"]).unwrap();
        if let Command::Apply(args) = cli.command {
            assert_eq!(args.dest, PathBuf::from("/opt/modtool"));
            assert_eq!(args.payload, PathBuf::from("payload"));
            assert_eq!(args.manifest, PathBuf::from("manifest.toml"));
            assert_eq!(args.wait_timeout, 15);
            assert!(!args.no_relaunch);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_apply_overrides() {
        let cli = Cli::try_parse_from([
            "modup",
            "apply",
            "/opt/modtool",
            "--payload",
            "/tmp/pkg",
            "--no-relaunch",
            "--wait-timeout",
            "3",
        ])
        .unwrap();
        if let Command::Apply(args) = cli.command {
            assert_eq!(args.payload, PathBuf::from("/tmp/pkg"));
            assert!(args.no_relaunch);
            assert_eq!(args.wait_timeout, 3);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_merge_forced() {
        let cli =
            Cli::try_parse_from(["modup", "merge", "reg_type.txt", "new.txt", "--forced"])
                .unwrap();
        if let Command::Merge(args) = cli.command {
            assert_eq!(args.dest, PathBuf::from("reg_type.txt"));
            assert_eq!(args.source, PathBuf::from("new.txt"));
            assert!(args.forced);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_hash() {
        let cli = Cli::try_parse_from(["modup", "hash", "Creature"]).unwrap();
        if let Command::Hash(args) = cli.command {
            assert_eq!(args.name, "Creature");
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["modup", "--verbose", "hash", "x"]).unwrap();
        assert!(cli.verbose);
    }
}
