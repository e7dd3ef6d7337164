use std::fs;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, bail, Context};
use colored::Colorize;

use modup_merge::{merge_into, Discipline, MergeOutcome};
use modup_registry::{codec, fnv_hash};
use modup_task::{DirPayload, Manifest, UpdateTask};

use crate::cli::*;
use crate::process;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Apply(args) => cmd_apply(args),
        Command::Merge(args) => cmd_merge(args),
        Command::Hash(args) => cmd_hash(args),
    }
}

fn cmd_apply(args: ApplyArgs) -> anyhow::Result<()> {
    let manifest_path: PathBuf = if args.manifest.is_absolute() {
        args.manifest.clone()
    } else {
        args.payload.join(&args.manifest)
    };
    let manifest = Manifest::load(&manifest_path)
        .with_context(|| format!("loading manifest {}", manifest_path.display()))?;

    // Wait for the old version to let go of its executable before we
    // start replacing files under it.
    if let Some(program) = &manifest.program {
        let program_path = args.dest.join(program);
        if program_path.exists()
            && !process::wait_until_writable(&program_path, Duration::from_secs(args.wait_timeout))
        {
            bail!(
                "{} is still locked; close {} and run the updater again",
                program_path.display(),
                program
            );
        }
    }

    let payload = Arc::new(DirPayload::new(&args.payload));
    let task = UpdateTask::from_manifest(&manifest, &args.dest, payload);
    let total = task.step_count();

    let (tx, rx) = mpsc::channel();
    let worker = thread::spawn(move || {
        task.run(move |done, total| {
            let _ = tx.send((done, total));
        })
    });

    for (done, total) in rx {
        println!("  [{done}/{total}] step complete");
    }
    worker
        .join()
        .map_err(|_| anyhow!("update worker panicked"))??;

    println!(
        "{} Updated {} ({total} steps).",
        "✓".green().bold(),
        args.dest.display().to_string().bold(),
    );

    if !args.no_relaunch {
        if let Some(program) = &manifest.program {
            process::relaunch(&args.dest.join(program))
                .with_context(|| format!("relaunching {program}"))?;
            println!("{} Relaunched {}.", "✓".green(), program.yellow());
        }
    }
    Ok(())
}

fn cmd_merge(args: MergeArgs) -> anyhow::Result<()> {
    let text = fs::read_to_string(&args.source)
        .with_context(|| format!("reading {}", args.source.display()))?;
    let incoming = codec::parse_str(&text)?;

    let discipline = if args.forced {
        Discipline::Forced
    } else {
        Discipline::Additive
    };

    match merge_into(&args.dest, &incoming, discipline)? {
        MergeOutcome::SkippedMissing => {
            println!(
                "{} does not exist, nothing to merge.",
                args.dest.display().to_string().bold()
            );
        }
        MergeOutcome::Applied { entries } => {
            println!(
                "{} Merged {} entries into {}.",
                "✓".green(),
                entries,
                args.dest.display().to_string().bold()
            );
        }
    }
    Ok(())
}

fn cmd_hash(args: HashArgs) -> anyhow::Result<()> {
    println!("0x{:x}", fnv_hash(&args.name) as u32);
    Ok(())
}
