mod actions;
mod criteria;
mod gpu;
mod ui;
mod utils;
mod view;

use clap::{Arg, ArgAction, Command};
use criteria::Criterion;
use flexi_logger::Logger;
use std::error::Error;

fn cli() -> Command {
    Command::new("nvreap")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Kill GPU processes matching the given criteria. Checking /dev/nvidia* holders requires sudo.")
        .after_help(
            "Examples:\n  \
             # Simple mode (requires sudo):\n  \
             sudo nvreap --zero-util\n\n  \
             # No-sudo mode: feed captured fuser output, pipe PIDs to a privileged kill:\n  \
             nvreap --zero-util --fuser-output \"$(sudo fuser -v /dev/nvidia* 2>/dev/null)\" --output-pids \\\n      \
             | xargs sudo kill -9",
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .action(ArgAction::SetTrue)
                .help("Show what would be killed without actually killing processes"),
        )
        .arg(
            Arg::new("zero-util")
                .long("zero-util")
                .action(ArgAction::SetTrue)
                .help("Kill processes on devices with zero GPU utilization"),
        )
        .arg(
            Arg::new("zombies")
                .long("zombies")
                .action(ArgAction::SetTrue)
                .help("Kill zombie processes"),
        )
        .arg(
            Arg::new("no-process")
                .long("no-process")
                .action(ArgAction::SetTrue)
                .help("Kill processes without resolvable system info"),
        )
        .arg(
            Arg::new("too-old")
                .long("too-old")
                .value_name("HOURS")
                .value_parser(clap::value_parser!(u64))
                .help("Kill processes running for more than HOURS hours"),
        )
        .arg(
            Arg::new("fuser-output")
                .long("fuser-output")
                .value_name("OUTPUT")
                .help("Use captured output of 'sudo fuser -v /dev/nvidia* 2>/dev/null' instead of running it"),
        )
        .arg(
            Arg::new("output-pids")
                .long("output-pids")
                .action(ArgAction::SetTrue)
                .help("Print matched PIDs one per line instead of killing; implies --dry-run"),
        )
}

fn main() -> Result<(), Box<dyn Error>> {
    let _logger = Logger::try_with_env_or_str("warn")?.start()?;

    let matches = cli().get_matches();
    let output_pids = matches.get_flag("output-pids");
    // PID emission is for piping into a privileged kill; never kill here.
    let dry_run = matches.get_flag("dry-run") || output_pids;
    let fuser_output = matches.get_one::<String>("fuser-output").map(String::as_str);

    let mut enabled: Vec<Criterion> = Vec::new();
    if matches.get_flag("zero-util") {
        enabled.push(Criterion::ZeroUtil);
    }
    if let Some(hours) = matches.get_one::<u64>("too-old").copied() {
        enabled.push(Criterion::TooOld(hours));
    }
    if matches.get_flag("zombies") {
        enabled.push(Criterion::Zombie);
    }
    if matches.get_flag("no-process") {
        enabled.push(Criterion::NoProcessInfo);
    }

    if !output_pids {
        ui::render::print_gathering();
    }

    let nvml_processes = gpu::info::processes_from_nvml();
    let holder_processes = gpu::devfiles::processes_from_device_files(fuser_output);
    let merged = view::merge_views(nvml_processes, holder_processes);
    let candidates = view::candidates(merged);

    if !output_pids {
        ui::render::print_found(candidates.len());
        ui::render::print_inventory(&candidates);
    }

    let mut total = 0;
    let mut all_pids: Vec<i32> = Vec::new();

    for criterion in &enabled {
        if !output_pids {
            ui::render::print_header(&criterion.title());
        }
        let (count, pids) = actions::kill_by_predicate(
            &candidates,
            |record| criterion.matches(record),
            dry_run,
            output_pids,
        );
        if !output_pids {
            ui::render::print_summary(dry_run, count);
        }
        total += count;
        all_pids.extend(pids);
    }

    if output_pids {
        for pid in actions::dedup_pids(all_pids) {
            println!("{pid}");
        }
        return Ok(());
    }

    if enabled.is_empty() {
        ui::render::print_no_criteria();
    } else if total == 0 {
        ui::render::print_none_matched();
    } else {
        ui::render::print_total(dry_run, total);
    }

    Ok(())
}
