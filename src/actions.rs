use crate::gpu::process::ProcessRecord;
use crate::ui::render;
use crate::utils::system::{force_kill, KillOutcome};
use log::error;

/// Kill every process matching `predicate`, tolerating per-PID failures.
///
/// Matched PIDs are always collected. With `pids_only` nothing is printed or
/// killed (machine-readable PID emission); with `dry_run` the would-be kill
/// is reported and counted. A target that vanished mid-batch or that we may
/// not signal is reported and skipped, never aborting the rest of the list.
pub fn kill_by_predicate<P>(
    processes: &[ProcessRecord],
    predicate: P,
    dry_run: bool,
    pids_only: bool,
) -> (usize, Vec<i32>)
where
    P: Fn(&ProcessRecord) -> bool,
{
    let mut count = 0;
    let mut pids = Vec::new();

    for record in processes {
        if !predicate(record) {
            continue;
        }
        pids.push(record.pid);

        if pids_only {
            count += 1;
            continue;
        }

        if dry_run {
            render::print_would_kill(record);
            count += 1;
            continue;
        }

        render::print_killing(record);
        match force_kill(record.pid) {
            KillOutcome::Killed => {
                render::print_kill_ok();
                count += 1;
            }
            KillOutcome::Vanished => render::print_kill_vanished(record.pid),
            KillOutcome::PermissionDenied => render::print_kill_denied(record.pid),
            KillOutcome::Failed(e) => error!("failed to kill process {}: {e}", record.pid),
        }
    }

    (count, pids)
}

/// Cross-criteria kill-target union: sorted, duplicate-free.
pub fn dedup_pids(mut pids: Vec<i32>) -> Vec<i32> {
    pids.sort_unstable();
    pids.dedup();
    pids
}
