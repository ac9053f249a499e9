use log::warn;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use nix::unistd::{sysconf, SysconfVar};
use nix::unistd::{Uid, User};
use procfs::process::Process;
use std::fs;

/// Shared host-metadata lookup for both process sources. Failure is expected
/// (exited, zombie without a parent, access denied) and leaves the record
/// with `sys: None`.
pub fn resolve_process(pid: i32) -> Option<Process> {
    match Process::new(pid) {
        Ok(process) => Some(process),
        Err(e) => {
            warn!("cannot access process {pid}: {e}");
            None
        }
    }
}

pub fn username_for_uid(uid: u32) -> Option<String> {
    match User::from_uid(Uid::from_raw(uid)) {
        Ok(Some(user)) => Some(user.name),
        _ => None,
    }
}

pub fn clock_ticks_per_second() -> u64 {
    sysconf(SysconfVar::CLK_TCK)
        .ok()
        .flatten()
        .map(|ticks| ticks as u64)
        .unwrap_or(100)
}

pub fn system_uptime() -> Option<f64> {
    fs::read_to_string("/proc/uptime")
        .ok()
        .and_then(|content| content.split_whitespace().next().map(String::from))
        .and_then(|uptime_str| uptime_str.parse().ok())
}

#[derive(Debug, PartialEq, Eq)]
pub enum KillOutcome {
    Killed,
    /// The target exited between discovery and the signal.
    Vanished,
    PermissionDenied,
    Failed(nix::Error),
}

/// Fire-and-forget SIGKILL; exit of the target is not confirmed.
pub fn force_kill(pid: i32) -> KillOutcome {
    match kill(Pid::from_raw(pid), Signal::SIGKILL) {
        Ok(()) => KillOutcome::Killed,
        Err(nix::Error::ESRCH) => KillOutcome::Vanished,
        Err(nix::Error::EPERM) => KillOutcome::PermissionDenied,
        Err(e) => KillOutcome::Failed(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;

    #[test]
    fn resolve_process_finds_the_current_process() {
        assert!(resolve_process(std::process::id() as i32).is_some());
    }

    #[test]
    fn resolve_process_degrades_for_unknown_pid() {
        assert!(resolve_process(i32::MAX).is_none());
    }

    #[test]
    fn clock_ticks_is_sane() {
        assert!(clock_ticks_per_second() >= 1);
    }

    #[test]
    fn uptime_is_positive() {
        assert!(system_uptime().unwrap() > 0.0);
    }

    #[test]
    fn force_kill_reports_vanished_for_reaped_child() {
        let mut child = Command::new("true").spawn().expect("spawn true");
        let pid = child.id() as i32;
        child.wait().expect("reap child");

        assert_eq!(force_kill(pid), KillOutcome::Vanished);
    }

    #[test]
    fn force_kill_terminates_a_live_child() {
        let mut child = Command::new("sleep").arg("30").spawn().expect("spawn sleep");
        let pid = child.id() as i32;

        assert_eq!(force_kill(pid), KillOutcome::Killed);
        let status = child.wait().expect("reap child");
        assert!(!status.success());
    }
}
