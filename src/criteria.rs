use crate::gpu::process::ProcessRecord;

/// One independently selectable kill criterion. Criteria may overlap; the
/// final kill-target set is deduplicated by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Criterion {
    /// Device-level utilization is exactly 0. The figure is shared by every
    /// process on the device, so a busy co-tenant masks idle neighbours and
    /// an idle device flags all of its tenants.
    ZeroUtil,
    /// Running for strictly more than the given number of hours.
    TooOld(u64),
    Zombie,
    /// Visible to a GPU or device-file source but unresolvable on the host;
    /// the strongest signal of a stale handle.
    NoProcessInfo,
}

impl Criterion {
    pub fn matches(&self, record: &ProcessRecord) -> bool {
        match *self {
            Criterion::ZeroUtil => {
                matches!(&record.gpu, Some(gpu) if gpu.utilization == 0)
            }
            Criterion::TooOld(hours) => record
                .runtime_secs()
                .map(|secs| secs / 3600.0 > hours as f64)
                .unwrap_or(false),
            Criterion::Zombie => record.is_zombie(),
            Criterion::NoProcessInfo => !record.has_sys_info(),
        }
    }

    pub fn title(&self) -> String {
        match *self {
            Criterion::ZeroUtil => "ZERO GPU UTILIZATION".to_string(),
            Criterion::TooOld(hours) => format!("PROCESSES OLDER THAN {hours} HOURS"),
            Criterion::Zombie => "ZOMBIE PROCESSES".to_string(),
            Criterion::NoProcessInfo => "PROCESSES WITHOUT SYSTEM INFO".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::process::GpuInfo;
    use procfs::process::Process;

    fn record(gpu: Option<GpuInfo>, sys: Option<Process>) -> ProcessRecord {
        let pid = sys.as_ref().map(|p| p.pid).unwrap_or(999);
        ProcessRecord { pid, gpu, sys }
    }

    fn gpu(utilization: u32) -> GpuInfo {
        GpuInfo {
            index: 0,
            utilization,
            memory_mb: 512.0,
        }
    }

    fn myself() -> Process {
        Process::myself().expect("own /proc entry")
    }

    #[test]
    fn zero_util_requires_gpu_info_at_exactly_zero() {
        assert!(Criterion::ZeroUtil.matches(&record(Some(gpu(0)), None)));
        assert!(!Criterion::ZeroUtil.matches(&record(Some(gpu(1)), None)));
        assert!(!Criterion::ZeroUtil.matches(&record(None, None)));
    }

    #[test]
    fn too_old_compares_strictly_against_the_threshold() {
        let rec = record(None, Some(myself()));
        // The test process has been alive for some positive fraction of an
        // hour, so only the zero-hour threshold is exceeded.
        assert!(Criterion::TooOld(0).matches(&rec));
        assert!(!Criterion::TooOld(1_000_000).matches(&rec));
    }

    #[test]
    fn too_old_never_matches_without_a_computable_runtime() {
        assert!(!Criterion::TooOld(0).matches(&record(None, None)));
    }

    #[test]
    fn zombie_requires_sys_info() {
        assert!(!Criterion::Zombie.matches(&record(None, None)));
        assert!(!Criterion::Zombie.matches(&record(None, Some(myself()))));
    }

    #[test]
    fn no_process_info_matches_on_absent_sys_regardless_of_gpu() {
        assert!(Criterion::NoProcessInfo.matches(&record(None, None)));
        assert!(Criterion::NoProcessInfo.matches(&record(Some(gpu(80)), None)));
        assert!(!Criterion::NoProcessInfo.matches(&record(None, Some(myself()))));
    }

    #[test]
    fn titles_embed_the_threshold() {
        assert_eq!(Criterion::TooOld(3).title(), "PROCESSES OLDER THAN 3 HOURS");
    }
}
