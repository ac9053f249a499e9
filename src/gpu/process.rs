use crate::utils::system::{clock_ticks_per_second, system_uptime, username_for_uid};
use procfs::process::Process;

/// Per-(process, device) snapshot. `utilization` is the device-level figure,
/// shared by every process resident on that device.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GpuInfo {
    pub index: u32,
    pub utilization: u32,
    pub memory_mb: f64,
}

/// One PID as seen by either source. `gpu` is present only for NVML-sourced
/// records, `sys` only when the process could be resolved on the host.
pub struct ProcessRecord {
    pub pid: i32,
    pub gpu: Option<GpuInfo>,
    pub sys: Option<Process>,
}

impl ProcessRecord {
    pub fn has_gpu_info(&self) -> bool {
        self.gpu.is_some()
    }

    pub fn has_sys_info(&self) -> bool {
        self.sys.is_some()
    }

    // The derived attributes below re-read /proc on every call. The process
    // can exit or change between enumeration and use, so each read degrades
    // to None on its own rather than invalidating the record.

    pub fn is_zombie(&self) -> bool {
        self.sys
            .as_ref()
            .and_then(|p| p.stat().ok())
            .map(|stat| stat.state == 'Z')
            .unwrap_or(false)
    }

    /// Wall-clock seconds since the process started.
    pub fn runtime_secs(&self) -> Option<f64> {
        let stat = self.sys.as_ref()?.stat().ok()?;
        let started = stat.starttime as f64 / clock_ticks_per_second() as f64;
        let uptime = system_uptime()?;
        Some((uptime - started).max(0.0))
    }

    pub fn name(&self) -> Option<String> {
        self.sys
            .as_ref()
            .and_then(|p| p.stat().ok())
            .map(|stat| stat.comm)
    }

    pub fn username(&self) -> Option<String> {
        let uid = self.sys.as_ref()?.uid().ok()?;
        username_for_uid(uid)
    }

    pub fn cmdline(&self) -> Option<String> {
        let args = self.sys.as_ref()?.cmdline().ok()?;
        if args.is_empty() {
            // Zombies and kernel threads report an empty command line.
            None
        } else {
            Some(args.join(" "))
        }
    }
}
