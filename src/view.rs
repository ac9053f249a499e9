use crate::gpu::process::ProcessRecord;
use std::collections::HashMap;

/// GPU management daemons and monitors that must never be targeted.
/// Matching is by process name, which the process controls; accepted as a
/// limitation of name-based whitelisting.
pub const WHITELISTED_PROCESS_NAMES: [&str; 5] = [
    "nv-fabricmanager",
    "nvidia-persistenced",
    "nvidia-smi",
    "nvitop",
    "nvtop",
];

/// Union of the two sources. NVML records carry per-device attribution that
/// device-file records lack, so they win on conflicting PIDs.
pub fn merge_views(
    nvml: HashMap<i32, ProcessRecord>,
    holders: HashMap<i32, ProcessRecord>,
) -> HashMap<i32, ProcessRecord> {
    let mut merged = nvml;
    for (pid, record) in holders {
        merged.entry(pid).or_insert(record);
    }
    merged
}

/// Unresolvable names fail open: an unknown process stays a candidate
/// instead of being silently protected.
pub fn name_is_whitelisted(name: Option<&str>) -> bool {
    name.map(|n| WHITELISTED_PROCESS_NAMES.contains(&n))
        .unwrap_or(false)
}

pub fn is_whitelisted(record: &ProcessRecord) -> bool {
    name_is_whitelisted(record.name().as_deref())
}

/// Final candidate list, whitelist removed, ordered by PID so every
/// criterion sees the same deterministic discovery order.
pub fn candidates(merged: HashMap<i32, ProcessRecord>) -> Vec<ProcessRecord> {
    let mut list: Vec<ProcessRecord> = merged
        .into_values()
        .filter(|record| !is_whitelisted(record))
        .collect();
    list.sort_by_key(|record| record.pid);
    list
}
