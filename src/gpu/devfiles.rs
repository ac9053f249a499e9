use crate::gpu::process::ProcessRecord;
use crate::utils::system::resolve_process;
use log::warn;
use std::collections::HashMap;
use std::process::Command;

const FUSER_COMMAND: &str = "sudo fuser -v /dev/nvidia* 2>/dev/null";

/// PIDs holding open /dev/nvidia* handles, keyed by PID, GPU info absent.
///
/// `captured` is the capability seam: pre-captured `fuser` output from a
/// privileged pass, or `None` to run the command here (needs sudo).
pub fn processes_from_device_files(captured: Option<&str>) -> HashMap<i32, ProcessRecord> {
    let output = match captured {
        Some(text) => text.to_string(),
        None => match Command::new("sh").args(["-c", FUSER_COMMAND]).output() {
            Ok(out) => String::from_utf8_lossy(&out.stdout).into_owned(),
            Err(e) => {
                warn!("failed to run fuser: {e}");
                return HashMap::new();
            }
        },
    };

    let pids = match parse_holder_pids(&output) {
        Some(pids) => pids,
        None => {
            warn!("failed to parse PIDs from fuser output: {:?}", output.trim());
            return HashMap::new();
        }
    };

    let mut result = HashMap::new();
    for pid in pids {
        // Resolution failure keeps the PID: an unresolvable holder is
        // exactly the orphaned-handle candidate the caller is after.
        result.insert(
            pid,
            ProcessRecord {
                pid,
                gpu: None,
                sys: resolve_process(pid),
            },
        );
    }
    result
}

/// Whitespace-tokenized, all-or-nothing: one non-integer token rejects the
/// whole capture, since malformed output cannot be trusted token by token.
pub fn parse_holder_pids(text: &str) -> Option<Vec<i32>> {
    text.split_whitespace()
        .map(|token| token.parse::<i32>().ok())
        .collect()
}
