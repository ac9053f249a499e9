use crate::gpu::process::ProcessRecord;
use crate::utils::formatting::{format_gpu_memory, format_runtime, truncate_command};
use crossterm::style::Stylize;
use prettytable::{format, row, Table};
use textwrap::fill;

const RULE_WIDTH: usize = 88;
const COMMAND_WIDTH: usize = 100;

pub fn print_gathering() {
    println!("{}", "Gathering GPU process information...".cyan());
}

pub fn print_found(count: usize) {
    if count == 0 {
        println!("{}\n", "Found 0 GPU processes".green());
    } else {
        println!(
            "{}\n",
            format!("Found {count} GPU processes (after whitelist filtering)").green()
        );
    }
}

/// Inventory table of all candidates, one row per PID, "-" for unknowns.
pub fn print_inventory(records: &[ProcessRecord]) {
    if records.is_empty() {
        return;
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_CLEAN);
    table.set_titles(row!["PID", "USER", "NAME", "GPU", "MEM", "UTIL", "TIME", "COMMAND"]);

    for record in records {
        let unknown = || "-".to_string();
        let (gpu_idx, mem, util) = match &record.gpu {
            Some(gpu) => (
                gpu.index.to_string(),
                format!("{:.0}MB", gpu.memory_mb),
                format!("{}%", gpu.utilization),
            ),
            None => (unknown(), unknown(), unknown()),
        };
        let runtime = record
            .runtime_secs()
            .map(|secs| format_runtime(secs).trim().to_string())
            .unwrap_or_else(unknown);
        let command = record
            .cmdline()
            .map(|cmd| fill(&cmd, 60))
            .unwrap_or_else(unknown);

        table.add_row(row![
            record.pid.to_string(),
            record.username().unwrap_or_else(unknown),
            record.name().unwrap_or_else(unknown),
            gpu_idx,
            mem,
            util,
            runtime,
            command
        ]);
    }

    table.printstd();
    println!();
}

pub fn print_header(title: &str) {
    let rule = "═".repeat(RULE_WIDTH);
    println!("\n{}", rule.as_str().magenta().bold());
    println!("{}", title.magenta().bold());
    println!("{}", rule.as_str().magenta().bold());
}

pub fn print_summary(dry_run: bool, count: usize) {
    if count == 0 {
        println!("\n{}\n", "No processes matched this criteria".dim());
    } else if dry_run {
        println!(
            "\n{}\n",
            format!("Would kill {count} process(es)").yellow().bold()
        );
    } else {
        println!("\n{}\n", format!("Killed {count} process(es)").green().bold());
    }
}

pub fn print_would_kill(record: &ProcessRecord) {
    println!(
        "  {}: {}",
        "[DRY RUN] Would kill".yellow(),
        process_line(record)
    );
}

pub fn print_killing(record: &ProcessRecord) {
    println!("  {}: {}", "Killing".red(), process_line(record));
}

pub fn print_kill_ok() {
    println!("    {}", "killed".green());
}

pub fn print_kill_vanished(pid: i32) {
    println!("    {}", format!("process {pid} no longer exists").dim());
}

pub fn print_kill_denied(pid: i32) {
    println!(
        "    {}",
        format!("permission denied to kill process {pid}").red()
    );
}

pub fn print_no_criteria() {
    println!(
        "\n{}",
        "No kill criteria specified. Use --help to see available options.".yellow()
    );
}

pub fn print_none_matched() {
    println!("\n{}", "No processes matched the specified criteria.".green());
}

pub fn print_total(dry_run: bool, total: usize) {
    let rule = "═".repeat(RULE_WIDTH);
    println!("\n{}", rule.as_str().bold());
    if dry_run {
        println!(
            "{}",
            format!("TOTAL: Would kill {total} process(es)").yellow().bold()
        );
        println!(
            "{}",
            "Run without --dry-run to actually kill the processes.".dim()
        );
    } else {
        println!(
            "{}",
            format!("TOTAL: Killed {total} process(es)").green().bold()
        );
    }
    println!("{}\n", rule.as_str().bold());
}

/// Single display line for one candidate: every attribute that resolves is
/// shown, every one that does not is simply omitted.
pub fn process_line(record: &ProcessRecord) -> String {
    let mut parts = vec![format!("{}", format!("PID {}", record.pid).bold())];

    if let Some(user) = record.username() {
        parts.push(format!("{}", user.cyan()));
    }
    if let Some(name) = record.name() {
        parts.push(format!("{}", format!("[{name}]").blue()));
    }

    if let Some(gpu) = &record.gpu {
        let util = match gpu.utilization {
            0 => format!("{}", format!("{:>3}%", gpu.utilization).dim()),
            u if u < 50 => format!("{}", format!("{u:>3}%").yellow()),
            u => format!("{}", format!("{u:>3}%").green()),
        };
        parts.push(format!(
            "{} | {} | {}",
            format!("GPU {}", gpu.index).yellow(),
            format_gpu_memory(gpu.memory_mb),
            util
        ));
    }

    if let Some(secs) = record.runtime_secs() {
        parts.push(format!("up {}", format_runtime(secs).trim()));
    }
    if record.is_zombie() {
        parts.push(format!("{}", "ZOMBIE".red().bold()));
    }

    let mut line = parts.join(" ");
    if let Some(cmd) = record.cmdline() {
        let cmd = truncate_command(&cmd, COMMAND_WIDTH);
        line.push_str(&format!("\n    {}", format!("`- {cmd}").dim()));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::process::GpuInfo;

    #[test]
    fn process_line_shows_pid_and_gpu_attribution() {
        let record = ProcessRecord {
            pid: 1234,
            gpu: Some(GpuInfo {
                index: 2,
                utilization: 0,
                memory_mb: 1024.0,
            }),
            sys: None,
        };

        let line = process_line(&record);
        assert!(line.contains("PID 1234"));
        assert!(line.contains("GPU 2"));
        assert!(line.contains("1024MB"));
    }

    #[test]
    fn process_line_omits_unresolvable_attributes() {
        let record = ProcessRecord {
            pid: 9,
            gpu: None,
            sys: None,
        };

        let line = process_line(&record);
        assert!(line.contains("PID 9"));
        assert!(!line.contains("GPU"));
        assert!(!line.contains("ZOMBIE"));
        assert!(!line.contains("`-"));
    }
}
