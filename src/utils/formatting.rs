pub fn format_runtime(secs: f64) -> String {
    let hours = secs / 3600.0;
    if hours < 1.0 {
        format!("{:>5.1}m", secs / 60.0)
    } else {
        format!("{hours:>5.1}h")
    }
}

pub fn format_gpu_memory(mb: f64) -> String {
    format!("{mb:>7.0}MB")
}

pub fn truncate_command(command: &str, max_chars: usize) -> String {
    if command.chars().count() <= max_chars {
        command.to_string()
    } else {
        let head: String = command.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{head}...")
    }
}
