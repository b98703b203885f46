use crate::domain::{Severity, route};
use crate::hook::{Hook, HookEntry};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

pub const STDIN_TARGET: &str = "stdin";

/// Parse `SEVERITY message`. Lines without a recognised severity are Info.
pub fn parse_line(line: &str) -> Option<HookEntry> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let entry = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => match head.parse::<Severity>() {
            Ok(severity) => HookEntry::new(severity, rest.trim_start()),
            Err(_) => HookEntry::new(Severity::Info, line),
        },
        None => match line.parse::<Severity>() {
            Ok(severity) => HookEntry::new(severity, ""),
            Err(_) => HookEntry::new(Severity::Info, line),
        },
    };

    Some(entry)
}

/// Forward every non-empty line until EOF.
///
/// Lines at a `log` facade level go through `log::log!`, so they reach the
/// installed logger. Fatal and Panic have no facade level and fire `hook`
/// directly. Returns the number of lines forwarded with a downstream route.
pub async fn forward_lines<R>(reader: R, hook: &dyn Hook) -> std::io::Result<u64>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut forwarded = 0;

    while let Some(line) = lines.next_line().await? {
        let Some(entry) = parse_line(&line) else {
            continue;
        };

        let handed_off = match entry.severity.to_log_level() {
            Some(level) => {
                log::log!(target: STDIN_TARGET, level, "{}", entry.message);
                true
            }
            None => hook.levels().contains(&entry.severity) && hook.fire(&entry).is_ok(),
        };

        if handed_off && route(entry.severity).is_some() {
            forwarded += 1;
        }
    }

    Ok(forwarded)
}
