//! Row export for the computed timeline.
//!
//! Writers serialize the aggregator's entries exactly as given; ordering
//! and windowing are the aggregator's contract and are never re-derived
//! here.

use std::borrow::Cow;
use std::io::{self, Write};

use crontide_timeline::TimelineEntry;

/// Write entries as CSV rows of
/// `(system, schedule, command, execution time)`.
///
/// Execution times carry full date and minute precision.
pub fn write_csv<W: Write>(out: &mut W, entries: &[TimelineEntry]) -> io::Result<()> {
    writeln!(out, "System,Schedule,Command,ExecutionTime")?;
    for entry in entries {
        writeln!(
            out,
            "{},{},{},{}",
            csv_field(&entry.system),
            csv_field(&entry.schedule),
            csv_field(&entry.command),
            entry.execution_time.format("%Y-%m-%d %H:%M"),
        )?;
    }
    Ok(())
}

/// Write entries as a JSON array.
pub fn write_json<W: Write>(out: &mut W, entries: &[TimelineEntry]) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(out, entries)
}

/// Quote a field when it contains a comma, quote, or newline.
fn csv_field(field: &str) -> Cow<'_, str> {
    if field.contains(&[',', '"', '\n'][..]) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(command: &str, minute: u32) -> TimelineEntry {
        TimelineEntry {
            system: "web".to_string(),
            schedule: "*/5 * * * *".to_string(),
            command: command.to_string(),
            label: format!("web: {}", command),
            execution_time: NaiveDate::from_ymd_opt(2025, 6, 15)
                .unwrap()
                .and_hms_opt(8, minute, 0)
                .unwrap(),
            row: 0,
        }
    }

    fn render_csv(entries: &[TimelineEntry]) -> String {
        let mut buf = Vec::new();
        write_csv(&mut buf, entries).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn csv_has_header_and_minute_precision_times() {
        let output = render_csv(&[entry("health-check", 5)]);
        let mut lines = output.lines();
        assert_eq!(lines.next(), Some("System,Schedule,Command,ExecutionTime"));
        assert_eq!(
            lines.next(),
            Some("web,*/5 * * * *,health-check,2025-06-15 08:05")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn csv_preserves_entry_order() {
        let output = render_csv(&[entry("b", 10), entry("a", 5)]);
        let lines: Vec<&str> = output.lines().skip(1).collect();
        assert!(lines[0].contains(",b,"));
        assert!(lines[1].contains(",a,"));
    }

    #[test]
    fn csv_quotes_fields_with_commas_and_quotes() {
        let output = render_csv(&[entry("echo \"a,b\"", 0)]);
        assert!(output.contains("\"echo \"\"a,b\"\"\""));
    }

    #[test]
    fn json_is_an_array_of_entries() {
        let mut buf = Vec::new();
        write_json(&mut buf, &[entry("tick", 0)]).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 1);
        assert_eq!(parsed[0]["system"], "web");
        assert_eq!(parsed[0]["label"], "web: tick");
    }
}
