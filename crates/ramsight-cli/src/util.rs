use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};

use anyhow::Context;
use serde::{Serialize, de::DeserializeOwned};

use crate::schema::{session::RecordedSession, trace::RamTrace};

/// Writes `value` as pretty JSON to `path`, or to stdout without one.
pub fn save_json<T>(value: &T, path: Option<&Path>) -> anyhow::Result<()>
where
    T: Serialize,
{
    let (mut writer, target): (Box<dyn Write>, String) = match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            (Box::new(BufWriter::new(file)), path.display().to_string())
        }
        None => (Box::new(io::stdout().lock()), "stdout".to_owned()),
    };
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to write JSON to {target}"))?;
    writeln!(writer)
        .and_then(|()| writer.flush())
        .with_context(|| format!("Failed to flush output to {target}"))?;
    Ok(())
}

fn read_json_file<T>(file_kind: &str, path: &Path) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let file = File::open(path)
        .with_context(|| format!("Failed to open {file_kind} file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {file_kind} JSON file: {}", path.display()))
}

/// Reads a RAM trace (`{"frames": [[128 bytes], ...]}`).
pub fn read_trace_file(path: &Path) -> anyhow::Result<RamTrace> {
    read_json_file("RAM trace", path)
}

/// Reads a recorded session with RAM and vision detections per frame.
pub fn read_session_file(path: &Path) -> anyhow::Result<RecordedSession> {
    read_json_file("session", path)
}

/// Formats an optional rate, `N/A` when undefined.
pub fn format_rate(rate: Option<f64>) -> String {
    rate.map_or_else(|| "N/A".to_owned(), |r| format!("{r:.3}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(None), "N/A");
        assert_eq!(format_rate(Some(0.5)), "0.500");
        assert_eq!(format_rate(Some(1.0)), "1.000");
    }
}
