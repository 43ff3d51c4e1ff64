//! Text list loading: one name per line.

use std::path::Path;

use namelink_linkage::model::{LinkageInput, RawRecord};
use namelink_linkage::RunConfig;
use tracing::debug;

use crate::CliError;

/// Parse list text into records. Blank lines are skipped but still count
/// toward the 1-based line index.
pub fn parse_lines(list_id: &str, text: &str) -> Vec<RawRecord> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| RawRecord::new(list_id, line.trim(), i + 1))
        .collect()
}

pub fn read_list(list_id: &str, path: &Path) -> Result<Vec<RawRecord>, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::usage(format!("cannot read {}: {e}", path.display())))?;
    let records = parse_lines(list_id, &text);
    debug!(list = %list_id, path = %path.display(), records = records.len(), "list loaded");
    Ok(records)
}

/// Load every list defined in the run file, resolving paths relative to the
/// config file's directory.
pub fn load_lists(config: &RunConfig, config_path: &Path) -> Result<LinkageInput, CliError> {
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    let mut input = LinkageInput::new();
    for (list_id, source) in &config.lists {
        let records = read_list(list_id, &base_dir.join(&source.file)).map_err(|e| {
            e.with_hint(format!("list '{list_id}': paths resolve relative to the config file"))
        })?;
        input.lists.insert(list_id.clone(), records);
    }
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_skipped_but_counted() {
        let records = parse_lines("a", "Maria Silva\n\n  \nJoão Santos\r\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].line_index, 1);
        assert_eq!(records[1].line_index, 4);
        assert_eq!(records[1].original, "João Santos");
        assert_eq!(records[1].normalized, "joao santos");
    }

    #[test]
    fn empty_text_yields_empty_list() {
        assert!(parse_lines("a", "").is_empty());
    }
}
