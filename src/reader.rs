//! Bulletin line reader
//!
//! Reads a Nordic file and cuts it into event-sized line groups. Events are
//! separated by blank lines; a main header that follows phase lines inside
//! one block also starts a new group, for files that dropped the separators.

use std::path::Path;
use tracing::{debug, info};

use crate::config::NordicConfig;
use crate::constants::{RECORD_WIDTH, tags};
use crate::error::Result;
use crate::parser::classifier::{is_phase_line, tag_of};

/// One event's worth of lines, in file order
pub type LineGroup = Vec<String>;

/// Line reader over Nordic bulletin text
#[derive(Debug, Clone, Default)]
pub struct BulletinReader {
    pad_short_lines: bool,
}

impl BulletinReader {
    pub fn new(config: &NordicConfig) -> Self {
        Self {
            pad_short_lines: config.pad_short_lines,
        }
    }

    /// Read a file and split it into line groups
    pub fn read_file(&self, path: &Path) -> Result<Vec<LineGroup>> {
        let bytes = std::fs::read(path)?;
        let content = decode(&bytes);
        let groups = self.split_groups(&content);
        info!(
            "Read {} line groups from {}",
            groups.len(),
            path.display()
        );
        Ok(groups)
    }

    /// Split bulletin text into line groups
    pub fn split_groups(&self, content: &str) -> Vec<LineGroup> {
        let mut groups = Vec::new();
        let mut current: LineGroup = Vec::new();
        let mut seen_phase = false;

        for line in content.lines() {
            if line.trim().is_empty() {
                if !current.is_empty() {
                    groups.push(std::mem::take(&mut current));
                }
                seen_phase = false;
                continue;
            }

            let line = self.prepare(line);
            let is_main = tag_of(&line) == Some(tags::MAIN);
            if is_main && seen_phase && !current.is_empty() {
                debug!("Main header after phase lines starts a new group");
                groups.push(std::mem::take(&mut current));
                seen_phase = false;
            }
            if is_phase_line(&line) {
                seen_phase = true;
            }
            current.push(line);
        }

        if !current.is_empty() {
            groups.push(current);
        }
        groups
    }

    fn prepare(&self, line: &str) -> String {
        let line = line.trim_end_matches('\r');
        let width = line.chars().count();
        if self.pad_short_lines && width < RECORD_WIDTH {
            format!("{}{}", line, " ".repeat(RECORD_WIDTH - width))
        } else {
            line.to_string()
        }
    }
}

/// Decode file bytes as UTF-8, falling back to Latin-1
///
/// A leading byte-order mark is dropped so that it does not shift the
/// columns of the first line.
pub fn decode(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.strip_prefix('\u{feff}').unwrap_or(text).to_string(),
        Err(_) => {
            debug!("Input is not UTF-8, decoding as Latin-1");
            bytes.iter().map(|&b| char::from(b)).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TAG_COLUMN;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn tagged(text: &str, tag: char) -> String {
        format!("{:<79}{}", text, tag)
    }

    #[test]
    fn test_split_on_blank_lines() {
        let content = format!(
            "{}\n{}\n\n{}\n   \n\n{}\n",
            tagged(" 2019 0502", '1'),
            tagged(" HEL", ' '),
            tagged(" 2019 0503", '1'),
            tagged(" 2019 0504", '1'),
        );
        let groups = BulletinReader::default().split_groups(&content);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].len(), 2);
        assert_eq!(groups[1].len(), 1);
        assert!(groups[2][0].contains("2019 0504"));
    }

    #[test]
    fn test_main_after_phase_starts_group() {
        let content = [
            tagged(" 2019 0502", '1'),
            tagged(" 2019 0502", '5'),
            tagged(" HEL", ' '),
            tagged(" KEV", ' '),
            tagged(" 2019 0503", '1'),
            tagged(" 2019 0503 second solution", '1'),
            tagged(" SOD", ' '),
        ]
        .join("\n");

        let groups = BulletinReader::default().split_groups(&content);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 4);
        // Consecutive main headers before any phase stay together
        assert_eq!(groups[1].len(), 3);
    }

    #[test]
    fn test_padding_short_lines() {
        let content = " 2019 0502 1305\r\n";
        let unpadded = BulletinReader::default().split_groups(content);
        assert_eq!(unpadded[0][0], " 2019 0502 1305");

        let config = NordicConfig::default().with_padding();
        let padded = BulletinReader::new(&config).split_groups(content);
        assert_eq!(padded[0][0].len(), RECORD_WIDTH);
        assert!(padded[0][0].starts_with(" 2019 0502 1305"));
    }

    #[test]
    fn test_read_latin1_file() {
        let mut file = NamedTempFile::new().unwrap();
        let mut line = tagged(" Vxyri felt", '3').into_bytes();
        // 0xF6 is 'ö' in Latin-1 and invalid on its own in UTF-8
        line[2] = 0xF6;
        file.write_all(&line).unwrap();
        file.write_all(b"\n\n").unwrap();
        file.write_all(tagged(" 2019 0502", '1').as_bytes()).unwrap();
        file.flush().unwrap();

        let groups = BulletinReader::default().read_file(file.path()).unwrap();
        assert_eq!(groups.len(), 2);
        assert!(groups[0][0].starts_with(" Vöyri"));
        assert_eq!(groups[0][0].chars().count(), RECORD_WIDTH);
    }

    #[test]
    fn test_byte_order_mark_dropped() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all("\u{feff}".as_bytes()).unwrap();
        writeln!(file, "{}", tagged(" 2019 0502", '1')).unwrap();
        writeln!(file, "{}", tagged(" HEL", ' ')).unwrap();
        file.flush().unwrap();

        let groups = BulletinReader::default().read_file(file.path()).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0][0].chars().count(), RECORD_WIDTH);
        assert_eq!(groups[0][0].chars().nth(TAG_COLUMN), Some('1'));

        // Only a leading mark is a byte-order mark
        assert_eq!(decode("a\u{feff}".as_bytes()), "a\u{feff}");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = BulletinReader::default().read_file(Path::new("/nonexistent/bulletin.out"));
        assert!(matches!(result, Err(crate::error::NordicError::Io(_))));
    }
}
