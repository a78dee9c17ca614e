//! Word list writer

use crate::output::{OutputError, OutputResult};
use std::io::Write;
use std::path::Path;

/// Renders words one per line, with a trailing newline
pub fn format_word_list(words: &[String]) -> String {
    let mut out = String::with_capacity(words.iter().map(|w| w.len() + 1).sum());
    for word in words {
        out.push_str(word);
        out.push('\n');
    }
    out
}

/// Writes the word list to `path`, or to stdout when `path` is `None`
pub fn write_word_list(words: &[String], path: Option<&Path>) -> OutputResult<()> {
    let text = format_word_list(words);

    match path {
        Some(path) => std::fs::write(path, text).map_err(|source| OutputError::Write {
            path: path.display().to_string(),
            source,
        }),
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(text.as_bytes())?;
            handle.flush()?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_format_word_list() {
        let words = vec!["apple".to_string(), "banana".to_string()];
        assert_eq!(format_word_list(&words), "apple\nbanana\n");
        assert_eq!(format_word_list(&[]), "");
    }

    #[test]
    fn test_write_word_list_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.txt");
        let words = vec!["zebra".to_string(), "zest".to_string()];

        write_word_list(&words, Some(&path)).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "zebra\nzest\n");
    }

    #[test]
    fn test_write_word_list_bad_path() {
        let path = Path::new("/nonexistent/dir/words.txt");
        let result = write_word_list(&[], Some(path));
        assert!(matches!(result, Err(OutputError::Write { .. })));
    }
}
