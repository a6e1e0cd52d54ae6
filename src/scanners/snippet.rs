use std::path::Path;

/// Default number of context lines read around a reported line.
pub const CONTEXT_LINES: u32 = 2;

/// Read a code snippet from a source file, using the reported line range
/// plus a small context window. A missing or unreadable file yields an
/// empty snippet; a record is never failed over its snippet.
pub fn extract_context(
    source_root: &Path,
    file: &str,
    start_line: Option<u32>,
    end_line: Option<u32>,
    ctx: u32,
) -> String {
    let direct = Path::new(file);
    let resolved = if direct.exists() {
        direct.to_path_buf()
    } else {
        source_root.join(file)
    };

    let content = match std::fs::read_to_string(&resolved) {
        Ok(c) => c,
        Err(_) => return String::new(),
    };
    let lines: Vec<&str> = content.lines().collect();
    let n = lines.len();

    let (start, end) = match start_line {
        // No position reported: a small slice from the top of the file.
        None => (0, n.min(20)),
        Some(s) => {
            let s0 = (s.saturating_sub(1)) as usize;
            let start = s0.saturating_sub(ctx as usize);
            let end = match end_line {
                Some(e) => n.min(e as usize + ctx as usize),
                None => n.min(s0 + ctx as usize + 1),
            };
            (start.min(n), end)
        }
    };

    if start >= end {
        return String::new();
    }
    lines[start..end].join("\n").trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn fixture(dir: &TempDir) -> String {
        let path = dir.path().join("app.py");
        let mut f = std::fs::File::create(&path).unwrap();
        for i in 1..=10 {
            writeln!(f, "line {}", i).unwrap();
        }
        "app.py".to_string()
    }

    #[test]
    fn test_context_window_around_line() {
        let dir = TempDir::new().unwrap();
        let file = fixture(&dir);
        let snippet = extract_context(dir.path(), &file, Some(5), None, 2);
        assert_eq!(snippet, "line 3\nline 4\nline 5\nline 6\nline 7");
    }

    #[test]
    fn test_range_with_end_line() {
        let dir = TempDir::new().unwrap();
        let file = fixture(&dir);
        let snippet = extract_context(dir.path(), &file, Some(4), Some(5), 1);
        assert_eq!(snippet, "line 3\nline 4\nline 5\nline 6");
    }

    #[test]
    fn test_no_position_takes_file_head() {
        let dir = TempDir::new().unwrap();
        let file = fixture(&dir);
        let snippet = extract_context(dir.path(), &file, None, None, 2);
        assert!(snippet.starts_with("line 1"));
        assert!(snippet.ends_with("line 10"));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        assert_eq!(
            extract_context(dir.path(), "ghost.py", Some(3), None, 2),
            ""
        );
    }

    #[test]
    fn test_window_clamped_at_file_start() {
        let dir = TempDir::new().unwrap();
        let file = fixture(&dir);
        let snippet = extract_context(dir.path(), &file, Some(1), None, 2);
        assert_eq!(snippet, "line 1\nline 2\nline 3");
    }
}
