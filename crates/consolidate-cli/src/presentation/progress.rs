use std::io::Write;

const ITEM_WIDTH: usize = 60;

/// Single status line on stderr, rewritten in place. Disabled when stderr
/// is not a terminal.
#[derive(Debug, Default)]
pub struct TransferProgress {
    live: bool,
    width: usize,
}

impl TransferProgress {
    pub fn new(live: bool) -> Self {
        Self { live, width: 0 }
    }

    pub fn update(&mut self, activity: &str, item: &str, percent: u8) {
        if !self.live {
            return;
        }

        let line = format_progress(activity, item, percent);
        let len = line.chars().count();
        let mut stderr = std::io::stderr();
        let _ = write!(stderr, "\r{:<width$}", line, width = self.width.max(len));
        let _ = stderr.flush();
        self.width = len;
    }

    /// Blank the status line before regular output is printed
    pub fn clear(&mut self) {
        if !self.live || self.width == 0 {
            return;
        }

        let mut stderr = std::io::stderr();
        let _ = write!(stderr, "\r{}\r", " ".repeat(self.width));
        let _ = stderr.flush();
        self.width = 0;
    }
}

pub fn format_progress(activity: &str, item: &str, percent: u8) -> String {
    format!("{} [{:>3}%] {}", activity, percent, shorten(item, ITEM_WIDTH))
}

/// Keep the tail of long paths, which is the part that changes
fn shorten(item: &str, max: usize) -> String {
    let count = item.chars().count();
    if count <= max {
        return item.to_string();
    }
    let tail: String = item.chars().skip(count - (max - 3)).collect();
    format!("...{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_progress() {
        assert_eq!(
            format_progress("Moving app", "src/main.rs", 50),
            "Moving app [ 50%] src/main.rs"
        );
    }

    #[test]
    fn test_long_items_keep_tail() {
        let item = format!("{}/file.txt", "deep/".repeat(20));
        let line = format_progress("Copying app", &item, 100);
        assert!(line.ends_with("/file.txt"));
        assert!(line.contains("[100%] ..."));
        assert_eq!(shorten(&item, ITEM_WIDTH).chars().count(), ITEM_WIDTH);
    }
}
