//! Code-block insertion helper.
//!
//! [`CodeWriter`] accumulates generated text line by line at a tracked nesting
//! depth. Fragment lists go in through [`CodeWriter::insert_lines`] or
//! [`CodeWriter::insert_lines_commented`], which put a labeled marker in front
//! of the block so generated sections can be found (or stripped) later.

use crate::config::{EmptyBlocks, RenderConfig};

/// Line-oriented writer for generated kernel source.
pub struct CodeWriter<'a> {
    config: &'a RenderConfig,
    out: String,
    depth: usize,
}

impl<'a> CodeWriter<'a> {
    pub fn new(config: &'a RenderConfig) -> Self {
        Self {
            config,
            out: String::new(),
            depth: 0,
        }
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Write one line at the current depth. Whitespace-only lines are written
    /// empty.
    pub fn line(&mut self, text: &str) {
        if !text.trim().is_empty() {
            for _ in 0..self.depth {
                self.out.push_str(&self.config.indent);
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    /// Write header lines and nest everything after them one level deeper.
    pub fn open<I, S>(&mut self, header: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for text in header {
            self.line(text.as_ref());
        }
        self.depth += 1;
    }

    /// Leave one nesting level and write its closing line. Does nothing when
    /// no level is open.
    pub fn close(&mut self) {
        if self.depth == 0 {
            return;
        }
        self.depth -= 1;
        let close = self.config.dialect.block_close();
        self.line(close);
    }

    /// Insert `lines` verbatim under a labeled marker.
    pub fn insert_lines(&mut self, label: &str, lines: &[String]) {
        if !self.write_marker(label, lines) {
            return;
        }
        for entry in lines {
            for_each_physical_line(entry, |text| self.line(text));
        }
    }

    /// Insert `lines` as comments under a labeled marker.
    pub fn insert_lines_commented(&mut self, label: &str, lines: &[String]) {
        if !self.write_marker(label, lines) {
            return;
        }
        let prefix = self.config.dialect.comment_prefix();
        for entry in lines {
            for_each_physical_line(entry, |text| {
                if text.trim().is_empty() {
                    self.line(prefix);
                } else {
                    self.line(&format!("{} {}", prefix, text));
                }
            });
        }
    }

    /// Take the generated text.
    pub fn finish(self) -> String {
        self.out
    }

    /// Returns false when the block is skipped entirely.
    fn write_marker(&mut self, label: &str, lines: &[String]) -> bool {
        if lines.is_empty() && self.config.empty_blocks == EmptyBlocks::Omit {
            return false;
        }
        let marker = self.config.dialect.marker(label);
        self.line(&marker);
        true
    }
}

/// Split a fragment entry on embedded newlines. An empty entry still counts as
/// one (blank) line.
fn for_each_physical_line(entry: &str, mut f: impl FnMut(&str)) {
    if entry.is_empty() {
        f("");
        return;
    }
    for text in entry.lines() {
        f(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_insert_lines_verbatim() {
        let config = RenderConfig::default();
        let mut w = CodeWriter::new(&config);
        w.insert_lines("POINTERS", &lines(&["double* x = _ptr_x;", "int* i = _ptr_i;"]));
        assert_eq!(
            w.finish(),
            "//// POINTERS ///////////\ndouble* x = _ptr_x;\nint* i = _ptr_i;\n"
        );
    }

    #[test]
    fn test_insert_lines_commented() {
        let config = RenderConfig::default();
        let mut w = CodeWriter::new(&config);
        w.insert_lines_commented("SUPPORT CODE", &lines(&["inline int f() { return 1; }", ""]));
        assert_eq!(
            w.finish(),
            "//// SUPPORT CODE ///////////\n// inline int f() { return 1; }\n//\n"
        );
    }

    #[test]
    fn test_insert_multiline_entry_is_indented_per_line() {
        let config = RenderConfig::default().with_indent("\t");
        let mut w = CodeWriter::new(&config);
        w.open(["{"]);
        w.insert_lines("STATEMENT", &lines(&["a = 1;\nb = 2;"]));
        w.close();
        assert_eq!(
            w.finish(),
            "{\n\t//// STATEMENT ///////////\n\ta = 1;\n\tb = 2;\n}\n"
        );
    }

    #[test]
    fn test_empty_block_marker_policy() {
        let config = RenderConfig::default();
        let mut w = CodeWriter::new(&config);
        w.insert_lines("HASH DEFINES", &[]);
        assert_eq!(w.finish(), "//// HASH DEFINES ///////////\n");

        let config = RenderConfig::default().with_empty_blocks(EmptyBlocks::Omit);
        let mut w = CodeWriter::new(&config);
        w.insert_lines("HASH DEFINES", &[]);
        w.insert_lines_commented("SUPPORT CODE", &[]);
        assert_eq!(w.finish(), "");
    }

    #[test]
    fn test_open_close_depth() {
        let config = RenderConfig::default();
        let mut w = CodeWriter::new(&config);
        w.open(["for(;;)", "{"]);
        assert_eq!(w.depth(), 1);
        w.line("   ");
        w.close();
        assert_eq!(w.depth(), 0);
        assert_eq!(w.finish(), "for(;;)\n{\n\n}\n");
    }

    #[test]
    fn test_close_without_open_block_is_ignored() {
        let config = RenderConfig::default();
        let mut w = CodeWriter::new(&config);
        w.close();
        w.line("x = 1;");
        w.open(["{"]);
        w.close();
        w.close();
        assert_eq!(w.depth(), 0);
        assert_eq!(w.finish(), "x = 1;\n{\n}\n");
    }
}
