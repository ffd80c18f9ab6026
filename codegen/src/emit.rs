//! Generated-source assembly helpers.
//!
//! [`RustFile`] accumulates one generated source artifact; the rendering
//! code appends lines, blank separators, and wrapped doc comments through
//! it so the output formatting stays uniform.

use std::fmt::Write as FmtWrite;

const WRAP_WIDTH: usize = 76;

/// Buffer for one generated Rust source file.
pub struct RustFile {
    /// The accumulated source text.
    pub buf: String,
}

impl RustFile {
    /// Starts a file with a `//!` header; empty header lines become bare
    /// `//!` separators.
    #[must_use]
    pub fn new(header: &str) -> Self {
        let mut buf = String::new();
        for line in header.lines() {
            if line.is_empty() {
                buf.push_str("//!\n");
            } else {
                let _ = writeln!(buf, "//! {line}");
            }
        }
        buf.push('\n');
        RustFile { buf }
    }

    /// Appends one line verbatim.
    pub fn line(&mut self, s: &str) {
        let _ = writeln!(self.buf, "{s}");
    }

    /// Appends a blank line.
    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Appends a wrapped `///` doc comment at top level.
    pub fn doc_comment(&mut self, text: &str) {
        self.write_doc("", text);
    }

    /// Appends a wrapped `///` doc comment at field/variant indentation.
    pub fn indented_doc_comment(&mut self, text: &str) {
        self.write_doc("    ", text);
    }

    fn write_doc(&mut self, indent: &str, text: &str) {
        if text.is_empty() {
            let _ = writeln!(self.buf, "{indent}///");
            return;
        }
        for line in wrap(text, WRAP_WIDTH - indent.len()) {
            let _ = writeln!(self.buf, "{indent}/// {line}");
        }
    }

    /// Returns the finished source text.
    #[must_use]
    pub fn finish(self) -> String {
        self.buf
    }
}

/// Collapses a raw vocabulary comment into a single line: internal
/// newlines and repeated whitespace become single spaces.
#[must_use]
pub fn normalize_comment(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Greedy word wrap; words longer than the width get their own line.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lines_become_inner_doc() {
        let f = RustFile::new("First line.\n\nSecond line.");
        assert!(f.buf.starts_with("//! First line.\n//!\n//! Second line.\n\n"));
    }

    #[test]
    fn doc_comments_wrap() {
        let mut f = RustFile::new("h");
        f.doc_comment(
            "A sufficiently long description that cannot possibly fit on a \
             single line of generated output and therefore has to be wrapped.",
        );
        let doc_lines: Vec<&str> = f.buf.lines().filter(|l| l.starts_with("///")).collect();
        assert!(doc_lines.len() > 1);
        assert!(doc_lines.iter().all(|l| l.len() <= 80));
    }

    #[test]
    fn comments_normalize_to_one_line() {
        assert_eq!(
            normalize_comment("The  name\nof the\n    item."),
            "The name of the item."
        );
    }
}
