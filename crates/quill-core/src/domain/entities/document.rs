//! Line-oriented view of a template used by the rewrite passes.
//!
//! The text is split on `\n` only, so `\r` and a trailing newline survive a
//! parse/render cycle untouched: an unmodified document renders back to the
//! exact input.

/// A template as an editable list of lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_owned).collect(),
        }
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn lines_mut(&mut self) -> &mut Vec<String> {
        &mut self.lines
    }

    /// `true` when the document holds nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|l| is_blank(l))
    }

    /// Non-blank lines, trimmed, in order.
    pub fn content_lines(&self) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
    }

    /// Non-blank lines with indentation kept and trailing whitespace dropped.
    pub fn body_lines(&self) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .map(|l| l.trim_end())
            .filter(|l| !l.is_empty())
    }

    /// Put `block` at the top, separated from existing content by one blank line.
    pub fn prepend_block(&mut self, block: &str) {
        let mut head: Vec<String> = block.split('\n').map(str::to_owned).collect();
        if !self.is_blank() {
            head.push(String::new());
        } else {
            self.lines.clear();
        }
        head.append(&mut self.lines);
        self.lines = head;
    }

    /// Insert `block` directly after line `index`, preceded by a blank line.
    pub fn insert_block_after(&mut self, index: usize, block: &str) {
        let at = (index + 1).min(self.lines.len());
        let mut insertion = vec![String::new()];
        insertion.extend(block.split('\n').map(str::to_owned));
        self.lines.splice(at..at, insertion);
    }

    /// Put `block` at the end, separated by one blank line.
    ///
    /// Trailing blank lines collapse into that separator; a final newline in
    /// the original text is kept.
    pub fn append_block(&mut self, block: &str) {
        let mut had_trailing = false;
        while self.lines.last().is_some_and(|l| is_blank(l)) {
            self.lines.pop();
            had_trailing = true;
        }
        // A lone "" is the whole (empty) document, not a trailing newline.
        let had_newline = had_trailing && !self.lines.is_empty();
        if !self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.lines.extend(block.split('\n').map(str::to_owned));
        if had_newline {
            self.lines.push(String::new());
        }
    }
}

pub(crate) fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}
