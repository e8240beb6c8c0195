//! Code fragments produced by the compilers and consumed by assemblers.
//!
//! Generated code is kept as a [`CodeBlock`]: lines tagged with a relative
//! nesting depth. Indentation is applied once, at render time, from the
//! resolved `indentType`/`indentCount` options, so compilers never need to
//! know the indent unit.

use snipgen_types::BodyMode;

/// One generated line at a nesting depth relative to its block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub depth: usize,
    pub text: String,
}

/// An ordered run of generated lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeBlock {
    lines: Vec<Line>,
}

impl CodeBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`CodeBlock::push`].
    pub fn line(mut self, depth: usize, text: impl Into<String>) -> Self {
        self.push(depth, text);
        self
    }

    pub fn push(&mut self, depth: usize, text: impl Into<String>) {
        self.lines.push(Line {
            depth,
            text: text.into(),
        });
    }

    /// An empty separator line.
    pub fn blank(&mut self) {
        self.push(0, "");
    }

    /// Append `other` nested `depth` levels deeper than its own depths.
    pub fn append(&mut self, other: &CodeBlock, depth: usize) {
        self.lines.extend(other.lines.iter().map(|line| Line {
            depth: line.depth + depth,
            text: line.text.clone(),
        }));
    }

    /// Add `suffix` to the last line (list separators).
    pub fn suffix_last(&mut self, suffix: &str) {
        if let Some(last) = self.lines.last_mut() {
            last.text.push_str(suffix);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Whether any line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.text.contains(needle))
    }

    /// Render with `indent` repeated once per depth level. Blank lines carry
    /// no indentation.
    pub fn render(&self, indent: &str) -> String {
        self.lines
            .iter()
            .map(|line| {
                if line.text.is_empty() {
                    String::new()
                } else {
                    format!("{}{}", indent.repeat(line.depth), line.text)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Compiler outputs
// ══════════════════════════════════════════════════════════════════════════════

/// Output of the body compiler.
///
/// `payload` is set exactly when `code` defines a payload symbol, so an
/// assembler can only reference a symbol the compiler produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyFragment {
    pub mode: BodyMode,
    pub code: CodeBlock,
    /// Name of the payload variable defined by `code`.
    pub payload: Option<&'static str>,
    /// Multipart support must be imported.
    pub needs_multipart: bool,
    /// File-reading support must be imported.
    pub needs_file_io: bool,
}

impl BodyFragment {
    /// No body: no code, no payload symbol.
    pub fn empty() -> Self {
        Self {
            mode: BodyMode::Empty,
            code: CodeBlock::new(),
            payload: None,
            needs_multipart: false,
            needs_file_io: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_none()
    }
}

/// Output of the header compiler: one rendered entry per surviving header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderFragment {
    entries: Vec<String>,
}

impl HeaderFragment {
    pub fn new(entries: Vec<String>) -> Self {
        Self { entries }
    }

    /// Add an entry after compilation (the multipart `Content-Type`).
    pub fn push(&mut self, entry: String) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The whole header block: `open`, the entries joined by `separator` at
    /// `depth`, then `close`. Empty when there are no entries.
    pub fn block(&self, open: &CodeBlock, separator: &str, depth: usize, close: &CodeBlock) -> CodeBlock {
        let mut block = CodeBlock::new();
        if self.entries.is_empty() {
            return block;
        }
        block.append(open, 0);
        let last = self.entries.len() - 1;
        for (i, entry) in self.entries.iter().enumerate() {
            if i < last {
                block.push(depth, format!("{entry}{separator}"));
            } else {
                block.push(depth, entry.clone());
            }
        }
        block.append(close, 0);
        block
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Tests
// ══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_applies_indent_per_depth() {
        let block = CodeBlock::new().line(0, "a {").line(1, "b").line(2, "c").line(0, "}");
        assert_eq!(block.render("  "), "a {\n  b\n    c\n}");
        assert_eq!(block.render("\t"), "a {\n\tb\n\t\tc\n}");
    }

    #[test]
    fn blank_lines_have_no_indent() {
        let mut block = CodeBlock::new();
        block.push(1, "x");
        block.blank();
        block.push(1, "y");
        assert_eq!(block.render("    "), "    x\n\n    y");
    }

    #[test]
    fn append_nests_relative_depths() {
        let inner = CodeBlock::new().line(0, "i").line(1, "j");
        let mut outer = CodeBlock::new().line(0, "o");
        outer.append(&inner, 1);
        assert_eq!(outer.render("-"), "o\n-i\n--j");
    }

    #[test]
    fn suffix_last_touches_only_last_line() {
        let mut block = CodeBlock::new().line(0, "a").line(0, "b");
        block.suffix_last(",");
        assert_eq!(block.render(""), "a\nb,");
        CodeBlock::new().suffix_last(",");
    }

    #[test]
    fn empty_header_fragment_renders_nothing() {
        let open = CodeBlock::new().line(0, "headers {");
        let close = CodeBlock::new().line(0, "}");
        assert!(HeaderFragment::default().block(&open, ",", 1, &close).is_empty());
    }

    #[test]
    fn header_block_separates_all_but_last() {
        let open = CodeBlock::new().line(0, "{");
        let close = CodeBlock::new().line(0, "}");
        let headers = HeaderFragment::new(vec!["a".into(), "b".into(), "c".into()]);
        assert_eq!(headers.block(&open, ",", 1, &close).render(" "), "{\n a,\n b,\n c\n}");
    }

    #[test]
    fn header_block_without_container_stays_flat() {
        let headers = HeaderFragment::new(vec!["x();".into(), "y();".into()]);
        let block = headers.block(&CodeBlock::new(), "", 0, &CodeBlock::new());
        assert_eq!(block.render("  "), "x();\ny();");
    }

    #[test]
    fn header_block_after_statement_stays_flat() {
        let open = CodeBlock::new().line(0, "h = new();");
        let headers = HeaderFragment::new(vec!["h.add(1);".into()]);
        let block = headers.block(&open, "", 0, &CodeBlock::new());
        assert_eq!(block.render("  "), "h = new();\nh.add(1);");
    }

    #[test]
    fn empty_body_fragment_has_no_payload() {
        let fragment = BodyFragment::empty();
        assert!(fragment.is_empty());
        assert!(fragment.code.is_empty());
        assert!(!fragment.needs_multipart && !fragment.needs_file_io);
    }
}
