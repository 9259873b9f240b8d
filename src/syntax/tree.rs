use derive_new::new;

use crate::diagnostics::Diagnostic;
use crate::options::SyntaxOptions;

use super::{printer::TreePrinter, SyntaxNode};

/// 1-based line and column (columns count bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn format_with_filename(&self, filename: &str) -> String {
        format!("{}:{}:{}", filename, self.line, self.column)
    }
}

/// Byte offsets of line starts, for offset to line/column conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut line_starts = vec![0];
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                    i += 1;
                    line_starts.push(i + 1);
                }
                b'\r' | b'\n' => line_starts.push(i + 1),
                _ => {}
            }
            i += 1;
        }
        Self { line_starts }
    }

    pub fn location(&self, offset: usize) -> Location {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        Location::new(line + 1, offset - self.line_starts[line] + 1)
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

/// Result of a successful parse: the lossless tree plus every recoverable
/// problem found in it.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    source: String,
    root: SyntaxNode,
    diagnostics: Vec<Diagnostic>,
    options: SyntaxOptions,
    line_index: LineIndex,
    file_name: Option<String>,
}

impl SyntaxTree {
    pub(crate) fn new(
        source: String,
        root: SyntaxNode,
        diagnostics: Vec<Diagnostic>,
        options: SyntaxOptions,
    ) -> Self {
        let line_index = LineIndex::new(&source);
        Self {
            source,
            root,
            diagnostics,
            options,
            line_index,
            file_name: None,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn options(&self) -> &SyntaxOptions {
        &self.options
    }

    pub fn location(&self, offset: usize) -> Location {
        self.line_index.location(offset)
    }

    /// `file:line:col: error[LUA0001]: message`
    pub fn render_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let location = self.location(diagnostic.span.start);
        let file_name = self.file_name.as_deref().unwrap_or("<input>");
        format!("{}: {}", location.format_with_filename(file_name), diagnostic)
    }

    pub fn dump(&self) -> String {
        TreePrinter::default().print(&self.root)
    }

    pub fn dump_with_trivia(&self) -> String {
        TreePrinter::new(true).print(&self.root)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_line_index() {
        let index = LineIndex::new("a\nbc\r\nd\re");
        assert_eq!(index.line_count(), 4);
        assert_eq!(index.location(0), Location::new(1, 1));
        assert_eq!(index.location(1), Location::new(1, 2));
        assert_eq!(index.location(2), Location::new(2, 1));
        assert_eq!(index.location(3), Location::new(2, 2));
        assert_eq!(index.location(6), Location::new(3, 1));
        assert_eq!(index.location(8), Location::new(4, 1));
    }

    #[test]
    fn test_location_format() {
        assert_eq!(Location::new(3, 7).format_with_filename("a.lua"), "a.lua:3:7");
    }
}
