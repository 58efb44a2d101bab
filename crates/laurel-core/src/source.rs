use std::fmt;
use std::sync::Arc;

/// One source buffer, usually a file or a REPL input line. Cloning is
/// cheap; the text is shared.
#[derive(Clone, Debug)]
pub struct Source {
    path: Arc<str>,
    text: Arc<str>,
}

impl Source {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            path: path.into().into(),
            text: text.into().into(),
        }
    }

    /// Placeholder for expressions built programmatically rather than read
    /// from text.
    pub fn unknown() -> Self {
        Self::new("<unknown>", "")
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// 1-based line number containing the given byte offset. Offsets past
    /// the end of the buffer map to the last line. Works on raw bytes, so
    /// an offset inside a multibyte character still resolves to its line.
    pub fn line_number_for(&self, offset: usize) -> usize {
        let upto = &self.text.as_bytes()[..offset.min(self.text.len())];
        upto.iter().filter(|b| **b == b'\n').count() + 1
    }

    /// Text of the 1-based line `number`, without its trailing newline.
    pub fn line(&self, number: usize) -> Option<&str> {
        if number == 0 {
            return None;
        }
        self.text.lines().nth(number - 1)
    }

    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }
}

impl PartialEq for Source {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.text == other.text
    }
}

impl Eq for Source {}

/// A byte span inside one source buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    pub source: Source,
    pub start: usize,
    pub end: usize,
}

impl Location {
    pub fn new(source: Source, start: usize, end: usize) -> Self {
        Self { source, start, end }
    }

    pub fn unknown() -> Self {
        Self::new(Source::unknown(), 0, 0)
    }

    pub fn start_line(&self) -> usize {
        self.source.line_number_for(self.start)
    }

    pub fn end_line(&self) -> usize {
        self.source.line_number_for(self.end)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}..{}", self.source.path(), self.start, self.end)
    }
}
