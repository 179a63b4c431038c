#![deny(missing_docs)]

//! # Code Writer
//!
//! String-backed text composition with indentation tracking. Knows nothing about
//! contracts; the renderers build every delimited structure out of
//! [`CodeWriter::scoped`].

/// Accumulates generated text.
#[derive(Debug, Clone)]
pub struct CodeWriter {
    buffer: String,
    indent_unit: String,
    indent_level: usize,
}

impl CodeWriter {
    /// Creates an empty writer indenting with `indent_unit` per level.
    pub fn new(indent_unit: impl Into<String>) -> Self {
        Self {
            buffer: String::new(),
            indent_unit: indent_unit.into(),
            indent_level: 0,
        }
    }

    /// Appends `text` as is, without indentation or newline.
    pub fn write(&mut self, text: &str) -> &mut Self {
        self.buffer.push_str(text);
        self
    }

    /// Appends the current indentation.
    pub fn indent(&mut self) -> &mut Self {
        for _ in 0..self.indent_level {
            self.buffer.push_str(&self.indent_unit);
        }
        self
    }

    /// Appends one indented line. Empty text produces an empty line.
    pub fn line(&mut self, text: &str) -> &mut Self {
        if !text.is_empty() {
            self.indent();
            self.buffer.push_str(text);
        }
        self.buffer.push('\n');
        self
    }

    /// Appends an empty line.
    pub fn blank_line(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Runs `body` one level deeper.
    pub fn indented<F>(&mut self, body: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        self.indent_level += 1;
        body(self);
        self.indent_level -= 1;
        self
    }

    /// Writes `open`, runs `body` one level deeper, then writes `close`.
    pub fn scoped<F>(&mut self, open: &str, close: &str, body: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        self.line(open);
        self.indented(body);
        self.line(close)
    }

    /// A brace-delimited block: `header {` ... `}`.
    pub fn block<F>(&mut self, header: &str, body: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        self.scoped(&format!("{} {{", header), "}", body)
    }

    /// Current nesting depth.
    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    /// Consumes the writer and returns the accumulated text.
    pub fn finish(self) -> String {
        self.buffer
    }
}
