//! The append-only text buffer every renderer writes into.

use std::fmt;

use listing_core::QualifiedName;

use crate::{CanonicalStyle, Indent, Listable, NameStyle};

/// Line-oriented text accumulator with indentation and a name-usage log.
///
/// Rendering of qualified names is deferred to the installed [`NameStyle`]:
/// the same document rendered with a different policy spells its names
/// differently, while every appended name is recorded in encounter order
/// for [`ImportResolver`](crate::ImportResolver).
///
/// # Example
///
/// ```
/// use listing::Listing;
///
/// let mut listing = Listing::new();
/// listing
///     .append_text("class A {")
///     .newline()
///     .indent(1)
///     .append_text("int x;")
///     .newline()
///     .indent(-1)
///     .append_text("}");
///
/// assert_eq!(listing.to_string(), "class A {\n    int x;\n}");
/// ```
pub struct Listing {
    lines: Vec<String>,
    line: String,
    depth: usize,
    indent: Indent,
    names: Vec<QualifiedName>,
    style: Box<dyn NameStyle>,
}

impl Listing {
    /// Create an empty listing with 4-space indentation and canonical names.
    pub fn new() -> Self {
        Self::with_indent(Indent::default())
    }

    /// Create an empty listing with the specified indentation.
    pub fn with_indent(indent: Indent) -> Self {
        Self {
            lines: Vec::new(),
            line: String::new(),
            depth: 0,
            indent,
            names: Vec::new(),
            style: Box::new(CanonicalStyle),
        }
    }

    /// Install `style` as the name policy (builder form).
    pub fn with_style(mut self, style: impl NameStyle + 'static) -> Self {
        self.set_style(style);
        self
    }

    /// Install `style` as the name policy for subsequently appended names.
    pub fn set_style(&mut self, style: impl NameStyle + 'static) -> &mut Self {
        self.style = Box::new(style);
        self
    }

    /// Append text to the current line; each `\n` starts a new line.
    pub fn append_text(&mut self, s: &str) -> &mut Self {
        let mut parts = s.split('\n');
        if let Some(first) = parts.next() {
            self.line.push_str(first);
        }
        for part in parts {
            self.newline();
            self.line.push_str(part);
        }
        self
    }

    /// Append a single character; `\n` starts a new line.
    pub fn append_char(&mut self, c: char) -> &mut Self {
        if c == '\n' {
            self.newline();
        } else {
            self.line.push(c);
        }
        self
    }

    /// Complete the current line.
    ///
    /// Non-empty lines receive the current indentation as prefix. An empty
    /// line directly after a stored blank line is dropped, so the buffer
    /// never holds two consecutive blank lines.
    pub fn newline(&mut self) -> &mut Self {
        if self.line.is_empty() {
            if self.lines.last().is_some_and(String::is_empty) {
                return self;
            }
            self.lines.push(String::new());
            return self;
        }
        let mut line = self.indent.as_str().repeat(self.depth);
        line.push_str(&self.line);
        self.lines.push(line);
        self.line.clear();
        self
    }

    /// Adjust the indentation depth by `delta`, clamping at zero.
    pub fn indent(&mut self, delta: isize) -> &mut Self {
        self.depth = self.depth.saturating_add_signed(delta);
        self
    }

    /// Record `name` and append it in the style chosen by the current policy.
    pub fn append_name(&mut self, name: &QualifiedName) -> &mut Self {
        self.names.push(name.clone());
        let style = self.style.style_for(name);
        self.line.push_str(&style.apply(name));
        self
    }

    /// Apply a [`Listable`] to this listing.
    pub fn emit(&mut self, node: &(impl Listable + ?Sized)) -> &mut Self {
        node.apply(self);
        self
    }

    /// Current indentation depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Completed lines, indentation included.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The line in progress, without indentation.
    pub fn current_line(&self) -> &str {
        &self.line
    }

    /// Every name appended so far, in encounter order, duplicates retained.
    pub fn names(&self) -> &[QualifiedName] {
        &self.names
    }

    /// Take the name-usage log, leaving it empty.
    pub fn drain_names(&mut self) -> Vec<QualifiedName> {
        std::mem::take(&mut self.names)
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.line.is_empty()
    }

    /// Consume the listing and return the rendered text.
    pub fn build(self) -> String {
        self.to_string()
    }
}

impl Default for Listing {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            f.write_str(line)?;
            f.write_str("\n")?;
        }
        if !self.line.is_empty() {
            for _ in 0..self.depth {
                f.write_str(&self.indent.as_str())?;
            }
            f.write_str(&self.line)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listing")
            .field("lines", &self.lines)
            .field("line", &self.line)
            .field("depth", &self.depth)
            .field("indent", &self.indent)
            .field("names", &self.names)
            .finish_non_exhaustive()
    }
}
