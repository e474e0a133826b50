//! Listable trait and Fragment for composable rendering.
//!
//! This module provides the abstraction that lets any model object render
//! itself into a [`Listing`] without knowing how names will be spelled.

use std::{borrow::Cow, rc::Rc};

use listing_core::QualifiedName;

use crate::Listing;

/// Trait for types that can apply themselves to a [`Listing`].
pub trait Listable {
    /// Write this node into `listing`.
    fn apply(&self, listing: &mut Listing);

    /// Render this node into a fresh listing and return the text.
    fn list(&self) -> String {
        render(self).build()
    }
}

/// Render `node` into a fresh listing with default settings.
pub fn render<L: Listable + ?Sized>(node: &L) -> Listing {
    let mut listing = Listing::new();
    node.apply(&mut listing);
    listing
}

/// A [`Listable`] backed by a closure.
///
/// # Example
///
/// ```
/// use listing::{Listable, from_fn};
///
/// let greeting = from_fn(|listing| {
///     listing.append_text("hello").newline();
/// });
/// assert_eq!(greeting.list(), "hello\n");
/// ```
#[derive(Clone, Copy)]
pub struct FromFn<F>(F);

/// Wrap `f` so it can be used wherever a [`Listable`] is expected.
pub fn from_fn<F: Fn(&mut Listing)>(f: F) -> FromFn<F> {
    FromFn(f)
}

impl<F: Fn(&mut Listing)> Listable for FromFn<F> {
    fn apply(&self, listing: &mut Listing) {
        (self.0)(listing)
    }
}

/// Blanket implementation for references.
impl<T: Listable + ?Sized> Listable for &T {
    fn apply(&self, listing: &mut Listing) {
        (*self).apply(listing)
    }
}

/// Blanket implementation for Box.
impl<T: Listable + ?Sized> Listable for Box<T> {
    fn apply(&self, listing: &mut Listing) {
        self.as_ref().apply(listing)
    }
}

impl<T: Listable + ?Sized> Listable for Rc<T> {
    fn apply(&self, listing: &mut Listing) {
        self.as_ref().apply(listing)
    }
}

impl Listable for str {
    fn apply(&self, listing: &mut Listing) {
        listing.append_text(self);
    }
}

impl Listable for String {
    fn apply(&self, listing: &mut Listing) {
        listing.append_text(self);
    }
}

impl Listable for QualifiedName {
    fn apply(&self, listing: &mut Listing) {
        listing.append_name(self);
    }
}

/// A reusable piece of listing content.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    /// Writes nothing.
    Empty,
    /// Literal text; embedded `\n` start new lines.
    Text(Cow<'static, str>),
    /// A qualified name, spelled by the listing's policy.
    Name(QualifiedName),
    /// A line break.
    Newline,
    /// An indentation change.
    Indent(isize),
    /// A header line, an indented body and an optional closing line.
    Block {
        header: Cow<'static, str>,
        body: Vec<Fragment>,
        close: Option<Cow<'static, str>>,
    },
    /// A sequence of fragments.
    Sequence(Vec<Fragment>),
}

impl Fragment {
    /// The no-op fragment.
    pub const IDENTITY: Self = Self::Empty;

    /// A single space.
    pub const SPACE: Self = Self::Text(Cow::Borrowed(" "));

    /// Create a text fragment.
    pub fn text(s: impl Into<Cow<'static, str>>) -> Self {
        Self::Text(s.into())
    }

    /// Create a name fragment.
    pub fn name(name: QualifiedName) -> Self {
        Self::Name(name)
    }

    /// Text followed by a line break.
    pub fn line(s: impl Into<Cow<'static, str>>) -> Self {
        Self::Sequence(vec![Self::Text(s.into()), Self::Newline])
    }

    /// Create a block fragment.
    pub fn block(
        header: impl Into<Cow<'static, str>>,
        body: Vec<Fragment>,
        close: Option<&'static str>,
    ) -> Self {
        Self::Block {
            header: header.into(),
            body,
            close: close.map(Cow::Borrowed),
        }
    }

    /// Create a sequence of fragments.
    pub fn sequence(fragments: Vec<Fragment>) -> Self {
        Self::Sequence(fragments)
    }
}

impl Default for Fragment {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Listable for Fragment {
    fn apply(&self, listing: &mut Listing) {
        match self {
            Self::Empty => {}
            Self::Text(text) => {
                listing.append_text(text);
            }
            Self::Name(name) => {
                listing.append_name(name);
            }
            Self::Newline => {
                listing.newline();
            }
            Self::Indent(delta) => {
                listing.indent(*delta);
            }
            Self::Block {
                header,
                body,
                close,
            } => {
                listing.append_text(header).newline().indent(1);
                for fragment in body {
                    fragment.apply(listing);
                }
                listing.indent(-1);
                if let Some(close) = close {
                    listing.append_text(close).newline();
                }
            }
            Self::Sequence(fragments) => {
                for fragment in fragments {
                    fragment.apply(listing);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singletons() {
        assert_eq!(Fragment::IDENTITY.list(), "");
        assert_eq!(Fragment::SPACE.list(), " ");
        assert_eq!(Fragment::default(), Fragment::IDENTITY);
    }

    #[test]
    fn test_block_fragment() {
        let block = Fragment::block(
            "class A {",
            vec![
                Fragment::line("int x;"),
                Fragment::sequence(vec![
                    Fragment::name(QualifiedName::parse("java.util.List").unwrap()),
                    Fragment::SPACE,
                    Fragment::line("items;"),
                ]),
            ],
            Some("}"),
        );
        assert_eq!(
            block.list(),
            "class A {\n    int x;\n    java.util.List items;\n}\n"
        );
    }

    #[test]
    fn test_render_records_names() {
        let name = QualifiedName::parse("java.util.Map").unwrap();
        let listing = render(&name);
        assert_eq!(listing.names(), [name]);
        assert_eq!(listing.to_string(), "java.util.Map");
    }

    #[test]
    fn test_boxed_and_str_listables() {
        let nodes: Vec<Box<dyn Listable>> = vec![
            Box::new("a"),
            Box::new(Fragment::Newline),
            Box::new(String::from("b")),
        ];
        let mut listing = Listing::new();
        for node in &nodes {
            listing.emit(node);
        }
        assert_eq!(listing.build(), "a\nb");
    }
}
