//! Automatic import computation over a fully rendered document.
//!
//! [`ImportResolver`] renders a document twice. The first pass spells every
//! name canonically and collects the names in encounter order. The
//! assignment pass then decides, name by name, which ones may be shortened
//! without two distinct names collapsing to the same spelling, and which
//! single-type imports justify those shortenings. The second pass renders
//! the document again with the decisions installed.

use std::{
    collections::{HashMap, HashSet},
    convert::Infallible,
};

use indexmap::IndexMap;
use listing_core::QualifiedName;
use tracing::debug;

use crate::{Import, ImportTable, Indent, Listable, Listing, NameStyle, Style};

/// Per-name styles decided by [`ImportResolver`], with the resolved
/// [`ImportTable`] answering for names the document never used.
#[derive(Debug, Clone, Default)]
pub struct StyleMap {
    styles: IndexMap<QualifiedName, Style>,
    fallback: ImportTable,
}

impl StyleMap {
    /// The decided style for `name`, if it was part of the document.
    pub fn get(&self, name: &QualifiedName) -> Option<Style> {
        self.styles.get(name).copied()
    }

    /// Decisions in encounter order.
    pub fn iter(&self) -> impl Iterator<Item = (&QualifiedName, Style)> {
        self.styles.iter().map(|(name, style)| (name, *style))
    }

    /// Number of decided names.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Whether no name was decided.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

impl NameStyle for StyleMap {
    fn style_for(&self, name: &QualifiedName) -> Style {
        self.get(name)
            .unwrap_or_else(|| self.fallback.style_for(name))
    }
}

/// Outcome of [`ImportResolver::resolve`].
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The document rendered with the final styles.
    pub text: String,
    /// Declarations the text relies on.
    pub imports: ImportTable,
    /// The final per-name policy.
    pub styles: StyleMap,
}

/// Computes a minimal, collision-free set of single-type imports for a document.
///
/// # Example
///
/// ```
/// use listing::{ImportResolver, Listable, QualifiedName, from_fn};
///
/// let list = QualifiedName::parse("java.util.List").unwrap();
/// let string = QualifiedName::parse("java.lang.String").unwrap();
///
/// let document = from_fn(|listing| {
///     listing.append_name(&list).append_text("<").append_name(&string).append_text("> names;");
/// });
/// let resolution = ImportResolver::new("com.example").resolve_listable(&document);
///
/// assert_eq!(resolution.text, "List<String> names;");
/// assert_eq!(resolution.imports.list(), "import java.util.List;\n");
/// ```
#[derive(Debug, Clone)]
pub struct ImportResolver {
    package: String,
    implicit: Vec<String>,
    declared: ImportTable,
    prune: bool,
    indent: Indent,
}

impl ImportResolver {
    /// Packages visible without any import declaration.
    pub const DEFAULT_IMPLICIT: &'static [&'static str] = &["java.lang"];

    /// Create a resolver for a document in `package` (`""` for the unnamed package).
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            implicit: Self::DEFAULT_IMPLICIT
                .iter()
                .map(|p| p.to_string())
                .collect(),
            declared: ImportTable::new(),
            prune: true,
            indent: Indent::default(),
        }
    }

    /// Replace the implicitly visible packages.
    pub fn implicit_packages(
        mut self,
        packages: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.implicit = packages.into_iter().map(Into::into).collect();
        self
    }

    /// Seed the resolver with caller-declared imports.
    pub fn declared(mut self, imports: ImportTable) -> Self {
        self.declared = imports;
        self
    }

    /// Whether unreferenced caller-declared single-type imports are dropped
    /// (default `true`).
    pub fn prune(mut self, prune: bool) -> Self {
        self.prune = prune;
        self
    }

    /// Indentation of the listings handed to the render callback.
    pub fn indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    /// The package of the document.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Render the document twice through `render` and return the final text
    /// with the imports it needs.
    ///
    /// `render` must write the same document on both calls; its errors
    /// abort the resolution.
    pub fn resolve<F, E>(&self, mut render: F) -> Result<Resolution, E>
    where
        F: FnMut(&mut Listing) -> Result<(), E>,
    {
        let mut collection = Listing::with_indent(self.indent);
        render(&mut collection)?;
        let names = collection.drain_names();

        let (imports, styles) = self.assign(&names);
        let policy = StyleMap {
            styles,
            fallback: imports.clone(),
        };

        let mut output = Listing::with_indent(self.indent).with_style(policy.clone());
        render(&mut output)?;
        Ok(Resolution {
            text: output.build(),
            imports,
            styles: policy,
        })
    }

    /// [`resolve`](Self::resolve) for an infallible [`Listable`] document.
    pub fn resolve_listable(&self, document: &(impl Listable + ?Sized)) -> Resolution {
        let resolved: Result<Resolution, Infallible> = self.resolve(|listing| {
            document.apply(listing);
            Ok(())
        });
        match resolved {
            Ok(resolution) => resolution,
            Err(never) => match never {},
        }
    }

    /// Decide styles for `names` (in encounter order) and the imports they need.
    pub fn assign(&self, names: &[QualifiedName]) -> (ImportTable, IndexMap<QualifiedName, Style>) {
        let mut assignment = Assignment::new(self);
        for name in names {
            assignment.decide(name);
        }
        assignment.finish()
    }

    fn is_visible(&self, package: &str) -> bool {
        package.is_empty() || package == self.package || self.implicit.iter().any(|p| p == package)
    }
}

/// State of one assignment pass.
struct Assignment<'r> {
    resolver: &'r ImportResolver,
    /// Shortened spelling -> the name that owns it.
    claims: HashMap<String, QualifiedName>,
    styles: IndexMap<QualifiedName, Style>,
    imports: ImportTable,
    used: HashSet<QualifiedName>,
}

impl<'r> Assignment<'r> {
    fn new(resolver: &'r ImportResolver) -> Self {
        let mut assignment = Self {
            resolver,
            claims: HashMap::new(),
            styles: IndexMap::new(),
            imports: resolver.declared.clone(),
            used: HashSet::new(),
        };
        // Explicit single-name declarations own their simple names up front.
        for name in resolver.declared.single_types() {
            assignment.claim(name.last_identifier(), name);
        }
        for import in resolver.declared.declarations() {
            if let Import::SingleStatic(member) = import {
                assignment.claim(member.last_identifier(), &member);
            }
        }
        assignment
    }

    fn claim(&mut self, simple: &str, owner: &QualifiedName) -> bool {
        if let Some(existing) = self.claims.get(simple) {
            if existing == owner {
                return true;
            }
            debug!(%owner, %existing, simple, "simple name already claimed");
            return false;
        }
        self.claims.insert(simple.to_string(), owner.clone());
        true
    }

    fn decide(&mut self, name: &QualifiedName) -> Style {
        if let Some(style) = self.styles.get(name) {
            return *style;
        }
        let style = if name.is_package() {
            Style::Canonical
        } else if name.is_member() {
            self.decide_member(name)
        } else {
            self.decide_type(name)
        };
        debug!(%name, ?style, "decided name style");
        self.styles.insert(name.clone(), style);
        style
    }

    fn decide_type(&mut self, name: &QualifiedName) -> Style {
        match self.resolver.declared.style_for(name) {
            Style::Last => {
                if self.claim(name.last_identifier(), name) {
                    self.used.insert(name.clone());
                    Style::Last
                } else {
                    Style::Canonical
                }
            }
            Style::Short => match name.top_level() {
                Some(top) if self.claim(top.last_identifier(), &top) => Style::Short,
                _ => Style::Canonical,
            },
            Style::Canonical => self.decide_unimported(name),
        }
    }

    fn decide_unimported(&mut self, name: &QualifiedName) -> Style {
        let Some(top) = name.top_level() else {
            return Style::Canonical;
        };
        if !self.claim(top.last_identifier(), &top) {
            return Style::Canonical;
        }
        if !self.resolver.is_visible(&top.package_name()) && !self.imports.has_single_type(&top) {
            debug!(import = %top, "scheduling single-type import");
            self.imports.add_single_type(top.clone());
        }
        self.used.insert(top);
        Style::Short
    }

    fn decide_member(&mut self, name: &QualifiedName) -> Style {
        if self.resolver.declared.is_statically_imported(name)
            && self.claim(name.last_identifier(), name)
        {
            return Style::Last;
        }
        let Ok(enclosing) = name.enclosing() else {
            return Style::Canonical;
        };
        match self.decide(&enclosing) {
            Style::Short => Style::Short,
            Style::Last if enclosing.is_top_level() => Style::Short,
            _ => Style::Canonical,
        }
    }

    fn finish(mut self) -> (ImportTable, IndexMap<QualifiedName, Style>) {
        if self.resolver.prune {
            let used = &self.used;
            let dropped = self.imports.retain_single_types(|name| used.contains(name));
            for name in dropped {
                debug!(import = %name, "dropping unreferenced import");
            }
        }
        (self.imports, self.styles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::from_fn;

    fn name(s: &str) -> QualifiedName {
        QualifiedName::parse(s).unwrap()
    }

    fn names(list: &[&str]) -> Vec<QualifiedName> {
        list.iter().map(|s| name(s)).collect()
    }

    #[test]
    fn test_collision_first_encountered_wins() {
        let resolver = ImportResolver::new("com.example");
        let (imports, styles) = resolver.assign(&names(&["a.Foo", "b.Foo", "a.Foo"]));
        assert_eq!(styles.get(&name("a.Foo")), Some(&Style::Short));
        assert_eq!(styles.get(&name("b.Foo")), Some(&Style::Canonical));
        assert_eq!(imports.declarations().len(), 1);
        assert!(imports.has_single_type(&name("a.Foo")));
    }

    #[test]
    fn test_same_and_implicit_packages_need_no_import() {
        let resolver = ImportResolver::new("com.example");
        let (imports, styles) = resolver.assign(&names(&[
            "com.example.Local",
            "java.lang.String",
            "java.lang.annotation.Retention",
        ]));
        assert!(styles.values().all(|style| *style == Style::Short));
        assert_eq!(
            imports.single_types().collect::<Vec<_>>(),
            [&name("java.lang.annotation.Retention")]
        );
    }

    #[test]
    fn test_nested_types_import_their_top_level_type() {
        let resolver = ImportResolver::new("com.example");
        let (imports, styles) = resolver.assign(&names(&["java.util.Map.Entry", "java.util.Map"]));
        assert_eq!(styles[&name("java.util.Map.Entry")], Style::Short);
        assert_eq!(styles[&name("java.util.Map")], Style::Short);
        assert_eq!(
            imports.single_types().collect::<Vec<_>>(),
            [&name("java.util.Map")]
        );
    }

    #[test]
    fn test_member_follows_enclosing_type() {
        let resolver = ImportResolver::new("com.example");
        let (imports, styles) = resolver.assign(&names(&[
            "org.other.Collections",
            "java.util.Collections.emptyList",
        ]));
        assert_eq!(styles[&name("org.other.Collections")], Style::Short);
        assert_eq!(styles[&name("java.util.Collections")], Style::Canonical);
        assert_eq!(
            styles[&name("java.util.Collections.emptyList")],
            Style::Canonical
        );
        assert_eq!(imports.len(), 1);

        let (imports, styles) = resolver.assign(&names(&["java.util.Collections.emptyList"]));
        assert_eq!(styles[&name("java.util.Collections.emptyList")], Style::Short);
        assert!(imports.has_single_type(&name("java.util.Collections")));
    }

    #[test]
    fn test_static_import_renders_last() {
        let mut declared = ImportTable::new();
        declared.declare("static java.util.Collections.*").unwrap();
        let resolver = ImportResolver::new("com.example").declared(declared);
        let (imports, styles) = resolver.assign(&names(&["java.util.Collections.emptyList"]));
        assert_eq!(styles[&name("java.util.Collections.emptyList")], Style::Last);
        assert_eq!(imports.len(), 1);
    }

    #[test]
    fn test_declared_single_type_wins_and_prunes() {
        let mut declared = ImportTable::new();
        declared.declare("b.Foo").unwrap();
        declared.declare("c.Unused").unwrap();
        let resolver = ImportResolver::new("com.example").declared(declared.clone());
        let (imports, styles) = resolver.assign(&names(&["a.Foo", "b.Foo"]));
        assert_eq!(styles[&name("a.Foo")], Style::Canonical);
        assert_eq!(styles[&name("b.Foo")], Style::Last);
        assert!(imports.has_single_type(&name("b.Foo")));
        assert!(!imports.has_single_type(&name("c.Unused")));

        let keep = ImportResolver::new("com.example").declared(declared).prune(false);
        let (imports, _) = keep.assign(&names(&["a.Foo", "b.Foo"]));
        assert!(imports.has_single_type(&name("c.Unused")));
    }

    #[test]
    fn test_on_demand_declaration_respects_claims() {
        let mut declared = ImportTable::new();
        declared.declare("java.util.*").unwrap();
        let resolver = ImportResolver::new("com.example").declared(declared);
        let (imports, styles) = resolver.assign(&names(&["java.awt.List", "java.util.List", "java.util.Map"]));
        assert_eq!(styles[&name("java.awt.List")], Style::Short);
        assert_eq!(styles[&name("java.util.List")], Style::Canonical);
        assert_eq!(styles[&name("java.util.Map")], Style::Short);
        assert!(imports.has_single_type(&name("java.awt.List")));
        assert!(!imports.has_single_type(&name("java.util.Map")));
    }

    #[test]
    fn test_type_wildcard_needs_no_extra_import() {
        let mut declared = ImportTable::new();
        declared.declare("java.util.Map.*").unwrap();
        let resolver = ImportResolver::new("com.example").declared(declared);
        let entry = name("java.util.Map.Entry");
        let document = from_fn(|listing| {
            listing.append_name(&entry).append_text(" e;");
        });
        let resolution = resolver.resolve_listable(&document);
        assert_eq!(resolution.text, "Entry e;");
        assert_eq!(resolution.imports.list(), "import java.util.Map.*;\n");
        assert!(!resolution.imports.has_single_type(&name("java.util.Map")));
    }

    #[test]
    fn test_unnamed_package_names() {
        let resolver = ImportResolver::new("com.example");
        let (imports, styles) = resolver.assign(&names(&["Foo", "a.Foo"]));
        assert_eq!(styles[&name("Foo")], Style::Short);
        assert_eq!(styles[&name("a.Foo")], Style::Canonical);
        assert!(imports.is_empty());
    }

    #[test]
    fn test_package_names_stay_canonical() {
        let resolver = ImportResolver::new("");
        let (imports, styles) = resolver.assign(&names(&["java.util"]));
        assert_eq!(styles[&name("java.util")], Style::Canonical);
        assert!(imports.is_empty());
    }

    #[test]
    fn test_resolve_renders_twice() {
        let foo = name("a.Foo");
        let other = name("b.Foo");
        let document = from_fn(|listing| {
            listing
                .append_name(&foo)
                .append_text(" x = new ")
                .append_name(&other)
                .append_text("();");
        });
        let resolution = ImportResolver::new("com.example").resolve_listable(&document);
        assert_eq!(resolution.text, "Foo x = new b.Foo();");
        assert_eq!(resolution.styles.style_for(&foo), Style::Short);
        assert_eq!(resolution.styles.style_for(&other), Style::Canonical);
        assert_eq!(resolution.styles.len(), 2);
    }

    #[test]
    fn test_resolve_is_a_fixed_point() {
        let document = from_fn(|listing| {
            for s in [
                "java.util.List",
                "java.awt.List",
                "java.util.Map.Entry",
                "java.lang.String",
                "java.util.Collections.emptyList",
            ] {
                listing.append_name(&name(s)).newline();
            }
        });
        let first = ImportResolver::new("com.example").resolve_listable(&document);
        let second = ImportResolver::new("com.example")
            .declared(first.imports.clone())
            .resolve_listable(&document);
        assert_eq!(first.imports, second.imports);
        assert_eq!(first.text, second.text);
        assert_eq!(
            first.text,
            "List\njava.awt.List\nMap.Entry\nString\nCollections.emptyList\n"
        );
    }

    #[test]
    fn test_resolve_propagates_render_errors() {
        let resolved: Result<Resolution, &str> =
            ImportResolver::new("").resolve(|_listing| Err("boom"));
        assert_eq!(resolved.unwrap_err(), "boom");
    }
}
