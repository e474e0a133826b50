//! Import declarations and the name policy derived from them.

use std::{fmt, str::FromStr};

use indexmap::IndexSet;
use listing_core::{NameError, QualifiedName};

use crate::{Listable, Listing, NameStyle, Style};

/// One import declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Import {
    /// `import a.b.C;`
    SingleType(QualifiedName),
    /// `import a.b.*;` (package) or `import a.b.C.*;` (type)
    OnDemandType(QualifiedName),
    /// `import static a.b.C.m;`
    SingleStatic(QualifiedName),
    /// `import static a.b.C.*;`
    OnDemandStatic(QualifiedName),
}

impl Import {
    /// The name the declaration targets.
    pub fn target(&self) -> &QualifiedName {
        match self {
            Self::SingleType(name)
            | Self::OnDemandType(name)
            | Self::SingleStatic(name)
            | Self::OnDemandStatic(name) => name,
        }
    }

    fn is_static(&self) -> bool {
        matches!(self, Self::SingleStatic(_) | Self::OnDemandStatic(_))
    }
}

impl FromStr for Import {
    type Err = NameError;

    /// Parse `a.b.C`, `a.b.*`, `static a.b.C.m` or `static a.b.C.*`.
    ///
    /// A leading `import` keyword and a trailing `;` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix("import ").unwrap_or(s).trim();
        let s = s.strip_suffix(';').unwrap_or(s).trim();
        let (is_static, target) = match s.strip_prefix("static ") {
            Some(rest) => (true, rest.trim()),
            None => (false, s),
        };
        match (is_static, target.strip_suffix(".*")) {
            (false, Some(on_demand)) => QualifiedName::parse(on_demand).map(Self::OnDemandType),
            (true, Some(on_demand)) => QualifiedName::parse(on_demand).map(Self::OnDemandStatic),
            (false, None) => QualifiedName::parse(target).map(Self::SingleType),
            (true, None) => {
                let name = QualifiedName::parse(target)?;
                let member = if name.is_member() {
                    name
                } else {
                    name.enclosing()?.member_of(name.last_identifier())?
                };
                Ok(Self::SingleStatic(member))
            }
        }
    }
}

impl fmt::Display for Import {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SingleType(name) => write!(f, "import {};", name),
            Self::OnDemandType(name) => write!(f, "import {}.*;", name),
            Self::SingleStatic(name) => write!(f, "import static {};", name),
            Self::OnDemandStatic(name) => write!(f, "import static {}.*;", name),
        }
    }
}

/// Registry of shortening declarations.
///
/// Four sets: single-type, on-demand-type, single-static-member and
/// on-demand-static. Entries accumulate; they are only removed through
/// [`ImportTable::retain_single_types`].
///
/// # Example
///
/// ```
/// use listing::{ImportTable, NameStyle, QualifiedName, Style};
///
/// let mut imports = ImportTable::new();
/// imports.declare("java.util.List").unwrap();
/// imports.declare("java.io.*").unwrap();
///
/// let list = QualifiedName::parse("java.util.List").unwrap();
/// let file = QualifiedName::parse("java.io.File").unwrap();
/// assert_eq!(imports.style_for(&list), Style::Last);
/// assert_eq!(imports.style_for(&file), Style::Short);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportTable {
    single_types: IndexSet<QualifiedName>,
    on_demand_types: IndexSet<QualifiedName>,
    single_statics: IndexSet<QualifiedName>,
    on_demand_statics: IndexSet<QualifiedName>,
}

impl ImportTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and add a declaration such as `java.util.*` or `static a.B.c`.
    pub fn declare(&mut self, declaration: &str) -> Result<&mut Self, NameError> {
        let import = declaration.parse()?;
        Ok(self.add(import))
    }

    /// Add a declaration.
    #[allow(clippy::should_implement_trait)]
    pub fn add(&mut self, import: Import) -> &mut Self {
        match import {
            Import::SingleType(name) => self.single_types.insert(name),
            Import::OnDemandType(name) => self.on_demand_types.insert(name),
            Import::SingleStatic(name) => self.single_statics.insert(name),
            Import::OnDemandStatic(name) => self.on_demand_statics.insert(name),
        };
        self
    }

    /// `import name;`
    pub fn add_single_type(&mut self, name: QualifiedName) -> &mut Self {
        self.add(Import::SingleType(name))
    }

    /// `import name.*;`
    pub fn add_on_demand_type(&mut self, name: QualifiedName) -> &mut Self {
        self.add(Import::OnDemandType(name))
    }

    /// `import static name;`
    pub fn add_single_static(&mut self, name: QualifiedName) -> &mut Self {
        self.add(Import::SingleStatic(name))
    }

    /// `import static name.*;`
    pub fn add_on_demand_static(&mut self, name: QualifiedName) -> &mut Self {
        self.add(Import::OnDemandStatic(name))
    }

    /// Merge another table into this one.
    pub fn merge(&mut self, other: &ImportTable) {
        self.single_types.extend(other.single_types.iter().cloned());
        self.on_demand_types.extend(other.on_demand_types.iter().cloned());
        self.single_statics.extend(other.single_statics.iter().cloned());
        self.on_demand_statics
            .extend(other.on_demand_statics.iter().cloned());
    }

    /// Drop single-type declarations for which `keep` returns `false`.
    ///
    /// Returns the dropped names in declaration order.
    pub fn retain_single_types(
        &mut self,
        mut keep: impl FnMut(&QualifiedName) -> bool,
    ) -> Vec<QualifiedName> {
        let mut dropped = Vec::new();
        self.single_types.retain(|name| {
            let retained = keep(name);
            if !retained {
                dropped.push(name.clone());
            }
            retained
        });
        dropped
    }

    /// Single-type declarations in insertion order.
    pub fn single_types(&self) -> impl Iterator<Item = &QualifiedName> {
        self.single_types.iter()
    }

    /// Whether `name` has a single-type declaration.
    pub fn has_single_type(&self, name: &QualifiedName) -> bool {
        self.single_types.contains(name)
    }

    /// Whether the member reference `name` is named by a static declaration.
    pub fn is_statically_imported(&self, name: &QualifiedName) -> bool {
        if !name.is_member() {
            return false;
        }
        self.single_statics.contains(name)
            || name
                .enclosing()
                .is_ok_and(|enclosing| self.on_demand_statics.contains(&enclosing))
    }

    /// All declarations, sorted: type imports first, then static imports,
    /// each group by target name.
    pub fn declarations(&self) -> Vec<Import> {
        let mut imports: Vec<Import> = self
            .single_types
            .iter()
            .cloned()
            .map(Import::SingleType)
            .chain(self.on_demand_types.iter().cloned().map(Import::OnDemandType))
            .chain(self.single_statics.iter().cloned().map(Import::SingleStatic))
            .chain(
                self.on_demand_statics
                    .iter()
                    .cloned()
                    .map(Import::OnDemandStatic),
            )
            .collect();
        imports.sort_by(|a, b| {
            a.is_static()
                .cmp(&b.is_static())
                .then_with(|| a.target().cmp(b.target()))
        });
        imports
    }

    /// Total number of declarations.
    pub fn len(&self) -> usize {
        self.single_types.len()
            + self.on_demand_types.len()
            + self.single_statics.len()
            + self.on_demand_statics.len()
    }

    /// Whether the table holds no declaration.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NameStyle for ImportTable {
    /// Exact single-name matches win over wildcard matches.
    fn style_for(&self, name: &QualifiedName) -> Style {
        let enclosing = if name.is_member() {
            name.enclosing().ok()
        } else {
            None
        };
        let single = |n: &QualifiedName| {
            self.single_types.contains(n) || self.single_statics.contains(n)
        };
        if single(name) || enclosing.as_ref().is_some_and(single) {
            return Style::Last;
        }
        if enclosing
            .as_ref()
            .is_some_and(|e| self.on_demand_statics.contains(e))
        {
            return Style::Last;
        }
        // `import a.B.*;` brings the member types of `a.B` into scope.
        if !name.is_member()
            && name.simple_names().len() > 1
            && name
                .enclosing()
                .is_ok_and(|owner| self.on_demand_types.contains(&owner))
        {
            return Style::Last;
        }
        if name.package_level() > 0 {
            let package = name.package_name();
            if self
                .on_demand_types
                .iter()
                .any(|entry| entry.canonical() == package)
            {
                return Style::Short;
            }
        }
        Style::Canonical
    }
}

impl Listable for ImportTable {
    /// One `import` line per declaration, in [`ImportTable::declarations`] order.
    fn apply(&self, listing: &mut Listing) {
        for import in self.declarations() {
            listing.append_text(&import.to_string()).newline();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> QualifiedName {
        QualifiedName::parse(s).unwrap()
    }

    #[test]
    fn test_parse_declarations() {
        assert_eq!(
            "java.util.List".parse::<Import>().unwrap(),
            Import::SingleType(name("java.util.List"))
        );
        assert_eq!(
            "import java.util.*;".parse::<Import>().unwrap(),
            Import::OnDemandType(name("java.util"))
        );
        assert_eq!(
            "static java.util.Collections.*".parse::<Import>().unwrap(),
            Import::OnDemandStatic(name("java.util.Collections"))
        );
        let constant = "static java.lang.Integer.MAX_VALUE"
            .parse::<Import>()
            .unwrap();
        assert!(constant.target().is_member());
        assert_eq!(constant.to_string(), "import static java.lang.Integer.MAX_VALUE;");
        assert!("java..List".parse::<Import>().is_err());
    }

    #[test]
    fn test_single_type_wins_over_on_demand() {
        let mut imports = ImportTable::new();
        imports.declare("java.util.*").unwrap();
        imports.declare("java.util.List").unwrap();
        assert_eq!(imports.style_for(&name("java.util.List")), Style::Last);
        assert_eq!(imports.style_for(&name("java.util.Map")), Style::Short);
        assert_eq!(imports.style_for(&name("java.util.Map.Entry")), Style::Short);
        assert_eq!(imports.style_for(&name("java.io.File")), Style::Canonical);
    }

    #[test]
    fn test_member_styles() {
        let mut imports = ImportTable::new();
        imports.declare("static java.util.Collections.*").unwrap();
        imports.declare("static java.util.Objects.requireNonNull").unwrap();
        assert_eq!(
            imports.style_for(&name("java.util.Collections.emptyList")),
            Style::Last
        );
        assert_eq!(
            imports.style_for(&name("java.util.Objects.requireNonNull")),
            Style::Last
        );
        assert_eq!(
            imports.style_for(&name("java.util.Objects.hash")),
            Style::Canonical
        );
        assert!(imports.is_statically_imported(&name("java.util.Collections.emptyMap")));
        assert!(!imports.is_statically_imported(&name("java.util.Objects.hash")));
    }

    #[test]
    fn test_member_of_single_type_renders_last() {
        let mut imports = ImportTable::new();
        imports.declare("java.util.Collections").unwrap();
        imports.declare("static java.util.Objects.*").unwrap();
        assert_eq!(
            imports.style_for(&name("java.util.Collections.emptyList")),
            Style::Last
        );
        assert_eq!(imports.style_for(&name("java.util.Collections")), Style::Last);
        assert!(!imports.is_statically_imported(&name("java.util.Collections.emptyList")));
    }

    #[test]
    fn test_type_wildcard_covers_member_types() {
        let mut imports = ImportTable::new();
        imports.declare("java.util.Map.*").unwrap();
        assert_eq!(imports.style_for(&name("java.util.Map.Entry")), Style::Last);
        assert_eq!(imports.style_for(&name("java.util.Map")), Style::Canonical);
        assert_eq!(imports.style_for(&name("java.util.List")), Style::Canonical);
        assert_eq!(
            imports.style_for(&name("java.util.Map.Entry.comparingByKey")),
            Style::Canonical
        );
    }

    #[test]
    fn test_unnamed_package_is_never_on_demand() {
        let mut imports = ImportTable::new();
        imports.declare("java.util.*").unwrap();
        assert_eq!(imports.style_for(&name("Foo")), Style::Canonical);
    }

    #[test]
    fn test_retain_single_types() {
        let mut imports = ImportTable::new();
        imports.declare("java.util.List").unwrap();
        imports.declare("java.util.Map").unwrap();
        imports.declare("java.io.*").unwrap();
        let dropped = imports.retain_single_types(|n| n.last_identifier() == "Map");
        assert_eq!(dropped, [name("java.util.List")]);
        assert_eq!(imports.len(), 2);
        assert!(imports.has_single_type(&name("java.util.Map")));
    }

    #[test]
    fn test_render_declarations() {
        let mut imports = ImportTable::new();
        imports
            .declare("static java.util.Objects.requireNonNull")
            .unwrap();
        imports.declare("java.util.Map").unwrap();
        imports.declare("java.io.*").unwrap();
        assert_eq!(
            imports.list(),
            "import java.io.*;\nimport java.util.Map;\nimport static java.util.Objects.requireNonNull;\n"
        );
    }

    #[test]
    fn test_merge() {
        let mut a = ImportTable::new();
        a.declare("java.util.List").unwrap();
        let mut b = ImportTable::new();
        b.declare("java.util.List").unwrap();
        b.declare("java.util.*").unwrap();
        a.merge(&b);
        assert_eq!(a.len(), 2);
    }
}
