//! Name rendering styles and the policies that choose them.

use listing_core::QualifiedName;

/// How a qualified name is spelled in the rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    /// Every identifier, e.g. `java.util.Map.Entry`.
    Canonical,
    /// Identifiers after the package, e.g. `Map.Entry`.
    Short,
    /// The bare last identifier, e.g. `Entry`.
    Last,
}

impl Style {
    /// Spell `name` in this style.
    ///
    /// Package names have no identifiers after the package and are always
    /// spelled canonically.
    pub fn apply<'a>(self, name: &'a QualifiedName) -> std::borrow::Cow<'a, str> {
        if name.is_package() {
            return name.canonical().into();
        }
        match self {
            Self::Canonical => name.canonical().into(),
            Self::Short => name.short().into(),
            Self::Last => name.last_identifier().into(),
        }
    }

    /// Whether this style drops any identifier.
    pub fn is_shortened(self) -> bool {
        !matches!(self, Self::Canonical)
    }
}

/// Policy consulted by a [`Listing`](crate::Listing) each time a name is appended.
pub trait NameStyle {
    /// Choose the style for `name`.
    fn style_for(&self, name: &QualifiedName) -> Style;
}

/// Renders every name canonically.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalStyle;

impl NameStyle for CanonicalStyle {
    fn style_for(&self, _name: &QualifiedName) -> Style {
        Style::Canonical
    }
}

impl<F> NameStyle for F
where
    F: Fn(&QualifiedName) -> Style,
{
    fn style_for(&self, name: &QualifiedName) -> Style {
        self(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply() {
        let entry = QualifiedName::parse("java.util.Map.Entry").unwrap();
        assert_eq!(Style::Canonical.apply(&entry), "java.util.Map.Entry");
        assert_eq!(Style::Short.apply(&entry), "Map.Entry");
        assert_eq!(Style::Last.apply(&entry), "Entry");
    }

    #[test]
    fn test_package_names_stay_canonical() {
        let package = QualifiedName::parse("java.util").unwrap();
        assert_eq!(Style::Short.apply(&package), "java.util");
        assert_eq!(Style::Last.apply(&package), "java.util");
    }

    #[test]
    fn test_closure_policy() {
        let policy = |name: &QualifiedName| {
            if name.package_name() == "java.lang" {
                Style::Last
            } else {
                Style::Canonical
            }
        };
        let string = QualifiedName::parse("java.lang.String").unwrap();
        let list = QualifiedName::parse("java.util.List").unwrap();
        assert_eq!(policy.style_for(&string), Style::Last);
        assert_eq!(policy.style_for(&list), Style::Canonical);
        assert_eq!(CanonicalStyle.style_for(&string), Style::Canonical);
    }
}
