//! Qualified name representation used by every renderer.

use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use crate::{NameError, is_identifier, is_keyword};

/// A dotted identifier path with a package/member boundary.
///
/// The first `package_level` identifiers name the package, the remaining
/// ones name a (possibly nested) type and, for member references, a static
/// field or method as the final identifier.
///
/// For example, `java.util.Map.Entry` is represented as identifiers
/// `["java", "util", "Map", "Entry"]` with a package level of 2.
///
/// Two names are equal iff their canonical strings are equal.
#[derive(Debug, Clone)]
pub struct QualifiedName {
    identifiers: Vec<String>,
    package_level: usize,
    member: bool,
    canonical: String,
}

impl QualifiedName {
    /// Create a name from its identifiers.
    ///
    /// Fails if there are no identifiers, if an identifier is not a valid
    /// bare identifier, if `package_level` exceeds the identifier count, or
    /// if a member reference has no type identifier to belong to.
    pub fn new<I, S>(identifiers: I, package_level: usize, member: bool) -> Result<Self, NameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let identifiers: Vec<String> = identifiers.into_iter().map(Into::into).collect();
        if identifiers.is_empty() {
            return Err(NameError::Empty);
        }
        for identifier in &identifiers {
            validate_identifier(identifier)?;
        }
        let size = identifiers.len();
        let canonical = identifiers.join(".");
        if package_level > size {
            return Err(NameError::PackageLevel {
                name: canonical,
                level: package_level,
                size,
            });
        }
        if member && package_level + 2 > size {
            return Err(NameError::MemberWithoutType { name: canonical });
        }
        Ok(Self {
            identifiers,
            package_level,
            member,
            canonical,
        })
    }

    /// Create a type name from a dotted package (`""` for the unnamed
    /// package) and one or more simple names.
    ///
    /// # Example
    ///
    /// ```
    /// use listing_core::QualifiedName;
    ///
    /// let entry = QualifiedName::of_type("java.util", ["Map", "Entry"]).unwrap();
    /// assert_eq!(entry.canonical(), "java.util.Map.Entry");
    /// assert_eq!(entry.package_level(), 2);
    /// ```
    pub fn of_type<I, S>(package: &str, simple_names: I) -> Result<Self, NameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut identifiers = package_identifiers(package);
        let package_level = identifiers.len();
        identifiers.extend(simple_names.into_iter().map(Into::into));
        if identifiers.len() == package_level {
            return Err(NameError::Empty);
        }
        Self::new(identifiers, package_level, false)
    }

    /// Create a name denoting a package.
    pub fn package(name: &str) -> Result<Self, NameError> {
        let identifiers = package_identifiers(name);
        let level = identifiers.len();
        Self::new(identifiers, level, false)
    }

    /// Parse a dotted name, inferring the package boundary from case.
    ///
    /// Identifiers before the first one starting with an upper-case letter
    /// form the package. A lower-case identifier following a type identifier
    /// marks the name as a member reference. Use [`QualifiedName::new`] or
    /// [`QualifiedName::member_of`] when the convention does not hold.
    pub fn parse(dotted: &str) -> Result<Self, NameError> {
        let dotted = dotted.trim();
        if dotted.is_empty() {
            return Err(NameError::Empty);
        }
        let identifiers: Vec<&str> = dotted.split('.').collect();
        let size = identifiers.len();
        let package_level = identifiers
            .iter()
            .position(|id| id.starts_with(char::is_uppercase))
            .unwrap_or(size);
        let member = package_level + 1 < size
            && !identifiers[size - 1].starts_with(char::is_uppercase);
        Self::new(identifiers, package_level, member)
    }

    /// Create a reference to the static member `member` of this type.
    pub fn member_of(&self, member: &str) -> Result<Self, NameError> {
        if self.is_package() || self.member {
            return Err(NameError::MemberWithoutType {
                name: format!("{}.{}", self.canonical, member),
            });
        }
        let mut identifiers = self.identifiers.clone();
        identifiers.push(member.to_string());
        Self::new(identifiers, self.package_level, true)
    }

    /// Create the name of a type nested in this one (or, for a package, a
    /// top-level type of it).
    pub fn nested(&self, simple_name: &str) -> Result<Self, NameError> {
        if self.member {
            return Err(NameError::MemberWithoutType {
                name: format!("{}.{}", self.canonical, simple_name),
            });
        }
        let mut identifiers = self.identifiers.clone();
        identifiers.push(simple_name.to_string());
        Self::new(identifiers, self.package_level, false)
    }

    /// The name with its last identifier removed.
    ///
    /// The package level is clamped to the new size; the result is never a
    /// member reference. Fails for single-identifier names.
    pub fn enclosing(&self) -> Result<Self, NameError> {
        let size = self.identifiers.len();
        if size == 1 {
            return Err(NameError::NoEnclosing {
                name: self.canonical.clone(),
            });
        }
        Ok(Self::from_parts(
            self.identifiers[..size - 1].to_vec(),
            self.package_level.min(size - 1),
            false,
        ))
    }

    /// The outermost type of this name, or `None` for package names.
    pub fn top_level(&self) -> Option<Self> {
        if self.is_package() {
            return None;
        }
        Some(Self::from_parts(
            self.identifiers[..=self.package_level].to_vec(),
            self.package_level,
            false,
        ))
    }

    /// All identifiers, package first.
    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    /// Number of identifiers.
    pub fn size(&self) -> usize {
        self.identifiers.len()
    }

    /// Number of leading identifiers that form the package.
    pub fn package_level(&self) -> usize {
        self.package_level
    }

    /// Whether this name denotes a static field or method.
    pub fn is_member(&self) -> bool {
        self.member
    }

    /// Whether every identifier belongs to the package.
    pub fn is_package(&self) -> bool {
        self.package_level == self.identifiers.len()
    }

    /// Whether this is a type declared directly in its package.
    pub fn is_top_level(&self) -> bool {
        !self.member && self.identifiers.len() == self.package_level + 1
    }

    /// All identifiers joined by `.`.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// The final identifier.
    pub fn last_identifier(&self) -> &str {
        // Construction guarantees at least one identifier.
        &self.identifiers[self.identifiers.len() - 1]
    }

    /// The dotted package, empty for the unnamed package.
    pub fn package_name(&self) -> String {
        self.identifiers[..self.package_level].join(".")
    }

    /// Identifiers after the package.
    pub fn simple_names(&self) -> &[String] {
        &self.identifiers[self.package_level..]
    }

    /// Identifiers after the package, joined by `.`.
    pub fn short(&self) -> String {
        self.simple_names().join(".")
    }

    /// The runtime form: nested types joined by `$`, e.g. `java.util.Map$Entry`.
    pub fn binary(&self) -> String {
        let types_end = if self.member {
            self.identifiers.len() - 1
        } else {
            self.identifiers.len()
        };
        let mut binary = self.package_name();
        let types = self.identifiers[self.package_level..types_end].join("$");
        if !binary.is_empty() && !types.is_empty() {
            binary.push('.');
        }
        binary.push_str(&types);
        if self.member {
            binary.push('.');
            binary.push_str(self.last_identifier());
        }
        binary
    }

    fn from_parts(identifiers: Vec<String>, package_level: usize, member: bool) -> Self {
        let canonical = identifiers.join(".");
        Self {
            identifiers,
            package_level,
            member,
            canonical,
        }
    }
}

fn package_identifiers(package: &str) -> Vec<String> {
    package
        .split('.')
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

fn validate_identifier(identifier: &str) -> Result<(), NameError> {
    if is_identifier(identifier) {
        return Ok(());
    }
    let reason = if is_keyword(identifier) {
        "reserved words cannot be used as identifiers"
    } else if identifier.is_empty() {
        "identifiers cannot be empty"
    } else {
        "identifiers start with a letter, '_' or '$' and contain only letters, digits, '_' or '$'"
    };
    Err(NameError::InvalidIdentifier {
        identifier: identifier.to_string(),
        reason: reason.to_string(),
    })
}

impl PartialEq for QualifiedName {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for QualifiedName {}

impl Hash for QualifiedName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl PartialOrd for QualifiedName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QualifiedName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical.cmp(&other.canonical)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

impl FromStr for QualifiedName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
