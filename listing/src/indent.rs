//! Indentation configuration for rendered listings.

use std::borrow::Cow;

use serde::Deserialize;

/// Indentation unit written once per depth level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "IndentSetting")]
pub enum Indent {
    /// Spaces with the specified width (e.g., 2 or 4).
    Spaces(u8),
    /// Tab character.
    Tab,
}

impl Indent {
    /// 4-space indentation, the usual Java style.
    pub const JAVA: Self = Self::Spaces(4);

    /// 2-space indentation.
    pub const COMPACT: Self = Self::Spaces(2);

    /// Convert to the string representation for one indent level.
    pub fn as_str(&self) -> Cow<'static, str> {
        match self {
            Self::Spaces(2) => Cow::Borrowed("  "),
            Self::Spaces(4) => Cow::Borrowed("    "),
            Self::Spaces(width) => Cow::Owned(" ".repeat(usize::from(*width))),
            Self::Tab => Cow::Borrowed("\t"),
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::JAVA
    }
}

/// `indent = 4` or `indent = "tab"` in `listing.toml`.
#[derive(Deserialize)]
#[serde(untagged)]
enum IndentSetting {
    Width(u8),
    Named(String),
}

impl TryFrom<IndentSetting> for Indent {
    type Error = String;

    fn try_from(setting: IndentSetting) -> Result<Self, Self::Error> {
        match setting {
            IndentSetting::Width(width) => Ok(Self::Spaces(width)),
            IndentSetting::Named(name) if name.eq_ignore_ascii_case("tab") => Ok(Self::Tab),
            IndentSetting::Named(name) => Err(format!(
                "invalid indent '{}', expected a number of spaces or \"tab\"",
                name
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_as_str() {
        assert_eq!(Indent::Spaces(2).as_str(), "  ");
        assert_eq!(Indent::Spaces(4).as_str(), "    ");
        assert_eq!(Indent::Spaces(3).as_str(), "   ");
        assert_eq!(Indent::Spaces(0).as_str(), "");
        assert_eq!(Indent::Tab.as_str(), "\t");
    }

    #[test]
    fn test_default() {
        assert_eq!(Indent::default(), Indent::JAVA);
    }

    #[test]
    fn test_from_setting() {
        assert_eq!(Indent::try_from(IndentSetting::Width(2)), Ok(Indent::COMPACT));
        assert_eq!(
            Indent::try_from(IndentSetting::Named("Tab".into())),
            Ok(Indent::Tab)
        );
        assert!(Indent::try_from(IndentSetting::Named("wide".into())).is_err());
    }
}
