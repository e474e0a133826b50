use std::fmt;

use crate::{EvalError, Listing, TypeRef, Value};

/// How an action obtains its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// Consumes nothing.
    None,
    /// Reads its input from its own code text, e.g. the number of `>`.
    Tag,
    /// Consumes one bound value.
    Arg,
    /// Consumes one bound value and reads a path from its code text.
    All,
}

impl Arity {
    /// Whether the action takes a bound value.
    pub fn consumes_value(self) -> bool {
        matches!(self, Self::Arg | Self::All)
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "none",
            Self::Tag => "tag",
            Self::Arg => "arg",
            Self::All => "all",
        };
        f.write_str(s)
    }
}

/// An action a marker stands for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    /// `¶`
    Newline,
    /// `;`
    CloseStatement,
    /// `_`
    Space,
    /// `>`, `>>`, ...
    Indent(usize),
    /// `<`, `<<`, ...
    Dedent(usize),
    /// `$`
    Raw,
    /// `S`
    StringLiteral,
    /// `L`
    Fragment,
    /// `N`
    Name,
    /// `T`
    Type,
    /// `B`
    Binary,
    /// `#path`
    Chain(String),
}

impl Action {
    /// The input this action needs.
    pub fn arity(&self) -> Arity {
        match self {
            Self::Newline | Self::CloseStatement | Self::Space => Arity::None,
            Self::Indent(_) | Self::Dedent(_) => Arity::Tag,
            Self::Raw
            | Self::StringLiteral
            | Self::Fragment
            | Self::Name
            | Self::Type
            | Self::Binary => Arity::Arg,
            Self::Chain(_) => Arity::All,
        }
    }

    /// The code that selects this action.
    pub fn code(&self) -> String {
        match self {
            Self::Newline => "¶".to_string(),
            Self::CloseStatement => ";".to_string(),
            Self::Space => "_".to_string(),
            Self::Indent(count) => ">".repeat(*count),
            Self::Dedent(count) => "<".repeat(*count),
            Self::Raw => "$".to_string(),
            Self::StringLiteral => "S".to_string(),
            Self::Fragment => "L".to_string(),
            Self::Name => "N".to_string(),
            Self::Type => "T".to_string(),
            Self::Binary => "B".to_string(),
            Self::Chain(path) => format!("#{path}"),
        }
    }

    /// Apply the action to `listing`.
    ///
    /// `value` is the bound value for actions that consume one and is
    /// ignored by the others.
    pub fn execute(&self, listing: &mut Listing, value: Option<&Value>) -> Result<(), EvalError> {
        let value = match (self.arity().consumes_value(), value) {
            (false, _) => return self.execute_fixed(listing),
            (true, Some(value)) => value,
            (true, None) => {
                return Err(EvalError::MissingArgument { key: self.code() });
            }
        };
        match self {
            Self::Raw => {
                listing.append_text(&value.raw()?);
            }
            Self::StringLiteral => {
                listing.append_text(&value.string_literal()?);
            }
            Self::Fragment => value.render_into(listing)?,
            Self::Name => {
                listing.append_name(&value.to_name("N")?);
            }
            Self::Type => match value {
                Value::Type(ty) => {
                    listing.emit(ty);
                }
                other => {
                    listing.emit(&TypeRef::class(other.to_name("T")?));
                }
            },
            Self::Binary => {
                listing.append_text(&value.to_name("B")?.binary());
            }
            Self::Chain(path) => value.walk(path)?.render_into(listing)?,
            _ => return self.execute_fixed(listing),
        }
        Ok(())
    }

    fn execute_fixed(&self, listing: &mut Listing) -> Result<(), EvalError> {
        match self {
            Self::Newline => {
                listing.newline();
            }
            Self::CloseStatement => {
                listing.append_char(';').newline();
            }
            Self::Space => {
                listing.append_char(' ');
            }
            Self::Indent(count) => {
                listing.indent(isize::try_from(*count).unwrap_or(isize::MAX));
            }
            Self::Dedent(count) => {
                listing.indent(isize::try_from(*count).map_or(isize::MIN, |n| -n));
            }
            _ => {}
        }
        Ok(())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}

/// Describes one family of codes in the [`ActionTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSpec {
    /// The code, or a pattern standing for a family of codes.
    pub code: &'static str,
    pub arity: Arity,
    pub summary: &'static str,
}

/// The fixed registry of marker codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionTable;

impl ActionTable {
    const SPECS: &'static [ActionSpec] = &[
        ActionSpec {
            code: "¶",
            arity: Arity::None,
            summary: "line break",
        },
        ActionSpec {
            code: ";",
            arity: Arity::None,
            summary: "close statement: ';' and a line break",
        },
        ActionSpec {
            code: "_",
            arity: Arity::None,
            summary: "single space",
        },
        ActionSpec {
            code: ">...",
            arity: Arity::Tag,
            summary: "indent by the number of '>'",
        },
        ActionSpec {
            code: "<...",
            arity: Arity::Tag,
            summary: "dedent by the number of '<'",
        },
        ActionSpec {
            code: "$",
            arity: Arity::Arg,
            summary: "raw text of the value",
        },
        ActionSpec {
            code: "S",
            arity: Arity::Arg,
            summary: "string literal of the value, null stays null",
        },
        ActionSpec {
            code: "L",
            arity: Arity::Arg,
            summary: "fragment: listables, names and types, otherwise raw text",
        },
        ActionSpec {
            code: "N",
            arity: Arity::Arg,
            summary: "qualified name, shortened by the name policy",
        },
        ActionSpec {
            code: "T",
            arity: Arity::Arg,
            summary: "type reference",
        },
        ActionSpec {
            code: "B",
            arity: Arity::Arg,
            summary: "binary name, never shortened",
        },
        ActionSpec {
            code: "#path",
            arity: Arity::All,
            summary: "value of a dotted accessor chain",
        },
    ];

    /// All registered codes, in lookup order.
    pub fn specs() -> &'static [ActionSpec] {
        Self::SPECS
    }

    /// Find the action for a trimmed marker code.
    ///
    /// Exact symbols are tried first, then the repeated indent codes, then
    /// the `#` chain prefix.
    pub fn lookup(code: &str) -> Option<Action> {
        let action = match code {
            "¶" => Action::Newline,
            ";" => Action::CloseStatement,
            "_" => Action::Space,
            "$" => Action::Raw,
            "S" => Action::StringLiteral,
            "L" => Action::Fragment,
            "N" => Action::Name,
            "T" => Action::Type,
            "B" => Action::Binary,
            _ => {
                if let Some(count) = repeat_count(code, '>') {
                    Action::Indent(count)
                } else if let Some(count) = repeat_count(code, '<') {
                    Action::Dedent(count)
                } else if let Some(path) = code.strip_prefix('#').filter(|p| is_path(p)) {
                    Action::Chain(path.to_string())
                } else {
                    return None;
                }
            }
        };
        Some(action)
    }
}

fn repeat_count(code: &str, c: char) -> Option<usize> {
    (!code.is_empty() && code.chars().all(|x| x == c)).then(|| code.chars().count())
}

fn is_path(path: &str) -> bool {
    !path.is_empty()
        && path
            .split('.')
            .all(|segment| !segment.is_empty() && !segment.contains(char::is_whitespace))
}

#[cfg(test)]
mod tests {
    use listing_core::QualifiedName;

    use super::*;

    fn run(action: Action, value: Option<Value>) -> String {
        let mut listing = Listing::new();
        action.execute(&mut listing, value.as_ref()).unwrap();
        listing.build()
    }

    #[test]
    fn test_lookup() {
        assert_eq!(ActionTable::lookup("$"), Some(Action::Raw));
        assert_eq!(ActionTable::lookup(">>>"), Some(Action::Indent(3)));
        assert_eq!(ActionTable::lookup("<"), Some(Action::Dedent(1)));
        assert_eq!(
            ActionTable::lookup("#class.simpleName"),
            Some(Action::Chain("class.simpleName".into()))
        );
        assert_eq!(ActionTable::lookup("???"), None);
        assert_eq!(ActionTable::lookup("#"), None);
        assert_eq!(ActionTable::lookup("#a..b"), None);
        assert_eq!(ActionTable::lookup("><"), None);
        assert_eq!(ActionTable::lookup(""), None);
    }

    #[test]
    fn test_arity_and_code() {
        for spec in ActionTable::specs() {
            assert!(!spec.summary.is_empty());
        }
        assert_eq!(Action::Newline.arity(), Arity::None);
        assert_eq!(Action::Dedent(2).arity(), Arity::Tag);
        assert_eq!(Action::Dedent(2).code(), "<<");
        assert_eq!(Action::Chain("a.b".into()).to_string(), "#a.b");
        assert!(Action::Chain("x".into()).arity().consumes_value());
        assert!(!Action::Indent(1).arity().consumes_value());
    }

    #[test]
    fn test_fixed_actions() {
        let mut listing = Listing::new();
        Action::Indent(2).execute(&mut listing, None).unwrap();
        assert_eq!(listing.depth(), 2);
        Action::Dedent(5).execute(&mut listing, None).unwrap();
        assert_eq!(listing.depth(), 0);
        assert_eq!(run(Action::CloseStatement, None), ";\n");
        assert_eq!(run(Action::Space, Some(Value::Int(1))), " ");
    }

    #[test]
    fn test_value_actions() {
        assert_eq!(run(Action::Raw, Some(Value::from("x"))), "x");
        assert_eq!(run(Action::StringLiteral, Some(Value::from("x"))), "\"x\"");
        assert_eq!(run(Action::StringLiteral, Some(Value::Null)), "null");
        let entry = QualifiedName::parse("java.util.Map.Entry").unwrap();
        assert_eq!(run(Action::Binary, Some(Value::from(entry.clone()))), "java.util.Map$Entry");
        assert_eq!(run(Action::Name, Some(Value::from("java.util.List"))), "java.util.List");
        assert_eq!(run(Action::Type, Some(Value::from(entry))), "java.util.Map.Entry");
    }

    #[test]
    fn test_value_action_errors() {
        let mut listing = Listing::new();
        let err = Action::Name.execute(&mut listing, Some(&Value::Int(1))).unwrap_err();
        assert_eq!(err.to_string(), "action 'N' does not accept int values");
        let err = Action::Raw.execute(&mut listing, None).unwrap_err();
        assert!(matches!(err, EvalError::MissingArgument { .. }));
    }

    #[test]
    fn test_binary_name_is_not_logged() {
        let mut listing = Listing::new();
        let name = Value::from(QualifiedName::parse("a.B").unwrap());
        Action::Binary.execute(&mut listing, Some(&name)).unwrap();
        assert!(listing.names().is_empty());
        Action::Name.execute(&mut listing, Some(&name)).unwrap();
        assert_eq!(listing.names().len(), 1);
    }
}
