//! Values bound to template markers.
//!
//! Values form a closed set of kinds. Anything outside it takes part in
//! templates through the [`Listable`] capability (rendered as-is) or the
//! [`Accessor`] capability (walked by the `#path` chain action).

use std::{borrow::Cow, fmt, rc::Rc};

use indexmap::IndexMap;
use listing_core::{QualifiedName, string_literal};

use crate::{EvalError, Listable, Listing, Selector, TypeRef};

/// Named zero-argument accessors of a value.
///
/// The `#path` chain action calls [`Accessor::access`] once per path
/// segment, first with the segment itself and then with its getter name
/// (`simpleName` -> `getSimpleName`).
///
/// # Example
///
/// ```
/// use listing::{Accessor, Bindings, RuntimeType, Script, Value};
///
/// struct Field {
///     name: String,
/// }
///
/// impl Accessor for Field {
///     fn runtime_type(&self) -> RuntimeType {
///         RuntimeType::new("com.example", "Field")
///     }
///
///     fn access(&self, member: &str) -> Option<Value> {
///         match member {
///             "getName" => Some(Value::from(self.name.as_str())),
///             _ => None,
///         }
///     }
/// }
///
/// let script = Script::parse("int {{#name}};").unwrap();
/// let field = Value::object(Field { name: "count".into() });
/// let text = script.render(&Bindings::positional([field])).unwrap();
/// assert_eq!(text, "int count;");
/// ```
pub trait Accessor {
    /// The runtime class of the value, answered for the `class` accessor.
    fn runtime_type(&self) -> RuntimeType;

    /// Look up the accessor called `member`.
    fn access(&self, member: &str) -> Option<Value>;
}

/// Descriptor of a runtime class, as returned by the `class` accessor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuntimeType {
    package: Cow<'static, str>,
    /// Simple names of the type, outermost first, joined by `.`.
    simple: Cow<'static, str>,
}

impl RuntimeType {
    /// Create a descriptor for `package.simple`; nested types separate their
    /// simple names with `.`.
    pub fn new(package: impl Into<Cow<'static, str>>, simple: impl Into<Cow<'static, str>>) -> Self {
        Self {
            package: package.into(),
            simple: simple.into(),
        }
    }

    const fn java_lang(simple: &'static str) -> Self {
        Self {
            package: Cow::Borrowed("java.lang"),
            simple: Cow::Borrowed(simple),
        }
    }

    /// The package, empty for the unnamed package.
    pub fn package_name(&self) -> &str {
        &self.package
    }

    /// The innermost simple name.
    pub fn simple_name(&self) -> &str {
        self.simple.rsplit('.').next().unwrap_or(&self.simple)
    }

    /// `package.Outer.Inner`
    pub fn canonical_name(&self) -> String {
        if self.package.is_empty() {
            self.simple.to_string()
        } else {
            format!("{}.{}", self.package, self.simple)
        }
    }

    /// `package.Outer$Inner`
    pub fn binary_name(&self) -> String {
        let simple = self.simple.replace('.', "$");
        if self.package.is_empty() {
            simple
        } else {
            format!("{}.{}", self.package, simple)
        }
    }

    /// The descriptor as a qualified type name.
    pub fn qualified_name(&self) -> Result<QualifiedName, EvalError> {
        Ok(QualifiedName::of_type(&self.package, self.simple.split('.'))?)
    }
}

impl Accessor for RuntimeType {
    fn runtime_type(&self) -> RuntimeType {
        Self::java_lang("Class")
    }

    fn access(&self, member: &str) -> Option<Value> {
        let value = match member {
            "getName" | "name" => self.binary_name(),
            "getSimpleName" | "simpleName" => self.simple_name().to_string(),
            "getCanonicalName" | "canonicalName" | "getTypeName" | "typeName" => self.canonical_name(),
            "getPackageName" | "packageName" => self.package_name().to_string(),
            _ => return None,
        };
        Some(Value::Str(value))
    }
}

/// A value bound to a marker.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i32),
    Long(i64),
    Double(f64),
    Char(char),
    Str(String),
    Name(QualifiedName),
    Type(TypeRef),
    Class(RuntimeType),
    Fragment(Rc<dyn Listable>),
    Object(Rc<dyn Accessor>),
}

impl Value {
    /// Wrap a renderable fragment.
    pub fn fragment(listable: impl Listable + 'static) -> Self {
        Self::Fragment(Rc::new(listable))
    }

    /// Wrap a value exposing accessors.
    pub fn object(accessor: impl Accessor + 'static) -> Self {
        Self::Object(Rc::new(accessor))
    }

    /// Short description of the value's kind, used in error messages.
    pub fn kind(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Bool(_) => "boolean".to_string(),
            Self::Int(_) => "int".to_string(),
            Self::Long(_) => "long".to_string(),
            Self::Double(_) => "double".to_string(),
            Self::Char(_) => "char".to_string(),
            Self::Str(_) => "string".to_string(),
            Self::Name(_) => "name".to_string(),
            Self::Type(_) => "type".to_string(),
            Self::Class(_) => "class".to_string(),
            Self::Fragment(_) => "fragment".to_string(),
            Self::Object(object) => object.runtime_type().canonical_name(),
        }
    }

    /// The runtime class of the value; `None` for null and for model values.
    pub fn runtime_type(&self) -> Option<RuntimeType> {
        match self {
            Self::Bool(_) => Some(RuntimeType::java_lang("Boolean")),
            Self::Int(_) => Some(RuntimeType::java_lang("Integer")),
            Self::Long(_) => Some(RuntimeType::java_lang("Long")),
            Self::Double(_) => Some(RuntimeType::java_lang("Double")),
            Self::Char(_) => Some(RuntimeType::java_lang("Character")),
            Self::Str(_) => Some(RuntimeType::java_lang("String")),
            Self::Class(class) => Some(class.runtime_type()),
            Self::Object(object) => Some(object.runtime_type()),
            Self::Null | Self::Name(_) | Self::Type(_) | Self::Fragment(_) => None,
        }
    }

    /// Look up a zero-argument accessor by exact name.
    pub fn access(&self, member: &str) -> Option<Value> {
        if matches!(member, "class" | "getClass") {
            return self.runtime_type().map(Value::Class);
        }
        match self {
            Self::Str(s) => match member {
                "length" => i32::try_from(s.chars().count()).ok().map(Value::Int),
                "isEmpty" => Some(Value::Bool(s.is_empty())),
                "toUpperCase" => Some(Value::Str(s.to_uppercase())),
                "toLowerCase" => Some(Value::Str(s.to_lowercase())),
                "trim" | "strip" => Some(Value::Str(s.trim().to_string())),
                "toString" => Some(self.clone()),
                _ => None,
            },
            Self::Name(name) => match member {
                "canonical" | "getCanonical" => Some(Value::Str(name.canonical().to_string())),
                "lastIdentifier" | "getLastIdentifier" => {
                    Some(Value::Str(name.last_identifier().to_string()))
                }
                "packageName" | "getPackageName" => Some(Value::Str(name.package_name())),
                "simpleNames" | "getSimpleNames" => Some(Value::Str(name.short())),
                "binary" | "getBinary" => Some(Value::Str(name.binary())),
                "enclosing" | "getEnclosing" => name.enclosing().ok().map(Value::Name),
                "topLevel" | "getTopLevel" => name.top_level().map(Value::Name),
                "isMemberReference" => Some(Value::Bool(name.is_member())),
                "size" => i32::try_from(name.size()).ok().map(Value::Int),
                "toString" => Some(Value::Str(name.canonical().to_string())),
                _ => None,
            },
            Self::Class(class) => class.access(member),
            Self::Object(object) => object.access(member),
            Self::Bool(_) | Self::Int(_) | Self::Long(_) | Self::Double(_) | Self::Char(_) => {
                match member {
                    "toString" => Some(Value::Str(self.to_string())),
                    _ => None,
                }
            }
            Self::Null | Self::Type(_) | Self::Fragment(_) => None,
        }
    }

    /// Follow a dotted accessor path, trying each segment by exact name and
    /// then by its getter name.
    pub fn walk(&self, path: &str) -> Result<Value, EvalError> {
        let mut current = self.clone();
        for segment in path.split('.') {
            let next = current
                .access(segment)
                .or_else(|| current.access(&getter_name(segment)));
            current = next.ok_or_else(|| EvalError::UnresolvedPath {
                path: path.to_string(),
                segment: segment.to_string(),
                value: current.kind(),
            })?;
        }
        Ok(current)
    }

    /// The value's raw text.
    pub fn raw(&self) -> Result<String, EvalError> {
        match self {
            Self::Fragment(fragment) => Ok(fragment.list()),
            Self::Type(ty) => Ok(ty.list()),
            Self::Object(_) => match self.access("toString") {
                Some(Value::Object(_)) | None => Err(EvalError::NotRenderable { value: self.kind() }),
                Some(value) => value.raw(),
            },
            _ => Ok(self.to_string()),
        }
    }

    /// The value as a Java string literal; `null` stays `null`.
    pub fn string_literal(&self) -> Result<String, EvalError> {
        match self {
            Self::Null => Ok("null".to_string()),
            Self::Str(s) => Ok(string_literal(s)),
            other => Ok(string_literal(&other.raw()?)),
        }
    }

    /// The value as a qualified name, parsing strings.
    pub fn to_name(&self, action: &str) -> Result<QualifiedName, EvalError> {
        match self {
            Self::Name(name) => Ok(name.clone()),
            Self::Class(class) => class.qualified_name(),
            Self::Type(TypeRef::Class { name, .. }) => Ok(name.clone()),
            Self::Str(s) => Ok(QualifiedName::parse(s)?),
            other => Err(EvalError::UnsupportedValue {
                action: action.to_string(),
                value: other.kind(),
            }),
        }
    }

    /// Write the value into `listing`: names and types through the name
    /// policy, fragments applied, everything else as raw text.
    pub fn render_into(&self, listing: &mut Listing) -> Result<(), EvalError> {
        match self {
            Self::Name(name) => {
                listing.append_name(name);
            }
            Self::Type(ty) => {
                listing.emit(ty);
            }
            Self::Class(class) => {
                listing.append_name(&class.qualified_name()?);
            }
            Self::Fragment(fragment) => {
                listing.emit(fragment.as_ref());
            }
            Self::Object(_) => match self.access("toString") {
                Some(Value::Object(_)) | None => {
                    return Err(EvalError::NotRenderable { value: self.kind() });
                }
                Some(value) => value.render_into(listing)?,
            },
            _ => {
                listing.append_text(&self.to_string());
            }
        }
        Ok(())
    }
}

/// Spell `d` the way `Double.toString` does: `NaN`, `Infinity`, plain
/// decimals for magnitudes in `[1e-3, 1e7)` and `1.0E300` style otherwise.
fn java_double(d: f64) -> String {
    if d.is_nan() {
        return "NaN".to_string();
    }
    if d.is_infinite() {
        return if d > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let magnitude = d.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        return format!("{:?}", d);
    }
    let scientific = format!("{:e}", d);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    if mantissa.contains('.') {
        format!("{mantissa}E{exponent}")
    } else {
        format!("{mantissa}.0E{exponent}")
    }
}

/// `simpleName` -> `getSimpleName`
fn getter_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        None => "get".to_string(),
        Some(first) => format!("get{}{}", first.to_uppercase(), chars.as_str()),
    }
}

/// Plain display form; fragments, types and objects are listed or shown by kind.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Long(l) => write!(f, "{}", l),
            Self::Double(d) => f.write_str(&java_double(*d)),
            Self::Char(c) => write!(f, "{}", c),
            Self::Str(s) => f.write_str(s),
            Self::Name(name) => write!(f, "{}", name),
            Self::Type(ty) => f.write_str(&ty.list()),
            Self::Class(class) => f.write_str(&class.canonical_name()),
            Self::Fragment(fragment) => f.write_str(&fragment.list()),
            Self::Object(object) => write!(f, "<{}>", object.runtime_type().canonical_name()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Self::Int(i) => f.debug_tuple("Int").field(i).finish(),
            Self::Long(l) => f.debug_tuple("Long").field(l).finish(),
            Self::Double(d) => f.debug_tuple("Double").field(d).finish(),
            Self::Char(c) => f.debug_tuple("Char").field(c).finish(),
            Self::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Self::Name(name) => f.debug_tuple("Name").field(name).finish(),
            Self::Type(ty) => f.debug_tuple("Type").field(ty).finish(),
            Self::Class(class) => f.debug_tuple("Class").field(class).finish(),
            Self::Fragment(fragment) => f.debug_tuple("Fragment").field(&fragment.list()).finish(),
            Self::Object(object) => f
                .debug_tuple("Object")
                .field(&object.runtime_type().canonical_name())
                .finish(),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i)
    }
}

impl From<i64> for Value {
    fn from(l: i64) -> Self {
        Self::Long(l)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Self::Double(d)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<QualifiedName> for Value {
    fn from(name: QualifiedName) -> Self {
        Self::Name(name)
    }
}

impl From<TypeRef> for Value {
    fn from(ty: TypeRef) -> Self {
        Self::Type(ty)
    }
}

impl From<RuntimeType> for Value {
    fn from(class: RuntimeType) -> Self {
        Self::Class(class)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Argument values for one evaluation: positional slots and named keys.
///
/// Numeric selectors address positional slots; a named value whose key is
/// the selector's decimal form stands in for a missing positional slot.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    positional: Vec<Value>,
    named: IndexMap<String, Value>,
}

impl Bindings {
    /// Create empty bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bindings holding `values` as positional slots 0, 1, ...
    pub fn positional<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        Self {
            positional: values.into_iter().map(Into::into).collect(),
            named: IndexMap::new(),
        }
    }

    /// Bindings holding `values` under their keys.
    pub fn named<K: Into<String>, V: Into<Value>>(values: impl IntoIterator<Item = (K, V)>) -> Self {
        Self {
            positional: Vec::new(),
            named: values
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Append a positional value.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Bind a value to `key`.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named.insert(key.into(), value.into());
        self
    }

    /// Resolve a selector to its bound value.
    pub fn select(&self, selector: &Selector) -> Result<&Value, EvalError> {
        let value = match selector {
            Selector::Index(index) => self
                .positional
                .get(*index)
                .or_else(|| self.named.get(&index.to_string())),
            Selector::Key(key) => self.named.get(key),
        };
        value.ok_or_else(|| EvalError::MissingArgument {
            key: selector.to_string(),
        })
    }

    /// Number of positional values.
    pub fn len(&self) -> usize {
        self.positional.len()
    }

    /// Whether no value is bound at all.
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }
}

impl<V: Into<Value>> FromIterator<V> for Bindings {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self::positional(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_of_builtin_values() {
        let class = Value::Int(7).walk("class.simpleName").unwrap();
        assert_eq!(class.to_string(), "Integer");
        let name = Value::from("x").walk("class.name").unwrap();
        assert_eq!(name.to_string(), "java.lang.String");
        let class = Value::Bool(true).walk("getClass").unwrap();
        assert_eq!(class.to_string(), "java.lang.Boolean");
    }

    #[test]
    fn test_getter_fallback() {
        assert_eq!(getter_name("simpleName"), "getSimpleName");
        assert_eq!(getter_name("x"), "getX");
        let nested = Value::Class(RuntimeType::new("java.util", "Map.Entry"));
        assert_eq!(nested.walk("name").unwrap().to_string(), "java.util.Map$Entry");
        assert_eq!(nested.walk("simpleName").unwrap().to_string(), "Entry");
        assert_eq!(nested.walk("canonicalName").unwrap().to_string(), "java.util.Map.Entry");
    }

    #[test]
    fn test_unresolved_path_names_segment() {
        let err = Value::Int(1).walk("class.nope").unwrap_err();
        match err {
            EvalError::UnresolvedPath {
                path,
                segment,
                value,
            } => {
                assert_eq!(path, "class.nope");
                assert_eq!(segment, "nope");
                assert_eq!(value, "class");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(Value::Null.walk("class").is_err());
    }

    #[test]
    fn test_string_and_name_accessors() {
        let s = Value::from("Hello");
        assert_eq!(s.walk("length").unwrap().to_string(), "5");
        assert_eq!(s.walk("toUpperCase.length").unwrap().to_string(), "5");
        let name = Value::from(QualifiedName::parse("java.util.Map.Entry").unwrap());
        assert_eq!(name.walk("enclosing.lastIdentifier").unwrap().to_string(), "Map");
        assert_eq!(name.walk("packageName").unwrap().to_string(), "java.util");
    }

    #[test]
    fn test_string_literal() {
        assert_eq!(Value::from("a\"b").string_literal().unwrap(), "\"a\\\"b\"");
        assert_eq!(Value::Null.string_literal().unwrap(), "null");
        assert_eq!(Value::Int(3).string_literal().unwrap(), "\"3\"");
        assert_eq!(Value::Char('\n').string_literal().unwrap(), "\"\\n\"");
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Double(1.0).to_string(), "1.0");
        assert_eq!(Value::Long(-4).to_string(), "-4");
        assert_eq!(Value::from(None::<i32>).to_string(), "null");
        assert_eq!(Value::from(Some('c')).to_string(), "c");
    }

    #[test]
    fn test_double_follows_java_spelling() {
        assert_eq!(java_double(f64::INFINITY), "Infinity");
        assert_eq!(java_double(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(java_double(f64::NAN), "NaN");
        assert_eq!(java_double(-0.0), "-0.0");
        assert_eq!(java_double(1234.5), "1234.5");
        assert_eq!(java_double(0.001), "0.001");
        assert_eq!(java_double(1e7), "1.0E7");
        assert_eq!(java_double(1e300), "1.0E300");
        assert_eq!(java_double(-1.5e-5), "-1.5E-5");
        assert_eq!(Value::Double(f64::INFINITY).raw().unwrap(), "Infinity");
    }

    #[test]
    fn test_bindings_select() {
        let bindings = Bindings::positional(["a", "b"]).set("key", 1).set("5", "five");
        assert_eq!(bindings.select(&Selector::Index(1)).unwrap().to_string(), "b");
        assert_eq!(bindings.select(&Selector::Index(5)).unwrap().to_string(), "five");
        assert_eq!(
            bindings.select(&Selector::Key("key".into())).unwrap().to_string(),
            "1"
        );
        let missing = bindings.select(&Selector::Key("missing".into())).unwrap_err();
        assert_eq!(missing.to_string(), "missing argument 'missing'");
    }
}
