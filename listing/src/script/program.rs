use std::str::FromStr;

use tracing::trace;

use super::{Instruction, Markers, Selector, parser};
use crate::{Bindings, EvalError, ImportResolver, Listing, ParseError, Resolution};

/// A parsed template.
///
/// A script is immutable once parsed; evaluation writes only into the
/// listing it is given, so one script can serve any number of renders.
///
/// # Example
///
/// ```
/// use listing::{Bindings, Script};
///
/// let script = Script::parse("{{$:1}} {{$:0}}").unwrap();
/// let text = script.render(&Bindings::positional(["A", "B"])).unwrap();
/// assert_eq!(text, "B A");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    instructions: Vec<Instruction>,
}

impl Script {
    /// Parse `source` with the default `{{` / `}}` markers.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        Self::parse_with(source, &Markers::default())
    }

    /// Parse `source` with custom markers.
    pub fn parse_with(source: &str, markers: &Markers) -> Result<Self, ParseError> {
        Self::parse_named("template", source, markers)
    }

    /// Parse `source`, naming it `name` in diagnostics.
    pub fn parse_named(name: &str, source: &str, markers: &Markers) -> Result<Self, ParseError> {
        let instructions = parser::parse(name, source, markers)?;
        trace!(name, instructions = instructions.len(), "parsed template");
        Ok(Self { instructions })
    }

    /// The parsed instructions, in template order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Write the template into `listing`, taking marker values from `bindings`.
    ///
    /// Markers with a selector look their value up directly. Markers without
    /// one take the next positional slot, counted only across unselected
    /// markers that consume a value.
    pub fn evaluate(&self, listing: &mut Listing, bindings: &Bindings) -> Result<(), EvalError> {
        let mut next = 0;
        for instruction in &self.instructions {
            let marker = match instruction {
                Instruction::Text(text) => {
                    listing.append_text(text);
                    continue;
                }
                Instruction::Action(marker) => marker,
            };
            let action = marker.action();
            let value = match (action.arity().consumes_value(), marker.selector()) {
                (false, _) => None,
                (true, Some(selector)) => Some(bindings.select(selector)?),
                (true, None) => {
                    let value = bindings.select(&Selector::Index(next))?;
                    next += 1;
                    Some(value)
                }
            };
            trace!(marker = marker.marker(), ?value, "evaluating action");
            action.execute(listing, value)?;
        }
        Ok(())
    }

    /// Evaluate into a fresh listing and return its text.
    pub fn render(&self, bindings: &Bindings) -> Result<String, EvalError> {
        let mut listing = Listing::new();
        self.evaluate(&mut listing, bindings)?;
        Ok(listing.build())
    }

    /// Evaluate through `resolver`, shortening names and computing imports.
    pub fn resolve(
        &self,
        resolver: &ImportResolver,
        bindings: &Bindings,
    ) -> Result<Resolution, EvalError> {
        resolver.resolve(|listing| self.evaluate(listing, bindings))
    }

    /// Number of values consumed by unselected markers.
    pub fn implicit_arguments(&self) -> usize {
        self.instructions
            .iter()
            .filter(|instruction| match instruction {
                Instruction::Action(marker) => {
                    marker.action().arity().consumes_value() && marker.selector().is_none()
                }
                Instruction::Text(_) => false,
            })
            .count()
    }
}

impl FromStr for Script {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use listing_core::QualifiedName;

    use super::*;
    use crate::{Indent, Value};

    #[test]
    fn test_implicit_counter_skips_selected_markers() {
        let script = Script::parse("{{$}}-{{$:key}}-{{¶}}{{$}}").unwrap();
        let bindings = Bindings::positional(["a", "b"]).set("key", "k");
        assert_eq!(script.render(&bindings).unwrap(), "a-k-\nb");
        assert_eq!(script.implicit_arguments(), 2);
    }

    #[test]
    fn test_named_index_fallback() {
        let script = Script::parse("{{$}}{{$:3}}").unwrap();
        let bindings = Bindings::named([("0", "zero"), ("3", "three")]);
        assert_eq!(script.render(&bindings).unwrap(), "zerothree");
    }

    #[test]
    fn test_missing_positional() {
        let script = Script::parse("{{$}} {{$}}").unwrap();
        let err = script.render(&Bindings::positional(["one"])).unwrap_err();
        assert_eq!(err.to_string(), "missing argument '1'");
    }

    #[test]
    fn test_indentation_markers() {
        let script: Script = "if (ok){{¶}}{{>}}run(){{;}}{{<}}done(){{;}}".parse().unwrap();
        let mut listing = Listing::with_indent(Indent::COMPACT);
        script.evaluate(&mut listing, &Bindings::new()).unwrap();
        assert_eq!(listing.build(), "if (ok)\n  run();\ndone();\n");
    }

    #[test]
    fn test_evaluate_twice() {
        let script = Script::parse("{{N}} {{S}}").unwrap();
        let name = QualifiedName::parse("a.B").unwrap();
        for text in ["x", "y"] {
            let bindings = Bindings::new().arg(name.clone()).arg(Value::from(text));
            assert_eq!(script.render(&bindings).unwrap(), format!("a.B \"{text}\""));
        }
    }

    #[test]
    fn test_resolve_shortens_names() {
        let script = Script::parse("{{N}} {{N}};").unwrap();
        let bindings = Bindings::positional(["java.util.List", "java.awt.List"]);
        let resolution = script
            .resolve(&ImportResolver::new("com.example"), &bindings)
            .unwrap();
        assert_eq!(resolution.text, "List java.awt.List;");
        assert_eq!(resolution.imports.len(), 1);
    }
}
