//! Explain command report data structures.

use std::path::PathBuf;

use serde::Serialize;

use super::output::{Output, Report};

/// One parsed instruction.
#[derive(Debug, Serialize)]
pub struct InstructionInfo {
    /// `text` or `action`.
    pub kind: String,
    /// Literal text, or the marker as written.
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
}

/// One entry of the action table.
#[derive(Debug, Serialize)]
pub struct ActionInfo {
    pub code: String,
    pub arity: String,
    pub summary: String,
}

/// Report data for a parsed template.
#[derive(Debug, Serialize)]
pub struct ExplainReport {
    pub template: PathBuf,
    pub begin: String,
    pub end: String,
    /// Values consumed by markers without a selector.
    pub implicit_arguments: usize,
    pub instructions: Vec<InstructionInfo>,
    pub actions: Vec<ActionInfo>,
}

impl Report for ExplainReport {
    fn render(&self, out: &mut dyn Output) {
        out.title("Template Explanation");
        out.newline();

        out.key_value("Template", &self.template.display().to_string());
        out.key_value("Markers", &format!("{} ... {}", self.begin, self.end));
        out.key_value("Implicit arguments", &self.implicit_arguments.to_string());
        out.newline();

        out.section("Instructions");
        for (i, instruction) in self.instructions.iter().enumerate() {
            let line = match (&instruction.code, &instruction.arity) {
                (Some(code), Some(arity)) => {
                    let selector = instruction
                        .selector
                        .as_ref()
                        .map(|s| format!(", selector {}", s))
                        .unwrap_or_default();
                    format!("{} -> {} ({}{})", instruction.text, code, arity, selector)
                }
                _ => format!("text {:?}", instruction.text),
            };
            out.numbered_item(i + 1, &line);
        }
        out.newline();

        out.section("Actions");
        for action in &self.actions {
            out.list_item(&format!("{} [{}] {}", action.code, action.arity, action.summary));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::BufferOutput;

    #[test]
    fn test_render_instructions() {
        let report = ExplainReport {
            template: PathBuf::from("t.tpl"),
            begin: "{{".to_string(),
            end: "}}".to_string(),
            implicit_arguments: 0,
            instructions: vec![
                InstructionInfo {
                    kind: "text".to_string(),
                    text: "int ".to_string(),
                    code: None,
                    arity: None,
                    selector: None,
                },
                InstructionInfo {
                    kind: "action".to_string(),
                    text: "{{$:0}}".to_string(),
                    code: Some("$".to_string()),
                    arity: Some("arg".to_string()),
                    selector: Some("0".to_string()),
                },
            ],
            actions: vec![ActionInfo {
                code: "$".to_string(),
                arity: "arg".to_string(),
                summary: "raw text of the value".to_string(),
            }],
        };
        let mut out = BufferOutput::default();
        report.render(&mut out);
        assert_eq!(
            out.out,
            "# Template Explanation\n\
             \n\
             Template: t.tpl\n\
             Markers: {{ ... }}\n\
             Implicit arguments: 0\n\
             \n\
             Instructions:\n  \
             1. text \"int \"\n  \
             2. {{$:0}} -> $ (arg, selector 0)\n\
             \n\
             Actions:\n  \
             - $ [arg] raw text of the value\n"
        );
    }
}
