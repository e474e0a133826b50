//! Explain operation - parsed template listing.

use std::path::Path;

use listing::{ActionTable, Instruction, Markers, Script};

use crate::reports::{ActionInfo, ExplainReport, InstructionInfo};

/// Execute the explain operation.
pub fn explain(script: &Script, template: &Path, markers: &Markers) -> ExplainReport {
    let instructions = script
        .instructions()
        .iter()
        .map(|instruction| match instruction {
            Instruction::Text(text) => InstructionInfo {
                kind: "text".to_string(),
                text: text.clone(),
                code: None,
                arity: None,
                selector: None,
            },
            Instruction::Action(marker) => InstructionInfo {
                kind: "action".to_string(),
                text: marker.marker().to_string(),
                code: Some(marker.action().code()),
                arity: Some(marker.action().arity().to_string()),
                selector: marker.selector().map(ToString::to_string),
            },
        })
        .collect();

    let actions = ActionTable::specs()
        .iter()
        .map(|spec| ActionInfo {
            code: spec.code.to_string(),
            arity: spec.arity.to_string(),
            summary: spec.summary.to_string(),
        })
        .collect();

    ExplainReport {
        template: template.to_path_buf(),
        begin: markers.begin.clone(),
        end: markers.end.clone(),
        implicit_arguments: script.implicit_arguments(),
        instructions,
        actions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explain_instructions() {
        let script = Script::parse("int {{$:name}} = {{S}}{{;}}").unwrap();
        let report = explain(&script, Path::new("field.tpl"), &Markers::default());
        assert_eq!(report.instructions.len(), 5);
        assert_eq!(report.implicit_arguments, 1);

        let name = &report.instructions[1];
        assert_eq!(name.kind, "action");
        assert_eq!(name.text, "{{$:name}}");
        assert_eq!(name.arity.as_deref(), Some("arg"));
        assert_eq!(name.selector.as_deref(), Some("name"));
        assert_eq!(report.instructions[4].code.as_deref(), Some(";"));
        assert_eq!(report.actions.len(), ActionTable::specs().len());
    }

    #[test]
    fn test_report_serializes() {
        let script = Script::parse("x{{N}}").unwrap();
        let report = explain(&script, Path::new("x.tpl"), &Markers::default());
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["instructions"][1]["code"], "N");
        assert_eq!(json["begin"], "{{");
    }
}
