//! Lexical extraction of module, class and interface headers.
//!
//! Each kind is matched by its own line-anchored pattern over the whole file
//! text. There is no parsing: a keyword at the start of a line inside a block
//! comment or string is still reported as a declaration.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

use super::types::{Declaration, DeclarationKind};
use crate::scan::read_text;

static MODULE_RE: LazyLock<Regex> = LazyLock::new(|| header_pattern(DeclarationKind::Module));
static CLASS_RE: LazyLock<Regex> = LazyLock::new(|| header_pattern(DeclarationKind::Class));
static INTERFACE_RE: LazyLock<Regex> =
    LazyLock::new(|| header_pattern(DeclarationKind::Interface));

fn header_pattern(kind: DeclarationKind) -> Regex {
    let pattern = format!(r"(?m)^\s*{}\s+([A-Za-z0-9_]+)", kind.keyword());
    Regex::new(&pattern).expect("declaration header pattern is valid")
}

fn pattern_for(kind: DeclarationKind) -> &'static Regex {
    match kind {
        DeclarationKind::Module => &MODULE_RE,
        DeclarationKind::Class => &CLASS_RE,
        DeclarationKind::Interface => &INTERFACE_RE,
    }
}

/// Extract declarations from `text`, attributing them to `file_name`.
///
/// Results are grouped by kind (modules, then classes, then interfaces), each
/// group in source order.
pub fn extract(text: &str, file_name: &str) -> Vec<Declaration> {
    let mut declarations = Vec::new();
    for kind in DeclarationKind::ALL {
        for caps in pattern_for(kind).captures_iter(text) {
            let (Some(header), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            // The match may open with blank lines; skip them to reach the keyword.
            let matched = header.as_str();
            let keyword_at = header.start() + (matched.len() - matched.trim_start().len());
            declarations.push(Declaration {
                kind,
                name: name.as_str().to_string(),
                defining_file: file_name.to_string(),
                line: line_of(text, keyword_at),
            });
        }
    }
    declarations
}

/// Read `path` and extract its declarations. An unreadable file yields an
/// empty list.
pub fn extract_file(path: &Path, file_name: &str) -> Vec<Declaration> {
    match read_text(path) {
        Ok(text) => extract(&text, file_name),
        Err(e) => {
            tracing::debug!(file = %path.display(), error = %e, "no declarations: unreadable");
            Vec::new()
        }
    }
}

fn line_of(text: &str, offset: usize) -> usize {
    text.as_bytes()[..offset].iter().filter(|&&b| b == b'\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_one_of_each() {
        let source = "module foo;\n  class Bar;\n\tinterface Baz;\n";
        let decls = extract(source, "mixed.sv");

        assert_eq!(decls.len(), 3);
        assert_eq!((decls[0].kind, decls[0].name.as_str()), (DeclarationKind::Module, "foo"));
        assert_eq!((decls[1].kind, decls[1].name.as_str()), (DeclarationKind::Class, "Bar"));
        assert_eq!(
            (decls[2].kind, decls[2].name.as_str()),
            (DeclarationKind::Interface, "Baz")
        );
        assert!(decls.iter().all(|d| d.defining_file == "mixed.sv"));
        assert_eq!(decls.iter().map(|d| d.line).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_extract_grouped_by_kind() {
        let source = r#"
class seq_item extends uvm_sequence_item;
endclass

module fifo #(parameter DEPTH = 8) (
  input clk
);
endmodule

interface fifo_if(input clk);
endinterface

module fifo_wrapper;
endmodule
"#;
        let names: Vec<_> = extract(source, "f.sv").into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["fifo", "fifo_wrapper", "seq_item", "fifo_if"]);
    }

    #[test]
    fn test_keyword_must_start_line() {
        let source = "endmodule\n  assign x = module_y;\nvirtual class Base;\n// module commented\n";
        assert!(extract(source, "a.sv").is_empty());
    }

    #[test]
    fn test_comment_at_line_start_is_not_skipped() {
        // Lexical matching: a header inside a block comment still counts.
        let source = "/*\nmodule ghost;\n*/\n";
        let decls = extract(source, "ghost.sv");
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].name, "ghost");
        assert_eq!(decls[0].line, 2);
    }

    #[test]
    fn test_line_is_that_of_the_keyword() {
        let decls = extract("module\n  split_name;\n", "split.sv");
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].name, "split_name");
        assert_eq!(decls[0].line, 1);

        let decls = extract("\n\n   \n  class late;\n", "late.sv");
        assert_eq!(decls[0].line, 4);
    }

    #[test]
    fn test_keyword_prefix_is_not_a_header() {
        assert!(extract("modules foo\nclassy Bar\n", "a.sv").is_empty());
    }

    #[test]
    fn test_extract_empty() {
        assert!(extract("", "empty.sv").is_empty());
    }

    #[test]
    fn test_extract_file_unreadable() {
        let decls = extract_file(Path::new("/definitely/not/here.sv"), "here.sv");
        assert!(decls.is_empty());
    }
}
