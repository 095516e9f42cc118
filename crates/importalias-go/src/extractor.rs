//! Go import extractor using Tree-sitter.

use std::path::Path;
use tree_sitter::{Language, Node, Parser, Tree};

use importalias_core::{ImportObservation, LanguageExtractor, Location, SyntaxError};

/// Extracts import specs from Go source.
///
/// Tree-sitter recovers from syntax errors, but a recovered tree is not
/// accepted here: any error or missing node fails the whole file.
pub struct GoExtractor {
    language: Language,
}

impl GoExtractor {
    /// Creates a new Go extractor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_go::LANGUAGE.into(),
        }
    }

    fn parse(&self, source: &str) -> Result<Tree, SyntaxError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| whole_file_error(format!("cannot load Go grammar: {e}")))?;
        parser
            .parse(source, None)
            .ok_or_else(|| whole_file_error("parser produced no syntax tree".to_owned()))
    }

    fn text<'a>(node: &Node<'_>, src: &'a str) -> &'a str {
        src.get(node.byte_range()).unwrap_or("")
    }

    /// Collects every `import_spec` below `node`, in source order.
    fn collect_specs<'t>(node: Node<'t>, specs: &mut Vec<Node<'t>>) {
        if node.kind() == "import_spec" {
            specs.push(node);
            return;
        }
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            Self::collect_specs(child, specs);
        }
    }

    fn observation(file: &Path, spec: &Node<'_>, src: &str) -> Option<ImportObservation> {
        let path = spec.child_by_field_name("path")?;
        let alias = spec
            .child_by_field_name("name")
            .map(|n| Self::text(&n, src).to_owned());
        let start = spec.start_position();
        Some(ImportObservation::new(
            unquote(Self::text(&path, src)),
            alias,
            Location::new(file, start.row + 1, start.column + 1),
        ))
    }
}

impl Default for GoExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageExtractor for GoExtractor {
    fn language_id(&self) -> &'static str {
        "go"
    }

    fn extract_imports(
        &self,
        file: &Path,
        source: &str,
    ) -> Result<Vec<ImportObservation>, SyntaxError> {
        let tree = self.parse(source)?;
        let root = tree.root_node();

        if let Some(bad) = first_error_node(root) {
            return Err(error_at(&bad, source));
        }

        let mut specs = Vec::new();
        let mut seen_package = false;
        let mut seen_other_decl = false;

        let mut cursor = root.walk();
        for node in root.named_children(&mut cursor) {
            match node.kind() {
                "comment" => {}
                "package_clause" => seen_package = true,
                _ if !seen_package => {
                    return Err(node_error(
                        &node,
                        format!("expected 'package', found '{}'", snippet(&node, source)),
                    ));
                }
                "import_declaration" if seen_other_decl => {
                    return Err(node_error(
                        &node,
                        "expected declaration, found 'import'".to_owned(),
                    ));
                }
                "import_declaration" => Self::collect_specs(node, &mut specs),
                _ => seen_other_decl = true,
            }
        }

        if !seen_package {
            let end = root.end_position();
            return Err(SyntaxError {
                line: end.row + 1,
                column: end.column + 1,
                offset: source.len(),
                length: 0,
                message: "expected 'package', found 'EOF'".to_owned(),
            });
        }

        Ok(specs
            .iter()
            .filter_map(|spec| Self::observation(file, spec, source))
            .collect())
    }
}

/// Strips the quote delimiters of an interpreted or raw string literal.
fn unquote(literal: &str) -> String {
    for delim in ['"', '`'] {
        if let Some(inner) = literal
            .strip_prefix(delim)
            .and_then(|s| s.strip_suffix(delim))
        {
            return inner.to_owned();
        }
    }
    literal.to_owned()
}

/// Depth-first search for the first ERROR or MISSING node.
fn first_error_node(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_error_node(child) {
            return Some(found);
        }
    }
    None
}

fn error_at(node: &Node<'_>, source: &str) -> SyntaxError {
    let message = if node.is_missing() {
        format!("expected '{}'", node.kind())
    } else {
        match snippet(node, source) {
            s if s.is_empty() => "unexpected end of file".to_owned(),
            s => format!("syntax error near '{s}'"),
        }
    };
    node_error(node, message)
}

fn node_error(node: &Node<'_>, message: String) -> SyntaxError {
    let start = node.start_position();
    SyntaxError {
        line: start.row + 1,
        column: start.column + 1,
        offset: node.start_byte(),
        length: node.end_byte() - node.start_byte(),
        message,
    }
}

fn whole_file_error(message: String) -> SyntaxError {
    SyntaxError {
        line: 1,
        column: 1,
        offset: 0,
        length: 0,
        message,
    }
}

/// First line of the node text, capped at 20 characters.
fn snippet(node: &Node<'_>, source: &str) -> String {
    GoExtractor::text(node, source)
        .lines()
        .next()
        .unwrap_or("")
        .trim()
        .chars()
        .take(20)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(src: &str) -> Result<Vec<ImportObservation>, SyntaxError> {
        GoExtractor::new().extract_imports(Path::new("foo.go"), src)
    }

    fn paths(imports: &[ImportObservation]) -> Vec<&str> {
        imports.iter().map(|i| i.path.as_str()).collect()
    }

    #[test]
    fn extracts_single_import() {
        let imports = extract("package foo\n\nimport \"fmt\"\n").unwrap();
        assert_eq!(paths(&imports), ["fmt"]);
        assert_eq!(imports[0].declared_alias, None);
        assert_eq!(imports[0].location, Location::new("foo.go", 3, 8));
    }

    #[test]
    fn extracts_grouped_imports_in_order() {
        let src = "package foo\n\nimport (\n\t\"fmt\"\n\n\tappsv1 \"k8s.io/api/apps/v1\"\n\tmeta \"k8s.io/apimachinery/pkg/apis/meta/v1\"\n)\n";
        let imports = extract(src).unwrap();
        assert_eq!(
            paths(&imports),
            [
                "fmt",
                "k8s.io/api/apps/v1",
                "k8s.io/apimachinery/pkg/apis/meta/v1"
            ]
        );
        assert_eq!(imports[1].declared_alias.as_deref(), Some("appsv1"));
        assert_eq!(imports[1].location, Location::new("foo.go", 6, 2));
        assert_eq!(imports[2].declared_alias.as_deref(), Some("meta"));
    }

    #[test]
    fn multiple_import_declarations() {
        let src = "package foo\nimport \"a\"\nimport (\n\tb \"b\"\n)\nimport c \"c\"\n";
        let imports = extract(src).unwrap();
        assert_eq!(paths(&imports), ["a", "b", "c"]);
        assert_eq!(imports[2].location, Location::new("foo.go", 6, 8));
    }

    #[test]
    fn blank_and_dot_aliases() {
        let src = "package foo\nimport (\n\t_ \"embed\"\n\t. \"strings\"\n)\n";
        let imports = extract(src).unwrap();
        assert_eq!(imports[0].declared_alias.as_deref(), Some("_"));
        assert_eq!(imports[1].declared_alias.as_deref(), Some("."));
    }

    #[test]
    fn raw_string_import_path() {
        let imports = extract("package foo\nimport apps `k8s.io/api/apps/v1`\n").unwrap();
        assert_eq!(paths(&imports), ["k8s.io/api/apps/v1"]);
    }

    #[test]
    fn ignores_non_import_declarations() {
        let src = "package foo\n\nimport \"fmt\"\n\nvar x = \"k8s.io/api/apps/v1\"\n\nfunc main() { fmt.Println(x) }\n";
        let imports = extract(src).unwrap();
        assert_eq!(paths(&imports), ["fmt"]);
    }

    #[test]
    fn no_imports() {
        assert!(extract("package foo\n").unwrap().is_empty());
    }

    #[test]
    fn syntax_error_reported() {
        let err = extract("package foo\n\nimport \"fmt\"\n\nfunc main( {\n").unwrap_err();
        assert!(err.line >= 3, "{err}");
        assert!(!err.message.is_empty());
    }

    #[test]
    fn missing_package_clause() {
        let err = extract("import \"fmt\"\n").unwrap_err();
        assert_eq!(err.line, 1);
        assert!(err.message.starts_with("expected 'package'"), "{err}");
    }

    #[test]
    fn empty_file_is_an_error() {
        let err = extract("").unwrap_err();
        assert_eq!(err.message, "expected 'package', found 'EOF'");
    }

    #[test]
    fn import_after_declaration_is_an_error() {
        let err = extract("package foo\nfunc f() {}\nimport \"fmt\"\n").unwrap_err();
        assert_eq!(err.line, 3);
        assert_eq!(err.message, "expected declaration, found 'import'");
    }

    #[test]
    fn leading_comments_allowed() {
        let src = "// Copyright\n/* block */\npackage foo // trailing\nimport \"fmt\" // why\n";
        assert_eq!(paths(&extract(src).unwrap()), ["fmt"]);
    }
}
