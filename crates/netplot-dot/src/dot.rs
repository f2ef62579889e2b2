//! DOT format utilities for graph rendering.

use std::borrow::Cow;
use std::fmt::Write;

/// Escape special characters for DOT strings. Newlines become `\n` escapes.
pub fn escape_label(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Write indentation to output.
pub fn write_indent(output: &mut String, level: usize) {
    for _ in 0..level {
        output.push_str("  ");
    }
}

/// An attribute value, written bare (`style=dotted`) or quoted (`fillcolor="pink"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue<'a> {
    Id(&'static str),
    Text(Cow<'a, str>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr<'a> {
    pub key: &'static str,
    pub value: AttrValue<'a>,
}

impl<'a> Attr<'a> {
    /// Bare keyword value.
    pub fn id(key: &'static str, value: &'static str) -> Self {
        Self {
            key,
            value: AttrValue::Id(value),
        }
    }

    /// Quoted, escaped value.
    pub fn text(key: &'static str, value: impl Into<Cow<'a, str>>) -> Self {
        Self {
            key,
            value: AttrValue::Text(value.into()),
        }
    }
}

fn write_attr(output: &mut String, attr: &Attr<'_>) {
    match &attr.value {
        AttrValue::Id(value) => {
            let _ = write!(output, "{}={}", attr.key, value);
        }
        AttrValue::Text(value) => {
            let _ = write!(output, "{}=\"{}\"", attr.key, escape_label(value));
        }
    }
}

fn write_attr_list(output: &mut String, attrs: &[Attr<'_>]) {
    output.push('[');
    for (i, attr) in attrs.iter().enumerate() {
        if i > 0 {
            output.push_str(", ");
        }
        write_attr(output, attr);
    }
    output.push(']');
}

/// A DOT graph builder for constructing valid DOT output.
pub struct DotBuilder {
    output: String,
    indent: usize,
}

impl DotBuilder {
    /// Open an anonymous digraph, preceded by a `//` comment line.
    pub fn new(comment: &str) -> Self {
        let mut output = String::with_capacity(4096);
        let _ = writeln!(output, "// {comment}");
        output.push_str("digraph {\n");
        Self { output, indent: 1 }
    }

    /// Add a graph (or cluster) attribute.
    pub fn attr(&mut self, attr: Attr<'_>) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        write_attr(&mut self.output, &attr);
        self.output.push_str(";\n");
        self
    }

    /// Add a node style default.
    pub fn node_style(&mut self, attrs: &[Attr<'_>]) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        self.output.push_str("node ");
        write_attr_list(&mut self.output, attrs);
        self.output.push_str(";\n");
        self
    }

    /// Add a node with attributes.
    pub fn node(&mut self, id: &str, attrs: &[Attr<'_>]) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = write!(self.output, "\"{}\" ", escape_label(id));
        write_attr_list(&mut self.output, attrs);
        self.output.push_str(";\n");
        self
    }

    /// Add an edge with attributes.
    pub fn edge(&mut self, from: &str, to: &str, attrs: &[Attr<'_>]) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = write!(
            self.output,
            "\"{}\" -> \"{}\"",
            escape_label(from),
            escape_label(to)
        );
        if !attrs.is_empty() {
            self.output.push(' ');
            write_attr_list(&mut self.output, attrs);
        }
        self.output.push_str(";\n");
        self
    }

    /// Start a subgraph cluster. Cluster labels are black so a red graph
    /// label does not bleed into them.
    pub fn start_cluster(&mut self, id: &str, label: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "subgraph \"cluster/{}\" {{", escape_label(id));
        self.indent += 1;
        self.attr(Attr::text("label", label));
        self.attr(Attr::text("fontcolor", "black"));
        self
    }

    /// End the current subgraph cluster.
    pub fn end_cluster(&mut self) -> &mut Self {
        self.indent -= 1;
        write_indent(&mut self.output, self.indent);
        self.output.push_str("}\n");
        self
    }

    /// Finish building and return the DOT string.
    pub fn build(mut self) -> String {
        self.output.push_str("}\n");
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_label() {
        assert_eq!(escape_label("eth0"), "eth0");
        assert_eq!(escape_label("a \"b\""), "a \\\"b\\\"");
        assert_eq!(escape_label("eth0\nMTU 9000"), "eth0\\nMTU 9000");
        assert_eq!(escape_label("c:\\x"), "c:\\\\x");
    }

    #[test]
    fn test_attr_spelling() {
        let mut b = DotBuilder::new("test");
        b.node(
            "if1",
            &[
                Attr::text("label", "eth0"),
                Attr::id("style", "filled"),
                Attr::text("fillcolor", "pink"),
            ],
        );
        b.edge("if1", "if2", &[Attr::id("dir", "none")]);
        b.edge("if2", "if3", &[]);
        let out = b.build();
        assert!(out.contains("\"if1\" [label=\"eth0\", style=filled, fillcolor=\"pink\"];"));
        assert!(out.contains("\"if1\" -> \"if2\" [dir=none];"));
        assert!(out.contains("\"if2\" -> \"if3\";"));
    }

    #[test]
    fn test_cluster_nesting() {
        let mut b = DotBuilder::new("test");
        b.start_cluster("ns1", "blue");
        b.node("if0", &[Attr::text("label", "lo")]);
        b.end_cluster();
        let out = b.build();
        assert_eq!(
            out,
            "// test\ndigraph {\n  subgraph \"cluster/ns1\" {\n    label=\"blue\";\n    fontcolor=\"black\";\n    \"if0\" [label=\"lo\"];\n  }\n}\n"
        );
    }
}
