//! Collapses a syntax tree to plain text.
//!
//! Strings pass through; lists concatenate; list-flavored nodes emit one
//! line per item; headings double-space and may be transformed by a
//! callback; table rows and cells emit line and tab separators; comments
//! vanish. A small allowlist of templates contributes text (language and
//! pronunciation wrappers whose argument is readable prose); everything
//! else renders as nothing.

use crate::{
    ast::{Attributes, ListItem, Node, Parameters},
    visit::Visitor,
};
use core::fmt::{self};
use std::sync::LazyLock;

/// Options for [`ast_to_text`].
#[derive(Clone, Copy, Default)]
pub struct TextOptions<'a> {
    /// Applied to each heading's extracted text before it is emitted.
    pub heading: Option<&'a dyn Fn(u8, &str) -> String>,
}

impl fmt::Debug for TextOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextOptions")
            .field("heading", &self.heading.map(|_| "..."))
            .finish()
    }
}

/// Collapses `\n<whitespace>\n` runs into `\n\n`.
static BLANK_RUNS: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"\n\s*\n").unwrap());

/// Collapses a syntax tree to plain text.
pub fn ast_to_text(nodes: &[Node], options: &TextOptions<'_>) -> String {
    let mut out = String::new();
    let mut extractor = TextExtractor {
        out: &mut out,
        options,
    };
    // Writing into a String cannot fail.
    let _ = extractor.visit_nodes(nodes);
    BLANK_RUNS.replace_all(&out, "\n\n").into_owned()
}

/// Extracts a node list's text with default options.
fn extract(nodes: &[Node]) -> String {
    ast_to_text(nodes, &TextOptions::default())
}

/// Extracts the text a template contributes, per the allowlist.
fn template_text(name: &str, parameters: &Parameters, positional: &[Vec<Node>]) -> String {
    match name {
        "zh" | "lang-zh" => ["c", "t", "s", "p"]
            .iter()
            .find_map(|key| parameters.get(*key))
            .map(|value| extract(value))
            .unwrap_or_default(),
        "bibleverse" => positional
            .iter()
            .map(|value| extract(value))
            .collect::<Vec<_>>()
            .join(" "),
        "audio" | "audio-nohelp" | "lang" if positional.len() >= 2 => extract(&positional[1]),
        "iast" | "korean" | "ipa" => positional.first().map(|value| extract(value)).unwrap_or_default(),
        name if name.starts_with("lang-")
            || name.starts_with("ipa-")
            || name.starts_with("ipac-") =>
        {
            positional.first().map(|value| extract(value)).unwrap_or_default()
        }
        _ => String::new(),
    }
}

/// Extracts all text from a syntax tree.
struct TextExtractor<'a, W>
where
    W: fmt::Write,
{
    /// The accumulated text.
    out: W,
    /// The extraction options.
    options: &'a TextOptions<'a>,
}

impl<W> Visitor<fmt::Error> for TextExtractor<'_, W>
where
    W: fmt::Write,
{
    fn visit_text(&mut self, text: &str) -> fmt::Result {
        self.out.write_str(text)
    }

    fn visit_heading(&mut self, level: u8, content: &[Node]) -> fmt::Result {
        let text = extract(content);
        match self.options.heading {
            Some(heading) => self.out.write_str(&heading(level, &text))?,
            None => self.out.write_str(&text)?,
        }
        self.out.write_str("\n\n")
    }

    fn visit_items(&mut self, items: &[ListItem]) -> fmt::Result {
        for item in items {
            self.visit_nodes(&item.content)?;
            self.out.write_char('\n')?;
        }
        Ok(())
    }

    fn visit_description(&mut self, _title: &[Node], content: &[Node]) -> fmt::Result {
        self.visit_nodes(content)
    }

    fn visit_comment(&mut self, _content: &[Node]) -> fmt::Result {
        Ok(())
    }

    fn visit_table(
        &mut self,
        _attributes: &Attributes,
        _caption: &[Node],
        content: &[Node],
    ) -> fmt::Result {
        self.visit_nodes(content)
    }

    fn visit_table_row(
        &mut self,
        _attributes: &Attributes,
        content: &[Node],
        _comments: &[Node],
    ) -> fmt::Result {
        self.visit_nodes(content)?;
        self.out.write_char('\n')
    }

    fn visit_table_cell(
        &mut self,
        _header: bool,
        _attributes: &Attributes,
        content: &[Node],
    ) -> fmt::Result {
        self.visit_nodes(content)?;
        self.out.write_char('\t')
    }

    fn visit_template(
        &mut self,
        name: &str,
        parameters: &Parameters,
        positional_parameters: &[Vec<Node>],
    ) -> fmt::Result {
        self.out
            .write_str(&template_text(name, parameters, positional_parameters))
    }

    fn visit_gallery(&mut self, _attributes: &Attributes, items: &[Node]) -> fmt::Result {
        for item in items {
            self.visit_node(item)?;
            self.out.write_char('\n')?;
        }
        Ok(())
    }
}
