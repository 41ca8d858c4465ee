//! Syntax tree shapes.
//!
//! The tree is a pure tree: nodes own their strings and hold no references
//! back into the input. Plaintext runs are bare strings in the serialized
//! form, so [`Node`] implements [`serde::Serialize`] by hand instead of
//! deriving a uniformly tagged representation.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};

/// An insertion-ordered tag or table attribute map.
pub type Attributes = IndexMap<String, AttributeValue>;

/// An insertion-ordered named-parameter map.
pub type Parameters = IndexMap<String, Vec<Node>>;

/// A tag or table attribute value.
///
/// ```wikitext
/// {| class="wikitable" sortable
///    ^^^^^^^^^^^^^^^^^ ^^^^^^^^
///          Text          Flag
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AttributeValue {
    /// A bare attribute with no value; serializes as `true`.
    Flag,
    /// A quoted or bare attribute value.
    Text(String),
}

impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Flag => serializer.serialize_bool(true),
            Self::Text(text) => serializer.serialize_str(text),
        }
    }
}

/// One entry of a list-flavored node (`unorderedList`, `orderedList`,
/// `indent`).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ListItem {
    /// Nesting depth, counted from the run of leading markers.
    pub level: usize,
    /// The item body.
    pub content: Vec<Node>,
}

impl Serialize for ListItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut item = serializer.serialize_struct("ListItem", 2)?;
        item.serialize_field("level", &self.level)?;
        item.serialize_field("content", &self.content)?;
        item.end()
    }
}

/// The flavor of an extension tag whose content admits no wiki markup.
///
/// These produce structurally identical nodes which differ only in their
/// serialized `type`, so a single variant carries the flavor, the same way
/// a tag name distinguishes extension tokens from one another.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExtensionKind {
    /// `<ref>`
    Ref,
    /// `<nowiki>`
    Nowiki,
    /// `<pre>`
    Pre,
    /// `<code>`
    Code,
    /// `<source>`
    Source,
    /// `<syntaxhighlight>`
    SyntaxHighlight,
    /// `<math>`
    Math,
}

impl ExtensionKind {
    /// The tag name, which doubles as the serialized `type`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Ref => "ref",
            Self::Nowiki => "nowiki",
            Self::Pre => "pre",
            Self::Code => "code",
            Self::Source => "source",
            Self::SyntaxHighlight => "syntaxhighlight",
            Self::Math => "math",
        }
    }
}

/// A wikitext syntax tree node.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Node {
    /// A run of plain text. Serializes as a bare string.
    Text(String),
    /// Italic text.
    ///
    /// ```wikitext
    /// ''italic''
    /// ```
    Italics {
        /// The formatted content.
        content: Vec<Node>,
    },
    /// Bold text.
    ///
    /// ```wikitext
    /// '''bold'''
    /// ```
    Bold {
        /// The formatted content.
        content: Vec<Node>,
    },
    /// Bold italic text.
    ///
    /// ```wikitext
    /// '''''bold italic'''''
    /// ```
    BoldItalics {
        /// The formatted content.
        content: Vec<Node>,
    },
    /// An internal link.
    ///
    /// ```wikitext
    /// [[Page#Anchor|label]]
    /// ```
    Link {
        /// The target page, excluding any anchor.
        to: String,
        /// The anchor, when the target carried a `#` fragment.
        anchor: Option<String>,
        /// The display content: the final positional parameter when one was
        /// given, otherwise the target itself. The link trail is appended
        /// here.
        content: Vec<Node>,
        /// `key=value` parameters.
        parameters: Parameters,
        /// Positional and numeric-keyed parameters, zero-indexed.
        positional_parameters: Vec<Vec<Node>>,
        /// Set for colon-prefixed links (`[[:Category:X]]`), which render as
        /// links instead of declaring category membership.
        plain: bool,
    },
    /// An external link.
    ///
    /// ```wikitext
    /// [https://example.org label]
    /// ```
    ExternalLink {
        /// The link target.
        uri: String,
        /// The label content; empty when the link had none.
        content: Vec<Node>,
    },
    /// A template transclusion.
    ///
    /// ```wikitext
    /// {{name|positional|key=value}}
    /// ```
    Template {
        /// The template name, trimmed and lowercased.
        name: String,
        /// `key=value` parameters.
        parameters: Parameters,
        /// Positional and numeric-keyed parameters, zero-indexed.
        positional_parameters: Vec<Vec<Node>>,
    },
    /// A heading.
    ///
    /// ```wikitext
    /// == Section ==
    /// ```
    Heading {
        /// The outline level, 1 through 6.
        level: u8,
        /// The heading content.
        content: Vec<Node>,
    },
    /// An unordered list (`*` lines).
    UnorderedList {
        /// The list items, one per marker line.
        items: Vec<ListItem>,
    },
    /// An ordered list (`#` lines).
    OrderedList {
        /// The list items, one per marker line.
        items: Vec<ListItem>,
    },
    /// An indent block (`:` lines).
    Indent {
        /// The indented items, one per marker line.
        items: Vec<ListItem>,
    },
    /// A description list line.
    ///
    /// ```wikitext
    /// ; term : detail
    /// ```
    Description {
        /// The term.
        title: Vec<Node>,
        /// The detail following the colon, if any.
        content: Vec<Node>,
    },
    /// A space-indented preformatted block. Accumulates across consecutive
    /// space-prefixed lines.
    Preformatted {
        /// The block content, with a `"\n"` after each source line.
        content: Vec<Node>,
    },
    /// A horizontal rule (`----`).
    HorizontalRule,
    /// A `<br>` tag.
    LineBreak,
    /// An HTML comment. The content is always plain strings, trimmed of
    /// surrounding whitespace and dashes.
    Comment {
        /// The comment text, if any survived trimming.
        content: Vec<Node>,
    },
    /// A table.
    ///
    /// ```wikitext
    /// {| class="wikitable"
    /// |+ caption
    /// |-
    /// ! a !! b
    /// |}
    /// ```
    Table {
        /// Attributes from the `{|` line.
        attributes: Attributes,
        /// The `|+` caption, trimmed.
        caption: Vec<Node>,
        /// The rows, each a [`Node::TableRow`].
        content: Vec<Node>,
    },
    /// A table row.
    TableRow {
        /// Attributes from the `|-` line.
        attributes: Attributes,
        /// The cells, each a [`Node::TableCell`].
        content: Vec<Node>,
        /// Comments that appeared on their own lines before this row.
        comments: Vec<Node>,
    },
    /// A table cell.
    TableCell {
        /// True for `!` header cells.
        header: bool,
        /// Cell attributes, from the `attributes|content` form.
        attributes: Attributes,
        /// The cell content, trimmed.
        content: Vec<Node>,
    },
    /// A generic HTML-like tag.
    Tag {
        /// The tag name, lowercased.
        name: String,
        /// The tag attributes.
        attributes: Attributes,
        /// The tag content; absent for self-closing tags.
        content: Option<Vec<Node>>,
        /// True for `<name/>` forms.
        self_closing: bool,
    },
    /// An extension tag whose content admits no wiki markup (`<ref>`,
    /// `<nowiki>`, `<pre>`, `<code>`, `<source>`, `<syntaxhighlight>`,
    /// `<math>`).
    Extension {
        /// Which extension tag this is.
        kind: ExtensionKind,
        /// The tag attributes.
        attributes: Attributes,
        /// The raw content.
        content: Vec<Node>,
    },
    /// A `<gallery>` tag.
    Gallery {
        /// The tag attributes.
        attributes: Attributes,
        /// One [`Node::Link`] per non-empty `target[|caption]` line.
        items: Vec<Node>,
    },
}

impl Node {
    /// A plaintext node.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// The primary child list of this node, when it has one.
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Self::Italics { content }
            | Self::Bold { content }
            | Self::BoldItalics { content }
            | Self::Link { content, .. }
            | Self::ExternalLink { content, .. }
            | Self::Heading { content, .. }
            | Self::Description { content, .. }
            | Self::Preformatted { content }
            | Self::Comment { content }
            | Self::Table { content, .. }
            | Self::TableRow { content, .. }
            | Self::TableCell { content, .. }
            | Self::Extension { content, .. } => Some(content),
            Self::Tag { content, .. } => content.as_deref(),
            Self::Gallery { items, .. } => Some(items),
            _ => None,
        }
    }
}

impl Serialize for Node {
    // Clippy: One arm per variant; splitting it up would only scatter the
    // field names away from the contract table.
    #[allow(clippy::too_many_lines)]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Italics { content } => tagged(serializer, "italics", content),
            Self::Bold { content } => tagged(serializer, "bold", content),
            Self::BoldItalics { content } => tagged(serializer, "boldItalics", content),
            Self::Link {
                to,
                anchor,
                content,
                parameters,
                positional_parameters,
                plain,
            } => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", "link")?;
                map.serialize_entry("to", to)?;
                if let Some(anchor) = anchor {
                    map.serialize_entry("anchor", anchor)?;
                }
                map.serialize_entry("content", content)?;
                if !parameters.is_empty() {
                    map.serialize_entry("parameters", parameters)?;
                }
                if !positional_parameters.is_empty() {
                    map.serialize_entry("positionalParameters", positional_parameters)?;
                }
                if *plain {
                    map.serialize_entry("plain", &true)?;
                }
                map.end()
            }
            Self::ExternalLink { uri, content } => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", "externalLink")?;
                map.serialize_entry("uri", uri)?;
                map.serialize_entry("content", content)?;
                map.end()
            }
            Self::Template {
                name,
                parameters,
                positional_parameters,
            } => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", "template")?;
                map.serialize_entry("name", name)?;
                map.serialize_entry("parameters", parameters)?;
                map.serialize_entry("positionalParameters", positional_parameters)?;
                map.end()
            }
            Self::Heading { level, content } => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", "heading")?;
                map.serialize_entry("level", level)?;
                map.serialize_entry("content", content)?;
                map.end()
            }
            Self::UnorderedList { items } => items_node(serializer, "unorderedList", items),
            Self::OrderedList { items } => items_node(serializer, "orderedList", items),
            Self::Indent { items } => items_node(serializer, "indent", items),
            Self::Description { title, content } => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", "description")?;
                map.serialize_entry("title", title)?;
                map.serialize_entry("content", content)?;
                map.end()
            }
            Self::Preformatted { content } => tagged(serializer, "preformatted", content),
            Self::HorizontalRule => tagged(serializer, "horizontalRule", &[]),
            Self::LineBreak => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", "lineBreak")?;
                map.end()
            }
            Self::Comment { content } => tagged(serializer, "comment", content),
            Self::Table {
                attributes,
                caption,
                content,
            } => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", "table")?;
                map.serialize_entry("attributes", attributes)?;
                map.serialize_entry("caption", caption)?;
                map.serialize_entry("content", content)?;
                map.end()
            }
            Self::TableRow {
                attributes,
                content,
                comments,
            } => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", "table-row")?;
                map.serialize_entry("attributes", attributes)?;
                map.serialize_entry("content", content)?;
                if !comments.is_empty() {
                    map.serialize_entry("comments", comments)?;
                }
                map.end()
            }
            Self::TableCell {
                header,
                attributes,
                content,
            } => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", "table-cell")?;
                map.serialize_entry("header", header)?;
                map.serialize_entry("attributes", attributes)?;
                map.serialize_entry("content", content)?;
                map.end()
            }
            Self::Tag {
                name,
                attributes,
                content,
                self_closing,
            } => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", "tag")?;
                map.serialize_entry("name", name)?;
                map.serialize_entry("attributes", attributes)?;
                if let Some(content) = content {
                    map.serialize_entry("content", content)?;
                }
                if *self_closing {
                    map.serialize_entry("selfClosing", &true)?;
                }
                map.end()
            }
            Self::Extension {
                kind,
                attributes,
                content,
            } => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", kind.name())?;
                map.serialize_entry("attributes", attributes)?;
                map.serialize_entry("content", content)?;
                map.end()
            }
            Self::Gallery { attributes, items } => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", "gallery")?;
                map.serialize_entry("attributes", attributes)?;
                map.serialize_entry("items", items)?;
                map.end()
            }
        }
    }
}

/// Serializes a `{type, content}` node.
fn tagged<S: Serializer>(serializer: S, kind: &str, content: &[Node]) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(None)?;
    map.serialize_entry("type", kind)?;
    map.serialize_entry("content", content)?;
    map.end()
}

/// Serializes a `{type, items}` node.
fn items_node<S: Serializer>(
    serializer: S,
    kind: &str,
    items: &[ListItem],
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(None)?;
    map.serialize_entry("type", kind)?;
    map.serialize_entry("items", items)?;
    map.end()
}

/// Appends a node to `content`, concatenating adjacent plaintext so that two
/// strings are never neighbors at any list level. Empty strings are never
/// stored.
pub(crate) fn append(content: &mut Vec<Node>, node: Node) {
    match node {
        Node::Text(text) => {
            if text.is_empty() {
                return;
            }
            if let Some(Node::Text(last)) = content.last_mut() {
                last.push_str(&text);
            } else {
                content.push(Node::Text(text));
            }
        }
        node => content.push(node),
    }
}

/// Strips leading whitespace from the first element of `content` if it is a
/// string, and trailing whitespace from the last, pruning strings that become
/// empty.
pub(crate) fn trim(content: &mut Vec<Node>) {
    if let Some(Node::Text(first)) = content.first_mut() {
        let leading = first.len() - first.trim_start().len();
        if leading > 0 {
            first.drain(..leading);
        }
        if first.is_empty() {
            content.remove(0);
        }
    }
    if let Some(Node::Text(last)) = content.last_mut() {
        let kept = last.trim_end().len();
        last.truncate(kept);
        if last.is_empty() {
            content.pop();
        }
    }
}
