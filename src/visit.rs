//! Helper trait for implementing syntax tree visitors.

use crate::ast::{Attributes, ExtensionKind, ListItem, Node, Parameters};

/// A trait for visiting the nodes of a syntax tree.
///
/// Every method has a default implementation that recurses into the node's
/// children, so an implementation only overrides the shapes it cares about.
pub trait Visitor<E> {
    /// Visits a list of nodes.
    #[inline]
    fn visit_nodes(&mut self, nodes: &[Node]) -> Result<(), E> {
        for node in nodes {
            self.visit_node(node)?;
        }
        Ok(())
    }

    /// Visits one node, dispatching on its variant.
    #[inline]
    fn visit_node(&mut self, node: &Node) -> Result<(), E> {
        walk(self, node)
    }

    /// Visits a plaintext run.
    #[inline]
    fn visit_text(&mut self, _text: &str) -> Result<(), E> {
        Ok(())
    }

    /// Visits a [`Node::Italics`].
    #[inline]
    fn visit_italics(&mut self, content: &[Node]) -> Result<(), E> {
        self.visit_nodes(content)
    }

    /// Visits a [`Node::Bold`].
    #[inline]
    fn visit_bold(&mut self, content: &[Node]) -> Result<(), E> {
        self.visit_nodes(content)
    }

    /// Visits a [`Node::BoldItalics`].
    #[inline]
    fn visit_bold_italics(&mut self, content: &[Node]) -> Result<(), E> {
        self.visit_nodes(content)
    }

    /// Visits a [`Node::Link`].
    #[inline]
    fn visit_link(
        &mut self,
        _to: &str,
        _anchor: Option<&str>,
        content: &[Node],
        _parameters: &Parameters,
        _positional_parameters: &[Vec<Node>],
        _plain: bool,
    ) -> Result<(), E> {
        self.visit_nodes(content)
    }

    /// Visits a [`Node::ExternalLink`].
    #[inline]
    fn visit_external_link(&mut self, _uri: &str, content: &[Node]) -> Result<(), E> {
        self.visit_nodes(content)
    }

    /// Visits a [`Node::Template`]. Templates render nothing by default.
    #[inline]
    fn visit_template(
        &mut self,
        _name: &str,
        _parameters: &Parameters,
        _positional_parameters: &[Vec<Node>],
    ) -> Result<(), E> {
        Ok(())
    }

    /// Visits a [`Node::Heading`].
    #[inline]
    fn visit_heading(&mut self, _level: u8, content: &[Node]) -> Result<(), E> {
        self.visit_nodes(content)
    }

    /// Visits the items of a list-flavored node.
    #[inline]
    fn visit_items(&mut self, items: &[ListItem]) -> Result<(), E> {
        for item in items {
            self.visit_nodes(&item.content)?;
        }
        Ok(())
    }

    /// Visits a [`Node::UnorderedList`].
    #[inline]
    fn visit_unordered_list(&mut self, items: &[ListItem]) -> Result<(), E> {
        self.visit_items(items)
    }

    /// Visits a [`Node::OrderedList`].
    #[inline]
    fn visit_ordered_list(&mut self, items: &[ListItem]) -> Result<(), E> {
        self.visit_items(items)
    }

    /// Visits a [`Node::Indent`].
    #[inline]
    fn visit_indent(&mut self, items: &[ListItem]) -> Result<(), E> {
        self.visit_items(items)
    }

    /// Visits a [`Node::Description`].
    #[inline]
    fn visit_description(&mut self, title: &[Node], content: &[Node]) -> Result<(), E> {
        self.visit_nodes(title)?;
        self.visit_nodes(content)
    }

    /// Visits a [`Node::Preformatted`].
    #[inline]
    fn visit_preformatted(&mut self, content: &[Node]) -> Result<(), E> {
        self.visit_nodes(content)
    }

    /// Visits a [`Node::HorizontalRule`].
    #[inline]
    fn visit_horizontal_rule(&mut self) -> Result<(), E> {
        Ok(())
    }

    /// Visits a [`Node::LineBreak`].
    #[inline]
    fn visit_line_break(&mut self) -> Result<(), E> {
        Ok(())
    }

    /// Visits a [`Node::Comment`].
    #[inline]
    fn visit_comment(&mut self, content: &[Node]) -> Result<(), E> {
        self.visit_nodes(content)
    }

    /// Visits a [`Node::Table`].
    #[inline]
    fn visit_table(
        &mut self,
        _attributes: &Attributes,
        caption: &[Node],
        content: &[Node],
    ) -> Result<(), E> {
        self.visit_nodes(caption)?;
        self.visit_nodes(content)
    }

    /// Visits a [`Node::TableRow`].
    #[inline]
    fn visit_table_row(
        &mut self,
        _attributes: &Attributes,
        content: &[Node],
        _comments: &[Node],
    ) -> Result<(), E> {
        self.visit_nodes(content)
    }

    /// Visits a [`Node::TableCell`].
    #[inline]
    fn visit_table_cell(
        &mut self,
        _header: bool,
        _attributes: &Attributes,
        content: &[Node],
    ) -> Result<(), E> {
        self.visit_nodes(content)
    }

    /// Visits a [`Node::Tag`].
    #[inline]
    fn visit_tag(
        &mut self,
        _name: &str,
        _attributes: &Attributes,
        content: Option<&[Node]>,
        _self_closing: bool,
    ) -> Result<(), E> {
        match content {
            Some(content) => self.visit_nodes(content),
            None => Ok(()),
        }
    }

    /// Visits a [`Node::Extension`].
    #[inline]
    fn visit_extension(
        &mut self,
        _kind: ExtensionKind,
        _attributes: &Attributes,
        content: &[Node],
    ) -> Result<(), E> {
        self.visit_nodes(content)
    }

    /// Visits a [`Node::Gallery`].
    #[inline]
    fn visit_gallery(&mut self, _attributes: &Attributes, items: &[Node]) -> Result<(), E> {
        self.visit_nodes(items)
    }
}

/// Default implementation of [`Visitor::visit_node`].
pub fn walk<V, E>(visitor: &mut V, node: &Node) -> Result<(), E>
where
    V: Visitor<E> + ?Sized,
{
    match node {
        Node::Text(text) => visitor.visit_text(text),
        Node::Italics { content } => visitor.visit_italics(content),
        Node::Bold { content } => visitor.visit_bold(content),
        Node::BoldItalics { content } => visitor.visit_bold_italics(content),
        Node::Link {
            to,
            anchor,
            content,
            parameters,
            positional_parameters,
            plain,
        } => visitor.visit_link(
            to,
            anchor.as_deref(),
            content,
            parameters,
            positional_parameters,
            *plain,
        ),
        Node::ExternalLink { uri, content } => visitor.visit_external_link(uri, content),
        Node::Template {
            name,
            parameters,
            positional_parameters,
        } => visitor.visit_template(name, parameters, positional_parameters),
        Node::Heading { level, content } => visitor.visit_heading(*level, content),
        Node::UnorderedList { items } => visitor.visit_unordered_list(items),
        Node::OrderedList { items } => visitor.visit_ordered_list(items),
        Node::Indent { items } => visitor.visit_indent(items),
        Node::Description { title, content } => visitor.visit_description(title, content),
        Node::Preformatted { content } => visitor.visit_preformatted(content),
        Node::HorizontalRule => visitor.visit_horizontal_rule(),
        Node::LineBreak => visitor.visit_line_break(),
        Node::Comment { content } => visitor.visit_comment(content),
        Node::Table {
            attributes,
            caption,
            content,
        } => visitor.visit_table(attributes, caption, content),
        Node::TableRow {
            attributes,
            content,
            comments,
        } => visitor.visit_table_row(attributes, content, comments),
        Node::TableCell {
            header,
            attributes,
            content,
        } => visitor.visit_table_cell(*header, attributes, content),
        Node::Tag {
            name,
            attributes,
            content,
            self_closing,
        } => visitor.visit_tag(name, attributes, content.as_deref(), *self_closing),
        Node::Extension {
            kind,
            attributes,
            content,
        } => visitor.visit_extension(*kind, attributes, content),
        Node::Gallery { attributes, items } => visitor.visit_gallery(attributes, items),
    }
}
