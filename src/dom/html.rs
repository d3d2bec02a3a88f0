use super::{Document, NodeId, NodeKind, Selector};
use scraper::{ElementRef, Html};

const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// Attribute carrying the arena index through a `scraper` parse.
const NODE_KEY: &str = "data-arena-node";

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn escape_attribute(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

impl Document {
    /// Builds a document whose root holds the nodes parsed from `markup`.
    /// Comments and doctypes are dropped.
    pub fn parse_fragment(markup: &str) -> Self {
        let fragment = Html::parse_fragment(markup);
        let mut doc = Document::new();
        let root = doc.root();
        doc.import_children(root, fragment.root_element());
        doc
    }

    fn import_children(&mut self, parent: NodeId, source: ElementRef<'_>) {
        for child in source.children() {
            if let Some(element) = ElementRef::wrap(child) {
                let id = self.create_element(element.value().name());
                for (name, value) in element.value().attrs() {
                    self.set_attribute(id, name, value);
                }
                self.append_child(parent, id);
                self.import_children(id, element);
            } else if let Some(text) = child.value().as_text() {
                let id = self.create_text(text);
                self.append_child(parent, id);
            }
        }
    }

    /// Serializes the children of `id`.
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(id) {
            self.write_html(*child, &mut out, false);
        }
        out
    }

    /// First descendant of `scope` (not `scope` itself) matching `selector`,
    /// in document order.
    pub fn query_selector(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.query_selector_all(scope, selector).into_iter().next()
    }

    /// All descendants of `scope` matching `selector`, in document order.
    ///
    /// The subtree is serialized with each node's arena index, parsed by
    /// `scraper`, and matched there; matches map back through the index.
    pub fn query_selector_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        let mut markup = String::new();
        self.write_html(scope, &mut markup, true);

        let snapshot = Html::parse_fragment(&markup);
        let matches = snapshot
            .select(selector.compiled())
            .filter_map(|element| element.value().attr(NODE_KEY))
            .filter_map(|key| key.parse::<usize>().ok())
            .map(NodeId)
            .filter(|id| *id != scope && self.is_element(*id))
            .collect();
        matches
    }

    fn write_html(&self, id: NodeId, out: &mut String, keyed: bool) {
        match &self.nodes[id.0].kind {
            NodeKind::Text(text) => escape_text(text, out),
            NodeKind::Element { tag, attributes } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attributes {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    escape_attribute(value, out);
                    out.push('"');
                }
                if keyed {
                    out.push_str(&format!(" {}=\"{}\"", NODE_KEY, id.0));
                }
                out.push('>');

                if VOID_ELEMENTS.contains(&tag.as_str()) {
                    return;
                }

                for child in &self.nodes[id.0].children {
                    self.write_html(*child, out, keyed);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}
