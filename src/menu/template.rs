//! # Projection Templates
//!
//! Content projected into the `option` slot overrides how each item is
//! presented. The template is cloned once per item and its `{{label}}` and
//! `{{value}}` placeholders are resolved against that item.
//!
//! [`render_template`] is a pure function over a small node tree, so item
//! presentation can be checked against fixed template/binding pairs without
//! any live document.

/// Attribute that routes light content to a named projection point.
pub const SLOT_ATTRIBUTE: &str = "slot";

/// Attribute carrying a styling hook name. Cloned content must not reuse the
/// host's hook names.
pub const PART_ATTRIBUTE: &str = "part";

/// Tag of a projection point inside a template.
pub const SLOT_TAG: &str = "slot";

/// A node of projected or rendered content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn remove_attribute(&mut self, name: &str) {
        self.attributes.retain(|(n, _)| n != name);
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Whether any descendant (or this node) is an element with `tag`.
    pub fn contains_tag(&self, tag: &str) -> bool {
        match self {
            Node::Text(_) => false,
            Node::Element(element) => {
                element.tag == tag || element.children.iter().any(|c| c.contains_tag(tag))
            }
        }
    }
}

/// Values substituted for template placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bindings<'a> {
    pub label: &'a str,
    /// A missing value resolves to the empty string.
    pub value: Option<&'a str>,
}

const LABEL_PLACEHOLDER: &str = "{{label}}";
const VALUE_PLACEHOLDER: &str = "{{value}}";

/// Resolve `{{label}}` and `{{value}}` in a string. Other `{{...}}`
/// sequences are left as they are.
pub fn interpolate(input: &str, bindings: &Bindings<'_>) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        if let Some(after) = tail.strip_prefix(LABEL_PLACEHOLDER) {
            out.push_str(bindings.label);
            rest = after;
        } else if let Some(after) = tail.strip_prefix(VALUE_PLACEHOLDER) {
            out.push_str(bindings.value.unwrap_or_default());
            rest = after;
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }

    out.push_str(rest);
    out
}

/// Clone `template` for one item.
///
/// Placeholders are resolved in text and attribute values, `slot` attributes
/// are removed, nested `<slot>` elements are replaced by their fallback
/// children, and `part` attributes are dropped.
pub fn render_template(template: &Node, bindings: &Bindings<'_>) -> Node {
    let mut out = render_nodes(std::slice::from_ref(template), bindings);
    match out.len() {
        1 => out.remove(0),
        // a bare <slot> root unwraps to zero or several nodes
        _ => Node::Element(Element {
            tag: "span".to_string(),
            attributes: Vec::new(),
            children: out,
        }),
    }
}

fn render_nodes(nodes: &[Node], bindings: &Bindings<'_>) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Node::Text(text) => out.push(Node::Text(interpolate(text, bindings))),
            Node::Element(element) if element.tag == SLOT_TAG => {
                out.extend(render_nodes(&element.children, bindings));
            }
            Node::Element(element) => {
                let attributes = element
                    .attributes
                    .iter()
                    .filter(|(name, _)| name != SLOT_ATTRIBUTE && name != PART_ATTRIBUTE)
                    .map(|(name, value)| (name.clone(), interpolate(value, bindings)))
                    .collect();
                out.push(Node::Element(Element {
                    tag: element.tag.clone(),
                    attributes,
                    children: render_nodes(&element.children, bindings),
                }));
            }
        }
    }
    out
}

/// The per-item presentation used when nothing is projected into `option`.
pub fn default_item_template() -> Node {
    Node::Element(
        Element::new("button")
            .attr("type", "button")
            .child("{{label}}"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projected() -> Node {
        Node::Element(
            Element::new("span")
                .attr("data-value", "{{value}}")
                .attr("slot", "option")
                .child("prefix ")
                .child(Element::new("span").child("{{label}}"))
                .child(" suffix"),
        )
    }

    #[test]
    fn test_interpolates_text_and_attributes() {
        let bindings = Bindings {
            label: "some label 1",
            value: Some("some value 1"),
        };
        let rendered = render_template(&projected(), &bindings);

        let expected = Node::Element(
            Element::new("span")
                .attr("data-value", "some value 1")
                .child("prefix ")
                .child(Element::new("span").child("some label 1"))
                .child(" suffix"),
        );
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_slot_attribute_is_removed() {
        let bindings = Bindings {
            label: "x",
            value: None,
        };
        let rendered = render_template(&projected(), &bindings);
        let element = rendered.as_element().expect("element");
        assert!(!element.has_attribute(SLOT_ATTRIBUTE));
        assert_eq!(element.attribute("data-value"), Some(""));
    }

    #[test]
    fn test_nested_slots_are_unwrapped_and_parts_stripped() {
        let template = Node::Element(
            Element::new("div").child(
                Element::new("slot")
                    .attr("name", "inner")
                    .child(Element::new("b").attr("part", "option").child("{{label}}")),
            ),
        );
        let rendered = render_template(
            &template,
            &Bindings {
                label: "Apple",
                value: Some("apple"),
            },
        );
        assert!(!rendered.contains_tag("slot"));
        let expected = Node::Element(Element::new("div").child(Element::new("b").child("Apple")));
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_default_template_renders_label() {
        let rendered = render_template(
            &default_item_template(),
            &Bindings {
                label: "Banana",
                value: None,
            },
        );
        assert_eq!(rendered.text_content(), "Banana");
        assert_eq!(
            rendered.as_element().and_then(|e| e.attribute("type")),
            Some("button")
        );
    }

    #[test]
    fn test_unknown_placeholders_are_left_alone() {
        let bindings = Bindings {
            label: "L",
            value: Some("V"),
        };
        assert_eq!(
            interpolate("{{label}}/{{value}}/{{other}}", &bindings),
            "L/V/{{other}}"
        );
        assert_eq!(interpolate("{{{label}}}", &bindings), "{L}");
        assert_eq!(interpolate("{{label", &bindings), "{{label");
    }

    #[test]
    fn test_substituted_text_is_not_reinterpolated() {
        let bindings = Bindings {
            label: "{{value}}",
            value: None,
        };
        assert_eq!(interpolate("[{{label}}]", &bindings), "[{{value}}]");
    }
}
