//! # Option Sources
//!
//! Loads a menu's declarative content from a file.
//!
//! ## Markup
//!
//! ```html
//! <option value="a">Apple</option>
//! <option value="b" selected>Banana</option>
//! <option disabled>Cherry (sold out)</option>
//! <span slot="option" data-value="{{value}}">· {{label}}</span>
//! <span slot="decrement">▲ previous</span>
//! ```
//!
//! `<option>` elements become option descriptors, top-level elements with a
//! `slot` attribute become projected content. Everything else is kept as
//! inert content.
//!
//! ## JSON
//!
//! Either a bare array of descriptors or an object:
//!
//! ```json
//! {
//!   "options": [{ "label": "Apple", "value": "a" }],
//!   "slots": { "option": "<span>{{label}}</span>" }
//! }
//! ```

use crate::error::{MenuError, Result};
use crate::menu::option::OptionDescriptor;
use crate::menu::template::{Element, Node, SLOT_ATTRIBUTE};
use crate::mutation::{LightNode, LightTree};
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Elements that never have children.
const VOID_TAGS: [&str; 6] = ["br", "hr", "img", "input", "meta", "link"];

/// Compiled tokenizer for the markup source form.
struct MarkupParser {
    token: Regex,
    attribute: Regex,
}

impl MarkupParser {
    fn new() -> Result<Self> {
        Ok(Self {
            token: Regex::new(r"(?s)<!--.*?-->|<(/?)([a-zA-Z][\w-]*)([^>]*)>|([^<]+)")?,
            attribute: Regex::new(
                r#"([a-zA-Z_:][\w:.-]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>/]+)))?"#,
            )?,
        })
    }

    fn parse_attributes(&self, raw: &str) -> Vec<(String, String)> {
        self.attribute
            .captures_iter(raw)
            .map(|caps| {
                let value = caps
                    .get(2)
                    .or_else(|| caps.get(3))
                    .or_else(|| caps.get(4))
                    .map_or("", |m| m.as_str());
                (caps[1].to_lowercase(), value.to_string())
            })
            .collect()
    }

    fn parse_fragment(&self, input: &str) -> Vec<Node> {
        // stack of open elements; index 0 collects top-level nodes
        let mut stack: Vec<Element> = vec![Element::new("#fragment")];

        for caps in self.token.captures_iter(input) {
            if let Some(text) = caps.get(4) {
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::text(text.as_str()));
                }
                continue;
            }
            let Some(tag) = caps.get(2) else {
                continue; // comment
            };

            let tag = tag.as_str().to_lowercase();
            let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
            let raw_attributes = caps.get(3).map_or("", |m| m.as_str());

            if closing {
                if let Some(depth) = stack.iter().skip(1).rposition(|e| e.tag == tag) {
                    // rposition over the skipped iterator is relative to index 1
                    while stack.len() > depth + 1 {
                        close_top(&mut stack);
                    }
                }
                continue;
            }

            let element = Element {
                tag: tag.clone(),
                attributes: self.parse_attributes(raw_attributes.trim_end_matches('/')),
                children: Vec::new(),
            };
            let self_closing =
                raw_attributes.trim_end().ends_with('/') || VOID_TAGS.contains(&tag.as_str());
            if self_closing {
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::Element(element));
                }
            } else {
                stack.push(element);
            }
        }

        while stack.len() > 1 {
            close_top(&mut stack);
        }
        stack.pop().map(|root| root.children).unwrap_or_default()
    }
}

/// Parse a markup fragment into nodes. Unclosed elements are closed at the
/// end of input; stray closing tags are ignored.
pub fn parse_fragment(input: &str) -> Result<Vec<Node>> {
    Ok(MarkupParser::new()?.parse_fragment(input))
}

fn close_top(stack: &mut Vec<Element>) {
    if let Some(element) = stack.pop() {
        if let Some(parent) = stack.last_mut() {
            parent.children.push(Node::Element(element));
        }
    }
}

fn descriptor_from_element(element: &Element) -> OptionDescriptor {
    OptionDescriptor {
        text: Node::Element(element.clone()).text_content(),
        value: element.attribute("value").map(str::to_string),
        disabled: element.has_attribute("disabled"),
        selected: element.has_attribute("selected"),
    }
}

fn light_node(node: Node) -> LightNode {
    match node {
        Node::Text(text) => LightNode::Text(text),
        Node::Element(element) if element.tag == "option" => {
            LightNode::Option(descriptor_from_element(&element))
        }
        Node::Element(element) => match element.attribute(SLOT_ATTRIBUTE) {
            Some(slot) => LightNode::Slotted {
                slot: slot.to_string(),
                content: Node::Element(element.clone()),
            },
            None => LightNode::Other(element.tag),
        },
    }
}

/// Build light content from markup.
pub fn parse_markup(input: &str) -> Result<LightTree> {
    let nodes = parse_fragment(input)?;
    Ok(LightTree::from_nodes(nodes.into_iter().map(light_node).collect()))
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonSource {
    Options(Vec<OptionDescriptor>),
    Document {
        #[serde(default)]
        options: Vec<OptionDescriptor>,
        #[serde(default)]
        slots: BTreeMap<String, String>,
    },
}

/// Build light content from JSON.
pub fn parse_json(input: &str) -> Result<LightTree> {
    let source: JsonSource = serde_json::from_str(input)?;
    let (options, slots) = match source {
        JsonSource::Options(options) => (options, BTreeMap::new()),
        JsonSource::Document { options, slots } => (options, slots),
    };

    let parser = MarkupParser::new()?;
    let mut nodes: Vec<LightNode> = options.into_iter().map(LightNode::Option).collect();
    for (slot, markup) in slots {
        let mut children = parser.parse_fragment(&markup);
        let content = match (children.len(), children.first()) {
            (1, Some(Node::Element(_))) => children.remove(0),
            _ => Node::Element(Element {
                tag: "span".to_string(),
                attributes: Vec::new(),
                children,
            }),
        };
        nodes.push(LightNode::Slotted { slot, content });
    }

    Ok(LightTree::from_nodes(nodes))
}

/// Load light content from a `.json` file or a markup file.
pub fn load(path: &Path) -> Result<LightTree> {
    let contents = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let tree = if is_json {
        parse_json(&contents).map_err(|e| MenuError::Source {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
    } else {
        parse_markup(&contents)?
    };

    tracing::debug!(
        path = %path.display(),
        options = tree.option_count(),
        "loaded option source"
    );
    Ok(tree)
}

/// Light content with one option per line of `labels`.
pub fn from_labels<I, S>(labels: I) -> LightTree
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    LightTree::from_nodes(
        labels
            .into_iter()
            .map(|label| LightNode::Option(OptionDescriptor::new(label)))
            .collect(),
    )
}
