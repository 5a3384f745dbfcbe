//! # Mutation Bridge
//!
//! A menu's declarative content lives in a [`LightTree`]. Edits to the tree
//! are recorded as [`MutationRecord`]s and, while the menu observes its tree,
//! sent over a channel to the [`MutationBridge`]. The bridge coalesces them
//! and hands out a batch only once the stream has been quiet for the debounce
//! window, so the menu never reacts synchronously to an edit.
//!
//! [`classify`] decides what a batch means for the menu:
//!
//! | batch contains                                        | effect        |
//! |-------------------------------------------------------|---------------|
//! | option added/removed under the host                   | `Rebuild`     |
//! | text added/removed inside an option                   | `Rebuild`     |
//! | slotted content added/removed under the host          | `RenderOnly`  |
//! | anything else                                         | `Ignore`      |

use crate::menu::option::OptionDescriptor;
use crate::menu::template::Node;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Quiet period after the last record before a batch is released.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(10);

/// A child of the menu's light tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LightNode {
    Option(OptionDescriptor),
    /// Content routed to a named projection point.
    Slotted { slot: String, content: Node },
    Text(String),
    Other(String),
}

/// Shape of a node, as far as mutation classification cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Option,
    Text,
    Slotted(String),
    Element,
}

impl LightNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            LightNode::Option(_) => NodeKind::Option,
            LightNode::Slotted { slot, .. } => NodeKind::Slotted(slot.clone()),
            LightNode::Text(_) => NodeKind::Text,
            LightNode::Other(_) => NodeKind::Element,
        }
    }
}

/// Where a mutation happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationTarget {
    /// Direct children of the menu.
    Host,
    /// Children of the n-th option node.
    Option(usize),
    /// Some other descendant.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
    pub target: MutationTarget,
    pub added: Vec<NodeKind>,
    pub removed: Vec<NodeKind>,
}

impl MutationRecord {
    pub fn added(target: MutationTarget, kind: NodeKind) -> Self {
        Self {
            target,
            added: vec![kind],
            removed: Vec::new(),
        }
    }

    pub fn removed(target: MutationTarget, kind: NodeKind) -> Self {
        Self {
            target,
            added: Vec::new(),
            removed: vec![kind],
        }
    }

    fn touches(&self, predicate: impl Fn(&NodeKind) -> bool) -> bool {
        self.added.iter().chain(&self.removed).any(predicate)
    }
}

/// What a batch of mutations requires of the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationEffect {
    Rebuild,
    RenderOnly,
    Ignore,
}

pub fn classify(batch: &[MutationRecord]) -> MutationEffect {
    let has_option_mutations = batch.iter().any(|record| match record.target {
        MutationTarget::Host => record.touches(|k| *k == NodeKind::Option),
        MutationTarget::Option(_) => record.touches(|k| *k == NodeKind::Text),
        MutationTarget::Other => false,
    });
    if has_option_mutations {
        return MutationEffect::Rebuild;
    }

    let has_slot_mutations = batch.iter().any(|record| {
        record.target == MutationTarget::Host
            && record.touches(|k| matches!(k, NodeKind::Slotted(_)))
    });
    if has_slot_mutations {
        return MutationEffect::RenderOnly;
    }

    MutationEffect::Ignore
}

/// The menu's declarative children.
#[derive(Debug, Default)]
pub struct LightTree {
    children: Vec<LightNode>,
    observer: Option<UnboundedSender<MutationRecord>>,
    /// Set by edits made while nothing was observing.
    unobserved_edits: bool,
}

impl LightTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_nodes(children: Vec<LightNode>) -> Self {
        Self {
            children,
            observer: None,
            unobserved_edits: false,
        }
    }

    pub fn children(&self) -> &[LightNode] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Option descriptors in document order.
    pub fn options(&self) -> impl Iterator<Item = &OptionDescriptor> {
        self.children.iter().filter_map(|node| match node {
            LightNode::Option(descriptor) => Some(descriptor),
            _ => None,
        })
    }

    pub fn option_count(&self) -> usize {
        self.options().count()
    }

    /// First content projected into the named slot.
    pub fn slotted(&self, name: &str) -> Option<&Node> {
        self.children.iter().find_map(|node| match node {
            LightNode::Slotted { slot, content } if slot == name => Some(content),
            _ => None,
        })
    }

    pub fn append(&mut self, node: LightNode) {
        let kind = node.kind();
        self.children.push(node);
        self.record(MutationRecord::added(MutationTarget::Host, kind));
    }

    pub fn append_option(&mut self, descriptor: OptionDescriptor) {
        self.append(LightNode::Option(descriptor));
    }

    pub fn insert(&mut self, index: usize, node: LightNode) {
        let kind = node.kind();
        self.children.insert(index.min(self.children.len()), node);
        self.record(MutationRecord::added(MutationTarget::Host, kind));
    }

    pub fn remove(&mut self, index: usize) -> Option<LightNode> {
        if index >= self.children.len() {
            return None;
        }
        let node = self.children.remove(index);
        self.record(MutationRecord::removed(MutationTarget::Host, node.kind()));
        Some(node)
    }

    /// Remove the last option node, if any.
    pub fn remove_last_option(&mut self) -> Option<OptionDescriptor> {
        let index = self
            .children
            .iter()
            .rposition(|node| matches!(node, LightNode::Option(_)))?;
        match self.remove(index) {
            Some(LightNode::Option(descriptor)) => Some(descriptor),
            _ => None,
        }
    }

    /// Replace the text of the option at `option_index` (counted among options only).
    pub fn set_option_text(&mut self, option_index: usize, text: impl Into<String>) -> bool {
        let Some(descriptor) = self
            .children
            .iter_mut()
            .filter_map(|node| match node {
                LightNode::Option(descriptor) => Some(descriptor),
                _ => None,
            })
            .nth(option_index)
        else {
            return false;
        };

        descriptor.text = text.into();
        let target = MutationTarget::Option(option_index);
        self.record(MutationRecord {
            target,
            added: vec![NodeKind::Text],
            removed: vec![NodeKind::Text],
        });
        true
    }

    /// Flip an option's `selected` marker. Attribute edits are not structural,
    /// so they are recorded against the option without touching its text.
    pub fn set_option_selected(&mut self, option_index: usize, selected: bool) -> bool {
        let Some(descriptor) = self
            .children
            .iter_mut()
            .filter_map(|node| match node {
                LightNode::Option(descriptor) => Some(descriptor),
                _ => None,
            })
            .nth(option_index)
        else {
            return false;
        };

        descriptor.selected = selected;
        self.record(MutationRecord {
            target: MutationTarget::Option(option_index),
            added: Vec::new(),
            removed: Vec::new(),
        });
        true
    }

    pub fn clear(&mut self) {
        let removed: Vec<NodeKind> = self.children.drain(..).map(|n| n.kind()).collect();
        if !removed.is_empty() {
            self.record(MutationRecord {
                target: MutationTarget::Host,
                added: Vec::new(),
                removed,
            });
        }
    }

    /// Whether the tree was edited while unobserved since the last call.
    pub fn take_unobserved_edits(&mut self) -> bool {
        std::mem::take(&mut self.unobserved_edits)
    }

    fn record(&mut self, record: MutationRecord) {
        match &self.observer {
            // a closed receiver means observation already stopped
            Some(sender) => {
                let _ = sender.send(record);
            }
            None => self.unobserved_edits = true,
        }
    }

    fn set_observer(&mut self, sender: Option<UnboundedSender<MutationRecord>>) {
        self.observer = sender;
    }
}

/// Receives and coalesces mutation records for one menu.
#[derive(Debug)]
pub struct MutationBridge {
    receiver: Option<UnboundedReceiver<MutationRecord>>,
    pending: Vec<MutationRecord>,
    last_record_at: Option<Instant>,
    debounce: Duration,
}

impl Default for MutationBridge {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl MutationBridge {
    pub fn new(debounce: Duration) -> Self {
        Self {
            receiver: None,
            pending: Vec::new(),
            last_record_at: None,
            debounce,
        }
    }

    pub fn is_observing(&self) -> bool {
        self.receiver.is_some()
    }

    /// Start recording edits made to `tree`.
    pub fn observe(&mut self, tree: &mut LightTree) {
        let (sender, receiver) = mpsc::unbounded_channel();
        tree.set_observer(Some(sender));
        self.receiver = Some(receiver);
        self.pending.clear();
        self.last_record_at = None;
    }

    /// Stop recording and drop anything not yet delivered.
    pub fn disconnect(&mut self, tree: &mut LightTree) {
        tree.set_observer(None);
        self.receiver = None;
        self.pending.clear();
        self.last_record_at = None;
    }

    /// Whether records are waiting for the debounce window to pass.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
            || self
                .receiver
                .as_ref()
                .is_some_and(|receiver| !receiver.is_empty())
    }

    /// Collect new records and release the batch once the stream has been quiet.
    pub fn poll(&mut self, now: Instant) -> Option<Vec<MutationRecord>> {
        let receiver = self.receiver.as_mut()?;

        let mut received = false;
        while let Ok(record) = receiver.try_recv() {
            self.pending.push(record);
            received = true;
        }
        if received {
            self.last_record_at = Some(now);
        }

        let last = self.last_record_at?;
        if self.pending.is_empty() || now.saturating_duration_since(last) < self.debounce {
            return None;
        }

        self.last_record_at = None;
        Some(std::mem::take(&mut self.pending))
    }
}
