//! # Attribute Surface
//!
//! The menu is configured the way a native list control is: through named
//! string attributes whose values are validated against a fixed vocabulary.
//! Unknown or malformed values fall back to documented defaults, they are
//! never reported as errors.
//!
//! | attribute     | legal values                 | default    |
//! |---------------|------------------------------|------------|
//! | `align-items` | `center`, `end`, `start`     | `center`   |
//! | `decrement`   | boolean (presence)           | `false`    |
//! | `direction`   | `horizontal`, `vertical`     | `vertical` |
//! | `disabled`    | boolean (presence)           | `false`    |
//! | `increment`   | boolean (presence)           | `false`    |

use serde::{Deserialize, Serialize};

pub const ALIGN_ITEMS_NAME: &str = "align-items";
pub const DECREMENT_NAME: &str = "decrement";
pub const DIRECTION_NAME: &str = "direction";
pub const DISABLED_NAME: &str = "disabled";
pub const INCREMENT_NAME: &str = "increment";

/// Attributes whose changes the menu reacts to.
pub const OBSERVED_ATTRIBUTES: [&str; 5] = [
    ALIGN_ITEMS_NAME,
    DECREMENT_NAME,
    DIRECTION_NAME,
    DISABLED_NAME,
    INCREMENT_NAME,
];

/// The scroll axis and layout orientation of the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Horizontal,
    #[default]
    Vertical,
}

impl Direction {
    /// Parse an attribute value, falling back to [`Direction::Vertical`].
    pub fn from_attribute(value: Option<&str>) -> Self {
        match normalize(value).as_deref() {
            Some("horizontal") => Direction::Horizontal,
            Some("vertical") => Direction::Vertical,
            _ => Direction::default(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Horizontal => "horizontal",
            Direction::Vertical => "vertical",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Direction::Horizontal => Direction::Vertical,
            Direction::Vertical => Direction::Horizontal,
        }
    }
}

/// Cross-axis alignment of rendered items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignItems {
    #[default]
    Center,
    End,
    Start,
}

impl AlignItems {
    /// Parse an attribute value, falling back to [`AlignItems::Center`].
    pub fn from_attribute(value: Option<&str>) -> Self {
        match normalize(value).as_deref() {
            Some("center") => AlignItems::Center,
            Some("end") => AlignItems::End,
            Some("start") => AlignItems::Start,
            _ => AlignItems::default(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AlignItems::Center => "center",
            AlignItems::End => "end",
            AlignItems::Start => "start",
        }
    }
}

/// Boolean attribute coercion with native presence semantics.
///
/// Any present value is `true`, including `""` and `"false"`. Only an absent
/// attribute is `false`.
pub fn attribute_to_bool(value: Option<&str>) -> bool {
    value.is_some()
}

/// Attribute value a boolean property writes back (`Some("")` or removal).
pub fn bool_to_attribute(value: bool) -> Option<&'static str> {
    value.then_some("")
}

fn normalize(value: Option<&str>) -> Option<String> {
    value.map(|v| v.trim().to_lowercase())
}

/// Validated configuration derived from the attribute surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuAttributes {
    pub align_items: AlignItems,
    pub decrement: bool,
    pub direction: Direction,
    pub disabled: bool,
    pub increment: bool,
}

/// What kind of refresh an attribute change requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeEffect {
    /// Nothing observable changed.
    None,
    /// Only the scroll position needs recomputing.
    Reposition,
    /// The axis changed, so item geometry must be rebuilt.
    Relayout,
}

impl MenuAttributes {
    /// Apply a raw attribute change. Unobserved names are ignored.
    pub fn apply(&mut self, name: &str, value: Option<&str>) -> AttributeEffect {
        match name {
            ALIGN_ITEMS_NAME => self.align_items = AlignItems::from_attribute(value),
            DECREMENT_NAME => self.decrement = attribute_to_bool(value),
            DIRECTION_NAME => {
                let direction = Direction::from_attribute(value);
                if direction != self.direction {
                    self.direction = direction;
                    return AttributeEffect::Relayout;
                }
            }
            DISABLED_NAME => self.disabled = attribute_to_bool(value),
            INCREMENT_NAME => self.increment = attribute_to_bool(value),
            _ => return AttributeEffect::None,
        }
        AttributeEffect::Reposition
    }
}
