//! # Option Model Builder
//!
//! Turns the declarative option descriptors of a menu into its internal option
//! list and picks the initial selection the way a native list control does:
//! the last descriptor marked `selected` wins, otherwise the first option is
//! selected, and an empty list selects nothing.

use serde::{Deserialize, Serialize};

/// One declarative option as supplied by the menu's owner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionDescriptor {
    /// Raw text content. Trimmed when the option list is built.
    #[serde(default, alias = "label")]
    pub text: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub selected: bool,
}

impl OptionDescriptor {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }
}

/// A selectable entry of the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    pub label: String,
    pub value: Option<String>,
    pub disabled: bool,
    /// Mirrors whether this option sits at the selection index.
    pub selected: bool,
}

/// Result of [`build_options`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuiltOptions {
    pub options: Vec<MenuOption>,
    pub selected: Option<usize>,
}

/// Build the option list and initial selection from descriptors in document order.
pub fn build_options<'a, I>(descriptors: I) -> BuiltOptions
where
    I: IntoIterator<Item = &'a OptionDescriptor>,
{
    let mut last_selected = None;

    let mut options: Vec<MenuOption> = descriptors
        .into_iter()
        .enumerate()
        .map(|(i, descriptor)| {
            if descriptor.selected {
                last_selected = Some(i);
            }

            MenuOption {
                label: descriptor.text.trim().to_string(),
                value: descriptor.value.clone(),
                disabled: descriptor.disabled,
                // avoid duplicates; only the winner is flagged below
                selected: false,
            }
        })
        .collect();

    let selected = if options.is_empty() {
        None
    } else {
        Some(last_selected.unwrap_or(0))
    };

    if let Some(index) = selected {
        options[index].selected = true;
    }

    BuiltOptions { options, selected }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_selects_nothing() {
        let built = build_options(&Vec::<OptionDescriptor>::new());
        assert!(built.options.is_empty());
        assert_eq!(built.selected, None);
    }

    #[test]
    fn test_defaults_to_first_option() {
        let descriptors = vec![
            OptionDescriptor::new("a"),
            OptionDescriptor::new("b"),
            OptionDescriptor::new("c"),
        ];
        let built = build_options(&descriptors);
        assert_eq!(built.selected, Some(0));
        assert!(built.options[0].selected);
    }

    #[test]
    fn test_last_selected_wins() {
        let descriptors = vec![
            OptionDescriptor::new("a").selected(),
            OptionDescriptor::new("b"),
            OptionDescriptor::new("c").selected(),
        ];
        let built = build_options(&descriptors);
        assert_eq!(built.selected, Some(2));
        let flagged: Vec<bool> = built.options.iter().map(|o| o.selected).collect();
        assert_eq!(flagged, vec![false, false, true]);
    }

    #[test]
    fn test_disabled_option_can_be_initially_selected() {
        let descriptors = vec![
            OptionDescriptor::new("a").disabled(),
            OptionDescriptor::new("b").disabled().selected(),
        ];
        let built = build_options(&descriptors);
        assert_eq!(built.selected, Some(1));
    }

    #[test]
    fn test_labels_are_trimmed_and_values_kept() {
        let descriptors = vec![OptionDescriptor::new("  Label \n").with_value("v")];
        let built = build_options(&descriptors);
        assert_eq!(built.options[0].label, "Label");
        assert_eq!(built.options[0].value.as_deref(), Some("v"));
    }

    #[test]
    fn test_descriptor_deserializes_with_defaults() {
        let descriptor: OptionDescriptor =
            serde_json::from_str(r#"{"label": "Only label"}"#).expect("deserialize");
        assert_eq!(descriptor.text, "Only label");
        assert_eq!(descriptor.value, None);
        assert!(!descriptor.disabled);
        assert!(!descriptor.selected);
    }
}
