//! # Selection State Machine
//!
//! Owns the option list and the single selection index. Every change to the
//! index goes through [`SelectionState::assign`], which keeps each option's
//! `selected` flag in step with the index so that at most one option is ever
//! flagged.
//!
//! Index input is coerced like a native list control's `selectedIndex`:
//!
//! - numbers truncate toward zero (`1.9` → `1`)
//! - strings use integer-prefix parsing (`"1.9"` → `1`, `" -1"` → `-1`)
//! - non-numeric input (`"abc"`, NaN) is rejected and the index is kept
//! - anything outside `-1..len` collapses to `-1`
//! - an empty list always ends up at `-1`

use super::option::{BuiltOptions, MenuOption};

/// Raw input accepted by `selectedIndex` assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexValue {
    Number(f64),
    Text(String),
}

impl From<i32> for IndexValue {
    fn from(value: i32) -> Self {
        IndexValue::Number(f64::from(value))
    }
}

impl From<i64> for IndexValue {
    fn from(value: i64) -> Self {
        IndexValue::Number(value as f64)
    }
}

impl From<isize> for IndexValue {
    fn from(value: isize) -> Self {
        IndexValue::Number(value as f64)
    }
}

impl From<usize> for IndexValue {
    fn from(value: usize) -> Self {
        IndexValue::Number(value as f64)
    }
}

impl From<f64> for IndexValue {
    fn from(value: f64) -> Self {
        IndexValue::Number(value)
    }
}

impl From<&str> for IndexValue {
    fn from(value: &str) -> Self {
        IndexValue::Text(value.to_string())
    }
}

impl From<String> for IndexValue {
    fn from(value: String) -> Self {
        IndexValue::Text(value)
    }
}

impl IndexValue {
    /// Integer value of the input, or `None` when it is not numeric.
    pub fn to_integer(&self) -> Option<i64> {
        match self {
            IndexValue::Number(n) if n.is_nan() => None,
            // `as` saturates infinities, which then fall out of range
            IndexValue::Number(n) => Some(n.trunc() as i64),
            IndexValue::Text(s) => parse_int_prefix(s),
        }
    }
}

/// Parse the leading base-10 integer of a string, ignoring trailing garbage.
fn parse_int_prefix(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut seen = false;
    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        seen = true;
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }

    seen.then_some(if negative { -value } else { value })
}

/// An effective change of the selection index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub previous: Option<usize>,
    pub current: Option<usize>,
}

/// The option list together with its authoritative selection index.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    options: Vec<MenuOption>,
    selected: Option<usize>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(&self) -> &[MenuOption] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// The selection index with `-1` standing for "nothing selected".
    pub fn selected_index(&self) -> isize {
        self.selected.map_or(-1, |i| i as isize)
    }

    pub fn selected_option(&self) -> Option<&MenuOption> {
        self.selected.and_then(|i| self.options.get(i))
    }

    /// Replace the whole option list with a freshly built one.
    pub fn replace(&mut self, built: BuiltOptions) {
        self.options = built.options;
        self.selected = built.selected;
        self.check_invariants();
    }

    /// Resolve raw input to the index it would select, or `None` to keep the current one.
    pub fn resolve(&self, raw: &IndexValue) -> Option<Option<usize>> {
        if self.options.is_empty() {
            return Some(None);
        }

        let value = raw.to_integer()?;
        if value < 0 || value >= self.options.len() as i64 {
            // -1 itself lands here as well
            return Some(None);
        }

        Some(Some(value as usize))
    }

    /// Apply `selectedIndex` assignment semantics.
    ///
    /// Returns the transition when the index effectively changed, or when
    /// `force` is set and the input was numeric.
    pub fn assign(&mut self, raw: &IndexValue, force: bool) -> Option<Transition> {
        let next = self.resolve(raw)?;
        if next == self.selected && !force {
            return None;
        }

        let previous = self.selected;
        if let Some(option) = previous.and_then(|i| self.options.get_mut(i)) {
            option.selected = false;
        }
        if let Some(option) = next.and_then(|i| self.options.get_mut(i)) {
            option.selected = true;
        }
        self.selected = next;
        self.check_invariants();

        Some(Transition {
            previous,
            current: next,
        })
    }

    /// Index that step navigation by `delta` would land on, skipping disabled options.
    ///
    /// Starting from `index + delta`, keeps moving one further step in the
    /// same direction while the candidate is disabled. Returns `None` once the
    /// candidate leaves the list.
    pub fn step_target(&self, delta: isize) -> Option<usize> {
        if delta == 0 {
            return None;
        }

        let step = delta.signum();
        let len = self.options.len() as isize;
        let mut candidate = self.selected_index() + delta;

        while (0..len).contains(&candidate) {
            let index = candidate as usize;
            if !self.options[index].disabled {
                return Some(index);
            }
            candidate += step;
        }

        None
    }

    /// Step navigation: select the next enabled option `delta` steps away.
    pub fn offset(&mut self, delta: isize) -> Option<Transition> {
        let target = self.step_target(delta)?;
        self.assign(&IndexValue::from(target), false)
    }

    fn check_invariants(&self) {
        debug_assert!(
            self.selected.map_or(true, |i| i < self.options.len()),
            "selection index {:?} outside option list of {}",
            self.selected,
            self.options.len()
        );
        debug_assert_eq!(
            self.options.iter().filter(|o| o.selected).count(),
            usize::from(self.selected.is_some()),
            "selected flags out of step with the selection index"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::option::{build_options, OptionDescriptor};

    fn state(descriptors: &[OptionDescriptor]) -> SelectionState {
        let mut state = SelectionState::new();
        state.replace(build_options(descriptors));
        state
    }

    fn plain(n: usize) -> SelectionState {
        let descriptors: Vec<_> = (0..n)
            .map(|i| OptionDescriptor::new(format!("option {i}")))
            .collect();
        state(&descriptors)
    }

    #[test]
    fn test_parse_int_prefix() {
        assert_eq!(parse_int_prefix("1"), Some(1));
        assert_eq!(parse_int_prefix("1.9"), Some(1));
        assert_eq!(parse_int_prefix("  -2"), Some(-2));
        assert_eq!(parse_int_prefix("+3px"), Some(3));
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("-"), None);
    }

    #[test]
    fn test_fractional_string_truncates() {
        let mut s = plain(3);
        s.assign(&"1.9".into(), false);
        assert_eq!(s.selected_index(), 1);
    }

    #[test]
    fn test_fractional_number_truncates_toward_zero() {
        let mut s = plain(3);
        s.assign(&1.5.into(), false);
        assert_eq!(s.selected_index(), 1);
        s.assign(&(-0.5).into(), false);
        assert_eq!(s.selected_index(), 0);
    }

    #[test]
    fn test_out_of_range_collapses_to_minus_one() {
        for raw in [IndexValue::from(5), (-2).into(), 2.into(), "2".into(), "-2".into()] {
            let mut s = plain(2);
            s.assign(&raw, false);
            assert_eq!(s.selected_index(), -1, "input {raw:?}");
            assert!(s.options().iter().all(|o| !o.selected));
        }
    }

    #[test]
    fn test_non_numeric_input_is_ignored() {
        let mut s = plain(2);
        assert_eq!(s.assign(&"abc".into(), false), None);
        assert_eq!(s.assign(&f64::NAN.into(), false), None);
        assert_eq!(s.selected_index(), 0);
    }

    #[test]
    fn test_empty_list_forces_minus_one() {
        let mut s = plain(0);
        assert_eq!(s.assign(&0.into(), false), None);
        assert_eq!(s.assign(&"abc".into(), false), None);
        assert_eq!(s.selected_index(), -1);
    }

    #[test]
    fn test_assign_moves_selected_flag() {
        let mut s = plain(3);
        let transition = s.assign(&2.into(), false).expect("changed");
        assert_eq!(transition.previous, Some(0));
        assert_eq!(transition.current, Some(2));
        assert!(!s.options()[0].selected);
        assert!(s.options()[2].selected);
    }

    #[test]
    fn test_assign_same_index_is_noop_unless_forced() {
        let mut s = plain(3);
        assert_eq!(s.assign(&0.into(), false), None);
        assert!(s.assign(&0.into(), true).is_some());
    }

    #[test]
    fn test_offset_skips_disabled() {
        let mut s = state(&[
            OptionDescriptor::new("a"),
            OptionDescriptor::new("b").disabled(),
            OptionDescriptor::new("c").disabled(),
            OptionDescriptor::new("d"),
        ]);
        s.offset(1);
        assert_eq!(s.selected_index(), 3);
        s.offset(-1);
        assert_eq!(s.selected_index(), 0);
    }

    #[test]
    fn test_offset_towards_disabled_tail_is_noop() {
        let mut s = state(&[
            OptionDescriptor::new("a"),
            OptionDescriptor::new("b").disabled(),
            OptionDescriptor::new("c").disabled(),
        ]);
        assert_eq!(s.offset(1), None);
        assert_eq!(s.selected_index(), 0);
    }

    #[test]
    fn test_offset_out_of_range_is_noop() {
        let mut s = plain(2);
        assert_eq!(s.offset(-1), None);
        s.assign(&1.into(), false);
        assert_eq!(s.offset(1), None);
        assert_eq!(s.offset(0), None);
        assert_eq!(s.selected_index(), 1);
    }

    #[test]
    fn test_offset_from_nothing_selected() {
        let mut s = plain(2);
        s.assign(&(-1).into(), false);
        s.offset(1);
        assert_eq!(s.selected_index(), 0);
    }

    #[test]
    fn test_large_delta_extends_past_disabled() {
        let mut s = state(&[
            OptionDescriptor::new("a"),
            OptionDescriptor::new("b"),
            OptionDescriptor::new("c").disabled(),
            OptionDescriptor::new("d"),
        ]);
        s.offset(2);
        assert_eq!(s.selected_index(), 3);
    }
}
