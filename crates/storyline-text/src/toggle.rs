//! Toggle policy for boolean-looking attributes.
//!
//! Bold is the interesting one. It is stored as a numeric weight, reads as
//! checked only when every selected char is at least 700, and turning it on
//! has to pick a weight. An inline selection inside one text element is
//! treated differently from a selection of several elements when black (900)
//! text is involved; which scope inherits black is held in [`TogglePolicy`].
//! Turning bold off always lands on 400.
//!
//! Setting an explicit weight from a dropdown does not come through here; it
//! is a plain [`apply_attribute`](crate::apply_attribute).

use serde::{Deserialize, Serialize};

use crate::attrs::{AttrEdit, AttrName, AttrValue, FontWeight, StyleAttributes};
use crate::error::{Result, StyleError};
use crate::mutate::apply_with;
use crate::query::selected_attributes;
use crate::runs::StyleRuns;
use crate::types::{Selection, SelectionScope};

/// Weight chosen when bold is switched on over a selection with black text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoldTarget {
    /// Every selected char becomes 700, black included.
    Bold,
    /// The heaviest selected weight wins when it is bolder than 700.
    InheritHeaviest,
}

/// Per-scope bold targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TogglePolicy {
    pub inline: BoldTarget,
    pub multi_element: BoldTarget,
}

impl Default for TogglePolicy {
    fn default() -> Self {
        Self {
            inline: BoldTarget::Bold,
            multi_element: BoldTarget::InheritHeaviest,
        }
    }
}

impl TogglePolicy {
    pub fn target(&self, scope: SelectionScope) -> BoldTarget {
        match scope {
            SelectionScope::Inline => self.inline,
            SelectionScope::MultiElement => self.multi_element,
        }
    }
}

/// Resolves toggle commands into run-list updates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ToggleResolver {
    policy: TogglePolicy,
}

impl ToggleResolver {
    pub fn new(policy: TogglePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> TogglePolicy {
        self.policy
    }

    /// Toggle bold over an inline selection in one element.
    pub fn toggle_bold(&self, runs: &StyleRuns, selection: Selection) -> Result<StyleRuns> {
        let mut out = self.toggle_bold_elements(&[(runs, selection)])?;
        Ok(out.pop().unwrap_or_else(|| runs.clone()))
    }

    /// Toggle bold over one selection per element.
    pub fn toggle_bold_elements(
        &self,
        elements: &[(&StyleRuns, Selection)],
    ) -> Result<Vec<StyleRuns>> {
        self.toggle_bold_grouped(&single_selections(elements))
    }

    /// Toggle bold over any number of selections per element.
    ///
    /// The checked state is read across every selection, then one uniform
    /// weight is written into all of them. Selections of one element are
    /// applied in turn, so each returned list carries all of its edits.
    /// Collapsed selections are left alone and do not count towards the
    /// scope. Any invalid selection aborts the whole command.
    pub fn toggle_bold_grouped(
        &self,
        elements: &[(&StyleRuns, &[Selection])],
    ) -> Result<Vec<StyleRuns>> {
        let mut weights = Vec::new();
        let mut selected = 0;
        for (runs, selections) in elements {
            let mut any = false;
            for selection in selections.iter() {
                if selection.is_collapsed() {
                    runs.check_selection(*selection)?;
                    continue;
                }
                any = true;
                weights.extend(
                    selected_attributes(runs, *selection)?
                        .into_iter()
                        .map(|attrs| attrs.font_weight),
                );
            }
            selected += usize::from(any);
        }
        let scope = SelectionScope::for_element_count(selected);

        let Some(target) = self.bold_target(&weights, scope) else {
            tracing::debug!(target: "storyline::toggle", "bold toggle on empty selection");
            return Ok(elements.iter().map(|(runs, _)| (*runs).clone()).collect());
        };
        tracing::debug!(
            target: "storyline::toggle",
            ?scope,
            runs = weights.len(),
            target = target.get(),
            "resolved bold toggle"
        );

        elements
            .iter()
            .map(|(runs, selections)| {
                apply_each(runs, selections, |attrs| attrs.font_weight = target)
            })
            .collect()
    }

    /// The uniform weight a toggle writes, or `None` when nothing is selected.
    pub fn bold_target(&self, weights: &[FontWeight], scope: SelectionScope) -> Option<FontWeight> {
        let heaviest = weights.iter().copied().max()?;
        if weights.iter().all(|w| w.is_bold()) {
            return Some(FontWeight::REGULAR);
        }
        match self.policy.target(scope) {
            BoldTarget::Bold => Some(FontWeight::BOLD),
            BoldTarget::InheritHeaviest => Some(heaviest.max(FontWeight::BOLD)),
        }
    }

    /// Toggle a plain flag (`italic`, `underline`) over one element.
    pub fn toggle_flag(
        &self,
        runs: &StyleRuns,
        selection: Selection,
        attr: AttrName,
    ) -> Result<StyleRuns> {
        let mut out = self.toggle_flag_elements(&[(runs, selection)], attr)?;
        Ok(out.pop().unwrap_or_else(|| runs.clone()))
    }

    /// Clear the flag if every selected char has it, otherwise set it.
    ///
    /// `bold` is routed to [`toggle_bold_elements`](Self::toggle_bold_elements).
    pub fn toggle_flag_elements(
        &self,
        elements: &[(&StyleRuns, Selection)],
        attr: AttrName,
    ) -> Result<Vec<StyleRuns>> {
        self.toggle_flag_grouped(&single_selections(elements), attr)
    }

    /// [`toggle_flag_elements`](Self::toggle_flag_elements) with any number
    /// of selections per element.
    pub fn toggle_flag_grouped(
        &self,
        elements: &[(&StyleRuns, &[Selection])],
        attr: AttrName,
    ) -> Result<Vec<StyleRuns>> {
        if attr == AttrName::Bold {
            return self.toggle_bold_grouped(elements);
        }
        if !attr.is_flag() {
            return Err(StyleError::invalid_value(attr, "not a toggleable flag"));
        }

        let mut any = false;
        let mut all_set = true;
        for (runs, selections) in elements {
            for selection in selections.iter() {
                if selection.is_collapsed() {
                    runs.check_selection(*selection)?;
                    continue;
                }
                for attrs in selected_attributes(runs, *selection)? {
                    any = true;
                    all_set &= attrs.get(attr) == AttrValue::Bool(true);
                }
            }
        }
        if !any {
            return Ok(elements.iter().map(|(runs, _)| (*runs).clone()).collect());
        }

        let edit = AttrEdit::new(attr, &AttrValue::Bool(!all_set))?;
        tracing::debug!(target: "storyline::toggle", %attr, set = !all_set, "resolved flag toggle");
        elements
            .iter()
            .map(|(runs, selections)| apply_each(runs, selections, |attrs| edit.apply(attrs)))
            .collect()
    }
}

fn single_selections<'a>(
    elements: &'a [(&'a StyleRuns, Selection)],
) -> Vec<(&'a StyleRuns, &'a [Selection])> {
    elements
        .iter()
        .map(|(runs, selection)| (*runs, std::slice::from_ref(selection)))
        .collect()
}

fn apply_each<F>(runs: &StyleRuns, selections: &[Selection], mut edit: F) -> Result<StyleRuns>
where
    F: FnMut(&mut StyleAttributes),
{
    selections
        .iter()
        .try_fold(runs.clone(), |acc, selection| apply_with(&acc, *selection, &mut edit))
}

/// Whether the bold checkbox reads as checked for `selection`.
///
/// Checked means every selected char is at least 700; mixed selections read
/// as unchecked. A caret reads its own style.
pub fn is_bold(runs: &StyleRuns, selection: Selection) -> Result<bool> {
    Ok(selected_attributes(runs, selection)?
        .iter()
        .all(|attrs| attrs.is_bold()))
}

/// [`is_bold`] across several elements.
pub fn is_bold_elements(elements: &[(&StyleRuns, Selection)]) -> Result<bool> {
    let mut checked = true;
    for (runs, selection) in elements {
        checked &= is_bold(runs, *selection)?;
    }
    Ok(checked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::runs::StyleRun;

    fn weighted(parts: &[(usize, u16)]) -> StyleRuns {
        let mut start = 0;
        let mut runs = Vec::new();
        for &(len, w) in parts {
            let attrs = StyleAttributes {
                font_weight: FontWeight::new(w).unwrap(),
                ..Default::default()
            };
            runs.push(StyleRun::new(start..start + len, attrs));
            start += len;
        }
        StyleRuns::from_runs(start, runs).unwrap()
    }

    #[test]
    fn test_is_bold_requires_every_run() {
        let runs = weighted(&[(3, 700), (3, 900), (3, 400)]);
        assert!(is_bold(&runs, Selection::new(0, 6)).unwrap());
        assert!(!is_bold(&runs, Selection::new(0, 7)).unwrap());
        assert!(is_bold(&runs, Selection::collapsed(5)).unwrap());
    }

    #[test]
    fn test_toggle_off_resets_to_regular() {
        let runs = weighted(&[(1, 900), (17, 700)]);
        let out = ToggleResolver::default()
            .toggle_bold(&runs, Selection::new(0, 18))
            .unwrap();
        assert_eq!(out.to_string(), "0..18 [w400]");
    }

    #[test]
    fn test_inline_toggle_on_is_bold_even_with_black() {
        let runs = weighted(&[(2, 900), (2, 700), (2, 400)]);
        let out = ToggleResolver::default()
            .toggle_bold(&runs, Selection::new(0, 6))
            .unwrap();
        assert_eq!(out.to_string(), "0..6 [w700]");
    }

    #[test]
    fn test_multi_element_toggle_on_inherits_black() {
        let black = weighted(&[(4, 900)]);
        let bold = weighted(&[(4, 700)]);
        let regular = weighted(&[(4, 400)]);
        let out = ToggleResolver::default()
            .toggle_bold_elements(&[
                (&black, Selection::all(4)),
                (&bold, Selection::all(4)),
                (&regular, Selection::all(4)),
            ])
            .unwrap();
        assert!(out.iter().all(|runs| runs.to_string() == "0..4 [w900]"));
    }

    #[test]
    fn test_multi_element_without_black_is_bold() {
        let bold = weighted(&[(4, 700)]);
        let regular = weighted(&[(4, 400)]);
        let out = ToggleResolver::default()
            .toggle_bold_elements(&[(&bold, Selection::all(4)), (&regular, Selection::all(4))])
            .unwrap();
        assert!(out.iter().all(|runs| runs.to_string() == "0..4 [w700]"));
    }

    #[test]
    fn test_policy_can_flip_scopes() {
        let policy = TogglePolicy {
            inline: BoldTarget::InheritHeaviest,
            multi_element: BoldTarget::Bold,
        };
        let runs = weighted(&[(2, 900), (2, 400)]);
        let out = ToggleResolver::new(policy)
            .toggle_bold(&runs, Selection::new(0, 4))
            .unwrap();
        assert_eq!(out.to_string(), "0..4 [w900]");
    }

    #[test]
    fn test_semibold_counts_as_not_bold() {
        let runs = weighted(&[(3, 600), (3, 700)]);
        let out = ToggleResolver::default()
            .toggle_bold(&runs, Selection::new(0, 6))
            .unwrap();
        assert_eq!(out.to_string(), "0..6 [w700]");
    }

    #[test]
    fn test_empty_text_is_noop() {
        let runs = StyleRuns::plain(0);
        let out = ToggleResolver::default()
            .toggle_bold(&runs, Selection::collapsed(0))
            .unwrap();
        assert_eq!(out, runs);
    }

    #[test]
    fn test_flag_toggle_sets_then_clears() {
        let resolver = ToggleResolver::default();
        let runs = StyleRuns::plain(6);
        let once = resolver
            .toggle_flag(&runs, Selection::new(0, 3), AttrName::Italic)
            .unwrap();
        assert_eq!(once.to_string(), "0..3 [w400 italic] | 3..6 [w400]");

        // Partially italic selection sets the flag everywhere.
        let twice = resolver
            .toggle_flag(&once, Selection::new(0, 6), AttrName::Italic)
            .unwrap();
        assert_eq!(twice.to_string(), "0..6 [w400 italic]");

        let thrice = resolver
            .toggle_flag(&twice, Selection::new(0, 6), AttrName::Italic)
            .unwrap();
        assert_eq!(thrice, runs);
    }

    #[test]
    fn test_flag_toggle_rejects_non_flags() {
        let runs = StyleRuns::plain(3);
        let err = ToggleResolver::default()
            .toggle_flag(&runs, Selection::new(0, 3), AttrName::LineHeight)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidAttributeValue);
    }

    #[test]
    fn test_invalid_selection_aborts_all_elements() {
        let a = StyleRuns::plain(4);
        let b = StyleRuns::plain(2);
        let err = ToggleResolver::default()
            .toggle_bold_elements(&[(&a, Selection::all(4)), (&b, Selection::new(0, 3))])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRange);
    }

    #[test]
    fn test_grouped_selections_keep_every_edit() {
        let runs = StyleRuns::plain(10);
        let selections = [Selection::new(0, 2), Selection::new(6, 8)];
        let out = ToggleResolver::default()
            .toggle_flag_grouped(&[(&runs, &selections[..])], AttrName::Italic)
            .unwrap();
        assert_eq!(
            out[0].to_string(),
            "0..2 [w400 italic] | 2..6 [w400] | 6..8 [w400 italic] | 8..10 [w400]"
        );
    }

    #[test]
    fn test_two_ranges_in_one_element_stay_inline() {
        let runs = weighted(&[(2, 900), (4, 400), (2, 400)]);
        let selections = [Selection::new(0, 2), Selection::new(6, 8)];
        let out = ToggleResolver::default()
            .toggle_bold_grouped(&[(&runs, &selections[..])])
            .unwrap();
        assert_eq!(out[0].to_string(), "0..2 [w700] | 2..6 [w400] | 6..8 [w700]");
    }

    #[test]
    fn test_caret_element_does_not_widen_scope() {
        let black = weighted(&[(4, 900), (2, 400)]);
        let other = weighted(&[(4, 400)]);
        let out = ToggleResolver::default()
            .toggle_bold_elements(&[(&black, Selection::all(6)), (&other, Selection::collapsed(1))])
            .unwrap();
        assert_eq!(out[0].to_string(), "0..6 [w700]");
        assert_eq!(out[1], other);
    }
}
