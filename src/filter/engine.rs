//! Visible card computation.
//!
//! The include pass narrows the base population; the exclude pass then
//! removes every card matching one of its active predicates. Each predicate
//! is an independent set operation, so the order they run in does not
//! change the result.

use im::OrdSet;
use rustc_hash::FxHashSet;

use super::criteria::FilterPass;
use crate::assets::{AssetStore, Card};
use crate::core::{CardId, SetId};

/// IDs of the cards that pass both filter passes.
///
/// The base population is the selection (ascending) when the include pass
/// restricts to it, else every card (ascending). Selected IDs that no
/// longer name a card are skipped. An unknown set in either pass counts as
/// an empty set.
#[must_use]
pub fn visible_card_ids(
    store: &AssetStore,
    selected: &OrdSet<CardId>,
    include: &FilterPass,
    exclude: &FilterPass,
) -> Vec<CardId> {
    let include_sets = memberships(store, &include.sets);
    let exclude_sets = memberships(store, &exclude.sets);

    let population: Box<dyn Iterator<Item = &Card> + '_> = if include.match_selected {
        Box::new(selected.iter().filter_map(|id| store.card(id)))
    } else {
        Box::new(store.cards())
    };

    population
        .filter(|card| included(card, include, &include_sets))
        .filter(|card| !excluded(card, selected, exclude, &exclude_sets))
        .map(|card| card.id.clone())
        .collect()
}

fn included(card: &Card, pass: &FilterPass, sets: &[FxHashSet<&CardId>]) -> bool {
    pass.text_hits(card).count() == pass.text_fields.len()
        && pass.tags.iter().all(|tag| card.has_tag(tag))
        && sets.iter().all(|members| members.contains(&card.id))
}

fn excluded(card: &Card, selected: &OrdSet<CardId>, pass: &FilterPass, sets: &[FxHashSet<&CardId>]) -> bool {
    (pass.match_selected && selected.contains(&card.id))
        || pass.text_hits(card).next().is_some()
        || pass.tags.iter().any(|tag| card.has_tag(tag))
        || sets.iter().any(|members| members.contains(&card.id))
}

fn memberships<'a>(store: &'a AssetStore, sets: &[SetId]) -> Vec<FxHashSet<&'a CardId>> {
    sets.iter()
        .map(|id| {
            store
                .set(id)
                .map(|set| set.members.iter().collect())
                .unwrap_or_default()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::CardFields;
    use crate::core::TagId;
    use crate::filter::TextField;

    fn store() -> AssetStore {
        AssetStore::new()
            .create_tag("t1")
            .create_tag("t2")
            .create_card(CardId::new("日"), CardFields::with_meaning("sun").tag("t1"), &[])
            .create_card(CardId::new("月"), CardFields::with_meaning("moon").tag("t2"), &[])
            .create_card(CardId::new("火"), CardFields::with_meaning("fire").tag("t1").tag("t2"), &[])
            .create_set("Core", [CardId::new("日"), CardId::new("月")])
    }

    fn ids(list: &[&str]) -> Vec<CardId> {
        list.iter().map(|id| CardId::new(*id)).collect()
    }

    #[test]
    fn test_inactive_filters_show_everything() {
        let visible = visible_card_ids(&store(), &OrdSet::new(), &FilterPass::default(), &FilterPass::default());
        assert_eq!(visible, ids(&["日", "月", "火"]));
    }

    #[test]
    fn test_selected_only() {
        let selected: OrdSet<CardId> = ids(&["火", "日", "木"]).into_iter().collect();
        let include = FilterPass {
            match_selected: true,
            ..FilterPass::default()
        };
        let visible = visible_card_ids(&store(), &selected, &include, &FilterPass::default());
        assert_eq!(visible, ids(&["日", "火"]));
    }

    #[test]
    fn test_include_tags_are_intersected() {
        let include = FilterPass {
            tags: vec![TagId::new("t1"), TagId::new("t2")],
            ..FilterPass::default()
        };
        let visible = visible_card_ids(&store(), &OrdSet::new(), &include, &FilterPass::default());
        assert_eq!(visible, ids(&["火"]));
    }

    #[test]
    fn test_exclude_tags_remove_any_match() {
        let exclude = FilterPass {
            tags: vec![TagId::new("t2")],
            ..FilterPass::default()
        };
        let visible = visible_card_ids(&store(), &OrdSet::new(), &FilterPass::default(), &exclude);
        assert_eq!(visible, ids(&["日"]));
    }

    #[test]
    fn test_sets() {
        let include = FilterPass {
            sets: vec![SetId::new("1")],
            ..FilterPass::default()
        };
        let visible = visible_card_ids(&store(), &OrdSet::new(), &include, &FilterPass::default());
        assert_eq!(visible, ids(&["日", "月"]));

        let exclude = include.clone();
        let visible = visible_card_ids(&store(), &OrdSet::new(), &FilterPass::default(), &exclude);
        assert_eq!(visible, ids(&["火"]));

        let unknown = FilterPass {
            sets: vec![SetId::new("9")],
            ..FilterPass::default()
        };
        assert!(visible_card_ids(&store(), &OrdSet::new(), &unknown, &FilterPass::default()).is_empty());
        assert_eq!(visible_card_ids(&store(), &OrdSet::new(), &FilterPass::default(), &unknown).len(), 3);
    }

    #[test]
    fn test_text_include_then_exclude() {
        let include = FilterPass {
            search_text: "o".into(),
            ..FilterPass::default()
        }
        .toggle_field(TextField::Meaning);
        let visible = visible_card_ids(&store(), &OrdSet::new(), &include, &FilterPass::default());
        assert_eq!(visible, ids(&["月"]));

        let exclude = FilterPass {
            search_text: "fire".into(),
            ..FilterPass::default()
        }
        .toggle_field(TextField::Meaning)
        .toggle_field(TextField::Hint);
        let visible = visible_card_ids(&store(), &OrdSet::new(), &FilterPass::default(), &exclude);
        assert_eq!(visible, ids(&["日", "月"]));
    }

    #[test]
    fn test_exclude_selected() {
        let selected: OrdSet<CardId> = ids(&["月"]).into_iter().collect();
        let exclude = FilterPass {
            match_selected: true,
            ..FilterPass::default()
        };
        let visible = visible_card_ids(&store(), &selected, &FilterPass::default(), &exclude);
        assert_eq!(visible, ids(&["日", "火"]));
    }
}
