//! Import and export of the asset store.
//!
//! Loading runs in three stages, each with its own failure:
//!
//! 1. the transport handed over text at all (`MissingData`)
//! 2. the text is JSON (`MalformedInput`)
//! 3. the JSON describes a consistent store (`InvalidAsset`)
//!
//! A failed load never produces a partial store.

use im::{OrdMap, Vector};
use serde_json::Value;
use tracing::{debug, info};

use super::loader::DataSource;
use super::record::{AssetsRecord, CardRecord, DocumentRecord, SetRecord, TagRecord};
use crate::assets::{AssetStore, Card, CardSet, Tag};
use crate::core::{CardId, SetId, TagId};
use crate::error::{Error, Result};

/// A successfully decoded document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedData {
    pub store: AssetStore,
    /// The document's own `unexportedChanges` flag.
    pub unexported_changes: bool,
}

/// Encode a store as the canonical export document.
pub fn serialize(store: &AssetStore, unexported_changes: bool) -> Result<String> {
    let document = to_document(store, unexported_changes);
    let text = serde_json::to_string(&document)?;
    debug!(bytes = text.len(), cards = store.card_count(), "serialized store");
    Ok(text)
}

/// Build the export document without encoding it.
#[must_use]
pub fn to_document(store: &AssetStore, unexported_changes: bool) -> DocumentRecord {
    let assets = AssetsRecord {
        kanji: store
            .cards()
            .map(|card| (card.id.as_str().to_string(), CardRecord::from(card)))
            .collect(),
        sets: store
            .sets()
            .map(|set| (set.id.as_str().to_string(), SetRecord::from(set)))
            .collect(),
        tags: store
            .tags()
            .map(|tag| (tag.id.as_str().to_string(), TagRecord::from(tag)))
            .collect(),
    };
    DocumentRecord {
        all_sets: store.set_order().iter().cloned().collect(),
        assets,
        unexported_changes,
    }
}

/// Decode raw transport text into a store.
///
/// `None` means the transport had nothing (e.g. empty local storage).
pub fn deserialize(raw: Option<&str>, origin: DataSource) -> Result<LoadedData> {
    let raw = raw.ok_or(Error::MissingData { origin })?;
    let value: Value =
        serde_json::from_str(raw).map_err(|source| Error::MalformedInput { origin, source })?;
    let document: DocumentRecord = serde_json::from_value(value).map_err(|e| Error::InvalidAsset {
        origin,
        reason: e.to_string(),
    })?;
    let loaded = from_document(document).map_err(|reason| Error::InvalidAsset { origin, reason })?;
    info!(
        %origin,
        cards = loaded.store.card_count(),
        sets = loaded.store.set_count(),
        tags = loaded.store.tag_count(),
        "loaded store"
    );
    Ok(loaded)
}

/// Validate a decoded document and assemble the store.
///
/// Records are keyed by their own `character`/`id`; the map keys are not
/// trusted. Sets that exist but are missing from `allSets` are appended to
/// the order by ascending ID.
fn from_document(document: DocumentRecord) -> std::result::Result<LoadedData, String> {
    let AssetsRecord { kanji, sets, tags } = document.assets;

    let mut tag_map: OrdMap<TagId, Tag> = OrdMap::new();
    for record in tags.into_values() {
        let tag = record.into_tag();
        if tag.id.is_empty() {
            return Err("tag with empty id".into());
        }
        if tag.id != TagId::from_name(tag.id.as_str()) {
            return Err(format!("tag id {} is not lower-case", tag.id));
        }
        if tag_map.insert(tag.id.clone(), tag).is_some() {
            return Err("duplicate tag id".into());
        }
    }

    let mut card_map: OrdMap<CardId, Card> = OrdMap::new();
    for record in kanji.into_values() {
        let card = record.into_card();
        if card.id.is_empty() {
            return Err("card with empty character".into());
        }
        if let Some(tag) = card.tags.iter().find(|tag| !tag_map.contains_key(*tag)) {
            return Err(format!("card {} references unknown tag {}", card.id, tag));
        }
        let id = card.id.clone();
        if card_map.insert(id.clone(), card).is_some() {
            return Err(format!("duplicate card {id}"));
        }
    }

    let mut set_map: OrdMap<SetId, CardSet> = OrdMap::new();
    for record in sets.into_values() {
        let set = record.into_set();
        if set.id.is_empty() {
            return Err("set with empty id".into());
        }
        if let Some(card) = set.members.iter().find(|card| !card_map.contains_key(*card)) {
            return Err(format!("set {} references unknown card {}", set.id, card));
        }
        let id = set.id.clone();
        if set_map.insert(id.clone(), set).is_some() {
            return Err(format!("duplicate set {id}"));
        }
    }

    let mut order: Vector<SetId> = Vector::new();
    for id in document.all_sets {
        if !set_map.contains_key(&id) {
            return Err(format!("allSets references unknown set {id}"));
        }
        if order.contains(&id) {
            return Err(format!("allSets lists set {id} twice"));
        }
        order.push_back(id);
    }
    let mut unlisted: Vec<SetId> = set_map.keys().filter(|id| !order.contains(*id)).cloned().collect();
    unlisted.sort_by_key(|id| (id.number().unwrap_or(u64::MAX), id.clone()));
    if !unlisted.is_empty() {
        debug!(count = unlisted.len(), "appending sets missing from allSets");
    }
    order.extend(unlisted);

    Ok(LoadedData {
        store: AssetStore::from_parts(card_map, set_map, tag_map, order),
        unexported_changes: document.unexported_changes,
    })
}
