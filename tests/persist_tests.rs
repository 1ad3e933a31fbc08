//! Import/export integration tests.

use kanji_deck::persist::{deserialize, serialize, to_document};
use kanji_deck::{AssetStore, CardFields, CardId, DataSource, Error, SetId, TagId};
use serde_json::{json, Value};

fn deck() -> AssetStore {
    AssetStore::new()
        .create_tag("Time")
        .create_card(
            CardId::new("日"),
            CardFields::with_meaning("sun").hint("bright").kunyomi("ひ").onyomi("にち").tag("time"),
            &[],
        )
        .create_card(CardId::new("月"), CardFields::with_meaning("moon"), &[])
        .create_set("Core 1", [CardId::new("月"), CardId::new("日")])
        .create_set("Core 2", Vec::new())
}

/// The exported document has the documented shape.
#[test]
fn test_export_document_shape() {
    let value: Value = serde_json::from_str(&serialize(&deck(), true).unwrap()).unwrap();
    assert_eq!(value["allSets"], json!(["1", "2"]));
    assert_eq!(value["unexportedChanges"], json!(true));
    assert_eq!(
        value["assets"]["kanji"]["日"],
        json!({
            "character": "日",
            "meaning": "sun",
            "notes": "bright",
            "tags": ["time"],
            "onyomi": "にち",
            "kunyomi": "ひ"
        })
    );
    assert_eq!(
        value["assets"]["kanji"]["月"],
        json!({ "character": "月", "meaning": "moon", "notes": "" })
    );
    assert_eq!(value["assets"]["sets"]["1"]["kanji"], json!(["月", "日"]));
    assert_eq!(value["assets"]["tags"]["time"], json!({ "id": "time", "name": "Time" }));
}

/// A store survives export and import unchanged.
#[test]
fn test_roundtrip() {
    let store = deck();
    let loaded = deserialize(Some(serialize(&store, false).unwrap().as_str()), DataSource::File).unwrap();
    assert_eq!(loaded.store, store);
    assert_eq!(to_document(&loaded.store, false), to_document(&store, false));
}

/// Documents without a tags table still load.
#[test]
fn test_legacy_document_without_tags() {
    let text = json!({
        "allSets": ["1"],
        "assets": {
            "kanji": { "火": { "character": "火", "meaning": "fire", "notes": "" } },
            "sets": { "1": { "id": "1", "name": "Core", "kanji": ["火"] } }
        }
    })
    .to_string();
    let loaded = deserialize(Some(text.as_str()), DataSource::Remote).unwrap();
    assert_eq!(loaded.store.set_members(&SetId::new("1")), vec![CardId::new("火")]);
    assert_eq!(loaded.store.tag_count(), 0);
    assert!(!loaded.unexported_changes);
}

/// Each failure stage reports its own error, tagged with the origin.
#[test]
fn test_failure_taxonomy() {
    assert!(matches!(
        deserialize(None, DataSource::Local),
        Err(Error::MissingData { origin: DataSource::Local })
    ));
    assert!(matches!(
        deserialize(Some("{\"allSets\": ["), DataSource::File),
        Err(Error::MalformedInput { origin: DataSource::File, .. })
    ));
    assert!(matches!(
        deserialize(Some("[1, 2, 3]"), DataSource::File),
        Err(Error::InvalidAsset { origin: DataSource::File, .. })
    ));

    let err = deserialize(Some("null"), DataSource::Local).unwrap_err();
    assert!(err.is_data_bad());
    assert_eq!(err.origin(), Some(DataSource::Local));
}

/// Card records that reference an unknown tag are rejected as a whole.
#[test]
fn test_unknown_tag_rejects_document() {
    let text = json!({
        "allSets": [],
        "assets": {
            "kanji": { "火": { "character": "火", "meaning": "fire", "notes": "", "tags": ["hot"] } },
            "sets": {},
            "tags": { "cold": { "id": "cold", "name": "Cold" } }
        }
    })
    .to_string();
    let err = deserialize(Some(text.as_str()), DataSource::File).unwrap_err();
    assert!(err.to_string().contains("hot"));
    assert!(deck().tag(&TagId::new("hot")).is_none());
}

/// Tag IDs must already be lower-case, since lookups go through the
/// lower-cased name.
#[test]
fn test_mixed_case_tag_id_rejects_document() {
    let text = json!({
        "allSets": [],
        "assets": {
            "kanji": { "日": { "character": "日", "meaning": "sun", "notes": "", "tags": ["Time"] } },
            "sets": {},
            "tags": { "Time": { "id": "Time", "name": "Time" } }
        }
    })
    .to_string();
    let err = deserialize(Some(text.as_str()), DataSource::File).unwrap_err();
    assert!(matches!(err, Error::InvalidAsset { origin: DataSource::File, .. }));
    assert!(err.to_string().contains("Time"));
}
