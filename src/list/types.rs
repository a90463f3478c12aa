use serde::Deserialize;

/// A player's completion or progress on a level, as published in the level's
/// detail document.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Record {
    pub user: String,
    pub percent: u8,
    pub link: String,
}

/// Level detail document as published at `{source}/{path}.json`.
///
/// Rank is deliberately absent: it is derived from the manifest position at
/// load time, never stored in the source document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDocument {
    pub name: String,
    pub verifier: String,
    pub verification: String,
    pub percent_to_qualify: u8,
    pub records: Vec<Record>,
}

/// A level ready for aggregation: the parsed document plus its manifest
/// identifier, with records sorted descending by percent.
#[derive(Debug, Clone)]
pub struct Level {
    pub name: String,
    pub path: String,
    pub verifier: String,
    pub verification: String,
    pub percent_to_qualify: u8,
    pub records: Vec<Record>,
}

impl Level {
    /// Attach the manifest identifier and normalize record order. The sort
    /// is stable, so ties keep their document order.
    pub fn from_document(doc: LevelDocument, path: &str) -> Self {
        let mut records = doc.records;
        records.sort_by(|a, b| b.percent.cmp(&a.percent));

        Level {
            name: doc.name,
            path: path.to_string(),
            verifier: doc.verifier,
            verification: doc.verification,
            percent_to_qualify: doc.percent_to_qualify,
            records,
        }
    }
}

/// Outcome of loading one manifest slot. A failed slot keeps its identifier
/// so the aggregator can report it without aborting the rest of the list.
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    Loaded(Level),
    Failed { path: String },
}

/// One entry of the optional `_editors.json` maintainer document. Published
/// variants disagree on the key for the name, so both are accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct Editor {
    #[serde(alias = "user")]
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_document_parses_published_shape() {
        let json = r#"{
            "name": "Bloodbath",
            "verifier": "Riot",
            "verification": "https://youtu.be/abc",
            "percentToQualify": 78,
            "records": [
                { "user": "Michigun", "percent": 100, "link": "https://youtu.be/m" }
            ]
        }"#;

        let doc: LevelDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.name, "Bloodbath");
        assert_eq!(doc.verifier, "Riot");
        assert_eq!(doc.percent_to_qualify, 78);
        assert_eq!(doc.records.len(), 1);
        assert_eq!(doc.records[0].percent, 100);
    }

    #[test]
    fn test_from_document_sorts_records_descending_by_percent() {
        let doc = LevelDocument {
            name: "Level".to_string(),
            verifier: "v".to_string(),
            verification: "https://example.com/v".to_string(),
            percent_to_qualify: 50,
            records: vec![
                Record { user: "a".to_string(), percent: 60, link: String::new() },
                Record { user: "b".to_string(), percent: 100, link: String::new() },
                Record { user: "c".to_string(), percent: 80, link: String::new() },
            ],
        };

        let level = Level::from_document(doc, "level");
        let percents: Vec<u8> = level.records.iter().map(|r| r.percent).collect();
        assert_eq!(percents, vec![100, 80, 60]);
        assert_eq!(level.path, "level");
    }

    #[test]
    fn test_record_sort_is_stable_for_equal_percents() {
        let doc = LevelDocument {
            name: "Level".to_string(),
            verifier: "v".to_string(),
            verification: String::new(),
            percent_to_qualify: 50,
            records: vec![
                Record { user: "first".to_string(), percent: 70, link: String::new() },
                Record { user: "second".to_string(), percent: 70, link: String::new() },
            ],
        };

        let level = Level::from_document(doc, "level");
        assert_eq!(level.records[0].user, "first");
        assert_eq!(level.records[1].user, "second");
    }

    #[test]
    fn test_editor_accepts_user_alias() {
        let json = r#"[{ "user": "alice", "role": "owner" }, { "name": "bob" }]"#;
        let editors: Vec<Editor> = serde_json::from_str(json).unwrap();
        assert_eq!(editors[0].name, "alice");
        assert_eq!(editors[0].role.as_deref(), Some("owner"));
        assert_eq!(editors[1].name, "bob");
        assert!(editors[1].role.is_none());
    }
}
