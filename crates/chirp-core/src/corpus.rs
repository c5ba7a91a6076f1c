use crate::config::CorpusSchema;
use crate::error::{ChirpError, Result};
use serde_json::Value;
use std::path::Path;

// ---------------------------------------------------------------------------
// Corpus model
// ---------------------------------------------------------------------------

/// One item within a major unit (a verse, a line).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinorUnit {
    pub text: String,
    /// Embedded label, when the corpus carries one per item.
    pub label: Option<String>,
}

/// A top-level corpus division (a chapter, a tablet).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MajorUnit {
    pub label: String,
    pub minors: Vec<MinorUnit>,
}

/// An ordered, read-only corpus loaded whole into memory per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    pub majors: Vec<MajorUnit>,
}

impl Corpus {
    /// Load and validate a corpus JSON document using `schema` field names.
    pub fn load(path: &Path, schema: &CorpusSchema) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ChirpError::CorpusNotFound(path.display().to_string())
            } else {
                ChirpError::Io(e)
            }
        })?;
        let value: Value = serde_json::from_str(&data)?;
        Self::from_value(&value, schema)
    }

    /// Map a raw JSON value onto the typed corpus.
    ///
    /// Shape errors name the offending path, e.g. `[3].verses[0].verse_text`.
    pub fn from_value(value: &Value, schema: &CorpusSchema) -> Result<Self> {
        let entries = value
            .as_array()
            .ok_or_else(|| ChirpError::CorpusInvalid("document is not an array".to_string()))?;

        let mut majors = Vec::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            let label = field_str(entry, &schema.major_label, &format!("[{i}]"))?;
            let list = entry
                .get(&schema.minor_list)
                .and_then(Value::as_array)
                .ok_or_else(|| {
                    ChirpError::CorpusInvalid(format!(
                        "[{i}].{} is missing or not an array",
                        schema.minor_list
                    ))
                })?;

            let mut minors = Vec::with_capacity(list.len());
            for (j, item) in list.iter().enumerate() {
                let at = format!("[{i}].{}[{j}]", schema.minor_list);
                let text = field_str(item, &schema.text, &at)?;
                let label = match &schema.minor_label {
                    Some(key) => Some(field_str(item, key, &at)?),
                    None => None,
                };
                minors.push(MinorUnit { text, label });
            }
            majors.push(MajorUnit { label, minors });
        }

        Ok(Self { majors })
    }

    /// Render the corpus back into JSON using `schema` field names.
    pub fn to_value(&self, schema: &CorpusSchema) -> Value {
        let entries: Vec<Value> = self
            .majors
            .iter()
            .map(|major| {
                let items: Vec<Value> = major
                    .minors
                    .iter()
                    .map(|minor| {
                        let mut item = serde_json::Map::new();
                        item.insert(schema.text.clone(), Value::String(minor.text.clone()));
                        if let (Some(key), Some(label)) = (&schema.minor_label, &minor.label) {
                            item.insert(key.clone(), Value::String(label.clone()));
                        }
                        Value::Object(item)
                    })
                    .collect();
                let mut entry = serde_json::Map::new();
                entry.insert(
                    schema.major_label.clone(),
                    Value::String(major.label.clone()),
                );
                entry.insert(schema.minor_list.clone(), Value::Array(items));
                Value::Object(entry)
            })
            .collect();
        Value::Array(entries)
    }

    pub fn is_empty(&self) -> bool {
        self.majors.is_empty()
    }

    /// Total number of minor units across all major units.
    pub fn total_minors(&self) -> usize {
        self.majors.iter().map(|m| m.minors.len()).sum()
    }
}

fn field_str(value: &Value, key: &str, at: &str) -> Result<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| ChirpError::CorpusInvalid(format!("{at}.{key} is missing or not a string")))
}

/// Load an ordered label table: a JSON array of strings indexed by minor index.
pub fn load_label_table(path: &Path) -> Result<Vec<String>> {
    let data = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ChirpError::LabelTableNotFound(path.display().to_string())
        } else {
            ChirpError::Io(e)
        }
    })?;
    let table: Vec<String> = serde_json::from_str(&data)?;
    Ok(table)
}
