// Wire-level types for the APIC object tree.
//
// Every object travels as `{ "<class>": { "attributes": { ... } } }` and
// responses wrap records in `{ "totalCount": "<n>", "imdata": [ ... ] }`.
// Attribute values are always strings on the wire; `IndexMap` keeps the
// attribute order stable across payloads and rendered output.

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Attribute map of a managed object. All values are strings on the wire.
pub type Attributes = IndexMap<String, String>;

/// The body under a class key: the attribute set.
///
/// Responses may also carry `children`; they are ignored here -- this crate
/// only deals in single-object (non-subtree) payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassBody {
    pub attributes: Attributes,
}

/// A raw single-entry record as it appears in `imdata`: class name -> body.
pub type MoRecord = IndexMap<String, ClassBody>;

/// A managed object: its class and attribute set.
///
/// Serializes to and from the wire record shape, so `current`/`proposed`/
/// `sent` render exactly as the APIC would show them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedObject {
    pub class: String,
    pub attributes: Attributes,
}

impl ManagedObject {
    pub fn new(class: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            class: class.into(),
            attributes,
        }
    }

    /// Pull the single class entry out of a raw record.
    pub fn from_record(record: MoRecord) -> Option<Self> {
        record
            .into_iter()
            .next()
            .map(|(class, body)| Self::new(class, body.attributes))
    }

    /// The object's DN, when the controller included it.
    pub fn dn(&self) -> Option<&str> {
        self.attributes.get("dn").map(String::as_str)
    }

    /// The object's key name, when present.
    pub fn name(&self) -> Option<&str> {
        self.attributes.get("name").map(String::as_str)
    }

    /// A single attribute value.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

impl Serialize for ManagedObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        #[derive(Serialize)]
        struct BodyRef<'a> {
            attributes: &'a Attributes,
        }

        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(
            &self.class,
            &BodyRef {
                attributes: &self.attributes,
            },
        )?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for ManagedObject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = MoRecord::deserialize(deserializer)?;
        Self::from_record(record).ok_or_else(|| D::Error::custom("empty managed-object record"))
    }
}

/// The `{ totalCount, imdata }` response envelope.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(rename = "totalCount", default)]
    pub total_count: Option<String>,
    #[serde(default)]
    pub imdata: Vec<MoRecord>,
}

impl Envelope {
    /// The error record's `(code, text)`, if the envelope carries one.
    pub fn error(&self) -> Option<(String, String)> {
        let body = self.imdata.iter().find_map(|record| record.get("error"))?;
        let code = body
            .attributes
            .get("code")
            .cloned()
            .unwrap_or_else(|| "unknown".to_owned());
        let text = body
            .attributes
            .get("text")
            .cloned()
            .unwrap_or_else(|| "unknown APIC error".to_owned());
        Some((code, text))
    }

    /// All non-error records as `ManagedObject`s.
    pub fn objects(self) -> Vec<ManagedObject> {
        self.imdata
            .into_iter()
            .filter(|record| !record.contains_key("error"))
            .filter_map(ManagedObject::from_record)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn managed_object_round_trips_wire_shape() {
        let json = r#"{"rtctrlMatchAsPathRegexTerm":{"attributes":{"name":"t1","regex":".*"}}}"#;
        let mo: ManagedObject = serde_json::from_str(json).unwrap();
        assert_eq!(mo.class, "rtctrlMatchAsPathRegexTerm");
        assert_eq!(mo.attribute("regex"), Some(".*"));
        assert_eq!(serde_json::to_string(&mo).unwrap(), json);
    }

    #[test]
    fn envelope_extracts_error_record() {
        let json = r#"{
            "totalCount": "0",
            "imdata": [
                { "error": { "attributes": { "code": "122", "text": "unknown managed object class foo" } } }
            ]
        }"#;
        let envelope: Envelope = serde_json::from_str(json).unwrap();
        let (code, text) = envelope.error().unwrap();
        assert_eq!(code, "122");
        assert_eq!(text, "unknown managed object class foo");
        assert!(envelope.objects().is_empty());
    }

    #[test]
    fn envelope_extracts_objects() {
        let json = r#"{
            "totalCount": "1",
            "imdata": [
                { "rtctrlMatchAsPathRegexTerm": { "attributes": {
                    "dn": "uni/tn-prod/subj-rules/aspathrxtrm-t1",
                    "name": "t1"
                } } }
            ]
        }"#;
        let envelope: Envelope = serde_json::from_str(json).unwrap();
        let objects = envelope.objects();
        assert_eq!(objects.len(), 1);
        assert_eq!(
            objects[0].dn(),
            Some("uni/tn-prod/subj-rules/aspathrxtrm-t1")
        );
    }
}
