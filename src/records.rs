//! Websupport zone record types

use serde::{Deserialize, Deserializer, Serialize};

/// TTL used for challenge records
pub const CHALLENGE_TTL: u32 = 10;

/// DNS record type as reported by Websupport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    A,
    #[allow(clippy::upper_case_acronyms)]
    AAAA,
    #[allow(clippy::upper_case_acronyms)]
    ANAME,
    #[allow(clippy::upper_case_acronyms)]
    CNAME,
    MX,
    NS,
    #[allow(clippy::upper_case_acronyms)]
    SRV,
    #[allow(clippy::upper_case_acronyms)]
    TXT,
    #[allow(clippy::upper_case_acronyms)]
    CAA,
    /// Any type this hook does not manage
    #[serde(other)]
    Other,
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordType::A => write!(f, "A"),
            RecordType::AAAA => write!(f, "AAAA"),
            RecordType::ANAME => write!(f, "ANAME"),
            RecordType::CNAME => write!(f, "CNAME"),
            RecordType::MX => write!(f, "MX"),
            RecordType::NS => write!(f, "NS"),
            RecordType::SRV => write!(f, "SRV"),
            RecordType::TXT => write!(f, "TXT"),
            RecordType::CAA => write!(f, "CAA"),
            RecordType::Other => write!(f, "OTHER"),
        }
    }
}

/// A record in a Websupport zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRecord {
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// Provider-assigned ID, absent until created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Name relative to the zone
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ZoneRecord {
    /// New challenge TXT record carrying `token` at `name`
    pub fn challenge(name: &str, token: &str) -> Self {
        Self {
            record_type: RecordType::TXT,
            id: None,
            name: name.to_string(),
            content: token.to_string(),
            ttl: Some(CHALLENGE_TTL),
            note: None,
        }
    }

    /// Whether this is the TXT record publishing `token` at `name`
    pub fn is_challenge(&self, name: &str, token: &str) -> bool {
        self.record_type == RecordType::TXT && self.name == name && self.content == token
    }
}

/// Decode a string field where the provider may send `null`
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `GET /v1/user/self/zone/{zone}/record`
#[derive(Debug, Default, Deserialize)]
pub struct RecordList {
    #[serde(default)]
    pub items: Vec<ZoneRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_challenge_record_serialization() {
        let record = ZoneRecord::challenge("_acme-challenge", "abc123");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"type":"TXT","name":"_acme-challenge","content":"abc123","ttl":10}"#
        );
    }

    #[test]
    fn test_record_list_deserialization() {
        let body = r#"{
            "items": [
                {"id": 1, "type": "A", "name": "@", "content": "1.2.3.4", "ttl": 600, "note": ""},
                {"id": 2, "type": "TXT", "name": "_acme-challenge", "content": "abc123", "ttl": 10, "note": null},
                {"id": 3, "type": "TLSA", "name": "_443._tcp", "content": "3 1 1 ab", "ttl": 600}
            ],
            "pager": {"page": 1, "pagesize": 0, "items": 3}
        }"#;

        let list: RecordList = serde_json::from_str(body).unwrap();
        assert_eq!(list.items.len(), 3);
        assert_eq!(list.items[0].record_type, RecordType::A);
        assert_eq!(list.items[1].id, Some(2));
        assert!(list.items[1].is_challenge("_acme-challenge", "abc123"));
        assert_eq!(list.items[1].note, None);
        assert_eq!(list.items[2].record_type, RecordType::Other);
    }

    #[test]
    fn test_null_strings_decode_as_empty() {
        let body = r#"{"items": [{"id": 4, "type": "TXT", "name": null, "content": null}]}"#;

        let list: RecordList = serde_json::from_str(body).unwrap();
        assert_eq!(list.items[0].name, "");
        assert_eq!(list.items[0].content, "");
        assert!(!list.items[0].is_challenge("_acme-challenge", "abc123"));
    }

    #[test]
    fn test_missing_items_is_empty() {
        let list: RecordList = serde_json::from_str("{}").unwrap();
        assert!(list.items.is_empty());
    }

    #[test]
    fn test_is_challenge_requires_all_fields() {
        let record = ZoneRecord::challenge("_acme-challenge", "abc123");
        assert!(!record.is_challenge("_acme-challenge", "other"));
        assert!(!record.is_challenge("_acme-challenge.www", "abc123"));

        let mut cname = record.clone();
        cname.record_type = RecordType::CNAME;
        assert!(!cname.is_challenge("_acme-challenge", "abc123"));
    }
}
