//! Schema (DDL) models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response of a DDL fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseDdl {
    /// DDL statements in the order they would recreate the schema
    #[serde(default)]
    pub statements: Vec<String>,
    /// Serialized `google.protobuf.FileDescriptorSet` (base64 encoded in JSON)
    #[serde(
        default,
        with = "base64_bytes",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub proto_descriptors: Vec<u8>,
}

/// Metadata of a completed schema update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDatabaseDdlMetadata {
    pub database: String,
    #[serde(default)]
    pub statements: Vec<String>,
    /// One entry per statement that has been committed
    #[serde(default)]
    pub commit_timestamps: Vec<DateTime<Utc>>,
    /// Whether the operation was throttled by the service
    #[serde(default)]
    pub throttled: bool,
    #[serde(default)]
    pub progress: Vec<OperationProgress>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationProgress {
    #[serde(default)]
    pub progress_percent: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
}

/// Custom serialization for binary data as base64.
mod base64_bytes {
    use base64::{Engine as _, engine::general_purpose::STANDARD};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_ddl_base64_descriptors() {
        let json = r#"{"statements": ["CREATE TABLE T (Id INT64) PRIMARY KEY (Id)"], "protoDescriptors": "CgA="}"#;
        let ddl: DatabaseDdl = serde_json::from_str(json).unwrap();
        assert_eq!(ddl.statements.len(), 1);
        assert_eq!(ddl.proto_descriptors, vec![0x0a, 0x00]);

        let back = serde_json::to_value(&ddl).unwrap();
        assert_eq!(back["protoDescriptors"], "CgA=");
    }

    #[test]
    fn test_database_ddl_without_descriptors() {
        let ddl: DatabaseDdl = serde_json::from_str(r#"{"statements": []}"#).unwrap();
        assert!(ddl.proto_descriptors.is_empty());

        let back = serde_json::to_value(&ddl).unwrap();
        assert!(back.get("protoDescriptors").is_none());
    }

    #[test]
    fn test_invalid_base64_rejected() {
        let result: Result<DatabaseDdl, _> =
            serde_json::from_str(r#"{"protoDescriptors": "not base64!"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_update_metadata_timestamps() {
        let json = r#"{
            "database": "projects/p/instances/i/databases/d",
            "statements": ["CREATE INDEX SingersByName ON Singers(Name)"],
            "commitTimestamps": ["2024-05-01T12:00:00Z"],
            "progress": [{"progressPercent": 100, "startTime": "2024-05-01T11:59:00Z", "endTime": "2024-05-01T12:00:00Z"}]
        }"#;
        let metadata: UpdateDatabaseDdlMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(metadata.commit_timestamps.len(), 1);
        assert_eq!(metadata.progress[0].progress_percent, 100);
        assert!(metadata.progress[0].end_time.is_some());
        assert!(!metadata.throttled);
    }
}
