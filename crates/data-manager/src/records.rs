//! Integration request records as the dashboard reads them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Processing state of an integration request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestStatus {
    #[serde(rename = "S")]
    Success,
    #[serde(rename = "F")]
    Failure,
    #[serde(rename = "P")]
    Processing,
}

/// One integration request. A request whose status was never set counts
/// toward the monthly total only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestRecord {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub status: Option<RequestStatus>,
}

impl RequestRecord {
    pub fn new(timestamp: DateTime<Utc>, status: Option<RequestStatus>) -> Self {
        Self { timestamp, status }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let codes: Vec<RequestStatus> = serde_json::from_str(r#"["S", "F", "P"]"#).unwrap();
        assert_eq!(
            codes,
            [
                RequestStatus::Success,
                RequestStatus::Failure,
                RequestStatus::Processing
            ]
        );
        assert!(serde_json::from_str::<RequestStatus>(r#""X""#).is_err());
    }

    #[test]
    fn test_record_deserialization() {
        let record: RequestRecord =
            serde_json::from_str(r#"{"timestamp": "2024-03-05T10:00:00Z", "status": "F"}"#)
                .unwrap();
        assert_eq!(record.status, Some(RequestStatus::Failure));

        let record: RequestRecord =
            serde_json::from_str(r#"{"timestamp": "2024-03-05T10:00:00Z"}"#).unwrap();
        assert_eq!(record.status, None);
    }
}
