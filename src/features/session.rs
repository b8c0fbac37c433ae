// src/features/session.rs — Session input record

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::infra::errors::ServiceError;

/// Placeholder for an absent categorical attribute.
pub const NOT_SET: &str = "(not set)";

/// The categorical attributes of a session, in input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalField {
    UtmCampaign,
    DeviceCategory,
    DeviceOs,
    DeviceBrand,
    DeviceBrowser,
    GeoCity,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 6] = [
        CategoricalField::UtmCampaign,
        CategoricalField::DeviceCategory,
        CategoricalField::DeviceOs,
        CategoricalField::DeviceBrand,
        CategoricalField::DeviceBrowser,
        CategoricalField::GeoCity,
    ];

    /// Column name as used in the feature schema.
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoricalField::UtmCampaign => "utm_campaign",
            CategoricalField::DeviceCategory => "device_category",
            CategoricalField::DeviceOs => "device_os",
            CategoricalField::DeviceBrand => "device_brand",
            CategoricalField::DeviceBrowser => "device_browser",
            CategoricalField::GeoCity => "geo_city",
        }
    }
}

impl fmt::Display for CategoricalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One visit as submitted by the caller.
///
/// Categorical attributes are optional; `None` and an explicit `null` both
/// become [`NOT_SET`] during transformation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(default)]
    pub utm_campaign: Option<String>,
    #[serde(default)]
    pub device_category: Option<String>,
    #[serde(default)]
    pub device_os: Option<String>,
    #[serde(default)]
    pub device_brand: Option<String>,
    #[serde(default)]
    pub device_browser: Option<String>,
    #[serde(default)]
    pub geo_city: Option<String>,
    pub visit_number: i64,
    pub visit_date: String,
    pub visit_time: String,
}

impl SessionRecord {
    /// Raw (possibly absent) value of a categorical attribute.
    pub fn categorical(&self, field: CategoricalField) -> Option<&str> {
        let value = match field {
            CategoricalField::UtmCampaign => &self.utm_campaign,
            CategoricalField::DeviceCategory => &self.device_category,
            CategoricalField::DeviceOs => &self.device_os,
            CategoricalField::DeviceBrand => &self.device_brand,
            CategoricalField::DeviceBrowser => &self.device_browser,
            CategoricalField::GeoCity => &self.geo_city,
        };
        value.as_deref()
    }

    /// Reject records whose shape cannot be scored.
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.visit_number < 1 {
            return Err(ServiceError::InputShape(format!(
                "visit_number must be at least 1, got {}",
                self.visit_number
            )));
        }
        if self.visit_date.trim().is_empty() {
            return Err(ServiceError::InputShape("visit_date is empty".into()));
        }
        if self.visit_time.trim().is_empty() {
            return Err(ServiceError::InputShape("visit_time is empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> SessionRecord {
        SessionRecord {
            visit_number: 1,
            visit_date: "2024-01-01".into(),
            visit_time: "10:15:00".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_optional_fields_default_to_none() {
        let json = r#"{"visit_number": 3, "visit_date": "2024-01-01", "visit_time": "08:00:00"}"#;
        let parsed: SessionRecord = serde_json::from_str(json).unwrap();
        assert!(parsed.utm_campaign.is_none());
        assert!(parsed.geo_city.is_none());
        assert_eq!(parsed.visit_number, 3);
    }

    #[test]
    fn test_explicit_null_is_none() {
        let json = r#"{"geo_city": null, "visit_number": 1, "visit_date": "2024-01-01", "visit_time": "08:00:00"}"#;
        let parsed: SessionRecord = serde_json::from_str(json).unwrap();
        assert!(parsed.geo_city.is_none());
    }

    #[test]
    fn test_missing_visit_number_rejected() {
        let json = r#"{"visit_date": "2024-01-01", "visit_time": "08:00:00"}"#;
        assert!(serde_json::from_str::<SessionRecord>(json).is_err());
    }

    #[test]
    fn test_validate_visit_number() {
        assert!(record().validate().is_ok());

        let zero = SessionRecord {
            visit_number: 0,
            ..record()
        };
        let err = zero.validate().unwrap_err();
        assert!(err.is_client_fault());
        assert!(err.to_string().contains("visit_number"));
    }

    #[test]
    fn test_validate_blank_time() {
        let blank = SessionRecord {
            visit_time: "  ".into(),
            ..record()
        };
        assert!(matches!(
            blank.validate(),
            Err(ServiceError::InputShape(_))
        ));
    }

    #[test]
    fn test_categorical_lookup() {
        let r = SessionRecord {
            device_os: Some("Android".into()),
            ..record()
        };
        assert_eq!(r.categorical(CategoricalField::DeviceOs), Some("Android"));
        assert_eq!(r.categorical(CategoricalField::GeoCity), None);
    }

    #[test]
    fn test_field_names_match_serde() {
        for field in CategoricalField::ALL {
            let json = serde_json::to_string(&field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.as_str()));
        }
    }
}
