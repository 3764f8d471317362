use crate::domain::model::{CustomerId, CustomerMap, CustomerRecord, DuplicatePolicy, GeoPoint};
use crate::utils::error::{EtlError, Result};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
struct RawCustomer {
    user_id: CustomerId,
    name: String,
    #[serde(deserialize_with = "deserialize_coordinate")]
    latitude: f64,
    #[serde(deserialize_with = "deserialize_coordinate")]
    longitude: f64,
}

// 座標可能是數字或字串，例如 "52.986375"
fn deserialize_coordinate<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawCoordinate {
        Number(f64),
        Text(String),
    }

    match RawCoordinate::deserialize(deserializer)? {
        RawCoordinate::Number(value) => Ok(value),
        RawCoordinate::Text(text) => text.trim().parse::<f64>().map_err(|_| {
            serde::de::Error::custom(format!("coordinate '{}' is not a number", text))
        }),
    }
}

/// Parses newline-delimited JSON customer records.
///
/// Blank lines are skipped. Any other line that fails to parse aborts the
/// whole parse; no partial map is returned.
pub fn parse_customers(content: &str, policy: DuplicatePolicy) -> Result<CustomerMap> {
    let mut customers = CustomerMap::new();
    let mut first_seen: HashMap<CustomerId, usize> = HashMap::new();

    for (index, line) in content.lines().enumerate() {
        let line_no = index + 1;
        if line.trim().is_empty() {
            continue;
        }

        let record = parse_line(line, line_no)?;

        if let Some(&first_line) = first_seen.get(&record.id) {
            match policy {
                DuplicatePolicy::Reject => {
                    return Err(EtlError::DuplicateIdError {
                        id: record.id.to_string(),
                        line: line_no,
                        first_line,
                    });
                }
                DuplicatePolicy::Overwrite => {
                    tracing::warn!(
                        "⚠️ user_id {} on line {} overwrites the record from line {}",
                        record.id,
                        line_no,
                        first_line
                    );
                }
            }
        } else {
            first_seen.insert(record.id.clone(), line_no);
        }

        tracing::debug!("Parsed customer {} ({}) on line {}", record.id, record.name, line_no);
        customers.insert(record.id.clone(), record);
    }

    Ok(customers)
}

pub fn parse_line(line: &str, line_no: usize) -> Result<CustomerRecord> {
    let raw: RawCustomer = serde_json::from_str(line).map_err(|source| EtlError::ParseError {
        line: line_no,
        source,
    })?;

    let location = GeoPoint::new(raw.latitude, raw.longitude);
    check_location(&location, line_no)?;

    Ok(CustomerRecord {
        id: raw.user_id,
        name: raw.name,
        location,
    })
}

fn check_location(location: &GeoPoint, line_no: usize) -> Result<()> {
    if !location.latitude.is_finite() || !(-90.0..=90.0).contains(&location.latitude) {
        return Err(EtlError::InvalidRecordError {
            line: line_no,
            reason: format!("latitude {} is outside [-90, 90]", location.latitude),
        });
    }
    if !location.longitude.is_finite() || !(-180.0..=180.0).contains(&location.longitude) {
        return Err(EtlError::InvalidRecordError {
            line: line_no,
            reason: format!("longitude {} is outside [-180, 180]", location.longitude),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_CUSTOMERS: &str = r#"{"latitude": "51.92893", "user_id": 1, "name": "Alice Cahill", "longitude": "-10.27699"}
{"latitude": "51.8856167", "user_id": 2, "name": "Ian McArdle", "longitude": "-10.4240951"}
{"latitude": "52.986375", "user_id": 12, "name": "Christina McArdle", "longitude": "-6.043701"}
"#;

    #[test]
    fn test_parse_valid_customers() {
        let customers = parse_customers(VALID_CUSTOMERS, DuplicatePolicy::Reject).unwrap();

        assert_eq!(customers.len(), 3);

        let alice = &customers[&CustomerId::Numeric(1)];
        assert_eq!(alice.name, "Alice Cahill");
        assert_eq!(alice.location, GeoPoint::new(51.92893, -10.27699));

        let ian = &customers[&CustomerId::Numeric(2)];
        assert_eq!(ian.name, "Ian McArdle");
        assert_eq!(ian.location, GeoPoint::new(51.8856167, -10.4240951));

        let christina = &customers[&CustomerId::Numeric(12)];
        assert_eq!(christina.name, "Christina McArdle");
        assert_eq!(christina.location, GeoPoint::new(52.986375, -6.043701));
    }

    #[test]
    fn test_parse_numeric_coordinates_and_text_ids() {
        let content = r#"{"user_id": "abc", "name": "Text Id", "latitude": 53.1, "longitude": -6.2}"#;
        let customers = parse_customers(content, DuplicatePolicy::Reject).unwrap();

        let record = &customers[&CustomerId::from("abc")];
        assert_eq!(record.location, GeoPoint::new(53.1, -6.2));
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let content = format!("\n{}\n   \n", VALID_CUSTOMERS);
        let customers = parse_customers(&content, DuplicatePolicy::Reject).unwrap();
        assert_eq!(customers.len(), 3);
    }

    #[test]
    fn test_malformed_json_aborts_parse() {
        let content = format!("{}{{\"user_id\": 5, \"name\": \"Broken\"\n", VALID_CUSTOMERS);
        let err = parse_customers(&content, DuplicatePolicy::Reject).unwrap_err();

        match err {
            EtlError::ParseError { line, .. } => assert_eq!(line, 4),
            other => panic!("Expected ParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_field_is_parse_error() {
        let content = r#"{"user_id": 1, "name": "No Longitude", "latitude": "51.9"}"#;
        let err = parse_customers(content, DuplicatePolicy::Reject).unwrap_err();

        assert!(matches!(err, EtlError::ParseError { line: 1, .. }));
        assert!(err.to_string().contains("longitude"));
    }

    #[test]
    fn test_non_numeric_coordinate_is_parse_error() {
        let content = r#"{"user_id": 1, "name": "Bad", "latitude": "north", "longitude": "-6.2"}"#;
        let err = parse_customers(content, DuplicatePolicy::Reject).unwrap_err();
        assert!(matches!(err, EtlError::ParseError { line: 1, .. }));
    }

    #[test]
    fn test_non_string_name_is_parse_error() {
        let content = r#"{"user_id": 1, "name": 42, "latitude": "51.9", "longitude": "-6.2"}"#;
        let err = parse_customers(content, DuplicatePolicy::Reject).unwrap_err();
        assert!(matches!(err, EtlError::ParseError { line: 1, .. }));
    }

    #[test]
    fn test_out_of_range_coordinates_are_rejected() {
        let content = r#"{"user_id": 1, "name": "Far", "latitude": "95.0", "longitude": "-6.2"}"#;
        let err = parse_customers(content, DuplicatePolicy::Reject).unwrap_err();
        assert!(matches!(err, EtlError::InvalidRecordError { line: 1, .. }));

        let content = r#"{"user_id": 1, "name": "Nan", "latitude": "NaN", "longitude": "-6.2"}"#;
        let err = parse_customers(content, DuplicatePolicy::Reject).unwrap_err();
        assert!(matches!(err, EtlError::InvalidRecordError { line: 1, .. }));
    }

    #[test]
    fn test_duplicate_id_rejected_by_default() {
        let content = format!(
            "{}{}\n",
            VALID_CUSTOMERS,
            r#"{"user_id": 2, "name": "Ian Again", "latitude": "52.0", "longitude": "-6.0"}"#
        );
        let err = parse_customers(&content, DuplicatePolicy::Reject).unwrap_err();

        match err {
            EtlError::DuplicateIdError {
                id,
                line,
                first_line,
            } => {
                assert_eq!(id, "2");
                assert_eq!(line, 4);
                assert_eq!(first_line, 2);
            }
            other => panic!("Expected DuplicateIdError, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_id_overwrite_keeps_last() {
        let content = format!(
            "{}{}\n",
            VALID_CUSTOMERS,
            r#"{"user_id": 2, "name": "Ian Again", "latitude": "52.0", "longitude": "-6.0"}"#
        );
        let customers = parse_customers(&content, DuplicatePolicy::Overwrite).unwrap();

        assert_eq!(customers.len(), 3);
        assert_eq!(customers[&CustomerId::Numeric(2)].name, "Ian Again");
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let content = r#"{"user_id": 9, "name": "Extra", "latitude": "53.0", "longitude": "-6.0", "email": "x@example.com"}"#;
        let customers = parse_customers(content, DuplicatePolicy::Reject).unwrap();
        assert_eq!(customers.len(), 1);
    }

    #[test]
    fn test_ids_beyond_i64_are_accepted() {
        let content = r#"{"user_id": 9223372036854775808, "name": "Big", "latitude": "53.0", "longitude": "-6.0"}
{"user_id": 18446744073709551615, "name": "Bigger", "latitude": "53.0", "longitude": "-6.0"}"#;
        let customers = parse_customers(content, DuplicatePolicy::Reject).unwrap();

        let ids: Vec<String> = customers.keys().map(|id| id.to_string()).collect();
        assert_eq!(ids, vec!["9223372036854775808", "18446744073709551615"]);
    }

    #[test]
    fn test_integral_float_id_matches_integer_id() {
        let content = r#"{"user_id": 7.0, "name": "Float Seven", "latitude": "53.0", "longitude": "-6.0"}"#;
        let customers = parse_customers(content, DuplicatePolicy::Reject).unwrap();
        assert_eq!(customers[&CustomerId::Numeric(7)].name, "Float Seven");

        let content = r#"{"user_id": 7, "name": "Seven", "latitude": "53.0", "longitude": "-6.0"}
{"user_id": 7.0, "name": "Seven Again", "latitude": "53.0", "longitude": "-6.0"}"#;
        let err = parse_customers(content, DuplicatePolicy::Reject).unwrap_err();
        assert!(matches!(
            err,
            EtlError::DuplicateIdError {
                line: 2,
                first_line: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_fractional_or_non_scalar_id_is_parse_error() {
        for user_id in ["7.5", "true", "null", "[1]"] {
            let content = format!(
                r#"{{"user_id": {}, "name": "Odd", "latitude": "53.0", "longitude": "-6.0"}}"#,
                user_id
            );
            let err = parse_customers(&content, DuplicatePolicy::Reject).unwrap_err();
            assert!(
                matches!(err, EtlError::ParseError { line: 1, .. }),
                "user_id {} should be rejected, got {:?}",
                user_id,
                err
            );
        }
    }
}
