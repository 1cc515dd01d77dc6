//! Tests for target profiles and parameter validation

use initseed_core::profile::{InputError, TargetParams, TargetProfile};

const SAMPLE: &str = r#"{
    "name": "sample",
    "nazo": [35741456, 35741708, 35741708, 35741784, 35741784],
    "mac": [0, 33, 71, 71, 38, 244],
    "version": 96,
    "frame": 6,
    "timer0": 3194
}"#;

const SAMPLE_FINGERPRINT: &str = "567d131ad1dc29c0caaab4b8adba75dbf2f5028a50cdddb171f22f9811451a71";

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_parse_sample_profile() {
    let profile = TargetProfile::from_json(SAMPLE).unwrap();
    assert_eq!(profile.name, "sample");

    let params = profile.params().unwrap();
    assert_eq!(
        params.nazo(),
        &[0x0221_5F10, 0x0221_600C, 0x0221_600C, 0x0221_6058, 0x0221_6058]
    );
    assert_eq!(params.mac(), &[0x00, 0x21, 0x47, 0x47, 0x26, 0xF4]);
    assert_eq!(params.version(), 0x60);
    assert_eq!(params.frame(), 6);
    assert_eq!(params.timer0(), 0xC7A);
}

#[test]
fn test_name_is_optional() {
    let json = r#"{"nazo":[1,2,3,4,5],"mac":[1,2,3,4,5,6],"version":0,"frame":0,"timer0":0}"#;
    let profile = TargetProfile::from_json(json).unwrap();
    assert!(profile.name.is_empty());
}

#[test]
fn test_malformed_json_is_reported() {
    let err = TargetProfile::from_json("{ not json").unwrap_err();
    assert!(matches!(err, InputError::Json(_)));
}

#[test]
fn test_missing_field_is_reported() {
    let err = TargetProfile::from_json(r#"{"nazo":[1,2,3,4,5]}"#).unwrap_err();
    assert!(matches!(err, InputError::Json(_)));
}

#[test]
fn test_json_round_trip() {
    let profile = TargetProfile::from_json(SAMPLE).unwrap();
    let again = TargetProfile::from_json(&profile.to_json().unwrap()).unwrap();
    assert_eq!(again, profile);
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_wrong_mac_length_in_profile() {
    let json = r#"{"nazo":[1,2,3,4,5],"mac":[1,2,3,4,5],"version":0,"frame":0,"timer0":0}"#;
    let err = TargetProfile::from_json(json).unwrap().params().unwrap_err();
    assert_eq!(
        err,
        InputError::InvalidLength {
            field: "mac",
            expected: 6,
            actual: 5
        }
    );
    assert_eq!(err.to_string(), "mac must have exactly 6 elements, got 5");
}

#[test]
fn test_empty_nazo_rejected() {
    let err = TargetParams::new(&[], &[0; 6], 0, 0, 0).unwrap_err();
    assert!(matches!(
        err,
        InputError::InvalidLength {
            field: "nazo",
            actual: 0,
            ..
        }
    ));
}

// ============================================================================
// Fingerprint
// ============================================================================

#[test]
fn test_fingerprint_is_stable() {
    let profile = TargetProfile::from_json(SAMPLE).unwrap();
    assert_eq!(profile.fingerprint().unwrap(), SAMPLE_FINGERPRINT);
}

#[test]
fn test_fingerprint_ignores_name() {
    let mut profile = TargetProfile::from_json(SAMPLE).unwrap();
    profile.name = "renamed".to_string();
    assert_eq!(profile.fingerprint().unwrap(), SAMPLE_FINGERPRINT);
}

#[test]
fn test_fingerprint_changes_with_parameters() {
    let mut profile = TargetProfile::from_json(SAMPLE).unwrap();
    profile.timer0 += 1;
    assert_ne!(profile.fingerprint().unwrap(), SAMPLE_FINGERPRINT);
}

#[test]
fn test_profile_from_params() {
    let params = TargetProfile::from_json(SAMPLE).unwrap().params().unwrap();
    let profile = TargetProfile::from(&params);
    assert_eq!(profile.params().unwrap(), params);
    assert_eq!(profile.fingerprint().unwrap(), SAMPLE_FINGERPRINT);
}
