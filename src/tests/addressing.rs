use crate::addressing::{decode_ai, encode_ai_data_bytes, validate_ai_mixed_29bit, validate_ai_normal_fixed, AddressingFormat};
use crate::error::Error;

#[test]
fn test_ai_bytes_per_format() {
    assert_eq!(AddressingFormat::Normal11Bit.ai_bytes(), 0);
    assert_eq!(AddressingFormat::NormalFixed.ai_bytes(), 0);
    assert_eq!(AddressingFormat::Extended.ai_bytes(), 1);
    assert_eq!(AddressingFormat::Mixed11Bit.ai_bytes(), 1);
    assert_eq!(AddressingFormat::Mixed29Bit.ai_bytes(), 1);
}

#[test]
fn test_encode_ai_data_bytes_extended() {
    let bytes = encode_ai_data_bytes(AddressingFormat::Extended, Some(0x1A), None).unwrap();
    assert_eq!(bytes.as_ref(), &[0x1A]);
}

#[test]
fn test_encode_ai_data_bytes_requires_target_address() {
    assert_eq!(
        encode_ai_data_bytes(AddressingFormat::Extended, None, None).unwrap_err(),
        Error::MissingAddress("target_address")
    );
}

#[test]
fn test_decode_ai_extended() {
    let info = decode_ai(AddressingFormat::Extended, 0x18DA00F1, &[0x22]).unwrap();
    assert_eq!(info.target_address, Some(0x22));
    assert_eq!(info.source_address, None);
}

#[test]
fn test_decode_ai_normal_fixed() {
    let info = decode_ai(AddressingFormat::NormalFixed, 0x18DAF100, &[]).unwrap();
    assert_eq!(info.target_address, Some(0xF1));
    assert_eq!(info.source_address, Some(0x00));
}

#[test]
fn test_validate_ai_normal_fixed_accepts_either_form() {
    assert!(validate_ai_normal_fixed(Some(0x18DAF100), None, None).is_ok());
    assert!(validate_ai_normal_fixed(None, Some(0xF1), Some(0x00)).is_ok());
}

#[test]
fn test_validate_ai_normal_fixed_rejects_mismatch() {
    let err = validate_ai_normal_fixed(Some(0x18DAF100), Some(0xAB), Some(0x00)).unwrap_err();
    assert_eq!(err, Error::AddressMismatch { expected: 0xF1, actual: 0xAB });
}

#[test]
fn test_validate_ai_normal_fixed_rejects_ambiguous() {
    assert_eq!(validate_ai_normal_fixed(None, None, None).unwrap_err(), Error::AmbiguousAddressInformation);
}

#[test]
fn test_validate_ai_mixed_29bit_requires_address_extension() {
    assert_eq!(
        validate_ai_mixed_29bit(Some(0x18CE1234), None, None, None).unwrap_err(),
        Error::MissingAddress("address_extension")
    );
}

#[test]
fn test_validate_ai_normal_fixed_rejects_mismatched_partial_target_address() {
    let err = validate_ai_normal_fixed(Some(0x18DAF100), Some(0xAB), None).unwrap_err();
    assert_eq!(err, Error::AddressMismatch { expected: 0xF1, actual: 0xAB });
}

#[test]
fn test_validate_ai_normal_fixed_rejects_mismatched_partial_source_address() {
    let err = validate_ai_normal_fixed(Some(0x18DAF100), None, Some(0xAB)).unwrap_err();
    assert_eq!(err, Error::AddressMismatch { expected: 0x00, actual: 0xAB });
}

#[test]
fn test_validate_ai_normal_fixed_accepts_matching_partial_addresses() {
    assert!(validate_ai_normal_fixed(Some(0x18DAF100), Some(0xF1), None).is_ok());
    assert!(validate_ai_normal_fixed(Some(0x18DAF100), None, Some(0x00)).is_ok());
}

#[test]
fn test_validate_ai_mixed_29bit_rejects_mismatched_partial_addresses() {
    let err = validate_ai_mixed_29bit(Some(0x18CE1234), Some(0xAB), None, Some(0x00)).unwrap_err();
    assert_eq!(err, Error::AddressMismatch { expected: 0x12, actual: 0xAB });

    let err = validate_ai_mixed_29bit(Some(0x18CE1234), None, Some(0xAB), Some(0x00)).unwrap_err();
    assert_eq!(err, Error::AddressMismatch { expected: 0x34, actual: 0xAB });
}
