use rstest::rstest;

use super::*;

fn assert_close(expected: f64, actual: f64) {
    let tolerance = expected.abs() * 1e-3;
    assert!(
        (expected - actual).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}

#[rstest]
#[case("512Ki", 0.5)]
#[case("1Mi", 1.0)]
#[case("17Mi", 17.0)]
#[case("2Gi", 2_048.0)]
#[case("1.5Gi", 1_536.0)]
#[case("3Ti", 3_145_728.0)]
fn binary_suffix_to_mebibytes_test(#[case] quantity: &str, #[case] expected: f64) {
    assert_close(expected, Mebibytes::from_str(quantity).unwrap().value);
}

#[test]
fn decimal_suffix_to_mebibytes_test() {
    assert_close(1_000_000.0 / MI, Mebibytes::from_str("1M").unwrap().value);
    assert_close(1_500_000.0 / MI, Mebibytes::from_str("1500k").unwrap().value);
    assert_close(2_000_000_000.0 / MI, Mebibytes::from_str("2G").unwrap().value);
    assert_close(1_048_576.0 / MI, Mebibytes::from_str("1048576").unwrap().value);
    assert_close(1_000.0 / MI, Mebibytes::from_str("1e3").unwrap().value);
}

#[rstest]
#[case("512Mi", "512Mi")]
#[case("1Gi", "1024Mi")]
#[case("2Gi", "2048Mi")]
#[case("1Ti", "1048576Mi")]
#[case("1Ki", "0.000977Mi")]
#[case("1M", "0.953674Mi")]
#[case("1500k", "1.431Mi")]
#[case("100m", "9.537e-8Mi")]
#[case("Mi", "1Mi")]
#[case("-512Mi", "-512Mi")]
#[case("0", "0Mi")]
fn display_test(#[case] quantity: &str, #[case] expected: &str) {
    assert_eq!(expected, quantity_to_canonical(quantity).display);
}

#[test]
fn empty_quantity_is_one_byte_test() {
    let canonical = quantity_to_canonical("");

    assert_close(1.0 / MI, canonical.value);
    assert_eq!("9.537e-7Mi", canonical.display);
}

#[rstest]
#[case("abc123xyz!")]
#[case("1Xi")]
#[case("12 Mi")]
#[case("1.2.3Mi")]
#[case("Mi5")]
fn invalid_quantity_test(#[case] quantity: &str) {
    assert_eq!(
        Err(QuantityError::InvalidFormat(quantity.to_owned())),
        Mebibytes::from_str(quantity)
    );

    let canonical = quantity_to_canonical(quantity);
    assert_eq!(0.0, canonical.value);
    assert_eq!("0Mi", canonical.display);
}

#[test]
fn parsed_quantity_units_test() {
    let cpu = ParsedQuantity::from_str("500m").unwrap();
    assert_close(0.5, cpu.value);
    assert_close(500.0, cpu.millicores());

    let cpu = ParsedQuantity::from_str("2").unwrap();
    assert_close(2_000.0, cpu.millicores());

    let memory = ParsedQuantity::from_str("256Mi").unwrap();
    assert_close(256.0 * MI, memory.value);
    assert_close(256.0, memory.mebibytes().value);
}

#[test]
fn canonical_to_quantity_test() {
    assert_eq!(Quantity("512Mi".to_owned()), canonical_to_quantity(ResourceName::Memory, 512.0));
    assert_eq!(Quantity("0.5Mi".to_owned()), canonical_to_quantity(ResourceName::Memory, 0.5));
    assert_eq!(Quantity("500m".to_owned()), canonical_to_quantity(ResourceName::Cpu, 0.5));
    assert_eq!(Quantity("2000m".to_owned()), canonical_to_quantity(ResourceName::Cpu, 2.0));

    assert_eq!(Quantity("250m".to_owned()), millicores_to_quantity(250.0));
    assert_eq!(Quantity("1024Mi".to_owned()), mebibytes_to_quantity(1_024.0));
}
