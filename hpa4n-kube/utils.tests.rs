use k8s_openapi::jiff::SignedDuration;
use rstest::rstest;

use super::*;

#[rstest]
#[case(0, "0s")]
#[case(-30, "0s")]
#[case(59, "59s")]
#[case(61, "1m01s")]
#[case(3_600, "1h00m")]
#[case(3_725, "1h02m")]
#[case(90_000, "1d01h")]
#[case(864_000, "10d00h")]
fn format_elapsed_test(#[case] secs: i64, #[case] expected: &str) {
    assert_eq!(expected, format_elapsed(secs));
}

#[test]
fn format_age_test() {
    let time = Timestamp::now() - SignedDuration::from_hours(49);
    assert_eq!("2d01h", format_age(&time));
}
