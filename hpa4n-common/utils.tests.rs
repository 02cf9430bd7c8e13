use rstest::rstest;

use super::*;

#[rstest]
#[case("Hello world", 5, "Hello")]
#[case("Hello", 10, "Hello")]
#[case("zażółć", 3, "zaż")]
#[case("", 3, "")]
fn truncate_test(#[case] input: &str, #[case] max_chars: usize, #[case] expected: &str) {
    assert_eq!(expected, truncate(input, max_chars));
}

#[rstest]
#[case("Hello world", 6, "Hello…")]
#[case("Hello", 5, "Hello")]
#[case("Hello", 0, "")]
fn truncate_with_ellipsis_test(#[case] input: &str, #[case] max_chars: usize, #[case] expected: &str) {
    assert_eq!(expected, truncate_with_ellipsis(input, max_chars));
}

#[test]
fn add_padding_test() {
    assert_eq!("cpu   ", add_padding("cpu", 6));
    assert_eq!("mem", add_padding("memory", 3));
    assert_eq!("", add_padding("memory", 0));
}

#[test]
fn render_table_test() {
    let rows = vec![
        vec!["web", "80%", "2"],
        vec!["backend-api", "--", "10"],
    ];

    assert_eq!(vec![11, 3, 8], column_widths(&["NAME", "CPU", "REPLICAS"], &rows));
    assert_eq!(
        "NAME         CPU  REPLICAS\nweb          80%  2\nbackend-api  --   10\n",
        render_table(&["NAME", "CPU", "REPLICAS"], &rows, 2)
    );
}
