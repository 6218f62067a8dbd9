//! Unit tests for sequence domain types and formatting.

use crate::sequence::domain::{ReferenceNumber, SequenceDomain, SequenceValue};
use rstest::rstest;

#[rstest]
#[case(SequenceDomain::Task, 42, "TASK-000042")]
#[case(SequenceDomain::Receive, 7, "RCV-000007")]
#[case(SequenceDomain::Task, 1_234_567, "TASK-1234567")]
fn reference_number_formats_with_prefix_and_padding(
    #[case] domain: SequenceDomain,
    #[case] value: u64,
    #[case] expected: &str,
) {
    let reference = ReferenceNumber::new(domain, SequenceValue::new(value));
    assert_eq!(reference.to_string(), expected);
}

#[rstest]
#[case("task", SequenceDomain::Task)]
#[case(" Receive ", SequenceDomain::Receive)]
fn domain_parses_storage_key(#[case] input: &str, #[case] expected: SequenceDomain) {
    assert_eq!(SequenceDomain::try_from(input), Ok(expected));
    assert_eq!(SequenceDomain::try_from(expected.as_str()), Ok(expected));
}

#[test]
fn domain_rejects_unknown_key() {
    assert!(SequenceDomain::try_from("invoice").is_err());
}
