use barcode_labels::{CODE_WIDTH, LabelError, normalize};
use proptest::prelude::*;

fn digit_line() -> impl Strategy<Value = String> {
    "[0-9]{1,12}"
}

fn blank_line() -> impl Strategy<Value = String> {
    "[ \t]{0,3}"
}

proptest! {
    #[test]
    fn one_code_per_non_blank_line(
        lines in prop::collection::vec(prop_oneof![digit_line(), blank_line()], 1..20)
    ) {
        let text = lines.join("\n");
        let codes = normalize(&text).unwrap();
        let expected: Vec<&String> = lines.iter().filter(|l| !l.trim().is_empty()).collect();
        prop_assert_eq!(codes.len(), expected.len());

        for (code, raw) in codes.iter().zip(expected) {
            let value: u64 = raw.trim().parse().unwrap();
            prop_assert_eq!(code.as_str().parse::<u64>().unwrap(), value);
            prop_assert!(code.as_str().bytes().all(|b| b.is_ascii_digit()));
            if value.to_string().len() <= CODE_WIDTH {
                prop_assert_eq!(code.as_str().len(), CODE_WIDTH);
            } else {
                prop_assert_eq!(code.as_str(), value.to_string());
            }
        }
    }

    #[test]
    fn any_non_digit_rejects_the_batch(
        prefix in prop::collection::vec(digit_line(), 0..5),
        bad in "[0-9]{0,4}[a-zA-Z.,+-][0-9a-z]{0,4}",
        suffix in prop::collection::vec(digit_line(), 0..5),
    ) {
        let mut lines = prefix.clone();
        lines.push(bad);
        lines.extend(suffix);
        let result = normalize(&lines.join("\n"));
        let is_invalid = matches!(
            result,
            Err(LabelError::InvalidCodeFormat { line, .. }) if line == prefix.len() + 1
        );
        prop_assert!(is_invalid);
    }

    #[test]
    fn normalize_is_idempotent(
        lines in prop::collection::vec(prop_oneof![digit_line(), blank_line()], 0..10)
    ) {
        let text = lines.join("\n");
        prop_assert_eq!(normalize(&text).unwrap(), normalize(&text).unwrap());
    }
}

#[test]
fn boundaries() {
    let zero = normalize("0").unwrap();
    assert_eq!(zero[0].as_str(), "00000000");
    let wide = normalize("123456789").unwrap();
    assert_eq!(wide[0].as_str(), "123456789");
    let mixed = normalize("123\n\n456").unwrap();
    let mixed: Vec<&str> = mixed.iter().map(|c| c.as_str()).collect();
    assert_eq!(mixed, vec!["00000123", "00000456"]);
}
