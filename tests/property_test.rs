// Property tests: round trip, idempotent expansion, encoding sets, prefix truncation

mod common;

use common::as_variables;
use proptest::prelude::*;
use serde_json::json;
use uritemplate::{Operator, Template};

fn literal() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9/:.?=&~_-]{1,8}"
}

fn var_spec() -> impl Strategy<Value = String> {
    (
        "[a-zA-Z_][a-zA-Z0-9_.]{0,6}",
        prop_oneof![
            Just(String::new()),
            Just("*".to_string()),
            (1u16..=10_000).prop_map(|n| format!(":{}", n)),
        ],
    )
        .prop_map(|(name, modifier)| format!("{}{}", name, modifier))
}

fn expression() -> impl Strategy<Value = String> {
    (
        prop::sample::select(Operator::ALL.to_vec()),
        prop::collection::vec(var_spec(), 1..4),
    )
        .prop_map(|(op, specs)| format!("{{{}{}}}", op.sign(), specs.join(",")))
}

fn template() -> impl Strategy<Value = String> {
    prop::collection::vec(prop_oneof![literal(), expression()], 1..6)
        .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn round_trip(raw in template()) {
        let parsed: Template = raw.parse().unwrap();
        prop_assert_eq!(parsed.source_form(), raw);
    }

    #[test]
    fn expansion_is_idempotent(raw in template(), value in ".{0,12}") {
        let parsed: Template = raw.parse().unwrap();
        let mut values = uritemplate::Variables::new();
        for name in parsed.variable_names() {
            values.insert(name.to_string(), json!(value.clone()));
        }
        prop_assert_eq!(parsed.expand(&values), parsed.expand(&values));
    }

    #[test]
    fn unreserved_rule_output(value in ".{0,24}") {
        let values = as_variables(json!({"v": value}));
        let out = "{v}".parse::<Template>().unwrap().expand(&values);
        let bytes = out.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'%' {
                prop_assert!(bytes[i + 1].is_ascii_hexdigit() && bytes[i + 2].is_ascii_hexdigit());
                i += 3;
            } else {
                prop_assert!(uritemplate::domain::template::is_unreserved(bytes[i] as char));
                i += 1;
            }
        }
    }

    #[test]
    fn reserved_rule_output(value in ".{0,24}") {
        let values = as_variables(json!({"v": value}));
        let out = "{+v}".parse::<Template>().unwrap().expand(&values);
        for ch in out.chars() {
            prop_assert!(
                ch == '%'
                    || uritemplate::domain::template::is_unreserved(ch)
                    || uritemplate::domain::template::is_reserved(ch)
            );
        }
    }

    #[test]
    fn prefix_truncates(value in "[a-z]{0,40}", max in 1u16..=30) {
        let values = as_variables(json!({"v": value.clone()}));
        let raw = format!("{{v:{}}}", max);
        let out = raw.parse::<Template>().unwrap().expand(&values);
        let expected: String = value.chars().take(max as usize).collect();
        prop_assert_eq!(out, expected);
    }
}
