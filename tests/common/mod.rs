// Common test fixtures shared across test files

use serde_json::json;
use uritemplate::Variables;

/// Variables from RFC 6570 section 3.2
#[allow(dead_code)]
pub fn rfc_variables() -> Variables {
    as_variables(json!({
        "count": ["one", "two", "three"],
        "dom": ["example", "com"],
        "dub": "me/too",
        "hello": "Hello World!",
        "half": "50%",
        "var": "value",
        "who": "fred",
        "base": "http://example.com/home/",
        "path": "/foo/bar",
        "list": ["red", "green", "blue"],
        "keys": {"semi": ";", "dot": ".", "comma": ","},
        "v": "6",
        "x": "1024",
        "y": "768",
        "empty": "",
        "empty_keys": {},
        "undef": null
    }))
}

#[allow(dead_code)]
pub fn as_variables(value: serde_json::Value) -> Variables {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("Expected object, got {}", other),
    }
}

/// Parse, check the round trip, and expand
#[allow(dead_code)]
pub fn expand(template: &str, values: &Variables) -> String {
    let parsed: uritemplate::Template = template
        .parse()
        .unwrap_or_else(|e| panic!("Failed to parse {}: {}", template, e));
    assert_eq!(parsed.source_form(), template, "round trip of {}", template);
    parsed.expand(values)
}
