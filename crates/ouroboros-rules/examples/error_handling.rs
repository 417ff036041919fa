//! Error Handling Example
//!
//! This example separates the three ways a check can go wrong: a value
//! failing a rule (collected), a bad rule argument (construction error), and
//! an impossible comparison (evaluation error).
//!
//! Run with:
//! ```bash
//! cargo run -p ouroboros-rules --example error_handling
//! ```

use std::collections::HashMap;

use ouroboros_rules::{RuleError, Validator, ValidatorConfig, Value};

const NO_MESSAGES: [(&str, &str); 0] = [];

fn main() {
    println!("Error Handling Example");
    println!("======================\n");

    demonstrate_collected_failures();
    demonstrate_configuration_error();
    demonstrate_type_mismatch();
    demonstrate_reentrancy();
}

fn demonstrate_collected_failures() {
    println!("1. Collected failures");
    println!("---------------------");

    let data = HashMap::from([("code".to_string(), Value::from("abcdef"))]);
    let mut validator = Validator::new(data, [("code", "required|numeric|max:4")], NO_MESSAGES)
        .expect("rules are well-formed");

    let valid = validator.valid().expect("no comparison rules");
    println!("  valid: {}", valid);
    println!("  {}", validator.errors());
    for message in validator.compact_errors() {
        println!("    - {}", message);
    }
    println!();
}

fn demonstrate_configuration_error() {
    println!("2. Configuration error");
    println!("----------------------");

    match Validator::new(HashMap::new(), [("name", "max:ten")], NO_MESSAGES) {
        Ok(_) => println!("  Unexpected success"),
        Err(err) => {
            println!("  configuration: {}", err.is_configuration());
            println!("  {}", err);
        }
    }
    println!();
}

fn demonstrate_type_mismatch() {
    println!("3. Type mismatch");
    println!("----------------");

    let data = HashMap::from([
        ("items".to_string(), Value::from(vec![1, 2, 3])),
        ("label".to_string(), Value::from("abc")),
    ]);
    let mut validator = Validator::new(data, [("items", "lt:label")], NO_MESSAGES)
        .expect("rules are well-formed");

    match validator.valid() {
        Err(err @ RuleError::TypeMismatch { .. }) => println!("  {}", err),
        other => println!("  Unexpected: {:?}", other),
    }
    println!();
}

fn demonstrate_reentrancy() {
    println!("4. Repeated runs");
    println!("----------------");

    let mut appending = Validator::new(HashMap::new(), [("name", "required")], NO_MESSAGES)
        .expect("rules are well-formed");
    appending.valid().expect("no comparison rules");
    appending.valid().expect("no comparison rules");
    println!("  append mode after two runs: {} message(s)", appending.errors().message_count());

    let mut resetting = Validator::with_config(
        HashMap::new(),
        [("name", "required")],
        NO_MESSAGES,
        ValidatorConfig::new().reset_on_run(),
    )
    .expect("rules are well-formed");
    resetting.valid().expect("no comparison rules");
    resetting.valid().expect("no comparison rules");
    println!("  reset mode after two runs: {} message(s)", resetting.errors().message_count());
}
