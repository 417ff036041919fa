//! Basic Validation Example
//!
//! This example validates a signup form with rule strings.
//!
//! Run with:
//! ```bash
//! cargo run -p ouroboros-rules --example basic_validation
//! ```

use std::collections::HashMap;

use ouroboros_rules::{Validator, Value};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("Basic Validation Example");
    println!("========================\n");

    let form = HashMap::from([
        ("username".to_string(), Value::from("ada")),
        ("email".to_string(), Value::from("ada@example")),
        ("age".to_string(), Value::from("seventeen")),
        ("plan".to_string(), Value::from("enterprise")),
        ("newsletter".to_string(), Value::from("1")),
        ("password".to_string(), Value::from("hunter2")),
        ("password_hint".to_string(), Value::from("the usual one")),
    ]);

    let rules = [
        ("username", "required|min:3|max:20"),
        ("email", "required|email"),
        ("age", "required|numeric"),
        ("plan", "in:free, pro"),
        ("newsletter", "boolean"),
        ("password_hint", "lt:password|unique"),
    ];

    let messages = [("plan.in", "Pick one of the listed plans")];

    let mut validator = match Validator::new(form, rules, messages) {
        Ok(validator) => validator,
        Err(err) => {
            eprintln!("Bad rule set: {}", err);
            return;
        }
    };

    match validator.valid() {
        Ok(true) => println!("Form is valid"),
        Ok(false) => {
            println!("Form has errors:");
            for (field, messages) in validator.errors() {
                for message in messages {
                    println!("  {}: {}", field, message);
                }
            }
        }
        Err(err) => eprintln!("Rule evaluation failed: {}", err),
    }
}
