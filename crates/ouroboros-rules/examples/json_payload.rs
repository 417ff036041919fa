//! JSON Payload Example
//!
//! This example validates a decoded API request body and returns the error
//! report as JSON.
//!
//! Run with:
//! ```bash
//! cargo run -p ouroboros-rules --features serde --example json_payload
//! ```

use ouroboros_rules::Validator;
use serde_json::json;

fn main() {
    let body = json!({
        "title": "",
        "priority": 7,
        "assignees": ["ana", "bo", "cy", "di"],
        "starts": 20,
        "ends": 10
    });

    let rules = [
        ("title", "required|max:80"),
        ("priority", "numeric|min:1|max:5"),
        ("assignees", "max:3"),
        ("starts", "lte:ends"),
    ];
    let messages = [("starts.lte", "The start must not be after the end")];

    let mut validator = match Validator::from_json(&body, rules, messages) {
        Ok(validator) => validator,
        Err(err) => {
            eprintln!("Bad rule set: {}", err);
            return;
        }
    };

    match validator.valid() {
        Ok(valid) => {
            let response = json!({
                "valid": valid,
                "errors": validator.report(false),
            });
            match serde_json::to_string_pretty(&response) {
                Ok(text) => println!("{}", text),
                Err(err) => eprintln!("Could not encode report: {}", err),
            }
        }
        Err(err) => eprintln!("Rule evaluation failed: {}", err),
    }
}
