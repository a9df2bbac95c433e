//! Basic encoding and decoding.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use serde_shape::{describe, from_str, to_string, to_string_pretty};
use std::error::Error;

describe! {
    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct User {
        id: u32,
        name: String,
        email: String,
        nicknames: Vec<Option<String>>,
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let users = vec![
        User {
            id: 42,
            name: "Alice Johnson".to_string(),
            email: "alice@example.com".to_string(),
            nicknames: vec![Some("Al".to_string()), None],
        },
        User {
            id: 43,
            name: "Bob Smith".to_string(),
            email: "bob@example.com".to_string(),
            nicknames: vec![],
        },
    ];

    let text = to_string(&users)?;
    println!("Compact:\n{}\n", text);
    println!("Pretty:\n{}\n", to_string_pretty(&users[0])?);

    let users_back: Vec<User> = from_str(&text)?;
    assert_eq!(users, users_back);
    println!("✓ Round-trip successful");

    Ok(())
}
