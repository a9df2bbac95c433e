//! Describing recursive types and decoding against a descriptor.
//!
//! Run with: RUST_LOG=serde_shape=trace cargo run --example descriptors

use serde::{Deserialize, Serialize};
use serde_shape::{decode, describe, from_str, to_string, Describe, Error};
use tracing_subscriber::EnvFilter;

describe! {
    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Job {
        title: String,
        salary: f64,
        manager: Option<Box<Person>>,
    }
}

describe! {
    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Person {
        name: String,
        sex: char,
        job: Option<Job>,
        seating: Vec<Vec<Option<String>>>,
    }
}

#[derive(Serialize)]
struct Link {
    id: u32,
    next: Option<Box<Link>>,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let descriptor = Person::descriptor();
    println!("Descriptor for {}:\n{:#?}\n", descriptor.name(), descriptor);

    let text = r#"{
        "name": "Ada",
        "sex": "F",
        "job": {"title": "Engineer, Senior", "salary": 85000.5,
                "manager": {"name": "Grace", "sex": "F", "job": null, "seating": []}},
        "seating": [["Alan", null], null, []]
    }"#;

    let value = decode(text, &descriptor)?;
    println!("Decoded value:\n{}\n", value);

    let person: Person = from_str(text)?;
    println!("Typed: {:?}\n", person);
    println!("Re-encoded:\n{}\n", to_string(&person)?);

    match from_str::<Person>(r#"{"name": "Ada", "ghost": true}"#) {
        Err(Error::UnknownAttribute { name, type_name }) => {
            println!("Rejected unknown attribute `{}` on {}", name, type_name)
        }
        other => println!("Unexpected result: {:?}", other),
    }

    let chain = (1..=12).fold(None, |next, id| Some(Box::new(Link { id, next })));
    match to_string(&chain) {
        Err(Error::DepthExceeded { max }) => println!("Chain deeper than {} rejected", max),
        other => println!("Unexpected result: {:?}", other),
    }

    Ok(())
}
