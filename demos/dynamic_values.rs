//! Working with dynamic values.
//!
//! Run with: cargo run --example dynamic_values

use serde_shape::{from_value, to_value, value, Value, ValueMap};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let mut config = value!({
        "service": "billing",
        "replicas": 3,
        "regions": ["eu-west", "us-east"],
        "owner": null
    });

    if let Value::Object(map) = &mut config {
        map.insert("canary".to_string(), Value::from(true));
        map.remove("owner");
    }
    println!("Config: {}", config);

    let regions: Vec<String> = from_value(config.get("regions").cloned().unwrap_or_default())?;
    println!("Regions: {:?}", regions);

    let replicas = config.get("replicas").and_then(Value::as_i64).unwrap_or(1);
    println!("Replicas: {}", replicas);

    let limits: ValueMap = [("cpu", 2.5), ("memory_gb", 8.0)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), Value::from(v)))
        .collect();
    println!("Limits: {}", Value::Object(limits));

    let point = to_value(&(1, "x", Some('y')))?;
    println!("Tuple as value: {}", point);

    Ok(())
}
