use std::error::Error;

use env_logger::Env;
use propstore::{PropertyStore, DEFAULT_NAMESPACE};

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize the logger so parse diagnostics show up
    env_logger::init_from_env(Env::default().default_filter_or("debug"));

    // Create example properties content
    let source = r#"
# connection settings for the demo
timeout = 30

[db]
host = localhost
port = 5432 # default port
dsn = user=demo password=demo

[cache]
enabled = true
capacity = 1024
"#;

    let mut store = PropertyStore::parse(source);

    // List every namespace the source declared
    println!("Namespaces: {:?}", store.namespace_names());
    println!("Has 'db' namespace: {}", store.namespace_exists("db"));

    // Pairs before the first header land in the default namespace
    println!("timeout: {}", store.get(DEFAULT_NAMESPACE, "timeout")?);

    // Values keep everything after the first '='
    println!("dsn: {}", store.get("db", "dsn")?);

    // Typed getters
    println!("cache enabled: {}", store.get_bool("cache", "enabled")?);
    println!("cache capacity: {}", store.get_int("cache", "capacity")?);

    // Work through the cursor
    store.set_namespace("db")?;
    println!("host: {}", store.get_current("host")?);

    store.set_current("replica", "db2.internal");
    println!("Added replica: {}", store.get_current("replica")?);

    // Enumerate the current namespace in insertion order
    for (key, value) in store.iter_current() {
        println!("db: {} = {}", key, value);
    }

    Ok(())
}
