// Basic usage example for propstore
//
// Run with: cargo run --example basic_usage

use propstore::PropertyStore;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let dir = std::env::temp_dir().join("propstore-demo");

    // French variant of the UI strings, stored as "<key>.fr"
    let store = PropertyStore::builder("demo")
        .config_dir(&dir)
        .file_name("ui.properties")
        .suffix(".fr")
        .header("demo settings")
        .open()?;

    println!("📦 propstore Basic Usage Example\n");

    store.add_listener(|change| match &change.key {
        Some(key) => println!("🔔 {key} -> {:?}", change.new_value),
        None => println!("🔔 reloaded"),
    });

    let title_key = store.physical_key("title");
    store.add_key_listener(&title_key, |change| {
        println!("🎯 title changed to {:?}", change.new_value);
    });

    store.set_string("title", "Bonjour");
    store.set_bool("compact", true);
    store.set_int("columns", 3);

    println!("\n✅ title   = {}", store.get_string("title"));
    println!("✅ compact = {}", store.get_bool("compact"));
    println!("✅ columns = {}", store.get_int_or("columns", 1)?);

    store.store()?;
    println!("\n💾 Saved to {}", store.path().display());

    // A German view of the same file sees none of the French keys
    let de = PropertyStore::builder("demo")
        .config_dir(&dir)
        .file_name("ui.properties")
        .suffix(".de")
        .open()?;
    println!("🇩🇪 title (de) = {:?}", de.get_property("title"));

    store.load()?;
    Ok(())
}
