//! A chart fed from JSON and bound to a store of records.

use tallyboard::{shared, ChartConfig, MemorySurface, Store, TallyChart};
use tracing_subscriber::EnvFilter;

const CONFIG: &str = r#"{"field": "color", "unknown_keys": "grow"}"#;

const FIRST_BATCH: &str = r#"[
    {"color": "blue", "moving": "flying", "value": 1},
    {"color": "red", "moving": "flying", "value": 4}
]"#;

const SECOND_BATCH: &str = r#"[
    {"color": "blue", "moving": "sleeping", "value": 18},
    {"color": "green", "moving": "sleeping", "value": 32}
]"#;

fn main() -> tallyboard::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== JSON Dashboard ===\n");

    let config = ChartConfig::from_json_str(CONFIG)?;
    let store = Store::new(config.records_from_json(FIRST_BATCH)?);

    let surface = shared(MemorySurface::new());
    let chart = TallyChart::build(surface.clone(), &store.get(), config.clone())?;
    let _binding = chart.bind(&store);

    println!("1. First batch");
    print!("{}", surface.read().render());

    println!("\n2. Second batch arrives");
    let batch = config.records_from_json(SECOND_BATCH)?;
    store.update(|records| records.extend(batch));
    print!("{}", surface.read().render());

    println!("\n3. Only flying records");
    store.update(|records| records.retain(|r| r.field("moving") == Some("flying")));
    print!("{}", surface.read().render());

    println!("\n✓ Dashboard complete! ({} slots)", chart.len());
    Ok(())
}
