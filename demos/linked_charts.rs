//! Two tally charts linked by hover, the way a page would wire them.
//!
//! Run with `RUST_LOG=tallyboard=debug` to see slot creation and updates.

use tallyboard::{shared, ChartConfig, HoverLink, MemorySurface, Record, TallyChart};
use tracing_subscriber::EnvFilter;

fn animals() -> Vec<Record> {
    vec![
        Record::new(1.0).with_field("color", "blue").with_field("moving", "flying"),
        Record::new(4.0).with_field("color", "red").with_field("moving", "flying"),
        Record::new(18.0).with_field("color", "blue").with_field("moving", "sleeping"),
        Record::new(32.0).with_field("color", "green").with_field("moving", "sleeping"),
    ]
}

fn main() -> tallyboard::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Linked Tally Charts ===\n");

    let records = animals();
    let colors_surface = shared(MemorySurface::new());
    let moving_surface = shared(MemorySurface::new());

    println!("1. Building charts");
    let colors = TallyChart::build(colors_surface.clone(), &records, ChartConfig::new("color"))?;
    let moving = TallyChart::build(moving_surface.clone(), &records, ChartConfig::new("moving"))?;

    let print_state = || {
        println!("   [color]\n{}", indent(&colors_surface.read().render()));
        println!("   [moving]\n{}", indent(&moving_surface.read().render()));
    };
    print_state();

    let by_color = HoverLink::new(records.clone(), "color").target(&moving);
    let by_moving = HoverLink::new(records.clone(), "moving").target(&colors);

    println!("\n2. Hovering each color");
    for parent in colors.parents() {
        by_color.enter_parent(&colors, parent)?;
        println!("   -> {}", by_color.active().unwrap_or_default());
        print_state();
        by_color.leave()?;
    }

    println!("\n3. Hovering each movement");
    for parent in moving.parents() {
        by_moving.enter_parent(&moving, parent)?;
        println!("   -> {}", by_moving.active().unwrap_or_default());
        print_state();
        by_moving.leave()?;
    }

    println!("\n✓ Linked charts complete!");
    Ok(())
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("     {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
