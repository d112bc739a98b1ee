//! Breakpoint Inspector
//!
//! Prints the equal-interval breaks and class populations for one
//! attribute of a GeoJSON file.
//!
//! Usage: atlas_breaks <file.json> <attribute>

use anyhow::{bail, Result};
use tracing::info;

use coastal_atlas::classify::{compute_equal_breaks, ClassIndex};
use coastal_atlas::data::{extract_values, load_collection};
use coastal_atlas::style::{Palette, HIGHEST_NOTE};
use coastal_atlas::utils::format_number;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        bail!("usage: {} <file.json> <attribute>", args[0]);
    }
    let (path, attribute) = (&args[1], &args[2]);

    let collection = load_collection("input", path).await?;
    let values = extract_values(&collection, attribute);
    info!(
        "{} of {} features carry a numeric '{}'",
        values.len(),
        collection.len(),
        attribute
    );

    let Some(breaks) = compute_equal_breaks(&values) else {
        println!("No numeric values for '{}'; no breaks.", attribute);
        return Ok(());
    };

    println!("\n{} breaks: {}\n", attribute, breaks);
    let counts = breaks.class_counts(&values);
    let palette = Palette::default();
    for class in ClassIndex::all() {
        let (lo, hi) = breaks.range(class);
        let note = if class == ClassIndex::HIGHEST { HIGHEST_NOTE } else { "" };
        println!(
            "  {} {}  {} – {}  n={} {}",
            class,
            palette.color(class),
            format_number(lo),
            format_number(hi),
            counts[class.slot()],
            note
        );
    }
    println!();
    Ok(())
}
