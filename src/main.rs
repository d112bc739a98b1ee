//! Coastal Atlas
//!
//! Loads the three coastal datasets once, then drives the map controller
//! either from an interactive console or over HTTP (`coastal_atlas serve`).

use anyhow::{bail, Result};
use std::io::{self, Write};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use coastal_atlas::config::AtlasConfig;
use coastal_atlas::data::{load_datasets, DatasetGroup, IndicatorGroup};
use coastal_atlas::render::{MapController, MemorySurface};
use coastal_atlas::{server, utils};

// ──────────────────────────────────────────────────────────────────────────────
// MAIN ENTRY POINT
// ──────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    let config_path = AtlasConfig::path_from_env();
    let loaded = AtlasConfig::load(&config_path).await?;
    let found = loaded.is_some();
    let mut config = loaded.unwrap_or_default();
    config.apply_overrides(|k| std::env::var(k).ok());

    // The config may carry the log filter, so the subscriber comes second
    if let Err(e) = utils::telemetry::init_tracing(config.log_filter.as_deref()) {
        eprintln!("Failed to initialize logging: {}", e);
    }
    if found {
        info!("Loaded config from {}", config_path.display());
    } else {
        info!("No config at {}; using defaults", config_path.display());
    }

    let datasets = load_datasets(&config.data).await?;
    let mut controller = MapController::from_config(&config, datasets, MemorySurface::new());

    let issues = controller.validate_fields();
    for issue in &issues {
        warn!("Field table: {}", issue);
    }
    if config.strict_fields && !issues.is_empty() {
        bail!(coastal_atlas::AtlasError::FieldValidation(issues.len()));
    }

    if let Err(e) = controller.select(config.default_view.clone()) {
        warn!("Default view unavailable: {}", e);
    }

    let serve = std::env::args().nth(1).as_deref() == Some("serve");
    if serve {
        let shared = Arc::new(Mutex::new(controller));
        return server::serve(shared, &config.server.bind).await;
    }

    run_console(&mut controller)
}

// ──────────────────────────────────────────────────────────────────────────────
// CONSOLE
// ──────────────────────────────────────────────────────────────────────────────

fn run_console(controller: &mut MapController<MemorySurface>) -> Result<()> {
    println!("\n{}", "═".repeat(60));
    println!("🌊 Coastal Atlas v{}", env!("CARGO_PKG_VERSION"));
    println!("{}", "═".repeat(60));
    println!("Commands: indicator <group> <key> | index <key> | county <name>");
    println!("          legend | layer | view | keys | quit");
    println!("{}\n", "═".repeat(60));
    print_legend(controller);

    loop {
        print!("🗺️  > ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();
        match command.to_lowercase().as_str() {
            "quit" | "exit" | "q" => {
                println!("\n👋 Goodbye!\n");
                break;
            }
            "indicator" => {
                let Some((group, key)) = rest.split_once(' ') else {
                    println!("usage: indicator <physical|socio> <key>");
                    continue;
                };
                match group.parse::<IndicatorGroup>() {
                    Ok(group) => match controller.show_indicator(group, key.trim()) {
                        Ok(()) => print_legend(controller),
                        Err(e) => println!("❌ {}", e),
                    },
                    Err(e) => println!("❌ {}", e),
                }
            }
            "index" => match controller.show_index(rest) {
                Ok(()) => print_legend(controller),
                Err(e) => println!("❌ {}", e),
            },
            "county" => {
                if controller.zoom_to_county(rest) {
                    if let Some(vp) = controller.surface().viewport() {
                        println!("📍 {}: [{:.4}, {:.4}] – [{:.4}, {:.4}]", rest, vp.west, vp.south, vp.east, vp.north);
                    }
                } else {
                    println!("No segments in county '{}' for the current view", rest);
                }
            }
            "legend" => print_legend(controller),
            "layer" => print_layer(controller),
            "view" => println!("{}", controller.view()),
            "keys" => print_keys(controller),
            other => println!("Unknown command '{}'", other),
        }
    }

    info!("Console closed after {} renders", controller.render_count());
    Ok(())
}

fn print_legend(controller: &MapController<MemorySurface>) {
    match controller.legend() {
        Some(legend) => println!("\n{}\n", legend),
        None => println!("\n(no legend yet)\n"),
    }
}

fn print_layer(controller: &MapController<MemorySurface>) {
    for layer in controller.surface().layers() {
        let counts = layer.class_counts();
        println!("{} layer ({}): {} features", layer.group, layer.view, layer.features.len());
        for (i, n) in counts.iter().enumerate() {
            println!("  class {}: {}", i + 1, n);
        }
        if let Some(first) = layer.features.first() {
            println!("  e.g. {}", first.popup);
        }
    }
}

fn print_keys(controller: &MapController<MemorySurface>) {
    let fields = controller.fields();
    for group in [IndicatorGroup::Physical, IndicatorGroup::Socio] {
        let keys: Vec<&str> = fields.group(group).keys().map(String::as_str).collect();
        println!("{}: {}", group, keys.join(", "));
    }
    let keys: Vec<&str> = fields.indices.keys().map(String::as_str).collect();
    println!("{}: {}", DatasetGroup::Indices, keys.join(", "));
}
