//! PC Importer - command-line entry point.

use std::sync::Arc;

use anyhow::Context;
use pcimport_domain::ItemKind;
use pcimport_engine::infrastructure::compendium_files::JsonPackDirectory;
use pcimport_engine::infrastructure::field_sources::load_field_table;
use pcimport_engine::{FormatRegistry, ImporterConfig, Importer, ItemMatcher, PackIndexCache};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pcimport_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ImporterConfig::from_env()?;
    let registry = FormatRegistry::new();
    let Some(format) = registry.get(&config.format) else {
        anyhow::bail!(
            "Unknown import format '{}' (available: {})",
            config.format,
            registry.list_formats().join(", ")
        );
    };
    tracing::info!(format = format.id, name = format.display_name, "Using import format");

    let table = load_field_table(&config.input)
        .await
        .with_context(|| format!("Failed to load {}", config.input.display()))?;

    let result = Importer::new(format).run(&table)?;
    tracing::info!(
        actor = result.actor_name().unwrap_or("unnamed"),
        classes = result.count(ItemKind::Class),
        spells = result.count(ItemKind::Spell),
        "Imported character"
    );

    if config.export {
        let path = result.export_to_json(&config.output_dir).await?;
        println!("{}", path.display());
    }

    if let Some(dir) = &config.compendium_dir {
        let cache = Arc::new(PackIndexCache::new(
            Arc::new(JsonPackDirectory::new(dir)),
            config.packs.clone(),
        ));
        cache.populate().await;

        let outcomes = ItemMatcher::new(cache).match_items(&result.items).await;
        for outcome in outcomes.iter().filter(|o| !o.is_matched()) {
            tracing::info!(item = %outcome.item().name, "Left unmatched");
        }
    }

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides, then fall back to the working directory.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
    let _ = dotenvy::dotenv();
}
