use anyhow::{Context, Result};
use std::env;
use tracing::{info, warn};

use product_advisor::config::{AdvisorConfig, DEFAULT_CONFIG_PATH};
use product_advisor::fetcher::{ApiClient, FeatureSource, StaticFeatureSource, load_features};
use product_advisor::locale::Locale;
use product_advisor::models::FeatureSelection;
use product_advisor::processor::ClassificationTree;
use product_advisor::render::FormView;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    let args: Vec<String> = env::args().collect();
    let offline = args.iter().any(|arg| arg == "--offline");
    let config_path = arg_value(&args, "--config").unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let config = AdvisorConfig::load(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path))?;

    let locale = match arg_value(&args, "--lang") {
        Some(code) => Locale::parse(&code).unwrap_or_else(|| {
            warn!("Unsupported --lang value '{}', using {}", code, config.default_locale());
            config.default_locale()
        }),
        None => config.default_locale(),
    };

    if offline {
        info!("🚀 Starting product advisor (offline, {} fallback features)", config.fallback.features.len());
    } else {
        info!("🚀 Starting product advisor against {}", config.api.base_url);
    }

    let client = if offline {
        None
    } else {
        Some(ApiClient::new(&config).context("Failed to initialize API client")?)
    };

    let fallback_source = StaticFeatureSource::new(config.fallback.features.clone());
    let source: &dyn FeatureSource = match &client {
        Some(client) => client,
        None => &fallback_source,
    };
    let loaded = load_features(source, &config.fallback.features).await;

    let tree = ClassificationTree::build(&loaded.features, locale);
    info!(
        "Classified {} features into {} groups",
        tree.feature_count(),
        tree.groups.len()
    );

    let mut view = FormView::new(tree, locale, loaded.degraded)
        .with_load_error(loaded.error)
        .with_segments(config.segments.clone());

    if let Some(path) = arg_value(&args, "--select") {
        let selection = FeatureSelection::from_file(&path)?;
        info!("Loaded {} selected values from {}", selection.selected_count(), path);
        view.set_selection(selection);

        match &client {
            Some(client) => {
                let outcome = client.predict(view.selection()).await;
                view.record_prediction(outcome);
            }
            None => warn!("Skipping prediction in offline mode"),
        }
    }

    println!("{}", view.render());

    Ok(())
}

/// Value following `flag`, e.g. `--lang en`.
fn arg_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|index| args.get(index + 1))
        .cloned()
}
