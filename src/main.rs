use catalog_populate::core::{ConfigProvider, Storage};
use catalog_populate::utils::{logger, validation::Validate};
use catalog_populate::{
    CatalogPopulator, CliConfig, HookRegistry, HttpCatalogSource, LocalStorage, PageBuilder,
    PopulateError, TomlConfig, CMS_FILTER,
};
use clap::Parser;

const OUTPUT_FILE: &str = "catalog.html";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting catalog-populate");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let result = match cli.config.clone() {
        Some(path) => match TomlConfig::from_file(&path) {
            Ok(config) => run(config).await,
            Err(e) => Err(e),
        },
        None => run(cli).await,
    };

    if let Err(e) = result {
        tracing::error!("❌ Populate failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    Ok(())
}

async fn run<C: ConfigProvider + Validate>(config: C) -> Result<(), PopulateError> {
    // 驗證配置
    config.validate()?;

    let source = HttpCatalogSource::from_config(&config);
    tracing::info!("📡 Fetching catalog from {}", source.endpoint());
    let populator = CatalogPopulator::from_config(source, &config);

    let (mut doc, filters) = PageBuilder::new().with_markers(config.markers()).build()?;
    let mut instances = vec![filters];

    let mut registry = HookRegistry::new();
    registry.register(CMS_FILTER, populator);
    let reports = registry.fire(CMS_FILTER, &mut doc, &mut instances).await?;

    for report in &reports {
        if let Some(anchor) = report.aborted_at {
            tracing::info!("Filter generation stopped at missing {}", anchor);
        }
        if !report.categories_skipped.is_empty() {
            tracing::info!("Skipped categories: {:?}", report.categories_skipped);
        }
    }

    let html = doc.inner_html(doc.root());
    match config.output_path() {
        Some(path) => {
            let storage = LocalStorage::new(path.to_string());
            storage.write_file(OUTPUT_FILE, html.as_bytes()).await?;
            tracing::info!("📁 Output saved to: {}/{}", path, OUTPUT_FILE);
            println!("📁 Output saved to: {}/{}", path, OUTPUT_FILE);
        }
        None => println!("{}", html),
    }

    Ok(())
}
