use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;

use store_pager_lib::application::ProductPager;
use store_pager_lib::domain::{PageCounter, RenderTarget};
use store_pager_lib::infrastructure::{
    AppConfig, FileRenderTarget, HostPage, HtmlRenderTarget, ProductApiClient,
    init_logging_with_config,
};

#[derive(Parser, Debug)]
#[command(name = "store-pager", version, about = "Page through a store's product listing")]
struct Cli {
    /// Config file (TOML/JSON/YAML); defaults to the user config directory
    #[arg(long, env = "STORE_PAGER_CONFIG")]
    config: Option<PathBuf>,

    /// Store page to read the endpoint and link template from
    #[arg(long)]
    host_page: Option<PathBuf>,

    /// Number of pages to load
    #[arg(long, default_value_t = 1)]
    pages: u32,

    /// First page to request
    #[arg(long, default_value_t = 1)]
    start_page: u32,

    /// Write the rendered list here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let mut html_target: Option<HtmlRenderTarget> = None;
    if let Some(path) = &cli.host_page {
        let html = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read store page {}", path.display()))?;
        let page = HostPage::parse(&html).context("Failed to read store page settings")?;
        config.apply_host_page(&page);
        config.validate().context("Store page settings are invalid")?;
        html_target = Some(page.html_target());
    }

    init_logging_with_config(&config.logging)?;
    info!(
        "Loaded configuration (endpoint: {}, link template: {}, max attempts: {})",
        config.api.products_url, config.api.link_template, config.retry.max_attempts
    );

    let client = ProductApiClient::new(&config.api.products_url, &config.http, config.retry.clone())
        .context("Failed to create products client")?;
    let counter = PageCounter::starting_at(cli.start_page);

    match &cli.output {
        Some(path) => {
            let target = FileRenderTarget::new(path);
            run(client, target, &config, counter, cli.pages).await?;
            info!("Rendered list written to {}", path.display());
        }
        None => {
            let target = html_target.unwrap_or_default();
            let target = run(client, target, &config, counter, cli.pages).await?;
            println!("{}", target.outer_html());
        }
    }

    Ok(())
}

async fn run<T: RenderTarget>(
    client: ProductApiClient,
    target: T,
    config: &AppConfig,
    counter: PageCounter,
    pages: u32,
) -> Result<T> {
    let mut pager = ProductPager::with_counter(client, target, config.api.link_template.clone(), counter);

    let report = pager.run_pages(pages).await;
    info!(
        "Loaded {} of {} page(s), {} failed; next page is {}",
        report.loaded,
        report.requested,
        report.failed,
        pager.next_page()
    );

    if report.all_failed() {
        bail!("All {} page request(s) failed", report.requested);
    }
    Ok(pager.into_target())
}
