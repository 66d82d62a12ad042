use anyhow::Context;
use flightbook_catalog::BookingCatalog;
use flightbook_cli::{render, run_queries, BookingLoader, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flightbook_cli=info,flightbook_catalog=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::load().context("Failed to load config")?;
    if let Some(path) = std::env::args().nth(1) {
        config.input.path = path.into();
    }
    tracing::info!("Reading bookings from {}", config.input.path.display());

    let loader = BookingLoader::new(config.input.date_format.clone());
    let mut catalog = BookingCatalog::new();
    loader
        .load_file(&config.input.path, &mut catalog)
        .context("Failed to load bookings")?;
    tracing::info!("Catalog holds {} bookings over {} legs", catalog.len(), catalog.leg_count());

    let reports = run_queries(&catalog, &config.queries);
    let output = render(&reports, config.output.format).context("Failed to render report")?;
    print!("{}", output);

    Ok(())
}
