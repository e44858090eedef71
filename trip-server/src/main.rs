use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trip_server::config::AppConfig;
use trip_server::opendata::{MockStationSource, OpenDataClient, OpenDataSource};
use trip_server::stations::StationDiscovery;
use trip_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .init();

    let config = AppConfig::from_env()?;

    // Mock mode serves a saved response instead of calling the live API
    let source = match &config.mock_file {
        Some(path) => {
            let mock = MockStationSource::from_file(path)?;
            info!(path = %path.display(), records = mock.len(), "using mock station source");
            OpenDataSource::Mock(mock)
        }
        None => {
            info!(
                url = %config.opendata.base_url,
                dataset = %config.opendata.dataset,
                "using live station source"
            );
            OpenDataSource::Live(OpenDataClient::new(config.opendata.clone())?)
        }
    };

    let stations = StationDiscovery::new(source, &config.cache);
    let state = AppState::new(stations, config.planner.clone());
    let app = create_router(state);

    info!(
        reserve_fraction = config.planner.reserve_fraction,
        average_speed_kmh = config.planner.average_speed_kmh,
        cache_capacity = config.cache.max_capacity,
        "planner configured"
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("EV trip planner listening on http://{}", config.bind_addr);
    info!("  GET  /health");
    info!("  POST /api/trip/plan");
    info!("  POST /api/trip/drive-time");
    info!("  GET  /api/stations/nearby?lat&lon&radius_m[&max_rows]");
    info!("  GET  /api/vehicles/recharge-estimate[?usable_kwh]");

    axum::serve(listener, app).await?;

    Ok(())
}
