use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use trippy_app::config::DEFAULT_API_BASE_URL;
use trippy_app::pages::{HomeView, TripListView};
use trippy_app::{App, Config, RetryPolicy, Route};
use trippy_core::MapRender;

#[derive(Debug, Parser)]
#[command(name = "trippy", version, about = "Render trippy pages from the command line")]
struct Args {
    /// Page to render: "/" (home) or "/plan".
    #[arg(default_value = "/")]
    path: String,

    #[arg(long, env = "TRIPPY_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    api_base_url: String,

    #[arg(long, env = "TRIPPY_API_TIMEOUT_MS", default_value_t = 1000)]
    api_timeout_ms: u64,

    #[arg(long, env = "TRIPPY_WARMUP_DELAY_MS", default_value_t = 5000)]
    warmup_delay_ms: u64,

    #[arg(long, env = "TRIPPY_WARMUP_MAX_RETRIES", default_value_t = 24)]
    warmup_max_retries: u32,

    #[arg(long, env = "TRIPPY_MAPS_API_KEY")]
    maps_api_key: Option<String>,

    /// Sleep on the mock path to imitate network latency.
    #[arg(long, env = "TRIPPY_MOCK_LATENCY", default_value_t = true, action = clap::ArgAction::Set)]
    mock_latency: bool,

    /// Poll the backend root until it answers before rendering.
    #[arg(long)]
    wait_for_backend: bool,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            api_base_url: self.api_base_url.clone(),
            request_timeout: Duration::from_millis(self.api_timeout_ms),
            retry: RetryPolicy {
                delay: Duration::from_millis(self.warmup_delay_ms),
                max_attempts: self.warmup_max_retries,
            },
            mock_latency: self.mock_latency,
            maps_api_key: self.maps_api_key.clone(),
            ..Config::default()
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let app = App::new(args.config()).context("invalid configuration")?;

    let mut overlay = app.warmup().subscribe();
    tokio::spawn(async move {
        while overlay.changed().await.is_ok() {
            let state = *overlay.borrow_and_update();
            if state.is_warming_up {
                info!("{} {}", state.title(), state.status_line());
            }
        }
    });

    if args.wait_for_backend {
        app.health_monitor().run_until_ready().await;
    }

    match Route::parse(&args.path) {
        Route::Home => render_home(&app).await,
        Route::Plan => render_plan(&app).await,
        Route::NotFound => println!("404: no page at {}", args.path),
    }
    Ok(())
}

async fn render_home(app: &App) {
    let page = app.home_page();
    page.popular().settled().await;
    match page.view() {
        HomeView::Loading => println!("Loading destinations..."),
        HomeView::Error { message } => println!("Error: {message}"),
        HomeView::Destinations(cards) => {
            println!("Popular destinations");
            for card in cards {
                let heart = if card.is_favorite { "*" } else { " " };
                println!("{heart} {:<24} {:>12}  {}", card.title, card.price, card.rating);
            }
        }
    }
}

async fn render_plan(app: &App) {
    let page = app.plan_page();
    page.trips().settled().await;
    let view = page.view();
    match view.trips {
        TripListView::Loading => println!("Loading trips..."),
        TripListView::Error { message } => println!("Error: {message}"),
        TripListView::Empty => println!("No trips yet. Create Your First Trip"),
        TripListView::Trips {
            cards,
            current_page,
            page_numbers,
            ..
        } => {
            println!("My trips (page {current_page} of {})", page_numbers.len());
            for card in cards {
                println!(
                    "- {} | {} | {} | {} activities | {}",
                    card.name, card.destination, card.dates, card.activity_count, card.total_cost
                );
            }
        }
    }
    match view.map {
        MapRender::Placeholder { title, hint } => println!("[map] {title}. {hint}"),
        MapRender::Map {
            center,
            zoom,
            markers,
            ..
        } => println!(
            "[map] center {:.4},{:.4} zoom {zoom}, {} markers",
            center.lat,
            center.lng,
            markers.len()
        ),
    }
}
