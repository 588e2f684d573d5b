use anyhow::Result;
use clap::Parser;

use report_submitter::config::Config;
use report_submitter::geo::{ExplicitPosition, GeocodeClient, LocationResolver};
use report_submitter::imaging::{FileImageSource, ImageSource};
use report_submitter::models::{Coordinates, DraftReport};
use report_submitter::pipeline::SubmissionPipeline;
use report_submitter::relay::{RelayClient, ReportRelay};
use report_submitter::store::MemoryReportStore;
use report_submitter::upload::ImageHostClient;
use report_submitter::weather::WeatherClient;

#[derive(Parser, Debug, Clone)]
#[command(name = "report-submitter")]
struct Args {
    /// Free-text description of the problem
    #[arg(long)]
    description: String,

    /// Path to the photo to attach
    #[arg(long)]
    image: std::path::PathBuf,

    /// Latitude of the incident (with --lon, stands in for the device fix)
    #[arg(long)]
    lat: Option<f64>,

    /// Longitude of the incident
    #[arg(long)]
    lon: Option<f64>,

    /// Forward the persisted report by email to this recipient via the relay
    #[arg(long)]
    notify_email: Option<String>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();

    let args = Args::parse();
    let cfg = Config::from_env()?;
    tracing::info!(
        "report-submitter starting; image host {} (client id {})",
        cfg.image_host_base_url,
        cfg.masked_client_id()
    );

    let coordinates = match (args.lat, args.lon) {
        (Some(latitude), Some(longitude)) => Some(Coordinates { latitude, longitude }),
        _ => None,
    };
    let resolver =
        LocationResolver::new(ExplicitPosition::new(coordinates), GeocodeClient::new(&cfg)?);
    let resolved = match resolver.resolve().await {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("could not resolve location: {}", e);
            std::process::exit(1);
        }
    };
    if resolved.address.is_empty() {
        println!("Localização atual: (endereço indisponível)");
    } else {
        println!("Localização atual: {}", resolved.address);
    }

    // Display only; a weather failure never blocks the report.
    match WeatherClient::new(&cfg)?.current(resolved.coordinates).await {
        Ok(weather) => println!(
            "Clima atual: {}°C, Vento: {} km/h",
            weather.temperature, weather.windspeed
        ),
        Err(e) => tracing::warn!("weather lookup failed: {:#}", e),
    }

    let picked = FileImageSource::new(&args.image).pick_from_library().await;
    let mut draft = DraftReport {
        description: args.description.clone(),
        coordinates: Some(resolved.coordinates),
        resolved_address: resolved.address.clone(),
        image: None,
    };
    match picked {
        Some(image) => draft.attach_image(image),
        None => {
            eprintln!("no usable image at {}", args.image.display());
            std::process::exit(1);
        }
    }

    let pipeline = SubmissionPipeline::new(ImageHostClient::new(&cfg)?, MemoryReportStore::new());
    let report = match pipeline.submit(&draft).await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("submission failed: {}", e);
            std::process::exit(1);
        }
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    if let Some(email) = args.notify_email {
        match RelayClient::new(&cfg)?.forward(&report, &email).await {
            Ok(message) => println!("{}", message),
            Err(e) => eprintln!("relay failed: {}", e),
        }
    }

    Ok(())
}
