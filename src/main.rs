//! Dispoma command-line client.
//!
//! `dispoma` prints the dashboard summary for the configured token;
//! `dispoma pdf <surat-id> [dir]` saves a letter's disposition sheet.

use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dispoma_client::config::{Config, LogFormat};
use dispoma_client::services::SuratProcessing;
use dispoma_client::util::{format_tanggal, format_ukuran_file};
use dispoma_client::{ApiClient, ClientError, Session};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    match config.log_format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
    }

    tracing::info!("API base URL: {}", config.api_url);

    let Some(token) = config.api_token.clone() else {
        tracing::error!("DISPOMA_API_TOKEN is not set");
        return Err(Box::<dyn std::error::Error>::from(
            "DISPOMA_API_TOKEN is required",
        ));
    };

    let api = Arc::new(ApiClient::new(&config, Session::new(token))?);

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("pdf") => {
            let (id, dir) = pdf_args(&args[1..])?;
            save_pdf(api, id, dir).await?;
        }
        _ => print_dashboard(&api).await?,
    }

    Ok(())
}

/// `<surat-id> [dir]`; the directory defaults to the current one.
fn pdf_args(args: &[String]) -> Result<(i64, PathBuf), ClientError> {
    let id = args
        .first()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| ClientError::Validation("usage: dispoma pdf <surat-id> [dir]".into()))?;
    let dir = args.get(1).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    Ok((id, dir))
}

async fn print_dashboard(api: &ApiClient) -> Result<(), ClientError> {
    let summary = api.dashboard().await.map_err(|e| {
        tracing::error!("{}", e.user_message());
        e
    })?;

    println!("Total surat     : {}", summary.total_surat);
    println!("Menunggu        : {}", summary.pending);
    println!("Diproses        : {}", summary.diproses);
    println!("Diteruskan      : {}", summary.diteruskan);
    println!("Diterima        : {}", summary.diterima);
    println!("Selesai         : {}", summary.selesai);

    if !summary.surat_terbaru.is_empty() {
        println!();
        println!("Surat terbaru:");
        for surat in &summary.surat_terbaru {
            println!(
                "  {:<20} {:<30} {:<12} {}",
                surat.nomor_surat,
                surat.asal_instansi,
                surat.status.label(),
                format_tanggal(&surat.created_at)
            );
        }
    }
    Ok(())
}

async fn save_pdf(api: Arc<ApiClient>, id: i64, dir: PathBuf) -> Result<(), ClientError> {
    let surat = api.get_surat(id).await?;
    let processing = SuratProcessing::new(api);

    let mut last_percent = None;
    let path = processing
        .save_pdf(&surat, &dir, |progress| {
            let percent = progress.percent();
            if percent != last_percent && percent.map(|p| p % 25 == 0).unwrap_or(false) {
                tracing::info!("Downloading PDF: {}%", percent.unwrap_or(0));
            }
            last_percent = percent;
        })
        .await?;

    let size = tokio::fs::metadata(&path).await?.len();
    println!("{} ({})", path.display(), format_ukuran_file(size));
    Ok(())
}
