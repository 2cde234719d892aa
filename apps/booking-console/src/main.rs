use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use dotenv::dotenv;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod router;

use booking_form_cell::FieldOutcome;
use page_cell::{shared, ButtonHandle, Document, ElementId, MemoryDocument, PageEvent};
use router::{PageResponse, PageRouter};
use shared_backend::{BookingApi, HttpBookingApi};
use shared_config::AppConfig;
use shared_models::{AppError, Hospital};
use shared_utils::SystemClock;

#[derive(Parser, Debug)]
#[command(name = "booking-console", about = "Drive the appointment booking page against a clinic backend")]
struct Cli {
    /// Backend origin, overrides BOOKING_BASE_URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Walk the hospital → department → doctor → date → time cascade
    Book(BookArgs),
    /// Auto-reschedule a single appointment
    Reschedule(RescheduleArgs),
}

#[derive(Args, Debug)]
struct BookArgs {
    #[arg(long)]
    hospital: String,
    #[arg(long)]
    department: Option<String>,
    #[arg(long)]
    doctor: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    date: Option<String>,
    /// Slot label as served, e.g. "09:00 AM"
    #[arg(long)]
    time: Option<String>,
    /// Post the booking once the slot is confirmed
    #[arg(long)]
    submit: bool,
}

#[derive(Args, Debug)]
struct RescheduleArgs {
    #[arg(long)]
    appt_id: String,
    /// Appointment status as rendered on the list page
    #[arg(long)]
    status: Option<String>,
    /// Answer the confirmation dialog with yes
    #[arg(long)]
    yes: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::from_env();
    if let Some(base_url) = cli.base_url {
        config.backend_base_url = base_url.trim_end_matches('/').to_string();
    }
    if !config.is_configured() {
        return Err(AppError::Configuration(format!(
            "backend base URL must be an http(s) origin, got {:?}",
            config.backend_base_url
        ))
        .into());
    }

    info!("Using backend {}", config.backend_base_url);
    let api: Arc<dyn BookingApi> = Arc::new(HttpBookingApi::new(&config));

    match cli.command {
        Command::Book(args) => book(&config, api, args).await,
        Command::Reschedule(args) => reschedule(&config, api, args).await,
    }
}

async fn book(config: &AppConfig, api: Arc<dyn BookingApi>, args: BookArgs) -> anyhow::Result<()> {
    let hospital = Hospital::new(args.hospital.clone(), format!("Hospital {}", args.hospital));
    let document = shared(MemoryDocument::booking_page(&[hospital]));
    let page = PageRouter::load(document.clone(), api, config, Arc::new(SystemClock)).await;

    let steps = [
        (ElementId::Hospital, Some(args.hospital)),
        (ElementId::Department, args.department),
        (ElementId::Doctor, args.doctor),
        (ElementId::Date, args.date),
        (ElementId::Time, args.time),
    ];

    for (element, value) in steps {
        let Some(value) = value else { break };
        document.lock().await.set_value(element, &value);
        let response = page.dispatch(PageEvent::Change(element)).await;
        println!("{:<16} {:<12} {:?}", element.as_str(), value, response);

        let proceed = matches!(
            response,
            PageResponse::Field(FieldOutcome::Populated(_) | FieldOutcome::Skipped | FieldOutcome::Available)
        );
        if !proceed {
            warn!("Stopping at {} after {:?}", element, response);
            break;
        }
    }

    if args.submit {
        let controller = page.booking().context("booking form is not bound")?;
        let submission = controller.submit().await?;
        println!(
            "Booked {} at {} with doctor {}",
            submission.date, submission.time, submission.doctor
        );
    }

    println!("{}", serde_json::to_string_pretty(&*document.lock().await)?);
    page.finish().await;
    Ok(())
}

async fn reschedule(config: &AppConfig, api: Arc<dyn BookingApi>, args: RescheduleArgs) -> anyhow::Result<()> {
    let list = MemoryDocument::new()
        .with_button(
            Some(&args.appt_id),
            args.status.as_deref(),
            &["btn", "action-btn", "auto-reschedule-btn"],
        )
        .confirm_by_default(args.yes);
    let document = shared(list);
    let page = PageRouter::load(document.clone(), api, config, Arc::new(SystemClock)).await;

    let response = page.dispatch(PageEvent::Click(ButtonHandle(0))).await;
    println!("{:?}", response);

    {
        let doc = document.lock().await;
        for alert in doc.alerts() {
            println!("alert: {}", alert);
        }
    }

    page.finish().await;
    Ok(())
}
