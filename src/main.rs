use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::{NaiveDate, NaiveTime, Utc};
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use salonflow::config::AppConfig;
use salonflow::error::AppError;
use salonflow::store::MemoryStore;
use salonflow::telemetry;
use salonflow::workflows::approval::{
    approval_router, LogNotifier, Vendor, VendorApprovalService, VendorId, VendorRepository,
    VendorStatus,
};
use salonflow::workflows::booking::{
    booking_router, Booking, BookingAssignmentService, BookingId, BookingRepository, CustomerId,
    Employee, EmployeeId, EmployeeStatus, LineItem, VendorResponse,
};
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Salonflow Workflow Service",
    about = "Run the vendor approval and booking assignment workflows for the marketplace back office",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Walk a seeded booking through its full lifecycle and print each step
    Demo,
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Demo => run_demo(),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let store = MemoryStore::new();
    let approval = Arc::new(VendorApprovalService::new(
        Arc::new(store.clone()),
        Arc::new(LogNotifier),
    ));
    let bookings = Arc::new(BookingAssignmentService::new(
        Arc::new(store.clone()),
        Arc::new(store),
    ));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(approval_router(approval))
        .merge(booking_router(bookings))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "marketplace workflow service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_demo() -> Result<(), AppError> {
    let store = MemoryStore::new();
    seed_demo_data(&store)?;

    let approval =
        VendorApprovalService::new(Arc::new(store.clone()), Arc::new(LogNotifier));
    let bookings =
        BookingAssignmentService::new(Arc::new(store.clone()), Arc::new(store));

    let vendor_id = VendorId("vnd-velvet-rose".to_string());
    let booking_id = BookingId("bkg-0001".to_string());

    println!("Booking assignment demo");

    let vendor = approval.approve(&vendor_id)?;
    println!("- vendor {} approved ({})", vendor.shop_name, vendor.status.label());

    let booking = bookings.classify_at_home(&booking_id)?;
    println!("- booking {} triaged to {}", booking.id.0, booking.status.label());

    let booking = bookings.assign_vendor(&booking_id, &vendor_id)?;
    println!("- vendor assigned, booking now {}", booking.status.label());

    let booking = bookings.respond_to_assignment(
        &booking_id,
        &vendor_id,
        VendorResponse::Accept {
            employee: Some(EmployeeId("emp-lena".to_string())),
        },
    )?;
    println!(
        "- vendor accepted with employee {}, booking now {}",
        booking
            .employee
            .as_ref()
            .map(|employee| employee.0.as_str())
            .unwrap_or("-"),
        booking.status.label()
    );

    let booking = bookings.start_service(&booking_id)?;
    println!("- service started, booking now {}", booking.status.label());

    let booking = bookings.complete(&booking_id)?;
    println!("- service finished, booking now {}", booking.status.label());

    let stats = bookings.stats()?;
    println!("\nBooking counts");
    println!("- total: {}", stats.total);
    println!("- completed: {}", stats.completed);
    println!("- cancelled: {}", stats.cancelled);

    Ok(())
}

fn seed_demo_data(store: &MemoryStore) -> Result<(), AppError> {
    VendorRepository::insert(
        store,
        Vendor {
            id: VendorId("vnd-velvet-rose".to_string()),
            shop_name: "Velvet Rose Salon".to_string(),
            owner_name: "Amara Osei".to_string(),
            contact_email: "amara@velvetrose.example".to_string(),
            city: "Des Moines".to_string(),
            status: VendorStatus::Pending,
        },
    )
    .map_err(|err| AppError::Approval(err.into()))?;

    store.insert_employee(Employee {
        id: EmployeeId("emp-lena".to_string()),
        vendor: VendorId("vnd-velvet-rose".to_string()),
        name: "Lena Park".to_string(),
        role: "Stylist".to_string(),
        status: EmployeeStatus::Active,
    });

    let scheduled_date = NaiveDate::from_ymd_opt(2026, 9, 12).expect("valid demo date");
    let scheduled_time = NaiveTime::from_hms_opt(14, 30, 0).expect("valid demo time");
    BookingRepository::insert(
        store,
        Booking::new(
            BookingId("bkg-0001".to_string()),
            CustomerId("cus-0042".to_string()),
            scheduled_date,
            scheduled_time,
            "114 Grand Ave, Des Moines".to_string(),
            vec![
                LineItem {
                    service_id: "svc-bridal".to_string(),
                    service_name: "Bridal Styling".to_string(),
                    unit_price_cents: 12_500,
                    quantity: 1,
                },
                LineItem {
                    service_id: "svc-manicure".to_string(),
                    service_name: "Classic Manicure".to_string(),
                    unit_price_cents: 3_200,
                    quantity: 2,
                },
            ],
            Utc::now(),
        ),
    )
    .map_err(|err| AppError::Workflow(err.into()))?;

    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
