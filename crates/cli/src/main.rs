use anyhow::Context;
use clap::{Parser, Subcommand};
use dashboard_core::config::Settings;
use dashboard_core::domain::forms::{NewOrder, NewUser};
use dashboard_core::domain::order::{format_amount, OrderStatus};
use dashboard_core::domain::user::Role;
use dashboard_core::filter::{OrderQuery, StatusFilter};
use dashboard_core::gateway::DashboardGateway;
use dashboard_core::metrics::AnalyticsPeriod;
use dashboard_core::mutation::MutationOutcome;
use dashboard_core::orchestrator::{Loaded, ViewState};
use dashboard_core::views::analytics::AnalyticsView;
use dashboard_core::views::orders::OrdersView;
use dashboard_core::views::overview::OverviewView;
use dashboard_core::views::users::UsersView;
use dashboard_core::views::ViewContext;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "dashboard_cli")]
struct Args {
    /// Override DASHBOARD_API_BASE_URL.
    #[arg(long)]
    api_base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Stats, revenue and sales with derived growth figures.
    Overview {
        /// Keep refreshing on the configured interval until Ctrl-C.
        #[arg(long)]
        watch: bool,
    },
    /// Performance metrics over a trailing window (3months, 6months, 12months).
    Analytics {
        #[arg(long, default_value = "12months")]
        period: AnalyticsPeriod,
    },
    #[command(subcommand)]
    Users(UsersCommand),
    #[command(subcommand)]
    Orders(OrdersCommand),
    /// Check the backend and report whether it answered.
    Check,
}

#[derive(Debug, Subcommand)]
enum UsersCommand {
    List,
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "user")]
        role: Role,
    },
    Delete {
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
enum OrdersCommand {
    List {
        /// ALL, ACTIVE, PENDING, COMPLETED or CANCELLED.
        #[arg(long, default_value = "ALL")]
        status: StatusFilter,
        /// Case-insensitive match on order number or customer.
        #[arg(long, default_value = "")]
        search: String,
    },
    Add {
        #[arg(long)]
        order_number: String,
        #[arg(long)]
        customer: String,
        #[arg(long)]
        amount: Decimal,
        #[arg(long, default_value = "PENDING")]
        status: OrderStatus,
        /// YYYY-MM-DD; defaults to today.
        #[arg(long)]
        order_date: Option<chrono::NaiveDate>,
    },
    Delete {
        id: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Usage errors and --help never depend on the environment being valid.
    let args = Args::parse();
    let settings = resolve_settings(&args, |key| std::env::var(key).ok())?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let ctx = ViewContext::from_settings(&settings)?;
    tracing::debug!(api_base_url = %settings.api_base_url, theme = ctx.theme().as_str(), "dashboard context ready");

    if let Err(err) = run(args.command, ctx).await {
        sentry_anyhow::capture_anyhow(&err);
        return Err(err);
    }
    Ok(())
}

fn resolve_settings(
    args: &Args,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::from_lookup(lookup)?;
    if let Some(url) = &args.api_base_url {
        settings.api_base_url = url.clone();
    }
    Ok(settings)
}

async fn run(command: Command, ctx: ViewContext) -> anyhow::Result<()> {
    match command {
        Command::Overview { watch: false } => {
            let view = OverviewView::new(ctx);
            let loaded = view.refresh().await;
            print_loaded(&loaded)?;
        }
        Command::Overview { watch: true } => watch_overview(ctx).await?,
        Command::Analytics { period } => {
            let view = AnalyticsView::new(ctx);
            let loaded = view.load().await;
            let report = serde_json::json!({
                "period": period,
                "metrics": loaded.data.metrics(period),
                "totalSales": loaded.data.total_sales(),
                "totalProfit": loaded.data.total_profit(),
            });
            print_banner(&loaded);
            print_json(&report)?;
        }
        Command::Users(cmd) => users(cmd, ctx).await?,
        Command::Orders(cmd) => orders(cmd, ctx).await?,
        Command::Check => {
            let ok = ctx.gateway.check_connection().await;
            println!("{}", if ok { "connected" } else { "unreachable" });
            anyhow::ensure!(ok, "dashboard backend is unreachable");
        }
    }
    Ok(())
}

async fn watch_overview(ctx: ViewContext) -> anyhow::Result<()> {
    let mut ctx = ctx;
    ctx.preferences.auto_refresh = true;
    let view = OverviewView::new(ctx);
    let mut updates = view.subscribe();
    let scope = view.mount().await;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = updates.changed() => {
                changed.context("overview store closed")?;
                let state = updates.borrow_and_update().clone();
                if let ViewState::Ready(loaded) = state {
                    print_loaded(&loaded)?;
                }
            }
        }
    }

    if let Some(scope) = scope {
        scope.cancel().await;
    }
    Ok(())
}

async fn users(cmd: UsersCommand, ctx: ViewContext) -> anyhow::Result<()> {
    let view = UsersView::new(ctx);
    let loaded = view.load().await;

    match cmd {
        UsersCommand::List => {
            print_loaded(&loaded)?;
            let today = chrono::Utc::now().date_naive();
            if let Some(stats) = view.stats(today) {
                print_json(&stats)?;
            }
        }
        UsersCommand::Add { name, email, role } => {
            let outcome = view.add(NewUser { name, email, role }).await?;
            print_outcome(&outcome)?;
        }
        UsersCommand::Delete { id } => {
            let outcome = view.delete(id).await?;
            print_outcome(&outcome)?;
        }
    }
    Ok(())
}

async fn orders(cmd: OrdersCommand, ctx: ViewContext) -> anyhow::Result<()> {
    let view = OrdersView::new(ctx);
    let loaded = view.load().await;

    match cmd {
        OrdersCommand::List { status, search } => {
            print_banner(&loaded);
            let visible = view.visible(&OrderQuery { status, search });
            for order in &visible {
                println!(
                    "{:<10} {:<16} {:>10} {:<10} {}",
                    order.order_number,
                    order.customer,
                    format_amount(order.amount),
                    order.status,
                    order.order_date
                );
            }
            if let Some(stats) = view.stats() {
                print_json(&stats)?;
            }
        }
        OrdersCommand::Add {
            order_number,
            customer,
            amount,
            status,
            order_date,
        } => {
            let outcome = view
                .add(NewOrder {
                    order_number,
                    customer,
                    amount,
                    status,
                    order_date,
                })
                .await?;
            print_outcome(&outcome)?;
        }
        OrdersCommand::Delete { id } => {
            let outcome = view.delete(id).await?;
            print_outcome(&outcome)?;
        }
    }
    Ok(())
}

fn print_banner<T>(loaded: &Loaded<T>) {
    if let Some(banner) = loaded.warning_banner() {
        eprintln!("{banner}");
    }
}

fn print_loaded<T: Serialize>(loaded: &Loaded<T>) -> anyhow::Result<()> {
    print_banner(loaded);
    print_json(&loaded.data)
}

fn print_outcome<T: Serialize>(outcome: &MutationOutcome<T>) -> anyhow::Result<()> {
    if let MutationOutcome::Provisional { error, .. } = outcome {
        eprintln!("backend rejected the change ({error}); applied locally only");
    }
    print_json(outcome.value())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{out}");
    Ok(())
}

fn init_sentry(settings: &Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
