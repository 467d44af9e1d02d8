use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::json;

use hotel_admin::api::{self, AdminApi};
use hotel_admin::config::{Config, ConfigStore, Credential, RequestContext};
use hotel_admin::filter::{BookingFilters, CheckInFilters, CheckInWindow, DateRange};
use hotel_admin::gateway::{FetchGateway, HttpGateway};
use hotel_admin::list::{ListState, LoadOutcome};
use hotel_admin::logging::init_tracing;
use hotel_admin::models::{BookingStatus, EntityId, PaymentStatus, ProfileUpdate, RoomQuery, RoomSort, RoomSummary};
use hotel_admin::mutation::MutationOutcome;
use hotel_admin::relay::RelayServer;
use hotel_admin::resource::{Bookings, CheckIns, Resource, Rooms};
use hotel_admin::view::{ListView, LoginRedirect};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Config file (default: the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct Session {
    /// Admin session token
    #[arg(long, env = "HOTEL_ADMIN_TOKEN", hide_env_values = true)]
    token: Option<String>,
}

#[derive(Args, Debug)]
struct Paging {
    /// How many pages to fetch
    #[arg(long, default_value_t = 1)]
    pages: u32,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the browser-facing admin relay
    Serve,
    /// Exchange admin credentials for a session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "HOTEL_ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// List bookings
    Bookings {
        #[command(flatten)]
        session: Session,
        #[command(flatten)]
        paging: Paging,
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        status: Option<BookingStatus>,
        #[arg(long)]
        payment: Option<PaymentStatus>,
    },
    /// List the check-in desk
    Checkins {
        #[command(flatten)]
        session: Session,
        #[command(flatten)]
        paging: Paging,
        /// today, upcoming or checked-in
        #[arg(long, default_value = "today")]
        filter: CheckInWindow,
        /// Local search over the loaded bookings
        #[arg(long, default_value = "")]
        search: String,
    },
    /// List rooms
    Rooms {
        #[command(flatten)]
        session: Session,
        #[arg(long, default_value = "")]
        search: String,
        /// newest, price_low, price_high, name_asc or capacity
        #[arg(long, default_value = "newest")]
        sort: RoomSort,
    },
    /// Mark a booking as checked in
    CheckIn {
        #[command(flatten)]
        session: Session,
        id: EntityId,
    },
    /// Delete a room
    DeleteRoom {
        #[command(flatten)]
        session: Session,
        id: EntityId,
    },
    /// Booking header figures
    Stats {
        #[command(flatten)]
        session: Session,
    },
    /// Revenue report for an optional date range (YYYY-MM-DD)
    Report {
        #[command(flatten)]
        session: Session,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
    /// Dashboard figures and alerts
    Dashboard {
        #[command(flatten)]
        session: Session,
    },
    /// Show the signed-in admin, or update it when any field is given
    Profile {
        #[command(flatten)]
        session: Session,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long, env = "HOTEL_ADMIN_NEW_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Delete the signed-in admin account
    DeleteAccount {
        #[command(flatten)]
        session: Session,
        /// Required; the account cannot be restored
        #[arg(long)]
        yes: bool,
    },
}

struct Client {
    gateway: Arc<dyn FetchGateway>,
    ctx: RequestContext,
    redirect: Arc<LoginRedirect>,
}

impl Client {
    fn new(config: &Config, session: Session) -> Result<Self> {
        let gateway = HttpGateway::new(&config.backend).context("failed to set up backend client")?;
        Ok(Self {
            gateway: Arc::new(gateway),
            ctx: RequestContext::new(Credential::bearer(session.token.unwrap_or_default())),
            redirect: Arc::new(LoginRedirect::new()),
        })
    }

    fn view<R: Resource>(&self) -> ListView<R> {
        ListView::new(self.gateway.clone(), self.ctx.clone(), self.redirect.clone())
    }

    fn api(&self) -> AdminApi {
        AdminApi::new(self.gateway.clone(), self.ctx.clone())
    }

    /// Turn a failed call into a readable error, with a login hint for 401.
    fn fail(&self, err: impl std::fmt::Display) -> anyhow::Error {
        if self.redirect.is_requested() {
            anyhow::anyhow!("session expired or missing: run `hotel-admin login` and pass --token")
        } else {
            anyhow::anyhow!("{}", err)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = Config::load_from(&path).with_context(|| format!("failed to load {}", path.display()))?;

    match cli.command {
        Command::Serve => {
            let mut server = RelayServer::new(ConfigStore::new(config, path))?;
            server.bind().await?;
            server.run().await?;
        }

        Command::Login { email, password } => {
            let gateway = HttpGateway::new(&config.backend)?;
            let token = api::login(&gateway, &email, &password).await?;
            println!("{}", token.expose());
        }

        Command::Bookings {
            session,
            paging,
            search,
            status,
            payment,
        } => {
            let client = Client::new(&config, session)?;
            let view = client.view::<Bookings>().with_filters(BookingFilters {
                search,
                status,
                payment,
            });
            let state = page_through(&client, &view, paging.pages).await?;
            print_list(&state)?;
        }

        Command::Checkins {
            session,
            paging,
            filter,
            search,
        } => {
            let client = Client::new(&config, session)?;
            let view = client
                .view::<CheckIns>()
                .with_filters(CheckInFilters { window: filter });
            let mut state = page_through(&client, &view, paging.pages).await?;
            state.items.retain(|b| b.matches_search(&search));
            print_list(&state)?;
        }

        Command::Rooms { session, search, sort } => {
            let client = Client::new(&config, session)?;
            let view = client.view::<Rooms>();
            let state = page_through(&client, &view, 1).await?;
            let rooms = RoomQuery { search, sort }.apply(&state.items);
            print_json(&json!({
                "summary": RoomSummary::from_rooms(&state.items),
                "rooms": rooms,
            }))?;
        }

        Command::CheckIn { session, id } => {
            let client = Client::new(&config, session)?;
            let view = client.view::<CheckIns>();
            match view.submit(CheckIns::check_in(id)).await.map_err(|e| client.fail(e))? {
                MutationOutcome::Updated(booking) => print_json(&booking)?,
                _ => print_json(&json!({ "id": id, "checked_in": true }))?,
            }
        }

        Command::DeleteRoom { session, id } => {
            let client = Client::new(&config, session)?;
            let view = client.view::<Rooms>();
            view.submit(Rooms::delete(id)).await.map_err(|e| client.fail(e))?;
            print_json(&json!({ "message": "Deleted", "id": id }))?;
        }

        Command::Stats { session } => {
            let client = Client::new(&config, session)?;
            let stats = client.api().booking_stats().await.map_err(|e| client.fail(e))?;
            print_json(&stats)?;
        }

        Command::Report { session, from, to } => {
            let range = match DateRange::parse(from.as_deref(), to.as_deref()) {
                Ok(range) => range,
                Err(e) => bail!(e),
            };
            let client = Client::new(&config, session)?;
            let report = client.api().report(&range).await.map_err(|e| client.fail(e))?;
            print_json(&report)?;
        }

        Command::Dashboard { session } => {
            let client = Client::new(&config, session)?;
            let api = client.api();
            let dashboard = api.dashboard().await.map_err(|e| client.fail(e))?;
            let alerts = api.alerts().await.unwrap_or_else(|e| {
                tracing::warn!(error = %e, "alerts unavailable");
                Vec::new()
            });
            print_json(&json!({
                "dashboard": dashboard,
                "occupancy_percent": dashboard.stats.occupancy_percent(),
                "alerts": alerts,
            }))?;
        }

        Command::Profile {
            session,
            name,
            email,
            password,
        } => {
            let client = Client::new(&config, session)?;
            let api = client.api();
            let current = api.profile().await.map_err(|e| client.fail(e))?;
            if name.is_none() && email.is_none() && password.is_none() {
                print_json(&current)?;
            } else {
                let update = ProfileUpdate {
                    name: name.unwrap_or(current.name),
                    email: email.unwrap_or(current.email),
                    password: password.filter(|p| !p.is_empty()),
                };
                let updated = api.update_profile(&update).await.map_err(|e| client.fail(e))?;
                print_json(&updated)?;
            }
        }

        Command::DeleteAccount { session, yes } => {
            if !yes {
                bail!("refusing to delete the admin account without --yes");
            }
            let client = Client::new(&config, session)?;
            let message = client.api().delete_profile().await.map_err(|e| client.fail(e))?;
            print_json(&json!({
                "message": message.unwrap_or_else(|| "Deleted".to_string()),
                "hint": "the session token is no longer valid",
            }))?;
        }
    }

    Ok(())
}

/// Load up to `pages` pages, stopping early once the list is exhausted.
async fn page_through<R: Resource>(client: &Client, view: &ListView<R>, pages: u32) -> Result<ListState<R::Entity>> {
    for _ in 0..pages.max(1) {
        match view.load_more().await.map_err(|e| client.fail(e))? {
            LoadOutcome::Loaded { exhausted: false, .. } => continue,
            _ => break,
        }
    }
    Ok(view.state())
}

fn print_list<T: Serialize>(state: &ListState<T>) -> Result<()> {
    print_json(&json!({
        "items": state.items,
        "next_page": state.next_page,
        "exhausted": state.is_exhausted(),
    }))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
