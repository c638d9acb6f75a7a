#[macro_use]
extern crate rocket;
#[macro_use]
extern crate log;
#[macro_use]
extern crate vohala_result;

pub mod delivery;
pub mod publish;
pub mod routes;
pub mod util;
pub mod websocket;

use std::str::FromStr;
use std::sync::Arc;

use rocket::{Build, Rocket};
use rocket_cors::AllowedOrigins;
use tokio::net::TcpListener;
use vohala_database::Database;

use crate::publish::Publisher;
use crate::util::ratelimit::RatelimitState;

/// Build the Rocket instance serving the REST surface.
pub async fn web(db: Database, publisher: Arc<Publisher>) -> Rocket<Build> {
    let cors = rocket_cors::CorsOptions {
        allowed_origins: AllowedOrigins::All,
        allowed_methods: ["Get", "Put", "Post", "Delete", "Options", "Head"]
            .iter()
            .filter_map(|s| FromStr::from_str(s).ok())
            .collect(),
        ..Default::default()
    }
    .to_cors()
    .expect("Failed to create CORS.");

    routes::mount(rocket::build())
        .mount("/", rocket_cors::catch_all_options_routes())
        .manage(db)
        .manage(publisher)
        .manage(RatelimitState::new())
        .manage(cors.clone())
        .attach(cors)
}

#[launch]
async fn rocket() -> _ {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().filter_or("RUST_LOG", "info"));
    vohala_config::init();

    info!(
        "Starting Vohala server [version {}].",
        env!("CARGO_PKG_VERSION")
    );

    let config = vohala_config::config();
    let db = Database::open(&config.database.sqlite)
        .await
        .expect("Failed to open database.");

    // Presence flags in the database survive an unclean shutdown; nobody is
    // actually connected at this point.
    db.reset_presence().await.expect("Failed to reset presence.");

    let publisher = Arc::new(Publisher::new());

    let listener = TcpListener::bind(&config.hosts.events)
        .await
        .expect("Failed to bind events host.");
    tokio::spawn(websocket::launch(
        listener,
        db.clone(),
        Arc::clone(&publisher),
    ));

    web(db, publisher).await
}
