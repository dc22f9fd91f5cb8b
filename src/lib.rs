#[macro_use]
extern crate rocket;

pub mod auth;
pub mod cards;
pub mod category;
pub mod config;
pub mod models;
pub mod review;
pub mod schema;
pub mod session;
pub mod views;

use rocket::fairing::AdHoc;
use rocket::figment::Figment;
use rocket::{Build, Rocket};
use rocket_db_pools::{sqlx, Database};

use config::AppConfig;

#[derive(Database)]
#[database("cards")]
pub struct Db(sqlx::SqlitePool);

pub type Result<T, E = rocket::response::Debug<sqlx::Error>> = std::result::Result<T, E>;

/// The application as configured by Rocket.toml, `ROCKET_*` variables and
/// the `CARDS_SETTINGS` file.
pub fn rocket() -> Rocket<Build> {
    build(config::figment())
}

pub fn build(figment: Figment) -> Rocket<Build> {
    rocket::custom(figment)
        .attach(AdHoc::config::<AppConfig>())
        .attach(schema::stage())
        .mount(
            "/",
            routes![
                session::index,
                session::login_form,
                session::login,
                session::logout,
                cards::list,
                cards::filter,
                cards::add,
                cards::edit_form,
                cards::edit,
                cards::delete,
                review::review,
                review::review_card,
                review::mark_known,
            ],
        )
        .register("/", catchers![session::unauthorized])
}
