use std::path::PathBuf;

use rocket::fairing::{self, AdHoc};
use rocket::{Build, Rocket};
use rocket_db_pools::sqlx::Executor;
use rocket_db_pools::Database;

use crate::Db;

/// Creates the card table if it does not exist yet.
pub const SCHEMA: &str = include_str!("../data/schema.sql");

/// Path of the database file behind a SQLite url, if it names one.
fn database_file(url: &str) -> Option<PathBuf> {
    let path = url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
    let path = path.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    Some(PathBuf::from(path))
}

async fn create_directory(rocket: Rocket<Build>) -> fairing::Result {
    let url: String = match rocket.figment().extract_inner("databases.cards.url") {
        Ok(url) => url,
        Err(e) => {
            log::error!("No database url configured: {}", e);
            return Err(rocket);
        }
    };

    let parent = database_file(&url)
        .and_then(|file| file.parent().map(|p| p.to_path_buf()))
        .filter(|dir| !dir.as_os_str().is_empty());

    if let Some(dir) = parent {
        if let Err(e) = rocket::tokio::fs::create_dir_all(&dir).await {
            log::error!("Failed to create database directory {}: {}", dir.display(), e);
            return Err(rocket);
        }
    }

    Ok(rocket)
}

async fn create_tables(rocket: Rocket<Build>) -> fairing::Result {
    match Db::fetch(&rocket) {
        Some(db) => match (&**db).execute(SCHEMA).await {
            Ok(_) => {
                log::info!("Card table ready");
                Ok(rocket)
            }
            Err(e) => {
                log::error!("Failed to initialize SQLite database: {}", e);
                Err(rocket)
            }
        },
        None => Err(rocket),
    }
}

/// Opens the card database and makes sure its table exists.
pub fn stage() -> AdHoc {
    AdHoc::on_ignite("SQLx Stage", |rocket| async {
        rocket
            .attach(AdHoc::try_on_ignite("Database Directory", create_directory))
            .attach(Db::init())
            .attach(AdHoc::try_on_ignite("Card Schema", create_tables))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_urls() {
        assert_eq!(database_file("db/cards.db"), Some(PathBuf::from("db/cards.db")));
        assert_eq!(database_file("sqlite://db/cards.db"), Some(PathBuf::from("db/cards.db")));
        assert_eq!(database_file("sqlite:cards.db?mode=rwc"), Some(PathBuf::from("cards.db")));
    }

    #[test]
    fn memory_urls() {
        assert_eq!(database_file("sqlite::memory:"), None);
        assert_eq!(database_file(":memory:"), None);
    }
}
