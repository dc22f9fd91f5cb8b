use rocket::figment::{
    providers::{Format, Serialized, Toml},
    Figment, Profile,
};
use serde::{Deserialize, Serialize};

/// Environment variable naming an optional TOML settings file
pub const SETTINGS_ENV: &str = "CARDS_SETTINGS";

/// Used when neither Rocket.toml nor the settings file names a database
pub const DEFAULT_DATABASE: &str = "db/cards.db";

/// Application settings read from the same figment as Rocket's own config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub username: String,
    pub password: String,
    /// Key used to sign session tokens
    pub session_secret: String,
    /// Lifetime of a login, in days
    pub session_days: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "default".to_string(),
            session_secret: "development key".to_string(),
            session_days: 31,
        }
    }
}

/// Rocket's default figment, with application defaults underneath and the
/// `CARDS_SETTINGS` file (if any) on top of everything else.
pub fn figment() -> Figment {
    let figment = rocket::Config::figment()
        .join(Serialized::defaults(AppConfig::default()))
        .join(("databases.cards.url", DEFAULT_DATABASE));

    match std::env::var_os(SETTINGS_ENV) {
        Some(path) => figment.merge(Toml::file(path).profile(Profile::Global)),
        None => figment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_keys() {
        let config: AppConfig = Figment::new()
            .join(Serialized::defaults(AppConfig::default()))
            .merge(("password", "hunter2"))
            .extract()
            .unwrap();

        assert_eq!(config.username, "admin");
        assert_eq!(config.password, "hunter2");
        assert_eq!(config.session_days, 31);
    }
}
