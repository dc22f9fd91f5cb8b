use log::{info, warn};
use rocket::form::Form;
use rocket::http::CookieJar;
use rocket::request::FlashMessage;
use rocket::response::status::Custom;
use rocket::response::{Flash, Redirect};
use rocket::serde::json::Json;
use rocket::State;

use crate::auth::{self, LoggedIn, LoginRequest};
use crate::category::CATEGORIES;
use crate::config::AppConfig;
use crate::views::{LoginPage, Notice};

const BAD_CREDENTIALS: &str = "Identifiant ou mot de passe incorrect!";

#[derive(Responder)]
pub enum LoginOutcome {
    Accepted(Redirect),
    Rejected(Json<LoginPage>),
}

#[get("/")]
pub fn index(session: Option<LoggedIn>) -> Redirect {
    match session {
        Some(_) => Redirect::to(CATEGORIES[0].route()),
        None => Redirect::to(uri!(login_form)),
    }
}

#[get("/connexion")]
pub fn login_form(flash: Option<FlashMessage<'_>>) -> Json<LoginPage> {
    Json(LoginPage { error: None, flash: Notice::take(flash) })
}

/// Checks the submitted credentials. Success starts a long-lived session.
#[post("/connexion", data = "<credentials>")]
pub fn login(
    config: &State<AppConfig>,
    cookies: &CookieJar<'_>,
    credentials: Form<LoginRequest>,
) -> Result<LoginOutcome, Custom<String>> {
    if !credentials.matches(config) {
        warn!("Rejected login attempt for {:?}", credentials.username());
        return Ok(LoginOutcome::Rejected(Json(LoginPage {
            error: Some(BAD_CREDENTIALS.to_string()),
            flash: None,
        })));
    }

    auth::start_session(cookies, config)?;
    info!("Logged in as {}", credentials.username());
    Ok(LoginOutcome::Accepted(Redirect::to(uri!(crate::cards::list))))
}

#[get("/dexonnexion")]
pub fn logout(cookies: &CookieJar<'_>) -> Flash<Redirect> {
    auth::end_session(cookies);
    info!("Logged out");
    Flash::success(Redirect::to(uri!(index)), "Vous vous êtes déconnecté!")
}

/// Protected routes fail their `LoggedIn` guard with a 401; send those to the
/// login form instead of an error page.
#[catch(401)]
pub fn unauthorized() -> Redirect {
    Redirect::to(uri!(login_form))
}
