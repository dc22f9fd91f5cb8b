use log::info;
use rocket::form::Form;
use rocket::request::FlashMessage;
use rocket::response::{Flash, Redirect};
use rocket::serde::json::Json;
use rocket_db_pools::Connection;

use crate::auth::LoggedIn;
use crate::category::Filter;
use crate::models::{Card, CardEdit, NewCard};
use crate::views::{CardsPage, EditPage, Notice};
use crate::{Db, Result};

#[derive(Responder)]
pub enum Listing {
    Page(Json<CardsPage>),
    Unfiltered(Redirect),
}

async fn page(db: &mut Connection<Db>, predicate: Filter, flash: Option<FlashMessage<'_>>) -> Result<Json<CardsPage>> {
    let cards = Card::list(&mut **db, predicate).await?;
    Ok(Json(CardsPage {
        filter_name: predicate.name().to_string(),
        cards,
        flash: Notice::take(flash),
    }))
}

#[get("/cartes")]
pub async fn list(_session: LoggedIn, mut db: Connection<Db>, flash: Option<FlashMessage<'_>>) -> Result<Json<CardsPage>> {
    page(&mut db, Filter::All, flash).await
}

/// Unknown filter names fall back to the unfiltered list.
#[get("/filtrer/<filter_name>")]
pub async fn filter(
    _session: LoggedIn,
    mut db: Connection<Db>,
    filter_name: &str,
    flash: Option<FlashMessage<'_>>,
) -> Result<Listing> {
    match Filter::from_name(filter_name) {
        Some(predicate) => Ok(Listing::Page(page(&mut db, predicate, flash).await?)),
        None => Ok(Listing::Unfiltered(Redirect::to(uri!(list)))),
    }
}

#[post("/ajouter", data = "<card>")]
pub async fn add(_session: LoggedIn, mut db: Connection<Db>, card: Form<NewCard>) -> Result<Flash<Redirect>> {
    let id = Card::insert(&mut **db, &card).await?;
    info!("Added card {} of type {}", id, card.kind);
    Ok(Flash::success(Redirect::to(uri!(list)), "Nouvelle carte bien ajoutée."))
}

/// An id that is not a number matches no card.
#[get("/modifier/<card_id>")]
pub async fn edit_form(
    _session: LoggedIn,
    mut db: Connection<Db>,
    card_id: Option<i64>,
    flash: Option<FlashMessage<'_>>,
) -> Result<Json<EditPage>> {
    let card = match card_id {
        Some(id) => Card::find(&mut **db, id).await?,
        None => None,
    };
    Ok(Json(EditPage { card, flash: Notice::take(flash) }))
}

/// Rewrites every mutable field, including `known`: a form without the
/// checkbox clears it.
#[post("/modifier_carte", data = "<changes>")]
pub async fn edit(_session: LoggedIn, mut db: Connection<Db>, changes: Form<CardEdit>) -> Result<Flash<Redirect>> {
    let updated = Card::update(&mut **db, &changes).await?;
    info!("Saved card {} ({} row(s))", changes.card_id, updated);
    Ok(Flash::success(Redirect::to(uri!(list)), "Carte sauvegardée."))
}

/// Reports success whether or not a row was removed.
#[get("/supprimer/<card_id>")]
pub async fn delete(_session: LoggedIn, mut db: Connection<Db>, card_id: Option<i64>) -> Result<Flash<Redirect>> {
    let deleted = match card_id {
        Some(id) => Card::delete(&mut **db, id).await?,
        None => 0,
    };
    info!("Deleted card {:?} ({} row(s))", card_id, deleted);
    Ok(Flash::success(Redirect::to(uri!(list)), "Carte supprimé."))
}
