use log::info;
use rocket::request::FlashMessage;
use rocket::response::{Flash, Redirect};
use rocket::serde::json::Json;
use rocket_db_pools::Connection;

use crate::auth::LoggedIn;
use crate::category::Category;
use crate::models::Card;
use crate::views::{Notice, ReviewPage};
use crate::{Db, Result};

#[derive(Responder)]
pub enum Review {
    Page(Json<ReviewPage>),
    Finished(Flash<Redirect>),
    UnknownCategory(Redirect),
}

/// Which card a review shows.
enum Draw {
    /// A random card of the category the user has not learned yet
    Random,
    /// Exactly this card, whatever its category or status. `None` for an id
    /// that is not a number, which matches nothing.
    Card(Option<i64>),
}

async fn memorize(
    mut db: Connection<Db>,
    category: &str,
    draw: Draw,
    flash: Option<FlashMessage<'_>>,
) -> Result<Review> {
    let category = match Category::from_name(category) {
        Some(category) => category,
        None => return Ok(Review::UnknownCategory(Redirect::to(uri!(crate::cards::list)))),
    };

    let card = match draw {
        Draw::Random => Card::random_unknown(&mut **db, category.code).await?,
        Draw::Card(Some(id)) => Card::find(&mut **db, id).await?,
        Draw::Card(None) => None,
    };

    let card = match card {
        Some(card) => card,
        None => {
            return Ok(Review::Finished(Flash::success(
                Redirect::to(uri!(crate::cards::list)),
                format!("Vous avez appris toutes les cartes {}.", category.name),
            )))
        }
    };

    Ok(Review::Page(Json(ReviewPage {
        short_answer: card.short_answer(),
        card,
        card_type: category.name.to_string(),
        flash: Notice::take(flash),
    })))
}

#[get("/<category>")]
pub async fn review(
    _session: LoggedIn,
    db: Connection<Db>,
    category: &str,
    flash: Option<FlashMessage<'_>>,
) -> Result<Review> {
    memorize(db, category, Draw::Random, flash).await
}

#[get("/<category>/<card_id>")]
pub async fn review_card(
    _session: LoggedIn,
    db: Connection<Db>,
    category: &str,
    card_id: Option<i64>,
    flash: Option<FlashMessage<'_>>,
) -> Result<Review> {
    memorize(db, category, Draw::Card(card_id), flash).await
}

/// Marks the card learned and goes back to reviewing `card_type`. The
/// category is taken as given, not checked against the card.
#[get("/marquer_appris/<card_id>/<card_type>")]
pub async fn mark_known(
    _session: LoggedIn,
    mut db: Connection<Db>,
    card_id: Option<i64>,
    card_type: &str,
) -> Result<Flash<Redirect>> {
    let updated = match card_id {
        Some(id) => Card::mark_known(&mut **db, id).await?,
        None => 0,
    };
    info!("Marked card {:?} as known ({} row(s))", card_id, updated);
    Ok(Flash::success(Redirect::to(uri!(review(card_type))), "Carte marquée comme apprise!"))
}
