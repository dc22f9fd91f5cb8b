//! JSON page contexts. Each carries what the corresponding page needs to
//! render, plus the flash message left by the redirect that led to it.

use rocket::request::FlashMessage;
use rocket::serde::{Deserialize, Serialize};

use crate::models::Card;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct Notice {
    pub kind: String,
    pub message: String,
}

impl Notice {
    pub fn take(flash: Option<FlashMessage<'_>>) -> Option<Self> {
        flash.map(|f| Notice {
            kind: f.kind().to_string(),
            message: f.message().to_string(),
        })
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct CardsPage {
    pub filter_name: String,
    pub cards: Vec<Card>,
    pub flash: Option<Notice>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct EditPage {
    /// `None` when the id matched nothing
    pub card: Option<Card>,
    pub flash: Option<Notice>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ReviewPage {
    pub card: Card,
    pub card_type: String,
    pub short_answer: bool,
    pub flash: Option<Notice>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct LoginPage {
    pub error: Option<String>,
    pub flash: Option<Notice>,
}
