use rocket::form::{self, FromFormField, ValueField};
use rocket::serde::{Deserialize, Serialize};
use rocket_db_pools::sqlx::{self, sqlite::SqliteRow, Row, SqliteConnection};

use crate::category::Filter;

/// Answers shorter than this are shown in the large review layout
pub const SHORT_ANSWER_LEN: usize = 75;

const COLUMNS: &str = "id, type, front, back, known";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct Card {
    pub id: i64,
    /// Category code. Not checked against the category table.
    #[serde(rename = "type")]
    pub kind: i64,
    pub front: String,
    pub back: String,
    pub known: bool,
}

impl From<SqliteRow> for Card {
    fn from(r: SqliteRow) -> Self {
        Self {
            id: r.get("id"),
            kind: r.get("type"),
            front: r.get("front"),
            back: r.get("back"),
            known: r.get("known"),
        }
    }
}

/// Fields of a card the add form supplies.
#[derive(Debug, FromForm)]
pub struct NewCard {
    #[field(name = "type")]
    pub kind: i64,
    pub front: String,
    pub back: String,
}

/// A checkbox: ticked if the field was submitted at all, whatever its value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Checkbox(pub bool);

impl<'v> FromFormField<'v> for Checkbox {
    fn from_value(_field: ValueField<'v>) -> form::Result<'v, Self> {
        Ok(Checkbox(true))
    }

    fn default() -> Option<Self> {
        Some(Checkbox(false))
    }
}

/// Full replacement of a card's mutable fields from the edit form.
#[derive(Debug, FromForm)]
pub struct CardEdit {
    pub card_id: i64,
    #[field(name = "type")]
    pub kind: i64,
    pub front: String,
    pub back: String,
    /// An unchecked box submits nothing and clears the flag.
    pub known: Checkbox,
}

impl Card {
    pub fn table() -> &'static str {
        "cards"
    }

    /// Whether the answer is short enough for the large review layout.
    pub fn short_answer(&self) -> bool {
        self.back.chars().count() < SHORT_ANSWER_LEN
    }

    /// Cards matching `filter`, newest first.
    pub async fn list(db: &mut SqliteConnection, filter: Filter) -> sqlx::Result<Vec<Card>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM {} \
             WHERE (?1 IS NULL OR type = ?1) AND (?2 IS NULL OR known = ?2) \
             ORDER BY id DESC",
            COLUMNS,
            Card::table()
        ))
        .bind(filter.code())
        .bind(filter.known())
        .fetch_all(db)
        .await?;

        Ok(rows.into_iter().map(Card::from).collect())
    }

    pub async fn find(db: &mut SqliteConnection, id: i64) -> sqlx::Result<Option<Card>> {
        sqlx::query(&format!("SELECT {} FROM {} WHERE id = ? LIMIT 1", COLUMNS, Card::table()))
            .bind(id)
            .fetch_optional(db)
            .await
            .map(|r| r.map(Card::from))
    }

    /// One card of the given category not yet known, chosen uniformly at random.
    pub async fn random_unknown(db: &mut SqliteConnection, code: i64) -> sqlx::Result<Option<Card>> {
        sqlx::query(&format!(
            "SELECT {} FROM {} WHERE type = ? AND known = 0 ORDER BY RANDOM() LIMIT 1",
            COLUMNS,
            Card::table()
        ))
        .bind(code)
        .fetch_optional(db)
        .await
        .map(|r| r.map(Card::from))
    }

    /// Inserts a new, unknown card and returns its id.
    pub async fn insert(db: &mut SqliteConnection, card: &NewCard) -> sqlx::Result<i64> {
        let result = sqlx::query(&format!(
            "INSERT INTO {} (type, front, back) VALUES (?, ?, ?)",
            Card::table()
        ))
        .bind(card.kind)
        .bind(&card.front)
        .bind(&card.back)
        .execute(db)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn update(db: &mut SqliteConnection, edit: &CardEdit) -> sqlx::Result<u64> {
        sqlx::query(&format!(
            "UPDATE {} SET type = ?, front = ?, back = ?, known = ? WHERE id = ?",
            Card::table()
        ))
        .bind(edit.kind)
        .bind(&edit.front)
        .bind(&edit.back)
        .bind(edit.known.0)
        .bind(edit.card_id)
        .execute(db)
        .await
        .map(|r| r.rows_affected())
    }

    pub async fn mark_known(db: &mut SqliteConnection, id: i64) -> sqlx::Result<u64> {
        sqlx::query(&format!("UPDATE {} SET known = 1 WHERE id = ?", Card::table()))
            .bind(id)
            .execute(db)
            .await
            .map(|r| r.rows_affected())
    }

    pub async fn delete(db: &mut SqliteConnection, id: i64) -> sqlx::Result<u64> {
        sqlx::query(&format!("DELETE FROM {} WHERE id = ?", Card::table()))
            .bind(id)
            .execute(db)
            .await
            .map(|r| r.rows_affected())
    }
}
