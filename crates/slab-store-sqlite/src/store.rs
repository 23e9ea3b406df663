//! [`SqliteStore`] — the SQLite implementation of [`CollectionStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use slab_core::{
  card::{Card, CardUpdate, NewCard},
  profile::{NewUser, StoredUser, UserProfile},
  store::CollectionStore,
};

use crate::{
  Error, Result,
  encode::{
    RawCard, RawUser, encode_company, encode_dt, encode_graded, encode_sport,
    encode_uuid,
  },
  schema::SCHEMA,
};

const CARD_COLUMNS: &str = "card_id, user_id, player, year, sport, \
   manufacturer, set_name, card_number, graded, grading_company, \
   grade_number, notes, image_url, created_at, updated_at";

fn card_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawCard> {
  Ok(RawCard {
    card_id:         row.get(0)?,
    user_id:         row.get(1)?,
    player:          row.get(2)?,
    year:            row.get(3)?,
    sport:           row.get(4)?,
    manufacturer:    row.get(5)?,
    set_name:        row.get(6)?,
    card_number:     row.get(7)?,
    graded:          row.get(8)?,
    grading_company: row.get(9)?,
    grade_number:    row.get(10)?,
    notes:           row.get(11)?,
    image_url:       row.get(12)?,
    created_at:      row.get(13)?,
    updated_at:      row.get(14)?,
  })
}

fn user_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawUser> {
  Ok(RawUser {
    user_id:       row.get(0)?,
    email:         row.get(1)?,
    name:          row.get(2)?,
    password_hash: row.get(3)?,
    created_at:    row.get(4)?,
    updated_at:    row.get(5)?,
  })
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A slab collection store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn fetch_card(&self, id: Uuid) -> Result<Option<Card>> {
    let id_str = encode_uuid(id);
    let raw: Option<RawCard> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {CARD_COLUMNS} FROM cards WHERE card_id = ?1"),
              rusqlite::params![id_str],
              card_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawCard::into_card).transpose()
  }

  async fn fetch_user_by_email(&self, email: &str) -> Result<Option<StoredUser>> {
    let email = email.to_owned();
    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT user_id, email, name, password_hash, created_at, updated_at
               FROM users WHERE email = ?1 COLLATE NOCASE",
              rusqlite::params![email],
              user_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUser::into_stored).transpose()
  }
}

// ─── CollectionStore impl ────────────────────────────────────────────────────

impl CollectionStore for SqliteStore {
  type Error = Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn create_user(&self, input: NewUser) -> Result<UserProfile> {
    if let Some(existing) = self.fetch_user_by_email(&input.email).await? {
      return Err(Error::EmailTaken(existing.profile.email));
    }

    let profile = UserProfile {
      user_id:    Uuid::new_v4(),
      email:      input.email,
      name:       input.name,
      created_at: Utc::now(),
      updated_at: None,
    };

    let id_str = encode_uuid(profile.user_id);
    let email = profile.email.clone();
    let name = profile.name.clone();
    let hash = input.password_hash;
    let at_str = encode_dt(profile.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (user_id, email, name, password_hash, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, email, name, hash, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(profile)
  }

  async fn get_user(&self, id: Uuid) -> Result<Option<UserProfile>> {
    let id_str = encode_uuid(id);
    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT user_id, email, name, password_hash, created_at, updated_at
               FROM users WHERE user_id = ?1",
              rusqlite::params![id_str],
              user_row,
            )
            .optional()?,
        )
      })
      .await?;

    Ok(raw.map(RawUser::into_stored).transpose()?.map(|u| u.profile))
  }

  async fn get_user_by_email(&self, email: &str) -> Result<Option<StoredUser>> {
    self.fetch_user_by_email(email).await
  }

  async fn update_user_name(&self, id: Uuid, name: &str) -> Result<UserProfile> {
    let id_str = encode_uuid(id);
    let name = name.to_owned();
    let at_str = encode_dt(Utc::now());

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE users SET name = ?2, updated_at = ?3 WHERE user_id = ?1",
          rusqlite::params![id_str, name, at_str],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::UserNotFound(id));
    }
    self
      .get_user(id)
      .await?
      .ok_or(Error::UserNotFound(id))
  }

  // ── Cards ─────────────────────────────────────────────────────────────────

  async fn create_card(&self, input: NewCard) -> Result<Card> {
    let f = input.fields;
    let card = Card {
      card_id:         Uuid::new_v4(),
      user_id:         input.user_id,
      player:          f.player,
      year:            f.year,
      sport:           f.sport,
      manufacturer:    f.manufacturer,
      set_name:        f.set_name,
      card_number:     f.card_number,
      graded:          f.graded,
      grading_company: f.grading_company,
      grade_number:    f.grade_number,
      notes:           f.notes,
      image_url:       f.image_url,
      created_at:      Utc::now(),
      updated_at:      None,
    };

    let card_id_str = encode_uuid(card.card_id);
    let user_id_str = encode_uuid(card.user_id);
    let player = card.player.clone();
    let year = card.year;
    let sport = encode_sport(card.sport);
    let manufacturer = card.manufacturer.clone();
    let set_name = card.set_name.clone();
    let card_number = card.card_number.clone();
    let graded = encode_graded(card.graded).to_owned();
    let company = card.grading_company.map(encode_company);
    let grade = card.grade_number.map(i64::from);
    let notes = card.notes.clone();
    let image_url = card.image_url.clone();
    let created_str = encode_dt(card.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO cards (
             card_id, user_id, player, year, sport,
             manufacturer, set_name, card_number, graded, grading_company,
             grade_number, notes, image_url, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
          rusqlite::params![
            card_id_str,
            user_id_str,
            player,
            year,
            sport,
            manufacturer,
            set_name,
            card_number,
            graded,
            company,
            grade,
            notes,
            image_url,
            created_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(card)
  }

  async fn get_card(&self, id: Uuid) -> Result<Option<Card>> {
    self.fetch_card(id).await
  }

  async fn update_card(&self, id: Uuid, update: CardUpdate) -> Result<Card> {
    let f = update.fields;
    let id_str = encode_uuid(id);
    let player = f.player;
    let year = f.year;
    let sport = encode_sport(f.sport);
    let manufacturer = f.manufacturer;
    let set_name = f.set_name;
    let card_number = f.card_number;
    let graded = encode_graded(f.graded).to_owned();
    let company = f.grading_company.map(encode_company);
    let grade = f.grade_number.map(i64::from);
    let notes = f.notes;
    let image_url = f.image_url;
    let updated_str = encode_dt(Utc::now());

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE cards SET
             player = ?2, year = ?3, sport = ?4, manufacturer = ?5,
             set_name = ?6, card_number = ?7, graded = ?8,
             grading_company = ?9, grade_number = ?10, notes = ?11,
             image_url = ?12, updated_at = ?13
           WHERE card_id = ?1",
          rusqlite::params![
            id_str,
            player,
            year,
            sport,
            manufacturer,
            set_name,
            card_number,
            graded,
            company,
            grade,
            notes,
            image_url,
            updated_str,
          ],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::CardNotFound(id));
    }
    self.fetch_card(id).await?.ok_or(Error::CardNotFound(id))
  }

  async fn delete_card(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);
    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM cards WHERE card_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;
    Ok(deleted > 0)
  }

  async fn list_cards(&self, user_id: Uuid) -> Result<Vec<Card>> {
    let user_id_str = encode_uuid(user_id);
    let raws: Vec<RawCard> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CARD_COLUMNS} FROM cards WHERE user_id = ?1"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![user_id_str], card_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCard::into_card).collect()
  }
}
