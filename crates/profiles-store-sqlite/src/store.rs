//! [`SqliteStore`] — the SQLite implementation of [`ProfileStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use profiles_core::{
  key::UsernameFilter,
  profile::{Profile, ProfileData},
  store::ProfileStore,
};

use crate::{
  Error, Result,
  encode::{EncodedProfile, RawProfile, decode_uuid, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A profile store backed by a single SQLite file.
///
/// Cloning is cheap — every clone talks to the same connection thread, so
/// calls from concurrent requests are serialised in arrival order.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    tracing::debug!(path = %path.display(), "opened profile store");
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Shut the connection down. Calls made through other clones afterwards
  /// fail with a database error.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    Ok(())
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
}

/// Find the first row whose username matches `filter`.
///
/// Exact filters use the unique index. Case-insensitive filters scan in
/// insertion order and compare in Rust, since SQLite's `NOCASE` only folds
/// ASCII.
fn locate(
  conn: &rusqlite::Connection,
  filter: &UsernameFilter,
) -> rusqlite::Result<Option<RawProfile>> {
  match filter {
    UsernameFilter::Exact(key) => conn
      .query_row(
        &format!(
          "SELECT {} FROM profiles WHERE username = ?1",
          RawProfile::COLUMNS
        ),
        rusqlite::params![key],
        RawProfile::from_row,
      )
      .optional(),
    UsernameFilter::IgnoreCase(_) => {
      let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM profiles ORDER BY rowid",
        RawProfile::COLUMNS
      ))?;
      let mut rows = stmt.query([])?;
      while let Some(row) = rows.next()? {
        let raw = RawProfile::from_row(row)?;
        if filter.matches(&raw.username) {
          return Ok(Some(raw));
        }
      }
      Ok(None)
    }
  }
}

// ─── ProfileStore impl ───────────────────────────────────────────────────────

impl ProfileStore for SqliteStore {
  type Error = Error;

  async fn insert_profile(&self, data: ProfileData) -> Result<Profile> {
    let profile = Profile {
      profile_id: Uuid::new_v4(),
      data,
    };

    let id_str = encode_uuid(profile.profile_id);
    let row    = EncodedProfile::new(&profile.data)?;
    let username = row.username.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO profiles (profile_id, username, is_company, is_verified, document)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![
            id_str,
            row.username,
            row.is_company,
            row.is_verified,
            row.document,
          ],
        )?;
        Ok(())
      })
      .await
      .map_err(|e| Error::from_write(e, &username))?;

    Ok(profile)
  }

  async fn list_profiles(&self) -> Result<Vec<Profile>> {
    let raws: Vec<RawProfile> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {} FROM profiles ORDER BY rowid",
          RawProfile::COLUMNS
        ))?;
        let rows = stmt
          .query_map([], RawProfile::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawProfile::into_profile).collect()
  }

  async fn find_profile(&self, filter: UsernameFilter) -> Result<Option<Profile>> {
    let raw = self
      .conn
      .call(move |conn| Ok(locate(conn, &filter)?))
      .await?;

    raw.map(RawProfile::into_profile).transpose()
  }

  async fn replace_profile(
    &self,
    filter: UsernameFilter,
    data:   ProfileData,
  ) -> Result<Option<Profile>> {
    let row      = EncodedProfile::new(&data)?;
    let username = row.username.clone();

    // Locate and write in one call so no other request lands in between.
    let replaced: Option<String> = self
      .conn
      .call(move |conn| {
        let Some(raw) = locate(conn, &filter)? else {
          return Ok(None);
        };
        conn.execute(
          "UPDATE profiles
           SET username = ?2, is_company = ?3, is_verified = ?4, document = ?5
           WHERE profile_id = ?1",
          rusqlite::params![
            raw.profile_id,
            row.username,
            row.is_company,
            row.is_verified,
            row.document,
          ],
        )?;
        Ok(Some(raw.profile_id))
      })
      .await
      .map_err(|e| Error::from_write(e, &username))?;

    replaced
      .map(|id| {
        Ok(Profile {
          profile_id: decode_uuid(&id)?,
          data,
        })
      })
      .transpose()
  }

  async fn delete_profile(&self, filter: UsernameFilter) -> Result<Option<Profile>> {
    let removed = self
      .conn
      .call(move |conn| {
        let Some(raw) = locate(conn, &filter)? else {
          return Ok(None);
        };
        conn.execute(
          "DELETE FROM profiles WHERE profile_id = ?1",
          rusqlite::params![raw.profile_id],
        )?;
        Ok(Some(raw))
      })
      .await?;

    removed.map(RawProfile::into_profile).transpose()
  }
}

