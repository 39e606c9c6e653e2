//! Encoding and decoding helpers between profile types and the plain-text
//! representations stored in SQLite columns.
//!
//! UUIDs are stored as hyphenated lowercase strings, booleans as 0/1, and the
//! profile body as compact JSON.

use profiles_core::profile::{Profile, ProfileData};
use uuid::Uuid;

use crate::Result;

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── Row ─────────────────────────────────────────────────────────────────────

/// Column values written for one profile's data.
pub struct EncodedProfile {
  pub username:    String,
  pub is_company:  bool,
  pub is_verified: bool,
  pub document:    String,
}

impl EncodedProfile {
  pub fn new(data: &ProfileData) -> Result<Self> {
    Ok(Self {
      username:    data.username.clone(),
      is_company:  data.is_company,
      is_verified: data.is_verified,
      document:    data.to_document()?,
    })
  }
}

/// A profile row as read back from the table, prior to decoding.
#[derive(Debug, Clone)]
pub struct RawProfile {
  pub profile_id: String,
  pub username:   String,
  pub document:   String,
}

impl RawProfile {
  /// Column list matching [`RawProfile::from_row`].
  pub const COLUMNS: &'static str = "profile_id, username, document";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      profile_id: row.get(0)?,
      username:   row.get(1)?,
      document:   row.get(2)?,
    })
  }

  pub fn into_profile(self) -> Result<Profile> {
    Ok(Profile {
      profile_id: decode_uuid(&self.profile_id)?,
      data:       ProfileData::from_document(&self.document)?,
    })
  }
}
