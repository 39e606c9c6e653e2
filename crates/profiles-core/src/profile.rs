//! Profile types — the single entity held by the store.
//!
//! A profile is a person's or a company's public contact card. The store
//! keeps it as one JSON document; `username` is its natural key.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, key};

/// Minimum length of a username, counted in characters after trimming.
pub const MIN_USERNAME_LEN: usize = 3;

// ─── Social links ────────────────────────────────────────────────────────────

/// The fixed set of social handles and URLs a profile may carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub website:   Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub instagram: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub facebook:  Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub telegram:  Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub tiktok:    Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub youtube:   Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub whatsapp:  Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub maps:      Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub snapchat:  Option<String>,
}

// ─── ProfileData ─────────────────────────────────────────────────────────────

/// Every caller-controlled field of a profile.
///
/// Used both as the input to a write and as the stored document body. Writes
/// always replace the whole value; there is no field-level merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileData {
  pub username:      String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name:          Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub job_title:     Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub profile_image: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub header_image:  Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub phone:         Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub email:         Option<String>,
  /// May only be `true` when `is_company` is `true`.
  #[serde(default)]
  pub is_verified:   bool,
  #[serde(default)]
  pub is_company:    bool,
  #[serde(default)]
  pub social_links:  SocialLinks,
}

impl ProfileData {
  /// Convenience constructor with every optional field absent.
  pub fn new(username: impl Into<String>) -> Self {
    Self {
      username: username.into(),
      ..Self::default()
    }
  }

  /// Trim the username and check its length.
  pub fn normalize(mut self) -> Result<Self> {
    let trimmed = self.username.trim();
    if trimmed.chars().count() < MIN_USERNAME_LEN {
      return Err(Error::UsernameTooShort);
    }
    if trimmed.len() != self.username.len() {
      self.username = trimmed.to_owned();
    }
    Ok(self)
  }

  /// Check the verified ⇒ company invariant.
  pub fn validate(&self) -> Result<()> {
    if self.is_verified && !self.is_company {
      return Err(Error::VerifiedNonCompany);
    }
    Ok(())
  }

  /// The display key derived from the username; see [`key::profile_key`].
  pub fn profile_key(&self) -> String { key::profile_key(&self.username) }

  /// Serialise into the document body kept by the store.
  pub fn to_document(&self) -> Result<String> {
    Ok(serde_json::to_string(self)?)
  }

  /// Parse a document body previously produced by [`Self::to_document`].
  pub fn from_document(document: &str) -> Result<Self> {
    Ok(serde_json::from_str(document)?)
  }
}

// ─── Profile ─────────────────────────────────────────────────────────────────

/// A stored profile: the store-assigned identity plus its data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
  /// Internal identity assigned by the store; never used for lookups.
  #[serde(rename = "_id")]
  pub profile_id: Uuid,
  #[serde(flatten)]
  pub data:       ProfileData,
}
