//! Username keys and lookup filters.
//!
//! Three shapes of key exist:
//!
//! - the *profile key* returned on creation (lowercase, whitespace runs → `-`),
//! - the raw path segment used by get (exact) and update (case-insensitive),
//! - the delete segment, whose first hyphen is turned back into a space.
//!
//! The profile key is only ever handed back to the caller. Lookups match the
//! stored `username` through a [`UsernameFilter`].

/// Lowercase `username` and collapse every whitespace run into one hyphen.
///
/// Leading and trailing whitespace is dropped.
pub fn profile_key(username: &str) -> String {
  username
    .split_whitespace()
    .map(str::to_lowercase)
    .collect::<Vec<_>>()
    .join("-")
}

/// The username a delete path segment refers to: the first `-` becomes a
/// space, any later hyphens are kept.
///
/// This does not invert [`profile_key`] for usernames with more than one
/// word or with hyphens of their own.
pub fn delete_target(segment: &str) -> String { segment.replacen('-', " ", 1) }

/// How a key is compared against stored usernames.
///
/// Both variants compare the whole string literally; no pattern syntax in
/// the key is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsernameFilter {
  /// Byte-for-byte equality.
  Exact(String),
  /// Equality after Unicode lowercasing both sides.
  IgnoreCase(String),
}

impl UsernameFilter {
  pub fn exact(key: impl Into<String>) -> Self { Self::Exact(key.into()) }

  pub fn ignore_case(key: impl Into<String>) -> Self {
    Self::IgnoreCase(key.into())
  }

  pub fn matches(&self, username: &str) -> bool {
    match self {
      Self::Exact(k) => k == username,
      Self::IgnoreCase(k) => k.to_lowercase() == username.to_lowercase(),
    }
  }
}
