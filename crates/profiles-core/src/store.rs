//! The `ProfileStore` trait.
//!
//! Implemented by storage backends (e.g. `profiles-store-sqlite`). The HTTP
//! layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  key::UsernameFilter,
  profile::{Profile, ProfileData},
};

/// Backend errors the HTTP layer needs to tell apart.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// `true` when a write was rejected because the username is already held
  /// by another profile.
  fn is_duplicate_key(&self) -> bool;

  /// `true` when the store itself refused a verified non-company profile.
  fn is_invariant_violation(&self) -> bool;
}

/// Abstraction over a document store holding profiles.
///
/// The store enforces `username` uniqueness and the verified ⇒ company
/// invariant itself; callers may pre-check both but must treat the store's
/// rejection as final.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ProfileStore: Send + Sync {
  type Error: StoreError;

  /// Persist a new profile and return it with its store-assigned identity.
  fn insert_profile(
    &self,
    data: ProfileData,
  ) -> impl Future<Output = Result<Profile, Self::Error>> + Send + '_;

  /// Every stored profile, in insertion order.
  fn list_profiles(
    &self,
  ) -> impl Future<Output = Result<Vec<Profile>, Self::Error>> + Send + '_;

  /// The first profile whose username matches `filter`.
  fn find_profile(
    &self,
    filter: UsernameFilter,
  ) -> impl Future<Output = Result<Option<Profile>, Self::Error>> + Send + '_;

  /// Replace all data of the first profile matching `filter`.
  ///
  /// Returns the profile as stored after the write, or `None` if nothing
  /// matched. The store-assigned identity is preserved.
  fn replace_profile(
    &self,
    filter: UsernameFilter,
    data: ProfileData,
  ) -> impl Future<Output = Result<Option<Profile>, Self::Error>> + Send + '_;

  /// Remove the first profile matching `filter` and return it.
  fn delete_profile(
    &self,
    filter: UsernameFilter,
  ) -> impl Future<Output = Result<Option<Profile>, Self::Error>> + Send + '_;
}
