//! Integration tests for `SqliteStore` against an in-memory database.

use profiles_core::{
  key::UsernameFilter,
  profile::ProfileData,
  store::{ProfileStore, StoreError as _},
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn company(username: &str) -> ProfileData {
  let mut data = ProfileData::new(username);
  data.name = Some("Acme Ltd".into());
  data.email = Some("hello@acme.example".into());
  data.is_company = true;
  data.is_verified = true;
  data.social_links.website = Some("https://acme.example".into());
  data
}

// ─── Insert / find ───────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_find_exact() {
  let s = store().await;

  let inserted = s.insert_profile(company("acme")).await.unwrap();
  let fetched = s
    .find_profile(UsernameFilter::exact("acme"))
    .await
    .unwrap()
    .expect("profile stored");

  assert_eq!(fetched, inserted);
  assert_eq!(fetched.data, company("acme"));
}

#[tokio::test]
async fn find_missing_returns_none() {
  let s = store().await;
  let result = s.find_profile(UsernameFilter::exact("nobody")).await.unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn exact_find_is_case_sensitive() {
  let s = store().await;
  s.insert_profile(ProfileData::new("Ann")).await.unwrap();

  assert!(s.find_profile(UsernameFilter::exact("ann")).await.unwrap().is_none());
  assert!(
    s.find_profile(UsernameFilter::ignore_case("ann"))
      .await
      .unwrap()
      .is_some()
  );
}

#[tokio::test]
async fn ignore_case_find_folds_non_ascii() {
  let s = store().await;
  s.insert_profile(ProfileData::new("Élodie")).await.unwrap();

  let found = s
    .find_profile(UsernameFilter::ignore_case("ÉLODIE"))
    .await
    .unwrap();
  assert_eq!(found.unwrap().data.username, "Élodie");
}

// ─── Constraints ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn duplicate_username_is_rejected() {
  let s = store().await;
  s.insert_profile(ProfileData::new("ann")).await.unwrap();

  let err = s.insert_profile(ProfileData::new("ann")).await.unwrap_err();
  assert!(matches!(err, Error::DuplicateUsername(ref u) if u == "ann"), "{err}");
  assert!(err.is_duplicate_key());

  assert_eq!(s.list_profiles().await.unwrap().len(), 1);
}

#[tokio::test]
async fn usernames_differing_in_case_are_distinct() {
  let s = store().await;
  s.insert_profile(ProfileData::new("ann")).await.unwrap();
  s.insert_profile(ProfileData::new("ANN")).await.unwrap();
  assert_eq!(s.list_profiles().await.unwrap().len(), 2);
}

#[tokio::test]
async fn verified_individual_is_rejected_by_store() {
  let s = store().await;
  let mut data = ProfileData::new("ann");
  data.is_verified = true;

  let err = s.insert_profile(data).await.unwrap_err();
  assert!(matches!(err, Error::ConstraintViolation(_)), "{err}");
  assert!(err.is_invariant_violation());
  assert!(!err.is_duplicate_key());
  assert!(s.list_profiles().await.unwrap().is_empty());
}

// ─── List ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_empty() {
  let s = store().await;
  assert!(s.list_profiles().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_returns_insertion_order() {
  let s = store().await;
  for name in ["zed", "amy", "max"] {
    s.insert_profile(ProfileData::new(name)).await.unwrap();
  }

  let names: Vec<_> = s
    .list_profiles()
    .await
    .unwrap()
    .into_iter()
    .map(|p| p.data.username)
    .collect();
  assert_eq!(names, ["zed", "amy", "max"]);
}

// ─── Replace ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn replace_overwrites_every_field() {
  let s = store().await;
  let mut original = company("acme");
  original.phone = Some("+1 555 0100".into());
  let inserted = s.insert_profile(original).await.unwrap();

  let replacement = ProfileData::new("acme");
  let updated = s
    .replace_profile(UsernameFilter::ignore_case("ACME"), replacement.clone())
    .await
    .unwrap()
    .expect("matched");

  assert_eq!(updated.profile_id, inserted.profile_id);
  assert_eq!(updated.data, replacement);

  let fetched = s
    .find_profile(UsernameFilter::exact("acme"))
    .await
    .unwrap()
    .unwrap();
  assert_eq!(fetched.data.phone, None);
  assert!(!fetched.data.is_verified);
  assert_eq!(fetched.data.social_links, Default::default());
}

#[tokio::test]
async fn replace_can_rename() {
  let s = store().await;
  s.insert_profile(ProfileData::new("ann")).await.unwrap();

  s.replace_profile(UsernameFilter::ignore_case("ann"), ProfileData::new("anne"))
    .await
    .unwrap()
    .unwrap();

  assert!(s.find_profile(UsernameFilter::exact("ann")).await.unwrap().is_none());
  assert!(s.find_profile(UsernameFilter::exact("anne")).await.unwrap().is_some());
}

#[tokio::test]
async fn replace_missing_returns_none() {
  let s = store().await;
  let result = s
    .replace_profile(UsernameFilter::ignore_case("ghost"), ProfileData::new("ghost"))
    .await
    .unwrap();
  assert!(result.is_none());
  assert!(s.list_profiles().await.unwrap().is_empty());
}

#[tokio::test]
async fn replace_into_taken_username_is_duplicate() {
  let s = store().await;
  s.insert_profile(ProfileData::new("ann")).await.unwrap();
  s.insert_profile(ProfileData::new("bob")).await.unwrap();

  let err = s
    .replace_profile(UsernameFilter::ignore_case("bob"), ProfileData::new("ann"))
    .await
    .unwrap_err();
  assert!(err.is_duplicate_key(), "{err}");
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_first_match() {
  let s = store().await;
  let kept = s.insert_profile(ProfileData::new("bob")).await.unwrap();
  let gone = s.insert_profile(ProfileData::new("Ann Lee")).await.unwrap();

  let removed = s
    .delete_profile(UsernameFilter::ignore_case("ann lee"))
    .await
    .unwrap()
    .expect("matched");
  assert_eq!(removed.profile_id, gone.profile_id);

  let rest = s.list_profiles().await.unwrap();
  assert_eq!(rest.len(), 1);
  assert_eq!(rest[0].profile_id, kept.profile_id);
}

#[tokio::test]
async fn delete_missing_returns_none() {
  let s = store().await;
  s.insert_profile(ProfileData::new("bob")).await.unwrap();

  let removed = s.delete_profile(UsernameFilter::ignore_case("bo")).await.unwrap();
  assert!(removed.is_none());
  assert_eq!(s.list_profiles().await.unwrap().len(), 1);
}

// ─── Lifecycle ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn closed_store_rejects_calls() {
  let s = store().await;
  let other = s.clone();
  s.close().await.unwrap();

  let err = other.list_profiles().await.unwrap_err();
  assert!(matches!(err, Error::Database(_)), "{err}");
}

#[tokio::test]
async fn reopening_file_keeps_profiles() {
  let dir = std::env::temp_dir().join(format!("profiles-{}", uuid::Uuid::new_v4()));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("profiles.db");

  let s = SqliteStore::open(&path).await.unwrap();
  s.insert_profile(company("acme")).await.unwrap();
  s.close().await.unwrap();

  let s = SqliteStore::open(&path).await.unwrap();
  let all = s.list_profiles().await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].data, company("acme"));
  s.close().await.unwrap();

  std::fs::remove_dir_all(&dir).ok();
}
