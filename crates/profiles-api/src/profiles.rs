//! Handlers for the profile endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/` | Every profile, insertion order |
//! | `GET`    | `/:profileKey` | Case-sensitive exact username match |
//! | `POST`   | `/api/save-profile` | Body: [`ProfileBody`]; returns 201 + derived key |
//! | `PUT`    | `/api/update-profile/:profileKey` | Full replacement; case-insensitive match |
//! | `DELETE` | `/api/profiles/:profileKey` | First `-` read as a space; case-insensitive match |

use std::sync::Arc;

use axum::{
  Json,
  extract::{FromRequest, FromRequestParts, Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use profiles_core::{
  key::{UsernameFilter, delete_target},
  profile::{Profile, ProfileData, SocialLinks},
  store::{ProfileStore, StoreError as _},
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

const NOT_FOUND: &str = "Profile not found";

fn not_found() -> ApiError { ApiError::NotFound(NOT_FOUND.to_owned()) }

// ─── Request / response bodies ────────────────────────────────────────────────

/// JSON body accepted by create and update.
///
/// Every field may be omitted. On update an omitted field clears the stored
/// value rather than keeping it.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileBody {
  pub username:      Option<String>,
  pub name:          Option<String>,
  pub job_title:     Option<String>,
  pub profile_image: Option<String>,
  pub header_image:  Option<String>,
  pub phone:         Option<String>,
  pub email:         Option<String>,
  pub is_verified:   Option<bool>,
  pub is_company:    Option<bool>,
  pub social_links:  Option<SocialLinks>,
}

impl From<ProfileBody> for ProfileData {
  fn from(b: ProfileBody) -> Self {
    ProfileData {
      username:      b.username.unwrap_or_default(),
      name:          b.name,
      job_title:     b.job_title,
      profile_image: b.profile_image,
      header_image:  b.header_image,
      phone:         b.phone,
      email:         b.email,
      is_verified:   b.is_verified.unwrap_or_default(),
      is_company:    b.is_company.unwrap_or_default(),
      social_links:  b.social_links.unwrap_or_default(),
    }
  }
}

/// [`Json`] extractor whose rejection renders as an [`ApiError`].
#[derive(Debug, FromRequest, Deserialize)]
#[from_request(via(Json), rejection(ApiError))]
#[serde(transparent)]
pub struct ProfileJson(pub ProfileBody);

/// The `{profile_key}` path segment, percent-decoded. A segment that does not
/// decode to UTF-8 is rejected as an [`ApiError`].
#[derive(Debug, FromRequestParts, Deserialize)]
#[from_request(via(Path), rejection(ApiError))]
#[serde(transparent)]
pub struct ProfileKey(pub String);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedResponse {
  pub message:     &'static str,
  pub profile_key: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
  pub message: &'static str,
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /api/save-profile` — returns 201 + `{message, profileKey}`.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  ProfileJson(body): ProfileJson,
) -> Result<impl IntoResponse, ApiError>
where
  S: ProfileStore,
{
  let data = ProfileData::from(body).normalize()?;
  let profile_key = data.profile_key();

  let existing = store
    .find_profile(UsernameFilter::exact(&data.username))
    .await
    .map_err(|e| ApiError::store_with("Server error", e))?;
  if existing.is_some() {
    return Err(ApiError::Conflict("Username is already taken.".to_owned()));
  }

  data.validate()?;

  let username = data.username.clone();
  match store.insert_profile(data).await {
    Ok(profile) => {
      tracing::info!(%username, id = %profile.profile_id, "profile created");
      Ok((
        StatusCode::CREATED,
        Json(SavedResponse {
          message: "Profile saved successfully",
          profile_key,
        }),
      ))
    }
    // Lost the race against a concurrent create of the same username.
    Err(e) if e.is_duplicate_key() => Err(ApiError::Conflict(
      "Profile key or username already exists.".to_owned(),
    )),
    Err(e) if e.is_invariant_violation() => {
      Err(profiles_core::Error::VerifiedNonCompany.into())
    }
    Err(e) => Err(ApiError::store_with("Server error", e)),
  }
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Profile>>, ApiError>
where
  S: ProfileStore,
{
  let profiles = store.list_profiles().await.map_err(ApiError::store)?;
  Ok(Json(profiles))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /:profileKey` — the key is compared verbatim with `username`.
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  ProfileKey(profile_key): ProfileKey,
) -> Result<Json<Profile>, ApiError>
where
  S: ProfileStore,
{
  let profile = store
    .find_profile(UsernameFilter::exact(profile_key))
    .await
    .map_err(|e| ApiError::store_with("Error fetching profile", e))?
    .ok_or_else(not_found)?;
  Ok(Json(profile))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /api/update-profile/:profileKey` — replaces every field of the
/// profile whose username equals the key ignoring case.
///
/// Invalid replacement data is reported as a 500, like any other failed
/// write on this route.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  ProfileKey(profile_key): ProfileKey,
  ProfileJson(body): ProfileJson,
) -> Result<Json<Profile>, ApiError>
where
  S: ProfileStore,
{
  const FAILED: &str = "Error updating profile";

  let data = ProfileData::from(body)
    .normalize()
    .and_then(|data| data.validate().map(|()| data))
    .map_err(|e| ApiError::store_with(FAILED, e))?;

  let profile = store
    .replace_profile(UsernameFilter::ignore_case(&profile_key), data)
    .await
    .map_err(|e| ApiError::store_with(FAILED, e))?
    .ok_or_else(not_found)?;

  tracing::info!(key = %profile_key, username = %profile.data.username, "profile updated");
  Ok(Json(profile))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /api/profiles/:profileKey`
///
/// Only the first hyphen of the key is read back as a space, so keys derived
/// from usernames of three or more words do not resolve here.
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  ProfileKey(profile_key): ProfileKey,
) -> Result<Json<MessageResponse>, ApiError>
where
  S: ProfileStore,
{
  let target = delete_target(&profile_key);
  let removed = store
    .delete_profile(UsernameFilter::ignore_case(target))
    .await
    .map_err(ApiError::store)?
    .ok_or_else(not_found)?;

  tracing::info!(key = %profile_key, username = %removed.data.username, "profile deleted");
  Ok(Json(MessageResponse {
    message: "Profile deleted successfully",
  }))
}
