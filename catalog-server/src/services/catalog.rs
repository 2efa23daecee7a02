//! Catalog Service
//!
//! Orchestrates the repository layer behind the HTTP surface: slug
//! derivation on writes, ownership checks, the pagination redirect policy,
//! and the read queries (nearby, search, tags, rankings).

use shared::models::{
    RankedStore, SearchHit, Store, StoreCreate, StoreDetail, StorePageData, StoreSummary,
    StoreUpdate, TagBrowse,
};
use sqlx::SqlitePool;

use crate::auth::CurrentUser;
use crate::db::repository::{RepoError, store, user};
use crate::db::repository::store::NewStore;
use crate::services::slug;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_DESCRIPTION_LEN, MAX_NAME_LEN, MAX_PHOTO_LEN, validate_coordinates,
    validate_optional_text, validate_required_text, validate_tags,
};
use crate::utils::{AppError, AppResult};

/// Per-query defaults, sourced from config at startup
#[derive(Debug, Clone, Copy)]
pub struct QueryDefaults {
    pub page_size: u32,
    pub near_max_distance_m: f64,
    pub near_limit: u32,
    pub search_limit: u32,
    pub top_limit: u32,
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self {
            page_size: 4,
            near_max_distance_m: 16_600.0,
            near_limit: 10,
            search_limit: 5,
            top_limit: 10,
        }
    }
}

/// Outcome of a page request. Out-of-range pages are not an error: the
/// caller is told to go to the last page that exists.
#[derive(Debug)]
pub enum PagedStores {
    Page(StorePageData),
    RedirectToLast { last_page: u32 },
}

/// How many times a write retries slug derivation when the unique index
/// reports a collision under concurrent creation.
const SLUG_ATTEMPTS: u32 = 3;

#[derive(Clone)]
pub struct CatalogService {
    pool: SqlitePool,
    defaults: QueryDefaults,
}

impl CatalogService {
    pub fn new(pool: SqlitePool, defaults: QueryDefaults) -> Self {
        Self { pool, defaults }
    }

    // ── Write path ──────────────────────────────────────────────────

    /// Create a store owned by `current_user`. The slug is derived from the
    /// name; on index collision generation is retried with a fresh count.
    pub async fn create_store(
        &self,
        current_user: &CurrentUser,
        data: StoreCreate,
    ) -> AppResult<Store> {
        validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
        validate_required_text(&data.address, "address", MAX_ADDRESS_LEN)?;
        validate_optional_text(&data.description, "description", MAX_DESCRIPTION_LEN)?;
        validate_optional_text(&data.photo, "photo", MAX_PHOTO_LEN)?;
        validate_coordinates(data.lng, data.lat)?;
        validate_tags(&data.tags)?;

        if !user::exists(&self.pool, current_user.id).await? {
            return Err(AppError::Validation(format!(
                "author {} is not a known user",
                current_user.id
            )));
        }

        let name = data.name.trim().to_string();
        let base = slug::slugify(&name);
        if base.is_empty() {
            return Err(AppError::Validation(
                "name must contain at least one alphanumeric character".to_string(),
            ));
        }

        let record = NewStore {
            name,
            slug: String::new(),
            description: trimmed_opt(data.description),
            tags: data.tags.iter().map(|t| t.trim().to_string()).collect(),
            address: data.address.trim().to_string(),
            lng: data.lng,
            lat: data.lat,
            photo: data.photo,
            author_id: current_user.id,
        };

        for attempt in 1..=SLUG_ATTEMPTS {
            let existing = store::find_slugs_like(&self.pool, &base).await?;
            let candidate = slug::next_slug(&base, &existing);
            let mut record = record.clone();
            record.slug = candidate.clone();
            match store::create(&self.pool, record).await {
                Ok(created) => {
                    tracing::info!(id = created.id, slug = %created.slug, "Store created");
                    return Ok(created);
                }
                Err(RepoError::Duplicate(_)) => {
                    tracing::warn!(slug = %candidate, attempt, "Slug collision, regenerating");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(AppError::Conflict(format!(
            "Could not derive a unique slug for '{base}'"
        )))
    }

    /// Apply a partial update after the ownership check. The slug is
    /// re-derived only when the name actually changes.
    pub async fn update_store(
        &self,
        current_user: &CurrentUser,
        id: i64,
        data: StoreUpdate,
    ) -> AppResult<Store> {
        let existing = store::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Store {id} not found")))?;
        confirm_owner(&existing, current_user)?;

        let mut data = data;
        if let Some(name) = data.name {
            let name = name.trim().to_string();
            validate_required_text(&name, "name", MAX_NAME_LEN)?;
            data.name = Some(name);
        }
        if let Some(address) = data.address {
            let address = address.trim().to_string();
            validate_required_text(&address, "address", MAX_ADDRESS_LEN)?;
            data.address = Some(address);
        }
        if let Some(description) = data.description {
            let description = description.trim().to_string();
            data.description = Some(description);
        }
        validate_optional_text(&data.description, "description", MAX_DESCRIPTION_LEN)?;
        validate_optional_text(&data.photo, "photo", MAX_PHOTO_LEN)?;
        validate_coordinates(
            data.lng.unwrap_or(existing.lng),
            data.lat.unwrap_or(existing.lat),
        )?;
        if let Some(tags) = &data.tags {
            validate_tags(tags)?;
        }

        // Regenerate the slug only on an actual rename
        let renamed = data
            .name
            .as_ref()
            .is_some_and(|name| *name != existing.name);
        if !renamed {
            return Ok(store::update(&self.pool, id, &data, None).await?);
        }

        let base = slug::slugify(data.name.as_deref().unwrap_or_default());
        if base.is_empty() {
            return Err(AppError::Validation(
                "name must contain at least one alphanumeric character".to_string(),
            ));
        }
        for attempt in 1..=SLUG_ATTEMPTS {
            let slugs = store::find_slugs_like(&self.pool, &base).await?;
            let candidate = slug::next_slug(&base, &slugs);
            match store::update(&self.pool, id, &data, Some(&candidate)).await {
                Ok(updated) => {
                    tracing::info!(id, slug = %updated.slug, "Store updated");
                    return Ok(updated);
                }
                Err(RepoError::Duplicate(_)) => {
                    tracing::warn!(slug = %candidate, attempt, "Slug collision, regenerating");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Err(AppError::Conflict(format!(
            "Could not derive a unique slug for '{base}'"
        )))
    }

    // ── Read path ───────────────────────────────────────────────────

    pub async fn get_store(&self, id: i64) -> AppResult<Store> {
        store::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Store {id} not found")))
    }

    /// Canonical lookup by slug with the author profile attached;
    /// the review join is opt-in.
    pub async fn get_by_slug(&self, slug: &str, with_reviews: bool) -> AppResult<StoreDetail> {
        let (store, reviews) = if with_reviews {
            let (store, reviews) = store::find_by_slug_with_reviews(&self.pool, slug)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Store '{slug}' not found")))?;
            (store, Some(reviews))
        } else {
            let store = store::find_by_slug(&self.pool, slug)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Store '{slug}' not found")))?;
            (store, None)
        };
        let author = user::find_by_id(&self.pool, store.author_id).await?;
        Ok(StoreDetail {
            store,
            author,
            reviews,
        })
    }

    /// Paged listing, newest first. Requesting past the end yields a
    /// redirect outcome to the last populated page.
    pub async fn store_page(&self, page: u32) -> AppResult<PagedStores> {
        let page = page.max(1);
        let size = self.defaults.page_size;
        let (stores, total) = store::list_page(&self.pool, page, size).await?;
        let pages = (total as u64).div_ceil(u64::from(size)) as u32;
        if stores.is_empty() && page > 1 && total > 0 {
            return Ok(PagedStores::RedirectToLast { last_page: pages });
        }
        Ok(PagedStores::Page(StorePageData {
            stores,
            page,
            pages,
            total,
        }))
    }

    /// Stores near a point, nearest first and bounded by distance.
    pub async fn nearby(
        &self,
        lng: f64,
        lat: f64,
        max_distance_m: Option<f64>,
        limit: Option<u32>,
    ) -> AppResult<Vec<StoreSummary>> {
        validate_coordinates(lng, lat)?;
        let max_distance_m = max_distance_m.unwrap_or(self.defaults.near_max_distance_m);
        if !(max_distance_m.is_finite() && max_distance_m > 0.0) {
            return Err(AppError::Validation(format!(
                "max distance out of range: {max_distance_m}"
            )));
        }
        let limit = limit.unwrap_or(self.defaults.near_limit);
        Ok(store::find_near(&self.pool, lng, lat, max_distance_m, limit).await?)
    }

    /// Relevance-ranked text search over name + description.
    pub async fn search(&self, query: &str, limit: Option<u32>) -> AppResult<Vec<SearchHit>> {
        let limit = limit.unwrap_or(self.defaults.search_limit);
        Ok(store::search_text(&self.pool, query, limit).await?)
    }

    /// Tag facets with counts, plus the stores for the selected tag
    /// (or every tagged store when no tag is given).
    pub async fn browse_tag(&self, tag: Option<&str>) -> AppResult<TagBrowse> {
        let tags = store::tag_counts(&self.pool).await?;
        let stores = store::find_by_tag(&self.pool, tag).await?;
        Ok(TagBrowse {
            tag: tag.map(str::to_string),
            tags,
            stores,
        })
    }

    /// Top stores by average rating (at least two reviews each).
    pub async fn top_stores(&self, limit: Option<u32>) -> AppResult<Vec<RankedStore>> {
        let limit = limit.unwrap_or(self.defaults.top_limit);
        Ok(store::top_rated(&self.pool, limit).await?)
    }
}

/// Fail with a permission error unless `current_user` authored the store.
pub fn confirm_owner(store: &Store, current_user: &CurrentUser) -> AppResult<()> {
    if store.author_id != current_user.id {
        return Err(AppError::Forbidden(
            "You are not the author of this store".to_string(),
        ));
    }
    Ok(())
}

fn trimmed_opt(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
