//! Read-path tests: proximity, text search, tag facets, rankings.

mod common;

use catalog_server::db::repository::store;

use common::{seed_review, seed_user, service, store_payload, test_pool};

#[tokio::test]
async fn near_is_bounded_and_sorted_nearest_first() {
    let pool = test_pool().await;
    let catalog = service(&pool);
    let user = seed_user(&pool, "Ana").await;

    // All on the same latitude so the east-west offsets set the distance:
    // ~0.73 km, ~5 km and ~19.6 km from the query point.
    let center = catalog
        .create_store(&user, store_payload("Center", 2.3522, 48.8566))
        .await
        .unwrap();
    let near = catalog
        .create_store(&user, store_payload("Near", 2.3622, 48.8566))
        .await
        .unwrap();
    let mid = catalog
        .create_store(&user, store_payload("Mid", 2.4200, 48.8566))
        .await
        .unwrap();
    catalog
        .create_store(&user, store_payload("Far", 2.6200, 48.8566))
        .await
        .unwrap();

    let hits = catalog.nearby(2.3522, 48.8566, None, None).await.unwrap();
    let ids: Vec<i64> = hits.iter().map(|h| h.id).collect();
    assert_eq!(ids, vec![center.id, near.id, mid.id]);
    for pair in hits.windows(2) {
        assert!(pair[0].distance_m <= pair[1].distance_m);
    }
    for hit in &hits {
        assert!(hit.distance_m <= 16_600.0);
    }

    // Tighter radius drops the 5 km store
    let close = catalog
        .nearby(2.3522, 48.8566, Some(1_000.0), None)
        .await
        .unwrap();
    let ids: Vec<i64> = close.iter().map(|h| h.id).collect();
    assert_eq!(ids, vec![center.id, near.id]);

    // Limit truncates after sorting
    let limited = catalog
        .nearby(2.3522, 48.8566, None, Some(1))
        .await
        .unwrap();
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].id, center.id);
}

#[tokio::test]
async fn search_ranks_name_matches_above_description_matches() {
    let pool = test_pool().await;
    let catalog = service(&pool);
    let user = seed_user(&pool, "Ana").await;

    let name_match = catalog
        .create_store(&user, store_payload("Espresso Bar", 2.35, 48.85))
        .await
        .unwrap();

    let mut partial = store_payload("Milk Corner", 2.36, 48.85);
    partial.description = Some("We also serve espresso on weekends".to_string());
    let description_match = catalog.create_store(&user, partial).await.unwrap();

    let hits = catalog.search("espresso", None).await.unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].id, name_match.id);
    assert_eq!(hits[1].id, description_match.id);
    for pair in hits.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[tokio::test]
async fn search_applies_default_limit_and_ignores_blank_queries() {
    let pool = test_pool().await;
    let catalog = service(&pool);
    let user = seed_user(&pool, "Ana").await;

    for i in 0..7 {
        catalog
            .create_store(&user, store_payload(&format!("Espresso Spot {i}"), 2.35, 48.85))
            .await
            .unwrap();
    }

    // Default limit is 5
    let hits = catalog.search("espresso", None).await.unwrap();
    assert_eq!(hits.len(), 5);

    let all = catalog.search("espresso", Some(10)).await.unwrap();
    assert_eq!(all.len(), 7);

    assert!(catalog.search("   ", None).await.unwrap().is_empty());
}

#[tokio::test]
async fn search_matches_any_term() {
    let pool = test_pool().await;
    let catalog = service(&pool);
    let user = seed_user(&pool, "Ana").await;

    catalog
        .create_store(&user, store_payload("Espresso Bar", 2.35, 48.85))
        .await
        .unwrap();
    catalog
        .create_store(&user, store_payload("Ramen House", 2.36, 48.85))
        .await
        .unwrap();

    // OR semantics across terms: either word is enough to match
    let hits = catalog.search("espresso ramen", None).await.unwrap();
    assert_eq!(hits.len(), 2);
}

#[tokio::test]
async fn tag_counts_use_per_store_presence() {
    let pool = test_pool().await;
    let catalog = service(&pool);
    let user = seed_user(&pool, "Ana").await;

    let mut a = store_payload("Store A", 2.35, 48.85);
    a.tags = vec!["coffee".to_string(), "wifi".to_string()];
    catalog.create_store(&user, a).await.unwrap();

    let mut b = store_payload("Store B", 2.36, 48.85);
    b.tags = vec!["coffee".to_string()];
    catalog.create_store(&user, b).await.unwrap();

    // Duplicated within one store: counts once
    let mut c = store_payload("Store C", 2.37, 48.85);
    c.tags = vec!["wifi".to_string(), "wifi".to_string()];
    let store_c = catalog.create_store(&user, c).await.unwrap();

    let counts = store::tag_counts(&pool).await.unwrap();
    let pairs: Vec<(&str, i64)> = counts.iter().map(|t| (t.tag.as_str(), t.count)).collect();
    assert_eq!(pairs, vec![("coffee", 2), ("wifi", 2)]);

    // The store itself still carries the duplicate label, in order
    assert_eq!(store_c.tags, vec!["wifi", "wifi"]);
}

#[tokio::test]
async fn tag_browse_filters_stores_by_facet() {
    let pool = test_pool().await;
    let catalog = service(&pool);
    let user = seed_user(&pool, "Ana").await;

    let mut tagged = store_payload("Tagged", 2.35, 48.85);
    tagged.tags = vec!["coffee".to_string()];
    let tagged = catalog.create_store(&user, tagged).await.unwrap();

    catalog
        .create_store(&user, store_payload("Untagged", 2.36, 48.85))
        .await
        .unwrap();

    let browse = catalog.browse_tag(Some("coffee")).await.unwrap();
    assert_eq!(browse.tag.as_deref(), Some("coffee"));
    assert_eq!(browse.stores.len(), 1);
    assert_eq!(browse.stores[0].id, tagged.id);
    assert_eq!(browse.tags.len(), 1);

    // No facet selected: every store with at least one tag
    let browse = catalog.browse_tag(None).await.unwrap();
    assert_eq!(browse.stores.len(), 1);
    assert_eq!(browse.stores[0].id, tagged.id);

    // Unknown facet: counts still listed, no stores
    let browse = catalog.browse_tag(Some("sushi")).await.unwrap();
    assert!(browse.stores.is_empty());
}

#[tokio::test]
async fn top_stores_require_two_reviews_and_rank_by_average() {
    let pool = test_pool().await;
    let catalog = service(&pool);
    let user = seed_user(&pool, "Ana").await;

    let single = catalog
        .create_store(&user, store_payload("One Review", 2.35, 48.85))
        .await
        .unwrap();
    seed_review(&pool, single.id, user.id, 5).await;

    let pair = catalog
        .create_store(&user, store_payload("Two Reviews", 2.36, 48.85))
        .await
        .unwrap();
    seed_review(&pool, pair.id, user.id, 3).await;
    seed_review(&pool, pair.id, user.id, 5).await;

    let triple = catalog
        .create_store(&user, store_payload("Three Reviews", 2.37, 48.85))
        .await
        .unwrap();
    seed_review(&pool, triple.id, user.id, 5).await;
    seed_review(&pool, triple.id, user.id, 5).await;
    seed_review(&pool, triple.id, user.id, 4).await;

    let ranked = catalog.top_stores(None).await.unwrap();
    let ids: Vec<i64> = ranked.iter().map(|s| s.id).collect();

    // The single-review store is filtered out before averaging
    assert!(!ids.contains(&single.id));
    assert_eq!(ids, vec![triple.id, pair.id]);

    assert!((ranked[0].average_rating - 14.0 / 3.0).abs() < 1e-9);
    assert!((ranked[1].average_rating - 4.0).abs() < 1e-9);
    assert_eq!(ranked[0].review_count, 3);
    assert_eq!(ranked[1].review_count, 2);

    // Reviews are attached explicitly for each ranked store
    assert_eq!(ranked[0].reviews.len(), 3);
    assert_eq!(ranked[1].reviews.len(), 2);

    for window in ranked.windows(2) {
        assert!(window[0].average_rating >= window[1].average_rating);
    }

    // Limit truncates after ordering
    let top_one = catalog.top_stores(Some(1)).await.unwrap();
    assert_eq!(top_one.len(), 1);
    assert_eq!(top_one[0].id, triple.id);
}
