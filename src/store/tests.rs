use super::*;

fn cafe(store: &Store) -> Business {
    store
        .create_business("John's Cafe", "johns-cafe", "owner@johnscafe.com")
        .unwrap()
}

#[test]
fn test_sentiment_serialization() {
    let json = serde_json::to_string(&Sentiment::Happy).unwrap();
    assert_eq!(json, r#""happy""#);

    let parsed: Sentiment = serde_json::from_str(r#""sad""#).unwrap();
    assert_eq!(parsed, Sentiment::Sad);
}

#[test]
fn test_sentiment_from_str_case_insensitive() {
    assert_eq!("Happy".parse::<Sentiment>().unwrap(), Sentiment::Happy);
    assert_eq!("NEUTRAL".parse::<Sentiment>().unwrap(), Sentiment::Neutral);
    assert!("angry".parse::<Sentiment>().is_err());
}

#[test]
fn test_only_unhappy_sentiments_map_to_feedback_ratings() {
    assert_eq!(Sentiment::Happy.feedback_rating(), None);
    assert_eq!(
        Sentiment::Neutral.feedback_rating(),
        Some(FeedbackRating::Neutral)
    );
    assert_eq!(Sentiment::Sad.feedback_rating(), Some(FeedbackRating::Sad));
}

#[test]
fn test_business_serializes_camel_case() {
    let business = Business::new("b1", "Cafe", "cafe", "a@b.c");
    let json = serde_json::to_value(&business).unwrap();
    assert_eq!(json["lastPlatformIndex"], 0);
    assert!(json.get("last_platform_index").is_none());
    assert!(json.get("lastVisitAt").is_none());
}

#[test]
fn test_slug_validation() {
    assert!(is_valid_slug("johns-cafe"));
    assert!(is_valid_slug("cafe42"));
    assert!(!is_valid_slug(""));
    assert!(!is_valid_slug("Johns-Cafe"));
    assert!(!is_valid_slug("johns cafe"));
    assert!(!is_valid_slug("johns_cafe"));
    assert!(!is_valid_slug("café"));
}

#[test]
fn test_create_business_starts_empty() {
    let store = Store::new();
    let business = cafe(&store);

    assert!(business.platforms.is_empty());
    assert_eq!(business.last_platform_index, 0);
    assert_eq!(business.id.len(), 36);
    assert_eq!(store.business_count(), 1);
}

#[test]
fn test_create_business_rejects_duplicate_slug() {
    let store = Store::new();
    cafe(&store);

    let result = store.create_business("Other", "johns-cafe", "x@y.z");
    assert_eq!(
        result.unwrap_err(),
        StoreError::DuplicateSlug("johns-cafe".to_string())
    );
    assert_eq!(store.business_count(), 1);
}

#[test]
fn test_create_business_rejects_invalid_slug() {
    let store = Store::new();
    let result = store.create_business("Cafe", "Johns Cafe", "x@y.z");
    assert!(matches!(result, Err(StoreError::InvalidSlug(_))));
    assert_eq!(store.business_count(), 0);
}

#[test]
fn test_lookup_by_id_and_slug() {
    let store = Store::new();
    let business = cafe(&store);

    assert_eq!(store.get_business(&business.id).unwrap().slug, "johns-cafe");
    assert_eq!(
        store.get_business_by_slug("johns-cafe").unwrap().id,
        business.id
    );
    assert!(store.get_business_by_slug("missing").is_none());
    assert!(store.get_business("missing").is_none());
}

#[test]
fn test_replace_platforms_discards_previous_ids() {
    let store = Store::new();
    let business = cafe(&store);

    let first = store
        .replace_platforms(
            &business.id,
            vec![
                PlatformDraft::new("Google", "https://g", 50),
                PlatformDraft::new("Facebook", "https://f", 50),
            ],
        )
        .unwrap();
    let second = store
        .replace_platforms(
            &business.id,
            vec![
                PlatformDraft::new("Google", "https://g", 50),
                PlatformDraft::new("Facebook", "https://f", 50),
            ],
        )
        .unwrap();

    assert_eq!(second.platforms.len(), 2);
    for (before, after) in first.platforms.iter().zip(&second.platforms) {
        assert_ne!(before.id, after.id);
        assert_eq!(before.order, after.order);
        assert_eq!(after.business_id, business.id);
    }
}

#[test]
fn test_replace_platforms_sorts_by_explicit_order() {
    let store = Store::new();
    let business = cafe(&store);

    let mut late = PlatformDraft::new("Late", "https://late", 40);
    late.order = Some(5);
    let mut early = PlatformDraft::new("Early", "https://early", 60);
    early.order = Some(1);

    let updated = store
        .replace_platforms(&business.id, vec![late, early])
        .unwrap();

    let names: Vec<_> = updated.platforms.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Early", "Late"]);
    assert_eq!(updated.platforms[0].order, 1);
}

#[test]
fn test_replace_platforms_defaults_order_to_position() {
    let store = Store::new();
    let business = cafe(&store);

    let updated = store
        .replace_platforms(
            &business.id,
            vec![
                PlatformDraft::new("A", "https://a", 50),
                PlatformDraft::new("B", "https://b", 25),
                PlatformDraft::new("C", "https://c", 25),
            ],
        )
        .unwrap();

    let orders: Vec<_> = updated.platforms.iter().map(|p| p.order).collect();
    assert_eq!(orders, vec![0, 1, 2]);
}

#[test]
fn test_replace_platforms_unknown_business() {
    let store = Store::new();
    let result = store.replace_platforms("nope", vec![]);
    assert_eq!(
        result.unwrap_err(),
        StoreError::BusinessNotFound("nope".to_string())
    );
}

#[test]
fn test_update_business_ignores_empty_fields() {
    let store = Store::new();
    let business = cafe(&store);

    let updated = store
        .update_business(
            &business.id,
            BusinessUpdate {
                name: Some("John's Bistro".to_string()),
                email: Some(String::new()),
            },
        )
        .unwrap();

    assert_eq!(updated.name, "John's Bistro");
    assert_eq!(updated.email, "owner@johnscafe.com");
    assert!(updated.updated_at >= business.updated_at);
}

#[test]
fn test_delete_business_frees_slug_and_feedback() {
    let store = Store::new();
    let business = cafe(&store);
    store
        .create_feedback(NewFeedback {
            business_id: business.id.clone(),
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            phone: String::new(),
            message: "Cold coffee".to_string(),
            rating: FeedbackRating::Sad,
            stars: 2,
            wants_contact: false,
        })
        .unwrap();

    store.delete_business(&business.id).unwrap();

    assert_eq!(store.business_count(), 0);
    assert!(store.feedback_for_business(&business.id).is_empty());
    assert!(store
        .create_business("New Cafe", "johns-cafe", "new@example.com")
        .is_ok());
}

#[test]
fn test_delete_unknown_business() {
    let store = Store::new();
    assert!(matches!(
        store.delete_business("nope"),
        Err(StoreError::BusinessNotFound(_))
    ));
}

#[test]
fn test_list_businesses_oldest_first() {
    let store = Store::new();
    let mut older = Business::new("1", "Older", "older", "a@b.c");
    older.created_at = chrono::Utc::now() - chrono::Duration::days(1);
    store.insert_business(older).unwrap();
    cafe(&store);

    let slugs: Vec<_> = store
        .list_businesses()
        .into_iter()
        .map(|b| b.slug)
        .collect();
    assert_eq!(slugs, vec!["older", "johns-cafe"]);
}

#[test]
fn test_record_visit_sets_timestamp() {
    let store = Store::new();
    let business = cafe(&store);
    assert!(business.last_visit_at.is_none());

    store.record_visit(&business.id).unwrap();
    assert!(store.get_business(&business.id).unwrap().last_visit_at.is_some());
}

#[test]
fn test_feedback_lifecycle() {
    let store = Store::new();
    let business = cafe(&store);

    let feedback = store
        .create_feedback(NewFeedback {
            business_id: business.id.clone(),
            name: "Bob".to_string(),
            email: "bob@example.com".to_string(),
            phone: "555-0100".to_string(),
            message: "Slow service".to_string(),
            rating: FeedbackRating::Neutral,
            stars: 3,
            wants_contact: true,
        })
        .unwrap();
    assert!(!feedback.read);

    let listed = store.feedback_for_business(&business.id);
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, feedback.id);

    let read = store.mark_feedback_read(&feedback.id).unwrap();
    assert!(read.read);
    assert!(matches!(
        store.mark_feedback_read("missing"),
        Err(StoreError::FeedbackNotFound(_))
    ));
}

#[test]
fn test_feedback_requires_existing_business() {
    let store = Store::new();
    let result = store.create_feedback(NewFeedback {
        business_id: "ghost".to_string(),
        name: "Bob".to_string(),
        email: "bob@example.com".to_string(),
        phone: String::new(),
        message: "Hello".to_string(),
        rating: FeedbackRating::Sad,
        stars: 1,
        wants_contact: false,
    });
    assert!(matches!(result, Err(StoreError::BusinessNotFound(_))));
}

#[tokio::test]
async fn test_repository_cursor_write_is_visible_to_next_load() {
    let store = Store::new();
    let business = cafe(&store);

    store.advance_rotation_cursor(&business.id, 7).await.unwrap();

    let reloaded = store.load_business_by_slug("johns-cafe").await.unwrap();
    assert_eq!(reloaded.last_platform_index, 7);
}

#[tokio::test]
async fn test_repository_unknown_business() {
    let store = Store::new();
    assert!(store.load_business("nope").await.is_err());
    assert!(store.advance_rotation_cursor("nope", 1).await.is_err());
}
