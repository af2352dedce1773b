use quotebook_core::{Quote, QuoteDraft, QuoteField, QuoteValidationError, MAX_TAGS};
use uuid::Uuid;

#[test]
fn create_assigns_non_nil_unique_ids() {
    let first = Quote::create(QuoteDraft::new("a", "b", "c")).unwrap();
    let second = Quote::create(QuoteDraft::new("a", "b", "c")).unwrap();

    assert!(!first.id.is_nil());
    assert_ne!(first.id, second.id);
    assert!(first.tags.is_empty());
}

#[test]
fn with_id_rejects_nil_uuid() {
    let err = Quote::with_id(Uuid::nil(), QuoteDraft::new("a", "b", "c")).unwrap_err();
    assert_eq!(err, QuoteValidationError::NilId);
}

#[test]
fn quote_serialization_uses_camel_case_wire_fields() {
    let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let quote = Quote::with_id(
        id,
        QuoteDraft::new("Be water.", "Striking Thoughts", "Bruce Lee").with_tags(["martial-arts"]),
    )
    .unwrap();

    let json = serde_json::to_value(&quote).unwrap();
    assert_eq!(json["id"], id.to_string());
    assert_eq!(json["quoteText"], "Be water.");
    assert_eq!(json["bookTitle"], "Striking Thoughts");
    assert_eq!(json["authorName"], "Bruce Lee");
    assert_eq!(json["tags"][0], "martial-arts");

    let decoded: Quote = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, quote);
}

#[test]
fn records_without_tags_deserialize_with_empty_list() {
    let decoded: Quote = serde_json::from_str(
        r#"{"id":"11111111-2222-4333-8444-555555555555","quoteText":"q","bookTitle":"b","authorName":"a"}"#,
    )
    .unwrap();
    assert!(decoded.tags.is_empty());
    assert!(decoded.validate().is_ok());
}

#[test]
fn validate_flags_blank_stored_fields() {
    let mut quote = Quote::create(QuoteDraft::new("q", "b", "a")).unwrap();
    quote.book_title = "  ".to_string();
    assert_eq!(
        quote.validate().unwrap_err(),
        QuoteValidationError::EmptyField(QuoteField::BookTitle)
    );
}

#[test]
fn tag_limit_matches_constant() {
    let tags = (0..=MAX_TAGS).map(|idx| format!("tag{idx}"));
    let err = Quote::create(QuoteDraft::new("q", "b", "a").with_tags(tags)).unwrap_err();
    assert_eq!(
        err,
        QuoteValidationError::TooManyTags {
            count: MAX_TAGS + 1,
            max: MAX_TAGS
        }
    );
}
