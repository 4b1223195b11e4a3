use studio_portal::models::{
    BudgetBracket, ContactRequest, Project, ServiceCategory, TimelineBracket,
};
use validator::Validate;

fn valid_request() -> ContactRequest {
    ContactRequest {
        name: "Al".to_string(),
        email: "a@b.com".to_string(),
        phone: None,
        company: None,
        service: ServiceCategory::LogoDesign,
        budget: None,
        timeline: None,
        message: "Need a new logo for my startup".to_string(),
    }
}

#[test]
fn test_contact_request_valid_passes() {
    assert!(valid_request().validate().is_ok());
}

#[test]
fn test_contact_request_short_name_rejected() {
    let req = ContactRequest {
        name: "A".to_string(),
        ..valid_request()
    };
    let errors = req.validate().unwrap_err();
    assert!(errors.field_errors().contains_key("name"));
}

#[test]
fn test_contact_request_malformed_email_rejected() {
    let req = ContactRequest {
        email: "not-an-email".to_string(),
        ..valid_request()
    };
    let errors = req.validate().unwrap_err();
    assert!(errors.field_errors().contains_key("email"));
}

#[test]
fn test_contact_request_short_message_rejected() {
    let req = ContactRequest {
        message: "too short".to_string(),
        ..valid_request()
    };
    let errors = req.validate().unwrap_err();
    assert!(errors.field_errors().contains_key("message"));
}

#[test]
fn test_contact_request_trimming() {
    let req = ContactRequest {
        name: "  Al  ".to_string(),
        email: " a@b.com ".to_string(),
        phone: Some("   ".to_string()),
        company: Some(" Acme ".to_string()),
        message: "  Need a new logo for my startup  ".to_string(),
        ..valid_request()
    };
    let trimmed = req.trimmed();

    assert_eq!(trimmed.name, "Al");
    assert_eq!(trimmed.email, "a@b.com");
    // Whitespace-only optionals collapse to None, others are trimmed.
    assert_eq!(trimmed.phone, None);
    assert_eq!(trimmed.company, Some("Acme".to_string()));
    assert_eq!(trimmed.message, "Need a new logo for my startup");
    // Trimming happens before validation, so padded-but-valid input passes.
    assert!(trimmed.validate().is_ok());
}

#[test]
fn test_service_category_wire_values() {
    assert_eq!(
        serde_json::to_string(&ServiceCategory::LogoDesign).unwrap(),
        r#""logo-design""#
    );
    assert_eq!(
        serde_json::to_string(&ServiceCategory::BrandIdentity).unwrap(),
        r#""brand-identity""#
    );
    let parsed: ServiceCategory = serde_json::from_str(r#""packaging""#).unwrap();
    assert_eq!(parsed, ServiceCategory::Packaging);
    assert_eq!(parsed.as_str(), "packaging");
}

#[test]
fn test_budget_bracket_wire_values() {
    let parsed: BudgetBracket = serde_json::from_str(r#""50k-100k""#).unwrap();
    assert_eq!(parsed, BudgetBracket::From50kTo100k);
    assert_eq!(
        serde_json::to_string(&BudgetBracket::Under50k).unwrap(),
        r#""under-50k""#
    );
    assert_eq!(BudgetBracket::Over500k.as_str(), "over-500k");
}

#[test]
fn test_timeline_bracket_wire_values() {
    let parsed: TimelineBracket = serde_json::from_str(r#""1-2-weeks""#).unwrap();
    assert_eq!(parsed, TimelineBracket::OneToTwoWeeks);
    assert_eq!(TimelineBracket::TwoToThreeMonths.as_str(), "2-3-months");
}

#[test]
fn test_contact_request_unknown_service_rejected() {
    // The enumerated set is closed; anything outside it fails deserialization
    // and therefore never reaches validation or persistence.
    let result = serde_json::from_str::<ContactRequest>(
        r#"{"name":"Al","email":"a@b.com","service":"skywriting","message":"Need a new logo for my startup"}"#,
    );
    assert!(result.is_err());
}

#[test]
fn test_project_json_shape() {
    let project = Project::default();
    let json = serde_json::to_string(&project).unwrap();
    assert!(json.contains(r#""is_published":false"#));
    assert!(json.contains(r#""github_url":null"#));
}
