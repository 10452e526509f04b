// Integration tests for the mutation layer using wiremock.

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use adverge_api::{AdsClient, EntityKind, EntityStatus, Error};

async fn setup() -> (MockServer, AdsClient) {
    let server = MockServer::start().await;
    let client = AdsClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

#[tokio::test]
async fn set_entity_status_masks_status_only() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/customers/1234567890/adGroupAds:mutate"))
        .and(body_partial_json(json!({
            "operations": [{
                "update": {
                    "resourceName": "customers/1234567890/adGroupAds/1~10",
                    "status": "PAUSED",
                },
                "updateMask": "status",
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "resourceName": "customers/1234567890/adGroupAds/1~10" }]
        })))
        .mount(&server)
        .await;

    let resource = client
        .set_entity_status(
            "1234567890",
            EntityKind::Ad,
            "customers/1234567890/adGroupAds/1~10",
            EntityStatus::Paused,
        )
        .await
        .unwrap();

    assert_eq!(resource, "customers/1234567890/adGroupAds/1~10");
}

#[tokio::test]
async fn create_value_rule_shape() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/customers/1234567890/conversionValueRules:mutate"))
        .and(body_partial_json(json!({
            "operations": [{
                "create": {
                    "action": { "operation": "MULTIPLY", "value": 1.25 },
                    "geoLocationCondition": {
                        "geoTargetConstants": ["geoTargetConstants/1023191"],
                        "geoMatchType": "LOCATION_OF_PRESENCE",
                    },
                },
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "resourceName": "customers/1234567890/conversionValueRules/9" }]
        })))
        .mount(&server)
        .await;

    let resource = client
        .create_value_rule("1234567890", "geoTargetConstants/1023191", 1.25)
        .await
        .unwrap();

    assert_eq!(resource, "customers/1234567890/conversionValueRules/9");
}

#[tokio::test]
async fn update_value_rule_masks_action_value() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/customers/1234567890/conversionValueRules:mutate"))
        .and(body_partial_json(json!({
            "operations": [{
                "update": {
                    "resourceName": "customers/1234567890/conversionValueRules/9",
                    "action": { "operation": "MULTIPLY", "value": 2.5 },
                },
                "updateMask": "action.value",
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "resourceName": "customers/1234567890/conversionValueRules/9" }]
        })))
        .mount(&server)
        .await;

    let resource = client
        .update_value_rule(
            "1234567890",
            "customers/1234567890/conversionValueRules/9",
            2.5,
        )
        .await
        .unwrap();

    assert_eq!(resource, "customers/1234567890/conversionValueRules/9");
}

#[tokio::test]
async fn rule_set_update_sends_full_membership_list() {
    let (server, client) = setup().await;

    let members = vec![
        "customers/1234567890/conversionValueRules/1".to_owned(),
        "customers/1234567890/conversionValueRules/2".to_owned(),
        "customers/1234567890/conversionValueRules/3".to_owned(),
    ];

    Mock::given(method("POST"))
        .and(path("/customers/1234567890/conversionValueRuleSets:mutate"))
        .and(body_partial_json(json!({
            "operations": [{
                "update": {
                    "resourceName": "customers/1234567890/conversionValueRuleSets/4",
                    "conversionValueRules": members,
                },
                "updateMask": "conversion_value_rules",
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "resourceName": "customers/1234567890/conversionValueRuleSets/4" }]
        })))
        .mount(&server)
        .await;

    let resource = client
        .update_value_rule_set(
            "1234567890",
            "customers/1234567890/conversionValueRuleSets/4",
            &members,
        )
        .await
        .unwrap();

    assert_eq!(resource, "customers/1234567890/conversionValueRuleSets/4");
}

#[tokio::test]
async fn create_value_rule_set_attaches_to_campaign() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/customers/1234567890/conversionValueRuleSets:mutate"))
        .and(body_partial_json(json!({
            "operations": [{
                "create": {
                    "campaign": "customers/1234567890/campaigns/5",
                    "attachmentType": "CAMPAIGN",
                    "conversionValueRules": ["customers/1234567890/conversionValueRules/9"],
                    "dimensions": ["GEO_LOCATION"],
                },
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "resourceName": "customers/1234567890/conversionValueRuleSets/4" }]
        })))
        .mount(&server)
        .await;

    let resource = client
        .create_value_rule_set(
            "1234567890",
            "customers/1234567890/campaigns/5",
            &["customers/1234567890/conversionValueRules/9".to_owned()],
        )
        .await
        .unwrap();

    assert_eq!(resource, "customers/1234567890/conversionValueRuleSets/4");
}

#[tokio::test]
async fn mutation_failure_surfaces_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/customers/1234567890/conversionValueRuleSets:mutate"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": { "message": "The caller does not have permission" }
        })))
        .mount(&server)
        .await;

    let result = client
        .create_value_rule_set("1234567890", "customers/1234567890/campaigns/5", &[])
        .await;

    match result {
        Err(Error::Api { status, message, .. }) => {
            assert_eq!(status, 403);
            assert_eq!(message, "The caller does not have permission");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_mutate_results_is_an_error() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/customers/1234567890/conversionValueRules:mutate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .mount(&server)
        .await;

    let result = client
        .create_value_rule("1234567890", "geoTargetConstants/1023191", 1.5)
        .await;

    assert!(matches!(result, Err(Error::MissingResult { .. })));
}
