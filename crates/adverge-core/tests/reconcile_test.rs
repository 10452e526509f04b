// Reconciliation engine tests against a wiremock platform.
//
// Read state is staged through search mocks; mutation expectations are
// enforced with wiremock's expected-call counts. Tests that must prove
// "zero mutations issued" simply mount no mutate mocks -- a stray
// mutate call would fail the request and the assertion.

use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use adverge_api::AdsClient;
use adverge_core::{CoreError, Reconciler, RuleChange};

// ── Helpers ─────────────────────────────────────────────────────────

const CID: &str = "1";

async fn setup() -> (MockServer, AdsClient) {
    let server = MockServer::start().await;
    let client = AdsClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn search_path() -> wiremock::matchers::PathExactMatcher {
    path("/customers/1/googleAds:search")
}

fn results(rows: Vec<Value>) -> Value {
    json!({ "results": rows })
}

fn geo_row(resource: &str, name: &str) -> Value {
    json!({ "geoTargetConstant": { "resourceName": resource, "name": name } })
}

fn set_row(resource: &str, campaign: &str, members: &[&str]) -> Value {
    json!({ "conversionValueRuleSet": {
        "resourceName": resource,
        "campaign": campaign,
        "conversionValueRules": members,
    }})
}

fn rule_row(resource: &str, geo: &str, value: f64) -> Value {
    json!({ "conversionValueRule": {
        "resourceName": resource,
        "action": { "operation": "MULTIPLY", "value": value },
        "geoLocationCondition": {
            "geoTargetConstants": [geo],
            "geoMatchType": "LOCATION_OF_PRESENCE",
        },
        "status": "ENABLED",
    }})
}

/// Stage the geo lookup for "Springfield" -> `geo`.
async fn mock_geo(server: &MockServer, geo: &str) {
    Mock::given(method("POST"))
        .and(search_path())
        .and(body_string_contains("FROM geo_target_constant"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(results(vec![geo_row(geo, "Springfield")])),
        )
        .mount(server)
        .await;
}

/// Stage the rule-set lookup for one campaign.
async fn mock_set_query(server: &MockServer, campaign: &str, rows: Vec<Value>) {
    Mock::given(method("POST"))
        .and(search_path())
        .and(body_string_contains(&format!(
            "conversion_value_rule_set.campaign = '{campaign}'"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(results(rows)))
        .mount(server)
        .await;
}

/// Stage the rule lookup for one member resource.
async fn mock_rule_query(server: &MockServer, member: &str, rows: Vec<Value>) {
    Mock::given(method("POST"))
        .and(search_path())
        .and(body_string_contains(&format!(
            "conversion_value_rule.resource_name = '{member}'"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(results(rows)))
        .mount(server)
        .await;
}

// ── Creation paths ──────────────────────────────────────────────────

#[tokio::test]
async fn fresh_campaign_creates_one_rule_and_one_set() {
    let (server, client) = setup().await;
    let campaign = "customers/1/campaigns/5".to_owned();

    mock_geo(&server, "geoTargetConstants/100").await;
    mock_set_query(&server, &campaign, vec![]).await;

    Mock::given(method("POST"))
        .and(path("/customers/1/conversionValueRules:mutate"))
        .and(body_partial_json(json!({ "operations": [{ "create": {
            "action": { "operation": "MULTIPLY", "value": 1.25 },
        }}]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "resourceName": "customers/1/conversionValueRules/9" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/customers/1/conversionValueRuleSets:mutate"))
        .and(body_partial_json(json!({ "operations": [{ "create": {
            "campaign": campaign,
            "conversionValueRules": ["customers/1/conversionValueRules/9"],
        }}]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "resourceName": "customers/1/conversionValueRuleSets/4" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let report = Reconciler::new(&client)
        .apply(CID, &[campaign], 0.25, "Springfield")
        .await
        .unwrap();

    assert_eq!(report.succeeded(), 1);
    assert_eq!(
        report.outcomes[0].result.as_ref().unwrap(),
        &RuleChange::CreatedRuleSet {
            rule: "customers/1/conversionValueRules/9".into(),
            rule_set: "customers/1/conversionValueRuleSets/4".into(),
        }
    );
}

#[tokio::test]
async fn existing_members_are_preserved_when_adding_a_geo() {
    let (server, client) = setup().await;
    let campaign = "customers/1/campaigns/5".to_owned();
    let (r1, r2) = (
        "customers/1/conversionValueRules/1",
        "customers/1/conversionValueRules/2",
    );

    mock_geo(&server, "geoTargetConstants/300").await;
    mock_set_query(
        &server,
        &campaign,
        vec![set_row(
            "customers/1/conversionValueRuleSets/4",
            &campaign,
            &[r1, r2],
        )],
    )
    .await;
    mock_rule_query(&server, r1, vec![rule_row(r1, "geoTargetConstants/100", 1.5)]).await;
    mock_rule_query(&server, r2, vec![rule_row(r2, "geoTargetConstants/200", 1.5)]).await;

    Mock::given(method("POST"))
        .and(path("/customers/1/conversionValueRules:mutate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "resourceName": "customers/1/conversionValueRules/3" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    // Full replacement list: both existing members plus the new rule.
    Mock::given(method("POST"))
        .and(path("/customers/1/conversionValueRuleSets:mutate"))
        .and(body_partial_json(json!({ "operations": [{
            "update": {
                "resourceName": "customers/1/conversionValueRuleSets/4",
                "conversionValueRules": [r1, r2, "customers/1/conversionValueRules/3"],
            },
            "updateMask": "conversion_value_rules",
        }]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "resourceName": "customers/1/conversionValueRuleSets/4" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let report = Reconciler::new(&client)
        .apply(CID, &[campaign], 0.5, "Springfield")
        .await
        .unwrap();

    assert!(matches!(
        report.outcomes[0].result.as_ref().unwrap(),
        RuleChange::AddedRuleToSet { .. }
    ));
}

#[tokio::test]
async fn member_without_a_rule_row_is_kept_in_the_membership_update() {
    let (server, client) = setup().await;
    let campaign = "customers/1/campaigns/5".to_owned();
    let (gone, r1) = (
        "customers/1/conversionValueRules/404",
        "customers/1/conversionValueRules/1",
    );

    mock_geo(&server, "geoTargetConstants/300").await;
    mock_set_query(
        &server,
        &campaign,
        vec![set_row(
            "customers/1/conversionValueRuleSets/4",
            &campaign,
            &[gone, r1],
        )],
    )
    .await;
    // The first member is listed in the set but its rule row is gone.
    mock_rule_query(&server, gone, vec![]).await;
    mock_rule_query(&server, r1, vec![rule_row(r1, "geoTargetConstants/100", 1.5)]).await;

    Mock::given(method("POST"))
        .and(path("/customers/1/conversionValueRules:mutate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "resourceName": "customers/1/conversionValueRules/9" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    // The dangling member must survive the full replacement list.
    Mock::given(method("POST"))
        .and(path("/customers/1/conversionValueRuleSets:mutate"))
        .and(body_partial_json(json!({ "operations": [{
            "update": {
                "resourceName": "customers/1/conversionValueRuleSets/4",
                "conversionValueRules": [gone, r1, "customers/1/conversionValueRules/9"],
            },
            "updateMask": "conversion_value_rules",
        }]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "resourceName": "customers/1/conversionValueRuleSets/4" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let report = Reconciler::new(&client)
        .apply(CID, &[campaign], 0.5, "Springfield")
        .await
        .unwrap();

    assert!(matches!(
        report.outcomes[0].result.as_ref().unwrap(),
        RuleChange::AddedRuleToSet { .. }
    ));
}

// ── Update / no-op paths ────────────────────────────────────────────

#[tokio::test]
async fn differing_value_updates_the_rule_in_place() {
    let (server, client) = setup().await;
    let campaign = "customers/1/campaigns/5".to_owned();
    let r1 = "customers/1/conversionValueRules/1";

    mock_geo(&server, "geoTargetConstants/100").await;
    mock_set_query(
        &server,
        &campaign,
        vec![set_row("customers/1/conversionValueRuleSets/4", &campaign, &[r1])],
    )
    .await;
    mock_rule_query(&server, r1, vec![rule_row(r1, "geoTargetConstants/100", 1.5)]).await;

    Mock::given(method("POST"))
        .and(path("/customers/1/conversionValueRules:mutate"))
        .and(body_partial_json(json!({ "operations": [{
            "update": {
                "resourceName": r1,
                "action": { "operation": "MULTIPLY", "value": 2.0 },
            },
            "updateMask": "action.value",
        }]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "resourceName": r1 }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let report = Reconciler::new(&client)
        .apply(CID, &[campaign], 1.0, "Springfield")
        .await
        .unwrap();

    assert_eq!(
        report.outcomes[0].result.as_ref().unwrap(),
        &RuleChange::UpdatedRule {
            rule: r1.into(),
            previous: 1.5,
            value: 2.0,
        }
    );
}

#[tokio::test]
async fn matching_state_is_a_no_op_twice_over() {
    let (server, client) = setup().await;
    let campaign = "customers/1/campaigns/5".to_owned();
    let r1 = "customers/1/conversionValueRules/1";

    // Each read is staged exactly once: the second pass must be served
    // from the client cache, and no mutate mock exists at all.
    Mock::given(method("POST"))
        .and(search_path())
        .and(body_string_contains("FROM geo_target_constant"))
        .respond_with(ResponseTemplate::new(200).set_body_json(results(vec![geo_row(
            "geoTargetConstants/100",
            "Springfield",
        )])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(search_path())
        .and(body_string_contains(&format!(
            "conversion_value_rule_set.campaign = '{campaign}'"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(results(vec![set_row(
            "customers/1/conversionValueRuleSets/4",
            &campaign,
            &[r1],
        )])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(search_path())
        .and(body_string_contains(&format!(
            "conversion_value_rule.resource_name = '{r1}'"
        )))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(results(vec![rule_row(r1, "geoTargetConstants/100", 1.25)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let reconciler = Reconciler::new(&client);
    for _ in 0..2 {
        let report = reconciler
            .apply(CID, std::slice::from_ref(&campaign), 0.25, "Springfield")
            .await
            .unwrap();
        assert_eq!(
            report.outcomes[0].result.as_ref().unwrap(),
            &RuleChange::Unchanged { rule: r1.into() }
        );
    }
}

// ── Batch semantics ─────────────────────────────────────────────────

#[tokio::test]
async fn one_campaign_failing_does_not_abort_siblings() {
    let (server, client) = setup().await;
    let failing = "customers/1/campaigns/1".to_owned();
    let healthy = "customers/1/campaigns/2".to_owned();

    mock_geo(&server, "geoTargetConstants/100").await;

    Mock::given(method("POST"))
        .and(search_path())
        .and(body_string_contains(&format!(
            "conversion_value_rule_set.campaign = '{failing}'"
        )))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": { "message": "backend unavailable" }
        })))
        .mount(&server)
        .await;
    mock_set_query(&server, &healthy, vec![]).await;

    Mock::given(method("POST"))
        .and(path("/customers/1/conversionValueRules:mutate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "resourceName": "customers/1/conversionValueRules/9" }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/customers/1/conversionValueRuleSets:mutate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "resourceName": "customers/1/conversionValueRuleSets/4" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let report = Reconciler::new(&client)
        .apply(CID, &[failing.clone(), healthy], 0.25, "Springfield")
        .await
        .unwrap();

    assert_eq!(report.failed(), 1);
    assert_eq!(report.succeeded(), 1);
    assert!(report.has_failures());
    assert_eq!(report.outcomes[0].campaign, failing);
    assert!(report.outcomes[0].result.is_err());
    assert!(report.outcomes[1].result.is_ok());
}

#[tokio::test]
async fn unresolvable_geo_is_fatal_to_the_batch() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(search_path())
        .respond_with(ResponseTemplate::new(200).set_body_json(results(vec![])))
        .mount(&server)
        .await;

    let result = Reconciler::new(&client)
        .apply(
            CID,
            &["customers/1/campaigns/5".to_owned()],
            0.25,
            "Atlantis",
        )
        .await;

    assert!(matches!(result, Err(CoreError::GeoTargetNotFound { .. })));
}

// ── Disable path ────────────────────────────────────────────────────

#[tokio::test]
async fn disable_pauses_only_active_member_rules() {
    let (server, client) = setup().await;
    let campaign = "customers/1/campaigns/5".to_owned();
    let (r1, r2) = (
        "customers/1/conversionValueRules/1",
        "customers/1/conversionValueRules/2",
    );

    mock_set_query(
        &server,
        &campaign,
        vec![set_row("customers/1/conversionValueRuleSets/4", &campaign, &[r1, r2])],
    )
    .await;
    mock_rule_query(&server, r1, vec![rule_row(r1, "geoTargetConstants/100", 1.5)]).await;
    // r2 is already paused; it must not be touched.
    mock_rule_query(
        &server,
        r2,
        vec![json!({ "conversionValueRule": {
            "resourceName": r2,
            "action": { "operation": "MULTIPLY", "value": 1.5 },
            "geoLocationCondition": { "geoTargetConstants": ["geoTargetConstants/200"] },
            "status": "PAUSED",
        }})],
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/customers/1/conversionValueRules:mutate"))
        .and(body_partial_json(json!({ "operations": [{
            "update": { "resourceName": r1, "status": "PAUSED" },
            "updateMask": "status",
        }]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "resourceName": r1 }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let report = Reconciler::new(&client)
        .disable(CID, &[campaign])
        .await
        .unwrap();

    assert_eq!(
        report.outcomes[0].result.as_ref().unwrap(),
        &RuleChange::PausedRules { count: 1 }
    );
}

#[tokio::test]
async fn disable_without_a_set_is_a_no_op() {
    let (server, client) = setup().await;
    let campaign = "customers/1/campaigns/5".to_owned();

    mock_set_query(&server, &campaign, vec![]).await;

    let report = Reconciler::new(&client)
        .disable(CID, &[campaign])
        .await
        .unwrap();

    assert_eq!(
        report.outcomes[0].result.as_ref().unwrap(),
        &RuleChange::PausedRules { count: 0 }
    );
}
