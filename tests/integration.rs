//! Integration tests for the payroll engine HTTP API.
//!
//! This test suite covers:
//! - The reference full-mode scenario against the bundled withholding table
//! - Allowances, dependents and the dependent-child credit
//! - The high-income formula
//! - Simple mode
//! - Minimum-wage verdicts
//! - Table-unavailable fallback and table reloads
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use payroll_engine::api::{AppState, CalculationResponse, create_router};
use payroll_engine::calculation::PayrollOutcome;
use payroll_engine::config::ConfigLoader;
use payroll_engine::models::{TaxTable, TaxTableState};

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/kr2025").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

async fn send(router: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = match body {
        Some(body) => Body::from(body.to_string()),
        None => Body::empty(),
    };

    let response = router
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn post_calculate(router: Router, body: Value) -> (StatusCode, Value) {
    send(router, "POST", "/calculate", Some(body)).await
}

/// The form defaults: 36,000,000 salary, 8h × 5 days, 9h weekly overtime.
fn reference_input() -> Value {
    json!({
        "annual_salary": "36000000",
        "daily_work_hours": "8",
        "weekly_overtime_hours": "9",
        "work_days_per_week": 5,
        "minimum_wage": "10320",
        "min_wage_inclusion_ratio": "0",
        "dependent_count": 1,
        "children_8_to_20": 0
    })
}

fn full_request(input: Value) -> Value {
    json!({ "mode": "full", "input": input })
}

fn payroll(json: &Value) -> &Value {
    &json["outcome"]["payroll"]
}

fn field(value: &Value) -> Decimal {
    decimal(value.as_str().expect("expected a decimal string"))
}

// =============================================================================
// Reference Scenario
// =============================================================================

#[tokio::test]
async fn test_reference_scenario_pay_components() {
    let (status, json) =
        post_calculate(create_router_for_test(), full_request(reference_input())).await;
    assert_eq!(status, StatusCode::OK);

    let p = payroll(&json);
    assert_eq!(field(&p["monthly_pay"]), decimal("3000000"));
    assert_eq!(field(&p["standard_hours"]), decimal("209"));
    assert_eq!(field(&p["overtime_hours"]), decimal("39.105"));
    assert_eq!(field(&p["weighted_total_hours"]), decimal("267.6575"));
    assert_eq!(field(&p["fixed_overtime_pay"]), decimal("657454"));
    assert_eq!(field(&p["base_pay"]), decimal("2342546"));
    assert_eq!(p["validation"]["check_ok"], true);
    assert_eq!(p["validation"]["status"], "normal");
}

#[tokio::test]
async fn test_reference_scenario_deductions() {
    let (_, json) = post_calculate(create_router_for_test(), full_request(reference_input())).await;

    let d = &payroll(&json)["deductions"];
    assert_eq!(field(&d["income_tax"]), decimal("112950"));
    assert_eq!(field(&d["resident_tax"]), decimal("11290"));
    assert_eq!(field(&d["national_pension"]), decimal("135000"));
    assert_eq!(field(&d["health_insurance"]), decimal("106350"));
    assert_eq!(field(&d["long_term_care"]), decimal("13770"));
    assert_eq!(field(&d["employment_insurance"]), decimal("27000"));
    assert_eq!(field(&d["total"]), decimal("406360"));
    assert_eq!(field(&payroll(&json)["net_pay"]), decimal("2593640"));
}

#[tokio::test]
async fn test_reference_scenario_minimum_wage() {
    let (_, json) = post_calculate(create_router_for_test(), full_request(reference_input())).await;

    let check = &payroll(&json)["minimum_wage"];
    assert_eq!(field(&check["compare_wage"]), decimal("2342546") / decimal("209"));
    assert_eq!(check["verdict"], "compliant");
}

#[tokio::test]
async fn test_response_envelope_deserializes() {
    let (_, json) = post_calculate(create_router_for_test(), full_request(reference_input())).await;

    let response: CalculationResponse = serde_json::from_value(json).unwrap();
    assert_eq!(response.engine_version, env!("CARGO_PKG_VERSION"));
    match response.outcome {
        PayrollOutcome::Full(full) => {
            assert_eq!(full.income_tax.monthly_taxable, 3_000_000);
            assert!(!full.income_tax.substituted_zero);
            assert_eq!(full.payroll.audit_steps.len(), 7);
        }
        PayrollOutcome::Simple(_) => panic!("Expected full outcome"),
    }
}

// =============================================================================
// Allowances and Dependents
// =============================================================================

#[tokio::test]
async fn test_meal_allowance_is_not_taxable() {
    let mut input = reference_input();
    input["allowances"] = json!({ "meal": "200000" });

    let (status, json) = post_calculate(create_router_for_test(), full_request(input)).await;
    assert_eq!(status, StatusCode::OK);

    let p = payroll(&json);
    assert_eq!(field(&p["base_pay"]), decimal("2142546"));
    assert_eq!(field(&p["non_taxable_sum"]), decimal("200000"));
    assert_eq!(field(&p["taxable_amount"]), decimal("2800000"));
    assert_eq!(field(&p["deductions"]["income_tax"]), decimal("98450"));
    assert_eq!(field(&p["deductions"]["resident_tax"]), decimal("9840"));
    assert_eq!(field(&p["deductions"]["total"]), decimal("371600"));
    assert_eq!(field(&p["net_pay"]), decimal("2628400"));
    assert_eq!(p["minimum_wage"]["verdict"], "compliant");
}

#[tokio::test]
async fn test_child_credit_can_make_income_tax_negative() {
    let input = json!({
        "annual_salary": "30000000",
        "daily_work_hours": "8",
        "weekly_overtime_hours": "10",
        "work_days_per_week": 5,
        "minimum_wage": "10320",
        "min_wage_inclusion_ratio": "0.5",
        "allowances": {
            "meal": "200000",
            "car": "200000",
            "child": "100000",
            "duty": "50000"
        },
        "misc_deduction": "10000",
        "dependent_count": 3,
        "children_8_to_20": 2
    });

    let (status, json) = post_calculate(create_router_for_test(), full_request(input)).await;
    assert_eq!(status, StatusCode::OK);

    let p = payroll(&json);
    assert_eq!(field(&p["monthly_pay"]), decimal("2500000"));
    assert_eq!(field(&p["fixed_overtime_pay"]), decimal("594283"));
    assert_eq!(field(&p["base_pay"]), decimal("1355717"));
    assert_eq!(field(&p["taxable_amount"]), decimal("2000000"));
    assert_eq!(field(&p["deductions"]["income_tax"]), decimal("-5460"));
    assert_eq!(field(&p["deductions"]["resident_tax"]), decimal("-550"));
    assert_eq!(field(&p["deductions"]["total"]), decimal("192070"));
    assert_eq!(field(&p["net_pay"]), decimal("2307930"));
    assert_eq!(field(&p["minimum_wage"]["non_included_portion"]), decimal("1078440"));
    assert_eq!(p["minimum_wage"]["verdict"], "non-compliant");

    let tax = &json["outcome"]["income_tax"];
    assert_eq!(field(&tax["truncated_base"]), decimal("23700"));
    assert_eq!(field(&tax["child_credit"]), decimal("29160"));
}

#[tokio::test]
async fn test_dependent_count_is_clamped() {
    let router = create_router_for_test();

    let mut zero = reference_input();
    zero["dependent_count"] = json!(0);
    let mut twelve = reference_input();
    twelve["dependent_count"] = json!(12);
    let mut eleven = reference_input();
    eleven["dependent_count"] = json!(11);

    let (_, zero) = post_calculate(router.clone(), full_request(zero)).await;
    let (_, twelve) = post_calculate(router.clone(), full_request(twelve)).await;
    let (_, eleven) = post_calculate(router, full_request(eleven)).await;

    assert_eq!(
        payroll(&zero)["deductions"]["income_tax"],
        json!("112950")
    );
    assert_eq!(
        payroll(&twelve)["deductions"]["income_tax"],
        payroll(&eleven)["deductions"]["income_tax"]
    );
    assert_eq!(zero["outcome"]["income_tax"]["dependent_count"], 1);
    assert_eq!(twelve["outcome"]["income_tax"]["dependent_count"], 11);
}

// =============================================================================
// High-Income Formula
// =============================================================================

#[tokio::test]
async fn test_high_income_uses_formula() {
    let mut input = reference_input();
    input["annual_salary"] = json!("180000000");

    let (status, json) = post_calculate(create_router_for_test(), full_request(input)).await;
    assert_eq!(status, StatusCode::OK);

    // 1,507,400 + 1,397,000 + 1,000,000 × 0.98 × 0.38
    let d = &payroll(&json)["deductions"];
    assert_eq!(field(&d["income_tax"]), decimal("3276800"));
    assert_eq!(field(&d["resident_tax"]), decimal("327680"));
    assert_eq!(field(&d["national_pension"]), decimal("675000"));
    assert_eq!(field(&d["health_insurance"]), decimal("531750"));
    assert_eq!(field(&d["long_term_care"]), decimal("68860"));
    assert_eq!(field(&d["employment_insurance"]), decimal("135000"));
    assert_eq!(field(&payroll(&json)["net_pay"]), decimal("9984910"));
    assert!(
        json["outcome"]["income_tax"]["audit_step"]["reasoning"]
            .as_str()
            .unwrap()
            .contains("high-income formula")
    );
}

#[tokio::test]
async fn test_threshold_withholding_is_fixed() {
    let mut input = reference_input();
    input["annual_salary"] = json!("120000000");

    let (_, json) = post_calculate(create_router_for_test(), full_request(input)).await;
    assert_eq!(field(&payroll(&json)["deductions"]["income_tax"]), decimal("1507400"));
}

// =============================================================================
// Simple Mode
// =============================================================================

#[tokio::test]
async fn test_simple_mode_rounds_up() {
    let body = json!({ "mode": "simple", "input": reference_input() });

    let (status, json) = post_calculate(create_router_for_test(), body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["mode"], "simple");

    let outcome = &json["outcome"];
    assert_eq!(field(&outcome["monthly_standard_hours"]), decimal("209"));
    assert_eq!(field(&outcome["monthly_overtime_hours"]), decimal("40"));
    assert_eq!(field(&outcome["base_pay"]), decimal("2330856"));
    assert_eq!(field(&outcome["fixed_overtime_pay"]), decimal("669145"));
    assert_eq!(field(&outcome["total_pay"]), decimal("3000001"));
    assert_eq!(field(&outcome["diff"]), decimal("1"));
    assert_eq!(outcome["validation_status"], "normal");
    assert_eq!(outcome["min_wage_verdict"], "compliant");
    assert!(outcome.get("deductions").is_none());
}

#[tokio::test]
async fn test_simple_mode_allowances() {
    let mut input = reference_input();
    input["allowances"] = json!({ "meal": "200000", "car": "200000" });
    let body = json!({ "mode": "simple", "input": input });

    let (_, json) = post_calculate(create_router_for_test(), body).await;

    let outcome = &json["outcome"];
    assert_eq!(field(&outcome["base_pay"]), decimal("2020075"));
    assert_eq!(field(&outcome["fixed_overtime_pay"]), decimal("579926"));
    assert_eq!(field(&outcome["total_pay"]), decimal("3000001"));
    assert_eq!(outcome["min_wage_verdict"], "non-compliant");
}

#[tokio::test]
async fn test_mode_defaults_to_full() {
    let body = json!({ "input": reference_input() });

    let (status, json) = post_calculate(create_router_for_test(), body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["mode"], "full");
}

// =============================================================================
// Minimum Wage
// =============================================================================

#[tokio::test]
async fn test_low_salary_is_non_compliant() {
    let mut input = reference_input();
    input["annual_salary"] = json!("24000000");

    let (_, json) = post_calculate(create_router_for_test(), full_request(input)).await;
    assert_eq!(payroll(&json)["minimum_wage"]["verdict"], "non-compliant");
}

#[tokio::test]
async fn test_overtime_only_schedule_is_undetermined() {
    let mut input = reference_input();
    input["daily_work_hours"] = json!("0");

    let (status, json) = post_calculate(create_router_for_test(), full_request(input)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payroll(&json)["minimum_wage"]["verdict"], "undetermined");
    assert!(payroll(&json)["minimum_wage"]["compare_wage"].is_null());
}

// =============================================================================
// Withholding Table
// =============================================================================

#[tokio::test]
async fn test_empty_table_resolves_income_tax_to_zero() {
    let config = ConfigLoader::load("./config/kr2025").unwrap();
    let state = AppState::with_tax_table(
        config,
        TaxTableState::Loaded(TaxTable::new(vec![]).unwrap()),
    );

    let (status, json) =
        post_calculate(create_router(state), full_request(reference_input())).await;
    assert_eq!(status, StatusCode::OK);

    let d = &payroll(&json)["deductions"];
    assert_eq!(field(&d["income_tax"]), decimal("0"));
    assert_eq!(field(&d["resident_tax"]), decimal("0"));
    assert_eq!(field(&d["national_pension"]), decimal("135000"));
    assert_eq!(field(&d["total"]), decimal("282120"));
    assert_eq!(field(&payroll(&json)["net_pay"]), decimal("2717880"));

    let tax = &json["outcome"]["income_tax"];
    assert_eq!(tax["substituted_zero"], true);
    assert_eq!(tax["base"]["source"], "unavailable");
    assert_eq!(tax["base"]["reason"], "empty_table");
}

#[tokio::test]
async fn test_below_lowest_bracket_resolves_to_zero() {
    let mut input = reference_input();
    input["annual_salary"] = json!("6000000");

    let (status, json) = post_calculate(create_router_for_test(), full_request(input)).await;
    assert_eq!(status, StatusCode::OK);

    let tax = &json["outcome"]["income_tax"];
    assert_eq!(tax["base"]["reason"], "below_lowest_bracket");
    assert_eq!(tax["base"]["lowest"], 700_000);
    assert_eq!(field(&tax["income_tax"]), decimal("0"));
}

#[tokio::test]
async fn test_tax_table_summary() {
    let (status, json) = send(create_router_for_test(), "GET", "/tax-table", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ok"], true);
    assert_eq!(json["rows"].as_array().unwrap().len(), 93);
    assert_eq!(json["rows"][23]["lower_bound"], 3_000_000);
    assert_eq!(json["rows"][23]["columns"][0], 112_950);
}

#[tokio::test]
async fn test_reload_swaps_whole_table() {
    let state = create_test_state();
    state.replace_tax_table(TaxTableState::Unavailable {
        message: "cleared".to_string(),
    });

    let (_, before) =
        post_calculate(create_router(state.clone()), full_request(reference_input())).await;
    assert_eq!(field(&payroll(&before)["deductions"]["income_tax"]), decimal("0"));

    let (status, reloaded) =
        send(create_router(state.clone()), "POST", "/tax-table/reload", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reloaded["ok"], true);

    let (_, after) = post_calculate(create_router(state), full_request(reference_input())).await;
    assert_eq!(field(&payroll(&after)["deductions"]["income_tax"]), decimal("112950"));
}

#[tokio::test]
async fn test_concurrent_calculations_share_state() {
    let router = create_router_for_test();

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let router = router.clone();
            tokio::spawn(
                async move { post_calculate(router, full_request(reference_input())).await },
            )
        })
        .collect();

    for handle in handles {
        let (status, json) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(field(&payroll(&json)["net_pay"]), decimal("2593640"));
    }
}

// =============================================================================
// Defaults
// =============================================================================

#[tokio::test]
async fn test_defaults_round_trip_into_calculation() {
    let router = create_router_for_test();

    let (status, defaults) = send(router.clone(), "GET", "/defaults", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(defaults["engine"]["code"], "KR2025");

    let (status, json) = post_calculate(router, full_request(defaults["defaults"].clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&payroll(&json)["monthly_pay"]), decimal("3000000"));
}

// =============================================================================
// Error Cases
// =============================================================================

#[tokio::test]
async fn test_zero_duration_returns_422() {
    let mut input = reference_input();
    input["daily_work_hours"] = json!("0");
    input["weekly_overtime_hours"] = json!("0");

    for mode in ["full", "simple"] {
        let body = json!({ "mode": mode, "input": input.clone() });
        let (status, json) = post_calculate(create_router_for_test(), body).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["code"], "ZERO_DURATION");
    }
}

#[tokio::test]
async fn test_negative_salary_returns_400() {
    let mut input = reference_input();
    input["annual_salary"] = json!("-1");

    let (status, json) = post_calculate(create_router_for_test(), full_request(input)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_INPUT");
    assert_eq!(json["details"], "annual_salary");
}

#[tokio::test]
async fn test_inclusion_ratio_above_one_returns_400() {
    let mut input = reference_input();
    input["min_wage_inclusion_ratio"] = json!("1.5");

    let (status, json) = post_calculate(create_router_for_test(), full_request(input)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["details"], "min_wage_inclusion_ratio");
}

#[tokio::test]
async fn test_zero_work_days_returns_400() {
    let mut input = reference_input();
    input["work_days_per_week"] = json!(0);

    let (status, json) = post_calculate(create_router_for_test(), full_request(input)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["details"], "work_days_per_week");
}

#[tokio::test]
async fn test_oversized_values_return_400() {
    let mut overtime = reference_input();
    overtime["weekly_overtime_hours"] = json!("70000000000000000000000000000");

    let mut wage = reference_input();
    wage["minimum_wage"] = json!("70000000000000000000000000000");
    wage["allowances"] = json!({ "meal": "1" });

    for (input, details) in [(overtime, "weekly_overtime_hours"), (wage, "minimum_wage")] {
        for mode in ["full", "simple"] {
            let body = json!({ "mode": mode, "input": input.clone() });
            let (status, json) = post_calculate(create_router_for_test(), body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["code"], "INVALID_INPUT");
            assert_eq!(json["details"], details);
        }
    }
}

#[tokio::test]
async fn test_fractional_won_returns_400() {
    let mut input = reference_input();
    input["allowances"] = json!({ "meal": "0.5" });

    let (status, json) = post_calculate(create_router_for_test(), full_request(input)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["details"], "allowances.meal");
}

#[tokio::test]
async fn test_unknown_mode_returns_400() {
    let body = json!({ "mode": "legacy", "input": reference_input() });

    let (status, json) = post_calculate(create_router_for_test(), body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/calculate")
                .header("Content-Type", "application/json")
                .body(Body::from("{invalid json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
