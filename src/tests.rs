#[cfg(test)]
mod integration_tests {
    use crate::handlers::entries::CreateEntryRequest;
    use crate::test_utils::test_utils::setup_test_app;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use chrono::NaiveDate;
    use model::entities::entry::{Currency, Frequency, Kind, Scope};
    use rust_decimal::Decimal;
    use serde_json::{json, Value};

    /// Decimal fields serialize as JSON strings; compare by value so the
    /// scale a round-trip through SQLite picks is irrelevant.
    fn dec(value: &Value) -> Decimal {
        value
            .as_str()
            .expect("decimal fields serialize as strings")
            .parse()
            .expect("decimal value")
    }

    async fn seed_entry(server: &TestServer, body: Value) -> i64 {
        let response = server.post("/api/v1/entries").json(&body).await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        body["data"]["id"].as_i64().expect("created entry id")
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["database"], "connected");
        assert!(body["version"].is_string());
    }

    #[tokio::test]
    async fn test_labels_catalog_sorted_with_otros_last() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/labels").await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["success"], true);

        let labels = body["data"].as_array().expect("labels array");
        assert_eq!(labels.len(), 12);
        assert_eq!(labels[0], "agua");
        assert_eq!(labels[labels.len() - 1], "otros");
        assert!(labels.iter().any(|label| label == "pagos pendientes"));
    }

    #[tokio::test]
    async fn test_create_entry_returns_stored_row() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let create_request = CreateEntryRequest {
            scope: Scope::Casa,
            kind: Some(Kind::Gasto),
            is_fixed: true,
            frequency: Some(Frequency::Mensual),
            label: "luz".to_string(),
            amount: Decimal::from(100),
            currency: Some(Currency::Pesos),
            note: Some("  Factura de marzo  ".to_string()),
            recorded_by: Some("ana".to_string()),
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            due_date: Some(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()),
        };

        let response = server.post("/api/v1/entries").json(&create_request).await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Entry created successfully");

        let data = &body["data"];
        assert!(data["id"].as_i64().expect("entry id") >= 1);
        assert_eq!(data["scope"], "casa");
        assert_eq!(data["kind"], "gasto");
        assert_eq!(data["is_fixed"], true);
        assert_eq!(data["frequency"], "mensual");
        assert_eq!(data["label"], "luz");
        assert_eq!(dec(&data["amount"]), Decimal::from(100));
        assert_eq!(data["currency"], "pesos");
        // Notes are stored trimmed
        assert_eq!(data["note"], "Factura de marzo");
        assert_eq!(data["recorded_by"], "ana");
        assert_eq!(data["date"], "2024-03-05");
        assert_eq!(data["due_date"], "2024-03-15");
    }

    #[tokio::test]
    async fn test_create_entry_applies_defaults() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/entries")
            .json(&json!({
                "scope": "registro",
                "label": "otros",
                "amount": "10",
                "date": "2024-03-01"
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        let data = &body["data"];
        assert_eq!(data["kind"], "gasto");
        assert_eq!(data["currency"], "pesos");
        assert_eq!(data["is_fixed"], false);
        assert_eq!(data["frequency"], "ninguna");
        assert!(data["note"].is_null());
        assert!(data["recorded_by"].is_null());
        assert!(data["due_date"].is_null());
    }

    #[tokio::test]
    async fn test_create_entry_normalizes_frequency_for_non_fixed() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/entries")
            .json(&json!({
                "scope": "registro",
                "label": "internet",
                "amount": "25",
                "date": "2024-03-01",
                "is_fixed": false,
                "frequency": "mensual"
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["data"]["frequency"], "ninguna");
    }

    #[tokio::test]
    async fn test_create_entry_rejects_blank_label() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/entries")
            .json(&json!({
                "scope": "registro",
                "label": "   ",
                "amount": "10",
                "date": "2024-03-01"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "INVALID_LABEL");
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_create_entry_rejects_negative_amount() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/entries")
            .json(&json!({
                "scope": "registro",
                "label": "otros",
                "amount": "-5",
                "date": "2024-03-01"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "INVALID_AMOUNT");
    }

    #[tokio::test]
    async fn test_create_entry_requires_recorder_for_casa() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/entries")
            .json(&json!({
                "scope": "casa",
                "label": "luz",
                "amount": "10",
                "date": "2024-03-01"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "MISSING_RECORDED_BY");

        // A whitespace-only recorder is as good as none
        let response = server
            .post("/api/v1/entries")
            .json(&json!({
                "scope": "casa",
                "label": "luz",
                "amount": "10",
                "date": "2024-03-01",
                "recorded_by": "   "
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_entry_drops_recorder_for_registro() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/entries")
            .json(&json!({
                "scope": "registro",
                "label": "otros",
                "amount": "10",
                "date": "2024-03-01",
                "recorded_by": "ana"
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert!(body["data"]["recorded_by"].is_null());
    }

    #[tokio::test]
    async fn test_list_entries_newest_first_with_id_tiebreak() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let first = seed_entry(
            &server,
            json!({"scope": "registro", "label": "luz", "amount": "1", "date": "2024-03-01"}),
        )
        .await;
        let middle = seed_entry(
            &server,
            json!({"scope": "registro", "label": "agua", "amount": "2", "date": "2024-03-15"}),
        )
        .await;
        let last = seed_entry(
            &server,
            json!({"scope": "registro", "label": "gas", "amount": "3", "date": "2024-03-10"}),
        )
        .await;
        // Same date as `middle`, created later, so it sorts first
        let tiebreak = seed_entry(
            &server,
            json!({"scope": "registro", "label": "nafta", "amount": "4", "date": "2024-03-15"}),
        )
        .await;

        let response = server.get("/api/v1/entries?scope=registro").await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["success"], true);

        let entries = body["data"]["entries"].as_array().expect("entries array");
        let ids: Vec<i64> = entries
            .iter()
            .map(|entry| entry["id"].as_i64().expect("id"))
            .collect();
        assert_eq!(ids, vec![tiebreak, middle, last, first]);

        // No filter params, so every facet reports inactive
        let filters = &body["data"]["filters"];
        for key in [
            "kind",
            "labels",
            "date",
            "currency",
            "amount",
            "fixed",
            "frequency",
            "due",
            "recordedBy",
            "note",
        ] {
            assert_eq!(filters[key], false, "facet {} should be inactive", key);
        }
    }

    #[tokio::test]
    async fn test_list_entries_isolates_scopes() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        seed_entry(
            &server,
            json!({"scope": "casa", "label": "luz", "amount": "10", "date": "2024-03-01", "recorded_by": "ana"}),
        )
        .await;
        let registro_id = seed_entry(
            &server,
            json!({"scope": "registro", "label": "otros", "amount": "20", "date": "2024-03-02"}),
        )
        .await;

        let response = server.get("/api/v1/entries?scope=registro").await;

        let body: Value = response.json();
        let entries = body["data"]["entries"].as_array().expect("entries array");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["id"].as_i64(), Some(registro_id));
        assert_eq!(entries[0]["scope"], "registro");
    }

    #[tokio::test]
    async fn test_list_entries_label_and_note_facets_conjoin() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let matching = seed_entry(
            &server,
            json!({"scope": "casa", "label": "luz", "amount": "100", "date": "2024-03-05",
                   "recorded_by": "ana", "note": "Factura de marzo"}),
        )
        .await;
        seed_entry(
            &server,
            json!({"scope": "casa", "label": "luz", "amount": "40", "date": "2024-03-20",
                   "recorded_by": "bruno"}),
        )
        .await;
        seed_entry(
            &server,
            json!({"scope": "casa", "label": "agua", "amount": "60", "date": "2024-03-06",
                   "recorded_by": "ana", "note": "factura vieja"}),
        )
        .await;

        let response = server
            .get("/api/v1/entries?scope=casa&labels=luz&note=factura")
            .await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();

        let entries = body["data"]["entries"].as_array().expect("entries array");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["id"].as_i64(), Some(matching));

        let filters = &body["data"]["filters"];
        assert_eq!(filters["labels"], true);
        assert_eq!(filters["note"], true);
        assert_eq!(filters["kind"], false);
        assert_eq!(filters["recordedBy"], false);
    }

    #[tokio::test]
    async fn test_list_entries_amount_bounds_parse_es_ar_strings() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        seed_entry(
            &server,
            json!({"scope": "registro", "label": "otros", "amount": "1000", "date": "2024-03-01"}),
        )
        .await;
        let at_bound = seed_entry(
            &server,
            json!({"scope": "registro", "label": "otros", "amount": "1234.5", "date": "2024-03-02"}),
        )
        .await;
        let above = seed_entry(
            &server,
            json!({"scope": "registro", "label": "otros", "amount": "2000", "date": "2024-03-03"}),
        )
        .await;

        // es-AR notation: thousands dot, decimal comma; the bound is inclusive
        let response = server
            .get("/api/v1/entries?scope=registro&amount_min=1.234,5")
            .await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();

        let entries = body["data"]["entries"].as_array().expect("entries array");
        let ids: Vec<i64> = entries
            .iter()
            .map(|entry| entry["id"].as_i64().expect("id"))
            .collect();
        assert_eq!(ids, vec![above, at_bound]);
        assert_eq!(body["data"]["filters"]["amount"], true);
    }

    #[tokio::test]
    async fn test_list_entries_date_range_is_inclusive() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        seed_entry(
            &server,
            json!({"scope": "registro", "label": "otros", "amount": "1", "date": "2024-03-10"}),
        )
        .await;
        let lower = seed_entry(
            &server,
            json!({"scope": "registro", "label": "otros", "amount": "2", "date": "2024-03-20"}),
        )
        .await;
        let upper = seed_entry(
            &server,
            json!({"scope": "registro", "label": "otros", "amount": "3", "date": "2024-03-31"}),
        )
        .await;
        seed_entry(
            &server,
            json!({"scope": "registro", "label": "otros", "amount": "4", "date": "2024-04-02"}),
        )
        .await;

        let response = server
            .get("/api/v1/entries?scope=registro&date_from=2024-03-20&date_to=2024-03-31")
            .await;

        let body: Value = response.json();
        let entries = body["data"]["entries"].as_array().expect("entries array");
        let ids: Vec<i64> = entries
            .iter()
            .map(|entry| entry["id"].as_i64().expect("id"))
            .collect();
        assert_eq!(ids, vec![upper, lower]);
        assert_eq!(body["data"]["filters"]["date"], true);
    }

    #[tokio::test]
    async fn test_list_entries_recorded_by_only_filters_casa() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let ana_entry = seed_entry(
            &server,
            json!({"scope": "casa", "label": "luz", "amount": "10", "date": "2024-03-05",
                   "recorded_by": "ana"}),
        )
        .await;
        seed_entry(
            &server,
            json!({"scope": "casa", "label": "agua", "amount": "20", "date": "2024-03-06",
                   "recorded_by": "bruno"}),
        )
        .await;
        let registro_entry = seed_entry(
            &server,
            json!({"scope": "registro", "label": "otros", "amount": "30", "date": "2024-03-07"}),
        )
        .await;

        // In the personal ledger the facet is ignored outright
        let response = server
            .get("/api/v1/entries?scope=registro&recorded_by=ana")
            .await;
        let body: Value = response.json();
        let entries = body["data"]["entries"].as_array().expect("entries array");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["id"].as_i64(), Some(registro_entry));
        assert_eq!(body["data"]["filters"]["recordedBy"], false);

        // In casa it narrows to the selected collaborators
        let response = server
            .get("/api/v1/entries?scope=casa&recorded_by=ana")
            .await;
        let body: Value = response.json();
        let entries = body["data"]["entries"].as_array().expect("entries array");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["id"].as_i64(), Some(ana_entry));
        assert_eq!(body["data"]["filters"]["recordedBy"], true);
    }

    #[tokio::test]
    async fn test_list_entries_rejects_unknown_facet_values() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        for url in [
            "/api/v1/entries?scope=casa&kind=comida",
            "/api/v1/entries?scope=casa&currency=euros",
            "/api/v1/entries?scope=casa&fixed=si",
            "/api/v1/entries?scope=casa&frequency=anual",
            "/api/v1/entries?scope=casa&amount_min=abc",
        ] {
            let response = server.get(url).await;
            response.assert_status(StatusCode::BAD_REQUEST);
            let body: Value = response.json();
            assert_eq!(body["code"], "INVALID_FILTER", "for {}", url);
        }
    }

    #[tokio::test]
    async fn test_list_entries_requires_known_scope() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/entries?scope=oficina").await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let response = server.get("/api/v1/entries").await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_entry_lifecycle() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let entry_id = seed_entry(
            &server,
            json!({"scope": "registro", "label": "otros", "amount": "10", "date": "2024-03-01"}),
        )
        .await;

        let response = server
            .delete(&format!("/api/v1/entries/{}", entry_id))
            .await;
        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["data"]["deleted"], true);
        assert_eq!(body["success"], true);

        // Gone now
        let response = server
            .delete(&format!("/api/v1/entries/{}", entry_id))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["code"], "NOT_FOUND");

        let response = server.delete("/api/v1/entries/0").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "INVALID_ID");

        let response = server.delete("/api/v1/entries/abc").await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_monthly_summary_buckets_and_window() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        seed_entry(
            &server,
            json!({"scope": "casa", "label": "luz", "amount": "100", "date": "2024-03-05",
                   "kind": "gasto", "is_fixed": true, "frequency": "mensual", "recorded_by": "ana"}),
        )
        .await;
        seed_entry(
            &server,
            json!({"scope": "casa", "label": "sueldo", "amount": "500", "date": "2024-03-01",
                   "kind": "ingreso", "recorded_by": "ana"}),
        )
        .await;
        seed_entry(
            &server,
            json!({"scope": "casa", "label": "compra", "amount": "50", "date": "2024-03-31",
                   "kind": "gasto", "recorded_by": "bruno"}),
        )
        .await;
        // Next month, must not count
        seed_entry(
            &server,
            json!({"scope": "casa", "label": "nafta", "amount": "999", "date": "2024-04-01",
                   "kind": "gasto", "recorded_by": "ana"}),
        )
        .await;
        // Other scope, must not count
        seed_entry(
            &server,
            json!({"scope": "registro", "label": "otros", "amount": "77", "date": "2024-03-10"}),
        )
        .await;

        let response = server
            .get("/api/v1/summary?scope=casa&year=2024&month=3")
            .await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Summary computed successfully");

        let data = &body["data"];
        assert_eq!(data["scope"], "casa");

        let period = &data["period"];
        assert_eq!(period["year"], 2024);
        assert_eq!(period["month"], 3);
        assert_eq!(period["start"], "2024-03-01");
        assert_eq!(period["end"], "2024-04-01");

        let totals = &data["totals"];
        assert_eq!(dec(&totals["gastos"]), Decimal::from(150));
        assert_eq!(dec(&totals["ingresos"]), Decimal::from(500));
        assert_eq!(dec(&totals["diferencia"]), Decimal::from(350));

        // Label buckets come back alphabetically; total is gross
        let by_label = data["byLabel"].as_array().expect("byLabel array");
        assert_eq!(by_label.len(), 3);
        assert_eq!(by_label[0]["label"], "compra");
        assert_eq!(dec(&by_label[0]["gastos"]), Decimal::from(50));
        assert_eq!(by_label[1]["label"], "luz");
        assert_eq!(dec(&by_label[1]["total"]), Decimal::from(100));
        assert_eq!(by_label[2]["label"], "sueldo");
        assert_eq!(dec(&by_label[2]["ingresos"]), Decimal::from(500));
        assert_eq!(dec(&by_label[2]["total"]), Decimal::from(500));

        let fijo = &data["byFixed"]["fijo"];
        assert_eq!(dec(&fijo["gastos"]), Decimal::from(100));
        assert_eq!(dec(&fijo["total"]), Decimal::from(100));
        let no_fijo = &data["byFixed"]["noFijo"];
        assert_eq!(dec(&no_fijo["gastos"]), Decimal::from(50));
        assert_eq!(dec(&no_fijo["ingresos"]), Decimal::from(500));
        assert_eq!(dec(&no_fijo["total"]), Decimal::from(550));

        let by_person = data["byPerson"].as_array().expect("byPerson array");
        assert_eq!(by_person.len(), 2);
        assert_eq!(by_person[0]["person"], "ana");
        assert_eq!(dec(&by_person[0]["total"]), Decimal::from(600));
        assert_eq!(by_person[1]["person"], "bruno");
        assert_eq!(dec(&by_person[1]["total"]), Decimal::from(50));
    }

    #[tokio::test]
    async fn test_monthly_summary_for_registro_has_no_person_buckets() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        seed_entry(
            &server,
            json!({"scope": "registro", "label": "otros", "amount": "30", "date": "2024-03-07"}),
        )
        .await;

        let response = server
            .get("/api/v1/summary?scope=registro&year=2024&month=3")
            .await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["data"]["scope"], "registro");
        assert_eq!(dec(&body["data"]["totals"]["gastos"]), Decimal::from(30));
        let by_person = body["data"]["byPerson"].as_array().expect("byPerson array");
        assert!(by_person.is_empty());
    }

    #[tokio::test]
    async fn test_monthly_summary_december_window_rolls_year() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        seed_entry(
            &server,
            json!({"scope": "registro", "label": "luz", "amount": "80", "date": "2025-12-31"}),
        )
        .await;
        seed_entry(
            &server,
            json!({"scope": "registro", "label": "luz", "amount": "70", "date": "2026-01-01"}),
        )
        .await;

        let response = server
            .get("/api/v1/summary?scope=registro&year=2025&month=12")
            .await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["data"]["period"]["end"], "2026-01-01");
        assert_eq!(dec(&body["data"]["totals"]["gastos"]), Decimal::from(80));
    }

    #[tokio::test]
    async fn test_monthly_summary_rejects_out_of_range_period() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        for url in [
            "/api/v1/summary?scope=casa&year=2024&month=0",
            "/api/v1/summary?scope=casa&year=2024&month=13",
            "/api/v1/summary?scope=casa&year=1969&month=6",
            "/api/v1/summary?scope=casa&year=3001&month=6",
            "/api/v1/summary?scope=casa&month=3",
        ] {
            let response = server.get(url).await;
            response.assert_status(StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn test_prometheus_metrics_route_absent_under_test() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        // The metrics recorder is process-global, so the route is compiled
        // out of test builds.
        let response = server.get("/metrics").await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_openapi_json_served() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api-docs/openapi.json").await;
        response.assert_status(StatusCode::OK);
        let body = response.text();
        assert!(body.contains("/api/v1/summary"));
        assert!(body.contains("/api/v1/entries"));
    }
}
