use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::json;
use trip_itinerary_rs::{
    Accommodation, ProviderConfig, ProviderKind, TextProvider, TripError, TripPlanner,
    TripRequest,
};

const GENERATED: &str = "Trip Highlights:\n- Paella by the sea\n- Gaudí architecture\n\nDay 1 – Saturday, May 10\nMorning: Sagrada Família – Guided tour – $35 – Cultural\nAfternoon: La Boqueria – Market tasting – $25 – Food\nEvening: Flamenco Show – Live performance – $45 – Entertainment\n";

fn barcelona() -> TripRequest {
    TripRequest::new(
        "Barcelona, Spain",
        NaiveDate::from_ymd_opt(2025, 5, 10).unwrap(),
        NaiveDate::from_ymd_opt(2025, 5, 12).unwrap(),
    )
    .with_budget(800.0)
    .with_group_size("3-5")
    .with_preferences(["Foodie", "Cultural"])
    .with_accommodation(Accommodation::Apartment)
}

#[tokio::test]
async fn test_gemini_planner_end_to_end() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/models/gemini-1.5-pro-latest:generateContent")
        .match_header("x-goog-api-key", "test-key")
        .with_status(200)
        .with_body(
            json!({ "candidates": [{ "content": { "parts": [{ "text": GENERATED }] } }] })
                .to_string(),
        )
        .create_async()
        .await;

    let config = ProviderConfig::new(ProviderKind::Gemini, "test-key").with_base_url(server.url());
    let planner = TripPlanner::from_config(config).unwrap();
    let planned = planner.plan_with_report(&barcelona()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(planner.provider_name(), "gemini");
    assert_eq!(planned.raw_text, GENERATED);

    let itinerary = planned.itinerary;
    assert_eq!(itinerary.destination, "Barcelona, Spain");
    assert_eq!(itinerary.days.len(), 3);
    assert_eq!(itinerary.highlights, vec!["Paella by the sea", "Gaudí architecture"]);
    assert_eq!(itinerary.days[0].activities[0].name, "Sagrada Família");
    assert_eq!(itinerary.days[0].daily_budget, 105);
    assert_eq!(planned.report.days_missing(3), vec![2, 3]);
    assert_eq!(planned.report.slots_synthesized, 6);
}

#[tokio::test]
async fn test_chat_planner_end_to_end() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .with_status(200)
        .with_body(
            json!({ "choices": [{ "message": { "role": "assistant", "content": GENERATED } }] })
                .to_string(),
        )
        .create_async()
        .await;

    let config = ProviderConfig::new(ProviderKind::ChatCompletions, "sk-test")
        .with_base_url(format!("{}/api/v1", server.url()));
    let planner = TripPlanner::from_config(config).unwrap();
    let itinerary = planner.plan(&barcelona()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(itinerary.days[0].activities[2].category, "Entertainment");
}

#[tokio::test]
async fn test_provider_without_text_yields_empty_response() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/models/gemini-1.5-pro-latest:generateContent")
        .with_status(200)
        .with_body(json!({ "candidates": [] }).to_string())
        .create_async()
        .await;

    let config = ProviderConfig::new(ProviderKind::Gemini, "test-key").with_base_url(server.url());
    let planner = TripPlanner::from_config(config).unwrap();
    let err = planner.plan(&barcelona()).await.unwrap_err();

    assert!(matches!(err, TripError::EmptyResponse));
    assert_eq!(err.to_error_payload()["error"]["code"], "EMPTY_RESPONSE");
}

#[tokio::test]
async fn test_provider_error_surfaces_status() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/models/gemini-1.5-pro-latest:generateContent")
        .with_status(403)
        .with_body(json!({ "error": { "message": "API key not valid" } }).to_string())
        .create_async()
        .await;

    let config = ProviderConfig::new(ProviderKind::Gemini, "bad-key")
        .with_base_url(server.url())
        .with_max_retries(0);
    let planner = TripPlanner::from_config(config).unwrap();
    let err = planner.plan(&barcelona()).await.unwrap_err();

    match err {
        TripError::Provider { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "API key not valid");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[derive(Debug)]
struct EchoDayCount;

#[async_trait]
impl TextProvider for EchoDayCount {
    fn name(&self) -> &'static str {
        "echo"
    }

    async fn generate(&self, prompt: &str) -> trip_itinerary_rs::Result<String> {
        // Answer every "Day N –" block the prompt asked for, Morning only.
        let days = prompt.matches("\nDay ").count();
        Ok((1..=days)
            .map(|n| format!("Day {n}\nMorning: Stop {n} – Walk – ${n} – Sightseeing\n"))
            .collect())
    }
}

#[test]
fn test_custom_provider_blocking() {
    let planner = TripPlanner::new(Box::new(EchoDayCount));
    let itinerary = tokio_test::block_on(planner.plan(&barcelona())).unwrap();

    assert_eq!(itinerary.days.len(), 3);
    for (idx, day) in itinerary.days.iter().enumerate() {
        let n = idx as u32 + 1;
        assert_eq!(day.activities[0].name, format!("Stop {n}"));
        assert_eq!(day.activities[0].cost, n);
        assert_eq!(day.activities[1].name, "Barcelona, Spain Afternoon Activity");
    }
}

#[test]
fn test_invalid_request_error_payload() {
    let request = TripRequest::new(
        "Rome",
        NaiveDate::from_ymd_opt(2025, 5, 12).unwrap(),
        NaiveDate::from_ymd_opt(2025, 5, 10).unwrap(),
    );
    let err = request.validate().unwrap_err();

    assert_eq!(err.error_code(), "INVALID_REQUEST");
    let payload = err.to_error_payload();
    assert_eq!(payload["error"]["retryable"], false);
    assert!(payload["error"]["message"]
        .as_str()
        .unwrap()
        .contains("before start date"));
}
