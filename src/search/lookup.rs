use crate::utils::any::Any;
use poem_openapi::Object;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub const EMPTY_QUERY_MESSAGE: &str = "JANコードを入力してください";
pub const SERVICE_ERROR_MESSAGE: &str = "エラーが発生しました";
pub const UNKNOWN_ERROR_MESSAGE: &str = "不明なエラーが発生しました";

// NOTE: shared with the stub service (see server.rs); jan_code is the canonical code as returned by the service and
// need not match the query's formatting
#[derive(Clone, Debug, Deserialize, Eq, Object, PartialEq, Serialize)]
pub struct LookupResult {
    pub jan_code: String,
    pub url: String,
    pub brand: Option<String>,
    pub product_name: Option<String>,
}

#[derive(Debug, Deserialize, Object, Serialize)]
pub struct ErrorBody {
    pub detail: Option<String>,
}

// NOTE: exactly one of these is ever active; a new search replaces the previous payload wholesale
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SearchState {
    Idle,
    Loading,
    Failed(String),
    Succeeded(LookupResult),
}

impl SearchState {
    pub fn is_loading(&self) -> bool {
        std::matches!(self, Self::Loading)
    }
}

pub async fn lookup(http_client: &ReqwestClient, api_url: &str, jan: &str) -> SearchState {
    match fetch(http_client, api_url, jan).await {
        Ok(result) => SearchState::Succeeded(result),
        Err(message) => SearchState::Failed(message),
    }
}

// NOTE: the jan value goes through reqwest's query-pair serializer and is therefore percent-encoded
pub async fn fetch(http_client: &ReqwestClient, api_url: &str, jan: &str) -> Result<LookupResult, String> {
    let url = std::format!("{api_url}/api/convert");
    let response = http_client
        .get(url)
        .query(&[("jan", jan)])
        .send()
        .await
        .map_err(message)?;
    let status = response.status();
    let body = response.text().await.map_err(message)?;

    if status.is_success() {
        body.deserialize_from_json::<LookupResult>().map_err(message)
    } else {
        body.deserialize_from_json::<ErrorBody>()
            .ok()
            .and_then(|error_body| error_body.detail)
            .unwrap_or_else(|| SERVICE_ERROR_MESSAGE.into())
            .err()
    }
}

// NOTE: errors always render a Display message; the unknown-error text only stands in when that message is empty
fn message<E: Display>(error: E) -> String {
    let message = error.to_string();

    if message.is_empty() {
        UNKNOWN_ERROR_MESSAGE.into()
    } else {
        message
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use poem::{handler, http::StatusCode, web::Json, web::Query, IntoResponse, Response, Route};
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct JanQuery {
        jan: String,
    }

    #[handler]
    fn convert_minimal() -> Json<LookupResult> {
        Json(LookupResult {
            jan_code: "4571657070839".into(),
            url: "https://example.com/p/1".into(),
            brand: None,
            product_name: None,
        })
    }

    #[handler]
    fn convert_echo(Query(query): Query<JanQuery>) -> Json<LookupResult> {
        Json(LookupResult {
            jan_code: query.jan.clone(),
            url: std::format!("https://example.com/p/{}", query.jan),
            brand: None,
            product_name: None,
        })
    }

    #[handler]
    fn convert_empty_error() -> Response {
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }

    #[handler]
    fn convert_not_json() -> String {
        "not json".into()
    }

    fn route<E>(endpoint: E) -> Route
    where
        E: poem::IntoEndpoint,
        E::Endpoint: 'static,
    {
        Route::new().at("/api/convert", endpoint)
    }

    #[tokio::test]
    async fn lookup_succeeds_with_optional_fields_absent() {
        let api_url = testing::serve(route(poem::get(convert_minimal))).await;
        let state = lookup(&ReqwestClient::new(), &api_url, "4571657070839").await;
        let SearchState::Succeeded(result) = state else {
            panic!("expected success, got {state:?}");
        };

        assert_eq!(result.url, "https://example.com/p/1");
        assert_eq!(result.brand, None);
        assert_eq!(result.product_name, None);
    }

    #[tokio::test]
    async fn lookup_percent_encodes_the_jan_value() {
        let api_url = testing::serve(route(poem::get(convert_echo))).await;
        let state = lookup(&ReqwestClient::new(), &api_url, "40&12#34").await;
        let SearchState::Succeeded(result) = state else {
            panic!("expected success, got {state:?}");
        };

        assert_eq!(result.jan_code, "40&12#34");
    }

    #[tokio::test]
    async fn lookup_falls_back_to_the_generic_message_without_a_detail_field() {
        let api_url = testing::serve(route(poem::get(convert_empty_error))).await;
        let state = lookup(&ReqwestClient::new(), &api_url, "4571657070839").await;

        assert_eq!(state, SearchState::Failed(SERVICE_ERROR_MESSAGE.into()));
    }

    #[tokio::test]
    async fn lookup_fails_on_a_malformed_success_body() {
        let api_url = testing::serve(route(poem::get(convert_not_json))).await;
        let state = lookup(&ReqwestClient::new(), &api_url, "4571657070839").await;
        let SearchState::Failed(message) = state else {
            panic!("expected failure, got {state:?}");
        };

        assert!(!message.is_empty());
    }

    #[tokio::test]
    async fn lookup_fails_on_a_transport_error() {
        // NOTE: port 1 is never listening
        let state = lookup(&ReqwestClient::new(), "http://127.0.0.1:1", "4571657070839").await;
        let SearchState::Failed(message) = state else {
            panic!("expected failure, got {state:?}");
        };

        assert!(!message.is_empty());
        assert_ne!(message, SERVICE_ERROR_MESSAGE);
    }
}
