use crate::{
    cli_args::CliArgs,
    error::Error,
    search::lookup::{ErrorBody, LookupResult},
    utils::any::Any,
};
use poem::{
    listener::TcpListener,
    middleware::{Cors, Tracing},
    EndpointExt, Route, Server as PoemServer,
};
use poem_openapi::{param::Query, payload::Json, ApiResponse, Object, OpenApi, OpenApiService};
use std::net::Ipv4Addr;

#[derive(Object)]
struct ApiInfo {
    message: String,
    status: String,
}

#[derive(Object)]
struct Health {
    status: String,
}

#[derive(ApiResponse)]
enum ConvertResponse {
    #[oai(status = 200)]
    Ok(Json<LookupResult>),

    #[oai(status = 404)]
    NotFound(Json<ErrorBody>),
}

// NOTE: a stand-in for the real resolution service, serving a fixed sample of mappings; the client only ever talks to
// it through its http interface
pub struct Server;

#[OpenApi]
#[allow(clippy::unused_async)]
impl Server {
    const API_PATH: &'static str = "/";
    const API_TITLE: &'static str = std::env!("CARGO_PKG_NAME");
    const API_VERSION: &'static str = std::env!("CARGO_PKG_VERSION");
    pub const DEFAULT_HOST: Ipv4Addr = Ipv4Addr::UNSPECIFIED;
    pub const DEFAULT_PORT: u16 = 8000;

    pub async fn serve(cli_args: &CliArgs) -> Result<(), Error> {
        let address = std::format!("{host}:{port}", host = cli_args.host, port = cli_args.port);
        let tcp_listener = TcpListener::bind(address);
        let route = Self::route().with(Cors::new()).with(Tracing);

        PoemServer::new(tcp_listener).run(route).await?.ok()
    }

    pub fn route() -> Route {
        let open_api_service = OpenApiService::new(Self, Self::API_TITLE, Self::API_VERSION);

        Route::new().nest(Self::API_PATH, open_api_service)
    }

    fn sample_data(jan: &str) -> Option<LookupResult> {
        let (url, brand, product_name) = match jan {
            "4571657070839" => (
                "https://www.goldwin.co.jp/ap/item/i/m/NP12503",
                "The North Face",
                "Mountain Down Jacket",
            ),
            "4548913619937" => (
                "https://www.goldwin.co.jp/ap/item/i/m/NP62236",
                "The North Face",
                "Nuptse Jacket",
            ),
            _ => return None,
        };
        let result = LookupResult {
            jan_code: jan.into(),
            url: url.into(),
            brand: brand.to_owned().some(),
            product_name: product_name.to_owned().some(),
        };

        result.some()
    }

    #[oai(method = "get", path = "/api/convert")]
    async fn convert(&self, jan: Query<String>) -> ConvertResponse {
        match Self::sample_data(&jan) {
            Some(result) => ConvertResponse::Ok(Json(result)),
            None => {
                let detail = std::format!("JAN code '{jan}' not found", jan = jan.0);
                let error_body = ErrorBody { detail: detail.some() };

                ConvertResponse::NotFound(Json(error_body))
            }
        }
    }

    #[oai(method = "get", path = "/")]
    async fn root(&self) -> Json<ApiInfo> {
        Json(ApiInfo {
            message: "JAN-URL Conversion API".into(),
            status: "healthy".into(),
        })
    }

    #[oai(method = "get", path = "/health")]
    async fn health(&self) -> Json<Health> {
        Json(Health { status: "ok".into() })
    }
}
