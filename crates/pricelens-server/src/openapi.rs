use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "PriceLens API",
        version = "0.1.0",
        description = "Product title, price and image lookup for Amazon, Flipkart and Snapdeal."
    ),
    paths(
        crate::routes::get_price,
        crate::routes::compare_prices,
        crate::routes::health,
    ),
    components(schemas(
        crate::dto::GetPriceRequest,
        crate::dto::ProductResponse,
        crate::dto::ComparePricesRequest,
        crate::dto::ComparePricesResponse,
        crate::dto::PlatformPrice,
        crate::dto::HealthResponse,
        crate::dto::ErrorResponse,
    )),
    tags(
        (name = "prices", description = "Product price lookup"),
        (name = "system", description = "Health and system status"),
    )
)]
pub struct ApiDoc;
