pub mod config;
pub mod error;
pub mod models;
pub mod profiles;
pub mod retry;
pub mod service;
pub mod site;
pub mod traits;


pub use config::FetchConfig;
pub use error::AppError;
pub use models::{ExtractionRequest, ExtractionResult};
pub use retry::{RetryPolicy, RetryingFetcher};
pub use service::PriceService;
pub use site::{Site, SiteProfile, route};
pub use traits::{Extractor, Fetcher, Header};
