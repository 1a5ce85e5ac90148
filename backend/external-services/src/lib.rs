pub mod service;

pub use service::HttpClient;
