pub mod abstract_trait;
pub mod api_client;
pub mod di;
pub mod domain;
pub mod service;
pub mod state;
