mod client;
mod service;

pub use self::client::{DynReviewApiClient, ReviewApiClientTrait};
pub use self::service::{DynReactionToggleService, ReactionToggleServiceTrait};
