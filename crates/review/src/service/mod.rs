mod toggle;

pub use self::toggle::{ReactionToggleService, ReactionToggleServiceDeps};
