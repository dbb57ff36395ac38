mod scheduler;
mod sync;
mod tokens;

pub use scheduler::JobHandle;
pub use scheduler::JobState;
pub use scheduler::schedule_refresh;
pub use sync::PlaylistSyncer;
pub use sync::RECOMMENDATION_LIMIT;
pub use sync::SyncReport;
pub use sync::SyncTarget;
pub use tokens::TokenManager;
