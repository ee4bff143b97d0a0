pub mod events;
pub mod ids;
pub mod options;
pub mod priority;

pub use events::RequestEvent;
pub use ids::RequestId;
pub use options::RequestOptions;
pub use priority::Priority;
