// Extractors: per-module classification of messages, events, subscribers
// and cross-module calls

pub mod events;
pub mod external_calls;
pub mod messages;
pub mod subscribers;

pub use events::DomainEventExtractor;
pub use external_calls::ExternalCallExtractor;
pub use messages::{CommandExtractor, QueryExtractor};
pub use subscribers::EventSubscriberExtractor;
