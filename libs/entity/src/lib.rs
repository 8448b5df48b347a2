pub mod identification;
pub mod itinerary;
pub mod language;
pub mod lenient;
pub mod request;

pub mod prelude {
    pub use crate::identification::{IdentificationMode, IdentificationResult};
    pub use crate::itinerary::{DayPlan, Itinerary, RouteItem, RouteItemType};
    pub use crate::language::Language;
    pub use crate::request::{GenerationRequest, RefineRequest};
}
