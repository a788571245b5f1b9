pub mod aggregate;
pub mod completion;
pub mod service;

pub use aggregate::{aggregate, UNKNOWN_BUCKET};
pub use completion::{is_calculation_complete, StatusLookup, StatusLookupError};
pub use service::{CalculatedImpactService, ImpactError};
