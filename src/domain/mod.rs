pub mod data_source;
pub mod emission;
pub mod organization;
pub mod role;
pub mod user;

pub use data_source::{DataSourceKind, DataSourceRecord, DataSourceStatus, NewDataSourceRecord};
pub use emission::{
    CategorySummary, Emission, EmissionRecord, EmissionScope, EmissionSummary, ScopeSummary,
    EMISSION_UNIT,
};
pub use organization::{AccountType, Membership, NewOrganization, Organization};
pub use role::{is_role_at_least, is_role_at_most, Role};
pub use user::User;
