//! Record type definitions
//!
//! **Finance:**
//! - [`DepreciableAsset`] - Fixed assets and their depreciation records
//! - [`FeeRecord`] - Customs and port charges against a PIB or PEB
//! - [`ContainerTracking`] - Containers accruing free time and storage
//! - [`CustomerPayment`] - Invoices and settlements for payment dashboards
//!
//! **Reporting:**
//! - [`PipelineRecord`] - Quotations and proforma job orders
//! - [`ReportDefinition`] - Report catalogue entries
//!
//! **Engineering:**
//! - [`LiftingPlan`] - Crane lifts checked against rated capacity
//! - [`TransportConfiguration`] - Prime mover and trailer axle layouts

pub mod asset;
pub mod container;
pub mod fee;
pub mod lifting;
pub mod payment;
pub mod pipeline;
pub mod report;
pub mod transport;

pub use asset::{DepreciableAsset, DepreciationMethod};
pub use container::{ContainerStatus, ContainerTracking, FreeTimeStatus};
pub use fee::{DocumentType, FeeCategory, FeeRecord, PaymentStatus};
pub use lifting::LiftingPlan;
pub use payment::CustomerPayment;
pub use pipeline::PipelineRecord;
pub use report::ReportDefinition;
pub use transport::TransportConfiguration;
