pub mod etl;
pub mod filter;
pub mod formatter;
pub mod geo;
pub mod parser;
pub mod pipeline;

pub use crate::domain::model::{
    CustomerId, CustomerMap, CustomerRecord, DuplicatePolicy, GeoPoint, InviteList, InviteMap,
    TransformResult,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
