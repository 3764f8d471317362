use crate::domain::model::{CustomerMap, DuplicatePolicy, GeoPoint, TransformResult};
use crate::utils::error::Result;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn office(&self) -> GeoPoint;
    fn distance_km(&self) -> f64;
    fn duplicate_policy(&self) -> DuplicatePolicy;
}

pub trait Pipeline {
    fn extract(&self) -> Result<CustomerMap>;
    fn transform(&self, customers: CustomerMap) -> Result<TransformResult>;
    fn load(&self, result: TransformResult) -> Result<String>;
}
