use crate::core::filter::DistanceFilter;
use crate::core::formatter::format_invite_list;
use crate::core::parser::parse_customers;
use crate::core::{ConfigProvider, CustomerMap, InviteList, Pipeline, Storage, TransformResult};
use crate::utils::error::{EtlError, Result};
use std::cell::RefCell;
use std::io::{Stdout, Write};

/// Extract / transform / load for the invite list.
///
/// `load` writes the rendered list to the console sink `W` and then to the
/// configured output path. The sink defaults to stdout.
pub struct InvitePipeline<S: Storage, C: ConfigProvider, W: Write = Stdout> {
    storage: S,
    config: C,
    console: RefCell<W>,
}

impl<S: Storage, C: ConfigProvider> InvitePipeline<S, C, Stdout> {
    pub fn new(storage: S, config: C) -> Self {
        Self::with_console(storage, config, std::io::stdout())
    }
}

impl<S: Storage, C: ConfigProvider, W: Write> InvitePipeline<S, C, W> {
    pub fn with_console(storage: S, config: C, console: W) -> Self {
        Self {
            storage,
            config,
            console: RefCell::new(console),
        }
    }

    fn echo(&self, rendered: &str) -> Result<()> {
        let mut console = self.console.borrow_mut();
        console
            .write_all(rendered.as_bytes())
            .and_then(|_| console.flush())
            .map_err(|source| EtlError::OutputError {
                path: "<stdout>".to_string(),
                source,
            })
    }
}

impl<S: Storage, C: ConfigProvider, W: Write> Pipeline for InvitePipeline<S, C, W> {
    fn extract(&self) -> Result<CustomerMap> {
        let path = self.config.input_path();
        tracing::debug!("Reading customer data from: {}", path);

        let bytes = self.storage.read_file(path).map_err(|e| match e {
            EtlError::IoError(source) => EtlError::InputError {
                path: path.to_string(),
                source,
            },
            other => other,
        })?;

        let content = String::from_utf8(bytes).map_err(|e| EtlError::InputError {
            path: path.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;

        parse_customers(&content, self.config.duplicate_policy())
    }

    fn transform(&self, customers: CustomerMap) -> Result<TransformResult> {
        let filter = DistanceFilter::new(self.config.office(), self.config.distance_km())?;
        tracing::debug!(
            "Filtering {} customers within {} km of ({}, {})",
            customers.len(),
            filter.threshold_km(),
            filter.office().latitude,
            filter.office().longitude
        );

        let invites = InviteList::from(filter.apply(&customers));
        let rendered = format_invite_list(&invites);

        Ok(TransformResult {
            invites,
            rendered,
            customers_considered: customers.len(),
        })
    }

    fn load(&self, result: TransformResult) -> Result<String> {
        let path = self.config.output_path();

        // 與 stdout 輸出相同內容；空名單也要寫入以覆蓋舊檔
        self.echo(&result.rendered)?;

        tracing::debug!(
            "Writing {} invites ({} bytes) to {}",
            result.invites.len(),
            result.rendered.len(),
            path
        );
        self.storage
            .write_file(path, result.rendered.as_bytes())
            .map_err(|e| match e {
                EtlError::IoError(source) => EtlError::OutputError {
                    path: path.to_string(),
                    source,
                },
                other => other,
            })?;

        Ok(path.to_string())
    }
}
