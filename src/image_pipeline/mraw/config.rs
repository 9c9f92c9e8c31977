//! Reader configuration types

use crate::image_pipeline::metadata::types::BitOrder;

/// Configuration for opening a recording
#[derive(Debug, Clone, Default)]
pub struct ReaderConfig {
    /// Run the bit order check against frame 0 right after construction
    pub check_bit_order: bool,
    /// Use this order instead of the one recorded in the metadata
    pub bit_order_override: Option<BitOrder>,
}

impl ReaderConfig {
    pub fn builder() -> ReaderConfigBuilder {
        ReaderConfigBuilder::default()
    }
}

/// Builder for ReaderConfig
#[derive(Default)]
pub struct ReaderConfigBuilder {
    check_bit_order: Option<bool>,
    bit_order_override: Option<Option<BitOrder>>,
}

impl ReaderConfigBuilder {
    pub fn check_bit_order(mut self, enable: bool) -> Self {
        self.check_bit_order = Some(enable);
        self
    }

    pub fn bit_order_override(mut self, order: Option<BitOrder>) -> Self {
        self.bit_order_override = Some(order);
        self
    }

    pub fn build(self) -> ReaderConfig {
        let default = ReaderConfig::default();
        ReaderConfig {
            check_bit_order: self.check_bit_order.unwrap_or(default.check_bit_order),
            bit_order_override: self.bit_order_override.unwrap_or(default.bit_order_override),
        }
    }
}
