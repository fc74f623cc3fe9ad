//! Decoders for the fixed-layout answers that follow a response descriptor.

pub mod descriptor_parser;
pub mod device_info_parser;
pub mod health_parser;
pub mod measurement_parser;
