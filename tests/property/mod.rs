//! Property-based tests for kafkactx

mod merge_properties;
