//! Typed client for a hierarchical parameter store.
//!
//! Keys follow `/{env}/{service}/{key_type}/{subtype}/{name}`. Reads and writes
//! go through a [`storage::repository::ParameterStoreBackend`], either AWS SSM
//! or the in-process [`storage::adapters::LocalStore`], and every failure is
//! reported as an [`error::ClientException`].

pub mod client;
pub mod configs;
pub mod domain;
pub mod error;
pub mod storage;

pub use client::{CreateParameterOptions, ParameterStoreService};
pub use domain::{
    DataType, GetManyResult, KeyType, Parameter, ParameterDetails, ParameterType, ServiceType,
    TierType, build_key,
};
pub use error::{ClientException, ErrorCode};
