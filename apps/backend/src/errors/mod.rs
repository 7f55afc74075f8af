//! Error handling for the BizTime backend.

pub mod domain;

pub use domain::DomainError;
