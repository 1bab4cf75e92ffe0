pub mod contributor_request;

pub use contributor_request::*;
