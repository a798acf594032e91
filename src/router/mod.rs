//! Tool routing core
//!
//! Maps free-text requests to one of a fixed set of remote operations and
//! derives the arguments each operation needs. Selection, extraction, and
//! validation are pure; anything that touches the network lives in the
//! dispatch module.

mod catalog;
mod extractor;
mod operation;
mod selector;
mod validator;

pub use catalog::PatternCatalog;
pub use extractor::Extractor;
pub use operation::{ArgValue, ArgumentSet, Operation};
pub use selector::select;
pub use validator::{is_dispatchable, missing_args};

use crate::error::Result;

/// Why a request takes the fallback path instead of dispatching
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// No operation was identified from the text
    NoOperation,
    /// An operation matched but required arguments could not be filled
    MissingArguments {
        operation: Operation,
        missing: Vec<&'static str>,
    },
}

/// Outcome of the pure routing pass
#[derive(Debug, Clone, PartialEq)]
pub enum RouteDecision {
    /// Operation selected and validated; ready for dispatch
    Dispatch { operation: Operation, args: ArgumentSet },
    /// Defer to free-form model completion over the original text
    Fallback(FallbackReason),
}

impl RouteDecision {
    pub fn is_dispatch(&self) -> bool {
        matches!(self, RouteDecision::Dispatch { .. })
    }
}

/// Pattern catalog and extractor bundled up, built once at startup
///
/// Holds no per-request state: every decision is a pure function of the
/// input text, so the router can be shared freely.
#[derive(Debug)]
pub struct Router {
    catalog: PatternCatalog,
    extractor: Extractor,
}

impl Router {
    /// Build a router over the default pattern catalog
    pub fn new() -> Result<Self> {
        Ok(Self {
            catalog: PatternCatalog::new()?,
            extractor: Extractor::new()?,
        })
    }

    /// Build a router over a custom catalog
    pub fn with_catalog(catalog: PatternCatalog) -> Result<Self> {
        Ok(Self {
            catalog,
            extractor: Extractor::new()?,
        })
    }

    /// Run select → extract → validate for one request
    pub fn decide(&self, text: &str) -> RouteDecision {
        let Some(operation) = select(&self.catalog, text) else {
            log::debug!("no operation identified, falling back");
            return RouteDecision::Fallback(FallbackReason::NoOperation);
        };

        let args = self.extractor.extract(text, operation);

        if is_dispatchable(operation, &args) {
            log::debug!("routed to {} with {} args", operation, args.len());
            RouteDecision::Dispatch { operation, args }
        } else {
            let missing = missing_args(operation, &args);
            log::debug!("{} missing required args {:?}, falling back", operation, missing);
            RouteDecision::Fallback(FallbackReason::MissingArguments { operation, missing })
        }
    }

    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }
}
