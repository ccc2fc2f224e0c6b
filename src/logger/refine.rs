//! Loggers with permanently bound fields.

use std::fmt;
use std::sync::Arc;

use super::{Log, LogError};
use crate::value::{Fields, Value};

/// Wraps a parent logger and merges a fixed set of fields into every call.
///
/// Bound fields come first, in their own order, followed by the call's fields.
/// When a call supplies a label that is already bound, the call's value wins and
/// the label keeps its bound position. The parent is shared read-only, so both
/// loggers stay usable independently of each other.
#[derive(Clone)]
pub struct RefinedLogger {
    parent: Arc<dyn Log>,
    fixed: Fields,
}

impl RefinedLogger {
    pub fn new(parent: Arc<dyn Log>, fixed: Fields) -> Self {
        RefinedLogger { parent, fixed }
    }

    pub fn fixed_fields(&self) -> &Fields {
        &self.fixed
    }
}

impl fmt::Debug for RefinedLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefinedLogger")
            .field("fixed", &self.fixed)
            .finish_non_exhaustive()
    }
}

impl Log for RefinedLogger {
    fn log_with(&self, message: Value, level: Value, fields: Fields) -> Result<(), LogError> {
        self.parent
            .log_with(message, level, self.fixed.merged(&fields))
    }
}

pub fn refine_logger<L>(logger: &L, fixed_fields: Fields) -> RefinedLogger
where
    L: Log + Clone + 'static,
{
    logger.refine(fixed_fields)
}
