//! The request-execution core: call descriptors, the `{"data": ...}` envelope,
//! error classification, backoff policy, and the retrying dispatcher.

mod backoff;
mod call;
mod dispatcher;
mod error;

pub use backoff::{
    BACKOFF_INITIAL_INTERVAL, BACKOFF_MAX_ELAPSED_TIME, BACKOFF_MAX_INTERVAL,
    BACKOFF_MULTIPLIER, BACKOFF_RANDOMIZATION_FACTOR, BackOff, BackOffProvider,
    ExponentialBackOff, default_backoff_provider,
};
pub use call::Call;
pub use dispatcher::{Api, IdProvider};
pub use error::{ApiError, ErrorKind, ResponseError};
