//! Type definitions for Safe transactions

mod call;
mod operation;
mod signature;
mod transaction;

pub use call::{Call, SafeCall, TypedCall};
pub use operation::Operation;
pub use signature::{SafeSignature, SIGNATURE_LENGTH};
pub use transaction::{SafeTransaction, SafeTransactionData};
