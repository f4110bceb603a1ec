//! Dispatch - named invoke/query functions routed to ledger operations.
//!
//! The hosting runtime calls in with a function name and a list of string
//! arguments. Names resolve to [`InvokeOp`] / [`QueryOp`] through a static
//! table, and argument counts are checked before any store access; an unknown
//! name is an error rather than a silent no-op.
//!
//! ## Example
//!
//! ```ignore
//! use budget_ledger::{Chaincode, InMemoryStateStore};
//!
//! let chaincode = Chaincode::new(InMemoryStateStore::new());
//! chaincode.invoke("addProject", &[r#"{"projectId":"p1","title":"Park"}"#])?;
//! let project = chaincode.query("getProject", &["p1"])?;
//! ```

mod chaincode;
mod ops;

pub use chaincode::{Chaincode, Entry, Request, Response};
pub use ops::{InvokeOp, QueryOp};
