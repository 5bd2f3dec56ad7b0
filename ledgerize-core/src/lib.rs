//! ledgerize-core: account identities, transaction records, and the shared error taxonomy

pub mod account;
pub mod error;
pub mod record;

pub use account::{AccountIdentity, AccountTable, FileKind};
pub use error::{IngestError, MalformedLine};
pub use record::{LEDGER_DATE_FORMAT, TransactionRecord};
