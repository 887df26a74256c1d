pub mod transfer_ledger;

pub use transfer_ledger::TransferLedger;
