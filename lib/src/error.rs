// Copyright (c) 2022-2023 The MobileCoin Foundation

use ledger_iota_core::Error as CoreError;

/// Ledger IOTA API Error Type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Signing core error
    #[error("Signing core error: {0}")]
    Core(#[from] CoreError),

    /// Mnemonic parsing failed
    #[error("Invalid mnemonic: {0}")]
    Mnemonic(String),

    /// Hex decoding failed
    #[error("Invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    /// Request encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Request field failed to parse
    #[error("Invalid request field '{0}' ({1})")]
    InvalidField(&'static str, CoreError),
}
