//! Solana token address validation.
//!
//! Mint addresses are base58-encoded 32-byte public keys, which come out
//! between 32 and 44 characters long.

pub const MIN_ADDRESS_LEN: usize = 32;
pub const MAX_ADDRESS_LEN: usize = 44;

/// Address shown to users when they send something that is not one.
pub const EXAMPLE_ADDRESS: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

/// True when `candidate` has a plausible length and only uses the base58
/// alphabet (`1-9`, `A-Z` without `I`/`O`, `a-z` without `l`).
pub fn is_valid(candidate: &str) -> bool {
    if candidate.len() < MIN_ADDRESS_LEN || candidate.len() > MAX_ADDRESS_LEN {
        return false;
    }
    // Any string over the bitcoin alphabet decodes, anything else is rejected.
    bs58::decode(candidate).into_vec().is_ok()
}
