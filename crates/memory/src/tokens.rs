//! Token counting and budget arithmetic.

use tiktoken_rs::CoreBPE;
use tracing::warn;

use database::{conversation, Database};

/// Default per-channel token ceiling.
pub const DEFAULT_TOKEN_CEILING: i64 = 400_000;

/// Counts tokens and tracks the per-channel budget.
///
/// Counting uses the cl100k BPE vocabulary. If the tokenizer cannot be
/// constructed, counting degrades to `text.len() / 4` so the accountant
/// never fails its caller.
pub struct TokenAccountant {
    bpe: Option<CoreBPE>,
    ceiling: i64,
}

impl TokenAccountant {
    /// Create an accountant with the given ceiling.
    pub fn new(ceiling: i64) -> Self {
        let bpe = match tiktoken_rs::cl100k_base() {
            Ok(bpe) => Some(bpe),
            Err(e) => {
                warn!("Tokenizer unavailable, falling back to length/4 estimate: {}", e);
                None
            }
        };
        Self { bpe, ceiling }
    }

    /// Create an accountant with the default 400k ceiling.
    pub fn with_default_ceiling() -> Self {
        Self::new(DEFAULT_TOKEN_CEILING)
    }

    /// Construct without a tokenizer, forcing the fallback estimate.
    /// Used by tests to pin down the fallback path.
    pub fn without_tokenizer(ceiling: i64) -> Self {
        Self { bpe: None, ceiling }
    }

    /// The configured ceiling.
    pub fn ceiling(&self) -> i64 {
        self.ceiling
    }

    /// Count tokens in `text`. Never fails; never negative.
    pub fn count(&self, text: &str) -> i64 {
        match self.bpe {
            Some(ref bpe) => bpe.encode_with_special_tokens(text).len() as i64,
            None => (text.len() / 4) as i64,
        }
    }

    /// Remaining budget for a channel: ceiling minus the stored sum.
    ///
    /// May be negative if configuration shrank the ceiling under an existing
    /// history; the next `record_turn` wipes such a channel.
    pub async fn remaining_budget(
        &self,
        db: &Database,
        guild_id: &str,
        channel_id: &str,
    ) -> database::Result<i64> {
        let total = conversation::total_tokens(db.pool(), guild_id, channel_id).await?;
        Ok(self.ceiling - total)
    }
}
