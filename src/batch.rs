//! Outbound message construction for batch transfers

use crate::error::{Error, Result};
use crate::types::{CommentPayload, PaymentInstruction, SendMode, TransferEntry};

/// Maximum number of outbound messages a single transaction may carry
pub const MAX_MESSAGES_PER_TRANSACTION: usize = 254;

/// Reject batches the chain would refuse to carry in one transaction
pub fn ensure_batch_size(count: usize) -> Result<()> {
    if count > MAX_MESSAGES_PER_TRANSACTION {
        return Err(Error::BatchTooLarge {
            count,
            max: MAX_MESSAGES_PER_TRANSACTION,
        });
    }
    Ok(())
}

/// Build one non-bouncing message per entry, in entry order
///
/// Every message carries the same send mode and comment body; only the
/// destination and amount differ.
pub fn build_messages(
    entries: &[TransferEntry],
    mode: SendMode,
    comment: &CommentPayload,
) -> Result<Vec<PaymentInstruction>> {
    ensure_batch_size(entries.len())?;

    Ok(entries
        .iter()
        .map(|entry| PaymentInstruction {
            destination: entry.destination.as_str().to_string(),
            amount: entry.amount,
            mode,
            body: comment.clone(),
            bounce: false,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::parse_address;

    fn entries(count: usize) -> Vec<TransferEntry> {
        let destination =
            parse_address("UQABAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAZAm").unwrap();
        (0..count)
            .map(|i| TransferEntry {
                destination: destination.clone(),
                amount: (i as u64 + 1) * 1_000,
            })
            .collect()
    }

    #[test]
    fn test_messages_share_mode_and_comment() {
        let comment = CommentPayload("te6cckEBAQEACAAAEgAAAABoaQ==".to_string());
        let input = entries(3);
        let messages = build_messages(&input, SendMode(3), &comment).unwrap();

        assert_eq!(messages.len(), input.len());
        for (message, entry) in messages.iter().zip(&input) {
            assert_eq!(message.mode, SendMode(3));
            assert_eq!(message.body, comment);
            assert!(!message.bounce);
            assert_eq!(message.amount, entry.amount);
            assert_eq!(message.destination, entry.destination.as_str());
        }
    }

    #[test]
    fn test_batch_limit() {
        let comment = CommentPayload(String::new());
        assert_eq!(
            build_messages(&entries(MAX_MESSAGES_PER_TRANSACTION), SendMode(0), &comment)
                .unwrap()
                .len(),
            MAX_MESSAGES_PER_TRANSACTION
        );
        assert!(matches!(
            build_messages(&entries(255), SendMode(0), &comment),
            Err(Error::BatchTooLarge { count: 255, max: 254 })
        ));
    }

    #[test]
    fn test_empty_batch_builds_nothing() {
        let messages = build_messages(&[], SendMode(1), &CommentPayload(String::new())).unwrap();
        assert!(messages.is_empty());
    }
}
