use crate::core::pricing;
use crate::domain::model::{CartLine, MemberId, TransactionRecord};
use crate::domain::ports::TransactionSink;
use crate::utils::error::{PosError, Result};
use chrono::Utc;

/// Unsaved record for `lines`, dated now. `total` is the pre-discount cart total.
pub fn draft_transaction(
    lines: &[CartLine],
    is_member: bool,
    member_id: Option<MemberId>,
) -> TransactionRecord {
    TransactionRecord {
        id: None,
        date: Utc::now(),
        items: lines.to_vec(),
        is_member,
        member_id: if is_member {
            member_id.map(|id| id.as_str().to_string())
        } else {
            None
        },
        total: pricing::cart_total(lines),
    }
}

/// Hands the cart snapshot to the backend and returns what it stored.
///
/// No retries and no local fallback: any collaborator failure, or a response
/// without an identifier, is reported as `SubmissionFailed`.
pub async fn submit<S>(
    sink: &S,
    lines: &[CartLine],
    is_member: bool,
    member_id: Option<MemberId>,
) -> Result<TransactionRecord>
where
    S: TransactionSink + ?Sized,
{
    let draft = draft_transaction(lines, is_member, member_id);
    tracing::debug!(
        "Submitting transaction: {} lines, total {}, member: {}",
        draft.items.len(),
        draft.total,
        draft.is_member
    );

    let stored = sink.create_transaction(&draft).await.map_err(|e| match e {
        PosError::SubmissionFailed { .. } => e,
        other => PosError::SubmissionFailed {
            message: other.to_string(),
        },
    })?;

    if stored.id.as_deref().map_or(true, str::is_empty) {
        return Err(PosError::SubmissionFailed {
            message: "backend response did not include a transaction id".to_string(),
        });
    }

    Ok(stored)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ItemType, MenuItem};
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct RecordingSink {
        received: Arc<Mutex<Vec<TransactionRecord>>>,
        assign_id: Option<String>,
        fail: bool,
    }

    #[async_trait]
    impl TransactionSink for RecordingSink {
        async fn create_transaction(
            &self,
            transaction: &TransactionRecord,
        ) -> Result<TransactionRecord> {
            self.received.lock().await.push(transaction.clone());
            if self.fail {
                return Err(PosError::IoError(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "backend down",
                )));
            }
            Ok(TransactionRecord {
                id: self.assign_id.clone(),
                ..transaction.clone()
            })
        }
    }

    fn lines() -> Vec<CartLine> {
        vec![CartLine {
            item: MenuItem {
                id: "brewed".to_string(),
                code: "D-003".to_string(),
                name: "Brewed Coffee".to_string(),
                base_price: dec!(95),
                category: "Coffee".to_string(),
                item_type: ItemType::Drink,
                sizes: vec![],
                customizations: vec![],
            },
            quantity: 2,
            selected_size: None,
            selected_customizations: vec![],
        }]
    }

    #[test]
    fn test_draft_uses_pre_discount_total() {
        let member = MemberId::parse("AB12E").unwrap();
        let draft = draft_transaction(&lines(), true, Some(member));

        assert!(draft.id.is_none());
        assert_eq!(draft.total, dec!(190));
        assert_eq!(draft.member_id.as_deref(), Some("AB12E"));
    }

    #[test]
    fn test_draft_drops_member_id_for_guests() {
        let member = MemberId::parse("AB12E").unwrap();
        let draft = draft_transaction(&lines(), false, Some(member));
        assert!(draft.member_id.is_none());
    }

    #[tokio::test]
    async fn test_submit_returns_backend_record() {
        let sink = RecordingSink {
            assign_id: Some("TX-42".to_string()),
            ..Default::default()
        };

        let stored = submit(&sink, &lines(), false, None).await.unwrap();

        assert_eq!(stored.id.as_deref(), Some("TX-42"));
        assert_eq!(stored.total, dec!(190));
        assert_eq!(sink.received.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_submit_failure_is_submission_failed() {
        let sink = RecordingSink {
            fail: true,
            ..Default::default()
        };

        let err = submit(&sink, &lines(), false, None).await.unwrap_err();
        assert!(matches!(err, PosError::SubmissionFailed { .. }));
        assert!(err.to_string().contains("backend down"));
    }

    #[tokio::test]
    async fn test_submit_requires_assigned_id() {
        let sink = RecordingSink::default();

        let err = submit(&sink, &lines(), false, None).await.unwrap_err();
        assert!(matches!(err, PosError::SubmissionFailed { .. }));
    }
}
