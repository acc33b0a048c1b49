//! GetStatusHistoryHandler - audit trail annotated with actor profiles.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::domain::complaint::{ComplaintError, StatusEvent};
use crate::domain::foundation::{AuthenticatedUser, ComplaintId, UserId};
use crate::ports::{ComplaintRepository, PublicProfile, StatusEventStore, UserDirectory};

use super::get_complaint::ensure_can_view;

#[derive(Debug, Clone)]
pub struct GetStatusHistoryQuery {
    pub actor: AuthenticatedUser,
    pub complaint_id: ComplaintId,
}

/// One status event plus who made it, when known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub event: StatusEvent,
    pub actor: Option<PublicProfile>,
}

pub struct GetStatusHistoryHandler {
    complaints: Arc<dyn ComplaintRepository>,
    events: Arc<dyn StatusEventStore>,
    users: Arc<dyn UserDirectory>,
}

impl GetStatusHistoryHandler {
    pub fn new(
        complaints: Arc<dyn ComplaintRepository>,
        events: Arc<dyn StatusEventStore>,
        users: Arc<dyn UserDirectory>,
    ) -> Self {
        Self {
            complaints,
            events,
            users,
        }
    }

    /// Newest first.
    pub async fn handle(
        &self,
        query: GetStatusHistoryQuery,
    ) -> Result<Vec<HistoryEntry>, ComplaintError> {
        let complaint = self
            .complaints
            .find_by_id(&query.complaint_id)
            .await?
            .ok_or(ComplaintError::NotFound(query.complaint_id))?;
        ensure_can_view(&query.actor, &complaint)?;

        let events = self.events.history(&query.complaint_id).await?;

        let actor_ids: Vec<UserId> = events
            .iter()
            .filter_map(|e| e.actor_id().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let profiles: HashMap<UserId, PublicProfile> = self
            .users
            .find_profiles(&actor_ids)
            .await?
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect();

        Ok(events
            .into_iter()
            .map(|event| {
                let actor = event.actor_id().and_then(|id| profiles.get(id).cloned());
                HistoryEntry { event, actor }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryComplaintRepository, InMemoryStatusEventStore, InMemoryUserDirectory,
    };
    use crate::domain::complaint::{Complaint, ComplaintDraft, ErrorKind};
    use crate::domain::foundation::{Role, Timestamp};

    #[tokio::test]
    async fn history_is_annotated_newest_first() {
        let repo = Arc::new(InMemoryComplaintRepository::new());
        let events = Arc::new(InMemoryStatusEventStore::new());
        let users = Arc::new(InMemoryUserDirectory::new());
        let tech = UserId::new("tech-1").unwrap();
        users
            .insert(PublicProfile {
                id: tech.clone(),
                username: "budi".to_string(),
                display_name: Some("Budi Santoso".to_string()),
            })
            .await;

        let complaint = Complaint::file(
            ComplaintId::new(),
            UserId::new("cust-1").unwrap(),
            ComplaintDraft {
                title: "Dim lights".to_string(),
                category: "electric".to_string(),
                ..Default::default()
            },
            Timestamp::from_unix_secs(100),
        )
        .unwrap();
        repo.create(&complaint).await.unwrap();
        events
            .append(&StatusEvent::filed(*complaint.id(), Timestamp::from_unix_secs(100)))
            .await
            .unwrap();
        events
            .append(&StatusEvent::claimed(*complaint.id(), tech.clone(), Timestamp::from_unix_secs(200)))
            .await
            .unwrap();

        let handler = GetStatusHistoryHandler::new(repo, events, users);
        let owner = AuthenticatedUser::new(UserId::new("cust-1").unwrap(), "cust", None, Role::Customer);
        let history = handler
            .handle(GetStatusHistoryQuery {
                actor: owner,
                complaint_id: *complaint.id(),
            })
            .await
            .unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(
            history[0].actor.as_ref().and_then(|p| p.display_name.as_deref()),
            Some("Budi Santoso")
        );
        assert!(history[1].actor.is_none());

        let stranger = AuthenticatedUser::new(UserId::new("cust-9").unwrap(), "x", None, Role::Customer);
        let err = handler
            .handle(GetStatusHistoryQuery {
                actor: stranger,
                complaint_id: *complaint.id(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
    }
}
