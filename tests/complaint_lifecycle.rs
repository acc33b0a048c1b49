//! Integration tests for the complaint lifecycle.
//!
//! These run the application handlers against the in-memory adapters with a
//! manual clock, the same wiring the HTTP layer uses:
//! 1. Filing, claiming, working and closing a complaint
//! 2. Concurrent claims on one complaint
//! 3. The duplicate-submission window
//! 4. Ownership and role checks
//! 5. Dashboard counts

use std::sync::Arc;

use complaint_desk::adapters::clock::ManualClock;
use complaint_desk::adapters::http::ComplaintAppState;
use complaint_desk::adapters::memory::{
    InMemoryComplaintRepository, InMemoryStatusEventStore, InMemoryUserDirectory,
};
use complaint_desk::application::{
    ClaimComplaintCommand, FileComplaintCommand, GetStatusHistoryQuery,
    GetTechnicianDashboardQuery, ListComplaintsQuery, ListScope, PageLimits,
    TransitionStatusCommand,
};
use complaint_desk::domain::complaint::{
    ComplaintDraft, ComplaintError, ComplaintStatus, DashboardCounts, DuplicateRule, ErrorKind,
    CLAIM_REASON, FILED_REASON,
};
use complaint_desk::domain::foundation::{AuthenticatedUser, ComplaintId, Role, Timestamp, UserId};
use complaint_desk::ports::{ComplaintRepository, PublicProfile, StatusEventStore};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Desk {
    state: ComplaintAppState,
    repo: Arc<InMemoryComplaintRepository>,
    events: Arc<InMemoryStatusEventStore>,
    users: Arc<InMemoryUserDirectory>,
    clock: Arc<ManualClock>,
}

fn desk() -> Desk {
    let repo = Arc::new(InMemoryComplaintRepository::new());
    let events = Arc::new(InMemoryStatusEventStore::new());
    let users = Arc::new(InMemoryUserDirectory::new());
    let clock = Arc::new(ManualClock::new(Timestamp::from_unix_secs(1_760_000_000)));
    let state = ComplaintAppState {
        complaints: repo.clone(),
        events: events.clone(),
        users: users.clone(),
        clock: clock.clone(),
        duplicate_rule: DuplicateRule::default(),
        page_limits: PageLimits::default(),
    };
    Desk {
        state,
        repo,
        events,
        users,
        clock,
    }
}

fn user(id: &str, role: Role) -> AuthenticatedUser {
    AuthenticatedUser::new(UserId::new(id).unwrap(), id, None, role)
}

fn customer() -> AuthenticatedUser {
    user("cust-1", Role::Customer)
}

fn tech(id: &str) -> AuthenticatedUser {
    user(id, Role::Technician)
}

impl Desk {
    async fn file(&self, title: &str) -> ComplaintId {
        let complaint = self
            .state
            .file_handler()
            .handle(FileComplaintCommand {
                actor: customer(),
                draft: ComplaintDraft {
                    title: title.to_string(),
                    category: "internet".to_string(),
                    ..Default::default()
                },
            })
            .await
            .unwrap();
        self.clock.advance_secs(1);
        *complaint.id()
    }

    async fn claim(&self, actor: AuthenticatedUser, id: ComplaintId) -> Result<(), ComplaintError> {
        let result = self
            .state
            .claim_handler()
            .handle(ClaimComplaintCommand {
                actor,
                complaint_id: id,
            })
            .await
            .map(|_| ());
        self.clock.advance_secs(1);
        result
    }

    async fn transition(
        &self,
        actor: AuthenticatedUser,
        id: ComplaintId,
        status: &str,
        reason: Option<&str>,
        notes: Option<&str>,
    ) -> Result<ComplaintStatus, ComplaintError> {
        self.state
            .transition_handler()
            .handle(TransitionStatusCommand {
                actor,
                complaint_id: id,
                status: status.to_string(),
                reason: reason.map(str::to_string),
                resolution_notes: notes.map(str::to_string),
            })
            .await
            .map(|result| result.complaint.status())
    }
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn complaint_moves_from_pool_to_resolution() {
    let desk = desk();
    let budi = tech("tech-budi");
    desk.users
        .insert(PublicProfile {
            id: budi.id.clone(),
            username: "budi".to_string(),
            display_name: Some("Budi Santoso".to_string()),
        })
        .await;

    let id = desk.file("No internet since Monday").await;
    desk.claim(budi.clone(), id).await.unwrap();
    desk.clock.advance_secs(10);
    assert_eq!(
        desk.transition(budi.clone(), id, "pending", Some("waiting for modem"), None)
            .await
            .unwrap(),
        ComplaintStatus::Pending
    );
    desk.clock.advance_secs(10);
    assert_eq!(
        desk.transition(budi.clone(), id, "completed", None, Some("Replaced the modem"))
            .await
            .unwrap(),
        ComplaintStatus::Completed
    );

    let stored = desk.repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(stored.assignee_id(), Some(&budi.id));
    assert_eq!(stored.resolution_notes(), Some("Replaced the modem"));
    assert!(stored.invariants_hold());

    let history = desk
        .state
        .history_handler()
        .handle(GetStatusHistoryQuery {
            actor: customer(),
            complaint_id: id,
        })
        .await
        .unwrap();
    let statuses: Vec<_> = history.iter().map(|e| e.event.status()).collect();
    assert_eq!(
        statuses,
        vec![
            ComplaintStatus::Completed,
            ComplaintStatus::Pending,
            ComplaintStatus::Assigned,
            ComplaintStatus::Filed,
        ]
    );
    assert_eq!(history[0].event.reason(), "status changed to completed");
    assert_eq!(history[2].event.reason(), CLAIM_REASON);
    assert_eq!(history[3].event.reason(), FILED_REASON);
    assert!(history[3].actor.is_none());
    assert_eq!(
        history[0].actor.as_ref().map(|p| p.username.as_str()),
        Some("budi")
    );
}

#[tokio::test]
async fn resolved_complaint_is_frozen() {
    let desk = desk();
    let budi = tech("tech-budi");
    let id = desk.file("Slow connection").await;
    desk.claim(budi.clone(), id).await.unwrap();
    desk.transition(budi.clone(), id, "completed", None, Some("Cable replaced"))
        .await
        .unwrap();

    desk.clock.advance_secs(600);
    for target in ["assigned", "pending", "completed", "rejected"] {
        let err = desk
            .transition(budi.clone(), id, target, Some("reopen"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ComplaintError::Finalized), "{target}: {err:?}");
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    let admin = user("admin-1", Role::Admin);
    let err = desk
        .transition(admin, id, "rejected", None, None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[tokio::test]
async fn rejected_complaint_accepts_nothing() {
    let desk = desk();
    let budi = tech("tech-budi");
    let id = desk.file("Wrong bill").await;
    desk.claim(budi.clone(), id).await.unwrap();
    desk.transition(budi.clone(), id, "rejected", Some("not a service issue"), None)
        .await
        .unwrap();

    desk.clock.advance_secs(600);
    let err = desk
        .transition(budi, id, "pending", None, None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ComplaintError::TransitionNotAllowed {
            from: ComplaintStatus::Rejected,
            to: ComplaintStatus::Pending
        }
    ));
}

// =============================================================================
// Claim race
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_claims_produce_exactly_one_owner() {
    let desk = desk();
    let id = desk.file("Router keeps rebooting").await;
    let handler = Arc::new(desk.state.claim_handler());

    let mut tasks = Vec::new();
    for n in 0..12 {
        let handler = handler.clone();
        tasks.push(tokio::spawn(async move {
            handler
                .handle(ClaimComplaintCommand {
                    actor: tech(&format!("tech-{n}")),
                    complaint_id: id,
                })
                .await
        }));
    }

    let mut winners = Vec::new();
    for task in tasks {
        match task.await.unwrap() {
            Ok(complaint) => winners.push(complaint),
            Err(err) => {
                assert!(
                    matches!(
                        err,
                        ComplaintError::AlreadyClaimed | ComplaintError::AlreadyInProgress
                    ),
                    "unexpected loser error: {err:?}"
                );
                assert_eq!(err.kind(), ErrorKind::Conflict);
            }
        }
    }

    assert_eq!(winners.len(), 1);
    let stored = desk.repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(stored.status(), ComplaintStatus::Assigned);
    assert_eq!(stored.assignee_id(), winners[0].assignee_id());

    let claims = desk
        .state
        .events
        .history(&id)
        .await
        .unwrap()
        .into_iter()
        .filter(|e| e.status() == ComplaintStatus::Assigned)
        .count();
    assert_eq!(claims, 1);
}

// =============================================================================
// Duplicate window
// =============================================================================

#[tokio::test]
async fn repeated_update_is_rejected_until_window_passes() {
    let desk = desk();
    let budi = tech("tech-budi");
    let id = desk.file("Intermittent drops").await;
    desk.claim(budi.clone(), id).await.unwrap();

    desk.transition(budi.clone(), id, "pending", Some("waiting for parts"), None)
        .await
        .unwrap();

    desk.clock.advance_secs(60);
    let err = desk
        .transition(budi.clone(), id, "pending", Some("waiting for parts"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, ComplaintError::DuplicateSubmission));

    desk.clock.advance_secs(61);
    desk.transition(budi.clone(), id, "pending", Some("waiting for parts"), None)
        .await
        .unwrap();
}

#[tokio::test]
async fn duplicate_check_is_per_actor() {
    let desk = desk();
    let budi = tech("tech-budi");
    let id = desk.file("No dial tone").await;
    desk.claim(budi.clone(), id).await.unwrap();
    desk.transition(budi.clone(), id, "pending", None, None)
        .await
        .unwrap();

    let admin = user("admin-1", Role::Admin);
    desk.transition(admin, id, "pending", None, None)
        .await
        .unwrap();
}

// =============================================================================
// Access rules
// =============================================================================

#[tokio::test]
async fn other_technician_cannot_touch_a_claimed_complaint() {
    let desk = desk();
    let id = desk.file("Fiber cut").await;
    desk.claim(tech("tech-budi"), id).await.unwrap();

    let err = desk
        .transition(tech("tech-sari"), id, "pending", None, None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);

    let stored = desk.repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(stored.status(), ComplaintStatus::Assigned);
    assert_eq!(stored.assignee_id().map(|u| u.as_str()), Some("tech-budi"));
}

#[tokio::test]
async fn customers_cannot_change_status() {
    let desk = desk();
    let id = desk.file("Billing question").await;
    let err = desk
        .transition(customer(), id, "completed", None, None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);
}

#[tokio::test]
async fn unknown_status_is_invalid() {
    let desk = desk();
    let budi = tech("tech-budi");
    let id = desk.file("Noise on line").await;
    desk.claim(budi.clone(), id).await.unwrap();

    let err = desk
        .transition(budi, id, "closed", None, None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidStatus);
}

#[tokio::test]
async fn audit_failure_does_not_fail_the_transition() {
    let desk = desk();
    let budi = tech("tech-budi");
    let id = desk.file("TV channels missing").await;
    desk.claim(budi.clone(), id).await.unwrap();

    desk.events.fail_appends(true);
    let status = desk
        .transition(budi, id, "pending", Some("waiting on vendor"), None)
        .await
        .unwrap();
    assert_eq!(status, ComplaintStatus::Pending);

    let stored = desk.repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(stored.status(), ComplaintStatus::Pending);
}

// =============================================================================
// Dashboard and queues
// =============================================================================

#[tokio::test]
async fn dashboard_counts_pool_and_own_work() {
    let desk = desk();
    let budi = tech("tech-budi");

    let mut ids = Vec::new();
    for n in 0..8 {
        ids.push(desk.file(&format!("Complaint {n}")).await);
    }
    for id in &ids[..3] {
        desk.claim(budi.clone(), *id).await.unwrap();
    }
    desk.transition(budi.clone(), ids[0], "completed", None, Some("Fixed on site"))
        .await
        .unwrap();

    // another technician's work stays out of the counts
    let extra = desk.file("Someone else's").await;
    desk.claim(tech("tech-sari"), extra).await.unwrap();

    let counts = desk
        .state
        .dashboard_handler()
        .handle(GetTechnicianDashboardQuery { actor: budi.clone() })
        .await
        .unwrap();
    assert_eq!(counts, DashboardCounts::new(5, 2, 1, 0));
    assert_eq!(counts.total_assigned, 3);

    let queue = desk
        .state
        .list_handler()
        .handle(ListComplaintsQuery::new(budi, ListScope::Assigned).with_status("assigned"))
        .await
        .unwrap();
    assert_eq!(queue.total, 2);
    assert!(queue
        .items
        .iter()
        .all(|c| c.status() == ComplaintStatus::Assigned));
}

#[tokio::test]
async fn pool_listing_is_newest_first_and_paginated() {
    let desk = desk();
    let mut ids = Vec::new();
    for n in 0..5 {
        ids.push(desk.file(&format!("Complaint {n}")).await);
    }

    let page = desk
        .state
        .list_handler()
        .handle(ListComplaintsQuery::new(tech("tech-budi"), ListScope::Ready).page(1, 2))
        .await
        .unwrap();
    assert_eq!(page.total, 5);
    assert_eq!(page.total_pages(), 3);
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].id(), &ids[4]);
    assert_eq!(page.items[1].id(), &ids[3]);

    let last = desk
        .state
        .list_handler()
        .handle(ListComplaintsQuery::new(tech("tech-budi"), ListScope::Ready).page(3, 2))
        .await
        .unwrap();
    assert_eq!(last.items.len(), 1);
    assert_eq!(last.items[0].id(), &ids[0]);
}
