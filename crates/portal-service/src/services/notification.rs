//! Notification bridge
//!
//! Turns portal events into alerts for one signed-in viewer: an unread
//! counter with previews of direct messages, plus an activity feed of
//! emergencies, announcements, new shifts and maintenance reports.
//! Both lists are newest first. Dropping the center unsubscribes it.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use portal_core::entities::{Message, Session};
use portal_core::{day_of_week, PortalEvent, RecordId, DAY_NAMES};
use portal_realtime::Subscription;

use super::context::ServiceContext;

/// Characters of message text shown in a direct-message preview
pub const PREVIEW_CHARS: usize = 50;

// ============================================================================
// Alerts
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Emergency,
    Announcement,
    Shift,
    Report,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertPriority {
    Info,
    High,
}

/// Activity feed entry
#[derive(Debug, Clone, Serialize)]
pub struct Alert {
    pub id: Uuid,
    pub kind: AlertKind,
    pub title: String,
    pub body: String,
    /// Record the alert is about
    pub source_id: RecordId,
    pub created_at: DateTime<Utc>,
}

impl Alert {
    fn new(kind: AlertKind, title: &str, body: String, source_id: RecordId) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            title: title.to_string(),
            body,
            source_id,
            created_at: Utc::now(),
        }
    }

    pub fn priority(&self) -> AlertPriority {
        match self.kind {
            AlertKind::Emergency => AlertPriority::High,
            _ => AlertPriority::Info,
        }
    }
}

/// Unread direct message addressed to the viewer
#[derive(Debug, Clone, Serialize)]
pub struct DirectMessageAlert {
    pub message_id: RecordId,
    pub sender_id: RecordId,
    pub sender_name: String,
    pub title: String,
    pub preview: String,
    pub received_at: DateTime<Utc>,
}

impl DirectMessageAlert {
    fn from_message(message: &Message) -> Self {
        Self {
            message_id: message.id.clone(),
            sender_id: message.sender_id.clone(),
            sender_name: message.sender_name.clone(),
            title: format!("New message from {}", message.sender_name),
            preview: message.preview(PREVIEW_CHARS),
            received_at: message.created_at,
        }
    }
}

// ============================================================================
// State
// ============================================================================

#[derive(Debug, Default)]
struct NotificationState {
    unread: usize,
    direct: Vec<DirectMessageAlert>,
    alerts: Vec<Alert>,
}

impl NotificationState {
    fn apply(&mut self, viewer: &RecordId, event: &PortalEvent) {
        match event {
            PortalEvent::MessageSent(message) => {
                if message.sender_id == *viewer {
                    return;
                }
                if message.recipient_id() == Some(viewer) {
                    self.unread += 1;
                    self.direct
                        .insert(0, DirectMessageAlert::from_message(message));
                }
                if message.is_emergency {
                    self.push(Alert::new(
                        AlertKind::Emergency,
                        "Emergency Alert",
                        format!("{}: {}", message.sender_name, message.message),
                        message.id.clone(),
                    ));
                }
            }
            PortalEvent::ShiftAdded(shift) => {
                let day = DAY_NAMES[usize::from(day_of_week(shift.date) - 1)];
                self.push(Alert::new(
                    AlertKind::Shift,
                    "New Shift Added",
                    format!("{} added a shift for {day}", shift.user_name),
                    shift.id.clone(),
                ));
            }
            PortalEvent::AnnouncementPosted(announcement) => {
                self.push(Alert::new(
                    AlertKind::Announcement,
                    "New Announcement",
                    format!("{}: {}", announcement.author_name, announcement.title),
                    announcement.id.clone(),
                ));
            }
            PortalEvent::ReportSubmitted(report) => {
                self.push(Alert::new(
                    AlertKind::Report,
                    "New Maintenance Report",
                    format!(
                        "{} in {}: {}",
                        report.device, report.room, report.reported_by
                    ),
                    report.id.clone(),
                ));
            }
            PortalEvent::ShiftDeleted { .. } | PortalEvent::ReportStatusChanged { .. } => {}
        }
    }

    fn push(&mut self, alert: Alert) {
        self.alerts.insert(0, alert);
    }
}

// ============================================================================
// Notification Center
// ============================================================================

/// Alerts for one viewer, live while this value is alive
pub struct NotificationCenter {
    viewer_id: RecordId,
    state: Arc<Mutex<NotificationState>>,
    subscription: Subscription,
}

impl NotificationCenter {
    /// Start collecting alerts for `viewer`
    pub fn attach(ctx: &ServiceContext, viewer: &Session) -> Self {
        let state = Arc::new(Mutex::new(NotificationState::default()));
        let viewer_id = viewer.id.clone();

        let listener_state = Arc::clone(&state);
        let listener_viewer = viewer_id.clone();
        let subscription = ctx.subscribe(move |event| {
            listener_state.lock().apply(&listener_viewer, event);
        });

        debug!(viewer_id = %viewer_id, "Notification center attached");
        Self {
            viewer_id,
            state,
            subscription,
        }
    }

    pub fn viewer_id(&self) -> &RecordId {
        &self.viewer_id
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_active()
    }

    /// Direct messages not yet marked as read
    pub fn unread_count(&self) -> usize {
        self.state.lock().unread
    }

    pub fn direct_alerts(&self) -> Vec<DirectMessageAlert> {
        self.state.lock().direct.clone()
    }

    pub fn alerts(&self) -> Vec<Alert> {
        self.state.lock().alerts.clone()
    }

    /// `Some(id)` drops that direct-message alert and counts one message as
    /// read; `None` marks everything read
    pub fn mark_as_read(&self, message_id: Option<&RecordId>) {
        let mut state = self.state.lock();
        match message_id {
            Some(id) => {
                state.direct.retain(|alert| alert.message_id != *id);
                state.unread = state.unread.saturating_sub(1);
            }
            None => {
                state.direct.clear();
                state.unread = 0;
            }
        }
    }

    /// Dismiss one activity alert
    pub fn acknowledge(&self, alert_id: Uuid) -> bool {
        let mut state = self.state.lock();
        let before = state.alerts.len();
        state.alerts.retain(|alert| alert.id != alert_id);
        state.alerts.len() != before
    }

    /// Drop every alert and reset the unread counter
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.unread = 0;
        state.direct.clear();
        state.alerts.clear();
    }
}

impl std::fmt::Debug for NotificationCenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationCenter")
            .field("viewer_id", &self.viewer_id)
            .field("unread", &self.unread_count())
            .field("attached", &self.is_attached())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::{
        AddShiftRequest, PostAnnouncementRequest, SendMessageRequest, SubmitReportRequest,
    };
    use crate::services::{
        AnnouncementService, ChatService, ReportService, SharedPassphrase, ShiftService,
    };
    use portal_store::{KeyValueStore, MemoryStore};
    use std::time::Duration;

    fn context() -> ServiceContext {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        ServiceContext::local(
            store,
            Arc::new(SharedPassphrase::new("x")),
            Duration::from_millis(5),
        )
        .unwrap()
    }

    fn staff(id: &str, name: &str) -> Session {
        Session::new(id, name, name, None)
    }

    #[tokio::test]
    async fn test_direct_message_to_viewer() {
        let ctx = context();
        let viewer = staff("1", "Fatima Samer");
        let hala = staff("2", "Hala Samer");
        let center = NotificationCenter::attach(&ctx, &viewer);
        let chat = ChatService::new(&ctx);

        let long = "x".repeat(60);
        chat.send_message(&hala, SendMessageRequest::to_user("1", long.as_str()))
            .await
            .unwrap();
        // Self-sent and third-party messages do not count
        chat.send_message(&viewer, SendMessageRequest::to_user("2", "reply"))
            .await
            .unwrap();
        chat.send_message(&hala, SendMessageRequest::to_user("3", "not for you"))
            .await
            .unwrap();
        chat.send_message(&hala, SendMessageRequest::to_channel("1", "channel"))
            .await
            .unwrap();
        ctx.flush_events().await;

        assert_eq!(center.unread_count(), 1);
        let direct = center.direct_alerts();
        assert_eq!(direct.len(), 1);
        assert_eq!(direct[0].title, "New message from Hala Samer");
        assert_eq!(
            direct[0].preview,
            format!("{}...", "x".repeat(PREVIEW_CHARS))
        );
        assert!(center.alerts().is_empty());
    }

    #[tokio::test]
    async fn test_emergency_is_high_priority() {
        let ctx = context();
        let viewer = staff("1", "Fatima Samer");
        let center = NotificationCenter::attach(&ctx, &viewer);
        let chat = ChatService::new(&ctx);

        chat.send_message(
            &staff("2", "Hala Samer"),
            SendMessageRequest::to_channel("4", "Smoke in Room B").emergency(),
        )
        .await
        .unwrap();
        chat.send_message(
            &viewer,
            SendMessageRequest::to_channel("4", "On my way").emergency(),
        )
        .await
        .unwrap();
        ctx.flush_events().await;

        let alerts = center.alerts();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, AlertKind::Emergency);
        assert_eq!(alerts[0].priority(), AlertPriority::High);
        assert_eq!(alerts[0].body, "Hala Samer: Smoke in Room B");
        assert_eq!(center.unread_count(), 0);
    }

    #[tokio::test]
    async fn test_board_events_are_informational_newest_first() {
        let ctx = context();
        let center = NotificationCenter::attach(&ctx, &staff("1", "Fatima Samer"));

        ShiftService::new(&ctx)
            .add_shift(AddShiftRequest::new(
                "Aliya Haidar",
                "2024-01-07",
                "12:00",
                "18:00",
            ))
            .await
            .unwrap();
        AnnouncementService::new(&ctx)
            .post(
                PostAnnouncementRequest::new("Team lunch", "Friday 1pm"),
                "Hala Samer",
            )
            .await
            .unwrap();
        ReportService::new(&ctx)
            .submit(
                SubmitReportRequest::new("VR Headset 2", "Room A", "No tracking"),
                "Aliya Haidar",
            )
            .await
            .unwrap();
        ctx.flush_events().await;

        let alerts = center.alerts();
        let kinds: Vec<AlertKind> = alerts.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            [AlertKind::Report, AlertKind::Announcement, AlertKind::Shift]
        );
        assert!(alerts.iter().all(|a| a.priority() == AlertPriority::Info));
        assert_eq!(alerts[1].body, "Hala Samer: Team lunch");
        assert_eq!(alerts[2].body, "Aliya Haidar added a shift for Sunday");
    }

    #[tokio::test]
    async fn test_mark_as_read_acknowledge_clear() {
        let ctx = context();
        let viewer = staff("1", "Fatima Samer");
        let center = NotificationCenter::attach(&ctx, &viewer);
        let chat = ChatService::new(&ctx);
        let hala = staff("2", "Hala Samer");

        let first = chat
            .send_message(&hala, SendMessageRequest::to_user("1", "one").emergency())
            .await
            .unwrap();
        chat.send_message(&hala, SendMessageRequest::to_user("1", "two"))
            .await
            .unwrap();
        ctx.flush_events().await;
        assert_eq!(center.unread_count(), 2);

        center.mark_as_read(Some(&first.id));
        assert_eq!(center.unread_count(), 1);
        assert_eq!(center.direct_alerts().len(), 1);

        center.mark_as_read(None);
        center.mark_as_read(Some(&first.id));
        assert_eq!(center.unread_count(), 0);

        let alert_id = center.alerts()[0].id;
        assert!(center.acknowledge(alert_id));
        assert!(!center.acknowledge(alert_id));

        chat.send_message(&hala, SendMessageRequest::to_user("1", "three"))
            .await
            .unwrap();
        ctx.flush_events().await;
        center.clear();
        assert_eq!(center.unread_count(), 0);
        assert!(center.direct_alerts().is_empty());
        assert!(center.alerts().is_empty());
    }

    #[tokio::test]
    async fn test_drop_unsubscribes() {
        let ctx = context();
        let center = NotificationCenter::attach(&ctx, &staff("1", "Fatima Samer"));
        assert!(center.is_attached());
        assert_eq!(ctx.dispatcher().registry().len(), 1);

        drop(center);
        assert!(ctx.dispatcher().registry().is_empty());
    }
}
