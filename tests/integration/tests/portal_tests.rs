//! Portal Integration Tests
//!
//! Exercise the services end to end over the memory and file backends.
//!
//! Run with: cargo test -p integration-tests --test portal_tests

use std::sync::Arc;

use chrono::{Datelike, Duration as Days, NaiveDate};
use parking_lot::Mutex;

use integration_tests::{fixtures::*, flush, memory_context, TestDataDir, TEST_PASSPHRASE};
use portal_common::AppError;
use portal_core::{parse_date, week_start, DomainError, FileContent, Message, RecordId};
use portal_realtime::Subscription;
use portal_service::dto::{PostAnnouncementRequest, SignInRequest};
use portal_service::{
    AlertKind, AnnouncementService, ChatService, NotificationCenter, ReportService, ServiceError,
    SessionService, ShiftService,
};

fn date(s: &str) -> NaiveDate {
    parse_date(s).unwrap()
}

// ============================================================================
// Session Tests
// ============================================================================

#[tokio::test]
async fn test_sign_in_and_out() {
    let ctx = memory_context().unwrap();
    let sessions = SessionService::new(&ctx);
    assert!(sessions.current_session().await.is_none());

    let err = sessions
        .sign_in(SignInRequest::new("Hala", "wrong"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::App(AppError::InvalidCredentials)));
    assert!(sessions.current_session().await.is_none());

    let session = sessions
        .sign_in(SignInRequest::new("Hala", TEST_PASSPHRASE))
        .await
        .unwrap();
    assert_eq!(sessions.current_session().await, Some(session));

    sessions.sign_out().await.unwrap();
    assert!(sessions.current_session().await.is_none());
    assert!(sessions.require_session().await.is_err());
}

// ============================================================================
// Shift Tests
// ============================================================================

#[tokio::test]
async fn test_valid_shift_ranges_are_stored() {
    let ctx = memory_context().unwrap();
    let shifts = ShiftService::new(&ctx);

    for (start, end) in [("00:00", "00:01"), ("09:00", "17:00"), ("18:00", "23:59")] {
        let shift = shifts
            .add_shift(shift("Aliya Samer", "2024-03-04", start, end))
            .await
            .unwrap();
        assert!(shift.start_time < shift.end_time);
    }
    assert_eq!(shifts.shifts_for_date(date("2024-03-04")).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_inverted_or_empty_range_changes_nothing() {
    let ctx = memory_context().unwrap();
    let shifts = ShiftService::new(&ctx);
    shifts
        .add_shift(shift("A", "2024-03-04", "08:00", "09:00"))
        .await
        .unwrap();

    for (start, end) in [("12:00", "12:00"), ("17:00", "09:00")] {
        let err = shifts
            .add_shift(shift("B", "2024-03-04", start, end))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Domain(DomainError::InvalidRange { .. })));
    }

    let stored = shifts.shifts_for_date(date("2024-03-04")).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].user_name, "A");
}

#[tokio::test]
async fn test_overlap_is_per_person_and_half_open() {
    let ctx = memory_context().unwrap();
    let shifts = ShiftService::new(&ctx);

    shifts
        .add_shift(shift("A", "2024-01-01", "09:00", "17:00"))
        .await
        .unwrap();

    let err = shifts
        .add_shift(shift("A", "2024-01-01", "16:00", "20:00"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Domain(DomainError::Overlap { .. })));

    shifts
        .add_shift(shift("A", "2024-01-01", "17:00", "20:00"))
        .await
        .unwrap();
    // Someone else may work the same hours
    shifts
        .add_shift(shift("B", "2024-01-01", "16:00", "20:00"))
        .await
        .unwrap();
    // And the same person on another day
    shifts
        .add_shift(shift("A", "2024-01-02", "16:00", "20:00"))
        .await
        .unwrap();

    let mine = shifts
        .shifts_for_user_on("A", date("2024-01-01"))
        .await
        .unwrap();
    assert_eq!(mine.len(), 2);
}

#[tokio::test]
async fn test_week_is_union_of_days_in_order() {
    let ctx = memory_context().unwrap();
    let shifts = ShiftService::new(&ctx);
    let monday = date("2024-01-01");

    // Reverse order, plus days just outside the week
    for offset in (-1..=7).rev() {
        let day = monday + Days::days(offset);
        shifts
            .add_shift(shift("A", &day.to_string(), "10:00", "11:00"))
            .await
            .unwrap();
    }

    let week = shifts.shifts_for_week(monday).await.unwrap();
    let dates: Vec<NaiveDate> = week.iter().map(|s| s.date).collect();
    let expected: Vec<NaiveDate> = (0..7).map(|o| monday + Days::days(o)).collect();
    assert_eq!(dates, expected);

    let mut union = Vec::new();
    for day in &expected {
        union.extend(shifts.shifts_for_date(*day).await.unwrap());
    }
    assert_eq!(week, union);
}

#[tokio::test]
async fn test_every_weekday_normalises_to_monday() {
    let ctx = memory_context().unwrap();
    let shifts = ShiftService::new(&ctx);
    let monday = date("2024-02-26");

    for offset in 0..7 {
        let day = monday + Days::days(offset);
        assert_eq!(week_start(day), monday);

        let schedule = shifts.week_schedule(day).await.unwrap();
        assert_eq!(schedule.week_start, monday);
        assert_eq!(schedule.days[0].date.weekday(), chrono::Weekday::Mon);
        // 2024 is a leap year
        assert_eq!(schedule.days[3].date, date("2024-02-29"));
        assert_eq!(schedule.days[6].date, date("2024-03-03"));
    }
}

// ============================================================================
// Chat Tests
// ============================================================================

#[tokio::test]
async fn test_channel_and_direct_messages_stay_apart() {
    let ctx = memory_context().unwrap();
    let chat = ChatService::new(&ctx);
    let (fatima, hala, aliya) = (fatima(), hala(), aliya());

    chat.send_message(&fatima, general("opening at 10")).await.unwrap();
    chat.send_message(&fatima, direct(&hala, "hi hala")).await.unwrap();
    chat.send_message(&hala, direct(&fatima, "hi fatima")).await.unwrap();
    chat.send_message(&aliya, direct(&fatima, "hi from aliya")).await.unwrap();

    let channel = chat.channel_messages(&RecordId::new("1")).await.unwrap();
    assert_eq!(channel.len(), 1);
    assert!(!channel[0].is_direct());

    let fh = chat.direct_messages(&fatima.id, &hala.id).await.unwrap();
    let hf = chat.direct_messages(&hala.id, &fatima.id).await.unwrap();
    assert_eq!(fh, hf);
    assert_eq!(
        fh.iter().map(|m| m.message.as_str()).collect::<Vec<_>>(),
        ["hi hala", "hi fatima"]
    );

    let ha = chat.direct_messages(&hala.id, &aliya.id).await.unwrap();
    assert!(ha.is_empty());
}

#[tokio::test]
async fn test_listener_fires_once_and_after_send() {
    let ctx = memory_context().unwrap();
    let chat = ChatService::new(&ctx);
    let seen: Arc<Mutex<Vec<Message>>> = Arc::new(Mutex::new(Vec::new()));
    let seen_in = Arc::clone(&seen);
    let _subscription = chat.add_listener(move |m| seen_in.lock().push(m.clone()));

    let sent = chat.send_message(&fatima(), general("hello")).await.unwrap();
    assert!(seen.lock().is_empty());

    flush(&ctx).await;
    flush(&ctx).await;
    assert_eq!(*seen.lock(), vec![sent]);
}

#[tokio::test]
async fn test_unsubscribe_only_affects_that_listener() {
    let ctx = memory_context().unwrap();
    let chat = ChatService::new(&ctx);
    let first = Arc::new(Mutex::new(0));
    let second = Arc::new(Mutex::new(0));

    let first_in = Arc::clone(&first);
    let first_sub: Subscription = chat.add_listener(move |_| *first_in.lock() += 1);
    let second_in = Arc::clone(&second);
    let _second_sub = chat.add_listener(move |_| *second_in.lock() += 1);

    chat.send_message(&fatima(), general("one")).await.unwrap();
    flush(&ctx).await;

    assert!(first_sub.unsubscribe());
    assert!(!first_sub.unsubscribe());

    chat.send_message(&fatima(), general("two")).await.unwrap();
    flush(&ctx).await;

    assert_eq!(*first.lock(), 1);
    assert_eq!(*second.lock(), 2);
}

#[tokio::test]
async fn test_panicking_listener_does_not_block_others() {
    let ctx = memory_context().unwrap();
    let chat = ChatService::new(&ctx);
    let count = Arc::new(Mutex::new(0));

    let _bad = chat.add_listener(|_| panic!("listener failure"));
    let count_in = Arc::clone(&count);
    let _good = chat.add_listener(move |_| *count_in.lock() += 1);

    chat.send_message(&fatima(), general("still delivered")).await.unwrap();
    flush(&ctx).await;
    assert_eq!(*count.lock(), 1);
}

#[tokio::test]
async fn test_file_round_trip_and_foreign_urls() {
    let ctx = memory_context().unwrap();
    let chat = ChatService::new(&ctx);
    let content = FileContent::new("text/plain", b"shift swap form".to_vec());

    let reference = chat.store_file(&content).await.unwrap();
    let message = chat
        .send_message(
            &fatima(),
            general("").with_file(reference.to_string(), "text/plain"),
        )
        .await
        .unwrap();

    let url = message.file_url.unwrap();
    assert_eq!(chat.get_file(&url).await.unwrap(), Some(content));
    assert_eq!(chat.get_file("https://example.com/form.txt").await.unwrap(), None);
    assert_eq!(chat.get_file_url("https://example.com/form.txt").await.unwrap(), None);
}

// ============================================================================
// Persistence Tests
// ============================================================================

#[tokio::test]
async fn test_reload_from_disk_is_identical() {
    let dir = TestDataDir::new();
    let content = FileContent::new("image/png", vec![1, 2, 3, 4]);

    let (shifts, messages, reports, announcements, reference, session) = {
        let ctx = dir.context().unwrap();
        let session = SessionService::new(&ctx)
            .sign_in(SignInRequest::new("Fatima Samer", TEST_PASSPHRASE))
            .await
            .unwrap();
        let shift_service = ShiftService::new(&ctx);
        shift_service
            .add_shift(shift("Fatima Samer", "2024-01-01", "09:00", "17:00"))
            .await
            .unwrap();
        shift_service
            .add_shift(shift("Hala Samer", "2024-01-03", "12:00", "20:00"))
            .await
            .unwrap();

        let chat = ChatService::new(&ctx);
        let reference = chat.store_file(&content).await.unwrap();
        chat.send_message(&fatima(), general("persisted")).await.unwrap();
        chat.send_message(&fatima(), direct(&hala(), "also persisted"))
            .await
            .unwrap();

        ReportService::new(&ctx)
            .submit(broken_claw(), "Fatima Samer")
            .await
            .unwrap();
        AnnouncementService::new(&ctx)
            .post(
                PostAnnouncementRequest::new("Holiday hours", "Open until midnight"),
                "Fatima Samer",
            )
            .await
            .unwrap();
        flush(&ctx).await;

        (
            ShiftService::new(&ctx)
                .shifts_for_week(date("2024-01-01"))
                .await
                .unwrap(),
            (
                ChatService::new(&ctx)
                    .channel_messages(&RecordId::new("1"))
                    .await
                    .unwrap(),
                ChatService::new(&ctx)
                    .direct_messages(&fatima().id, &hala().id)
                    .await
                    .unwrap(),
            ),
            ReportService::new(&ctx).list(None).await.unwrap(),
            AnnouncementService::new(&ctx).list().await.unwrap(),
            reference,
            session,
        )
    };

    let reopened = dir.context().unwrap();
    assert!(dir.path().exists());
    assert_eq!(
        ShiftService::new(&reopened)
            .shifts_for_week(date("2024-01-01"))
            .await
            .unwrap(),
        shifts
    );
    let chat = ChatService::new(&reopened);
    assert_eq!(chat.channel_messages(&RecordId::new("1")).await.unwrap(), messages.0);
    assert_eq!(
        chat.direct_messages(&hala().id, &fatima().id).await.unwrap(),
        messages.1
    );
    assert_eq!(reopened.message_repo().count().await.unwrap(), 2);
    assert_eq!(ReportService::new(&reopened).list(None).await.unwrap(), reports);
    assert_eq!(AnnouncementService::new(&reopened).list().await.unwrap(), announcements);
    assert_eq!(
        ChatService::new(&reopened)
            .get_file(&reference.to_string())
            .await
            .unwrap(),
        Some(content)
    );
    assert_eq!(
        SessionService::new(&reopened).current_session().await,
        Some(session)
    );
}

// ============================================================================
// Notification Tests
// ============================================================================

#[tokio::test]
async fn test_notification_bridge_end_to_end() {
    let ctx = memory_context().unwrap();
    let (fatima, hala) = (fatima(), hala());
    let center = NotificationCenter::attach(&ctx, &hala);
    let chat = ChatService::new(&ctx);

    let dm = chat.send_message(&fatima, direct(&hala, "can you open?")).await.unwrap();
    chat.send_message(&hala, direct(&fatima, "yes")).await.unwrap();
    chat.send_message(&fatima, general("SOS").emergency()).await.unwrap();
    ShiftService::new(&ctx)
        .add_shift(shift("Fatima Samer", "2024-01-03", "09:00", "12:00"))
        .await
        .unwrap();
    ReportService::new(&ctx)
        .submit(broken_claw(), "Fatima Samer")
        .await
        .unwrap();
    AnnouncementService::new(&ctx)
        .post(PostAnnouncementRequest::new("Staff meeting", "Friday 5pm"), "Fatima Samer")
        .await
        .unwrap();
    flush(&ctx).await;

    assert_eq!(center.unread_count(), 1);
    let direct_alerts = center.direct_alerts();
    assert_eq!(direct_alerts.len(), 1);
    assert_eq!(direct_alerts[0].message_id, dm.id);
    assert_eq!(direct_alerts[0].title, "New message from Fatima Samer");

    let kinds: Vec<AlertKind> = center.alerts().iter().map(|a| a.kind).collect();
    assert_eq!(
        kinds,
        [
            AlertKind::Announcement,
            AlertKind::Report,
            AlertKind::Shift,
            AlertKind::Emergency
        ]
    );
    assert_eq!(center.alerts()[2].body, "Fatima Samer added a shift for Wednesday");

    center.mark_as_read(Some(&dm.id));
    assert_eq!(center.unread_count(), 0);
    assert!(center.direct_alerts().is_empty());

    let registered = ctx.dispatcher().registry().len();
    drop(center);
    assert_eq!(ctx.dispatcher().registry().len(), registered - 1);
}

#[tokio::test]
async fn test_viewer_ignores_own_and_foreign_messages() {
    let ctx = memory_context().unwrap();
    let viewer = unique_staff();
    let center = NotificationCenter::attach(&ctx, &viewer);
    let chat = ChatService::new(&ctx);

    chat.send_message(&viewer, direct(&hala(), "from me")).await.unwrap();
    chat.send_message(&fatima(), direct(&hala(), "not for me")).await.unwrap();
    chat.send_message(&viewer, general("mine").emergency()).await.unwrap();
    flush(&ctx).await;

    assert_eq!(center.unread_count(), 0);
    assert!(center.direct_alerts().is_empty());
    assert!(center.alerts().is_empty());
}

#[tokio::test]
async fn test_serialized_message_shape() {
    let ctx = memory_context().unwrap();
    let chat = ChatService::new(&ctx);
    let message = chat.send_message(&fatima(), direct(&hala(), "hey")).await.unwrap();

    let json = serde_json::to_value(&message).unwrap();
    assert_eq!(json["recipient_id"], "2");
    assert_eq!(json["sender_name"], "Fatima Samer");
    assert!(json.get("channel_id").is_none());
}

#[tokio::test]
async fn test_draft_with_two_targets_is_refused() {
    let ctx = memory_context().unwrap();
    let raw = r#"{"message":"hi","channel_id":"1","recipient_id":"3"}"#;

    let parsed = serde_json::from_str::<portal_service::dto::SendMessageRequest>(raw);
    assert!(parsed.is_err());

    let chat = ChatService::new(&ctx);
    assert!(chat.channel_messages(&RecordId::new("1")).await.unwrap().is_empty());
    assert_eq!(ctx.message_repo().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_blank_shift_name_is_refused() {
    let ctx = memory_context().unwrap();
    let shifts = ShiftService::new(&ctx);

    let err = shifts
        .add_shift(shift("   ", "2024-01-01", "09:00", "10:00"))
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert!(shifts.shifts_for_date(date("2024-01-01")).await.unwrap().is_empty());
}
