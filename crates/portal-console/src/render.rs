//! Plain-text rendering of portal records

use std::fmt::Write;

use portal_core::entities::{Announcement, Channel, MaintenanceReport, Message, Session, Shift};
use portal_service::dto::{ReportCounts, WeekSchedule};

pub fn session(session: &Session) -> String {
    match &session.department {
        Some(department) => format!(
            "{} ({}) - {department} department, id {}",
            session.full_name, session.username, session.id
        ),
        None => format!("{} - id {}", session.full_name, session.id),
    }
}

pub fn shift(shift: &Shift) -> String {
    format!(
        "{}  {}  {} - {}  {}",
        shift.id,
        shift.date,
        shift.start_time.to_12h(),
        shift.end_time.to_12h(),
        shift.user_name
    )
}

pub fn shifts(shifts: &[Shift]) -> String {
    if shifts.is_empty() {
        return "No shifts scheduled".to_string();
    }
    lines(shifts.iter().map(shift))
}

pub fn week(week: &WeekSchedule) -> String {
    let mut out = String::new();
    for day in &week.days {
        let _ = writeln!(out, "{}", day.label);
        if day.shifts.is_empty() {
            let _ = writeln!(out, "  -");
        }
        for s in &day.shifts {
            let _ = writeln!(
                out,
                "  {} - {}  {}  ({})",
                s.start_time.to_12h(),
                s.end_time.to_12h(),
                s.user_name,
                s.id
            );
        }
    }
    let _ = write!(out, "{} shift(s) this week", week.total_shifts());
    out
}

pub fn channel(channel: &Channel) -> String {
    let mut line = format!("{}  {}", channel.id, channel.display_name());
    if let Some(description) = &channel.description {
        let _ = write!(line, "  {description}");
    }
    if !channel.is_open_to_all() {
        if let Some(department) = &channel.department {
            let _ = write!(line, "  [{department}]");
        }
    }
    line
}

pub fn message(message: &Message) -> String {
    let mut line = format!(
        "[{}] {}: {}",
        message.created_at.format("%Y-%m-%d %H:%M"),
        message.sender_name,
        message.message
    );
    if let Some(file_url) = &message.file_url {
        let _ = write!(line, " <{file_url}>");
    }
    if message.is_emergency {
        line.push_str(" [EMERGENCY]");
    }
    line
}

pub fn messages(messages: &[Message]) -> String {
    if messages.is_empty() {
        return "No messages yet".to_string();
    }
    lines(messages.iter().map(message))
}

pub fn report(report: &MaintenanceReport) -> String {
    format!(
        "{}  [{}]  {} ({}) - {}  by {}",
        report.id,
        report.status.label(),
        report.device,
        report.room,
        report.description,
        report.reported_by
    )
}

pub fn reports(reports: &[MaintenanceReport], counts: ReportCounts) -> String {
    let summary = format!(
        "{} open, {} in progress, {} resolved",
        counts.open, counts.in_progress, counts.resolved
    );
    if reports.is_empty() {
        return format!("No reports\n{summary}");
    }
    format!("{}\n{summary}", lines(reports.iter().map(report)))
}

pub fn announcement(announcement: &Announcement) -> String {
    format!(
        "{}  {} - {}\n  {}",
        announcement.created_at.format("%Y-%m-%d"),
        announcement.title,
        announcement.author_name,
        announcement.message
    )
}

pub fn announcements(announcements: &[Announcement]) -> String {
    if announcements.is_empty() {
        return "No announcements".to_string();
    }
    lines(announcements.iter().map(announcement))
}

fn lines(items: impl Iterator<Item = String>) -> String {
    items.collect::<Vec<_>>().join("\n")
}
