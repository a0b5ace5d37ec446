//! Command execution
//!
//! Each command runs against a [`ServiceContext`] and yields an [`Output`]
//! holding both a plain-text and a JSON rendering of its result.

use chrono::Local;
use serde::Serialize;
use std::path::Path;
use tracing::info;

use portal_common::{AppError, AppResult};
use portal_core::entities::{FileContent, Session};
use portal_core::{parse_date, RecordId};
use portal_service::dto::{
    AddShiftRequest, PostAnnouncementRequest, SendMessageRequest, SignInRequest,
    SubmitReportRequest,
};
use portal_service::{
    AnnouncementService, ChatService, ReportService, ServiceContext, SessionService, ShiftService,
};

use crate::cli::{AnnounceCommand, ChatCommand, Command, MessageBody, ReportCommand, ShiftCommand};
use crate::render;

/// Result of one command
#[derive(Debug)]
pub struct Output {
    text: String,
    json: serde_json::Value,
}

impl Output {
    fn new(text: impl Into<String>, value: &impl Serialize) -> AppResult<Self> {
        Ok(Self {
            text: text.into(),
            json: serde_json::to_value(value).map_err(AppError::internal)?,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn json(&self) -> &serde_json::Value {
        &self.json
    }
}

/// Run one command
pub async fn execute(ctx: &ServiceContext, command: Command) -> AppResult<Output> {
    match command {
        Command::Login {
            identifier,
            password,
        } => {
            let session = SessionService::new(ctx)
                .sign_in(SignInRequest::new(identifier, password))
                .await?;
            Output::new(
                format!("Welcome back, {}!", session.first_name()),
                &session,
            )
        }
        Command::Logout => {
            SessionService::new(ctx).sign_out().await?;
            Output::new("Signed out", &serde_json::json!({ "signed_out": true }))
        }
        Command::Whoami => {
            let session = SessionService::new(ctx).require_session().await?;
            Output::new(render::session(&session), &session)
        }
        Command::Shifts(command) => {
            let session = SessionService::new(ctx).require_session().await?;
            shifts(ctx, &session, command).await
        }
        Command::Chat(command) => {
            let session = SessionService::new(ctx).require_session().await?;
            chat(ctx, &session, command).await
        }
        Command::Reports(command) => {
            let session = SessionService::new(ctx).require_session().await?;
            reports(ctx, &session, command).await
        }
        Command::Announce(command) => {
            let session = SessionService::new(ctx).require_session().await?;
            announcements(ctx, &session, command).await
        }
    }
}

async fn shifts(
    ctx: &ServiceContext,
    session: &Session,
    command: ShiftCommand,
) -> AppResult<Output> {
    let service = ShiftService::new(ctx);

    match command {
        ShiftCommand::Add {
            date,
            start,
            end,
            name,
        } => {
            let user_name = name.unwrap_or_else(|| session.full_name.clone());
            let shift = service
                .add_shift(AddShiftRequest::new(user_name, date, start, end))
                .await?;
            Output::new(format!("Added {}", render::shift(&shift)), &shift)
        }
        ShiftCommand::List { date } => {
            let shifts = service.shifts_for_date(parse_date(&date)?).await?;
            Output::new(render::shifts(&shifts), &shifts)
        }
        ShiftCommand::Week { date } => {
            let date = match date {
                Some(date) => parse_date(&date)?,
                None => Local::now().date_naive(),
            };
            let week = service.week_schedule(date).await?;
            Output::new(render::week(&week), &week)
        }
        ShiftCommand::Delete { id } => {
            let id = RecordId::new(id);
            if !service.delete_shift(&id).await? {
                return Err(AppError::not_found(format!("Shift {id}")));
            }
            Output::new(format!("Deleted shift {id}"), &serde_json::json!({ "deleted": id }))
        }
    }
}

async fn chat(
    ctx: &ServiceContext,
    session: &Session,
    command: ChatCommand,
) -> AppResult<Output> {
    let service = ChatService::new(ctx);

    match command {
        ChatCommand::Channels => {
            let channels = service.channels().await?;
            let text = channels
                .iter()
                .map(render::channel)
                .collect::<Vec<_>>()
                .join("\n");
            Output::new(text, &channels)
        }
        ChatCommand::Send { channel, body } => {
            let draft = SendMessageRequest::to_channel(channel, "");
            let request = message_request(&service, draft, body).await?;
            let message = service.send_message(session, request).await?;
            Output::new(render::message(&message), &message)
        }
        ChatCommand::Dm { recipient, body } => {
            let draft = SendMessageRequest::to_user(recipient, "");
            let request = message_request(&service, draft, body).await?;
            let message = service.send_message(session, request).await?;
            Output::new(render::message(&message), &message)
        }
        ChatCommand::History { channel } => {
            let messages = service.channel_messages(&RecordId::new(channel)).await?;
            Output::new(render::messages(&messages), &messages)
        }
        ChatCommand::Conversation { with } => {
            let messages = service
                .direct_messages(&session.id, &RecordId::new(with))
                .await?;
            Output::new(render::messages(&messages), &messages)
        }
        ChatCommand::File { reference, output } => {
            let content = service
                .get_file(&reference)
                .await?
                .ok_or_else(|| AppError::not_found(format!("File {reference}")))?;

            match output {
                Some(path) => {
                    std::fs::write(&path, &content.bytes).map_err(|e| {
                        AppError::Storage(format!("{}: {e}", path.display()))
                    })?;
                    Output::new(
                        format!("Wrote {} bytes to {}", content.len(), path.display()),
                        &serde_json::json!({
                            "path": path.display().to_string(),
                            "content_type": &content.content_type,
                            "size": content.len(),
                        }),
                    )
                }
                None => {
                    let url = content.to_data_url();
                    Output::new(url.clone(), &serde_json::json!({ "data_url": url }))
                }
            }
        }
    }
}

/// Fill a draft from the command line, storing the attachment first
async fn message_request(
    service: &ChatService<'_>,
    mut request: SendMessageRequest,
    body: MessageBody,
) -> AppResult<SendMessageRequest> {
    request.message = body.message;
    request.is_emergency = body.emergency;

    if let Some(path) = body.file {
        let content = read_attachment(&path)?;
        let reference = service.store_file(&content).await?;
        request = request.with_file(reference.to_string(), content.content_type);
    }
    Ok(request)
}

async fn reports(
    ctx: &ServiceContext,
    session: &Session,
    command: ReportCommand,
) -> AppResult<Output> {
    let service = ReportService::new(ctx);

    match command {
        ReportCommand::Submit {
            device,
            room,
            description,
            image,
        } => {
            let mut request = SubmitReportRequest::new(device, room, description);
            if let Some(path) = image {
                let content = read_attachment(&path)?;
                let reference = ChatService::new(ctx).store_file(&content).await?;
                request.image = Some(reference.to_string());
            }
            let report = service.submit(request, &session.full_name).await?;
            Output::new(format!("Submitted {}", render::report(&report)), &report)
        }
        ReportCommand::List { status } => {
            let reports = service.list(status).await?;
            let counts = service.counts().await?;
            Output::new(render::reports(&reports, counts), &reports)
        }
        ReportCommand::Status { id, status } => {
            let report = service.update_status(&RecordId::new(id), status).await?;
            Output::new(render::report(&report), &report)
        }
    }
}

async fn announcements(
    ctx: &ServiceContext,
    session: &Session,
    command: AnnounceCommand,
) -> AppResult<Output> {
    let service = AnnouncementService::new(ctx);

    match command {
        AnnounceCommand::Post {
            title,
            message,
            image,
        } => {
            let mut request = PostAnnouncementRequest::new(title, message);
            if let Some(path) = image {
                let content = read_attachment(&path)?;
                let reference = ChatService::new(ctx).store_file(&content).await?;
                request.image_url = Some(reference.to_string());
            }
            let announcement = service.post(request, &session.full_name).await?;
            Output::new(render::announcement(&announcement), &announcement)
        }
        AnnounceCommand::List => {
            let announcements = service.list().await?;
            Output::new(render::announcements(&announcements), &announcements)
        }
    }
}

fn read_attachment(path: &Path) -> AppResult<FileContent> {
    let bytes = std::fs::read(path)
        .map_err(|e| AppError::InvalidInput(format!("{}: {e}", path.display())))?;
    info!(path = %path.display(), size = bytes.len(), "Read attachment");
    Ok(FileContent::new(content_type_for(path), bytes))
}

/// MIME type from the file extension
fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}
