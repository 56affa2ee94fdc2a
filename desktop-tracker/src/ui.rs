use tokio::sync::mpsc::UnboundedReceiver;

use crate::domain::ConnectionEvent;

/// One line of terminal output for an event, or `None` for events the CLI keeps quiet about.
pub fn describe(event: &ConnectionEvent) -> Option<String> {
    match event {
        ConnectionEvent::ConnectionStatus(true) => Some("🌐 Online".to_string()),
        ConnectionEvent::ConnectionStatus(false) => Some("📴 Offline".to_string()),
        ConnectionEvent::Error(message) => Some(format!("❌ {}", message)),
        ConnectionEvent::Warning(message) => Some(format!("⚠️  {}", message)),
        ConnectionEvent::SelfProfile(profile) => {
            let email = profile.email_address.as_deref().unwrap_or("no email");
            Some(format!("👤 {} ({})", profile.display_name, email))
        }
        ConnectionEvent::Connected(info) => {
            Some(format!("✅ Connected to {} as {}", info.host, info.username))
        }
        ConnectionEvent::TokenSaved(_) => Some("🔑 Session saved for automatic login".to_string()),
        ConnectionEvent::CredentialsMemorized(saved) => Some(format!(
            "💾 Remembered {} on {}",
            saved.username, saved.host
        )),
        ConnectionEvent::LoggedOut => Some("👋 Logged out".to_string()),
        ConnectionEvent::RealtimeMessage(text) => Some(format!("📨 {}", text)),
        ConnectionEvent::FetchInProgress(_)
        | ConnectionEvent::AuthSucceeded
        | ConnectionEvent::SavedCredentialsLoaded(_)
        | ConnectionEvent::JwtLoaded(_)
        | ConnectionEvent::IssuesCleared
        | ConnectionEvent::ProjectsCleared => None,
    }
}

pub fn render(event: &ConnectionEvent) {
    tracing::debug!(?event, "connection event");
    if let Some(line) = describe(event) {
        println!("{}", line);
    }
}

/// Print every event already queued.
pub fn drain(rx: &mut UnboundedReceiver<ConnectionEvent>) {
    while let Ok(event) = rx.try_recv() {
        render(&event);
    }
}

/// Print events as they arrive until Ctrl-C or every sender is gone.
pub async fn follow(rx: &mut UnboundedReceiver<ConnectionEvent>) {
    println!("Watching for updates, press Ctrl-C to stop");
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            event = rx.recv() => match event {
                Some(event) => render(&event),
                None => break,
            },
        }
    }
}
