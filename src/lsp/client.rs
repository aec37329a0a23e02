//! Client notification abstraction for LSP communication.
//!
//! `ClientNotifier` wraps `tower_lsp::Client` and centralizes all
//! server-to-client output. Every message goes to `window/logMessage`;
//! errors, warnings, and informational messages are additionally raised as
//! `window/showMessage` notifications when the configured verbosity permits.

use tower_lsp::Client;
use tower_lsp::lsp_types::MessageType;

use crate::config::NotificationLevel;
use crate::lsp::settings::{SettingsEvent, SettingsEventKind};

/// Whether a message of the given severity should be shown as a client
/// notification under the given verbosity.
///
/// Extracted as a pure function for unit testability - the backend struct
/// cannot be constructed in unit tests due to the tower_lsp::Client
/// dependency.
pub(crate) fn should_notify(severity: MessageType, level: NotificationLevel) -> bool {
    match severity {
        MessageType::ERROR => level.shows_errors(),
        MessageType::WARNING => level.shows_warnings(),
        MessageType::INFO => level.shows_info(),
        _ => false,
    }
}

/// Wrapper around the LSP client for centralized notification handling.
#[derive(Clone)]
pub(crate) struct ClientNotifier {
    client: Client,
}

impl ClientNotifier {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Log a message to the client's output channel at LOG level.
    pub(crate) async fn log_to_output(&self, message: impl Into<String>) {
        self.client
            .log_message(MessageType::LOG, message.into())
            .await;
    }

    /// Log an error, raising a notification when verbosity permits.
    pub(crate) async fn log_error(&self, message: impl Into<String>, level: NotificationLevel) {
        self.log_with_severity(MessageType::ERROR, message.into(), level)
            .await;
    }

    /// Log a warning, raising a notification when verbosity permits.
    pub(crate) async fn log_warning(&self, message: impl Into<String>, level: NotificationLevel) {
        self.log_with_severity(MessageType::WARNING, message.into(), level)
            .await;
    }

    /// Log an informational message, raising a notification only at the
    /// `always` verbosity.
    pub(crate) async fn log_always(&self, message: impl Into<String>, level: NotificationLevel) {
        self.log_with_severity(MessageType::INFO, message.into(), level)
            .await;
    }

    async fn log_with_severity(
        &self,
        severity: MessageType,
        message: String,
        level: NotificationLevel,
    ) {
        self.client.log_message(severity, message.clone()).await;
        if should_notify(severity, level) {
            self.client.show_message(severity, message).await;
        }
    }

    /// Forward settings events collected during initialization. Warnings go
    /// through the configured verbosity so misconfigurations surface to the
    /// user; informational events stay in the output channel.
    pub(crate) async fn log_settings_events(
        &self,
        events: &[SettingsEvent],
        level: NotificationLevel,
    ) {
        for event in events {
            match event.kind {
                SettingsEventKind::Info => self.log_to_output(event.message.clone()).await,
                SettingsEventKind::Warning => {
                    self.log_warning(event.message.clone(), level).await
                }
            }
        }
    }
}
