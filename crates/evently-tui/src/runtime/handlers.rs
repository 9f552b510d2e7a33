//! Effect handlers.
//!
//! Pure async functions returning `UiEvent`; the runtime spawns them and
//! posts the result to the inbox. None of them touch `AppState`.

use std::path::Path;
use std::time::Duration;

use evently_core::api::{ApiClient, FilePart, MultipartForm};
use evently_core::events::COVER_IMAGE_FIELD;
use evently_core::routes::Route;
use tokio_util::sync::CancellationToken;

use crate::common::TaskId;
use crate::events::UiEvent;

pub async fn login(client: ApiClient, email: String, password: String) -> UiEvent {
    UiEvent::LoginFinished(client.login(&email, &password).await.map(|_| ()))
}

pub async fn sign_up(client: ApiClient, form: MultipartForm) -> UiEvent {
    UiEvent::SignUpFinished(client.signup(form).await.map(|_| ()))
}

pub async fn logout(client: ApiClient) -> UiEvent {
    UiEvent::LogoutFinished(client.logout().await.map(|_| ()))
}

pub async fn fetch_events(client: ApiClient) -> UiEvent {
    UiEvent::EventsLoaded(client.list_events().await)
}

pub async fn load_event(client: ApiClient, id: String) -> UiEvent {
    let result = client.get_event(&id).await;
    UiEvent::EventLoaded { id, result }
}

pub async fn create_event(client: ApiClient, form: MultipartForm) -> UiEvent {
    UiEvent::EventCreated(client.create_event(form).await)
}

/// Reads the cover image. Cancellation drops the read.
pub async fn load_cover_image(path: &Path, cancel: Option<CancellationToken>) -> UiEvent {
    let read = FilePart::read(COVER_IMAGE_FIELD, path);
    let result = match cancel {
        Some(token) => tokio::select! {
            () = token.cancelled() => Err("Cover image load cancelled".to_string()),
            part = read => part.map_err(|e| format!("{e:#}")),
        },
        None => read.await.map_err(|e| format!("{e:#}")),
    };
    if let Err(message) = &result {
        tracing::warn!(path = %path.display(), %message, "cover image not loaded");
    }
    UiEvent::CoverImageLoaded(result)
}

/// Waits `delay` then reports the redirect as due, unless cancelled first.
pub async fn delayed_redirect(
    task: TaskId,
    to: Route,
    delay: Duration,
    cancel: Option<CancellationToken>,
) -> UiEvent {
    let Some(token) = cancel else {
        tokio::time::sleep(delay).await;
        return UiEvent::RedirectDue { task, to };
    };
    tokio::select! {
        () = token.cancelled() => {
            tracing::debug!(to = %to, "redirect cancelled");
            UiEvent::RedirectCancelled { task }
        }
        () = tokio::time::sleep(delay) => UiEvent::RedirectDue { task, to },
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_redirect_fires_after_delay() {
        let event = delayed_redirect(
            TaskId(1),
            Route::SearchEvents,
            Duration::from_millis(2000),
            Some(CancellationToken::new()),
        )
        .await;
        assert!(matches!(
            event,
            UiEvent::RedirectDue { task: TaskId(1), to: Route::SearchEvents }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_redirect_cancel_wins_over_timer() {
        let token = CancellationToken::new();
        let handle = tokio::spawn(delayed_redirect(
            TaskId(2),
            Route::SearchEvents,
            Duration::from_millis(2000),
            Some(token.clone()),
        ));
        tokio::time::sleep(Duration::from_millis(500)).await;
        token.cancel();
        let event = handle.await.unwrap();
        assert!(matches!(event, UiEvent::RedirectCancelled { task: TaskId(2) }));
    }

    #[tokio::test]
    async fn test_load_cover_image_reads_file() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(b"\x89PNG\r\n\x1a\n0000").unwrap();

        let UiEvent::CoverImageLoaded(Ok(part)) = load_cover_image(file.path(), None).await else {
            panic!("expected loaded cover");
        };
        assert_eq!(part.field, COVER_IMAGE_FIELD);
        assert_eq!(part.mime.as_deref(), Some("image/png"));
        assert!(part.file_name.ends_with(".png"));
    }

    #[tokio::test]
    async fn test_load_cover_image_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.jpg");
        let UiEvent::CoverImageLoaded(Err(message)) = load_cover_image(&missing, None).await else {
            panic!("expected failure");
        };
        assert!(message.contains("nope.jpg"));
    }
}
