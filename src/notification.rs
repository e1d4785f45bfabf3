const APP_NAME: &str = "Mirage";

/// Desktop notification used to surface a backend failure once.
pub fn alert(summary: &str, body: &str) {
    tracing::debug!(summary, body, "showing alert");
    if let Err(err) = notify_rust::Notification::new()
        .appname(APP_NAME)
        .summary(summary)
        .body(body)
        .show()
    {
        tracing::warn!("system notification failed: {err}");
    }
}

pub fn send(body: impl Into<String>) {
    alert(APP_NAME, &body.into());
}
