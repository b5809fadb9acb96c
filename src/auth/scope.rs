/// Full read/write access to the user's Google Drive.
pub const DRIVE: &str = "https://www.googleapis.com/auth/drive";

/// Scopes requested by the consent flow. Exactly one.
pub const SCOPES: &[&str] = &[DRIVE];
