//! Connection settings and process-wide defaults.
//!
//! A [`Client`](crate::Client) resolves its settings by overlaying the
//! caller's options on a set of defaults. The defaults are either passed
//! explicitly with [`ClientBuilder::defaults`](crate::ClientBuilder::defaults)
//! or read from the process-wide holder managed by [`configure`].

use std::sync::RwLock;

/// Environment variable read by [`ConnectionSettings::from_env`] for the user.
pub const USER_ENV: &str = "VIDEOCONVERT_USER";
/// Environment variable read by [`ConnectionSettings::from_env`] for the password.
pub const PASSWORD_ENV: &str = "VIDEOCONVERT_PASSWORD";
/// Environment variable read by [`ConnectionSettings::from_env`] for the host.
pub const HOST_ENV: &str = "VIDEOCONVERT_HOST";
/// Environment variable read by [`ConnectionSettings::from_env`] for the port.
pub const PORT_ENV: &str = "VIDEOCONVERT_PORT";

static DEFAULTS: RwLock<ConnectionSettings> = RwLock::new(ConnectionSettings::new());

/// User, password, host and port of a conversion node.
///
/// Every field is optional so that a partial set of settings can be laid
/// over another with [`merge`](ConnectionSettings::merge).
///
/// # Examples
///
/// ```
/// use videoconvert::ConnectionSettings;
///
/// let defaults = ConnectionSettings::new()
///     .user("test")
///     .password("test")
///     .host("localhost")
///     .port("8886");
///
/// let resolved = defaults.merge(&ConnectionSettings::new().port("9000"));
/// assert_eq!(resolved.host.as_deref(), Some("localhost"));
/// assert_eq!(resolved.port.as_deref(), Some("9000"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionSettings {
    /// User for HTTP Basic authentication.
    pub user: Option<String>,
    /// Password for HTTP Basic authentication.
    pub password: Option<String>,
    /// Host of the conversion node, bare (`localhost`) or with a scheme.
    pub host: Option<String>,
    /// Port of the conversion node.
    pub port: Option<String>,
}

impl ConnectionSettings {
    /// Creates settings with every field absent.
    pub const fn new() -> Self {
        Self {
            user: None,
            password: None,
            host: None,
            port: None,
        }
    }

    /// Reads settings from the `VIDEOCONVERT_*` environment variables.
    ///
    /// Variables that are unset stay absent.
    pub fn from_env() -> Self {
        Self {
            user: std::env::var(USER_ENV).ok(),
            password: std::env::var(PASSWORD_ENV).ok(),
            host: std::env::var(HOST_ENV).ok(),
            port: std::env::var(PORT_ENV).ok(),
        }
    }

    /// Sets the user.
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Sets the password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets the host.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the port.
    pub fn port(mut self, port: impl Into<String>) -> Self {
        self.port = Some(port.into());
        self
    }

    /// Lays `overrides` over `self`.
    ///
    /// Fields present in `overrides` win; absent ones are inherited from `self`.
    pub fn merge(&self, overrides: &ConnectionSettings) -> ConnectionSettings {
        ConnectionSettings {
            user: overrides.user.clone().or_else(|| self.user.clone()),
            password: overrides.password.clone().or_else(|| self.password.clone()),
            host: overrides.host.clone().or_else(|| self.host.clone()),
            port: overrides.port.clone().or_else(|| self.port.clone()),
        }
    }
}

/// Replaces the process-wide default settings.
///
/// No validation happens here; bad values surface when a client is built.
/// Concurrent calls are serialized and the last writer wins. Clients that
/// were already built keep the settings they resolved.
pub fn configure(settings: ConnectionSettings) {
    tracing::debug!(
        host = settings.host.as_deref().unwrap_or_default(),
        port = settings.port.as_deref().unwrap_or_default(),
        "Configured default connection settings"
    );
    // The guarded value is plain data, so a poisoned lock is still usable.
    let mut defaults = DEFAULTS.write().unwrap_or_else(|e| e.into_inner());
    *defaults = settings;
}

/// Returns a copy of the process-wide default settings.
///
/// Every field is absent if [`configure`] was never called.
pub fn current_settings() -> ConnectionSettings {
    DEFAULTS
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_prefers_overrides() {
        let defaults = ConnectionSettings::new()
            .user("test")
            .password("test")
            .host("localhost")
            .port("8886");
        let overrides = ConnectionSettings::new().user("admin").port("9000");

        let merged = defaults.merge(&overrides);

        assert_eq!(
            merged,
            ConnectionSettings::new()
                .user("admin")
                .password("test")
                .host("localhost")
                .port("9000")
        );
    }

    #[test]
    fn merge_keeps_empty_override() {
        let defaults = ConnectionSettings::new().password("secret");
        let merged = defaults.merge(&ConnectionSettings::new().password(""));
        assert_eq!(merged.password.as_deref(), Some(""));
    }

    #[test]
    fn merge_with_nothing_is_identity() {
        let defaults = ConnectionSettings::new().host("node").port("80");
        assert_eq!(defaults.merge(&ConnectionSettings::default()), defaults);
    }

    // The only unit test that touches the process-wide holder; every other
    // test in this crate builds clients with explicit defaults.
    #[test]
    fn poisoned_defaults_stay_usable() {
        let poisoner = std::thread::spawn(|| {
            let _guard = DEFAULTS.write().unwrap();
            panic!("poisoning the defaults lock");
        });
        assert!(poisoner.join().is_err());
        assert!(DEFAULTS.is_poisoned());

        assert_eq!(current_settings(), ConnectionSettings::default());

        configure(ConnectionSettings::new().host("localhost").port("8886"));
        assert_eq!(
            current_settings(),
            ConnectionSettings::new().host("localhost").port("8886")
        );

        configure(ConnectionSettings::default());
        assert_eq!(current_settings(), ConnectionSettings::default());
    }
}
