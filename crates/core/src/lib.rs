pub mod domain;
pub mod fallback;
pub mod filter;
pub mod gateway;
pub mod metrics;
pub mod mutation;
pub mod orchestrator;
pub mod polling;
pub mod views;

pub mod config {
    use crate::mutation::MutationPolicy;
    use anyhow::Context;
    use serde::{Deserialize, Serialize};
    use std::str::FromStr;
    use std::time::Duration;

    pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api/dashboard";
    pub const DEFAULT_REFRESH_SECS: u64 = 30;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum Theme {
        #[default]
        Light,
        Dark,
    }

    impl Theme {
        pub fn toggle(self) -> Self {
            match self {
                Theme::Light => Theme::Dark,
                Theme::Dark => Theme::Light,
            }
        }

        pub fn as_str(self) -> &'static str {
            match self {
                Theme::Light => "light",
                Theme::Dark => "dark",
            }
        }
    }

    impl FromStr for Theme {
        type Err = anyhow::Error;

        fn from_str(s: &str) -> anyhow::Result<Self> {
            match s.trim().to_ascii_lowercase().as_str() {
                "light" => Ok(Theme::Light),
                "dark" => Ok(Theme::Dark),
                other => anyhow::bail!("unknown theme: {other}"),
            }
        }
    }

    /// User-facing knobs that used to live on the settings page.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Preferences {
        pub theme: Theme,
        pub auto_refresh: bool,
        pub refresh_interval: Duration,
        pub mutation_policy: MutationPolicy,
    }

    impl Default for Preferences {
        fn default() -> Self {
            Self {
                theme: Theme::Light,
                auto_refresh: true,
                refresh_interval: Duration::from_secs(DEFAULT_REFRESH_SECS),
                mutation_policy: MutationPolicy::Optimistic,
            }
        }
    }

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub api_base_url: String,
        pub http_timeout: Option<Duration>,
        pub preferences: Preferences,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Self::from_lookup(|key| std::env::var(key).ok())
        }

        pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
            let api_base_url = lookup("DASHBOARD_API_BASE_URL")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

            let http_timeout = lookup("DASHBOARD_HTTP_TIMEOUT_SECS")
                .and_then(|s| s.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs);

            // Zero would spin the poller; treat it like any other bad value.
            let refresh_secs = lookup("DASHBOARD_REFRESH_SECS")
                .and_then(|s| s.parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_REFRESH_SECS);

            let auto_refresh = lookup("DASHBOARD_AUTO_REFRESH")
                .and_then(|s| parse_bool(&s))
                .unwrap_or(true);

            let mutation_policy = match lookup("DASHBOARD_MUTATION_POLICY") {
                Some(s) => s
                    .parse::<MutationPolicy>()
                    .context("invalid DASHBOARD_MUTATION_POLICY")?,
                None => MutationPolicy::default(),
            };

            let theme = match lookup("DASHBOARD_THEME") {
                Some(s) => s.parse::<Theme>().context("invalid DASHBOARD_THEME")?,
                None => Theme::default(),
            };

            Ok(Self {
                api_base_url,
                http_timeout,
                preferences: Preferences {
                    theme,
                    auto_refresh,
                    refresh_interval: Duration::from_secs(refresh_secs),
                    mutation_policy,
                },
                sentry_dsn: lookup("SENTRY_DSN").filter(|s| !s.trim().is_empty()),
            })
        }
    }

    fn parse_bool(s: &str) -> Option<bool> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use std::collections::HashMap;

        fn settings(pairs: &[(&str, &str)]) -> anyhow::Result<Settings> {
            let map: HashMap<String, String> = pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            Settings::from_lookup(|key| map.get(key).cloned())
        }

        #[test]
        fn defaults_when_nothing_is_set() {
            let s = settings(&[]).unwrap();
            assert_eq!(s.api_base_url, DEFAULT_API_BASE_URL);
            assert_eq!(s.http_timeout, None);
            assert_eq!(s.preferences, Preferences::default());
            assert!(s.sentry_dsn.is_none());
        }

        #[test]
        fn unparseable_numbers_fall_back_to_defaults() {
            let s = settings(&[
                ("DASHBOARD_REFRESH_SECS", "soon"),
                ("DASHBOARD_HTTP_TIMEOUT_SECS", "-3"),
                ("DASHBOARD_AUTO_REFRESH", "maybe"),
            ])
            .unwrap();
            assert_eq!(s.preferences.refresh_interval, Duration::from_secs(30));
            assert_eq!(s.http_timeout, None);
            assert!(s.preferences.auto_refresh);
        }

        #[test]
        fn reads_explicit_preferences() {
            let s = settings(&[
                ("DASHBOARD_API_BASE_URL", "http://example.test/api"),
                ("DASHBOARD_REFRESH_SECS", "5"),
                ("DASHBOARD_AUTO_REFRESH", "off"),
                ("DASHBOARD_MUTATION_POLICY", "strict"),
                ("DASHBOARD_THEME", "Dark"),
            ])
            .unwrap();
            assert_eq!(s.api_base_url, "http://example.test/api");
            assert_eq!(s.preferences.refresh_interval, Duration::from_secs(5));
            assert!(!s.preferences.auto_refresh);
            assert_eq!(s.preferences.mutation_policy, MutationPolicy::Strict);
            assert_eq!(s.preferences.theme, Theme::Dark);
        }

        #[test]
        fn rejects_unknown_policy_and_theme() {
            assert!(settings(&[("DASHBOARD_MUTATION_POLICY", "yolo")]).is_err());
            assert!(settings(&[("DASHBOARD_THEME", "sepia")]).is_err());
        }

        #[test]
        fn theme_toggles_back_and_forth() {
            assert_eq!(Theme::Light.toggle(), Theme::Dark);
            assert_eq!(Theme::Dark.toggle().toggle(), Theme::Dark);
        }
    }
}
