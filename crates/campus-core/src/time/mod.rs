//! Per-user timezone resolution and zone-aware formatting.
//!
//! The resolver is a read-through cache over the preferences store: a user's
//! timezone id is cached under `user_tz:{user_id}` until it is invalidated
//! or the optional TTL runs out. Missing or malformed preferences fall back
//! to the process default; nothing here returns an error to the caller
//! except [`UserTimeService::set_user_timezone`].

mod format;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Locale, NaiveDate, Utc};
use chrono_tz::Tz;
use dashmap::DashMap;

use crate::error::DomainError;
use crate::ports::{Cache, PreferencesStore, namespaced_key};

pub use format::{DateStyle, format_date, format_in_zone};

/// Preferences application holding time settings.
pub const TIME_APPLICATION_ID: &str = "sakai:time";

/// Preferences key of the user's timezone id.
pub const TIMEZONE_KEY: &str = "timezone";

const CACHE_NAMESPACE: &str = "user_tz";

/// Resolver configuration.
#[derive(Debug, Clone, Default)]
pub struct TimeZoneConfig {
    /// Zone used when a user has none. `None` means the host zone.
    pub default_timezone: Option<String>,
    /// Lifetime of cached user zones. `None` keeps them until invalidated.
    pub cache_ttl: Option<Duration>,
}

/// The host's IANA zone id, or `UTC` when it cannot be determined.
pub fn system_default_timezone() -> String {
    match iana_time_zone::get_timezone() {
        Ok(tz) => tz,
        Err(e) => {
            tracing::debug!(error = %e, "Host timezone unavailable, using UTC");
            "UTC".to_string()
        }
    }
}

/// Resolves users to timezones and formats dates in them.
pub struct UserTimeService {
    cache: Arc<dyn Cache>,
    preferences: Arc<dyn PreferencesStore>,
    default_timezone: String,
    cache_ttl: Option<Duration>,
    // Parsed zones by id.
    zones: DashMap<String, Tz>,
}

impl UserTimeService {
    pub fn new(
        cache: Arc<dyn Cache>,
        preferences: Arc<dyn PreferencesStore>,
        config: TimeZoneConfig,
    ) -> Self {
        let default_timezone = config
            .default_timezone
            .filter(|tz| !tz.trim().is_empty())
            .unwrap_or_else(system_default_timezone);

        tracing::info!(default_timezone = %default_timezone, "User time service ready");

        Self {
            cache,
            preferences,
            default_timezone,
            cache_ttl: config.cache_ttl,
            zones: DashMap::new(),
        }
    }

    pub fn default_timezone(&self) -> &str {
        &self.default_timezone
    }

    /// Timezone id of the current session user.
    ///
    /// Without a user this is the process default. Otherwise the cached
    /// value is used, or the stored preference is read and cached.
    pub async fn user_timezone(&self, current_user: Option<&str>) -> String {
        let Some(user_id) = current_user.filter(|u| !u.is_empty()) else {
            return self.default_timezone.clone();
        };

        let key = namespaced_key(CACHE_NAMESPACE, user_id);
        if let Some(timezone) = self.cache.get(&key).await {
            return timezone;
        }

        let stored = match self
            .preferences
            .get_property(user_id, TIME_APPLICATION_ID, TIMEZONE_KEY)
            .await
        {
            Ok(value) => value,
            Err(e) => {
                // Not cached, so the next call retries the store.
                tracing::warn!(
                    user_id = %user_id,
                    error = %e,
                    "Failed to read timezone preference"
                );
                return self.default_timezone.clone();
            }
        };

        let timezone = stored
            .filter(|tz| !tz.is_empty())
            .unwrap_or_else(|| self.default_timezone.clone());

        if let Err(e) = self.cache.set(&key, &timezone, self.cache_ttl).await {
            tracing::warn!(user_id = %user_id, error = %e, "Failed to cache user timezone");
        }

        timezone
    }

    /// Parsed timezone of the current session user.
    pub async fn local_time_zone(&self, current_user: Option<&str>) -> Tz {
        let id = self.user_timezone(current_user).await;
        self.zone(&id)
    }

    /// Parse a zone id through the parsed-zone map.
    ///
    /// Unknown ids resolve to the default zone.
    pub fn zone(&self, timezone_id: &str) -> Tz {
        if let Some(tz) = self.zones.get(timezone_id) {
            return *tz;
        }

        match timezone_id.parse::<Tz>() {
            Ok(tz) => {
                self.zones.insert(timezone_id.to_string(), tz);
                tz
            }
            Err(_) => {
                tracing::warn!(timezone = %timezone_id, "Unknown timezone id, using default");
                self.default_timezone.parse().unwrap_or(Tz::UTC)
            }
        }
    }

    /// Drop a user's cached timezone. Always succeeds.
    pub async fn clear_local_time_zone(&self, user_id: &str) -> bool {
        let key = namespaced_key(CACHE_NAMESPACE, user_id);
        if let Err(e) = self.cache.delete(&key).await {
            tracing::warn!(user_id = %user_id, error = %e, "Failed to evict cached timezone");
        }
        true
    }

    /// Store a user's timezone preference and evict the cached value.
    ///
    /// `None` or an empty id clears the preference.
    pub async fn set_user_timezone(
        &self,
        user_id: &str,
        timezone: Option<&str>,
    ) -> Result<(), DomainError> {
        let value = timezone.map(str::trim).filter(|tz| !tz.is_empty());

        if let Some(tz) = value {
            if tz.parse::<Tz>().is_err() {
                return Err(DomainError::Validation(format!("Unknown timezone '{tz}'")));
            }
        }

        self.preferences
            .set_property(user_id, TIME_APPLICATION_ID, TIMEZONE_KEY, value)
            .await?;
        self.clear_local_time_zone(user_id).await;

        tracing::info!(user_id = %user_id, timezone = ?value, "Timezone preference updated");
        Ok(())
    }

    pub async fn date_format_long(
        &self,
        current_user: Option<&str>,
        instant: DateTime<Utc>,
        locale: Locale,
    ) -> String {
        tracing::debug!(%instant, ?locale, "dateFormatLong");
        let zone = self.local_time_zone(current_user).await;
        format_in_zone(instant, zone, DateStyle::LongDate, locale)
    }

    pub async fn date_time_format_long(
        &self,
        current_user: Option<&str>,
        instant: DateTime<Utc>,
        locale: Locale,
    ) -> String {
        tracing::debug!(%instant, ?locale, "dateTimeFormatLong");
        let zone = self.local_time_zone(current_user).await;
        format_in_zone(instant, zone, DateStyle::LongDateTime, locale)
    }

    pub fn short_localized_timestamp_in(
        instant: DateTime<Utc>,
        zone: Tz,
        locale: Locale,
    ) -> String {
        format_in_zone(instant, zone, DateStyle::ShortTimestamp, locale)
    }

    pub async fn short_localized_timestamp(
        &self,
        current_user: Option<&str>,
        instant: DateTime<Utc>,
        locale: Locale,
    ) -> String {
        let zone = self.local_time_zone(current_user).await;
        Self::short_localized_timestamp_in(instant, zone, locale)
    }

    pub fn short_localized_date(date: NaiveDate, locale: Locale) -> String {
        format_date(date, DateStyle::ShortDate, locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RepoError;
    use crate::ports::CacheError;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct MapCache(Mutex<HashMap<String, String>>);

    #[async_trait]
    impl Cache for MapCache {
        async fn get(&self, key: &str) -> Option<String> {
            self.0.lock().unwrap().get(key).cloned()
        }

        async fn set(
            &self,
            key: &str,
            value: &str,
            _ttl: Option<Duration>,
        ) -> Result<(), CacheError> {
            self.0.lock().unwrap().insert(key.to_string(), value.to_string());
            Ok(())
        }

        async fn delete(&self, key: &str) -> Result<(), CacheError> {
            self.0.lock().unwrap().remove(key);
            Ok(())
        }

        async fn exists(&self, key: &str) -> bool {
            self.0.lock().unwrap().contains_key(key)
        }
    }

    #[derive(Default)]
    struct CountingPrefs {
        values: Mutex<HashMap<String, String>>,
        reads: AtomicUsize,
        broken: bool,
    }

    #[async_trait]
    impl PreferencesStore for CountingPrefs {
        async fn get_property(
            &self,
            user_id: &str,
            _application: &str,
            _key: &str,
        ) -> Result<Option<String>, RepoError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            if self.broken {
                return Err(RepoError::Connection("down".to_string()));
            }
            Ok(self.values.lock().unwrap().get(user_id).cloned())
        }

        async fn set_property(
            &self,
            user_id: &str,
            _application: &str,
            _key: &str,
            value: Option<&str>,
        ) -> Result<(), RepoError> {
            let mut values = self.values.lock().unwrap();
            match value {
                Some(v) => values.insert(user_id.to_string(), v.to_string()),
                None => values.remove(user_id),
            };
            Ok(())
        }
    }

    fn service(prefs: Arc<CountingPrefs>) -> UserTimeService {
        UserTimeService::new(
            Arc::new(MapCache::default()),
            prefs,
            TimeZoneConfig {
                default_timezone: Some("Europe/London".to_string()),
                cache_ttl: None,
            },
        )
    }

    #[tokio::test]
    async fn test_no_session_user_gets_default() {
        let prefs = Arc::new(CountingPrefs::default());
        let svc = service(prefs.clone());

        assert_eq!(svc.user_timezone(None).await, "Europe/London");
        assert_eq!(prefs.reads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unset_preference_is_default_and_cached() {
        let prefs = Arc::new(CountingPrefs::default());
        let svc = service(prefs.clone());

        assert_eq!(svc.user_timezone(Some("u1")).await, "Europe/London");
        assert_eq!(svc.user_timezone(Some("u1")).await, "Europe/London");
        assert_eq!(prefs.reads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_preference_is_default() {
        let prefs = Arc::new(CountingPrefs::default());
        prefs.values.lock().unwrap().insert("u1".to_string(), String::new());
        let svc = service(prefs);

        assert_eq!(svc.user_timezone(Some("u1")).await, "Europe/London");
    }

    #[tokio::test]
    async fn test_invalidate_rereads_store() {
        let prefs = Arc::new(CountingPrefs::default());
        prefs
            .values
            .lock()
            .unwrap()
            .insert("u1".to_string(), "Asia/Tokyo".to_string());
        let svc = service(prefs.clone());

        assert_eq!(svc.user_timezone(Some("u1")).await, "Asia/Tokyo");

        prefs
            .values
            .lock()
            .unwrap()
            .insert("u1".to_string(), "America/Chicago".to_string());
        assert_eq!(svc.user_timezone(Some("u1")).await, "Asia/Tokyo");

        assert!(svc.clear_local_time_zone("u1").await);
        assert_eq!(svc.user_timezone(Some("u1")).await, "America/Chicago");
        assert_eq!(prefs.reads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_store_failure_falls_back_without_caching() {
        let prefs = Arc::new(CountingPrefs {
            broken: true,
            ..Default::default()
        });
        let svc = service(prefs.clone());

        assert_eq!(svc.user_timezone(Some("u1")).await, "Europe/London");
        assert_eq!(svc.user_timezone(Some("u1")).await, "Europe/London");
        assert_eq!(prefs.reads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_malformed_zone_parses_to_default() {
        let prefs = Arc::new(CountingPrefs::default());
        prefs
            .values
            .lock()
            .unwrap()
            .insert("u1".to_string(), "Mars/Olympus".to_string());
        let svc = service(prefs);

        assert_eq!(svc.local_time_zone(Some("u1")).await, chrono_tz::Europe::London);
    }

    #[tokio::test]
    async fn test_set_user_timezone_validates_and_evicts() {
        let prefs = Arc::new(CountingPrefs::default());
        let svc = service(prefs);

        assert_eq!(svc.user_timezone(Some("u1")).await, "Europe/London");

        let err = svc.set_user_timezone("u1", Some("Nowhere/Town")).await;
        assert!(matches!(err, Err(DomainError::Validation(_))));

        svc.set_user_timezone("u1", Some("Asia/Tokyo")).await.unwrap();
        assert_eq!(svc.user_timezone(Some("u1")).await, "Asia/Tokyo");

        svc.set_user_timezone("u1", None).await.unwrap();
        assert_eq!(svc.user_timezone(Some("u1")).await, "Europe/London");
    }

    #[tokio::test]
    async fn test_date_format_long_in_user_zone() {
        let prefs = Arc::new(CountingPrefs::default());
        prefs
            .values
            .lock()
            .unwrap()
            .insert("u1".to_string(), "Asia/Tokyo".to_string());
        let svc = service(prefs);
        let instant = Utc.with_ymd_and_hms(2024, 1, 5, 20, 0, 0).unwrap();

        assert_eq!(
            svc.date_format_long(Some("u1"), instant, Locale::en_US).await,
            "January 6, 2024"
        );
        assert_eq!(
            svc.date_format_long(None, instant, Locale::en_US).await,
            "January 5, 2024"
        );
        assert_eq!(
            svc.date_format_long(Some("u1"), instant, Locale::ja_JP).await,
            "2024年1月6日"
        );
    }
}
