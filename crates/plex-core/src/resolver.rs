use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use plex_backend::{
    LookupKey, LookupTarget, OracleError, PermittedKinds, PlatformProvider, RecommendedType,
    RemoteVersion, StartResult, UpdateKind, UpdateQuery, UpdateReport, UpdateSignal,
};

use crate::listener::spawn_install_listener;
use crate::redirect::{RedirectTargets, open_with_fallback};
use crate::timeout::with_timeout;
use crate::version::is_remote_newer;

pub const DEFAULT_ORACLE_TIMEOUT: Duration = Duration::from_secs(15);

/// Pick the lookup key: store id, then bundle override, then the app's own id.
#[must_use]
pub fn lookup_target(query: &UpdateQuery, own_identifier: Option<&str>) -> Option<LookupTarget> {
    let key = if let Some(store_id) = query.app_store_id() {
        LookupKey::StoreId(store_id.to_string())
    } else if let Some(bundle_id) = query.bundle_id() {
        LookupKey::BundleId(bundle_id.to_string())
    } else {
        LookupKey::BundleId(own_identifier.filter(|id| !id.is_empty())?.to_string())
    };

    Some(LookupTarget {
        key,
        country_code: query.country_code().map(str::to_string),
    })
}

/// Immediate beats flexible.
#[must_use]
pub fn priority_kind(permitted: PermittedKinds) -> Option<UpdateKind> {
    [UpdateKind::Immediate, UpdateKind::Flexible]
        .into_iter()
        .find(|kind| permitted.permits(*kind))
}

/// Honor the caller's preference only when the platform permits it.
#[must_use]
pub fn select_kind(preferred: Option<UpdateKind>, permitted: PermittedKinds) -> Option<UpdateKind> {
    preferred
        .filter(|kind| permitted.permits(*kind))
        .or_else(|| priority_kind(permitted))
}

/// How an available update would be delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Delivery {
    InApp(PermittedKinds),
    Store(Option<String>),
}

#[derive(Debug, Clone)]
struct Resolution {
    report: UpdateReport,
    delivery: Delivery,
}

pub struct UpdateResolver {
    provider: Arc<dyn PlatformProvider>,
    timeout: Duration,
}

impl UpdateResolver {
    #[must_use]
    pub fn new(provider: Arc<dyn PlatformProvider>) -> Self {
        Self {
            provider,
            timeout: DEFAULT_ORACLE_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Determine whether a newer version of the host app is available.
    ///
    /// Never fails: any oracle fault yields an unavailable report that still
    /// carries the local version.
    pub async fn check_for_update(&self, query: &UpdateQuery) -> UpdateReport {
        let local_version = self.local_version();

        match self.resolve(query, &local_version).await {
            Ok(resolution) => resolution.report,
            Err(error) => {
                warn!("Update check on {} failed: {error}", self.provider.platform());
                UpdateReport::unavailable(self.provider.platform(), local_version)
            }
        }
    }

    /// Re-check availability and, if an update exists, launch its flow.
    ///
    /// `started` only says whether the flow was initiated.
    pub async fn start_update(&self, query: &UpdateQuery) -> StartResult {
        let local_version = self.local_version();

        let resolution = match self.resolve(query, &local_version).await {
            Ok(resolution) => resolution,
            Err(error) => {
                warn!("Update start on {} failed: {error}", self.provider.platform());
                return StartResult::NOT_STARTED;
            }
        };

        if !resolution.report.is_available {
            info!("No update available, nothing to start");
            return StartResult::NOT_STARTED;
        }

        let started = match resolution.delivery {
            Delivery::InApp(permitted) => {
                let Some(kind) = select_kind(query.preferred_kind, permitted) else {
                    info!("Update available but no in-app update kind is permitted");
                    return StartResult::NOT_STARTED;
                };
                self.start_in_app(kind).await
            }
            Delivery::Store(store_url) => {
                let targets = match (query.app_store_id(), store_url.as_deref()) {
                    (Some(store_id), _) => {
                        RedirectTargets::for_store_id(store_id, query.country_code())
                    }
                    (None, Some(url)) => RedirectTargets::for_store_url(url),
                    (None, None) => {
                        warn!("No store url resolved for update redirect");
                        return StartResult::NOT_STARTED;
                    }
                };
                open_with_fallback(self.provider.as_ref(), &targets, self.timeout).await
            }
        };

        StartResult::from(started)
    }

    fn local_version(&self) -> String {
        self.provider.local_version().unwrap_or_else(|error| {
            debug!("Local version unavailable: {error}");
            String::new()
        })
    }

    async fn resolve(
        &self,
        query: &UpdateQuery,
        local_version: &str,
    ) -> Result<Resolution, OracleError> {
        let own_identifier = self.provider.app_identifier();
        let target = lookup_target(query, own_identifier.as_deref()).ok_or(
            OracleError::NoContext {
                handle: "application identifier",
            },
        )?;
        debug!("Resolving update for {target:?}");

        let signal = with_timeout(
            self.timeout,
            "update info",
            self.provider.update_signal(&target),
        )
        .await?;

        Ok(self.decide(local_version, signal))
    }

    fn decide(&self, local_version: &str, signal: UpdateSignal) -> Resolution {
        let platform = self.provider.platform();
        let mut report = UpdateReport::unavailable(platform, local_version);

        let delivery = match signal {
            UpdateSignal::Managed {
                available,
                permitted,
                version_code,
            } => {
                report.is_available = available;
                report.remote_version = version_code.map(RemoteVersion::Code);
                if available {
                    report.recommended_type = priority_kind(permitted)
                        .map_or(RecommendedType::None, RecommendedType::from);
                }
                Delivery::InApp(permitted)
            }
            UpdateSignal::Store { version, store_url } => {
                let available = version
                    .as_deref()
                    .is_some_and(|remote| is_remote_newer(remote, local_version));
                report.is_available = available;
                if available {
                    report.recommended_type = RecommendedType::Store;
                }
                report.remote_version = version.map(RemoteVersion::Name);
                report.store_url.clone_from(&store_url);
                Delivery::Store(store_url)
            }
        };

        debug!(
            "Update on {platform}: available={}, recommended={:?}",
            report.is_available, report.recommended_type
        );

        Resolution { report, delivery }
    }

    async fn start_in_app(&self, kind: UpdateKind) -> bool {
        let subscription = if kind == UpdateKind::Flexible {
            match self.provider.subscribe_install_state() {
                Ok(subscription) => Some(subscription),
                Err(error) => {
                    warn!("Cannot listen for flexible update progress: {error}");
                    return false;
                }
            }
        } else {
            None
        };

        let started = match with_timeout(
            self.timeout,
            "start update flow",
            self.provider.trigger_native_flow(kind),
        )
        .await
        {
            Ok(started) => started,
            Err(error) => {
                warn!("Failed to start {kind} update flow: {error}");
                false
            }
        };

        if let Some(subscription) = subscription {
            if started {
                spawn_install_listener(Arc::clone(&self.provider), subscription);
            } else {
                self.provider.unsubscribe_install_state(subscription.id);
            }
        }

        info!("{kind} update flow started: {started}");
        started
    }
}
