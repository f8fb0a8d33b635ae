use log::debug;
use plex_backend::{DetectionReport, PlatformProvider, ProbeResult};

/// Probe every catalog entry, in declaration order, for installation presence.
///
/// Never fails. A negative answer and an oracle fault both read as "not
/// installed", and a fault on one entry does not stop the loop. When the host
/// cannot be probed at all, the report is empty with `total_apps_checked = 0`.
#[must_use]
pub fn detect_installed_apps(provider: &dyn PlatformProvider) -> DetectionReport {
    let method = provider.detection_method();

    if !provider.can_probe() {
        debug!(
            "{} provider has no registry context, skipping payment app probe",
            provider.name()
        );
        return DetectionReport::not_probed(method);
    }

    let results: Vec<ProbeResult> = provider
        .catalog()
        .iter()
        .map(|entry| {
            let token = provider.probe_token(entry);
            let is_installed = match provider.exists(token) {
                Ok(found) => found,
                Err(error) if error.is_expected_absence() => false,
                Err(error) => {
                    debug!("Probe for {token} failed, treating as not installed: {error}");
                    false
                }
            };
            ProbeResult::from_entry(entry, is_installed)
        })
        .collect();

    debug!(
        "Probed {} payment apps, {} installed",
        results.len(),
        results.iter().filter(|r| r.is_installed).count()
    );

    DetectionReport::new(results, method)
}
