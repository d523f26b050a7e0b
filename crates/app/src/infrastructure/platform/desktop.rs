//! Desktop platform implementations
//!
//! Provides platform-specific implementations for desktop using
//! standard library and native crates.

use crate::config::{AppConfig, LocationSource, StorageBackend};
use crate::infrastructure::geolocation::{FixedLocation, IpGeolocation};
use crate::infrastructure::platform::{MemoryStorage, StaticConnectivity};
use crate::infrastructure::resilient_directory::ResilientDirectory;
use crate::infrastructure::rest_countries::RestCountriesClient;
use crate::ports::outbound::platform::{ClockProvider, ConnectivityProvider, StorageProvider};
use crate::ports::outbound::{DirectoryError, LocationPort};
use crate::state::Platform;
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::task::JoinHandle;

/// Desktop clock using the system time
#[derive(Clone, Default)]
pub struct SystemClock;

impl ClockProvider for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// File-backed key/value storage
///
/// Stores hex-encoded values in a JSON file at:
/// - Linux: ~/.config/countrylist/storage.json
/// - macOS: ~/Library/Application Support/io.countrylist.countrylist/storage.json
/// - Windows: C:\Users\<User>\AppData\Roaming\countrylist\countrylist\config\storage.json
#[derive(Clone)]
pub struct FileStorage {
    /// Path to the storage file
    storage_path: PathBuf,
    /// In-memory cache of stored values, hex encoded
    cache: Arc<RwLock<HashMap<String, String>>>,
}

impl Default for FileStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl FileStorage {
    /// Open storage at the platform config directory
    pub fn new() -> Self {
        Self::at(Self::default_path())
    }

    /// Platform-specific location of the storage file
    pub fn default_path() -> PathBuf {
        if let Some(dirs) = ProjectDirs::from("io", "countrylist", "countrylist") {
            dirs.config_dir().join("storage.json")
        } else {
            // Fallback to current directory if project dirs unavailable
            PathBuf::from("countrylist_storage.json")
        }
    }

    /// Open storage backed by `path`, loading whatever it already holds.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        let storage_path = path.into();
        let cache = load_file(&storage_path);

        tracing::debug!(path = ?storage_path, entries = cache.len(), "File storage initialized");

        Self {
            storage_path,
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    /// Persist the cache to disk
    fn persist(&self) {
        if let Some(parent) = self.storage_path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = fs::create_dir_all(parent) {
                    tracing::error!(error = %e, "Failed to create storage directory");
                    return;
                }
            }
        }

        let data = match self.cache.read() {
            Ok(guard) => serde_json::to_string_pretty(&*guard),
            Err(e) => {
                tracing::error!(error = %e, "Failed to acquire read lock for storage");
                return;
            }
        };

        match data {
            Ok(data) => {
                if let Err(e) = fs::write(&self.storage_path, data) {
                    tracing::error!(error = %e, path = ?self.storage_path, "Failed to write storage file");
                }
            }
            Err(e) => tracing::error!(error = %e, "Failed to serialize storage data"),
        }
    }
}

fn load_file(path: &Path) -> HashMap<String, String> {
    if !path.exists() {
        return HashMap::new();
    }
    match fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str::<HashMap<String, String>>(&data) {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to parse storage file");
                HashMap::new()
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read storage file");
            HashMap::new()
        }
    }
}

impl StorageProvider for FileStorage {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        let encoded = match self.cache.read() {
            Ok(guard) => guard.get(key).cloned()?,
            Err(e) => {
                tracing::error!(error = %e, "Failed to acquire read lock for storage");
                return None;
            }
        };
        match hex::decode(&encoded) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                tracing::warn!(key, error = %e, "Stored value is not valid hex");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &[u8]) {
        match self.cache.write() {
            Ok(mut guard) => {
                guard.insert(key.to_string(), hex::encode(value));
                drop(guard); // Release lock before I/O
                self.persist();
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to acquire write lock for storage");
            }
        }
    }
}

/// Default probe target (Cloudflare DNS over TCP).
pub const DEFAULT_PROBE_ADDR: &str = "1.1.1.1:53";

/// Reachability monitor fed by periodic TCP connect probes
///
/// Starts out online; the first failed probe flips it.
#[derive(Clone)]
pub struct NetworkMonitor {
    online: Arc<AtomicBool>,
}

impl Default for NetworkMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkMonitor {
    pub fn new() -> Self {
        Self {
            online: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Probe `addr` every `interval` until the returned task is aborted.
    pub fn start(&self, addr: String, interval: Duration) -> JoinHandle<()> {
        let online = Arc::clone(&self.online);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                let reachable = probe(&addr, interval).await;
                let was = online.swap(reachable, Ordering::Relaxed);
                if was != reachable {
                    tracing::info!(online = reachable, probe = %addr, "Connectivity changed");
                }
            }
        })
    }
}

impl ConnectivityProvider for NetworkMonitor {
    fn is_online(&self) -> bool {
        self.online.load(Ordering::Relaxed)
    }
}

/// One TCP connect attempt bounded by `timeout`.
pub async fn probe(addr: &str, timeout: Duration) -> bool {
    matches!(
        tokio::time::timeout(timeout, TcpStream::connect(addr)).await,
        Ok(Ok(_))
    )
}

/// Desktop platform plus the background tasks it started
pub struct DesktopPlatform {
    pub platform: Platform,
    /// Connectivity probe loop; absent when forced offline
    pub monitor: Option<JoinHandle<()>>,
}

/// Create platform services for desktop
///
/// Must be called from within a tokio runtime when a network monitor is used.
pub fn create_platform(config: &AppConfig) -> Result<DesktopPlatform, DirectoryError> {
    let rest = RestCountriesClient::new(&config.directory.base_url, config.directory.timeout)?;
    tracing::info!(url = %rest.endpoint(), "Using country directory");
    let directory = Arc::new(ResilientDirectory::new(
        Arc::new(rest),
        config.retry_config(),
    ));

    let location: Arc<dyn LocationPort> = match &config.location.source {
        LocationSource::Fixed(country) => Arc::new(FixedLocation::new(country.clone())),
        LocationSource::Geolocation { url } => {
            Arc::new(IpGeolocation::new(url.clone(), config.location.timeout))
        }
    };

    let (connectivity, monitor): (Arc<dyn ConnectivityProvider>, _) =
        if config.connectivity.force_offline {
            (Arc::new(StaticConnectivity::offline()), None)
        } else {
            let monitor = NetworkMonitor::new();
            let task = monitor.start(
                config.connectivity.probe_addr.clone(),
                config.connectivity.probe_interval,
            );
            (Arc::new(monitor), Some(task))
        };

    let storage: Arc<dyn StorageProvider> = match &config.storage {
        StorageBackend::File { path: Some(path) } => Arc::new(FileStorage::at(path)),
        StorageBackend::File { path: None } => Arc::new(FileStorage::new()),
        StorageBackend::Memory => Arc::new(MemoryStorage::new()),
    };

    Ok(DesktopPlatform {
        platform: Platform::new(directory, location, connectivity, storage, Arc::new(SystemClock)),
        monitor,
    })
}
