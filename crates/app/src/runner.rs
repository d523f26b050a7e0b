//! Composition of the selection manager and the terminal front-end

use tokio::io::{AsyncBufRead, AsyncWrite, BufReader};

use crate::application::{SelectionManager, SelectionSettings};
use crate::state::Platform;
use crate::ui::{Repl, ReplError};

pub struct RunnerDeps {
    pub platform: Platform,
    pub settings: SelectionSettings,
}

/// Run an interactive session on stdin/stdout.
pub async fn run(deps: RunnerDeps) -> Result<(), ReplError> {
    run_with(deps, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
}

/// Run a session over arbitrary input and output streams.
pub async fn run_with<R, W>(deps: RunnerDeps, input: R, output: W) -> Result<(), ReplError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let RunnerDeps { platform, settings } = deps;

    tracing::info!(
        capacity = settings.capacity,
        default_country = %settings.default_country,
        "Starting selection manager"
    );
    let handle = SelectionManager::new(&platform, settings).spawn();

    Repl::new(handle, platform.connectivity(), input, output)
        .run()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::shortlist_store::decode;
    use crate::infrastructure::geolocation::FixedLocation;
    use crate::infrastructure::platform::{FixedClock, MemoryStorage, StaticConnectivity};
    use crate::infrastructure::testing::{sample_catalog, StubDirectory};
    use crate::ports::outbound::{storage_keys, StorageProvider};
    use chrono::Utc;
    use std::sync::Arc;

    #[tokio::test]
    async fn session_changes_are_saved() {
        let storage = MemoryStorage::new();
        let platform = Platform::new(
            Arc::new(StubDirectory::returning(sample_catalog())),
            Arc::new(FixedLocation::unknown()),
            Arc::new(StaticConnectivity::online()),
            Arc::new(storage.clone()),
            Arc::new(FixedClock(Utc::now())),
        );
        let deps = RunnerDeps {
            platform,
            settings: SelectionSettings::default(),
        };

        let mut output = Vec::new();
        run_with(deps, "add egypt\nlist\nquit\n".as_bytes(), &mut output)
            .await
            .unwrap();

        let out = String::from_utf8(output).unwrap();
        assert!(out.contains("Added Egypt at position 2."));
        assert!(out.contains("Shortlist (2/5):\n  1. Russia\n  2. Egypt"));

        let blob = storage.get(storage_keys::SAVED_COUNTRIES).unwrap();
        let saved = decode(&blob, 5).unwrap();
        let names: Vec<&str> = saved.iter().map(|c| c.common_name().as_str()).collect();
        assert_eq!(names, vec!["Russia", "Egypt"]);
    }
}
