//! Builder for creating and configuring Engine instances.

use std::path::{Path, PathBuf};

use log::{debug, info};
use tokio::task;

use super::Engine;
use crate::{
    config::{AdvisoryConfig, EngineConfig},
    db::Database,
    dialogue::{AdvisoryService, GeminiClient, OfflineAdvisor},
    error::{CoachError, Result},
    lifecycle,
    models::ChatMessage,
};

/// Builder for creating and configuring Engine instances.
pub struct EngineBuilder {
    database_path: Option<PathBuf>,
    advisor: Option<Box<dyn AdvisoryService>>,
    advisory_config: AdvisoryConfig,
    config: EngineConfig,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            advisor: None,
            advisory_config: AdvisoryConfig::default(),
            config: EngineConfig::default(),
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/evolve/evolve.db` or `~/.local/share/evolve/evolve.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Uses the given advisory service instead of one built from
    /// [`AdvisoryConfig`].
    pub fn with_advisor(mut self, advisor: impl AdvisoryService + 'static) -> Self {
        self.advisor = Some(Box::new(advisor));
        self
    }

    /// Settings for the hosted advisory service. Without an API key the
    /// engine runs offline and every turn degrades to the apology reply.
    pub fn with_advisory_config(mut self, config: AdvisoryConfig) -> Self {
        self.advisory_config = config;
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the engine: opens the database, loads the snapshot and greets
    /// on an empty transcript.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::FileSystem` if the database path is invalid
    /// Returns `CoachError::Database` if database initialization fails
    /// Returns `CoachError::Configuration` if the advisory settings are invalid
    pub async fn build(self) -> Result<Engine> {
        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| CoachError::FileSystem {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let advisor = match self.advisor {
            Some(advisor) => advisor,
            None => Self::advisor_from_config(&self.advisory_config)?,
        };

        let db_path_clone = db_path.clone();
        let (store, has_state) = task::spawn_blocking(move || {
            let db = Database::new(&db_path_clone)?;
            let has_state = db.has_user_state()?;
            Ok::<_, CoachError>((db.load_store(), has_state))
        })
        .await
        .map_err(|e| CoachError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        let mut engine = Engine {
            persisted_state: has_state.then(|| store.lifecycle_state()),
            store,
            db_path,
            advisor,
            config: self.config,
        };
        engine.store.normalize();
        let watched = lifecycle::watch(&mut engine.store).is_some();

        let greeted = engine.store.messages().is_empty();
        if greeted {
            let greeting = lifecycle::greeting(engine.store.lifecycle_state());
            engine.store.append_message(ChatMessage::model(greeting, None));
        }
        if watched || greeted {
            engine.persist().await;
        }

        info!(
            "Engine ready at {} in state {}",
            engine.db_path.display(),
            engine.store.lifecycle_state().as_str()
        );
        Ok(engine)
    }

    fn advisor_from_config(config: &AdvisoryConfig) -> Result<Box<dyn AdvisoryService>> {
        config.validate()?;
        if config.api_key.is_none() {
            debug!("No advisory API key configured, running offline");
            return Ok(Box::new(OfflineAdvisor));
        }
        let client = GeminiClient::from_config(config).map_err(|e| CoachError::Configuration {
            message: format!("Failed to create advisory client: {e}"),
        })?;
        Ok(Box::new(client))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("evolve")
            .place_data_file("evolve.db")
            .map_err(|e| CoachError::XdgDirectory(e.to_string()))
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
