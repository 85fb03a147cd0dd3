//! Dependency injection container for the threes application.
//!
//! The container owns the weight repository and turns typed configuration
//! records into ready-to-run agents.

use std::sync::Arc;

use log::{info, warn};

use super::config::{EnvironmentConfig, PlayerConfig};
use crate::{
    Result,
    adapters::BinaryWeightRepository,
    environment::RandomEnvironment,
    ntuple::{DEFAULT_PATTERN_COUNT, PatternSet},
    ports::WeightRepository,
    td_learning::{NTupleNetwork, TdPlayer},
};

/// Application with dependency injection.
///
/// # Examples
///
/// ## Production usage
///
/// ```
/// use threes_td::app::{App, PlayerConfig};
///
/// let app = App::new();
/// let player = app.create_player(PlayerConfig::new("td").with_init(8))?;
/// assert_eq!(player.network().weights().len(), 8);
/// # Ok::<(), threes_td::Error>(())
/// ```
///
/// ## Testing with dependency injection
///
/// ```
/// use threes_td::app::App;
/// use threes_td::adapters::InMemoryRepository;
///
/// let app = App::for_testing()
///     .with_repository(InMemoryRepository::new())
///     .with_default_seed(42)
///     .build();
/// ```
pub struct App {
    /// Repository for weight persistence
    weight_repository: Arc<dyn WeightRepository + Send + Sync>,
    /// Default random seed (None = non-deterministic)
    default_seed: Option<u64>,
}

impl App {
    /// Create a new app with production defaults.
    ///
    /// Uses:
    /// - `BinaryWeightRepository` for weight files
    /// - No default seed (non-deterministic RNG)
    pub fn new() -> Self {
        Self {
            weight_repository: Arc::new(BinaryWeightRepository::new()),
            default_seed: None,
        }
    }

    /// Create a builder for constructing app with custom dependencies.
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    /// Get the weight repository.
    pub fn weight_repository(&self) -> Arc<dyn WeightRepository + Send + Sync> {
        Arc::clone(&self.weight_repository)
    }

    /// Create the learning player.
    ///
    /// With `load` set the tables come from the repository and the pattern set
    /// follows the stored table count; otherwise fresh zero tables are built
    /// over the first `init` patterns (eight when unset). A `save` path makes
    /// the player write its weights back through the same repository.
    ///
    /// # Errors
    ///
    /// Any load failure (missing or malformed file) is returned unchanged.
    pub fn create_player(&self, config: PlayerConfig) -> Result<TdPlayer> {
        let network = match &config.load {
            Some(path) => {
                if config.init.is_some() {
                    warn!("both init and load given for {}; using loaded weights", config.name);
                }
                let weights = self.weight_repository.load(path)?;
                NTupleNetwork::from_weights(weights)?
            }
            None => {
                let count = config.init.unwrap_or(DEFAULT_PATTERN_COUNT);
                NTupleNetwork::new(PatternSet::first(count)?)
            }
        };
        info!(
            "created player {} with {} tuple patterns (alpha = {})",
            config.name,
            network.patterns().len(),
            config.alpha
        );

        let mut player = TdPlayer::new(config.name, network, config.alpha);
        if let Some(path) = config.save {
            player = player.with_save_target(self.weight_repository(), path);
        }
        Ok(player)
    }

    /// Create the tile-inserting environment.
    ///
    /// The config seed wins over the container default.
    pub fn create_environment(&self, config: EnvironmentConfig) -> RandomEnvironment {
        match config.seed.or(self.default_seed) {
            Some(seed) => RandomEnvironment::with_seed(config.name, seed),
            None => RandomEnvironment::new(config.name),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing app with custom dependencies.
///
/// Primarily used for testing to inject in-memory repositories and control
/// randomness.
pub struct AppBuilder {
    weight_repository: Option<Arc<dyn WeightRepository + Send + Sync>>,
    default_seed: Option<u64>,
}

impl AppBuilder {
    /// Create a new app builder.
    pub fn new() -> Self {
        Self {
            weight_repository: None,
            default_seed: None,
        }
    }

    /// Set a custom weight repository.
    pub fn with_repository<R: WeightRepository + Send + Sync + 'static>(
        mut self,
        repo: R,
    ) -> Self {
        self.weight_repository = Some(Arc::new(repo));
        self
    }

    /// Set a default random seed for every environment created by this container.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    /// Build the app with the configured dependencies.
    ///
    /// If no repository was specified, uses `BinaryWeightRepository`.
    pub fn build(self) -> App {
        App {
            weight_repository: self
                .weight_repository
                .unwrap_or_else(|| Arc::new(BinaryWeightRepository::new())),
            default_seed: self.default_seed,
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::{
        Error,
        adapters::InMemoryRepository,
        ports::Agent,
        td_learning::WeightTable,
        threes::{Action, Board},
    };

    #[test]
    fn test_app_creates_default_player() {
        let app = App::for_testing()
            .with_repository(InMemoryRepository::new())
            .build();
        let player = app.create_player(PlayerConfig::default()).unwrap();
        assert_eq!(player.network().patterns().len(), DEFAULT_PATTERN_COUNT);
        assert_eq!(player.name(), "td");
        assert_eq!(player.save_path(), None);
    }

    #[test]
    fn test_init_selects_pattern_prefix() {
        let app = App::for_testing()
            .with_repository(InMemoryRepository::new())
            .build();
        let player = app
            .create_player(PlayerConfig::new("p").with_init(17))
            .unwrap();
        assert_eq!(player.network().weights().len(), 17);
    }

    #[test]
    fn test_load_uses_stored_table_count() {
        let repo = InMemoryRepository::new();
        let mut weights = WeightTable::zeroed(12);
        weights.accumulate(3, 42, 1.25);
        repo.save(&weights, Path::new("stored")).unwrap();

        let app = App::for_testing().with_repository(repo).build();
        let player = app
            .create_player(PlayerConfig::new("p").with_init(8).with_load("stored"))
            .unwrap();
        assert_eq!(player.network().patterns().len(), 12);
        assert_eq!(player.network().weights().get(3, 42), 1.25);
    }

    #[test]
    fn test_missing_load_is_an_error() {
        let app = App::for_testing()
            .with_repository(InMemoryRepository::new())
            .build();
        let result = app.create_player(PlayerConfig::new("p").with_load("nowhere"));
        assert!(matches!(result, Err(Error::MissingWeights { .. })));
    }

    #[test]
    fn test_save_goes_through_injected_repository() {
        let repo = InMemoryRepository::new();
        let app = App::for_testing().with_repository(repo.clone()).build();
        {
            let player = app
                .create_player(PlayerConfig::new("p").with_save("out"))
                .unwrap();
            assert_eq!(player.save_path(), Some(Path::new("out")));
        }
        assert!(repo.contains(Path::new("out")));
    }

    #[test]
    fn test_config_seed_overrides_app_default() {
        let app = App::for_testing().with_default_seed(42).build();
        let board = Board::new();

        let mut a = app.create_environment(EnvironmentConfig::default());
        let mut b = app.create_environment(EnvironmentConfig::default());
        let mut c = app.create_environment(EnvironmentConfig::default().with_seed(42));
        for _ in 0..5 {
            let action: Action = a.take_action(&board);
            assert_eq!(action, b.take_action(&board));
            assert_eq!(action, c.take_action(&board));
        }
    }
}
