//! Rebuildable holder of the current building snapshot

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use log::{error, info};

use crate::loading::{BuildingData, BuildingModelConfig, load_building_data};
use crate::{BuildingModel, Error, RoutingOptions, RoutingRequest, RoutingResponse, route};

/// Anything that can produce fresh building data on demand
pub trait BuildingSource: Send + Sync {
    fn load(&self) -> Result<BuildingData, Error>;

    /// Human readable origin used in log lines
    fn describe(&self) -> String {
        "in-memory building".to_string()
    }
}

impl BuildingSource for BuildingModelConfig {
    fn load(&self) -> Result<BuildingData, Error> {
        load_building_data(self)
    }

    fn describe(&self) -> String {
        self.manifest_path.display().to_string()
    }
}

impl BuildingSource for BuildingData {
    fn load(&self) -> Result<BuildingData, Error> {
        Ok(self.clone())
    }
}

/// Shared, swappable [`BuildingModel`].
///
/// Readers take an `Arc` snapshot and keep it for the whole request, so a
/// concurrent [`GraphStore::reload`] never changes a graph mid-search.
pub struct GraphStore {
    source: Box<dyn BuildingSource>,
    current: RwLock<Option<Arc<BuildingModel>>>,
    generation: AtomicU64,
}

impl std::fmt::Debug for GraphStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphStore")
            .field("source", &self.source.describe())
            .field("loaded", &self.snapshot().is_some())
            .field("generation", &self.generation())
            .finish()
    }
}

impl GraphStore {
    /// Loads the building once. A failed load is logged and the store
    /// starts without a graph; a later [`GraphStore::reload`] can fill it.
    pub fn open(source: impl BuildingSource + 'static) -> Self {
        let store = Self::empty(source);
        if let Err(err) = store.reload() {
            error!(
                "Failed to load building from {}: {err}",
                store.source.describe()
            );
        }
        store
    }

    /// Store that has not loaded anything yet
    pub fn empty(source: impl BuildingSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            current: RwLock::new(None),
            generation: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> Option<Arc<BuildingModel>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Rebuilds the model from the source and swaps it in.
    ///
    /// # Errors
    ///
    /// Returns the load error; the previous snapshot stays in place
    pub fn reload(&self) -> Result<Arc<BuildingModel>, Error> {
        info!("Loading building from {}", self.source.describe());
        let model = Arc::new(self.source.load()?.into_model());

        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&model));
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        info!("Building snapshot {generation} is live");

        Ok(model)
    }

    /// Number of successful loads so far
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot().is_some()
    }

    /// Routes on the current snapshot. Without a loaded graph every valid
    /// request is answered as unreachable.
    ///
    /// # Errors
    ///
    /// Same as [`route`]
    pub fn route(
        &self,
        request: &RoutingRequest,
        options: &RoutingOptions,
    ) -> Result<RoutingResponse, Error> {
        request.validate()?;
        match self.snapshot() {
            Some(model) => route(&model, request, options),
            None => Ok(RoutingResponse::unreachable()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::model::Floor;

    fn corridor() -> BuildingData {
        let floor = Floor::pixel("F1", 1.0)
            .with_node("A", 0.0, 0.0, "entrance")
            .with_node("B", 30.0, 40.0, "gate")
            .with_edge("A", "B", 5.0);
        BuildingData::new(vec![floor], vec![])
    }

    /// Source whose next result can be swapped by the test
    #[derive(Clone)]
    struct Scripted(Arc<Mutex<Option<BuildingData>>>);

    impl Scripted {
        fn new(data: Option<BuildingData>) -> Self {
            Self(Arc::new(Mutex::new(data)))
        }

        fn set(&self, data: Option<BuildingData>) {
            *self.0.lock().unwrap() = data;
        }
    }

    impl BuildingSource for Scripted {
        fn load(&self) -> Result<BuildingData, Error> {
            self.0
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| Error::InvalidData("source unavailable".into()))
        }
    }

    #[test]
    fn open_loads_snapshot() {
        let store = GraphStore::open(corridor());
        assert!(store.is_loaded());
        assert_eq!(store.generation(), 1);

        let response = store
            .route(&RoutingRequest::new(1, 2), &RoutingOptions::default())
            .unwrap();
        assert_eq!(response.distance, Some(5.0));
        assert_eq!(response.path_length_meters, Some(50.0));
    }

    #[test]
    fn failed_open_serves_unreachable() {
        let store = GraphStore::open(Scripted::new(None));
        assert!(!store.is_loaded());
        assert_eq!(store.generation(), 0);

        let response = store
            .route(&RoutingRequest::new(1, 2), &RoutingOptions::default())
            .unwrap();
        assert!(!response.is_reachable());
        assert!(response.path.is_empty());
    }

    #[test]
    fn validation_runs_before_graph_lookup() {
        let store = GraphStore::empty(corridor());
        let err = store
            .route(&RoutingRequest::new(0, 2), &RoutingOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
    }

    #[test]
    fn failed_reload_keeps_previous_snapshot() {
        let source = Scripted::new(Some(corridor()));
        let store = GraphStore::open(source.clone());
        let before = store.snapshot().unwrap();

        source.set(None);
        assert!(store.reload().is_err());
        assert!(Arc::ptr_eq(&before, &store.snapshot().unwrap()));
        assert_eq!(store.generation(), 1);
    }

    #[test]
    fn reload_swaps_snapshot_and_old_one_stays_usable() {
        let source = Scripted::new(Some(corridor()));
        let store = GraphStore::open(source.clone());
        let old = store.snapshot().unwrap();

        let longer = Floor::pixel("F1", 1.0)
            .with_node("A", 0.0, 0.0, "entrance")
            .with_node("B", 30.0, 40.0, "gate")
            .with_edge("A", "B", 9.0);
        source.set(Some(BuildingData::new(vec![longer], vec![])));
        store.reload().unwrap();

        assert_eq!(store.generation(), 2);
        assert!(!Arc::ptr_eq(&old, &store.snapshot().unwrap()));

        let request = RoutingRequest::new(1, 2);
        let options = RoutingOptions::default();
        assert_eq!(route(&old, &request, &options).unwrap().distance, Some(5.0));
        assert_eq!(store.route(&request, &options).unwrap().distance, Some(9.0));
    }
}
