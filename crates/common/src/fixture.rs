//! Fixture composition layer
//!
//! A registry of named, lazily-constructed, per-test-scoped dependencies.
//! Each fixture declares the names it consumes and an async initializer;
//! `resolve` orders the graph topologically, constructs each fixture at most
//! once per test, injects resolved values by name, and collects teardowns to
//! run in reverse construction order after the test body.
//!
//! Name collisions and dependency cycles are composition-time errors, raised
//! before any initializer runs.

use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::debug;

use crate::error::{Error, Result};

/// A resolved fixture value, shared between all dependents within one test
pub type FixtureValue = Arc<dyn Any + Send + Sync>;

/// Teardown to run after the consuming scope completes
pub type Teardown = BoxFuture<'static, ()>;

type InitFn = Box<dyn Fn(Resolved) -> BoxFuture<'static, Result<FixtureOutput>> + Send + Sync>;

/// What an initializer yields: the value, plus an optional teardown
pub struct FixtureOutput {
    pub value: FixtureValue,
    pub teardown: Option<Teardown>,
}

impl FixtureOutput {
    pub fn value<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            value: Arc::new(value),
            teardown: None,
        }
    }

    /// Hand an already-shared value to dependents.
    pub fn shared(value: FixtureValue) -> Self {
        Self {
            value,
            teardown: None,
        }
    }

    pub fn with_teardown<F>(mut self, teardown: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.teardown = Some(Box::pin(teardown));
        self
    }
}

/// The dependency values injected into an initializer, keyed by name
#[derive(Clone, Default)]
pub struct Resolved {
    values: HashMap<String, FixtureValue>,
}

impl Resolved {
    /// Fetch a dependency by name, downcast to its concrete type.
    pub fn get<T: Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>> {
        let value = self
            .values
            .get(name)
            .ok_or_else(|| Error::UnknownFixture(name.to_string()))?;
        value
            .clone()
            .downcast::<T>()
            .map_err(|_| Error::FixtureType {
                name: name.to_string(),
            })
    }
}

struct FixtureDef {
    deps: Vec<String>,
    init: InitFn,
}

/// Registry mapping fixture names to (dependencies, initializer) pairs
#[derive(Default)]
pub struct FixtureRegistry {
    defs: BTreeMap<String, FixtureDef>,
}

impl FixtureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fixture. Duplicate names are rejected immediately.
    pub fn provide<F>(&mut self, name: &str, deps: &[&str], init: F) -> Result<()>
    where
        F: Fn(Resolved) -> BoxFuture<'static, Result<FixtureOutput>> + Send + Sync + 'static,
    {
        if self.defs.contains_key(name) {
            return Err(Error::FixtureCollision(name.to_string()));
        }
        self.defs.insert(
            name.to_string(),
            FixtureDef {
                deps: deps.iter().map(|d| d.to_string()).collect(),
                init: Box::new(init),
            },
        );
        Ok(())
    }

    /// Register a dependency-less constant.
    pub fn provide_value<T: Any + Send + Sync>(&mut self, name: &str, value: T) -> Result<()> {
        let shared: FixtureValue = Arc::new(value);
        self.provide(name, &[], move |_| {
            let value = shared.clone();
            Box::pin(async move { Ok(FixtureOutput::shared(value)) })
        })
    }

    /// Merge another fixture set into this namespace; a conflicting name is a
    /// configuration error detected here, not at test run time.
    pub fn merge(&mut self, other: FixtureRegistry) -> Result<()> {
        for (name, def) in other.defs {
            if self.defs.contains_key(&name) {
                return Err(Error::FixtureCollision(name));
            }
            self.defs.insert(name, def);
        }
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.defs.contains_key(name)
    }

    /// Topological order covering `requested` and everything it depends on.
    fn order_for(&self, requested: &[&str]) -> Result<Vec<String>> {
        let mut state: HashMap<String, u8> = HashMap::new();
        let mut path = Vec::new();
        let mut order = Vec::new();
        for name in requested {
            self.visit(name, &mut state, &mut path, &mut order)?;
        }
        Ok(order)
    }

    fn visit(
        &self,
        name: &str,
        state: &mut HashMap<String, u8>,
        path: &mut Vec<String>,
        order: &mut Vec<String>,
    ) -> Result<()> {
        match state.get(name) {
            Some(2) => return Ok(()),
            Some(1) => {
                let start = path.iter().position(|n| n == name).unwrap_or(0);
                let mut cycle = path[start..].to_vec();
                cycle.push(name.to_string());
                return Err(Error::FixtureCycle(cycle));
            }
            _ => {}
        }
        let def = self
            .defs
            .get(name)
            .ok_or_else(|| Error::UnknownFixture(name.to_string()))?;

        state.insert(name.to_string(), 1);
        path.push(name.to_string());
        for dep in &def.deps {
            self.visit(dep, state, path, order)?;
        }
        path.pop();
        state.insert(name.to_string(), 2);
        order.push(name.to_string());
        Ok(())
    }

    /// Resolve a set of fixture names for one test execution.
    ///
    /// Initializers run sequentially in dependency order; each completes
    /// fully before any dependent sees its value, and runs at most once no
    /// matter how many consumers requested it.
    pub async fn resolve(&self, requested: &[&str]) -> Result<Fixtures> {
        let order = self.order_for(requested)?;
        let mut resolved = Resolved::default();
        let mut teardowns: Vec<(String, Teardown)> = Vec::new();

        for name in order {
            let def = self
                .defs
                .get(&name)
                .ok_or_else(|| Error::UnknownFixture(name.clone()))?;

            // Initializers see only the dependencies they declared.
            let mut view = Resolved::default();
            for dep in &def.deps {
                let value = resolved
                    .values
                    .get(dep)
                    .cloned()
                    .ok_or_else(|| Error::UnknownFixture(dep.clone()))?;
                view.values.insert(dep.clone(), value);
            }

            debug!(fixture = %name, "constructing fixture");
            let output = (def.init)(view).await?;
            resolved.values.insert(name.clone(), output.value);
            if let Some(teardown) = output.teardown {
                teardowns.push((name, teardown));
            }
        }

        Ok(Fixtures {
            resolved,
            teardowns,
        })
    }
}

/// The resolved object graph for one test
pub struct Fixtures {
    resolved: Resolved,
    teardowns: Vec<(String, Teardown)>,
}

impl std::fmt::Debug for Fixtures {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fixtures").finish_non_exhaustive()
    }
}

impl Fixtures {
    pub fn get<T: Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>> {
        self.resolved.get(name)
    }

    /// Run teardowns in reverse construction order.
    pub async fn teardown(mut self) {
        while let Some((name, teardown)) = self.teardowns.pop() {
            debug!(fixture = %name, "tearing down fixture");
            teardown.await;
        }
    }
}
