use crate::graph_exploration::domain::PackageName;
use crate::ports::outbound::DependencySource;
use crate::shared::Result;
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// CachingDependencySource wraps a DependencySource and adds in-memory caching.
///
/// This adapter implements the decorator pattern to add caching and an
/// optional request budget to any DependencySource implementation. The cache
/// lives as long as the decorator, so it can be shared by several builds.
///
/// # Architecture
/// In hexagonal architecture, caching is an implementation detail of the adapter layer.
/// The graph builder only asks for dependency lists - whether they come from
/// cache or the registry is transparent to it.
///
/// # Request budget
/// Once `max_requests` calls have reached the inner source, uncached packages
/// resolve to an empty list and are recorded as degraded. Errors are never
/// cached, but a failed call still counts against the budget.
pub struct CachingDependencySource<S: DependencySource> {
    inner: S,
    cache: Arc<DashMap<PackageName, Vec<PackageName>>>,
    max_requests: Option<usize>,
    requests: AtomicUsize,
    degraded: Mutex<Vec<PackageName>>,
    budget_warned: AtomicBool,
}

impl<S: DependencySource> CachingDependencySource<S> {
    /// Creates a new caching source without a request budget
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: Arc::new(DashMap::new()),
            max_requests: None,
            requests: AtomicUsize::new(0),
            degraded: Mutex::new(Vec::new()),
            budget_warned: AtomicBool::new(false),
        }
    }

    /// Limits the number of calls forwarded to the inner source
    pub fn with_max_requests(mut self, max_requests: Option<usize>) -> Self {
        self.max_requests = max_requests;
        self
    }

    /// Number of calls forwarded to the inner source so far
    pub fn requests_issued(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Returns the current cache size (for testing/monitoring)
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    /// Reserves one request from the budget; false once it is exhausted
    fn try_acquire(&self) -> bool {
        match self.max_requests {
            None => {
                self.requests.fetch_add(1, Ordering::SeqCst);
                true
            }
            Some(limit) => self
                .requests
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |issued| {
                    (issued < limit).then_some(issued + 1)
                })
                .is_ok(),
        }
    }

    fn record_degraded(&self, package: &PackageName) {
        if !self.budget_warned.swap(true, Ordering::SeqCst) {
            tracing::warn!(
                max_requests = self.max_requests.unwrap_or_default(),
                "request budget exhausted; remaining packages will not be explored"
            );
        }
        let mut degraded = match self.degraded.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if !degraded.contains(package) {
            degraded.push(package.clone());
        }
    }
}

impl<S: DependencySource> DependencySource for CachingDependencySource<S> {
    fn resolve(&self, package: &PackageName) -> Result<Vec<PackageName>> {
        // Check cache first
        if let Some(cached) = self.cache.get(package) {
            tracing::trace!(package = %package, "cache hit");
            return Ok(cached.clone());
        }

        if !self.try_acquire() {
            self.record_degraded(package);
            return Ok(Vec::new());
        }

        // Cache miss: fetch from inner source
        let dependencies = self.inner.resolve(package)?;

        // Store in cache
        self.cache.insert(package.clone(), dependencies.clone());

        Ok(dependencies)
    }

    fn known_packages(&self) -> Option<Vec<PackageName>> {
        self.inner.known_packages()
    }

    fn degraded_packages(&self) -> Vec<PackageName> {
        match self.degraded.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn describe(&self) -> String {
        self.inner.describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock source for testing that tracks call counts
    struct MockDependencySource {
        call_count: AtomicUsize,
        fail: bool,
    }

    impl MockDependencySource {
        fn new() -> Self {
            Self {
                call_count: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                call_count: AtomicUsize::new(0),
                fail: true,
            }
        }

        fn get_call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    impl DependencySource for MockDependencySource {
        fn resolve(&self, package: &PackageName) -> Result<Vec<PackageName>> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("registry unreachable");
            }
            Ok(vec![PackageName::new(format!("{}-dep", package))?])
        }

        fn describe(&self) -> String {
            "mock".to_string()
        }
    }

    fn name(s: &str) -> PackageName {
        PackageName::new(s).unwrap()
    }

    #[test]
    fn test_caching_source_returns_cached_value() {
        let caching = CachingDependencySource::new(MockDependencySource::new());

        // First call - should hit the inner source
        let result1 = caching.resolve(&name("requests")).unwrap();
        assert_eq!(result1, vec![name("requests-dep")]);
        assert_eq!(caching.inner.get_call_count(), 1);

        // Second call - should return cached value
        let result2 = caching.resolve(&name("requests")).unwrap();
        assert_eq!(result2, result1);
        // Call count should still be 1 (cached)
        assert_eq!(caching.inner.get_call_count(), 1);

        assert_eq!(caching.cache_size(), 1);
    }

    #[test]
    fn test_caching_source_different_packages_cached_separately() {
        let caching = CachingDependencySource::new(MockDependencySource::new());

        caching.resolve(&name("requests")).unwrap();
        caching.resolve(&name("flask")).unwrap();

        assert_eq!(caching.inner.get_call_count(), 2);
        assert_eq!(caching.cache_size(), 2);
    }

    #[test]
    fn test_package_names_are_case_sensitive_keys() {
        let caching = CachingDependencySource::new(MockDependencySource::new());

        caching.resolve(&name("Flask")).unwrap();
        caching.resolve(&name("flask")).unwrap();

        assert_eq!(caching.inner.get_call_count(), 2);
    }

    #[test]
    fn test_budget_exhaustion_returns_empty_and_records_degraded() {
        let caching =
            CachingDependencySource::new(MockDependencySource::new()).with_max_requests(Some(2));

        assert_eq!(caching.resolve(&name("a")).unwrap().len(), 1);
        assert_eq!(caching.resolve(&name("b")).unwrap().len(), 1);
        assert!(caching.resolve(&name("c")).unwrap().is_empty());
        assert!(caching.resolve(&name("d")).unwrap().is_empty());
        assert!(caching.resolve(&name("c")).unwrap().is_empty());

        assert_eq!(caching.inner.get_call_count(), 2);
        assert_eq!(caching.requests_issued(), 2);
        assert_eq!(caching.degraded_packages(), vec![name("c"), name("d")]);
    }

    #[test]
    fn test_cached_entries_survive_budget_exhaustion() {
        let caching =
            CachingDependencySource::new(MockDependencySource::new()).with_max_requests(Some(1));

        caching.resolve(&name("a")).unwrap();
        caching.resolve(&name("b")).unwrap();

        assert_eq!(caching.resolve(&name("a")).unwrap(), vec![name("a-dep")]);
        assert_eq!(caching.degraded_packages(), vec![name("b")]);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let caching = CachingDependencySource::new(MockDependencySource::failing());

        assert!(caching.resolve(&name("a")).is_err());
        assert!(caching.resolve(&name("a")).is_err());

        assert_eq!(caching.inner.get_call_count(), 2);
        assert_eq!(caching.cache_size(), 0);
        assert!(caching.degraded_packages().is_empty());
    }

    #[test]
    fn test_unlimited_budget_never_degrades() {
        let caching = CachingDependencySource::new(MockDependencySource::new());

        for i in 0..50 {
            caching.resolve(&name(&format!("pkg{}", i))).unwrap();
        }

        assert_eq!(caching.requests_issued(), 50);
        assert!(caching.degraded_packages().is_empty());
    }

    #[test]
    fn test_delegates_description_and_known_packages() {
        let caching = CachingDependencySource::new(MockDependencySource::new());
        assert_eq!(caching.describe(), "mock");
        assert!(caching.known_packages().is_none());
    }
}
