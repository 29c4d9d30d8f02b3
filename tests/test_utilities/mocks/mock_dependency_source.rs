use dep_visualizer::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock DependencySource that records every package it is asked about
///
/// Unknown packages fail, the way a registry 404 would. The source cannot
/// enumerate its packages, so reverse queries only see the explored graph.
#[derive(Default, Clone)]
pub struct MockDependencySource {
    table: HashMap<String, Vec<String>>,
    failing: Vec<String>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockDependencySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(mut self, name: &str, dependencies: &[&str]) -> Self {
        self.table.insert(
            name.to_string(),
            dependencies.iter().map(|d| d.to_string()).collect(),
        );
        self
    }

    pub fn with_failure(mut self, name: &str) -> Self {
        self.failing.push(name.to_string());
        self
    }

    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl DependencySource for MockDependencySource {
    fn resolve(&self, package: &PackageName) -> Result<Vec<PackageName>> {
        self.calls.lock().unwrap().push(package.to_string());

        if self.failing.iter().any(|f| f == package.as_str()) {
            anyhow::bail!("simulated outage for {}", package);
        }
        match self.table.get(package.as_str()) {
            Some(deps) => deps.iter().map(|d| PackageName::new(d.as_str())).collect(),
            None => anyhow::bail!("package {} not found", package),
        }
    }

    fn describe(&self) -> String {
        "mock source".to_string()
    }
}
