//! Declarative routing table.
//!
//! Maps `(path, method)` to a value, and tells an unknown path apart from a
//! known path requested with a method it does not support.

use std::collections::HashMap;

use http::Method;

/// Result of looking a request up in a [`RoutingTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<T> {
    Matched(T),
    UnknownPath,
    UnknownMethod,
}

/// Immutable routing table, built once at startup.
#[derive(Debug)]
pub struct RoutingTable<T> {
    routes: HashMap<String, Vec<MethodRoute<T>>>,
}

/// A method bound to a routed value, see [`get`], [`post`] and [`delete`].
#[derive(Debug, Clone)]
pub struct MethodRoute<T> {
    method: Method,
    value: T,
}

impl<T: Copy> RoutingTable<T> {
    pub fn builder() -> RoutingTableBuilder<T> {
        RoutingTableBuilder { routes: HashMap::new() }
    }

    /// Exact match on the path, then on the method.
    pub fn at(&self, path: &str, method: &Method) -> Route<T> {
        let Some(items) = self.routes.get(path) else {
            return Route::UnknownPath;
        };

        items
            .iter()
            .find(|item| item.method == *method)
            .map_or(Route::UnknownMethod, |item| Route::Matched(item.value))
    }
}

#[derive(Debug)]
pub struct RoutingTableBuilder<T> {
    routes: HashMap<String, Vec<MethodRoute<T>>>,
}

impl<T> RoutingTableBuilder<T> {
    /// Adds a route. The first route registered for a `(path, method)` pair wins.
    #[must_use]
    pub fn route(mut self, path: impl Into<String>, item: MethodRoute<T>) -> Self {
        self.routes.entry(path.into()).or_default().push(item);
        self
    }

    pub fn build(self) -> RoutingTable<T> {
        RoutingTable { routes: self.routes }
    }
}

impl<T> MethodRoute<T> {
    pub fn new(method: Method, value: T) -> Self {
        Self { method, value }
    }
}

macro_rules! method_route {
    ($name:ident, $method:ident) => {
        pub fn $name<T>(value: T) -> MethodRoute<T> {
            MethodRoute::new(Method::$method, value)
        }
    };
}

method_route!(get, GET);
method_route!(post, POST);
method_route!(delete, DELETE);
