//! Session-scoped registry of SDK clients and state services.
//!
//! Instead of process-wide singletons, the host creates one [`ServiceHub`]
//! per admin session and hands it to whatever needs a proxy or a state
//! service. Dropping the hub tears the session down.
//!
//! - Key = (`type_name::<T>()`, scope); `T` is usually a trait object such as
//!   `dyn TenantManagementClient`, or a concrete state service type.
//! - Value = `Arc<T>` stored as `Box<dyn Any + Send + Sync>` and downcast on read.
//! - Scopes keep separate instances addressed by the same type, e.g. one
//!   state service per tenant being administered.
//!
//! Re-registering replaces the entry; `Arc`s already handed out stay valid.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

/// Scope used by [`ServiceHub::register`] and [`ServiceHub::get`].
pub const GLOBAL_SCOPE: &str = "global";

#[derive(Clone, Eq, PartialEq, Hash)]
pub struct TypeKey(&'static str);

impl TypeKey {
    fn of<T: ?Sized + 'static>() -> Self {
        TypeKey(std::any::type_name::<T>())
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceHubError {
    #[error("service not registered: type={type_key:?}, scope={scope}")]
    NotFound { type_key: TypeKey, scope: String },

    #[error("type mismatch in hub for type={type_key:?}, scope={scope}")]
    TypeMismatch { type_key: TypeKey, scope: String },
}

type Entry = Box<dyn Any + Send + Sync>;

#[derive(Default)]
pub struct ServiceHub {
    entries: RwLock<HashMap<(TypeKey, Arc<str>), Entry>>,
}

impl fmt::Debug for ServiceHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<_> = self.entries.read().keys().cloned().collect();
        f.debug_struct("ServiceHub").field("entries", &keys).finish()
    }
}

impl ServiceHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `service` in the global scope under type `T`.
    pub fn register<T>(&self, service: Arc<T>)
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.register_scoped::<T>(GLOBAL_SCOPE, service);
    }

    /// Register `service` in a named scope under type `T`.
    pub fn register_scoped<T>(&self, scope: impl Into<Arc<str>>, service: Arc<T>)
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let key = (TypeKey::of::<T>(), scope.into());
        tracing::trace!(type_key = ?key.0, scope = %key.1, "registering service");
        self.entries.write().insert(key, Box::new(service));
    }

    /// Fetch the global-scope service registered under `T`.
    ///
    /// # Errors
    /// Returns `ServiceHubError::NotFound` when nothing is registered.
    pub fn get<T>(&self) -> Result<Arc<T>, ServiceHubError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.get_scoped::<T>(GLOBAL_SCOPE)
    }

    /// Fetch the service registered under `T` in `scope`.
    ///
    /// # Errors
    /// Returns `ServiceHubError::NotFound` when nothing is registered, or
    /// `ServiceHubError::TypeMismatch` if the stored value has another type.
    pub fn get_scoped<T>(&self, scope: &str) -> Result<Arc<T>, ServiceHubError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let type_key = TypeKey::of::<T>();
        let entries = self.entries.read();
        let entry = entries
            .get(&(type_key.clone(), Arc::from(scope)))
            .ok_or_else(|| ServiceHubError::NotFound {
                type_key: type_key.clone(),
                scope: scope.to_owned(),
            })?;

        entry
            .downcast_ref::<Arc<T>>()
            .cloned()
            .ok_or_else(|| ServiceHubError::TypeMismatch {
                type_key,
                scope: scope.to_owned(),
            })
    }

    #[must_use]
    pub fn contains<T>(&self, scope: &str) -> bool
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.entries
            .read()
            .contains_key(&(TypeKey::of::<T>(), Arc::from(scope)))
    }

    /// Remove a service; returns it if it was present.
    pub fn remove<T>(&self, scope: &str) -> Option<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let entry = self
            .entries
            .write()
            .remove(&(TypeKey::of::<T>(), Arc::from(scope)))?;
        entry.downcast::<Arc<T>>().ok().map(|b| *b)
    }

    /// Drop every registered service, e.g. on sign-out.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Greeter: Send + Sync {
        fn greet(&self) -> String;
    }

    struct Fixed(&'static str);

    impl Greeter for Fixed {
        fn greet(&self) -> String {
            self.0.to_owned()
        }
    }

    #[test]
    fn register_and_get_trait_object() {
        let hub = ServiceHub::new();
        let greeter: Arc<dyn Greeter> = Arc::new(Fixed("hello"));
        hub.register::<dyn Greeter>(greeter.clone());

        let got = hub.get::<dyn Greeter>().unwrap();
        assert_eq!(got.greet(), "hello");
        assert!(Arc::ptr_eq(&greeter, &got));
    }

    #[test]
    fn scopes_are_independent() {
        let hub = ServiceHub::new();
        hub.register_scoped::<dyn Greeter>("tenant-a", Arc::new(Fixed("a")));
        hub.register_scoped::<dyn Greeter>("tenant-b", Arc::new(Fixed("b")));

        assert_eq!(hub.get_scoped::<dyn Greeter>("tenant-a").unwrap().greet(), "a");
        assert_eq!(hub.get_scoped::<dyn Greeter>("tenant-b").unwrap().greet(), "b");
        assert!(matches!(
            hub.get::<dyn Greeter>(),
            Err(ServiceHubError::NotFound { .. })
        ));
    }

    #[test]
    fn re_registering_replaces_but_keeps_old_arcs_alive() {
        let hub = ServiceHub::new();
        hub.register::<dyn Greeter>(Arc::new(Fixed("first")));
        let first = hub.get::<dyn Greeter>().unwrap();

        hub.register::<dyn Greeter>(Arc::new(Fixed("second")));

        assert_eq!(first.greet(), "first");
        assert_eq!(hub.get::<dyn Greeter>().unwrap().greet(), "second");
        assert_eq!(hub.len(), 1);
    }

    #[test]
    fn concrete_types_and_removal() {
        let hub = ServiceHub::new();
        hub.register(Arc::new(42_u32));
        assert!(hub.contains::<u32>(GLOBAL_SCOPE));

        let removed = hub.remove::<u32>(GLOBAL_SCOPE).unwrap();
        assert_eq!(*removed, 42);
        assert!(hub.is_empty());
        assert!(hub.remove::<u32>(GLOBAL_SCOPE).is_none());
    }

    #[test]
    fn clear_drops_everything() {
        let hub = ServiceHub::new();
        hub.register(Arc::new(1_u8));
        hub.register_scoped("other", Arc::new(2_u8));
        hub.clear();
        assert!(hub.is_empty());
    }
}
