use std::{
    any::{Any, type_name},
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use chanlog_core::{ChannelLevel, Error, Result, Severity};

/// State shared by every handle on a channel.
#[derive(Debug)]
pub(crate) struct ChannelState {
    pub(crate) name: String,
    pub(crate) level: ChannelLevel,
}

/// Backend instance bound to a channel, with the name of its concrete type.
struct BoundBackend {
    instance: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

struct ChannelEntry {
    state: Arc<ChannelState>,
    backend: Option<BoundBackend>,
}

type ChannelMap = HashMap<String, ChannelEntry>;

/// Channel name to channel state, behind a single lock.
///
/// Entries live until [`Registry::clear`]. Channel state and backends are
/// reference counted, so handles stay valid while the map changes.
#[derive(Default)]
pub(crate) struct Registry {
    channels: Mutex<ChannelMap>,
}

impl Registry {
    fn lock(&self) -> MutexGuard<'_, ChannelMap> {
        self.channels.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert-if-absent. Callers must already hold the lock.
    fn register<'m>(map: &'m mut ChannelMap, name: &str, level: Severity) -> &'m mut ChannelEntry {
        map.entry(name.to_owned()).or_insert_with(|| {
            log::debug!(target: "chanlog", "registering channel {name} at {level}");
            ChannelEntry {
                state: Arc::new(ChannelState {
                    name: name.to_owned(),
                    level: ChannelLevel::new(level),
                }),
                backend: None,
            }
        })
    }

    fn downcast<B: Send + Sync + 'static>(name: &str, bound: &BoundBackend) -> Result<Arc<B>> {
        Arc::clone(&bound.instance)
            .downcast::<B>()
            .map_err(|_| Error::BackendMismatch {
                channel: name.to_owned(),
                bound: bound.type_name,
                requested: type_name::<B>(),
            })
    }

    /// Returns the channel state and its backend, creating either on first
    /// use.
    ///
    /// `factory` runs without the registry lock, so it may use the registry
    /// itself. Threads racing on an unbound channel may each run their
    /// factory; the first backend bound wins and the others are dropped.
    pub(crate) fn get_or_create<B, F>(
        &self,
        name: &str,
        default_level: Severity,
        factory: F,
    ) -> Result<(Arc<ChannelState>, Arc<B>)>
    where
        B: Send + Sync + 'static,
        F: FnOnce(&str) -> B,
    {
        {
            let mut map = self.lock();
            let entry = Self::register(&mut map, name, default_level);
            if let Some(bound) = &entry.backend {
                let backend = Self::downcast(name, bound)?;
                return Ok((Arc::clone(&entry.state), backend));
            }
        }
        let candidate = Arc::new(factory(name));
        let mut map = self.lock();
        // the entry may have been cleared while the factory ran
        let entry = Self::register(&mut map, name, default_level);
        let state = Arc::clone(&entry.state);
        if let Some(bound) = &entry.backend {
            log::debug!(target: "chanlog", "channel {name} bound concurrently, dropping backend");
            return Ok((state, Self::downcast(name, bound)?));
        }
        entry.backend = Some(BoundBackend {
            instance: Arc::clone(&candidate) as Arc<dyn Any + Send + Sync>,
            type_name: type_name::<B>(),
        });
        Ok((state, candidate))
    }

    /// Updates the level of `name`, registering it without a backend when
    /// it does not exist yet.
    pub(crate) fn set_level(&self, name: &str, level: Severity) {
        let mut map = self.lock();
        match map.get(name) {
            Some(entry) => entry.state.level.set(level),
            None => {
                Self::register(&mut map, name, level);
            }
        }
    }

    pub(crate) fn level(&self, name: &str) -> Option<Severity> {
        self.lock().get(name).map(|entry| entry.state.level.get())
    }

    #[cfg(test)]
    fn has_backend(&self, name: &str) -> bool {
        self.lock()
            .get(name)
            .is_some_and(|entry| entry.backend.is_some())
    }

    pub(crate) fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.lock().keys().cloned().collect();
        names.sort();
        names
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }

    /// Drops every entry. Backends are released after the lock is gone.
    pub(crate) fn clear(&self) {
        let removed = std::mem::take(&mut *self.lock());
        log::debug!(target: "chanlog", "cleared {} channels", removed.len());
        drop(removed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        sync::atomic::{AtomicUsize, Ordering},
        thread,
    };

    #[test]
    fn test_same_name_same_state() {
        let registry = Registry::default();
        let (a, backend_a) = registry
            .get_or_create("Root", Severity::Debug, |_| 1u32)
            .unwrap();
        let (b, backend_b) = registry
            .get_or_create("Root", Severity::Debug, |_| 2u32)
            .unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(Arc::ptr_eq(&backend_a, &backend_b));
        assert_eq!(*backend_b, 1);
        a.level.set(Severity::Crit);
        assert_eq!(b.level.get(), Severity::Crit);
    }

    #[test]
    fn test_factory_receives_channel_name() {
        let registry = Registry::default();
        let (_, backend) = registry
            .get_or_create("Net", Severity::Debug, |name| format!("<{name}>"))
            .unwrap();
        assert_eq!(backend.as_str(), "<Net>");
    }

    #[test]
    fn test_backend_type_mismatch() {
        let registry = Registry::default();
        registry
            .get_or_create("Root", Severity::Debug, |_| 1u32)
            .unwrap();
        let err = registry
            .get_or_create("Root", Severity::Debug, |_| String::new())
            .unwrap_err();
        match err {
            Error::BackendMismatch {
                channel,
                bound,
                requested,
            } => {
                assert_eq!(channel, "Root");
                assert_eq!(bound, type_name::<u32>());
                assert_eq!(requested, type_name::<String>());
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_set_level_pre_registers_without_backend() {
        let registry = Registry::default();
        registry.set_level("Late", Severity::Error);
        assert_eq!(registry.level("Late"), Some(Severity::Error));
        assert!(!registry.has_backend("Late"));

        let (state, _) = registry
            .get_or_create("Late", Severity::Debug, |_| ())
            .unwrap();
        assert_eq!(state.level.get(), Severity::Error);
        assert!(registry.has_backend("Late"));
    }

    #[test]
    fn test_concurrent_creation_binds_one_backend() {
        let registry = Arc::new(Registry::default());
        let created = Arc::new(AtomicUsize::new(0));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let created = Arc::clone(&created);
                thread::spawn(move || {
                    registry
                        .get_or_create("Shared", Severity::Debug, |_| {
                            created.fetch_add(1, Ordering::SeqCst)
                        })
                        .unwrap()
                })
            })
            .collect();
        let bound: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!((1..=8).contains(&created.load(Ordering::SeqCst)));
        assert!(bound.windows(2).all(|w| Arc::ptr_eq(&w[0].0, &w[1].0)));
        assert!(bound.windows(2).all(|w| Arc::ptr_eq(&w[0].1, &w[1].1)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_factory_may_use_registry() {
        let registry = Registry::default();
        let (_, child) = registry
            .get_or_create("child", Severity::Debug, |name| {
                let (parent, _) = registry
                    .get_or_create("parent", Severity::Info, |_| 0u32)
                    .unwrap();
                let own = registry.level(name);
                (parent.name.clone(), own)
            })
            .unwrap();
        assert_eq!(*child, ("parent".to_owned(), Some(Severity::Debug)));
        assert_eq!(registry.names(), ["child", "parent"]);
        assert!(registry.has_backend("parent"));
    }

    #[test]
    fn test_first_bound_backend_wins() {
        let registry = Registry::default();
        let (_, outer) = registry
            .get_or_create("Root", Severity::Debug, |_| {
                let (_, inner) = registry
                    .get_or_create("Root", Severity::Debug, |_| 1u32)
                    .unwrap();
                assert_eq!(*inner, 1);
                2u32
            })
            .unwrap();
        assert_eq!(*outer, 1);
    }

    #[test]
    fn test_clear_keeps_handles_alive() {
        let registry = Registry::default();
        let (state, backend) = registry
            .get_or_create("Root", Severity::Info, |_| 7u8)
            .unwrap();
        registry.clear();
        assert_eq!(registry.len(), 0);
        assert_eq!(registry.level("Root"), None);
        assert_eq!(state.name, "Root");
        assert_eq!(*backend, 7);
    }

    #[test]
    fn test_names_sorted() {
        let registry = Registry::default();
        registry.set_level("b", Severity::Info);
        registry.set_level("a", Severity::Info);
        registry.get_or_create("c", Severity::Info, |_| ()).unwrap();
        assert_eq!(registry.names(), ["a", "b", "c"]);
    }
}
