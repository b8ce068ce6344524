use std::any::{type_name, Any};
use std::fmt;

use dashmap::DashMap;

use crate::errors::CacheError;
use crate::step::StepId;

/// Clave de cache: (identidad del step dueño, clave textual).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub owner: StepId,
    pub key: String,
}

impl CacheKey {
    pub fn new(owner: StepId, key: impl Into<String>) -> Self {
        Self { owner, key: key.into() }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.owner, self.key)
    }
}

type Slot = Box<dyn Any + Send + Sync>;

/// Almacén clave/valor tipado dinámicamente.
///
/// Los valores se guardan como `Any`; leer una entrada con un tipo distinto
/// al almacenado devuelve `CacheError::TypeMismatch` en lugar de fallar en
/// runtime. La memoria vive lo que viva el pipeline (no hay persistencia).
#[derive(Default)]
pub struct StepCache {
    entries: DashMap<CacheKey, Slot>,
}

impl fmt::Debug for StepCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepCache").field("entries", &self.entries.len()).finish()
    }
}

impl StepCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserta (o reemplaza) el valor de `(owner, key)`.
    pub fn insert<T>(&self, owner: StepId, key: &str, value: T)
        where T: Any + Send + Sync
    {
        self.entries.insert(CacheKey::new(owner, key), Box::new(value));
    }

    /// Devuelve una copia del valor si existe y es de tipo `T`.
    pub fn get_cloned<T>(&self, owner: StepId, key: &str) -> Result<Option<T>, CacheError>
        where T: Any + Clone
    {
        let cache_key = CacheKey::new(owner, key);
        match self.entries.get(&cache_key) {
            None => Ok(None),
            Some(slot) => {
                let value: &(dyn Any + Send + Sync) = &**slot;
                value.downcast_ref::<T>()
                     .cloned()
                     .map(Some)
                     .ok_or_else(|| mismatch::<T>(&cache_key))
            }
        }
    }

    /// Read-modify-write atómico sobre `(owner, key)`.
    ///
    /// Crea la entrada con `T::default()` si no existe y ejecuta `f` mientras
    /// se mantiene el lock exclusivo de la entrada: dos invocaciones
    /// concurrentes sobre la misma clave se serializan. `f` no debe volver a
    /// acceder a la cache (el lock no es reentrante).
    pub fn update_or_default<T, R, F>(&self, owner: StepId, key: &str, f: F) -> Result<R, CacheError>
        where T: Any + Send + Sync + Default,
              F: FnOnce(&mut T) -> R
    {
        let cache_key = CacheKey::new(owner, key);
        let mut entry = self.entries
                            .entry(cache_key.clone())
                            .or_insert_with(|| Box::new(T::default()));
        let slot: &mut (dyn Any + Send + Sync) = &mut **entry;
        match slot.downcast_mut::<T>() {
            Some(value) => Ok(f(value)),
            None => Err(mismatch::<T>(&cache_key)),
        }
    }

    pub fn contains(&self, owner: StepId, key: &str) -> bool {
        self.entries.contains_key(&CacheKey::new(owner, key))
    }

    /// Elimina la entrada; devuelve `true` si existía.
    pub fn remove(&self, owner: StepId, key: &str) -> bool {
        self.entries.remove(&CacheKey::new(owner, key)).is_some()
    }

    /// Número de entradas que pertenecen a `owner`.
    pub fn len_for(&self, owner: StepId) -> usize {
        self.entries.iter().filter(|e| e.key().owner == owner).count()
    }

    /// Elimina todas las entradas de `owner`.
    pub fn clear_owner(&self, owner: StepId) {
        self.entries.retain(|k, _| k.owner != owner);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn mismatch<T>(key: &CacheKey) -> CacheError {
    CacheError::TypeMismatch { key: key.to_string(),
                               expected: type_name::<T>().to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_namespaced_by_owner() {
        let cache = StepCache::new();
        let a = StepId::new();
        let b = StepId::new();
        cache.insert(a, "value_list", vec![1.0_f64]);
        cache.insert(b, "value_list", vec![2.0_f64, 3.0]);

        assert_eq!(cache.get_cloned::<Vec<f64>>(a, "value_list").unwrap(), Some(vec![1.0]));
        assert_eq!(cache.get_cloned::<Vec<f64>>(b, "value_list").unwrap(), Some(vec![2.0, 3.0]));
        assert_eq!(cache.len_for(a), 1);

        cache.clear_owner(a);
        assert!(!cache.contains(a, "value_list"));
        assert!(cache.contains(b, "value_list"));
    }

    #[test]
    fn wrong_type_is_reported_not_panicked() {
        let cache = StepCache::new();
        let id = StepId::new();
        cache.insert(id, "k", String::from("text"));
        let err = cache.get_cloned::<Vec<f64>>(id, "k").unwrap_err();
        assert!(matches!(err, CacheError::TypeMismatch { .. }));
        let err = cache.update_or_default::<Vec<f64>, _, _>(id, "k", |v| v.len()).unwrap_err();
        assert!(matches!(err, CacheError::TypeMismatch { .. }));
    }

    #[test]
    fn update_or_default_creates_lazily() {
        let cache = StepCache::new();
        let id = StepId::new();
        assert!(cache.is_empty());
        let len = cache.update_or_default::<Vec<f64>, _, _>(id, "buf", |v| {
                           v.push(4.0);
                           v.len()
                       })
                       .unwrap();
        assert_eq!(len, 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.remove(id, "buf"));
        assert!(!cache.remove(id, "buf"));
    }
}
