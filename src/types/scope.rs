use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::type_registry::TypeRegistry;

/// Evaluation environment passed to every expression and rule.
///
/// Holds the type registry used to resolve enum and type names, and the random
/// generator drawn from by `RandomNumber`. A scope is owned by one caller at a
/// time; threads evaluating the same [`Converter`](super::Converter) each use
/// their own scope.
#[derive(Debug, Clone)]
pub struct Scope {
    types: Arc<TypeRegistry>,
    rng: StdRng,
}

impl Scope {
    /// A scope with only the built-in types and an entropy-seeded generator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_types(Arc::new(TypeRegistry::new()))
    }

    /// A scope with only the built-in types and a deterministic generator.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new().reseed(seed)
    }

    #[must_use]
    pub fn with_types(types: Arc<TypeRegistry>) -> Self {
        Self {
            types,
            rng: StdRng::from_entropy(),
        }
    }

    /// Replace the generator with one seeded from `seed`.
    #[must_use]
    pub fn reseed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    pub(crate) fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}
