//! Hash containers shared by the type cells and the introspector.

use core::any::TypeId;
use core::hash::BuildHasher;

use foldhash::fast::{FixedState, FoldHasher};

/// A fixed hash seed.
const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x6A09E667F3BCC908);

/// Fixed hash state based on `foldhash`, stable across runs.
#[derive(Copy, Clone, Default, Debug)]
pub(crate) struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FoldHasher<'static>;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

/// A `hashbrown` map using [`FixedHashState`].
pub(crate) type FixedHashMap<K, V> = hashbrown::HashMap<K, V, FixedHashState>;

/// A map keyed by [`TypeId`].
pub(crate) type TypeIdMap<V> = FixedHashMap<TypeId, V>;

/// Creates an empty [`FixedHashMap`], usable in `static` initializers.
#[inline]
pub(crate) const fn new_fixed_map<K, V>() -> FixedHashMap<K, V> {
    hashbrown::HashMap::with_hasher(FixedHashState)
}
