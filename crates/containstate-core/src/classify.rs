//! Type classification
//!
//! Decides whether a type is atomic (compared by equality, never decomposed)
//! or compound (decomposed into elements or attributes).

use containstate_core_types::TypeKey;
use std::collections::HashSet;
use std::sync::OnceLock;

static ATOMIC_TYPES: OnceLock<HashSet<TypeKey>> = OnceLock::new();

/// The process-wide set of atomic types
///
/// Built on first use: every primitive key plus its `Nullable` wrapper.
/// Never changes afterwards.
pub fn atomic_types() -> &'static HashSet<TypeKey> {
    ATOMIC_TYPES.get_or_init(|| {
        TypeKey::PRIMITIVES
            .iter()
            .cloned()
            .chain(TypeKey::PRIMITIVES.iter().cloned().map(TypeKey::nullable))
            .collect()
    })
}

/// Whether values of `key` are compared by equality alone
///
/// Unknown keys (records, sequences, doubly wrapped nullables) are compound.
pub fn is_atomic(key: &TypeKey) -> bool {
    atomic_types().contains(key)
}
