// src/shared/patch_field.rs

use serde::{Deserialize, Serialize};

//
// ──────────────────────────────────────────────────────────
// PatchField (explicit PATCH semantics)
// ──────────────────────────────────────────────────────────
// Meaning:
// - Unset: field not provided => keep current value
// - Null: explicitly null => clear (only meaningful for optional fields)
// - Value(v): replace with v
//
// Serde behavior (use together with #[serde(default)]):
// - omitted field => Unset
// - null => Null
// - value => Value(value)
//

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatchField<T> {
    #[serde(skip)]
    Unset,
    Null,
    Value(T),
}

impl<T> Default for PatchField<T> {
    fn default() -> Self {
        PatchField::Unset
    }
}

impl<T> PatchField<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, PatchField::Unset)
    }

    pub fn is_value(&self) -> bool {
        matches!(self, PatchField::Value(_))
    }

    /// Overwrite `target` when a value was sent. `Null` is ignored because the
    /// target cannot be absent.
    pub fn apply_to(self, target: &mut T) {
        if let PatchField::Value(v) = self {
            *target = v;
        }
    }

    /// Like [`apply_to`](Self::apply_to) for optional targets, where `Null` clears.
    pub fn apply_to_option(self, target: &mut Option<T>) {
        match self {
            PatchField::Unset => {}
            PatchField::Null => *target = None,
            PatchField::Value(v) => *target = Some(v),
        }
    }
}
