//! Cooking-method detection over the whole sentence.

use crate::reference::{CookingMethod, ReferenceData};

/// First method (in store order) whose name appears anywhere in `text`,
/// falling back to `default_method`.
///
/// `None` only when neither a keyword matches nor the default exists in the
/// store; every item of the request is dropped in that case.
pub fn detect_method<'a>(text: &str, store: &'a ReferenceData, default_method: &str) -> Option<&'a CookingMethod> {
    store
        .methods()
        .iter()
        .find(|m| text.contains(m.name.as_str()))
        .or_else(|| store.method(default_method))
}
