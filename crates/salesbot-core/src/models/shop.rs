use serde::{Deserialize, Serialize};

/// An entry of the backend's shop directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    pub name: String,
}

/// Sort shops by name, ignoring case, the way the upload form lists them.
pub fn sort_shops(shops: &mut [Shop]) {
    shops.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
}
