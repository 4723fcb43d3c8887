use serde::{Deserialize, Serialize};

/// A named, ordered collection of item URLs (`/item_lists/<id>.json`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemList {
    #[serde(alias = "Name")]
    pub name: String,

    /// Number of items the server reports for the list.
    #[serde(alias = "Num_items")]
    pub num_items: u64,

    /// Absolute item URLs, in list order.
    #[serde(alias = "Items")]
    pub items: Vec<String>,
}

/// One entry of the `/item_lists.json` catalogue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemListIdentifier {
    pub name: String,

    /// URL of the full [`ItemList`].
    pub item_list_url: String,

    pub num_items: u64,

    /// Whether the list is shared with the caller rather than owned.
    pub shared: bool,
}

/// All item lists visible to the caller.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemLists {
    /// Lists owned by the caller.
    pub own: Vec<ItemListIdentifier>,

    /// Lists other users share with the caller.
    pub shared: Vec<ItemListIdentifier>,
}

impl ItemLists {
    /// Iterates over owned lists first, then shared ones.
    pub fn iter(&self) -> impl Iterator<Item = &ItemListIdentifier> {
        self.own.iter().chain(self.shared.iter())
    }

    /// Finds a list by name, preferring an owned list over a shared one.
    pub fn find_by_name(&self, name: &str) -> Option<&ItemListIdentifier> {
        self.iter().find(|list| list.name == name)
    }
}
