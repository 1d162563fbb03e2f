//! Product catalog store.
//!
//! A thin typed wrapper over the product collection. The catalog has no
//! session coupling: any caller that reaches the store may mutate it, and
//! the authorization gate lives with the caller.

use crate::Result;
use crate::backend::Backend;
use crate::collection::{ChangeCallback, Collection, Placement};
use crate::constants::CATALOG;
use crate::entity::{Entity, EntityId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Product category taxonomy.
///
/// Serialized as the display strings the catalog snapshots carry
/// (`"Phones"`, `"Laptops"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    /// Mobile phones.
    Phones,
    /// Laptops and notebooks.
    Laptops,
    /// Network routers.
    Routers,
    /// Smart and classic wristwatches.
    Wristwatches,
    /// Portable and home speakers.
    Speakers,
    /// Everything peripheral.
    Accessories,
}

impl Category {
    /// Returns the category as its serialized string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Phones => "Phones",
            Category::Laptops => "Laptops",
            Category::Routers => "Routers",
            Category::Wristwatches => "Wristwatches",
            Category::Speakers => "Speakers",
            Category::Accessories => "Accessories",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique, immutable identifier.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Price in the storefront currency. Non-negative by convention.
    pub price: f64,
    /// Category the product is listed under.
    pub category: Category,
    /// Short marketing description.
    pub description: String,
    /// Product image URL.
    pub image: String,
    /// Brand name, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

/// Partial update to a [`Product`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    /// New display name.
    pub name: Option<String>,
    /// New price.
    pub price: Option<f64>,
    /// New category.
    pub category: Option<Category>,
    /// New description.
    pub description: Option<String>,
    /// New image URL.
    pub image: Option<String>,
    /// New brand.
    pub brand: Option<String>,
}

impl Entity for Product {
    type Patch = ProductPatch;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        if patch.brand.is_some() {
            self.brand = patch.brand;
        }
    }
}

/// Typed store over the product collection.
pub struct CatalogStore {
    products: Collection<Product>,
}

impl CatalogStore {
    /// Opens the catalog over the shared backend, seeding the sample
    /// catalog on first run.
    pub(crate) fn open(backend: Arc<dyn Backend>) -> Result<Self> {
        let products = Collection::open(
            CATALOG,
            Placement::Back,
            backend,
            crate::seed::seed_products(),
        )?;
        Ok(Self { products })
    }

    /// All products in catalog order.
    pub fn all(&self) -> &[Product] {
        self.products.all()
    }

    /// Looks up a product by id.
    pub fn get(&self, id: &EntityId) -> Option<&Product> {
        self.products.get(id)
    }

    /// Adds a new product.
    ///
    /// Returns `Ok(false)` when the id is already taken; the existing
    /// product is never overwritten.
    pub fn add(&mut self, product: Product) -> Result<bool> {
        self.products.add(product)
    }

    /// Removes a product. Absent ids are a no-op reported as `Ok(false)`.
    pub fn remove(&mut self, id: &EntityId) -> Result<bool> {
        self.products.remove(id)
    }

    /// Applies a partial update. Absent ids are a no-op reported as
    /// `Ok(false)`.
    pub fn update(&mut self, id: &EntityId, patch: ProductPatch) -> Result<bool> {
        self.products.patch(id, patch)
    }

    /// Registers a callback for persisted catalog changes.
    pub fn subscribe(&mut self, callback: Arc<ChangeCallback>) {
        self.products.subscribe(callback)
    }
}
