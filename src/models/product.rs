//! Product model for storage and API.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Product document stored in MongoDB.
///
/// Category and type are free-text classification fields; filter routes
/// match them exactly (case-sensitive), with no canonicalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub item_name: String,
    pub item_description: String,
    pub item_availability: bool,
    pub item_brand: String,
    /// Observed values: women, men, kids, unisex
    pub item_category: String,
    /// Observed value: accessories
    pub item_type: String,
    /// Numeric-like string, kept as text per the stored schema
    pub item_price: String,
    /// Image URLs or upload paths
    #[serde(default)]
    pub item_images: Vec<String>,
}

impl Product {
    /// API view with the document id rendered as a hex string.
    pub fn view(&self) -> ProductView {
        ProductView {
            id: self.id.to_hex(),
            item_name: self.item_name.clone(),
            item_description: self.item_description.clone(),
            item_availability: self.item_availability,
            item_brand: self.item_brand.clone(),
            item_category: self.item_category.clone(),
            item_type: self.item_type.clone(),
            item_price: self.item_price.clone(),
            item_images: self.item_images.clone(),
        }
    }
}

/// Product representation returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: String,
    pub item_name: String,
    pub item_description: String,
    pub item_availability: bool,
    pub item_brand: String,
    pub item_category: String,
    pub item_type: String,
    pub item_price: String,
    pub item_images: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_serializes_camel_case() {
        let product = Product {
            id: ObjectId::new(),
            item_name: "Scarf".to_string(),
            item_description: "Wool scarf".to_string(),
            item_availability: true,
            item_brand: "Acme".to_string(),
            item_category: "women".to_string(),
            item_type: "accessories".to_string(),
            item_price: "19.99".to_string(),
            item_images: vec!["uploads/scarf.jpg".to_string()],
        };

        let json = serde_json::to_value(product.view()).unwrap();
        assert_eq!(json["itemName"], "Scarf");
        assert_eq!(json["itemAvailability"], true);
        assert_eq!(json["itemPrice"], "19.99");
        assert_eq!(json["itemImages"][0], "uploads/scarf.jpg");
    }
}
