use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::domain::{
    Candidate, Capabilities, Product, ProductionScale, SubscriptionTier,
};

static NULL: Value = Value::Null;

/// Organization row as returned by the data store
///
/// Fields are looked up by every spelling the store is known to use, first
/// match wins: the store hands back nulls, numeric strings, duplicated
/// snake_case/camelCase columns and the occasional wrong shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OemRecord(Map<String, Value>);

impl OemRecord {
    /// Wrap a JSON row; anything other than an object is not a record
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    fn field(&self, names: &[&str]) -> &Value {
        names
            .iter()
            .find_map(|name| self.0.get(*name))
            .unwrap_or(&NULL)
    }

    /// String or numeric id; blank ids count as absent
    pub fn organization_id(&self) -> Option<String> {
        let id = as_string(self.field(&["organizationId", "organization_id", "id"]));
        (!id.is_empty()).then_some(id)
    }

    /// Normalize into a `Candidate`; `None` only when the row has no id
    pub fn to_candidate(&self) -> Option<Candidate> {
        let organization_id = self.organization_id()?;

        Some(Candidate {
            organization_id,
            name: as_string(self.field(&["companyName", "company_name", "name"])),
            slug: as_string(self.field(&["slug"])),
            location: as_string(self.field(&["location"])),
            description: as_string(self.field(&["description"])),
            tier: self
                .field(&["subscriptionTier", "subscription_tier", "tier"])
                .as_str()
                .and_then(SubscriptionTier::parse)
                .unwrap_or_default(),
            products: as_products(self.field(&["products"])),
            profile_moq: as_count(self.field(&["moq", "minimum_order_quantity", "minimumOrderQuantity"])),
            certifications: as_names(self.field(&["certifications"])),
            capabilities: Capabilities {
                rnd_support: as_flag(self.field(&["rndSupport", "rnd_support", "rd_support"])),
                packaging_design: as_flag(self.field(&["packagingDesign", "packaging_design"])),
                formula_library: as_flag(self.field(&["formulaLibrary", "formula_library"])),
                white_label: as_flag(self.field(&["whiteLabel", "white_label"])),
                export_support: as_flag(self.field(&["exportSupport", "export_support"])),
            },
            rating: as_number(self.field(&["rating"])).map(|r| r.clamp(0.0, 5.0)),
            review_count: as_count(self.field(&["reviewCount", "review_count"])).unwrap_or(0),
            services: as_names(self.field(&["services"])),
            scale: self
                .field(&["scale", "production_scale", "productionScale"])
                .as_str()
                .and_then(ProductionScale::parse),
        })
    }
}

/// Normalize raw JSON rows, skipping rows that are not objects or carry no id
pub fn normalize_records(rows: Vec<Value>) -> Vec<Candidate> {
    rows.into_iter()
        .filter_map(|row| {
            let candidate = OemRecord::from_value(row).and_then(|record| record.to_candidate());
            if candidate.is_none() {
                tracing::debug!("Skipping organization row without an id");
            }
            candidate
        })
        .collect()
}

fn as_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// Non-negative integer; negative values count as absent
fn as_count(value: &Value) -> Option<u32> {
    let number = as_number(value)?;
    if number < 0.0 {
        return None;
    }
    Some(number.round().min(u32::MAX as f64) as u32)
}

fn as_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "1"),
        Value::Number(n) => n.as_f64() == Some(1.0),
        _ => false,
    }
}

/// Names from an array of strings or an array of `{ "name": ... }` objects
fn as_names(value: &Value) -> Vec<String> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Object(obj) => obj
                .get("name")
                .or_else(|| obj.get("certification_name"))
                .and_then(Value::as_str)
                .map(|s| s.trim().to_string()),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .collect()
}

fn as_products(value: &Value) -> Vec<Product> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(Value::as_object)
        .map(|obj| {
            let field = |names: &[&str]| {
                names
                    .iter()
                    .find_map(|name| obj.get(*name))
                    .cloned()
                    .unwrap_or(Value::Null)
            };

            Product {
                category: as_string(&field(&["category", "product_category"])),
                moq: as_count(&field(&["moq", "minimum_order_quantity"])),
                lead_time_days: as_count(&field(&["leadTimeDays", "lead_time_days", "leadTime", "lead_time"])),
                price_floor: as_number(&field(&["priceFloor", "price_floor", "unit_price_min"])),
            }
        })
        .collect()
}
