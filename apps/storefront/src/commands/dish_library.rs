//! # Dish Library Commands
//!
//! Preview of what adding a library dish to the menu would look like:
//! ingredient costs, stock status and margin at the chosen menu price.
//!
//! ## Preview Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Dish Mapping Preview                               │
//! │                                                                         │
//! │  Backend matcher ──► DishPreviewRequest (JSON numbers)                  │
//! │                            │                                            │
//! │                            ▼                                            │
//! │               decimal text ──► Money / Quantity (no float math)         │
//! │                            │                                            │
//! │                            ▼                                            │
//! │      final price = price_override ?? default_price                      │
//! │                            │                                            │
//! │                            ▼                                            │
//! │      platter_core::preview_matched(config thresholds)                   │
//! │                            │                                            │
//! │                            ▼                                            │
//! │      DishPreviewResponse { final_price, adjustment, preview }           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Matching itself happens elsewhere; each ingredient arrives with the
//! inventory item the matcher picked, or none. That pick stays with its own
//! recipe line, even when two lines share an ingredient name.

use serde::{Deserialize, Serialize};
use serde_json::Number;
use tracing::{debug, info};
use ts_rs::TS;

use platter_core::mapping::{price_adjustment, resolve_menu_price};
use platter_core::{
    preview_matched, IngredientRequirement, MappingPreview, Money, Quantity, StockMatch,
    ValidationError,
};

use crate::error::ApiError;
use crate::state::StorefrontConfig;

// =============================================================================
// Request DTOs (REST shape)
// =============================================================================

/// Inventory item chosen by the matcher for one ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MatchedStockDto {
    pub inventory_item_name: String,
    #[ts(as = "f64")]
    pub current_stock: Number,
    pub unit: String,
    #[ts(as = "f64")]
    pub cost_per_unit: Number,
    pub similarity_score: f64,
}

/// One recipe line of the library dish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DishIngredientDto {
    pub ingredient_name: String,
    #[ts(as = "f64")]
    pub quantity_needed: Number,
    pub unit: String,
    #[serde(default)]
    pub matched: Option<MatchedStockDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DishPreviewRequest {
    pub dish_name: String,
    #[ts(as = "f64")]
    pub default_price: Number,
    #[serde(default)]
    #[ts(as = "Option<f64>")]
    pub price_override: Option<Number>,
    pub ingredients: Vec<DishIngredientDto>,
}

/// Preview plus the pricing decision behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DishPreviewResponse {
    pub dish_name: String,
    pub default_price: Money,
    pub final_price: Money,
    /// `final_price - default_price`
    pub price_adjustment: Money,
    pub preview: MappingPreview,
}

// =============================================================================
// Command
// =============================================================================

/// Computes the mapping preview for a library dish.
///
/// ## Errors
/// `VALIDATION_ERROR` for malformed numbers, a non-positive final price,
/// non-positive quantities, negative costs or scores outside `[0, 1]`.
pub fn preview_dish_mapping(
    config: &StorefrontConfig,
    request: DishPreviewRequest,
) -> Result<DishPreviewResponse, ApiError> {
    debug!(
        dish = %request.dish_name,
        ingredients = request.ingredients.len(),
        "preview_dish_mapping command"
    );
    let thresholds = config.stock_thresholds()?;

    let default_price = money_from_number(&request.default_price, "default_price")?;
    let price_override = request
        .price_override
        .as_ref()
        .map(|n| money_from_number(n, "price_override"))
        .transpose()?;
    let final_price = resolve_menu_price(default_price, price_override);

    let mut lines = Vec::with_capacity(request.ingredients.len());
    for dto in request.ingredients {
        let requirement = IngredientRequirement::new(
            dto.ingredient_name,
            quantity_from_number(&dto.quantity_needed, "quantity_needed")?,
            dto.unit,
        );
        let matched = dto.matched.map(stock_match_from_dto).transpose()?;
        lines.push((requirement, matched));
    }

    let preview = preview_matched(&lines, final_price, thresholds)?;

    info!(
        dish = %request.dish_name,
        total_cost = %preview.total_cost,
        servings = preview.can_make_servings,
        unmatched = preview.unmatched_count,
        "Dish mapping preview computed"
    );

    Ok(DishPreviewResponse {
        dish_name: request.dish_name,
        default_price,
        final_price,
        price_adjustment: price_adjustment(default_price, final_price),
        preview,
    })
}

// =============================================================================
// Number Conversion
// =============================================================================
//
// JSON numbers go through their decimal text, so 2.5 becomes 250 cents
// exactly. Values with more places than the target scale are rejected.

fn stock_match_from_dto(m: MatchedStockDto) -> Result<StockMatch, ValidationError> {
    Ok(StockMatch {
        inventory_item_name: m.inventory_item_name,
        current_stock: quantity_from_number(&m.current_stock, "current_stock")?,
        unit: m.unit,
        cost_per_unit: money_from_number(&m.cost_per_unit, "cost_per_unit")?,
        similarity_score: m.similarity_score,
    })
}

fn money_from_number(n: &Number, field: &str) -> Result<Money, ValidationError> {
    Money::parse(&n.to_string()).map_err(|e| rename_field(e, field))
}

fn quantity_from_number(n: &Number, field: &str) -> Result<Quantity, ValidationError> {
    Quantity::parse(&n.to_string()).map_err(|e| rename_field(e, field))
}

fn rename_field(err: ValidationError, field: &str) -> ValidationError {
    let field = field.to_string();
    match err {
        ValidationError::InvalidFormat { reason, .. } => {
            ValidationError::InvalidFormat { field, reason }
        }
        ValidationError::Overflow { .. } => ValidationError::Overflow { field },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use platter_core::StockStatus;
    use serde_json::json;

    fn rice_request(price_override: serde_json::Value) -> DishPreviewRequest {
        serde_json::from_value(json!({
            "dish_name": "Veg Biryani",
            "default_price": 12.0,
            "price_override": price_override,
            "ingredients": [
                {
                    "ingredient_name": "Rice",
                    "quantity_needed": 2,
                    "unit": "kg",
                    "matched": {
                        "inventory_item_name": "Basmati Rice",
                        "current_stock": 25,
                        "unit": "kg",
                        "cost_per_unit": 2.5,
                        "similarity_score": 0.92
                    }
                },
                {
                    "ingredient_name": "Saffron",
                    "quantity_needed": 0.001,
                    "unit": "kg"
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_preview_from_rest_payload() {
        let resp = preview_dish_mapping(&StorefrontConfig::default(), rice_request(json!(null))).unwrap();

        assert_eq!(resp.final_price.cents(), 1200);
        assert!(resp.price_adjustment.is_zero());
        assert_eq!(resp.preview.total_cost.cents(), 500);
        assert_eq!(resp.preview.ingredients[0].stock_status, Some(StockStatus::Ample));
        assert_eq!(resp.preview.unmatched_count, 1);
        assert_eq!(resp.preview.can_make_servings, 0);
        assert!(resp.preview.ingredients[1].needs_creation);
    }

    #[test]
    fn test_price_override_wins() {
        let resp = preview_dish_mapping(&StorefrontConfig::default(), rice_request(json!(15.5))).unwrap();

        assert_eq!(resp.default_price.cents(), 1200);
        assert_eq!(resp.final_price.cents(), 1550);
        assert_eq!(resp.price_adjustment.cents(), 350);
        assert_eq!(resp.preview.menu_price.cents(), 1550);
        assert_eq!(resp.preview.profit_margin.cents(), 1050);
    }

    #[test]
    fn test_configured_thresholds_are_used() {
        let mut config = StorefrontConfig::default();
        config.stock.ample_multiplier = 20;

        let resp = preview_dish_mapping(&config, rice_request(json!(null))).unwrap();
        assert_eq!(resp.preview.ingredients[0].stock_status, Some(StockStatus::Low));
    }

    #[test]
    fn test_zero_override_is_rejected() {
        let err = preview_dish_mapping(&StorefrontConfig::default(), rice_request(json!(0))).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_sub_cent_price_is_rejected() {
        let err = preview_dish_mapping(&StorefrontConfig::default(), rice_request(json!(9.999))).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("price_override"));
    }

    #[test]
    fn test_repeated_ingredient_names_keep_their_own_match() {
        let request: DishPreviewRequest = serde_json::from_value(json!({
            "dish_name": "Salted Caramel Tart",
            "default_price": 9.0,
            "ingredients": [
                {
                    "ingredient_name": "Salt",
                    "quantity_needed": 0.01,
                    "unit": "kg",
                    "matched": {
                        "inventory_item_name": "Sea Salt",
                        "current_stock": 1,
                        "unit": "kg",
                        "cost_per_unit": 2.0,
                        "similarity_score": 1.0
                    }
                },
                {
                    "ingredient_name": "Salt",
                    "quantity_needed": 0.005,
                    "unit": "kg"
                }
            ]
        }))
        .unwrap();

        let resp = preview_dish_mapping(&StorefrontConfig::default(), request).unwrap();
        let preview = &resp.preview;
        assert_eq!(preview.total_ingredients, 2);
        assert_eq!(preview.unmatched_count, 1);
        assert_eq!(preview.can_make_servings, 0);
        assert!(preview.ingredients[1].best_match.is_none());
        assert!(preview.ingredients[1].needs_creation);
        assert_eq!(preview.total_cost.cents(), 2);
    }

    #[test]
    fn test_decimal_conversion_is_exact() {
        assert_eq!(money_from_number(&Number::from_f64(0.1).unwrap(), "x").unwrap().cents(), 10);
        assert_eq!(money_from_number(&Number::from(7), "x").unwrap().cents(), 700);
        assert_eq!(
            quantity_from_number(&Number::from_f64(0.125).unwrap(), "x").unwrap().milli(),
            125
        );
        assert!(quantity_from_number(&Number::from_f64(0.0001).unwrap(), "x").is_err());
    }
}
