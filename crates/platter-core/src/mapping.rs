//! # Ingredient Mapping Previewer
//!
//! Shows a manager what adding a library dish to their menu would mean for
//! their kitchen: which recipe ingredients map to inventory, what one serving
//! costs, how many servings current stock covers, and the resulting margin.
//!
//! ## Preview Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Dish library (external)          Inventory matcher (external)          │
//! │  IngredientRequirement[] ───┐   ┌─── StockLookup::best_match()          │
//! │                             ▼   ▼                                       │
//! │                     ┌──────────────────┐                                │
//! │   menu_price ──────►│     preview()    │ (pure, no I/O)                 │
//! │                     └────────┬─────────┘                                │
//! │                              ▼                                          │
//! │  MappingPreview                                                         │
//! │  ├── per ingredient: match, stock status, line cost, servings          │
//! │  ├── total_cost        Σ cost_per_unit × quantity_needed (matched)     │
//! │  ├── can_make_servings min ⌊stock / needed⌋, 0 if anything unmatched   │
//! │  └── profit_margin, margin_bps                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stock Status
//! With the default thresholds (10× and 1×):
//! - `current ≥ needed × 10` → `Ample`
//! - `needed ≤ current < needed × 10` → `Low`
//! - `current < needed` → `Insufficient`
//!
//! The matching itself (exact name, alternate names, fuzzy similarity) lives
//! in the restaurant backend. This module only consumes its best match.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::{round_div, Money};
use crate::quantity::{Quantity, MILLIS_PER_UNIT};
use crate::types::{MatchConfidence, StockStatus};
use crate::validation::{
    validate_menu_price, validate_quantity_needed, validate_similarity_score, validate_unit_cost,
};

// =============================================================================
// Inputs
// =============================================================================

/// One ingredient a dish needs per serving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct IngredientRequirement {
    pub ingredient_name: String,
    pub quantity_needed: Quantity,
    pub unit: String,
}

impl IngredientRequirement {
    pub fn new(
        ingredient_name: impl Into<String>,
        quantity_needed: Quantity,
        unit: impl Into<String>,
    ) -> Self {
        IngredientRequirement {
            ingredient_name: ingredient_name.into(),
            quantity_needed,
            unit: unit.into(),
        }
    }
}

/// An inventory item the matcher judged equivalent to a requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockMatch {
    pub inventory_item_name: String,
    pub current_stock: Quantity,
    pub unit: String,
    pub cost_per_unit: Money,
    /// Matcher confidence in `[0, 1]`.
    pub similarity_score: f64,
}

/// Source of best matches for recipe ingredients.
///
/// Implemented for maps keyed by ingredient name and for closures via
/// [`LookupFn`], so callers can feed in whatever the matcher returned.
pub trait StockLookup {
    fn best_match(&self, requirement: &IngredientRequirement) -> Option<StockMatch>;
}

impl<S: BuildHasher> StockLookup for HashMap<String, StockMatch, S> {
    fn best_match(&self, requirement: &IngredientRequirement) -> Option<StockMatch> {
        self.get(&requirement.ingredient_name).cloned()
    }
}

impl StockLookup for BTreeMap<String, StockMatch> {
    fn best_match(&self, requirement: &IngredientRequirement) -> Option<StockMatch> {
        self.get(&requirement.ingredient_name).cloned()
    }
}

/// Adapts a closure into a [`StockLookup`].
pub struct LookupFn<F>(pub F);

impl<F> StockLookup for LookupFn<F>
where
    F: Fn(&IngredientRequirement) -> Option<StockMatch>,
{
    fn best_match(&self, requirement: &IngredientRequirement) -> Option<StockMatch> {
        (self.0)(requirement)
    }
}

// =============================================================================
// Thresholds
// =============================================================================

/// Multipliers of the per-serving quantity that separate the stock statuses.
///
/// Always valid (`ample ≥ sufficient ≥ 1`): built through
/// [`StockThresholds::new`], `Default` or deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockThresholds {
    /// Stock at or above `needed × ample_multiplier` is `Ample`.
    ample_multiplier: u32,
    /// Stock below `needed × sufficient_multiplier` is `Insufficient`.
    sufficient_multiplier: u32,
}

impl StockThresholds {
    pub const DEFAULT_AMPLE_MULTIPLIER: u32 = 10;
    pub const DEFAULT_SUFFICIENT_MULTIPLIER: u32 = 1;

    /// Creates validated thresholds (`ample ≥ sufficient ≥ 1`).
    pub fn new(ample_multiplier: u32, sufficient_multiplier: u32) -> CoreResult<Self> {
        if sufficient_multiplier < 1 {
            return Err(ValidationError::MustBePositive {
                field: "sufficient_multiplier".to_string(),
            }
            .into());
        }
        if ample_multiplier < sufficient_multiplier {
            return Err(ValidationError::OutOfRange {
                field: "ample_multiplier".to_string(),
                min: sufficient_multiplier as i64,
                max: u32::MAX as i64,
            }
            .into());
        }
        Ok(StockThresholds {
            ample_multiplier,
            sufficient_multiplier,
        })
    }

    #[inline]
    pub fn ample_multiplier(&self) -> u32 {
        self.ample_multiplier
    }

    #[inline]
    pub fn sufficient_multiplier(&self) -> u32 {
        self.sufficient_multiplier
    }

    /// Classifies `current` stock against a per-serving `needed` quantity.
    pub fn classify(&self, current: Quantity, needed: Quantity) -> StockStatus {
        // A threshold too large to represent can never be reached.
        let reaches = |factor: u32| {
            needed
                .checked_scale(factor)
                .map_or(false, |threshold| current >= threshold)
        };

        if reaches(self.ample_multiplier) {
            StockStatus::Ample
        } else if reaches(self.sufficient_multiplier) {
            StockStatus::Low
        } else {
            StockStatus::Insufficient
        }
    }
}

impl Default for StockThresholds {
    fn default() -> Self {
        StockThresholds {
            ample_multiplier: Self::DEFAULT_AMPLE_MULTIPLIER,
            sufficient_multiplier: Self::DEFAULT_SUFFICIENT_MULTIPLIER,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StockThresholdsFields {
    ample_multiplier: u32,
    sufficient_multiplier: u32,
}

impl<'de> Deserialize<'de> for StockThresholds {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = StockThresholdsFields::deserialize(deserializer)?;
        StockThresholds::new(fields.ample_multiplier, fields.sufficient_multiplier)
            .map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Outputs
// =============================================================================

/// Mapping result for one recipe ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct IngredientPreview {
    pub requirement: IngredientRequirement,
    pub best_match: Option<StockMatch>,
    /// `None` when unmatched.
    pub stock_status: Option<StockStatus>,
    /// Cost of one serving's worth, rounded to cents for display.
    pub line_cost: Option<Money>,
    pub servings_possible: Option<i64>,
    pub match_confidence: Option<MatchConfidence>,
    /// Unmatched: the ingredient would have to be created in inventory.
    pub needs_creation: bool,
}

/// Full preview of adding a dish at a given menu price.
///
/// ## Invariants
/// - `total_cost == Σ cost_per_unit × quantity_needed` over matched
///   ingredients, rounded once
/// - `can_make_servings == 0` if `unmatched_count > 0` or there are no
///   ingredients
/// - `profit_margin == menu_price - total_cost`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MappingPreview {
    pub ingredients: Vec<IngredientPreview>,
    pub total_cost: Money,
    pub total_ingredients: usize,
    pub can_make_servings: i64,
    pub low_stock_count: usize,
    pub insufficient_count: usize,
    pub unmatched_count: usize,
    pub menu_price: Money,
    pub profit_margin: Money,
    /// Margin as basis points of the menu price (2500 = 25%).
    pub margin_bps: i64,
    pub warnings: Vec<String>,
}

impl MappingPreview {
    /// Margin percent for display (`margin_bps / 100`).
    pub fn margin_percent(&self) -> f64 {
        self.margin_bps as f64 / 100.0
    }

    /// True when every ingredient is matched and at least one serving can
    /// be made.
    pub fn is_ready_to_serve(&self) -> bool {
        self.unmatched_count == 0 && self.can_make_servings > 0
    }
}

// =============================================================================
// Preview
// =============================================================================

/// Previews a dish at `menu_price` using the default stock thresholds.
///
/// ## Errors
/// `InvalidInput` if `menu_price ≤ 0`, any `quantity_needed ≤ 0`, a match
/// has a negative unit cost, or a similarity score lies outside `[0, 1]`.
///
/// ## Example
/// ```rust
/// use std::collections::HashMap;
/// use platter_core::mapping::{preview, IngredientRequirement, StockMatch};
/// use platter_core::money::Money;
/// use platter_core::quantity::Quantity;
/// use platter_core::types::StockStatus;
///
/// let reqs = vec![IngredientRequirement::new("Rice", Quantity::from_units(2), "kg")];
/// let mut stock = HashMap::new();
/// stock.insert("Rice".to_string(), StockMatch {
///     inventory_item_name: "Basmati Rice".into(),
///     current_stock: Quantity::from_units(25),
///     unit: "kg".into(),
///     cost_per_unit: Money::from_cents(250),
///     similarity_score: 0.9,
/// });
///
/// let p = preview(&reqs, &stock, Money::from_cents(2000)).unwrap();
/// assert_eq!(p.total_cost.cents(), 500);
/// assert_eq!(p.can_make_servings, 12);
/// assert_eq!(p.ingredients[0].stock_status, Some(StockStatus::Ample));
/// ```
pub fn preview<L: StockLookup + ?Sized>(
    requirements: &[IngredientRequirement],
    stock: &L,
    menu_price: Money,
) -> CoreResult<MappingPreview> {
    preview_with_thresholds(requirements, stock, menu_price, StockThresholds::default())
}

/// Previews a dish with explicit stock thresholds.
pub fn preview_with_thresholds<L: StockLookup + ?Sized>(
    requirements: &[IngredientRequirement],
    stock: &L,
    menu_price: Money,
    thresholds: StockThresholds,
) -> CoreResult<MappingPreview> {
    preview_lines(
        requirements.iter().map(|r| (r, stock.best_match(r))),
        menu_price,
        thresholds,
    )
}

/// Previews a dish whose recipe lines already carry the matcher's answer.
///
/// Each line keeps its own match, so two lines naming the same ingredient
/// are costed and counted independently.
pub fn preview_matched(
    lines: &[(IngredientRequirement, Option<StockMatch>)],
    menu_price: Money,
    thresholds: StockThresholds,
) -> CoreResult<MappingPreview> {
    preview_lines(
        lines.iter().map(|(r, m)| (r, m.clone())),
        menu_price,
        thresholds,
    )
}

fn preview_lines<'a, I>(
    lines: I,
    menu_price: Money,
    thresholds: StockThresholds,
) -> CoreResult<MappingPreview>
where
    I: Iterator<Item = (&'a IngredientRequirement, Option<StockMatch>)>,
{
    validate_menu_price(menu_price)?;

    let mut ingredients = Vec::with_capacity(lines.size_hint().0);
    let mut warnings = Vec::new();
    // Cents × thousandths; divided down to cents once at the end.
    let mut cost_exact: i128 = 0;
    let mut min_servings: Option<i64> = None;
    let mut low_stock_count = 0;
    let mut insufficient_count = 0;
    let mut unmatched_count = 0;

    for (requirement, found) in lines {
        validate_quantity_needed(requirement.quantity_needed)?;

        let Some(found) = found else {
            unmatched_count += 1;
            warnings.push(format!(
                "No inventory match for {}",
                requirement.ingredient_name
            ));
            ingredients.push(IngredientPreview {
                requirement: requirement.clone(),
                best_match: None,
                stock_status: None,
                line_cost: None,
                servings_possible: None,
                match_confidence: None,
                needs_creation: true,
            });
            continue;
        };

        validate_unit_cost(found.cost_per_unit)?;
        validate_similarity_score(found.similarity_score)?;

        let line_exact =
            found.cost_per_unit.cents() as i128 * requirement.quantity_needed.milli() as i128;
        cost_exact += line_exact;

        let status = thresholds.classify(found.current_stock, requirement.quantity_needed);
        match status {
            StockStatus::Low => low_stock_count += 1,
            StockStatus::Insufficient => {
                insufficient_count += 1;
                warnings.push(format!(
                    "Low stock: {} ({}{unit} available, {}{unit} needed)",
                    found.inventory_item_name,
                    found.current_stock,
                    requirement.quantity_needed,
                    unit = found.unit,
                ));
            }
            StockStatus::Ample => {}
        }

        let servings = found.current_stock.times_covered(requirement.quantity_needed);
        min_servings = Some(min_servings.map_or(servings, |m| m.min(servings)));

        ingredients.push(IngredientPreview {
            requirement: requirement.clone(),
            line_cost: Some(cents_from_exact(line_exact)?),
            stock_status: Some(status),
            servings_possible: Some(servings),
            match_confidence: Some(MatchConfidence::from_score(found.similarity_score)),
            best_match: Some(found),
            needs_creation: false,
        });
    }

    let total_cost = cents_from_exact(cost_exact)?;
    let can_make_servings = if unmatched_count > 0 {
        0
    } else {
        min_servings.unwrap_or(0)
    };

    let profit_margin = menu_price
        .checked_add(-total_cost)
        .ok_or_else(|| overflow("profit_margin"))?;
    let margin_bps = i64::try_from(round_div(
        profit_margin.cents() as i128 * 10_000,
        menu_price.cents() as i128,
    ))
    .map_err(|_| overflow("margin"))?;

    Ok(MappingPreview {
        total_ingredients: ingredients.len(),
        ingredients,
        total_cost,
        can_make_servings,
        low_stock_count,
        insufficient_count,
        unmatched_count,
        menu_price,
        profit_margin,
        margin_bps,
        warnings,
    })
}

/// Chooses the menu price for a library dish: the override if given,
/// otherwise the library's default price.
pub fn resolve_menu_price(default_price: Money, price_override: Option<Money>) -> Money {
    price_override.unwrap_or(default_price)
}

/// How far the final menu price deviates from the library default.
pub fn price_adjustment(default_price: Money, final_price: Money) -> Money {
    final_price - default_price
}

fn cents_from_exact(exact: i128) -> CoreResult<Money> {
    let cents = round_div(exact, MILLIS_PER_UNIT as i128);
    i64::try_from(cents)
        .map(Money::from_cents)
        .map_err(|_| overflow("total_cost"))
}

fn overflow(field: &str) -> CoreError {
    ValidationError::Overflow {
        field: field.to_string(),
    }
    .into()
}

// =============================================================================
// Unit Tests
// =============================================================================
