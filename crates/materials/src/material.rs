use serde::{Deserialize, Serialize};

use zencore_core::{DomainResult, Entity, MaterialId, VendorId, ensure_non_negative, ensure_not_blank};

/// `FromStr` for a fieldless enum from its snake_case names.
macro_rules! impl_from_snake_case {
    ($t:ty, $label:literal, { $($text:literal => $variant:expr),+ $(,)? }) => {
        impl ::core::str::FromStr for $t {
            type Err = ::zencore_core::DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($text => Ok($variant),)+
                    other => Err(::zencore_core::DomainError::validation(format!(
                        "unknown {}: {other}",
                        $label
                    ))),
                }
            }
        }
    };
}

pub(crate) use impl_from_snake_case;

/// Physical material vs. purchased service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Material,
    Service,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Material => "material",
            ItemType::Service => "service",
        }
    }
}

/// Material category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Adaptogen,
    Nootropic,
    Vitamin,
    Mineral,
    Phospholipid,
    Aroma,
    Auxiliary,
    Production,
    Packaging,
    Transport,
    Storage,
    Marketing,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Adaptogen => "adaptogen",
            Category::Nootropic => "nootropic",
            Category::Vitamin => "vitamin",
            Category::Mineral => "mineral",
            Category::Phospholipid => "phospholipid",
            Category::Aroma => "aroma",
            Category::Auxiliary => "auxiliary",
            Category::Production => "production",
            Category::Packaging => "packaging",
            Category::Transport => "transport",
            Category::Storage => "storage",
            Category::Marketing => "marketing",
            Category::Other => "other",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Physical form of a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Form {
    Powder,
    Capsule,
    Oil,
    Extract,
    Liposome,
    Microencapsulated,
    Tablet,
    Liquid,
    Other,
}

/// Regulatory status of an ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegulatoryStatus {
    NovelFood,
    FoodSupplement,
    SchoolBan,
    Approved,
    Pending,
    #[default]
    NotApplicable,
}

impl_from_snake_case!(ItemType, "item type", {
    "material" => ItemType::Material,
    "service" => ItemType::Service,
});

impl_from_snake_case!(Category, "category", {
    "adaptogen" => Category::Adaptogen,
    "nootropic" => Category::Nootropic,
    "vitamin" => Category::Vitamin,
    "mineral" => Category::Mineral,
    "phospholipid" => Category::Phospholipid,
    "aroma" => Category::Aroma,
    "auxiliary" => Category::Auxiliary,
    "production" => Category::Production,
    "packaging" => Category::Packaging,
    "transport" => Category::Transport,
    "storage" => Category::Storage,
    "marketing" => Category::Marketing,
    "other" => Category::Other,
});

impl_from_snake_case!(Form, "form", {
    "powder" => Form::Powder,
    "capsule" => Form::Capsule,
    "oil" => Form::Oil,
    "extract" => Form::Extract,
    "liposome" => Form::Liposome,
    "microencapsulated" => Form::Microencapsulated,
    "tablet" => Form::Tablet,
    "liquid" => Form::Liquid,
    "other" => Form::Other,
});

impl_from_snake_case!(RegulatoryStatus, "regulatory status", {
    "novel_food" => RegulatoryStatus::NovelFood,
    "food_supplement" => RegulatoryStatus::FoodSupplement,
    "school_ban" => RegulatoryStatus::SchoolBan,
    "approved" => RegulatoryStatus::Approved,
    "pending" => RegulatoryStatus::Pending,
    "not_applicable" => RegulatoryStatus::NotApplicable,
});

/// Material (or service) master record.
///
/// Owned by persistence; the stock engine reads it as an immutable snapshot
/// for the duration of one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: MaterialId,
    pub code: String,
    pub name: String,
    pub item_type: ItemType,
    pub category: Option<Category>,
    pub form: Option<Form>,
    /// Unit of measure (kg, pcs, h, lot, ...).
    pub unit: String,
    pub opening_stock: f64,
    pub safety_stock: f64,
    pub monthly_forecast: f64,
    pub unit_price: f64,
    pub vendor_id: Option<VendorId>,
    /// Certificate of analysis on file.
    pub has_coa: bool,
    pub regulatory_status: RegulatoryStatus,
    pub is_active: bool,
}

impl Material {
    pub fn is_service(&self) -> bool {
        self.item_type == ItemType::Service
    }

    /// Category label used for grouping; `None` maps to `"uncategorized"`.
    pub fn category_label(&self) -> &'static str {
        self.category.map(|c| c.as_str()).unwrap_or("uncategorized")
    }
}

impl Entity for Material {
    type Id = MaterialId;

    fn id(&self) -> MaterialId {
        self.id
    }
}

/// Input for creating a material record.
///
/// Quantitative attributes default to zero, the record defaults to active.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMaterial {
    pub id: MaterialId,
    pub code: String,
    pub name: String,
    pub item_type: ItemType,
    pub unit: String,
    pub category: Option<Category>,
    pub form: Option<Form>,
    pub opening_stock: f64,
    pub safety_stock: f64,
    pub monthly_forecast: f64,
    pub unit_price: f64,
    pub vendor_id: Option<VendorId>,
    pub has_coa: bool,
    pub regulatory_status: RegulatoryStatus,
    pub is_active: bool,
}

impl NewMaterial {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        item_type: ItemType,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            id: MaterialId::new(),
            code: code.into(),
            name: name.into(),
            item_type,
            unit: unit.into(),
            category: None,
            form: None,
            opening_stock: 0.0,
            safety_stock: 0.0,
            monthly_forecast: 0.0,
            unit_price: 0.0,
            vendor_id: None,
            has_coa: false,
            regulatory_status: RegulatoryStatus::default(),
            is_active: true,
        }
    }

    pub fn with_id(mut self, id: MaterialId) -> Self {
        self.id = id;
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_form(mut self, form: Form) -> Self {
        self.form = Some(form);
        self
    }

    pub fn with_opening_stock(mut self, opening_stock: f64) -> Self {
        self.opening_stock = opening_stock;
        self
    }

    pub fn with_safety_stock(mut self, safety_stock: f64) -> Self {
        self.safety_stock = safety_stock;
        self
    }

    pub fn with_monthly_forecast(mut self, monthly_forecast: f64) -> Self {
        self.monthly_forecast = monthly_forecast;
        self
    }

    pub fn with_unit_price(mut self, unit_price: f64) -> Self {
        self.unit_price = unit_price;
        self
    }

    pub fn with_vendor(mut self, vendor_id: VendorId) -> Self {
        self.vendor_id = Some(vendor_id);
        self
    }

    pub fn with_coa(mut self, has_coa: bool) -> Self {
        self.has_coa = has_coa;
        self
    }

    pub fn with_regulatory_status(mut self, status: RegulatoryStatus) -> Self {
        self.regulatory_status = status;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Validate and produce the record.
    pub fn build(self) -> DomainResult<Material> {
        ensure_not_blank("code", &self.code)?;
        ensure_not_blank("name", &self.name)?;
        ensure_not_blank("unit", &self.unit)?;
        ensure_non_negative("opening_stock", self.opening_stock)?;
        ensure_non_negative("safety_stock", self.safety_stock)?;
        ensure_non_negative("monthly_forecast", self.monthly_forecast)?;
        ensure_non_negative("unit_price", self.unit_price)?;

        Ok(Material {
            id: self.id,
            code: self.code.trim().to_string(),
            name: self.name,
            item_type: self.item_type,
            category: self.category,
            form: self.form,
            unit: self.unit,
            opening_stock: self.opening_stock,
            safety_stock: self.safety_stock,
            monthly_forecast: self.monthly_forecast,
            unit_price: self.unit_price,
            vendor_id: self.vendor_id,
            has_coa: self.has_coa,
            regulatory_status: self.regulatory_status,
            is_active: self.is_active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zencore_core::DomainError;

    #[test]
    fn build_applies_defaults() {
        let material = NewMaterial::new("ASH-01", "Ashwagandha KSM-66", ItemType::Material, "kg")
            .with_category(Category::Adaptogen)
            .with_safety_stock(10.0)
            .build()
            .unwrap();

        assert_eq!(material.code, "ASH-01");
        assert_eq!(material.opening_stock, 0.0);
        assert_eq!(material.safety_stock, 10.0);
        assert!(material.is_active);
        assert!(!material.has_coa);
        assert_eq!(material.regulatory_status, RegulatoryStatus::NotApplicable);
    }

    #[test]
    fn empty_code_is_rejected() {
        let err = NewMaterial::new("  ", "Rhodiola", ItemType::Material, "kg")
            .build()
            .unwrap_err();
        match err {
            DomainError::Validation(msg) if msg.contains("code") => {}
            other => panic!("expected validation error for code, got {other:?}"),
        }
    }

    #[test]
    fn negative_safety_stock_is_rejected() {
        let err = NewMaterial::new("RHO-01", "Rhodiola", ItemType::Material, "kg")
            .with_safety_stock(-5.0)
            .build()
            .unwrap_err();
        match err {
            DomainError::Validation(msg) if msg.contains("safety_stock") => {}
            other => panic!("expected validation error for safety_stock, got {other:?}"),
        }
    }

    #[test]
    fn missing_category_groups_as_uncategorized() {
        let service = NewMaterial::new("SRV-PACK", "Packaging run", ItemType::Service, "lot")
            .build()
            .unwrap();
        assert!(service.is_service());
        assert_eq!(service.category_label(), "uncategorized");
    }

    #[test]
    fn parses_stored_names() {
        assert_eq!("service".parse::<ItemType>().unwrap(), ItemType::Service);
        assert_eq!("packaging".parse::<Category>().unwrap(), Category::Packaging);
        assert_eq!("microencapsulated".parse::<Form>().unwrap(), Form::Microencapsulated);
        assert_eq!(
            "food_supplement".parse::<RegulatoryStatus>().unwrap(),
            RegulatoryStatus::FoodSupplement
        );
    }

    #[test]
    fn unknown_name_is_a_validation_error() {
        let err = "gadget".parse::<Category>().unwrap_err();
        assert_eq!(err, DomainError::Validation("unknown category: gadget".to_string()));
    }

    #[test]
    fn enums_serialize_snake_case() {
        assert_eq!(
            serde_json::to_value(RegulatoryStatus::NovelFood).unwrap(),
            serde_json::json!("novel_food")
        );
        assert_eq!(serde_json::to_value(ItemType::Service).unwrap(), serde_json::json!("service"));
        assert_eq!(serde_json::to_value(Category::Phospholipid).unwrap(), serde_json::json!("phospholipid"));
    }
}
