#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};

use zencore_core::{MaterialId, VendorId};
use zencore_infra::InMemoryLedger;
use zencore_materials::{
    Category, ItemType, Material, NewConsumption, NewMaterial, NewPurchaseOrder, NewReceipt,
    PurchaseOrderStatus,
};

pub fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, d, 10, 0, 0).unwrap()
}

pub fn material(code: &str, opening: f64, safety: f64, forecast: f64) -> Material {
    NewMaterial::new(code, format!("{code} name"), ItemType::Material, "kg")
        .with_opening_stock(opening)
        .with_safety_stock(safety)
        .with_monthly_forecast(forecast)
        .build()
        .unwrap()
}

pub fn categorized(code: &str, category: Category, opening: f64, safety: f64) -> Material {
    NewMaterial::new(code, format!("{code} name"), ItemType::Material, "kg")
        .with_category(category)
        .with_opening_stock(opening)
        .with_safety_stock(safety)
        .with_monthly_forecast(10.0)
        .build()
        .unwrap()
}

pub fn service(code: &str) -> Material {
    NewMaterial::new(code, format!("{code} service"), ItemType::Service, "h")
        .with_category(Category::Transport)
        .build()
        .unwrap()
}

pub fn receive(ledger: &InMemoryLedger, material_id: MaterialId, quantity: f64, at: DateTime<Utc>) {
    let receipt = NewReceipt {
        receipt_number: format!("RC-{}", at.timestamp()),
        material_id,
        vendor_id: VendorId::new(),
        purchase_order_id: None,
        quantity,
        unit_price: 1.0,
        received_at: at,
        batch_number: None,
    }
    .build()
    .unwrap();
    ledger.record_receipt(receipt).unwrap();
}

pub fn consume(ledger: &InMemoryLedger, material_id: MaterialId, quantity: f64, at: DateTime<Utc>) {
    let consumption = NewConsumption {
        consumption_number: format!("CN-{}", at.timestamp()),
        material_id,
        quantity,
        consumed_at: at,
        project: None,
        cost_center: None,
    }
    .build()
    .unwrap();
    ledger.record_consumption(consumption).unwrap();
}

pub fn order(ledger: &InMemoryLedger, material_id: MaterialId, status: PurchaseOrderStatus) {
    let mut po = NewPurchaseOrder {
        po_number: "PO-1".to_string(),
        material_id,
        vendor_id: VendorId::new(),
        quantity: 10.0,
        unit_price: 2.0,
        ordered_at: day(1),
        expected_delivery: None,
    }
    .build()
    .unwrap();
    po.status = status;
    ledger.upsert_purchase_order(po).unwrap();
}

pub fn ledger_with(materials: &[Material]) -> InMemoryLedger {
    let ledger = InMemoryLedger::new();
    for m in materials {
        ledger.upsert_material(m.clone()).unwrap();
    }
    ledger
}
