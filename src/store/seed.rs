//! Demo data loaded at startup when `STOREFRONT_SEED_DEMO_DATA` is on.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::aggregates::order::{LineItem, Order, OrderStatus};
use crate::domain::aggregates::stats::{CategorySales, CustomerStats, MonthlySales, PharmacyStats, TopSellingProduct};
use crate::domain::aggregates::{Address, InventoryItem, WishlistItem};
use crate::domain::value_objects::OwnerId;

/// Owner that the demo address book and wishlist belong to.
pub const DEMO_OWNER: &str = "123";

fn money(cents: i64) -> Decimal { Decimal::new(cents, 2) }

#[allow(clippy::too_many_arguments)]
fn address(owner: &OwnerId, id: &str, name: &str, street: &str, apartment: &str, city: &str, zip: &str, phone: &str, is_default: bool) -> Address {
    let now = Utc::now();
    Address {
        id: id.into(), owner_id: owner.as_str().into(), name: name.into(), full_name: "John Doe".into(),
        street_address: street.into(), apartment: Some(apartment.into()), city: city.into(), state: "CA".into(),
        zip_code: zip.into(), phone: phone.into(), is_default, created_at: now, updated_at: now,
    }
}

pub fn demo_addresses(owner: &OwnerId) -> Vec<Address> {
    vec![
        address(owner, "addr1", "Home", "123 Main Street", "Apt 4B", "Anytown", "94321", "+1 (555) 123-4567", true),
        address(owner, "addr2", "Work", "456 Corporate Blvd", "Suite 101", "Business City", "94322", "+1 (555) 987-6543", false),
    ]
}

fn wish(id: &str, name: &str, cents: i64, image: &str, in_stock: bool, category: &str) -> WishlistItem {
    WishlistItem { id: id.into(), name: name.into(), price: money(cents), image: Some(image.into()), in_stock, category: Some(category.into()) }
}

pub fn demo_wishlist() -> Vec<WishlistItem> {
    vec![
        wish("1", "Panadol Extra", 1299, "/Panadol.png", true, "Pain Relief"),
        wish("2", "Antinal 200mg", 2499, "/Antinal.png", true, "Digestive Health"),
        wish("3", "CeraVe Moisturizing Cream", 7999, "/cosrx.png", false, "Skin Care"),
        wish("4", "Prufen 400mg", 2299, "/prufen.png", true, "Pain Relief"),
    ]
}

#[allow(clippy::too_many_arguments)]
fn stock(id: &str, name: &str, category: &str, cents: i64, quantity: u32, reorder: u32, supplier: &str, expiry: &str, description: &str, batch: &str, location: &str) -> InventoryItem {
    InventoryItem {
        id: id.into(), name: name.into(), category: category.into(), price: money(cents),
        stock_quantity: quantity, reorder_level: reorder, supplier: supplier.into(),
        expiry_date: expiry.parse::<NaiveDate>().ok(),
        description: Some(description.into()), batch_number: Some(batch.into()), location: Some(location.into()),
    }
}

pub fn demo_inventory() -> Vec<InventoryItem> {
    vec![
        stock("MED-001", "Paracetamol 500mg", "Pain Relief", 625, 150, 30, "PharmSupply Inc.", "2024-12-31", "Pain reliever and fever reducer", "BATCH7890", "Shelf A3"),
        stock("MED-002", "Amoxicillin 250mg", "Antibiotics", 1250, 45, 20, "MediPharm Ltd.", "2023-10-15", "Antibiotic for bacterial infections", "BATCH4567", "Shelf B2"),
        stock("MED-003", "Vitamin C 1000mg", "Vitamins & Supplements", 875, 200, 50, "Nutricore", "2025-06-30", "Immune system support", "BATCH1234", "Shelf C1"),
        stock("MED-004", "Ibuprofen 200mg", "Pain Relief", 550, 18, 25, "PharmSupply Inc.", "2024-08-15", "Anti-inflammatory pain reliever", "BATCH5678", "Shelf A4"),
        stock("MED-005", "Loratadine 10mg", "Allergy", 999, 85, 30, "AllergyCare", "2024-04-22", "Antihistamine for allergy relief", "BATCH2345", "Shelf D2"),
        stock("MED-006", "Insulin Vials", "Diabetes", 7850, 12, 15, "DiabeCare Inc.", "2023-11-30", "For diabetes management", "BATCH9012", "Refrigerator 1"),
        stock("MED-007", "Blood Pressure Monitor", "Medical Devices", 4500, 8, 5, "MedEquip", "2026-12-31", "Digital blood pressure monitoring device", "BATCH3456", "Shelf E1"),
    ]
}

fn line(name: &str, quantity: u32, cents: i64) -> LineItem { LineItem { name: name.into(), quantity, price: money(cents) } }

#[allow(clippy::too_many_arguments)]
fn order(id: &str, customer: &str, status: OrderStatus, cents: i64, date: &str, items: Vec<LineItem>, address: &str, payment: &str) -> Option<Order> {
    Some(Order {
        id: id.into(), customer_name: customer.into(), status, total_price: money(cents),
        order_date: date.parse::<NaiveDateTime>().ok()?, items,
        customer_address: address.into(), payment_method: payment.into(),
    })
}

pub fn demo_orders() -> Vec<Order> {
    [
        order("ORD-001", "John Doe", OrderStatus::Pending, 12550, "2023-07-05T08:30:00",
            vec![line("Paracetamol", 2, 1250), line("Vitamin C", 1, 10050)], "123 Main St, City, Country", "Credit Card"),
        order("ORD-002", "Jane Smith", OrderStatus::Processing, 7825, "2023-07-04T14:15:00",
            vec![line("Ibuprofen", 1, 1825), line("Bandages", 2, 3000)], "456 Oak Ave, Town, Country", "PayPal"),
        order("ORD-003", "Robert Johnson", OrderStatus::Shipped, 21000, "2023-07-03T11:45:00",
            vec![line("Antibiotics", 1, 14500), line("Syringes", 5, 6500)], "789 Pine Rd, Village, Country", "Cash on Delivery"),
        order("ORD-004", "Emily Davis", OrderStatus::Delivered, 9575, "2023-07-02T16:20:00",
            vec![line("Allergy Medicine", 1, 4575), line("Face Masks", 1, 5000)], "101 Elm Blvd, City, Country", "Credit Card"),
        order("ORD-005", "Michael Wilson", OrderStatus::Pending, 3250, "2023-07-05T09:10:00",
            vec![line("Cough Syrup", 1, 3250)], "202 Maple Dr, Town, Country", "Debit Card"),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn whole(n: i64) -> Decimal { Decimal::from(n) }
fn tenths(n: i64) -> Decimal { Decimal::new(n, 1) }

pub fn demo_stats() -> PharmacyStats {
    let monthly = [
        ("Jan", 12500, 145), ("Feb", 14200, 168), ("Mar", 15800, 182), ("Apr", 14900, 174),
        ("May", 16300, 195), ("Jun", 18500, 215), ("Jul", 19200, 224), ("Aug", 17800, 209),
        ("Sep", 16500, 187), ("Oct", 18100, 213), ("Nov", 20500, 242), ("Dec", 22800, 268),
    ];
    let top = [
        ("MED-001", "Paracetamol 500mg", "Pain Relief", 520, whole(3250)),
        ("MED-003", "Vitamin C 1000mg", "Vitamins & Supplements", 480, whole(4200)),
        ("MED-008", "Blood Glucose Test Strips", "Diabetes", 320, whole(8640)),
        ("MED-002", "Amoxicillin 250mg", "Antibiotics", 275, tenths(34375)),
        ("MED-005", "Loratadine 10mg", "Allergy", 250, tenths(24975)),
    ];
    let categories = [
        ("Pain Relief", 28500, tenths(240)), ("Vitamins & Supplements", 22000, tenths(185)),
        ("Antibiotics", 19800, tenths(167)), ("Diabetes", 15600, tenths(131)),
        ("Allergy", 12200, tenths(103)), ("Medical Devices", 9800, tenths(82)), ("Others", 10900, tenths(92)),
    ];
    PharmacyStats {
        monthly_sales: monthly.iter().map(|&(month, sales, orders)| MonthlySales { month: month.into(), sales: whole(sales), orders }).collect(),
        top_selling_products: top.iter().map(|(id, name, category, quantity, revenue)| TopSellingProduct {
            id: (*id).into(), name: (*name).into(), category: (*category).into(), quantity: *quantity, revenue: *revenue,
        }).collect(),
        customer_stats: CustomerStats {
            total_customers: 1850, new_customers_this_month: 120,
            returning_customers_percentage: whole(68), average_order_value: tenths(845),
        },
        sales_by_category: categories.iter().map(|&(category, sales, percentage)| CategorySales { category: category.into(), sales: whole(sales), percentage }).collect(),
        total_revenue: whole(118800),
        total_orders: 2222,
        growth_rate: tenths(153),
    }
}
