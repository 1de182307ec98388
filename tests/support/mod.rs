//! Shared fixtures for integration tests.

#![allow(dead_code)]

use yard_search::{Vehicle, VehicleDocument, VehicleStatus};

/// A small yard with one vehicle per interesting shape.
pub fn yard() -> Vec<Vehicle> {
    vec![
        civic(),
        accord(),
        f150(),
        camry(),
        corolla(),
        Vehicle::new("bare", VehicleStatus::PickYourPart),
    ]
}

pub fn civic() -> Vehicle {
    let mut v = Vehicle::new("civic", VehicleStatus::Yard);
    v.year = Some(2004);
    v.make = Some("Honda".into());
    v.model = Some("Civic".into());
    v.license_plate = Some("5ABC123".into());
    v.purchase_price = Some("350".into());
    v.paperwork = Some("complete".into());
    v.title_present = Some(false);
    v.created_at = Some("2024-03-01T09:30:00Z".into());
    v.car_images = vec!["https://img/civic-front.jpg".into()];
    v
}

pub fn accord() -> Vehicle {
    let mut v = Vehicle::new("accord", VehicleStatus::Sold);
    v.year = Some(2008);
    v.make = Some("Honda".into());
    v.model = Some("Accord".into());
    v.title_present = Some(true);
    v.paperwork = Some("complete".into());
    v.purchase_price = Some("600".into());
    v.sale_price = Some("1000".into());
    v.purchase_date = Some("2024-02-01".into());
    v.sale_date = Some("2024-02-15".into());
    v.buyer_first_name = Some("Ana".into());
    v.buyer_last_name = Some("Ramirez".into());
    v.created_at = Some("2024-02-01T15:00:00Z".into());
    v.documents = vec![VehicleDocument {
        id: "doc-1".into(),
        name: "bill-of-sale.pdf".into(),
        url: "https://docs/bill-of-sale.pdf".into(),
    }];
    v
}

pub fn f150() -> Vehicle {
    let mut v = Vehicle::new("f150", VehicleStatus::SaRecycling);
    v.year = Some(1998);
    v.make = Some("Ford".into());
    v.model = Some("F-150".into());
    v.vehicle_id = Some("1FTZX17".into());
    v.seller_name = Some("Eastside Towing".into());
    v.title_present = Some(true);
    v.paperwork = Some("lien-sale".into());
    v.purchase_price = Some("not recorded".into());
    v.created_at = Some("garbled".into());
    v
}

pub fn camry() -> Vehicle {
    let mut v = Vehicle::new("camry", VehicleStatus::Sold);
    v.year = Some(2011);
    v.make = Some("Toyota".into());
    v.model = Some("Camry".into());
    v.title_present = Some(true);
    v.sale_price = Some("500".into());
    v.purchase_date = Some("2024-03-01".into());
    v.sale_date = Some("2024-03-08".into());
    v.created_at = Some("2024-03-01 08:00:00+00".into());
    v.car_images = vec!["https://img/camry.jpg".into()];
    v
}

pub fn corolla() -> Vehicle {
    let mut v = Vehicle::new("corolla", VehicleStatus::Yard);
    v.year = Some(2001);
    v.make = Some("Toyota".into());
    v.model = Some("Corolla".into());
    v.title_present = Some(true);
    v.paperwork = Some("no-title".into());
    v.purchase_price = Some("200".into());
    v.created_at = Some("2024-03-05".into());
    v
}

pub fn ids(vehicles: &[Vehicle]) -> Vec<&str> {
    vehicles.iter().map(|v| v.id.as_str()).collect()
}
