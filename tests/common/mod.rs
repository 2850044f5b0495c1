#![allow(dead_code)]

use chrono::NaiveDate;
use fruit_ledger::ledger::{PaymentDraft, PurchaseDraft};

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid calendar date")
}

pub fn purchase_draft(farmer: &str, date: NaiveDate, boxes: u32, buy: f64, sell: f64) -> PurchaseDraft {
    PurchaseDraft {
        farmer: farmer.into(),
        location: "Valle Alto".into(),
        date,
        boxes,
        purchase_price: buy,
        packaging: "Caja".into(),
        crop: "Mango".into(),
        client: "Mercado Central".into(),
        sale_price: sell,
    }
}

pub fn payment_draft(farmer: &str, date: NaiveDate, amount: f64) -> PaymentDraft {
    PaymentDraft {
        farmer: farmer.into(),
        date,
        amount,
    }
}
