#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use containstate_core::errors::IntrospectError;
use containstate_core::{introspect_record, Introspect, Value};
use std::collections::BTreeMap;
use uuid::Uuid;

pub struct Customer {
    pub name: String,
    pub email: Option<String>,
}

introspect_record!(Customer { name, email });

pub struct OrderLine {
    pub sku: String,
    pub quantity: u32,
}

introspect_record!(OrderLine { sku, quantity });

pub struct Order {
    pub id: Uuid,
    pub customer: Customer,
    pub lines: Vec<OrderLine>,
    pub tags: BTreeMap<String, String>,
    pub placed_at: DateTime<Utc>,
}

introspect_record!(Order {
    id,
    customer,
    lines,
    tags,
    placed_at
});

/// Partial view of an order, naming only the attributes a test cares about
pub struct OrderLines {
    pub lines: Vec<OrderLine>,
}

introspect_record!(OrderLines { lines });

pub struct CustomerName {
    pub name: &'static str,
}

introspect_record!(CustomerName { name });

pub struct OrderCustomer {
    pub customer: CustomerName,
}

introspect_record!(OrderCustomer { customer });

/// Partial view whose fields are declared out of alphabetical order
pub struct LinesThenCustomer {
    pub lines: Vec<OrderLine>,
    pub customer: CustomerName,
}

introspect_record!(LinesThenCustomer { lines, customer });

/// Type whose introspection always fails
pub struct Opaque;

impl Introspect for Opaque {
    fn introspect(&self) -> Result<Value, IntrospectError> {
        Err(IntrospectError::custom("Opaque", "not inspectable"))
    }
}

/// A fully populated order with two lines
pub fn sample_order() -> Order {
    Order {
        id: Uuid::parse_str("0190a5b2-7c1e-7d3a-9f00-1234567890ab").unwrap(),
        customer: Customer {
            name: "Ada".to_string(),
            email: Some("ada@example.com".to_string()),
        },
        lines: vec![line("A-1", 2), line("B-7", 1)],
        tags: BTreeMap::from([("channel".to_string(), "web".to_string())]),
        placed_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
    }
}

pub fn line(sku: &str, quantity: u32) -> OrderLine {
    OrderLine {
        sku: sku.to_string(),
        quantity,
    }
}
