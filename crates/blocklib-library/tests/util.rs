#![allow(dead_code)]

use blocklib_core::model::Block;
use serde_json::{Value, json};

pub fn hero_json() -> Value {
    json!({
        "type": "system-hero",
        "variant": "aurora",
        "data": {
            "heading": "Welcome to Our Store",
            "subheading": "Discover amazing products",
            "ctaText": "Shop Now",
            "ctaLink": "/products",
            "imageUrl": "https://images.unsplash.com/photo-1234567890",
            "style": { "backgroundColor": "#1E3A8A", "textColor": "#FFFFFF" }
        }
    })
}

pub fn hero_block() -> Block {
    serde_json::from_value(hero_json()).unwrap()
}

pub fn block(kind: &str, variant: &str, data: Value) -> Block {
    Block::new(kind, Some(variant), data)
}
