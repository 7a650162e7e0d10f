#![allow(dead_code)]

use blocklib_core::model::Block;
use serde_json::json;

pub fn hero_block() -> Block {
    serde_json::from_value(json!({
        "type": "system-hero",
        "variant": "aurora",
        "data": {
            "heading": "Welcome to Our Store",
            "subheading": "Discover amazing products",
            "ctaText": "Shop Now",
            "ctaLink": "/products",
            "imageUrl": "https://images.unsplash.com/photo-1234567890",
            "style": {
                "backgroundColor": "#1E3A8A",
                "textColor": "#FFFFFF",
                "buttonColor": "#10B981"
            }
        }
    }))
    .unwrap()
}

pub fn features_block() -> Block {
    serde_json::from_value(json!({
        "type": "system-features",
        "variant": "grid",
        "data": {
            "heading": "Why Choose Us",
            "features": [
                { "title": "Fast Shipping", "icon": "🚀" },
                { "title": "Quality Products", "icon": "⭐" },
                { "title": "24/7 Support", "icon": "💬" }
            ]
        }
    }))
    .unwrap()
}
