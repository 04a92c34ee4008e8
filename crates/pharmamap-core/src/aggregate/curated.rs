//! Curated lists shown when the live endpoints return nothing.

use crate::models::{PharmacySummary, ProductSummary};

/// Popular products, in display order.
pub fn popular_products() -> Vec<ProductSummary> {
    [
        ("Panadol Extra", "Pain Relief", 12000),
        ("Augmentin 1g", "Antibiotics", 8500),
        ("Nexium 40mg", "Digestive Health", 6000),
        ("Ventolin Inhaler", "Respiratory", 4500),
        ("Zyrtec 10mg", "Allergy", 3200),
        ("Brufen 400mg", "Pain Relief", 2700),
        ("Glucophage 850mg", "Diabetes", 1900),
        ("Vitamin D3 10000 IU", "Vitamins & Supplements", 950),
    ]
    .into_iter()
    .map(|(name, category, count)| ProductSummary {
        category: Some(category.to_string()),
        search_count: Some(count),
        ..ProductSummary::new(name)
    })
    .collect()
}

/// Featured pharmacies, in display order.
pub fn featured_pharmacies() -> Vec<PharmacySummary> {
    [
        ("Al Rahbani Pharmacy", "Beirut", "Caring for your family since 1975", 4.8),
        ("Pharmacie Mazen", "Jounieh", "Your health, our priority", 4.6),
        ("Wardieh Pharmacy", "Beirut", "Open 24/7 for you", 4.5),
        ("Saydaliyat Tripoli", "Tripoli", "Trusted advice, fair prices", 4.4),
        ("Pharmacie Centrale", "Saida", "Every prescription, every time", 4.3),
        ("Zahle Care Pharmacy", "Zahle", "Close to home", 4.2),
    ]
    .into_iter()
    .map(|(name, city, motto, rating)| PharmacySummary {
        city: Some(city.to_string()),
        motto: Some(motto.to_string()),
        rating: Some(rating),
        ..PharmacySummary::new(name)
    })
    .collect()
}
