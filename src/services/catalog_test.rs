use serde_json::json;

use super::*;
use crate::store::Latency;

fn template(id: RecordId, name: &str, category: &str) -> Template {
    Template { id, name: name.into(), category: category.into(), product_type: None, design_data: Design::new() }
}

fn clip(id: RecordId, name: &str, category: &str) -> Clipart {
    Clipart { id, name: name.into(), category: category.into(), src: format!("/clipart/{id}.svg") }
}

fn service() -> CatalogService {
    CatalogService::new(
        MemoryStore::new(
            vec![
                template(1, "Business Card", "business"),
                template(2, "Creative Flyer", "creative"),
                template(3, "Minimal Poster", "minimal"),
                template(4, "Bold Business", "business"),
            ],
            Latency::none(),
        ),
        MemoryStore::new(
            vec![clip(1, "Star Icon", "icons"), clip(2, "Circle Shape", "shapes"), clip(3, "Arrow Icon", "icons")],
            Latency::none(),
        ),
    )
}

#[test]
fn template_parses_without_product_type() {
    let parsed: Template = serde_json::from_value(json!({
        "Id": 9,
        "name": "Loose",
        "category": "minimal",
        "designData": { "elements": [] }
    }))
    .unwrap();
    assert_eq!(parsed.product_type, None);
    let back = serde_json::to_value(&parsed).unwrap();
    assert!(back.get("productType").is_none());
}

#[tokio::test]
async fn template_by_id() {
    let svc = service();
    assert_eq!(svc.template(2).await.unwrap().name, "Creative Flyer");
    assert_eq!(svc.template(99).await.unwrap_err(), CatalogError::TemplateNotFound(99));
}

#[tokio::test]
async fn templates_by_category_filters_and_all_passes_everything() {
    let svc = service();
    let business: Vec<RecordId> = svc.templates_by_category("business").await.iter().map(|t| t.id).collect();
    assert_eq!(business, vec![1, 4]);
    assert_eq!(svc.templates_by_category(ALL_CATEGORIES).await.len(), 4);
    assert!(svc.templates_by_category("colorful").await.is_empty());
}

#[tokio::test]
async fn search_is_case_insensitive_within_category() {
    let svc = service();
    let hits: Vec<RecordId> = svc.search_templates("all", "BUSINESS").await.iter().map(|t| t.id).collect();
    assert_eq!(hits, vec![1, 4]);
    let hits: Vec<RecordId> = svc.search_templates("creative", "business").await.iter().map(|t| t.id).collect();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn clipart_by_category() {
    let svc = service();
    let icons: Vec<String> = svc.clipart_by_category("icons").await.into_iter().map(|c| c.name).collect();
    assert_eq!(icons, vec!["Star Icon", "Arrow Icon"]);
    assert_eq!(svc.clipart_by_category(ALL_CATEGORIES).await.len(), 3);
}

#[tokio::test]
async fn clipart_item_missing() {
    let svc = service();
    assert_eq!(svc.clipart_item(3).await.unwrap().name, "Arrow Icon");
    assert_eq!(svc.clipart_item(4).await.unwrap_err(), CatalogError::ClipartNotFound(4));
}
