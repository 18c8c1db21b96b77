#![allow(clippy::float_cmp)]

use super::*;
use crate::design::Element;
use crate::state::test_helpers::{TEST_BASE_URL, test_app_state};

async fn open(state: &AppState) -> Uuid {
    let (status, Json(view)) = create_draft(State(state.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    view.draft.id
}

fn text_body(content: &str) -> Json<NewText> {
    Json(NewText { content: content.into(), color: Some("#FF6B35".into()), font_size: Some(30.0), font_weight: None, font_family: None })
}

#[tokio::test]
async fn new_draft_view_has_canvas_and_profit() {
    let state = test_app_state();
    let id = open(&state).await;
    let Json(view) = get_draft(State(state), Path(id)).await.unwrap();
    assert_eq!(view.canvas_size, CanvasSize { width: 400.0, height: 480.0 });
    assert_eq!(view.profit.selling_price, 24.99);
    assert_eq!(view.profit.production_cost, 12.0);
    let value = serde_json::to_value(&view).unwrap();
    assert_eq!(value["productType"], "tshirt");
    assert_eq!(value["design"]["elements"], serde_json::json!([]));
}

#[tokio::test]
async fn unknown_draft_is_404() {
    let err = get_draft(State(test_app_state()), Path(Uuid::new_v4())).await.unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
    assert_eq!(err.code, "E_DRAFT_NOT_FOUND");
}

#[tokio::test]
async fn switching_to_mug_changes_canvas_and_price() {
    let state = test_app_state();
    let id = open(&state).await;
    let body = Json(ProductBody { product_type: ProductType::Mug });
    let Json(view) = set_product(State(state), Path(id), body).await.unwrap();
    assert_eq!(view.draft.pricing, 19.99);
    assert_eq!(view.canvas_size, CanvasSize { width: 350.0, height: 320.0 });
    assert_eq!(view.profit.production_cost, 8.0);
}

#[tokio::test]
async fn custom_pricing_and_invalid_pricing() {
    let state = test_app_state();
    let id = open(&state).await;
    let Json(view) = set_pricing(State(state.clone()), Path(id), Json(PricingBody { pricing: 30.0 })).await.unwrap();
    assert!((view.profit.profit - 15.0).abs() < 1e-9);
    let err = set_pricing(State(state), Path(id), Json(PricingBody { pricing: 0.0 })).await.unwrap_err();
    assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn add_text_then_move_then_delete() {
    let state = test_app_state();
    let id = open(&state).await;
    let Json(view) = add_text(State(state.clone()), Path(id), text_body("Hi")).await.unwrap();
    let element_id = view.draft.design.elements[0].id().to_string();
    let Element::Text(text) = &view.draft.design.elements[0] else {
        panic!("expected text element");
    };
    assert_eq!(text.color, "#FF6B35");
    assert_eq!(text.font_size, 30.0);

    let drag = Json(ElementMove::By { dx: 5.0, dy: 5.0 });
    let Json(view) = move_element(State(state.clone()), Path((id, element_id.clone())), drag).await.unwrap();
    assert_eq!(view.draft.design.elements[0].position(), Position::new(55.0, 55.0));

    let Json(view) = delete_element(State(state.clone()), Path((id, element_id.clone()))).await.unwrap();
    assert!(view.draft.design.is_empty());

    let err = delete_element(State(state), Path((id, element_id))).await.unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
    assert_eq!(err.code, "E_ELEMENT_NOT_FOUND");
}

#[tokio::test]
async fn blank_text_is_422() {
    let state = test_app_state();
    let id = open(&state).await;
    let err = add_text(State(state), Path(id), text_body(" ")).await.unwrap_err();
    assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err.code, "E_BLANK_TEXT");
}

#[tokio::test]
async fn image_and_clipart() {
    let state = test_app_state();
    let id = open(&state).await;
    let image = Json(NewImage { src: "data:image/png;base64,AA".into(), width: None, height: None });
    add_image(State(state.clone()), Path(id), image).await.unwrap();
    let clip = Json(ClipartBody { clipart_id: 1, position: Some(Position::new(200.0, 10.0)) });
    let Json(view) = add_clipart(State(state.clone()), Path(id), clip).await.unwrap();
    assert_eq!(view.draft.design.len(), 2);

    let missing = Json(ClipartBody { clipart_id: 500, position: None });
    let err = add_clipart(State(state), Path(id), missing).await.unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn selection_can_be_set_and_cleared() {
    let state = test_app_state();
    let id = open(&state).await;
    add_text(State(state.clone()), Path(id), text_body("A")).await.unwrap();
    let Json(view) = set_selection(State(state.clone()), Path(id), Json(SelectionBody { element_id: None })).await.unwrap();
    assert_eq!(view.draft.canvas.selection(), None);

    let ghost = Json(SelectionBody { element_id: Some("ghost".into()) });
    let err = set_selection(State(state), Path(id), ghost).await.unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn template_then_save_creates_campaign() {
    let state = test_app_state();
    let id = open(&state).await;
    let Json(view) = apply_template(State(state.clone()), Path((id, 1))).await.unwrap();
    assert_eq!(view.draft.design.len(), 2);

    let (status, Json(campaign)) = save_draft(State(state.clone()), Path(id)).await.unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(campaign.id, 3);
    assert_eq!(campaign.share_url, format!("{TEST_BASE_URL}/product/3"));
    assert_eq!(campaign.pricing, 24.99);

    let err = get_draft(State(state), Path(id)).await.unwrap_err();
    assert_eq!(err.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn saving_empty_draft_is_422() {
    let state = test_app_state();
    let id = open(&state).await;
    let err = save_draft(State(state.clone()), Path(id)).await.unwrap_err();
    assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err.message, "add some design elements before saving");
    assert_eq!(state.campaigns.get_all().await.len(), 2);
}

#[tokio::test]
async fn reset_and_discard() {
    let state = test_app_state();
    let id = open(&state).await;
    add_text(State(state.clone()), Path(id), text_body("A")).await.unwrap();
    let Json(view) = reset_draft(State(state.clone()), Path(id)).await.unwrap();
    assert!(view.draft.design.is_empty());
    assert_eq!(discard_draft(State(state.clone()), Path(id)).await.unwrap(), StatusCode::NO_CONTENT);
    assert!(get_draft(State(state), Path(id)).await.is_err());
}

#[tokio::test]
async fn delete_key_removes_selected_element() {
    let state = test_app_state();
    let id = open(&state).await;
    add_text(State(state.clone()), Path(id), text_body("A")).await.unwrap();
    let Json(view) = delete_selected(State(state.clone()), Path(id)).await.unwrap();
    assert!(view.draft.design.is_empty());

    let err = delete_selected(State(state), Path(id)).await.unwrap_err();
    assert_eq!(err.status, StatusCode::CONFLICT);
    assert_eq!(err.code, "E_NOTHING_SELECTED");
}
