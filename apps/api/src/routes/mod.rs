pub mod dictionaries;
pub mod health;
pub mod prompts;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::export::handlers as export;
use crate::state::AppState;
use crate::store::handlers as store;
use crate::templates::handlers as templates;
use crate::wizard::handlers as wizard;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // State store
        .route(
            "/api/v1/state",
            get(store::handle_get_state).delete(store::handle_reset),
        )
        // Photos travel inline in the state, so these two take bodies of any size
        .route(
            "/api/v1/actions",
            post(store::handle_dispatch).layer(DefaultBodyLimit::disable()),
        )
        // Wizard screens
        .route("/api/v1/wizard", get(wizard::handle_get_wizard))
        .route("/api/v1/wizard/continue", post(wizard::handle_continue))
        .route("/api/v1/wizard/back", post(wizard::handle_back))
        // Reference data and prompts
        .route(
            "/api/v1/dictionaries",
            get(dictionaries::handle_dictionaries),
        )
        .route("/api/v1/prompts/profile", get(prompts::handle_profile_prompt))
        .route(
            "/api/v1/prompts/experiences/:id",
            get(prompts::handle_experience_prompt),
        )
        // Templates, photo and export
        .route("/api/v1/templates", get(templates::handle_list_templates))
        .route("/api/v1/preview", get(templates::handle_preview))
        .route(
            "/api/v1/photo",
            post(export::handle_photo_upload).layer(DefaultBodyLimit::disable()),
        )
        .route("/api/v1/export", post(export::handle_export))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::atomic::Ordering;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::export::photo::to_data_url;
    use crate::models::cv::{Experience, VisaType, WizardState};

    async fn send(state: &AppState, req: Request<Body>) -> Response {
        build_router(state.clone()).oneshot(req).await.unwrap()
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn post_empty(uri: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn json_body(res: Response) -> Value {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn png_bytes() -> Vec<u8> {
        let img = RgbImage::from_pixel(40, 30, Rgb([20, 90, 160]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    fn ready_state() -> WizardState {
        let mut state = WizardState::initial();
        state.step = 4;
        state.visa_type = Some(VisaType::H2A);
        let info = &mut state.data.personal_info;
        info.full_name = "Maria da Silva".into();
        info.email = "maria@example.com".into();
        info.photo_data_url = to_data_url(&png_bytes(), Some("image/png")).unwrap();
        state.data.experiences.push(Experience {
            id: "exp_1".into(),
            title: "Farm Worker".into(),
            company: "Sunny Farms".into(),
            start_date: "03/2022".into(),
            is_current: true,
            description_text: "• Harvested apples\n• Loaded trucks".into(),
            ..Default::default()
        });
        state
    }

    #[tokio::test]
    async fn test_health() {
        let state = AppState::for_tests(WizardState::initial());
        let res = send(&state, get_req("/health")).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(json_body(res).await["service"], "h2cv");
    }

    #[tokio::test]
    async fn test_dispatch_applies_and_declines() {
        let state = AppState::for_tests(WizardState::initial());

        let res = send(
            &state,
            post_json("/api/v1/actions", json!({"type": "setVisaType", "visaType": "H2A"})),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = json_body(res).await;
        assert_eq!(body["applied"], true);
        assert_eq!(body["state"]["visaType"], "H2A");

        for _ in 0..4 {
            let res = send(&state, post_json("/api/v1/actions", json!({"type": "addExperience"}))).await;
            assert_eq!(json_body(res).await["applied"], true);
        }
        let res = send(&state, post_json("/api/v1/actions", json!({"type": "addExperience"}))).await;
        let body = json_body(res).await;
        assert_eq!(body["applied"], false, "fifth experience is declined");
        assert_eq!(body["state"]["data"]["experiences"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_dispatch_rejects_unknown_action() {
        let state = AppState::for_tests(WizardState::initial());
        let res = send(&state, post_json("/api/v1/actions", json!({"type": "launchRocket"}))).await;
        assert!(res.status().is_client_error());
    }

    #[tokio::test]
    async fn test_reset_restores_initial_state() {
        let state = AppState::for_tests(ready_state());
        let req = Request::builder()
            .method("DELETE")
            .uri("/api/v1/state")
            .body(Body::empty())
            .unwrap();
        let res = send(&state, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = json_body(res).await;
        assert_eq!(body, serde_json::to_value(WizardState::initial()).unwrap());
    }

    #[tokio::test]
    async fn test_wizard_continue_is_guarded() {
        let state = AppState::for_tests(WizardState::initial());

        let res = send(&state, post_empty("/api/v1/wizard/continue")).await;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json_body(res).await["error"]["code"], "STEP_INCOMPLETE");

        send(
            &state,
            post_json("/api/v1/actions", json!({"type": "setVisaType", "visaType": "H2B"})),
        )
        .await;
        let res = send(&state, post_empty("/api/v1/wizard/continue")).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = json_body(res).await;
        assert_eq!(body["step"], 2);
        assert_eq!(body["payload"]["kind"], "form");
        assert_eq!(body["payload"]["skillCounter"], "0/16");

        let res = send(&state, post_empty("/api/v1/wizard/back")).await;
        assert_eq!(json_body(res).await["step"], 1);
    }

    #[tokio::test]
    async fn test_dictionaries_follow_query_then_state() {
        let state = AppState::for_tests(WizardState::initial());

        let res = send(&state, get_req("/api/v1/dictionaries?visaType=H2A")).await;
        let body = json_body(res).await;
        assert_eq!(body["skills"].as_array().unwrap().len(), 29);
        assert_eq!(body["languages"].as_array().unwrap().len(), 3);

        let res = send(&state, get_req("/api/v1/dictionaries")).await;
        let body = json_body(res).await;
        assert_eq!(body["visaType"], Value::Null);
        assert_eq!(body["skills"].as_array().unwrap().len(), 30);
    }

    #[tokio::test]
    async fn test_prompts() {
        let state = AppState::for_tests(ready_state());

        let res = send(&state, get_req("/api/v1/prompts/profile")).await;
        let prompt = json_body(res).await["prompt"].as_str().unwrap().to_string();
        assert!(prompt.contains("H2-A"));
        assert!(prompt.contains("None provided"));

        let res = send(&state, get_req("/api/v1/prompts/experiences/exp_1")).await;
        assert_eq!(res.status(), StatusCode::OK);
        let prompt = json_body(res).await["prompt"].as_str().unwrap().to_string();
        assert!(prompt.contains("Farm Worker"));

        let res = send(&state, get_req("/api/v1/prompts/experiences/exp_missing")).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_templates_and_preview() {
        let state = AppState::for_tests(ready_state());

        let res = send(&state, get_req("/api/v1/templates")).await;
        let body = json_body(res).await;
        assert_eq!(body["activeTemplateId"], "template1");
        assert_eq!(body["templates"].as_array().unwrap().len(), 5);

        let res = send(&state, get_req("/api/v1/preview")).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = json_body(res).await;
        assert_eq!(body["templateId"], "template1");
        assert_eq!(body["header"]["name"], "Maria da Silva");
    }

    fn photo_upload(bytes: &[u8]) -> Request<Body> {
        let boundary = "XBOUNDARYX";
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"photo\"; filename=\"me.png\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/v1/photo")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    /// A phone-camera sized file, past axum's 2 MB default body limit.
    fn large_photo() -> Vec<u8> {
        let mut bytes = png_bytes();
        bytes.resize(3 * 1024 * 1024, 0x5a);
        bytes
    }

    #[tokio::test]
    async fn test_photo_upload_stores_data_url() {
        let state = AppState::for_tests(WizardState::initial());
        let res = send(&state, photo_upload(&png_bytes())).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = json_body(res).await;
        assert_eq!(body["applied"], true);
        let url = body["state"]["data"]["personalInfo"]["photoDataUrl"]
            .as_str()
            .unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn test_large_photo_upload_is_accepted() {
        let state = AppState::for_tests(WizardState::initial());
        let photo = large_photo();
        let res = send(&state, photo_upload(&photo)).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(json_body(res).await["applied"], true);

        let stored = state.lock_store().unwrap().state().data.personal_info.photo_data_url.clone();
        assert_eq!(stored, to_data_url(&photo, Some("image/png")).unwrap());
    }

    #[tokio::test]
    async fn test_large_photo_action_is_accepted() {
        let state = AppState::for_tests(WizardState::initial());
        let url = to_data_url(&large_photo(), Some("image/png")).unwrap();
        assert!(url.len() > 4 * 1024 * 1024);

        let res = send(
            &state,
            post_json("/api/v1/actions", json!({"type": "setPhotoDataUrl", "url": url})),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(json_body(res).await["applied"], true);
        assert_eq!(state.lock_store().unwrap().state().data.personal_info.photo_data_url, url);
    }

    #[tokio::test]
    async fn test_export_without_visa_is_rejected() {
        let state = AppState::for_tests(WizardState::initial());
        let res = send(&state, post_empty("/api/v1/export")).await;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json_body(res).await["error"]["code"], "EXPORT_TARGET_MISSING");
        assert!(!state.exporting.load(Ordering::Acquire));
    }

    #[tokio::test]
    async fn test_export_requires_complete_cv() {
        let mut initial = ready_state();
        initial.data.personal_info.photo_data_url.clear();
        let state = AppState::for_tests(initial);
        let res = send(&state, post_empty("/api/v1/export")).await;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json_body(res).await["error"]["code"], "EXPORT_NOT_READY");
    }

    #[tokio::test]
    async fn test_export_returns_pdf_download() {
        let state = AppState::for_tests(ready_state());
        let res = send(&state, post_empty("/api/v1/export")).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            res.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Maria_da_Silva_H2A.pdf\""
        );
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(bytes.windows(10).any(|w| w == b"/DCTDecode"));
        assert!(!state.exporting.load(Ordering::Acquire), "flag released");
    }

    #[tokio::test]
    async fn test_second_export_conflicts_while_one_runs() {
        let state = AppState::for_tests(ready_state());
        state.exporting.store(true, Ordering::Release);
        let res = send(&state, post_empty("/api/v1/export")).await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
        assert!(state.exporting.load(Ordering::Acquire), "running export keeps its flag");
    }
}
