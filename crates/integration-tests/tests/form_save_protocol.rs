//! The save protocol end-to-end: call ordering, partial-failure reporting,
//! and what each outcome leaves behind in the form.

use leafpress_admin::{IncomingFile, ProductForm, SaveError, SavePhase, SaveWarning};
use leafpress_core::{Category, ImageRef};
use leafpress_integration_tests::{GatewayCall, RecordingGateway, stored_product};
use rust_decimal::Decimal;

const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

fn png(name: &str, len: usize) -> IncomingFile {
    IncomingFile {
        file_name: name.to_string(),
        content_type: "image/png".to_string(),
        bytes: vec![0u8; len],
    }
}

/// A filled-in create form with one staged image.
fn create_form() -> ProductForm {
    let mut form = ProductForm::new(MAX_IMAGE_BYTES);
    form.set_title("Notebook");
    form.set_description("x");
    form.set_original_price("100");
    form.set_discount_percent("10");
    form.set_stock("5");
    form.set_category(Some(Category::Paper));
    form.stage_files(vec![png("cover.png", 1024 * 1024)]);
    form
}

#[tokio::test]
async fn create_calls_create_then_upload_in_order() {
    let gateway = RecordingGateway::new();
    let mut form = create_form();

    let report = form.save(&gateway).await.expect("save succeeds");

    assert!(report.created);
    assert!(report.is_clean());
    assert_eq!(report.product_id.as_str(), "created-1");
    assert_eq!(form.phase(), SavePhase::Complete);

    let calls = gateway.calls();
    assert_eq!(calls.len(), 2);
    match &calls[..] {
        [
            GatewayCall::CreateProduct { fields },
            GatewayCall::UploadProductImages { id, file_names },
        ] => {
            assert_eq!(fields.discount_percent, Decimal::new(10, 0));
            assert!(fields.tags.is_empty());
            assert_eq!(fields.stock, 5);
            assert_eq!(id.as_str(), "created-1");
            assert_eq!(file_names, &vec!["cover.png".to_string()]);
        }
        other => panic!("unexpected call sequence: {other:?}"),
    }

    // Uploaded files are drained and their previews released.
    assert!(form.images().pending_upload().is_empty());
    assert_eq!(form.preview_registry().live_count(), 0);
}

#[tokio::test]
async fn edit_orders_update_remove_upload() {
    let gateway = RecordingGateway::new();
    let product = stored_product("p1", &["/a.png", "/b.png"]);
    let mut form = ProductForm::load(MAX_IMAGE_BYTES, &product);

    assert!(form.mark_for_deletion(&"/a.png".into()));
    form.stage_files(vec![png("new.png", 512)]);

    let report = form.save(&gateway).await.expect("save succeeds");
    assert!(!report.created);
    assert!(report.is_clean());

    let calls = gateway.calls();
    match &calls[..] {
        [
            GatewayCall::UpdateProduct { id, images, .. },
            GatewayCall::RemoveProductImages { refs, .. },
            GatewayCall::UploadProductImages { file_names, .. },
        ] => {
            assert_eq!(id.as_str(), "p1");
            // The surviving current image is the authoritative list.
            assert_eq!(images, &vec![ImageRef::new("/b.png")]);
            assert_eq!(refs, &vec![ImageRef::new("/a.png")]);
            assert_eq!(file_names, &vec!["new.png".to_string()]);
        }
        other => panic!("unexpected call sequence: {other:?}"),
    }

    // Both pending sets were committed.
    assert!(form.images().pending_delete().is_empty());
    assert!(form.images().pending_upload().is_empty());
}

#[tokio::test]
async fn upload_failure_does_not_undo_the_update() {
    let gateway = RecordingGateway::new().with_failing_upload();
    let product = stored_product("p1", &["/a.png"]);
    let mut form = ProductForm::load(MAX_IMAGE_BYTES, &product);
    form.set_stock("50");
    form.stage_files(vec![png("new.png", 512)]);

    let report = form.save(&gateway).await.expect("core save still succeeds");

    assert_eq!(form.phase(), SavePhase::Complete);
    assert_eq!(report.warnings.len(), 1);
    assert!(matches!(report.warnings[0], SaveWarning::ImageUpload(_)));

    // Exactly one update call; no retry, no rollback.
    let update_calls = gateway
        .calls()
        .iter()
        .filter(|c| matches!(c, GatewayCall::UpdateProduct { .. }))
        .count();
    assert_eq!(update_calls, 1);

    // The failed files stay staged for a later retry.
    assert_eq!(form.images().pending_upload().len(), 1);
    assert!(form.has_unsaved_changes());
}

#[tokio::test]
async fn delete_failure_still_runs_the_upload() {
    let gateway = RecordingGateway::new().with_failing_remove();
    let product = stored_product("p1", &["/a.png", "/b.png"]);
    let mut form = ProductForm::load(MAX_IMAGE_BYTES, &product);

    assert!(form.mark_for_deletion(&"/b.png".into()));
    form.stage_files(vec![png("new.png", 512)]);

    let report = form.save(&gateway).await.expect("core save still succeeds");

    assert_eq!(report.warnings.len(), 1);
    assert!(matches!(report.warnings[0], SaveWarning::ImageDelete(_)));

    // Upload ran despite the delete failure.
    let calls = gateway.calls();
    assert!(matches!(
        calls.last(),
        Some(GatewayCall::UploadProductImages { .. })
    ));

    // The failed deletion mark is retained for retry.
    assert_eq!(form.images().pending_delete(), vec![ImageRef::new("/b.png")]);
    // The upload succeeded, so staged files are gone.
    assert!(form.images().pending_upload().is_empty());
}

#[tokio::test]
async fn core_failure_aborts_before_image_steps() {
    let gateway = RecordingGateway::new().with_failing_update();
    let product = stored_product("p1", &["/a.png", "/b.png"]);
    let mut form = ProductForm::load(MAX_IMAGE_BYTES, &product);

    assert!(form.mark_for_deletion(&"/a.png".into()));
    form.stage_files(vec![png("new.png", 512)]);

    let error = form.save(&gateway).await.expect_err("update fails");
    assert!(matches!(error, SaveError::Core(_)));
    assert_eq!(form.phase(), SavePhase::Failed);

    // Only the update was attempted.
    assert_eq!(gateway.calls().len(), 1);
    assert!(matches!(
        gateway.calls()[0],
        GatewayCall::UpdateProduct { .. }
    ));

    // Nothing was committed; both pending sets survive.
    assert_eq!(form.images().pending_delete().len(), 1);
    assert_eq!(form.images().pending_upload().len(), 1);
}

#[tokio::test]
async fn create_failure_is_fatal_and_keeps_staged_files() {
    let gateway = RecordingGateway::new().with_failing_create();
    let mut form = create_form();

    let error = form.save(&gateway).await.expect_err("create fails");
    assert!(matches!(error, SaveError::Core(_)));
    assert_eq!(form.phase(), SavePhase::Failed);
    assert_eq!(gateway.calls().len(), 1);
    assert_eq!(form.images().pending_upload().len(), 1);
    assert!(form.product_id().is_none());
}

#[tokio::test]
async fn partial_upload_keeps_the_unsent_tail_staged() {
    let gateway = RecordingGateway::new().with_partial_upload(1);
    let mut form = create_form();
    form.stage_files(vec![png("second.png", 512)]);

    let report = form.save(&gateway).await.expect("save succeeds");

    assert_eq!(report.warnings.len(), 1);
    let SaveWarning::ImageUpload(message) = &report.warnings[0] else {
        panic!("expected upload warning");
    };
    assert!(message.contains("1 of 2"), "message: {message}");

    // The accepted prefix is drained; the tail stays staged in order.
    let staged: Vec<&str> = form
        .images()
        .pending_upload()
        .iter()
        .map(|s| s.file_name.as_str())
        .collect();
    assert_eq!(staged, vec!["second.png"]);
}

#[tokio::test]
async fn save_after_complete_can_retry_retained_work() {
    let gateway = RecordingGateway::new().with_failing_upload();
    let mut form = create_form();

    let first = form.save(&gateway).await.expect("first save completes");
    assert_eq!(first.warnings.len(), 1);
    assert_eq!(form.images().pending_upload().len(), 1);

    // A second submit on the now-persisted product retries just the upload.
    let retry_gateway = RecordingGateway::new();
    let second = form.save(&retry_gateway).await.expect("retry succeeds");
    assert!(second.is_clean());
    assert!(!second.created);

    let calls = retry_gateway.calls();
    assert_eq!(calls.len(), 2);
    assert!(matches!(calls[0], GatewayCall::UpdateProduct { .. }));
    assert!(matches!(calls[1], GatewayCall::UploadProductImages { .. }));
    assert!(form.images().pending_upload().is_empty());
}
