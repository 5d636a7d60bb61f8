//! Submit-time validation: bad drafts never reach the network, and the
//! error set names exactly the violated fields.

use leafpress_admin::{Field, IncomingFile, ProductForm, SaveError, SavePhase};
use leafpress_core::Category;
use leafpress_integration_tests::{RecordingGateway, stored_product};

const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

fn png(name: &str, len: usize) -> IncomingFile {
    IncomingFile {
        file_name: name.to_string(),
        content_type: "image/png".to_string(),
        bytes: vec![0u8; len],
    }
}

#[tokio::test]
async fn empty_draft_is_rejected_with_no_network_calls() {
    let gateway = RecordingGateway::new();
    let mut form = ProductForm::new(MAX_IMAGE_BYTES);

    let error = form.save(&gateway).await.expect_err("empty draft");

    let SaveError::Rejected(errors) = error else {
        panic!("expected Rejected, got {error:?}");
    };
    assert_eq!(
        errors.fields(),
        vec![
            Field::Title,
            Field::Description,
            Field::OriginalPrice,
            Field::Stock,
            Field::Category,
            Field::Images,
        ]
    );
    assert!(gateway.calls().is_empty());
    assert_eq!(form.phase(), SavePhase::Rejected);
}

#[tokio::test]
async fn rejection_marks_every_field_touched() {
    let gateway = RecordingGateway::new();
    let mut form = ProductForm::new(MAX_IMAGE_BYTES);

    let _ = form.save(&gateway).await;

    for field in [
        Field::Title,
        Field::Description,
        Field::OriginalPrice,
        Field::DiscountPercent,
        Field::Stock,
        Field::Category,
        Field::Images,
    ] {
        assert!(form.is_touched(field), "{field} should be touched");
    }
}

#[tokio::test]
async fn single_bad_field_is_the_only_error() {
    let gateway = RecordingGateway::new();
    let mut form = ProductForm::new(MAX_IMAGE_BYTES);
    form.set_title("Notebook");
    form.set_description("x");
    form.set_original_price("100");
    form.set_discount_percent("150"); // out of range
    form.set_stock("5");
    form.set_category(Some(Category::Paper));
    form.stage_files(vec![png("cover.png", 64)]);

    let error = form.save(&gateway).await.expect_err("bad discount");

    let SaveError::Rejected(errors) = error else {
        panic!("expected Rejected, got {error:?}");
    };
    assert_eq!(errors.fields(), vec![Field::DiscountPercent]);
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn discount_boundaries_are_inclusive() {
    for boundary in ["0", "100"] {
        let gateway = RecordingGateway::new();
        let mut form = ProductForm::new(MAX_IMAGE_BYTES);
        form.set_title("Notebook");
        form.set_description("x");
        form.set_original_price("100");
        form.set_discount_percent(boundary);
        form.set_stock("5");
        form.set_category(Some(Category::Paper));
        form.stage_files(vec![png("cover.png", 64)]);

        let report = form.save(&gateway).await.expect("boundary discount valid");
        assert!(report.is_clean(), "discount {boundary}");
    }
}

#[tokio::test]
async fn create_requires_at_least_one_image() {
    let gateway = RecordingGateway::new();
    let mut form = ProductForm::new(MAX_IMAGE_BYTES);
    form.set_title("Notebook");
    form.set_description("x");
    form.set_original_price("100");
    form.set_stock("5");
    form.set_category(Some(Category::Paper));

    let error = form.save(&gateway).await.expect_err("no images");

    let SaveError::Rejected(errors) = error else {
        panic!("expected Rejected, got {error:?}");
    };
    assert_eq!(errors.fields(), vec![Field::Images]);
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn edit_may_end_with_zero_images() {
    let gateway = RecordingGateway::new();
    let product = stored_product("p1", &["/a.png"]);
    let mut form = ProductForm::load(MAX_IMAGE_BYTES, &product);

    assert!(form.mark_for_deletion(&"/a.png".into()));
    let report = form.save(&gateway).await.expect("empty image set on edit");

    assert!(!report.created);
    assert_eq!(form.phase(), SavePhase::Complete);
}
